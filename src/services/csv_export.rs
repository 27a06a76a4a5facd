//src/services/csv_export.rs
use csv::{Reader, WriterBuilder};
use log::info;
use std::path::Path;

use crate::error::Result;
use crate::models::FinancialRecord;

pub const HEADER: [&str; 7] = [
    "ticker",
    "price",
    "currency",
    "eps",
    "dividendRate",
    "dividendYield",
    "sharesOutstanding",
];

/// Write `records` to `path`, replacing any existing file. The header is
/// written even when there are no records.
pub fn write_csv(records: &[FinancialRecord], path: &Path) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;

    writer.write_record(HEADER)?;
    for record in records {
        writer.write_record(record.to_row())?;
    }
    writer.flush()?;

    info!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}

/// Read back a file produced by [`write_csv`]; empty cells become `None`.
pub fn read_csv(path: &Path) -> Result<Vec<FinancialRecord>> {
    let mut rdr = Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in rdr.deserialize::<FinancialRecord>() {
        records.push(row?);
    }
    Ok(records)
}
