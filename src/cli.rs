use clap::Parser;
use std::path::PathBuf;

/// Fetch financial data from Yahoo Finance, falling back to Perplexity.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Ticker symbols to fetch, processed in the order given.
    #[arg(required = true)]
    pub tickers: Vec<String>,

    /// Output CSV file.
    #[arg(short, long, default_value = "financial_data.csv")]
    pub output: PathBuf,
}
