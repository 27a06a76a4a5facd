// src/models.rs
use serde::{Deserialize, Serialize};

/// Metrics collected for one ticker. `ticker` is always the symbol that was
/// requested, whichever source filled in the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRecord {
    pub ticker: String,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub eps: Option<f64>,
    pub dividend_rate: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub shares_outstanding: Option<f64>,
}

impl FinancialRecord {
    /// A record with only the ticker set.
    pub fn empty(ticker: impl Into<String>) -> Self {
        FinancialRecord {
            ticker: ticker.into(),
            price: None,
            currency: None,
            eps: None,
            dividend_rate: None,
            dividend_yield: None,
            shares_outstanding: None,
        }
    }

    /// Cells in output column order; missing values render as empty strings.
    pub fn to_row(&self) -> [String; 7] {
        fn num(value: Option<f64>) -> String {
            value.map(|v| v.to_string()).unwrap_or_default()
        }

        [
            self.ticker.clone(),
            num(self.price),
            self.currency.clone().unwrap_or_default(),
            num(self.eps),
            num(self.dividend_rate),
            num(self.dividend_yield),
            num(self.shares_outstanding),
        ]
    }
}

/// Which upstream produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Primary,
    Fallback,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Source::Primary => write!(f, "Yahoo Finance"),
            Source::Fallback => write!(f, "Perplexity"),
        }
    }
}
