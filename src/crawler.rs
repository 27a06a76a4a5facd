// src/crawler.rs
use log::{info, warn};
use reqwest::Client;

use crate::config::Config;
use crate::error::{CrawlerError, Result};
use crate::models::{FinancialRecord, Source};
use crate::services::{perplexity, yahoo};

/// Outcome of one run: successful records in input order, plus the tickers
/// that produced nothing.
#[derive(Debug, Default)]
pub struct CrawlReport {
    pub records: Vec<FinancialRecord>,
    pub skipped: Vec<String>,
}

pub struct Crawler {
    client: Client,
    config: Config,
}

impl Crawler {
    pub fn new(client: Client, config: Config) -> Self {
        Crawler { client, config }
    }

    /// Browser-like client; Yahoo rejects requests without a User-Agent.
    pub fn default_client() -> Result<Client> {
        Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| CrawlerError::request("HTTP client", e))
    }

    /// Try the primary source, then the fallback. Returns the record and the
    /// source that produced it.
    pub async fn fetch_ticker(&self, ticker: &str) -> Result<(FinancialRecord, Source)> {
        let primary_err = match yahoo::fetch_financial_data(&self.client, &self.config.yahoo, ticker).await {
            Ok(record) => return Ok((record, Source::Primary)),
            Err(e) => e,
        };
        info!("Failed to fetch data for {} from {}: {}; trying {}", ticker, Source::Primary, primary_err, Source::Fallback);

        match perplexity::fetch_from_perplexity(&self.client, &self.config.perplexity, ticker).await {
            Ok(record) => Ok((record, Source::Fallback)),
            Err(fallback_err) => {
                warn!(
                    "Skipping {}: {} failed ({}), {} fallback failed ({})",
                    ticker,
                    Source::Primary,
                    primary_err,
                    Source::Fallback,
                    fallback_err
                );
                Err(fallback_err)
            }
        }
    }

    /// Process `tickers` one after another. Failures never abort the run.
    pub async fn run<S: AsRef<str>>(&self, tickers: &[S]) -> CrawlReport {
        let mut report = CrawlReport::default();

        for ticker in tickers {
            let ticker = ticker.as_ref();
            if ticker.trim().is_empty() {
                warn!("Skipping blank ticker symbol");
                report.skipped.push(ticker.to_string());
                continue;
            }

            match self.fetch_ticker(ticker).await {
                Ok((record, source)) => {
                    info!("Collected {} from {}", ticker, source);
                    report.records.push(record);
                }
                Err(_) => report.skipped.push(ticker.to_string()),
            }
        }

        report
    }
}
