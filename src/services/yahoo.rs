//src/services/yahoo.rs
use log::{debug, info};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::config::YahooConfig;
use crate::error::{CrawlerError, Result};
use crate::models::FinancialRecord;

const SOURCE_NAME: &str = "Yahoo Finance";
const MODULES: &str = "price,summaryDetail,defaultKeyStatistics";

/// Fetch price, EPS, dividend and share data for `ticker` from the
/// quote-summary endpoint. Fields missing from the response come back as
/// `None`; only a missing result set is an error.
pub async fn fetch_financial_data(
    client: &Client,
    config: &YahooConfig,
    ticker: &str,
) -> Result<FinancialRecord> {
    let url = quote_summary_url(&config.base_url, ticker)?;
    info!("Fetching quote summary for {} from {}", ticker, url);

    let response = client
        .get(url)
        .query(&[("modules", MODULES)])
        .timeout(config.timeout)
        .send()
        .await
        .map_err(|e| CrawlerError::request(SOURCE_NAME, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(CrawlerError::Status { source_name: SOURCE_NAME, status });
    }

    let body = response
        .text()
        .await
        .map_err(|e| CrawlerError::request(SOURCE_NAME, e))?;
    debug!("Quote summary body for {}: {} bytes", ticker, body.len());

    parse_quote_summary(ticker, &body)
}

/// `{base}/{ticker}`, with the ticker percent-encoded as one path segment.
pub fn quote_summary_url(base_url: &str, ticker: &str) -> Result<Url> {
    let invalid = |message: String| CrawlerError::InvalidUrl {
        url: base_url.to_string(),
        message,
    };

    let mut url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| invalid("cannot be a base URL".to_string()))?
        .pop_if_empty()
        .push(ticker);
    Ok(url)
}

/// Extract a record from a raw quote-summary body.
pub fn parse_quote_summary(ticker: &str, body: &str) -> Result<FinancialRecord> {
    let response: QuoteSummaryResponse =
        serde_json::from_str(body).map_err(|e| CrawlerError::parse(SOURCE_NAME, e))?;

    let result = response
        .quote_summary
        .and_then(|summary| summary.result)
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| CrawlerError::NoData(ticker.to_string()))?;

    let price = result.price.unwrap_or_default();
    let details = result.summary_detail.unwrap_or_default();
    let stats = result.default_key_statistics.unwrap_or_default();

    Ok(FinancialRecord {
        ticker: ticker.to_string(),
        price: raw(price.regular_market_price),
        currency: price.currency,
        eps: raw(stats.trailing_eps),
        dividend_rate: raw(details.dividend_rate),
        dividend_yield: raw(details.dividend_yield),
        shares_outstanding: raw(stats.shares_outstanding),
    })
}

fn raw(value: Option<RawValue>) -> Option<f64> {
    value.and_then(|v| v.raw)
}

// de
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: Option<QuoteSummary>,
}

#[derive(Debug, Deserialize)]
struct QuoteSummary {
    result: Option<Vec<QuoteSummaryResult>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryResult {
    price: Option<PriceModule>,
    summary_detail: Option<SummaryDetail>,
    default_key_statistics: Option<KeyStatistics>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceModule {
    regular_market_price: Option<RawValue>,
    currency: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryDetail {
    dividend_rate: Option<RawValue>,
    dividend_yield: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeyStatistics {
    trailing_eps: Option<RawValue>,
    shares_outstanding: Option<RawValue>,
}

// Yahoo wraps numbers as {"raw": 1.23, "fmt": "1.23"}, or {} when absent.
#[derive(Debug, Deserialize)]
struct RawValue {
    raw: Option<f64>,
}
