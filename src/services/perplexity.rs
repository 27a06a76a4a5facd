//src/services/perplexity.rs
use log::{debug, info};
use reqwest::Client;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::config::{PerplexityConfig, API_KEY_VAR};
use crate::error::{CrawlerError, Result};
use crate::models::FinancialRecord;

const SOURCE_NAME: &str = "Perplexity";

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Option<Vec<Choice>>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// The record as the model describes it. Types are taken loosely: a number
/// may arrive as a string, and anything unusable is dropped to `None`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelFinancials {
    #[serde(default, deserialize_with = "loose_number")]
    price: Option<f64>,
    #[serde(default, deserialize_with = "loose_string")]
    currency: Option<String>,
    #[serde(default, deserialize_with = "loose_number")]
    eps: Option<f64>,
    #[serde(default, deserialize_with = "loose_number")]
    dividend_rate: Option<f64>,
    #[serde(default, deserialize_with = "loose_number")]
    dividend_yield: Option<f64>,
    #[serde(default, deserialize_with = "loose_number")]
    shares_outstanding: Option<f64>,
}

fn loose_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s
            .trim()
            .replace(',', "")
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite()),
        _ => None,
    })
}

fn loose_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

pub fn build_prompt(ticker: &str) -> String {
    format!(
        "Provide the latest price, EPS and dividend info for {} \
in JSON with keys price, currency, eps, dividendRate, dividendYield, sharesOutstanding.",
        ticker
    )
}

/// Ask the chat-completion API for `ticker`'s metrics. Requires
/// `PERPLEXITY_API_KEY`; the returned record always carries `ticker`.
pub async fn fetch_from_perplexity(
    client: &Client,
    config: &PerplexityConfig,
    ticker: &str,
) -> Result<FinancialRecord> {
    let api_key = config
        .api_key
        .as_deref()
        .ok_or(CrawlerError::MissingCredential(API_KEY_VAR))?;

    let request_body = ChatCompletionRequest {
        model: &config.model,
        messages: vec![ChatMessage {
            role: "user",
            content: build_prompt(ticker),
        }],
    };

    info!("Asking {} ({}) for {}", SOURCE_NAME, config.model, ticker);
    let response = client
        .post(&config.api_url)
        .bearer_auth(api_key)
        .json(&request_body)
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

    let completion: ChatCompletionResponse =
        serde_json::from_str(&body).map_err(|e| CrawlerError::parse(SOURCE_NAME, e))?;

    // An absent `choices` key reads as an empty answer; an empty list is no answer.
    let first_choice = match completion.choices {
        None => None,
        Some(choices) => Some(
            choices
                .into_iter()
                .next()
                .ok_or_else(|| CrawlerError::NoData(ticker.to_string()))?,
        ),
    };
    let content = first_choice
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .unwrap_or_else(|| "{}".to_string());
    debug!("{} answer for {}: {}", SOURCE_NAME, ticker, content);

    parse_model_answer(ticker, &content)
}

/// Parse the model's text as a JSON object, tolerating a Markdown code fence
/// around it. The ticker is forced to the requested symbol.
pub fn parse_model_answer(ticker: &str, content: &str) -> Result<FinancialRecord> {
    let cleaned = content
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    let value: Value =
        serde_json::from_str(cleaned).map_err(|e| CrawlerError::parse(SOURCE_NAME, e))?;
    if !value.is_object() {
        let err = serde_json::Error::custom("expected a JSON object with the requested keys");
        return Err(CrawlerError::parse(SOURCE_NAME, err));
    }
    let data: ModelFinancials =
        serde_json::from_value(value).map_err(|e| CrawlerError::parse(SOURCE_NAME, e))?;

    Ok(FinancialRecord {
        ticker: ticker.to_string(),
        price: data.price,
        currency: data.currency,
        eps: data.eps,
        dividend_rate: data.dividend_rate,
        dividend_yield: data.dividend_yield,
        shares_outstanding: data.shares_outstanding,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn prompt_names_ticker_and_every_key() {
        let prompt = build_prompt("MSFT");
        assert!(prompt.contains("for MSFT in JSON"));
        for key in ["price", "currency", "eps", "dividendRate", "dividendYield", "sharesOutstanding"] {
            assert!(prompt.contains(key), "missing {key}");
        }
    }

    #[test]
    fn ticker_is_overwritten_with_requested_symbol() {
        let answer = r#"{"ticker": "NOT-IT", "price": 410.2, "currency": "USD", "eps": 11.8}"#;
        let record = parse_model_answer("MSFT", answer).unwrap();
        assert_eq!(record.ticker, "MSFT");
        assert_eq!(record.price, Some(410.2));
        assert_eq!(record.eps, Some(11.8));
        assert_eq!(record.dividend_rate, None);
    }

    #[test]
    fn fenced_answers_and_string_numbers_are_accepted() {
        let answer = "```json\n{\"price\": \"1,024.5\", \"dividendYield\": \"n/a\", \"currency\": 978, \"sharesOutstanding\": 7433000000}\n```";
        let record = parse_model_answer("ASML", answer).unwrap();
        assert_eq!(record.price, Some(1024.5));
        assert_eq!(record.dividend_yield, None);
        assert_eq!(record.currency.as_deref(), Some("978"));
        assert_eq!(record.shares_outstanding, Some(7_433_000_000.0));
    }

    #[test]
    fn empty_object_yields_ticker_only() {
        let record = parse_model_answer("IBM", "{}").unwrap();
        assert_eq!(record, FinancialRecord::empty("IBM"));
    }

    #[test]
    fn prose_answer_is_a_parse_error() {
        let err = parse_model_answer("IBM", "I'm sorry, I can't access live market data.").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn array_answers_are_parse_errors() {
        for answer in ["[]", "[1,2]", "[189.5, \"USD\"]", "\"189.5\""] {
            let err = parse_model_answer("IBM", answer).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Parse, "answer: {answer}");
        }
    }

    #[test]
    fn non_finite_numbers_are_dropped() {
        let answer = r#"{"price": "NaN", "eps": "inf", "dividendRate": "-Infinity", "dividendYield": 0.01}"#;
        let record = parse_model_answer("IBM", answer).unwrap();
        assert_eq!(record.price, None);
        assert_eq!(record.eps, None);
        assert_eq!(record.dividend_rate, None);
        assert_eq!(record.dividend_yield, Some(0.01));
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let config = PerplexityConfig {
            api_url: "http://127.0.0.1:9/unreachable".to_string(),
            ..PerplexityConfig::default()
        };
        let err = fetch_from_perplexity(&Client::new(), &config, "IBM").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
