// src/config.rs
use log::warn;
use std::env;
use std::time::Duration;

pub const API_KEY_VAR: &str = "PERPLEXITY_API_KEY";

pub const DEFAULT_QUOTE_SUMMARY_URL: &str = "https://query1.finance.yahoo.com/v11/finance/quoteSummary";
pub const DEFAULT_PERPLEXITY_URL: &str = "https://api.perplexity.ai/chat/completions";
pub const DEFAULT_PERPLEXITY_MODEL: &str = "pplx-70b-online";

#[derive(Debug, Clone)]
pub struct YahooConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for YahooConfig {
    fn default() -> Self {
        YahooConfig {
            base_url: DEFAULT_QUOTE_SUMMARY_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PerplexityConfig {
    pub api_url: String,
    pub model: String,
    // Only the fallback path needs it, so a missing key is reported per ticker.
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for PerplexityConfig {
    fn default() -> Self {
        PerplexityConfig {
            api_url: DEFAULT_PERPLEXITY_URL.to_string(),
            model: DEFAULT_PERPLEXITY_MODEL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub yahoo: YahooConfig,
    pub perplexity: PerplexityConfig,
}

impl Config {
    /// Build the configuration from the process environment. Call after
    /// `dotenv()` so values from `.env` are visible.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        Config {
            yahoo: YahooConfig {
                base_url: non_empty("YAHOO_QUOTE_SUMMARY_URL").unwrap_or(defaults.yahoo.base_url),
                timeout: secs_or(non_empty("YAHOO_TIMEOUT_SECS"), "YAHOO_TIMEOUT_SECS", defaults.yahoo.timeout),
            },
            perplexity: PerplexityConfig {
                api_url: non_empty("PERPLEXITY_API_URL").unwrap_or(defaults.perplexity.api_url),
                model: non_empty("PERPLEXITY_MODEL").unwrap_or(defaults.perplexity.model),
                api_key: non_empty(API_KEY_VAR),
                timeout: secs_or(
                    non_empty("PERPLEXITY_TIMEOUT_SECS"),
                    "PERPLEXITY_TIMEOUT_SECS",
                    defaults.perplexity.timeout,
                ),
            },
        }
    }
}

fn secs_or(value: Option<String>, name: &str, default: Duration) -> Duration {
    match value {
        None => default,
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                warn!("{} must be a positive number of seconds, got {:?}; using {:?}", name, raw, default);
                default
            }
        },
    }
}
