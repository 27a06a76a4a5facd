// src/error.rs
use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CrawlerError>;

/// Broad failure category, used to decide how a ticker failure is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Fetch,
    Parse,
    Data,
    Io,
}

#[derive(Debug, Error)]
pub enum CrawlerError {
    #[error("{0} not set in environment")]
    MissingCredential(&'static str),

    #[error("invalid endpoint URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("{source_name} request failed: {error}")]
    Request {
        source_name: &'static str,
        #[source]
        error: reqwest::Error,
    },

    #[error("{source_name} returned HTTP {status}")]
    Status {
        source_name: &'static str,
        status: StatusCode,
    },

    #[error("unexpected {source_name} response: {error}")]
    Parse {
        source_name: &'static str,
        #[source]
        error: serde_json::Error,
    },

    #[error("no data found for ticker {0}")]
    NoData(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl CrawlerError {
    pub fn request(source_name: &'static str, error: reqwest::Error) -> Self {
        Self::Request { source_name, error }
    }

    pub fn parse(source_name: &'static str, error: serde_json::Error) -> Self {
        Self::Parse { source_name, error }
    }

    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingCredential(_) | Self::InvalidUrl { .. } => ErrorKind::Config,
            Self::Request { .. } | Self::Status { .. } => ErrorKind::Fetch,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::NoData(_) => ErrorKind::Data,
            Self::Io(_) | Self::Csv(_) => ErrorKind::Io,
        }
    }
}
