// src/lib.rs

pub mod config;
pub mod crawler;
pub mod error;
pub mod models;
pub mod services;

pub use crawler::{CrawlReport, Crawler};
pub use error::{CrawlerError, ErrorKind};
pub use models::FinancialRecord;
