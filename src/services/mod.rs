// src/services/mod.rs
pub mod csv_export;
pub mod perplexity;
pub mod yahoo;
