//! mlit-crawler - CLI crawler for Japan's MLIT vehicle defect database
//!
//! Scrapes the paginated defect information table, normalizes the Japanese
//! text variants, validates the table shape, and re-exposes the data as
//! CSV, JSON, or plain tables.

pub mod commands;
pub mod config;
pub mod format;
pub mod mlit;

pub use config::Config;
pub use mlit::models::{Record, ScrapeResult, SearchQuery};
pub use mlit::{MlitClient, PageFetch, ScrapeError, TableScraper};
