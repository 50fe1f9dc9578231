//! MLIT-specific modules: HTTP client, table extraction, pagination, and
//! scrape orchestration.

pub mod client;
pub mod error;
pub mod extract;
pub mod models;
pub mod normalize;
pub mod pager;
pub mod scraper;
pub mod selectors;

pub use client::{MlitClient, PageFetch};
pub use error::{ScrapeError, Stage};
pub use extract::RowExtractor;
pub use models::{Record, ScrapeResult, SearchQuery};
pub use pager::Pager;
pub use scraper::{ScrapeOptions, TableScraper};
