//! Search command implementation.

use crate::config::{Config, OutputFormat};
use crate::format::Formatter;
use crate::mlit::models::{SearchQuery, SearchResponse};
use crate::mlit::{MlitClient, PageFetch, ScrapeOptions, TableScraper};
use anyhow::{Context, Result};
use tracing::info;

/// Executes a defect database search.
pub struct SearchCommand {
    config: Config,
}

impl SearchCommand {
    /// Creates a new search command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the search and returns formatted output.
    pub async fn execute(&self, query: &SearchQuery) -> Result<String> {
        let client = MlitClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client, query).await
    }

    /// Executes the search with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl PageFetch,
        query: &SearchQuery,
    ) -> Result<String> {
        info!(
            manufacturer = query.manufacturer.as_deref().unwrap_or(""),
            model = query.model.as_deref().unwrap_or(""),
            "searching defect database"
        );

        let scraper = TableScraper::new(client, ScrapeOptions::from(&self.config));
        let result = scraper.scrape(&query.to_page()).await?;

        info!("Found {} records across {} pages", result.count(), result.pages_visited);

        let response = SearchResponse::new(result, query.clone());
        let formatter = Formatter::new(self.config.format);

        // JSON carries the full structured response; the other formats
        // render just the table data.
        Ok(match self.config.format {
            OutputFormat::Json => formatter.format_json(&response),
            _ => formatter.format_records(&response.header, &response.records),
        })
    }
}
