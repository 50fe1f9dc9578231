//! Statistics command implementation.

use crate::config::Config;
use crate::format::Formatter;
use crate::mlit::models::{DefectStats, SearchQuery};
use crate::mlit::{MlitClient, PageFetch, ScrapeOptions, TableScraper};
use anyhow::{Context, Result};
use tracing::info;

/// Summarizes defect records by manufacturer and model.
pub struct StatsCommand {
    config: Config,
}

impl StatsCommand {
    /// Creates a new stats command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Scrapes matching pages and returns the statistics as JSON.
    pub async fn execute(&self, query: &SearchQuery) -> Result<String> {
        let client = MlitClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client, query).await
    }

    /// Executes with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl PageFetch,
        query: &SearchQuery,
    ) -> Result<String> {
        let scraper = TableScraper::new(client, ScrapeOptions::from(&self.config));
        let result = scraper.scrape(&query.to_page()).await?;

        let stats = DefectStats::from_records(&result.records, query.clone());
        info!(
            defects = stats.total_defects,
            manufacturers = stats.manufacturer_count,
            models = stats.model_count,
            "computed statistics"
        );

        Ok(Formatter::new(self.config.format).format_json(&stats))
    }
}
