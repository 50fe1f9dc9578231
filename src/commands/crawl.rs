//! Crawl command: full export of the defect table to a CSV file.

use crate::config::Config;
use crate::format::csv_document;
use crate::mlit::models::SearchQuery;
use crate::mlit::normalize::remove_all_whitespace;
use crate::mlit::{MlitClient, PageFetch, ScrapeOptions, TableScraper};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Crawls every results page and writes the records to a CSV file.
pub struct CrawlCommand {
    config: Config,
}

impl CrawlCommand {
    /// Creates a new crawl command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the crawl and writes the output file. With `clean`, every field
    /// additionally loses all of its whitespace before writing.
    pub async fn execute(&self, output: &Path, clean: bool) -> Result<String> {
        let client = MlitClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client, output, clean).await
    }

    /// Executes with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl PageFetch,
        output: &Path,
        clean: bool,
    ) -> Result<String> {
        let scraper = TableScraper::new(client, ScrapeOptions::from(&self.config));
        let mut result = scraper.scrape(&SearchQuery::default().to_page()).await?;

        if clean {
            for record in &mut result.records {
                for field in record.iter_mut() {
                    *field = remove_all_whitespace(field);
                }
            }
        }

        let document = csv_document(&result.header, &result.records);
        std::fs::write(output, document)
            .with_context(|| format!("Failed to write CSV file: {}", output.display()))?;

        info!(path = %output.display(), records = result.count(), "crawl written");

        Ok(format!(
            "Wrote {} records from {} pages to {}",
            result.count(),
            result.pages_visited,
            output.display()
        ))
    }
}
