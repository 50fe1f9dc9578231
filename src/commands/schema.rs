//! Schema and sample commands: table metadata and a small data preview.

use crate::config::Config;
use crate::format::Formatter;
use crate::mlit::models::{Record, SchemaInfo, SearchQuery};
use crate::mlit::{MlitClient, PageFetch, Pager, RowExtractor, ScrapeOptions, TableScraper};
use anyhow::{Context, Result};
use serde::Serialize;

/// How many records the sample command returns.
const SAMPLE_SIZE: usize = 5;

/// Reports the structure of the defect table.
pub struct SchemaCommand {
    config: Config,
}

impl SchemaCommand {
    /// Creates a new schema command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetches the first results page and returns its header metadata as
    /// JSON. Only the header is read; no records are extracted.
    pub async fn execute(&self) -> Result<String> {
        let client = MlitClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client).await
    }

    /// Executes with a provided client (for testing).
    pub async fn execute_with_client(&self, client: &impl PageFetch) -> Result<String> {
        let extractor = RowExtractor::new(&self.config.cell_tag, self.config.expected_columns)?;
        let pager = Pager::open(
            client,
            &SearchQuery::default().to_page(),
            &self.config.next_page_label,
        )
        .await?;

        let header = extractor.header(pager.html());
        let info = SchemaInfo::new(header, self.config.base_url.clone());

        Ok(Formatter::new(self.config.format).format_json(&info))
    }
}

/// First records of the database, for eyeballing the data shape.
#[derive(Debug, Serialize)]
struct SampleData {
    header: Vec<String>,
    sample_records: Vec<Record>,
    note: String,
}

/// Returns a small sample of defect records.
pub struct SampleCommand {
    config: Config,
}

impl SampleCommand {
    /// Creates a new sample command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Scrapes the first page and returns up to five records as JSON.
    pub async fn execute(&self) -> Result<String> {
        let client = MlitClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client).await
    }

    /// Executes with a provided client (for testing).
    pub async fn execute_with_client(&self, client: &impl PageFetch) -> Result<String> {
        let mut options = ScrapeOptions::from(&self.config);
        options.max_pages = Some(1);

        let scraper = TableScraper::new(client, options);
        let mut result = scraper.scrape(&SearchQuery::default().to_page()).await?;
        result.records.truncate(SAMPLE_SIZE);

        let sample = SampleData {
            header: result.header,
            sample_records: result.records,
            note: format!("First {} records from the first results page", SAMPLE_SIZE),
        };

        Ok(Formatter::new(self.config.format).format_json(&sample))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{page, MockFetch};

    fn make_test_config() -> Config {
        Config { expected_columns: 2, delay_ms: 0, ..Config::default() }
    }

    #[tokio::test]
    async fn test_schema_command() {
        let client = MockFetch::new(&[(
            SearchQuery::default().to_page(),
            page(&["番号", "メーカー"], &[&["1", "スズキ"]], None),
        )]);

        let cmd = SchemaCommand::new(make_test_config());
        let output = cmd.execute_with_client(&client).await.unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["column_count"], 2);
        assert_eq!(parsed["columns"][1], "メーカー");
        // Schema reads the header only; a single fetch.
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_schema_command_reports_unexpected_width() {
        // Unlike a scrape, schema reporting does not enforce the expected
        // column count; it reports what the site serves.
        let client = MockFetch::new(&[(
            SearchQuery::default().to_page(),
            page(&["a", "b", "c"], &[], None),
        )]);

        let cmd = SchemaCommand::new(make_test_config());
        let output = cmd.execute_with_client(&client).await.unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["column_count"], 3);
    }

    #[tokio::test]
    async fn test_sample_command_truncates() {
        let rows: Vec<Vec<String>> =
            (1..=8).map(|i| vec![i.to_string(), format!("メーカー{}", i)]).collect();
        let row_refs: Vec<Vec<&str>> =
            rows.iter().map(|r| r.iter().map(String::as_str).collect()).collect();
        let row_slices: Vec<&[&str]> = row_refs.iter().map(Vec::as_slice).collect();

        let client = MockFetch::new(&[(
            SearchQuery::default().to_page(),
            page(&["番号", "メーカー"], &row_slices, Some("p2.html")),
        )]);

        let cmd = SampleCommand::new(make_test_config());
        let output = cmd.execute_with_client(&client).await.unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["sample_records"].as_array().unwrap().len(), 5);
        // Sample never follows the next-page link.
        assert_eq!(client.calls(), 1);
    }
}
