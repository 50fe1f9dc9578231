//! Scrape orchestration: header check, per-page extraction, page budget,
//! and the courtesy delay between page fetches.

use crate::config::Config;
use crate::mlit::client::PageFetch;
use crate::mlit::error::ScrapeError;
use crate::mlit::extract::RowExtractor;
use crate::mlit::models::ScrapeResult;
use crate::mlit::pager::Pager;
use rand::RngExt;
use std::time::Duration;
use tracing::{debug, info};

/// Tuning knobs for one scrape session, lifted from [`Config`].
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    /// Required table width; anything else is a fatal schema mismatch.
    pub expected_columns: usize,
    /// Page budget; `None` scrapes until the next-page link disappears.
    pub max_pages: Option<u32>,
    /// Base delay between page fetches in milliseconds.
    pub delay_ms: u64,
    /// Random jitter added to the delay (0 to this value).
    pub delay_jitter_ms: u64,
    /// Markup tag holding one cell's text.
    pub cell_tag: String,
    /// `alt` text of the next-page icon.
    pub next_page_label: String,
}

impl From<&Config> for ScrapeOptions {
    fn from(config: &Config) -> Self {
        Self {
            expected_columns: config.expected_columns,
            max_pages: config.max_pages,
            delay_ms: config.delay_ms,
            delay_jitter_ms: config.delay_jitter_ms,
            cell_tag: config.cell_tag.clone(),
            next_page_label: config.next_page_label.clone(),
        }
    }
}

/// Drives one scrape session over a [`PageFetch`] collaborator.
///
/// Strictly sequential: each page's navigation link comes from the previous
/// page's markup, so fetches never overlap and the inter-page delay is the
/// only suspension point besides the fetches themselves.
pub struct TableScraper<'a, C: PageFetch> {
    client: &'a C,
    options: ScrapeOptions,
}

impl<'a, C: PageFetch> TableScraper<'a, C> {
    /// Creates a scraper over the given client.
    pub fn new(client: &'a C, options: ScrapeOptions) -> Self {
        Self { client, options }
    }

    /// Scrapes the result set starting from `initial_page`.
    ///
    /// The header is extracted once from the first page and must match the
    /// expected column count before any row extraction happens. Records
    /// then accumulate page by page until the next-page link disappears or
    /// the page budget runs out.
    pub async fn scrape(&self, initial_page: &str) -> Result<ScrapeResult, ScrapeError> {
        let extractor = RowExtractor::new(&self.options.cell_tag, self.options.expected_columns)?;
        let mut pager =
            Pager::open(self.client, initial_page, &self.options.next_page_label).await?;

        let header = extractor.header(pager.html());
        if header.len() != self.options.expected_columns {
            return Err(ScrapeError::SchemaMismatch {
                found: header.len(),
                expected: self.options.expected_columns,
            });
        }
        debug!(columns = header.len(), "header validated");

        let mut records = Vec::new();
        let mut pages_visited: u32 = 0;

        while pager.has_next() && self.within_budget(pages_visited) {
            let page_records = extractor.records(pager.html());
            debug!(page = pages_visited + 1, records = page_records.len(), "extracted page");
            records.extend(page_records);
            pages_visited += 1;

            // Courtesy delay before touching the site again; skipped once
            // the budget leaves nothing more to process.
            if self.within_budget(pages_visited) {
                self.delay().await;
                pager.advance().await?;
            }
        }

        info!(pages = pages_visited, records = records.len(), "scrape complete");

        Ok(ScrapeResult { header, records, pages_visited })
    }

    fn within_budget(&self, pages_visited: u32) -> bool {
        self.options.max_pages.is_none_or(|max| pages_visited < max)
    }

    /// Sleeps the configured inter-page delay plus random jitter.
    async fn delay(&self) {
        if self.options.delay_ms == 0 {
            return;
        }

        let jitter = if self.options.delay_jitter_ms > 0 {
            rand::rng().random_range(0..=self.options.delay_jitter_ms)
        } else {
            0
        };

        let total_delay = self.options.delay_ms + jitter;
        debug!("Delaying {}ms", total_delay);
        tokio::time::sleep(Duration::from_millis(total_delay)).await;
    }
}
