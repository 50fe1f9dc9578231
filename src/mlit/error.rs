//! Error taxonomy for the table scraper.

use thiserror::Error;

/// Which fetch the scraper was performing when a transport error hit.
///
/// The remote markup changes without notice, so fatal errors always name
/// the stage that failed to make diagnosis possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The first fetch of a scrape session, before the header check.
    InitialPage,
    /// A numbered follow-up page reached via the next-page link.
    Page(u32),
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::InitialPage => write!(f, "initial page"),
            Stage::Page(n) => write!(f, "page {}", n),
        }
    }
}

/// Fatal scrape failures.
///
/// Malformed rows are deliberately *not* represented here; they are logged
/// and dropped during extraction so a single broken row never aborts a
/// multi-page crawl.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The header column count diverged from the configured table width.
    /// Raised before any row extraction; no partial results exist.
    #[error("table header has {found} columns, expected {expected}")]
    SchemaMismatch { found: usize, expected: usize },

    /// Fetching a page failed. No retries; the error surfaces immediately
    /// with the stage that was in flight.
    #[error("fetching {stage} failed")]
    Transport {
        stage: Stage,
        #[source]
        source: anyhow::Error,
    },

    /// The configured cell tag does not parse as a CSS selector.
    #[error("invalid cell tag selector: {tag:?}")]
    InvalidCellTag { tag: String },
}
