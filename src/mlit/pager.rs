//! Sequential page navigation for the results table.

use crate::mlit::client::PageFetch;
use crate::mlit::error::{ScrapeError, Stage};
use crate::mlit::selectors;
use scraper::{ElementRef, Html};
use tracing::{debug, trace};

/// Finds the next-page link in a results page.
///
/// The site marks pagination with an icon image whose `alt` text carries
/// the label (default `次のページ`); the nearest enclosing `<a>` holds the
/// relative URL of the following page. Returns `None` when the page is the
/// last one. Kept as a standalone function so the detection heuristic can
/// change without touching the pager state machine.
pub fn find_next_page(html: &str, label: &str) -> Option<String> {
    let document = Html::parse_document(html);

    let icon = document.select(&selectors::IMG).find(|img| img.value().attr("alt") == Some(label))?;

    let mut node = icon.ancestors();
    node.find_map(|ancestor| {
        let element = ElementRef::wrap(ancestor)?;
        if element.value().name() == "a" {
            element.value().attr("href").map(str::to_string)
        } else {
            None
        }
    })
}

/// Holds the current page identity and document, and advances through the
/// result set one next-page link at a time.
///
/// States: open on a fetched page, then alternately extract and
/// [`advance`](Pager::advance) until the affordance disappears; after that
/// [`has_next`](Pager::has_next) stays false and no further fetch occurs.
pub struct Pager<'a, C: PageFetch> {
    client: &'a C,
    next_page_label: &'a str,
    page: Option<String>,
    html: String,
    fetched: u32,
}

impl<'a, C: PageFetch> Pager<'a, C> {
    /// Fetches the initial page and opens a pager on it.
    pub async fn open(
        client: &'a C,
        initial_page: &str,
        next_page_label: &'a str,
    ) -> Result<Self, ScrapeError> {
        let html = client
            .fetch_page(initial_page)
            .await
            .map_err(|source| ScrapeError::Transport { stage: Stage::InitialPage, source })?;

        Ok(Self {
            client,
            next_page_label,
            page: Some(initial_page.to_string()),
            html,
            fetched: 1,
        })
    }

    /// True while a current page is held; false once the end of the result
    /// set was reached.
    pub fn has_next(&self) -> bool {
        self.page.is_some()
    }

    /// Raw HTML of the current page.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Number of pages fetched so far.
    pub fn fetched(&self) -> u32 {
        self.fetched
    }

    /// Moves to the next page, or into the terminal state when the current
    /// page carries no next-page affordance.
    ///
    /// Reaching the end is the normal completion signal, not an error;
    /// fetch failures on a present link propagate as fatal.
    pub async fn advance(&mut self) -> Result<(), ScrapeError> {
        let Some(next) = find_next_page(&self.html, self.next_page_label) else {
            debug!("no next-page link, result set exhausted");
            self.page = None;
            return Ok(());
        };

        let stage = Stage::Page(self.fetched + 1);
        trace!(page = %next, "advancing");

        self.html = self
            .client
            .fetch_page(&next)
            .await
            .map_err(|source| ScrapeError::Transport { stage, source })?;
        self.fetched += 1;
        self.page = Some(next);

        Ok(())
    }
}
