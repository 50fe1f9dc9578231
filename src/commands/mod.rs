//! CLI command implementations.

pub mod clean;
pub mod crawl;
pub mod schema;
pub mod search;
pub mod stats;

pub use clean::CleanCommand;
pub use crawl::CrawlCommand;
pub use schema::{SampleCommand, SchemaCommand};
pub use search::SearchCommand;
pub use stats::StatsCommand;

/// Shared fixtures for command tests: an in-memory page store and a
/// results-table HTML builder.
#[cfg(test)]
pub(crate) mod testing {
    use crate::mlit::PageFetch;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};

    pub struct MockFetch {
        pages: HashMap<String, String>,
        calls: AtomicU32,
    }

    impl MockFetch {
        pub fn new(pages: &[(String, String)]) -> Self {
            Self { pages: pages.iter().cloned().collect(), calls: AtomicU32::new(0) }
        }

        pub fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PageFetch for MockFetch {
        async fn fetch_page(&self, page: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.pages
                .get(page)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("no such page: {}", page))
        }
    }

    pub fn page(header: &[&str], rows: &[&[&str]], next: Option<&str>) -> String {
        let mut html = String::from("<html><body><table><thead><tr>");
        for cell in header {
            html.push_str(&format!("<td><div>{}</div></td>", cell));
        }
        html.push_str("</tr></thead><tbody>");
        for row in rows {
            html.push_str("<tr>");
            for cell in *row {
                html.push_str(&format!("<td><div>{}</div></td>", cell));
            }
            html.push_str("</tr>");
        }
        html.push_str("</tbody></table>");
        if let Some(href) = next {
            html.push_str(&format!(r#"<a href="{}"><img alt="次のページ"></a>"#, href));
        }
        html.push_str("</body></html>");
        html
    }
}
