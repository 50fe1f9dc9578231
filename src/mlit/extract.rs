//! Row extraction from the MLIT results table.

use crate::mlit::error::ScrapeError;
use crate::mlit::models::Record;
use crate::mlit::normalize::{nfkc, trim_and_strip_fullwidth};
use crate::mlit::selectors;
use scraper::{ElementRef, Html, Selector};
use tracing::{trace, warn};

/// Extracts header and record rows from one page's table markup.
///
/// Header cells and body cells pass through different normalization
/// pipelines; see [`crate::mlit::normalize`]. The row-shape check is the
/// defense against the site's occasionally malformed markup: rows whose
/// cell count diverges from the expected width are dropped with a warning
/// instead of aborting the scrape.
#[derive(Debug)]
pub struct RowExtractor {
    cells: Selector,
    expected_columns: usize,
}

impl RowExtractor {
    /// Creates an extractor for the given cell tag and table width.
    pub fn new(cell_tag: &str, expected_columns: usize) -> Result<Self, ScrapeError> {
        let cells = Selector::parse(cell_tag)
            .map_err(|_| ScrapeError::InvalidCellTag { tag: cell_tag.to_string() })?;
        Ok(Self { cells, expected_columns })
    }

    /// Extracts the header cells in document order.
    ///
    /// Empty cells yield an empty string; validation of the header length
    /// against the expected width belongs to the scraper, which treats a
    /// mismatch as fatal.
    pub fn header(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);

        let Some(thead) = document.select(&selectors::THEAD).next() else {
            return Vec::new();
        };

        thead.select(&self.cells).map(|cell| trim_and_strip_fullwidth(&cell_text(cell))).collect()
    }

    /// Extracts record rows from the table body.
    ///
    /// Body cells additionally go through NFKC, and cells that are empty
    /// after trimming are skipped outright rather than appended as `""`.
    /// Rows whose resulting length is not the expected column count are
    /// logged and discarded; no partial record is emitted.
    pub fn records(&self, html: &str) -> Vec<Record> {
        let document = Html::parse_document(html);

        let Some(tbody) = document.select(&selectors::TBODY).next() else {
            return Vec::new();
        };

        let mut records = Vec::new();
        for (index, row) in tbody.select(&selectors::ROW).enumerate() {
            let fields: Record = row
                .select(&self.cells)
                .filter_map(|cell| {
                    let text = trim_and_strip_fullwidth(&cell_text(cell));
                    if text.is_empty() {
                        None
                    } else {
                        Some(nfkc(&text))
                    }
                })
                .collect();

            if fields.len() != self.expected_columns {
                warn!(
                    row = index,
                    found = fields.len(),
                    expected = self.expected_columns,
                    "dropping malformed record row"
                );
                continue;
            }

            trace!(row = index, "extracted record");
            records.push(fields);
        }

        records
    }
}

/// Text content of one cell element.
///
/// Follows a chain of lone children down to a single text node. A cell
/// with mixed content (text next to footnote markers and the like) has no
/// such node and yields an empty string, so downstream the cell is
/// skipped and its row dropped.
fn cell_text(cell: ElementRef) -> String {
    let mut node = *cell;
    loop {
        let mut children = node.children();
        match (children.next(), children.next()) {
            (Some(only), None) => {
                if let Some(text) = only.value().as_text() {
                    return text.to_string();
                }
                node = only;
            }
            _ => return String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor(columns: usize) -> RowExtractor {
        RowExtractor::new("div", columns).unwrap()
    }

    fn table(thead_cells: &[&str], rows: &[&[&str]]) -> String {
        let mut html = String::from("<html><body><table><thead><tr>");
        for cell in thead_cells {
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
        html.push_str("</tbody></table></body></html>");
        html
    }

    #[test]
    fn test_invalid_cell_tag() {
        let err = RowExtractor::new("::!", 13).unwrap_err();
        assert!(err.to_string().contains("invalid cell tag"));
    }

    #[test]
    fn test_header_extraction() {
        let html = table(&["番号", "　メーカー　", "型式"], &[]);
        let header = extractor(3).header(&html);
        assert_eq!(header, vec!["番号", "メーカー", "型式"]);
    }

    #[test]
    fn test_header_keeps_empty_cells() {
        let html = table(&["A", "　", "C"], &[]);
        let header = extractor(3).header(&html);
        assert_eq!(header, vec!["A", "", "C"]);
    }

    #[test]
    fn test_header_not_nfkc_normalized() {
        // Full-width digits in headers stay full-width; only record cells
        // are compatibility-normalized.
        let html = table(&["１２３"], &[]);
        let header = extractor(1).header(&html);
        assert_eq!(header, vec!["１２３"]);
    }

    #[test]
    fn test_header_missing_thead() {
        let header = extractor(13).header("<html><body></body></html>");
        assert!(header.is_empty());
    }

    #[test]
    fn test_records_well_formed() {
        let html = table(&["A", "B"], &[&["x", "y"], &["z", "w"]]);
        let records = extractor(2).records(&html);
        assert_eq!(records, vec![vec!["x", "y"], vec!["z", "w"]]);
    }

    #[test]
    fn test_records_nfkc_normalized() {
        let html = table(&["A"], &[&["１２３"], &["ｽｽﾞｷ"]]);
        let records = extractor(1).records(&html);
        assert_eq!(records, vec![vec!["123"], vec!["スズキ"]]);
    }

    #[test]
    fn test_records_drop_short_row() {
        let html = table(&["A", "B", "C"], &[&["1", "2", "3"], &["only", "two"]]);
        let records = extractor(3).records(&html);
        assert_eq!(records, vec![vec!["1", "2", "3"]]);
    }

    #[test]
    fn test_records_drop_long_row() {
        let html = table(&["A", "B"], &[&["1", "2", "3"]]);
        let records = extractor(2).records(&html);
        assert!(records.is_empty());
    }

    #[test]
    fn test_records_skip_empty_cells() {
        // A whitespace-only cell is skipped, not emitted as "", so the row
        // comes up one field short and is dropped.
        let html = table(&["A", "B"], &[&["x", "　"]]);
        let records = extractor(2).records(&html);
        assert!(records.is_empty());
    }

    #[test]
    fn test_records_drop_row_with_nested_markup_cell() {
        // A cell whose text sits next to nested markup has no lone text
        // node, so it reads as empty and the whole row is dropped.
        let html = "<html><body><table><thead><tr>\
                    <td><div>A</div></td><td><div>B</div></td>\
                    </tr></thead><tbody><tr>\
                    <td><div>x</div></td><td><div>防錆<sup>注1</sup></div></td>\
                    </tr></tbody></table></body></html>";
        let records = extractor(2).records(html);
        assert!(records.is_empty());
    }

    #[test]
    fn test_cell_text_follows_lone_child_chain() {
        // A single wrapper element is transparent; mixed content is not.
        let html = "<html><body><table><thead><tr>\
                    <td><div><span>受付日</span></div></td><td><div>メーカー</div></td>\
                    </tr></thead><tbody></tbody></table></body></html>";
        let header = extractor(2).header(html);
        assert_eq!(header, vec!["受付日", "メーカー"]);
    }

    #[test]
    fn test_records_missing_tbody() {
        let records = extractor(13).records("<html><body></body></html>");
        assert!(records.is_empty());
    }

    #[test]
    fn test_records_empty_tbody() {
        let html = table(&["A"], &[]);
        let records = extractor(1).records(&html);
        assert!(records.is_empty());
    }
}
