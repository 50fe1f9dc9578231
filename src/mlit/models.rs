//! Data models for scraped defect records and query responses.

use serde::{Deserialize, Serialize};

/// One table row: an ordered sequence of field strings, one per column.
pub type Record = Vec<String>;

/// Accumulated output of one scrape session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeResult {
    /// Column names, extracted once from the first page.
    pub header: Vec<String>,
    /// All well-formed records, in page order.
    pub records: Vec<Record>,
    /// Number of result pages visited.
    pub pages_visited: u32,
}

impl ScrapeResult {
    /// Returns number of records.
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records were extracted.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Search filters for the defect database.
///
/// Renders into the site's search page query string; unset filters fall
/// back to the site's match-everything values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Manufacturer name (Japanese).
    pub manufacturer: Option<String>,
    /// Model name (Japanese).
    pub model: Option<String>,
    /// Start of the reporting date range, `YYYY/MM/DD`.
    pub from_date: Option<String>,
    /// End of the reporting date range, `YYYY/MM/DD`.
    pub to_date: Option<String>,
}

impl SearchQuery {
    /// Open-ended date range defaults used by the site itself.
    const FROM_DATE_MIN: &'static str = "1000/01/01";
    const TO_DATE_MAX: &'static str = "9999/12/31";

    /// Builds the relative search page identifier for these filters.
    ///
    /// Parameter names and fixed fields mirror the site's own search form;
    /// free-text values are percent-encoded.
    pub fn to_page(&self) -> String {
        let from = self.from_date.as_deref().unwrap_or(Self::FROM_DATE_MIN);
        let to = self.to_date.as_deref().unwrap_or(Self::TO_DATE_MAX);

        let mut page = format!(
            "search.html?selCarTp=1&lstCarNo=000&txtFrDat={}&txtToDat={}",
            urlencoding::encode(from),
            urlencoding::encode(to),
        );

        page.push_str("&txtNamNm=");
        if let Some(manufacturer) = &self.manufacturer {
            page.push_str(&urlencoding::encode(manufacturer));
        }

        page.push_str("&txtMdlNm=");
        if let Some(model) = &self.model {
            page.push_str(&urlencoding::encode(model));
        }

        page.push_str("&txtEgmNm=&chkDevCd=");
        page
    }
}

/// Structured search response: the scraped data plus the parameters that
/// produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub header: Vec<String>,
    pub records: Vec<Record>,
    pub total_records: usize,
    pub pages_crawled: u32,
    pub search_parameters: SearchQuery,
}

impl SearchResponse {
    /// Packages a scrape result with its originating query.
    pub fn new(result: ScrapeResult, query: SearchQuery) -> Self {
        Self {
            total_records: result.count(),
            pages_crawled: result.pages_visited,
            header: result.header,
            records: result.records,
            search_parameters: query,
        }
    }
}

/// Statistical summary over scraped defect records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefectStats {
    pub total_defects: usize,
    pub unique_manufacturers: Vec<String>,
    pub unique_models: Vec<String>,
    pub manufacturer_count: usize,
    pub model_count: usize,
    pub search_parameters: SearchQuery,
}

/// Column positions within the 13-column defect table.
pub mod columns {
    /// Manufacturer name column.
    pub const MANUFACTURER: usize = 1;
    /// Model name column.
    pub const MODEL: usize = 2;
}

impl DefectStats {
    /// Computes manufacturer/model statistics over a set of records.
    pub fn from_records(records: &[Record], query: SearchQuery) -> Self {
        let mut manufacturers = std::collections::BTreeSet::new();
        let mut models = std::collections::BTreeSet::new();

        for record in records {
            if let Some(manufacturer) = record.get(columns::MANUFACTURER) {
                if !manufacturer.is_empty() {
                    manufacturers.insert(manufacturer.clone());
                }
            }
            if let Some(model) = record.get(columns::MODEL) {
                if !model.is_empty() {
                    models.insert(model.clone());
                }
            }
        }

        Self {
            total_defects: records.len(),
            manufacturer_count: manufacturers.len(),
            model_count: models.len(),
            unique_manufacturers: manufacturers.into_iter().collect(),
            unique_models: models.into_iter().collect(),
            search_parameters: query,
        }
    }
}

/// Table metadata reported by the `schema` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaInfo {
    pub table_name: String,
    pub description: String,
    pub columns: Vec<String>,
    pub column_count: usize,
    pub data_source: String,
    pub encoding: String,
    pub language: String,
}

impl SchemaInfo {
    /// Describes the defect table given its extracted header.
    pub fn new(columns: Vec<String>, data_source: impl Into<String>) -> Self {
        Self {
            table_name: "MLIT Vehicle Defects".to_string(),
            description: "Vehicle defect information from the Japanese MLIT database".to_string(),
            column_count: columns.len(),
            columns,
            data_source: data_source.into(),
            encoding: "UTF-8".to_string(),
            language: "Japanese".to_string(),
        }
    }
}
