//! CSS selectors for the MLIT results table.
//!
//! The site renders one results table per page: a `thead` with one row of
//! header cells and a `tbody` of record rows. Cell text lives in nested
//! `div` elements rather than bare `td`s, so the cell tag is configurable
//! (see [`crate::config::Config::cell_tag`]) and its selector is built at
//! runtime. Update this file when the site changes its markup.

use scraper::Selector;
use std::sync::LazyLock;

/// Table head containing the single header row.
pub static THEAD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("thead").unwrap());

/// Table body containing record rows.
pub static TBODY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tbody").unwrap());

/// A record row within the table body.
pub static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());

/// All images; the next-page affordance is found by comparing `alt` text
/// rather than baking the Japanese label into a selector.
pub static IMG: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());
