//! Text normalization for Japanese table content.
//!
//! The remote site mixes full-width and half-width variants freely, pads
//! cells with U+3000 (full-width space), and wraps text in layout
//! whitespace. Header cells and body cells go through *different*
//! pipelines, matching the observed site behavior:
//!
//! - header cells: [`trim_and_strip_fullwidth`] only
//! - body cells: [`trim_and_strip_fullwidth`] then [`nfkc`]
//! - CSV clean pass: [`remove_all_whitespace`]

use unicode_normalization::UnicodeNormalization;

/// Full-width space used as padding throughout the MLIT tables.
const FULLWIDTH_SPACE: char = '\u{3000}';

/// Deletes every whitespace character anywhere in the string, including
/// tabs, newlines, and the full-width space.
///
/// Only used when cleaning already-exported CSV fields; cell extraction
/// uses [`trim_and_strip_fullwidth`] instead.
pub fn remove_all_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Trims surrounding whitespace, then removes the full-width space
/// anywhere in the string.
///
/// Interior ASCII whitespace is kept; a cell like `スズキ 株式会社` keeps
/// its inner space while `　スズキ　` collapses to `スズキ`.
pub fn trim_and_strip_fullwidth(text: &str) -> String {
    text.trim().replace(FULLWIDTH_SPACE, "")
}

/// Unicode NFKC normalization, collapsing full-width/half-width and other
/// compatibility variants into one canonical representation.
pub fn nfkc(text: &str) -> String {
    text.nfkc().collect()
}
