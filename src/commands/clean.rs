//! Clean command: whitespace-strip an existing CSV export.

use crate::format::{csv_line, parse_csv};
use crate::mlit::normalize::remove_all_whitespace;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Rewrites a CSV export with all whitespace removed from every field.
///
/// The header row passes through untouched so column names keep their
/// spacing; only data fields are cleaned.
pub struct CleanCommand;

impl CleanCommand {
    /// Reads `input`, cleans every record field, writes `output`.
    pub fn execute(input: &Path, output: &Path) -> Result<String> {
        let content = std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read CSV file: {}", input.display()))?;

        let mut rows = parse_csv(&content);
        for row in rows.iter_mut().skip(1) {
            for field in row.iter_mut() {
                *field = remove_all_whitespace(field);
            }
        }

        let cleaned: Vec<String> = rows.iter().map(|row| csv_line(row)).collect();
        std::fs::write(output, cleaned.join("\n"))
            .with_context(|| format!("Failed to write CSV file: {}", output.display()))?;

        info!(rows = rows.len().saturating_sub(1), "cleaned CSV written");

        Ok(format!("Cleaned {} rows into {}", rows.len().saturating_sub(1), output.display()))
    }
}
