//! Output formatting for defect records (table, JSON, markdown, CSV).

use crate::config::OutputFormat;
use crate::mlit::models::Record;
use serde::Serialize;

/// Formats header/record data for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a header plus its records.
    pub fn format_records(&self, header: &[String], records: &[Record]) -> String {
        if records.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => csv_line(header),
                _ => "No records found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_records(header, records),
            OutputFormat::Table => self.table_records(header, records),
            OutputFormat::Markdown => self.markdown_records(header, records),
            OutputFormat::Csv => csv_document(header, records),
        }
    }

    /// Pretty-prints any serializable response shape as JSON (used for the
    /// structured `stats`/`schema` responses).
    pub fn format_json<T: Serialize>(&self, value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    // JSON formatting

    fn json_records(&self, header: &[String], records: &[Record]) -> String {
        let rows: Vec<serde_json::Value> = records
            .iter()
            .map(|record| {
                header
                    .iter()
                    .zip(record.iter())
                    .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                    .collect::<serde_json::Map<_, _>>()
                    .into()
            })
            .collect();

        serde_json::to_string_pretty(&rows).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_records(&self, header: &[String], records: &[Record]) -> String {
        let mut blocks = Vec::new();

        for (index, record) in records.iter().enumerate() {
            let mut lines = vec![format!("--- Record {} ---", index + 1)];
            for (name, value) in header.iter().zip(record.iter()) {
                lines.push(format!("{}: {}", name, value));
            }
            blocks.push(lines.join("\n"));
        }

        blocks.push(format!("{} records", records.len()));
        blocks.join("\n\n")
    }

    // Markdown formatting

    fn markdown_records(&self, header: &[String], records: &[Record]) -> String {
        let mut lines = Vec::new();

        lines.push(format!("| {} |", header.join(" | ")));
        lines.push(format!("|{}|", vec!["---"; header.len()].join("|")));

        for record in records {
            let cells: Vec<String> = record.iter().map(|c| c.replace('|', "\\|")).collect();
            lines.push(format!("| {} |", cells.join(" | ")));
        }

        lines.push(String::new());
        lines.push(format!("*{} records*", records.len()));

        lines.join("\n")
    }
}

// CSV handling
//
// Hand-rolled RFC4180-ish quoting: fields containing the delimiter, quote,
// or newline are wrapped in double quotes with inner quotes doubled.

/// Renders one CSV row.
pub fn csv_line(fields: &[String]) -> String {
    fields.iter().map(|f| csv_escape(f)).collect::<Vec<_>>().join(",")
}

/// Renders a full CSV document, header row first.
pub fn csv_document(header: &[String], records: &[Record]) -> String {
    let mut lines = vec![csv_line(header)];
    for record in records {
        lines.push(csv_line(record));
    }
    lines.join("\n")
}

fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Parses a CSV document into rows of fields.
///
/// Accepts what [`csv_document`] emits: comma-delimited, double-quote
/// quoting with doubled inner quotes, quoted fields may span lines. CRLF
/// line endings are tolerated.
pub fn parse_csv(content: &str) -> Vec<Record> {
    let mut rows = Vec::new();
    let mut row: Record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }

    // Final row without a trailing newline.
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Vec<String>, Vec<Record>) {
        let header = vec!["番号".to_string(), "メーカー".to_string()];
        let records = vec![
            vec!["1".to_string(), "スズキ".to_string()],
            vec!["2".to_string(), "ホンダ".to_string()],
        ];
        (header, records)
    }

    #[test]
    fn test_table_format() {
        let (header, records) = sample();
        let out = Formatter::new(OutputFormat::Table).format_records(&header, &records);
        assert!(out.contains("メーカー: スズキ"));
        assert!(out.contains("2 records"));
    }

    #[test]
    fn test_table_empty() {
        let (header, _) = sample();
        let out = Formatter::new(OutputFormat::Table).format_records(&header, &[]);
        assert_eq!(out, "No records found.");
    }

    #[test]
    fn test_json_format_keys_by_header() {
        let (header, records) = sample();
        let out = Formatter::new(OutputFormat::Json).format_records(&header, &records);
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0]["メーカー"], "スズキ");
    }

    #[test]
    fn test_json_empty() {
        let (header, _) = sample();
        let out = Formatter::new(OutputFormat::Json).format_records(&header, &[]);
        assert_eq!(out, "[]");
    }

    #[test]
    fn test_markdown_format() {
        let (header, records) = sample();
        let out = Formatter::new(OutputFormat::Markdown).format_records(&header, &records);
        assert!(out.starts_with("| 番号 | メーカー |"));
        assert!(out.contains("| 1 | スズキ |"));
        assert!(out.contains("*2 records*"));
    }

    #[test]
    fn test_csv_format_header_once() {
        let (header, records) = sample();
        let out = Formatter::new(OutputFormat::Csv).format_records(&header, &records);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "番号,メーカー");
    }

    #[test]
    fn test_csv_empty_is_header_only() {
        let (header, _) = sample();
        let out = Formatter::new(OutputFormat::Csv).format_records(&header, &[]);
        assert_eq!(out, "番号,メーカー");
    }

    #[test]
    fn test_csv_escape_comma_and_quote() {
        assert_eq!(csv_line(&["a,b".to_string()]), "\"a,b\"");
        assert_eq!(csv_line(&["say \"hi\"".to_string()]), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_line(&["plain".to_string()]), "plain");
    }

    #[test]
    fn test_parse_csv_plain() {
        let rows = parse_csv("a,b\nc,d\n");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_parse_csv_no_trailing_newline() {
        let rows = parse_csv("a,b\nc,d");
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_parse_csv_quoted() {
        let rows = parse_csv("\"a,b\",\"say \"\"hi\"\"\"\n");
        assert_eq!(rows, vec![vec!["a,b", "say \"hi\""]]);
    }

    #[test]
    fn test_parse_csv_quoted_newline() {
        let rows = parse_csv("\"line1\nline2\",x\n");
        assert_eq!(rows, vec![vec!["line1\nline2", "x"]]);
    }

    #[test]
    fn test_parse_csv_crlf() {
        let rows = parse_csv("a,b\r\nc,d\r\n");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_csv_round_trip() {
        let (header, records) = sample();
        let doc = csv_document(&header, &records);
        let rows = parse_csv(&doc);
        assert_eq!(rows[0], header);
        assert_eq!(rows[1], records[0]);
    }

    #[test]
    fn test_format_json_value() {
        #[derive(Serialize)]
        struct Payload {
            count: usize,
        }
        let out = Formatter::new(OutputFormat::Table).format_json(&Payload { count: 3 });
        assert!(out.contains("\"count\": 3"));
    }
}
