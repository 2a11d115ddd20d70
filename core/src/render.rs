//! Presentation of a finished report. Nothing here feeds back into the
//! numbers.

use crate::{error::ReportResult, report::AcceptanceReport, summary::CountrySummary};
use std::fmt::Write;

pub const UNKNOWN_COUNTRY_LABEL: &str = "Unknown";

const HEADERS: [&str; 5] = [
    "country",
    "successful_count",
    "failed_count",
    "total_transactions",
    "acceptance_rate",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "table" | "text" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Whole-number percentage, truncated toward zero: 88.9 -> "88%".
pub fn format_rate(rate: Option<f64>) -> String {
    match rate {
        Some(r) => format!("{}%", r.trunc() as i64),
        None => "-".into(),
    }
}

pub fn header_line(report: &AcceptanceReport) -> String {
    format!(
        "Acceptance rate breakdown by country for '{}':",
        report.provider_label
    )
}

fn cells(row: &CountrySummary) -> [String; 5] {
    [
        row.country
            .clone()
            .unwrap_or_else(|| UNKNOWN_COUNTRY_LABEL.into()),
        row.successful_count.to_string(),
        row.failed_count.to_string(),
        row.total_transactions.to_string(),
        format_rate(row.acceptance_rate),
    ]
}

/// Header line followed by an aligned table of every row. Country names
/// are left-aligned, numbers right-aligned, nothing is truncated.
pub fn render_table(report: &AcceptanceReport) -> String {
    let body: Vec<[String; 5]> = report.rows.iter().map(cells).collect();

    let mut widths = HEADERS.map(str::len);
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", header_line(report));

    let header: Vec<String> = HEADERS
        .iter()
        .zip(widths.iter())
        .enumerate()
        .map(|(i, (h, w))| pad(h, *w, i == 0))
        .collect();
    let _ = writeln!(out, "{}", header.join("  ").trim_end());

    for row in &body {
        let line: Vec<String> = row
            .iter()
            .zip(widths.iter())
            .enumerate()
            .map(|(i, (cell, w))| pad(cell, *w, i == 0))
            .collect();
        let _ = writeln!(out, "{}", line.join("  ").trim_end());
    }
    out
}

fn pad(cell: &str, width: usize, left: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(cell.chars().count()));
    if left {
        format!("{cell}{fill}")
    } else {
        format!("{fill}{cell}")
    }
}

pub fn render_json(report: &AcceptanceReport) -> ReportResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn render(report: &AcceptanceReport, format: OutputFormat) -> ReportResult<String> {
    match format {
        OutputFormat::Table => Ok(render_table(report)),
        OutputFormat::Json => render_json(report),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::RunStats;

    fn sample_report() -> AcceptanceReport {
        AcceptanceReport {
            provider_label: "worldpay".into(),
            rows: vec![
                CountrySummary {
                    country: Some("France".into()),
                    successful_count: 10,
                    failed_count: 0,
                    total_transactions: 10,
                    acceptance_rate: Some(100.0),
                },
                CountrySummary {
                    country: None,
                    successful_count: 2,
                    failed_count: 1,
                    total_transactions: 3,
                    acceptance_rate: Some(200.0 / 3.0),
                },
            ],
            stats: RunStats::default(),
        }
    }

    #[test]
    fn rates_are_truncated_not_rounded() {
        assert_eq!(format_rate(Some(88.9)), "88%");
        assert_eq!(format_rate(Some(99.99)), "99%");
        assert_eq!(format_rate(Some(100.0)), "100%");
        assert_eq!(format_rate(None), "-");
    }

    #[test]
    fn table_starts_with_blank_line_and_header() {
        let text = render_table(&sample_report());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "Acceptance rate breakdown by country for 'worldpay':");
        assert!(lines[2].starts_with("country"));
        assert!(lines[3].starts_with("France"));
        assert!(lines[3].ends_with("100%"));
        assert!(lines[4].starts_with("Unknown"));
        assert!(lines[4].ends_with("66%"));
    }

    #[test]
    fn json_keeps_numeric_rate() {
        let json = render_json(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["rows"][0]["acceptance_rate"], 100.0);
        assert!(value["rows"][1]["country"].is_null());
    }

    #[test]
    fn output_format_names() {
        assert_eq!(OutputFormat::parse("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("table"), Some(OutputFormat::Table));
        assert_eq!(OutputFormat::parse("xml"), None);
    }
}
