//! Record loader — reads the order log CSV.
//!
//! Columns are matched by header name. `user_id`, `partner_id`,
//! `created_at` and `status` must be present; `error`, `country` and
//! `provider` may be missing entirely. Empty cells read as absent.
//! Unparseable timestamps become `None` and are never fatal.

use crate::{
    error::{ReportError, ReportResult},
    record::OrderRecord,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::{fs::File, io::Read, path::Path};

pub const REQUIRED_COLUMNS: [&str; 4] = ["user_id", "partner_id", "created_at", "status"];

const NAIVE_FORMATS: [&str; 7] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

#[derive(Debug, Deserialize)]
struct OrderRow {
    user_id: Option<String>,
    partner_id: Option<String>,
    created_at: Option<String>,
    status: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    provider: Option<String>,
}

/// Parse a timestamp the way a lenient datetime coercion would. Offsets
/// are dropped after conversion to local wall-clock time, so the date is
/// the one the timestamp was written in.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_local());
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(ts);
        }
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(ts) = DateTime::parse_from_str(raw, fmt) {
            return Some(ts.naive_local());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn load_orders<P: AsRef<Path>>(path: P) -> ReportResult<Vec<OrderRecord>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let orders = load_orders_from_reader(file)?;
    log::info!("loaded {} order records from {}", orders.len(), path.display());
    Ok(orders)
}

pub fn load_orders_from_reader<R: Read>(reader: R) -> ReportResult<Vec<OrderRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(ReportError::MissingColumn {
                column: column.to_string(),
            });
        }
    }

    let mut orders = Vec::new();
    let mut unparsed_timestamps = 0usize;
    for (idx, result) in reader.deserialize::<OrderRow>().enumerate() {
        let row = result?;
        let created_at = match non_empty(row.created_at) {
            Some(raw) => {
                let parsed = parse_timestamp(&raw);
                if parsed.is_none() {
                    unparsed_timestamps += 1;
                    log::debug!("row {}: unparseable created_at '{raw}'", idx + 2);
                }
                parsed
            }
            None => None,
        };
        orders.push(OrderRecord {
            user_id: row.user_id.unwrap_or_default(),
            partner_id: row.partner_id.unwrap_or_default(),
            created_at,
            status: row.status.unwrap_or_default(),
            error: non_empty(row.error),
            country: non_empty(row.country),
            provider: non_empty(row.provider),
        });
    }

    if unparsed_timestamps > 0 {
        log::warn!("{unparsed_timestamps} records have an unparseable created_at; kept with no date");
    }
    Ok(orders)
}
