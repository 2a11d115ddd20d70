//! Country summarizer — per-country totals and acceptance rate.

use crate::{counter::UserPartnerCounts, types::CountryName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountrySummary {
    /// `None` collects pairs whose country could not be resolved.
    pub country: Option<CountryName>,
    pub successful_count: u64,
    pub failed_count: u64,
    pub total_transactions: u64,
    /// Percentage in [0, 100]. `None` when there were no transactions.
    pub acceptance_rate: Option<f64>,
}

impl CountrySummary {
    /// True when every counted transaction was accepted.
    pub fn is_fully_accepted(&self) -> bool {
        self.total_transactions > 0 && self.successful_count == self.total_transactions
    }
}

pub fn acceptance_rate(successful: u64, total: u64) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some(successful as f64 / total as f64 * 100.0)
}

/// Sums counts per country and computes the rate. Rows come back sorted by
/// country name with the unresolved bucket last; nothing is filtered.
pub fn group_by_country(counts: &[UserPartnerCounts]) -> Vec<CountrySummary> {
    let mut totals: BTreeMap<Option<&str>, (u64, u64, u64)> = BTreeMap::new();
    for row in counts {
        let entry = totals.entry(row.country.as_deref()).or_insert((0, 0, 0));
        entry.0 += row.successful_count;
        entry.1 += row.failed_count;
        entry.2 += row.total_transactions;
    }

    let mut rows: Vec<CountrySummary> = totals
        .into_iter()
        .map(|(country, (ok, failed, total))| CountrySummary {
            country: country.map(str::to_string),
            successful_count: ok,
            failed_count: failed,
            total_transactions: total,
            acceptance_rate: acceptance_rate(ok, total),
        })
        .collect();
    sort_by_country(&mut rows);
    rows
}

/// Keep rows with at least `min_sample_size` transactions, plus any row
/// with a 100% acceptance rate.
pub fn retain_significant(rows: Vec<CountrySummary>, min_sample_size: u64) -> Vec<CountrySummary> {
    rows.into_iter()
        .filter(|r| r.total_transactions >= min_sample_size || r.is_fully_accepted())
        .collect()
}

/// Ascending by name, unresolved last.
pub fn sort_by_country(rows: &mut [CountrySummary]) {
    rows.sort_by(|a, b| match (&a.country, &b.country) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

pub fn summarize(counts: &[UserPartnerCounts], min_sample_size: u64) -> Vec<CountrySummary> {
    let grouped = group_by_country(counts);
    let grouped_len = grouped.len();
    let retained = retain_significant(grouped, min_sample_size);

    log::debug!(
        "summary: {} of {grouped_len} countries meet the {min_sample_size}-transaction threshold or 100% acceptance",
        retained.len()
    );
    retained
}
