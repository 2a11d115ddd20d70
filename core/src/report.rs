//! Report pipeline — wires the stages together for one run.
//!
//! STAGE ORDER (fixed):
//!   1. Record filter      (provider / partner / user, failure flag)
//!   2. Deduplicator       (user, partner, timestamp, error)
//!   3. Failure aggregator (group per day + error, same-day suppression)
//!   4. Counter            (per user-partner outcomes, country attached)
//!   5. Summarizer         (per country, sample-size filter, sort)
//!
//! A run is a pure function of records, config and resolver.

use crate::{
    config::ReportConfig,
    counter::count_outcomes,
    country::CountryResolver,
    dedup::deduplicate,
    failure::aggregate_failures,
    filter::filter_records,
    record::OrderRecord,
    summary::{summarize, CountrySummary},
};
use serde::{Deserialize, Serialize};

/// Row counts after each stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub records_in: usize,
    pub records_filtered: usize,
    pub records_deduplicated: usize,
    pub failure_groups: usize,
    pub user_partner_rows: usize,
    pub countries: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcceptanceReport {
    /// Provider selection the report was built for, as shown in its header.
    pub provider_label: String,
    pub rows: Vec<CountrySummary>,
    pub stats: RunStats,
}

pub fn build_report(
    records: Vec<OrderRecord>,
    config: &ReportConfig,
    resolver: &dyn CountryResolver,
) -> AcceptanceReport {
    let records_in = records.len();

    let filtered = filter_records(records, config);
    let records_filtered = filtered.len();

    let deduped = deduplicate(filtered);
    let failures = aggregate_failures(&deduped);
    let counts = count_outcomes(&deduped, &failures, resolver, config.country_attribution);
    let rows = summarize(&counts, config.min_sample_size);

    let stats = RunStats {
        records_in,
        records_filtered,
        records_deduplicated: deduped.len(),
        failure_groups: failures.len(),
        user_partner_rows: counts.len(),
        countries: rows.len(),
    };

    log::info!(
        "report '{}': {} records in, {} after filter, {} after dedup, {} countries reported",
        config.provider.label(),
        stats.records_in,
        stats.records_filtered,
        stats.records_deduplicated,
        stats.countries
    );

    AcceptanceReport {
        provider_label: config.provider.label().to_string(),
        rows,
        stats,
    }
}
