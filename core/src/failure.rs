//! Failure aggregator — groups valid failures per day and error, then
//! suppresses every day on which the same user-partner pair succeeded.
//!
//! Stages:
//!   A. group records flagged `valid_failure` by
//!      (user, partner, date, error) and count them
//!   B. collect the (user, partner, date) of every success
//!   C. drop each group whose (user, partner, date) is in B
//!
//! The flag is not restricted to non-success records, so a success row
//! with a non-bad-scoring error lands in a group. Stage C always drops
//! such a group because its own success shares the date.

use crate::{
    record::ClassifiedOrder,
    types::{PartnerId, UserId},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FailureGroupKey {
    pub user_id: UserId,
    pub partner_id: PartnerId,
    pub date: Option<NaiveDate>,
    pub error: Option<String>,
}

impl FailureGroupKey {
    pub fn success_date_key(&self) -> SuccessDateKey {
        SuccessDateKey {
            user_id: self.user_id.clone(),
            partner_id: self.partner_id.clone(),
            date: self.date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SuccessDateKey {
    pub user_id: UserId,
    pub partner_id: PartnerId,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureGroup {
    pub key: FailureGroupKey,
    /// Attempts collapsed into this group. Always at least 1.
    pub error_count: u64,
}

/// Stage A. Groups come back ordered by key.
pub fn group_failures(records: &[ClassifiedOrder]) -> Vec<FailureGroup> {
    let mut groups: BTreeMap<FailureGroupKey, u64> = BTreeMap::new();
    for record in records.iter().filter(|r| r.valid_failure) {
        let key = FailureGroupKey {
            user_id: record.order.user_id.clone(),
            partner_id: record.order.partner_id.clone(),
            date: record.date,
            error: record.order.error.clone(),
        };
        *groups.entry(key).or_insert(0) += 1;
    }
    groups
        .into_iter()
        .map(|(key, error_count)| FailureGroup { key, error_count })
        .collect()
}

/// Stage B.
pub fn success_dates(records: &[ClassifiedOrder]) -> HashSet<SuccessDateKey> {
    records
        .iter()
        .filter(|r| r.order.is_success())
        .map(|r| SuccessDateKey {
            user_id: r.order.user_id.clone(),
            partner_id: r.order.partner_id.clone(),
            date: r.date,
        })
        .collect()
}

/// Stage C.
pub fn suppress_success_days(
    groups: Vec<FailureGroup>,
    success_dates: &HashSet<SuccessDateKey>,
) -> Vec<FailureGroup> {
    groups
        .into_iter()
        .filter(|g| !success_dates.contains(&g.key.success_date_key()))
        .collect()
}

/// Runs stages A to C over deduplicated records.
pub fn aggregate_failures(records: &[ClassifiedOrder]) -> Vec<FailureGroup> {
    let groups = group_failures(records);
    let grouped = groups.len();
    let successes = success_dates(records);
    let surviving = suppress_success_days(groups, &successes);

    log::debug!(
        "failures: {grouped} groups, {} suppressed by same-day success, {} remain",
        grouped - surviving.len(),
        surviving.len()
    );
    surviving
}
