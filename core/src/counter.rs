//! Success/failure counter — per (user, partner) outcome counts with an
//! attributed country.

use crate::{
    config::CountryAttribution,
    country::CountryResolver,
    failure::FailureGroup,
    record::ClassifiedOrder,
    types::{CountryName, PartnerId, UserId},
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPartnerCounts {
    pub user_id: UserId,
    pub partner_id: PartnerId,
    pub successful_count: u64,
    /// Surviving failure groups, not raw attempts.
    pub failed_count: u64,
    pub total_transactions: u64,
    pub country: Option<CountryName>,
}

type PairKey = (UserId, PartnerId);

/// Successes per pair.
pub fn count_successes(records: &[ClassifiedOrder]) -> BTreeMap<PairKey, u64> {
    let mut counts = BTreeMap::new();
    for record in records.iter().filter(|r| r.order.is_success()) {
        let key = (record.order.user_id.clone(), record.order.partner_id.clone());
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// Surviving failure groups per pair. Each group counts once whatever its
/// `error_count`.
pub fn count_failures(groups: &[FailureGroup]) -> BTreeMap<PairKey, u64> {
    let mut counts = BTreeMap::new();
    for group in groups {
        let key = (group.key.user_id.clone(), group.key.partner_id.clone());
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// Full outer join of success and failure counts. A pair missing from one
/// side gets 0 there.
pub fn merge_counts(
    successes: &BTreeMap<PairKey, u64>,
    failures: &BTreeMap<PairKey, u64>,
) -> Vec<(PairKey, u64, u64)> {
    let pairs: BTreeSet<&PairKey> = successes.keys().chain(failures.keys()).collect();
    pairs
        .into_iter()
        .map(|pair| {
            let ok = successes.get(pair).copied().unwrap_or(0);
            let failed = failures.get(pair).copied().unwrap_or(0);
            (pair.clone(), ok, failed)
        })
        .collect()
}

/// Country codes carried by each pair, in input order, nulls included.
fn pair_country_codes(records: &[ClassifiedOrder]) -> HashMap<PairKey, Vec<Option<&str>>> {
    let mut codes: HashMap<PairKey, Vec<Option<&str>>> = HashMap::new();
    for record in records {
        let key = (record.order.user_id.clone(), record.order.partner_id.clone());
        codes.entry(key).or_default().push(record.order.country.as_deref());
    }
    codes
}

/// Picks the code(s) a pair is attributed to under `policy`.
fn attributed_codes<'a>(codes: &[Option<&'a str>], policy: CountryAttribution) -> Vec<Option<&'a str>> {
    match policy {
        CountryAttribution::FirstSeen => vec![codes.iter().flatten().next().copied()],
        CountryAttribution::MostFrequent => {
            // (code, count) in first-seen order so ties keep the earliest.
            let mut tally: Vec<(&str, usize)> = Vec::new();
            for code in codes.iter().flatten() {
                match tally.iter_mut().find(|(c, _)| *c == *code) {
                    Some((_, n)) => *n += 1,
                    None => tally.push((*code, 1)),
                }
            }
            let mut best: Option<(&str, usize)> = None;
            for (code, n) in tally {
                if best.map_or(true, |(_, top)| n > top) {
                    best = Some((code, n));
                }
            }
            vec![best.map(|(code, _)| code)]
        }
        CountryAttribution::FanOut => {
            let mut distinct: Vec<Option<&str>> = Vec::new();
            for code in codes {
                if !distinct.contains(code) {
                    distinct.push(*code);
                }
            }
            if distinct.is_empty() {
                distinct.push(None);
            }
            distinct
        }
    }
}

/// Builds one counts row per pair (several under `FanOut`), ordered by
/// user then partner.
pub fn count_outcomes(
    records: &[ClassifiedOrder],
    failures: &[FailureGroup],
    resolver: &dyn CountryResolver,
    attribution: CountryAttribution,
) -> Vec<UserPartnerCounts> {
    let successes = count_successes(records);
    let failed = count_failures(failures);
    let country_codes = pair_country_codes(records);

    let mut rows = Vec::new();
    for ((user_id, partner_id), successful_count, failed_count) in merge_counts(&successes, &failed) {
        let codes = country_codes
            .get(&(user_id.clone(), partner_id.clone()))
            .map(|c| attributed_codes(c, attribution))
            .unwrap_or_else(|| vec![None]);

        for code in codes {
            rows.push(UserPartnerCounts {
                user_id: user_id.clone(),
                partner_id: partner_id.clone(),
                successful_count,
                failed_count,
                total_transactions: successful_count + failed_count,
                country: code.and_then(|c| resolver.resolve(c)),
            });
        }
    }

    log::debug!(
        "counter: {} user-partner rows ({} with successes, {} with failures)",
        rows.len(),
        successes.len(),
        failed.len()
    );
    rows
}
