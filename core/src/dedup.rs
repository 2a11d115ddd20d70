//! Deduplicator.
//!
//! Two records are duplicates when they share user, partner, exact
//! timestamp and error. The first one in input order wins, even if the
//! later one carries a different status.

use crate::{
    record::ClassifiedOrder,
    types::{PartnerId, UserId},
};
use chrono::NaiveDateTime;
use std::collections::HashSet;

type DedupKey = (UserId, PartnerId, Option<NaiveDateTime>, Option<String>);

fn dedup_key(record: &ClassifiedOrder) -> DedupKey {
    let order = &record.order;
    (
        order.user_id.clone(),
        order.partner_id.clone(),
        order.created_at,
        order.error.clone(),
    )
}

pub fn deduplicate(mut records: Vec<ClassifiedOrder>) -> Vec<ClassifiedOrder> {
    let input_len = records.len();
    let mut seen: HashSet<DedupKey> = HashSet::with_capacity(input_len);
    records.retain(|record| seen.insert(dedup_key(record)));

    log::debug!(
        "dedup: dropped {} duplicate records, {} remain",
        input_len - records.len(),
        records.len()
    );
    records
}
