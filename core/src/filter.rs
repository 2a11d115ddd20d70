//! Record filter — provider/partner/user selection and failure
//! classification.

use crate::{
    config::ReportConfig,
    record::{ClassifiedOrder, OrderRecord},
};

/// Keep the records the configured selectors accept, and classify each
/// survivor. Never fails; a selector that matches nothing yields an empty
/// set.
pub fn filter_records(records: Vec<OrderRecord>, config: &ReportConfig) -> Vec<ClassifiedOrder> {
    let input_len = records.len();
    let kept: Vec<ClassifiedOrder> = records
        .into_iter()
        .filter(|r| config.provider.accepts(r.provider.as_deref()))
        .filter(|r| matches_selector(config.partner_id.as_deref(), &r.partner_id))
        .filter(|r| matches_selector(config.user_id.as_deref(), &r.user_id))
        .map(|r| ClassifiedOrder::classify(r, &config.bad_scoring_marker))
        .collect();

    log::debug!(
        "filter: kept {} of {input_len} records for provider '{}'",
        kept.len(),
        config.provider.label()
    );
    kept
}

fn matches_selector(selector: Option<&str>, value: &str) -> bool {
    selector.map_or(true, |wanted| wanted == value)
}
