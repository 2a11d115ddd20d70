//! End-to-end runs: CSV in, rendered report out.

use acceptance_core::{
    config::{ProviderFilter, ReportConfig},
    country::CountryTable,
    loader::load_orders_from_reader,
    record::OrderRecord,
    render::{render, render_table, OutputFormat},
    report::build_report,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Germany: 45 accepted orders plus 15 days on which a second partner only
/// failed, each day with two distinct errors (one sent twice), and one
/// bad-scoring decline that must not count. France: 10 successes. United
/// States: 40 successes and 5 failed attempts.
fn order_log_csv() -> String {
    let mut csv = String::from("user_id,partner_id,created_at,status,error,country,provider\n");
    for day in 1..=30 {
        let user = format!("de-{}", day % 6);
        csv.push_str(&format!("{user},p1,2024-06-{day:02} 09:00:00,success,,DE,worldpay\n"));
        if day <= 15 {
            csv.push_str(&format!("{user},p1,2024-06-{day:02} 10:00:00,success,,DE,worldpay\n"));
        }
    }
    for day in 1..=15 {
        let user = format!("de-late-{day}");
        csv.push_str(&format!("{user},p2,2024-07-{day:02} 08:00:00,failed,card declined,DE,safecharge\n"));
        csv.push_str(&format!("{user},p2,2024-07-{day:02} 08:00:00,failed,card declined,DE,safecharge\n"));
        csv.push_str(&format!("{user},p2,2024-07-{day:02} 09:00:00,failed,timeout,DE,SafeCharge\n"));
    }
    csv.push_str("de-x,p2,2024-07-20 08:00:00,failed,BAD SCORING,DE,worldpay\n");
    for i in 0..10 {
        csv.push_str(&format!("fr-{i},p1,2024-06-01 12:00:00,success,,FR,worldpay\n"));
    }
    for i in 0..40 {
        csv.push_str(&format!("us-{i},p3,2024-06-02 12:00:00,success,,US,worldpay\n"));
    }
    for i in 0..5 {
        csv.push_str(&format!("us-fail-{i},p3,2024-06-02 12:00:00,failed,timeout,US,worldpay\n"));
    }
    csv
}

fn load() -> Vec<OrderRecord> {
    load_orders_from_reader(order_log_csv().as_bytes()).unwrap()
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// The unfiltered run keeps Germany (large sample) and France (perfect),
/// and hides the United States (45 orders at 88%).
#[test]
fn unfiltered_report_applies_significance_rules() {
    init_logging();
    let table = CountryTable::builtin().unwrap();
    let report = build_report(load(), &ReportConfig::default(), &table);

    assert_eq!(report.provider_label, "worldpay and safecharge");
    let names: Vec<Option<&str>> = report.rows.iter().map(|r| r.country.as_deref()).collect();
    assert_eq!(names, vec![Some("France"), Some("Germany")]);

    let germany = &report.rows[1];
    assert_eq!(germany.successful_count, 45);
    assert_eq!(germany.failed_count, 30);
    assert_eq!(germany.total_transactions, 75);
    assert_eq!(germany.acceptance_rate, Some(60.0));

    let france = &report.rows[0];
    assert_eq!(france.total_transactions, 10);
    assert_eq!(france.acceptance_rate, Some(100.0));

    assert_eq!(report.stats.records_in, 146);
    assert_eq!(report.stats.records_deduplicated, 131);
}

/// Lowering the sample threshold brings the United States back.
#[test]
fn min_sample_size_is_configurable() {
    let table = CountryTable::builtin().unwrap();
    let config = ReportConfig {
        min_sample_size: 40,
        ..ReportConfig::default()
    };
    let report = build_report(load(), &config, &table);
    let us = report
        .rows
        .iter()
        .find(|r| r.country.as_deref() == Some("United States"))
        .unwrap();
    assert_eq!((us.successful_count, us.failed_count), (40, 5));
}

/// The safecharge run only sees safecharge traffic: 30 failed German days
/// and nothing else.
#[test]
fn safecharge_report_is_scoped_to_its_provider() {
    let table = CountryTable::builtin().unwrap();
    let config = ReportConfig::default().with_provider(ProviderFilter::Safecharge);
    let report = build_report(load(), &config, &table);

    assert_eq!(report.provider_label, "safecharge");
    assert_eq!(report.stats.records_filtered, 45);
    assert_eq!(report.rows.len(), 0, "30 orders at 0% is below threshold");

    let config = ReportConfig {
        min_sample_size: 30,
        ..config
    };
    let report = build_report(load(), &config, &table);
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].failed_count, 30);
    assert_eq!(report.rows[0].acceptance_rate, Some(0.0));
}

/// The rendered table carries the header and a truncated percentage.
#[test]
fn rendered_table_matches_report() {
    let table = CountryTable::builtin().unwrap();
    let report = build_report(load(), &ReportConfig::default(), &table);
    let text = render_table(&report);

    assert!(text.contains("Acceptance rate breakdown by country for 'worldpay and safecharge':"));
    let germany = text.lines().find(|l| l.starts_with("Germany")).unwrap();
    let cells: Vec<&str> = germany.split_whitespace().collect();
    assert_eq!(cells, vec!["Germany", "45", "30", "75", "60%"]);

    let json = render(&report, OutputFormat::Json).unwrap();
    assert!(json.contains("\"provider_label\": \"worldpay and safecharge\""));
}
