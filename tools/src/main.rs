//! acceptance-report: headless runner for the per-country acceptance report.
//!
//! Usage:
//!   acceptance-report --input AllOrders.csv
//!   acceptance-report --input AllOrders.csv --provider safecharge --format json
//!   acceptance-report --config report.json --countries data/iso3166_alpha2.json

use acceptance_core::{
    config::{ProviderFilter, ReportConfig},
    country::CountryTable,
    loader::load_orders,
    render::{render, OutputFormat},
    report::build_report,
};
use anyhow::{bail, Result};
use std::env;
use std::io::{self, Write};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let input = flag_value(&args, "--input").unwrap_or("AllOrders.csv");

    let mut config = match flag_value(&args, "--config") {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };
    if let Some(provider) = flag_value(&args, "--provider") {
        config = config.with_provider(ProviderFilter::parse(provider));
    }
    if let Some(partner) = flag_value(&args, "--partner") {
        config.partner_id = Some(partner.to_string());
    }
    if let Some(user) = flag_value(&args, "--user") {
        config.user_id = Some(user.to_string());
    }
    config.min_sample_size = parse_arg(&args, "--min-sample", config.min_sample_size);

    let format_name = flag_value(&args, "--format").unwrap_or("table");
    let Some(format) = OutputFormat::parse(format_name) else {
        bail!("Unknown output format '{format_name}' (expected 'table' or 'json')");
    };

    let countries = match flag_value(&args, "--countries") {
        Some(path) => CountryTable::load(path)?,
        None => CountryTable::builtin()?,
    };
    log::debug!("country table: {} entries", countries.len());

    let orders = load_orders(input)?;
    let report = build_report(orders, &config, &countries);

    let mut stdout = io::stdout();
    write!(stdout, "{}", render(&report, format)?)?;
    if format == OutputFormat::Json {
        writeln!(stdout)?;
    }
    stdout.flush()?;
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
