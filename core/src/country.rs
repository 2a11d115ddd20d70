//! Country resolution — ISO 3166-1 alpha-2 code to display name.

use crate::{
    error::ReportResult,
    types::{CountryCode, CountryName},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const BUILTIN_TABLE: &str = include_str!("../data/iso3166_alpha2.json");

/// Maps a country code to a display name.
///
/// Unknown or malformed codes resolve to `None`; implementations must
/// not fail.
pub trait CountryResolver {
    fn resolve(&self, code: &str) -> Option<CountryName>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryEntry {
    pub alpha_2: CountryCode,
    pub name: CountryName,
}

#[derive(Debug, Clone, Deserialize)]
struct CountryTableFile {
    countries: Vec<CountryEntry>,
}

/// In-memory lookup table keyed by upper-cased alpha-2 code.
#[derive(Debug, Clone, Default)]
pub struct CountryTable {
    names: HashMap<CountryCode, CountryName>,
}

impl CountryTable {
    /// The ISO 3166-1 table shipped with the crate.
    pub fn builtin() -> ReportResult<Self> {
        Self::from_json(BUILTIN_TABLE)
    }

    /// Load a table from a JSON file shaped like the builtin one.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Ok(Self::from_json(&content)?)
    }

    pub fn from_json(content: &str) -> ReportResult<Self> {
        let file: CountryTableFile = serde_json::from_str(content)?;
        Ok(Self::from_entries(file.countries))
    }

    pub fn from_entries(entries: impl IntoIterator<Item = CountryEntry>) -> Self {
        let names = entries
            .into_iter()
            .map(|e| (e.alpha_2.trim().to_uppercase(), e.name))
            .collect();
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl CountryResolver for CountryTable {
    fn resolve(&self, code: &str) -> Option<CountryName> {
        self.names.get(&code.trim().to_uppercase()).cloned()
    }
}
