use serde::{Deserialize, Serialize};

/// Label printed in the report header when no provider filter is active.
pub const ALL_PROVIDERS_LABEL: &str = "worldpay and safecharge";

pub const DEFAULT_BAD_SCORING_MARKER: &str = "bad scoring";

pub const DEFAULT_MIN_SAMPLE_SIZE: u64 = 50;

/// Payment provider selection applied before any aggregation.
///
/// Serialised as the bare selector name (`"worldpay"`, `"safecharge"`),
/// or `null` for no filter. Any other name is kept verbatim so it can be
/// echoed in the header, but it filters nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum ProviderFilter {
    #[default]
    All,
    /// Exact match on `"worldpay"`.
    Worldpay,
    /// Case-insensitive substring match on `"safecharge"`.
    Safecharge,
    Unmatched(String),
}

impl ProviderFilter {
    pub fn parse(name: &str) -> Self {
        match name {
            "" => ProviderFilter::All,
            "worldpay" => ProviderFilter::Worldpay,
            "safecharge" => ProviderFilter::Safecharge,
            other => ProviderFilter::Unmatched(other.to_string()),
        }
    }

    /// Header label for this selector.
    pub fn label(&self) -> &str {
        match self {
            ProviderFilter::All => ALL_PROVIDERS_LABEL,
            ProviderFilter::Worldpay => "worldpay",
            ProviderFilter::Safecharge => "safecharge",
            ProviderFilter::Unmatched(name) => name,
        }
    }

    /// Whether a record carrying `provider` survives this selector.
    pub fn accepts(&self, provider: Option<&str>) -> bool {
        match self {
            ProviderFilter::All | ProviderFilter::Unmatched(_) => true,
            ProviderFilter::Worldpay => provider == Some("worldpay"),
            ProviderFilter::Safecharge => provider
                .map(|p| p.to_lowercase().contains("safecharge"))
                .unwrap_or(false),
        }
    }
}

impl From<Option<String>> for ProviderFilter {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(name) => ProviderFilter::parse(&name),
            None => ProviderFilter::All,
        }
    }
}

impl From<ProviderFilter> for Option<String> {
    fn from(value: ProviderFilter) -> Self {
        match value {
            ProviderFilter::All => None,
            other => Some(other.label().to_string()),
        }
    }
}

/// How a user-partner pair that appears under several country codes is
/// attributed to a country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountryAttribution {
    /// Most frequent code across the pair's records; ties go to the code
    /// seen first.
    #[default]
    MostFrequent,
    /// First code seen in input order.
    FirstSeen,
    /// One counts row per distinct code, the pair's counts repeated in each.
    FanOut,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub provider: ProviderFilter,
    /// Restrict the run to a single partner.
    pub partner_id: Option<String>,
    /// Restrict the run to a single user.
    pub user_id: Option<String>,
    /// Errors containing this text (any case) are not counted as failures.
    pub bad_scoring_marker: String,
    /// Countries below this many transactions are hidden unless every
    /// transaction was accepted.
    pub min_sample_size: u64,
    pub country_attribution: CountryAttribution,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            provider: ProviderFilter::All,
            partner_id: None,
            user_id: None,
            bad_scoring_marker: DEFAULT_BAD_SCORING_MARKER.into(),
            min_sample_size: DEFAULT_MIN_SAMPLE_SIZE,
            country_attribution: CountryAttribution::MostFrequent,
        }
    }
}

impl ReportConfig {
    /// Load from a JSON file. Missing fields fall back to defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: ReportConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn with_provider(mut self, provider: ProviderFilter) -> Self {
        self.provider = provider;
        self
    }
}
