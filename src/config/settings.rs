use serde::{Deserialize, Serialize};

use crate::report::RangeUnit;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub api: ApiSettings,
    #[serde(default)]
    pub report: ReportSettings,
    #[serde(default)]
    pub rules: ReportRules,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ReportSettings {
    pub output_dir: String,
    pub currency_symbol: String,
    pub default_range_count: u32,
    pub default_range_unit: RangeUnit,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            output_dir: "output".to_string(),
            currency_symbol: "₱".to_string(),
            default_range_count: 30,
            default_range_unit: RangeUnit::Days,
        }
    }
}

/// Business constants the backend leaves to the client.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ReportRules {
    /// Days between order acceptance and its production deadline.
    pub deadline_days: u32,
    /// Whether an order without `acceptance_status` counts as pending.
    pub missing_acceptance_is_pending: bool,
}

impl Default for ReportRules {
    fn default() -> Self {
        Self {
            deadline_days: 14,
            missing_acceptance_is_pending: true,
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}
