use core::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Stock risk classification requested from the model.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            other => Err(format!("unknown risk level: {other}")),
        }
    }
}

impl core::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One restocking recommendation, exactly as the model supplied it.
///
/// This is an AI insight, not a domain record: fields are not validated and
/// serialization reproduces the element verbatim. The typed accessors return
/// `None` when a field is absent or has an unexpected type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recommendation(JsonValue);

impl Recommendation {
    pub fn from_value(value: JsonValue) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &JsonValue {
        &self.0
    }

    pub fn sku(&self) -> Option<&str> {
        self.str_field("sku")
    }

    pub fn risk_level(&self) -> Option<RiskLevel> {
        self.str_field("riskLevel")?.parse().ok()
    }

    pub fn recommendation(&self) -> Option<&str> {
        self.str_field("recommendation")
    }

    pub fn suggested_reorder_quantity(&self) -> Option<i64> {
        self.0.get("suggestedReorderQuantity")?.as_i64()
    }

    pub fn reasoning(&self) -> Option<&str> {
        self.str_field("reasoning")
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key)?.as_str()
    }
}
