mod store;

pub use store::{FileRulesSource, RulesSource, RulesSourceError, RulesStore, StaticRulesSource};

use super::tiers::{Bounds, TierPayout};
use serde::{Deserialize, Serialize};

/// Thresholds, slab tables, and static adjustments applied by the payout engine.
///
/// Every section falls back to its built-in default when omitted from the document, so a
/// rules file only has to carry the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub mbg: MbgRules,
    pub revenue_incentive: RevenueIncentiveRules,
    pub additional_incentive: AdditionalIncentiveRules,
    pub columns: ColumnAdjustments,
    pub display: DisplayConfig,
}

impl RulesConfig {
    /// Configuration used whenever the external rules document cannot be loaded.
    pub fn builtin() -> Self {
        Self {
            version: Some("builtin".to_string()),
            mbg: MbgRules::default(),
            revenue_incentive: RevenueIncentiveRules::default(),
            additional_incentive: AdditionalIncentiveRules::default(),
            columns: ColumnAdjustments::default(),
            display: DisplayConfig::default(),
        }
    }

    pub fn from_json(payload: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Minimum bonus guarantee gate and hourly fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MbgRules {
    pub daily_earning_threshold: f64,
    pub hours_online_threshold: f64,
    pub confirmation_rate_threshold: f64,
    pub full_mbg_amount: f64,
    pub hourly_rate: f64,
    pub max_hours: f64,
}

impl Default for MbgRules {
    fn default() -> Self {
        Self {
            daily_earning_threshold: 3500.0,
            hours_online_threshold: 12.0,
            confirmation_rate_threshold: 95.0,
            full_mbg_amount: 600.0,
            hourly_rate: 40.0,
            max_hours: 12.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevenueIncentiveRules {
    pub slabs: Vec<RevenueSlab>,
}

impl Default for RevenueIncentiveRules {
    fn default() -> Self {
        Self {
            slabs: vec![
                RevenueSlab {
                    min: None,
                    max: Some(14999.0),
                    kind: SlabKind::Percentage,
                    value: 10.0,
                },
                RevenueSlab {
                    min: Some(15000.0),
                    max: Some(24999.0),
                    kind: SlabKind::Percentage,
                    value: 12.0,
                },
                RevenueSlab {
                    min: Some(25000.0),
                    max: None,
                    kind: SlabKind::Fixed,
                    value: 3500.0,
                },
            ],
        }
    }
}

/// Revenue slab evaluated against a driver's total earning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueSlab {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(rename = "type")]
    pub kind: SlabKind,
    pub value: f64,
}

impl RevenueSlab {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.min, self.max)
    }

    pub fn payout(&self) -> TierPayout {
        match self.kind {
            SlabKind::Percentage => TierPayout::Percentage(self.value),
            SlabKind::Fixed => TierPayout::Fixed(self.value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlabKind {
    Percentage,
    Fixed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdditionalIncentiveRules {
    pub slabs: Vec<AdditionalSlab>,
}

impl Default for AdditionalIncentiveRules {
    fn default() -> Self {
        Self {
            slabs: vec![
                AdditionalSlab {
                    min: 90.0,
                    max: Some(94.99),
                    value: 250.0,
                },
                AdditionalSlab {
                    min: 95.0,
                    max: Some(97.99),
                    value: 500.0,
                },
                AdditionalSlab {
                    min: 98.0,
                    max: None,
                    value: 750.0,
                },
            ],
        }
    }
}

/// Flat incentive slab evaluated against the weekly acceptance percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditionalSlab {
    pub min: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub value: f64,
}

impl AdditionalSlab {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(Some(self.min), self.max)
    }

    pub fn payout(&self) -> TierPayout {
        TierPayout::Fixed(self.value)
    }
}

/// Per-period adjustments that are configured rather than derived from records.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnAdjustments {
    /// Total deposit.
    #[serde(rename = "U")]
    pub total_deposit: StaticColumn,
    /// Credit.
    #[serde(rename = "Y")]
    pub credit: StaticColumn,
    /// Debit.
    #[serde(rename = "Z")]
    pub debit: StaticColumn,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StaticColumn {
    #[serde(rename = "static", default)]
    pub amount: f64,
}

impl StaticColumn {
    pub const fn new(amount: f64) -> Self {
        Self { amount }
    }
}

/// Formatting hints for presentation; never consulted by the calculation chain.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub currency: CurrencyDisplay,
    pub percentage: PercentageDisplay,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyDisplay {
    pub locale: String,
    pub symbol: String,
    pub decimals: usize,
    pub placeholder: String,
}

impl Default for CurrencyDisplay {
    fn default() -> Self {
        Self {
            locale: "en-IN".to_string(),
            symbol: "\u{20b9}".to_string(),
            decimals: 2,
            placeholder: "-".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PercentageDisplay {
    pub decimals: usize,
    pub placeholder: String,
}

impl Default for PercentageDisplay {
    fn default() -> Self {
        Self {
            decimals: 2,
            placeholder: "-".to_string(),
        }
    }
}
