//! Static pricing catalog: service categories, hourly rate ranges, base
//! effort, and per-feature surcharges.
//!
//! The tables are process-wide constants. Lookups never fail: an unknown
//! service id resolves to a defensive fallback profile and an unknown feature
//! label carries a flat default surcharge. Both fallbacks are part of the
//! public contract and must not be turned into errors.

use serde::{Deserialize, Serialize};

/// Surcharge, in hours, for any feature label not present in the table.
pub const DEFAULT_FEATURE_HOURS: u32 = 6;

/// Known feature add-ons and the hours each one adds to an estimate.
pub const FEATURE_SURCHARGES: [(&str, u32); 8] = [
    ("User Login / Authentication", 12),
    ("Online Payments", 18),
    ("Booking / Scheduling", 16),
    ("Shopping Cart", 14),
    ("Loyalty / Rewards", 10),
    ("Cloud Hosting / CI/CD", 8),
    ("Analytics Dashboard", 15),
    ("SEO Audit & Optimization", 12),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Apps,
    Web,
    Uiux,
    Seo,
    Ecom,
    Cloud,
}

/// Rate range and base effort for one service category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ServiceProfile {
    pub rate_low: u32,
    pub rate_high: u32,
    pub base_hours: u32,
}

impl ServiceCategory {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "apps" => Some(Self::Apps),
            "web" => Some(Self::Web),
            "uiux" => Some(Self::Uiux),
            "seo" => Some(Self::Seo),
            "ecom" => Some(Self::Ecom),
            "cloud" => Some(Self::Cloud),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Apps => "apps",
            Self::Web => "web",
            Self::Uiux => "uiux",
            Self::Seo => "seo",
            Self::Ecom => "ecom",
            Self::Cloud => "cloud",
        }
    }

    pub fn profile(&self) -> ServiceProfile {
        match self {
            Self::Apps => ServiceProfile { rate_low: 50, rate_high: 100, base_hours: 80 },
            Self::Web => ServiceProfile { rate_low: 40, rate_high: 80, base_hours: 40 },
            Self::Uiux => ServiceProfile { rate_low: 35, rate_high: 70, base_hours: 24 },
            Self::Seo => ServiceProfile { rate_low: 30, rate_high: 60, base_hours: 20 },
            Self::Ecom => ServiceProfile { rate_low: 40, rate_high: 75, base_hours: 60 },
            Self::Cloud => ServiceProfile { rate_low: 50, rate_high: 90, base_hours: 30 },
        }
    }
}

impl ServiceProfile {
    /// Profile used when a non-empty service id is not in the catalog.
    /// Unknown services still get a quote; rejection is reserved for a
    /// missing service id only.
    pub fn fallback() -> Self {
        Self { rate_low: 40, rate_high: 80, base_hours: 40 }
    }

    /// Resolve a raw service id, falling back for unknown ids.
    pub fn resolve(service: &str) -> Self {
        ServiceCategory::parse(service)
            .map(|category| category.profile())
            .unwrap_or_else(Self::fallback)
    }
}

/// Hours a single feature label adds to the estimate.
pub fn feature_surcharge(label: &str) -> u32 {
    FEATURE_SURCHARGES
        .iter()
        .find(|(known, _)| *known == label)
        .map(|(_, hours)| *hours)
        .unwrap_or(DEFAULT_FEATURE_HOURS)
}
