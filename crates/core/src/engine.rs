//! The quote engine: a pure function from a service selection, optional
//! feature add-ons, and free-text notes to an hour estimate and price range.
//!
//! Each output quantity (`hours`, `price_low`, `price_high`) is rounded
//! independently from its own unscaled value times the complexity multiplier.
//! The price bounds are deliberately not re-derived from the rounded hour
//! count, so after compounded rounding they may not be exact multiples of the
//! reported hours and rates. That matches the long-standing behavior callers
//! depend on.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::catalog::{feature_surcharge, ServiceProfile};
use crate::errors::DomainError;

/// Case-insensitive substrings of the project description that signal extra
/// complexity. Substring containment is intentional: "customized" and
/// "complexity" both trigger the multiplier.
const COMPLEXITY_KEYWORDS: [&str; 3] = ["complex", "enterprise", "custom"];

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub base_hours: u32,
    pub feature_hours: u32,
    pub complexity_multiplier: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResult {
    pub hours: u64,
    pub price_low: u64,
    pub price_high: u64,
    pub service: String,
    pub features: Vec<String>,
    pub breakdown: Breakdown,
}

pub trait QuoteEngine: Send + Sync {
    fn estimate(&self, request: &QuoteRequest) -> Result<QuoteResult, DomainError>;
}

#[derive(Default)]
pub struct DeterministicQuoteEngine;

impl QuoteEngine for DeterministicQuoteEngine {
    fn estimate(&self, request: &QuoteRequest) -> Result<QuoteResult, DomainError> {
        estimate(request)
    }
}

/// Compute a price estimate. The only failure is a missing service id;
/// unknown services and feature labels resolve through catalog fallbacks.
pub fn estimate(request: &QuoteRequest) -> Result<QuoteResult, DomainError> {
    if request.service.is_empty() {
        return Err(DomainError::ServiceRequired);
    }

    let profile = ServiceProfile::resolve(&request.service);

    // Duplicate labels contribute once per occurrence.
    let feature_hours: u32 = request.features.iter().map(|label| feature_surcharge(label)).sum();

    let total_hours = Decimal::from(profile.base_hours) + Decimal::from(feature_hours);
    let price_low = round_whole(total_hours * Decimal::from(profile.rate_low));
    let price_high = round_whole(total_hours * Decimal::from(profile.rate_high));

    let multiplier = complexity_multiplier(&request.description);

    Ok(QuoteResult {
        hours: to_whole(round_whole(total_hours * multiplier)),
        price_low: to_whole(round_whole(price_low * multiplier)),
        price_high: to_whole(round_whole(price_high * multiplier)),
        service: request.service.clone(),
        features: request.features.clone(),
        breakdown: Breakdown {
            base_hours: profile.base_hours,
            feature_hours,
            complexity_multiplier: multiplier.to_f64().unwrap_or(1.0),
        },
    })
}

fn complexity_multiplier(description: &str) -> Decimal {
    let normalized = description.to_lowercase();
    if COMPLEXITY_KEYWORDS.iter().any(|keyword| normalized.contains(keyword)) {
        Decimal::new(12, 1)
    } else {
        Decimal::ONE
    }
}

fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

// Rounded values are whole and non-negative; saturate rather than panic on a
// pathological overflow.
fn to_whole(value: Decimal) -> u64 {
    value.to_u64().unwrap_or(u64::MAX)
}
