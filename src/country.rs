//! Country pricing rules unit.
//!
//! Looks up the per-country default markup and tier classification used
//! when country-based pricing is the active strategy, and owns the tier
//! multiplier table that scales country markups.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::models::{CountryPricingRule, CountryTier};

/// Resolve the pricing rule for a country code.
///
/// Straight case-insensitive lookup; `None` when absent, in which case the
/// caller falls back to the slab/default strategy.
pub fn resolve_country_rule<'a>(
    country_code: &str,
    rules: &'a [CountryPricingRule],
) -> Option<&'a CountryPricingRule> {
    rules
        .iter()
        .find(|r| r.country_code.eq_ignore_ascii_case(country_code))
}

/// Tier classification to markup multiplier table.
///
/// Tiers without an explicit entry fall back to a multiplier of `1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierMultipliers {
    multipliers: HashMap<CountryTier, Decimal>,
}

impl TierMultipliers {
    /// Empty table: every tier maps to `1`.
    pub fn empty() -> Self {
        Self {
            multipliers: HashMap::new(),
        }
    }

    /// Multiplier for a tier, `1` when the table has no entry.
    pub fn multiplier_for(&self, tier: CountryTier) -> Decimal {
        self.multipliers.get(&tier).copied().unwrap_or(Decimal::ONE)
    }

    /// Override the multiplier for a tier.
    pub fn set(&mut self, tier: CountryTier, multiplier: Decimal) {
        self.multipliers.insert(tier, multiplier);
    }
}

impl Default for TierMultipliers {
    /// Standard table: budget destinations take a trimmed markup, luxury
    /// destinations a scaled-up one.
    fn default() -> Self {
        let mut multipliers = HashMap::new();
        multipliers.insert(CountryTier::Budget, dec!(0.9));
        multipliers.insert(CountryTier::Standard, dec!(1.0));
        multipliers.insert(CountryTier::Premium, dec!(1.1));
        multipliers.insert(CountryTier::Luxury, dec!(1.2));
        Self { multipliers }
    }
}
