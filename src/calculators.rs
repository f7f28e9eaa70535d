//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no configuration lookup, no cache
//! access. The resolvers and the orchestrator decide *which* rule applies;
//! these functions only compute amounts from a rule that already applies.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use crate::models::{CountryPricingRule, MarkupSlab, MarkupType};

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is
/// exactly halfway between two possibilities, which reduces cumulative
/// rounding bias. The engine itself returns unrounded decimals; this helper
/// is for presentation, applied by the caller with the target currency's
/// precision.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use tourquote::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Markup amount for a matched slab.
///
/// Percentage slabs charge a share of `amount`; fixed slabs charge
/// `markup_value` once, independent of `amount`.
pub fn slab_markup(amount: Decimal, slab: &MarkupSlab) -> Decimal {
    match slab.markup_type {
        MarkupType::Percentage => amount * slab.markup_value / Decimal::ONE_HUNDRED,
        MarkupType::Fixed => slab.markup_value,
    }
}

/// Markup amount for a country rule, scaled by the tier multiplier.
///
/// The percentage/fixed formula matches slabs; the tier factor then scales
/// the computed markup before it is added to the base cost.
pub fn country_markup(
    base_amount: Decimal,
    rule: &CountryPricingRule,
    tier_multiplier: Decimal,
) -> Decimal {
    let markup = match rule.markup_type {
        MarkupType::Percentage => base_amount * rule.default_markup / Decimal::ONE_HUNDRED,
        MarkupType::Fixed => rule.default_markup,
    };
    markup * tier_multiplier
}

/// Flat default markup: a plain percentage of the base amount.
pub fn flat_markup(base_amount: Decimal, percentage: Decimal) -> Decimal {
    base_amount * percentage / Decimal::ONE_HUNDRED
}

/// Display split over paying passengers.
///
/// Callers must have already rejected a zero pax count; dividing by zero
/// is a programming error here, not an input condition.
pub fn per_person_share(total: Decimal, paying_count: u32) -> Decimal {
    debug_assert!(paying_count > 0);
    total / Decimal::from(paying_count)
}
