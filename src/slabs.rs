//! Markup slab resolver.
//!
//! Finds the single active range-based markup rule that applies to an
//! amount in a given currency. Whether the comparison amount is the whole
//! booking total or a per-person figure is the orchestrator's decision;
//! the resolver is agnostic.

use rust_decimal::Decimal;
use tracing::warn;

use crate::models::MarkupSlab;

/// Resolve the slab covering `amount` in `currency`.
///
/// Considers only active slabs in the requested currency and returns the
/// first one (in stored order) whose range contains `amount`, both bounds
/// inclusive. Returns `None` when nothing matches; the caller falls back
/// to the flat default markup.
///
/// Active slabs sharing a currency are validated not to overlap at write
/// time. If that validation was bypassed, resolution stays deterministic:
/// first match in stored order wins, and the shadowed slabs are logged.
pub fn resolve_slab<'a>(
    amount: Decimal,
    currency: &str,
    slabs: &'a [MarkupSlab],
) -> Option<&'a MarkupSlab> {
    let mut matched: Option<&MarkupSlab> = None;

    for slab in slabs
        .iter()
        .filter(|s| s.is_active && s.currency.eq_ignore_ascii_case(currency))
    {
        if !slab.contains(amount) {
            continue;
        }
        match matched {
            None => matched = Some(slab),
            Some(first) => {
                warn!(
                    "Overlapping active slabs for {} at {}: '{}' shadows '{}'",
                    currency, amount, first.name, slab.name
                );
            }
        }
    }

    matched
}
