//! Derived result types returned by the pricing engine.
//!
//! All amounts are unrounded decimals; rounding and display formatting
//! (currency symbol, decimal places) are a presentation concern for the
//! caller. Decimal fields serialize as strings so downstream consumers
//! never lose precision to floating point.

use rust_decimal::Decimal;
use serde::Serialize;

/// Which strategy governed a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PricingStrategy {
    CountryRule,
    Slab,
    FlatDefault,
}

/// Base / markup / total breakdown produced by the orchestrator.
#[derive(Debug, Clone, Serialize)]
pub struct PricingResult {
    pub currency: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub base_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub markup: Decimal,
    /// Tier scaling factor applied to the markup; `1` unless the quote was
    /// country-based.
    #[serde(with = "rust_decimal::serde::str")]
    pub tier_multiplier: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub final_price: Decimal,
    /// Display split over paying passengers.
    #[serde(with = "rust_decimal::serde::str")]
    pub per_person: Decimal,
    pub strategy: PricingStrategy,
}

/// One applied tax rate in a breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct TaxLineItem {
    /// Tax regime label, e.g. "GST" or "VAT".
    pub tax_type: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub description: String,
}

/// Tax breakdown for a priced subtotal.
#[derive(Debug, Clone, Serialize)]
pub struct TaxResult {
    /// Pre-tax amount. In inclusive mode this is the amount recovered by
    /// stripping the tax out of the supplied total.
    #[serde(with = "rust_decimal::serde::str")]
    pub base_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_amount: Decimal,
    pub tax_breakdown: Vec<TaxLineItem>,
    /// Source-withholding deduction, reported separately. It is never
    /// subtracted from `total_amount`; netting it out at settlement is the
    /// caller's decision.
    #[serde(with = "rust_decimal::serde::str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tds_amount: Option<Decimal>,
    pub is_inclusive: bool,
}

impl TaxResult {
    /// Quiet result for destinations with no active tax configuration.
    pub fn zero_tax(amount: Decimal, is_inclusive: bool) -> Self {
        Self {
            base_amount: amount,
            tax_amount: Decimal::ZERO,
            total_amount: amount,
            tax_breakdown: Vec::new(),
            tds_amount: None,
            is_inclusive,
        }
    }
}

/// Combined pricing + tax output for a full quote.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteBreakdown {
    pub pricing: PricingResult,
    pub tax: TaxResult,
    #[serde(with = "rust_decimal::serde::str")]
    pub grand_total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub per_person_total: Decimal,
}
