//! Pricing orchestrator.
//!
//! Decides which single strategy governs a quote - country rules, markup
//! slabs, or the flat default - produces the base/markup breakdown, and
//! chains the tax engine for the final payable total. Strategies are
//! mutually exclusive and evaluated in a fixed precedence order; they are
//! never blended.

use rust_decimal::Decimal;
use tracing::debug;

use crate::cache::{CacheStats, RateCache};
use crate::calculators::{country_markup, flat_markup, per_person_share, slab_markup};
use crate::country::resolve_country_rule;
use crate::error::EngineError;
use crate::fx::CurrencyConverter;
use crate::models::{
    CountryPricingRule, ExchangeRate, MarkupSlab, PaxMix, PricingConfig, QuoteInput, RuleBook,
    ServiceType, SlabApplicationMode, TaxConfiguration,
};
use crate::results::{PricingResult, PricingStrategy, QuoteBreakdown, TaxResult};
use crate::slabs::resolve_slab;
use crate::tax::calculate_tax;

/// The pricing and tax calculation engine.
///
/// Stateless apart from the injectable exchange-rate cache; every
/// computation is a pure function of its inputs.
#[derive(Clone, Default)]
pub struct PricingEngine {
    converter: CurrencyConverter,
}

impl PricingEngine {
    pub fn new() -> Self {
        Self {
            converter: CurrencyConverter::new(),
        }
    }

    /// Build an engine over an existing rate cache (shared or
    /// test-isolated).
    pub fn with_cache(cache: RateCache) -> Self {
        Self {
            converter: CurrencyConverter::with_cache(cache),
        }
    }

    /// Convert an amount between currencies. See [`CurrencyConverter::convert`].
    pub fn convert(
        &self,
        amount: Decimal,
        from_currency: &str,
        to_currency: &str,
        rates: &[ExchangeRate],
    ) -> Result<Decimal, EngineError> {
        self.converter.convert(amount, from_currency, to_currency, rates)
    }

    /// Price a base amount under the configured strategy precedence.
    ///
    /// 1. Country-based pricing, when enabled and a rule exists for the
    ///    destination.
    /// 2. Slab pricing, when enabled; in per-person mode the comparison
    ///    amount is `base / paying passengers`, but a matched slab's rate
    ///    is applied to the full base amount. No matching slab falls
    ///    through.
    /// 3. Flat default markup percentage.
    ///
    /// # Errors
    /// `EngineError::InvalidPaxCount` when adults + children is zero.
    pub fn price(
        &self,
        base_amount: Decimal,
        pax: &PaxMix,
        country_code: &str,
        currency: &str,
        config: &PricingConfig,
        slabs: &[MarkupSlab],
        country_rules: &[CountryPricingRule],
    ) -> Result<PricingResult, EngineError> {
        let paying = pax.paying_count();
        if paying == 0 {
            return Err(EngineError::InvalidPaxCount);
        }

        let mut tier_multiplier = Decimal::ONE;
        let mut governed: Option<(Decimal, PricingStrategy)> = None;

        if config.enable_country_based_pricing {
            if let Some(rule) = resolve_country_rule(country_code, country_rules) {
                tier_multiplier = config.tier_multipliers.multiplier_for(rule.tier);
                let markup = country_markup(base_amount, rule, tier_multiplier);
                governed = Some((markup, PricingStrategy::CountryRule));
            }
        }

        if governed.is_none() && config.use_slab_pricing {
            let comparison_amount = match config.slab_application_mode {
                SlabApplicationMode::PerPerson => per_person_share(base_amount, paying),
                SlabApplicationMode::Total => base_amount,
            };
            if let Some(slab) = resolve_slab(comparison_amount, currency, slabs) {
                // The slab was matched on the comparison amount, but its
                // markup is taken against the full base.
                governed = Some((slab_markup(base_amount, slab), PricingStrategy::Slab));
            }
        }

        let (markup, strategy) = governed.unwrap_or_else(|| {
            (
                flat_markup(base_amount, config.default_markup_percentage),
                PricingStrategy::FlatDefault,
            )
        });

        debug!(
            "Priced {} {} via {:?}: markup {}",
            base_amount, currency, strategy, markup
        );

        let final_price = base_amount + markup;
        Ok(PricingResult {
            currency: currency.to_string(),
            base_price: base_amount,
            markup,
            tier_multiplier,
            final_price,
            per_person: per_person_share(final_price, paying),
            strategy,
        })
    }

    /// Tax breakdown for a priced amount. See [`calculate_tax`].
    pub fn calculate_tax(
        &self,
        amount: Decimal,
        country_code: &str,
        service_type: ServiceType,
        is_inclusive: bool,
        configurations: &[TaxConfiguration],
    ) -> TaxResult {
        calculate_tax(amount, country_code, service_type, is_inclusive, configurations)
    }

    /// Full quote: convert the supplier cost into the quoting currency,
    /// price it, then tax the priced subtotal.
    ///
    /// When country-based pricing is active and the destination has a
    /// rule, that rule's conversion margin replaces the rate record's
    /// margin for the supplier-cost conversion.
    pub fn quote(
        &self,
        input: &QuoteInput,
        config: &PricingConfig,
        rules: &RuleBook<'_>,
    ) -> Result<QuoteBreakdown, EngineError> {
        let paying = input.pax.paying_count();
        if paying == 0 {
            return Err(EngineError::InvalidPaxCount);
        }

        let margin_override = if config.enable_country_based_pricing {
            resolve_country_rule(&input.country_code, rules.country_rules)
                .map(|rule| rule.conversion_margin)
        } else {
            None
        };

        let base_amount = self.converter.convert_with_margin(
            input.supplier_cost,
            &input.supplier_currency,
            &input.quote_currency,
            rules.exchange_rates,
            margin_override,
        )?;

        let pricing = self.price(
            base_amount,
            &input.pax,
            &input.country_code,
            &input.quote_currency,
            config,
            rules.slabs,
            rules.country_rules,
        )?;

        let tax = calculate_tax(
            pricing.final_price,
            &input.country_code,
            input.service_type,
            input.tax_inclusive,
            rules.tax_configurations,
        );

        let grand_total = tax.total_amount;
        Ok(QuoteBreakdown {
            pricing,
            tax,
            grand_total,
            per_person_total: per_person_share(grand_total, paying),
        })
    }

    /// Clear the exchange-rate cache, effective immediately.
    pub fn clear_cache(&self) {
        self.converter.clear_cache();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.converter.cache_stats()
    }
}
