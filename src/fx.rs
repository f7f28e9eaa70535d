//! Currency conversion unit.
//!
//! Converts amounts between currencies using stored rate records: the raw
//! mid-market rate, an agency margin percentage on top, and an optional
//! fixed surcharge. The engine consumes whatever rate record it is given -
//! fetching and refreshing rates belongs to the surrounding application.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use crate::cache::{CacheStats, RateCache};
use crate::error::EngineError;
use crate::models::ExchangeRate;

/// Converter over an injectable rate cache.
#[derive(Clone, Default)]
pub struct CurrencyConverter {
    cache: RateCache,
}

impl CurrencyConverter {
    pub fn new() -> Self {
        Self {
            cache: RateCache::new(),
        }
    }

    /// Build a converter over an existing cache (shared or test-isolated).
    pub fn with_cache(cache: RateCache) -> Self {
        Self { cache }
    }

    /// Convert `amount` from one currency to another.
    ///
    /// Identity when the currencies match. Otherwise resolves the rate
    /// record for the pair (cache first, then the supplied records) and
    /// returns `amount * rate * (1 + margin/100) + additional_surcharge`.
    ///
    /// # Errors
    /// `EngineError::RateNotFound` when the currencies differ and no record
    /// covers the pair.
    pub fn convert(
        &self,
        amount: Decimal,
        from_currency: &str,
        to_currency: &str,
        rates: &[ExchangeRate],
    ) -> Result<Decimal, EngineError> {
        self.convert_with_margin(amount, from_currency, to_currency, rates, None)
    }

    /// Convert with the record's margin replaced by `margin_override`.
    ///
    /// Used when country-based pricing is active and the country rule
    /// carries its own conversion margin.
    pub fn convert_with_margin(
        &self,
        amount: Decimal,
        from_currency: &str,
        to_currency: &str,
        rates: &[ExchangeRate],
        margin_override: Option<Decimal>,
    ) -> Result<Decimal, EngineError> {
        if from_currency.eq_ignore_ascii_case(to_currency) {
            return Ok(amount);
        }

        let record = self.lookup(from_currency, to_currency, rates)?;
        let margin = margin_override.unwrap_or(record.margin);
        let converted = amount * record.rate * (Decimal::ONE + margin / Decimal::ONE_HUNDRED)
            + record.additional_surcharge;
        Ok(converted)
    }

    /// Resolve the rate record for a pair, caching on miss.
    fn lookup(
        &self,
        from_currency: &str,
        to_currency: &str,
        rates: &[ExchangeRate],
    ) -> Result<Arc<ExchangeRate>, EngineError> {
        if let Some(cached) = self.cache.get(from_currency, to_currency) {
            debug!("Cache HIT for rate {} -> {}", from_currency, to_currency);
            return Ok(cached);
        }
        debug!("Cache MISS for rate {} -> {}", from_currency, to_currency);

        let record = rates
            .iter()
            .find(|r| {
                r.from_currency.eq_ignore_ascii_case(from_currency)
                    && r.to_currency.eq_ignore_ascii_case(to_currency)
            })
            .ok_or_else(|| EngineError::RateNotFound {
                from: from_currency.to_string(),
                to: to_currency.to_string(),
            })?;

        self.cache.insert(record);
        Ok(Arc::new(record.clone()))
    }

    /// Drop every cached rate immediately. No implicit expiry exists, so
    /// this is the only refresh mechanism.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
