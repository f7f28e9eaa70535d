//! In-memory exchange-rate caching using moka.
//!
//! The cache is an explicitly owned, injectable object so tests can build
//! an isolated cache per case. Entries have no TTL and no idle expiry:
//! staleness is a caller responsibility, and `clear` is the only way an
//! entry leaves the cache (beyond capacity eviction).

use std::sync::Arc;

use moka::sync::Cache;
use serde::Serialize;
use tracing::info;

use crate::models::ExchangeRate;

/// Cache of resolved exchange-rate records keyed by currency pair.
#[derive(Clone)]
pub struct RateCache {
    rates: Cache<String, Arc<ExchangeRate>>,
}

impl RateCache {
    /// Create a new cache instance.
    ///
    /// Capacity-bounded only; no time-based expiry.
    pub fn new() -> Self {
        Self {
            rates: Cache::builder().max_capacity(500).build(),
        }
    }

    /// Cache key for a currency pair.
    pub fn pair_key(from_currency: &str, to_currency: &str) -> String {
        format!(
            "{}->{}",
            from_currency.to_uppercase(),
            to_currency.to_uppercase()
        )
    }

    /// Look up a cached rate record for a currency pair.
    pub fn get(&self, from_currency: &str, to_currency: &str) -> Option<Arc<ExchangeRate>> {
        self.rates.get(&Self::pair_key(from_currency, to_currency))
    }

    /// Store a resolved rate record under its currency pair.
    pub fn insert(&self, record: &ExchangeRate) {
        let key = Self::pair_key(&record.from_currency, &record.to_currency);
        self.rates.insert(key, Arc::new(record.clone()));
    }

    /// Invalidate every cached rate, effective for all subsequent lookups.
    pub fn clear(&self) {
        self.rates.invalidate_all();
        info!("Exchange-rate cache cleared");
    }

    /// Cache statistics for monitoring.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            rates_cached: self.rates.entry_count(),
        }
    }
}

impl Default for RateCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub rates_cached: u64,
}
