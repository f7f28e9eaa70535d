//! Pricing and tax calculation engine for travel package quoting.
//!
//! Turns a supplier cost, a passenger mix, a destination, and a service
//! type into a fully itemized customer-facing price: one of three
//! configurable markup strategies (country/tier rules, amount-range slabs,
//! or a flat default), currency conversion with an agency margin, and
//! destination tax rules with a source-withholding deduction, in both
//! tax-inclusive and tax-exclusive quoting modes.
//!
//! The engine is a pure in-process library: configuration records are
//! supplied by the surrounding application as plain data, and results come
//! back as unrounded decimals for the caller to format. The only mutable
//! state is an injectable exchange-rate cache with explicit invalidation.

pub mod cache;
pub mod calculators;
pub mod country;
pub mod engine;
pub mod error;
pub mod fx;
pub mod models;
pub mod results;
pub mod slabs;
pub mod tax;
pub mod validation;

// Re-export commonly used items
pub use cache::{CacheStats, RateCache};
pub use calculators::round_money;
pub use country::{resolve_country_rule, TierMultipliers};
pub use engine::PricingEngine;
pub use error::{EngineError, Result, ValidationError};
pub use fx::CurrencyConverter;
pub use models::{
    CountryPricingRule, CountryTier, ExchangeRate, MarkupSlab, MarkupType, PaxMix, PricingConfig,
    QuoteInput, RuleBook, ServiceType, SlabApplicationMode, TaxConfiguration, TaxRateEntry,
    TdsConfiguration,
};
pub use results::{PricingResult, PricingStrategy, QuoteBreakdown, TaxLineItem, TaxResult};
pub use slabs::resolve_slab;
pub use tax::calculate_tax;
