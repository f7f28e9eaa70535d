//! Configuration records consumed by the pricing engine.
//!
//! All of these are supplied by the surrounding application (which owns
//! their persistence and CRUD); the engine reads them as plain data and
//! never mutates them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::country::TierMultipliers;
use crate::error::EngineError;

/// How a markup value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupType {
    /// Markup is a percentage of the base amount.
    Percentage,
    /// Markup is a fixed amount, independent of the base.
    Fixed,
}

/// Whether slab-range matching compares against the whole booking amount
/// or the amount divided by paying passengers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlabApplicationMode {
    PerPerson,
    Total,
}

/// Country classification driving the tier markup multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountryTier {
    Budget,
    Standard,
    Premium,
    Luxury,
}

/// Service type a tax rate entry applies to.
///
/// `All` is a blanket entry matching every requested service type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    All,
    Transport,
    Hotel,
    Restaurant,
    Sightseeing,
    Activity,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::All => "all",
            ServiceType::Transport => "transport",
            ServiceType::Hotel => "hotel",
            ServiceType::Restaurant => "restaurant",
            ServiceType::Sightseeing => "sightseeing",
            ServiceType::Activity => "activity",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceType {
    type Err = EngineError;

    /// Parse a service type token from the surrounding application.
    ///
    /// This is the only place an unrecognized token is rejected; once a
    /// value is typed, the tax engine itself cannot fail on service type.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_lowercase().as_str() {
            "all" => Ok(ServiceType::All),
            "transport" => Ok(ServiceType::Transport),
            "hotel" => Ok(ServiceType::Hotel),
            "restaurant" => Ok(ServiceType::Restaurant),
            "sightseeing" => Ok(ServiceType::Sightseeing),
            "activity" => Ok(ServiceType::Activity),
            _ => Err(EngineError::InvalidServiceType {
                token: token.to_string(),
            }),
        }
    }
}

/// Stored exchange rate between a currency pair.
///
/// `rate` is the raw mid-market rate; `margin` and `additional_surcharge`
/// are applied on top at conversion time, never folded into `rate`.
/// Records with `is_fixed` are locked: the refresh collaborator must not
/// overwrite them, and the engine consumes whatever it is given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub id: Uuid,
    pub from_currency: String,
    pub to_currency: String,
    pub rate: Decimal,
    /// Agency margin percentage added on top of the raw rate.
    pub margin: Decimal,
    /// Flat surcharge added after the rate and margin.
    pub additional_surcharge: Decimal,
    pub is_fixed: bool,
    pub last_updated: DateTime<Utc>,
    pub is_custom: bool,
}

/// An amount-range markup rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkupSlab {
    pub id: Uuid,
    pub name: String,
    pub min_amount: Decimal,
    pub max_amount: Decimal,
    pub markup_type: MarkupType,
    pub markup_value: Decimal,
    pub currency: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MarkupSlab {
    /// Range check, inclusive on both bounds.
    pub fn contains(&self, amount: Decimal) -> bool {
        amount >= self.min_amount && amount <= self.max_amount
    }
}

/// Per-country default markup and conversion margin.
///
/// One rule per country code; duplicates are a storage concern
/// (last-write-wins upstream), not an engine concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryPricingRule {
    pub country_code: String,
    pub tier: CountryTier,
    pub region: String,
    pub default_markup: Decimal,
    pub markup_type: MarkupType,
    /// Currency-conversion margin percentage used when country-based
    /// pricing is the active strategy.
    pub conversion_margin: Decimal,
}

/// A single percentage tax rate within a country's tax table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxRateEntry {
    pub id: Uuid,
    pub service_type: ServiceType,
    pub rate: Decimal,
    pub description: String,
    pub is_default: bool,
}

/// Source-withholding (TDS) deduction parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TdsConfiguration {
    pub is_applicable: bool,
    pub rate: Decimal,
    /// Withholding triggers only when the payable total exceeds this.
    pub threshold: Decimal,
    /// Allowance netted out of the amount before the rate is applied.
    pub exemption_limit: Decimal,
}

/// Per-country tax table. At most one active configuration per country.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxConfiguration {
    pub country_code: String,
    /// Tax regime label, e.g. "GST" or "VAT".
    pub tax_type: String,
    pub tax_rates: Vec<TaxRateEntry>,
    #[serde(default)]
    pub tds: Option<TdsConfiguration>,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

/// Passenger mix for a booking.
///
/// Infants travel free and are excluded from every per-person division.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PaxMix {
    pub adults: u32,
    pub children: u32,
    #[serde(default)]
    pub infants: u32,
}

impl PaxMix {
    pub fn new(adults: u32, children: u32, infants: u32) -> Self {
        Self {
            adults,
            children,
            infants,
        }
    }

    /// Paying passengers: adults + children, infants excluded.
    pub fn paying_count(&self) -> u32 {
        self.adults + self.children
    }
}

/// Engine-level pricing configuration.
///
/// Explicit, closed struct - the strategy precedence in the orchestrator is
/// decided from these named flags, never from an open settings map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Strategy 1: country/tier rules govern when enabled.
    pub enable_country_based_pricing: bool,
    /// Strategy 2: amount-range slabs govern when enabled (and strategy 1
    /// did not produce a rule).
    pub use_slab_pricing: bool,
    pub slab_application_mode: SlabApplicationMode,
    /// Strategy 3: flat percentage fallback when nothing else matched.
    pub default_markup_percentage: Decimal,
    #[serde(default)]
    pub tier_multipliers: TierMultipliers,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            enable_country_based_pricing: false,
            use_slab_pricing: false,
            slab_application_mode: SlabApplicationMode::Total,
            default_markup_percentage: Decimal::ZERO,
            tier_multipliers: TierMultipliers::default(),
        }
    }
}

/// Input for a full quote: supplier cost plus booking parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteInput {
    pub supplier_cost: Decimal,
    pub supplier_currency: String,
    /// Currency the customer is quoted in.
    pub quote_currency: String,
    pub country_code: String,
    pub service_type: ServiceType,
    pub pax: PaxMix,
    /// Whether the quoted amount already contains tax.
    pub tax_inclusive: bool,
}

/// Read-only bundle of configuration records supplied by collaborators.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBook<'a> {
    pub slabs: &'a [MarkupSlab],
    pub country_rules: &'a [CountryPricingRule],
    pub tax_configurations: &'a [TaxConfiguration],
    pub exchange_rates: &'a [ExchangeRate],
}
