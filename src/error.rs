//! Error handling for the pricing engine.
//!
//! Two distinct families: `EngineError` covers failures on the quote path
//! (surfaced to the caller for user correction), while `ValidationError` is
//! raised only at configuration write time, before records reach the
//! resolvers. Absence of a matching configuration record is never an error
//! on the quote path - every lookup has a defined fallback.

use rust_decimal::Decimal;

/// Quote-path error type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Conversion requested between currencies with no stored rate record.
    #[error("no exchange rate found for {from} -> {to}")]
    RateNotFound { from: String, to: String },

    /// Zero paying passengers; prevents the per-person division.
    #[error("passenger count must include at least one paying traveller")]
    InvalidPaxCount,

    /// Unrecognized service type token.
    #[error("unrecognized service type '{token}'")]
    InvalidServiceType { token: String },
}

/// Configuration write-time error type.
///
/// The quote-path resolvers never raise these; they degrade gracefully
/// (first-match, zero-tax) so quoting stays available even if configuration
/// hygiene lapses upstream.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    MissingField { field: String },

    #[error("{field} must be non-negative, got {value}")]
    NegativeValue { field: String, value: Decimal },

    #[error("slab '{name}': min_amount {min} must be less than max_amount {max}")]
    InvalidRange {
        name: String,
        min: Decimal,
        max: Decimal,
    },

    #[error("active slabs '{first}' and '{second}' overlap in {currency}")]
    OverlappingSlabs {
        first: String,
        second: String,
        currency: String,
    },

    #[error("multiple active tax configurations for country {country_code}")]
    DuplicateActiveTaxConfig { country_code: String },

    #[error("exchange rate {from} -> {to} must be positive, got {rate}")]
    NonPositiveRate {
        from: String,
        to: String,
        rate: Decimal,
    },
}

pub type Result<T> = std::result::Result<T, EngineError>;
