//! Configuration record validation.
//!
//! Write-time guards invoked by the configuration collaborator before
//! records are stored. The quote-path resolvers assume validated input and
//! degrade gracefully instead of re-checking, so these functions are the
//! primary defense against malformed slabs, rules, and tax tables.

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::models::{CountryPricingRule, ExchangeRate, MarkupSlab, TaxConfiguration};

fn require_non_negative(field: &str, value: Decimal) -> Result<(), ValidationError> {
    if value < Decimal::ZERO {
        return Err(ValidationError::NegativeValue {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

fn require_present(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validate a single exchange-rate record.
pub fn validate_exchange_rate(record: &ExchangeRate) -> Result<(), ValidationError> {
    require_present("from_currency", &record.from_currency)?;
    require_present("to_currency", &record.to_currency)?;
    if record.rate <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveRate {
            from: record.from_currency.clone(),
            to: record.to_currency.clone(),
            rate: record.rate,
        });
    }
    require_non_negative("margin", record.margin)?;
    require_non_negative("additional_surcharge", record.additional_surcharge)?;
    Ok(())
}

/// Validate a single markup slab.
pub fn validate_slab(slab: &MarkupSlab) -> Result<(), ValidationError> {
    require_present("name", &slab.name)?;
    require_present("currency", &slab.currency)?;
    require_non_negative("min_amount", slab.min_amount)?;
    require_non_negative("markup_value", slab.markup_value)?;
    if slab.min_amount >= slab.max_amount {
        return Err(ValidationError::InvalidRange {
            name: slab.name.clone(),
            min: slab.min_amount,
            max: slab.max_amount,
        });
    }
    Ok(())
}

/// Validate a slab set: every slab individually, then non-overlap among
/// active slabs sharing a currency.
pub fn validate_slab_set(slabs: &[MarkupSlab]) -> Result<(), ValidationError> {
    for slab in slabs {
        validate_slab(slab)?;
    }

    let active: Vec<&MarkupSlab> = slabs.iter().filter(|s| s.is_active).collect();
    for (i, a) in active.iter().enumerate() {
        for b in &active[i + 1..] {
            if !a.currency.eq_ignore_ascii_case(&b.currency) {
                continue;
            }
            // Inclusive ranges overlap when neither ends before the other starts.
            if a.min_amount <= b.max_amount && b.min_amount <= a.max_amount {
                return Err(ValidationError::OverlappingSlabs {
                    first: a.name.clone(),
                    second: b.name.clone(),
                    currency: a.currency.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Validate a country pricing rule.
pub fn validate_country_rule(rule: &CountryPricingRule) -> Result<(), ValidationError> {
    require_present("country_code", &rule.country_code)?;
    require_non_negative("default_markup", rule.default_markup)?;
    require_non_negative("conversion_margin", rule.conversion_margin)?;
    Ok(())
}

/// Validate a single tax configuration.
pub fn validate_tax_configuration(config: &TaxConfiguration) -> Result<(), ValidationError> {
    require_present("country_code", &config.country_code)?;
    require_present("tax_type", &config.tax_type)?;
    for entry in &config.tax_rates {
        require_non_negative("rate", entry.rate)?;
    }
    if let Some(tds) = &config.tds {
        require_non_negative("tds.rate", tds.rate)?;
        require_non_negative("tds.threshold", tds.threshold)?;
        require_non_negative("tds.exemption_limit", tds.exemption_limit)?;
    }
    Ok(())
}

/// Validate a tax configuration set: every configuration individually,
/// then at most one active configuration per country code.
pub fn validate_tax_configurations(configs: &[TaxConfiguration]) -> Result<(), ValidationError> {
    for config in configs {
        validate_tax_configuration(config)?;
    }

    let active: Vec<&TaxConfiguration> = configs.iter().filter(|c| c.is_active).collect();
    for (i, a) in active.iter().enumerate() {
        for b in &active[i + 1..] {
            if a.country_code.eq_ignore_ascii_case(&b.country_code) {
                return Err(ValidationError::DuplicateActiveTaxConfig {
                    country_code: a.country_code.clone(),
                });
            }
        }
    }
    Ok(())
}
