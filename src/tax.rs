//! Tax calculation engine.
//!
//! Resolves the destination's tax table, applies every rate matching the
//! requested service type, and computes the source-withholding (TDS)
//! deduction. Absence of tax configuration is a valid, quiet state: an
//! unknown or inactive destination quotes tax-free rather than failing.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{ServiceType, TaxConfiguration, TaxRateEntry};
use crate::results::{TaxLineItem, TaxResult};

/// Compute the tax breakdown for a priced amount.
///
/// Selects all rate entries whose service type matches the request or is
/// the blanket `all` entry; matching rates are summed additively, not
/// compounded. In exclusive mode tax is added on top of `amount`; in
/// inclusive mode `amount` already contains tax and the pre-tax base is
/// recovered by dividing out the combined rate, leaving `total_amount`
/// unchanged.
///
/// TDS applies when configured, applicable, and the payable total exceeds
/// the threshold: `max(0, total - exemption_limit) * rate / 100`, reported
/// separately and never subtracted from `total_amount`.
pub fn calculate_tax(
    amount: Decimal,
    country_code: &str,
    service_type: ServiceType,
    is_inclusive: bool,
    configurations: &[TaxConfiguration],
) -> TaxResult {
    let config = configurations
        .iter()
        .find(|c| c.is_active && c.country_code.eq_ignore_ascii_case(country_code));

    let config = match config {
        Some(c) => c,
        None => {
            debug!(
                "No active tax configuration for {}; quoting tax-free",
                country_code
            );
            return TaxResult::zero_tax(amount, is_inclusive);
        }
    };

    let selected: Vec<&TaxRateEntry> = config
        .tax_rates
        .iter()
        .filter(|e| e.service_type == ServiceType::All || e.service_type == service_type)
        .collect();

    if selected.is_empty() {
        return TaxResult::zero_tax(amount, is_inclusive);
    }

    let combined_rate: Decimal = selected.iter().map(|e| e.rate).sum();

    let (base_amount, tax_amount, total_amount) = if is_inclusive {
        let divisor = Decimal::ONE + combined_rate / Decimal::ONE_HUNDRED;
        let base = amount / divisor;
        (base, amount - base, amount)
    } else {
        let tax = amount * combined_rate / Decimal::ONE_HUNDRED;
        (amount, tax, amount + tax)
    };

    let tax_breakdown = selected
        .iter()
        .map(|entry| TaxLineItem {
            tax_type: config.tax_type.clone(),
            rate: entry.rate,
            amount: base_amount * entry.rate / Decimal::ONE_HUNDRED,
            description: entry.description.clone(),
        })
        .collect();

    let tds_amount = config.tds.as_ref().and_then(|tds| {
        if !tds.is_applicable {
            return None;
        }
        if total_amount > tds.threshold {
            let withholdable = (total_amount - tds.exemption_limit).max(Decimal::ZERO);
            Some(withholdable * tds.rate / Decimal::ONE_HUNDRED)
        } else {
            Some(Decimal::ZERO)
        }
    });

    TaxResult {
        base_amount,
        tax_amount,
        total_amount,
        tax_breakdown,
        tds_amount,
        is_inclusive,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TdsConfiguration;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn entry(service_type: ServiceType, rate: Decimal, description: &str) -> TaxRateEntry {
        TaxRateEntry {
            id: Uuid::new_v4(),
            service_type,
            rate,
            description: description.to_string(),
            is_default: false,
        }
    }

    fn config(
        country: &str,
        rates: Vec<TaxRateEntry>,
        tds: Option<TdsConfiguration>,
        active: bool,
    ) -> TaxConfiguration {
        TaxConfiguration {
            country_code: country.to_string(),
            tax_type: "GST".to_string(),
            tax_rates: rates,
            tds,
            is_active: active,
            updated_at: Utc::now(),
        }
    }

    // ==================== exclusive mode tests ====================

    #[test]
    fn test_exclusive_single_rate() {
        let configs = vec![config(
            "IN",
            vec![entry(ServiceType::All, dec!(18), "Blanket GST")],
            None,
            true,
        )];

        let result = calculate_tax(dec!(10000), "IN", ServiceType::Hotel, false, &configs);
        assert_eq!(result.base_amount, dec!(10000));
        assert_eq!(result.tax_amount, dec!(1800));
        assert_eq!(result.total_amount, dec!(11800));
        assert_eq!(result.tax_breakdown.len(), 1);
        assert_eq!(result.tax_breakdown[0].amount, dec!(1800));
        assert!(!result.is_inclusive);
    }

    #[test]
    fn test_exclusive_specific_and_blanket_rates_sum() {
        // Both a specific and an 'all' entry apply additively.
        let configs = vec![config(
            "IN",
            vec![
                entry(ServiceType::Hotel, dec!(5), "Hotel levy"),
                entry(ServiceType::All, dec!(18), "Blanket GST"),
            ],
            None,
            true,
        )];

        let result = calculate_tax(dec!(10000), "IN", ServiceType::Hotel, false, &configs);
        assert_eq!(result.tax_amount, dec!(2300));
        assert_eq!(result.total_amount, dec!(12300));
        assert_eq!(result.tax_breakdown.len(), 2);
    }

    #[test]
    fn test_exclusive_non_matching_service_entries_skipped() {
        let configs = vec![config(
            "IN",
            vec![
                entry(ServiceType::Transport, dec!(5), "Transport levy"),
                entry(ServiceType::Hotel, dec!(12), "Hotel rate"),
            ],
            None,
            true,
        )];

        let result = calculate_tax(dec!(10000), "IN", ServiceType::Hotel, false, &configs);
        assert_eq!(result.tax_amount, dec!(1200));
        assert_eq!(result.tax_breakdown.len(), 1);
        assert_eq!(result.tax_breakdown[0].description, "Hotel rate");
    }

    // ==================== inclusive mode tests ====================

    #[test]
    fn test_inclusive_recovers_base() {
        let configs = vec![config(
            "IN",
            vec![entry(ServiceType::All, dec!(18), "Blanket GST")],
            None,
            true,
        )];

        let result = calculate_tax(dec!(11800), "IN", ServiceType::Hotel, true, &configs);
        assert_eq!(result.base_amount, dec!(10000));
        assert_eq!(result.tax_amount, dec!(1800));
        // Supplied amount already contained tax - total unchanged.
        assert_eq!(result.total_amount, dec!(11800));
        assert!(result.is_inclusive);
    }

    #[test]
    fn test_inclusive_exclusive_round_trip() {
        let configs = vec![config(
            "IN",
            vec![
                entry(ServiceType::Hotel, dec!(5), "Hotel levy"),
                entry(ServiceType::All, dec!(18), "Blanket GST"),
            ],
            None,
            true,
        )];

        let base = dec!(10000);
        let exclusive = calculate_tax(base, "IN", ServiceType::Hotel, false, &configs);
        let inclusive = calculate_tax(
            exclusive.total_amount,
            "IN",
            ServiceType::Hotel,
            true,
            &configs,
        );
        assert_eq!(inclusive.base_amount, base);
        assert_eq!(inclusive.tax_amount, exclusive.tax_amount);
    }

    #[test]
    fn test_inclusive_breakdown_shares_computed_from_base() {
        let configs = vec![config(
            "IN",
            vec![
                entry(ServiceType::Hotel, dec!(5), "Hotel levy"),
                entry(ServiceType::All, dec!(18), "Blanket GST"),
            ],
            None,
            true,
        )];

        // 12300 inclusive of 23% -> base 10000, shares 500 and 1800.
        let result = calculate_tax(dec!(12300), "IN", ServiceType::Hotel, true, &configs);
        assert_eq!(result.tax_breakdown[0].amount, dec!(500));
        assert_eq!(result.tax_breakdown[1].amount, dec!(1800));
    }

    // ==================== fallback tests ====================

    #[test]
    fn test_unknown_country_quotes_tax_free() {
        let result = calculate_tax(dec!(10000), "ZZ", ServiceType::Hotel, false, &[]);
        assert_eq!(result.tax_amount, dec!(0));
        assert_eq!(result.total_amount, dec!(10000));
        assert!(result.tax_breakdown.is_empty());
    }

    #[test]
    fn test_inactive_configuration_quotes_tax_free() {
        let configs = vec![config(
            "IN",
            vec![entry(ServiceType::All, dec!(18), "Blanket GST")],
            None,
            false,
        )];
        let result = calculate_tax(dec!(10000), "IN", ServiceType::Hotel, false, &configs);
        assert_eq!(result.tax_amount, dec!(0));
    }

    #[test]
    fn test_no_matching_entries_quotes_tax_free() {
        let configs = vec![config(
            "IN",
            vec![entry(ServiceType::Transport, dec!(5), "Transport levy")],
            None,
            true,
        )];
        let result = calculate_tax(dec!(10000), "IN", ServiceType::Hotel, false, &configs);
        assert_eq!(result.tax_amount, dec!(0));
        assert_eq!(result.total_amount, dec!(10000));
    }

    // ==================== TDS tests ====================

    fn tds(rate: Decimal, threshold: Decimal, exemption: Decimal) -> TdsConfiguration {
        TdsConfiguration {
            is_applicable: true,
            rate,
            threshold,
            exemption_limit: exemption,
        }
    }

    #[test]
    fn test_tds_above_threshold() {
        // Zero-rate tax table isolates the TDS arithmetic: total = 50000.
        let configs = vec![config(
            "IN",
            vec![entry(ServiceType::All, dec!(0), "Zero-rated")],
            Some(tds(dec!(2), dec!(30000), dec!(10000))),
            true,
        )];

        let result = calculate_tax(dec!(50000), "IN", ServiceType::Hotel, false, &configs);
        assert_eq!(result.total_amount, dec!(50000));
        // (50000 - 10000) * 2% = 800
        assert_eq!(result.tds_amount, Some(dec!(800.00)));
    }

    #[test]
    fn test_tds_zero_at_or_below_threshold() {
        let configs = vec![config(
            "IN",
            vec![entry(ServiceType::All, dec!(0), "Zero-rated")],
            Some(tds(dec!(2), dec!(30000), dec!(10000))),
            true,
        )];

        let at = calculate_tax(dec!(30000), "IN", ServiceType::Hotel, false, &configs);
        assert_eq!(at.tds_amount, Some(dec!(0)));

        let below = calculate_tax(dec!(12000), "IN", ServiceType::Hotel, false, &configs);
        assert_eq!(below.tds_amount, Some(dec!(0)));
    }

    #[test]
    fn test_tds_strictly_increases_above_threshold() {
        let configs = vec![config(
            "IN",
            vec![entry(ServiceType::All, dec!(0), "Zero-rated")],
            Some(tds(dec!(2), dec!(30000), dec!(10000))),
            true,
        )];

        let mut previous = Decimal::ZERO;
        for amount in [dec!(30001), dec!(35000), dec!(50000), dec!(100000)] {
            let result = calculate_tax(amount, "IN", ServiceType::Hotel, false, &configs);
            let tds_amount = result.tds_amount.unwrap();
            assert!(tds_amount > previous);
            previous = tds_amount;
        }
    }

    #[test]
    fn test_tds_exemption_cannot_go_negative() {
        // Exemption above the total: nothing left to withhold from.
        let configs = vec![config(
            "IN",
            vec![entry(ServiceType::All, dec!(0), "Zero-rated")],
            Some(tds(dec!(2), dec!(30000), dec!(60000))),
            true,
        )];

        let result = calculate_tax(dec!(50000), "IN", ServiceType::Hotel, false, &configs);
        assert_eq!(result.tds_amount, Some(dec!(0)));
    }

    #[test]
    fn test_tds_not_applicable_reports_none() {
        let configs = vec![config(
            "IN",
            vec![entry(ServiceType::All, dec!(18), "Blanket GST")],
            Some(TdsConfiguration {
                is_applicable: false,
                rate: dec!(2),
                threshold: dec!(0),
                exemption_limit: dec!(0),
            }),
            true,
        )];

        let result = calculate_tax(dec!(50000), "IN", ServiceType::Hotel, false, &configs);
        assert!(result.tds_amount.is_none());
    }

    #[test]
    fn test_tds_never_subtracted_from_total() {
        let configs = vec![config(
            "IN",
            vec![entry(ServiceType::All, dec!(18), "Blanket GST")],
            Some(tds(dec!(2), dec!(30000), dec!(10000))),
            true,
        )];

        let result = calculate_tax(dec!(50000), "IN", ServiceType::Hotel, false, &configs);
        assert_eq!(result.total_amount, dec!(59000));
        assert!(result.tds_amount.unwrap() > Decimal::ZERO);
        // total_amount stays gross; netting TDS out is the caller's call.
        assert_eq!(result.base_amount + result.tax_amount, result.total_amount);
    }
}
