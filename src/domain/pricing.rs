//! Quote pricing: markup plus optional service fees over raw carrier quotes.
//!
//! Pure functions, no I/O. A batch priced twice with the same selection
//! yields the same result.

use super::entities::{PricedQuote, RawQuote, ServiceBreakdown, ServiceSelection};

/// Base margin applied to every carrier quote.
pub const BASE_MARKUP_RATE: f64 = 0.20;
/// Extra margin on the flagship carrier's quotes.
pub const PREMIUM_MARKUP_BONUS: f64 = 0.02;
/// Carrier-name marker that triggers the premium bonus.
pub const PREMIUM_CARRIER_MARKER: &str = "Maersk";
/// Flat customs brokerage fee, in quote currency units.
pub const CUSTOMS_FEE: f64 = 1500.0;
/// Insurance premium as a fraction of declared cargo value.
pub const INSURANCE_RATE: f64 = 0.005;

/// Prices a whole batch. The service selection is batch-wide, so the fee
/// breakdown is computed once and attached to every quote.
pub fn price_quotes(quotes: &[RawQuote], selection: &ServiceSelection) -> Vec<PricedQuote> {
    let services = service_fees(selection);
    quotes
        .iter()
        .map(|quote| price_quote(quote.clone(), services.clone()))
        .collect()
}

/// Final price = round(base + markup + service fees), rounded half away from
/// zero to whole currency units. Sub-unit bases can round the total below
/// the carrier's own price, so the result is floored at `base_price`.
pub fn price_quote(quote: RawQuote, services: ServiceBreakdown) -> PricedQuote {
    let markup_amount = quote.base_price * markup_rate(&quote.carrier);
    let final_price = (quote.base_price + markup_amount + services.total)
        .round()
        .max(quote.base_price);
    PricedQuote {
        quote,
        markup_amount,
        services,
        final_price,
    }
}

/// Percentage margin for a carrier. Per-quote, so two quotes from the same
/// carrier get the same rate but different absolute markup.
pub fn markup_rate(carrier: &str) -> f64 {
    if carrier.contains(PREMIUM_CARRIER_MARKER) {
        BASE_MARKUP_RATE + PREMIUM_MARKUP_BONUS
    } else {
        BASE_MARKUP_RATE
    }
}

pub fn service_fees(selection: &ServiceSelection) -> ServiceBreakdown {
    let customs_fee = if selection.include_customs {
        CUSTOMS_FEE
    } else {
        0.0
    };
    let insurance_fee = match selection.cargo_value {
        Some(value) if selection.include_insurance && value > 0.0 => value * INSURANCE_RATE,
        _ => 0.0,
    };
    // Reserved: the delivery toggle prices nothing until the provider
    // publishes a door-delivery fee schedule.
    let delivery_fee = 0.0;

    ServiceBreakdown {
        customs_fee,
        insurance_fee,
        delivery_fee,
        total: customs_fee + insurance_fee + delivery_fee,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn raw(carrier: &str, base_price: f64) -> RawQuote {
        RawQuote {
            id: format!("q-{carrier}-{base_price}"),
            carrier: carrier.to_string(),
            carrier_logo: None,
            base_price,
            currency: "USD".to_string(),
            transit_days: 28,
            valid_until: datetime!(2026-12-31 0:00 UTC),
            is_real: true,
            co2_kg: None,
        }
    }

    fn customs_and_insurance(cargo_value: f64) -> ServiceSelection {
        ServiceSelection {
            include_customs: true,
            include_insurance: true,
            include_delivery: false,
            cargo_value: Some(cargo_value),
        }
    }

    #[test]
    fn standard_carrier_gets_twenty_percent_markup() {
        let priced = price_quotes(&[raw("OtherLine", 1000.0)], &ServiceSelection::default());
        assert_eq!(priced[0].markup_amount, 200.0);
        assert_eq!(priced[0].final_price, 1200.0);
    }

    #[test]
    fn flagship_carrier_gets_premium_bonus() {
        let priced = price_quotes(&[raw("Maersk Line", 1000.0)], &ServiceSelection::default());
        assert_eq!(priced[0].markup_amount, 220.0);
        assert_eq!(priced[0].final_price, 1220.0);
    }

    #[test]
    fn service_fee_composition() {
        let fees = service_fees(&customs_and_insurance(100_000.0));
        assert_eq!(fees.customs_fee, 1500.0);
        assert_eq!(fees.insurance_fee, 500.0);
        assert_eq!(fees.delivery_fee, 0.0);
        assert_eq!(fees.total, 2000.0);
    }

    #[test]
    fn insurance_without_cargo_value_is_free() {
        let selection = ServiceSelection {
            include_insurance: true,
            ..Default::default()
        };
        assert_eq!(service_fees(&selection).insurance_fee, 0.0);

        let zero_value = ServiceSelection {
            include_insurance: true,
            cargo_value: Some(0.0),
            ..Default::default()
        };
        assert_eq!(service_fees(&zero_value).insurance_fee, 0.0);
    }

    #[test]
    fn delivery_toggle_prices_nothing() {
        let selection = ServiceSelection {
            include_delivery: true,
            ..Default::default()
        };
        let fees = service_fees(&selection);
        assert_eq!(fees.delivery_fee, 0.0);
        assert_eq!(fees.total, 0.0);
    }

    #[test]
    fn empty_batch_prices_to_empty_batch() {
        let priced = price_quotes(&[], &customs_and_insurance(50_000.0));
        assert!(priced.is_empty());
    }

    #[test]
    fn zero_base_price_yields_fees_only() {
        let priced = price_quotes(&[raw("FreeLine", 0.0)], &customs_and_insurance(100_000.0));
        assert_eq!(priced[0].markup_amount, 0.0);
        assert_eq!(priced[0].final_price, 2000.0);
    }

    #[test]
    fn final_price_never_below_base_price() {
        let batch = [
            raw("Maersk", 2000.0),
            raw("OtherLine", 1800.0),
            raw("CheapLine", 0.0),
            raw("OddLine", 0.49),
            raw("PennyLine", 0.4),
        ];
        for selection in [
            ServiceSelection::default(),
            customs_and_insurance(100_000.0),
        ] {
            for priced in price_quotes(&batch, &selection) {
                assert!(
                    priced.final_price >= priced.quote.base_price,
                    "{} priced below base: {} < {}",
                    priced.quote.carrier,
                    priced.final_price,
                    priced.quote.base_price
                );
            }
        }
    }

    #[test]
    fn sub_unit_base_is_not_rounded_away() {
        // 0.4 * 1.20 = 0.48 would round to 0, below the carrier's price.
        let priced = price_quotes(&[raw("PennyLine", 0.4)], &ServiceSelection::default());
        assert_eq!(priced[0].final_price, 0.4);
        assert!(priced[0].final_price >= priced[0].quote.base_price);
    }

    #[test]
    fn pricing_is_deterministic() {
        let batch = [raw("Maersk", 2345.67), raw("OtherLine", 1890.12)];
        let selection = customs_and_insurance(77_000.0);
        assert_eq!(
            price_quotes(&batch, &selection),
            price_quotes(&batch, &selection)
        );
    }

    #[test]
    fn shanghai_dammam_scenario() {
        // 40HC lane: Maersk 2000 * 1.22 + 1500 = 3940, OtherLine 1800 * 1.20 + 1500 = 3660.
        let batch = [raw("Maersk", 2000.0), raw("OtherLine", 1800.0)];
        let selection = ServiceSelection {
            include_customs: true,
            ..Default::default()
        };
        let priced = price_quotes(&batch, &selection);
        assert_eq!(priced[0].final_price, 3940.0);
        assert_eq!(priced[1].final_price, 3660.0);
    }
}
