//! Multi-step booking wizard state.
//!
//! Steps run 1..=5 and are clamped on every transition; out-of-range
//! requests are silently pulled back into bounds, never an error.

use super::entities::{
    CargoMode, ContainerSize, Incoterm, PortChargesParty, PricedQuote, WizardFormData,
};
use time::Date;

pub const FIRST_STEP: u8 = 1;
pub const STEP_COUNT: u8 = 5;

pub fn step_title(step: u8) -> &'static str {
    match step {
        1 => "Route & cargo",
        2 => "Shipment details",
        3 => "Carrier rates",
        4 => "Services",
        _ => "Review & book",
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WizardState {
    current_step: u8,
    pub form: WizardFormData,
    /// Snapshot of the chosen quote. Repricing never rewrites it; the user
    /// has to re-select on the rates step to pick up new numbers.
    pub selected_quote: Option<PricedQuote>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            current_step: FIRST_STEP,
            form: WizardFormData::default(),
            selected_quote: None,
        }
    }
}

impl WizardState {
    pub fn current_step(&self) -> u8 {
        self.current_step
    }

    /// Moves one step forward; a no-op on the last step.
    pub fn advance(&mut self) {
        self.current_step = (self.current_step + 1).min(STEP_COUNT);
    }

    /// Moves one step back; a no-op on the first step.
    pub fn retreat(&mut self) {
        self.current_step = self.current_step.saturating_sub(1).max(FIRST_STEP);
    }

    pub fn jump_to(&mut self, step: u8) {
        self.current_step = step.clamp(FIRST_STEP, STEP_COUNT);
    }

    /// Shallow merge: only fields the patch carries overwrite the form.
    /// No validation here; the presentation layer owns that.
    pub fn apply(&mut self, patch: WizardFormPatch) {
        patch.merge_into(&mut self.form);
    }

    /// Replaces any prior selection. Does not advance the step.
    pub fn select_quote(&mut self, quote: PricedQuote) {
        self.selected_quote = Some(quote);
    }
}

/// Partial update of [`WizardFormData`]; `None` leaves a field untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WizardFormPatch {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub cargo_mode: Option<CargoMode>,
    pub container_size: Option<ContainerSize>,
    pub incoterm: Option<Incoterm>,
    pub commodity: Option<String>,
    pub weight_kg: Option<f64>,
    pub volume_cbm: Option<f64>,
    pub ready_date: Option<Date>,
    pub needs_insurance: Option<bool>,
    pub needs_customs_brokerage: Option<bool>,
    pub port_charges_covered_by: Option<PortChargesParty>,
}

impl WizardFormPatch {
    fn merge_into(self, form: &mut WizardFormData) {
        if let Some(origin) = self.origin {
            form.origin = origin;
        }
        if let Some(destination) = self.destination {
            form.destination = destination;
        }
        if let Some(cargo_mode) = self.cargo_mode {
            form.cargo_mode = cargo_mode;
        }
        if let Some(container_size) = self.container_size {
            form.container_size = container_size;
        }
        if let Some(incoterm) = self.incoterm {
            form.incoterm = incoterm;
        }
        if let Some(commodity) = self.commodity {
            form.commodity = commodity;
        }
        if let Some(weight_kg) = self.weight_kg {
            form.weight_kg = weight_kg;
        }
        if let Some(volume_cbm) = self.volume_cbm {
            form.volume_cbm = volume_cbm;
        }
        if let Some(ready_date) = self.ready_date {
            form.ready_date = ready_date;
        }
        if let Some(needs_insurance) = self.needs_insurance {
            form.needs_insurance = needs_insurance;
        }
        if let Some(needs_customs_brokerage) = self.needs_customs_brokerage {
            form.needs_customs_brokerage = needs_customs_brokerage;
        }
        if let Some(port_charges_covered_by) = self.port_charges_covered_by {
            form.port_charges_covered_by = port_charges_covered_by;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{RawQuote, ServiceBreakdown, ServiceSelection};
    use crate::domain::pricing;
    use time::macros::datetime;

    fn priced(carrier: &str, base_price: f64) -> PricedQuote {
        pricing::price_quote(
            RawQuote {
                id: "q-1".to_string(),
                carrier: carrier.to_string(),
                carrier_logo: None,
                base_price,
                currency: "USD".to_string(),
                transit_days: 21,
                valid_until: datetime!(2026-12-31 0:00 UTC),
                is_real: true,
                co2_kg: None,
            },
            ServiceBreakdown::default(),
        )
    }

    #[test]
    fn starts_on_first_step_with_defaults() {
        let wizard = WizardState::default();
        assert_eq!(wizard.current_step(), FIRST_STEP);
        assert_eq!(wizard.form, WizardFormData::default());
        assert!(wizard.selected_quote.is_none());
    }

    #[test]
    fn retreat_does_not_underflow() {
        let mut wizard = WizardState::default();
        wizard.retreat();
        assert_eq!(wizard.current_step(), 1);
    }

    #[test]
    fn advance_does_not_overflow() {
        let mut wizard = WizardState::default();
        for _ in 0..10 {
            wizard.advance();
        }
        assert_eq!(wizard.current_step(), STEP_COUNT);
    }

    #[test]
    fn jump_clamps_out_of_range_steps() {
        let mut wizard = WizardState::default();
        wizard.jump_to(9);
        assert_eq!(wizard.current_step(), 5);
        wizard.jump_to(0);
        assert_eq!(wizard.current_step(), 1);
        wizard.jump_to(3);
        assert_eq!(wizard.current_step(), 3);
    }

    #[test]
    fn patches_merge_without_clobbering_other_fields() {
        let mut wizard = WizardState::default();
        wizard.apply(WizardFormPatch {
            origin: Some("CNSHA".to_string()),
            ..Default::default()
        });
        wizard.apply(WizardFormPatch {
            destination: Some("SARKD".to_string()),
            ..Default::default()
        });

        assert_eq!(wizard.form.origin, "CNSHA");
        assert_eq!(wizard.form.destination, "SARKD");
        let defaults = WizardFormData::default();
        assert_eq!(wizard.form.commodity, defaults.commodity);
        assert_eq!(wizard.form.incoterm, defaults.incoterm);
        assert_eq!(wizard.form.weight_kg, defaults.weight_kg);
    }

    #[test]
    fn selecting_again_replaces_the_quote() {
        let mut wizard = WizardState::default();
        wizard.select_quote(priced("OtherLine", 1800.0));
        wizard.select_quote(priced("Maersk", 2000.0));
        assert_eq!(wizard.selected_quote.unwrap().quote.carrier, "Maersk");
    }

    #[test]
    fn selection_is_a_snapshot_across_repricing() {
        let mut wizard = WizardState::default();
        let original = priced("Maersk", 2000.0);
        wizard.select_quote(original.clone());

        // Repricing the same raw quote with customs on yields a new batch,
        // but the stored selection keeps the old numbers.
        let repriced = pricing::price_quotes(
            &[original.quote.clone()],
            &ServiceSelection {
                include_customs: true,
                ..Default::default()
            },
        );
        assert_ne!(repriced[0].final_price, original.final_price);
        assert_eq!(wizard.selected_quote, Some(original));
    }
}
