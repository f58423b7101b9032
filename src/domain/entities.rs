use serde::Serialize;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// One lane query as handed to the rates provider.
/// Immutable once submitted; a changed lane means a new request.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateRequest {
    pub origin: String,
    pub destination: String,
    /// Container-size code ("20", "40", "40HC") for FCL, cargo-mode tag otherwise.
    pub container_type: String,
}

/// An unpriced carrier offer, normalized from the provider response.
/// Never mutated after acquisition; pricing works on copies.
#[derive(Clone, Debug, PartialEq)]
pub struct RawQuote {
    pub id: String,
    pub carrier: String,
    pub carrier_logo: Option<String>,
    pub base_price: f64,
    /// ISO-style 3-letter currency code.
    pub currency: String,
    pub transit_days: u32,
    pub valid_until: OffsetDateTime,
    /// False when the provider filled the batch with synthetic/indicative data.
    pub is_real: bool,
    pub co2_kg: Option<f64>,
}

/// Which optional services apply to the whole batch being priced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ServiceSelection {
    pub include_customs: bool,
    pub include_insurance: bool,
    pub include_delivery: bool,
    /// Declared cargo value; insurance prices to zero without it.
    pub cargo_value: Option<f64>,
}

/// Itemized service fees, identical for every quote in a batch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ServiceBreakdown {
    pub customs_fee: f64,
    pub insurance_fee: f64,
    pub delivery_fee: f64,
    pub total: f64,
}

/// A sellable quote: the raw carrier offer plus markup and service fees.
#[derive(Clone, Debug, PartialEq)]
pub struct PricedQuote {
    pub quote: RawQuote,
    pub markup_amount: f64,
    pub services: ServiceBreakdown,
    /// Rounded to whole currency units; never below `quote.base_price`.
    pub final_price: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CargoMode {
    #[default]
    Fcl,
    Lcl,
    Air,
}

impl CargoMode {
    pub const ALL: [CargoMode; 3] = [CargoMode::Fcl, CargoMode::Lcl, CargoMode::Air];

    pub fn tag(&self) -> &'static str {
        match self {
            CargoMode::Fcl => "fcl",
            CargoMode::Lcl => "lcl",
            CargoMode::Air => "air",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CargoMode::Fcl => "FCL (full container)",
            CargoMode::Lcl => "LCL (groupage)",
            CargoMode::Air => "Air freight",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|mode| mode.tag() == tag)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ContainerSize {
    Teu20,
    #[default]
    Feu40,
    Feu40Hc,
}

impl ContainerSize {
    pub const ALL: [ContainerSize; 3] = [
        ContainerSize::Teu20,
        ContainerSize::Feu40,
        ContainerSize::Feu40Hc,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            ContainerSize::Teu20 => "20",
            ContainerSize::Feu40 => "40",
            ContainerSize::Feu40Hc => "40HC",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContainerSize::Teu20 => "20' standard",
            ContainerSize::Feu40 => "40' standard",
            ContainerSize::Feu40Hc => "40' high cube",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|size| size.code() == code)
    }
}

/// Standard trade terms offered in the wizard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Incoterm {
    Exw,
    Fca,
    #[default]
    Fob,
    Cfr,
    Cif,
    Dap,
    Ddp,
}

impl Incoterm {
    pub const ALL: [Incoterm; 7] = [
        Incoterm::Exw,
        Incoterm::Fca,
        Incoterm::Fob,
        Incoterm::Cfr,
        Incoterm::Cif,
        Incoterm::Dap,
        Incoterm::Ddp,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Incoterm::Exw => "EXW",
            Incoterm::Fca => "FCA",
            Incoterm::Fob => "FOB",
            Incoterm::Cfr => "CFR",
            Incoterm::Cif => "CIF",
            Incoterm::Dap => "DAP",
            Incoterm::Ddp => "DDP",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|term| term.code() == code)
    }
}

/// Who settles origin port charges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PortChargesParty {
    #[default]
    Agent,
    Supplier,
}

impl PortChargesParty {
    pub fn label(&self) -> &'static str {
        match self {
            PortChargesParty::Agent => "Our agent",
            PortChargesParty::Supplier => "Supplier",
        }
    }
}

/// The in-progress shipment draft collected across wizard steps.
/// Mutated field-by-field through patches, never replaced wholesale.
#[derive(Clone, Debug, PartialEq)]
pub struct WizardFormData {
    pub origin: String,
    pub destination: String,
    pub cargo_mode: CargoMode,
    pub container_size: ContainerSize,
    pub incoterm: Incoterm,
    pub commodity: String,
    pub weight_kg: f64,
    pub volume_cbm: f64,
    pub ready_date: Date,
    pub needs_insurance: bool,
    pub needs_customs_brokerage: bool,
    pub port_charges_covered_by: PortChargesParty,
}

impl Default for WizardFormData {
    fn default() -> Self {
        Self {
            origin: String::new(),
            destination: String::new(),
            cargo_mode: CargoMode::default(),
            container_size: ContainerSize::default(),
            incoterm: Incoterm::default(),
            commodity: String::new(),
            weight_kg: 1000.0,
            volume_cbm: 1.0,
            ready_date: OffsetDateTime::now_utc().date(),
            needs_insurance: false,
            needs_customs_brokerage: false,
            port_charges_covered_by: PortChargesParty::default(),
        }
    }
}

impl WizardFormData {
    /// Builds the provider query for the current lane. FCL shipments query by
    /// container code, everything else by cargo-mode tag.
    pub fn rate_request(&self) -> RateRequest {
        let container_type = match self.cargo_mode {
            CargoMode::Fcl => self.container_size.code().to_string(),
            mode => mode.tag().to_string(),
        };
        RateRequest {
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            container_type,
        }
    }
}

/// Payload handed to the booking service once the wizard completes.
#[derive(Clone, Debug, PartialEq)]
pub struct BookingDraft {
    pub reference: Uuid,
    pub quote: PricedQuote,
    pub form: WizardFormData,
}

impl BookingDraft {
    pub fn new(quote: PricedQuote, form: WizardFormData) -> Self {
        Self {
            reference: Uuid::new_v4(),
            quote,
            form,
        }
    }
}
