//! Domain logic for freight quoting lives here.

pub mod app_state;
pub mod entities;
pub mod pricing;
pub mod wizard;

pub use app_state::{AppState, QuoteBoard, SessionContext};
pub use entities::{
    BookingDraft, CargoMode, ContainerSize, Incoterm, PortChargesParty, PricedQuote, RateRequest,
    RawQuote, ServiceBreakdown, ServiceSelection, WizardFormData,
};
pub use wizard::{step_title, WizardFormPatch, WizardState, FIRST_STEP, STEP_COUNT};
