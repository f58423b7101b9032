pub mod quote_card;
pub mod step_indicator;
pub mod toast;
