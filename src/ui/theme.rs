//! Shared style tokens so the wizard screens stay visually consistent.
//! Class names resolve against `assets/main.css`.

pub const BTN_PRIMARY: &str = "btn btn-primary";
pub const BTN_SECONDARY: &str = "btn btn-secondary";
pub const BTN_GHOST: &str = "btn btn-ghost";

pub const FIELD: &str = "field";
pub const FIELD_LABEL: &str = "field-label";
pub const FIELD_INPUT: &str = "field-input";

pub const CARD: &str = "card";
pub const MUTED: &str = "muted";
pub const EMPTY_STATE: &str = "empty-state";

pub fn quote_card(selected: bool) -> &'static str {
    if selected {
        "quote-card quote-card-selected"
    } else {
        "quote-card"
    }
}

pub fn step_badge(step: u8, current: u8) -> &'static str {
    if step == current {
        "step-badge step-badge-active"
    } else if step < current {
        "step-badge step-badge-done"
    } else {
        "step-badge"
    }
}
