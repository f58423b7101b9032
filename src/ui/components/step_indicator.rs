use dioxus::prelude::*;

use crate::domain::{step_title, AppState, FIRST_STEP, STEP_COUNT};
use crate::ui::theme;

/// Progress row over the five wizard steps. Completed steps are clickable
/// for revisiting; future steps are reached through the Continue button.
#[component]
pub fn StepIndicator(current: u8) -> Element {
    let mut state = use_context::<Signal<AppState>>();

    rsx! {
        ol { class: "step-row",
            for step in FIRST_STEP..=STEP_COUNT {
                li {
                    button {
                        class: theme::step_badge(step, current),
                        disabled: step > current,
                        onclick: move |_| {
                            if step < current {
                                state.with_mut(|st| st.wizard.jump_to(step));
                            }
                        },
                        span { class: "step-number", "{step}" }
                        span { class: "step-title", "{step_title(step)}" }
                    }
                }
            }
        }
    }
}
