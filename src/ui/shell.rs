use dioxus::prelude::*;

use crate::app::APP_NAME;
use crate::domain::AppState;

#[component]
pub fn Shell(children: Element) -> Element {
    let state = use_context::<Signal<AppState>>();
    let lane = state.with(|st| {
        let form = &st.wizard.form;
        if form.origin.is_empty() || form.destination.is_empty() {
            None
        } else {
            Some(format!("{} → {}", form.origin, form.destination))
        }
    });

    rsx! {
        div { class: "shell",
            header { class: "shell-header",
                div {
                    h1 { class: "shell-title", "{APP_NAME}" }
                    p { class: "shell-tag", "carrier rates, priced and bookable" }
                }
                if let Some(lane) = lane {
                    span { class: "shell-lane", "{lane}" }
                }
            }
            main { class: "shell-main",
                {children}
            }
        }
    }
}
