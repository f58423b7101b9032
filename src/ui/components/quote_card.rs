use dioxus::prelude::*;

use crate::domain::PricedQuote;
use crate::ui::theme;

/// One sellable rate with its cost breakdown and a select action.
#[component]
pub fn QuoteCard(priced: PricedQuote, selected: bool, on_select: EventHandler<PricedQuote>) -> Element {
    let quote = priced.quote.clone();
    let valid_until = quote.valid_until.date();
    let for_select = priced.clone();

    rsx! {
        article { class: theme::quote_card(selected),
            header { class: "quote-card-header",
                div {
                    h3 { class: "quote-carrier", "{quote.carrier}" }
                    p { class: theme::MUTED,
                        "{quote.transit_days} days transit · valid until {valid_until}"
                    }
                }
                if !quote.is_real {
                    span { class: "badge-indicative", "indicative" }
                }
            }
            dl { class: "breakdown",
                div { dt { "Ocean freight" } dd { "{quote.base_price:.0} {quote.currency}" } }
                div { dt { "Margin" } dd { "{priced.markup_amount:.0} {quote.currency}" } }
                if priced.services.customs_fee > 0.0 {
                    div { dt { "Customs clearance" } dd { "{priced.services.customs_fee:.0} {quote.currency}" } }
                }
                if priced.services.insurance_fee > 0.0 {
                    div { dt { "Cargo insurance" } dd { "{priced.services.insurance_fee:.0} {quote.currency}" } }
                }
            }
            if let Some(co2) = quote.co2_kg {
                p { class: theme::MUTED, "≈ {co2:.0} kg CO₂" }
            }
            footer { class: "quote-card-footer",
                strong { class: "quote-price", "{priced.final_price:.0} {quote.currency}" }
                button {
                    class: if selected { theme::BTN_SECONDARY } else { theme::BTN_PRIMARY },
                    onclick: move |_| on_select.call(for_select.clone()),
                    if selected { "Selected" } else { "Select" }
                }
            }
        }
    }
}
