//! The five-step quoting wizard: lane entry, shipment details, carrier
//! rates, service add-ons, review.

use dioxus::prelude::*;
use time::macros::format_description;
use time::Date;

use crate::domain::{
    pricing, AppState, BookingDraft, CargoMode, ContainerSize, Incoterm, PortChargesParty,
    RateRequest, SessionContext, WizardFormPatch, FIRST_STEP, STEP_COUNT,
};
use crate::ui::components::quote_card::QuoteCard;
use crate::ui::components::step_indicator::StepIndicator;
use crate::ui::components::toast::{push_toast, ToastKind, ToastMessage};
use crate::ui::theme;

#[component]
pub fn QuotePage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let step = state.with(|st| st.wizard.current_step());

    rsx! {
        div { class: "wizard",
            StepIndicator { current: step }
            match step {
                1 => rsx! { RouteStep {} },
                2 => rsx! { DetailsStep {} },
                3 => rsx! { RatesStep {} },
                4 => rsx! { ServicesStep {} },
                _ => rsx! { ReviewStep {} },
            }
            WizardNav { step }
        }
    }
}

/// Queues a rate search for the current lane. The board token makes sure a
/// slow, superseded response can never overwrite newer quotes.
fn request_rates(mut state: Signal<AppState>, mut rate_query: Signal<Option<(u64, RateRequest)>>) {
    let request = state.with(|st| st.wizard.form.rate_request());
    let token = state.with_mut(|st| st.board.issue(request.clone()));
    println!(
        "Queued rate search #{token} for {} -> {} ({})",
        request.origin, request.destination, request.container_type
    );
    rate_query.set(Some((token, request)));
}

#[component]
fn WizardNav(step: u8) -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let rate_query = use_context::<Signal<Option<(u64, RateRequest)>>>();

    let lane_ready = state.with(|st| {
        !st.wizard.form.origin.trim().is_empty() && !st.wizard.form.destination.trim().is_empty()
    });

    rsx! {
        nav { class: "wizard-nav",
            button {
                class: theme::BTN_GHOST,
                disabled: step == FIRST_STEP,
                onclick: move |_| state.with_mut(|st| st.wizard.retreat()),
                "Back"
            }
            if step < STEP_COUNT {
                button {
                    class: theme::BTN_PRIMARY,
                    disabled: step == 1 && !lane_ready,
                    onclick: move |_| {
                        state.with_mut(|st| st.wizard.advance());
                        if state.with(|st| st.wizard.current_step()) == 3 {
                            request_rates(state, rate_query);
                        }
                    },
                    "Continue"
                }
            }
        }
    }
}

#[component]
fn RouteStep() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let form = state.with(|st| st.wizard.form.clone());

    rsx! {
        section { class: "step-body",
            h2 { "Where is the cargo going?" }
            div { class: "form-grid",
                label { class: theme::FIELD,
                    span { class: theme::FIELD_LABEL, "Origin port" }
                    input {
                        class: theme::FIELD_INPUT,
                        placeholder: "e.g. CNSHA",
                        value: "{form.origin}",
                        oninput: move |evt| state.with_mut(|st| st.wizard.apply(WizardFormPatch {
                            origin: Some(evt.value().trim().to_uppercase()),
                            ..Default::default()
                        })),
                    }
                }
                label { class: theme::FIELD,
                    span { class: theme::FIELD_LABEL, "Destination port" }
                    input {
                        class: theme::FIELD_INPUT,
                        placeholder: "e.g. SARKD",
                        value: "{form.destination}",
                        oninput: move |evt| state.with_mut(|st| st.wizard.apply(WizardFormPatch {
                            destination: Some(evt.value().trim().to_uppercase()),
                            ..Default::default()
                        })),
                    }
                }
                label { class: theme::FIELD,
                    span { class: theme::FIELD_LABEL, "Cargo mode" }
                    select {
                        class: theme::FIELD_INPUT,
                        onchange: move |evt| {
                            if let Some(mode) = CargoMode::from_tag(&evt.value()) {
                                state.with_mut(|st| st.wizard.apply(WizardFormPatch {
                                    cargo_mode: Some(mode),
                                    ..Default::default()
                                }));
                            }
                        },
                        for mode in CargoMode::ALL {
                            option {
                                value: mode.tag(),
                                selected: mode == form.cargo_mode,
                                "{mode.label()}"
                            }
                        }
                    }
                }
                if form.cargo_mode == CargoMode::Fcl {
                    label { class: theme::FIELD,
                        span { class: theme::FIELD_LABEL, "Container" }
                        select {
                            class: theme::FIELD_INPUT,
                            onchange: move |evt| {
                                if let Some(size) = ContainerSize::from_code(&evt.value()) {
                                    state.with_mut(|st| st.wizard.apply(WizardFormPatch {
                                        container_size: Some(size),
                                        ..Default::default()
                                    }));
                                }
                            },
                            for size in ContainerSize::ALL {
                                option {
                                    value: size.code(),
                                    selected: size == form.container_size,
                                    "{size.label()}"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn DetailsStep() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let form = state.with(|st| st.wizard.form.clone());
    let ready_date = form
        .ready_date
        .format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_default();

    rsx! {
        section { class: "step-body",
            h2 { "Shipment details" }
            div { class: "form-grid",
                label { class: theme::FIELD,
                    span { class: theme::FIELD_LABEL, "Incoterm" }
                    select {
                        class: theme::FIELD_INPUT,
                        onchange: move |evt| {
                            if let Some(term) = Incoterm::from_code(&evt.value()) {
                                state.with_mut(|st| st.wizard.apply(WizardFormPatch {
                                    incoterm: Some(term),
                                    ..Default::default()
                                }));
                            }
                        },
                        for term in Incoterm::ALL {
                            option {
                                value: term.code(),
                                selected: term == form.incoterm,
                                "{term.code()}"
                            }
                        }
                    }
                }
                label { class: theme::FIELD,
                    span { class: theme::FIELD_LABEL, "Commodity" }
                    input {
                        class: theme::FIELD_INPUT,
                        placeholder: "e.g. auto parts",
                        value: "{form.commodity}",
                        oninput: move |evt| state.with_mut(|st| st.wizard.apply(WizardFormPatch {
                            commodity: Some(evt.value()),
                            ..Default::default()
                        })),
                    }
                }
                label { class: theme::FIELD,
                    span { class: theme::FIELD_LABEL, "Gross weight (kg)" }
                    input {
                        class: theme::FIELD_INPUT,
                        r#type: "number",
                        min: "0",
                        value: "{form.weight_kg}",
                        oninput: move |evt| {
                            if let Ok(weight) = evt.value().trim().parse::<f64>() {
                                if weight > 0.0 {
                                    state.with_mut(|st| st.wizard.apply(WizardFormPatch {
                                        weight_kg: Some(weight),
                                        ..Default::default()
                                    }));
                                }
                            }
                        },
                    }
                }
                label { class: theme::FIELD,
                    span { class: theme::FIELD_LABEL, "Volume (cbm)" }
                    input {
                        class: theme::FIELD_INPUT,
                        r#type: "number",
                        min: "0",
                        value: "{form.volume_cbm}",
                        oninput: move |evt| {
                            if let Ok(volume) = evt.value().trim().parse::<f64>() {
                                if volume > 0.0 {
                                    state.with_mut(|st| st.wizard.apply(WizardFormPatch {
                                        volume_cbm: Some(volume),
                                        ..Default::default()
                                    }));
                                }
                            }
                        },
                    }
                }
                label { class: theme::FIELD,
                    span { class: theme::FIELD_LABEL, "Cargo ready date" }
                    input {
                        class: theme::FIELD_INPUT,
                        r#type: "date",
                        value: "{ready_date}",
                        onchange: move |evt| {
                            let parsed = Date::parse(
                                evt.value().trim(),
                                format_description!("[year]-[month]-[day]"),
                            );
                            if let Ok(date) = parsed {
                                state.with_mut(|st| st.wizard.apply(WizardFormPatch {
                                    ready_date: Some(date),
                                    ..Default::default()
                                }));
                            }
                        },
                    }
                }
            }
        }
    }
}

#[component]
fn RatesStep() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let rate_query = use_context::<Signal<Option<(u64, RateRequest)>>>();

    let (loading, quotes, selection, selected_id) = state.with(|st| {
        (
            st.board.loading,
            st.board.quotes.clone(),
            st.selection.clone(),
            st.wizard
                .selected_quote
                .as_ref()
                .map(|picked| picked.quote.id.clone()),
        )
    });
    let priced = pricing::price_quotes(&quotes, &selection);

    rsx! {
        section { class: "step-body",
            header { class: "step-header",
                h2 { "Carrier rates" }
                button {
                    class: theme::BTN_SECONDARY,
                    disabled: loading,
                    onclick: move |_| request_rates(state, rate_query),
                    "Refresh"
                }
            }
            if loading {
                p { class: "loading", "Searching carrier rates…" }
            } else if priced.is_empty() {
                div { class: theme::EMPTY_STATE,
                    p { "No rates available for this lane right now." }
                    p { class: theme::MUTED, "Check the port codes on step 1 or try again later." }
                }
            } else {
                div { class: "quote-list",
                    for entry in priced {
                        QuoteCard {
                            priced: entry.clone(),
                            selected: selected_id.as_deref() == Some(entry.quote.id.as_str()),
                            on_select: move |picked| state.with_mut(|st| st.wizard.select_quote(picked)),
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ServicesStep() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let (selection, form, has_selection) = state.with(|st| {
        (
            st.selection.clone(),
            st.wizard.form.clone(),
            st.wizard.selected_quote.is_some(),
        )
    });
    let fees = pricing::service_fees(&selection);
    let customs_hint = format!("Flat {:.0} per shipment", pricing::CUSTOMS_FEE);
    let cargo_value = selection
        .cargo_value
        .map(|value| value.to_string())
        .unwrap_or_default();

    rsx! {
        section { class: "step-body",
            h2 { "Optional services" }
            div { class: "service-list",
                label { class: "service-row",
                    input {
                        r#type: "checkbox",
                        checked: selection.include_customs,
                        onchange: move |evt| {
                            let on = evt.checked();
                            state.with_mut(|st| {
                                st.selection.include_customs = on;
                                st.wizard.apply(WizardFormPatch {
                                    needs_customs_brokerage: Some(on),
                                    ..Default::default()
                                });
                            });
                        },
                    }
                    div {
                        span { "Customs clearance" }
                        p { class: theme::MUTED, "{customs_hint}" }
                    }
                }
                label { class: "service-row",
                    input {
                        r#type: "checkbox",
                        checked: selection.include_insurance,
                        onchange: move |evt| {
                            let on = evt.checked();
                            state.with_mut(|st| {
                                st.selection.include_insurance = on;
                                st.wizard.apply(WizardFormPatch {
                                    needs_insurance: Some(on),
                                    ..Default::default()
                                });
                            });
                        },
                    }
                    div {
                        span { "Cargo insurance" }
                        p { class: theme::MUTED, "0.5% of declared cargo value" }
                    }
                }
                if selection.include_insurance {
                    label { class: theme::FIELD,
                        span { class: theme::FIELD_LABEL, "Declared cargo value" }
                        input {
                            class: theme::FIELD_INPUT,
                            r#type: "number",
                            min: "0",
                            placeholder: "e.g. 100000",
                            value: "{cargo_value}",
                            oninput: move |evt| {
                                let raw = evt.value();
                                let parsed = raw.trim().parse::<f64>().ok().filter(|value| *value > 0.0);
                                state.with_mut(|st| st.selection.cargo_value = parsed);
                            },
                        }
                        if selection.include_insurance && fees.insurance_fee == 0.0 {
                            p { class: theme::MUTED, "Enter a cargo value to price insurance." }
                        }
                    }
                }
                label { class: "service-row",
                    input {
                        r#type: "checkbox",
                        checked: selection.include_delivery,
                        onchange: move |evt| {
                            let on = evt.checked();
                            state.with_mut(|st| st.selection.include_delivery = on);
                        },
                    }
                    div {
                        span { "Door delivery" }
                        p { class: theme::MUTED, "Quoted separately; not yet included in the price." }
                    }
                }
                label { class: theme::FIELD,
                    span { class: theme::FIELD_LABEL, "Origin port charges covered by" }
                    select {
                        class: theme::FIELD_INPUT,
                        onchange: move |evt| {
                            let party = if evt.value() == "supplier" {
                                PortChargesParty::Supplier
                            } else {
                                PortChargesParty::Agent
                            };
                            state.with_mut(|st| st.wizard.apply(WizardFormPatch {
                                port_charges_covered_by: Some(party),
                                ..Default::default()
                            }));
                        },
                        option {
                            value: "agent",
                            selected: form.port_charges_covered_by == PortChargesParty::Agent,
                            "Our agent"
                        }
                        option {
                            value: "supplier",
                            selected: form.port_charges_covered_by == PortChargesParty::Supplier,
                            "Supplier"
                        }
                    }
                }
            }
            div { class: theme::CARD,
                h3 { "Service fees" }
                dl { class: "breakdown",
                    div { dt { "Customs clearance" } dd { "{fees.customs_fee:.0}" } }
                    div { dt { "Cargo insurance" } dd { "{fees.insurance_fee:.0}" } }
                    div { dt { "Door delivery" } dd { "{fees.delivery_fee:.0}" } }
                    div { dt { strong { "Total" } } dd { strong { "{fees.total:.0}" } } }
                }
                if has_selection {
                    p { class: theme::MUTED,
                        "Service changes reprice the rate list. Your selected rate keeps its \
                         numbers until you re-select it on the rates step."
                    }
                }
            }
        }
    }
}

#[component]
fn ReviewStep() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let session = use_context::<SessionContext>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let (form, selected) = state.with(|st| (st.wizard.form.clone(), st.wizard.selected_quote.clone()));
    let container = match form.cargo_mode {
        CargoMode::Fcl => form.container_size.label(),
        mode => mode.label(),
    };

    rsx! {
        section { class: "step-body",
            h2 { "Review & book" }
            div { class: theme::CARD,
                dl { class: "review-grid",
                    div { dt { "Lane" } dd { "{form.origin} → {form.destination}" } }
                    div { dt { "Equipment" } dd { "{container}" } }
                    div { dt { "Incoterm" } dd { "{form.incoterm.code()}" } }
                    div { dt { "Commodity" } dd { "{form.commodity}" } }
                    div { dt { "Weight / volume" } dd { "{form.weight_kg:.0} kg / {form.volume_cbm:.1} cbm" } }
                    div { dt { "Cargo ready" } dd { "{form.ready_date}" } }
                    div { dt { "Port charges" } dd { "{form.port_charges_covered_by.label()}" } }
                }
            }
            match selected {
                Some(picked) => rsx! {
                    div { class: theme::CARD,
                        h3 { "Selected rate" }
                        p { "{picked.quote.carrier} · {picked.quote.transit_days} days" }
                        p { class: "quote-price", "{picked.final_price:.0} {picked.quote.currency}" }
                        button {
                            class: theme::BTN_PRIMARY,
                            onclick: move |_| {
                                let (quote, form) = state.with(|st| {
                                    (st.wizard.selected_quote.clone(), st.wizard.form.clone())
                                });
                                let Some(quote) = quote else { return };
                                let draft = BookingDraft::new(quote, form);
                                println!(
                                    "Session {}: booking draft {} for {} -> {} at {:.0} {}",
                                    session.id,
                                    draft.reference,
                                    draft.form.origin,
                                    draft.form.destination,
                                    draft.quote.final_price,
                                    draft.quote.quote.currency
                                );
                                push_toast(
                                    toasts,
                                    ToastKind::Success,
                                    format!("Booking request {} prepared.", draft.reference),
                                );
                            },
                            "Confirm booking"
                        }
                    }
                },
                None => rsx! {
                    div { class: theme::EMPTY_STATE,
                        p { "No rate selected yet." }
                        button {
                            class: theme::BTN_SECONDARY,
                            onclick: move |_| state.with_mut(|st| st.wizard.jump_to(3)),
                            "Pick a rate"
                        }
                    }
                },
            }
        }
    }
}
