use dioxus::{prelude::*, signals::Signal};

use crate::{
    domain::{AppState, RateRequest, SessionContext},
    infra::rates::RatesClient,
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::QuotePage,
        shell::Shell,
    },
};

pub const APP_NAME: &str = "Freight Rate Desk";

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Quote {},
}

#[component]
pub fn App() -> Element {
    let state = use_signal(AppState::default);
    use_context_provider(|| state);

    // Session context is injected, not ambient; created once per launch.
    use_context_provider(SessionContext::new);

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    // Rate fetch trigger: (board token, lane query). Setting it reruns the
    // resource below; the token lets stale responses be discarded.
    let rate_query = use_signal(|| None::<(u64, RateRequest)>);
    use_context_provider(|| rate_query);

    let _rates = use_resource(move || async move { fetch_lane_rates(state, toasts, rate_query).await });

    rsx! {
        document::Style { {include_str!("../assets/main.css")} }
        Router::<Route> {}
        Toast {}
    }
}

async fn fetch_lane_rates(
    mut state: Signal<AppState>,
    toasts: Signal<Vec<ToastMessage>>,
    mut rate_query: Signal<Option<(u64, RateRequest)>>,
) -> Option<u64> {
    let Some((token, request)) = rate_query() else {
        return None;
    };

    let Ok(client) = RatesClient::new() else {
        push_toast(toasts, ToastKind::Error, "Failed to initialise rates client.");
        rate_query.set(None);
        state.with_mut(|st| st.board.apply(token, Vec::new()));
        return None;
    };

    println!(
        "Fetching carrier rates #{token} for {} -> {} ({})",
        request.origin, request.destination, request.container_type
    );

    let quotes = client.fetch_rates(&request).await;
    rate_query.set(None);

    let count = quotes.len();
    let applied = state.with_mut(|st| st.board.apply(token, quotes));
    if !applied {
        println!("Discarding stale rate response #{token} ({count} quotes).");
        return None;
    }

    println!("Applied rate response #{token}: {count} quotes.");
    if count == 0 {
        push_toast(
            toasts,
            ToastKind::Warning,
            "No rates available for this lane right now.",
        );
    }
    Some(token)
}

#[component]
pub fn Quote() -> Element {
    rsx! { Shell { QuotePage {} } }
}
