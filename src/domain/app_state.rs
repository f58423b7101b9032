use time::OffsetDateTime;
use uuid::Uuid;

use super::entities::{RateRequest, RawQuote, ServiceSelection};
use super::wizard::WizardState;

/// Session-scoped context, created once at launch and torn down with the
/// process. Injected via Dioxus context; the pricing and wizard code never
/// reads it.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionContext {
    pub id: Uuid,
    pub started_at: OffsetDateTime,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: OffsetDateTime::now_utc(),
        }
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the UI holds in its single signal.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub wizard: WizardState,
    pub selection: ServiceSelection,
    pub board: QuoteBoard,
}

/// Bookkeeping for in-flight rate requests.
///
/// Rapid re-querying can leave several fetches in flight; each gets a
/// monotonically increasing token and only the latest one may land. A slow,
/// stale response is discarded instead of overwriting newer quotes.
#[derive(Clone, Debug, Default)]
pub struct QuoteBoard {
    latest_token: u64,
    pub quotes: Vec<RawQuote>,
    pub loading: bool,
    pub last_request: Option<RateRequest>,
}

impl QuoteBoard {
    /// Registers a new outbound request and returns its token.
    pub fn issue(&mut self, request: RateRequest) -> u64 {
        self.latest_token += 1;
        self.loading = true;
        self.last_request = Some(request);
        self.latest_token
    }

    /// Stores a response batch if `token` is still current. Returns whether
    /// the batch was applied.
    pub fn apply(&mut self, token: u64, quotes: Vec<RawQuote>) -> bool {
        if token != self.latest_token {
            return false;
        }
        self.quotes = quotes;
        self.loading = false;
        true
    }
}
