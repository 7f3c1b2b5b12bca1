//! UI event types.
//!
//! Events are the reducer's only input: terminal input, the tick, and
//! completed API calls arriving through the runtime inbox.

use lbx_core::types::{Account, LoginGranted, NewAccount};

/// Events processed by the reducer.
#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick (spinner animation).
    Tick,
    /// Raw terminal event.
    Terminal(crossterm::event::Event),
    /// A completed API call.
    Api(ApiOutcome),
}

/// Results of API calls. `Err` carries the user-facing message.
#[derive(Debug)]
pub enum ApiOutcome {
    Registered(Result<NewAccount, String>),
    SignedIn(Result<LoginGranted, String>),
    /// PIN validation plus the initial snapshot fetch, combined: the
    /// dashboard is only entered with both in hand.
    SessionOpened(Result<SessionOpened, String>),
    AccountRefreshed(Result<Account, String>),
    /// Transaction submission plus snapshot re-fetch, combined.
    TransactionSettled(Result<Account, String>),
}

/// Payload of a fully opened session.
#[derive(Debug)]
pub struct SessionOpened {
    pub account_id: String,
    pub token: String,
    pub account: Account,
}
