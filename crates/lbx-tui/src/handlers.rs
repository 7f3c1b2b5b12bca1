//! Async API handlers.
//!
//! Each handler is a pure async function: it takes the shared client,
//! performs the call(s), and returns the `UiEvent` the runtime feeds
//! back into the reducer. Errors are flattened into user-facing
//! strings here so the reducer never touches `anyhow`.

use lbx_core::api::LedgerClient;
use lbx_core::types::TransactionKind;

use crate::events::{ApiOutcome, SessionOpened, UiEvent};

pub async fn register(
    client: LedgerClient,
    owner_name: String,
    phone: String,
    password: String,
) -> UiEvent {
    let outcome = client
        .register(&owner_name, &phone, &password)
        .await
        .map_err(|e| e.to_string());
    UiEvent::Api(ApiOutcome::Registered(outcome))
}

pub async fn sign_in(
    client: LedgerClient,
    agency: String,
    number: String,
    password: String,
) -> UiEvent {
    let outcome = client
        .sign_in(&agency, &number, &password)
        .await
        .map_err(|e| e.to_string());
    UiEvent::Api(ApiOutcome::SignedIn(outcome))
}

/// Validates the one-time code, then fetches the initial snapshot.
/// Either failure keeps the user on the code screen.
pub async fn open_session(client: LedgerClient, account_id: String, pin: String) -> UiEvent {
    let outcome = async {
        let granted = client.validate_pin(&account_id, &pin).await?;
        let account = client.account(&granted.account_id).await?;
        Ok(SessionOpened {
            account_id: granted.account_id,
            token: granted.token,
            account,
        })
    }
    .await
    .map_err(|e: anyhow::Error| e.to_string());
    UiEvent::Api(ApiOutcome::SessionOpened(outcome))
}

pub async fn refresh_account(client: LedgerClient, account_id: String) -> UiEvent {
    let outcome = client
        .account(&account_id)
        .await
        .map_err(|e| e.to_string());
    UiEvent::Api(ApiOutcome::AccountRefreshed(outcome))
}

/// Submits the transaction, then re-fetches the snapshot so the
/// dashboard always shows the settled balance.
pub async fn submit_transaction(
    client: LedgerClient,
    account_id: String,
    token: String,
    amount: f64,
    kind: TransactionKind,
) -> UiEvent {
    let outcome = async {
        client
            .submit_transaction(&account_id, amount, kind, &token)
            .await?;
        client.account(&account_id).await
    }
    .await
    .map_err(|e| e.to_string());
    UiEvent::Api(ApiOutcome::TransactionSettled(outcome))
}
