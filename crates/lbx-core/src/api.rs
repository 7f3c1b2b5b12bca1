//! HTTP client for the external ledger service.
//!
//! Five request/response operations, no retries, no batching. Every
//! failure is reduced to a single user-facing string: the server's
//! `{"error": "..."}` body when present, else a fixed per-operation
//! fallback. Transport errors get the same treatment.

use anyhow::{anyhow, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::Config;
use crate::types::{
    Account, LoginGranted, LoginRequest, NewAccount, PinGranted, RegisterRequest,
    TransactionKind, TransactionRequest, ValidatePinRequest,
};

/// Default accounts endpoint of the ledger service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5088/api/accounts";

const REGISTER_FALLBACK: &str = "Could not create the account.";
const LOGIN_FALLBACK: &str = "Invalid credentials.";
const PIN_FALLBACK: &str = "Invalid PIN.";
const ACCOUNT_FALLBACK: &str = "Could not load account data.";
const TRANSACTION_FALLBACK: &str = "Could not process the transaction.";

/// Error body shape used by the ledger service.
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Client for the ledger service accounts API.
#[derive(Debug, Clone)]
pub struct LedgerClient {
    base_url: String,
    http: reqwest::Client,
}

impl LedgerClient {
    /// Creates a client for the given accounts endpoint.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Creates a client from config (base URL and optional timeout).
    pub fn from_config(config: &Config) -> Self {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http: builder.build().unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Registers a new account with a zero initial balance.
    pub async fn register(
        &self,
        owner_name: &str,
        phone: &str,
        password: &str,
    ) -> Result<NewAccount> {
        tracing::debug!(owner_name, "registering account");
        let response = self
            .http
            .post(&self.base_url)
            .json(&RegisterRequest {
                owner_name,
                initial_balance: 0.0,
                phone_number: phone,
                password,
            })
            .send()
            .await;
        decode(response, REGISTER_FALLBACK).await
    }

    /// Password login; on success the service sends a one-time code out
    /// of band and returns the account id to validate it against.
    pub async fn sign_in(
        &self,
        agency: &str,
        number: &str,
        password: &str,
    ) -> Result<LoginGranted> {
        tracing::debug!(agency, number, "signing in");
        let response = self
            .http
            .post(format!("{}/login", self.base_url))
            .json(&LoginRequest {
                agency,
                number,
                password,
            })
            .send()
            .await;
        decode(response, LOGIN_FALLBACK).await
    }

    /// Validates the one-time code and returns a bearer token.
    pub async fn validate_pin(&self, account_id: &str, pin: &str) -> Result<PinGranted> {
        tracing::debug!(account_id, "validating one-time code");
        let response = self
            .http
            .post(format!("{}/validate-pin", self.base_url))
            .json(&ValidatePinRequest { account_id, pin })
            .send()
            .await;
        decode(response, PIN_FALLBACK).await
    }

    /// Fetches the account snapshot.
    pub async fn account(&self, account_id: &str) -> Result<Account> {
        tracing::debug!(account_id, "fetching account snapshot");
        let response = self
            .http
            .get(format!("{}/{}", self.base_url, account_id))
            .send()
            .await;
        decode(response, ACCOUNT_FALLBACK).await
    }

    /// Submits a transaction, authorized by the bearer token.
    pub async fn submit_transaction(
        &self,
        account_id: &str,
        amount: f64,
        kind: TransactionKind,
        token: &str,
    ) -> Result<()> {
        tracing::debug!(account_id, amount, ?kind, "submitting transaction");
        let response = self
            .http
            .post(format!("{}/{}/transaction", self.base_url, account_id))
            .bearer_auth(token)
            .json(&TransactionRequest { amount, kind })
            .send()
            .await;
        ensure_success(response, TRANSACTION_FALLBACK).await
    }
}

/// Checks the status and decodes a JSON body, reducing any failure to a
/// single user-facing message.
async fn decode<T: DeserializeOwned>(
    response: reqwest::Result<reqwest::Response>,
    fallback: &str,
) -> Result<T> {
    let response = transport(response, fallback)?;
    let status = response.status();
    if status.is_success() {
        response.json::<T>().await.map_err(|err| {
            tracing::warn!(error = %err, "failed to decode ledger response");
            anyhow!(fallback.to_string())
        })
    } else {
        Err(status_error(response, fallback).await)
    }
}

/// Like [`decode`] but discards the body on success.
async fn ensure_success(
    response: reqwest::Result<reqwest::Response>,
    fallback: &str,
) -> Result<()> {
    let response = transport(response, fallback)?;
    if response.status().is_success() {
        Ok(())
    } else {
        Err(status_error(response, fallback).await)
    }
}

fn transport(
    response: reqwest::Result<reqwest::Response>,
    fallback: &str,
) -> Result<reqwest::Response> {
    response.map_err(|err| {
        tracing::warn!(error = %err, "ledger request failed");
        anyhow!(fallback.to_string())
    })
}

async fn status_error(response: reqwest::Response, fallback: &str) -> anyhow::Error {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    tracing::warn!(%status, "ledger service returned an error");
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|body| body.error)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());
    anyhow!(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let client = LedgerClient::new("http://localhost:5088/api/accounts/");
        assert_eq!(client.base_url(), "http://localhost:5088/api/accounts");
    }

    #[test]
    fn test_error_body_extraction() {
        let body: ErrorBody = serde_json::from_str(r#"{"error":"Saldo insuficiente"}"#).unwrap();
        assert_eq!(body.error.as_deref(), Some("Saldo insuficiente"));
    }
}
