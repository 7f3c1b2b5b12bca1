//! Wire types for the ledger service JSON contract.
//!
//! The service speaks camelCase JSON; identifiers (account id, agency,
//! account number, bearer token) are opaque server-issued strings.

use serde::{Deserialize, Serialize};

/// Response of a successful registration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct NewAccount {
    pub agency: String,
    pub number: String,
}

/// Response of a successful password login.
///
/// `message` is a human-readable status line (e.g. that a 2FA code was
/// sent) and is shown to the user verbatim.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginGranted {
    pub account_id: String,
    #[serde(default)]
    pub message: String,
}

/// Response of a successful one-time-code validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinGranted {
    pub account_id: String,
    pub token: String,
}

/// Account snapshot as returned by the service.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub owner_name: String,
    pub agency: String,
    pub number: String,
    pub balance: f64,
}

/// Transaction operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    #[default]
    Debit,
    Credit,
    Refund,
}

impl TransactionKind {
    /// All kinds in the order offered by the dashboard selector.
    pub fn all() -> &'static [TransactionKind] {
        &[
            TransactionKind::Debit,
            TransactionKind::Credit,
            TransactionKind::Refund,
        ]
    }

    /// Human-readable label for the dashboard selector.
    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Debit => "Debit / Withdrawal",
            TransactionKind::Credit => "Credit / Deposit",
            TransactionKind::Refund => "Refund",
        }
    }

    /// Next kind in selector order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            TransactionKind::Debit => TransactionKind::Credit,
            TransactionKind::Credit => TransactionKind::Refund,
            TransactionKind::Refund => TransactionKind::Debit,
        }
    }

    /// Previous kind in selector order, wrapping around.
    pub fn prev(self) -> Self {
        match self {
            TransactionKind::Debit => TransactionKind::Refund,
            TransactionKind::Credit => TransactionKind::Debit,
            TransactionKind::Refund => TransactionKind::Credit,
        }
    }
}

// ============================================================================
// Request bodies
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest<'a> {
    pub owner_name: &'a str,
    pub initial_balance: f64,
    pub phone_number: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub agency: &'a str,
    pub number: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatePinRequest<'a> {
    pub account_id: &'a str,
    pub pin: &'a str,
}

#[derive(Debug, Serialize)]
pub struct TransactionRequest {
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}
