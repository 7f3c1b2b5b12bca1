//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime
//! executes. This keeps the reducer pure: it only mutates state and
//! returns effects, never performs I/O or spawns tasks directly.

use lbx_core::types::TransactionKind;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, PartialEq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Create a new account.
    Register {
        owner_name: String,
        phone: String,
        password: String,
    },

    /// Password login (first factor).
    SignIn {
        agency: String,
        number: String,
        password: String,
    },

    /// Validate the one-time code and fetch the initial snapshot.
    OpenSession { account_id: String, pin: String },

    /// Re-fetch the account snapshot.
    RefreshAccount { account_id: String },

    /// Submit a transaction and re-fetch the snapshot.
    SubmitTransaction {
        account_id: String,
        token: String,
        amount: f64,
        kind: TransactionKind,
    },
}
