//! Application state composition.
//!
//! The screen flow is a tagged union: each variant carries exactly the
//! session data that screen needs, so impossible states (a dashboard
//! without an account snapshot, a bearer token before PIN validation)
//! cannot be represented.
//!
//! ```text
//! AppState
//! ├── screen: Screen          (Login | Register | TwoFactor | Dashboard)
//! ├── notice: Notice          (one error + one success line)
//! ├── pending: Option<PendingCall>   (single-flight guard)
//! └── config: Config
//! ```
//!
//! Everything here is ephemeral: logout rebuilds `Screen::login()` and
//! nothing survives process exit.

use lbx_core::config::Config;
use lbx_core::types::{Account, TransactionKind};

use crate::forms::{Form, TextField};

/// Field indices for the login form.
pub mod login_field {
    pub const AGENCY: usize = 0;
    pub const NUMBER: usize = 1;
    pub const PASSWORD: usize = 2;
}

/// Field indices for the registration form.
pub mod register_field {
    pub const NAME: usize = 0;
    pub const PHONE: usize = 1;
    pub const PASSWORD: usize = 2;
}

/// Field index for the one-time-code form.
pub mod two_factor_field {
    pub const PIN: usize = 0;
}

/// Field index for the dashboard transaction form.
pub mod dashboard_field {
    pub const AMOUNT: usize = 0;
}

/// Top-level application state.
pub struct AppState {
    pub screen: Screen,
    pub notice: Notice,
    /// In-flight API call, if any. While set, submissions are ignored.
    pub pending: Option<PendingCall>,
    pub config: Config,
    pub should_quit: bool,
    /// Spinner animation frame counter (while a call is pending).
    pub spinner_frame: usize,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            screen: Screen::login(),
            notice: Notice::default(),
            pending: None,
            config,
            should_quit: false,
            spinner_frame: 0,
        }
    }

    /// True while an API call is outstanding.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }
}

/// The four screens. Exactly one is active at a time.
pub enum Screen {
    Login(Form),
    Register(Form),
    TwoFactor(TwoFactor),
    Dashboard(Dashboard),
}

impl Screen {
    pub fn login() -> Self {
        Screen::Login(Form::new(vec![
            TextField::digits("Agency", "e.g. 0001"),
            TextField::digits("Account", "e.g. 123456"),
            TextField::password("Password", "your secret password"),
        ]))
    }

    pub fn register() -> Self {
        Screen::Register(Form::new(vec![
            TextField::text("Full name", "e.g. Renan Lima"),
            TextField::digits("Phone (receives the 2FA SMS)", "e.g. 21999999999"),
            TextField::password("Password", "choose a strong password"),
        ]))
    }

    pub fn two_factor(account_id: String) -> Self {
        Screen::TwoFactor(TwoFactor {
            account_id,
            form: Form::new(vec![TextField::digits("One-time code", "6-digit code")]),
        })
    }

    pub fn dashboard(account_id: String, token: String, account: Account) -> Self {
        Screen::Dashboard(Dashboard {
            account_id,
            token,
            account,
            form: Form::new(vec![TextField::decimal("Amount (R$)", "0.00")]),
            kind: TransactionKind::default(),
        })
    }
}

/// One-time-code screen state.
pub struct TwoFactor {
    /// Account id returned by the password login.
    pub account_id: String,
    pub form: Form,
}

/// Dashboard screen state.
///
/// Constructed only from a successful PIN validation plus account
/// fetch; the bearer token lives nowhere else.
pub struct Dashboard {
    pub account_id: String,
    pub token: String,
    pub account: Account,
    pub form: Form,
    pub kind: TransactionKind,
}

/// Kinds of in-flight API calls (duplicate-submission guard).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingCall {
    Register,
    SignIn,
    OpenSession,
    RefreshAccount,
    Transaction,
}

/// User-facing status lines: at most one error and one success.
#[derive(Debug, Default)]
pub struct Notice {
    pub error: Option<String>,
    pub success: Option<String>,
}

impl Notice {
    /// Clears both lines; called at the start of every submission.
    pub fn clear(&mut self) {
        self.error = None;
        self.success = None;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.success = None;
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.success = Some(message.into());
        self.error = None;
    }
}
