//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! Transitions are driven only by explicit user actions or API call
//! outcomes: success advances, failure stays on the current screen and
//! shows the error.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::effects::UiEffect;
use crate::events::{ApiOutcome, UiEvent};
use crate::state::{
    dashboard_field, login_field, register_field, two_factor_field, AppState, PendingCall, Screen,
};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns
/// effects for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(Event::Key(key)) if key.kind != KeyEventKind::Release => {
            handle_key(app, key)
        }
        UiEvent::Terminal(_) => vec![],
        UiEvent::Api(outcome) => handle_api(app, outcome),
    }
}

// ============================================================================
// Key handling
// ============================================================================

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && key.code == KeyCode::Char('c') {
        return vec![UiEffect::Quit];
    }

    match &app.screen {
        Screen::Login(_) => login_key(app, key, ctrl),
        Screen::Register(_) => register_key(app, key),
        Screen::TwoFactor(_) => two_factor_key(app, key),
        Screen::Dashboard(_) => dashboard_key(app, key, ctrl),
    }
}

fn login_key(app: &mut AppState, key: KeyEvent, ctrl: bool) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Char('n') if ctrl => {
            app.notice.clear();
            app.screen = Screen::register();
            vec![]
        }
        KeyCode::Enter => {
            if app.is_busy() {
                return vec![];
            }
            let Screen::Login(form) = &app.screen else {
                return vec![];
            };
            let effect = UiEffect::SignIn {
                agency: form.value(login_field::AGENCY).to_string(),
                number: form.value(login_field::NUMBER).to_string(),
                password: form.value(login_field::PASSWORD).to_string(),
            };
            app.notice.clear();
            app.pending = Some(PendingCall::SignIn);
            vec![effect]
        }
        _ => {
            if let Screen::Login(form) = &mut app.screen {
                form.handle_key(key);
            }
            vec![]
        }
    }
}

fn register_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Esc => {
            app.notice.clear();
            app.screen = Screen::login();
            vec![]
        }
        KeyCode::Enter => {
            if app.is_busy() {
                return vec![];
            }
            let Screen::Register(form) = &app.screen else {
                return vec![];
            };
            let effect = UiEffect::Register {
                owner_name: form.value(register_field::NAME).to_string(),
                phone: form.value(register_field::PHONE).to_string(),
                password: form.value(register_field::PASSWORD).to_string(),
            };
            app.notice.clear();
            app.pending = Some(PendingCall::Register);
            vec![effect]
        }
        _ => {
            if let Screen::Register(form) = &mut app.screen {
                form.handle_key(key);
            }
            vec![]
        }
    }
}

fn two_factor_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Esc => {
            if app.is_busy() {
                return vec![];
            }
            app.notice.clear();
            app.screen = Screen::login();
            vec![]
        }
        KeyCode::Enter => {
            if app.is_busy() {
                return vec![];
            }
            let Screen::TwoFactor(tfa) = &app.screen else {
                return vec![];
            };
            let effect = UiEffect::OpenSession {
                account_id: tfa.account_id.clone(),
                pin: tfa.form.value(two_factor_field::PIN).to_string(),
            };
            app.notice.clear();
            app.pending = Some(PendingCall::OpenSession);
            vec![effect]
        }
        _ => {
            if let Screen::TwoFactor(tfa) = &mut app.screen {
                tfa.form.handle_key(key);
            }
            vec![]
        }
    }
}

fn dashboard_key(app: &mut AppState, key: KeyEvent, ctrl: bool) -> Vec<UiEffect> {
    match key.code {
        // Logout: drop token, account id, snapshot and all form state.
        KeyCode::Esc => {
            app.screen = Screen::login();
            app.pending = None;
            app.notice.clear();
            app.notice.set_success("Signed out.");
            vec![]
        }
        KeyCode::Left => {
            if let Screen::Dashboard(dash) = &mut app.screen {
                dash.kind = dash.kind.prev();
            }
            vec![]
        }
        KeyCode::Right => {
            if let Screen::Dashboard(dash) = &mut app.screen {
                dash.kind = dash.kind.next();
            }
            vec![]
        }
        KeyCode::Char('r') if ctrl => {
            if app.is_busy() {
                return vec![];
            }
            let Screen::Dashboard(dash) = &app.screen else {
                return vec![];
            };
            let effect = UiEffect::RefreshAccount {
                account_id: dash.account_id.clone(),
            };
            app.pending = Some(PendingCall::RefreshAccount);
            vec![effect]
        }
        KeyCode::Enter => {
            if app.is_busy() {
                return vec![];
            }
            let Screen::Dashboard(dash) = &app.screen else {
                return vec![];
            };
            // Local validation: the amount must be a non-empty number.
            // Rejected here without any network call.
            let raw = dash.form.value(dashboard_field::AMOUNT).trim();
            let Ok(amount) = raw.parse::<f64>() else {
                app.notice.set_error("Enter a valid amount.");
                return vec![];
            };
            let effect = UiEffect::SubmitTransaction {
                account_id: dash.account_id.clone(),
                token: dash.token.clone(),
                amount,
                kind: dash.kind,
            };
            app.notice.clear();
            app.pending = Some(PendingCall::Transaction);
            vec![effect]
        }
        _ => {
            if let Screen::Dashboard(dash) = &mut app.screen {
                dash.form.handle_key(key);
            }
            vec![]
        }
    }
}

// ============================================================================
// API outcome handling
// ============================================================================

fn handle_api(app: &mut AppState, outcome: ApiOutcome) -> Vec<UiEffect> {
    app.pending = None;

    match outcome {
        ApiOutcome::Registered(Ok(new_account)) => {
            if matches!(app.screen, Screen::Register(_)) {
                app.screen = Screen::login();
                app.notice.set_success(format!(
                    "Account created! Agency: {} | Account: {}. Keep these for sign-in.",
                    new_account.agency, new_account.number
                ));
            }
        }
        ApiOutcome::Registered(Err(message)) => {
            if matches!(app.screen, Screen::Register(_)) {
                app.notice.set_error(message);
            }
        }

        ApiOutcome::SignedIn(Ok(granted)) => {
            if matches!(app.screen, Screen::Login(_)) {
                let message = if granted.message.is_empty() {
                    "Enter the one-time code sent to your phone.".to_string()
                } else {
                    granted.message
                };
                app.screen = Screen::two_factor(granted.account_id);
                app.notice.set_success(message);
            }
        }
        ApiOutcome::SignedIn(Err(message)) => {
            if matches!(app.screen, Screen::Login(_)) {
                app.notice.set_error(message);
            }
        }

        ApiOutcome::SessionOpened(Ok(session)) => {
            if matches!(app.screen, Screen::TwoFactor(_)) {
                app.screen =
                    Screen::dashboard(session.account_id, session.token, session.account);
                app.notice.clear();
            }
        }
        // Invalid PIN (or a failed snapshot fetch): stay on the code
        // screen; no token was stored.
        ApiOutcome::SessionOpened(Err(message)) => {
            if matches!(app.screen, Screen::TwoFactor(_)) {
                app.notice.set_error(message);
            }
        }

        ApiOutcome::AccountRefreshed(Ok(account)) => {
            if let Screen::Dashboard(dash) = &mut app.screen {
                dash.account = account;
            }
        }
        ApiOutcome::AccountRefreshed(Err(message)) => {
            if matches!(app.screen, Screen::Dashboard(_)) {
                app.notice.set_error(message);
            }
        }

        ApiOutcome::TransactionSettled(Ok(account)) => {
            if let Screen::Dashboard(dash) = &mut app.screen {
                dash.account = account;
                dash.form.clear(dashboard_field::AMOUNT);
                app.notice.set_success("Transaction completed successfully.");
            }
        }
        ApiOutcome::TransactionSettled(Err(message)) => {
            if matches!(app.screen, Screen::Dashboard(_)) {
                app.notice.set_error(message);
            }
        }
    }

    vec![]
}
