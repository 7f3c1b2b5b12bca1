//! TUI runtime - owns the terminal, runs the event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox pattern
//!
//! Async results are collected through an "inbox" channel:
//! - Handlers are pure async functions returning a `UiEvent`
//! - `spawn_effect` spawns them and sends the result to `inbox_tx`
//! - The runtime drains `inbox_rx` each frame

use std::future::Future;
use std::io::Stdout;

use anyhow::{Context, Result};
use crossterm::event;
use lbx_core::api::LedgerClient;
use lbx_core::config::Config;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{handlers, render, terminal, update};

/// Target frame rate while a call is in flight (~30fps, spinner cadence).
pub const FRAME_DURATION: std::time::Duration = std::time::Duration::from_millis(33);

/// Poll duration when idle. Longer timeout reduces CPU usage when
/// nothing is happening.
pub const IDLE_POLL_DURATION: std::time::Duration = std::time::Duration::from_millis(250);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is restored on drop, panic, or Ctrl+C.
pub struct Runtime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    /// Shared API client, cloned into every spawned handler.
    client: LedgerClient,
    /// Inbox sender - handlers send events here.
    inbox_tx: mpsc::UnboundedSender<UiEvent>,
    /// Inbox receiver - runtime drains this each frame.
    inbox_rx: mpsc::UnboundedReceiver<UiEvent>,
    /// Last time a Tick event was emitted.
    last_tick: std::time::Instant,
}

impl Runtime {
    /// Creates a new TUI runtime.
    ///
    /// # Errors
    /// Returns an error if terminal setup fails.
    pub fn new(config: Config) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();

        let client = LedgerClient::from_config(&config);
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        let state = AppState::new(config);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            client,
            inbox_tx,
            inbox_rx,
            last_tick: std::time::Instant::now(),
        })
    }

    /// Runs the main event loop until the user quits.
    ///
    /// # Errors
    /// Returns an error if terminal I/O fails.
    pub fn run(&mut self) -> Result<()> {
        tracing::info!(base_url = self.client.base_url(), "event loop started");
        let mut dirty = true; // Start dirty to ensure initial render

        while !self.state.should_quit {
            let events = self.collect_events()?;

            for event in events {
                // Terminal input and API outcomes both change what is on
                // screen; render on the next pass.
                dirty = true;
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event collection
    // ========================================================================

    /// Collects events from the terminal and the inbox.
    ///
    /// Polls fast while a call is in flight (spinner animation), slowly
    /// when idle.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Drain inbox - completed API calls arrive here
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let tick_interval = if self.state.is_busy() {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        // Block until the next tick is due, unless events are already
        // waiting to be processed.
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            std::time::Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            // Drain any remaining buffered events (non-blocking)
            while event::poll(std::time::Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = std::time::Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async effect; the handler's result lands in the inbox.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce(LedgerClient) -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let client = self.client.clone();
        tokio::spawn(async move {
            let _ = tx.send(f(client).await);
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                tracing::info!("quit requested");
                self.state.should_quit = true;
            }
            UiEffect::Register {
                owner_name,
                phone,
                password,
            } => {
                self.spawn_effect(move |client| {
                    handlers::register(client, owner_name, phone, password)
                });
            }
            UiEffect::SignIn {
                agency,
                number,
                password,
            } => {
                self.spawn_effect(move |client| {
                    handlers::sign_in(client, agency, number, password)
                });
            }
            UiEffect::OpenSession { account_id, pin } => {
                self.spawn_effect(move |client| handlers::open_session(client, account_id, pin));
            }
            UiEffect::RefreshAccount { account_id } => {
                self.spawn_effect(move |client| handlers::refresh_account(client, account_id));
            }
            UiEffect::SubmitTransaction {
                account_id,
                token,
                amount,
                kind,
            } => {
                self.spawn_effect(move |client| {
                    handlers::submit_transaction(client, account_id, token, amount, kind)
                });
            }
        }
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
