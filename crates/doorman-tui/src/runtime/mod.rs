//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! Async results arrive through a single inbox channel:
//! - Handlers send `UiEvent`s to `inbox_tx` via the task lifecycle
//! - The runtime drains `inbox_rx` each frame
//!
//! Auth change events use their own subscription on the client, drained the
//! same way each frame, so the TUI observes sign-in, sign-out, and token
//! refresh no matter which flow triggered them.

mod handlers;

use std::future::Future;
use std::io::Stdout;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::event;
use doorman_core::auth::Subscription;
use doorman_core::{AuthClient, Config};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Target frame rate while tasks are running (60fps = ~16ms per frame).
pub const FRAME_DURATION: std::time::Duration = std::time::Duration::from_millis(16);

/// Poll duration when idle. Longer timeout reduces CPU usage when nothing
/// is happening.
pub const IDLE_POLL_DURATION: std::time::Duration = std::time::Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal, the auth client, and the state. Runs the event loop
/// and executes effects. Terminal state is restored on drop and panic.
pub struct TuiRuntime {
    /// Terminal instance.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state (split: tui + screen).
    pub state: AppState,
    /// Shared auth client; handlers clone the Arc into spawned tasks.
    client: Arc<AuthClient>,
    /// Auth change subscription, drained each frame. Taken on shutdown so
    /// the hub slot is released exactly once.
    subscription: Option<Subscription>,
    /// Inbox sender - task handlers send events here.
    inbox_tx: mpsc::UnboundedSender<UiEvent>,
    /// Inbox receiver - runtime drains this each frame.
    inbox_rx: mpsc::UnboundedReceiver<UiEvent>,
    /// Last time a Tick event was emitted.
    last_tick: std::time::Instant,
    /// Last time a terminal event was received (for fast tick during typing).
    last_terminal_event: std::time::Instant,
}

impl TuiRuntime {
    /// Creates a new TUI runtime.
    ///
    /// The client is built before the alternate screen is entered so config
    /// errors print normally.
    pub fn new(config: Config) -> Result<Self> {
        terminal::install_panic_hook();

        let client = Arc::new(AuthClient::from_config(&config)?);
        let subscription = client.on_auth_state_change();

        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        let state = AppState::new(config);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        let now = std::time::Instant::now();
        Ok(Self {
            terminal,
            state,
            client,
            subscription: Some(subscription),
            inbox_tx,
            inbox_rx,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the main event loop.
    ///
    /// Kicks off the initial session restore before the first frame, so the
    /// loading branch renders immediately.
    pub fn run(&mut self) -> Result<()> {
        let task = self.state.tui.task_seq.next_id();
        self.execute_effect(UiEffect::FetchSession { task });

        let result = self.event_loop();

        if let Some(mut subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true; // Start dirty to ensure initial render

        while !self.state.tui.should_quit {
            let events = self.collect_events()?;

            for event in events {
                // Track terminal activity for fast tick mode
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = std::time::Instant::now();
                }

                let effects = update::update(&mut self.state, event);
                dirty = true;
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(frame, &self.state);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    /// Collects events from all sources (auth subscription, inbox, terminal).
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Fast polling while anything is in flight or the user is typing;
        // slow polling otherwise to save CPU.
        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let needs_fast_poll = self.state.tui.tasks.is_any_running() || recent_terminal_activity;
        let tick_interval = if needs_fast_poll {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        // Auth change events (sign-in, sign-out, token refresh)
        if let Some(subscription) = &mut self.subscription {
            while let Some(auth_event) = subscription.try_recv() {
                events.push(UiEvent::AuthChanged(auth_event));
            }
        }

        // Drain inbox - task lifecycle and results arrive here
        while let Ok(event) = self.inbox_rx.try_recv() {
            events.push(event);
        }

        // Block on terminal input until the next tick is due, unless events
        // are already waiting.
        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());
        let poll_duration = if events.is_empty() {
            time_until_tick
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
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async task with a uniform TaskStarted/TaskCompleted lifecycle.
    ///
    /// Handlers are pure async functions returning the result `UiEvent`; the
    /// lifecycle events wrap it so the reducer can maintain loading state.
    fn spawn_task<F, Fut>(&self, kind: TaskKind, id: TaskId, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let _ = tx.send(UiEvent::TaskStarted {
            kind,
            started: TaskStarted { id },
        });
        tokio::spawn(async move {
            let inner = f().await;
            let completed = TaskCompleted {
                id,
                result: Box::new(inner),
            };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }

    /// Executes a single effect by dispatching to the appropriate handler.
    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.tui.should_quit = true;
            }
            UiEffect::FetchSession { task } => {
                let client = Arc::clone(&self.client);
                self.spawn_task(TaskKind::SessionFetch, task, move || {
                    handlers::fetch_session(client)
                });
            }
            UiEffect::SignIn {
                task,
                email,
                password,
            } => {
                let client = Arc::clone(&self.client);
                self.spawn_task(TaskKind::SignIn, task, move || {
                    handlers::sign_in(client, email, password)
                });
            }
            UiEffect::SignUp {
                task,
                email,
                password,
            } => {
                let client = Arc::clone(&self.client);
                self.spawn_task(TaskKind::SignUp, task, move || {
                    handlers::sign_up(client, email, password)
                });
            }
            UiEffect::SignOut { task } => {
                let client = Arc::clone(&self.client);
                self.spawn_task(TaskKind::SignOut, task, move || handlers::sign_out(client));
            }
            UiEffect::RequestPasswordReset {
                task,
                email,
                redirect_to,
            } => {
                let client = Arc::clone(&self.client);
                self.spawn_task(TaskKind::PasswordReset, task, move || {
                    handlers::request_password_reset(client, email, redirect_to)
                });
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
