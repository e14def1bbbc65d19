//! UI event types.
//!
//! Everything that can change state flows through these events: terminal
//! input, the frame tick, task lifecycle notifications, and auth results
//! delivered by the runtime.

use crossterm::event::Event;
use doorman_core::auth::AuthEvent;
use doorman_core::{AuthError, Session};

use crate::common::{TaskCompleted, TaskKind, TaskStarted};

/// Events consumed by the reducer.
#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick while tasks are running (drives the spinner).
    Tick,

    /// Raw terminal input (keys, resize).
    Terminal(Event),

    /// A background task was spawned by the runtime.
    TaskStarted { kind: TaskKind, started: TaskStarted },

    /// A background task finished; the completion wraps the event carrying
    /// its outcome.
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    /// Initial session restore finished (errors degrade to `None`).
    SessionFetched(Option<Session>),

    /// Auth state changed (sign-in, sign-out, token refresh).
    AuthChanged(AuthEvent),

    /// Password sign-in finished.
    SignInResult(Result<Session, AuthError>),

    /// Sign-up finished; `Ok(None)` means confirmation email pending.
    SignUpResult(Result<Option<Session>, AuthError>),

    /// Sign-out finished.
    SignOutResult(Result<(), AuthError>),

    /// Password-reset request finished.
    ResetResult(Result<(), AuthError>),
}
