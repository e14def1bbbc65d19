//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only, never direct UI mutations,
//! which keeps the reducer pure and unit-testable.

use crate::common::TaskId;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Restore the persisted session (refreshing if expired).
    FetchSession { task: TaskId },

    /// Sign in with email and password.
    SignIn {
        task: TaskId,
        email: String,
        password: String,
    },

    /// Register a new account.
    SignUp {
        task: TaskId,
        email: String,
        password: String,
    },

    /// Revoke the current session.
    SignOut { task: TaskId },

    /// Request a password-reset email.
    RequestPasswordReset {
        task: TaskId,
        email: String,
        redirect_to: String,
    },
}
