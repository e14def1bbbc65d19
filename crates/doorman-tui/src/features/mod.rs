//! Feature slices for the TUI (state/update/render per view).

pub mod home;
pub mod login;
pub mod signup;

use crate::common::StatusMessage;
use crate::effects::UiEffect;

/// Where a screen reducer wants to navigate next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenTransition {
    /// Back to home, optionally carrying a status message for it.
    ToHome { status: Option<StatusMessage> },
    ToLogin,
    ToSignUp,
}

impl ScreenTransition {
    pub fn home() -> Self {
        ScreenTransition::ToHome { status: None }
    }

    pub fn home_with(status: StatusMessage) -> Self {
        ScreenTransition::ToHome {
            status: Some(status),
        }
    }
}

/// Result of a screen-level key or event handler.
///
/// The top-level reducer applies the transition (if any) and forwards the
/// effects to the runtime.
#[derive(Debug)]
pub struct ScreenUpdate {
    pub transition: Option<ScreenTransition>,
    pub effects: Vec<UiEffect>,
}

impl ScreenUpdate {
    pub fn stay() -> Self {
        Self {
            transition: None,
            effects: vec![],
        }
    }

    pub fn go(transition: ScreenTransition) -> Self {
        Self {
            transition: Some(transition),
            effects: vec![],
        }
    }

    pub fn with_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }
}
