//! Home view: session summary and entry points into the auth flows.

pub mod render;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use doorman_core::AuthError;

use crate::common::{StatusMessage, flow_error_message};
use crate::features::{ScreenTransition, ScreenUpdate};
use crate::effects::UiEffect;
use crate::state::TuiState;

#[derive(Debug, Default)]
pub struct HomeState {
    pub status: Option<StatusMessage>,
}

impl HomeState {
    pub fn with_status(status: StatusMessage) -> Self {
        Self {
            status: Some(status),
        }
    }

    pub fn handle_key(&mut self, tui: &mut TuiState, key: &KeyEvent) -> ScreenUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if key.code == KeyCode::Char('q') || (ctrl && key.code == KeyCode::Char('c')) {
            tui.should_quit = true;
            return ScreenUpdate::stay().with_effects(vec![UiEffect::Quit]);
        }

        // Until the initial restore resolves, only quitting is allowed.
        if tui.session.is_loading() {
            return ScreenUpdate::stay();
        }

        if tui.session.session().is_some() {
            match key.code {
                KeyCode::Char('o') => self.start_sign_out(tui),
                _ => ScreenUpdate::stay(),
            }
        } else {
            match key.code {
                KeyCode::Char('l') | KeyCode::Enter => ScreenUpdate::go(ScreenTransition::ToLogin),
                KeyCode::Char('s') => ScreenUpdate::go(ScreenTransition::ToSignUp),
                _ => ScreenUpdate::stay(),
            }
        }
    }

    fn start_sign_out(&mut self, tui: &mut TuiState) -> ScreenUpdate {
        if tui.tasks.sign_out.is_running() {
            return ScreenUpdate::stay();
        }
        self.status = None;
        let task = tui.task_seq.next_id();
        ScreenUpdate::stay().with_effects(vec![UiEffect::SignOut { task }])
    }

    /// The session itself is cleared via the auth change event; here we only
    /// surface provider failures, since local state is already gone either way.
    pub fn on_sign_out_result(&mut self, result: Result<(), AuthError>) {
        match result {
            Ok(()) => {
                self.status = Some(StatusMessage::info("Signed out."));
            }
            Err(err) => {
                self.status = Some(StatusMessage::error(flow_error_message("Sign out", &err)));
            }
        }
    }
}
