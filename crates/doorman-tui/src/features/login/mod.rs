//! Login view: email/password form with password-reset shortcut.

pub mod render;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use doorman_core::{AuthError, Session};

use crate::common::{Field, StatusMessage, flow_error_message};
use crate::effects::UiEffect;
use crate::features::{ScreenTransition, ScreenUpdate};
use crate::state::TuiState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFocus {
    Email,
    Password,
}

#[derive(Debug)]
pub struct LoginState {
    pub email: Field,
    pub password: Field,
    pub focus: LoginFocus,
    pub status: Option<StatusMessage>,
}

impl Default for LoginState {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginState {
    pub fn new() -> Self {
        Self {
            email: Field::new(),
            password: Field::masked(),
            focus: LoginFocus::Email,
            status: None,
        }
    }

    pub fn handle_key(&mut self, tui: &mut TuiState, key: &KeyEvent) -> ScreenUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            tui.should_quit = true;
            return ScreenUpdate::stay().with_effects(vec![UiEffect::Quit]);
        }

        match key.code {
            KeyCode::Esc => ScreenUpdate::go(ScreenTransition::home()),
            KeyCode::Tab | KeyCode::Down | KeyCode::Up => {
                self.focus = match self.focus {
                    LoginFocus::Email => LoginFocus::Password,
                    LoginFocus::Password => LoginFocus::Email,
                };
                ScreenUpdate::stay()
            }
            KeyCode::Enter => self.submit(tui),
            KeyCode::Char('r') if ctrl => self.request_reset(tui),
            _ => {
                self.focused_field_mut().handle_key(key);
                ScreenUpdate::stay()
            }
        }
    }

    fn focused_field_mut(&mut self) -> &mut Field {
        match self.focus {
            LoginFocus::Email => &mut self.email,
            LoginFocus::Password => &mut self.password,
        }
    }

    fn submit(&mut self, tui: &mut TuiState) -> ScreenUpdate {
        if tui.tasks.sign_in.is_running() {
            return ScreenUpdate::stay();
        }
        if self.email.is_empty() || self.password.is_empty() {
            self.status = Some(StatusMessage::error("Enter your email and password."));
            return ScreenUpdate::stay();
        }
        self.status = None;
        let task = tui.task_seq.next_id();
        ScreenUpdate::stay().with_effects(vec![UiEffect::SignIn {
            task,
            email: self.email.value().to_string(),
            password: self.password.value().to_string(),
        }])
    }

    fn request_reset(&mut self, tui: &mut TuiState) -> ScreenUpdate {
        if tui.tasks.password_reset.is_running() {
            return ScreenUpdate::stay();
        }
        // Reset only needs the email; an empty one short-circuits locally.
        if self.email.is_empty() {
            self.status = Some(StatusMessage::error("Enter your email first."));
            return ScreenUpdate::stay();
        }
        self.status = None;
        let task = tui.task_seq.next_id();
        ScreenUpdate::stay().with_effects(vec![UiEffect::RequestPasswordReset {
            task,
            email: self.email.value().to_string(),
            redirect_to: tui.config.reset_redirect_url(),
        }])
    }

    pub fn on_sign_in_result(&mut self, result: Result<Session, AuthError>) -> ScreenUpdate {
        match result {
            // The session lands via the auth change event; here we only navigate.
            Ok(_) => ScreenUpdate::go(ScreenTransition::home_with(StatusMessage::success(
                "Signed in.",
            ))),
            Err(err) => {
                self.status = Some(StatusMessage::error(flow_error_message("Login", &err)));
                self.password.clear();
                ScreenUpdate::stay()
            }
        }
    }

    pub fn on_reset_result(&mut self, result: Result<(), AuthError>) {
        match result {
            Ok(()) => {
                self.status = Some(StatusMessage::success(
                    "Password reset email sent. Check your inbox.",
                ));
            }
            Err(err) => {
                self.status = Some(StatusMessage::error(flow_error_message(
                    "Password reset",
                    &err,
                )));
            }
        }
    }
}
