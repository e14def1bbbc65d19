//! Sign-up view: account registration form.

pub mod render;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use doorman_core::{AuthError, Session};

use crate::common::{Field, StatusMessage, flow_error_message};
use crate::effects::UiEffect;
use crate::features::{ScreenTransition, ScreenUpdate};
use crate::state::TuiState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignUpFocus {
    Email,
    Password,
    Confirm,
}

#[derive(Debug)]
pub struct SignUpState {
    pub email: Field,
    pub password: Field,
    pub confirm: Field,
    pub focus: SignUpFocus,
    pub status: Option<StatusMessage>,
}

impl Default for SignUpState {
    fn default() -> Self {
        Self::new()
    }
}

impl SignUpState {
    pub fn new() -> Self {
        Self {
            email: Field::new(),
            password: Field::masked(),
            confirm: Field::masked(),
            focus: SignUpFocus::Email,
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
            KeyCode::Tab | KeyCode::Down => {
                self.focus = next_focus(self.focus);
                ScreenUpdate::stay()
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = prev_focus(self.focus);
                ScreenUpdate::stay()
            }
            KeyCode::Enter => self.submit(tui),
            _ => {
                self.focused_field_mut().handle_key(key);
                ScreenUpdate::stay()
            }
        }
    }

    fn focused_field_mut(&mut self) -> &mut Field {
        match self.focus {
            SignUpFocus::Email => &mut self.email,
            SignUpFocus::Password => &mut self.password,
            SignUpFocus::Confirm => &mut self.confirm,
        }
    }

    fn submit(&mut self, tui: &mut TuiState) -> ScreenUpdate {
        if tui.tasks.sign_up.is_running() {
            return ScreenUpdate::stay();
        }
        if self.email.is_empty() || self.password.is_empty() {
            self.status = Some(StatusMessage::error("Enter your email and password."));
            return ScreenUpdate::stay();
        }
        if self.password.value() != self.confirm.value() {
            self.status = Some(StatusMessage::error("Passwords do not match."));
            return ScreenUpdate::stay();
        }
        self.status = None;
        let task = tui.task_seq.next_id();
        ScreenUpdate::stay().with_effects(vec![UiEffect::SignUp {
            task,
            email: self.email.value().to_string(),
            password: self.password.value().to_string(),
        }])
    }

    pub fn on_sign_up_result(&mut self, result: Result<Option<Session>, AuthError>) -> ScreenUpdate {
        match result {
            // Auto-confirm is on: the provider returned a session and the
            // auth change event carries it home.
            Ok(Some(_)) => ScreenUpdate::go(ScreenTransition::home_with(
                StatusMessage::success("Account created."),
            )),
            Ok(None) => {
                self.status = Some(StatusMessage::success(
                    "Account created. Check your email to confirm it.",
                ));
                ScreenUpdate::stay()
            }
            Err(err) => {
                self.status = Some(StatusMessage::error(flow_error_message("Sign up", &err)));
                ScreenUpdate::stay()
            }
        }
    }
}

fn next_focus(focus: SignUpFocus) -> SignUpFocus {
    match focus {
        SignUpFocus::Email => SignUpFocus::Password,
        SignUpFocus::Password => SignUpFocus::Confirm,
        SignUpFocus::Confirm => SignUpFocus::Email,
    }
}

fn prev_focus(focus: SignUpFocus) -> SignUpFocus {
    match focus {
        SignUpFocus::Email => SignUpFocus::Confirm,
        SignUpFocus::Password => SignUpFocus::Email,
        SignUpFocus::Confirm => SignUpFocus::Password,
    }
}
