//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects. This is the single source of truth for
//! how events modify state.

use crossterm::event::{Event, KeyEventKind};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::home::HomeState;
use crate::features::{ScreenTransition, ScreenUpdate};
use crate::state::{AppState, Screen, SessionPhase};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::TaskStarted { kind, started } => {
            app.tui.tasks.state_mut(kind).on_started(&started);
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            let ok = app.tui.tasks.state_mut(kind).finish_if_active(completed.id);
            if ok {
                update(app, *completed.result)
            } else {
                vec![]
            }
        }
        UiEvent::SessionFetched(session) => {
            app.tui.session = SessionPhase::Ready(session);
            vec![]
        }
        // The session is updated from auth change events only, so every
        // subscriber converges on the same value regardless of which flow
        // triggered the change.
        UiEvent::AuthChanged(auth_event) => {
            app.tui.session = SessionPhase::Ready(auth_event.session);
            vec![]
        }
        UiEvent::SignInResult(result) => {
            let screen_update = match &mut app.screen {
                Screen::Login(login) => login.on_sign_in_result(result),
                // The user navigated away mid-flight; the auth change event
                // already carried any session home.
                _ => ScreenUpdate::stay(),
            };
            apply_screen_update(app, screen_update)
        }
        UiEvent::SignUpResult(result) => {
            let screen_update = match &mut app.screen {
                Screen::SignUp(signup) => signup.on_sign_up_result(result),
                _ => ScreenUpdate::stay(),
            };
            apply_screen_update(app, screen_update)
        }
        UiEvent::SignOutResult(result) => {
            if let Screen::Home(home) = &mut app.screen {
                home.on_sign_out_result(result);
            }
            vec![]
        }
        UiEvent::ResetResult(result) => {
            if let Screen::Login(login) = &mut app.screen {
                login.on_reset_result(result);
            }
            vec![]
        }
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => {
            let screen_update = match &mut app.screen {
                Screen::Home(home) => home.handle_key(&mut app.tui, &key),
                Screen::Login(login) => login.handle_key(&mut app.tui, &key),
                Screen::SignUp(signup) => signup.handle_key(&mut app.tui, &key),
            };
            apply_screen_update(app, screen_update)
        }
        // Resize repaints on the next frame; no state change needed.
        _ => vec![],
    }
}

fn apply_screen_update(app: &mut AppState, screen_update: ScreenUpdate) -> Vec<UiEffect> {
    if let Some(transition) = screen_update.transition {
        app.screen = match transition {
            ScreenTransition::ToHome { status: None } => Screen::Home(HomeState::default()),
            ScreenTransition::ToHome {
                status: Some(status),
            } => Screen::Home(HomeState::with_status(status)),
            ScreenTransition::ToLogin => Screen::login(),
            ScreenTransition::ToSignUp => Screen::sign_up(),
        };
    }
    screen_update.effects
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use doorman_core::auth::{AuthChange, AuthEvent};
    use doorman_core::{AuthError, AuthErrorKind, Config, Session, User};

    use super::*;
    use crate::common::{TaskCompleted, TaskKind, TaskStarted};

    fn test_app() -> AppState {
        AppState::new(Config::default())
    }

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn ctrl(ch: char) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(
            KeyCode::Char(ch),
            KeyModifiers::CONTROL,
        )))
    }

    fn type_str(app: &mut AppState, text: &str) {
        for ch in text.chars() {
            update(app, key(KeyCode::Char(ch)));
        }
    }

    fn test_session(email: &str) -> Session {
        Session {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: u64::MAX,
            user: User {
                id: "user-1".to_string(),
                email: Some(email.to_string()),
                created_at: Some("2026-01-15T09:30:00Z".to_string()),
                email_confirmed_at: None,
            },
        }
    }

    fn resolve_session(app: &mut AppState, session: Option<Session>) {
        let effects = update(app, UiEvent::SessionFetched(session));
        assert!(effects.is_empty());
    }

    fn login_status(app: &AppState) -> Option<String> {
        match &app.screen {
            Screen::Login(login) => login.status.as_ref().map(|s| s.text.clone()),
            _ => panic!("not on login screen"),
        }
    }

    #[test]
    fn keys_other_than_quit_are_ignored_while_loading() {
        let mut app = test_app();
        assert!(app.tui.session.is_loading());

        assert!(update(&mut app, key(KeyCode::Char('l'))).is_empty());
        assert!(matches!(app.screen, Screen::Home(_)));

        let effects = update(&mut app, key(KeyCode::Char('q')));
        assert_eq!(effects, vec![UiEffect::Quit]);
        assert!(app.tui.should_quit);
    }

    #[test]
    fn anonymous_home_navigates_to_login_and_signup() {
        let mut app = test_app();
        resolve_session(&mut app, None);

        update(&mut app, key(KeyCode::Char('l')));
        assert!(matches!(app.screen, Screen::Login(_)));

        update(&mut app, key(KeyCode::Esc));
        assert!(matches!(app.screen, Screen::Home(_)));

        update(&mut app, key(KeyCode::Char('s')));
        assert!(matches!(app.screen, Screen::SignUp(_)));
    }

    #[test]
    fn empty_login_submit_sets_status_without_effects() {
        let mut app = test_app();
        resolve_session(&mut app, None);
        update(&mut app, key(KeyCode::Char('l')));

        let effects = update(&mut app, key(KeyCode::Enter));
        assert!(effects.is_empty());
        assert_eq!(
            login_status(&app).as_deref(),
            Some("Enter your email and password.")
        );
    }

    #[test]
    fn reset_with_empty_email_short_circuits_locally() {
        let mut app = test_app();
        resolve_session(&mut app, None);
        update(&mut app, key(KeyCode::Char('l')));

        let effects = update(&mut app, ctrl('r'));
        assert!(effects.is_empty());
        assert_eq!(login_status(&app).as_deref(), Some("Enter your email first."));
    }

    #[test]
    fn reset_request_targets_the_configured_redirect() {
        let mut app = test_app();
        resolve_session(&mut app, None);
        update(&mut app, key(KeyCode::Char('l')));
        type_str(&mut app, "kim@example.com");

        let effects = update(&mut app, ctrl('r'));
        match effects.as_slice() {
            [UiEffect::RequestPasswordReset {
                email, redirect_to, ..
            }] => {
                assert_eq!(email, "kim@example.com");
                assert_eq!(redirect_to, "http://localhost:3000/reset-password");
            }
            other => panic!("unexpected effects: {other:?}"),
        }
    }

    #[test]
    fn sign_in_submit_spawns_one_task_and_marks_loading() {
        let mut app = test_app();
        resolve_session(&mut app, None);
        update(&mut app, key(KeyCode::Char('l')));
        type_str(&mut app, "kim@example.com");
        update(&mut app, key(KeyCode::Tab));
        type_str(&mut app, "hunter2");

        let effects = update(&mut app, key(KeyCode::Enter));
        let task = match effects.as_slice() {
            [UiEffect::SignIn {
                task,
                email,
                password,
            }] => {
                assert_eq!(email, "kim@example.com");
                assert_eq!(password, "hunter2");
                *task
            }
            other => panic!("unexpected effects: {other:?}"),
        };

        update(
            &mut app,
            UiEvent::TaskStarted {
                kind: TaskKind::SignIn,
                started: TaskStarted { id: task },
            },
        );
        assert!(app.tui.tasks.sign_in.is_running());

        // A second Enter while in flight spawns nothing.
        assert!(update(&mut app, key(KeyCode::Enter)).is_empty());
    }

    #[test]
    fn provider_sign_in_failure_shows_message_and_clears_loading() {
        let mut app = test_app();
        resolve_session(&mut app, None);
        update(&mut app, key(KeyCode::Char('l')));
        type_str(&mut app, "kim@example.com");
        update(&mut app, key(KeyCode::Tab));
        type_str(&mut app, "wrong");
        let effects = update(&mut app, key(KeyCode::Enter));
        let task = match effects.as_slice() {
            [UiEffect::SignIn { task, .. }] => *task,
            other => panic!("unexpected effects: {other:?}"),
        };
        update(
            &mut app,
            UiEvent::TaskStarted {
                kind: TaskKind::SignIn,
                started: TaskStarted { id: task },
            },
        );

        let err = AuthError::new(AuthErrorKind::Api, "Invalid login credentials");
        update(
            &mut app,
            UiEvent::TaskCompleted {
                kind: TaskKind::SignIn,
                completed: TaskCompleted {
                    id: task,
                    result: Box::new(UiEvent::SignInResult(Err(err))),
                },
            },
        );

        assert!(!app.tui.tasks.sign_in.is_running());
        assert_eq!(
            login_status(&app).as_deref(),
            Some("Login error: Invalid login credentials")
        );
        // Still on the form, password cleared for retry.
        match &app.screen {
            Screen::Login(login) => {
                assert_eq!(login.email.value(), "kim@example.com");
                assert!(login.password.is_empty());
            }
            _ => panic!("left the login screen"),
        }
    }

    #[test]
    fn successful_sign_in_navigates_home_and_session_arrives_via_auth_event() {
        let mut app = test_app();
        resolve_session(&mut app, None);
        update(&mut app, key(KeyCode::Char('l')));

        let session = test_session("kim@example.com");
        update(
            &mut app,
            UiEvent::AuthChanged(AuthEvent {
                change: AuthChange::SignedIn,
                session: Some(session.clone()),
            }),
        );
        let effects = update(&mut app, UiEvent::SignInResult(Ok(session)));
        assert!(effects.is_empty());

        match &app.screen {
            Screen::Home(home) => {
                assert_eq!(
                    home.status.as_ref().map(|s| s.text.as_str()),
                    Some("Signed in.")
                );
            }
            _ => panic!("did not navigate home"),
        }
        assert_eq!(
            app.tui.session.session().and_then(|s| s.user.email.as_deref()),
            Some("kim@example.com")
        );
    }

    #[test]
    fn signed_out_event_reverts_to_the_anonymous_view() {
        let mut app = test_app();
        resolve_session(&mut app, Some(test_session("kim@example.com")));
        assert!(app.tui.session.session().is_some());

        update(
            &mut app,
            UiEvent::AuthChanged(AuthEvent {
                change: AuthChange::SignedOut,
                session: None,
            }),
        );
        assert!(app.tui.session.session().is_none());
        assert!(matches!(app.screen, Screen::Home(_)));
    }

    #[test]
    fn sign_out_failure_is_surfaced_on_home() {
        let mut app = test_app();
        resolve_session(&mut app, Some(test_session("kim@example.com")));

        let effects = update(&mut app, key(KeyCode::Char('o')));
        assert!(matches!(effects.as_slice(), [UiEffect::SignOut { .. }]));

        let err = AuthError::new(AuthErrorKind::Transport, "connection refused");
        update(&mut app, UiEvent::SignOutResult(Err(err)));
        match &app.screen {
            Screen::Home(home) => {
                assert_eq!(
                    home.status.as_ref().map(|s| s.text.as_str()),
                    Some("Sign out failed. Please try again.")
                );
            }
            _ => panic!("left the home screen"),
        }
    }

    #[test]
    fn stale_task_completion_is_dropped() {
        let mut app = test_app();
        resolve_session(&mut app, None);
        update(&mut app, key(KeyCode::Char('l')));

        // Completion for a task that was never started for this kind.
        let err = AuthError::new(AuthErrorKind::Api, "stale");
        update(
            &mut app,
            UiEvent::TaskCompleted {
                kind: TaskKind::SignIn,
                completed: TaskCompleted {
                    id: crate::common::TaskId(42),
                    result: Box::new(UiEvent::SignInResult(Err(err))),
                },
            },
        );
        assert_eq!(login_status(&app), None);
    }

    #[test]
    fn sign_up_without_session_stays_on_the_form() {
        let mut app = test_app();
        resolve_session(&mut app, None);
        update(&mut app, key(KeyCode::Char('s')));
        let effects = update(&mut app, UiEvent::SignUpResult(Ok(None)));
        assert!(effects.is_empty());
        match &app.screen {
            Screen::SignUp(signup) => {
                assert_eq!(
                    signup.status.as_ref().map(|s| s.text.as_str()),
                    Some("Account created. Check your email to confirm it.")
                );
            }
            _ => panic!("left the sign-up screen"),
        }
    }

    #[test]
    fn mismatched_sign_up_passwords_are_rejected_locally() {
        let mut app = test_app();
        resolve_session(&mut app, None);
        update(&mut app, key(KeyCode::Char('s')));
        type_str(&mut app, "new@example.com");
        update(&mut app, key(KeyCode::Tab));
        type_str(&mut app, "hunter2");
        update(&mut app, key(KeyCode::Tab));
        type_str(&mut app, "hunter3");

        let effects = update(&mut app, key(KeyCode::Enter));
        assert!(effects.is_empty());
        match &app.screen {
            Screen::SignUp(signup) => {
                assert_eq!(
                    signup.status.as_ref().map(|s| s.text.as_str()),
                    Some("Passwords do not match.")
                );
            }
            _ => panic!("left the sign-up screen"),
        }
    }
}
