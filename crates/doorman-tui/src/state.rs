//! Application state composition.
//!
//! The state is split in two:
//! - `TuiState` - cross-screen state (session phase, tasks, config, spinner)
//! - `Screen` - the active view and its form state
//!
//! `AppState` combines both so screen reducers can take `&mut` to their own
//! state and to `TuiState` without borrow conflicts.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── session: SessionPhase  (loading / resolved session)
//! │   ├── task_seq: TaskSeq      (async task id generator)
//! │   ├── tasks: Tasks           (task lifecycle state)
//! │   └── config: Config
//! └── screen: Screen             (home, login, or sign-up view)
//! ```

use doorman_core::{Config, Session};

use crate::common::{TaskSeq, Tasks};
use crate::features::home::HomeState;
use crate::features::login::LoginState;
use crate::features::signup::SignUpState;

/// Session resolution phase.
///
/// The UI starts in `Loading` until the initial restore finishes; only then
/// do the authenticated and anonymous branches become reachable.
#[derive(Debug, Clone, Default)]
pub enum SessionPhase {
    #[default]
    Loading,
    Ready(Option<Session>),
}

impl SessionPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionPhase::Loading)
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionPhase::Loading => None,
            SessionPhase::Ready(session) => session.as_ref(),
        }
    }
}

/// The active view.
#[derive(Debug)]
pub enum Screen {
    Home(HomeState),
    Login(LoginState),
    SignUp(SignUpState),
}

impl Screen {
    pub fn home() -> Self {
        Screen::Home(HomeState::default())
    }

    pub fn login() -> Self {
        Screen::Login(LoginState::new())
    }

    pub fn sign_up() -> Self {
        Screen::SignUp(SignUpState::new())
    }
}

/// Cross-screen TUI state.
pub struct TuiState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// Current session resolution phase.
    pub session: SessionPhase,
    /// Task id sequence for async operations.
    pub task_seq: TaskSeq,
    /// Task lifecycle state for async operations.
    pub tasks: Tasks,
    /// Loaded configuration (provider URL, redirect base).
    pub config: Config,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
}

impl TuiState {
    pub fn new(config: Config) -> Self {
        Self {
            should_quit: false,
            session: SessionPhase::default(),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            config,
            spinner_frame: 0,
        }
    }
}

/// Combined application state for the TUI.
pub struct AppState {
    pub tui: TuiState,
    pub screen: Screen,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            tui: TuiState::new(config),
            screen: Screen::home(),
        }
    }
}
