//! Core library for Doorman: provider client, session types, config, logging.

pub mod auth;
pub mod config;
pub mod logging;

pub use auth::{AuthClient, AuthError, AuthErrorKind, Session, User};
pub use config::Config;
