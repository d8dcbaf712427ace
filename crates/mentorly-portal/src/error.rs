//! Error types for the portal layer.

use thiserror::Error;

/// Failure to assemble a [`crate::Portal`].
#[derive(Debug, Error)]
pub enum Error {
  #[error("configuration error: {0}")]
  Config(#[from] config::ConfigError),

  #[error("store error: {0}")]
  Store(#[from] mentorly_store_sqlite::Error),

  #[error("api error: {0}")]
  Api(#[from] mentorly_api::Error),

  #[error("session error: {0}")]
  Auth(#[from] AuthError),
}

/// A rejected sign-in or registration. Callers translate these into
/// user-facing messages.
#[derive(Debug, Error)]
pub enum AuthError {
  /// Unknown email, missing credential, or wrong secret; deliberately not
  /// distinguished.
  #[error("invalid credentials")]
  InvalidCredentials,

  #[error("email already in use: {0}")]
  EmailInUse(String),

  #[error("api error: {0}")]
  Api(#[from] mentorly_api::Error),

  #[error("store error: {0}")]
  Store(#[from] mentorly_core::Error),

  #[error("background sign-in task failed: {0}")]
  Task(#[from] tokio::task::JoinError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
