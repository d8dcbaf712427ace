//! API error type.
//!
//! Only infrastructure failures end up here. Missing records are reported in
//! the [`crate::ApiResponse`] envelope instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] mentorly_core::Error),

  #[error("password hashing failed: {0}")]
  PasswordHash(String),

  #[error("background operation failed: {0}")]
  Task(#[from] tokio::task::JoinError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
