//! Error types for `mentorly-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The underlying key-value backend failed (I/O, SQLite, ...).
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("rating must be between 1 and 5, got {0}")]
  InvalidRating(u8),
}

impl Error {
  /// Box a backend error from any [`crate::store::KeyValueStore`].
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
