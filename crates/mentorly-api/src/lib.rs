//! The Mentorly data-access API.
//!
//! Exposes [`Api`], a set of async operations over any
//! [`mentorly_core::store::KeyValueStore`]. Every public operation waits an
//! artificial [`Latency`] before touching the store, so callers exercise the
//! same suspend/resume paths they would against a remote backend, and answers
//! with an [`ApiResponse`] envelope.
//!
//! Writes run on a spawned task: once called, a write completes even if the
//! caller stops waiting for it.
//!
//! Absence is never an `Err`: a missing record is `success: false` with no
//! data. The `Err` side carries backend failures only.
//!
//! ```rust,ignore
//! let api = Api::new(Arc::new(MemoryStore::new()));
//! api.seed_defaults().await?;
//! let mentors = api.get_users_by_role(Role::Mentor).await?;
//! ```

pub mod assignments;
pub mod credentials;
pub mod error;
pub mod logs;
pub mod meetings;
pub mod notifications;
pub mod response;
pub mod seed;
pub mod users;

use std::{sync::Arc, time::Duration};

use mentorly_core::{records::Records, store::KeyValueStore};

pub use error::{Error, Result};
pub use response::ApiResponse;

// ─── Latency ─────────────────────────────────────────────────────────────────

/// Artificial delays applied before each operation. The delay only affects
/// when the caller resumes; it does not serialise concurrent calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
  /// Single-record lookups.
  pub lookup: Duration,
  /// Collection listings and light writes.
  pub list:   Duration,
  /// Record creation.
  pub write:  Duration,
}

impl Latency {
  /// No delay at all.
  pub const fn none() -> Self {
    Self {
      lookup: Duration::ZERO,
      list:   Duration::ZERO,
      write:  Duration::ZERO,
    }
  }

  pub const fn from_millis(lookup: u64, list: u64, write: u64) -> Self {
    Self {
      lookup: Duration::from_millis(lookup),
      list:   Duration::from_millis(list),
      write:  Duration::from_millis(write),
    }
  }
}

impl Default for Latency {
  fn default() -> Self { Self::from_millis(300, 500, 700) }
}

// ─── Api ─────────────────────────────────────────────────────────────────────

/// Handle to the data-access operations. Cloning is cheap.
pub struct Api<S> {
  records: Records<S>,
  latency: Latency,
}

impl<S> Clone for Api<S> {
  fn clone(&self) -> Self {
    Self { records: self.records.clone(), latency: self.latency }
  }
}

impl<S: KeyValueStore> Api<S> {
  /// An API over `store` with the default latency profile.
  pub fn new(store: Arc<S>) -> Self {
    Self::from_records(Records::new(store), Latency::default())
  }

  pub fn from_records(records: Records<S>, latency: Latency) -> Self {
    Self { records, latency }
  }

  pub fn with_latency(mut self, latency: Latency) -> Self {
    self.latency = latency;
    self
  }

  pub fn records(&self) -> &Records<S> { &self.records }

  pub fn latency(&self) -> Latency { self.latency }

  async fn pause(&self, delay: Duration) {
    if !delay.is_zero() {
      tokio::time::sleep(delay).await;
    }
  }

  /// Run a write operation on its own task. Dropping the returned future
  /// stops waiting for the answer but never cancels the write.
  async fn detached<T, F, Fut>(&self, op: F) -> Result<T>
  where
    F: FnOnce(Self) -> Fut,
    Fut: Future<Output = Result<T>> + Send + 'static,
    T: Send + 'static,
  {
    tokio::spawn(op(self.clone())).await?
  }
}
