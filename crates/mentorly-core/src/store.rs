//! The `KeyValueStore` trait, its fixed key space, and an in-memory backend.
//!
//! The trait is the persistence seam: it is implemented by storage backends
//! (e.g. `mentorly-store-sqlite`) and consumed by [`crate::records::Records`].
//! It stores opaque strings; typing and corrupt-data handling live one layer
//! up.

use std::{collections::HashMap, convert::Infallible, fmt, future::Future};

use tokio::sync::RwLock;

use crate::user::Role;

// ─── Keys ────────────────────────────────────────────────────────────────────

/// A persisted collection. Each is stored as one JSON array.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum Collection {
  Users,
  Credentials,
  MentorAssignments,
  Meetings,
  MeetingLogs,
  Notifications,
}

/// Every key the portal ever reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
  Collection(Collection),
  /// The signed-in user.
  Session,
  /// Set once the default account for a role has been seeded.
  Seeded(Role),
  /// Set once the optional demo data set has been seeded.
  SeededDemo,
}

impl StoreKey {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Collection(c) => c.into(),
      Self::Session => "session",
      Self::Seeded(Role::Admin) => "seed.admin",
      Self::Seeded(Role::Mentor) => "seed.mentor",
      Self::Seeded(Role::Student) => "seed.student",
      Self::SeededDemo => "seed.demo",
    }
  }
}

impl From<Collection> for StoreKey {
  fn from(c: Collection) -> Self { Self::Collection(c) }
}

impl fmt::Display for StoreKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the key-value persistence substrate.
///
/// There are no transactions and no cross-key atomicity; the last writer of a
/// key wins.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait KeyValueStore: Send + Sync + 'static {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the raw value stored under `key`, or `None` if absent.
  fn get(
    &self,
    key: StoreKey,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + '_;

  /// Store `value` under `key`, replacing any previous value.
  fn set(
    &self,
    key: StoreKey,
    value: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Delete `key`. Removing an absent key is not an error.
  fn remove(
    &self,
    key: StoreKey,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}

// ─── In-memory backend ───────────────────────────────────────────────────────

/// A process-local [`KeyValueStore`]; contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
  entries: RwLock<HashMap<StoreKey, String>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }
}

impl KeyValueStore for MemoryStore {
  type Error = Infallible;

  async fn get(&self, key: StoreKey) -> Result<Option<String>, Infallible> {
    Ok(self.entries.read().await.get(&key).cloned())
  }

  async fn set(&self, key: StoreKey, value: String) -> Result<(), Infallible> {
    self.entries.write().await.insert(key, value);
    Ok(())
  }

  async fn remove(&self, key: StoreKey) -> Result<(), Infallible> {
    self.entries.write().await.remove(&key);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn key_names_are_stable() {
    assert_eq!(StoreKey::from(Collection::Users).as_str(), "users");
    assert_eq!(
      StoreKey::from(Collection::MentorAssignments).as_str(),
      "mentor_assignments"
    );
    assert_eq!(StoreKey::from(Collection::MeetingLogs).as_str(), "meeting_logs");
    assert_eq!(StoreKey::Seeded(Role::Student).as_str(), "seed.student");
  }

  #[tokio::test]
  async fn memory_store_set_get_remove() {
    let store = MemoryStore::new();
    assert_eq!(store.get(StoreKey::Session).await.unwrap(), None);

    store.set(StoreKey::Session, "x".into()).await.unwrap();
    assert_eq!(store.get(StoreKey::Session).await.unwrap().as_deref(), Some("x"));

    store.remove(StoreKey::Session).await.unwrap();
    store.remove(StoreKey::Session).await.unwrap();
    assert_eq!(store.get(StoreKey::Session).await.unwrap(), None);
  }
}
