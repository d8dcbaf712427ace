//! Typed record collections on top of a [`KeyValueStore`].
//!
//! Every collection is one JSON array under a fixed key. Corrupt or missing
//! data is never fatal: it reads back as an empty collection (or no value) and
//! is logged.

use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::Mutex;

use crate::{
  Error, Result,
  store::{Collection, KeyValueStore, StoreKey},
};

/// Typed access to the record store.
///
/// Cloning is cheap; clones share the backend and the write lock.
pub struct Records<S> {
  store:      Arc<S>,
  /// Serialises read-modify-write cycles within this process. Other processes
  /// sharing the backend are not coordinated.
  write_lock: Arc<Mutex<()>>,
}

impl<S> Clone for Records<S> {
  fn clone(&self) -> Self {
    Self { store: self.store.clone(), write_lock: self.write_lock.clone() }
  }
}

impl<S: KeyValueStore> Records<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self { store, write_lock: Arc::new(Mutex::new(())) }
  }

  pub fn store(&self) -> &Arc<S> { &self.store }

  // ── Collections ─────────────────────────────────────────────────────────

  /// Load every record in `collection`. Absent or malformed data yields an
  /// empty vector.
  pub async fn load<T: DeserializeOwned>(
    &self,
    collection: Collection,
  ) -> Result<Vec<T>> {
    Ok(self.get_value(collection.into()).await?.unwrap_or_default())
  }

  /// Replace the contents of `collection`.
  pub async fn save<T: Serialize>(
    &self,
    collection: Collection,
    records: &[T],
  ) -> Result<()> {
    let _guard = self.write_lock.lock().await;
    self.set_value(collection.into(), &records).await
  }

  /// Load `collection`, apply `f`, and persist the result. The whole cycle
  /// holds the write lock.
  ///
  /// `f` returns `None` when it changed nothing; the collection is then not
  /// written back, so stored bytes (even malformed ones) stay as they were.
  pub async fn update<T, R, F>(
    &self,
    collection: Collection,
    f: F,
  ) -> Result<Option<R>>
  where
    T: Serialize + DeserializeOwned,
    F: FnOnce(&mut Vec<T>) -> Option<R>,
  {
    let _guard = self.write_lock.lock().await;
    let mut records: Vec<T> = self.load(collection).await?;
    let Some(out) = f(&mut records) else {
      return Ok(None);
    };
    self.set_value(collection.into(), &records).await?;
    Ok(Some(out))
  }

  // ── Single values ───────────────────────────────────────────────────────

  /// Read a single JSON value. Malformed data is logged and reported as
  /// absent; it is left in place for the caller to clear.
  pub async fn get_value<T: DeserializeOwned>(
    &self,
    key: StoreKey,
  ) -> Result<Option<T>> {
    let Some(raw) = self.store.get(key).await.map_err(Error::store)? else {
      return Ok(None);
    };

    match serde_json::from_str(&raw) {
      Ok(value) => Ok(Some(value)),
      Err(error) => {
        tracing::warn!(%key, %error, "discarding malformed stored value");
        Ok(None)
      }
    }
  }

  pub async fn set_value<T: Serialize + ?Sized>(
    &self,
    key: StoreKey,
    value: &T,
  ) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    self.store.set(key, raw).await.map_err(Error::store)
  }

  pub async fn remove(&self, key: StoreKey) -> Result<()> {
    self.store.remove(key).await.map_err(Error::store)
  }

  // ── Flags ───────────────────────────────────────────────────────────────

  pub async fn flag(&self, key: StoreKey) -> Result<bool> {
    Ok(self.get_value::<bool>(key).await?.unwrap_or(false))
  }

  pub async fn set_flag(&self, key: StoreKey) -> Result<()> {
    self.set_value(key, &true).await
  }
}

#[cfg(test)]
mod tests {
  use uuid::Uuid;

  use super::*;
  use crate::{
    store::MemoryStore,
    user::{Role, User},
  };

  fn records() -> Records<MemoryStore> { Records::new(Arc::new(MemoryStore::new())) }

  fn user(name: &str) -> User {
    User {
      user_id: Uuid::new_v4(),
      name:    name.into(),
      email:   format!("{name}@example.com"),
      role:    Role::Student,
    }
  }

  #[tokio::test]
  async fn absent_collection_is_empty() {
    let r = records();
    let users: Vec<User> = r.load(Collection::Users).await.unwrap();
    assert!(users.is_empty());
  }

  #[tokio::test]
  async fn malformed_collection_is_empty() {
    let r = records();
    r.store()
      .set(Collection::Users.into(), "{not json".into())
      .await
      .unwrap();

    let users: Vec<User> = r.load(Collection::Users).await.unwrap();
    assert!(users.is_empty());
  }

  #[tokio::test]
  async fn save_then_load_roundtrip() {
    let r = records();
    let saved = vec![user("ada"), user("grace")];
    r.save(Collection::Users, &saved).await.unwrap();

    let loaded: Vec<User> = r.load(Collection::Users).await.unwrap();
    assert_eq!(loaded, saved);
  }

  #[tokio::test]
  async fn update_persists_mutation_and_returns_value() {
    let r = records();
    let len = r
      .update(Collection::Users, |users: &mut Vec<User>| {
        users.push(user("ada"));
        Some(users.len())
      })
      .await
      .unwrap();
    assert_eq!(len, Some(1));

    let loaded: Vec<User> = r.load(Collection::Users).await.unwrap();
    assert_eq!(loaded.len(), 1);
  }

  #[tokio::test]
  async fn concurrent_updates_do_not_lose_writes() {
    let r = records();
    let mut handles = Vec::new();
    for i in 0..16 {
      let r = r.clone();
      handles.push(tokio::spawn(async move {
        r.update(Collection::Users, |users: &mut Vec<User>| {
          users.push(user(&format!("u{i}")));
          Some(())
        })
        .await
        .unwrap();
      }));
    }
    for h in handles {
      h.await.unwrap();
    }

    let loaded: Vec<User> = r.load(Collection::Users).await.unwrap();
    assert_eq!(loaded.len(), 16);
  }

  #[tokio::test]
  async fn unchanged_update_leaves_stored_bytes_alone() {
    let r = records();
    r.store()
      .set(Collection::Users.into(), "][corrupt".into())
      .await
      .unwrap();

    let out = r
      .update(Collection::Users, |users: &mut Vec<User>| {
        users.iter().find(|u| u.name == "nobody").map(|u| u.user_id)
      })
      .await
      .unwrap();
    assert_eq!(out, None);

    let raw = r.store().get(Collection::Users.into()).await.unwrap();
    assert_eq!(raw.as_deref(), Some("][corrupt"));
  }

  #[tokio::test]
  async fn flags_default_to_false() {
    let r = records();
    let key = StoreKey::Seeded(Role::Admin);
    assert!(!r.flag(key).await.unwrap());
    r.set_flag(key).await.unwrap();
    assert!(r.flag(key).await.unwrap());
  }
}
