//! Integration tests for `SqliteStore`.

use std::sync::Arc;

use mentorly_core::{
  records::Records,
  store::{Collection, KeyValueStore, StoreKey},
  user::{Role, User},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn user(name: &str, role: Role) -> User {
  User {
    user_id: Uuid::new_v4(),
    name:    name.into(),
    email:   format!("{name}@example.com"),
    role,
  }
}

// ─── Raw key-value access ────────────────────────────────────────────────────

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get(StoreKey::Session).await.unwrap().is_none());
}

#[tokio::test]
async fn set_then_get() {
  let s = store().await;
  s.set(StoreKey::Session, "{\"a\":1}".into()).await.unwrap();
  assert_eq!(
    s.get(StoreKey::Session).await.unwrap().as_deref(),
    Some("{\"a\":1}")
  );
}

#[tokio::test]
async fn set_overwrites_previous_value() {
  let s = store().await;
  let key = StoreKey::Collection(Collection::Meetings);
  s.set(key, "[]".into()).await.unwrap();
  s.set(key, "[1]".into()).await.unwrap();
  assert_eq!(s.get(key).await.unwrap().as_deref(), Some("[1]"));
}

#[tokio::test]
async fn keys_are_independent() {
  let s = store().await;
  s.set(StoreKey::Seeded(Role::Admin), "true".into()).await.unwrap();
  assert!(s.get(StoreKey::Seeded(Role::Mentor)).await.unwrap().is_none());
  assert!(s.get(StoreKey::SeededDemo).await.unwrap().is_none());
}

#[tokio::test]
async fn remove_deletes_and_is_idempotent() {
  let s = store().await;
  s.set(StoreKey::Session, "x".into()).await.unwrap();
  s.remove(StoreKey::Session).await.unwrap();
  s.remove(StoreKey::Session).await.unwrap();
  assert!(s.get(StoreKey::Session).await.unwrap().is_none());
}

// ─── Through the typed record layer ─────────────────────────────────────────

#[tokio::test]
async fn records_roundtrip_through_sqlite() {
  let records = Records::new(Arc::new(store().await));
  let users = vec![user("ada", Role::Mentor), user("alan", Role::Student)];
  records.save(Collection::Users, &users).await.unwrap();

  let loaded: Vec<User> = records.load(Collection::Users).await.unwrap();
  assert_eq!(loaded, users);
}

#[tokio::test]
async fn malformed_row_reads_as_empty_collection() {
  let s = store().await;
  s.set(Collection::Users.into(), "[{\"broken\":".into())
    .await
    .unwrap();

  let records = Records::new(Arc::new(s));
  let loaded: Vec<User> = records.load(Collection::Users).await.unwrap();
  assert!(loaded.is_empty());
}

#[tokio::test]
async fn file_store_survives_reopen() {
  let path = std::env::temp_dir()
    .join(format!("mentorly-{}.sqlite3", Uuid::new_v4()));

  {
    let s = SqliteStore::open(&path).await.unwrap();
    let raw = serde_json::to_string(&vec![user("grace", Role::Admin)]).unwrap();
    s.set(Collection::Users.into(), raw).await.unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  let raw = s.get(Collection::Users.into()).await.unwrap().unwrap();
  let users: Vec<User> = serde_json::from_str(&raw).unwrap();
  assert_eq!(users.len(), 1);
  assert_eq!(users[0].name, "grace");

  drop(s);
  let _ = std::fs::remove_file(&path);
}
