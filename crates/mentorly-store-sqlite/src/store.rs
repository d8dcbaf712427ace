//! [`SqliteStore`]: the SQLite implementation of [`KeyValueStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use mentorly_core::store::{KeyValueStore, StoreKey};

use crate::{Result, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Mentorly record store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    tracing::debug!(?path, "opening sqlite store");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── KeyValueStore impl ──────────────────────────────────────────────────────

impl KeyValueStore for SqliteStore {
  type Error = crate::Error;

  async fn get(&self, key: StoreKey) -> Result<Option<String>> {
    let key_str = key.as_str();

    let value: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT value FROM entries WHERE key = ?1",
            rusqlite::params![key_str],
            |row| row.get(0),
          )
          .optional()?)
      })
      .await?;

    Ok(value)
  }

  async fn set(&self, key: StoreKey, value: String) -> Result<()> {
    let key_str = key.as_str();
    let at_str  = Utc::now().to_rfc3339();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO entries (key, value, updated_at) VALUES (?1, ?2, ?3)
           ON CONFLICT (key) DO UPDATE
             SET value = excluded.value, updated_at = excluded.updated_at",
          rusqlite::params![key_str, value, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(())
  }

  async fn remove(&self, key: StoreKey) -> Result<()> {
    let key_str = key.as_str();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM entries WHERE key = ?1",
          rusqlite::params![key_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(())
  }
}
