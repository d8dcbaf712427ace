//! The assembled Mentorly portal.
//!
//! [`Portal`] wires a record store, the data-access [`Api`], the signed-in
//! [`Session`] and the per-view role gate together from a [`PortalConfig`].
//! Presentation is the caller's responsibility: it asks [`Portal::authorize`]
//! before rendering a view and redirects on anything but
//! [`Access::Permitted`].

pub mod config;
pub mod error;
pub mod session;
pub mod views;

pub use config::{LatencyConfig, PortalConfig};
pub use error::{AuthError, Error, Result};
pub use session::Session;
pub use views::View;

use std::sync::Arc;

use mentorly_api::Api;
use mentorly_core::{
  access::{self, Access},
  store::KeyValueStore,
};
use mentorly_store_sqlite::SqliteStore;

// ─── Portal ──────────────────────────────────────────────────────────────────

pub struct Portal<S> {
  api:     Api<S>,
  session: Session<S>,
  config:  Arc<PortalConfig>,
}

impl<S> Clone for Portal<S> {
  fn clone(&self) -> Self {
    Self {
      api:     self.api.clone(),
      session: self.session.clone(),
      config:  self.config.clone(),
    }
  }
}

impl Portal<SqliteStore> {
  /// Open the SQLite store named by `config` and start the portal.
  pub async fn open(config: PortalConfig) -> Result<Self> {
    let store = if config.is_in_memory() {
      SqliteStore::open_in_memory().await?
    } else {
      SqliteStore::open(&config.store_path).await?
    };
    tracing::info!(store_path = ?config.store_path, "record store opened");
    Self::with_store(Arc::new(store), config).await
  }
}

impl<S: KeyValueStore> Portal<S> {
  /// Start the portal over an existing store: seed first-run data, then
  /// restore any persisted session.
  pub async fn with_store(store: Arc<S>, config: PortalConfig) -> Result<Self> {
    let api = Api::new(store).with_latency(config.latency.api());

    api.seed_defaults().await?;
    if config.seed_demo_data {
      api.seed_demo_data().await?;
    }

    let session = Session::new(api.clone(), config.latency.auth());
    session.restore().await?;

    Ok(Self { api, session, config: Arc::new(config) })
  }

  pub fn api(&self) -> &Api<S> { &self.api }

  pub fn session(&self) -> &Session<S> { &self.session }

  pub fn config(&self) -> &PortalConfig { &self.config }

  /// Gate `view` against the current session.
  pub async fn authorize(&self, view: View) -> Access {
    let state = self.session.state().await;
    let access = access::check(&state, view.required_roles());
    tracing::debug!(?view, ?access, "view gated");
    access
  }
}

#[cfg(test)]
mod tests;
