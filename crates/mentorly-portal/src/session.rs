//! The signed-in session: who is using the portal right now.
//!
//! The active user is persisted under [`StoreKey::Session`] so it survives a
//! restart. Restoring never fails on bad data; a corrupt record is cleared
//! and treated as signed out.

use std::{sync::Arc, time::Duration};

use mentorly_api::Api;
use mentorly_core::{
  access::SessionState,
  store::{KeyValueStore, StoreKey},
  user::{NewUser, Role, User},
};
use tokio::sync::RwLock;

use crate::error::AuthError;

/// Shared handle to the session. Cloning is cheap; clones observe the same
/// state.
pub struct Session<S> {
  api:   Api<S>,
  state: Arc<RwLock<SessionState>>,
  /// Artificial delay before sign-in and registration.
  delay: Duration,
}

impl<S> Clone for Session<S> {
  fn clone(&self) -> Self {
    Self { api: self.api.clone(), state: self.state.clone(), delay: self.delay }
  }
}

impl<S: KeyValueStore> Session<S> {
  /// A session that has not yet been restored; [`Self::state`] reports
  /// `loading` until [`Self::restore`] completes.
  pub fn new(api: Api<S>, delay: Duration) -> Self {
    Self {
      api,
      state: Arc::new(RwLock::new(SessionState::restoring())),
      delay,
    }
  }

  pub async fn state(&self) -> SessionState { self.state.read().await.clone() }

  pub async fn current_user(&self) -> Option<User> {
    self.state.read().await.user.clone()
  }

  pub async fn is_authenticated(&self) -> bool {
    self.state.read().await.is_authenticated()
  }

  /// Load the persisted session, if any.
  pub async fn restore(&self) -> Result<Option<User>, AuthError> {
    self.detached(|session| async move { session.try_restore().await }).await
  }

  /// Sign in. On any failure the current session is left as it was.
  pub async fn login(&self, email: &str, secret: &str) -> Result<User, AuthError> {
    let (email, secret) = (email.to_owned(), secret.to_owned());
    self
      .detached(move |session| async move {
        session.begin().await;
        let outcome = session.try_login(&email, &secret).await;
        session.finish(outcome.as_ref().ok()).await;

        if let Err(AuthError::InvalidCredentials) = &outcome {
          tracing::warn!(%email, "rejected sign-in");
        }
        outcome
      })
      .await
  }

  /// Create an account and sign straight into it.
  pub async fn register(
    &self,
    name: &str,
    email: &str,
    secret: &str,
    role: Role,
  ) -> Result<User, AuthError> {
    let (name, email, secret) = (name.to_owned(), email.to_owned(), secret.to_owned());
    self
      .detached(move |session| async move {
        session.begin().await;
        let outcome = session.try_register(&name, &email, &secret, role).await;
        session.finish(outcome.as_ref().ok()).await;
        outcome
      })
      .await
  }

  /// Sign out. Always succeeds; a backend failure to clear the stored
  /// session is logged and the in-memory state is cleared regardless.
  pub async fn logout(&self) {
    let outcome = self
      .detached(|session| async move {
        session.clear().await;
        Ok(())
      })
      .await;
    if let Err(error) = outcome {
      tracing::warn!(%error, "sign-out task failed");
      self.clear_state().await;
    }
  }

  // ── Internals ───────────────────────────────────────────────────────────

  /// Run `op` on its own task so that once started it always completes, and
  /// `loading` is always cleared, even if the caller stops waiting.
  async fn detached<T, F, Fut>(&self, op: F) -> Result<T, AuthError>
  where
    F: FnOnce(Self) -> Fut,
    Fut: Future<Output = Result<T, AuthError>> + Send + 'static,
    T: Send + 'static,
  {
    tokio::spawn(op(self.clone())).await?
  }

  async fn try_restore(&self) -> Result<Option<User>, AuthError> {
    self.state.write().await.loading = true;

    let records = self.api.records();
    let restored = match records.get_value::<User>(StoreKey::Session).await {
      Ok(user) => user,
      Err(e) => {
        self.state.write().await.loading = false;
        return Err(e.into());
      }
    };
    if restored.is_none() {
      // Absent or unreadable; either way nothing should linger.
      if let Err(error) = records.remove(StoreKey::Session).await {
        tracing::warn!(%error, "failed to clear unreadable session");
      }
    }

    let mut state = self.state.write().await;
    state.user = restored.clone();
    state.loading = false;
    match &restored {
      Some(user) => tracing::info!(user_id = %user.user_id, "session restored"),
      None => tracing::debug!("no session to restore"),
    }
    Ok(restored)
  }

  async fn clear(&self) {
    if let Err(error) = self.api.records().remove(StoreKey::Session).await {
      tracing::warn!(%error, "failed to clear stored session");
    }
    self.clear_state().await;
  }

  async fn clear_state(&self) {
    let mut state = self.state.write().await;
    if let Some(user) = state.user.take() {
      tracing::info!(user_id = %user.user_id, "signed out");
    }
    state.loading = false;
  }

  async fn try_login(&self, email: &str, secret: &str) -> Result<User, AuthError> {
    self.pause().await;
    let user = self
      .api
      .verify_credentials(email, secret)
      .await?
      .ok_or(AuthError::InvalidCredentials)?;
    self.persist(&user).await?;
    tracing::info!(user_id = %user.user_id, role = %user.role, "signed in");
    Ok(user)
  }

  async fn try_register(
    &self,
    name: &str,
    email: &str,
    secret: &str,
    role: Role,
  ) -> Result<User, AuthError> {
    self.pause().await;
    if self.api.find_user_by_email(email).await?.is_some() {
      return Err(AuthError::EmailInUse(email.to_owned()));
    }
    let user = self
      .api
      .insert_user(NewUser::new(name, email, secret, role))
      .await?
      .ok_or_else(|| AuthError::EmailInUse(email.to_owned()))?;
    self.persist(&user).await?;
    tracing::info!(user_id = %user.user_id, %role, "registered and signed in");
    Ok(user)
  }

  async fn persist(&self, user: &User) -> Result<(), AuthError> {
    self.api.records().set_value(StoreKey::Session, user).await?;
    Ok(())
  }

  async fn begin(&self) { self.state.write().await.loading = true; }

  /// Clear `loading` and, on success, switch to `user`.
  async fn finish(&self, user: Option<&User>) {
    let mut state = self.state.write().await;
    if let Some(user) = user {
      state.user = Some(user.clone());
    }
    state.loading = false;
  }

  async fn pause(&self) {
    if !self.delay.is_zero() {
      tokio::time::sleep(self.delay).await;
    }
  }
}
