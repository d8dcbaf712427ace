//! User operations.

use mentorly_core::{
  store::{Collection, KeyValueStore},
  user::{NewUser, Role, User},
};
use uuid::Uuid;

use crate::{Api, ApiResponse, Result, credentials::hash_secret};

impl<S: KeyValueStore> Api<S> {
  /// All users.
  pub async fn get_users(&self) -> Result<ApiResponse<Vec<User>>> {
    self.pause(self.latency.list).await;
    let users: Vec<User> = self.records.load(Collection::Users).await?;
    tracing::debug!(count = users.len(), "loaded users");
    Ok(ApiResponse::ok(users))
  }

  pub async fn get_user_by_id(&self, id: Uuid) -> Result<ApiResponse<User>> {
    self.pause(self.latency.lookup).await;
    let users: Vec<User> = self.records.load(Collection::Users).await?;
    let user = users.into_iter().find(|u| u.user_id == id);
    Ok(ApiResponse::found(user, "User not found"))
  }

  pub async fn get_users_by_role(&self, role: Role) -> Result<ApiResponse<Vec<User>>> {
    self.pause(self.latency.lookup).await;
    let mut users: Vec<User> = self.records.load(Collection::Users).await?;
    users.retain(|u| u.role == role);
    tracing::debug!(%role, count = users.len(), "loaded users by role");
    Ok(ApiResponse::ok(users))
  }

  /// Admin "add user" flow: creates the user and their credential without
  /// signing anyone in. A taken email is a reported failure.
  pub async fn create_user(&self, input: NewUser) -> Result<ApiResponse<User>> {
    self
      .detached(move |api| async move {
        api.pause(api.latency.write).await;
        Ok(match api.insert_user(input).await? {
          Some(user) => ApiResponse::ok_with(user, "User created successfully"),
          None => ApiResponse::failure("Email already in use"),
        })
      })
      .await
  }

  // ── Latency-free helpers shared with the session layer ──────────────────

  /// Case-insensitive lookup by email.
  pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
    let users: Vec<User> = self.records.load(Collection::Users).await?;
    Ok(users.into_iter().find(|u| u.email.eq_ignore_ascii_case(email.trim())))
  }

  /// Persist a new user plus credential. Returns `None` if the email is
  /// already registered; nothing is written in that case.
  ///
  /// The secret is hashed before anything is stored, and a failed credential
  /// write removes the user again, so an account never exists without a
  /// credential.
  pub async fn insert_user(&self, input: NewUser) -> Result<Option<User>> {
    let phc = hash_secret(&input.secret)?;
    let email = input.email.trim().to_owned();
    let user = User {
      user_id: Uuid::new_v4(),
      name:    input.name,
      email:   email.clone(),
      role:    input.role,
    };

    let inserted = self
      .records
      .update(Collection::Users, |users: &mut Vec<User>| {
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(&email)) {
          return None;
        }
        users.push(user.clone());
        Some(())
      })
      .await?;

    if inserted.is_none() {
      tracing::debug!(%email, "email already registered");
      return Ok(None);
    }

    if let Err(error) = self.put_credential(&email, phc).await {
      tracing::warn!(%email, %error, "credential write failed; removing user");
      let user_id = user.user_id;
      self
        .records
        .update(Collection::Users, |users: &mut Vec<User>| {
          let before = users.len();
          users.retain(|u| u.user_id != user_id);
          (users.len() != before).then_some(())
        })
        .await?;
      return Err(error);
    }

    tracing::info!(user_id = %user.user_id, role = %user.role, "user created");
    Ok(Some(user))
  }
}
