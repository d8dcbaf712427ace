//! Users, roles and credentials.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The closed set of portal roles. Adding a role is a compile-time change:
/// every `match` over it must be revisited.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
  strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
  Admin,
  Mentor,
  Student,
}

impl Role {
  pub const ALL: [Role; 3] = [Role::Admin, Role::Mentor, Role::Student];
}

/// A portal account. Email uniqueness is enforced by the registration paths,
/// not by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub user_id: Uuid,
  pub name:    String,
  pub email:   String,
  pub role:    Role,
}

/// The login secret for one user email.
///
/// `secret` is an argon2 PHC string; plaintext never reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
  pub email:  String,
  pub secret: String,
}

/// Input to user creation. `user_id` is always assigned by the API.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub name:   String,
  pub email:  String,
  /// Plaintext; hashed before it is persisted.
  pub secret: String,
  pub role:   Role,
}

impl NewUser {
  pub fn new(
    name: impl Into<String>,
    email: impl Into<String>,
    secret: impl Into<String>,
    role: Role,
  ) -> Self {
    Self {
      name: name.into(),
      email: email.into(),
      secret: secret.into(),
      role,
    }
  }
}
