//! Credential hashing and verification.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use mentorly_core::{
  store::{Collection, KeyValueStore},
  user::{Credential, User},
};
use rand_core::OsRng;

use crate::{Api, Error, Result};

/// Hash `secret` into an argon2 PHC string.
pub fn hash_secret(secret: &str) -> Result<String> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(secret.as_bytes(), &salt)
    .map(|h| h.to_string())
    .map_err(|e| Error::PasswordHash(e.to_string()))
}

/// Check `secret` against a stored PHC string. An unparsable hash never
/// matches.
pub fn verify_secret(secret: &str, phc: &str) -> bool {
  let Ok(parsed) = PasswordHash::new(phc) else {
    return false;
  };
  Argon2::default()
    .verify_password(secret.as_bytes(), &parsed)
    .is_ok()
}

impl<S: KeyValueStore> Api<S> {
  /// Resolve `email`/`secret` to a user. `None` when the user, their
  /// credential, or the secret check misses; callers must not distinguish
  /// between those cases.
  pub async fn verify_credentials(
    &self,
    email: &str,
    secret: &str,
  ) -> Result<Option<User>> {
    let Some(user) = self.find_user_by_email(email).await? else {
      return Ok(None);
    };

    let credentials: Vec<Credential> =
      self.records.load(Collection::Credentials).await?;
    let matched = credentials
      .iter()
      .find(|c| c.email.eq_ignore_ascii_case(&user.email))
      .is_some_and(|c| verify_secret(secret, &c.secret));

    Ok(matched.then_some(user))
  }

  /// Store an already-hashed credential for `email`, replacing any earlier
  /// one.
  pub(crate) async fn put_credential(&self, email: &str, phc: String) -> Result<()> {
    let credential = Credential { email: email.to_owned(), secret: phc };
    self
      .records
      .update(Collection::Credentials, |all: &mut Vec<Credential>| {
        all.retain(|c| !c.email.eq_ignore_ascii_case(&credential.email));
        all.push(credential);
        Some(())
      })
      .await?;
    Ok(())
  }
}
