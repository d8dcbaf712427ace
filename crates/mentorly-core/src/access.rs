//! The role gate: decides whether the current session may open a view.

use serde::{Deserialize, Serialize};

use crate::user::{Role, User};

/// Snapshot of the authentication state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
  pub user:    Option<User>,
  /// True while a persisted session is being restored or a sign-in is in
  /// flight.
  pub loading: bool,
}

impl SessionState {
  /// The state at process start, before the stored session has been read.
  pub fn restoring() -> Self { Self { user: None, loading: true } }

  pub fn signed_in(user: User) -> Self { Self { user: Some(user), loading: false } }

  pub fn is_authenticated(&self) -> bool { self.user.is_some() }

  pub fn role(&self) -> Option<Role> { self.user.as_ref().map(|u| u.role) }
}

/// Outcome of [`check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
  /// The session is still resolving; no decision yet.
  Pending,
  Permitted,
  /// No one is signed in.
  Unauthenticated,
  /// Signed in, but the role is not allowed.
  Forbidden,
}

impl Access {
  /// Where a caller should navigate instead of rendering the view.
  pub fn redirect(self) -> Option<&'static str> {
    match self {
      Self::Pending | Self::Permitted => None,
      Self::Unauthenticated => Some("/login"),
      Self::Forbidden => Some("/unauthorized"),
    }
  }
}

/// Decide access to a view requiring one of `required` roles. `None` admits
/// any signed-in user; an empty slice admits no one.
pub fn check(state: &SessionState, required: Option<&[Role]>) -> Access {
  if state.loading {
    return Access::Pending;
  }
  let Some(user) = &state.user else {
    return Access::Unauthenticated;
  };
  match required {
    Some(roles) if !roles.contains(&user.role) => Access::Forbidden,
    _ => Access::Permitted,
  }
}
