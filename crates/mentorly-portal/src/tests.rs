//! End-to-end tests for sign-in, registration and the view gate.

use std::{sync::Arc, time::Duration};

use mentorly_api::seed::DEFAULT_SECRET;
use mentorly_core::{
  access::Access,
  store::{KeyValueStore, MemoryStore, StoreKey},
  user::{Role, User},
};

use crate::{AuthError, Portal, PortalConfig, View};

async fn portal() -> Portal<MemoryStore> {
  portal_over(Arc::new(MemoryStore::new())).await
}

async fn portal_over(store: Arc<MemoryStore>) -> Portal<MemoryStore> {
  Portal::with_store(store, PortalConfig::in_memory())
    .await
    .expect("portal")
}

// ─── Sign-in ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn seeded_admin_can_sign_in() {
  let p = portal().await;
  let user = p
    .session()
    .login("admin@example.com", DEFAULT_SECRET)
    .await
    .unwrap();
  assert_eq!(user.role, Role::Admin);

  let state = p.session().state().await;
  assert!(!state.loading);
  assert_eq!(state.role(), Some(Role::Admin));
}

#[tokio::test]
async fn wrong_secret_leaves_prior_session_unchanged() {
  let p = portal().await;
  let mentor = p
    .session()
    .login("mentor@example.com", DEFAULT_SECRET)
    .await
    .unwrap();

  let err = p
    .session()
    .login("admin@example.com", "not-the-password")
    .await
    .unwrap_err();
  assert!(matches!(err, AuthError::InvalidCredentials));

  assert_eq!(p.session().current_user().await, Some(mentor.clone()));
  let stored: Option<User> = p
    .api()
    .records()
    .get_value(StoreKey::Session)
    .await
    .unwrap();
  assert_eq!(stored, Some(mentor));
}

#[tokio::test]
async fn unknown_email_is_invalid_credentials() {
  let p = portal().await;
  let err = p
    .session()
    .login("nobody@example.com", DEFAULT_SECRET)
    .await
    .unwrap_err();
  assert!(matches!(err, AuthError::InvalidCredentials));
  assert!(!p.session().is_authenticated().await);
}

// ─── Registration ────────────────────────────────────────────────────────────

#[tokio::test]
async fn register_signs_in_the_new_user() {
  let p = portal().await;
  let user = p
    .session()
    .register("Ada", "ada@example.com", "s3cret", Role::Mentor)
    .await
    .unwrap();
  assert_eq!(p.session().current_user().await, Some(user.clone()));

  // The new credential works after signing out.
  p.session().logout().await;
  let again = p.session().login("ada@example.com", "s3cret").await.unwrap();
  assert_eq!(again, user);
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
  let p = portal().await;
  p.session()
    .register("Ada", "ada@example.com", "one", Role::Student)
    .await
    .unwrap();

  let err = p
    .session()
    .register("Ada Again", "ada@example.com", "two", Role::Admin)
    .await
    .unwrap_err();
  assert!(matches!(err, AuthError::EmailInUse(ref e) if e == "ada@example.com"));

  let users = p.api().get_users().await.unwrap().into_data().unwrap();
  let adas = users.iter().filter(|u| u.email == "ada@example.com").count();
  assert_eq!(adas, 1);

  // The original secret is untouched.
  assert!(p.session().login("ada@example.com", "one").await.is_ok());
}

#[tokio::test]
async fn registering_a_seeded_email_is_rejected() {
  let p = portal().await;
  let err = p
    .session()
    .register("Fake Admin", "admin@example.com", "x", Role::Admin)
    .await
    .unwrap_err();
  assert!(matches!(err, AuthError::EmailInUse(_)));
}

// ─── Logout and restore ──────────────────────────────────────────────────────

#[tokio::test]
async fn logout_clears_session_and_always_succeeds() {
  let p = portal().await;
  p.session().logout().await;
  assert!(!p.session().is_authenticated().await);

  p.session()
    .login("student@example.com", DEFAULT_SECRET)
    .await
    .unwrap();
  p.session().logout().await;
  assert!(!p.session().is_authenticated().await);
  assert!(
    p.api()
      .records()
      .store()
      .get(StoreKey::Session)
      .await
      .unwrap()
      .is_none()
  );
}

#[tokio::test]
async fn session_survives_restart() {
  let store = Arc::new(MemoryStore::new());
  let first = portal_over(store.clone()).await;
  let user = first
    .session()
    .login("student@example.com", DEFAULT_SECRET)
    .await
    .unwrap();

  let second = portal_over(store).await;
  assert_eq!(second.session().current_user().await, Some(user));
  assert!(!second.session().state().await.loading);
}

#[tokio::test]
async fn malformed_session_is_discarded() {
  let _ = tracing_subscriber::fmt().with_test_writer().try_init();
  let store = Arc::new(MemoryStore::new());
  store
    .set(StoreKey::Session, "{\"userId\": 42".into())
    .await
    .unwrap();

  let p = portal_over(store.clone()).await;
  let state = p.session().state().await;
  assert!(state.user.is_none());
  assert!(!state.loading);
  assert!(store.get(StoreKey::Session).await.unwrap().is_none());
}

#[tokio::test]
async fn fresh_session_is_loading_until_restored() {
  let p = portal().await;
  let fresh = crate::Session::new(p.api().clone(), Duration::ZERO);
  assert!(fresh.state().await.loading);
  fresh.restore().await.unwrap();
  assert!(!fresh.state().await.loading);
}

#[tokio::test(start_paused = true)]
async fn login_reports_loading_while_in_flight() {
  let store = Arc::new(MemoryStore::new());
  let mut config = PortalConfig::in_memory();
  config.latency.auth_ms = 1000;
  let p = Portal::with_store(store, config).await.unwrap();

  let session = p.session().clone();
  let login = tokio::spawn(async move {
    session.login("admin@example.com", DEFAULT_SECRET).await
  });

  tokio::time::sleep(Duration::from_millis(10)).await;
  assert_eq!(p.authorize(View::Users).await, Access::Pending);

  login.await.unwrap().unwrap();
  assert_eq!(p.authorize(View::Users).await, Access::Permitted);
}

async fn slow_portal() -> Portal<MemoryStore> {
  let mut config = PortalConfig::in_memory();
  config.latency.auth_ms = 1000;
  Portal::with_store(Arc::new(MemoryStore::new()), config)
    .await
    .expect("portal")
}

#[tokio::test(start_paused = true)]
async fn abandoned_login_still_completes() {
  let p = slow_portal().await;
  let waited = tokio::time::timeout(
    Duration::from_millis(100),
    p.session().login("admin@example.com", DEFAULT_SECRET),
  )
  .await;
  assert!(waited.is_err());

  tokio::time::sleep(Duration::from_secs(5)).await;
  let state = p.session().state().await;
  assert!(!state.loading);
  assert_eq!(state.role(), Some(Role::Admin));
  assert_eq!(p.authorize(View::Dashboard).await, Access::Permitted);
}

#[tokio::test(start_paused = true)]
async fn abandoned_failed_login_clears_loading() {
  let p = slow_portal().await;
  let waited = tokio::time::timeout(
    Duration::from_millis(100),
    p.session().login("admin@example.com", "wrong"),
  )
  .await;
  assert!(waited.is_err());

  tokio::time::sleep(Duration::from_secs(5)).await;
  assert_eq!(p.authorize(View::Dashboard).await, Access::Unauthenticated);
}

#[tokio::test(start_paused = true)]
async fn abandoned_registration_still_creates_account() {
  let p = slow_portal().await;
  let waited = tokio::time::timeout(
    Duration::from_millis(100),
    p.session().register("Ada", "ada@example.com", "s3cret", Role::Student),
  )
  .await;
  assert!(waited.is_err());

  tokio::time::sleep(Duration::from_secs(5)).await;
  let user = p.session().current_user().await.expect("signed in");
  assert_eq!(user.email, "ada@example.com");
  assert!(p.api().find_user_by_email("ada@example.com").await.unwrap().is_some());
}

// ─── Gate ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn gate_without_session_is_unauthenticated() {
  let p = portal().await;
  let access = p.authorize(View::Users).await;
  assert_eq!(access, Access::Unauthenticated);
  assert_eq!(access.redirect(), Some("/login"));
}

#[tokio::test]
async fn gate_forbids_student_from_mentor_views() {
  let p = portal().await;
  p.session()
    .login("student@example.com", DEFAULT_SECRET)
    .await
    .unwrap();
  assert_eq!(p.authorize(View::SessionNotes).await, Access::Forbidden);
  assert_eq!(p.authorize(View::Mentees).await, Access::Forbidden);
  assert_eq!(p.authorize(View::Users).await, Access::Forbidden);
  assert_eq!(p.authorize(View::ChooseMentor).await, Access::Permitted);
}

#[tokio::test]
async fn gate_permits_mentor_on_shared_views() {
  let p = portal().await;
  p.session()
    .login("mentor@example.com", DEFAULT_SECRET)
    .await
    .unwrap();
  assert_eq!(p.authorize(View::Meetings).await, Access::Permitted);
  assert_eq!(p.authorize(View::Notifications).await, Access::Permitted);
  assert_eq!(p.authorize(View::Dashboard).await, Access::Permitted);
  assert_eq!(p.authorize(View::MyMentor).await, Access::Forbidden);
}

// ─── Full flow over SQLite ───────────────────────────────────────────────────

#[tokio::test]
async fn student_picks_mentor_over_sqlite() {
  let mut config = PortalConfig::in_memory();
  config.seed_demo_data = true;
  let p = Portal::open(config).await.unwrap();

  let student = p
    .session()
    .login("emily@example.com", DEFAULT_SECRET)
    .await
    .unwrap();
  let mentors = p
    .api()
    .get_users_by_role(Role::Mentor)
    .await
    .unwrap()
    .into_data()
    .unwrap();
  let robert = mentors.iter().find(|m| m.name == "Robert Wilson").unwrap();

  let res = p
    .api()
    .create_mentor_assignment(student.user_id, robert.user_id)
    .await
    .unwrap();
  assert!(res.success);

  let current = p
    .api()
    .get_assignment_for_student(student.user_id)
    .await
    .unwrap()
    .into_data()
    .unwrap();
  assert_eq!(current.mentor_id, Some(robert.user_id));

  let unseen = p.api().get_unseen_count(student.user_id).await.unwrap();
  assert!(unseen.data.unwrap() >= 1);
}
