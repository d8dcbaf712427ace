//! Notification operations.

use chrono::Utc;
use mentorly_core::{
  notification::{NewNotification, Notification},
  store::{Collection, KeyValueStore},
};
use uuid::Uuid;

use crate::{Api, ApiResponse, Result};

impl<S: KeyValueStore> Api<S> {
  /// Every notification addressed to `user_id`, in creation order.
  pub async fn get_notifications_for_user(
    &self,
    user_id: Uuid,
  ) -> Result<ApiResponse<Vec<Notification>>> {
    self.pause(self.latency.list).await;
    let mut all: Vec<Notification> =
      self.records.load(Collection::Notifications).await?;
    all.retain(|n| n.user_id == user_id);
    Ok(ApiResponse::ok(all))
  }

  /// Number of unseen notifications for `user_id`.
  pub async fn get_unseen_count(&self, user_id: Uuid) -> Result<ApiResponse<usize>> {
    self.pause(self.latency.lookup).await;
    let all: Vec<Notification> = self.records.load(Collection::Notifications).await?;
    let count = all.iter().filter(|n| n.user_id == user_id && !n.seen).count();
    Ok(ApiResponse::ok(count))
  }

  pub async fn create_notification(
    &self,
    input: NewNotification,
  ) -> Result<ApiResponse<Notification>> {
    self
      .detached(move |api| async move {
        api.pause(api.latency.list).await;
        let notification = api.push_notification(input).await?;
        Ok(ApiResponse::ok_with(notification, "Notification created successfully"))
      })
      .await
  }

  /// Flip `seen` to true. Marking an already-seen notification succeeds
  /// without further change.
  pub async fn mark_notification_seen(
    &self,
    id: Uuid,
  ) -> Result<ApiResponse<Notification>> {
    self
      .detached(move |api| async move {
        api.pause(api.latency.lookup).await;
        let updated = api
          .records
          .update(Collection::Notifications, |all: &mut Vec<Notification>| {
            all.iter_mut().find(|n| n.notification_id == id).map(|n| {
              n.seen = true;
              n.clone()
            })
          })
          .await?;

        Ok(match updated {
          Some(n) => ApiResponse::ok_with(n, "Notification marked as seen"),
          None => ApiResponse::failure("Notification not found"),
        })
      })
      .await
  }

  /// Append a notification without the artificial delay; used by operations
  /// that notify as a side effect.
  pub(crate) async fn push_notification(
    &self,
    input: NewNotification,
  ) -> Result<Notification> {
    let notification = Notification {
      notification_id: Uuid::new_v4(),
      user_id:         input.user_id,
      title:           input.title,
      message:         input.message,
      seen:            false,
      created_at:      Utc::now(),
      kind:            input.kind,
    };
    let stored = notification.clone();
    self
      .records
      .update(Collection::Notifications, move |all: &mut Vec<Notification>| {
        all.push(stored);
        Some(())
      })
      .await?;
    tracing::debug!(
      notification_id = %notification.notification_id,
      user_id = %notification.user_id,
      "notification created"
    );
    Ok(notification)
  }
}
