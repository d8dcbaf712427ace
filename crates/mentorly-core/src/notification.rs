//! In-portal notifications.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What produced a notification. Persisted as a plain string; unrecognised
/// strings survive as [`NotificationKind::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NotificationKind {
  /// Free-form message a mentor sent to a mentee.
  MentorMessage,
  Assignment,
  MeetingReminder,
  SessionNotes,
  Custom(String),
}

impl NotificationKind {
  pub fn as_str(&self) -> &str {
    match self {
      Self::MentorMessage => "mentor_message",
      Self::Assignment => "assignment",
      Self::MeetingReminder => "meeting_reminder",
      Self::SessionNotes => "session_notes",
      Self::Custom(s) => s,
    }
  }
}

impl From<String> for NotificationKind {
  fn from(s: String) -> Self {
    match s.as_str() {
      "mentor_message" => Self::MentorMessage,
      "assignment" => Self::Assignment,
      "meeting_reminder" => Self::MeetingReminder,
      "session_notes" => Self::SessionNotes,
      _ => Self::Custom(s),
    }
  }
}

impl From<NotificationKind> for String {
  fn from(k: NotificationKind) -> Self {
    match k {
      NotificationKind::Custom(s) => s,
      other => other.as_str().to_owned(),
    }
  }
}

impl fmt::Display for NotificationKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A message addressed to one user. The only mutation is `seen` flipping
/// from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
  pub notification_id: Uuid,
  /// Recipient.
  pub user_id:         Uuid,
  pub title:           String,
  pub message:         String,
  pub seen:            bool,
  pub created_at:      DateTime<Utc>,
  #[serde(rename = "type")]
  pub kind:            Option<NotificationKind>,
}

/// Input to [`Notification`] creation; new notifications always start unseen.
#[derive(Debug, Clone)]
pub struct NewNotification {
  pub user_id: Uuid,
  pub title:   String,
  pub message: String,
  pub kind:    Option<NotificationKind>,
}

impl NewNotification {
  pub fn new(
    user_id: Uuid,
    title: impl Into<String>,
    message: impl Into<String>,
  ) -> Self {
    Self { user_id, title: title.into(), message: message.into(), kind: None }
  }

  pub fn with_kind(mut self, kind: NotificationKind) -> Self {
    self.kind = Some(kind);
    self
  }
}
