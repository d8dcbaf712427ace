//! Meetings and the session notes (meeting logs) recorded for them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

// ─── Meeting ─────────────────────────────────────────────────────────────────

/// Lifecycle of a meeting. Any status may move to any other; no transition
/// table is enforced.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MeetingStatus {
  Scheduled,
  Completed,
  Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
  pub meeting_id:   Uuid,
  pub mentor_id:    Uuid,
  pub student_id:   Uuid,
  pub title:        String,
  pub meeting_time: DateTime<Utc>,
  pub agenda:       String,
  pub status:       MeetingStatus,
  pub location:     Option<String>,
}

impl Meeting {
  /// Whether `user_id` is either party of the meeting.
  pub fn involves(&self, user_id: Uuid) -> bool {
    self.mentor_id == user_id || self.student_id == user_id
  }
}

/// Input to [`Meeting`] creation; the identifier is assigned by the API.
#[derive(Debug, Clone)]
pub struct NewMeeting {
  pub mentor_id:    Uuid,
  pub student_id:   Uuid,
  pub title:        String,
  pub meeting_time: DateTime<Utc>,
  pub agenda:       String,
  pub status:       MeetingStatus,
  pub location:     Option<String>,
}

impl NewMeeting {
  /// A scheduled meeting with no location.
  pub fn scheduled(
    mentor_id: Uuid,
    student_id: Uuid,
    title: impl Into<String>,
    meeting_time: DateTime<Utc>,
    agenda: impl Into<String>,
  ) -> Self {
    Self {
      mentor_id,
      student_id,
      title: title.into(),
      meeting_time,
      agenda: agenda.into(),
      status: MeetingStatus::Scheduled,
      location: None,
    }
  }
}

// ─── Rating ──────────────────────────────────────────────────────────────────

/// A session rating on a 1–5 scale.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
  pub const MIN: u8 = 1;
  pub const MAX: u8 = 5;

  pub fn get(self) -> u8 { self.0 }
}

impl TryFrom<u8> for Rating {
  type Error = Error;

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    if (Self::MIN..=Self::MAX).contains(&value) {
      Ok(Self(value))
    } else {
      Err(Error::InvalidRating(value))
    }
  }
}

impl From<Rating> for u8 {
  fn from(r: Rating) -> Self { r.0 }
}

// ─── MeetingLog ──────────────────────────────────────────────────────────────

/// Notes a mentor records for one meeting. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingLog {
  pub log_id:        Uuid,
  pub meeting_id:    Uuid,
  /// Copied from the meeting when the log is written.
  pub meeting_title: String,
  pub mentor_id:     Uuid,
  pub student_id:    Uuid,
  pub topic:         String,
  pub notes:         String,
  pub action_items:  String,
  pub completed:     bool,
  pub rating:        Option<Rating>,
  pub feedback:      Option<String>,
  pub created_at:    DateTime<Utc>,
}

/// Input to [`MeetingLog`] creation. `meeting_title` and `created_at` are
/// filled in by the API.
#[derive(Debug, Clone)]
pub struct NewMeetingLog {
  pub meeting_id:   Uuid,
  pub mentor_id:    Uuid,
  pub student_id:   Uuid,
  pub topic:        String,
  pub notes:        String,
  pub action_items: String,
  pub completed:    bool,
  pub rating:       Option<Rating>,
  pub feedback:     Option<String>,
}
