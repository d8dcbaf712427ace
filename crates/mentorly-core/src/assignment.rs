//! Mentor-student pairings.
//!
//! A student has at most one assignment record. Re-assigning or removing a
//! mentor supersedes the previous record rather than editing it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorAssignment {
  pub assignment_id: Uuid,
  pub student_id:    Uuid,
  /// `None` records that the student removed their mentor.
  pub mentor_id:     Option<Uuid>,
  pub assigned_date: NaiveDate,
}

impl MentorAssignment {
  pub fn is_assigned(&self) -> bool { self.mentor_id.is_some() }
}
