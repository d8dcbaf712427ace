//! Mentor assignment operations.
//!
//! A student has at most one assignment record. Every change (a new mentor
//! or removing the current one) drops the student's previous record and
//! appends a fresh one, so `assigned_date` always reflects the latest change.

use chrono::Utc;
use mentorly_core::{
  assignment::MentorAssignment,
  notification::{NewNotification, NotificationKind},
  store::{Collection, KeyValueStore},
  user::{Role, User},
};
use uuid::Uuid;

use crate::{Api, ApiResponse, Result};

impl<S: KeyValueStore> Api<S> {
  /// Every assignment record, including "unassigned" ones.
  pub async fn get_mentor_assignments(
    &self,
  ) -> Result<ApiResponse<Vec<MentorAssignment>>> {
    self.pause(self.latency.list).await;
    let all: Vec<MentorAssignment> =
      self.records.load(Collection::MentorAssignments).await?;
    Ok(ApiResponse::ok(all))
  }

  /// The mentees currently assigned to `mentor_id`.
  pub async fn get_assignments_for_mentor(
    &self,
    mentor_id: Uuid,
  ) -> Result<ApiResponse<Vec<MentorAssignment>>> {
    self.pause(self.latency.lookup).await;
    let mut all: Vec<MentorAssignment> =
      self.records.load(Collection::MentorAssignments).await?;
    all.retain(|a| a.mentor_id == Some(mentor_id));
    Ok(ApiResponse::ok(all))
  }

  /// The student's current mentor assignment. A student with no record, or
  /// whose mentor was removed, has no mentor.
  pub async fn get_assignment_for_student(
    &self,
    student_id: Uuid,
  ) -> Result<ApiResponse<MentorAssignment>> {
    self.pause(self.latency.lookup).await;
    let all: Vec<MentorAssignment> =
      self.records.load(Collection::MentorAssignments).await?;
    let current = all
      .into_iter()
      .find(|a| a.student_id == student_id && a.is_assigned());
    Ok(ApiResponse::found(current, "No mentor assigned"))
  }

  /// Assign `mentor_id` to `student_id`, superseding any earlier assignment
  /// for that student. Both parties are notified.
  pub async fn create_mentor_assignment(
    &self,
    student_id: Uuid,
    mentor_id: Uuid,
  ) -> Result<ApiResponse<MentorAssignment>> {
    self
      .detached(move |api| async move {
        api.pause(api.latency.write).await;

        let users: Vec<User> = api.records.load(Collection::Users).await?;
        let Some(student) = find_with_role(&users, student_id, Role::Student) else {
          return Ok(ApiResponse::failure("Student not found"));
        };
        let Some(mentor) = find_with_role(&users, mentor_id, Role::Mentor) else {
          return Ok(ApiResponse::failure("Mentor not found"));
        };

        let assignment = api.supersede_assignment(student_id, Some(mentor_id)).await?;
        tracing::info!(%student_id, %mentor_id, "mentor assigned");

        api
          .push_notification(
            NewNotification::new(
              mentor.user_id,
              "New Student Assignment",
              format!("You have been assigned a new student: {}", student.name),
            )
            .with_kind(NotificationKind::Assignment),
          )
          .await?;
        api
          .push_notification(
            NewNotification::new(
              student.user_id,
              "New Mentor Assignment",
              format!("You have been assigned to mentor: {}", mentor.name),
            )
            .with_kind(NotificationKind::Assignment),
          )
          .await?;

        Ok(ApiResponse::ok_with(assignment, "Assignment created successfully"))
      })
      .await
  }

  /// Remove the student's mentor. Recorded as an unassigned record that
  /// supersedes the current one; both parties are notified.
  pub async fn remove_mentor_assignment(
    &self,
    student_id: Uuid,
  ) -> Result<ApiResponse<MentorAssignment>> {
    self
      .detached(move |api| async move {
        api.pause(api.latency.write).await;

        let all: Vec<MentorAssignment> =
          api.records.load(Collection::MentorAssignments).await?;
        let Some(former) = all
          .iter()
          .find(|a| a.student_id == student_id)
          .and_then(|a| a.mentor_id)
        else {
          return Ok(ApiResponse::failure("No mentor assigned"));
        };

        let assignment = api.supersede_assignment(student_id, None).await?;
        tracing::info!(%student_id, mentor_id = %former, "mentor removed");

        let users: Vec<User> = api.records.load(Collection::Users).await?;
        let student_name = users
          .iter()
          .find(|u| u.user_id == student_id)
          .map_or_else(|| "A student".to_owned(), |u| u.name.clone());
        api
          .push_notification(
            NewNotification::new(
              former,
              "Student Unassigned",
              format!("{student_name} is no longer assigned to you"),
            )
            .with_kind(NotificationKind::Assignment),
          )
          .await?;
        api
          .push_notification(
            NewNotification::new(
              student_id,
              "Mentor Unassigned",
              "You no longer have an assigned mentor",
            )
            .with_kind(NotificationKind::Assignment),
          )
          .await?;

        Ok(ApiResponse::ok_with(assignment, "Mentor removed successfully"))
      })
      .await
  }

  /// Replace the student's assignment record with a new one.
  pub(crate) async fn supersede_assignment(
    &self,
    student_id: Uuid,
    mentor_id: Option<Uuid>,
  ) -> Result<MentorAssignment> {
    let assignment = MentorAssignment {
      assignment_id: Uuid::new_v4(),
      student_id,
      mentor_id,
      assigned_date: Utc::now().date_naive(),
    };
    let stored = assignment.clone();
    self
      .records
      .update(
        Collection::MentorAssignments,
        move |all: &mut Vec<MentorAssignment>| {
          all.retain(|a| a.student_id != student_id);
          all.push(stored);
          Some(())
        },
      )
      .await?;
    Ok(assignment)
  }
}

fn find_with_role(users: &[User], id: Uuid, role: Role) -> Option<&User> {
  users.iter().find(|u| u.user_id == id && u.role == role)
}
