//! Meeting log (session notes) operations.

use chrono::Utc;
use mentorly_core::{
  meeting::{Meeting, MeetingLog, NewMeetingLog},
  notification::{NewNotification, NotificationKind},
  store::{Collection, KeyValueStore},
};
use uuid::Uuid;

use crate::{Api, ApiResponse, Result};

impl<S: KeyValueStore> Api<S> {
  pub async fn get_meeting_logs(&self) -> Result<ApiResponse<Vec<MeetingLog>>> {
    self.pause(self.latency.list).await;
    let all: Vec<MeetingLog> = self.records.load(Collection::MeetingLogs).await?;
    Ok(ApiResponse::ok(all))
  }

  pub async fn get_meeting_log_by_id(
    &self,
    id: Uuid,
  ) -> Result<ApiResponse<MeetingLog>> {
    self.pause(self.latency.lookup).await;
    let all: Vec<MeetingLog> = self.records.load(Collection::MeetingLogs).await?;
    let log = all.into_iter().find(|l| l.log_id == id);
    Ok(ApiResponse::found(log, "Meeting log not found"))
  }

  /// The first log recorded for `meeting_id`.
  pub async fn get_log_for_meeting(
    &self,
    meeting_id: Uuid,
  ) -> Result<ApiResponse<MeetingLog>> {
    self.pause(self.latency.lookup).await;
    let all: Vec<MeetingLog> = self.records.load(Collection::MeetingLogs).await?;
    let log = all.into_iter().find(|l| l.meeting_id == meeting_id);
    Ok(ApiResponse::found(log, "No log found for this meeting"))
  }

  pub async fn get_logs_for_mentor(
    &self,
    mentor_id: Uuid,
  ) -> Result<ApiResponse<Vec<MeetingLog>>> {
    self.pause(self.latency.lookup).await;
    let mut all: Vec<MeetingLog> =
      self.records.load(Collection::MeetingLogs).await?;
    all.retain(|l| l.mentor_id == mentor_id);
    Ok(ApiResponse::ok(all))
  }

  pub async fn get_logs_for_student(
    &self,
    student_id: Uuid,
  ) -> Result<ApiResponse<Vec<MeetingLog>>> {
    self.pause(self.latency.lookup).await;
    let mut all: Vec<MeetingLog> =
      self.records.load(Collection::MeetingLogs).await?;
    all.retain(|l| l.student_id == student_id);
    Ok(ApiResponse::ok(all))
  }

  /// Record session notes for an existing meeting and tell the student.
  pub async fn create_meeting_log(
    &self,
    input: NewMeetingLog,
  ) -> Result<ApiResponse<MeetingLog>> {
    self
      .detached(move |api| async move {
        api.pause(api.latency.write).await;

        let meetings: Vec<Meeting> = api.records.load(Collection::Meetings).await?;
        let Some(meeting) = meetings.iter().find(|m| m.meeting_id == input.meeting_id)
        else {
          return Ok(ApiResponse::failure("Meeting not found"));
        };

        let log = MeetingLog {
          log_id:        Uuid::new_v4(),
          meeting_id:    input.meeting_id,
          meeting_title: meeting.title.clone(),
          mentor_id:     input.mentor_id,
          student_id:    input.student_id,
          topic:         input.topic,
          notes:         input.notes,
          action_items:  input.action_items,
          completed:     input.completed,
          rating:        input.rating,
          feedback:      input.feedback,
          created_at:    Utc::now(),
        };
        let stored = log.clone();
        api
          .records
          .update(Collection::MeetingLogs, move |all: &mut Vec<MeetingLog>| {
            all.push(stored);
            Some(())
          })
          .await?;
        tracing::info!(log_id = %log.log_id, meeting_id = %log.meeting_id, "meeting log created");

        api
          .push_notification(
            NewNotification::new(
              log.student_id,
              "Meeting Notes Added",
              format!(
                "Your mentor has added notes from your meeting: {}",
                log.meeting_title
              ),
            )
            .with_kind(NotificationKind::SessionNotes),
          )
          .await?;

        Ok(ApiResponse::ok_with(log, "Meeting log created successfully"))
      })
      .await
  }
}
