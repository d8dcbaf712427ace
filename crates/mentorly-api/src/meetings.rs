//! Meeting operations.

use mentorly_core::{
  meeting::{Meeting, MeetingStatus, NewMeeting},
  store::{Collection, KeyValueStore},
};
use uuid::Uuid;

use crate::{Api, ApiResponse, Result};

impl<S: KeyValueStore> Api<S> {
  pub async fn get_meetings(&self) -> Result<ApiResponse<Vec<Meeting>>> {
    self.pause(self.latency.list).await;
    let all: Vec<Meeting> = self.records.load(Collection::Meetings).await?;
    Ok(ApiResponse::ok(all))
  }

  pub async fn get_meeting_by_id(&self, id: Uuid) -> Result<ApiResponse<Meeting>> {
    self.pause(self.latency.lookup).await;
    let all: Vec<Meeting> = self.records.load(Collection::Meetings).await?;
    let meeting = all.into_iter().find(|m| m.meeting_id == id);
    Ok(ApiResponse::found(meeting, "Meeting not found"))
  }

  pub async fn get_meetings_for_mentor(
    &self,
    mentor_id: Uuid,
  ) -> Result<ApiResponse<Vec<Meeting>>> {
    self.pause(self.latency.lookup).await;
    let mut all: Vec<Meeting> = self.records.load(Collection::Meetings).await?;
    all.retain(|m| m.mentor_id == mentor_id);
    Ok(ApiResponse::ok(all))
  }

  pub async fn get_meetings_for_student(
    &self,
    student_id: Uuid,
  ) -> Result<ApiResponse<Vec<Meeting>>> {
    self.pause(self.latency.lookup).await;
    let mut all: Vec<Meeting> = self.records.load(Collection::Meetings).await?;
    all.retain(|m| m.student_id == student_id);
    Ok(ApiResponse::ok(all))
  }

  /// Scheduled meetings where `user_id` is either party, soonest first.
  pub async fn get_upcoming_meetings(
    &self,
    user_id: Uuid,
  ) -> Result<ApiResponse<Vec<Meeting>>> {
    self.pause(self.latency.lookup).await;
    let mut all: Vec<Meeting> = self.records.load(Collection::Meetings).await?;
    all.retain(|m| m.involves(user_id) && m.status == MeetingStatus::Scheduled);
    all.sort_by_key(|m| m.meeting_time);
    Ok(ApiResponse::ok(all))
  }

  pub async fn create_meeting(&self, input: NewMeeting) -> Result<ApiResponse<Meeting>> {
    self
      .detached(move |api| async move {
        api.pause(api.latency.write).await;
        let meeting = Meeting {
          meeting_id:   Uuid::new_v4(),
          mentor_id:    input.mentor_id,
          student_id:   input.student_id,
          title:        input.title,
          meeting_time: input.meeting_time,
          agenda:       input.agenda,
          status:       input.status,
          location:     input.location,
        };
        let stored = meeting.clone();
        api
          .records
          .update(Collection::Meetings, move |all: &mut Vec<Meeting>| {
            all.push(stored);
            Some(())
          })
          .await?;
        tracing::info!(
          meeting_id = %meeting.meeting_id,
          mentor_id = %meeting.mentor_id,
          student_id = %meeting.student_id,
          "meeting created"
        );
        Ok(ApiResponse::ok_with(meeting, "Meeting created successfully"))
      })
      .await
  }

  /// Overwrite a meeting's status. Any status may follow any other.
  pub async fn update_meeting_status(
    &self,
    id: Uuid,
    status: MeetingStatus,
  ) -> Result<ApiResponse<Meeting>> {
    self
      .detached(move |api| async move {
        api.pause(api.latency.list).await;
        let updated = api
          .records
          .update(Collection::Meetings, |all: &mut Vec<Meeting>| {
            all.iter_mut().find(|m| m.meeting_id == id).map(|m| {
              m.status = status;
              m.clone()
            })
          })
          .await?;

        Ok(match updated {
          Some(m) => {
            tracing::info!(meeting_id = %id, %status, "meeting status updated");
            ApiResponse::ok_with(m, "Meeting status updated successfully")
          }
          None => ApiResponse::failure("Meeting not found"),
        })
      })
      .await
  }
}
