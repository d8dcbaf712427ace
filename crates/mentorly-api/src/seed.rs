//! First-run seed data.
//!
//! Each role has a default account guarded by its own flag, so deleting the
//! flag re-seeds only that role. The optional demo data set adds a few more
//! people and a realistic history of meetings, notes and notifications.

use chrono::{Duration, Utc};
use mentorly_core::{
  meeting::{Meeting, MeetingLog, MeetingStatus, Rating},
  notification::{NewNotification, NotificationKind},
  store::{Collection, KeyValueStore, StoreKey},
  user::{NewUser, Role, User},
};
use uuid::Uuid;

use crate::{Api, Result};

/// Secret shared by every seeded account.
pub const DEFAULT_SECRET: &str = "password";

/// `(name, email)` of the default account for `role`.
pub fn default_account(role: Role) -> (&'static str, &'static str) {
  match role {
    Role::Admin => ("Admin User", "admin@example.com"),
    Role::Mentor => ("Mentor User", "mentor@example.com"),
    Role::Student => ("Student User", "student@example.com"),
  }
}

const DEMO_USERS: &[(&str, &str, Role)] = &[
  ("Sarah Johnson", "sarah@example.com", Role::Mentor),
  ("Robert Wilson", "robert@example.com", Role::Mentor),
  ("Michael Brown", "michael@example.com", Role::Student),
  ("Emily Davis", "emily@example.com", Role::Student),
];

/// `(student email, mentor email)`.
const DEMO_ASSIGNMENTS: &[(&str, &str)] = &[
  ("student@example.com", "mentor@example.com"),
  ("michael@example.com", "mentor@example.com"),
  ("emily@example.com", "sarah@example.com"),
];

struct DemoMeeting {
  mentor:   &'static str,
  student:  &'static str,
  title:    &'static str,
  agenda:   &'static str,
  /// Relative to seeding time; negative is in the past.
  days:     i64,
  /// `(notes, student feedback, rating)` for meetings that already happened.
  log:      Option<(&'static str, &'static str, u8)>,
}

const DEMO_MEETINGS: &[DemoMeeting] = &[
  DemoMeeting {
    mentor:  "mentor@example.com",
    student: "student@example.com",
    title:   "Initial Assessment",
    agenda:  "Discuss learning goals and set expectations",
    days:    -60,
    log:     Some((
      "Shows promise in backend development. Should focus more on database design.",
      "The session was very helpful. I now have a clearer idea of what to focus on.",
      5,
    )),
  },
  DemoMeeting {
    mentor:  "mentor@example.com",
    student: "student@example.com",
    title:   "Progress Review",
    agenda:  "Review progress on learning goals and adjust as needed",
    days:    -30,
    log:     Some((
      "Good progress on database skills. Next steps: API design patterns.",
      "I appreciate the detailed feedback and resources provided.",
      4,
    )),
  },
  DemoMeeting {
    mentor:  "mentor@example.com",
    student: "student@example.com",
    title:   "Project Planning",
    agenda:  "Plan upcoming project and discuss resources needed",
    days:    7,
    log:     None,
  },
  DemoMeeting {
    mentor:  "sarah@example.com",
    student: "emily@example.com",
    title:   "Career Guidance",
    agenda:  "Discuss career opportunities and prepare resume",
    days:    -20,
    log:     Some((
      "Strong frontend skills. Suggested focusing on state management.",
      "The career advice was invaluable.",
      5,
    )),
  },
  DemoMeeting {
    mentor:  "sarah@example.com",
    student: "emily@example.com",
    title:   "Interview Preparation",
    agenda:  "Mock interview and feedback session",
    days:    14,
    log:     None,
  },
];

impl<S: KeyValueStore> Api<S> {
  /// Seed the default account of every role whose flag is not yet set.
  /// An existing account with the same email counts as seeded. Returns the
  /// number of accounts created.
  pub async fn seed_defaults(&self) -> Result<usize> {
    let mut created = 0;
    for role in Role::ALL {
      let flag = StoreKey::Seeded(role);
      if self.records.flag(flag).await? {
        continue;
      }

      let (name, email) = default_account(role);
      if self
        .insert_user(NewUser::new(name, email, DEFAULT_SECRET, role))
        .await?
        .is_some()
      {
        created += 1;
        tracing::info!(%role, %email, "seeded default account");
      }
      self.records.set_flag(flag).await?;
    }
    Ok(created)
  }

  /// Seed the demo data set once. Returns `false` if it was already present.
  pub async fn seed_demo_data(&self) -> Result<bool> {
    if self.records.flag(StoreKey::SeededDemo).await? {
      return Ok(false);
    }
    self.seed_defaults().await?;

    for &(name, email, role) in DEMO_USERS {
      self.insert_user(NewUser::new(name, email, DEFAULT_SECRET, role)).await?;
    }

    let users: Vec<User> = self.records.load(Collection::Users).await?;
    let id_of = |email: &str| {
      users
        .iter()
        .find(|u| u.email.eq_ignore_ascii_case(email))
        .map(|u| u.user_id)
    };

    for &(student, mentor) in DEMO_ASSIGNMENTS {
      if let (Some(student_id), Some(mentor_id)) = (id_of(student), id_of(mentor)) {
        self.supersede_assignment(student_id, Some(mentor_id)).await?;
      }
    }

    let now = Utc::now();
    let mut meetings = Vec::new();
    let mut logs = Vec::new();
    for demo in DEMO_MEETINGS {
      let (Some(mentor_id), Some(student_id)) = (id_of(demo.mentor), id_of(demo.student))
      else {
        continue;
      };
      let meeting_time = now + Duration::days(demo.days);
      let meeting = Meeting {
        meeting_id: Uuid::new_v4(),
        mentor_id,
        student_id,
        title: demo.title.to_owned(),
        meeting_time,
        agenda: demo.agenda.to_owned(),
        status: if demo.log.is_some() {
          MeetingStatus::Completed
        } else {
          MeetingStatus::Scheduled
        },
        location: None,
      };

      if let Some((notes, feedback, rating)) = demo.log {
        logs.push(MeetingLog {
          log_id: Uuid::new_v4(),
          meeting_id: meeting.meeting_id,
          meeting_title: meeting.title.clone(),
          mentor_id,
          student_id,
          topic: demo.agenda.to_owned(),
          notes: notes.to_owned(),
          action_items: String::new(),
          completed: true,
          rating: Rating::try_from(rating).ok(),
          feedback: Some(feedback.to_owned()),
          created_at: meeting_time + Duration::hours(2),
        });
      } else {
        self
          .push_notification(
            NewNotification::new(
              student_id,
              "Upcoming Meeting Reminder",
              format!(
                "Upcoming meeting: {} on {}",
                meeting.title,
                meeting_time.format("%B %-d at %H:%M UTC")
              ),
            )
            .with_kind(NotificationKind::MeetingReminder),
          )
          .await?;
      }
      meetings.push(meeting);
    }

    self
      .records
      .update(Collection::Meetings, |all: &mut Vec<Meeting>| {
        all.extend(meetings);
        Some(())
      })
      .await?;
    self
      .records
      .update(Collection::MeetingLogs, |all: &mut Vec<MeetingLog>| {
        all.extend(logs);
        Some(())
      })
      .await?;

    self.records.set_flag(StoreKey::SeededDemo).await?;
    tracing::info!("seeded demo data");
    Ok(true)
  }
}
