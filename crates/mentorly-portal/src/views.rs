//! The portal's pages and who may open them.

use mentorly_core::user::Role;

/// Every gated page. Matching on this enum is exhaustive, so a new page
/// cannot be added without declaring its roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
  Dashboard,
  /// User management.
  Users,
  Mentees,
  Notifications,
  Meetings,
  Logs,
  SessionNotes,
  ChooseMentor,
  MyMentor,
}

impl View {
  pub const ALL: [View; 9] = [
    View::Dashboard,
    View::Users,
    View::Mentees,
    View::Notifications,
    View::Meetings,
    View::Logs,
    View::SessionNotes,
    View::ChooseMentor,
    View::MyMentor,
  ];

  /// Route path of the view.
  ///
  /// `/choose-mentor` and `/my-mentor` are new gated routes for the student
  /// mentor pages, which were previously reachable only through navigation
  /// links.
  pub fn path(self) -> &'static str {
    match self {
      View::Dashboard => "/dashboard",
      View::Users => "/users",
      View::Mentees => "/mentees",
      View::Notifications => "/notifications",
      View::Meetings => "/meetings",
      View::Logs => "/logs",
      View::SessionNotes => "/session-notes",
      View::ChooseMentor => "/choose-mentor",
      View::MyMentor => "/my-mentor",
    }
  }

  /// Roles allowed to open the view; `None` admits any signed-in user.
  pub fn required_roles(self) -> Option<&'static [Role]> {
    match self {
      View::Dashboard => None,
      View::Users => Some(&[Role::Admin]),
      View::Mentees | View::SessionNotes => Some(&[Role::Mentor]),
      View::Notifications | View::Meetings => Some(&[Role::Mentor, Role::Student]),
      View::Logs => Some(&[Role::Admin, Role::Mentor, Role::Student]),
      View::ChooseMentor | View::MyMentor => Some(&[Role::Student]),
    }
  }

  /// Resolve a route path. `/` is the dashboard.
  pub fn from_path(path: &str) -> Option<Self> {
    let path = path.trim_end_matches('/');
    if path.is_empty() {
      return Some(View::Dashboard);
    }
    View::ALL.into_iter().find(|v| v.path() == path)
  }
}
