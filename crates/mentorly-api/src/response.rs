//! The `{data, success, message}` envelope every operation answers with.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
  pub data:    Option<T>,
  pub success: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
}

impl<T> ApiResponse<T> {
  pub fn ok(data: T) -> Self { Self { data: Some(data), success: true, message: None } }

  pub fn ok_with(data: T, message: impl Into<String>) -> Self {
    Self { data: Some(data), success: true, message: Some(message.into()) }
  }

  /// A reported failure with no payload.
  pub fn failure(message: impl Into<String>) -> Self {
    Self { data: None, success: false, message: Some(message.into()) }
  }

  /// `Some` becomes a success, `None` a failure carrying `missing`.
  pub fn found(data: Option<T>, missing: &str) -> Self {
    match data {
      Some(d) => Self::ok(d),
      None => Self::failure(missing),
    }
  }

  /// The payload of a successful response.
  pub fn into_data(self) -> Option<T> {
    if self.success { self.data } else { None }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn failure_omits_data_and_keeps_message() {
    let r: ApiResponse<u32> = ApiResponse::failure("User not found");
    let json = serde_json::to_value(&r).unwrap();
    assert_eq!(json["success"], false);
    assert!(json["data"].is_null());
    assert_eq!(json["message"], "User not found");
  }

  #[test]
  fn ok_skips_absent_message() {
    let json = serde_json::to_value(ApiResponse::ok(3)).unwrap();
    assert_eq!(json["data"], 3);
    assert!(json.get("message").is_none());
  }

  #[test]
  fn found_maps_option() {
    assert!(ApiResponse::found(Some(1), "missing").success);
    let missing = ApiResponse::<i32>::found(None, "missing");
    assert!(!missing.success);
    assert_eq!(missing.message.as_deref(), Some("missing"));
  }
}
