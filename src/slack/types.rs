use serde::{Deserialize, Serialize};

use super::aggregate::parse_ts;

/// Conversation as returned by `conversations.list`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
  pub id: String,
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub name_normalized: String,
  #[serde(default)]
  pub is_archived: bool,
  #[serde(default)]
  pub is_general: bool,
  #[serde(default)]
  pub is_private: bool,
}

/// Message as returned by `conversations.history`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
  #[serde(rename = "type", default)]
  pub message_type: String,
  /// Set for join/leave notices and most bot messages
  pub subtype: Option<String>,
  #[serde(default)]
  pub text: String,
  pub ts: Option<serde_json::Value>,
}

impl Message {
  /// Timestamp in Unix seconds, if present and numeric.
  pub fn ts_seconds(&self) -> Option<f64> {
    self.ts.as_ref().and_then(parse_ts)
  }
}

/// Workspace member as returned by `users.list`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
  pub id: String,
  pub name: Option<String>,
}
