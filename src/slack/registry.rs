//! Which Slack methods are listable, and which array attribute holds their items.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// Built-in method -> attribute entries.
const LIST_ATTRIBUTES: &[(&str, &str)] = &[
  ("conversations.list", "channels"),
  ("conversations.history", "messages"),
  ("conversations.replies", "messages"),
  ("conversations.members", "members"),
  ("users.list", "members"),
  ("users.conversations", "channels"),
  ("usergroups.list", "usergroups"),
  ("files.list", "files"),
  ("reactions.list", "items"),
  ("stars.list", "items"),
  ("pins.list", "items"),
  ("bookmarks.list", "bookmarks"),
  ("team.accessLogs", "logins"),
];

/// Lookup table consulted before any method may be listed.
#[derive(Debug, Clone)]
pub struct ListRegistry {
  attributes: HashMap<String, String>,
}

impl Default for ListRegistry {
  fn default() -> Self {
    Self {
      attributes: LIST_ATTRIBUTES
        .iter()
        .map(|(method, attr)| (method.to_string(), attr.to_string()))
        .collect(),
    }
  }
}

impl ListRegistry {
  /// Built-in entries overlaid with `extra` (extra wins on conflicts).
  pub fn with_extra<I>(extra: I) -> Self
  where
    I: IntoIterator<Item = (String, String)>,
  {
    let mut registry = Self::default();
    registry.attributes.extend(extra);
    registry
  }

  pub fn attribute(&self, method: &str) -> Result<&str> {
    self
      .attributes
      .get(method)
      .map(String::as_str)
      .ok_or_else(|| Error::UnknownListMethod {
        method: method.to_string(),
      })
  }
}
