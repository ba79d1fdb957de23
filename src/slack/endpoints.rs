//! Typed views over the listable endpoints.
//!
//! The cache stores raw JSON items; these types pick the item shape for a
//! method at the call site.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::page::{BreakCondition, Options};
use super::traits::ListFetcher;
use super::types::{Channel, Message, User};
use crate::error::Result;

/// A listable Slack method and the shape of its items.
pub trait ListEndpoint {
  const METHOD: &'static str;
  type Item: DeserializeOwned;
}

pub struct ConversationsList;

impl ListEndpoint for ConversationsList {
  const METHOD: &'static str = "conversations.list";
  type Item = Channel;
}

pub struct ConversationsHistory;

impl ListEndpoint for ConversationsHistory {
  const METHOD: &'static str = "conversations.history";
  type Item = Message;
}

pub struct UsersList;

impl ListEndpoint for UsersList {
  const METHOD: &'static str = "users.list";
  type Item = User;
}

/// Convert cached JSON items into the endpoint's item type.
pub fn reserialize<T: DeserializeOwned>(items: Vec<Value>) -> serde_json::Result<Vec<T>> {
  items.into_iter().map(serde_json::from_value).collect()
}

/// [`ListFetcher::get_list`] for `E`, with items deserialized into `E::Item`.
pub async fn fetch_typed<E, F>(
  fetcher: &F,
  options: Option<&Options>,
  break_condition: Option<&BreakCondition>,
) -> Result<Vec<E::Item>>
where
  E: ListEndpoint,
  F: ListFetcher + ?Sized,
{
  let items = fetcher.get_list(E::METHOD, options, break_condition).await?;
  Ok(reserialize(items)?)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::slack::{ListRegistry, Slacker};
  use crate::testing::FakeSource;
  use serde_json::json;

  #[tokio::test]
  async fn test_fetch_typed_channels() {
    let source = FakeSource::new().with_pages(
      "conversations.list",
      vec![json!({
        "ok": true,
        "channels": [
          {"id": "C1", "name": "general", "is_general": true},
          {"id": "C2", "name": "random", "is_private": false, "num_members": 4}
        ]
      })],
    );
    let slacker = Slacker::new(source, "xoxb-1234", ListRegistry::default());

    let channels = fetch_typed::<ConversationsList, _>(&slacker, None, None)
      .await
      .unwrap();
    assert_eq!(channels.len(), 2);
    assert_eq!(channels[0].name, "general");
    assert!(channels[0].is_general);
    assert!(!channels[1].is_archived);
  }

  #[test]
  fn test_reserialize_rejects_wrong_shape() {
    let result: serde_json::Result<Vec<User>> = reserialize(vec![json!({"name": "no id"})]);
    assert!(result.is_err());
  }

  #[test]
  fn test_message_ts_seconds() {
    let messages: Vec<Message> = reserialize(vec![
      json!({"type": "message", "text": "hi", "ts": "1512085950.000216"}),
      json!({"type": "message", "subtype": "bot_message"}),
    ])
    .unwrap();
    assert_eq!(messages[0].ts_seconds().map(|t| t.floor()), Some(1512085950.0));
    assert_eq!(messages[1].ts_seconds(), None);
    assert_eq!(messages[1].subtype.as_deref(), Some("bot_message"));
  }
}
