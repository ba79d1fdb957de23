use serde_json::{json, Value};

use crate::error::Result;
use crate::slack::endpoints::{fetch_typed, ConversationsList};
use crate::slack::types::Channel;
use crate::slack::{ChannelAdmin, ListFetcher, Options};

fn default_options() -> Options {
  match json!({"types": "public_channel", "exclude_archived": true}) {
    Value::Object(map) => map,
    _ => Options::new(),
  }
}

/// List public, unarchived channels (caller options override the defaults)
/// and join each one so its history can be read.
pub async fn get_channels<L, A>(lists: &L, admin: &A, options: Option<&Options>) -> Result<Vec<Channel>>
where
  L: ListFetcher + ?Sized,
  A: ChannelAdmin + ?Sized,
{
  let mut merged = default_options();
  if let Some(options) = options {
    merged.extend(options.iter().map(|(k, v)| (k.clone(), v.clone())));
  }

  let channels = fetch_typed::<ConversationsList, _>(lists, Some(&merged), None).await?;
  for channel in &channels {
    admin.join_channel(&channel.id).await?;
  }
  Ok(channels)
}
