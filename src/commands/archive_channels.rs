use chrono::Utc;
use futures::future::join_all;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::error::Result;
use crate::slack::endpoints::{fetch_typed, ConversationsHistory};
use crate::slack::types::{Channel, Message};
use crate::slack::{BreakCondition, ChannelAdmin, ListFetcher, Options, Page};

const SECONDS_PER_DAY: f64 = 24.0 * 60.0 * 60.0;
const HISTORY_PAGE_SIZE: u32 = 5;

/// Archive every channel whose last real message is older than `days`.
///
/// Channels are checked concurrently. Returns, per channel and in order,
/// whether it was archived. A `days` of zero disables archiving.
pub async fn archive_channels<L, A>(
  lists: &L,
  admin: &A,
  channels: &[Channel],
  days: u32,
) -> Result<Vec<bool>>
where
  L: ListFetcher + ?Sized,
  A: ChannelAdmin + ?Sized,
{
  if days == 0 {
    warn!("archive age is 0 days, not archiving anything");
    for channel in channels {
      info!("{} has no conversations.", channel.name);
    }
    return Ok(vec![false; channels.len()]);
  }

  let now = Utc::now().timestamp() as f64;
  let max_age = f64::from(days) * SECONDS_PER_DAY;

  join_all(
    channels
      .iter()
      .map(|channel| archive_if_dated(lists, admin, channel, now, max_age)),
  )
  .await
  .into_iter()
  .collect()
}

async fn archive_if_dated<L, A>(
  lists: &L,
  admin: &A,
  channel: &Channel,
  now: f64,
  max_age: f64,
) -> Result<bool>
where
  L: ListFetcher + ?Sized,
  A: ChannelAdmin + ?Sized,
{
  let last_ts = last_worthwhile_message(lists, channel)
    .await?
    .and_then(|m| m.ts_seconds());

  let Some(last_ts) = last_ts else {
    info!("{} has no conversations.", channel.name);
    return Ok(false);
  };

  if now - last_ts <= max_age {
    return Ok(false);
  }

  let archived = admin.archive_channel(&channel.id).await?;
  info!(
    "Archiving '{}' - {}.",
    channel.name,
    if archived { "succeeded" } else { "failed" }
  );
  Ok(true)
}

/// Messages with a subtype are joins, bot posts and the like.
fn is_worthwhile(message: &Message) -> bool {
  let has_subtype = message.subtype.as_deref().is_some_and(|s| !s.is_empty());
  !has_subtype && message.ts_seconds().is_some()
}

fn has_worthwhile_message(page: &Page, _: &[Page]) -> bool {
  page.list("messages").is_some_and(|messages| {
    messages
      .iter()
      .filter_map(|m| Message::deserialize(m).ok())
      .any(|m| is_worthwhile(&m))
  })
}

/// The most recent message in `channel` that isn't a bot or system message.
///
/// History is read newest-first in small pages and stops at the first page
/// containing such a message.
async fn last_worthwhile_message<L>(lists: &L, channel: &Channel) -> Result<Option<Message>>
where
  L: ListFetcher + ?Sized,
{
  let options: Options = match json!({"limit": HISTORY_PAGE_SIZE, "channel": channel.id}) {
    Value::Object(map) => map,
    _ => Options::new(),
  };

  let stop_at_real_message: &BreakCondition = &has_worthwhile_message;
  let messages =
    fetch_typed::<ConversationsHistory, _>(lists, Some(&options), Some(stop_at_real_message))
      .await?;

  Ok(messages.into_iter().filter(is_worthwhile).last())
}
