use tracing::{info, warn};

use crate::error::Result;
use crate::slack::endpoints::{fetch_typed, UsersList};
use crate::slack::types::Channel;
use crate::slack::{ChannelAdmin, ListFetcher};

/// Invite every workspace member into the channel named `channel_name`.
///
/// Returns false without calling Slack when the name is empty or not among `channels`.
pub async fn invite_all_members<L, A>(
  lists: &L,
  admin: &A,
  channels: &[Channel],
  channel_name: &str,
) -> Result<bool>
where
  L: ListFetcher + ?Sized,
  A: ChannelAdmin + ?Sized,
{
  if channel_name.is_empty() {
    warn!("No channel name given. Use `--channel`");
    return Ok(false);
  }
  let Some(channel) = channels.iter().find(|c| c.name == channel_name) else {
    warn!("No channel found: {}", channel_name);
    return Ok(false);
  };

  let user_ids: Vec<String> = fetch_typed::<UsersList, _>(lists, None, None)
    .await?
    .into_iter()
    .map(|user| user.id)
    .collect();

  let ok = admin.invite_users(&channel.id, &user_ids).await?;
  if ok {
    info!("All members have been invited to {}", channel_name);
  } else {
    warn!("Failed on inviting users to {}", channel_name);
  }
  Ok(ok)
}
