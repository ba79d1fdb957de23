//! Capabilities that commands depend on.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

use super::page::{BreakCondition, Options};
use crate::cache::UnixSeconds;
use crate::error::Result;

/// Possibly-cached, possibly-paginated listing of Slack methods.
#[async_trait]
pub trait ListFetcher: Send + Sync {
  /// Every item of `method`'s list attribute, flattened across pages.
  async fn get_list(
    &self,
    method: &str,
    options: Option<&Options>,
    break_condition: Option<&BreakCondition>,
  ) -> Result<Vec<Value>>;

  /// When each cache key was last fetched.
  fn cache_timestamps(&self) -> HashMap<String, UnixSeconds>;

  /// Forget the no-options result of `method`, or everything when `method` is
  /// `None` or was never cached. Returns the number of entries removed.
  fn bust_cache(&self, method: Option<&str>) -> usize;
}

/// Channel administration calls made around listing.
#[async_trait]
pub trait ChannelAdmin: Send + Sync {
  async fn join_channel(&self, channel_id: &str) -> Result<bool>;

  async fn archive_channel(&self, channel_id: &str) -> Result<bool>;

  async fn invite_users(&self, channel_id: &str, user_ids: &[String]) -> Result<bool>;
}
