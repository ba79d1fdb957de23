//! Raw response pages and the pagination contract consumed by the listing core.

use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Request options passed through to a Slack method (e.g. `channel`, `limit`).
///
/// Key order is preserved, which makes it part of the cache key.
pub type Options = Map<String, Value>;

/// Caller-supplied predicate that ends pagination early.
///
/// Receives the page just fetched and every page accumulated so far,
/// including that one.
pub type BreakCondition = dyn Fn(&Page, &[Page]) -> bool + Send + Sync;

/// One raw response from a paginated Slack method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Page(Map<String, Value>);

impl Page {
  pub fn ok(&self) -> bool {
    self.0.get("ok").and_then(Value::as_bool).unwrap_or(false)
  }

  /// The named array attribute, if present and an array.
  pub fn list(&self, attribute: &str) -> Option<&Vec<Value>> {
    self.0.get(attribute).and_then(Value::as_array)
  }

  /// Cursor for the next page; `None` when this is the last page.
  pub fn next_cursor(&self) -> Option<&str> {
    self
      .0
      .get("response_metadata")
      .and_then(|m| m.get("next_cursor"))
      .and_then(Value::as_str)
      .filter(|c| !c.is_empty())
  }

  pub fn error(&self) -> Option<&str> {
    self.0.get("error").and_then(Value::as_str)
  }

  pub fn to_value(&self) -> Value {
    Value::Object(self.0.clone())
  }
}

impl TryFrom<Value> for Page {
  type Error = serde_json::Error;

  fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
    serde_json::from_value(value)
  }
}

/// Source of paginated responses for a Slack method.
///
/// The stream is lazy: each item may perform network I/O. It ends when the
/// remote has no further pages, and it may yield a page with `ok: false`
/// as its final item. Retries and rate limiting are the implementor's job.
pub trait PageSource: Send + Sync {
  fn paginate<'a>(&'a self, method: &'a str, options: &'a Options) -> BoxStream<'a, Result<Page>>;
}
