//! Cache key construction.

use crate::slack::Options;

const SEPARATOR: &str = "-";
const FRAGMENT_LEN: usize = 4;

/// Builds cache keys of the form `<fragment>-<method>[-<options json>]`.
///
/// The fragment is the tail of the API token, so clients holding different
/// tokens never collide even when they share a store. Options are serialized
/// as-is: `{"a":1,"b":2}` and `{"b":2,"a":1}` produce different keys.
#[derive(Debug, Clone)]
pub struct CacheKeyBuilder {
  fragment: String,
}

impl CacheKeyBuilder {
  pub fn new(token: &str) -> Self {
    let chars: Vec<char> = token.chars().collect();
    let start = chars.len().saturating_sub(FRAGMENT_LEN);
    Self {
      fragment: chars[start..].iter().collect(),
    }
  }

  /// Key for `method` with no options. Used when busting by method name.
  pub fn default_key(&self, method: &str) -> String {
    self.build(method, None)
  }

  pub fn build(&self, method: &str, options: Option<&Options>) -> String {
    let mut parts = vec![self.fragment.clone(), method.to_string()];
    if let Some(options) = options.filter(|o| !o.is_empty()) {
      // Serializing a map of JSON values cannot fail.
      parts.push(serde_json::to_string(options).unwrap_or_default());
    }
    parts.join(SEPARATOR)
  }
}
