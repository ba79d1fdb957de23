use serde_json::Value;

/// Errors surfaced by the listing core and the Slack client.
///
/// Registry and response-shape errors are fatal to the call and never retried.
/// A page with `ok: false` is not an error here: pagination just stops early.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("endpoint {method} is not a registered list method; add it to list_attributes")]
  UnknownListMethod { method: String },

  #[error("NOSUCHATTR: {attribute} - response: {page}")]
  MissingAttribute { attribute: String, page: Value },

  #[error("slack api call {method} failed: {error}")]
  Api { method: String, error: String },

  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
