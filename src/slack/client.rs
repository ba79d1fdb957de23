use async_trait::async_trait;
use color_eyre::eyre::eyre;
use futures::stream::{self, BoxStream, StreamExt};
use reqwest::header::{HeaderMap, CONTENT_TYPE, RETRY_AFTER};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::page::{Options, Page, PageSource};
use super::traits::ChannelAdmin;
use crate::config::Config;
use crate::error::{Error, Result};

const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(1);

/// Slack Web API client wrapper
#[derive(Clone)]
pub struct SlackClient {
  http: reqwest::Client,
  api_url: String,
  token: String,
  page_size: u32,
  max_retries: u32,
  dry_run: bool,
}

impl SlackClient {
  pub fn new(config: &Config, token: &str) -> color_eyre::Result<Self> {
    let http = reqwest::Client::builder()
      .user_agent(concat!("slacker/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| eyre!("Failed to create Slack client: {}", e))?;

    Ok(Self {
      http,
      api_url: config.api_url.trim_end_matches('/').to_string(),
      token: token.to_string(),
      page_size: config.page_size,
      max_retries: config.max_retries,
      dry_run: config.dry_run,
    })
  }

  /// Call a Web API method with form parameters, retrying when rate limited.
  async fn call(&self, method: &str, params: &[(String, String)]) -> Result<Page> {
    let url = format!("{}/{}", self.api_url, method);
    let body = encode_form(params);
    let mut attempt = 0;

    loop {
      debug!(method, attempt, "calling slack api");
      let response = self
        .http
        .post(&url)
        .bearer_auth(&self.token)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(body.clone())
        .send()
        .await?;

      if response.status() == StatusCode::TOO_MANY_REQUESTS {
        if attempt >= self.max_retries {
          return Err(Error::Api {
            method: method.to_string(),
            error: format!("ratelimited after {} retries", attempt),
          });
        }
        let wait = retry_after(response.headers());
        warn!(method, attempt, wait_secs = wait.as_secs(), "rate limited, retrying");
        tokio::time::sleep(wait).await;
        attempt += 1;
        continue;
      }

      let body: Value = response.error_for_status()?.json().await?;
      return Ok(Page::try_from(body)?);
    }
  }

  /// Call a method and report its `ok` flag, logging platform errors.
  async fn call_ok(&self, method: &str, params: &[(String, String)]) -> Result<bool> {
    let page = self.call(method, params).await?;
    if !page.ok() {
      warn!(method, error = page.error().unwrap_or("unknown"), "slack api call not ok");
    }
    Ok(page.ok())
  }
}

impl PageSource for SlackClient {
  fn paginate<'a>(&'a self, method: &'a str, options: &'a Options) -> BoxStream<'a, Result<Page>> {
    // State: None when finished, Some(cursor) while pages remain.
    stream::unfold(Some(None::<String>), move |state| async move {
      let cursor = state?;
      let params = page_params(options, self.page_size, cursor.as_deref());
      match self.call(method, &params).await {
        Ok(page) => {
          let next = if page.ok() {
            page.next_cursor().map(|c| Some(c.to_string()))
          } else {
            None
          };
          Some((Ok(page), next))
        }
        Err(e) => Some((Err(e), None)),
      }
    })
    .boxed()
  }
}

#[async_trait]
impl ChannelAdmin for SlackClient {
  async fn join_channel(&self, channel_id: &str) -> Result<bool> {
    self
      .call_ok("conversations.join", &[param("channel", channel_id)])
      .await
  }

  async fn archive_channel(&self, channel_id: &str) -> Result<bool> {
    if self.dry_run {
      info!(channel_id, "dry run: not archiving");
      return Ok(true);
    }
    self
      .call_ok("conversations.archive", &[param("channel", channel_id)])
      .await
  }

  async fn invite_users(&self, channel_id: &str, user_ids: &[String]) -> Result<bool> {
    if self.dry_run {
      info!(channel_id, users = user_ids.len(), "dry run: not inviting");
      return Ok(true);
    }
    self
      .call_ok(
        "conversations.invite",
        &[param("channel", channel_id), param("users", &user_ids.join(","))],
      )
      .await
  }
}

fn param(name: &str, value: &str) -> (String, String) {
  (name.to_string(), value.to_string())
}

/// Form parameters for one page: caller options, a default `limit`, and the cursor.
fn page_params(options: &Options, page_size: u32, cursor: Option<&str>) -> Vec<(String, String)> {
  let mut params: Vec<(String, String)> = options
    .iter()
    .filter(|(_, value)| !value.is_null())
    .map(|(name, value)| {
      let value = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
      };
      (name.clone(), value)
    })
    .collect();

  if !options.contains_key("limit") {
    params.push(param("limit", &page_size.to_string()));
  }
  if let Some(cursor) = cursor {
    params.push(param("cursor", cursor));
  }
  params
}

fn encode_form(params: &[(String, String)]) -> String {
  url::form_urlencoded::Serializer::new(String::new())
    .extend_pairs(params)
    .finish()
}

fn retry_after(headers: &HeaderMap) -> Duration {
  headers
    .get(RETRY_AFTER)
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.trim().parse::<u64>().ok())
    .map(Duration::from_secs)
    .unwrap_or(DEFAULT_RETRY_AFTER)
}
