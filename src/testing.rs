//! In-memory fakes shared by unit tests.

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::slack::{ChannelAdmin, Options, Page, PageSource};

/// Serves canned pages per method and counts how many were handed out.
#[derive(Default)]
pub struct FakeSource {
  pages: HashMap<String, Vec<Page>>,
  fail_after: HashMap<String, usize>,
  served: AtomicUsize,
  requests: Mutex<Vec<(String, Options)>>,
}

impl FakeSource {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_pages(mut self, method: &str, pages: Vec<Value>) -> Self {
    let pages = pages
      .into_iter()
      .map(|p| Page::try_from(p).expect("fixture page must be an object"))
      .collect();
    self.pages.insert(method.to_string(), pages);
    self
  }

  /// Yield a transport error once `count` pages of `method` have been served.
  pub fn failing_after(mut self, method: &str, count: usize) -> Self {
    self.fail_after.insert(method.to_string(), count);
    self
  }

  pub fn pages_served(&self) -> usize {
    self.served.load(Ordering::SeqCst)
  }

  pub fn requests(&self) -> Vec<(String, Options)> {
    self.requests.lock().unwrap().clone()
  }
}

impl PageSource for FakeSource {
  fn paginate<'a>(&'a self, method: &'a str, options: &'a Options) -> BoxStream<'a, Result<Page>> {
    self
      .requests
      .lock()
      .unwrap()
      .push((method.to_string(), options.clone()));

    let pages = self.pages.get(method).cloned().unwrap_or_default();
    let limit = self.fail_after.get(method).copied();

    let served = pages.into_iter().map(Ok);
    let failure = limit.map(|_| {
      Err(Error::Api {
        method: method.to_string(),
        error: "connection reset".to_string(),
      })
    });
    let items: Vec<Result<Page>> = match limit {
      Some(n) => served.take(n).chain(failure).collect(),
      None => served.collect(),
    };

    stream::iter(items)
      .inspect(move |item| {
        if item.is_ok() {
          self.served.fetch_add(1, Ordering::SeqCst);
        }
      })
      .boxed()
  }
}

/// Records admin calls instead of performing them.
#[derive(Default)]
pub struct RecordingAdmin {
  pub joined: Mutex<Vec<String>>,
  pub archived: Mutex<Vec<String>>,
  pub invited: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl ChannelAdmin for RecordingAdmin {
  async fn join_channel(&self, channel_id: &str) -> Result<bool> {
    self.joined.lock().unwrap().push(channel_id.to_string());
    Ok(true)
  }

  async fn archive_channel(&self, channel_id: &str) -> Result<bool> {
    self.archived.lock().unwrap().push(channel_id.to_string());
    Ok(true)
  }

  async fn invite_users(&self, channel_id: &str, user_ids: &[String]) -> Result<bool> {
    self
      .invited
      .lock()
      .unwrap()
      .push((channel_id.to_string(), user_ids.join(",")));
    Ok(true)
  }
}
