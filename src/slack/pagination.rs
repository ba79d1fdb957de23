//! Drains a [`PageSource`] into a list of pages.

use futures::StreamExt;
use tracing::debug;

use super::page::{BreakCondition, Options, Page, PageSource};
use crate::error::Result;

/// Collect pages for `method` until the source is exhausted, a page comes back
/// with `ok: false` (dropped, not an error), or `break_condition` returns true
/// (the triggering page is kept).
///
/// The caller cannot tell these three endings apart.
pub async fn fetch_pages<S>(
  source: &S,
  method: &str,
  options: &Options,
  break_condition: Option<&BreakCondition>,
) -> Result<Vec<Page>>
where
  S: PageSource + ?Sized,
{
  let mut pages = Vec::new();
  let mut stream = source.paginate(method, options);

  while let Some(page) = stream.next().await {
    let page = page?;
    if !page.ok() {
      debug!(
        method,
        error = page.error().unwrap_or("unknown"),
        fetched = pages.len(),
        "page not ok, stopping pagination"
      );
      break;
    }
    pages.push(page);

    if let Some(should_break) = break_condition {
      if let Some(latest) = pages.last() {
        if should_break(latest, &pages) {
          debug!(method, fetched = pages.len(), "break condition met");
          break;
        }
      }
    }
  }

  debug!(method, pages = pages.len(), "pagination finished");
  Ok(pages)
}
