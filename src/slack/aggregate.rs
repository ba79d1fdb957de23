//! Flattening of paginated responses into one ordered list.

use serde_json::Value;

use super::page::Page;
use crate::error::{Error, Result};

/// Concatenate `attribute` across `pages` (page order, then in-page order) and
/// order the items that carry a numeric `ts` ascending among themselves.
///
/// Items without a usable `ts` keep their positions; the timestamped items are
/// sorted stably within the slots they already occupy.
pub fn flatten(pages: &[Page], attribute: &str) -> Result<Vec<Value>> {
  let mut items = Vec::new();
  for page in pages {
    let list = page.list(attribute).ok_or_else(|| Error::MissingAttribute {
      attribute: attribute.to_string(),
      page: page.to_value(),
    })?;
    items.extend(list.iter().cloned());
  }

  sort_by_ts(&mut items);
  Ok(items)
}

fn sort_by_ts(items: &mut [Value]) {
  let slots: Vec<usize> = items
    .iter()
    .enumerate()
    .filter(|(_, item)| ts_of(item).is_some())
    .map(|(i, _)| i)
    .collect();

  let mut stamped: Vec<(f64, Value)> = slots
    .iter()
    .filter_map(|&i| ts_of(&items[i]).map(|ts| (ts, items[i].take())))
    .collect();
  stamped.sort_by(|a, b| a.0.total_cmp(&b.0));

  for (slot, (_, item)) in slots.into_iter().zip(stamped) {
    items[slot] = item;
  }
}

fn ts_of(item: &Value) -> Option<f64> {
  item.get("ts").and_then(parse_ts)
}

/// Numeric value of a `ts`, which Slack sends as a string ("1512085950.000216").
pub(crate) fn parse_ts(ts: &Value) -> Option<f64> {
  let ts = match ts {
    Value::Number(n) => n.as_f64(),
    Value::String(s) => s.trim().parse::<f64>().ok(),
    _ => None,
  }?;
  ts.is_finite().then_some(ts)
}
