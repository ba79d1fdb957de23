//! In-process cache store with per-key write timestamps.

use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

/// Unix time in seconds.
pub type UnixSeconds = i64;

#[derive(Debug)]
struct CacheState<V> {
  entries: HashMap<String, V>,
  /// When each entry was last written
  timestamps: HashMap<String, UnixSeconds>,
}

impl<V> Default for CacheState<V> {
  fn default() -> Self {
    Self {
      entries: HashMap::new(),
      timestamps: HashMap::new(),
    }
  }
}

/// Key/value store for flattened list results.
///
/// Entries never expire; callers decide staleness from [`CacheStore::timestamps`]
/// and invalidate with [`CacheStore::bust`]. A `set` updates the entry and its
/// timestamp under one lock, so concurrent writers for the same key resolve as
/// last-writer-wins. Nothing is persisted across restarts.
#[derive(Debug)]
pub struct CacheStore<V> {
  state: Mutex<CacheState<V>>,
}

impl<V> Default for CacheStore<V> {
  fn default() -> Self {
    Self {
      state: Mutex::new(CacheState::default()),
    }
  }
}

impl<V: Clone> CacheStore<V> {
  pub fn new() -> Self {
    Self::default()
  }

  fn lock(&self) -> MutexGuard<'_, CacheState<V>> {
    // A panic while holding the lock cannot leave the maps half-written.
    self.state.lock().unwrap_or_else(|e| e.into_inner())
  }

  pub fn get(&self, key: &str) -> Option<V> {
    self.lock().entries.get(key).cloned()
  }

  /// Store `value` under `key`, replacing any previous value, and stamp it.
  pub fn set(&self, key: &str, value: V) {
    let mut state = self.lock();
    state.entries.insert(key.to_string(), value);
    state
      .timestamps
      .insert(key.to_string(), Utc::now().timestamp());
  }

  pub fn keys(&self) -> HashSet<String> {
    self.lock().entries.keys().cloned().collect()
  }

  /// Remove the given keys (and their timestamps). Returns how many entries existed.
  pub fn delete(&self, keys: &[String]) -> usize {
    let mut state = self.lock();
    let mut removed = 0;
    for key in keys {
      state.timestamps.remove(key);
      if state.entries.remove(key).is_some() {
        removed += 1;
      }
    }
    removed
  }

  /// Last write time per key. Empty when nothing has been cached.
  pub fn timestamps(&self) -> HashMap<String, UnixSeconds> {
    self.lock().timestamps.clone()
  }

  /// Drop `key` if it is cached; otherwise (or with no key) drop everything.
  ///
  /// Returns the number of entries removed.
  pub fn bust(&self, key: Option<&str>) -> usize {
    let cached = self.keys();
    let targets: Vec<String> = match key {
      Some(key) if cached.contains(key) => vec![key.to_string()],
      _ => cached.into_iter().collect(),
    };
    // A set racing with bust-all survives, as if it had landed just after.
    self.delete(&targets)
  }
}
