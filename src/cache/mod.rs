//! Process-wide cache for flattened list results.
//!
//! This module provides:
//! - Deterministic cache keys derived from token, method name and options
//! - A key/value store that records when each key was last written
//! - Manual invalidation of one key or the whole store

mod key;
mod storage;

pub use key::CacheKeyBuilder;
pub use storage::{CacheStore, UnixSeconds};
