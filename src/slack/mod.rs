//! Slack Web API access: the HTTP client, cursor pagination, result
//! flattening and the cached listing service built on top of them.

pub mod aggregate;
mod client;
pub mod endpoints;
mod page;
pub mod pagination;
mod registry;
mod service;
mod traits;
pub mod types;

pub use client::SlackClient;
pub use page::{BreakCondition, Options, Page, PageSource};
pub use registry::ListRegistry;
pub use service::Slacker;
pub use traits::{ChannelAdmin, ListFetcher};
