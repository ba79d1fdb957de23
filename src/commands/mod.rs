//! Workspace housekeeping built on cached listing.

mod archive_channels;
mod get_channels;
mod invite_all_members;

pub use archive_channels::archive_channels;
pub use get_channels::get_channels;
pub use invite_all_members::invite_all_members;
