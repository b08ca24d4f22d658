//! Data models for the TaskTide portal.
//!
//! Field names serialize in camelCase to match the web client.

mod datastore;
mod document;
mod group;
mod notification;
mod semester;
mod user;

pub use datastore::*;
pub use document::*;
pub use group::*;
pub use notification::*;
pub use semester::*;
pub use user::*;
