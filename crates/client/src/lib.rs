//! Feed client: API bindings, identity-keyed cache, and the feed controller.
//!
//! The controller drives the whole viewing session: it fetches feed pages,
//! falls back to follow suggestions when the feed is empty, and reconciles
//! follow/like/comment action results into a local cache of viewer-relative
//! post entries.

pub mod api;
pub mod cache;
pub mod controller;
pub mod error;

pub use api::{FeedApi, FeedSlice, HttpFeedApi};
pub use cache::FeedCache;
pub use controller::{ControllerState, FeedController};
pub use error::{ClientError, ClientResult};
