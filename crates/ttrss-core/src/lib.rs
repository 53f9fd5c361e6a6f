//! # ttrss-core
//!
//! Wire-independent model for the Tiny Tiny RSS JSON API:
//!
//! - [`Envelope`]: one classified response (`status`, `error`, `content`)
//! - [`decode_subscribe`]: the nested result of `subscribeToFeed`
//! - [`decode_feed_tree`] and [`walk`]: the `getFeedTree` category/feed tree
//! - [`ClientError`]: the error type shared by every client operation

#![deny(unsafe_code)]

pub mod envelope;
pub mod errors;
pub mod ids;
mod json;
pub mod subscribe;
pub mod tree;
pub mod walk;

pub use envelope::{ApiStatus, Envelope, NO_ERROR_TEXT};
pub use errors::ClientError;
pub use subscribe::{decode_subscribe, SubscribeCode, Subscription, SubscriptionOutcome, NO_MESSAGE_TEXT};
pub use tree::{decode_feed_tree, FeedTreeNode, NodeKind, ROOT_ID, ROOT_NAME};
pub use walk::{walk, WalkControl, WalkError};
