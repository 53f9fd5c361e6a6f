//! # ttrss-client
//!
//! Blocking client for the Tiny Tiny RSS JSON API.
//!
//! [`RpcChannel`] owns the endpoint and session token and turns an operation
//! name plus parameters into one classified [`ttrss_core::Envelope`].
//! [`RpcChannel::login`] negotiates the session; [`RpcChannel::subscribe_to_feed`]
//! and [`RpcChannel::get_feed_tree`] decode their responses into typed values.

#![deny(unsafe_code)]

pub mod channel;
pub mod mock;
pub mod ops;
pub mod session;
pub mod transport;

pub use channel::{RpcChannel, Session};
pub use ops::FeedCredentials;
pub use session::normalize_endpoint;
pub use transport::{HttpTransport, Transport, TransportError};
