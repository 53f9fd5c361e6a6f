//! Typed wrappers over individual API operations.

use serde_json::{Map, Value};
use tracing::debug;
use ttrss_core::{decode_feed_tree, decode_subscribe, ClientError, Envelope, FeedTreeNode, Subscription};

use crate::channel::RpcChannel;
use crate::transport::Transport;

/// Feed-level HTTP credentials for a protected feed.
#[derive(Clone, Copy, Debug)]
pub struct FeedCredentials<'a> {
    pub user: &'a str,
    pub password: &'a str,
}

impl<T: Transport> RpcChannel<T> {
    /// Subscribe to `feed_url` in `category_id`.
    ///
    /// Returns the decoded outcome even when nothing was subscribed; use
    /// [`Subscription::into_result`] to treat that as an error.
    pub fn subscribe_to_feed(
        &self,
        feed_url: &str,
        category_id: i64,
        credentials: Option<FeedCredentials<'_>>,
    ) -> Result<Subscription, ClientError> {
        let mut params = Map::new();
        let _ = params.insert("feed_url".into(), Value::String(feed_url.to_string()));
        let _ = params.insert("category_id".into(), Value::from(category_id));
        if let Some(creds) = credentials {
            let _ = params.insert("login".into(), Value::String(creds.user.to_string()));
            let _ = params.insert("password".into(), Value::String(creds.password.to_string()));
        }

        let envelope = self.call("subscribeToFeed", params)?;
        if let Some(error) = envelope.error() {
            return Err(ClientError::Api(error.to_string()));
        }
        let subscription = decode_subscribe(envelope.content())?;
        debug!(feed_url, code = ?subscription.outcome.code, subscribed = subscription.subscribed, "subscribe finished");
        Ok(subscription)
    }

    /// Fetch the category/feed tree rooted at the synthetic `/` category.
    pub fn get_feed_tree(&self, include_empty: bool) -> Result<FeedTreeNode, ClientError> {
        let mut params = Map::new();
        let _ = params.insert("include_empty".into(), Value::Bool(include_empty));
        let envelope = ensure_ok(self.call("getFeedTree", params)?)?;
        let tree = decode_feed_tree(envelope.content())?;
        debug!(nodes = tree.node_count(), "feed tree decoded");
        Ok(tree)
    }
}

fn ensure_ok(envelope: Envelope) -> Result<Envelope, ClientError> {
    if envelope.is_ok() {
        Ok(envelope)
    } else {
        let text = envelope.error().unwrap_or(ttrss_core::NO_ERROR_TEXT);
        Err(ClientError::Api(text.to_string()))
    }
}
