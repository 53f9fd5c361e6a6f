//! Feed tree model and its decoder for `getFeedTree` responses.
//!
//! The response wraps the top-level entries in `content.categories.items`.
//! That wrapper is not itself an item, so the decoder builds a synthetic root
//! category named [`ROOT_NAME`] to hold them.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::ClientError;
use crate::json::integral;

/// Name of the synthetic root category.
pub const ROOT_NAME: &str = "/";
/// Id of the synthetic root category.
pub const ROOT_ID: i64 = 0;

/// Type discriminator of a tree item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Category,
    Feed,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Feed => "feed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "category" => Some(Self::Category),
            "feed" => Some(Self::Feed),
            _ => None,
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A category or feed in the subscription tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FeedTreeNode {
    pub id: i64,
    /// [`ROOT_NAME`] for the synthetic root.
    pub name: String,
    pub kind: NodeKind,
    /// Last update error of a feed; empty when there is none.
    pub last_error: String,
    /// Children of a category, in document order. Always empty for feeds.
    pub children: Vec<FeedTreeNode>,
}

impl FeedTreeNode {
    pub fn category(id: i64, name: impl Into<String>, children: Vec<FeedTreeNode>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: NodeKind::Category,
            last_error: String::new(),
            children,
        }
    }

    pub fn feed(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: NodeKind::Feed,
            last_error: String::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.last_error = error.into();
        self
    }

    pub fn is_category(&self) -> bool {
        self.kind == NodeKind::Category
    }

    pub fn is_feed(&self) -> bool {
        self.kind == NodeKind::Feed
    }

    /// True for a feed whose last update failed.
    pub fn has_error(&self) -> bool {
        self.is_feed() && !self.last_error.is_empty()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(FeedTreeNode::node_count).sum::<usize>()
    }
}

/// Decode `content.categories` of a `getFeedTree` response.
pub fn decode_feed_tree(content: &Map<String, Value>) -> Result<FeedTreeNode, ClientError> {
    let categories = content
        .get("categories")
        .ok_or_else(|| ClientError::protocol("getFeedTree: content lacks categories key"))?;
    let categories = categories.as_object().ok_or_else(|| {
        ClientError::protocol(format!(
            "getFeedTree: categories is not a JSON object: {categories}"
        ))
    })?;
    let items = categories
        .get("items")
        .ok_or_else(|| ClientError::protocol("getFeedTree: categories has no items entry"))?;

    let children = decode_items(items, "categories.items").inspect_err(|e| {
        debug!(error = %e, "feed tree rejected");
    })?;
    Ok(FeedTreeNode::category(ROOT_ID, ROOT_NAME, children))
}

fn decode_items(items: &Value, path: &str) -> Result<Vec<FeedTreeNode>, ClientError> {
    let items = items.as_array().ok_or_else(|| {
        ClientError::protocol(format!("getFeedTree: {path} is not a JSON array"))
    })?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| decode_item(item, &format!("{path}[{i}]")))
        .collect()
}

fn decode_item(item: &Value, path: &str) -> Result<FeedTreeNode, ClientError> {
    let obj = item.as_object().ok_or_else(|| {
        ClientError::protocol(format!("getFeedTree: {path} is not a JSON object"))
    })?;

    let id = obj
        .get("bare_id")
        .or_else(|| obj.get("bare_ID"))
        .and_then(integral)
        .ok_or_else(|| {
            ClientError::protocol(format!("getFeedTree: {path} has no integer bare_id"))
        })?;

    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| ClientError::protocol(format!("getFeedTree: {path} has no string name")))?;

    let kind_str = obj
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| ClientError::protocol(format!("getFeedTree: {path} has no string type")))?;
    let kind = NodeKind::parse(kind_str).ok_or_else(|| {
        ClientError::protocol(format!("getFeedTree: {path} has unknown type {kind_str:?}"))
    })?;

    match kind {
        NodeKind::Category => {
            let children = match obj.get("items") {
                None | Some(Value::Null) => Vec::new(),
                Some(items) => decode_items(items, &format!("{path}.items"))?,
            };
            Ok(FeedTreeNode::category(id, name, children))
        }
        NodeKind::Feed => {
            let last_error = match obj.get("error") {
                None | Some(Value::Null) => "",
                Some(Value::String(s)) => s.as_str(),
                Some(_) => {
                    return Err(ClientError::protocol(format!(
                        "getFeedTree: {path}.error is not a string"
                    )))
                }
            };
            Ok(FeedTreeNode::feed(id, name).with_error(last_error))
        }
    }
}
