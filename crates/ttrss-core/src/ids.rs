//! Predefined category and feed ids.
//!
//! Plugin feeds range down from the server's `PLUGIN_FEED_BASE_INDEX`
//! (default -128) and label feeds from `LABEL_BASE_INDEX` (default -1024).

/// Special category ids.
pub mod category {
    pub const UNCATEGORIZED: i64 = 0;
    pub const SPECIAL: i64 = -1;
    pub const LABELS: i64 = -2;
    pub const FEEDS_NOT_VIRTUAL: i64 = -3;
    pub const FEEDS_ALL: i64 = -4;
}

/// Special feed ids.
pub mod feed {
    pub const ARCHIVED: i64 = 0;
    pub const STARRED: i64 = -1;
    pub const PUBLISHED: i64 = -2;
    pub const FRESH: i64 = -3;
    pub const ALL_ARTICLES: i64 = -4;
    pub const RECENTLY_READ: i64 = -6;
}

/// Whether a feed id refers to a virtual feed rather than a subscription.
pub fn is_virtual_feed(id: i64) -> bool {
    id <= feed::ARCHIVED
}
