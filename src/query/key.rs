//! Cache keys for note pages

use std::fmt;

/// Tag value meaning "no tag filter"
pub const ALL_TAGS: &str = "all";

/// Translate a view tag into the filter sent to the notes service
///
/// `"all"` becomes the empty filter; anything else, including `None`,
/// passes through unchanged.
#[must_use]
pub fn filter_tag(tag: Option<&str>) -> Option<&str> {
    match tag {
        Some(ALL_TAGS) => Some(""),
        other => other,
    }
}

/// Identity of one result set: (debounced query, tag, page)
///
/// The tag is kept exactly as supplied to the view; translation happens only
/// when a request is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub query: String,
    pub tag: Option<String>,
    pub page: u32,
}

impl QueryKey {
    /// Create a new key
    #[must_use]
    pub fn new(query: impl Into<String>, tag: Option<String>, page: u32) -> Self {
        Self {
            query: query.into(),
            tag,
            page,
        }
    }

    /// Tag filter to send to the notes service for this key
    #[must_use]
    pub fn filter_tag(&self) -> Option<&str> {
        filter_tag(self.tag.as_deref())
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "notes[{:?}, {}, {}]",
            self.query,
            self.tag.as_deref().unwrap_or("-"),
            self.page
        )
    }
}
