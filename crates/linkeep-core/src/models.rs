//! Data models for linkeep
//!
//! Defines the persisted `Bookmark` record plus the transient shapes used
//! to create and mutate one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved bookmark
///
/// The `id` is assigned by the store at creation and never reused, even
/// after deletion. `created_at` is stamped once and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bookmark {
    /// Store-assigned identifier, strictly increasing
    pub id: i64,
    /// The URL (opaque to the store, not validated)
    pub url: String,
    /// Display name
    pub name: String,
    /// Tags in insertion order; duplicates are not rejected
    pub tags: Vec<String>,
    /// When this bookmark was created (whole-second precision)
    pub created_at: DateTime<Utc>,
}

/// A partial update to a bookmark
///
/// Each field is independently optional: `None` leaves the current value
/// untouched, `Some` replaces it. `id` and `created_at` cannot be patched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookmarkPatch {
    pub url: Option<String>,
    pub name: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl BookmarkPatch {
    /// True when the patch would change nothing
    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.name.is_none() && self.tags.is_none()
    }
}

/// Input row for creating a bookmark, used by bulk import
///
/// Fields are accepted verbatim; the store assigns the id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBookmark {
    pub url: String,
    pub name: String,
    pub tags: Vec<String>,
}

impl NewBookmark {
    pub fn new(url: impl Into<String>, name: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
            tags,
        }
    }
}
