//! Linkeep Core Library
//!
//! This crate provides the core functionality for linkeep, a local bookmark
//! manager: a SQLite-backed bookmark store, an index-expression selector,
//! a link liveness checker, and a Netscape bookmark HTML codec.
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let mut store = BookmarkStore::open(&config)?;
//!
//! // Add a bookmark
//! let bookmark = store.add("https://example.com", "Example", &[])?;
//!
//! // Select records by index expression
//! let ids = selection::parse("1-3 7 9");
//! let bookmarks = store.get_by_ids(&ids)?;
//! ```
//!
//! # Modules
//!
//! - `store`: the bookmark repository (main entry point)
//! - `selection`: index-expression parsing
//! - `checker`: link liveness probing
//! - `netscape`: Netscape bookmark HTML import/export
//! - `models`: data structures
//! - `config`: application configuration

pub mod checker;
pub mod config;
pub mod models;
pub mod netscape;
pub mod selection;
pub mod storage;
pub mod store;

pub use checker::{CheckStatus, FailureKind, LinkChecker};
pub use config::Config;
pub use models::{Bookmark, BookmarkPatch, NewBookmark};
pub use selection::SelectionError;
pub use storage::{StorageError, StorageResult};
pub use store::BookmarkStore;
