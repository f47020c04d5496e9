//! Bookmark store
//!
//! The `BookmarkStore` owns one SQLite connection and is the sole writer of
//! persisted state. Identifiers are assigned by the database at insert time,
//! inside the same transaction as the row, so two concurrent `add` calls can
//! never observe the same id. Ids are never reused after deletion.
//!
//! "Not found" is never an error here: lookups return empty results and
//! mutations report what they actually touched. Only storage failures
//! (directory creation, opening the database, SQL errors) surface as
//! [`StorageError`].

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use rusqlite::{params, params_from_iter, Connection, Transaction};
use tracing::debug;

use crate::config::Config;
use crate::models::{Bookmark, BookmarkPatch, NewBookmark};
use crate::storage::{init_schema, needs_init, StorageError, StorageResult};

/// SQLite-backed bookmark repository
pub struct BookmarkStore {
    conn: Connection,
}

impl BookmarkStore {
    /// Open or create the store at the configured database path
    pub fn open(config: &Config) -> StorageResult<Self> {
        let path = config.database_path();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(&path).map_err(|source| StorageError::OpenDatabase {
            path: path.clone(),
            source,
        })?;

        Self::with_connection(conn)
    }

    /// Open an in-memory store (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StorageResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        if needs_init(&conn) {
            init_schema(&conn)?;
        }
        Ok(Self { conn })
    }

    /// Add a bookmark, assigning a fresh id and stamping the creation time
    pub fn add(&mut self, url: &str, name: &str, tags: &[String]) -> StorageResult<Bookmark> {
        let tx = self.conn.transaction()?;
        let bookmark = insert_bookmark(&tx, url, name, tags, now())?;
        tx.commit()?;

        debug!(id = bookmark.id, url, "added bookmark");
        Ok(bookmark)
    }

    /// Add a batch of externally-supplied records in a single transaction
    ///
    /// Used by bulk import; fields are accepted verbatim, without validation.
    pub fn add_all(&mut self, entries: &[NewBookmark]) -> StorageResult<Vec<Bookmark>> {
        let stamp = now();
        let tx = self.conn.transaction()?;

        let mut added = Vec::with_capacity(entries.len());
        for entry in entries {
            added.push(insert_bookmark(&tx, &entry.url, &entry.name, &entry.tags, stamp)?);
        }
        tx.commit()?;

        debug!(count = added.len(), "imported bookmarks");
        Ok(added)
    }

    /// Get every live record, ordered by id ascending
    pub fn list_all(&self) -> StorageResult<Vec<Bookmark>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, url, name, created_at FROM bookmarks ORDER BY id ASC")?;
        let rows = stmt.query_map([], read_row)?;

        let mut bookmarks = Vec::new();
        for row in rows {
            bookmarks.push(self.hydrate(row?)?);
        }
        Ok(bookmarks)
    }

    /// Get a single record by id
    pub fn get(&self, id: i64) -> StorageResult<Option<Bookmark>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, url, name, created_at FROM bookmarks WHERE id = ?")?;
        let mut rows = stmt.query(params![id])?;

        match rows.next()? {
            Some(row) => Ok(Some(self.hydrate(read_row(row)?)?)),
            None => Ok(None),
        }
    }

    /// Get the records whose ids are in `ids`, ordered by id ascending
    ///
    /// Ids with no matching live record are silently omitted.
    pub fn get_by_ids(&self, ids: &BTreeSet<i64>) -> StorageResult<Vec<Bookmark>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT id, url, name, created_at FROM bookmarks WHERE id IN ({}) ORDER BY id ASC",
            placeholders(ids.len())
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(ids.iter()), read_row)?;

        let mut bookmarks = Vec::new();
        for row in rows {
            bookmarks.push(self.hydrate(row?)?);
        }
        Ok(bookmarks)
    }

    /// Apply a partial update to a record
    ///
    /// Returns false, without mutating anything, when `id` is not live.
    /// Fields left unset in the patch keep their current value; `id` and
    /// `created_at` cannot change.
    pub fn update(&mut self, id: i64, patch: &BookmarkPatch) -> StorageResult<bool> {
        let tx = self.conn.transaction()?;

        let exists = tx
            .prepare("SELECT 1 FROM bookmarks WHERE id = ?")?
            .exists(params![id])?;
        if !exists {
            return Ok(false);
        }

        if let Some(ref url) = patch.url {
            tx.execute("UPDATE bookmarks SET url = ? WHERE id = ?", params![url, id])?;
        }
        if let Some(ref name) = patch.name {
            tx.execute("UPDATE bookmarks SET name = ? WHERE id = ?", params![name, id])?;
        }
        if let Some(ref tags) = patch.tags {
            tx.execute("DELETE FROM bookmark_tags WHERE bookmark_id = ?", params![id])?;
            insert_tags(&tx, id, tags)?;
        }

        tx.commit()?;
        debug!(id, "updated bookmark");
        Ok(true)
    }

    /// Delete the records whose ids are in `ids`
    ///
    /// Ids with no matching live record are ignored. Returns the ids that
    /// existed and were removed, ascending.
    pub fn delete(&mut self, ids: &BTreeSet<i64>) -> StorageResult<Vec<i64>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let tx = self.conn.transaction()?;

        let sql = format!(
            "SELECT id FROM bookmarks WHERE id IN ({}) ORDER BY id ASC",
            placeholders(ids.len())
        );
        let deleted: Vec<i64> = tx
            .prepare(&sql)?
            .query_map(params_from_iter(ids.iter()), |row| row.get(0))?
            .collect::<rusqlite::Result<_>>()?;

        let sql = format!("DELETE FROM bookmarks WHERE id IN ({})", placeholders(ids.len()));
        tx.execute(&sql, params_from_iter(ids.iter()))?;

        tx.commit()?;
        debug!(count = deleted.len(), "deleted bookmarks");
        Ok(deleted)
    }

    /// Number of live records
    pub fn count(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM bookmarks", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Attach tags to a bare row
    fn hydrate(&self, row: BookmarkRow) -> StorageResult<Bookmark> {
        let mut stmt = self
            .conn
            .prepare("SELECT tag FROM bookmark_tags WHERE bookmark_id = ? ORDER BY position ASC")?;
        let tags = stmt
            .query_map(params![row.id], |r| r.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;

        Ok(Bookmark {
            id: row.id,
            url: row.url,
            name: row.name,
            tags,
            created_at: datetime_from_secs(row.created_at),
        })
    }
}

/// A bookmarks row before its tags are attached
struct BookmarkRow {
    id: i64,
    url: String,
    name: String,
    created_at: i64,
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<BookmarkRow> {
    Ok(BookmarkRow {
        id: row.get(0)?,
        url: row.get(1)?,
        name: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn insert_bookmark(
    tx: &Transaction<'_>,
    url: &str,
    name: &str,
    tags: &[String],
    created_at: DateTime<Utc>,
) -> StorageResult<Bookmark> {
    tx.execute(
        "INSERT INTO bookmarks (url, name, created_at) VALUES (?, ?, ?)",
        params![url, name, created_at.timestamp()],
    )?;
    let id = tx.last_insert_rowid();
    insert_tags(tx, id, tags)?;

    Ok(Bookmark {
        id,
        url: url.to_string(),
        name: name.to_string(),
        tags: tags.to_vec(),
        created_at,
    })
}

fn insert_tags(tx: &Transaction<'_>, id: i64, tags: &[String]) -> StorageResult<()> {
    let mut stmt =
        tx.prepare("INSERT INTO bookmark_tags (bookmark_id, position, tag) VALUES (?, ?, ?)")?;
    for (position, tag) in tags.iter().enumerate() {
        stmt.execute(params![id, position as i64, tag])?;
    }
    Ok(())
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// Current time truncated to whole seconds, matching storage precision
///
/// A record returned by `add` compares equal to the same record re-read.
fn now() -> DateTime<Utc> {
    datetime_from_secs(Utc::now().timestamp())
}

fn datetime_from_secs(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}
