//! Netscape bookmark HTML import/export commands

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use linkeep_core::{netscape, BookmarkStore};

use crate::output::Output;

/// Import bookmarks from a Netscape bookmark HTML file
pub fn import(store: &mut BookmarkStore, file: &Path, output: &Output) -> Result<()> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let entries = netscape::import_html(&content);
    if entries.is_empty() {
        output.message("No bookmarks found in file.");
        return Ok(());
    }

    let added = store
        .add_all(&entries)
        .context("Failed to import bookmarks")?;

    output.success(&format!(
        "Imported {} bookmarks from {}",
        added.len(),
        file.display()
    ));
    Ok(())
}

/// Export bookmarks to a Netscape bookmark HTML file
pub fn export(store: &BookmarkStore, file: &Path, output: &Output) -> Result<()> {
    let bookmarks = store.list_all().context("Failed to load bookmarks")?;

    if bookmarks.is_empty() {
        output.message("No bookmarks to export.");
        return Ok(());
    }

    fs::write(file, netscape::export_html(&bookmarks))
        .with_context(|| format!("Failed to write {}", file.display()))?;

    output.success(&format!(
        "Exported {} bookmarks to {}",
        bookmarks.len(),
        file.display()
    ));
    Ok(())
}
