//! Bookmark command handlers

use anyhow::{Context, Result};

use linkeep_core::{selection, Bookmark, BookmarkPatch, BookmarkStore};

use crate::output::Output;
use crate::prompt::{confirm, prompt_line, prompt_with_default};
use crate::title::fetch_title;

/// Resolve an optional index expression against the store
///
/// An absent or blank expression selects every record; malformed tokens in
/// a present expression are skipped by the selector.
pub fn select(store: &BookmarkStore, indices: Option<&str>) -> Result<Vec<Bookmark>> {
    let bookmarks = match indices.map(str::trim).filter(|expr| !expr.is_empty()) {
        Some(expr) => store.get_by_ids(&selection::parse(expr)),
        None => store.list_all(),
    };
    bookmarks.context("Failed to load bookmarks")
}

/// Add a bookmark
pub async fn add(
    store: &mut BookmarkStore,
    url: String,
    name: Option<String>,
    tags: Vec<String>,
    output: &Output,
) -> Result<()> {
    let name = match name {
        Some(name) => name,
        // No name given: use the page title, or the URL itself
        None => fetch_title(&url).await.unwrap_or_else(|| url.clone()),
    };

    let bookmark = store
        .add(&url, &name, &tags)
        .context("Failed to add bookmark")?;

    output.success(&format!(
        "Added bookmark: {} ({})",
        bookmark.name, bookmark.url
    ));
    if output.is_quiet() {
        output.print_bookmark(&bookmark);
    }

    Ok(())
}

/// List bookmarks, optionally narrowed by an index expression
pub fn list(store: &BookmarkStore, indices: Option<&str>, output: &Output) -> Result<()> {
    let bookmarks = select(store, indices)?;
    output.print_bookmarks(&bookmarks);
    Ok(())
}

/// Update bookmarks interactively
pub fn update(store: &mut BookmarkStore, indices: Option<&str>, output: &Output) -> Result<()> {
    let bookmarks = select(store, indices)?;

    if bookmarks.is_empty() {
        output.message("No bookmarks found to update.");
        return Ok(());
    }

    for bookmark in bookmarks {
        println!();
        println!("Updating bookmark {}: {}", bookmark.id, bookmark.name);

        let mut patch = BookmarkPatch::default();

        if let Some(url) = prompt_with_default("  URL", &bookmark.url)? {
            patch.url = Some(url);
        }
        if let Some(name) = prompt_with_default("  Name", &bookmark.name)? {
            patch.name = Some(name);
        }

        let current_tags = bookmark.tags.join(", ");
        if let Some(tags) = prompt_with_default("  Tags (comma-separated)", &current_tags)? {
            patch.tags = Some(split_tags(&tags));
        }

        if patch.is_empty() {
            println!("  Unchanged.");
            continue;
        }

        store
            .update(bookmark.id, &patch)
            .context("Failed to update bookmark")?;
        println!("  Updated.");
    }

    Ok(())
}

/// Delete bookmarks by index expression
pub fn delete(store: &mut BookmarkStore, indices: &str, output: &Output) -> Result<()> {
    let ids = selection::parse(indices);

    if ids.is_empty() {
        output.message("No valid indices provided.");
        return Ok(());
    }

    if output.should_prompt() {
        let targets = store
            .get_by_ids(&ids)
            .context("Failed to load bookmarks")?;
        if targets.is_empty() {
            output.message("No bookmarks found for given indices.");
            return Ok(());
        }
        for bookmark in &targets {
            println!("{:3}: {} - {}", bookmark.id, bookmark.name, bookmark.url);
        }
        if !confirm("Delete these bookmarks?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let deleted = store.delete(&ids).context("Failed to delete bookmarks")?;

    if deleted.is_empty() {
        output.message("No bookmarks found for given indices.");
    } else {
        output.success(&format!(
            "Deleted bookmarks with indices: {}",
            deleted
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }

    Ok(())
}

/// Open bookmarks in the default browser
pub fn open(store: &BookmarkStore, indices: Option<&str>, output: &Output) -> Result<()> {
    let expression = match indices {
        Some(expression) => expression.to_string(),
        None => prompt_line("Enter bookmark ID(s) to open")?,
    };

    let bookmarks = select(store, Some(&expression))?;

    if bookmarks.is_empty() {
        output.message("No bookmarks found for given indices.");
        return Ok(());
    }

    for bookmark in bookmarks {
        output.message(&format!("Opening: {} ({})", bookmark.name, bookmark.url));
        open::that(&bookmark.url)
            .with_context(|| format!("Failed to open {}", bookmark.url))?;
    }

    Ok(())
}

/// Split a comma-separated tag string, dropping empty segments
fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
