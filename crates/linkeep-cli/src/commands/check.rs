//! Link checking command

use anyhow::{Context, Result};
use futures_util::{pin_mut, StreamExt};

use linkeep_core::{BookmarkStore, LinkChecker};

use crate::commands::bookmark::select;
use crate::output::Output;

/// Check selected bookmarks for liveness, streaming results as they arrive
pub async fn run(store: &BookmarkStore, indices: Option<&str>, output: &Output) -> Result<()> {
    let bookmarks = select(store, indices)?;

    if bookmarks.is_empty() {
        output.message("No bookmarks to check.");
        return Ok(());
    }

    output.message(&format!("Checking {} bookmarks...", bookmarks.len()));

    let checker = LinkChecker::new().context("Failed to build HTTP client")?;
    let results = checker.check_all(bookmarks);
    pin_mut!(results);

    let mut dead = 0usize;
    while let Some((bookmark, status)) = results.next().await {
        if !status.alive {
            dead += 1;
        }
        output.print_check_result(&bookmark, &status);
    }

    if dead > 0 {
        output.message(&format!("{} link(s) unreachable", dead));
    }

    Ok(())
}
