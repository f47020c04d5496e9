//! Web interface command

use std::sync::Arc;

use anyhow::{Context, Result};

use linkeep_core::{BookmarkStore, Config};
use linkeep_server::AppState;

use crate::output::Output;

/// Run the HTTP JSON server over the store
pub async fn run(
    store: BookmarkStore,
    config: &Config,
    port: Option<u16>,
    output: &Output,
) -> Result<()> {
    let port = port.unwrap_or(config.server_port);
    let addr = format!("0.0.0.0:{}", port);

    output.message(&format!("Starting linkeep server on http://localhost:{}", port));

    let state = Arc::new(AppState::new(store));
    linkeep_server::serve(&addr, state)
        .await
        .context("Server failed")
}
