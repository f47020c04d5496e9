//! Linkeep Server
//!
//! HTTP JSON API exposing bookmark CRUD for the web interface. This crate
//! is a thin serialization adapter: every endpoint maps directly onto a
//! `BookmarkStore` operation.

pub mod http;

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use linkeep_core::BookmarkStore;

/// Shared application state
///
/// The store sits behind a mutex so concurrent requests serialize their
/// access; id assignment stays atomic with the insert.
pub struct AppState {
    store: Mutex<BookmarkStore>,
}

impl AppState {
    pub fn new(store: BookmarkStore) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    pub(crate) fn store(&self) -> MutexGuard<'_, BookmarkStore> {
        // A poisoned lock means a handler panicked mid-request; the store
        // itself stays transactional, so keep serving.
        self.store
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/bookmarks", get(http::list_bookmarks))
        .route("/api/bookmarks", post(http::add_bookmark))
        .route("/api/bookmarks/{id}", put(http::update_bookmark))
        .route("/api/bookmarks/{id}", delete(http::delete_bookmark))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the server
pub async fn serve(addr: &str, state: Arc<AppState>) -> std::io::Result<()> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Linkeep server listening on {}", addr);
    axum::serve(listener, app).await
}
