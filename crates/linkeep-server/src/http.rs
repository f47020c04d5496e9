//! HTTP endpoint handlers

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use linkeep_core::{Bookmark, BookmarkPatch, StorageError};

use crate::AppState;

/// Wire shape of a bookmark, matching the web client
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkResponse {
    pub id: String,
    pub title: String,
    pub url: String,
    pub tags: Vec<String>,
    pub created_at: String,
}

impl From<&Bookmark> for BookmarkResponse {
    fn from(bookmark: &Bookmark) -> Self {
        Self {
            id: bookmark.id.to_string(),
            title: bookmark.name.clone(),
            url: bookmark.url.clone(),
            tags: bookmark.tags.clone(),
            created_at: bookmark.created_at.to_rfc3339(),
        }
    }
}

/// Request body for creating a bookmark
///
/// The web client sends `title`; `name` is accepted as an alias. A missing
/// name defaults to "unnamed".
#[derive(Debug, Deserialize)]
pub struct AddBookmarkRequest {
    pub url: String,
    pub title: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request body for a partial update; absent fields keep their value
#[derive(Debug, Deserialize)]
pub struct UpdateBookmarkRequest {
    pub url: Option<String>,
    pub title: Option<String>,
    pub name: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// List all bookmarks
pub async fn list_bookmarks(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BookmarkResponse>>, (StatusCode, String)> {
    let store = state.store();
    let bookmarks = store.list_all().map_err(internal_error)?;

    Ok(Json(bookmarks.iter().map(BookmarkResponse::from).collect()))
}

/// Add a bookmark
pub async fn add_bookmark(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddBookmarkRequest>,
) -> Result<(StatusCode, Json<BookmarkResponse>), (StatusCode, String)> {
    let name = request
        .title
        .or(request.name)
        .unwrap_or_else(|| "unnamed".to_string());

    let mut store = state.store();
    let bookmark = store
        .add(&request.url, &name, &request.tags)
        .map_err(internal_error)?;

    Ok((StatusCode::CREATED, Json(BookmarkResponse::from(&bookmark))))
}

/// Partially update a bookmark
pub async fn update_bookmark(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateBookmarkRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let patch = BookmarkPatch {
        url: request.url,
        name: request.title.or(request.name),
        tags: request.tags,
    };

    let mut store = state.store();
    let updated = store.update(id, &patch).map_err(internal_error)?;

    if !updated {
        return Err((StatusCode::NOT_FOUND, "Not found".to_string()));
    }

    Ok(Json(serde_json::json!({"status": "success"})))
}

/// Delete a bookmark
///
/// Deleting an id that doesn't exist is still success (idempotent).
pub async fn delete_bookmark(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let mut store = state.store();
    store
        .delete(&BTreeSet::from([id]))
        .map_err(internal_error)?;

    Ok(Json(serde_json::json!({"status": "success"})))
}

fn internal_error(err: StorageError) -> (StatusCode, String) {
    tracing::error!("storage error: {}", err);
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkeep_core::BookmarkStore;

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState::new(BookmarkStore::open_in_memory().unwrap()))
    }

    async fn add(
        state: &Arc<AppState>,
        url: &str,
        title: Option<&str>,
        tags: Vec<String>,
    ) -> BookmarkResponse {
        let (status, Json(response)) = add_bookmark(
            State(state.clone()),
            Json(AddBookmarkRequest {
                url: url.to_string(),
                title: title.map(str::to_string),
                name: None,
                tags,
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        response
    }

    #[tokio::test]
    async fn test_add_and_list() {
        let state = test_state();

        let added = add(&state, "http://a", Some("A"), vec!["x".to_string()]).await;
        assert_eq!(added.title, "A");

        let Json(listed) = list_bookmarks(State(state)).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].url, "http://a");
        assert_eq!(listed[0].tags, vec!["x"]);
    }

    #[tokio::test]
    async fn test_add_defaults_name_to_unnamed() {
        let state = test_state();

        let added = add(&state, "http://a", None, vec![]).await;
        assert_eq!(added.title, "unnamed");
    }

    #[tokio::test]
    async fn test_update_applies_partial_patch() {
        let state = test_state();
        let added = add(&state, "http://a", Some("A"), vec![]).await;
        let id: i64 = added.id.parse().unwrap();

        update_bookmark(
            State(state.clone()),
            Path(id),
            Json(UpdateBookmarkRequest {
                url: None,
                title: Some("Renamed".to_string()),
                name: None,
                tags: None,
            }),
        )
        .await
        .unwrap();

        let Json(listed) = list_bookmarks(State(state)).await.unwrap();
        assert_eq!(listed[0].title, "Renamed");
        assert_eq!(listed[0].url, "http://a");
    }

    #[tokio::test]
    async fn test_update_missing_id_is_404() {
        let state = test_state();

        let result = update_bookmark(
            State(state),
            Path(999),
            Json(UpdateBookmarkRequest {
                url: None,
                title: Some("X".to_string()),
                name: None,
                tags: None,
            }),
        )
        .await;

        let (status, _) = result.unwrap_err();
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let state = test_state();
        let added = add(&state, "http://a", Some("A"), vec![]).await;
        let id: i64 = added.id.parse().unwrap();

        delete_bookmark(State(state.clone()), Path(id)).await.unwrap();
        // Second delete of the same id still succeeds
        delete_bookmark(State(state.clone()), Path(id)).await.unwrap();

        let Json(listed) = list_bookmarks(State(state)).await.unwrap();
        assert!(listed.is_empty());
    }
}
