use mime_guess::from_path;
use tracing::info;

use crate::config::EXPORT_FILE_NAME;
use crate::core::errors::AppResult;
use crate::models::models::Store;
use crate::widgets::Download;

/// Whole store as a pretty-printed JSON file.
pub fn export_store(store: &Store) -> AppResult<Download> {
    let body = serde_json::to_string_pretty(store).map_err(anyhow::Error::from)?;
    info!(bytes = body.len(), "exported store");
    Ok(Download {
        file_name: EXPORT_FILE_NAME.to_string(),
        content_type: from_path(EXPORT_FILE_NAME).first_or_octet_stream().to_string(),
        body,
    })
}

/// Parses a backup. Nothing is merged: the result replaces the store.
pub fn parse_import(json: &str) -> AppResult<Store> {
    let store: Store = serde_json::from_str(json)?;
    info!(posts = store.posts.len(), users = store.users.len(), "imported store");
    Ok(store)
}
