//! Uploaded file storage: floorplan images and schedule CSVs.
//!
//! Client-supplied file names are reduced to their last path component and a
//! conservative character set before touching the filesystem, so an upload
//! can never escape its target directory.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::state::AppState;

/// URL prefix under which `UPLOAD_DIR` is served.
pub const FLOORPLAN_URL_PREFIX: &str = "/static/floorplans";

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("No file part")]
    MissingFile,
    #[error("No selected file")]
    NoFilename,
    #[error("Invalid file name: {0}")]
    InvalidFilename(String),
    #[error("Failed to read upload: {0}")]
    Read(String),
    #[error("Failed to store upload: {0}")]
    Io(#[from] std::io::Error),
}

/// Safe on-disk name for a client-supplied file name.
///
/// Keeps the final path component, replaces anything outside
/// `[A-Za-z0-9._-]` with `_`, and strips leading dots.
///
/// # Errors
///
/// Returns `NoFilename` for a blank name and `InvalidFilename` when nothing
/// usable is left.
pub fn sanitize_filename(raw: &str) -> Result<String, UploadError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(UploadError::NoFilename);
    }

    let last = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = last
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '_') {
        return Err(UploadError::InvalidFilename(raw.to_owned()));
    }
    Ok(cleaned.to_owned())
}

/// Write `bytes` to `dir/name`, creating `dir` if needed.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the write fails.
pub async fn store_file(dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf, UploadError> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(name);
    tokio::fs::write(&path, bytes).await?;
    Ok(path)
}

/// Store a floorplan image and make it the current floorplan. Returns its URL.
///
/// # Errors
///
/// Returns an error for an unusable file name or a failed write.
pub async fn save_floorplan(state: &AppState, filename: &str, bytes: &[u8]) -> Result<String, UploadError> {
    let name = sanitize_filename(filename)?;
    let path = store_file(&state.config.upload_dir, &name, bytes).await?;
    let url = format!("{FLOORPLAN_URL_PREFIX}/{name}");

    {
        let mut fp = state.floorplan.write().await;
        fp.floorplan_url = Some(url.clone());
        fp.mark_dirty();
    }
    info!(path = %path.display(), %url, bytes = bytes.len(), "floorplan stored");
    Ok(url)
}

/// Keep a copy of an uploaded schedule CSV in the data directory.
///
/// # Errors
///
/// Returns an error for an unusable file name or a failed write.
pub async fn save_schedule_file(state: &AppState, filename: &str, bytes: &[u8]) -> Result<PathBuf, UploadError> {
    let name = sanitize_filename(filename)?;
    let path = store_file(&state.config.data_dir, &name, bytes).await?;
    info!(path = %path.display(), bytes = bytes.len(), "schedule file stored");
    Ok(path)
}

/// URL of the current floorplan image, if one was uploaded.
pub async fn floorplan_url(state: &AppState) -> Option<String> {
    state.floorplan.read().await.floorplan_url.clone()
}
