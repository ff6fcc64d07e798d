//! Upload storage for the save endpoint.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;

// == Save Body ==
/// Writes `body` to `save_<unix millis>.txt` inside `dir`, creating the
/// directory if needed. An existing file with the same name is truncated.
///
/// # Errors
/// Any I/O failure is returned as `ServerError::Internal`.
pub async fn save_body(dir: &Path, body: &[u8]) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;

    let file_name = format!("save_{}.txt", chrono::Utc::now().timestamp_millis());
    let path = dir.join(file_name);
    tokio::fs::write(&path, body).await?;

    info!(path = %path.display(), size = body.len(), "saved upload");
    Ok(path)
}
