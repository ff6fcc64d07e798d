//! Static file loading
//!
//! Maps request paths under the server root and reads them from disk.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Result, ServerError};

/// File served for paths ending in `/`
pub const INDEX_FILE: &str = "index.html";

// == Resolve ==
/// Maps a URL path onto a file below `root`.
///
/// The returned path, rendered as a string, is the cache key for the
/// request. No case folding or slash collapsing is done beyond stripping the
/// leading `/`.
///
/// # Errors
/// Returns `ServerError::Forbidden` if any segment is `..`.
pub fn resolve(root: &Path, request_path: &str) -> Result<PathBuf> {
    let relative = request_path.trim_start_matches('/');

    if relative.split('/').any(|segment| segment == "..") {
        return Err(ServerError::Forbidden(request_path.to_string()));
    }

    let mut full_path = root.join(relative);
    if relative.is_empty() || relative.ends_with('/') {
        full_path.push(INDEX_FILE);
    }

    Ok(full_path)
}

// == Load ==
/// Reads a whole file. Missing files, directories and unreadable files all
/// come back as `None`.
pub async fn load(path: &Path) -> Option<Vec<u8>> {
    match tokio::fs::read(path).await {
        Ok(data) => {
            debug!(path = %path.display(), size = data.len(), "loaded file from disk");
            Some(data)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "file not found");
            None
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read file");
            None
        }
    }
}
