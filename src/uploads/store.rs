//! Upload storage - timestamped naming and guarded resolution
//!
//! Files are written once under a fixed root and never modified. Serving
//! resolves request paths through canonicalization so nothing outside the
//! root is ever exposed.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::fs;

use super::filetype::{file_extension, ImageFormat};

/// Upload storage rooted at a fixed directory, created on demand.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write accepted bytes under the root as `{millis}.{ext}` and return
    /// the stored name.
    ///
    /// The extension must already have passed the allow-set; the name is
    /// generated here, so the store never writes a client-chosen path.
    /// Two uploads landing on the same millisecond overwrite each other.
    pub async fn save(&self, ext: &str, bytes: &[u8]) -> std::io::Result<String> {
        fs::create_dir_all(&self.root).await?;

        let name = format!("{}.{}", Utc::now().timestamp_millis(), ext);
        fs::write(self.root.join(&name), bytes).await?;

        Ok(name)
    }

    /// Resolve a request path to a regular file inside the root.
    ///
    /// Both sides are canonicalized; a resolution that escapes the root,
    /// does not exist, or is not a regular file yields `None`. Escapes
    /// are indistinguishable from missing files on purpose.
    pub async fn resolve(&self, request_path: &str) -> Option<PathBuf> {
        let request_path = request_path.trim_start_matches('/');
        if request_path.is_empty() {
            return None;
        }

        let root = fs::canonicalize(&self.root).await.ok()?;
        let candidate = fs::canonicalize(root.join(request_path)).await.ok()?;

        if !candidate.starts_with(&root) {
            return None;
        }

        let meta = fs::metadata(&candidate).await.ok()?;
        meta.is_file().then_some(candidate)
    }
}

/// Content type for a stored file, inferred from its extension.
/// Unknown extensions fall back to `application/octet-stream`.
pub fn content_type_for(path: &Path) -> &'static str {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    ImageFormat::from_extension(&file_extension(name))
        .map(ImageFormat::content_type)
        .unwrap_or("application/octet-stream")
}
