//! Static files served next to the config page.

use std::path::{Component, Path, PathBuf};

/// A directory static files are looked up in.
#[derive(Debug, Clone)]
pub struct AssetDir {
    root: PathBuf,
}

impl AssetDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Maps a request target to a path under the root.
    ///
    /// The query string is ignored. Targets that are empty or that contain
    /// anything but plain path segments (`..`, `.`, roots) map to nothing.
    pub fn resolve(&self, target: &str) -> Option<PathBuf> {
        let path = target.split('?').next().unwrap_or_default();
        let relative = path.trim_start_matches('/');
        if relative.is_empty() || relative.contains('\\') {
            return None;
        }

        let relative = Path::new(relative);
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return None;
        }

        Some(self.root.join(relative))
    }
}

/// Content type by file extension.
pub fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "css" => "text/css",
        "js" => "application/javascript",
        "html" | "htm" => "text/html",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}
