//! Path display utilities for consistent output formatting.

use std::path::Path;

/// Format a path for display, relative to `root` when it lies below it.
///
/// Separators are always `/`. Returns `"."` when `path` equals `root`.
#[must_use]
pub fn display_path(path: &Path, root: Option<&Path>) -> String {
    let shown = root
        .and_then(|root| path.strip_prefix(root).ok())
        .unwrap_or(path);

    let result = normalize_separators(&shown.to_string_lossy());
    if result.is_empty() {
        ".".to_string()
    } else {
        result
    }
}

/// Normalize path separators to forward slashes.
#[must_use]
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}
