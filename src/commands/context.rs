use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexSet;

use crate::output::{ColorMode, ErrorOutput};
use crate::{CodelError, EXIT_CONFIG_ERROR, EXIT_RUNTIME_ERROR, Result};

/// Canonical absolute form of `folder`, without `\\?\` prefixes on Windows.
///
/// # Errors
/// Returns [`CodelError::NotFound`] if `folder` does not exist or is not a
/// directory.
pub fn resolve_folder(folder: &Path) -> Result<PathBuf> {
    let resolved =
        dunce::canonicalize(folder).map_err(|_| CodelError::NotFound(folder.to_path_buf()))?;
    if !resolved.is_dir() {
        return Err(CodelError::NotFound(folder.to_path_buf()));
    }
    Ok(resolved)
}

/// Add a leading dot where missing and drop repeats, keeping first-seen order.
///
/// `"py"` and `".py"` name the same extension. Blank entries are skipped.
#[must_use]
pub fn normalize_extensions<I, S>(extensions: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let set: IndexSet<String> = extensions
        .into_iter()
        .filter_map(|ext| {
            let ext = ext.as_ref().trim();
            if ext.is_empty() {
                None
            } else if ext.starts_with('.') {
                Some(ext.to_string())
            } else {
                Some(format!(".{ext}"))
            }
        })
        .collect();
    set.into_iter().collect()
}

/// Write `content` to `output_path`, or to stdout when no path is given.
///
/// # Errors
/// Returns an error if the file or its parent directories cannot be written.
pub fn write_output(output_path: Option<&Path>, content: &str) -> Result<()> {
    if let Some(path) = output_path {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| CodelError::FileAccess {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, content).map_err(|source| CodelError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "report written");
    } else {
        print!("{content}");
    }
    Ok(())
}

#[must_use]
pub const fn exit_code_for(error: &CodelError) -> i32 {
    if error.is_config_error() {
        EXIT_CONFIG_ERROR
    } else {
        EXIT_RUNTIME_ERROR
    }
}

/// Print `error` on stderr and map it to an exit code.
pub(crate) fn report_error(error: &CodelError, color: ColorMode) -> i32 {
    tracing::debug!("command failed: {error:?}");
    ErrorOutput::new(color).print(error);
    exit_code_for(error)
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
