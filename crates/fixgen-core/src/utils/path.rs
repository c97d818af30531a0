//! Path helpers for writing fixtures below a root directory.
//!
//! Folder and package names come from datasets and config files, so they are
//! checked before being joined onto the output root.

use crate::error::{FixResult, FixtureError};
use std::path::{Component, Path, PathBuf};

/// Check if a relative path stays inside its base directory
pub fn is_safe_path(path: &Path) -> bool {
    if path.as_os_str().is_empty() || path.is_absolute() {
        return false;
    }

    let mut depth = 0i32;
    for component in path.components() {
        match component {
            Component::CurDir => {},
            Component::ParentDir => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            Component::Normal(_) => depth += 1,
            // RootDir and Prefix
            _ => return false,
        }
    }

    depth > 0
}

/// Join `path` onto `base`, refusing anything that escapes `base`
pub fn safe_join(base: &Path, path: impl AsRef<Path>) -> FixResult<PathBuf> {
    let path = path.as_ref();
    if !is_safe_path(path) {
        return Err(FixtureError::ConfigValidation {
            field: "path".to_string(),
            reason: format!("'{}' must be a relative path below the output root", path.display()),
        });
    }

    Ok(base.join(path))
}
