use std::path::{Path, PathBuf};

use crate::types::errors::{Error, ErrorKind, Result};

/// Check that a caller-supplied prefix exists as a directory.
///
/// # Errors
///
/// Returns `InvalidPrefix` otherwise. Nothing is ever created here.
pub fn check_prefix(prefix: &Path) -> Result<()> {
    if prefix.is_dir() {
        Ok(())
    } else {
        Err(Error::new(
            ErrorKind::InvalidPrefix,
            format!("prefix {} must be an existing directory", prefix.display()),
        ))
    }
}

/// Create a fresh, uniquely named mount root and hand over its ownership.
///
/// The root lands under `prefix` when given (made absolute first), else under
/// the system temp dir. Unlike a `TempDir`, the returned path is not removed
/// on drop; `unmount` owns its removal.
///
/// # Errors
///
/// Returns `InvalidPrefix` for a missing prefix, or an IO error if the
/// directory cannot be created.
pub fn create_mount_root(prefix: Option<&Path>, dir_prefix: &str) -> Result<PathBuf> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(dir_prefix);
    let td = match prefix {
        Some(p) => {
            check_prefix(p)?;
            builder.tempdir_in(std::path::absolute(p)?)?
        }
        None => builder.tempdir()?,
    };
    let root = td.keep();
    log::debug!("created mount root {}", root.display());
    Ok(root)
}
