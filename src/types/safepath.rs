use std::path::{Component, Path, PathBuf};

use super::errors::{Error, ErrorKind, Result};

/// A path anchored under a mount root.
///
/// Construction normalizes `.` segments and rejects anything that could land
/// outside the root: `..` segments, absolute paths elsewhere on disk, and
/// platform prefixes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SafePath {
    root: PathBuf,
    rel: PathBuf,
}

impl SafePath {
    /// Anchor `candidate` under `root`.
    ///
    /// Relative candidates are taken as relative to `root`; absolute ones must
    /// already live beneath it. `root` must be absolute.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error when the candidate escapes the root or
    /// carries an unsupported component.
    pub fn from_rooted(root: &Path, candidate: &Path) -> Result<Self> {
        if !root.is_absolute() {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("mount root {} must be absolute", root.display()),
            ));
        }
        let escapes = || {
            Error::new(
                ErrorKind::InvalidInput,
                format!("{} escapes the mount root", candidate.display()),
            )
        };
        let effective = if candidate.is_absolute() {
            candidate.strip_prefix(root).map_err(|_| escapes())?
        } else {
            candidate
        };

        let mut rel = PathBuf::new();
        for seg in effective.components() {
            match seg {
                Component::CurDir => {}
                Component::Normal(p) => rel.push(p),
                Component::ParentDir => return Err(escapes()),
                Component::RootDir | Component::Prefix(_) => {
                    return Err(Error::new(
                        ErrorKind::InvalidInput,
                        format!("unsupported component in {}", candidate.display()),
                    ))
                }
            }
        }
        Ok(SafePath {
            root: root.to_path_buf(),
            rel,
        })
    }

    /// Full on-disk path.
    pub fn as_path(&self) -> PathBuf {
        self.root.join(&self.rel)
    }

    /// Path relative to the mount root; empty for the root itself.
    pub fn rel(&self) -> &Path {
        &self.rel
    }

    /// A child of this path, checked the same way.
    ///
    /// # Errors
    ///
    /// Same as [`SafePath::from_rooted`].
    pub fn join(&self, child: &Path) -> Result<Self> {
        Self::from_rooted(&self.root, &self.rel.join(child))
    }
}
