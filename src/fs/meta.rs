//! Filesystem metadata helpers used by planning and teardown.
//!
//! All probes use `symlink_metadata`, so a symlink is reported as a symlink
//! and never as whatever it points at.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Kind of filesystem node found at a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Dir,
    Symlink,
    Other,
    Missing,
}

impl NodeKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            NodeKind::File => "file",
            NodeKind::Dir => "dir",
            NodeKind::Symlink => "symlink",
            NodeKind::Other => "other",
            NodeKind::Missing => "missing",
        }
    }

    /// Kinds a safe unmount is allowed to delete.
    pub const fn is_link_tree_node(&self) -> bool {
        matches!(self, NodeKind::Dir | NodeKind::Symlink)
    }
}

impl From<fs::FileType> for NodeKind {
    fn from(ft: fs::FileType) -> Self {
        if ft.is_symlink() {
            NodeKind::Symlink
        } else if ft.is_dir() {
            NodeKind::Dir
        } else if ft.is_file() {
            NodeKind::File
        } else {
            NodeKind::Other
        }
    }
}

/// Classify the node at `path` without following a final symlink.
pub fn kind_of(path: &Path) -> NodeKind {
    match fs::symlink_metadata(path) {
        Ok(md) => md.file_type().into(),
        Err(_) => NodeKind::Missing,
    }
}

/// Absolute, symlink-free form of `path`.
///
/// A source that does not exist still resolves: its nearest existing ancestor
/// is canonicalized and the missing tail appended, which yields a dangling link
/// target rather than an error.
///
/// # Errors
///
/// Returns an IO error if the current directory cannot be read or an
/// existing ancestor cannot be canonicalized.
pub fn resolve_source(path: &Path) -> io::Result<PathBuf> {
    match fs::canonicalize(path) {
        Ok(p) => return Ok(p),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    let absolute = std::path::absolute(path)?;
    let mut tail = Vec::new();
    let mut cursor = absolute.as_path();
    loop {
        match fs::canonicalize(cursor) {
            Ok(mut base) => {
                base.extend(tail.iter().rev());
                return Ok(base);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        let Some((parent, name)) = cursor.parent().zip(cursor.file_name()) else {
            break;
        };
        tail.push(name.to_os_string());
        cursor = parent;
    }
    Ok(absolute)
}
