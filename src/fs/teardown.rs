//! Mount root teardown.
//!
//! `find_foreign_entries` is the safe-mode scan. `remove_link_tree` is the
//! safe-mode delete: it walks directory handles, unlinks symlinks, removes
//! directories bottom-up and stops at the first entry of any other type, so a
//! regular file dropped in after the scan is never deleted.
use std::ffi::{CStr, CString, OsStr};
use std::fs;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use rustix::fd::OwnedFd;
use rustix::fs::{statat, unlinkat, AtFlags, Dir, FileType};

use super::link::{errno_to_io, open_child_dir_nofollow, open_dir_nofollow};
use super::meta::NodeKind;

/// Every entry beneath `root` that is neither a directory nor a symlink.
///
/// Symlinks are never followed; a symlink to a directory counts as a symlink.
///
/// # Errors
///
/// Returns an IO error if a directory cannot be listed.
pub fn find_foreign_entries(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    collect_foreign(root, &mut out)?;
    Ok(out)
}

fn collect_foreign(dir: &Path, out: &mut Vec<PathBuf>) -> io::Result<()> {
    let mut entries = fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(fs::DirEntry::file_name);
    for entry in entries {
        let path = entry.path();
        let kind = NodeKind::from(entry.file_type()?);
        if kind == NodeKind::Dir {
            collect_foreign(&path, out)?;
        } else if !kind.is_link_tree_node() {
            out.push(path);
        }
    }
    Ok(())
}

/// Delete a tree made only of directories and symlinks.
///
/// # Errors
///
/// Returns an IO error if `root` is not a real directory, or if an entry
/// other than a directory or symlink is met; in that case the entries visited
/// so far are gone and the rest is left in place.
pub fn remove_link_tree(root: &Path) -> io::Result<()> {
    let dirfd = open_dir_nofollow(root)?;
    remove_dir_contents(&dirfd, root)?;
    drop(dirfd);
    fs::remove_dir(root)
}

fn remove_dir_contents(dirfd: &OwnedFd, at: &Path) -> io::Result<()> {
    let mut names: Vec<CString> = Vec::new();
    for entry in Dir::read_from(dirfd).map_err(errno_to_io)? {
        let entry = entry.map_err(errno_to_io)?;
        let name = entry.file_name();
        if is_dot(name) {
            continue;
        }
        names.push(name.to_owned());
    }

    for name in names {
        let st = statat(dirfd, name.as_c_str(), AtFlags::SYMLINK_NOFOLLOW).map_err(errno_to_io)?;
        match FileType::from_raw_mode(st.st_mode as _) {
            FileType::Symlink => {
                unlinkat(dirfd, name.as_c_str(), AtFlags::empty()).map_err(errno_to_io)?;
            }
            FileType::Directory => {
                let child_path = at.join(OsStr::from_bytes(name.to_bytes()));
                let child = open_child_dir_nofollow(dirfd, name.as_c_str())?;
                remove_dir_contents(&child, &child_path)?;
                drop(child);
                unlinkat(dirfd, name.as_c_str(), AtFlags::REMOVEDIR).map_err(errno_to_io)?;
            }
            _ => {
                return Err(io::Error::other(format!(
                    "refusing to delete {}: not a symlink or directory",
                    at.join(OsStr::from_bytes(name.to_bytes())).display()
                )));
            }
        }
    }
    Ok(())
}

fn is_dot(name: &CStr) -> bool {
    matches!(name.to_bytes(), b"." | b"..")
}
