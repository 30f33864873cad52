//! Symlink creation through directory handles.
//!
//! Links are created with `symlinkat` relative to a parent opened with
//! `O_DIRECTORY | O_NOFOLLOW`, so a directory swapped for a symlink between
//! `create_dir_all` and the link call cannot redirect the link elsewhere.
use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use rustix::fd::OwnedFd;
use rustix::fs::{openat, symlinkat, Mode, OFlags, CWD};
use rustix::io::Errno;

pub(crate) fn errno_to_io(e: Errno) -> std::io::Error {
    std::io::Error::from_raw_os_error(e.raw_os_error())
}

/// Open a directory with `O_DIRECTORY | O_NOFOLLOW`.
///
/// # Errors
///
/// Returns an IO error if the path is missing, not a directory, or a symlink.
pub fn open_dir_nofollow(dir: &Path) -> std::io::Result<OwnedFd> {
    openat(
        CWD,
        dir,
        OFlags::RDONLY | OFlags::DIRECTORY | OFlags::CLOEXEC | OFlags::NOFOLLOW,
        Mode::empty(),
    )
    .map_err(errno_to_io)
}

/// Open the child directory `name` of an already-open directory, without following symlinks.
pub(crate) fn open_child_dir_nofollow(parent: &OwnedFd, name: &std::ffi::CStr) -> std::io::Result<OwnedFd> {
    openat(
        parent,
        name,
        OFlags::RDONLY | OFlags::DIRECTORY | OFlags::CLOEXEC | OFlags::NOFOLLOW,
        Mode::empty(),
    )
    .map_err(errno_to_io)
}

/// Create the directory `dir` (and its parents) then a link `dir/name -> source`.
///
/// An existing entry of that name is left alone and reported as
/// `AlreadyExists`; the mount plan has already settled collisions.
///
/// # Errors
///
/// Returns an IO error if the directory cannot be created or opened, or the
/// link cannot be created.
pub fn create_link(dir: &Path, name: &OsStr, source: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)?;
    let dirfd = open_dir_nofollow(dir)?;
    symlinkat(source, &dirfd, name).map_err(errno_to_io)
}
