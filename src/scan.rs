//! Directory scans: turn the files under a location into a mount description.
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::constants::MATCH_ALL;
use crate::types::errors::{Error, ErrorKind, Result};
use crate::types::input::MountInput;
use crate::types::target::FileTarget;

/// What a scan collects and how it lays the result out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Glob patterns matched recursively beneath the location; empty means `*`.
    pub patterns: Vec<String>,
    /// Reproduce each file's subdirectory inside the mount root.
    pub keep_structure: bool,
}

impl ScanOptions {
    #[must_use]
    pub fn with_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn keep_structure(mut self, keep: bool) -> Self {
        self.keep_structure = keep;
        self
    }
}

const MATCH_OPTS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A regular file found under the scan base, with its path relative to it.
struct Candidate {
    path: PathBuf,
    rel: PathBuf,
}

/// Collect the regular files beneath `location` matching the scan patterns.
///
/// Each pattern is matched as `**/<pattern>` against the path relative to
/// `location`. Files come back in pattern order, each pattern's matches
/// sorted by path; a file matched again by a later pattern is skipped. Flat
/// scans yield a sequence of paths, keep-structure scans a sequence of
/// pre-built targets whose directory is the file's parent relative to
/// `location`.
///
/// Symlinks to files are collected; symlinked directories are not descended
/// into, so aliases and loops inside the location add nothing. Paths need
/// not be valid UTF-8: names are matched on their lossy form, where each
/// invalid sequence becomes U+FFFD and is matched by `?` or `*` only.
///
/// # Errors
///
/// `InvalidLocation` when `location` is not a directory, `InvalidInput` for a
/// malformed pattern, `Io` if a directory cannot be read.
pub fn scan_location(location: &Path, options: &ScanOptions) -> Result<MountInput> {
    if !location.is_dir() {
        return Err(Error::new(
            ErrorKind::InvalidLocation,
            format!("{} is not a directory", location.display()),
        ));
    }
    let base = std::path::absolute(location)?;

    let default_patterns = [MATCH_ALL.to_string()];
    let raw: &[String] = if options.patterns.is_empty() {
        &default_patterns
    } else {
        &options.patterns
    };
    let patterns = raw
        .iter()
        .map(|pat| {
            Pattern::new(&format!("**/{pat}")).map_err(|e| {
                Error::new(ErrorKind::InvalidInput, format!("bad pattern `{pat}`: {e}"))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut candidates = Vec::new();
    walk(&base, Path::new(""), &mut candidates)?;
    candidates.sort_by(|a, b| a.path.cmp(&b.path));

    let mut seen: HashSet<&Path> = HashSet::new();
    let mut files: Vec<&Candidate> = Vec::new();
    for pat in &patterns {
        for c in &candidates {
            if pat.matches_with(&c.rel.to_string_lossy(), MATCH_OPTS) && seen.insert(&c.path) {
                files.push(c);
            }
        }
    }
    log::debug!("scan of {} matched {} file(s)", base.display(), files.len());

    if !options.keep_structure {
        return Ok(MountInput::Sequence(
            files
                .into_iter()
                .map(|c| MountInput::Leaf(c.path.clone()))
                .collect(),
        ));
    }
    let items = files
        .into_iter()
        .map(|c| {
            let dir = c.rel.parent().map(Path::to_path_buf).unwrap_or_default();
            MountInput::Target(FileTarget::new(c.path.clone(), dir))
        })
        .collect();
    Ok(MountInput::Sequence(items))
}

// Depth-first over real directories only; entry types come from lstat.
fn walk(dir: &Path, rel: &Path, out: &mut Vec<Candidate>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let rel = rel.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            walk(&path, &rel, out)?;
        } else if path.is_file() {
            out.push(Candidate { path, rel });
        }
    }
    Ok(())
}
