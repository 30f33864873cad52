use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One source file and the directory, relative to the mount root, that will hold its link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTarget {
    pub source_file: PathBuf,
    pub target_location: PathBuf,
}

impl FileTarget {
    pub fn new(source_file: impl Into<PathBuf>, target_location: impl Into<PathBuf>) -> Self {
        Self {
            source_file: source_file.into(),
            target_location: target_location.into(),
        }
    }

    /// Name the link will carry: the final component of the unresolved source.
    pub fn link_name(&self) -> Option<&std::ffi::OsStr> {
        self.source_file.file_name()
    }
}
