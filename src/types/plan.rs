use std::path::PathBuf;

use super::safepath::SafePath;

/// One symlink to create: `link` inside `dir`, pointing at the absolute `source`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkAction {
    pub dir: SafePath,
    pub link: SafePath,
    pub source: PathBuf,
}

/// Validated, collision-free list of links for one mount root.
#[derive(Clone, Debug)]
pub struct MountPlan {
    pub root: PathBuf,
    pub actions: Vec<LinkAction>,
}

impl MountPlan {
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// How `unmount` treats the contents of a mount root.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TeardownMode {
    /// Refuse when anything other than directories and symlinks is present.
    #[default]
    Safe,
    /// Delete everything, real files included.
    Unsafe,
}

impl TeardownMode {
    #[must_use]
    pub const fn from_safe(safe: bool) -> Self {
        if safe {
            TeardownMode::Safe
        } else {
            TeardownMode::Unsafe
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TeardownMode::Safe => "safe",
            TeardownMode::Unsafe => "unsafe",
        }
    }
}
