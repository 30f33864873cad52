use std::path::PathBuf;

use crate::constants::DEFAULT_DIR_PREFIX;

/// What to do when two links claim the same path in a mount root.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Abort the mount with `LinkCollision`.
    #[default]
    Fail,
    /// Keep the last link planned for that path.
    Replace,
}

/// What `unmount` does when the location does not exist.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MissingRootPolicy {
    /// Report `NotFound` and succeed.
    #[default]
    Ignore,
    /// Fail with `InvalidLocation`.
    Error,
}

#[derive(Clone, Debug)]
pub struct MountPolicy {
    /// Parent for new mount roots when the caller passes none.
    pub tmp_prefix: Option<PathBuf>,
    /// Name prefix of mount root directories.
    pub dir_prefix: String,
    pub collisions: CollisionPolicy,
}

impl Default for MountPolicy {
    fn default() -> Self {
        Self {
            tmp_prefix: None,
            dir_prefix: DEFAULT_DIR_PREFIX.to_string(),
            collisions: CollisionPolicy::default(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct TeardownPolicy {
    pub missing: MissingRootPolicy,
}
