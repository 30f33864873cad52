use std::path::PathBuf;

use super::types::{CollisionPolicy, MissingRootPolicy, MountPolicy, TeardownPolicy};

/// Policy governs how mounts are laid out and how teardown treats edge cases.
///
/// `Policy::default()` is what the free `mount`/`unmount` functions use.
#[derive(Clone, Debug, Default)]
pub struct Policy {
    pub mount: MountPolicy,
    pub teardown: TeardownPolicy,
    /// Emit facts with a zeroed `ts` and no `duration_ms`.
    pub redact_facts: bool,
}

impl Policy {
    /// Last link wins on collisions instead of failing the mount.
    #[must_use]
    pub fn with_replace_on_collision(mut self) -> Self {
        self.mount.collisions = CollisionPolicy::Replace;
        self
    }

    /// Root new mounts under `prefix` unless a call supplies its own.
    #[must_use]
    pub fn with_tmp_prefix(mut self, prefix: impl Into<PathBuf>) -> Self {
        self.mount.tmp_prefix = Some(prefix.into());
        self
    }

    /// Facts become byte-stable across runs; meant for golden comparisons.
    #[must_use]
    pub fn with_redacted_facts(mut self) -> Self {
        self.redact_facts = true;
        self
    }

    /// Unmounting a missing location fails instead of reporting `NotFound`.
    #[must_use]
    pub fn strict_teardown(mut self) -> Self {
        self.teardown.missing = MissingRootPolicy::Error;
        self
    }
}
