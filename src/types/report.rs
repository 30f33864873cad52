use std::path::PathBuf;

/// What an unmount call did to the location it was given.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnmountOutcome {
    /// The tree is gone.
    Removed,
    /// Safe mode found real files; nothing was deleted.
    Refused,
    /// Nothing existed at the location.
    NotFound,
}

#[derive(Clone, Debug)]
pub struct UnmountReport {
    pub location: PathBuf,
    pub outcome: UnmountOutcome,
    /// Entries that are neither directories nor symlinks; set on refusal.
    pub offending: Vec<PathBuf>,
    pub duration_ms: u64,
}

impl UnmountReport {
    #[must_use]
    pub fn removed(&self) -> bool {
        self.outcome == UnmountOutcome::Removed
    }

    #[must_use]
    pub fn refused(&self) -> bool {
        self.outcome == UnmountOutcome::Refused
    }

    /// Human-readable one-liner, as printed by the CLI.
    #[must_use]
    pub fn summary(&self) -> String {
        match self.outcome {
            UnmountOutcome::Removed => {
                format!("successfully unmounted {}", self.location.display())
            }
            UnmountOutcome::Refused => format!(
                "found {} non symlink file(s) in {}, safe mode skipped deletion",
                self.offending.len(),
                self.location.display()
            ),
            UnmountOutcome::NotFound => format!("{} was not mounted", self.location.display()),
        }
    }
}
