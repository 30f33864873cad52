// Facade for the API module; delegates to submodules under src/api/

use std::path::{Path, PathBuf};

use log::Level;
use serde_json::json;

use crate::index::{extract_key, IndexLoader, LoadedIndex, YamlParser};
use crate::logging::audit::AuditCtx;
use crate::logging::{now_iso, AuditSink, FactsEmitter, JsonlSink, StageLogger};
use crate::policy::Policy;
use crate::scan::{scan_location, ScanOptions};
use crate::types::errors::{Error, ErrorKind, Result};
use crate::types::ids::location_id;
use crate::types::input::MountInput;
use crate::types::plan::TeardownMode;
use crate::types::report::UnmountReport;
use crate::types::target::FileTarget;

mod builder;
pub mod errors;
mod mount;
mod plan;
mod resolve;
mod unmount;

pub use builder::ApiBuilder;
pub use resolve::resolve;

pub struct VDataset<E: FactsEmitter, A: AuditSink> {
    facts: E,
    audit: A,
    policy: Policy,
    loader: IndexLoader,
}

impl Default for VDataset<JsonlSink, JsonlSink> {
    fn default() -> Self {
        Self::new(JsonlSink, JsonlSink, Policy::default())
    }
}

impl<E: FactsEmitter, A: AuditSink> VDataset<E, A> {
    pub fn new(facts: E, audit: A, policy: Policy) -> Self {
        Self {
            facts,
            audit,
            policy,
            loader: IndexLoader::default(),
        }
    }

    pub fn builder(facts: E, audit: A) -> ApiBuilder<E, A> {
        ApiBuilder::new(facts, audit)
    }

    #[must_use]
    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_yaml_parser(mut self, parser: Box<dyn YamlParser>) -> Self {
        self.loader = IndexLoader::new(Some(parser));
        self
    }

    #[must_use]
    pub fn without_yaml(self) -> Self {
        self.with_loader(IndexLoader::without_yaml())
    }

    #[must_use]
    pub(crate) fn with_loader(mut self, loader: IndexLoader) -> Self {
        self.loader = loader;
        self
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub(crate) fn audit_ctx(&self, id: String) -> AuditCtx<'_> {
        let mut ctx = AuditCtx::new(&self.facts as &dyn FactsEmitter, id, now_iso());
        ctx.redact = self.policy.redact_facts;
        ctx
    }

    /// Mount under the policy's temp prefix, or the system temp dir.
    ///
    /// # Errors
    ///
    /// See [`VDataset::mount_in`].
    pub fn mount(&self, input: &MountInput) -> Result<PathBuf> {
        mount::run(self, input, None)
    }

    /// Materialize `input` as a symlink tree in a fresh directory and return its path.
    ///
    /// `tmp_prefix`, when given, overrides the policy's prefix and must be an
    /// existing directory.
    ///
    /// # Errors
    ///
    /// `InvalidPrefix`, `InvalidInput` for a malformed description or a link
    /// escaping the root, `LinkCollision`, or `Io`. A failure after the root
    /// was created removes it again.
    pub fn mount_in(&self, input: &MountInput, tmp_prefix: Option<&Path>) -> Result<PathBuf> {
        mount::run(self, input, tmp_prefix)
    }

    /// Remove a mount root.
    ///
    /// In safe mode a root holding anything but directories and symlinks is
    /// left as is and reported as refused.
    ///
    /// # Errors
    ///
    /// `InvalidLocation` when the location is not a directory (or is missing
    /// under a strict teardown policy), `Io` when deletion fails.
    pub fn unmount(&self, location: impl AsRef<Path>, mode: TeardownMode) -> Result<UnmountReport> {
        unmount::run(self, location.as_ref(), mode)
    }

    /// [`resolve`] with a `resolve` fact.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the top level is a single path or target.
    pub fn resolve(&self, input: &MountInput, root_dir: &Path) -> Result<Vec<FileTarget>> {
        let ctx = self.audit_ctx(location_id(root_dir).to_string());
        let res = resolve(input, root_dir);
        let slog = StageLogger::new(&ctx);
        let ev = slog.resolve().path(root_dir.display().to_string());
        match &res {
            Ok(targets) => ev
                .merge(json!({"input_kind": input.kind_name(), "target_count": targets.len()}))
                .emit_success(),
            Err(e) => ev
                .merge(json!({"input_kind": input.kind_name(), "error": e.to_string()}))
                .emit_failure(),
        }
        res
    }

    /// Load an index file; warnings go to the audit sink and an `index.load` warn fact.
    ///
    /// # Errors
    ///
    /// See [`IndexLoader::load`].
    pub fn load_index(&self, path: &Path) -> Result<LoadedIndex> {
        let ctx = self.audit_ctx(location_id(path).to_string());
        let res = self.loader.load(path);
        let slog = StageLogger::new(&ctx);
        let ev = slog.index_load().path(path.display().to_string());
        match &res {
            Ok(loaded) if loaded.warnings.is_empty() => ev.emit_success(),
            Ok(loaded) => {
                for w in &loaded.warnings {
                    self.audit.log(Level::Warn, w);
                }
                ev.field("warnings", json!(loaded.warnings)).emit_warn();
            }
            Err(e) => ev.field("error", json!(e.to_string())).emit_failure(),
        }
        res
    }

    /// Mount the description found in an index file, optionally below a dotted key.
    ///
    /// # Errors
    ///
    /// `InvalidLocation` when the file does not exist, any [`IndexLoader::load`]
    /// error, `KeyNotFound`, `InvalidInput` for values that are not paths,
    /// lists or mappings, then anything [`VDataset::mount_in`] returns.
    pub fn mount_from_index_file(
        &self,
        path: impl AsRef<Path>,
        key: Option<&str>,
        tmp_prefix: Option<&Path>,
    ) -> Result<PathBuf> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::new(
                ErrorKind::InvalidLocation,
                format!("file {} does not exist", path.display()),
            ));
        }
        let loaded = self.load_index(path)?;
        let value = extract_key(&loaded.value, key.unwrap_or(""))?;
        let input = MountInput::try_from(value)?;
        self.mount_in(&input, tmp_prefix)
    }

    /// Scan a directory and mount what it holds.
    ///
    /// # Errors
    ///
    /// See [`scan_location`] and [`VDataset::mount_in`].
    pub fn mount_from_location(
        &self,
        location: impl AsRef<Path>,
        options: &ScanOptions,
        tmp_prefix: Option<&Path>,
    ) -> Result<PathBuf> {
        let location = location.as_ref();
        let ctx = self.audit_ctx(location_id(location).to_string());
        let slog = StageLogger::new(&ctx);
        let ev = slog.scan().path(location.display().to_string());
        let input = match scan_location(location, options) {
            Ok(i) => {
                ev.merge(json!({
                    "patterns": options.patterns,
                    "keep_structure": options.keep_structure,
                    "file_count": i.leaf_count(),
                }))
                .emit_success();
                i
            }
            Err(e) => {
                ev.field("error", json!(e.to_string())).emit_failure();
                return Err(e);
            }
        };
        self.mount_in(&input, tmp_prefix)
    }
}

/// Mount `input` with the default policy and no-op sinks.
///
/// # Errors
///
/// See [`VDataset::mount_in`].
pub fn mount(input: &MountInput, tmp_prefix: Option<&Path>) -> Result<PathBuf> {
    VDataset::default().mount_in(input, tmp_prefix)
}

/// Unmount `location` with the default policy; `safe` selects [`TeardownMode::Safe`].
///
/// # Errors
///
/// See [`VDataset::unmount`].
pub fn unmount(location: impl AsRef<Path>, safe: bool) -> Result<UnmountReport> {
    VDataset::default().unmount(location, TeardownMode::from_safe(safe))
}
