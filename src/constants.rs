//! Shared crate-wide constants for vdataset.
//!
//! Centralizes magic values and default labels used across modules.

/// Name prefix of every mount root directory, e.g. `vdataset-a1B2c3`.
pub const DEFAULT_DIR_PREFIX: &str = "vdataset-";

/// Subsystem label attached to every emitted fact.
pub const SUBSYSTEM: &str = "vdataset";

/// Version of the fact envelope emitted through `FactsEmitter`.
pub const SCHEMA_VERSION: i64 = 1;

/// UUIDv5 namespace tag for deterministic mount ids.
pub const NS_TAG: &str = "https://vdataset/mount";

/// Separator used by dotted key paths (`files.subset`).
pub const KEY_DELIMITER: char = '.';

/// Index file extensions, without the leading dot.
pub const JSON_EXTENSIONS: &[&str] = &["json"];
pub const YAML_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Pattern used by directory scans when no pattern is supplied.
pub const MATCH_ALL: &str = "*";

/// Environment variable consulted by the CLI for a default `--tmp-prefix`.
pub const TMP_PREFIX_ENV: &str = "VDATASET_TMP_PREFIX";

/// Exit status of the CLI when safe mode refuses to unmount (EX_TEMPFAIL).
pub const REFUSED_EXIT_CODE: u8 = 75;
