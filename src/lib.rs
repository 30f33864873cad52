#![forbid(unsafe_code)]
//! vdataset: throwaway symlink trees over scattered files.
//!
//! A mount description (a nested mapping/sequence of paths, from code, an
//! index file or a directory scan) is flattened into targets and materialized
//! as symlinks under a fresh, uniquely named directory. Unmounting removes
//! that directory again.
//!
//! Safety model highlights:
//! - Mounts only ever write inside the root they just created; every link
//!   path is anchored with `SafePath`, and links are created with `symlinkat`
//!   through parent handles opened `O_DIRECTORY|O_NOFOLLOW`.
//! - Safe unmount refuses to touch a tree that holds anything but directories
//!   and symlinks, and deletes through directory handles, stopping at the
//!   first unexpected entry.
//! - This crate forbids `unsafe` and uses `rustix` for syscalls.

pub mod api;
pub mod cli;
pub mod constants;
pub mod fs;
pub mod index;
pub mod logging;
pub mod policy;
pub mod scan;
pub mod types;

pub use api::*;
pub use index::{extract_key, IndexFormat, IndexLoader, LoadedIndex, SerdeYamlParser, YamlParser};
pub use policy::Policy;
pub use scan::{scan_location, ScanOptions};
pub use types::errors::{Error, ErrorKind, Result};
pub use types::input::MountInput;
pub use types::plan::TeardownMode;
pub use types::report::{UnmountOutcome, UnmountReport};
pub use types::target::FileTarget;
