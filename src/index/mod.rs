//! Index files: JSON/YAML descriptions of a mount, plus dotted key extraction.

pub mod format;
pub mod keypath;
pub mod loader;
pub mod yaml;

pub use format::IndexFormat;
pub use keypath::extract_key;
pub use loader::{IndexLoader, LoadedIndex};
pub use yaml::{SerdeYamlParser, YamlParser};
