use std::path::Path;

use crate::constants::{JSON_EXTENSIONS, YAML_EXTENSIONS};
use crate::types::errors::{Error, ErrorKind, Result};

/// Index file flavours, chosen by extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexFormat {
    Json,
    Yaml,
}

impl IndexFormat {
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` for any extension other than `.json`, `.yaml` or `.yml`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if JSON_EXTENSIONS.contains(&ext) {
            Ok(IndexFormat::Json)
        } else if YAML_EXTENSIONS.contains(&ext) {
            Ok(IndexFormat::Yaml)
        } else {
            Err(Error::new(
                ErrorKind::UnsupportedFormat,
                format!("{} is not a known dict-like file type", path.display()),
            ))
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            IndexFormat::Json => "json",
            IndexFormat::Yaml => "yaml",
        }
    }
}
