use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::{Map, Value};

use super::format::IndexFormat;
use super::yaml::{SerdeYamlParser, YamlParser};
use crate::types::errors::{Error, ErrorKind, Result};

/// A parsed index file and the non-fatal conditions met while loading it.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedIndex {
    pub value: Value,
    pub warnings: Vec<String>,
}

/// Loads `.json`, `.yaml` and `.yml` index files into `serde_json::Value`.
pub struct IndexLoader {
    yaml: Option<Box<dyn YamlParser>>,
}

impl Default for IndexLoader {
    fn default() -> Self {
        Self::new(Some(Box::new(SerdeYamlParser)))
    }
}

impl IndexLoader {
    pub fn new(yaml: Option<Box<dyn YamlParser>>) -> Self {
        Self { yaml }
    }

    /// A loader with no YAML capability.
    pub fn without_yaml() -> Self {
        Self::new(None)
    }

    /// Load an index file.
    ///
    /// The format is decided from the extension before the file is touched.
    /// Without a YAML parser, a YAML file loads as an empty mapping and a
    /// warning is recorded instead of failing.
    ///
    /// # Errors
    ///
    /// `UnsupportedFormat` for unknown extensions, `InvalidLocation` when the
    /// file does not exist, `Parse` for malformed content, `Io` otherwise.
    pub fn load(&self, path: &Path) -> Result<LoadedIndex> {
        let format = IndexFormat::from_path(path)?;
        if format == IndexFormat::Yaml && self.yaml.is_none() {
            return Ok(LoadedIndex {
                value: Value::Object(Map::new()),
                warnings: vec![format!(
                    "no yaml parser is available, cannot load {}; using an empty mapping",
                    path.display()
                )],
            });
        }
        if !path.is_file() {
            return Err(Error::new(
                ErrorKind::InvalidLocation,
                format!("file {} does not exist", path.display()),
            ));
        }
        let mut reader = BufReader::new(File::open(path)?);
        let value = match (&self.yaml, format) {
            (_, IndexFormat::Json) => serde_json::from_reader(&mut reader).map_err(|e| {
                Error::new(ErrorKind::Parse, format!("{}: {e}", path.display()))
            })?,
            (Some(parser), IndexFormat::Yaml) => parser.parse(&mut reader)?,
            (None, IndexFormat::Yaml) => Value::Object(Map::new()),
        };
        log::debug!("loaded {} index {}", format.as_str(), path.display());
        Ok(LoadedIndex {
            value,
            warnings: Vec::new(),
        })
    }
}
