use std::io::Read;

use serde_json::Value;

use crate::types::errors::{Error, ErrorKind, Result};

/// YAML parsing capability.
///
/// Injected into the loader at construction; a loader built without one
/// treats YAML index files as empty and says so in its warnings.
pub trait YamlParser: Send + Sync {
    /// # Errors
    ///
    /// Returns a `Parse` error for malformed YAML.
    fn parse(&self, reader: &mut dyn Read) -> Result<Value>;
}

/// `serde_yaml`-backed parser.
#[derive(Default, Clone, Copy, Debug)]
pub struct SerdeYamlParser;

impl YamlParser for SerdeYamlParser {
    fn parse(&self, reader: &mut dyn Read) -> Result<Value> {
        serde_yaml::from_reader(reader).map_err(|e| Error::new(ErrorKind::Parse, e.to_string()))
    }
}
