//! The nested "what goes where" description accepted by the resolver.
//!
//! Index files arrive as `serde_json::Value`; [`MountInput::try_from`] maps
//! them onto the closed variant below. With serde_json's `preserve_order`
//! feature, object keys keep the order they had in the file, which is the
//! order links are emitted in.
use serde_json::Value;
use std::path::{Path, PathBuf};

use super::errors::{Error, ErrorKind, Result};
use super::target::FileTarget;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MountInput {
    /// A single source path.
    Leaf(PathBuf),
    /// Elements share the enclosing directory.
    Sequence(Vec<MountInput>),
    /// Each key adds one directory level for its value.
    Mapping(Vec<(String, MountInput)>),
    /// Already resolved; passed through as-is.
    Target(FileTarget),
}

impl MountInput {
    /// Build a mapping from `(directory, value)` pairs, keeping their order.
    pub fn mapping<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<MountInput>,
    {
        MountInput::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn sequence<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<MountInput>,
    {
        MountInput::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// Number of leaves and pre-built targets, i.e. the number of links a mount creates.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            MountInput::Leaf(_) | MountInput::Target(_) => 1,
            MountInput::Sequence(items) => items.iter().map(MountInput::leaf_count).sum(),
            MountInput::Mapping(entries) => entries.iter().map(|(_, v)| v.leaf_count()).sum(),
        }
    }

    pub(crate) const fn kind_name(&self) -> &'static str {
        match self {
            MountInput::Leaf(_) => "path",
            MountInput::Sequence(_) => "sequence",
            MountInput::Mapping(_) => "mapping",
            MountInput::Target(_) => "file target",
        }
    }
}

impl From<&str> for MountInput {
    fn from(s: &str) -> Self {
        MountInput::Leaf(PathBuf::from(s))
    }
}

impl From<String> for MountInput {
    fn from(s: String) -> Self {
        MountInput::Leaf(PathBuf::from(s))
    }
}

impl From<PathBuf> for MountInput {
    fn from(p: PathBuf) -> Self {
        MountInput::Leaf(p)
    }
}

impl From<&Path> for MountInput {
    fn from(p: &Path) -> Self {
        MountInput::Leaf(p.to_path_buf())
    }
}

impl From<&PathBuf> for MountInput {
    fn from(p: &PathBuf) -> Self {
        MountInput::Leaf(p.clone())
    }
}

impl From<FileTarget> for MountInput {
    fn from(t: FileTarget) -> Self {
        MountInput::Target(t)
    }
}

impl<T: Into<MountInput>> From<Vec<T>> for MountInput {
    fn from(items: Vec<T>) -> Self {
        MountInput::sequence(items)
    }
}

impl TryFrom<&Value> for MountInput {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(MountInput::Leaf(PathBuf::from(s))),
            Value::Array(items) => items
                .iter()
                .map(MountInput::try_from)
                .collect::<Result<Vec<_>>>()
                .map(MountInput::Sequence),
            Value::Object(map) => map
                .iter()
                .map(|(k, v)| Ok((k.clone(), MountInput::try_from(v)?)))
                .collect::<Result<Vec<_>>>()
                .map(MountInput::Mapping),
            other => Err(Error::new(
                ErrorKind::InvalidInput,
                format!("expected a path, a list or a mapping, found `{other}`"),
            )),
        }
    }
}

impl TryFrom<Value> for MountInput {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        MountInput::try_from(&value)
    }
}
