use std::path::{Path, PathBuf};

use crate::types::errors::{Error, ErrorKind, Result};
use crate::types::input::MountInput;
use crate::types::target::FileTarget;

/// Flatten a mount description into one target per leaf, in traversal order.
///
/// Mapping keys add a directory level below `root_dir`; sequence elements
/// share the enclosing directory; pre-built targets pass through untouched.
/// Nothing on disk is consulted.
///
/// # Errors
///
/// Returns `InvalidInput` when the top level is a single path or target.
pub fn resolve(input: &MountInput, root_dir: &Path) -> Result<Vec<FileTarget>> {
    match input {
        MountInput::Sequence(_) | MountInput::Mapping(_) => {}
        other => {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!(
                    "a mount description must be a mapping or a sequence, found a {}",
                    other.kind_name()
                ),
            ))
        }
    }
    let mut out = Vec::with_capacity(input.leaf_count());
    visit(input, root_dir, &mut out);
    Ok(out)
}

fn visit(node: &MountInput, dir: &Path, out: &mut Vec<FileTarget>) {
    match node {
        MountInput::Leaf(p) => out.push(FileTarget::new(p.clone(), dir.to_path_buf())),
        MountInput::Target(t) => out.push(t.clone()),
        MountInput::Sequence(items) => {
            for item in items {
                visit(item, dir, out);
            }
        }
        MountInput::Mapping(entries) => {
            for (key, value) in entries {
                let child: PathBuf = dir.join(key);
                visit(value, &child, out);
            }
        }
    }
}
