//! api/plan.rs: turn resolved targets into a validated link plan for one root.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::fs::resolve_source;
use crate::policy::CollisionPolicy;
use crate::types::errors::{Error, ErrorKind, Result};
use crate::types::plan::{LinkAction, MountPlan};
use crate::types::safepath::SafePath;
use crate::types::target::FileTarget;

/// Anchor every target under `root`, resolve its source and settle collisions.
///
/// Action order follows target order. Under `CollisionPolicy::Replace` a
/// repeated link path keeps its first position and takes the last source.
pub(super) fn build(
    targets: &[FileTarget],
    root: &Path,
    collisions: CollisionPolicy,
) -> Result<MountPlan> {
    let mut actions: Vec<LinkAction> = Vec::with_capacity(targets.len());
    let mut by_link: HashMap<PathBuf, usize> = HashMap::new();

    for t in targets {
        let dir = SafePath::from_rooted(root, &t.target_location)?;
        let name = t.link_name().ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidInput,
                format!("{} has no file name to link under", t.source_file.display()),
            )
        })?;
        let link = dir.join(Path::new(name))?;
        let source = resolve_source(&t.source_file)?;
        let action = LinkAction { dir, link, source };

        match by_link.get(action.link.rel()).copied() {
            Some(idx) => match collisions {
                CollisionPolicy::Fail => {
                    return Err(Error::new(
                        ErrorKind::LinkCollision,
                        format!(
                            "{} and {} both link to {}",
                            actions[idx].source.display(),
                            action.source.display(),
                            action.link.rel().display()
                        ),
                    ))
                }
                CollisionPolicy::Replace => {
                    log::debug!(
                        "replacing link {} -> {}",
                        action.link.rel().display(),
                        action.source.display()
                    );
                    actions[idx] = action;
                }
            },
            None => {
                by_link.insert(action.link.rel().to_path_buf(), actions.len());
                actions.push(action);
            }
        }
    }

    check_links_against_dirs(&actions)?;
    Ok(MountPlan {
        root: root.to_path_buf(),
        actions,
    })
}

/// A link may not sit where the plan needs a directory.
fn check_links_against_dirs(actions: &[LinkAction]) -> Result<()> {
    let mut dirs: HashSet<&Path> = HashSet::new();
    for a in actions {
        dirs.extend(a.dir.rel().ancestors().filter(|p| !p.as_os_str().is_empty()));
    }
    match actions.iter().find(|a| dirs.contains(a.link.rel())) {
        Some(a) => Err(Error::new(
            ErrorKind::LinkCollision,
            format!(
                "link {} collides with a directory of the same name",
                a.link.rel().display()
            ),
        )),
        None => Ok(()),
    }
}
