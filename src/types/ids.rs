//! Deterministic UUIDv5 identifiers for mounts.
//!
//! The namespace is derived from `NS_TAG`, so the same plan always yields
//! the same `mount_id` no matter which temporary root it lands in.
use std::fmt::Write;
use std::path::Path;
use uuid::Uuid;

use super::plan::{LinkAction, MountPlan};
use crate::constants::NS_TAG;

fn namespace() -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, NS_TAG.as_bytes())
}

/// Root-independent serialization of one link.
fn serialize_action(a: &LinkAction) -> String {
    format!("L:{}->{}", a.link.rel().display(), a.source.display())
}

/// UUIDv5 over the plan's links, in order.
#[must_use]
pub fn mount_id(plan: &MountPlan) -> Uuid {
    let mut s = String::new();
    for a in &plan.actions {
        s.push_str(&serialize_action(a));
        s.push('\n');
    }
    Uuid::new_v5(&namespace(), s.as_bytes())
}

/// UUIDv5 of a location, used to correlate unmount facts.
#[must_use]
pub fn location_id(location: &Path) -> Uuid {
    let mut s = String::from("U:");
    let _ = write!(s, "{}", location.display());
    Uuid::new_v5(&namespace(), s.as_bytes())
}
