//! Mount: resolve, create a fresh root, plan and materialize the links.
//!
//! Side-effects:
//! - Creates exactly one new directory (the mount root) and only writes inside it.
//! - Rolls the root back with the safe teardown when planning or linking fails.
//! - Emits one `mount.result` fact per call, success or failure.

use std::path::{Path, PathBuf};
use std::time::Instant;

use log::Level;
use serde_json::json;
use uuid::Uuid;

use super::errors::{exit_code_for, id_str, ErrorId};
use super::plan;
use super::resolve::resolve;
use super::VDataset;
use crate::fs::{check_prefix, create_link, create_mount_root, remove_link_tree};
use crate::logging::{AuditSink, FactsEmitter, StageLogger};
use crate::types::errors::{Error, ErrorKind, Result};
use crate::types::ids::mount_id;
use crate::types::input::MountInput;
use crate::types::plan::MountPlan;

pub(super) fn run<E: FactsEmitter, A: AuditSink>(
    api: &VDataset<E, A>,
    input: &MountInput,
    tmp_prefix: Option<&Path>,
) -> Result<PathBuf> {
    let t0 = Instant::now();
    let prefix = tmp_prefix.or(api.policy.mount.tmp_prefix.as_deref());

    // Everything up to root creation is side-effect free.
    let targets = match prefix
        .map_or(Ok(()), check_prefix)
        .and_then(|()| resolve(input, Path::new("")))
    {
        Ok(t) => t,
        Err(e) => {
            emit_failure(api, &Uuid::nil(), "", &e, t0);
            return Err(e);
        }
    };
    let root = match create_mount_root(prefix, &api.policy.mount.dir_prefix) {
        Ok(r) => r,
        Err(e) => {
            emit_failure(api, &Uuid::nil(), "", &e, t0);
            return Err(e);
        }
    };

    let built = plan::build(&targets, &root, api.policy.mount.collisions)
        .and_then(|p| materialize(&p).map(|()| p));
    match built {
        Ok(p) => {
            let mid = mount_id(&p);
            let ctx = api.audit_ctx(mid.to_string());
            StageLogger::new(&ctx)
                .mount_result()
                .path(root.display().to_string())
                .merge(json!({
                    "link_count": p.len(),
                    "duration_ms": t0.elapsed().as_millis() as u64,
                }))
                .emit_success();
            if p.is_empty() {
                api.audit.log(
                    Level::Warn,
                    &format!("mount: nothing to link, {} is empty", p.root.display()),
                );
            } else {
                api.audit.log(
                    Level::Info,
                    &format!("mount: {} link(s) under {}", p.len(), p.root.display()),
                );
            }
            Ok(root)
        }
        Err(e) => {
            if let Err(re) = remove_link_tree(&root) {
                api.audit.log(
                    Level::Warn,
                    &format!("mount: rollback of {} failed: {re}", root.display()),
                );
            }
            emit_failure(api, &Uuid::nil(), &root.display().to_string(), &e, t0);
            Err(e)
        }
    }
}

/// Create every planned directory and link, in plan order.
fn materialize(plan: &MountPlan) -> Result<()> {
    for a in &plan.actions {
        let link = a.link.as_path();
        let Some(name) = a.link.rel().file_name() else {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("{} has no file name", link.display()),
            ));
        };
        create_link(&a.dir.as_path(), name, &a.source).map_err(|e| {
            Error::new(ErrorKind::Io, format!("cannot link {}: {e}", link.display()))
        })?;
    }
    Ok(())
}

fn emit_failure<E: FactsEmitter, A: AuditSink>(
    api: &VDataset<E, A>,
    mid: &Uuid,
    path: &str,
    err: &Error,
    t0: Instant,
) {
    let id = ErrorId::from(err);
    let ctx = api.audit_ctx(mid.to_string());
    StageLogger::new(&ctx)
        .mount_result()
        .path(path)
        .merge(json!({
            "error": err.to_string(),
            "error_id": id_str(id),
            "exit_code": exit_code_for(id),
            "duration_ms": t0.elapsed().as_millis() as u64,
        }))
        .emit_failure();
    api.audit.log(Level::Error, &format!("mount: {err}"));
}
