//! Unmount: tear a mount root down, refusing in safe mode when real files are present.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::Level;
use serde_json::json;

use super::errors::{exit_code_for, id_str, ErrorId};
use super::VDataset;
use crate::fs::{find_foreign_entries, kind_of, remove_link_tree, NodeKind};
use crate::logging::{AuditSink, FactsEmitter, StageLogger};
use crate::policy::MissingRootPolicy;
use crate::types::errors::{Error, ErrorKind, Result};
use crate::types::ids::location_id;
use crate::types::plan::TeardownMode;
use crate::types::report::{UnmountOutcome, UnmountReport};

pub(super) fn run<E: FactsEmitter, A: AuditSink>(
    api: &VDataset<E, A>,
    location: &Path,
    mode: TeardownMode,
) -> Result<UnmountReport> {
    let t0 = Instant::now();
    let ctx = api.audit_ctx(location_id(location).to_string());
    let slog = StageLogger::new(&ctx);

    let (outcome, offending) = match teardown(api, location, mode) {
        Ok(r) => r,
        Err(e) => {
            let id = ErrorId::from(&e);
            slog.unmount_result()
                .path(location.display().to_string())
                .merge(json!({
                    "mode": mode.as_str(),
                    "error": e.to_string(),
                    "error_id": id_str(id),
                    "exit_code": exit_code_for(id),
                    "duration_ms": t0.elapsed().as_millis() as u64,
                }))
                .emit_failure();
            api.audit.log(Level::Error, &format!("unmount: {e}"));
            return Err(e);
        }
    };

    let report = UnmountReport {
        location: location.to_path_buf(),
        outcome,
        offending,
        duration_ms: t0.elapsed().as_millis() as u64,
    };
    let ev = slog
        .unmount_result()
        .path(location.display().to_string())
        .merge(json!({
            "mode": mode.as_str(),
            "outcome": outcome_str(outcome),
            "offending_count": report.offending.len(),
            "duration_ms": report.duration_ms,
        }));
    if report.refused() {
        api.audit.log(Level::Warn, &format!("unmount: {}", report.summary()));
        ev.emit_warn();
    } else {
        api.audit.log(Level::Info, &format!("unmount: {}", report.summary()));
        ev.emit_success();
    }
    Ok(report)
}

fn teardown<E: FactsEmitter, A: AuditSink>(
    api: &VDataset<E, A>,
    location: &Path,
    mode: TeardownMode,
) -> Result<(UnmountOutcome, Vec<PathBuf>)> {
    match kind_of(location) {
        NodeKind::Dir => {}
        NodeKind::Missing => {
            return match api.policy.teardown.missing {
                MissingRootPolicy::Ignore => Ok((UnmountOutcome::NotFound, Vec::new())),
                MissingRootPolicy::Error => Err(Error::new(
                    ErrorKind::InvalidLocation,
                    format!("{} does not exist", location.display()),
                )),
            };
        }
        other => {
            return Err(Error::new(
                ErrorKind::InvalidLocation,
                format!(
                    "{} is a {}, not a mount directory",
                    location.display(),
                    other.as_str()
                ),
            ))
        }
    }

    match mode {
        TeardownMode::Safe => {
            let offending = find_foreign_entries(location)?;
            if !offending.is_empty() {
                return Ok((UnmountOutcome::Refused, offending));
            }
            remove_link_tree(location)?;
        }
        TeardownMode::Unsafe => fs::remove_dir_all(location)?,
    }
    Ok((UnmountOutcome::Removed, Vec::new()))
}

const fn outcome_str(o: UnmountOutcome) -> &'static str {
    match o {
        UnmountOutcome::Removed => "removed",
        UnmountOutcome::Refused => "refused",
        UnmountOutcome::NotFound => "not_found",
    }
}
