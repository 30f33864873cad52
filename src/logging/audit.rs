// Fact emission for mount, unmount and the index/scan collaborators.
//
// Every fact carries the same envelope: `schema_version`, `ts`, `mount_id`,
// `stage`, `decision` and `path`. Timestamps are real unless the context
// asks for redaction, in which case `redact_event` runs before emission.
use crate::constants::{SCHEMA_VERSION, SUBSYSTEM};
use crate::logging::{redact_event, FactsEmitter};
use serde_json::{json, Value};

pub(crate) struct AuditCtx<'a> {
    pub facts: &'a dyn FactsEmitter,
    pub mount_id: String,
    pub ts: String,
    pub redact: bool,
}

impl<'a> AuditCtx<'a> {
    pub(crate) fn new(facts: &'a dyn FactsEmitter, mount_id: String, ts: String) -> Self {
        Self {
            facts,
            mount_id,
            ts,
            redact: false,
        }
    }
}

/// Stage for typed audit emission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Resolve,
    MountResult,
    UnmountResult,
    IndexLoad,
    Scan,
}

impl Stage {
    pub const fn as_event(&self) -> &'static str {
        match self {
            Stage::Resolve => "resolve",
            Stage::MountResult => "mount.result",
            Stage::UnmountResult => "unmount.result",
            Stage::IndexLoad => "index.load",
            Stage::Scan => "scan",
        }
    }
}

/// Decision severity for audit events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Success,
    Failure,
    Warn,
}

impl Decision {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Decision::Success => "success",
            Decision::Failure => "failure",
            Decision::Warn => "warn",
        }
    }
}

/// Builder facade over fact emission with a centralized envelope.
pub struct StageLogger<'a> {
    ctx: &'a AuditCtx<'a>,
}

impl<'a> StageLogger<'a> {
    pub(crate) fn new(ctx: &'a AuditCtx<'a>) -> Self {
        Self { ctx }
    }

    pub fn resolve(&'a self) -> EventBuilder<'a> { EventBuilder::new(self.ctx, Stage::Resolve) }
    pub fn mount_result(&'a self) -> EventBuilder<'a> { EventBuilder::new(self.ctx, Stage::MountResult) }
    pub fn unmount_result(&'a self) -> EventBuilder<'a> { EventBuilder::new(self.ctx, Stage::UnmountResult) }
    pub fn index_load(&'a self) -> EventBuilder<'a> { EventBuilder::new(self.ctx, Stage::IndexLoad) }
    pub fn scan(&'a self) -> EventBuilder<'a> { EventBuilder::new(self.ctx, Stage::Scan) }
}

pub struct EventBuilder<'a> {
    ctx: &'a AuditCtx<'a>,
    stage: Stage,
    fields: serde_json::Map<String, Value>,
}

impl<'a> EventBuilder<'a> {
    fn new(ctx: &'a AuditCtx<'a>, stage: Stage) -> Self {
        let mut fields = serde_json::Map::new();
        fields.insert("stage".to_string(), json!(stage.as_event()));
        Self { ctx, stage, fields }
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.fields.insert("path".into(), json!(path.into()));
        self
    }

    pub fn field(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    pub fn merge(mut self, extra: Value) -> Self {
        if let Value::Object(obj) = extra {
            self.fields.extend(obj);
        }
        self
    }

    pub fn emit(self, decision: Decision) {
        let mut fields = self.fields;
        fields.entry("decision").or_insert(json!(decision.as_str()));
        fields.entry("schema_version").or_insert(json!(SCHEMA_VERSION));
        fields.entry("ts").or_insert(json!(self.ctx.ts));
        fields.entry("mount_id").or_insert(json!(self.ctx.mount_id));
        fields.entry("path").or_insert(json!(""));
        let fields = Value::Object(fields);
        let out = if self.ctx.redact {
            redact_event(fields)
        } else {
            fields
        };
        self.ctx
            .facts
            .emit(SUBSYSTEM, self.stage.as_event(), decision.as_str(), out);
    }

    pub fn emit_success(self) { self.emit(Decision::Success) }
    pub fn emit_failure(self) { self.emit(Decision::Failure) }
    pub fn emit_warn(self) { self.emit(Decision::Warn) }
}
