use log::Level;
use serde_json::Value;

/// Receiver of structured facts (one JSON object per event).
pub trait FactsEmitter: Send + Sync {
    fn emit(&self, subsystem: &str, event: &str, decision: &str, fields: Value);
}

/// Receiver of human-readable audit lines.
pub trait AuditSink: Send + Sync {
    fn log(&self, level: Level, msg: &str);
}

/// Discards everything; the default for library callers.
#[derive(Default, Clone, Copy, Debug)]
pub struct JsonlSink;

impl FactsEmitter for JsonlSink {
    fn emit(&self, _subsystem: &str, _event: &str, _decision: &str, _fields: Value) {}
}

impl AuditSink for JsonlSink {
    fn log(&self, _level: Level, _msg: &str) {}
}

/// Forwards facts and audit lines to the `log` facade.
///
/// Facts go out at debug level as a single JSON line under the subsystem's
/// target; audit lines keep their level.
#[derive(Default, Clone, Copy, Debug)]
pub struct LogSink;

impl FactsEmitter for LogSink {
    fn emit(&self, subsystem: &str, event: &str, decision: &str, fields: Value) {
        log::debug!(target: "vdataset::facts", "{subsystem} {event} {decision} {fields}");
    }
}

impl AuditSink for LogSink {
    fn log(&self, level: Level, msg: &str) {
        log::log!(target: "vdataset::audit", level, "{msg}");
    }
}
