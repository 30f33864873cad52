use serde_json::Value;

use crate::constants::KEY_DELIMITER;
use crate::types::errors::{Error, ErrorKind, Result};

/// Select a nested value by a dot-delimited key path (`files.subset`).
///
/// An empty path returns `obj` itself.
///
/// # Errors
///
/// Returns `KeyNotFound`, naming the full path, when a segment is missing or
/// the value reached so far is not a mapping.
pub fn extract_key<'a>(obj: &'a Value, key: &str) -> Result<&'a Value> {
    if key.is_empty() {
        return Ok(obj);
    }
    key.split(KEY_DELIMITER).try_fold(obj, |cur, segment| {
        cur.as_object()
            .and_then(|map| map.get(segment))
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::KeyNotFound,
                    format!("{key} was not found in object"),
                )
            })
    })
}
