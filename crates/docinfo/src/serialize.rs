//! JSON output of classified records.

use serde::Serialize;

use crate::error::Result;

/// Pretty-printed JSON with two-space indentation.
///
/// Absent optional fields are omitted and records carry their `kind`
/// discriminator, so the output of a [`SourceInfo`](crate::SourceInfo) or a
/// single [`Info`](crate::Info) reads the same.
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
