//! Safe reads from untyped CMS payloads.
//!
//! Typed models in [`crate::model`] are the normal way to read content.
//! `get_field` covers raw JSON that has no model, such as diagnostics probes.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Walk a dot-separated `path` through `obj` and decode the value found there.
///
/// Returns `default` when any segment is missing or `null`, when a segment
/// indexes into a scalar, or when the final value does not decode into `T`.
/// Numeric segments index into arrays.
pub fn get_field<T: DeserializeOwned>(obj: &Value, path: &str, default: T) -> T {
    lookup(obj, path)
        .filter(|value| !value.is_null())
        .and_then(|value| T::deserialize(value).ok())
        .unwrap_or(default)
}

/// Borrow the value at `path`, if every segment resolves.
pub fn lookup<'a>(obj: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(obj);
    }

    path.split('.').try_fold(obj, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|idx| items.get(idx)),
        _ => None,
    })
}
