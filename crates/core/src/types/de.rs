//! Lenient deserialization helpers for backend payloads.
//!
//! The backend is schemaless, so optional fields arrive missing, `null`, or
//! set. These helpers fold `null` into the field's default so one sparse
//! record never fails a whole list.

use serde::{Deserialize, Deserializer};

/// Deserialize `T`, treating `null` like a missing field.
///
/// Pair with `#[serde(default)]` so a missing key is covered too.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Pick the identifier from a record that may carry `id`, `_id`, or both.
///
/// `id` wins when both are present.
pub fn either_id<T, E: serde::de::Error>(id: Option<T>, underscore_id: Option<T>) -> Result<T, E> {
    id.or(underscore_id).ok_or_else(|| E::missing_field("id"))
}
