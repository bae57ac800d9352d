//! Serde helper for `Option<Option<T>>` fields
//!
//! A missing key stays `None` (via `#[serde(default)]`), an explicit `null`
//! becomes `Some(None)` and a value becomes `Some(Some(v))`.

use serde::{Deserialize, Deserializer};

pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
