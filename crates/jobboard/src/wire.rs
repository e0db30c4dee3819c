//! Boundary decoding for request bodies.
//!
//! Some clients send list/object fields (skills, location, education) as JSON-encoded strings
//! (multipart forms), others send them structured. The helpers here accept both so that the
//! domain layer only ever sees the structured form.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Embedded<T> {
    Structured(T),
    Encoded(String),
}

impl<T: DeserializeOwned> Embedded<T> {
    fn decode(self) -> Result<Option<T>, serde_json::Error> {
        match self {
            Embedded::Structured(value) => Ok(Some(value)),
            Embedded::Encoded(raw) if raw.trim().is_empty() => Ok(None),
            Embedded::Encoded(raw) => serde_json::from_str(&raw).map(Some),
        }
    }
}

/// Optional field given either structured or as a JSON string. `null` and `""` decode to `None`.
pub fn structured<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Embedded<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(embedded) => embedded.decode().map_err(D::Error::custom),
    }
}

/// Patch field that distinguishes "absent" (outer `None`, needs `#[serde(default)]`) from an
/// explicit `null` (`Some(None)`), accepting structured or JSON-string values. A blank string
/// counts as absent.
pub fn clearable_structured<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Embedded<T>>::deserialize(deserializer)? {
        None => Ok(Some(None)),
        Some(embedded) => embedded
            .decode()
            .map(|decoded| decoded.map(Some))
            .map_err(D::Error::custom),
    }
}

/// Patch field that distinguishes "absent" from an explicit `null`.
pub fn clearable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Trim and drop empty strings; an empty update value means "no change".
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

/// Apply a clearable text patch: `null` clears, a blank string leaves the value alone.
pub(crate) fn merge_text(target: &mut Option<String>, update: Option<Option<String>>) {
    match update {
        None => {}
        Some(None) => *target = None,
        Some(Some(value)) => {
            if let Some(value) = non_empty(Some(value)) {
                *target = Some(value);
            }
        }
    }
}
