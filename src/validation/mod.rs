//! Request body validation.
//!
//! Validators inspect the raw JSON so that a wrong type becomes a readable
//! message instead of a deserialization failure. Every violation is
//! reported; checks never stop at the first one.

mod meal_plan;
mod recipe;

pub use meal_plan::*;
pub use recipe::*;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use url::Url;

pub const COLLECTION_INVALID: &str = "Collection parameter must be a non-empty string";

/// One human-readable message per violated rule
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", .0.join("; "))]
pub struct ValidationErrors(pub Vec<String>);

impl ValidationErrors {
    pub fn messages(&self) -> &[String] {
        &self.0
    }

    pub fn into_messages(self) -> Vec<String> {
        self.0
    }
}

/// Validates the optional `collection` query parameter.
pub fn validate_collection_param(
    collection: Option<&str>,
) -> Result<Option<String>, ValidationErrors> {
    match collection {
        None => Ok(None),
        Some(name) if name.trim().is_empty() => {
            Err(ValidationErrors(vec![COLLECTION_INVALID.to_string()]))
        }
        Some(name) => Ok(Some(name.to_string())),
    }
}

fn is_non_empty_string(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::String(s)) if !s.trim().is_empty())
}

fn is_valid_url(value: &str) -> bool {
    Url::parse(value).is_ok()
}

/// Returns the value under `key` unless it is absent or `null`.
fn non_null<'a>(body: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    body.get(key).filter(|v| !v.is_null())
}

/// Distinguishes a field set to `null` (`Some(None)`) from an absent one
/// (`None`).
pub fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
