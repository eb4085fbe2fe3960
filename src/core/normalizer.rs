//! Unwraps list responses.
//!
//! List endpoints answer either with a bare JSON array or with a paginated
//! envelope `{"count": .., "next": .., "previous": .., "results": [..]}`.
//! Everything downstream only ever sees the plain ordered sequence.

use crate::domain::model::{Page, Record};
use crate::utils::error::{describe_shape, FormatError};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Returns the list carried by `raw`, in backend order.
pub fn normalize(raw: Value) -> Result<Vec<Value>, FormatError> {
    match raw {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(items)) => Ok(items),
            Some(other) => {
                map.insert("results".to_string(), other);
                Err(FormatError::for_value(&Value::Object(map)))
            }
            None => Err(FormatError::for_value(&Value::Object(map))),
        },
        other => Err(FormatError::for_value(&other)),
    }
}

/// Same as [`normalize`], but an unrecognised shape becomes an empty list
/// and a warning.
pub fn normalize_or_empty(raw: Value) -> Vec<Value> {
    normalize(raw).unwrap_or_else(|e| {
        tracing::warn!("⚠️ {}, treating as empty list", e);
        Vec::new()
    })
}

/// Normalizes and decodes every item into `T`.
pub fn normalize_as<T: DeserializeOwned>(raw: Value) -> Result<Vec<T>, FormatError> {
    normalize(raw)?
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<T>(item)
                .map_err(|e| FormatError::item(index, e.to_string()))
        })
        .collect()
}

/// Keeps the untyped records. Non-object items are reported as a format error.
pub fn normalize_records(raw: Value) -> Result<Vec<Record>, FormatError> {
    normalize(raw)?
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            Record::try_from(item).map_err(|item| {
                FormatError::item(index, format!("{}, expected an object", describe_shape(&item)))
            })
        })
        .collect()
}

/// Like [`normalize_as`] but keeps pagination metadata when an envelope was sent.
pub fn normalize_page<T: DeserializeOwned>(raw: Value) -> Result<Page<T>, FormatError> {
    let (count, next, previous) = match &raw {
        Value::Object(map) => (
            map.get("count").and_then(Value::as_u64),
            map.get("next").and_then(Value::as_str).map(str::to_string),
            map.get("previous")
                .and_then(Value::as_str)
                .map(str::to_string),
        ),
        _ => (None, None, None),
    };
    let items = normalize_as(raw)?;
    let count = count.or(Some(items.len() as u64));
    Ok(Page {
        items,
        count,
        next,
        previous,
    })
}
