use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Types rebuilt from a stored JSON object one field at a time.
///
/// A missing or malformed field only resets itself; every well-formed
/// sibling is kept.
pub trait MergeFields: Default {
    fn merge_fields(fields: &Map<String, Value>) -> Self;
}

/// Reads a scalar field, falling back to its default when absent or mistyped.
pub(crate) fn merge_field<T: DeserializeOwned + Default>(
    fields: &Map<String, Value>,
    key: &str,
) -> T {
    match fields.get(key) {
        None | Some(Value::Null) => {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_snapshot_merge {
                log::info!("Snapshot has no {key}, using default");
            }
            T::default()
        }
        Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|e| {
            log::warn!("Malformed {key} in config snapshot ({e}), using default");
            T::default()
        }),
    }
}

/// Reads a nested object field by field.
pub(crate) fn merge_object<T: MergeFields>(fields: &Map<String, Value>, key: &str) -> T {
    match fields.get(key) {
        Some(Value::Object(inner)) => T::merge_fields(inner),
        None | Some(Value::Null) => T::default(),
        Some(other) => {
            log::warn!("Malformed {key} in config snapshot ({other}), using default");
            T::default()
        }
    }
}

/// Reads a list of objects, merging each element on its own.
/// Elements that are not objects are dropped.
pub(crate) fn merge_list<T: MergeFields>(fields: &Map<String, Value>, key: &str) -> Vec<T> {
    match fields.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::Object(inner) => Some(T::merge_fields(inner)),
                other => {
                    log::warn!("Dropping malformed {key} entry in config snapshot: {other}");
                    None
                }
            })
            .collect(),
        None | Some(Value::Null) => Vec::new(),
        Some(other) => {
            log::warn!("Malformed {key} in config snapshot ({other}), using default");
            Vec::new()
        }
    }
}
