//! Session snapshots: one serialized [`SearchState`] per mode.
//!
//! The blob is a JSON object from parameter name to the value's JSON form.
//! Text that does not parse as an object is corruption and the whole snapshot
//! is rejected. Inside a valid object each entry is checked on its own: unknown
//! names, names belonging to the other mode, and values that do not fit the
//! parameter's shape are dropped one by one.

use super::{KeyValueStore, StorageKeys};
use crate::codec::decode_json;
use crate::error::{or_absent, FacetError, Result};
use crate::model::{Mode, SearchState};
use crate::schema::Schema;
use serde_json::{Map, Value};

/// Serialize `state` and write it under the mode's snapshot key.
pub fn save_snapshot<S: KeyValueStore>(
    store: &S,
    keys: &StorageKeys,
    mode: Mode,
    state: &SearchState,
) -> Result<()> {
    let content = encode_snapshot(state)?;
    store.set_item(&keys.snapshot(mode), &content)
}

/// Read the mode's snapshot.
///
/// `Ok(None)` when no snapshot was saved; `Err` when the store fails or the
/// stored text is corrupt.
pub fn load_snapshot<S: KeyValueStore>(
    store: &S,
    keys: &StorageKeys,
    mode: Mode,
) -> Result<Option<SearchState>> {
    match store.get_item(&keys.snapshot(mode))? {
        Some(content) => decode_snapshot(&Schema::builtin(), mode, &content).map(Some),
        None => Ok(None),
    }
}

/// Remove the mode's snapshot. Removing a missing snapshot is not an error.
pub fn clear_snapshot<S: KeyValueStore>(store: &S, keys: &StorageKeys, mode: Mode) -> Result<()> {
    store.remove_item(&keys.snapshot(mode))
}

pub fn encode_snapshot(state: &SearchState) -> Result<String> {
    Ok(serde_json::to_string(state)?)
}

/// Decode snapshot text into the `mode` projection of `schema`.
pub fn decode_snapshot(schema: &Schema<'_>, mode: Mode, content: &str) -> Result<SearchState> {
    decode_snapshot_over(schema, mode, content, &SearchState::new())
}

/// Decode snapshot text laid over `baseline`. A saved value equal to the
/// schema default still replaces the baseline's value for that key.
pub fn decode_snapshot_over(
    schema: &Schema<'_>,
    mode: Mode,
    content: &str,
    baseline: &SearchState,
) -> Result<SearchState> {
    let value: Value = serde_json::from_str(content)?;
    let Value::Object(entries) = value else {
        return Err(FacetError::Store(format!(
            "{mode} snapshot is not a JSON object"
        )));
    };
    Ok(decode_entries(schema, mode, &entries, baseline))
}

fn decode_entries(
    schema: &Schema<'_>,
    mode: Mode,
    entries: &Map<String, Value>,
    baseline: &SearchState,
) -> SearchState {
    let mut state = baseline.clone();
    for (name, raw) in entries {
        let Some(config) = schema.get(name).filter(|c| c.scope.includes(mode)) else {
            tracing::debug!(name = name.as_str(), %mode, "ignoring snapshot entry");
            continue;
        };
        let decoded = or_absent(
            decode_json(&config.kind, raw),
            format_args!("snapshot value for `{name}`"),
        );
        if let Some(value) = decoded {
            state.assign_over(config, value, baseline);
        }
    }
    state
}
