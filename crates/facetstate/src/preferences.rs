//! # Preferences
//!
//! Long-lived per-mode defaults: the sort field, sort direction, page size and
//! boolean toggles a user prefers. They never hold composite filters.
//!
//! Preferences feed the **hard defaults** of a mode: the schema's literal
//! defaults with each valid preference laid over them. Hard defaults are what
//! a mode shows when neither the URL nor a snapshot says otherwise, and what
//! a reset returns to.
//!
//! ## Stored Form
//!
//! ```json
//! { "sortBy": "cmc", "sortOrder": "desc", "pageSize": 60,
//!   "toggles": { "oneResultPerCardName": true } }
//! ```
//!
//! Every field is optional and validated on its own against the schema. An
//! invalid field is dropped and the rest still apply. Only text that is not a
//! JSON object at all counts as corruption.

use crate::codec::decode_json;
use crate::error::{or_absent, FacetError, Result};
use crate::model::{Mode, ParamValue, SearchState};
use crate::schema::{sort_field_parameter, ParamKind, Schema, PAGE_SIZE, SORT_ORDER};
use crate::store::{KeyValueStore, StorageKeys};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Validated preferences for one mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModePreferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i64>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub toggles: BTreeMap<String, bool>,
}

impl ModePreferences {
    pub fn is_empty(&self) -> bool {
        self.sort_by.is_none()
            && self.sort_order.is_none()
            && self.page_size.is_none()
            && self.toggles.is_empty()
    }
}

/// Read the mode's preferences. A missing entry is empty preferences.
pub fn load_preferences<S: KeyValueStore>(
    store: &S,
    keys: &StorageKeys,
    mode: Mode,
) -> Result<ModePreferences> {
    match store.get_item(&keys.preferences(mode))? {
        Some(content) => decode_preferences(&Schema::builtin(), mode, &content),
        None => Ok(ModePreferences::default()),
    }
}

/// Write the mode's preferences. The startup path never calls this.
pub fn save_preferences<S: KeyValueStore>(
    store: &S,
    keys: &StorageKeys,
    mode: Mode,
    preferences: &ModePreferences,
) -> Result<()> {
    let content = serde_json::to_string(preferences)?;
    store.set_item(&keys.preferences(mode), &content)
}

/// Decode stored preferences, keeping only fields valid for `mode`.
pub fn decode_preferences(schema: &Schema<'_>, mode: Mode, content: &str) -> Result<ModePreferences> {
    let value: Value = serde_json::from_str(content)?;
    let Value::Object(fields) = value else {
        return Err(FacetError::Store(format!(
            "{mode} preferences are not a JSON object"
        )));
    };

    let field = |json_name: &str, param: &str| -> Option<ParamValue> {
        let raw = fields.get(json_name)?;
        let config = schema.get(param).filter(|c| c.scope.includes(mode))?;
        or_absent(
            decode_json(&config.kind, raw),
            format_args!("preference `{json_name}`"),
        )
    };

    let sort_by = field("sortBy", sort_field_parameter(mode)).and_then(into_enum);
    let sort_order = field("sortOrder", SORT_ORDER).and_then(into_enum);
    let page_size = match field("pageSize", PAGE_SIZE) {
        Some(ParamValue::Number(n)) if n > 0 => Some(n),
        Some(other) => {
            tracing::debug!(value = ?other, "dropping non-positive preference `pageSize`");
            None
        }
        None => None,
    };

    Ok(ModePreferences {
        sort_by,
        sort_order,
        page_size,
        toggles: decode_toggles(schema, mode, &fields),
    })
}

fn into_enum(value: ParamValue) -> Option<String> {
    match value {
        ParamValue::Enum(choice) => Some(choice),
        _ => None,
    }
}

fn decode_toggles(schema: &Schema<'_>, mode: Mode, fields: &Map<String, Value>) -> BTreeMap<String, bool> {
    let Some(Value::Object(toggles)) = fields.get("toggles") else {
        return BTreeMap::new();
    };
    toggles
        .iter()
        .filter_map(|(name, raw)| {
            let config = schema.get(name).filter(|c| c.scope.includes(mode))?;
            if !matches!(config.kind, ParamKind::Boolean { .. }) {
                tracing::debug!(name = name.as_str(), "toggle preference is not a boolean parameter");
                return None;
            }
            let value = raw.as_bool()?;
            Some((name.clone(), value))
        })
        .collect()
}

/// Schema defaults for `mode` with `preferences` laid over them.
///
/// The result holds only values that differ from the schema defaults, like
/// any other [`SearchState`].
pub fn hard_defaults(schema: &Schema<'_>, mode: Mode, preferences: &ModePreferences) -> SearchState {
    let mut state = SearchState::new();
    let mut apply = |name: &str, value: ParamValue| {
        let Some(config) = schema.get(name).filter(|c| c.scope.includes(mode)) else {
            return;
        };
        let in_options = match (&config.kind, &value) {
            (ParamKind::Enum { options, .. }, ParamValue::Enum(choice)) => options.contains(&choice.as_str()),
            _ => true,
        };
        if config.accepts(&value) && in_options {
            state.assign(config, value);
        }
    };

    if let Some(sort_by) = &preferences.sort_by {
        apply(sort_field_parameter(mode), ParamValue::Enum(sort_by.clone()));
    }
    if let Some(sort_order) = &preferences.sort_order {
        apply(SORT_ORDER, ParamValue::Enum(sort_order.clone()));
    }
    if let Some(page_size) = preferences.page_size {
        apply(PAGE_SIZE, ParamValue::Number(page_size));
    }
    for (name, enabled) in &preferences.toggles {
        apply(name, ParamValue::Bool(*enabled));
    }
    state
}
