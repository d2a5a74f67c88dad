//! # Startup Resolution
//!
//! On a cold start four sources may each describe the search state:
//!
//! 1. **URL**: a shared link or bookmark.
//! 2. **Snapshot**: what this session last showed, per mode.
//! 3. **Preferences**: the user's long-lived defaults, per mode.
//! 4. **Schema defaults**: the literal fallbacks.
//!
//! ## Precedence
//!
//! - Without a browser context (no URL, no storage) the result is the schema
//!   defaults, with `cards` active.
//! - If the URL carries any recognized parameter besides the mode indicator,
//!   the URL is authoritative: both modes are decoded from it and each is laid
//!   over that mode's hard defaults. Snapshots are not consulted, so a shared
//!   link always shows what was shared. A value the URL states explicitly
//!   beats the hard default even when it equals the schema default.
//! - Otherwise each mode independently takes its snapshot laid over its hard
//!   defaults, or the hard defaults alone when there is no usable snapshot.
//!   A URL holding only `contentType` takes this path.
//!
//! Hard defaults are the schema defaults with preferences laid over them (see
//! [`crate::preferences::hard_defaults`]). The active mode comes from the
//! URL's `contentType` when it names a mode, else `cards`.
//!
//! ## Failure Isolation
//!
//! A corrupt snapshot, corrupt preferences or an unreadable store affect only
//! the mode they belong to. Each is logged at `warn` and treated as absent.
//!
//! ## Purity
//!
//! [`initial_state`] is a pure function of its inputs and therefore
//! idempotent. [`resolve`] only adds the store reads.

use crate::codec::QueryParams;
use crate::error::Result;
use crate::model::{AppSearchState, Mode, SearchState};
use crate::preferences::{decode_preferences, hard_defaults, ModePreferences};
use crate::schema::Schema;
use crate::store::snapshot::decode_snapshot_over;
use crate::store::{KeyValueStore, StorageKeys};
use crate::url_state::{has_filter_params, mode_from_params, parse_params_over};

/// The raw stored text for one mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredBlobs {
    pub snapshot: Option<String>,
    pub preferences: Option<String>,
}

/// Everything the resolver reads, already fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupInputs {
    /// Query text, a `?`-prefixed query, or a full URL.
    pub query: String,
    pub cards: StoredBlobs,
    pub sets: StoredBlobs,
}

impl StartupInputs {
    pub fn from_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn blobs(&self, mode: Mode) -> &StoredBlobs {
        match mode {
            Mode::Cards => &self.cards,
            Mode::Sets => &self.sets,
        }
    }

    pub fn blobs_mut(&mut self, mode: Mode) -> &mut StoredBlobs {
        match mode {
            Mode::Cards => &mut self.cards,
            Mode::Sets => &mut self.sets,
        }
    }
}

/// A browser context: the current location plus the two stores.
#[derive(Debug, Clone)]
pub struct Browser<S> {
    pub location: String,
    pub session: S,
    pub preferences: S,
}

impl<S: KeyValueStore> Browser<S> {
    pub fn new(location: impl Into<String>, session: S, preferences: S) -> Self {
        Self {
            location: location.into(),
            session,
            preferences,
        }
    }

    /// Fetch everything the resolver needs. Store failures become missing
    /// blobs.
    pub fn read_inputs(&self, keys: &StorageKeys) -> StartupInputs {
        let mut inputs = StartupInputs::from_query(self.location.clone());
        for mode in Mode::ALL {
            let blobs = inputs.blobs_mut(mode);
            blobs.snapshot = read_or_warn(&self.session, &keys.snapshot(mode));
            blobs.preferences = read_or_warn(&self.preferences, &keys.preferences(mode));
        }
        inputs
    }
}

fn read_or_warn<S: KeyValueStore>(store: &S, key: &str) -> Option<String> {
    match store.get_item(key) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(%err, key, "storage unavailable");
            None
        }
    }
}

/// Build the initial state from already-fetched inputs using the built-in
/// schema.
pub fn initial_state(inputs: Option<&StartupInputs>) -> AppSearchState {
    initial_state_with(&Schema::builtin(), inputs)
}

/// Build the initial state from already-fetched inputs.
pub fn initial_state_with(schema: &Schema<'_>, inputs: Option<&StartupInputs>) -> AppSearchState {
    let Some(inputs) = inputs else {
        return AppSearchState::default();
    };

    let params = QueryParams::parse(&inputs.query);
    let url_authoritative = has_filter_params(schema, &params);
    let mut app = AppSearchState {
        active_mode: mode_from_params(&params).unwrap_or_default(),
        ..Default::default()
    };

    for mode in Mode::ALL {
        let blobs = inputs.blobs(mode);
        let defaults = hard_defaults(schema, mode, &preferences_or_empty(schema, mode, blobs));
        let state = if url_authoritative {
            parse_params_over(schema, &params, mode, &defaults)
        } else {
            snapshot_or_none(schema, mode, blobs, &defaults).unwrap_or(defaults)
        };
        *app.for_mode_mut(mode) = state;
    }

    tracing::debug!(
        active_mode = %app.active_mode,
        url_authoritative,
        cards = app.cards.len(),
        sets = app.sets.len(),
        "resolved initial search state"
    );
    app
}

/// Read the stores and resolve. `None` means there is no browser context.
pub fn resolve<S: KeyValueStore>(browser: Option<&Browser<S>>, keys: &StorageKeys) -> AppSearchState {
    let inputs = browser.map(|b| b.read_inputs(keys));
    initial_state(inputs.as_ref())
}

/// The hard defaults for one mode read straight from a preference store.
pub fn hard_defaults_from_store<S: KeyValueStore>(
    preferences: &S,
    keys: &StorageKeys,
    mode: Mode,
) -> SearchState {
    let blobs = StoredBlobs {
        snapshot: None,
        preferences: read_or_warn(preferences, &keys.preferences(mode)),
    };
    let schema = Schema::builtin();
    hard_defaults(&schema, mode, &preferences_or_empty(&schema, mode, &blobs))
}

fn preferences_or_empty(schema: &Schema<'_>, mode: Mode, blobs: &StoredBlobs) -> ModePreferences {
    let Some(content) = &blobs.preferences else {
        return ModePreferences::default();
    };
    warn_on_corruption(decode_preferences(schema, mode, content), mode, "preferences").unwrap_or_default()
}

fn snapshot_or_none(
    schema: &Schema<'_>,
    mode: Mode,
    blobs: &StoredBlobs,
    defaults: &SearchState,
) -> Option<SearchState> {
    let content = blobs.snapshot.as_ref()?;
    warn_on_corruption(decode_snapshot_over(schema, mode, content, defaults), mode, "snapshot")
}

fn warn_on_corruption<T>(outcome: Result<T>, mode: Mode, what: &str) -> Option<T> {
    match outcome {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(%err, %mode, "ignoring corrupt {what}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InclusionExclusion, ParamValue};
    use crate::store::snapshot::encode_snapshot;
    use crate::store::MemStore;
    use tracing_test::traced_test;

    fn snapshot_with(entries: &[(&str, ParamValue)]) -> String {
        let mut state = SearchState::new();
        for (name, value) in entries {
            state.insert(*name, value.clone());
        }
        encode_snapshot(&state).unwrap()
    }

    #[test]
    fn no_browser_context_gives_literal_defaults() {
        let app = initial_state(None);
        assert_eq!(app.active_mode, Mode::Cards);
        assert!(app.cards.is_empty());
        assert!(app.sets.is_empty());
    }

    #[test]
    fn url_beats_snapshot() {
        let mut inputs = StartupInputs::from_query("?contentType=cards&name=bolt");
        inputs.cards.snapshot = Some(snapshot_with(&[
            ("name", ParamValue::Text("shock".into())),
            ("page", ParamValue::Number(7)),
        ]));

        let app = initial_state(Some(&inputs));
        assert_eq!(app.cards.get("name"), Some(&ParamValue::Text("bolt".into())));
        assert!(!app.cards.contains_key("page"));
    }

    #[test]
    fn url_path_ignores_snapshots_of_both_modes() {
        let mut inputs = StartupInputs::from_query("?name=bolt");
        inputs.sets.snapshot = Some(snapshot_with(&[("code", ParamValue::Text("mh3".into()))]));

        let app = initial_state(Some(&inputs));
        assert!(app.sets.is_empty());
    }

    #[test]
    fn snapshot_beats_defaults() {
        let mut inputs = StartupInputs::default();
        inputs.sets.snapshot = Some(snapshot_with(&[("code", ParamValue::Text("mh3".into()))]));
        inputs.sets.preferences = Some(r#"{"pageSize":50}"#.to_string());

        let app = initial_state(Some(&inputs));
        assert_eq!(app.sets.get("code"), Some(&ParamValue::Text("mh3".into())));
        assert_eq!(app.sets.get("pageSize"), Some(&ParamValue::Number(50)));
    }

    #[test]
    fn snapshot_values_win_over_preferences() {
        let mut inputs = StartupInputs::default();
        inputs.cards.snapshot = Some(snapshot_with(&[("pageSize", ParamValue::Number(100))]));
        inputs.cards.preferences = Some(r#"{"pageSize":50,"sortOrder":"desc"}"#.to_string());

        let app = initial_state(Some(&inputs));
        assert_eq!(app.cards.get("pageSize"), Some(&ParamValue::Number(100)));
        assert_eq!(app.cards.get("sortOrder"), Some(&ParamValue::Enum("desc".into())));
    }

    #[test]
    fn url_state_is_merged_over_preferences() {
        let mut inputs = StartupInputs::from_query("contentType=sets&setName=horizons");
        inputs.sets.preferences = Some(r#"{"sortOrder":"desc"}"#.to_string());

        let app = initial_state(Some(&inputs));
        assert_eq!(app.active_mode, Mode::Sets);
        assert_eq!(app.sets.get("setName"), Some(&ParamValue::Text("horizons".into())));
        assert_eq!(app.sets.get("sortOrder"), Some(&ParamValue::Enum("desc".into())));
    }

    #[test]
    fn explicit_url_defaults_beat_preferences() {
        let mut inputs = StartupInputs::from_query("?contentType=cards&pageSize=20&sortOrder=asc&name=bolt");
        inputs.cards.preferences = Some(r#"{"pageSize":50,"sortOrder":"desc"}"#.to_string());

        let app = initial_state(Some(&inputs));
        assert_eq!(app.cards.get("name"), Some(&ParamValue::Text("bolt".into())));
        assert_eq!(app.cards.get("pageSize"), Some(&ParamValue::Number(20)));
        assert_eq!(app.cards.get("sortOrder"), Some(&ParamValue::Enum("asc".into())));
    }

    #[test]
    fn url_values_absent_from_link_keep_preferences() {
        let mut inputs = StartupInputs::from_query("?contentType=cards&name=bolt&page=1");
        inputs.cards.preferences = Some(r#"{"pageSize":50}"#.to_string());

        let app = initial_state(Some(&inputs));
        assert_eq!(app.cards.get("pageSize"), Some(&ParamValue::Number(50)));
        assert!(!app.cards.contains_key("page"));
    }

    #[test]
    fn snapshot_default_beats_preference() {
        let mut inputs = StartupInputs::default();
        inputs.cards.snapshot = Some(r#"{"pageSize":20}"#.to_string());
        inputs.cards.preferences = Some(r#"{"pageSize":50}"#.to_string());

        let app = initial_state(Some(&inputs));
        assert_eq!(app.cards.get("pageSize"), Some(&ParamValue::Number(20)));
    }

    #[test]
    fn mode_indicator_alone_takes_snapshot_path() {
        let mut inputs = StartupInputs::from_query("?contentType=sets");
        inputs.sets.snapshot = Some(snapshot_with(&[(
            "setTypes",
            ParamValue::InclusionExclusion(InclusionExclusion::new(["core"], Vec::<String>::new())),
        )]));

        let app = initial_state(Some(&inputs));
        assert_eq!(app.active_mode, Mode::Sets);
        assert!(app.sets.contains_key("setTypes"));
    }

    #[test]
    fn unknown_keys_do_not_make_the_url_authoritative() {
        let mut inputs = StartupInputs::from_query("?utm_source=newsletter");
        inputs.cards.snapshot = Some(snapshot_with(&[("artist", ParamValue::Text("rk post".into()))]));

        let app = initial_state(Some(&inputs));
        assert!(app.cards.contains_key("artist"));
    }

    #[traced_test]
    #[test]
    fn corrupt_snapshot_only_affects_its_mode() {
        let mut inputs = StartupInputs::default();
        inputs.cards.snapshot = Some(snapshot_with(&[("name", ParamValue::Text("bolt".into()))]));
        inputs.sets.snapshot = Some("{\"code\": \"mh3\"".to_string());

        let app = initial_state(Some(&inputs));
        assert_eq!(app.cards.get("name"), Some(&ParamValue::Text("bolt".into())));
        assert!(app.sets.is_empty());
        assert!(logs_contain("ignoring corrupt snapshot"));
    }

    #[traced_test]
    #[test]
    fn corrupt_preferences_fall_back_to_schema_defaults() {
        let mut inputs = StartupInputs::default();
        inputs.cards.preferences = Some("not json".to_string());
        inputs.sets.preferences = Some(r#"{"pageSize":40}"#.to_string());

        let app = initial_state(Some(&inputs));
        assert!(app.cards.is_empty());
        assert_eq!(app.sets.get("pageSize"), Some(&ParamValue::Number(40)));
        assert!(logs_contain("ignoring corrupt preferences"));
    }

    #[test]
    fn invalid_mode_indicator_defaults_to_cards() {
        let app = initial_state(Some(&StartupInputs::from_query("?contentType=decks")));
        assert_eq!(app.active_mode, Mode::Cards);
    }

    #[test]
    fn resolution_is_idempotent() {
        let mut inputs = StartupInputs::from_query("?contentType=sets&page=3&includeRarities=rare");
        inputs.cards.preferences = Some(r#"{"sortBy":"cmc"}"#.to_string());
        assert_eq!(initial_state(Some(&inputs)), initial_state(Some(&inputs)));
    }

    #[test]
    fn shared_keys_decode_identically_for_both_modes() {
        let app = initial_state(Some(&StartupInputs::from_query("?pageSize=60&sortOrder=desc")));
        assert_eq!(app.cards.get("pageSize"), app.sets.get("pageSize"));
        assert_eq!(app.cards.get("sortOrder"), app.sets.get("sortOrder"));
        assert_eq!(app.cards.len(), 2);
    }

    #[traced_test]
    #[test]
    fn unreadable_store_degrades_to_defaults() {
        let session = MemStore::new();
        let preferences = MemStore::with_items([("facetstate:preferences:cards", r#"{"pageSize":25}"#)]);
        session.set_simulate_read_error(true);
        let browser = Browser::new("", session, preferences);

        let app = resolve(Some(&browser), &StorageKeys::default());
        assert_eq!(app.cards.get("pageSize"), Some(&ParamValue::Number(25)));
        assert!(app.sets.is_empty());
        assert!(logs_contain("storage unavailable"));
    }

    #[test]
    fn resolve_reads_both_stores() {
        let keys = StorageKeys::default();
        let session = MemStore::with_items([(
            keys.snapshot(Mode::Sets),
            snapshot_with(&[("showSubsets", ParamValue::Bool(false))]),
        )]);
        let preferences = MemStore::with_items([(keys.preferences(Mode::Sets), r#"{"setSortBy":"x"}"#.to_string())]);
        let browser = Browser::new("https://example.test/search?contentType=sets", session, preferences);

        let app = resolve(Some(&browser), &keys);
        assert_eq!(app.active_mode, Mode::Sets);
        assert_eq!(app.sets.get("showSubsets"), Some(&ParamValue::Bool(false)));
    }

    #[test]
    fn hard_defaults_from_store_reads_preferences() {
        let keys = StorageKeys::default();
        let preferences = MemStore::with_items([(keys.preferences(Mode::Cards), r#"{"sortBy":"cmc"}"#)]);
        let state = hard_defaults_from_store(&preferences, &keys, Mode::Cards);
        assert_eq!(state.get("sortBy"), Some(&ParamValue::Enum("cmc".into())));
    }
}
