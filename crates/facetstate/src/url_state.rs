//! # URL State Adapter
//!
//! Applies the codecs across the whole schema in both directions:
//!
//! - [`parse_url_to_state`]: query text → [`SearchState`] for one mode
//! - [`convert_state_to_url_params`]: [`SearchState`] → [`QueryParams`]
//!
//! ## Encoding Rules
//!
//! 1. The mode indicator (`contentType=<mode>`) is always written first, so a
//!    link says which catalog it belongs to.
//! 2. Parameters are visited in schema order; only those that apply to the
//!    mode are considered.
//! 3. A parameter is skipped when the state has no value for it, or when the
//!    value equals the default (unless the parameter is `required`). The
//!    `_over` variants also keep a default value whose key the baseline (the
//!    mode's hard defaults) holds, so choosing `pageSize=20` over a preferred
//!    50 still reaches the URL.
//!
//! ## Decoding Rules
//!
//! Each applicable parameter is decoded independently. Malformed values are
//! dropped (the parameter falls back to its default), unrecognized keys are
//! ignored and never carried over, and values equal to their default are not
//! stored unless they replace a baseline value ([`parse_params_over`]).
//!
//! ## Round Trip
//!
//! For any state `s` and mode `m`, decoding the encoding of `s` yields the
//! canonical, non-default, mode-applicable subset of `s`. Defaults are a fixed
//! point: an all-default state encodes to the mode indicator alone.

use crate::codec::{decode_query, encode_query, QueryParams};
use crate::error::or_absent;
use crate::model::{Mode, SearchState};
use crate::schema::Schema;

/// The URL key naming the active catalog.
pub const MODE_PARAM: &str = "contentType";

/// Decode the `mode` projection of `query` using the built-in schema.
pub fn parse_url_to_state(query: &str, mode: Mode) -> SearchState {
    parse_params_to_state(&Schema::builtin(), &QueryParams::parse(query), mode)
}

/// Decode the `mode` projection of already-parsed query parameters.
pub fn parse_params_to_state(schema: &Schema<'_>, params: &QueryParams, mode: Mode) -> SearchState {
    parse_params_over(schema, params, mode, &SearchState::new())
}

/// Decode the `mode` projection of `params` laid over `baseline`.
///
/// Every decoded value replaces the baseline's, including one equal to the
/// schema default: `pageSize=20` in a link beats a preferred page size of 50.
pub fn parse_params_over(
    schema: &Schema<'_>,
    params: &QueryParams,
    mode: Mode,
    baseline: &SearchState,
) -> SearchState {
    let mut state = baseline.clone();
    for config in schema.for_mode(mode) {
        let decoded = or_absent(
            decode_query(&config.kind, params),
            format_args!("malformed `{}` in URL", config.name),
        );
        if let Some(value) = decoded {
            state.assign_over(config, value, baseline);
        }
    }
    state
}

/// Encode `state` for `mode` using the built-in schema.
pub fn convert_state_to_url_params(state: &SearchState, mode: Mode) -> QueryParams {
    state_to_params(&Schema::builtin(), state, mode)
}

/// Encode `state` for `mode` against an explicit schema.
pub fn state_to_params(schema: &Schema<'_>, state: &SearchState, mode: Mode) -> QueryParams {
    state_to_params_over(schema, state, mode, &SearchState::new())
}

/// Encode `state` for `mode`, also writing schema-default values that
/// override a key of `baseline`.
pub fn state_to_params_over(
    schema: &Schema<'_>,
    state: &SearchState,
    mode: Mode,
    baseline: &SearchState,
) -> QueryParams {
    let mut out = QueryParams::new();
    out.append(MODE_PARAM, mode.as_str());

    for config in schema.for_mode(mode) {
        let value = match state.get(config.name) {
            Some(value) => value.clone().canonical(),
            None if config.required => config.default_value(),
            None => continue,
        };
        let overrides_baseline = baseline.contains_key(config.name);
        if value == config.default_value() && !config.required && !overrides_baseline {
            continue;
        }
        if let Err(err) = encode_query(&config.kind, &value, &mut out) {
            tracing::debug!(%err, parameter = config.name, "value not written to URL");
        }
    }
    out
}

/// The mode named by the URL's mode indicator, if it names one.
pub fn mode_from_params(params: &QueryParams) -> Option<Mode> {
    params.get(MODE_PARAM).and_then(|raw| raw.parse().ok())
}

/// Whether the query carries any recognized parameter besides the mode
/// indicator.
pub fn has_filter_params(schema: &Schema<'_>, params: &QueryParams) -> bool {
    params
        .keys()
        .any(|key| key != MODE_PARAM && schema.is_recognized_url_key(key))
}
