//! # Type Codecs
//!
//! One decode/encode pair per value shape, selected by an exhaustive `match` on
//! [`ParamKind`]. Adding a shape to the schema does not compile until it has a
//! codec here.
//!
//! ## Contracts
//!
//! - **Decode** returns `Ok(None)` when the parameter is not in the query,
//!   `Ok(Some(value))` for a value of the declared shape, and `Err` when text is
//!   present but malformed (bad integer, unknown enum option, broken
//!   escape). Callers fold `Err` into "absent" at one place
//!   ([`crate::error::or_absent`]); nothing here panics on input.
//! - **Encode** writes the canonical textual form, or nothing when the value is
//!   empty for its shape (empty text, both include/exclude lists empty, no
//!   colors and no colorless, every stat list empty). It fails only when the
//!   value's shape does not match the kind.
//!
//! Default suppression is not a codec concern; the URL adapter skips default
//! values before calling in.
//!
//! ## Submodules
//!
//! - [`query`]: the ordered key/value view of a query string
//! - [`scalar`]: string, number, boolean, enum
//! - [`composite`]: inclusion/exclusion, color, stat
//! - [`tokens`]: escaping tokens inside joined values
//! - [`json`]: decoding values from snapshot JSON

pub mod composite;
pub mod json;
pub mod query;
pub mod scalar;
pub mod tokens;

pub use json::decode_json;
pub use query::QueryParams;

use crate::error::CodecError;
use crate::model::ParamValue;
use crate::schema::ParamKind;

/// Read a parameter of `kind` from `params`.
pub fn decode_query(kind: &ParamKind, params: &QueryParams) -> Result<Option<ParamValue>, CodecError> {
    match *kind {
        ParamKind::Text { key, .. } => scalar::decode_text(params, key),
        ParamKind::Number { key, .. } => scalar::decode_number(params, key),
        ParamKind::Boolean { key, .. } => scalar::decode_boolean(params, key),
        ParamKind::Enum { key, options, .. } => scalar::decode_enum(params, key, options),
        ParamKind::InclusionExclusion {
            include,
            exclude,
            separator,
        } => composite::decode_inclusion_exclusion(params, include, exclude, separator),
        ParamKind::Color {
            colors,
            match_type,
            colorless,
            separator,
        } => composite::decode_color(params, colors, match_type, colorless, separator),
        ParamKind::Stat {
            key,
            group_separator,
            condition_separator,
        } => composite::decode_stat(params, key, group_separator, condition_separator),
    }
}

/// Append the textual form of `value` to `out`.
pub fn encode_query(kind: &ParamKind, value: &ParamValue, out: &mut QueryParams) -> Result<(), CodecError> {
    match *kind {
        ParamKind::Text { key, .. } => scalar::encode_text(value, key, out),
        ParamKind::Number { key, .. } => scalar::encode_number(value, key, out),
        ParamKind::Boolean { key, .. } => scalar::encode_boolean(value, key, out),
        ParamKind::Enum { key, options, .. } => scalar::encode_enum(value, key, options, out),
        ParamKind::InclusionExclusion {
            include,
            exclude,
            separator,
        } => composite::encode_inclusion_exclusion(value, include, exclude, separator, out),
        ParamKind::Color {
            colors,
            match_type,
            colorless,
            separator,
        } => composite::encode_color(value, colors, match_type, colorless, separator, out),
        ParamKind::Stat {
            key,
            group_separator,
            condition_separator,
        } => composite::encode_stat(value, key, group_separator, condition_separator, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Color, ColorFilter, InclusionExclusion, MatchType, StatFilters};
    use crate::schema::PARAMETERS;

    /// A non-default value of the right shape for every kind.
    fn sample(kind: &ParamKind) -> ParamValue {
        match *kind {
            ParamKind::Text { .. } => ParamValue::Text("lightning bolt".into()),
            ParamKind::Number { default, .. } => ParamValue::Number(default + 40),
            ParamKind::Boolean { default, .. } => ParamValue::Bool(!default),
            ParamKind::Enum {
                options, default, ..
            } => ParamValue::Enum(
                options
                    .iter()
                    .find(|o| **o != default)
                    .copied()
                    .unwrap_or(default)
                    .to_string(),
            ),
            ParamKind::InclusionExclusion { .. } => ParamValue::InclusionExclusion(
                InclusionExclusion::new(["a|b", "c"], ["d e"]),
            ),
            ParamKind::Color { .. } => ParamValue::Color(ColorFilter {
                colors: vec![Color::U, Color::R],
                match_type: MatchType::AtMost,
                include_colorless: true,
            }),
            ParamKind::Stat { .. } => {
                let mut stats = StatFilters::new();
                stats.insert("power".into(), vec!["gte1".into(), "lte3".into()]);
                stats.insert("cmc".into(), vec!["eq2".into()]);
                ParamValue::Stats(stats)
            }
        }
    }

    #[test]
    fn every_registered_parameter_round_trips() {
        for config in PARAMETERS {
            let value = sample(&config.kind);
            let mut out = QueryParams::new();
            encode_query(&config.kind, &value, &mut out).unwrap();

            let reparsed = QueryParams::parse(&out.to_string());
            let decoded = decode_query(&config.kind, &reparsed).unwrap();
            assert_eq!(decoded, Some(value), "round trip failed for {}", config.name);
        }
    }

    #[test]
    fn missing_keys_decode_to_none_for_every_kind() {
        let empty = QueryParams::new();
        for config in PARAMETERS {
            assert_eq!(decode_query(&config.kind, &empty), Ok(None), "{}", config.name);
        }
    }

    #[test]
    fn encoders_write_only_their_own_keys() {
        for config in PARAMETERS {
            let mut out = QueryParams::new();
            encode_query(&config.kind, &sample(&config.kind), &mut out).unwrap();
            let own = config.kind.url_keys();
            assert!(out.keys().all(|k| own.contains(&k)), "{}", config.name);
        }
    }
}
