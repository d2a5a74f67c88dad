//! Snapshot codec: one parameter value from its JSON form.
//!
//! The JSON form is whatever [`ParamValue`] serializes to, so encoding is
//! plain `serde_json`. Decoding needs the schema, because several shapes share
//! a JSON type (a string may be text or an enum option).

use crate::error::CodecError;
use crate::model::{ColorFilter, InclusionExclusion, ParamValue, StatFilters};
use crate::schema::ParamKind;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub fn decode_json(kind: &ParamKind, value: &Value) -> Result<Option<ParamValue>, CodecError> {
    if value.is_null() {
        return Ok(None);
    }
    let mismatch = || CodecError::ShapeMismatch {
        expected: kind.shape(),
    };

    let decoded = match *kind {
        ParamKind::Text { .. } => ParamValue::Text(value.as_str().ok_or_else(mismatch)?.to_string()),
        ParamKind::Number { .. } => ParamValue::Number(value.as_i64().ok_or_else(mismatch)?),
        ParamKind::Boolean { .. } => ParamValue::Bool(value.as_bool().ok_or_else(mismatch)?),
        ParamKind::Enum { options, .. } => {
            let raw = value.as_str().ok_or_else(mismatch)?;
            if !options.contains(&raw) {
                return Err(CodecError::UnknownOption {
                    raw: raw.to_string(),
                    options,
                });
            }
            ParamValue::Enum(raw.to_string())
        }
        ParamKind::InclusionExclusion { .. } => ParamValue::InclusionExclusion(
            from_json::<InclusionExclusion>(value).ok_or_else(mismatch)?,
        ),
        ParamKind::Color { .. } => {
            ParamValue::Color(from_json::<ColorFilter>(value).ok_or_else(mismatch)?)
        }
        ParamKind::Stat { .. } => {
            ParamValue::Stats(from_json::<StatFilters>(value).ok_or_else(mismatch)?)
        }
    };
    Ok(Some(decoded))
}

fn from_json<T: DeserializeOwned>(value: &Value) -> Option<T> {
    serde_json::from_value(value.clone()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Color, MatchType};
    use crate::schema::get_parameter;
    use serde_json::json;

    fn kind(name: &str) -> ParamKind {
        get_parameter(name).unwrap().kind
    }

    #[test]
    fn scalars_decode_by_declared_shape() {
        assert_eq!(
            decode_json(&kind("name"), &json!("bolt")),
            Ok(Some(ParamValue::Text("bolt".into())))
        );
        assert_eq!(
            decode_json(&kind("sortOrder"), &json!("desc")),
            Ok(Some(ParamValue::Enum("desc".into())))
        );
        assert_eq!(
            decode_json(&kind("pageSize"), &json!(60)),
            Ok(Some(ParamValue::Number(60)))
        );
        assert_eq!(
            decode_json(&kind("showSubsets"), &json!(false)),
            Ok(Some(ParamValue::Bool(false)))
        );
    }

    #[test]
    fn null_is_absent() {
        assert_eq!(decode_json(&kind("name"), &Value::Null), Ok(None));
    }

    #[test]
    fn wrong_json_type_is_a_mismatch() {
        assert_eq!(
            decode_json(&kind("pageSize"), &json!("20")),
            Err(CodecError::ShapeMismatch { expected: "number" })
        );
        assert_eq!(
            decode_json(&kind("pageSize"), &json!(20.5)),
            Err(CodecError::ShapeMismatch { expected: "number" })
        );
    }

    #[test]
    fn enum_outside_options_is_rejected() {
        assert!(matches!(
            decode_json(&kind("sortBy"), &json!("flavor")),
            Err(CodecError::UnknownOption { .. })
        ));
    }

    #[test]
    fn composites_decode_from_their_serialized_form() {
        let ie = decode_json(&kind("rarities"), &json!({ "include": ["rare"] })).unwrap();
        assert_eq!(
            ie,
            Some(ParamValue::InclusionExclusion(InclusionExclusion::new(
                ["rare"],
                Vec::<String>::new()
            )))
        );

        let color = decode_json(
            &kind("colors"),
            &json!({ "colors": ["W", "B"], "matchType": "atMost", "includeColorless": true }),
        )
        .unwrap();
        assert_eq!(
            color,
            Some(ParamValue::Color(ColorFilter {
                colors: vec![Color::W, Color::B],
                match_type: MatchType::AtMost,
                include_colorless: true,
            }))
        );

        let stats = decode_json(&kind("stats"), &json!({ "power": ["gte1"] })).unwrap();
        let Some(ParamValue::Stats(stats)) = stats else {
            panic!("Expected Stats");
        };
        assert_eq!(stats["power"], vec!["gte1".to_string()]);
    }

    #[test]
    fn serialized_values_decode_back() {
        let original = ParamValue::Color(ColorFilter {
            colors: vec![Color::G],
            match_type: MatchType::AtLeast,
            include_colorless: false,
        });
        let json = serde_json::to_value(&original).unwrap();
        assert_eq!(decode_json(&kind("colors"), &json), Ok(Some(original)));
    }

    #[test]
    fn unknown_color_in_snapshot_is_a_mismatch() {
        assert_eq!(
            decode_json(&kind("colors"), &json!({ "colors": ["P"] })),
            Err(CodecError::ShapeMismatch {
                expected: "colorFilter"
            })
        );
    }
}
