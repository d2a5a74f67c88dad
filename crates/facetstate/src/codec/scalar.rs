//! Codecs for single-key shapes: string, number, boolean and enum.

use super::QueryParams;
use crate::error::CodecError;
use crate::model::ParamValue;

/// A present, non-empty value for `key`.
fn present<'a>(params: &'a QueryParams, key: &str) -> Option<&'a str> {
    params.get(key).filter(|raw| !raw.is_empty())
}

pub fn decode_text(params: &QueryParams, key: &str) -> Result<Option<ParamValue>, CodecError> {
    Ok(present(params, key).map(|raw| ParamValue::Text(raw.to_string())))
}

pub fn decode_number(params: &QueryParams, key: &str) -> Result<Option<ParamValue>, CodecError> {
    let Some(raw) = present(params, key) else {
        return Ok(None);
    };
    parse_integer_prefix(raw)
        .map(|n| Some(ParamValue::Number(n)))
        .ok_or_else(|| CodecError::InvalidNumber {
            raw: raw.to_string(),
        })
}

pub fn decode_boolean(params: &QueryParams, key: &str) -> Result<Option<ParamValue>, CodecError> {
    match present(params, key) {
        None => Ok(None),
        Some("true") => Ok(Some(ParamValue::Bool(true))),
        Some("false") => Ok(Some(ParamValue::Bool(false))),
        Some(raw) => Err(CodecError::InvalidBoolean {
            raw: raw.to_string(),
        }),
    }
}

pub fn decode_enum(
    params: &QueryParams,
    key: &str,
    options: &'static [&'static str],
) -> Result<Option<ParamValue>, CodecError> {
    let Some(raw) = present(params, key) else {
        return Ok(None);
    };
    if options.contains(&raw) {
        Ok(Some(ParamValue::Enum(raw.to_string())))
    } else {
        Err(CodecError::UnknownOption {
            raw: raw.to_string(),
            options,
        })
    }
}

pub fn encode_text(value: &ParamValue, key: &str, out: &mut QueryParams) -> Result<(), CodecError> {
    let ParamValue::Text(text) = value else {
        return Err(CodecError::ShapeMismatch { expected: "string" });
    };
    if !text.is_empty() {
        out.append(key, text.as_str());
    }
    Ok(())
}

pub fn encode_number(value: &ParamValue, key: &str, out: &mut QueryParams) -> Result<(), CodecError> {
    let ParamValue::Number(n) = value else {
        return Err(CodecError::ShapeMismatch { expected: "number" });
    };
    out.append(key, n.to_string());
    Ok(())
}

pub fn encode_boolean(value: &ParamValue, key: &str, out: &mut QueryParams) -> Result<(), CodecError> {
    let ParamValue::Bool(b) = value else {
        return Err(CodecError::ShapeMismatch {
            expected: "boolean",
        });
    };
    out.append(key, if *b { "true" } else { "false" });
    Ok(())
}

pub fn encode_enum(
    value: &ParamValue,
    key: &str,
    options: &'static [&'static str],
    out: &mut QueryParams,
) -> Result<(), CodecError> {
    let ParamValue::Enum(choice) = value else {
        return Err(CodecError::ShapeMismatch { expected: "enum" });
    };
    if !options.contains(&choice.as_str()) {
        return Err(CodecError::UnknownOption {
            raw: choice.clone(),
            options,
        });
    }
    out.append(key, choice.as_str());
    Ok(())
}

/// Base-10 integer parsing with leading-prefix semantics.
///
/// Leading whitespace and one sign are allowed; parsing stops at the first
/// non-digit (`"12px"` is 12). No digits, or a value outside `i64`, is `None`.
pub fn parse_integer_prefix(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let digits = &rest[..end];
    if negative {
        format!("-{digits}").parse().ok()
    } else {
        digits.parse().ok()
    }
}
