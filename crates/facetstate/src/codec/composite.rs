//! Codecs for multi-token shapes: inclusion/exclusion, color and stat filters.

use super::tokens;
use super::QueryParams;
use crate::error::CodecError;
use crate::model::{Color, ColorFilter, InclusionExclusion, MatchType, ParamValue, StatFilters};

pub fn decode_inclusion_exclusion(
    params: &QueryParams,
    include_key: &str,
    exclude_key: &str,
    separator: char,
) -> Result<Option<ParamValue>, CodecError> {
    let include = match params.get(include_key) {
        Some(raw) => tokens::split(raw, separator)?,
        None => Vec::new(),
    };
    let exclude = match params.get(exclude_key) {
        Some(raw) => tokens::split(raw, separator)?,
        None => Vec::new(),
    };

    let value = InclusionExclusion { include, exclude };
    if value.is_empty() {
        return Ok(None);
    }
    Ok(Some(ParamValue::InclusionExclusion(value)))
}

pub fn encode_inclusion_exclusion(
    value: &ParamValue,
    include_key: &str,
    exclude_key: &str,
    separator: char,
    out: &mut QueryParams,
) -> Result<(), CodecError> {
    let ParamValue::InclusionExclusion(value) = value else {
        return Err(CodecError::ShapeMismatch {
            expected: "inclusionExclusion",
        });
    };
    let reserved = [separator];
    if !value.include.is_empty() {
        out.append(include_key, tokens::join(&value.include, separator, &reserved));
    }
    if !value.exclude.is_empty() {
        out.append(exclude_key, tokens::join(&value.exclude, separator, &reserved));
    }
    Ok(())
}

/// Decode a color filter.
///
/// The filter only exists when `colors` lists at least one color or
/// `colorless` is `true`. Unknown color symbols are dropped one by one. A
/// missing or unrecognized match type reads as `exactly`; with no colors it is
/// always `exactly`.
pub fn decode_color(
    params: &QueryParams,
    colors_key: &str,
    match_type_key: &str,
    colorless_key: &str,
    separator: char,
) -> Result<Option<ParamValue>, CodecError> {
    let colors = match params.get(colors_key) {
        Some(raw) => tokens::split(raw, separator)?
            .iter()
            .filter_map(|symbol| {
                let color = Color::from_symbol(symbol);
                if color.is_none() {
                    tracing::debug!(symbol = symbol.as_str(), "unknown color symbol");
                }
                color
            })
            .collect(),
        None => Vec::new(),
    };
    let include_colorless = params.get(colorless_key) == Some("true");

    if colors.is_empty() && !include_colorless {
        return Ok(None);
    }

    let match_type = if colors.is_empty() {
        MatchType::Exactly
    } else {
        params
            .get(match_type_key)
            .and_then(MatchType::parse)
            .unwrap_or_default()
    };

    Ok(Some(ParamValue::Color(ColorFilter {
        colors,
        match_type,
        include_colorless,
    })))
}

pub fn encode_color(
    value: &ParamValue,
    colors_key: &str,
    match_type_key: &str,
    colorless_key: &str,
    separator: char,
    out: &mut QueryParams,
) -> Result<(), CodecError> {
    let ParamValue::Color(value) = value else {
        return Err(CodecError::ShapeMismatch {
            expected: "colorFilter",
        });
    };
    if !value.colors.is_empty() {
        let symbols: Vec<&str> = value.colors.iter().map(|c| c.symbol()).collect();
        out.append(colors_key, tokens::join(&symbols, separator, &[separator]));
        out.append(match_type_key, value.match_type.as_str());
    }
    if value.include_colorless {
        out.append(colorless_key, "true");
    }
    Ok(())
}

/// Decode `attr=c1|c2,attr2=c3`.
///
/// Groups without `=`, with a bad escape, with an empty attribute name, or with
/// no conditions are dropped one by one. A repeated attribute appends to the
/// earlier group's conditions.
pub fn decode_stat(
    params: &QueryParams,
    key: &str,
    group_separator: char,
    condition_separator: char,
) -> Result<Option<ParamValue>, CodecError> {
    let Some(raw) = params.get(key) else {
        return Ok(None);
    };

    let mut stats = StatFilters::new();
    for group in raw.split(group_separator).filter(|g| !g.is_empty()) {
        let Some((attribute, conditions)) = group.split_once('=') else {
            tracing::debug!(group, "stat group without `=`");
            continue;
        };
        let parsed = tokens::unescape(attribute)
            .and_then(|attribute| Ok((attribute, tokens::split(conditions, condition_separator)?)));
        let (attribute, conditions) = match parsed {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::debug!(%err, group, "stat group dropped");
                continue;
            }
        };
        if attribute.is_empty() || conditions.is_empty() {
            continue;
        }
        stats.entry(attribute).or_default().extend(conditions);
    }

    if stats.is_empty() {
        return Ok(None);
    }
    Ok(Some(ParamValue::Stats(stats)))
}

pub fn encode_stat(
    value: &ParamValue,
    key: &str,
    group_separator: char,
    condition_separator: char,
    out: &mut QueryParams,
) -> Result<(), CodecError> {
    let ParamValue::Stats(stats) = value else {
        return Err(CodecError::ShapeMismatch {
            expected: "statFilter",
        });
    };
    let reserved = [group_separator, condition_separator, '='];
    let groups: Vec<String> = stats
        .iter()
        .filter(|(attribute, conditions)| !attribute.is_empty() && !conditions.is_empty())
        .map(|(attribute, conditions)| {
            format!(
                "{}={}",
                tokens::escape(attribute, &reserved),
                tokens::join(conditions, condition_separator, &reserved)
            )
        })
        .collect();

    if !groups.is_empty() {
        out.append(key, groups.join(&group_separator.to_string()));
    }
    Ok(())
}
