//! # Domain Model: Modes, Filter Values and Search State
//!
//! This module defines the values that flow between the URL, the stores and the
//! rendering layer: [`Mode`], the composite filter shapes, [`ParamValue`],
//! [`SearchState`] and [`AppSearchState`].
//!
//! ## Presence Is the Signal
//!
//! A [`SearchState`] holds only values that differ from their parameter's
//! default. A key that is absent means "use the default", never "null".
//! [`SearchState::assign`] keeps this invariant: assigning a default value
//! removes the key instead of storing it.
//!
//! ## Canonical Values
//!
//! Some values carry information the URL cannot express (a match type with no
//! colors, a stat attribute with no conditions). [`ParamValue::canonical`]
//! strips that information so that a value survives URL encoding unchanged.
//!
//! ## Immutability
//!
//! Consumers replace composite values wholesale; they never edit the
//! `include`/`exclude`/`colors` vectors of a value held by a state in place.

use crate::error::FacetError;
use crate::schema::ParameterConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Which catalog is being browsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Cards,
    Sets,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Cards, Mode::Sets];

    /// The textual form used by the mode indicator and storage keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Cards => "cards",
            Mode::Sets => "sets",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = FacetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cards" => Ok(Mode::Cards),
            "sets" => Ok(Mode::Sets),
            other => Err(FacetError::UnknownMode(other.to_string())),
        }
    }
}

/// Which modes a parameter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeScope {
    Cards,
    Sets,
    Both,
}

impl ModeScope {
    pub fn includes(self, mode: Mode) -> bool {
        match self {
            ModeScope::Both => true,
            ModeScope::Cards => mode == Mode::Cards,
            ModeScope::Sets => mode == Mode::Sets,
        }
    }
}

/// One of the five colors of the color-identity filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    W,
    U,
    B,
    R,
    G,
}

impl Color {
    pub fn symbol(self) -> &'static str {
        match self {
            Color::W => "W",
            Color::U => "U",
            Color::B => "B",
            Color::R => "R",
            Color::G => "G",
        }
    }

    /// Parse a color symbol, case-insensitively.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.to_ascii_uppercase().as_str() {
            "W" => Some(Color::W),
            "U" => Some(Color::U),
            "B" => Some(Color::B),
            "R" => Some(Color::R),
            "G" => Some(Color::G),
            _ => None,
        }
    }
}

/// How the selected colors are compared against a card's color identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchType {
    #[default]
    Exactly,
    AtLeast,
    AtMost,
}

impl MatchType {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchType::Exactly => "exactly",
            MatchType::AtLeast => "atLeast",
            MatchType::AtMost => "atMost",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "exactly" => Some(MatchType::Exactly),
            "atLeast" => Some(MatchType::AtLeast),
            "atMost" => Some(MatchType::AtMost),
            _ => None,
        }
    }
}

/// Two disjoint token sets: values to include and values to exclude.
///
/// Keeping a token out of both sides is the producer's job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InclusionExclusion {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl InclusionExclusion {
    pub fn new<I, E>(include: I, exclude: E) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        Self {
            include: include.into_iter().map(Into::into).collect(),
            exclude: exclude.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorFilter {
    pub colors: Vec<Color>,
    pub match_type: MatchType,
    pub include_colorless: bool,
}

impl ColorFilter {
    /// True when the filter selects nothing, whatever its match type says.
    pub fn is_inactive(&self) -> bool {
        self.colors.is_empty() && !self.include_colorless
    }
}

/// Attribute name (e.g. `power`) to its opaque condition tokens (e.g. `gte1`).
pub type StatFilters = BTreeMap<String, Vec<String>>;

/// Runtime representation of one parameter's value.
///
/// Serializes to the natural JSON form of each shape, which is also the
/// snapshot format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Text(String),
    Number(i64),
    Bool(bool),
    Enum(String),
    InclusionExclusion(InclusionExclusion),
    Color(ColorFilter),
    Stats(StatFilters),
}

impl ParamValue {
    /// The shape name, matching [`crate::schema::ParamKind::shape`].
    pub fn shape(&self) -> &'static str {
        match self {
            ParamValue::Text(_) => "string",
            ParamValue::Number(_) => "number",
            ParamValue::Bool(_) => "boolean",
            ParamValue::Enum(_) => "enum",
            ParamValue::InclusionExclusion(_) => "inclusionExclusion",
            ParamValue::Color(_) => "colorFilter",
            ParamValue::Stats(_) => "statFilter",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) | ParamValue::Enum(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            ParamValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_inclusion_exclusion(&self) -> Option<&InclusionExclusion> {
        match self {
            ParamValue::InclusionExclusion(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<&ColorFilter> {
        match self {
            ParamValue::Color(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_stats(&self) -> Option<&StatFilters> {
        match self {
            ParamValue::Stats(v) => Some(v),
            _ => None,
        }
    }

    /// Strip what the URL form cannot carry.
    ///
    /// - empty tokens are dropped from include/exclude lists
    /// - a color filter without colors always has `matchType = exactly`
    /// - stat attributes with no conditions (or an empty name) are dropped
    pub fn canonical(self) -> Self {
        match self {
            ParamValue::InclusionExclusion(mut v) => {
                v.include.retain(|t| !t.is_empty());
                v.exclude.retain(|t| !t.is_empty());
                ParamValue::InclusionExclusion(v)
            }
            ParamValue::Color(mut v) => {
                if v.colors.is_empty() {
                    v.match_type = MatchType::Exactly;
                }
                ParamValue::Color(v)
            }
            ParamValue::Stats(stats) => ParamValue::Stats(
                stats
                    .into_iter()
                    .filter(|(attr, _)| !attr.is_empty())
                    .map(|(attr, conds)| {
                        let conds: Vec<String> =
                            conds.into_iter().filter(|c| !c.is_empty()).collect();
                        (attr, conds)
                    })
                    .filter(|(_, conds)| !conds.is_empty())
                    .collect(),
            ),
            other => other,
        }
    }
}

/// Parameter values for one mode, keyed by parameter name.
///
/// A key is present when its value differs from the schema default, or when
/// it overrides a value the mode's hard defaults hold (see
/// [`SearchState::assign_over`]). An absent key means the schema default.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SearchState {
    values: BTreeMap<String, ParamValue>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Store a value as-is, with no canonicalization or default check.
    ///
    /// Prefer [`SearchState::assign`]; this exists for producers that build
    /// states by hand (and for exercising the encoder with raw values).
    pub fn insert(&mut self, name: impl Into<String>, value: ParamValue) -> Option<ParamValue> {
        self.values.insert(name.into(), value)
    }

    pub fn remove(&mut self, name: &str) -> Option<ParamValue> {
        self.values.remove(name)
    }

    /// Store the canonical form of `value`, or remove the key when that form
    /// equals the parameter's default.
    ///
    /// Returns `true` when the key is present afterwards.
    pub fn assign(&mut self, config: &ParameterConfig, value: ParamValue) -> bool {
        self.assign_over(config, value, &SearchState::new())
    }

    /// Like [`SearchState::assign`], but a value equal to the schema default
    /// is still stored when `baseline` holds the key, so an explicit choice
    /// survives being laid over preferences.
    pub fn assign_over(
        &mut self,
        config: &ParameterConfig,
        value: ParamValue,
        baseline: &SearchState,
    ) -> bool {
        let value = value.canonical();
        if value == config.default_value() && !baseline.contains_key(config.name) {
            self.values.remove(config.name);
            false
        } else {
            self.values.insert(config.name.to_string(), value);
            true
        }
    }

    /// The stored value, or the parameter's default when absent.
    pub fn value_or_default(&self, config: &ParameterConfig) -> ParamValue {
        self.values
            .get(config.name)
            .cloned()
            .unwrap_or_else(|| config.default_value())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// The full application search state: one [`SearchState`] per catalog and
/// the mode currently on screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSearchState {
    pub active_mode: Mode,
    #[serde(rename = "cardsSearchState")]
    pub cards: SearchState,
    #[serde(rename = "setsSearchState")]
    pub sets: SearchState,
}

impl AppSearchState {
    pub fn for_mode(&self, mode: Mode) -> &SearchState {
        match mode {
            Mode::Cards => &self.cards,
            Mode::Sets => &self.sets,
        }
    }

    pub fn for_mode_mut(&mut self, mode: Mode) -> &mut SearchState {
        match mode {
            Mode::Cards => &mut self.cards,
            Mode::Sets => &mut self.sets,
        }
    }

    pub fn current(&self) -> &SearchState {
        self.for_mode(self.active_mode)
    }

    pub fn current_mut(&mut self) -> &mut SearchState {
        self.for_mode_mut(self.active_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::get_parameter;

    #[test]
    fn mode_parses_and_displays() {
        assert_eq!("cards".parse::<Mode>().unwrap(), Mode::Cards);
        assert_eq!("sets".parse::<Mode>().unwrap(), Mode::Sets);
        assert!("decks".parse::<Mode>().is_err());
        assert_eq!(Mode::Sets.to_string(), "sets");
    }

    #[test]
    fn scope_both_includes_every_mode() {
        assert!(ModeScope::Both.includes(Mode::Cards));
        assert!(ModeScope::Both.includes(Mode::Sets));
        assert!(ModeScope::Cards.includes(Mode::Cards));
        assert!(!ModeScope::Cards.includes(Mode::Sets));
        assert!(!ModeScope::Sets.includes(Mode::Cards));
    }

    #[test]
    fn color_symbols_are_case_insensitive() {
        assert_eq!(Color::from_symbol("u"), Some(Color::U));
        assert_eq!(Color::from_symbol("G"), Some(Color::G));
        assert_eq!(Color::from_symbol("C"), None);
        assert_eq!(Color::from_symbol(""), None);
    }

    #[test]
    fn match_type_parse_is_exact() {
        assert_eq!(MatchType::parse("atLeast"), Some(MatchType::AtLeast));
        assert_eq!(MatchType::parse("atleast"), None);
        assert_eq!(MatchType::default(), MatchType::Exactly);
    }

    #[test]
    fn canonical_color_without_colors_resets_match_type() {
        let value = ParamValue::Color(ColorFilter {
            colors: vec![],
            match_type: MatchType::AtMost,
            include_colorless: true,
        });
        let expected = ParamValue::Color(ColorFilter {
            colors: vec![],
            match_type: MatchType::Exactly,
            include_colorless: true,
        });
        assert_eq!(value.canonical(), expected);
    }

    #[test]
    fn canonical_color_with_colors_keeps_match_type() {
        let value = ParamValue::Color(ColorFilter {
            colors: vec![Color::R],
            match_type: MatchType::AtMost,
            include_colorless: false,
        });
        assert_eq!(value.clone().canonical(), value);
    }

    #[test]
    fn canonical_stats_drop_empty_attributes() {
        let mut stats = StatFilters::new();
        stats.insert("power".into(), vec!["gte1".into(), "".into()]);
        stats.insert("toughness".into(), vec![]);
        stats.insert("".into(), vec!["eq2".into()]);

        let ParamValue::Stats(stats) = ParamValue::Stats(stats).canonical() else {
            panic!("Expected Stats");
        };
        assert_eq!(stats.len(), 1);
        assert_eq!(stats["power"], vec!["gte1".to_string()]);
    }

    #[test]
    fn assign_default_removes_key() {
        let config = get_parameter("pageSize").unwrap();
        let mut state = SearchState::new();

        assert!(state.assign(config, ParamValue::Number(50)));
        assert_eq!(state.get("pageSize"), Some(&ParamValue::Number(50)));

        assert!(!state.assign(config, ParamValue::Number(20)));
        assert!(!state.contains_key("pageSize"));
    }

    #[test]
    fn assign_canonicalizes_before_default_check() {
        let config = get_parameter("colors").unwrap();
        let mut state = SearchState::new();

        // No colors and no colorless: the match type alone is not a filter.
        let inert = ParamValue::Color(ColorFilter {
            colors: vec![],
            match_type: MatchType::AtLeast,
            include_colorless: false,
        });
        assert!(!state.assign(config, inert));
        assert!(state.is_empty());
    }

    #[test]
    fn assign_over_keeps_default_that_overrides_baseline() {
        let config = get_parameter("pageSize").unwrap();
        let mut baseline = SearchState::new();
        baseline.insert("pageSize", ParamValue::Number(50));

        let mut state = baseline.clone();
        assert!(state.assign_over(config, ParamValue::Number(20), &baseline));
        assert_eq!(state.get("pageSize"), Some(&ParamValue::Number(20)));

        let mut plain = SearchState::new();
        assert!(!plain.assign_over(config, ParamValue::Number(20), &SearchState::new()));
        assert!(plain.is_empty());
    }

    #[test]
    fn mode_defaults_to_cards() {
        assert_eq!(Mode::default(), Mode::Cards);
    }

    #[test]
    fn value_or_default_falls_back_to_schema() {
        let config = get_parameter("sortOrder").unwrap();
        let state = SearchState::new();
        assert_eq!(
            state.value_or_default(config),
            ParamValue::Enum("asc".into())
        );
    }

    #[test]
    fn app_state_current_follows_active_mode() {
        let mut app = AppSearchState::default();
        app.sets.insert("code", ParamValue::Text("mh3".into()));

        assert_eq!(app.active_mode, Mode::Cards);
        assert!(app.current().is_empty());

        app.active_mode = Mode::Sets;
        assert!(app.current().contains_key("code"));

        app.current_mut().remove("code");
        assert!(app.sets.is_empty());
    }

    #[test]
    fn search_state_serializes_as_plain_object() {
        let mut state = SearchState::new();
        state.insert(
            "rarities",
            ParamValue::InclusionExclusion(InclusionExclusion::new(["rare"], Vec::<String>::new())),
        );
        state.insert("page", ParamValue::Number(3));

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "page": 3,
                "rarities": { "include": ["rare"], "exclude": [] }
            })
        );
    }

    #[test]
    fn app_state_serializes_with_mode_state_names() {
        let app = AppSearchState::default();
        let json = serde_json::to_value(&app).unwrap();
        assert_eq!(json["activeMode"], "cards");
        assert!(json["cardsSearchState"].is_object());
        assert!(json["setsSearchState"].is_object());
    }
}
