//! Parameter specifications.
//!
//! This module defines the schema types: what shape each parameter holds, how
//! it is laid out in the URL, which modes it applies to, and its default.

use crate::model::{ColorFilter, InclusionExclusion, ModeScope, ParamValue, StatFilters};

/// The value shape of a parameter together with its URL layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Free text under a single key.
    Text {
        key: &'static str,
        default: &'static str,
    },

    /// Base-10 integer under a single key.
    Number { key: &'static str, default: i64 },

    /// `true` / `false` under a single key.
    Boolean { key: &'static str, default: bool },

    /// One of a closed set of options under a single key.
    Enum {
        key: &'static str,
        options: &'static [&'static str],
        default: &'static str,
    },

    /// Include and exclude token lists under two keys.
    ///
    /// Defaults to both lists empty.
    InclusionExclusion {
        include: &'static str,
        exclude: &'static str,
        separator: char,
    },

    /// Color identity filter under three keys.
    ///
    /// Defaults to no colors, `exactly`, colorless off.
    Color {
        colors: &'static str,
        match_type: &'static str,
        colorless: &'static str,
        separator: char,
    },

    /// Attribute → condition lists under a single key.
    ///
    /// Defaults to no attributes.
    Stat {
        key: &'static str,
        group_separator: char,
        condition_separator: char,
    },
}

impl ParamKind {
    pub const fn text(key: &'static str) -> Self {
        ParamKind::Text { key, default: "" }
    }

    pub const fn number(key: &'static str, default: i64) -> Self {
        ParamKind::Number { key, default }
    }

    pub const fn boolean(key: &'static str, default: bool) -> Self {
        ParamKind::Boolean { key, default }
    }

    pub const fn options(
        key: &'static str,
        options: &'static [&'static str],
        default: &'static str,
    ) -> Self {
        ParamKind::Enum {
            key,
            options,
            default,
        }
    }

    pub const fn include_exclude(include: &'static str, exclude: &'static str) -> Self {
        ParamKind::InclusionExclusion {
            include,
            exclude,
            separator: '|',
        }
    }

    pub const fn color(colors: &'static str, match_type: &'static str, colorless: &'static str) -> Self {
        ParamKind::Color {
            colors,
            match_type,
            colorless,
            separator: ',',
        }
    }

    pub const fn stat(key: &'static str) -> Self {
        ParamKind::Stat {
            key,
            group_separator: ',',
            condition_separator: '|',
        }
    }

    /// The shape name, as used in error messages and schema listings.
    pub fn shape(&self) -> &'static str {
        match self {
            ParamKind::Text { .. } => "string",
            ParamKind::Number { .. } => "number",
            ParamKind::Boolean { .. } => "boolean",
            ParamKind::Enum { .. } => "enum",
            ParamKind::InclusionExclusion { .. } => "inclusionExclusion",
            ParamKind::Color { .. } => "colorFilter",
            ParamKind::Stat { .. } => "statFilter",
        }
    }

    /// Every URL key this kind reads and writes, in emission order.
    pub fn url_keys(&self) -> Vec<&'static str> {
        match *self {
            ParamKind::Text { key, .. }
            | ParamKind::Number { key, .. }
            | ParamKind::Boolean { key, .. }
            | ParamKind::Enum { key, .. }
            | ParamKind::Stat { key, .. } => vec![key],
            ParamKind::InclusionExclusion {
                include, exclude, ..
            } => vec![include, exclude],
            ParamKind::Color {
                colors,
                match_type,
                colorless,
                ..
            } => vec![colors, match_type, colorless],
        }
    }

    /// The value a parameter of this kind has when nothing is set.
    pub fn default_value(&self) -> ParamValue {
        match *self {
            ParamKind::Text { default, .. } => ParamValue::Text(default.to_string()),
            ParamKind::Number { default, .. } => ParamValue::Number(default),
            ParamKind::Boolean { default, .. } => ParamValue::Bool(default),
            ParamKind::Enum { default, .. } => ParamValue::Enum(default.to_string()),
            ParamKind::InclusionExclusion { .. } => {
                ParamValue::InclusionExclusion(InclusionExclusion::default())
            }
            ParamKind::Color { .. } => ParamValue::Color(ColorFilter::default()),
            ParamKind::Stat { .. } => ParamValue::Stats(StatFilters::new()),
        }
    }
}

/// Specification for a single filterable parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterConfig {
    /// The key of this parameter in a [`crate::model::SearchState`].
    pub name: &'static str,

    /// Which catalogs the parameter applies to.
    pub scope: ModeScope,

    /// Value shape and URL layout.
    pub kind: ParamKind,

    /// Required parameters are written to the URL even at their default.
    pub required: bool,
}

impl ParameterConfig {
    pub const fn new(name: &'static str, scope: ModeScope, kind: ParamKind) -> Self {
        Self {
            name,
            scope,
            kind,
            required: false,
        }
    }

    pub const fn cards(name: &'static str, kind: ParamKind) -> Self {
        Self::new(name, ModeScope::Cards, kind)
    }

    pub const fn sets(name: &'static str, kind: ParamKind) -> Self {
        Self::new(name, ModeScope::Sets, kind)
    }

    pub const fn both(name: &'static str, kind: ParamKind) -> Self {
        Self::new(name, ModeScope::Both, kind)
    }

    /// Set the required flag.
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(&self) -> ParamValue {
        self.kind.default_value()
    }

    /// Whether `value` has the shape this parameter declares.
    pub fn accepts(&self, value: &ParamValue) -> bool {
        self.kind.shape() == value.shape()
    }
}
