//! The parameter registry for the cards and sets catalogs.

use super::spec::{ParamKind, ParameterConfig};
use crate::model::Mode;
use std::collections::HashMap;

/// Name of the shared sort direction parameter.
pub const SORT_ORDER: &str = "sortOrder";

/// Name of the shared page size parameter.
pub const PAGE_SIZE: &str = "pageSize";

const CARD_SORT_FIELDS: &[&str] = &[
    "releasedAt",
    "name",
    "collectorNumber",
    "cmc",
    "power",
    "toughness",
    "rarity",
    "usdPrice",
];

const SET_SORT_FIELDS: &[&str] = &[
    "releasedAt",
    "name",
    "code",
    "cardCount",
    "setType",
    "category",
];

/// Registry of all search parameters.
///
/// This is the single source of truth for parameter metadata.
/// Adding a filter means adding an entry here.
pub const PARAMETERS: &[ParameterConfig] = &[
    // Cards: text search
    ParameterConfig::cards("name", ParamKind::text("name")),
    ParameterConfig::cards("oracleText", ParamKind::text("oracleText")),
    ParameterConfig::cards("artist", ParamKind::text("artist")),
    ParameterConfig::cards(
        "oneResultPerCardName",
        ParamKind::boolean("oneResultPerCardName", false),
    ),
    // Cards: facets
    ParameterConfig::cards(
        "rarities",
        ParamKind::include_exclude("includeRarities", "excludeRarities"),
    ),
    ParameterConfig::cards("sets", ParamKind::include_exclude("includeSets", "excludeSets")),
    ParameterConfig::cards(
        "types",
        ParamKind::include_exclude("includeTypes", "excludeTypes"),
    ),
    ParameterConfig::cards(
        "layouts",
        ParamKind::include_exclude("includeLayouts", "excludeLayouts"),
    ),
    ParameterConfig::cards("colors", ParamKind::color("colors", "matchType", "colorless")),
    ParameterConfig::cards("stats", ParamKind::stat("stats")),
    ParameterConfig::cards(
        "sortBy",
        ParamKind::options("sortBy", CARD_SORT_FIELDS, "releasedAt"),
    ),
    // Sets
    ParameterConfig::sets("setName", ParamKind::text("setName")),
    ParameterConfig::sets("code", ParamKind::text("code")),
    ParameterConfig::sets(
        "setTypes",
        ParamKind::include_exclude("includeSetTypes", "excludeSetTypes"),
    ),
    ParameterConfig::sets(
        "setCategories",
        ParamKind::include_exclude("includeSetCategories", "excludeSetCategories"),
    ),
    ParameterConfig::sets("showSubsets", ParamKind::boolean("showSubsets", true)),
    ParameterConfig::sets(
        "setSortBy",
        ParamKind::options("setSortBy", SET_SORT_FIELDS, "releasedAt"),
    ),
    // Both catalogs
    ParameterConfig::both(SORT_ORDER, ParamKind::options("sortOrder", &["asc", "desc"], "asc")),
    ParameterConfig::both("viewMode", ParamKind::options("view", &["grid", "table"], "grid")),
    ParameterConfig::both(PAGE_SIZE, ParamKind::number("pageSize", 20)),
    ParameterConfig::both("page", ParamKind::number("page", 1)),
];

/// A parameter table plus the queries the adapters need from it.
///
/// [`Schema::builtin`] wraps [`PARAMETERS`]; other tables can be wrapped for
/// tests or for embedding catalogs with different filters.
#[derive(Debug, Clone, Copy)]
pub struct Schema<'a> {
    params: &'a [ParameterConfig],
}

impl Default for Schema<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Schema<'static> {
    pub const fn builtin() -> Self {
        Self { params: PARAMETERS }
    }
}

impl<'a> Schema<'a> {
    pub const fn new(params: &'a [ParameterConfig]) -> Self {
        Self { params }
    }

    /// All entries, in declaration order.
    pub fn all(&self) -> impl Iterator<Item = &'a ParameterConfig> {
        self.params.iter()
    }

    /// Entries that apply to `mode` (scoped to it or to both modes).
    ///
    /// Iteration follows declaration order, which only affects the order of
    /// keys in emitted URLs.
    pub fn for_mode(&self, mode: Mode) -> impl Iterator<Item = &'a ParameterConfig> {
        self.params.iter().filter(move |p| p.scope.includes(mode))
    }

    pub fn get(&self, name: &str) -> Option<&'a ParameterConfig> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Whether any entry, in any mode, reads `key` from the URL.
    pub fn is_recognized_url_key(&self, key: &str) -> bool {
        self.params.iter().any(|p| p.kind.url_keys().contains(&key))
    }

    /// Check the table's invariants, returning one line per violation.
    ///
    /// - names are unique
    /// - within one mode, no URL key is owned by two entries
    /// - enum defaults are among their options
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        let mut names: HashMap<&str, usize> = HashMap::new();
        for p in self.params {
            *names.entry(p.name).or_default() += 1;
        }
        for (name, count) in names {
            if count > 1 {
                problems.push(format!("parameter `{name}` is declared {count} times"));
            }
        }

        for mode in Mode::ALL {
            let mut owners: HashMap<&str, &str> = HashMap::new();
            for p in self.for_mode(mode) {
                for key in p.kind.url_keys() {
                    if let Some(owner) = owners.insert(key, p.name) {
                        problems.push(format!(
                            "URL key `{key}` is used by both `{owner}` and `{}` in {mode} mode",
                            p.name
                        ));
                    }
                }
            }
        }

        for p in self.params {
            if let ParamKind::Enum {
                options, default, ..
            } = p.kind
            {
                if !options.contains(&default) {
                    problems.push(format!(
                        "enum `{}` defaults to `{default}`, which is not an option",
                        p.name
                    ));
                }
            }
        }

        problems.sort();
        problems
    }
}

/// Look up a built-in parameter by name.
pub fn get_parameter(name: &str) -> Option<&'static ParameterConfig> {
    Schema::builtin().get(name)
}

/// Built-in parameters that apply to `mode`.
pub fn parameters_for_mode(mode: Mode) -> impl Iterator<Item = &'static ParameterConfig> {
    Schema::builtin().for_mode(mode)
}

/// Whether a URL key belongs to any built-in parameter.
pub fn is_recognized_url_key(key: &str) -> bool {
    Schema::builtin().is_recognized_url_key(key)
}

/// The name of the enum parameter holding the sort field for `mode`.
pub fn sort_field_parameter(mode: Mode) -> &'static str {
    match mode {
        Mode::Cards => "sortBy",
        Mode::Sets => "setSortBy",
    }
}
