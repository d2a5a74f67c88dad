//! # Parameter Schema
//!
//! Every filterable attribute of both catalogs is described once, here, by a
//! [`ParameterConfig`]. The URL adapter, the snapshot layer and the startup
//! resolver are all driven by this table; none of them know about individual
//! parameters.
//!
//! ## Parameter Kinds
//!
//! | Kind | URL layout | Example |
//! |------|------------|---------|
//! | `Text` | one key | `name=bolt` |
//! | `Number` | one key, base-10 integer | `pageSize=60` |
//! | `Boolean` | one key, `true`/`false` | `showSubsets=false` |
//! | `Enum` | one key, closed option list | `sortOrder=desc` |
//! | `InclusionExclusion` | include key + exclude key, joined tokens | `includeRarities=rare\|mythic` |
//! | `Color` | colors + match type + colorless keys | `colors=W,U&matchType=atLeast` |
//! | `Stat` | one key, `attr=c1\|c2,attr2=c3` | `stats=power%3Dgte1` |
//!
//! The kind carries both the value shape and the URL keys, so a parameter can
//! never be declared with a layout that does not fit its shape.
//!
//! ## Modes
//!
//! Each entry applies to `cards`, `sets` or both. [`parameters_for_mode`]
//! returns the projection for one mode; entries scoped to both modes use the
//! same URL keys in either projection.
//!
//! ## Usage
//!
//! ```
//! use facetstate::model::Mode;
//! use facetstate::schema::{get_parameter, parameters_for_mode};
//!
//! let rarities = get_parameter("rarities").unwrap();
//! assert_eq!(rarities.kind.url_keys(), vec!["includeRarities", "excludeRarities"]);
//!
//! assert!(parameters_for_mode(Mode::Sets).all(|p| p.name != "rarities"));
//! ```

mod catalog;
mod spec;

pub use catalog::{
    get_parameter, is_recognized_url_key, parameters_for_mode, sort_field_parameter, Schema,
    PAGE_SIZE, PARAMETERS, SORT_ORDER,
};
pub use spec::{ParamKind, ParameterConfig};
