//! # facetstate
//!
//! Schema-driven search state for two faceted catalogs (`cards` and `sets`).
//! The same search state lives in three places and this crate keeps them
//! consistent:
//!
//! - **In memory**: [`model::AppSearchState`], one [`model::SearchState`] per
//!   mode holding only the values that differ from their defaults.
//! - **URL**: a shareable query string.
//! - **Storage**: a session snapshot per mode, plus long-lived preferences.
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session (session.rs)                                       │
//! │  - owns the state, settles every change to URL + snapshot   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Startup Resolver (startup.rs)                              │
//! │  - URL vs snapshot vs preferences vs schema defaults        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────┐  ┌───────────────────────────┐
//! │  URL adapter (url_state.rs)  │  │  Storage (store/,         │
//! │                              │  │  preferences.rs)          │
//! └──────────────────────────────┘  └───────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Codecs (codec/) driven by the Parameter Schema (schema/)   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything below the session is a pure transform except the store reads
//! and writes, which go through [`store::KeyValueStore`].
//!
//! ## Error Policy
//!
//! Bad input never fails a page load. A malformed URL value, a corrupt
//! snapshot and an unreadable store all degrade to "absent" and are logged
//! through `tracing`. Errors surface only from explicit mutations
//! ([`session::SearchSession::set`]) and raw store access.
//!
//! ## Example
//!
//! ```
//! use facetstate::model::{Mode, ParamValue};
//! use facetstate::{convert_state_to_url_params, parse_url_to_state};
//!
//! let state = parse_url_to_state("?contentType=cards&includeRarities=rare|mythic", Mode::Cards);
//! let rarities = state.get("rarities").and_then(ParamValue::as_inclusion_exclusion).unwrap();
//! assert_eq!(rarities.include, vec!["rare", "mythic"]);
//!
//! let url = convert_state_to_url_params(&state, Mode::Cards).to_string();
//! assert_eq!(url, "contentType=cards&includeRarities=rare%7Cmythic");
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod preferences;
pub mod schema;
pub mod session;
pub mod startup;
pub mod store;
pub mod url_state;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use error::{CodecError, FacetError, Result};
pub use session::SearchSession;
pub use startup::{initial_state, resolve, Browser, StartupInputs};
pub use url_state::{convert_state_to_url_params, parse_url_to_state};
