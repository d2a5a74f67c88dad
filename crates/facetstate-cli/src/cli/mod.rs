//! # CLI Behavior
//!
//! This is **one possible client** for facetstate, not the library itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and
//! output formatting.
//!
//! ## Commands
//!
//! Pure transforms (no stores touched):
//!
//! - `facetstate params [--mode sets]` lists the parameters of a mode.
//! - `facetstate decode '<query>' [--mode sets]` prints the decoded state as
//!   JSON. The mode defaults to the query's `contentType`, else `cards`.
//! - `facetstate encode --mode cards '<json>'` prints the query for a state.
//!
//! Against the on-disk stores (see `facetstate::init`):
//!
//! - `facetstate resolve [--url '<query>']` prints the startup state.
//! - `facetstate set <name> '<json-value>' [--url '<query>']` changes one
//!   parameter and prints the new query. A `null` value clears it.
//! - `facetstate reset [--url '<query>']` resets the active mode.
//!
//! ## Module Structure
//!
//! - `commands`: per-command handlers that call the library and print
//! - `render`: output formatting
//! - `setup`: argument parsing via clap

mod commands;
mod render;
pub mod setup;

pub use commands::run;
