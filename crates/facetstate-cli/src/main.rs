//! # facetstate CLI
//!
//! A thin terminal client over the `facetstate` library: it decodes and
//! encodes search URLs, and runs startup resolution and session changes
//! against the on-disk stores. This file only installs logging, invokes
//! `cli::run()` and handles process termination.
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (src/cli/)                                       │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - context wiring + dispatch (commands.rs)                  │
//! │  - output formatting (render.rs)                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  facetstate (crates/facetstate)                             │
//! │  - schema, codecs, URL adapter, stores, resolver, session   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Logs go to stderr so stdout stays machine-readable. `RUST_LOG` controls
//! the filter (default `warn`); `-v` raises it to `debug`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn main() {
    let cli = cli::setup::parse_cli();
    init_tracing(cli.verbose);

    if let Err(e) = cli::run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
