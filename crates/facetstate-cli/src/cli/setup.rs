use clap::{Parser, Subcommand};
use facetstate::model::Mode;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "facetstate",
    bin_name = "facetstate",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Inspect and resolve faceted catalog search state", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Root directory for session and preference stores
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the parameters of a mode
    Params {
        /// Catalog mode (cards or sets)
        #[arg(long, default_value = "cards")]
        mode: Mode,
    },

    /// Decode a URL query into search state JSON
    Decode {
        /// Query string, `?`-prefixed query, or full URL
        query: String,

        /// Catalog mode; defaults to the query's contentType, else cards
        #[arg(long)]
        mode: Option<Mode>,
    },

    /// Encode search state JSON into a URL query
    Encode {
        /// Catalog mode (cards or sets)
        #[arg(long)]
        mode: Mode,

        /// JSON object of parameter name to value
        json: String,
    },

    /// Resolve the startup state against the stores
    Resolve {
        /// URL the page was opened with
        #[arg(long, default_value = "")]
        url: String,
    },

    /// Set one parameter of the active mode
    Set {
        /// Parameter name (e.g. pageSize, rarities)
        name: String,

        /// JSON value; `null` clears the parameter
        value: String,

        /// URL the page was opened with
        #[arg(long, default_value = "")]
        url: String,
    },

    /// Reset the active mode to its preferences
    Reset {
        /// URL the page was opened with
        #[arg(long, default_value = "")]
        url: String,
    },
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
