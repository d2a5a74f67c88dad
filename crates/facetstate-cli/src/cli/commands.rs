//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! Store-backed commands build a browser context from `--url` and the stores
//! located by `facetstate::init::initialize`, so they behave like a page load
//! at that URL.

use super::render;
use super::setup::{Cli, Commands};
use anyhow::{anyhow, Context, Result};
use facetstate::codec::{decode_json, QueryParams};
use facetstate::init::{initialize, FacetContext};
use facetstate::model::Mode;
use facetstate::schema::{get_parameter, parameters_for_mode, Schema};
use facetstate::store::snapshot::decode_snapshot;
use facetstate::store::FsStore;
use facetstate::url_state::mode_from_params;
use facetstate::{convert_state_to_url_params, parse_url_to_state, resolve, SearchSession};

pub fn run(cli: Cli) -> Result<()> {
    let output = match cli.command {
        Commands::Params { mode } => render::params(parameters_for_mode(mode)),
        Commands::Decode { query, mode } => handle_decode(&query, mode)?,
        Commands::Encode { mode, json } => handle_encode(mode, &json)?,
        Commands::Resolve { url } => {
            let ctx = initialize(cli.data);
            render::json(&resolve(Some(&ctx.browser(url)), &ctx.keys))?
        }
        Commands::Set { name, value, url } => {
            let ctx = initialize(cli.data);
            handle_set(&ctx, &url, &name, &value)?
        }
        Commands::Reset { url } => {
            let ctx = initialize(cli.data);
            let mut session = start_session(&ctx, url);
            format!("{}\n", session.reset())
        }
    };
    print!("{}", output);
    Ok(())
}

fn handle_decode(query: &str, mode: Option<Mode>) -> Result<String> {
    let mode = mode
        .or_else(|| mode_from_params(&QueryParams::parse(query)))
        .unwrap_or_default();
    Ok(render::json(&parse_url_to_state(query, mode))?)
}

fn handle_encode(mode: Mode, json: &str) -> Result<String> {
    let state = decode_snapshot(&Schema::builtin(), mode, json).context("invalid state JSON")?;
    Ok(format!("{}\n", convert_state_to_url_params(&state, mode)))
}

fn handle_set(ctx: &FacetContext, url: &str, name: &str, raw_value: &str) -> Result<String> {
    let config = get_parameter(name).ok_or_else(|| anyhow!("Unknown parameter: {name}"))?;
    let json: serde_json::Value = serde_json::from_str(raw_value)
        .with_context(|| format!("value for {name} is not JSON"))?;
    let value = decode_json(&config.kind, &json)?;

    let mut session = start_session(ctx, url);
    let new_url = match value {
        Some(value) => session.set(name, value)?,
        None => session.clear(name)?,
    };
    Ok(format!("{new_url}\n"))
}

fn start_session(ctx: &FacetContext, url: impl Into<String>) -> SearchSession<FsStore> {
    SearchSession::start(Some(ctx.browser(url)), ctx.keys.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_uses_content_type_when_mode_missing() {
        let out = handle_decode("?contentType=sets&code=mh3&name=bolt", None).unwrap();
        assert!(out.contains("\"code\": \"mh3\""));
        assert!(!out.contains("bolt"));
    }

    #[test]
    fn encode_validates_against_schema() {
        let out = handle_encode(Mode::Cards, r#"{"pageSize": 60, "code": "mh3"}"#).unwrap();
        assert_eq!(out, "contentType=cards&pageSize=60\n");
        assert!(handle_encode(Mode::Cards, "[]").is_err());
    }
}
