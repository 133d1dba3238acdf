//! usl - Universal Source Locator parser
//!
//! Usage:
//!   usl github.com/user/repo              # all fields as k='v' pairs
//!   usl github.com/user/repo source ref   # selected fields only
//!   usl ./repo.git --local --bash SRC     # Bash associative array
//!   usl github.com/user/repo --json       # JSON object

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use usl_core::{Catalog, Projection, project_with_overlay};

#[derive(Parser, Debug)]
#[command(name = "usl", version)]
#[command(about = "Parse a source locator and print its fields", long_about = None)]
struct Cli {
    /// Locator to parse (URL, provider shorthand, SCP form or local path)
    locator: String,

    /// Fields to print, in this order (default: all, sorted)
    fields: Vec<String>,

    /// Allow local paths (/, ./, ../) while parsing
    #[arg(short, long)]
    local: bool,

    /// Print the result as a Bash associative array with the given name
    #[arg(short, long, value_name = "NAME")]
    bash: Option<String>,

    /// Print the result as a JSON object
    #[arg(long, conflicts_with = "bash")]
    json: bool,

    /// Add a templated field, as 'name="template"' (repeatable)
    #[arg(long = "var", value_name = "ASSIGNMENT")]
    vars: Vec<String>,

    /// Provider configuration file (default: <config dir>/usl/usl.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("usl: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String> {
    let catalog = Catalog::load(cli.config.as_deref()).context("failed to load configuration")?;
    let parser = usl_core::Parser::new(&catalog);

    let locator = if cli.local {
        parser.parse_with_local_paths(&cli.locator)?
    } else {
        parser.parse(&cli.locator)?
    };
    debug!(source = locator.source(), "parsed locator");

    let overlay = cli
        .vars
        .iter()
        .map(|expr| parse_assignment(expr))
        .collect::<Result<Vec<_>>>()?;

    let projection = project_with_overlay(&locator, overlay)?;

    if cli.json {
        render_json(&projection, &cli.fields)
    } else if let Some(name) = &cli.bash {
        Ok(render_bash(name, &projection, &cli.fields))
    } else {
        Ok(render_pairs(&projection, &cli.fields))
    }
}

/// Parse `name=value`. The value may be wrapped in matching `"` or `'`.
fn parse_assignment(expr: &str) -> Result<(String, String)> {
    let Some((name, value)) = expr.split_once('=') else {
        bail!("invalid assignment {expr:?}: expected name=value");
    };

    let name = name.trim();
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        bail!("invalid assignment {expr:?}: bad variable name {name:?}");
    }

    Ok((name.to_string(), unquote(value.trim()).to_string()))
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Single-quote a value for the shell.
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

fn render_pairs(projection: &Projection, fields: &[String]) -> String {
    projection
        .select(fields)
        .into_iter()
        .map(|(key, value)| format!("{key}={}", shell_quote(value)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_bash(name: &str, projection: &Projection, fields: &[String]) -> String {
    let mut parts = vec![format!("{name}=(")];
    parts.extend(
        projection
            .select(fields)
            .into_iter()
            .map(|(key, value)| format!("[{key}]={}", shell_quote(value))),
    );
    parts.push(")".to_string());
    parts.join(" ")
}

fn render_json(projection: &Projection, fields: &[String]) -> Result<String> {
    let object: serde_json::Map<String, serde_json::Value> = projection
        .select(fields)
        .into_iter()
        .map(|(key, value)| (key.to_string(), serde_json::Value::from(value)))
        .collect();

    serde_json::to_string_pretty(&object).context("failed to serialize fields")
}
