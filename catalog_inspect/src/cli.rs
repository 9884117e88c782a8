//! Command-line interface definitions for `catalog-inspect`.

use camino::Utf8PathBuf;
use clap::{Args as ClapArgs, Parser, Subcommand};

/// Parsed CLI arguments for `catalog-inspect`.
#[derive(Debug, Parser)]
#[command(name = "catalog-inspect")]
#[command(about = "Inspect and resolve entries in a locale catalogue directory")]
#[command(version)]
pub struct Args {
    /// Directory of `<tag>.json` or `<tag>.toml` catalogue files.
    #[arg(long, value_name = "path")]
    pub dir: Option<Utf8PathBuf>,
    /// Fallback locale; overrides the settings file and environment.
    #[arg(long = "default", value_name = "tag")]
    pub default_locale: Option<String>,
    /// Localisation settings file; its `active_locale` applies unless
    /// `--locale` is given.
    #[arg(long, value_name = "path")]
    pub config: Option<Utf8PathBuf>,
    /// Log resolution details to standard error.
    #[arg(long, short)]
    pub verbose: bool,
    /// Inspection to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Inspections offered by `catalog-inspect`.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render the entry at a dotted key path.
    Resolve(ResolveArgs),
    /// List every entry path of one locale.
    Keys(KeysArgs),
    /// Report which entries each locale translates.
    Coverage(CoverageArgs),
}

impl Command {
    /// Locale requested with `--locale`, if the command takes one.
    #[must_use]
    pub fn locale(&self) -> Option<&str> {
        match self {
            Self::Resolve(resolve) => resolve.locale.as_deref(),
            Self::Keys(keys) => keys.locale.as_deref(),
            Self::Coverage(_) => None,
        }
    }
}

/// Arguments for `catalog-inspect resolve`.
#[derive(Debug, ClapArgs)]
pub struct ResolveArgs {
    /// Dotted key path such as `common.loggedAs`.
    #[arg(value_name = "path")]
    pub path: String,
    /// Locale to resolve in; the configured active locale, then the default
    /// locale, when omitted.
    #[arg(long, value_name = "tag")]
    pub locale: Option<String>,
    /// Template parameter (repeat for several).
    #[arg(long = "param", value_name = "name=value", value_parser = parse_param)]
    pub params: Vec<(String, String)>,
    /// Position inside a list or indexed map.
    #[arg(long, value_name = "N")]
    pub index: Option<usize>,
}

/// Arguments for `catalog-inspect keys`.
#[derive(Debug, ClapArgs)]
pub struct KeysArgs {
    /// Locale to list; the configured active locale, then the default
    /// locale, when omitted.
    #[arg(long, value_name = "tag")]
    pub locale: Option<String>,
}

/// Arguments for `catalog-inspect coverage`.
#[derive(Debug, Clone, Copy, ClapArgs)]
pub struct CoverageArgs {
    /// Emit the report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Splits a `name=value` pair; the value may itself contain `=`.
fn parse_param(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))?;
    if name.is_empty() {
        return Err(format!("parameter name is empty in '{raw}'"));
    }
    Ok((name.to_owned(), value.to_owned()))
}
