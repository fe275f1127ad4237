//! metacheck CLI: check documentation fragments from the command line.
//!
//! - `metacheck check <FILE>` parses a JSON array of fragments, runs the
//!   full pipeline, and prints the report. Exits 1 if any error was found.
//! - `metacheck keys` lists the tag keys each category accepts.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use metacheck_core::{CheckConfig, Fragment, MetaCategory, check_fragments, recognized_keys};

/// File name looked up in the user config directory.
pub const CONFIG_FILE: &str = "metacheck.toml";

/// Check meta documentation fragments for dangling references and missing fields.
#[derive(Debug, Parser)]
#[command(name = "metacheck", version, about)]
pub struct Cli {
    /// Enable debug logging for the checker.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check a JSON file of fragments (`-` reads stdin).
    Check {
        input: PathBuf,

        /// Config file; defaults to metacheck.toml in the user config directory.
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Treat every configurable issue as an error.
        #[arg(long)]
        strict: bool,
    },
    /// List recognized tag keys.
    Keys {
        /// Only this category.
        #[arg(long)]
        category: Option<MetaCategory>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

/// Run a parsed command, writing output to `out`.
///
/// Returns `false` when a check found error-severity issues.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<bool> {
    match &cli.command {
        Command::Check {
            input,
            config,
            format,
            strict,
        } => {
            let config = if *strict {
                CheckConfig::strict()
            } else {
                resolve_config(config.as_deref())?
            };
            check(input, &config, *format, out)
        }
        Command::Keys { category } => {
            list_keys(*category, out)?;
            Ok(true)
        }
    }
}

/// Log filter from `RUST_LOG`; `verbose` turns on debug output for both the
/// checker and the CLI.
pub fn log_filter(verbose: bool) -> Result<EnvFilter> {
    let filter = EnvFilter::from_default_env();
    if !verbose {
        return Ok(filter);
    }
    Ok(filter
        .add_directive("metacheck_core=debug".parse()?)
        .add_directive("metacheck_cli=debug".parse()?))
}

/// Load the config from `explicit`, else the user config file if present,
/// else defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<CheckConfig> {
    if let Some(path) = explicit {
        return CheckConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()));
    }
    match default_config_path() {
        Some(path) if path.exists() => {
            tracing::debug!("using config {}", path.display());
            CheckConfig::load(&path).with_context(|| format!("loading config {}", path.display()))
        }
        _ => Ok(CheckConfig::default()),
    }
}

/// `$XDG_CONFIG_HOME/metacheck/metacheck.toml` or the platform equivalent.
pub fn default_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("metacheck").join(CONFIG_FILE))
}

fn check(input: &Path, config: &CheckConfig, format: Format, out: &mut impl Write) -> Result<bool> {
    let text = read_input(input)?;
    let fragments = Fragment::batch_from_json(&text)
        .with_context(|| format!("parsing fragments from {}", input.display()))?;
    tracing::info!("loaded {} fragments from {}", fragments.len(), input.display());

    let checked = check_fragments(&fragments, config);
    match format {
        Format::Text => writeln!(out, "{}", checked.report)?,
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, &checked.report)?;
            writeln!(out)?;
        }
    }

    Ok(!checked.report.has_errors())
}

fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading fragments from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))
}

fn list_keys(category: Option<MetaCategory>, out: &mut impl Write) -> Result<()> {
    let categories = match category {
        Some(c) => vec![c],
        None => MetaCategory::ALL.to_vec(),
    };
    for c in categories {
        writeln!(out, "{}: {}", c, recognized_keys(c).join(", "))?;
    }
    Ok(())
}
