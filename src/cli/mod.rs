//! CLI argument parsing for templatify.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Templatify: validated, precompiled templates from documented definitions.
///
/// Every command first loads a definitions file and decorates each function
/// in it, so a broken definition fails before anything is rendered.
#[derive(Parser, Debug)]
#[command(name = "templatify")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for templatify.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate every definition in a file.
    ///
    /// Prints the signature of each function on success.
    Check(CheckArgs),

    /// Show one function's signature and normalized template.
    Show(ShowArgs),

    /// Render one function.
    ///
    /// Values are parsed as JSON when possible and passed as plain strings
    /// otherwise, so `42` is a number and `John` is a string.
    Render(RenderArgs),
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Definitions file (YAML).
    pub file: PathBuf,
}

/// Arguments for the `show` command.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Definitions file (YAML).
    pub file: PathBuf,

    /// Function name.
    pub function: String,
}

/// Arguments for the `render` command.
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Definitions file (YAML).
    pub file: PathBuf,

    /// Function name.
    pub function: String,

    /// Positional argument values, in parameter order.
    pub values: Vec<String>,

    /// Keyword argument as NAME=VALUE (repeatable).
    #[arg(long = "arg", value_name = "NAME=VALUE", value_parser = parse_keyword)]
    pub keywords: Vec<(String, String)>,
}

fn parse_keyword(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{}'", s)),
    }
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
