//! CLI argument definitions for the codelist normalizer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "aspec-normalize",
    version,
    about = "A-SPEC codelist normalizer - Rename headers and standardize modification dates",
    long_about = "Normalize an A-SPEC codelist workbook.\n\n\
                  Renames known headers to canonical names on every sheet and rewrites\n\
                  the Date_Modified column as YYYY-MM-DD. Blank dates receive the\n\
                  sentinel date; values that cannot be read as dates are left blank."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize a codelist workbook and write the result.
    Normalize(NormalizeArgs),

    /// Show the effective rename table and date policy.
    Rules(RulesArgs),
}

#[derive(Parser)]
pub struct NormalizeArgs {
    /// Path to the input workbook (.xlsx, .xlsm, .xls or .ods).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output workbook path (default: <INPUT stem>-normalized.xlsx beside the input).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// JSON file overriding the rename table, date column or date policy.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Normalize and report without writing the output workbook.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Exit with status 1 when any date value could not be resolved.
    ///
    /// Unresolved values are written as blank cells either way.
    #[arg(long = "fail-on-unresolved")]
    pub fail_on_unresolved: bool,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// JSON file overriding the built-in rules.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the effective rules as JSON (usable as a config file).
    #[arg(long = "json")]
    pub json: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
