//! CLI argument definitions for the tobacco-exposure analysis.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use ets_report::TableName;

#[derive(Parser)]
#[command(
    name = "ets",
    version,
    about = "Perinatal tobacco-exposure analysis - recode, derive and summarize dyad data",
    long_about = "Recode a parent-child dyad file, derive composite indicators, reshape\n\
                  the repeated measures and print the named result tables."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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

    /// Allow row-level values (participant identifiers) in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full pipeline over one dyad file and print the result tables.
    Run(RunArgs),

    /// List the result tables with their titles.
    Tables,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Path to the dyad data file (CSV, one row per parent-child dyad).
    #[arg(value_name = "DATA_FILE")]
    pub data_file: PathBuf,

    /// Output format for the result tables.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,

    /// Print only the named table (repeatable; default is every table).
    #[arg(long = "table", value_name = "NAME", value_parser = parse_table_name)]
    pub tables: Vec<TableName>,

    /// Biracial rule for the child composite race.
    ///
    /// `consistent` treats AIAN + White like the parent rule; `as-recorded`
    /// never yields Biracial for that pair.
    #[arg(long = "child-race-rule", value_enum)]
    pub child_race_rule: Option<ChildRaceRuleArg>,

    /// JSON file with pipeline options (child race rule, SWAN correction ids).
    ///
    /// `--child-race-rule` overrides the rule read from this file.
    #[arg(long = "options", value_name = "PATH")]
    pub options: Option<PathBuf>,
}

fn parse_table_name(value: &str) -> Result<TableName, String> {
    value.parse::<TableName>().map_err(|error| error.to_string())
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Csv,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ChildRaceRuleArg {
    Consistent,
    AsRecorded,
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
