//! CLI argument definitions for the `hub` inspector.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use hub_store::Mutation;

#[derive(Parser)]
#[command(
    name = "hub",
    version,
    about = "Inspect the Hub root state container",
    long_about = "Build the Hub root state container, apply root mutations \
                  and print the resulting state.\n\n\
                  Root mutations: currentProjectId=VALUE, previousUrl=VALUE."
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
    /// Print the initial state tree (root fields and module state).
    State(StateArgs),

    /// Apply root mutations in order and print the changes and resulting state tree.
    Commit(CommitArgs),

    /// List registered feature modules and their operations.
    Modules,
}

#[derive(Parser)]
pub struct StateArgs {
    /// Settings file (default: platform config directory).
    #[arg(long = "settings", value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Parser)]
pub struct CommitArgs {
    #[command(flatten)]
    pub state: StateArgs,

    /// Mutations to apply, as NAME=VALUE.
    #[arg(value_name = "NAME=VALUE", required = true)]
    pub mutations: Vec<Mutation>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
