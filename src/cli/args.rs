//! Defines the command-line arguments and subcommands for the Seqcall CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::containers::Kind;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "seqcall",
    version,
    about = "Drive list, set, map, stack and queue containers through string member calls."
)]
pub struct SeqcallArgs {
    /// YAML configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `seqcall=trace`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Print results as JSON lines.
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Execute a call script and print every call's result.
    Run {
        /// The path to the script file to run.
        #[arg(required = true)]
        file: PathBuf,
        /// Stop at the first failing call and roll back.
        #[arg(long)]
        atomic: bool,
    },
    /// Discover and run all scripts in a directory, checking their expectations.
    Test {
        /// The directory (or single file) containing `.seq` scripts.
        #[arg(default_value = "tests/scripts")]
        path: PathBuf,
    },
    /// Show how an argument string is tokenized.
    Split {
        input: String,
        /// Delimiter characters; each character is one delimiter.
        #[arg(long, short, default_value = ",")]
        delimiters: String,
        /// Drop empty tokens from the result.
        #[arg(long)]
        skip_empty: bool,
    },
    /// Slice a delimited list of values with a `start,end,stride` argument.
    Slice {
        values: String,
        /// Slice fields; omit for a full copy.
        #[arg(default_value = "")]
        spec: String,
        #[arg(long, default_value_t = ',')]
        delimiter: char,
    },
    /// Call one member on a fresh container.
    Call {
        kind: Kind,
        member: String,
        #[arg(default_value = "")]
        arg: String,
        /// Values appended (or added, pushed) before the call.
        #[arg(long)]
        init: Option<String>,
    },
}
