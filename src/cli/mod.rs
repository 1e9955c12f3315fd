//! The Seqcall Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::path::Path;
use std::process;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::argument::{
    decode_arguments, escape, slice, split, split_nonempty, DecodedArgs, OperationKind,
};
use crate::cli::args::{Command, SeqcallArgs};
use crate::cli::output::Printer;
use crate::containers::{Instance, Kind};
use crate::errors::{print_error, SeqError};
use crate::runtime::Config;
use crate::script::{runner, ScriptRunner};

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = SeqcallArgs::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            print_error(e);
            process::exit(1);
        }
    };
    init_logging(args.log_level.as_deref(), &config);

    let mut printer = Printer::new(args.json || config.json, config.color && !args.no_color);

    // Dispatch to the appropriate subcommand handler.
    let result = match args.command {
        Command::Run { file, atomic } => handle_run(&file, atomic, &config, &mut printer),
        Command::Test { path } => handle_test(&path, &config, &mut printer),
        Command::Split {
            input,
            delimiters,
            skip_empty,
        } => {
            let delimiters: Vec<char> = delimiters.chars().collect();
            let tokens = if skip_empty {
                split_nonempty(&input, &delimiters)
            } else {
                split(&input, &delimiters)
            };
            printer.tokens(&tokens);
            Ok(true)
        }
        Command::Slice {
            values,
            spec,
            delimiter,
        } => handle_slice(&values, &spec, delimiter, &mut printer),
        Command::Call {
            kind,
            member,
            arg,
            init,
        } => handle_call(kind, &member, &arg, init.as_deref(), &config, &mut printer),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            print_error(e);
            process::exit(1);
        }
    }
}

fn load_config(args: &SeqcallArgs) -> Result<Config, SeqError> {
    match &args.config {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

/// `--log-level` wins over `RUST_LOG`, which wins over the config file.
fn init_logging(flag: Option<&str>, config: &Config) {
    let filter = match flag {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_run(
    path: &Path,
    atomic: bool,
    config: &Config,
    printer: &mut Printer,
) -> Result<bool, SeqError> {
    let source = std::fs::read_to_string(path)?;
    let mut runner = ScriptRunner::new(config).atomic(atomic);
    let outcomes = runner.run(&source, &path.display().to_string())?;
    printer.outcomes(&outcomes);
    Ok(true)
}

fn handle_test(path: &Path, config: &Config, printer: &mut Printer) -> Result<bool, SeqError> {
    let summary = runner::run_tests(path, config)?;
    printer.summary(&summary);
    Ok(!summary.has_failures())
}

fn handle_slice(
    values: &str,
    spec: &str,
    delimiter: char,
    printer: &mut Printer,
) -> Result<bool, SeqError> {
    let source = split(values, &[delimiter]);
    let decoded = decode_arguments(spec, OperationKind::Slice, source.len(), delimiter)?;
    if let DecodedArgs::SliceSpec(tokens) = &decoded {
        debug!(?tokens, length = source.len(), "slicing");
        printer.tokens(&slice(&source, tokens, source.len()));
    }
    Ok(true)
}

fn handle_call(
    kind: Kind,
    member: &str,
    arg: &str,
    init: Option<&str>,
    config: &Config,
    printer: &mut Printer,
) -> Result<bool, SeqError> {
    let mut instance = Instance::new(kind, config.delimiter);
    if let Some(init) = init {
        seed(&mut instance, init, config.delimiter)?;
    }
    let value = instance.call(member, arg)?;
    printer.value(&value);
    Ok(true)
}

/// Fills a fresh instance from a delimited value list. Map entries are
/// written `key=value`.
fn seed(instance: &mut Instance, init: &str, delimiter: char) -> Result<(), SeqError> {
    match instance.kind() {
        Kind::List => instance.call("Append", init).map(drop),
        Kind::Set => instance.call("Add", init).map(drop),
        Kind::Stack | Kind::Queue => instance.call("Push", init).map(drop),
        Kind::Map => {
            for entry in split_nonempty(init, &[delimiter]) {
                let (key, value) = entry.split_once('=').unwrap_or((entry.as_str(), ""));
                let pair = format!("{},{}", escape(key, &[',']), escape(value, &[',']));
                instance.call("Add", &pair)?;
            }
            Ok(())
        }
    }
}
