mod action;
mod submission;

#[cfg(test)]
mod action_test;

use action::{change_flavours, Action};
use clap::{error::ErrorKind, CommandFactory, Parser};
use condor_flavour::{load_table, logging, LogLevel};
use itertools::Itertools;
use std::{path::PathBuf, process::ExitCode};
use tracing::{debug, error};

#[derive(Parser, Debug)]
#[command(name = "change-job-flavour")]
#[command(version)]
#[command(about = "Show or change the JobFlavour of HTCondor sample folders")]
struct Args {
    #[arg(value_enum)]
    action: Action,

    /// Sample folders containing a condor.sub file to modify
    #[arg(value_name = "SAMPLE_DIR", required = true)]
    samples: Vec<PathBuf>,

    /// Flavour to use with "set"
    #[arg(long, value_name = "FLAVOUR", required_if_eq("action", "set"))]
    to: Option<String>,

    /// Either a mnemonic like DEBUG, INFO or WARNING or an integer (lower means more verbose)
    #[arg(long = "log", value_name = "LEVEL", default_value = "WARNING")]
    log: LogLevel,

    /// YAML file replacing the built in flavour table
    #[arg(long, value_name = "FILE")]
    flavours: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.log);
    debug!("args: {args:?}");

    let table = match load_table(args.flavours.as_deref()) {
        Ok(table) => table,
        Err(e) => {
            error!("Failed to load the flavour table: {e}");
            return ExitCode::FAILURE;
        }
    };

    // reject unknown targets before touching any sample
    if let Some(to) = args.to.as_deref() {
        if !table.contains(to) {
            Args::command()
                .error(
                    ErrorKind::InvalidValue,
                    format!(
                        "invalid value '{to}' for '--to <FLAVOUR>' [possible values: {}]",
                        table.names().join(", ")
                    ),
                )
                .exit();
        }
    }

    let ok = change_flavours(&args.samples, args.action, args.to.as_deref(), &table);

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
