mod classify;
mod format;
mod ingest;
mod sizes;
mod stats;


use classify::{classify_jobs, classify_times, Classification, JobInfo};
use clap::Parser;
use condor_flavour::{load_table, logging, ConfigErrors, FlavourTable, LogLevel};
use ingest::IngestError;
use itertools::Itertools;
use sizes::{resolve_input_size, SizeError};
use stats::Summary;
use std::{collections::BTreeMap, path::PathBuf, process::ExitCode};
use thiserror::Error;
use tracing::{debug, error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "hist-condor-log")]
#[command(version)]
#[command(about = "Summarise elapsed times of HTCondor jobs per job flavour")]
struct Args {
    /// File with elapsed times of Condor jobs. If absent or -, read from stdin
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Folder holding the input samples of the jobs
    #[arg(long, value_name = "PATH", default_value = "samples")]
    sampledir: PathBuf,

    /// File extension of the input samples
    #[arg(long, value_name = "EXT", default_value = "root")]
    extension: String,

    /// Only read the elapsed times, without job names and input sizes
    #[arg(long)]
    times_only: bool,

    /// Either a mnemonic like DEBUG, INFO or WARNING or an integer (lower means more verbose)
    #[arg(long = "log", value_name = "LEVEL", default_value = "WARNING")]
    log: LogLevel,

    /// YAML file replacing the built in flavour table
    #[arg(long, value_name = "FILE")]
    flavours: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum AnalysisError {
    #[error(transparent)]
    Config(#[from] ConfigErrors),
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    Size(#[from] SizeError),
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.log);
    debug!("args: {args:?}");

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), AnalysisError> {
    let table = load_table(args.flavours.as_deref())?;
    let input = ingest::open(args.file.as_deref())?;

    if args.times_only {
        let times = ingest::parse_times(input)?;
        if let Some(summary) = Summary::from_times(&times) {
            report(summary, classify_times(&times, &table), &table);
        } else {
            info!("no times, ending");
        }

        return Ok(());
    }

    let times = ingest::parse_jobs(input)?;
    let jobs = times
        .into_iter()
        .map(|(job, time)| {
            let size = resolve_input_size(&job, &args.sampledir, &args.extension)?;
            Ok((job, JobInfo { time, size }))
        })
        .collect::<Result<BTreeMap<_, _>, SizeError>>()?;
    info!("Got the size of {} jobs", jobs.len());

    let times = jobs.values().map(|job| job.time).collect_vec();
    if let Some(summary) = Summary::from_times(&times) {
        report(summary, classify_jobs(&jobs, &table), &table);
    } else {
        info!("no times, ending");
    }

    Ok(())
}

fn report(summary: Summary, classification: Classification, table: &FlavourTable) {
    print!("{summary}");
    print!("{classification}");

    if classification.unclassified > 0 {
        warn!(
            "{} of {} jobs ran longer than {} allows",
            classification.unclassified,
            classification.total,
            table.last().name
        );
    }
    debug!(classified = classification.classified(), "Report done");
}
