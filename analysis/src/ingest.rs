use std::{
    collections::BTreeMap,
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{debug, info, trace};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to open {}: {1}", .0.display())]
    Open(PathBuf, #[source] io::Error),
    #[error("Failed to read elapsed times")]
    Read(#[from] io::Error),
    #[error("Line {line}: '{token}' is not a number of seconds")]
    Parse { line: usize, token: String },
}

/// Open `path` for reading, `None` or `-` select stdin
pub fn open(path: Option<&Path>) -> Result<Box<dyn BufRead>, IngestError> {
    match path {
        None => Ok(Box::new(io::stdin().lock())),
        Some(path) if path.as_os_str() == "-" => Ok(Box::new(io::stdin().lock())),
        Some(path) => {
            debug!(path = ?path, "Reading elapsed times");
            File::open(path)
                .map(|file| Box::new(BufReader::new(file)) as Box<dyn BufRead>)
                .map_err(|e| IngestError::Open(path.to_path_buf(), e))
        }
    }
}

/// Job identifier of a log path: `./2018/TTJets/chunk_3/condor.log` -> `2018/TTJets/chunk_3`
pub fn job_id(log: &str) -> String {
    log.trim_end_matches(':')
        .trim_start_matches(['.', '/'])
        .split('/')
        .take(3)
        .collect::<Vec<_>>()
        .join("/")
}

/// first token and elapsed seconds (last token) of every non blank line
fn observations<R: BufRead>(
    reader: R,
) -> impl Iterator<Item = Result<(String, u64), IngestError>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(number, line)| {
            let line = match line {
                Ok(line) => line,
                Err(e) => return Some(Err(IngestError::Read(e))),
            };
            let mut tokens = line.split_whitespace();
            let first = tokens.next()?;
            let last = tokens.last().unwrap_or(first);

            trace!(line = number + 1, first, last, "Observation");
            Some(
                last.parse::<u64>()
                    .map(|seconds| (first.to_string(), seconds))
                    .map_err(|_| IngestError::Parse {
                        line: number + 1,
                        token: last.to_string(),
                    }),
            )
        })
}

/// Elapsed seconds in input order
pub fn parse_times<R: BufRead>(reader: R) -> Result<Vec<u64>, IngestError> {
    let times = observations(reader)
        .map(|observation| observation.map(|(_, seconds)| seconds))
        .collect::<Result<Vec<_>, _>>()?;

    info!("read {} times", times.len());
    Ok(times)
}

/// Elapsed seconds per job, a later line for the same job replaces the earlier one
pub fn parse_jobs<R: BufRead>(reader: R) -> Result<BTreeMap<String, u64>, IngestError> {
    let mut jobs = BTreeMap::new();

    for observation in observations(reader) {
        let (log, seconds) = observation?;
        if let Some(previous) = jobs.insert(job_id(&log), seconds) {
            debug!(log = %log, previous, seconds, "Job seen more than once");
        }
    }

    info!("read {} times", jobs.len());
    Ok(jobs)
}
