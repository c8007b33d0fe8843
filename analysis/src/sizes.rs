use std::{
    fmt, fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SizeError {
    #[error("Job \"{0}\" is not of the form <year>/<sample>/<chunk>")]
    MalformedJob(String),
    #[error("Unable to find sample for job \"{0}\"")]
    NotFound(String),
    #[error("Failed to stat {}: {source}", .path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    Data,
    MC,
}

impl SampleKind {
    /// recorded data carries the data taking year in its name, e.g. `SingleMuon_2017B`
    pub fn of(name: &str) -> Self {
        if name.contains("201") {
            Self::Data
        } else {
            Self::MC
        }
    }
}

impl fmt::Display for SampleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data => write!(f, "Data"),
            Self::MC => write!(f, "MC"),
        }
    }
}

/// Paths that may hold the input of `job`, most specific first
pub fn candidates(
    job: &str,
    sample_root: &Path,
    extension: &str,
) -> Result<[PathBuf; 2], SizeError> {
    let segments: Vec<&str> = job.split('/').collect();
    let (year, name) = match segments.as_slice() {
        [year, _, name, ..] => (*year, *name),
        _ => return Err(SizeError::MalformedJob(job.to_string())),
    };

    let kind = SampleKind::of(name);
    let file_name = format!("{name}.{extension}");
    let by_kind = sample_root
        .join(kind.to_string())
        .join(year)
        .join(&file_name);
    let by_year = sample_root.join(year).join(&file_name);

    debug!(job, year, name, kind = %kind, path = ?by_kind, "Looking up input");
    Ok([by_kind, by_year])
}

/// Size in bytes of the input file processed by `job`
pub fn resolve_input_size(
    job: &str,
    sample_root: &Path,
    extension: &str,
) -> Result<u64, SizeError> {
    let path = candidates(job, sample_root, extension)?
        .into_iter()
        .find(|path| path.exists())
        .ok_or_else(|| SizeError::NotFound(job.to_string()))?;

    fs::metadata(&path)
        .map(|metadata| metadata.len())
        .map_err(|source| SizeError::Metadata { path, source })
}
