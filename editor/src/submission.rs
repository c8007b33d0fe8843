use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::bytes::Regex;
use std::{
    borrow::Cow,
    fs,
    io::{self, Write},
    ops::Range,
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, trace};

/// name of the submit description every sample folder carries
pub const SUBMIT_FILE_NAME: &str = "condor.sub";

// the captured group is the flavour between the quotes, any bytes but a quote or newline
static FLAVOUR_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"JobFlavour\s*=\s*"((?-u:[^"\n])*)""#).unwrap());

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Submit file {} not found", .0.display())]
    NotFound(PathBuf),
    #[error("No JobFlavour defined in {}", .0.display())]
    MissingField(PathBuf),
    #[error("JobFlavour is defined on several lines of {} ({})", .path.display(), .lines.iter().join(", "))]
    Ambiguous { path: PathBuf, lines: Vec<usize> },
    #[error("'{0}' cannot be stored as a JobFlavour value")]
    InvalidValue(String),
    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// In memory copy of a `condor.sub` file with the location of its JobFlavour value.
/// The content is kept as raw bytes, the file does not need to be UTF-8.
#[derive(Debug, Clone)]
pub struct SubmitFile {
    path: PathBuf,
    content: Vec<u8>,
    value: Range<usize>,
}

impl SubmitFile {
    /// path of the submit file inside a sample folder
    pub fn path_in(sample: &Path) -> PathBuf {
        sample.join(SUBMIT_FILE_NAME)
    }

    pub fn open(sample: &Path) -> Result<Self, SubmitError> {
        let path = Self::path_in(sample);

        if !path.is_file() {
            return Err(SubmitError::NotFound(path));
        }

        let content = fs::read(&path).map_err(|source| SubmitError::Io {
            path: path.clone(),
            source,
        })?;

        Self::parse(path, content)
    }

    /// Locate the single JobFlavour assignment in `content`.
    /// Several matching lines are refused instead of picking one of them.
    pub fn parse(path: PathBuf, content: impl Into<Vec<u8>>) -> Result<Self, SubmitError> {
        let content: Vec<u8> = content.into();
        let mut found = Vec::new();
        let mut offset = 0;

        for (number, line) in content.split_inclusive(|&byte| byte == b'\n').enumerate() {
            if let Some(value) = FLAVOUR_FIELD.captures(line).and_then(|caps| caps.get(1)) {
                trace!(line = number + 1, "Found JobFlavour");
                found.push((number + 1, offset + value.start()..offset + value.end()));
            }
            offset += line.len();
        }

        match found.len() {
            0 => Err(SubmitError::MissingField(path)),
            1 => {
                let (_, value) = found.remove(0);
                Ok(Self {
                    path,
                    content,
                    value,
                })
            }
            _ => Err(SubmitError::Ambiguous {
                path,
                lines: found.into_iter().map(|(line, _)| line).collect(),
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// bytes that are not UTF-8 are shown as U+FFFD
    pub fn flavour(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.content[self.value.clone()])
    }

    /// Replace the quoted value, every other byte stays untouched
    pub fn set_flavour(&mut self, flavour: &str) -> Result<(), SubmitError> {
        if flavour.contains(['"', '\n']) {
            return Err(SubmitError::InvalidValue(flavour.to_string()));
        }

        self.content.splice(self.value.clone(), flavour.bytes());
        self.value = self.value.start..self.value.start + flavour.len();

        Ok(())
    }

    /// Write the content next to the original and rename it over the submit file
    pub fn save(&self) -> Result<(), SubmitError> {
        let io_error = |source| SubmitError::Io {
            path: self.path.clone(),
            source,
        };

        let directory = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let permissions = fs::metadata(&self.path).map_err(io_error)?.permissions();
        let mut staged = NamedTempFile::new_in(directory).map_err(io_error)?;
        staged
            .write_all(&self.content)
            .map_err(io_error)?;
        staged
            .as_file()
            .set_permissions(permissions)
            .map_err(io_error)?;

        debug!(staged = ?staged.path(), path = ?self.path, "Replacing submit file");
        staged
            .persist(&self.path)
            .map_err(|error| io_error(error.error))?;

        Ok(())
    }
}
