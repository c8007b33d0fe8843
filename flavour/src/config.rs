use crate::table::{Flavour, FlavourTable, TableError, DEFAULT_FLAVOURS};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ConfigErrors {
    #[error("Flavour file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Failed to read flavour file")]
    Read(#[from] std::io::Error),
    #[error("Flavour file is not valid YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Flavour table is invalid: {0}")]
    Invalid(#[from] TableError),
}

/// One entry of a flavour file, e.g.
///
/// ```yaml
/// - name: espresso
///   ceiling: 1200
/// ```
#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct FlavourConfig {
    pub name: String,
    // maximum wall clock time in seconds
    pub ceiling: u64,
}

impl From<FlavourConfig> for Flavour {
    fn from(config: FlavourConfig) -> Self {
        Flavour::new(config.name, Duration::from_secs(config.ceiling))
    }
}

/// parse and validate a flavour table from its YAML representation
pub fn parse_table(source: &str) -> Result<FlavourTable, ConfigErrors> {
    let entries: Vec<FlavourConfig> = serde_yaml::from_str(source)?;

    Ok(FlavourTable::new(
        entries.into_iter().map(Flavour::from).collect(),
    )?)
}

/// Load the flavour table from `path`, or fall back to the built in flavours
pub fn load_table(path: Option<&Path>) -> Result<FlavourTable, ConfigErrors> {
    match path {
        None => {
            debug!("Using built in flavour table");
            Ok(DEFAULT_FLAVOURS.clone())
        }
        Some(path) => {
            if !path.is_file() {
                return Err(ConfigErrors::FileNotFound(path.to_path_buf()));
            }

            let table = parse_table(&fs::read_to_string(path)?)?;
            info!(path = ?path, flavours = table.len(), "Loaded flavour table");

            Ok(table)
        }
    }
}
