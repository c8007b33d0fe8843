use crate::submission::{SubmitError, SubmitFile};
use clap::ValueEnum;
use condor_flavour::FlavourTable;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Action {
    /// move to the next longer flavour
    Increase,
    /// move to the next shorter flavour
    Decrease,
    /// print the current flavour
    Show,
    /// set the flavour given with --to
    Set,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Shown(String),
    Changed { from: String, to: String },
}

#[derive(Error, Debug)]
pub enum ChangeError {
    #[error(transparent)]
    Submit(#[from] SubmitError),
    #[error("sample \"{}\" has already the highest flavour ({flavour})", .sample.display())]
    AtHighest { sample: PathBuf, flavour: String },
    #[error("sample \"{}\" has already the lowest flavour ({flavour})", .sample.display())]
    AtLowest { sample: PathBuf, flavour: String },
    #[error("sample \"{}\" uses the unknown flavour {flavour}", .sample.display())]
    UnknownFlavour { sample: PathBuf, flavour: String },
    #[error("a target flavour is required to set the flavour")]
    MissingTarget,
}

/// Apply `action` to the condor.sub of a single sample folder.
///
/// Increase and decrease step through `table`; at either end of the table the
/// file is left untouched and an error is returned. `set` writes the target
/// even when it equals the current flavour.
pub fn change_flavour(
    sample: &Path,
    action: Action,
    to: Option<&str>,
    table: &FlavourTable,
) -> Result<Outcome, ChangeError> {
    debug!(sample = ?sample, action = ?action, "Changing flavour");

    let mut file = SubmitFile::open(sample)?;
    let current = file.flavour().to_string();

    let target = match action {
        Action::Show => return Ok(Outcome::Shown(current)),
        Action::Set => to.ok_or(ChangeError::MissingTarget)?.to_string(),
        Action::Increase | Action::Decrease => {
            if !table.contains(&current) {
                return Err(ChangeError::UnknownFlavour {
                    sample: sample.to_path_buf(),
                    flavour: current,
                });
            }

            let neighbour = if action == Action::Increase {
                table.next(&current)
            } else {
                table.previous(&current)
            };

            match neighbour {
                Some(flavour) => flavour.name.clone(),
                None if action == Action::Increase => {
                    return Err(ChangeError::AtHighest {
                        sample: sample.to_path_buf(),
                        flavour: current,
                    })
                }
                None => {
                    return Err(ChangeError::AtLowest {
                        sample: sample.to_path_buf(),
                        flavour: current,
                    })
                }
            }
        }
    };

    debug!(path = ?file.path(), flavour = %target, "Rewriting submit file");
    file.set_flavour(&target)?;
    file.save()?;

    Ok(Outcome::Changed {
        from: current,
        to: target,
    })
}

/// Apply `action` to every sample in order. A failing sample is logged and
/// the remaining ones are still processed; `true` only if all succeeded.
pub fn change_flavours(
    samples: &[PathBuf],
    action: Action,
    to: Option<&str>,
    table: &FlavourTable,
) -> bool {
    let mut ok = true;

    for sample in samples.iter() {
        match change_flavour(sample, action, to, table) {
            Ok(Outcome::Shown(flavour)) => println!("{}: {flavour}", sample.display()),
            Ok(Outcome::Changed { from, to: changed }) => {
                info!("{}: {from} -> {changed}", sample.display())
            }
            Err(e) => {
                error!("{e}");
                ok = false;
            }
        }
    }

    ok
}
