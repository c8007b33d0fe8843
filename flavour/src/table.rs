use itertools::Itertools;
use once_cell::sync::Lazy;
use std::{collections::BTreeSet, time::Duration};
use thiserror::Error;

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const WEEK: u64 = 7 * DAY;

/// The flavours known to the CERN HTCondor pool, shortest first
pub static DEFAULT_FLAVOURS: Lazy<FlavourTable> = Lazy::new(|| FlavourTable {
    flavours: [
        ("espresso", 20 * MINUTE),
        ("microcentury", HOUR),
        ("longlunch", 2 * HOUR),
        ("workday", 8 * HOUR),
        ("tomorrow", DAY),
        ("testmatch", 3 * DAY),
        ("nextweek", WEEK),
    ]
    .into_iter()
    .map(|(name, seconds)| Flavour::new(name, Duration::from_secs(seconds)))
    .collect(),
});

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("A flavour table needs at least one entry")]
    Empty,
    #[error("Flavour {0} is defined more than once")]
    DuplicateName(String),
    #[error("Flavour {later} must have a longer ceiling than {earlier}")]
    NotAscending { earlier: String, later: String },
}

/// A named job flavour and the maximum wall clock time a job of this flavour may run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flavour {
    pub name: String,
    pub ceiling: Duration,
}

impl Flavour {
    pub fn new(name: impl Into<String>, ceiling: Duration) -> Self {
        Self {
            name: name.into(),
            ceiling,
        }
    }
}

/// Ordered, immutable list of flavours with strictly ascending ceilings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlavourTable {
    flavours: Vec<Flavour>,
}

impl FlavourTable {
    pub fn new(flavours: Vec<Flavour>) -> Result<Self, TableError> {
        if flavours.is_empty() {
            return Err(TableError::Empty);
        }

        let mut seen = BTreeSet::new();
        for flavour in flavours.iter() {
            if !seen.insert(flavour.name.as_str()) {
                return Err(TableError::DuplicateName(flavour.name.clone()));
            }
        }

        if let Some((earlier, later)) = flavours
            .iter()
            .tuple_windows()
            .find(|(earlier, later)| earlier.ceiling >= later.ceiling)
        {
            return Err(TableError::NotAscending {
                earlier: earlier.name.clone(),
                later: later.name.clone(),
            });
        }

        Ok(Self { flavours })
    }

    /// never zero, a table cannot be constructed without entries
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.flavours.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Flavour> {
        self.flavours.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.flavours.iter().map(|flavour| flavour.name.as_str())
    }

    pub fn last(&self) -> &Flavour {
        &self.flavours[self.flavours.len() - 1]
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.flavours.iter().position(|flavour| flavour.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// next longer flavour, `None` for the last one or an unknown name
    pub fn next(&self, name: &str) -> Option<&Flavour> {
        self.position(name)
            .and_then(|index| self.flavours.get(index + 1))
    }

    /// next shorter flavour, `None` for the first one or an unknown name
    pub fn previous(&self, name: &str) -> Option<&Flavour> {
        self.position(name)
            .and_then(|index| index.checked_sub(1))
            .map(|index| &self.flavours[index])
    }

    /// Index of the shortest flavour whose ceiling is strictly above `seconds`.
    /// A runtime equal to a ceiling belongs to the next flavour.
    pub fn classify(&self, seconds: u64) -> Option<usize> {
        let runtime = Duration::from_secs(seconds);
        self.flavours
            .iter()
            .position(|flavour| runtime < flavour.ceiling)
    }
}

impl<'a> IntoIterator for &'a FlavourTable {
    type Item = &'a Flavour;
    type IntoIter = std::slice::Iter<'a, Flavour>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
