//! Shared HTCondor job flavour definitions used by both the flavour editor
//! and the runtime classifier.

pub mod config;
pub mod logging;
pub mod table;

pub use config::{load_table, ConfigErrors};
pub use logging::LogLevel;
pub use table::{Flavour, FlavourTable, TableError, DEFAULT_FLAVOURS};

#[cfg(test)]
mod table_test;
