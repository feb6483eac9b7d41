use crate::core::io::pdb::PdbError;
use std::path::PathBuf;
use thiserror::Error;

use super::config::ConfigError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to read snapshot '{path}': {source}", path = path.display())]
    Snapshot {
        path: PathBuf,
        #[source]
        source: PdbError,
    },

    #[error("atom count mismatch in {frame}: expected {expected} atoms, found {found}")]
    ShapeMismatch {
        frame: String,
        expected: usize,
        found: usize,
    },

    #[error("empty input: {0}")]
    EmptyInput(String),

    #[error("failed to read reference structure '{path}': {source}", path = path.display())]
    Reference {
        path: PathBuf,
        #[source]
        source: PdbError,
    },

    #[error("configuration error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
