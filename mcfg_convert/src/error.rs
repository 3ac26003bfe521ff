//! Conversion error types.

use core::fmt;

use mcfg_common::config::ConfigError;
use mcfg_common::document::DocumentError;
use mcfg_common::profile::ProfileError;
use serde::Serialize;
use thiserror::Error;

/// Input row of the slot allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Row {
    One,
    Two,
    Three,
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One => write!(f, "row 1"),
            Self::Two => write!(f, "row 2"),
            Self::Three => write!(f, "row 3"),
        }
    }
}

/// Error surfaced by a conversion run.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Loading or saving the document failed.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Unknown profile identity.
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// Configuration file could not be used.
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    /// No free slot left in an input row for `device`.
    #[error("{row} exhausted while assigning input device {device}")]
    RowExhausted { row: Row, device: i32 },

    /// `convert` was called before a profile was selected.
    #[error("no hardware profile selected")]
    NoProfileSelected,

    /// Report could not be encoded.
    #[error("report encoding: {0}")]
    Report(#[from] serde_json::Error),
}
