//! Error types for record reduction.
//!
//! This module provides the [`ReduceError`] type for every fallible step of a
//! run and the [`Result`] convenience type. Variants fall into three classes,
//! reported by [`ReduceError::kind`]: problems with the input file, problems
//! deriving or projecting a single record, and problems writing the output.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for all record reduction operations.
#[derive(Error, Debug)]
pub enum ReduceError {
    /// The input file could not be read.
    #[error("Cannot read input {}: {source}", .path.display())]
    Input {
        /// Path of the input file.
        path: PathBuf,
        /// Underlying I/O error (missing file, permissions, invalid UTF-8).
        #[source]
        source: std::io::Error,
    },

    /// The input file is not valid JSON.
    #[error("Invalid JSON in {}: {source}", .path.display())]
    InvalidJson {
        /// Path of the input file.
        path: PathBuf,
        /// Parser error with line and column.
        #[source]
        source: serde_json::Error,
    },

    /// The input file parsed, but its top level is not an array.
    #[error("Expected a JSON array in {}, found {found}", .path.display())]
    NotAnArray {
        /// Path of the input file.
        path: PathBuf,
        /// JSON type found instead.
        found: &'static str,
    },

    /// The embedded identifier could not be derived from a record.
    #[error("Cannot extract identifier{}: {reason}", at_index(.index))]
    Extraction {
        /// Position of the record in the input array, when known.
        index: Option<usize>,
        /// What was wrong with the `back` value.
        reason: String,
    },

    /// A record is missing a required field or has the wrong shape.
    #[error("Invalid record at index {index}: {reason}")]
    InvalidRecord {
        /// Position of the record in the input array.
        index: usize,
        /// What was wrong with the record.
        reason: String,
    },

    /// The output file could not be written.
    #[error("Cannot write output {}: {source}", .path.display())]
    Output {
        /// Path of the output file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Rendering records to JSON failed.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

fn at_index(index: &Option<usize>) -> String {
    index.map(|i| format!(" at index {i}")).unwrap_or_default()
}

/// Broad class of a [`ReduceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input file is missing, unreadable, or not a JSON array.
    Input,
    /// A single record could not be turned into an output record.
    Extraction,
    /// The output could not be rendered or written.
    Output,
}

impl ReduceError {
    /// Returns the class this error belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReduceError::Input { .. }
            | ReduceError::InvalidJson { .. }
            | ReduceError::NotAnArray { .. } => ErrorKind::Input,
            ReduceError::Extraction { .. } | ReduceError::InvalidRecord { .. } => {
                ErrorKind::Extraction
            },
            ReduceError::Output { .. } | ReduceError::Serialize(_) => ErrorKind::Output,
        }
    }

    /// Whether this error concerns a single record and may be skipped in
    /// lenient mode.
    #[must_use]
    pub fn is_record_level(&self) -> bool {
        self.kind() == ErrorKind::Extraction
    }

    /// Attaches the record position to an extraction error that has none.
    #[must_use]
    pub fn at(self, position: usize) -> Self {
        match self {
            ReduceError::Extraction {
                index: None,
                reason,
            } => ReduceError::Extraction {
                index: Some(position),
                reason,
            },
            other => other,
        }
    }
}

/// Convenience type alias for [`std::result::Result`] with [`ReduceError`].
pub type Result<T> = std::result::Result<T, ReduceError>;
