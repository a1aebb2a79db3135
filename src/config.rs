//! Run configuration.
//!
//! [`ReducerConfig::default`] reproduces the conventional pipeline step:
//! read `03-result-memory.json`, write `06-result-memory.json`, abort on the
//! first bad record.

use std::path::PathBuf;

use crate::json::OutputEncoding;
use crate::recovery::RecoveryMode;

/// Conventional name of the collection export read by the reducer.
pub const DEFAULT_INPUT: &str = "03-result-memory.json";

/// Conventional name of the reduced file consumed by the memory game.
pub const DEFAULT_OUTPUT: &str = "06-result-memory.json";

/// Settings for one reducer run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReducerConfig {
    /// File holding the input JSON array.
    pub input_path: PathBuf,
    /// File the reduced array is written to.
    pub output_path: PathBuf,
    /// What to do with records that cannot be reduced.
    pub recovery_mode: RecoveryMode,
    /// Character encoding of the written output.
    pub encoding: OutputEncoding,
    /// Where to write skipped records in lenient mode, if anywhere.
    pub skip_report_path: Option<PathBuf>,
}

impl Default for ReducerConfig {
    fn default() -> Self {
        ReducerConfig {
            input_path: PathBuf::from(DEFAULT_INPUT),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            recovery_mode: RecoveryMode::Strict,
            encoding: OutputEncoding::Utf8,
            skip_report_path: None,
        }
    }
}

impl ReducerConfig {
    /// Configuration reading `input_path` and writing `output_path`, with
    /// defaults for everything else.
    #[must_use]
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        ReducerConfig {
            input_path: input_path.into(),
            output_path: output_path.into(),
            ..ReducerConfig::default()
        }
    }

    /// Set the recovery mode.
    #[must_use]
    pub fn with_recovery_mode(mut self, mode: RecoveryMode) -> Self {
        self.recovery_mode = mode;
        self
    }

    /// Set the output encoding.
    #[must_use]
    pub fn with_encoding(mut self, encoding: OutputEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Write skipped records to `path`.
    #[must_use]
    pub fn with_skip_report(mut self, path: impl Into<PathBuf>) -> Self {
        self.skip_report_path = Some(path.into());
        self
    }
}
