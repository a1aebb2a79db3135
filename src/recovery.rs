//! Recovery strategies for records that cannot be reduced.
//!
//! By default the first bad record aborts the whole run and nothing is
//! written. In [`RecoveryMode::Lenient`] bad records are set aside in a
//! [`RecoveryContext`] and the run continues with the rest.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::error::{ReduceError, Result};

/// Strategy for handling records that cannot be reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecoveryMode {
    /// Strict mode: the first bad record is a fatal error (default)
    #[default]
    Strict,
    /// Lenient mode: skip bad records and report them
    Lenient,
}

/// A record left out of the output in lenient mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRecord {
    /// Position in the input array.
    pub index: usize,
    /// Why the record was skipped.
    pub reason: String,
    /// The record as it appeared in the input.
    pub record: Value,
}

/// Recovery context for one run
#[derive(Debug, Default)]
pub struct RecoveryContext {
    /// Current recovery mode
    pub mode: RecoveryMode,
    /// Records skipped so far, in input order
    pub skipped: Vec<SkippedRecord>,
}

impl RecoveryContext {
    /// Create a new recovery context with the given mode
    #[must_use]
    pub fn new(mode: RecoveryMode) -> Self {
        RecoveryContext {
            mode,
            skipped: Vec::new(),
        }
    }

    /// Try to recover from a failure to reduce the record at `index`.
    ///
    /// # Errors
    ///
    /// Returns `error` unchanged in strict mode, or when it is not a
    /// record-level error. Otherwise records the skip and returns `Ok(())`.
    pub fn recover(&mut self, error: ReduceError, index: usize, record: &Value) -> Result<()> {
        if self.mode == RecoveryMode::Strict || !error.is_record_level() {
            return Err(error);
        }

        warn!(index, %error, "skipping record");
        self.skipped.push(SkippedRecord {
            index,
            reason: error.to_string(),
            record: record.clone(),
        });
        Ok(())
    }

    /// Whether any record has been skipped.
    #[must_use]
    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }
}
