//! The record reduction run.
//!
//! A run loads the whole input array, projects every record onto an
//! [`OutputRecord`], renders the result and only then touches the output
//! file. A failure at any step before the write leaves the output untouched.
//!
//! # Examples
//!
//! ```no_run
//! use record_reducer::{Reducer, ReducerConfig};
//!
//! let reducer = Reducer::new(ReducerConfig::default());
//! let report = reducer.run(|line| println!("{line}"))?;
//! assert_eq!(report.records_read, report.records_written);
//! # Ok::<(), record_reducer::ReduceError>(())
//! ```

use std::path::Path;

use tracing::{debug, info};

use crate::config::ReducerConfig;
use crate::error::Result;
use crate::json::{load_records, to_pretty_json};
use crate::record::{reduce_value, OutputRecord};
use crate::recovery::{RecoveryContext, SkippedRecord};
use crate::writer::write_atomic;

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReductionReport {
    /// Number of records in the input array.
    pub records_read: usize,
    /// Number of records written to the output.
    pub records_written: usize,
    /// Records left out in lenient mode, in input order.
    pub skipped: Vec<SkippedRecord>,
}

/// Runs the load, project, write pipeline for one configuration.
#[derive(Debug, Clone, Default)]
pub struct Reducer {
    config: ReducerConfig,
}

impl Reducer {
    /// Create a reducer for `config`.
    #[must_use]
    pub fn new(config: ReducerConfig) -> Self {
        Reducer { config }
    }

    /// The configuration this reducer runs with.
    #[must_use]
    pub fn config(&self) -> &ReducerConfig {
        &self.config
    }

    /// Run once, passing the two human-readable status lines to `status`.
    ///
    /// The first line is emitted after the input has been loaded, the second
    /// right before the output is written.
    ///
    /// # Errors
    ///
    /// Returns an input error if the input cannot be loaded, an extraction
    /// error for the first bad record in strict mode, and an output error if
    /// rendering or writing fails.
    pub fn run<F: FnMut(&str)>(&self, mut status: F) -> Result<ReductionReport> {
        let config = &self.config;

        let values = load_records(&config.input_path)?;
        info!(path = %config.input_path.display(), records = values.len(), "loaded input");
        status(&format!(
            "Input file {} contains {} records.",
            config.input_path.display(),
            values.len()
        ));

        let mut context = RecoveryContext::new(config.recovery_mode);
        let mut records: Vec<OutputRecord> = Vec::with_capacity(values.len());
        for (index, value) in values.iter().enumerate() {
            match reduce_value(value, index) {
                Ok(record) => records.push(record),
                Err(e) => context.recover(e, index, value)?,
            }
        }
        debug!(reduced = records.len(), skipped = context.skipped.len(), "projected records");

        let bytes = to_pretty_json(&records, config.encoding)?;

        // report before output: a failed report write leaves the output untouched
        if let Some(report_path) = &config.skip_report_path {
            if context.has_skipped() {
                let report = to_pretty_json(&context.skipped, config.encoding)?;
                write_atomic(report_path, &report)?;
                info!(path = %report_path.display(), skipped = context.skipped.len(), "wrote skip report");
            }
        }

        status(&format!(
            "Writing {} records to {}.",
            records.len(),
            config.output_path.display()
        ));
        write_atomic(&config.output_path, &bytes)?;
        info!(path = %config.output_path.display(), records = records.len(), bytes = bytes.len(), "wrote output");

        Ok(ReductionReport {
            records_read: values.len(),
            records_written: records.len(),
            skipped: context.skipped,
        })
    }
}

/// Reduce the records in `input_path` into `output_path` with default
/// settings, printing the status lines to standard output.
///
/// # Errors
///
/// See [`Reducer::run`].
pub fn reduce(input_path: impl AsRef<Path>, output_path: impl AsRef<Path>) -> Result<ReductionReport> {
    let config = ReducerConfig::new(input_path.as_ref(), output_path.as_ref());
    Reducer::new(config).run(|line| println!("{line}"))
}
