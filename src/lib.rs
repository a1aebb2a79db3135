#![warn(missing_docs)]

//! # record-reducer
//!
//! Reduces a collection export of catalogued coin image records to the
//! compact JSON file the memory game loads.
//!
//! Each input record carries a `back` image reference such as
//! `.../record_DE-MUS-062622_kenom_127409_media/back.jpg`. The reducer pulls
//! the embedded identifier out of that reference and keeps only `id`, `uri`,
//! `title`, `year` and `owner`, written with sorted keys and four-space
//! indentation.
//!
//! ## Quick Start
//!
//! ```no_run
//! use record_reducer::reduce;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = reduce("03-result-memory.json", "06-result-memory.json")?;
//! assert_eq!(report.records_read, report.records_written);
//! # Ok(())
//! # }
//! ```
//!
//! ### Skipping bad records
//!
//! ```no_run
//! use record_reducer::{Reducer, ReducerConfig, RecoveryMode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ReducerConfig::new("in.json", "out.json")
//!     .with_recovery_mode(RecoveryMode::Lenient)
//!     .with_skip_report("skipped.json");
//! let report = Reducer::new(config).run(|line| println!("{line}"))?;
//! for skipped in &report.skipped {
//!     eprintln!("record {} skipped: {}", skipped.index, skipped.reason);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`reducer`] — The load, project, write run
//! - [`identifier`] — Embedded identifier extraction
//! - [`record`] — Input and output record shapes
//! - [`json`] — JSON loading and deterministic rendering
//! - [`writer`] — Atomic output replacement
//! - [`recovery`] — Strict and lenient handling of bad records
//! - [`config`] — Run configuration
//! - [`error`] — Error types and result type

pub mod config;
pub mod error;
pub mod identifier;
pub mod json;
pub mod record;
pub mod recovery;
pub mod reducer;
pub mod writer;

pub use config::{ReducerConfig, DEFAULT_INPUT, DEFAULT_OUTPUT};
pub use error::{ErrorKind, ReduceError, Result};
pub use identifier::extract_id;
pub use json::OutputEncoding;
pub use record::{DateValue, InputRecord, OutputRecord};
pub use recovery::{RecoveryContext, RecoveryMode, SkippedRecord};
pub use reducer::{reduce, Reducer, ReductionReport};
