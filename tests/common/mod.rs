//! Common test helpers shared across the integration suite.

use std::path::{Path, PathBuf};

use record_reducer::{Reducer, ReducerConfig, ReductionReport, Result};
use tempfile::TempDir;

/// A scratch directory holding one input file and a path for the output.
pub struct Workspace {
    pub dir: TempDir,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Workspace {
    /// Creates a workspace whose input file contains `json`.
    pub fn with_input(json: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let input = dir.path().join("03-result-memory.json");
        let output = dir.path().join("06-result-memory.json");
        std::fs::write(&input, json).expect("Failed to write input");
        Workspace { dir, input, output }
    }

    /// Creates a workspace whose input is a copy of `tests/data/<name>`.
    pub fn with_fixture(name: &str) -> Self {
        let json = std::fs::read_to_string(fixture_path(name)).expect("Could not open fixture");
        Workspace::with_input(&json)
    }

    /// Configuration reading this workspace's input and writing its output.
    #[allow(dead_code)]
    pub fn config(&self) -> ReducerConfig {
        ReducerConfig::new(&self.input, &self.output)
    }

    /// Path of another file inside the workspace.
    #[allow(dead_code)]
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Reads the output file as text.
    pub fn output_text(&self) -> String {
        std::fs::read_to_string(&self.output).expect("Output not written")
    }

    /// Reads the output file as parsed JSON.
    #[allow(dead_code)]
    pub fn output_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.output_text()).expect("Output is not JSON")
    }
}

/// Path of a file under `tests/data`.
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Runs `config`, returning the result and the status lines it emitted.
#[allow(dead_code)]
pub fn run_collecting(config: ReducerConfig) -> (Result<ReductionReport>, Vec<String>) {
    let mut lines = Vec::new();
    let result = Reducer::new(config).run(|line| lines.push(line.to_string()));
    (result, lines)
}
