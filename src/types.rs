//! Value types shared between input resolution, generation and output.

use std::path::PathBuf;

/// An input file paired with the resource name derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaSource {
    /// Path of the `*.pubsub.proto` file as matched by the glob.
    pub path: PathBuf,
    /// Derived resource name, e.g. `coreapp-test-v1-testevent`.
    pub name: String,
}

/// A manifest written during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenSchema {
    pub name: String,
    pub source: PathBuf,
    /// Full output path, `<output-dir>/<name>.schema.yaml`.
    pub path: PathBuf,
    /// Base name recorded in the index.
    pub file_name: String,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    /// Manifests in the order they were written.
    pub written: Vec<WrittenSchema>,
    /// Deleted manifests that no current input wrote again.
    pub stale: Vec<PathBuf>,
    /// Sorted, de-duplicated base names listed in the index.
    pub resources: Vec<String>,
    pub index_path: PathBuf,
}
