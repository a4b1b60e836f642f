//! Shared test utilities for the pubsubschema-gen test suite.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let input = setup_fixtures();
//! let files = resolve_inputs(input.path(), DEFAULT_GLOB).unwrap();
//! assert_eq!(files.len(), 3);
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub use crate::config::DEFAULT_GLOB;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/pubsub/` to a temp directory and return it.
///
/// The fixture set holds three `*.pubsub.proto` inputs (one with CRLF line
/// endings) plus a non-matching `README.txt`.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/pubsub");
    for entry in fs::read_dir(&fixtures).unwrap() {
        let entry = entry.unwrap();
        fs::copy(entry.path(), tmp.path().join(entry.file_name())).unwrap();
    }
    tmp
}

/// Write an input file into `dir` and return its path.
pub fn write_proto(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

// =========================================================================
// Output inspection
// =========================================================================

/// Read a file from the output directory. Panics with the listing on miss.
pub fn read_output(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap_or_else(|err| {
        let present = output_files(dir);
        panic!("cannot read {name}: {err}. Present: {present:?}")
    })
}

/// Sorted names of the direct entries of `dir`.
pub fn output_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

/// Name → bytes for every regular file directly inside `dir`.
pub fn snapshot_dir(dir: &Path) -> BTreeMap<String, Vec<u8>> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.is_file())
        .map(|p| {
            let name = p.file_name().unwrap().to_string_lossy().to_string();
            (name, fs::read(&p).unwrap())
        })
        .collect()
}
