//! Input resolution.
//!
//! Finds the `*.pubsub.proto` files to turn into manifests. The directory is
//! taken literally and only the pattern is interpreted as a glob, so a
//! checkout under `/src/[wip]/` still resolves.
//!
//! Matching is best-effort: a candidate that cannot be read or stat'ed, or
//! that is not a regular file (directories, dangling symlinks, sockets), is
//! skipped with a debug log rather than failing the run. The result is sorted
//! so every later stage sees inputs in the same order on every machine.
//!
//! An empty result is not an error here; the generator decides that.

use crate::naming;
use crate::types::SchemaSource;
use glob::{MatchOptions, Pattern};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("invalid glob pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Regular files in `dir` matching `pattern`, sorted lexicographically.
pub fn resolve_inputs(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, ScanError> {
    let pattern_error = |source: glob::PatternError| ScanError::Pattern {
        pattern: pattern.to_string(),
        source,
    };
    Pattern::new(pattern).map_err(pattern_error)?;

    let escaped_dir = Pattern::escape(&dir.to_string_lossy());
    let full = Path::new(&escaped_dir).join(pattern);
    let matches = glob::glob_with(&full.to_string_lossy(), MATCH_OPTIONS).map_err(pattern_error)?;

    let mut files = Vec::new();
    for entry in matches {
        let path = match entry {
            Ok(path) => path,
            Err(err) => {
                debug!(path = %err.path().display(), error = %err.error(), "skipping unreadable match");
                continue;
            }
        };
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => files.push(path),
            Ok(_) => debug!(path = %path.display(), "skipping non-regular match"),
            Err(err) => debug!(path = %path.display(), error = %err, "skipping match that cannot be stat'ed"),
        }
    }

    files.sort();
    debug!(dir = %dir.display(), pattern, count = files.len(), "resolved inputs");
    Ok(files)
}

/// Resolve inputs and derive each one's resource name.
pub fn resolve_sources(dir: &Path, pattern: &str) -> Result<Vec<SchemaSource>, ScanError> {
    let files = resolve_inputs(dir, pattern)?;
    Ok(files
        .into_iter()
        .map(|path| SchemaSource {
            name: naming::derive_schema_name(&path),
            path,
        })
        .collect())
}
