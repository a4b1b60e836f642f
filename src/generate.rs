//! Manifest generation and output directory management.
//!
//! A run always regenerates from scratch:
//!
//! ```text
//! resolve inputs → fail if none → check duplicate names
//!   → delete every *.schema.yaml in the output directory
//!   → for each input (sorted): read, derive name, render, write, report
//!   → write kustomization.yaml listing what was written
//! ```
//!
//! The index is written last. Its presence and freshness is the signal that a
//! run completed; a run that fails midway leaves the manifests written so far
//! on disk and the old (or no) index, and nothing is rolled back.
//!
//! Only files ending in `.schema.yaml` directly inside the output directory
//! are owned by the generator. Anything else there is left alone.
//!
//! The output directory is assumed to be used by one run at a time.

use crate::config::{DuplicatePolicy, Settings};
use crate::manifest;
use crate::naming;
use crate::scan::{self, ScanError};
use crate::types::{GenerateReport, SchemaSource, WrittenSchema};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, trace, warn};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("no pubsub proto files found in {} matching {pattern:?}", .dir.display())]
    NoInputs { dir: PathBuf, pattern: String },
    #[error(
        "duplicate schema name {name:?} derived from {} and {}",
        .first.display(),
        .second.display()
    )]
    DuplicateName {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },
    #[error("{action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn io_error(action: &'static str, path: &Path) -> impl FnOnce(io::Error) -> GenerateError {
    let path = path.to_path_buf();
    move |source| GenerateError::Io {
        action,
        path,
        source,
    }
}

/// Run the generator with resolved settings.
///
/// `on_written` is called after each manifest lands on disk, in write order.
pub fn generate(
    settings: &Settings,
    on_written: impl FnMut(&WrittenSchema),
) -> Result<GenerateReport, GenerateError> {
    let sources = scan::resolve_sources(&settings.pubsub_dir, &settings.glob)?;
    if sources.is_empty() {
        return Err(GenerateError::NoInputs {
            dir: settings.pubsub_dir.clone(),
            pattern: settings.glob.clone(),
        });
    }
    generate_sources(
        &sources,
        &settings.output_dir,
        settings.on_duplicate,
        on_written,
    )
}

/// Write manifests for already-resolved `sources` into `output_dir`.
///
/// `sources` must be non-empty and in the order they should be written.
fn generate_sources(
    sources: &[SchemaSource],
    output_dir: &Path,
    policy: DuplicatePolicy,
    mut on_written: impl FnMut(&WrittenSchema),
) -> Result<GenerateReport, GenerateError> {
    check_duplicates(sources, policy)?;

    let cleared = remove_generated_schemas(output_dir)?;

    let mut written = Vec::with_capacity(sources.len());
    for source in sources {
        let contents =
            fs::read_to_string(&source.path).map_err(io_error("read", &source.path))?;
        let file_name = naming::schema_file_name(&source.name);
        let path = output_dir.join(&file_name);
        write_file(&path, &manifest::schema_manifest(&source.name, &contents))?;

        let schema = WrittenSchema {
            name: source.name.clone(),
            source: source.path.clone(),
            path,
            file_name,
        };
        on_written(&schema);
        written.push(schema);
    }

    let mut resources: Vec<String> = written.iter().map(|w| w.file_name.clone()).collect();
    resources.sort();
    resources.dedup();

    let index_path = output_dir.join(naming::INDEX_FILE);
    write_file(&index_path, &manifest::kustomization(&resources))?;
    debug!(path = %index_path.display(), resources = resources.len(), "wrote index");

    // Cleared manifests that this run wrote again were refreshed, not removed.
    let stale = cleared
        .into_iter()
        .filter(|path| {
            path.file_name()
                .is_none_or(|name| !resources.iter().any(|r| name == r.as_str()))
        })
        .collect();

    Ok(GenerateReport {
        written,
        stale,
        resources,
        index_path,
    })
}

/// Detect inputs that derive the same resource name.
///
/// Under [`DuplicatePolicy::Overwrite`] each collision is logged and the run
/// continues; the later input in `sources` order wins.
pub fn check_duplicates(
    sources: &[SchemaSource],
    policy: DuplicatePolicy,
) -> Result<(), GenerateError> {
    let mut seen: BTreeMap<&str, &Path> = BTreeMap::new();
    for source in sources {
        let Some(first) = seen.insert(&source.name, &source.path) else {
            continue;
        };
        match policy {
            DuplicatePolicy::Error => {
                return Err(GenerateError::DuplicateName {
                    name: source.name.clone(),
                    first: first.to_path_buf(),
                    second: source.path.clone(),
                });
            }
            DuplicatePolicy::Overwrite => warn!(
                name = %source.name,
                first = %first.display(),
                second = %source.path.display(),
                "duplicate schema name, later input overwrites earlier"
            ),
        }
    }
    Ok(())
}

/// Delete every generated manifest directly inside `output_dir`.
///
/// A missing directory is not an error. Subdirectories are never touched,
/// even if their name ends in `.schema.yaml`. Returns the removed paths.
pub fn remove_generated_schemas(output_dir: &Path) -> Result<Vec<PathBuf>, GenerateError> {
    let entries = match fs::read_dir(output_dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(io_error("list", output_dir)(err)),
    };

    let mut removed = Vec::new();
    for entry in entries {
        let entry = entry.map_err(io_error("list", output_dir))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(io_error("stat", &path))?;
        if file_type.is_dir() {
            continue;
        }
        if naming::is_generated_schema(&entry.file_name().to_string_lossy()) {
            fs::remove_file(&path).map_err(io_error("remove", &path))?;
            debug!(path = %path.display(), "removed stale schema");
            removed.push(path);
        }
    }
    removed.sort();
    Ok(removed)
}

/// Write `contents` to `path` with LF line endings.
///
/// Parent directories are created as needed. The file is written to a
/// temporary sibling and renamed over `path`, so readers see either the old
/// or the new contents.
pub fn write_file(path: &Path, contents: &str) -> Result<(), GenerateError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(io_error("create directory", &dir))?;

    let contents = contents.replace("\r\n", "\n");
    let mut tmp = NamedTempFile::new_in(&dir).map_err(io_error("create temp file in", &dir))?;
    tmp.write_all(contents.as_bytes())
        .map_err(io_error("write", path))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .map_err(io_error("set permissions on", path))?;
    }
    tmp.persist(path)
        .map_err(|err| io_error("write", path)(err.error))?;
    trace!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}
