//! Filename convention for pubsub schema inputs and generated manifests.
//!
//! Inputs are named `<raw-identifier>.pubsub.proto`, where the raw identifier
//! is usually the fully-qualified message name emitted by the upstream
//! protoc plugin. The identifier becomes the Kubernetes resource name of the
//! generated `PubSubSchema`:
//!
//! - `coreapp.test.v1.TestEvent.pubsub.proto` → `coreapp-test-v1-testevent`
//! - `billing_events.v2.Invoice.pubsub.proto` → `billing-events-v2-invoice`
//!
//! No further validation happens here (leading/trailing hyphens, the 63
//! character limit). Well-formed filenames are the caller's responsibility.

use std::path::Path;

/// Suffix every input file carries; stripped before deriving a name.
pub const INPUT_SUFFIX: &str = ".pubsub.proto";

/// Suffix of every generated manifest. Files ending in this in the output
/// directory are owned by the generator and removed before each run.
pub const SCHEMA_SUFFIX: &str = ".schema.yaml";

/// Name of the index manifest written last.
pub const INDEX_FILE: &str = "kustomization.yaml";

/// Derive the resource name for an input file.
///
/// Strips directory components and [`INPUT_SUFFIX`], lowercases, and turns
/// every `.` and `_` into `-`. A base name without the suffix is used whole.
pub fn derive_schema_name(path: &Path) -> String {
    let base = path
        .file_name()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    let raw = base.strip_suffix(INPUT_SUFFIX).unwrap_or(&*base);
    normalize_identifier(raw)
}

/// Lowercase and hyphenate a raw schema identifier.
pub fn normalize_identifier(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .map(|c| match c {
            '.' | '_' => '-',
            other => other,
        })
        .collect()
}

/// File name of the manifest generated for `name`.
pub fn schema_file_name(name: &str) -> String {
    format!("{name}{SCHEMA_SUFFIX}")
}

/// Whether a directory entry name looks like a generated manifest.
pub fn is_generated_schema(file_name: &str) -> bool {
    file_name.ends_with(SCHEMA_SUFFIX)
}
