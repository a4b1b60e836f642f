//! CLI output formatting.
//!
//! Progress lines are printed to stdout as each manifest is written, so a run
//! that fails partway can be diagnosed by comparing the echoed lines against
//! the files actually on disk:
//!
//! ```text
//! Wrote billing-events-v2-invoicepaid -> deploy/schemas/billing-events-v2-invoicepaid.schema.yaml
//! Wrote coreapp-test-v1-testevent -> deploy/schemas/coreapp-test-v1-testevent.schema.yaml
//! Removed 1 stale schema
//! Wrote 2 schemas and deploy/schemas/kustomization.yaml
//! ```
//!
//! Each `format_*` function is pure and returns the lines; the `print_*`
//! wrappers write them to stdout.

use crate::types::{GenerateReport, WrittenSchema};

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Progress line for a single written manifest.
pub fn format_written(schema: &WrittenSchema) -> String {
    format!("Wrote {} -> {}", schema.name, schema.path.display())
}

/// Closing lines after the index has been written.
pub fn format_summary(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();
    if !report.stale.is_empty() {
        lines.push(format!(
            "Removed {}",
            plural(report.stale.len(), "stale schema")
        ));
    }
    lines.push(format!(
        "Wrote {} and {}",
        plural(report.resources.len(), "schema"),
        report.index_path.display()
    ));
    lines
}

pub fn print_written(schema: &WrittenSchema) {
    println!("{}", format_written(schema));
}

pub fn print_summary(report: &GenerateReport) {
    for line in format_summary(report) {
        println!("{line}");
    }
}
