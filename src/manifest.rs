//! Manifest text synthesis.
//!
//! Both documents are produced as literal text rather than through a YAML
//! serializer: the header lines are byte-exact, and the proto source must be
//! embedded verbatim as a literal block scalar (`definition: |`), which
//! serializers do not reliably choose.
//!
//! ## Schema manifest
//!
//! ```text
//! apiVersion: pubsub.cnrm.cloud.google.com/v1beta1
//! kind: PubSubSchema
//! metadata:
//!   name: coreapp-test-v1-testevent
//! spec:
//!   type: PROTOCOL_BUFFER
//!   definition: |
//!     message TestEvent {}
//!
//! ```
//!
//! The definition is the source text with CRLF turned into LF, trailing
//! newlines collapsed to exactly one, and every line (including the empty one
//! after the final newline) prefixed with [`LITERAL_BLOCK_INDENT`]. No escaping
//! is done. A source line that is entirely whitespace can still confuse a
//! downstream parser's block-scope detection; that case is not guarded here.
//!
//! ## Index manifest
//!
//! ```text
//! apiVersion: kustomize.config.k8s.io/v1beta1
//! kind: Kustomization
//!
//! resources:
//!   - a.schema.yaml
//!   - b.schema.yaml
//! ```

/// Indent applied to each line of the embedded definition.
pub const LITERAL_BLOCK_INDENT: &str = "    ";

const SCHEMA_HEADER: &str = "apiVersion: pubsub.cnrm.cloud.google.com/v1beta1\nkind: PubSubSchema\n";
const INDEX_HEADER: &str = "apiVersion: kustomize.config.k8s.io/v1beta1\nkind: Kustomization\n";

/// Convert CRLF to LF and guarantee exactly one trailing newline.
pub fn normalize_newlines(text: &str) -> String {
    let lf = text.replace("\r\n", "\n");
    let mut out = lf.trim_end_matches('\n').to_string();
    out.push('\n');
    out
}

/// Prefix every line of `text` with `indent`.
///
/// Lines are split on `\n` only, so a trailing newline yields a final line
/// consisting of just the indent.
pub fn indent_literal_block(text: &str, indent: &str) -> String {
    text.split('\n')
        .map(|line| format!("{indent}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Exact inverse of [`indent_literal_block`].
///
/// Lines that do not carry the indent are returned unchanged.
pub fn strip_literal_block(block: &str, indent: &str) -> String {
    block
        .split('\n')
        .map(|line| line.strip_prefix(indent).unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a `PubSubSchema` manifest for `name` embedding `definition`.
///
/// `definition` is normalized here; callers may pass raw file contents.
pub fn schema_manifest(name: &str, definition: &str) -> String {
    let body = indent_literal_block(&normalize_newlines(definition), LITERAL_BLOCK_INDENT);
    let mut out = String::with_capacity(SCHEMA_HEADER.len() + body.len() + name.len() + 96);
    out.push_str(SCHEMA_HEADER);
    out.push_str("metadata:\n");
    out.push_str("  name: ");
    out.push_str(name);
    out.push('\n');
    out.push_str("spec:\n");
    out.push_str("  type: PROTOCOL_BUFFER\n");
    out.push_str("  definition: |\n");
    out.push_str(&body);
    out
}

/// Render the kustomization index listing `resources`.
///
/// Entries are emitted in lexicographic order whatever order they arrive in.
pub fn kustomization(resources: &[String]) -> String {
    let mut sorted: Vec<&str> = resources.iter().map(String::as_str).collect();
    sorted.sort_unstable();

    let mut out = String::from(INDEX_HEADER);
    out.push('\n');
    out.push_str("resources:\n");
    for resource in sorted {
        out.push_str("  - ");
        out.push_str(resource);
        out.push('\n');
    }
    out
}
