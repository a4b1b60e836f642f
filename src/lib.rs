//! # pubsubschema-gen
//!
//! Turns a directory of `*.pubsub.proto` files into Config Connector
//! `PubSubSchema` manifests plus a `kustomization.yaml` index that lists them.
//!
//! The proto files come from an upstream protoc plugin; this crate never
//! parses them. Each file's text is embedded verbatim as the schema
//! definition, and its filename decides the resource name.
//!
//! ```text
//! gen/proto/infra/pubsub/                        deploy/pubsub/schemas/
//! ├── coreapp.test.v1.TestEvent.pubsub.proto  →  ├── coreapp-test-v1-testevent.schema.yaml
//! └── coreapp.users.v1.UserCreated.pubsub.proto → ├── coreapp-users-v1-usercreated.schema.yaml
//!                                                └── kustomization.yaml
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Finds input files: glob within a directory, regular files only, sorted |
//! | [`naming`] | Filename conventions and resource-name derivation |
//! | [`manifest`] | Literal text of the schema manifest and the kustomization index |
//! | [`generate`] | The run itself: stale cleanup, atomic writes, index last |
//! | [`config`] | Defaults, optional TOML config file, flag overrides |
//! | [`types`] | Values passed between the stages above |
//! | [`output`] | Progress and summary lines printed by the CLI |
//!
//! # Design Decisions
//!
//! ## Full Regeneration
//!
//! Every run deletes all `*.schema.yaml` files in the output directory before
//! writing. A proto that was renamed or removed upstream therefore never leaves
//! an orphaned manifest that kustomize would keep applying.
//!
//! ## Index Written Last
//!
//! `kustomization.yaml` is the record of what a run produced. It is written
//! only after every manifest succeeded, so a stale or missing index is the
//! visible trace of an interrupted run.
//!
//! ## Text Templates, Not a YAML Serializer
//!
//! The definition must stay a literal block scalar with the source bytes
//! intact, and the headers are byte-exact. Both are easier to guarantee by
//! writing the text directly; see [`manifest`].

pub mod config;
pub mod generate;
pub mod manifest;
pub mod naming;
pub mod output;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
