//! CSV artifacts for pipeline runs.
//!
//! Every table is written twice: a stable "latest" file that downstream
//! dashboards poll, and a timestamped snapshot kept for history.

pub mod error;
pub mod format;
pub mod table;
pub mod writer;

pub use error::ArtifactError;
pub use table::{render_markdown, write_table, CsvRecord};
pub use writer::{snapshot_stamp, write_artifacts, ArtifactKind, WrittenArtifacts};
