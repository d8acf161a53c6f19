//! Error taxonomy for the feature pipeline.
//!
//! A reference-table lookup miss is not an error: it propagates as `None`
//! fields on the joined record and the row is retained. Everything below is
//! fatal to the run — a partially joined dataset is never handed downstream.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// A trip start timestamp did not match any recognized format.
    #[error("unparseable start timestamp {value:?} on trip seq_id {seq_id}")]
    Parse { seq_id: u64, value: String },

    /// A reference table repeated a key that a left join assumes unique.
    #[error("duplicate key {key} in {table} table")]
    DuplicateKey { table: &'static str, key: String },

    /// A required column is missing or ill-typed at a pipeline boundary.
    #[error("schema mismatch in {table} table: {detail}")]
    Schema { table: &'static str, detail: String },

    /// An input table file could not be read.
    #[error("failed to read {table} table")]
    Io {
        table: &'static str,
        #[source]
        source: std::io::Error,
    },
}
