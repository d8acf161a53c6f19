pub mod error;
pub mod geo;
pub mod ingest;
pub mod output;
pub mod pipeline;
pub mod temporal;
