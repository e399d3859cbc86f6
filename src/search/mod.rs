//! Keyword retrieval over the chunked regulation corpus.

pub mod classify;
pub mod engine;
pub mod scorer;
