//! Frequency models and the builder that derives them from documents.
//!
//! - `FrequencyModel`: n-gram → count mapping of a document or corpus
//! - `ModelBuilder`: reads files or directory trees into a single model
//! - `Corpus`: a single document or a directory of preprocessed documents

/// N-gram frequency vector with merge and top-K export.
pub mod frequency_model;

/// File and corpus model construction with optional persistence.
pub mod builder;

pub use builder::{Corpus, ModelBuilder};
pub use frequency_model::FrequencyModel;
