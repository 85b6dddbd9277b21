//! Character n-gram language identification library.
//!
//! This crate provides the building blocks of an n-gram based language
//! guesser:
//! - Extraction of bordered character n-grams from whitespace-separated terms
//! - Frequency models aggregated over a file or a directory tree of documents
//! - Top-K model listings on disk (`<ngram>\t<frequency>`)
//! - Cosine similarity between models and batch scoring of a corpus
//!
//! Documents are expected to be tokenized already: the crate splits on
//! whitespace and performs no normalization of its own.

/// Run configuration and its defaults.
pub mod config;

/// Error types.
pub mod error;

/// Document, corpus and model-listing I/O.
pub mod io;

/// Frequency models and the builder that derives them from documents.
pub mod model;

/// Term to n-gram extraction.
pub mod ngram;

/// Observability hooks injected into builders and scorers.
pub mod report;

/// Cosine similarity and corpus scoring.
pub mod similarity;

pub use config::Config;
pub use error::{LangGuessError, Result};
pub use model::{Corpus, FrequencyModel, ModelBuilder};
pub use report::{LogReporter, NullReporter, Reporter};
pub use similarity::{ScoredDocument, Scorer, ScoringMode, cosine_similarity};
