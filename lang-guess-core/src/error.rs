//! Error types shared by every stage of model building and scoring.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a build or scoring run.
///
/// An empty term is deliberately absent: it is reported as a warning
/// through a [`Reporter`](crate::report::Reporter) and yields no n-grams.
#[derive(Error, Debug)]
pub enum LangGuessError {
	/// A path is missing, unreadable, or could not be written.
	#[error("resource error at {}: {source}", path.display())]
	Resource {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// A document is not valid UTF-8.
	#[error("{} is not valid UTF-8 (first invalid byte at offset {offset})", path.display())]
	Encoding { path: PathBuf, offset: usize },

	/// One of the two vectors has zero magnitude, so the cosine is undefined.
	#[error("cannot compare against an empty frequency model")]
	DegenerateModel,

	/// Two models built with different n-gram sizes were combined.
	#[error("n-gram size mismatch: expected {expected}, found {found}")]
	NgramSizeMismatch { expected: usize, found: usize },

	#[error("n-gram size must be >= 1")]
	InvalidNgramSize,

	/// A line of a persisted model listing is not `<ngram><TAB><frequency>`.
	#[error("malformed model listing {} at line {line}: {content:?}", path.display())]
	MalformedListing {
		path: PathBuf,
		line: usize,
		content: String,
	},

	/// A similarity listing could not be written.
	#[error("failed to write output: {0}")]
	Output(#[source] std::io::Error),

	#[error("configuration error: {0}")]
	Config(String),
}

impl LangGuessError {
	pub(crate) fn resource<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
		Self::Resource { path: path.into(), source }
	}
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, LangGuessError>;
