//! Observability hooks for long-running builds and scoring passes.
//!
//! Components never log on their own: they receive a [`Reporter`] and
//! describe what happens through it. [`LogReporter`] forwards to the `log`
//! facade, tests plug in their own implementation to observe events.

use std::path::Path;

/// Receives progress and diagnostic events.
///
/// Every method has a no-op default so implementors only override what
/// they care about.
pub trait Reporter {
	/// An empty term was handed to the n-gram extractor.
	fn empty_term(&self) {}

	/// A model build started for the given source.
	fn model_started(&self, _source: &Path) {}

	/// `count` qualifying files have been visited so far.
	///
	/// Only called at the configured cadence, not for every file.
	fn files_processed(&self, _count: usize) {}

	/// The aggregate model is about to be sorted for export.
	fn sorting(&self) {}

	/// The top-K listing was written to `path`.
	fn model_saved(&self, _path: &Path) {}

	/// A candidate document contained no term and could not be modelled.
	fn empty_document(&self, _path: &Path) {}

	/// A candidate document received a similarity score.
	fn scored(&self, _path: &Path, _score: f64) {}

	/// The current operation finished.
	fn done(&self) {}
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {}

/// Forwards events to the `log` facade, tagged with the language being processed.
#[derive(Debug, Clone)]
pub struct LogReporter {
	lang: String,
}

impl LogReporter {
	pub fn new(lang: &str) -> Self {
		Self { lang: lang.to_owned() }
	}

	pub fn lang(&self) -> &str {
		&self.lang
	}
}

impl Reporter for LogReporter {
	fn empty_term(&self) {
		log::warn!("<{}> empty term...", self.lang);
	}

	fn model_started(&self, source: &Path) {
		log::info!("Creating language model for <{}> from {}...", self.lang, source.display());
	}

	fn files_processed(&self, count: usize) {
		log::info!("<{}> ... processed {} files...", self.lang, count);
	}

	fn sorting(&self) {
		log::info!("<{}> ... sorting...", self.lang);
	}

	fn model_saved(&self, path: &Path) {
		log::info!("<{}> ... saved model in <{}>...", self.lang, path.display());
	}

	fn empty_document(&self, path: &Path) {
		log::warn!("<{}> {} has no terms, scored 0", self.lang, path.display());
	}

	fn scored(&self, path: &Path, score: f64) {
		log::debug!("<{}> {}\t{}", self.lang, path.display(), score);
	}

	fn done(&self) {
		log::info!("<{}> ... done.", self.lang);
	}
}
