//! Cosine similarity between frequency models and batch scoring of a corpus.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{LangGuessError, Result};
use crate::io::read_model_listing;
use crate::model::{Corpus, FrequencyModel, ModelBuilder};

/// Cosine of the angle between the n-gram vectors of `a` and `b`.
///
/// Dimensions are the union of both key sets; an n-gram missing from one
/// model counts as zero there. With non-negative counts the result lies in
/// `[0, 1]`.
///
/// # Errors
/// - [`LangGuessError::DegenerateModel`] if either vector has zero magnitude.
/// - [`LangGuessError::NgramSizeMismatch`] if the models use different `n`.
pub fn cosine_similarity(a: &FrequencyModel, b: &FrequencyModel) -> Result<f64> {
	a.check_size(b)?;

	let mut dot = 0.0_f64;
	let mut norm_a = 0.0_f64;
	for (ngram, count_a) in a {
		let count_a = *count_a as f64;
		dot += count_a * b.count(ngram) as f64;
		norm_a += count_a * count_a;
	}
	// Keys of `b` absent from `a` add nothing to the dot product but still
	// weigh on the magnitude of `b`.
	let norm_b: f64 = b.iter().map(|(_, count)| (*count as f64).powi(2)).sum();

	if norm_a == 0.0 || norm_b == 0.0 {
		return Err(LangGuessError::DegenerateModel);
	}

	Ok((dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(0.0, 1.0))
}

/// How the candidate model evolves while walking a corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoringMode {
	/// One candidate model grows across the whole corpus. Each file adds one
	/// occurrence per distinct n-gram it contains, and its score is that of
	/// the running model, i.e. of itself plus every file visited before it.
	#[default]
	Cumulative,
	/// Each file is scored on its own frequency model. A file without any
	/// term scores `0` instead of aborting the run.
	Isolated,
}

/// Similarity of one candidate document to the reference model.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDocument {
	pub path: PathBuf,
	pub score: f64,
}

/// Scores documents against a fixed reference model.
pub struct Scorer<'r> {
	reference: FrequencyModel,
	builder: ModelBuilder<'r>,
	mode: ScoringMode,
}

impl<'r> Scorer<'r> {
	/// Wraps a reference model; `builder` models the candidate documents.
	///
	/// # Errors
	/// [`LangGuessError::NgramSizeMismatch`] if the reference was not built
	/// with the builder's n-gram size.
	pub fn new(reference: FrequencyModel, builder: ModelBuilder<'r>) -> Result<Self> {
		if reference.ngram_size() != builder.ngram_size() {
			return Err(LangGuessError::NgramSizeMismatch {
				expected: builder.ngram_size(),
				found: reference.ngram_size(),
			});
		}
		Ok(Self { reference, builder, mode: ScoringMode::default() })
	}

	/// Loads the reference from a persisted `<ngram>\t<frequency>` listing.
	pub fn from_listing<P: AsRef<Path>>(listing: P, builder: ModelBuilder<'r>) -> Result<Self> {
		let reference = read_model_listing(listing, builder.ngram_size())?;
		Self::new(reference, builder)
	}

	pub fn with_mode(mut self, mode: ScoringMode) -> Self {
		self.mode = mode;
		self
	}

	pub fn reference(&self) -> &FrequencyModel {
		&self.reference
	}

	/// Scores every document of `source`, writing `<path>\t<score>` lines to `sink`.
	///
	/// Scores are always printed with a fractional part, e.g. `1.0`.
	///
	/// Lines are written as soon as each file is scored, so a failure leaves
	/// the lines of the files before it in `sink`.
	pub fn score_corpus<P, W>(&self, source: P, mut sink: W) -> Result<Vec<ScoredDocument>>
	where
		P: AsRef<Path>,
		W: Write,
	{
		let reporter = self.builder.reporter();
		let n = self.builder.ngram_size();
		let files = Corpus::open(source)?.files(self.builder.suffix())?;

		let mut candidate = FrequencyModel::new(n)?;
		let mut scored = Vec::with_capacity(files.len());
		for (index, file) in files.into_iter().enumerate() {
			let processed = index + 1;
			if processed % self.builder.progress_every() == 0 {
				reporter.files_processed(processed);
			}

			let document = self.builder.build_from_file(&file)?;
			let score = match self.mode {
				ScoringMode::Cumulative => {
					candidate.merge_presence(&document)?;
					cosine_similarity(&self.reference, &candidate)?
				}
				ScoringMode::Isolated if document.is_empty() => {
					reporter.empty_document(&file);
					0.0
				}
				ScoringMode::Isolated => cosine_similarity(&self.reference, &document)?,
			};

			// `{:?}` keeps the fractional part of whole scores (`1.0`, `0.0`)
			writeln!(sink, "{}\t{:?}", file.display(), score).map_err(LangGuessError::Output)?;
			reporter.scored(&file, score);
			scored.push(ScoredDocument { path: file, score });
		}

		sink.flush().map_err(LangGuessError::Output)?;
		reporter.done();
		Ok(scored)
	}

	/// Same as [`Scorer::score_corpus`], writing to a new file at `output`.
	pub fn score_corpus_to_file<P, O>(&self, source: P, output: O) -> Result<Vec<ScoredDocument>>
	where
		P: AsRef<Path>,
		O: AsRef<Path>,
	{
		let output = output.as_ref();
		let file = File::create(output).map_err(|e| LangGuessError::resource(output, e))?;
		self.score_corpus(source, BufWriter::new(file))
	}
}
