use std::path::{Path, PathBuf};

use crate::config::{Config, DEFAULT_PROGRESS_EVERY, DEFAULT_SUFFIX, DEFAULT_TOP_K};
use crate::error::{LangGuessError, Result};
use crate::io::{corpus_files, read_document, write_model_listing};
use crate::report::Reporter;

use super::frequency_model::FrequencyModel;

/// A document source: one file, or a directory tree of preprocessed files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Corpus {
	File(PathBuf),
	Directory(PathBuf),
}

impl Corpus {
	/// Classifies `path`.
	///
	/// # Errors
	/// [`LangGuessError::Resource`] if `path` is neither a file nor a directory.
	pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
		let path = path.as_ref();
		let metadata = std::fs::metadata(path).map_err(|e| LangGuessError::resource(path, e))?;
		if metadata.is_dir() {
			Ok(Corpus::Directory(path.to_path_buf()))
		} else {
			Ok(Corpus::File(path.to_path_buf()))
		}
	}

	/// Files making up the corpus, `suffix` only applies to directories.
	pub fn files(&self, suffix: &str) -> Result<Vec<PathBuf>> {
		match self {
			Corpus::File(path) => Ok(vec![path.clone()]),
			Corpus::Directory(root) => corpus_files(root, suffix),
		}
	}
}

/// Builds frequency models from documents on disk.
///
/// # Notes
/// - Single-threaded: files are read and merged one after the other.
/// - The whole aggregate lives in memory; its size grows with the number
///   of distinct n-grams, not with the corpus size.
pub struct ModelBuilder<'r> {
	n: usize,
	suffix: String,
	progress_every: usize,
	top_k: usize,
	reporter: &'r dyn Reporter,
}

impl<'r> ModelBuilder<'r> {
	/// Creates a builder for n-grams of size `n` with default settings.
	///
	/// # Errors
	/// Returns [`LangGuessError::InvalidNgramSize`] if `n == 0`.
	pub fn new(n: usize, reporter: &'r dyn Reporter) -> Result<Self> {
		if n == 0 {
			return Err(LangGuessError::InvalidNgramSize);
		}
		Ok(Self {
			n,
			suffix: DEFAULT_SUFFIX.to_owned(),
			progress_every: DEFAULT_PROGRESS_EVERY,
			top_k: DEFAULT_TOP_K,
			reporter,
		})
	}

	pub fn from_config(config: &Config, reporter: &'r dyn Reporter) -> Result<Self> {
		config.validate()?;
		Ok(Self::new(config.ngram_size, reporter)?
			.with_suffix(&config.suffix)
			.with_progress_every(config.progress_every)
			.with_top_k(config.top_k))
	}

	pub fn with_suffix(mut self, suffix: &str) -> Self {
		self.suffix = suffix.to_owned();
		self
	}

	/// Sets how many files are processed between two progress reports.
	pub fn with_progress_every(mut self, progress_every: usize) -> Self {
		self.progress_every = progress_every.max(1);
		self
	}

	/// Sets how many n-grams a saved listing keeps.
	pub fn with_top_k(mut self, top_k: usize) -> Self {
		self.top_k = top_k;
		self
	}

	pub fn ngram_size(&self) -> usize {
		self.n
	}

	pub fn suffix(&self) -> &str {
		&self.suffix
	}

	pub fn progress_every(&self) -> usize {
		self.progress_every
	}

	pub fn reporter(&self) -> &'r dyn Reporter {
		self.reporter
	}

	/// Builds the model of a single document.
	pub fn build_from_file<P: AsRef<Path>>(&self, path: P) -> Result<FrequencyModel> {
		let text = read_document(path)?;
		let mut model = FrequencyModel::new(self.n)?;
		model.add_text(&text, self.reporter);
		Ok(model)
	}

	/// Builds the aggregate model of a file or a directory tree.
	///
	/// For a directory, every file whose name ends with the configured suffix
	/// is modelled and merged into the running total.
	///
	/// # Errors
	/// The first unreadable or non-UTF-8 document aborts the build.
	pub fn build_from_corpus<P: AsRef<Path>>(&self, path: P) -> Result<FrequencyModel> {
		let path = path.as_ref();
		self.reporter.model_started(path);

		let model = match Corpus::open(path)? {
			Corpus::File(file) => self.build_from_file(file)?,
			corpus @ Corpus::Directory(_) => {
				let mut model = FrequencyModel::new(self.n)?;
				for (index, file) in corpus.files(&self.suffix)?.iter().enumerate() {
					let processed = index + 1;
					if processed % self.progress_every == 0 {
						self.reporter.files_processed(processed);
					}
					model.merge(&self.build_from_file(file)?)?;
				}
				model
			}
		};

		self.reporter.done();
		Ok(model)
	}

	/// Builds the corpus model and saves its top n-grams to `output`.
	///
	/// Returns the full model, not only the saved part.
	pub fn build_and_save<P, O>(&self, path: P, output: O) -> Result<FrequencyModel>
	where
		P: AsRef<Path>,
		O: AsRef<Path>,
	{
		let model = self.build_from_corpus(path)?;
		self.reporter.sorting();
		write_model_listing(&output, &model, self.top_k)?;
		self.reporter.model_saved(output.as_ref());
		Ok(model)
	}
}
