//! Run configuration, loadable from a TOML file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{LangGuessError, Result};

pub const DEFAULT_LANG: &str = "en";
pub const DEFAULT_NGRAM_SIZE: usize = 2;
/// Suffix given to documents by the preprocessing step.
pub const DEFAULT_SUFFIX: &str = "_prep.txt";
/// Number of n-grams kept in a persisted model listing.
pub const DEFAULT_TOP_K: usize = 500;
pub const DEFAULT_PROGRESS_EVERY: usize = 100;

/// Settings shared by model building and scoring.
///
/// Every field is optional in the file; missing ones fall back to the
/// defaults above.
///
/// ```toml
/// lang = "fr"
/// ngram_size = 3
/// suffix = "_prep.txt"
/// top_k = 500
/// progress_every = 100
/// output_dir = "models"
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	pub lang: String,
	pub ngram_size: usize,
	pub suffix: String,
	pub top_k: usize,
	pub progress_every: usize,
	pub output_dir: PathBuf,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			lang: DEFAULT_LANG.to_owned(),
			ngram_size: DEFAULT_NGRAM_SIZE,
			suffix: DEFAULT_SUFFIX.to_owned(),
			top_k: DEFAULT_TOP_K,
			progress_every: DEFAULT_PROGRESS_EVERY,
			output_dir: PathBuf::from("."),
		}
	}
}

impl Config {
	pub fn from_toml_str(content: &str) -> Result<Self> {
		let config: Config =
			toml::from_str(content).map_err(|e| LangGuessError::Config(e.to_string()))?;
		config.validate()?;
		Ok(config)
	}

	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
		let path = path.as_ref();
		let content =
			std::fs::read_to_string(path).map_err(|e| LangGuessError::resource(path, e))?;
		Self::from_toml_str(&content)
	}

	/// Rejects values that would make a run meaningless.
	pub fn validate(&self) -> Result<()> {
		if self.ngram_size == 0 {
			return Err(LangGuessError::InvalidNgramSize);
		}
		if self.top_k == 0 {
			return Err(LangGuessError::Config("top_k must be >= 1".to_owned()));
		}
		if self.progress_every == 0 {
			return Err(LangGuessError::Config("progress_every must be >= 1".to_owned()));
		}
		if self.lang.trim().is_empty() {
			return Err(LangGuessError::Config("lang cannot be empty".to_owned()));
		}
		Ok(())
	}
}
