//! Command-line definition and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lang_guess_core::io::{model_file_name, similarity_file_name};
use lang_guess_core::{Config, LogReporter, ModelBuilder, Scorer, ScoringMode};

/// Parse a size that must be at least 1 (n-gram size, top-K)
fn parse_positive(s: &str) -> Result<usize, String> {
	let n: usize = s
		.parse()
		.map_err(|_| format!("'{}' is not a valid number", s))?;
	if n == 0 {
		Err("value must be at least 1".to_string())
	} else {
		Ok(n)
	}
}

/// Character n-gram language models and cosine similarity scoring.
///
/// Without `--reference`, builds a model from the source and saves its most
/// frequent n-grams to `model_<lang>_<n>.txt`. With `--reference`, scores
/// every source document against that model into `sim_<lang>_<n>.txt`.
#[derive(Parser, Debug)]
#[command(name = "lang-guess", version)]
#[command(after_help = "\
Examples:
  lang-guess -s corpus/en -l en -n 3             Build model_en_3.txt
  lang-guess -s unknown/ -l en -n 3 -r model_en_3.txt
                                                 Score documents into sim_en_3.txt")]
pub struct Cli {
	/// Preprocessed text file or directory of `*_prep.txt` files
	#[arg(short = 's', long, env = "LANG_GUESS_SOURCE")]
	pub source: PathBuf,

	/// Language tag used in output file names and log lines [default: en]
	#[arg(short = 'l', long, env = "LANG_GUESS_LANG")]
	pub lang: Option<String>,

	/// Size of the character n-grams [default: 2]
	#[arg(short = 'n', long, env = "LANG_GUESS_NGRAM_SIZE", value_parser = parse_positive)]
	pub ngram_size: Option<usize>,

	/// Reference model listing; switches to scoring mode
	#[arg(short = 'r', long, env = "LANG_GUESS_REFERENCE")]
	pub reference: Option<PathBuf>,

	/// Directory receiving the model or similarity listing [default: .]
	#[arg(short = 'o', long, env = "LANG_GUESS_OUTPUT_DIR")]
	pub output_dir: Option<PathBuf>,

	/// File-name suffix selecting documents inside a directory [default: _prep.txt]
	#[arg(long)]
	pub suffix: Option<String>,

	/// Number of n-grams kept in a saved model [default: 500]
	#[arg(long, value_parser = parse_positive)]
	pub top: Option<usize>,

	/// Score each document on its own instead of on the running corpus model
	#[arg(long)]
	pub isolated: bool,

	/// TOML file providing defaults for the options above
	#[arg(long, env = "LANG_GUESS_CONFIG")]
	pub config: Option<PathBuf>,

	/// Log level (error, warn, info, debug, trace)
	#[arg(long, default_value = "info", value_parser = ["error", "warn", "info", "debug", "trace"])]
	pub log_level: String,
}

impl Cli {
	/// Layers flags over the config file over built-in defaults.
	pub fn resolve_config(&self) -> Result<Config> {
		let mut config = match &self.config {
			Some(path) => Config::load(path)
				.with_context(|| format!("Failed to load config {}", path.display()))?,
			None => Config::default(),
		};

		if let Some(lang) = &self.lang {
			config.lang = lang.clone();
		}
		if let Some(n) = self.ngram_size {
			config.ngram_size = n;
		}
		if let Some(dir) = &self.output_dir {
			config.output_dir = dir.clone();
		}
		if let Some(suffix) = &self.suffix {
			config.suffix = suffix.clone();
		}
		if let Some(top) = self.top {
			config.top_k = top;
		}

		config.validate()?;
		Ok(config)
	}
}

pub fn run(cli: Cli) -> Result<()> {
	let config = cli.resolve_config()?;
	let reporter = LogReporter::new(&config.lang);
	let builder = ModelBuilder::from_config(&config, &reporter)?;

	std::fs::create_dir_all(&config.output_dir)
		.with_context(|| format!("Failed to create {}", config.output_dir.display()))?;

	match &cli.reference {
		Some(reference) => {
			let mode = if cli.isolated { ScoringMode::Isolated } else { ScoringMode::Cumulative };
			let scorer = Scorer::from_listing(reference, builder)
				.with_context(|| format!("Failed to load reference model {}", reference.display()))?
				.with_mode(mode);

			let output = config
				.output_dir
				.join(similarity_file_name(&config.lang, config.ngram_size));
			let scored = scorer
				.score_corpus_to_file(&cli.source, &output)
				.with_context(|| format!("Failed to score {}", cli.source.display()))?;
			log::info!("Wrote {} scores to {}", scored.len(), output.display());
		}
		None => {
			if cli.isolated {
				log::warn!("--isolated only applies with --reference, ignoring");
			}
			let output = config
				.output_dir
				.join(model_file_name(&config.lang, config.ngram_size));
			let model = builder
				.build_and_save(&cli.source, &output)
				.with_context(|| format!("Failed to build model from {}", cli.source.display()))?;
			log::info!("Model has {} distinct n-grams", model.len());
		}
	}

	Ok(())
}
