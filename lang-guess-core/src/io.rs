use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{LangGuessError, Result};
use crate::model::FrequencyModel;

/// Reads a whole document as UTF-8 text.
///
/// - I/O failures map to [`LangGuessError::Resource`]
/// - Invalid UTF-8 maps to [`LangGuessError::Encoding`]
pub fn read_document<P: AsRef<Path>>(path: P) -> Result<String> {
	let path = path.as_ref();
	let bytes = std::fs::read(path).map_err(|e| LangGuessError::resource(path, e))?;
	String::from_utf8(bytes).map_err(|e| LangGuessError::Encoding {
		path: path.to_path_buf(),
		offset: e.utf8_error().valid_up_to(),
	})
}

/// Recursively lists every file under `root` whose name ends with `suffix`.
///
/// Symlinks to files are included and read through; symlinked directories
/// are not descended into. Entries are visited in file-name order so
/// repeated runs see the same sequence.
pub fn corpus_files<P: AsRef<Path>>(root: P, suffix: &str) -> Result<Vec<PathBuf>> {
	let root = root.as_ref();
	let mut files = Vec::new();

	for entry in WalkDir::new(root).sort_by_file_name() {
		let entry = entry.map_err(|e| {
			let path = e.path().unwrap_or(root).to_path_buf();
			LangGuessError::resource(path, io::Error::from(e))
		})?;

		// `Path::is_file` follows links, `DirEntry::file_type` does not
		if entry.path().is_file() && entry.file_name().to_string_lossy().ends_with(suffix) {
			files.push(entry.into_path());
		}
	}

	Ok(files)
}

/// Writes the `limit` most frequent n-grams as `<ngram>\t<frequency>` lines.
pub fn write_model_listing<P: AsRef<Path>>(path: P, model: &FrequencyModel, limit: usize) -> Result<()> {
	let path = path.as_ref();
	let to_resource = |e| LangGuessError::resource(path, e);

	let mut writer = BufWriter::new(File::create(path).map_err(to_resource)?);
	for (ngram, count) in model.top(limit) {
		writeln!(writer, "{ngram}\t{count}").map_err(to_resource)?;
	}
	writer.flush().map_err(to_resource)
}

/// Loads a listing written by [`write_model_listing`] into a model of size `n`.
///
/// Columns may be separated by any whitespace; blank lines are skipped.
///
/// # Errors
/// - [`LangGuessError::MalformedListing`] for a line that is not two fields
///   or whose frequency is not a non-negative integer.
/// - [`LangGuessError::NgramSizeMismatch`] when an entry is not `n` chars long,
///   i.e. the listing was built with another n-gram size.
pub fn read_model_listing<P: AsRef<Path>>(path: P, n: usize) -> Result<FrequencyModel> {
	let path = path.as_ref();
	let content = read_document(path)?;
	let mut model = FrequencyModel::new(n)?;

	for (index, line) in content.lines().enumerate() {
		if line.trim().is_empty() {
			continue;
		}
		let malformed = || LangGuessError::MalformedListing {
			path: path.to_path_buf(),
			line: index + 1,
			content: line.to_owned(),
		};

		let mut fields = line.split_whitespace();
		let (ngram, frequency) = match (fields.next(), fields.next(), fields.next()) {
			(Some(ngram), Some(frequency), None) => (ngram, frequency),
			_ => return Err(malformed()),
		};
		let frequency: u64 = frequency.parse().map_err(|_| malformed())?;

		let found = ngram.chars().count();
		if found != n {
			return Err(LangGuessError::NgramSizeMismatch { expected: n, found });
		}
		model.insert(ngram, frequency);
	}

	Ok(model)
}

/// `model_<lang>_<n>.txt`
pub fn model_file_name(lang: &str, n: usize) -> String {
	format!("model_{lang}_{n}.txt")
}

/// `sim_<lang>_<n>.txt`
pub fn similarity_file_name(lang: &str, n: usize) -> String {
	format!("sim_{lang}_{n}.txt")
}

#[cfg(test)]
mod tests {
	use std::fs;

	use super::*;
	use crate::report::NullReporter;

	#[test]
	fn read_document_rejects_invalid_utf8() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("latin1_prep.txt");
		fs::write(&path, b"caf\xe9 au lait").unwrap();

		match read_document(&path) {
			Err(LangGuessError::Encoding { offset, .. }) => assert_eq!(offset, 3),
			other => panic!("expected encoding error, got {other:?}"),
		}
	}

	#[test]
	fn read_document_missing_file_is_resource_error() {
		let dir = tempfile::tempdir().unwrap();
		let err = read_document(dir.path().join("nope_prep.txt")).unwrap_err();
		assert!(matches!(err, LangGuessError::Resource { .. }));
	}

	#[test]
	fn corpus_files_filters_by_suffix_recursively() {
		let dir = tempfile::tempdir().unwrap();
		let nested = dir.path().join("a").join("b");
		fs::create_dir_all(&nested).unwrap();
		fs::write(dir.path().join("one_prep.txt"), "x").unwrap();
		fs::write(dir.path().join("raw.txt"), "x").unwrap();
		fs::write(nested.join("two_prep.txt"), "x").unwrap();
		fs::write(nested.join("two_prep.txt.bak"), "x").unwrap();

		let files = corpus_files(dir.path(), "_prep.txt").unwrap();
		let names: Vec<_> = files
			.iter()
			.map(|p| p.file_name().unwrap().to_string_lossy().to_string())
			.collect();
		assert_eq!(names, vec!["two_prep.txt", "one_prep.txt"]);
	}

	#[cfg(unix)]
	#[test]
	fn corpus_files_includes_symlinked_documents() {
		use std::os::unix::fs::symlink;

		let corpus = tempfile::tempdir().unwrap();
		let elsewhere = tempfile::tempdir().unwrap();
		let target = elsewhere.path().join("source.txt");
		fs::write(&target, "cat").unwrap();
		symlink(&target, corpus.path().join("linked_prep.txt")).unwrap();
		symlink(elsewhere.path(), corpus.path().join("linked_dir")).unwrap();

		let files = corpus_files(corpus.path(), "_prep.txt").unwrap();
		assert_eq!(files, vec![corpus.path().join("linked_prep.txt")]);

		let builder = crate::model::ModelBuilder::new(2, &NullReporter).unwrap();
		let model = builder.build_from_corpus(corpus.path()).unwrap();
		assert_eq!(model.count("ca"), 1);
		assert_eq!(model.len(), 4);
	}

	#[test]
	fn corpus_files_missing_root_is_resource_error() {
		let dir = tempfile::tempdir().unwrap();
		let err = corpus_files(dir.path().join("missing"), "_prep.txt").unwrap_err();
		assert!(matches!(err, LangGuessError::Resource { .. }));
	}

	#[test]
	fn listing_keeps_top_entries_in_descending_order() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join(model_file_name("en", 2));
		let model = FrequencyModel::from_text("cat cat cat dog", 2, &NullReporter).unwrap();

		write_model_listing(&path, &model, 3).unwrap();

		let content = fs::read_to_string(&path).unwrap();
		let lines: Vec<&str> = content.lines().collect();
		assert_eq!(lines, vec!["#c\t3", "at\t3", "ca\t3"]);

		let reloaded = read_model_listing(&path, 2).unwrap();
		assert_eq!(reloaded.len(), 3);
		assert_eq!(reloaded.count("ca"), 3);
		assert_eq!(reloaded.count("do"), 0);
	}

	#[test]
	fn listing_accepts_spaces_and_blank_lines() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("model_fr_2.txt");
		fs::write(&path, "e# 40\n\nde\t12\n").unwrap();

		let model = read_model_listing(&path, 2).unwrap();
		assert_eq!(model.count("e#"), 40);
		assert_eq!(model.count("de"), 12);
	}

	#[test]
	fn malformed_listing_reports_line_number() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("model_en_2.txt");
		fs::write(&path, "th\t10\nhe\tmany\n").unwrap();

		match read_model_listing(&path, 2) {
			Err(LangGuessError::MalformedListing { line, .. }) => assert_eq!(line, 2),
			other => panic!("expected malformed listing, got {other:?}"),
		}
	}

	#[test]
	fn listing_of_other_size_is_rejected() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("model_en_3.txt");
		fs::write(&path, "the\t10\n").unwrap();

		assert!(matches!(
			read_model_listing(&path, 2),
			Err(LangGuessError::NgramSizeMismatch { expected: 2, found: 3 })
		));
	}

	#[test]
	fn repeated_huge_frequencies_saturate() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("model_en_2.txt");
		fs::write(&path, format!("ab\t{}\nab\t1\n", u64::MAX)).unwrap();

		let model = read_model_listing(&path, 2).unwrap();
		assert_eq!(model.count("ab"), u64::MAX);
	}

	#[test]
	fn output_file_names_follow_convention() {
		assert_eq!(model_file_name("de", 3), "model_de_3.txt");
		assert_eq!(similarity_file_name("en", 2), "sim_en_2.txt");
	}
}
