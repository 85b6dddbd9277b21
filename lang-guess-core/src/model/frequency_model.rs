use std::collections::HashMap;
use std::collections::hash_map;

use crate::error::{LangGuessError, Result};
use crate::ngram::extract;
use crate::report::Reporter;

/// Character n-gram frequency vector of a document or corpus.
///
/// # Responsibilities
/// - Count n-grams of every term fed to it
/// - Merge with another model of the same size `n`
/// - Expose the most frequent n-grams for export
///
/// # Invariants
/// - `n` is always >= 1
/// - Every key is exactly `n` chars long
/// - Counts are never decremented and saturate at `u64::MAX`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyModel {
	/// Size of the n-grams counted by this model
	n: usize,

	/// Occurrences of each n-gram
	counts: HashMap<String, u64>,
}

impl FrequencyModel {
	/// Creates an empty model for n-grams of size `n`.
	///
	/// # Errors
	/// Returns [`LangGuessError::InvalidNgramSize`] if `n == 0`.
	pub fn new(n: usize) -> Result<Self> {
		if n == 0 {
			return Err(LangGuessError::InvalidNgramSize);
		}
		Ok(Self { n, counts: HashMap::new() })
	}

	/// Builds a model from whitespace-separated text.
	pub fn from_text(text: &str, n: usize, reporter: &dyn Reporter) -> Result<Self> {
		let mut model = Self::new(n)?;
		model.add_text(text, reporter);
		Ok(model)
	}

	pub fn ngram_size(&self) -> usize {
		self.n
	}

	/// Counts every n-gram of a single term, repeated n-grams included.
	pub fn add_term(&mut self, term: &str, reporter: &dyn Reporter) {
		for ngram in extract(term, self.n, reporter) {
			self.bump(ngram, 1);
		}
	}

	/// Splits `text` on whitespace and counts the n-grams of each term.
	pub fn add_text(&mut self, text: &str, reporter: &dyn Reporter) {
		for term in text.split_whitespace() {
			self.add_term(term, reporter);
		}
	}

	/// Adds `count` occurrences of `ngram`.
	///
	/// The caller is responsible for `ngram` being `n` chars long.
	pub fn insert(&mut self, ngram: &str, count: u64) {
		self.bump(ngram.to_owned(), count);
	}

	fn bump(&mut self, ngram: String, count: u64) {
		let entry = self.counts.entry(ngram).or_insert(0);
		*entry = entry.saturating_add(count);
	}

	/// Merges another model into this one, summing counts of shared n-grams.
	///
	/// # Errors
	/// Returns [`LangGuessError::NgramSizeMismatch`] if the sizes differ.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		self.check_size(other)?;
		for (ngram, count) in &other.counts {
			match self.counts.get_mut(ngram) {
				Some(existing) => *existing = existing.saturating_add(*count),
				None => {
					self.counts.insert(ngram.clone(), *count);
				}
			}
		}
		Ok(())
	}

	/// Adds one occurrence for every distinct n-gram of `other`, ignoring its counts.
	///
	/// Accumulating documents this way yields how many documents contain each n-gram.
	pub fn merge_presence(&mut self, other: &Self) -> Result<()> {
		self.check_size(other)?;
		for ngram in other.counts.keys() {
			self.bump(ngram.clone(), 1);
		}
		Ok(())
	}

	pub(crate) fn check_size(&self, other: &Self) -> Result<()> {
		if self.n != other.n {
			return Err(LangGuessError::NgramSizeMismatch { expected: self.n, found: other.n });
		}
		Ok(())
	}

	/// Occurrences of `ngram`, `0` when unseen.
	pub fn count(&self, ngram: &str) -> u64 {
		self.counts.get(ngram).copied().unwrap_or(0)
	}

	/// Number of distinct n-grams.
	pub fn len(&self) -> usize {
		self.counts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	/// Sum of all counts, saturating at `u64::MAX`.
	pub fn total(&self) -> u64 {
		self.counts.values().fold(0, |sum, count| sum.saturating_add(*count))
	}

	pub fn iter(&self) -> hash_map::Iter<'_, String, u64> {
		self.counts.iter()
	}

	/// Returns at most `k` n-grams, most frequent first.
	///
	/// Equal counts are ordered by n-gram so the output is reproducible.
	pub fn top(&self, k: usize) -> Vec<(&str, u64)> {
		let mut entries: Vec<(&str, u64)> = self
			.counts
			.iter()
			.map(|(ngram, count)| (ngram.as_str(), *count))
			.collect();
		entries.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
		entries.truncate(k);
		entries
	}
}

impl<'a> IntoIterator for &'a FrequencyModel {
	type Item = (&'a String, &'a u64);
	type IntoIter = hash_map::Iter<'a, String, u64>;

	fn into_iter(self) -> Self::IntoIter {
		self.counts.iter()
	}
}

#[cfg(test)]
mod tests {
	use rand::seq::SliceRandom;

	use super::*;
	use crate::report::NullReporter;

	fn model_of(text: &str) -> FrequencyModel {
		let mut model = FrequencyModel::new(2).unwrap();
		model.add_text(text, &NullReporter);
		model
	}

	#[test]
	fn zero_size_is_rejected() {
		assert!(matches!(FrequencyModel::new(0), Err(LangGuessError::InvalidNgramSize)));
	}

	#[test]
	fn repeated_terms_repeat_counts() {
		let model = model_of("cat cat\n  dog");
		for ngram in ["#c", "ca", "at", "t#"] {
			assert_eq!(model.count(ngram), 2, "{ngram}");
		}
		for ngram in ["#d", "do", "og", "g#"] {
			assert_eq!(model.count(ngram), 1, "{ngram}");
		}
		assert_eq!(model.len(), 8);
		assert_eq!(model.total(), 12);
	}

	#[test]
	fn merge_sums_shared_keys() {
		let mut left = model_of("cat cat");
		left.merge(&model_of("dog")).unwrap();

		let single = model_of("cat");
		for (ngram, count) in &single {
			assert_eq!(left.count(ngram), count * 2);
		}
		assert_eq!(left.count("do"), 1);
	}

	#[test]
	fn merge_rejects_other_sizes() {
		let mut bigrams = model_of("cat");
		let trigrams = FrequencyModel::from_text("cat", 3, &NullReporter).unwrap();
		assert!(matches!(
			bigrams.merge(&trigrams),
			Err(LangGuessError::NgramSizeMismatch { expected: 2, found: 3 })
		));
	}

	#[test]
	fn merge_order_does_not_matter() {
		let texts = ["the cat sat", "on the mat", "a", "dogs and cats", "ünïcödé tèxt", "", "the the the"];
		let parts: Vec<FrequencyModel> = texts.iter().map(|t| model_of(t)).collect();

		let mut reference = FrequencyModel::new(2).unwrap();
		for part in &parts {
			reference.merge(part).unwrap();
		}

		let mut rng = rand::rng();
		for _ in 0..20 {
			let mut shuffled: Vec<&FrequencyModel> = parts.iter().collect();
			shuffled.shuffle(&mut rng);

			// Group into pairs first to exercise associativity as well.
			let mut aggregate = FrequencyModel::new(2).unwrap();
			for pair in shuffled.chunks(2) {
				let mut partial = pair[0].clone();
				if let Some(second) = pair.get(1) {
					partial.merge(second).unwrap();
				}
				aggregate.merge(&partial).unwrap();
			}
			assert_eq!(aggregate, reference);
		}
	}

	#[test]
	fn counts_saturate_instead_of_overflowing() {
		let mut left = FrequencyModel::new(2).unwrap();
		left.insert("ab", u64::MAX);
		left.insert("ab", 1);
		assert_eq!(left.count("ab"), u64::MAX);

		let mut right = FrequencyModel::new(2).unwrap();
		right.insert("ab", 7);
		right.insert("cd", u64::MAX);
		left.merge(&right).unwrap();
		left.merge_presence(&right).unwrap();
		assert_eq!(left.count("ab"), u64::MAX);
		assert_eq!(left.count("cd"), u64::MAX);
		assert_eq!(left.total(), u64::MAX);
	}

	#[test]
	fn presence_merge_counts_documents() {
		let mut documents = FrequencyModel::new(2).unwrap();
		documents.merge_presence(&model_of("cat cat cat")).unwrap();
		documents.merge_presence(&model_of("cab")).unwrap();

		assert_eq!(documents.count("ca"), 2);
		assert_eq!(documents.count("at"), 1);
		assert_eq!(documents.count("ab"), 1);
	}

	#[test]
	fn top_sorts_by_count_then_ngram() {
		let model = model_of("aa ab");
		// #a:2, aa:1, a#:1, ab:1, b#:1
		let top = model.top(3);
		assert_eq!(top, vec![("#a", 2), ("a#", 1), ("aa", 1)]);
		assert_eq!(model.top(100).len(), model.len());
	}

	#[test]
	fn empty_terms_are_reported() {
		let reporter = crate::report::testing::RecordingReporter::default();
		let mut model = FrequencyModel::new(2).unwrap();
		model.add_term("", &reporter);
		assert!(model.is_empty());
		assert_eq!(*reporter.empty_terms.borrow(), 1);
	}
}
