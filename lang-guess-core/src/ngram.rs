//! Character n-gram extraction from a single term.

use std::iter;

use crate::report::Reporter;

/// Marks term boundaries inside n-grams.
///
/// Reserved: terms containing `#` produce n-grams indistinguishable from
/// boundary n-grams. This is not checked.
pub const SEPARATOR: char = '#';

/// Splits `term` into its character n-grams.
///
/// # Behavior
/// - Empty `term`: reports [`Reporter::empty_term`] and returns nothing.
/// - Term shorter than `n`: exactly two n-grams, the term left-padded and
///   right-padded with [`SEPARATOR`] up to length `n`.
/// - Otherwise, for `n > 1` the term is bordered by one separator on each
///   side; a window of `n` characters then slides over it with stride 1.
///   For `n == 1` the window runs over the bare term.
///
/// # Notes
/// - Lengths are measured in `char`s, so multi-byte scalars count as one.
/// - `n == 0` is meaningless and yields an empty result.
pub fn extract(term: &str, n: usize, reporter: &dyn Reporter) -> Vec<String> {
	if n == 0 {
		return Vec::new();
	}
	if term.is_empty() {
		reporter.empty_term();
		return Vec::new();
	}

	let len = term.chars().count();
	if len < n {
		let padding: String = iter::repeat_n(SEPARATOR, n - len).collect();
		return vec![format!("{padding}{term}"), format!("{term}{padding}")];
	}

	let chars: Vec<char> = if n > 1 {
		iter::once(SEPARATOR)
			.chain(term.chars())
			.chain(iter::once(SEPARATOR))
			.collect()
	} else {
		term.chars().collect()
	};

	chars.windows(n).map(|window| window.iter().collect()).collect()
}
