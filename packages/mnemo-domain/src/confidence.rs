use crate::KnowledgeSnippet;

/// Score reported when retrieval produced no rows to measure against.
pub const NO_MATCH_CONFIDENCE: f32 = 0.3;
/// Lower clamp applied whenever at least one row was retrieved.
pub const MIN_CONFIDENCE: f32 = 0.1;
/// Upper clamp applied whenever at least one row was retrieved.
pub const MAX_CONFIDENCE: f32 = 0.95;

/// Heuristic word-overlap confidence for a query against retrieved rows.
///
/// Each whitespace-separated query word counts once per row it appears in
/// (as a substring of the row's lowercased title and content). The
/// denominator is query word count times row count, so it grows with the
/// row count even when the matches do not; the score is a bounded signal,
/// not a proportion. The arithmetic is kept exactly as the original
/// application computed it.
pub fn score(query: &str, snippets: &[KnowledgeSnippet]) -> f32 {
	if snippets.is_empty() {
		return NO_MATCH_CONFIDENCE;
	}

	let folded = query.to_lowercase();
	let words: Vec<&str> = folded.split_whitespace().collect();

	if words.is_empty() {
		return MIN_CONFIDENCE;
	}

	let mut total_matches = 0usize;

	for snippet in snippets {
		let haystack = format!("{} {}", snippet.title, snippet.content).to_lowercase();

		total_matches += words.iter().filter(|word| haystack.contains(**word)).count();
	}

	let total_words = words.len() * snippets.len();
	let ratio = total_matches as f32 / total_words as f32;

	ratio.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn snippet(title: &str, content: &str) -> KnowledgeSnippet {
		KnowledgeSnippet::new(title, content, Vec::new())
	}

	#[test]
	fn no_rows_scores_fixed_baseline() {
		assert_eq!(score("anything at all", &[]), NO_MATCH_CONFIDENCE);
	}

	#[test]
	fn full_overlap_hits_the_ceiling() {
		let rows =
			vec![snippet("Q3 Marketing Deck", "presentation about marketing strategy")];

		// Both query words match: min(0.95, max(0.1, 2/2)) = 0.95.
		assert_eq!(score("marketing presentation", &rows), MAX_CONFIDENCE);
	}

	#[test]
	fn zero_overlap_clamps_to_floor() {
		let rows = vec![snippet("Grocery list", "eggs and milk")];

		assert_eq!(score("quarterly budget", &rows), MIN_CONFIDENCE);
	}

	#[test]
	fn denominator_grows_with_row_count() {
		let matching = snippet("Marketing deck", "marketing presentation notes");
		let unrelated = snippet("Grocery list", "eggs and milk");
		let one_row = score("marketing presentation", std::slice::from_ref(&matching));
		let two_rows = score("marketing presentation", &[matching, unrelated]);

		assert!(two_rows < one_row, "expected {two_rows} < {one_row}");
	}

	#[test]
	fn result_stays_inside_the_clamp_when_rows_exist() {
		let rows = vec![
			snippet("Alpha", "alpha beta"),
			snippet("Beta", "gamma delta"),
			snippet("Gamma", "alpha gamma"),
		];
		let value = score("alpha beta gamma delta epsilon", &rows);

		assert!((MIN_CONFIDENCE..=MAX_CONFIDENCE).contains(&value));
	}

	#[test]
	fn matching_is_case_insensitive() {
		let rows = vec![snippet("BLUE FOLDER", "Quarterly REPORT")];

		assert_eq!(score("blue report", &rows), MAX_CONFIDENCE);
	}
}
