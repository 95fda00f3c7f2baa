/// Splits a raw query into the semantic fragments the user strung together,
/// e.g. "blue folder, last week, something about AI" into three clues.
///
/// The query is case-folded and split on comma/semicolon separators. When the
/// split yields fewer than two non-empty pieces, the whole folded query is
/// returned as a single fragment, so non-empty input never maps to an empty
/// fragment list.
pub fn extract(raw_query: &str) -> Vec<String> {
	let folded = raw_query.trim().to_lowercase();

	if folded.is_empty() {
		return Vec::new();
	}

	let pieces: Vec<String> = folded
		.split([',', ';'])
		.map(str::trim)
		.filter(|piece| !piece.is_empty())
		.map(str::to_string)
		.collect();

	if pieces.len() < 2 {
		return vec![folded];
	}

	pieces
}

#[cfg(test)]
mod tests {
	use super::extract;

	#[test]
	fn single_phrase_returns_whole_query() {
		assert_eq!(extract("  Blue Folder  "), vec!["blue folder".to_string()]);
	}

	#[test]
	fn splits_on_commas_and_semicolons() {
		assert_eq!(
			extract("Blue folder, last week; something about AI"),
			vec![
				"blue folder".to_string(),
				"last week".to_string(),
				"something about ai".to_string(),
			]
		);
	}

	#[test]
	fn drops_empty_pieces() {
		assert_eq!(extract("alpha,, ,beta"), vec!["alpha".to_string(), "beta".to_string()]);
	}

	#[test]
	fn lone_piece_after_separators_falls_back_to_whole_query() {
		// One non-empty piece means the separators carried no structure.
		assert_eq!(extract("alpha,,"), vec!["alpha,,".to_string()]);
	}

	#[test]
	fn empty_input_yields_no_fragments() {
		assert!(extract("   ").is_empty());
	}
}
