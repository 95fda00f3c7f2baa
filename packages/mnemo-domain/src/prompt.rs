use std::fmt::Write;

use crate::KnowledgeSnippet;

const PREAMBLE: &str = "You are a personal recall assistant. The user stored notes and documents \
earlier and is now trying to find something using vague, fragmentary clues.";

const INSTRUCTIONS: &str = "Instructions:\n\
- Identify which of the stored items, if any, match the user's clues and say why.\n\
- If nothing matches, infer the likely intent from the individual fragments.\n\
- If the query is too vague to act on, ask one or two clarifying questions.";

/// Renders the single instruction block sent to the generation service.
/// Same query, same rows, same string; there is no randomness here.
pub fn build(query: &str, snippets: &[KnowledgeSnippet]) -> String {
	let mut out = String::new();

	out.push_str(PREAMBLE);
	out.push_str("\n\nUser query: \"");
	out.push_str(query);
	out.push_str("\"\n\n");

	if snippets.is_empty() {
		out.push_str("Stored knowledge: none retrieved for this query.\n");
	} else {
		out.push_str("Stored knowledge:\n");

		for (idx, snippet) in snippets.iter().enumerate() {
			let _ = write!(
				out,
				"{}. Title: {}\n   Content: {}\n   Tags: {}\n",
				idx + 1,
				snippet.title,
				snippet.content,
				if snippet.tags.is_empty() { "none".to_string() } else { snippet.tags.join(", ") },
			);
			out.push_str("---\n");
		}
	}

	out.push('\n');
	out.push_str(INSTRUCTIONS);

	out
}

#[cfg(test)]
mod tests {
	use super::build;
	use crate::KnowledgeSnippet;

	#[test]
	fn renders_query_and_enumerated_items() {
		let rows = vec![
			KnowledgeSnippet::new("Blue folder", "Q3 budget draft", vec!["finance".to_string()]),
			KnowledgeSnippet::new("AI reading list", "papers to read", Vec::new()),
		];
		let prompt = build("blue folder, something about AI", &rows);

		assert!(prompt.contains("User query: \"blue folder, something about AI\""));
		assert!(prompt.contains("1. Title: Blue folder"));
		assert!(prompt.contains("Tags: finance"));
		assert!(prompt.contains("2. Title: AI reading list"));
		assert!(prompt.contains("Tags: none"));
		assert!(prompt.contains("clarifying questions"));
	}

	#[test]
	fn is_deterministic() {
		let rows = vec![KnowledgeSnippet::new("A", "B", vec!["c".to_string()])];

		assert_eq!(build("query", &rows), build("query", &rows));
	}

	#[test]
	fn notes_missing_context_when_no_rows() {
		let prompt = build("anything", &[]);

		assert!(prompt.contains("none retrieved"));
	}
}
