use mnemo_domain::{KnowledgeSnippet, confidence, fragments, prompt};

#[test]
fn single_phrase_queries_yield_one_fragment() {
	for query in ["notes", "  Meeting Notes ", "that PDF about rust"] {
		let extracted = fragments::extract(query);

		assert_eq!(extracted.len(), 1, "query {query:?}");
		assert_eq!(extracted[0], query.trim().to_lowercase());
	}
}

#[test]
fn separator_queries_preserve_piece_order() {
	let extracted = fragments::extract("Red Notebook; coffee shop, LAST month");

	assert_eq!(
		extracted,
		vec!["red notebook".to_string(), "coffee shop".to_string(), "last month".to_string()]
	);
}

#[test]
fn confidence_is_bounded_with_matches_and_fixed_without() {
	let rows = vec![
		KnowledgeSnippet::new("Travel plans", "flight to Lisbon in May", Vec::new()),
		KnowledgeSnippet::new("Packing list", "passport charger shoes", Vec::new()),
	];

	for query in ["lisbon flight", "zebra xylophone", "passport to lisbon may"] {
		let value = confidence::score(query, &rows);

		assert!(
			(confidence::MIN_CONFIDENCE..=confidence::MAX_CONFIDENCE).contains(&value),
			"query {query:?} scored {value}"
		);
	}

	assert_eq!(confidence::score("anything", &[]), confidence::NO_MATCH_CONFIDENCE);
}

#[test]
fn marketing_presentation_scenario_scores_ceiling() {
	let rows = vec![KnowledgeSnippet::new(
		"Q3 Marketing Deck",
		"presentation about marketing strategy",
		Vec::new(),
	)];

	assert_eq!(confidence::score("marketing presentation", &rows), 0.95);
}

#[test]
fn prompt_embeds_every_retrieved_row() {
	let rows = vec![
		KnowledgeSnippet::new("One", "first", Vec::new()),
		KnowledgeSnippet::new("Two", "second", Vec::new()),
		KnowledgeSnippet::new("Three", "third", Vec::new()),
	];
	let rendered = prompt::build("one of three", &rows);

	for row in &rows {
		assert!(rendered.contains(&row.title));
		assert!(rendered.contains(&row.content));
	}
}
