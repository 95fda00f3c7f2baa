pub mod confidence;
pub mod fragments;
pub mod prompt;

/// One retrieved knowledge row, reduced to the fields the pipeline reads.
/// The scorer looks at title and content; the prompt builder also renders tags.
#[derive(Clone, Debug, PartialEq)]
pub struct KnowledgeSnippet {
	pub title: String,
	pub content: String,
	pub tags: Vec<String>,
}

impl KnowledgeSnippet {
	pub fn new(
		title: impl Into<String>,
		content: impl Into<String>,
		tags: Vec<String>,
	) -> Self {
		Self { title: title.into(), content: content.into(), tags }
	}
}
