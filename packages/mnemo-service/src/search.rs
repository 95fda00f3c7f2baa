use std::time::Instant;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use mnemo_domain::{KnowledgeSnippet, confidence, fragments, prompt};
use mnemo_storage::{
	models::{KnowledgeMatchRow, SearchQueryRecord, SearchResultRecord},
	queries,
};

use crate::{Error, MnemoService, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchRequest {
	#[serde(rename = "userId")]
	pub user_id: String,
	pub query: String,
	/// Optional caller-supplied context recorded with the query row.
	#[serde(default)]
	pub context: serde_json::Map<String, serde_json::Value>,
}

/// Snapshot of one retrieved knowledge item, as returned to the caller and as
/// persisted inside the result row.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KnowledgeMatch {
	pub title: String,
	pub content: String,
	pub tags: Vec<String>,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchResponse {
	#[serde(rename = "queryId")]
	pub query_id: Uuid,
	pub response: String,
	#[serde(rename = "knowledgeMatches")]
	pub knowledge_matches: Vec<KnowledgeMatch>,
	pub confidence: f32,
	#[serde(rename = "processingTime")]
	pub processing_time_ms: i64,
	/// Degraded-path notices (failed retrieval, lost result write). The answer
	/// is still valid when these are present.
	pub warnings: Vec<String>,
}

impl MnemoService {
	/// Runs one query through the whole pipeline: persist the query, retrieve
	/// knowledge, score, build the prompt, invoke the model, persist the
	/// result. Query persistence and the model call are fatal; retrieval and
	/// result persistence degrade into warnings.
	pub async fn search(&self, req: SearchRequest) -> Result<SearchResponse> {
		let user_id = crate::require_identity(&req.user_id)?;
		let raw_text = req.query.trim();

		if raw_text.is_empty() {
			return Err(Error::InvalidInput { message: "Query is empty.".to_string() });
		}

		let started = Instant::now();
		let now = OffsetDateTime::now_utc();
		let query_id = Uuid::new_v4();
		let query_record = SearchQueryRecord {
			query_id,
			owner_id: user_id.to_string(),
			raw_text: raw_text.to_string(),
			fragments: fragments::extract(raw_text),
			context: serde_json::Value::Object(req.context),
			created_at: now,
		};

		queries::insert_search_query(&self.db.pool, &query_record).await?;

		let mut warnings = Vec::new();
		let match_rows = match queries::fetch_knowledge_matches(
			&self.db.pool,
			user_id,
			raw_text,
			self.cfg.search.max_matches,
		)
		.await
		{
			Ok(rows) => rows,
			Err(err) => {
				// Clarifying questions are a valid answer when no knowledge
				// exists, so a broken lookup degrades to zero matches.
				tracing::warn!(error = %err, %query_id, "Knowledge retrieval failed.");
				warnings
					.push("Knowledge retrieval failed; answering without stored context."
						.to_string());

				Vec::new()
			},
		};
		let snippets: Vec<KnowledgeSnippet> = match_rows
			.iter()
			.map(|row| KnowledgeSnippet::new(&row.title, &row.content, row.tags.clone()))
			.collect();
		let confidence = confidence::score(raw_text, &snippets);
		let instruction = prompt::build(raw_text, &snippets);
		let response_text = self
			.providers
			.generation
			.generate(&self.cfg.providers.generation, &instruction)
			.await
			.map_err(|err| Error::ModelUnavailable { message: err.to_string() })?;
		let knowledge_matches: Vec<KnowledgeMatch> =
			match_rows.into_iter().map(into_knowledge_match).collect();
		let processing_time_ms = started.elapsed().as_millis() as i64;

		if let Err(err) = self
			.persist_result(
				query_id,
				&response_text,
				&knowledge_matches,
				confidence,
				processing_time_ms,
			)
			.await
		{
			// Deliberate asymmetry: the user still gets the computed answer
			// even when its durable record is lost.
			tracing::error!(error = %err, %query_id, "Failed to persist search result.");
			warnings.push("Search result could not be recorded in history.".to_string());
		}

		Ok(SearchResponse {
			query_id,
			response: response_text,
			knowledge_matches,
			confidence,
			processing_time_ms,
			warnings,
		})
	}

	async fn persist_result(
		&self,
		query_id: Uuid,
		response_text: &str,
		knowledge_matches: &[KnowledgeMatch],
		confidence: f32,
		processing_time_ms: i64,
	) -> Result<()> {
		let snapshots = serde_json::to_value(knowledge_matches).map_err(|err| Error::Storage {
			message: format!("Failed to encode knowledge match snapshots: {err}"),
		})?;
		let record = SearchResultRecord {
			result_id: Uuid::new_v4(),
			query_id,
			response_text: response_text.to_string(),
			knowledge_matches: snapshots,
			confidence,
			processing_time_ms,
			created_at: OffsetDateTime::now_utc(),
		};

		queries::insert_search_result(&self.db.pool, &record).await?;

		Ok(())
	}
}

fn into_knowledge_match(row: KnowledgeMatchRow) -> KnowledgeMatch {
	KnowledgeMatch {
		title: row.title,
		content: row.content,
		tags: row.tags,
		created_at: row.created_at,
	}
}
