use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct KnowledgeItem {
	pub item_id: Uuid,
	pub owner_id: String,
	pub title: String,
	pub content: String,
	pub content_type: String,
	pub tags: Vec<String>,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

/// Lightweight projection returned by the full-text lookup; the pipeline never
/// needs the full row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct KnowledgeMatchRow {
	pub title: String,
	pub content: String,
	pub tags: Vec<String>,
	pub created_at: OffsetDateTime,
}

/// One row per search submission. Immutable once written.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SearchQueryRecord {
	pub query_id: Uuid,
	pub owner_id: String,
	pub raw_text: String,
	pub fragments: Vec<String>,
	pub context: Value,
	pub created_at: OffsetDateTime,
}

/// Written once, immediately after the query completes; never mutated.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SearchResultRecord {
	pub result_id: Uuid,
	pub query_id: Uuid,
	pub response_text: String,
	pub knowledge_matches: Value,
	pub confidence: f32,
	pub processing_time_ms: i64,
	pub created_at: OffsetDateTime,
}

/// A past query joined with its result, when one was durably recorded.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SearchHistoryRow {
	pub query_id: Uuid,
	pub raw_text: String,
	pub fragments: Vec<String>,
	pub created_at: OffsetDateTime,
	pub response_text: Option<String>,
	pub confidence: Option<f32>,
	pub processing_time_ms: Option<i64>,
	pub completed_at: Option<OffsetDateTime>,
}
