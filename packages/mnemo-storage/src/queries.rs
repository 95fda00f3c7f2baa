use sqlx::PgPool;
use uuid::Uuid;

use crate::{
	Result,
	models::{
		KnowledgeItem, KnowledgeMatchRow, SearchHistoryRow, SearchQueryRecord, SearchResultRecord,
	},
};

// Every query here carries an owner_id predicate; owner scoping is enforced at
// this layer, not left to the caller.

pub async fn insert_knowledge_item(pool: &PgPool, item: &KnowledgeItem) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO knowledge_items (
	item_id,
	owner_id,
	title,
	content,
	content_type,
	tags,
	created_at,
	updated_at
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
	)
	.bind(item.item_id)
	.bind(item.owner_id.as_str())
	.bind(item.title.as_str())
	.bind(item.content.as_str())
	.bind(item.content_type.as_str())
	.bind(&item.tags)
	.bind(item.created_at)
	.bind(item.updated_at)
	.execute(pool)
	.await?;

	Ok(())
}

pub async fn update_knowledge_item(pool: &PgPool, item: &KnowledgeItem) -> Result<u64> {
	let result = sqlx::query(
		"\
UPDATE knowledge_items
SET
	title = $1,
	content = $2,
	content_type = $3,
	tags = $4,
	updated_at = $5
WHERE item_id = $6 AND owner_id = $7",
	)
	.bind(item.title.as_str())
	.bind(item.content.as_str())
	.bind(item.content_type.as_str())
	.bind(&item.tags)
	.bind(item.updated_at)
	.bind(item.item_id)
	.bind(item.owner_id.as_str())
	.execute(pool)
	.await?;

	Ok(result.rows_affected())
}

pub async fn delete_knowledge_item(pool: &PgPool, owner_id: &str, item_id: Uuid) -> Result<u64> {
	let result = sqlx::query("DELETE FROM knowledge_items WHERE item_id = $1 AND owner_id = $2")
		.bind(item_id)
		.bind(owner_id)
		.execute(pool)
		.await?;

	Ok(result.rows_affected())
}

pub async fn get_knowledge_item(
	pool: &PgPool,
	owner_id: &str,
	item_id: Uuid,
) -> Result<Option<KnowledgeItem>> {
	let item = sqlx::query_as::<_, KnowledgeItem>(
		"SELECT * FROM knowledge_items WHERE item_id = $1 AND owner_id = $2",
	)
	.bind(item_id)
	.bind(owner_id)
	.fetch_optional(pool)
	.await?;

	Ok(item)
}

pub async fn list_knowledge_items(pool: &PgPool, owner_id: &str) -> Result<Vec<KnowledgeItem>> {
	let items = sqlx::query_as::<_, KnowledgeItem>(
		"SELECT * FROM knowledge_items WHERE owner_id = $1 ORDER BY created_at DESC",
	)
	.bind(owner_id)
	.fetch_all(pool)
	.await?;

	Ok(items)
}

/// Owner-scoped full-text lookup. Ranking is the engine's (`ts_rank`); the
/// pipeline applies no relevance tuning of its own.
pub async fn fetch_knowledge_matches(
	pool: &PgPool,
	owner_id: &str,
	query: &str,
	limit: u32,
) -> Result<Vec<KnowledgeMatchRow>> {
	let rows = sqlx::query_as::<_, KnowledgeMatchRow>(
		"\
SELECT title, content, tags, created_at
FROM knowledge_items
WHERE owner_id = $1
	AND to_tsvector('english', title || ' ' || content)
		@@ plainto_tsquery('english', $2)
ORDER BY
	ts_rank(
		to_tsvector('english', title || ' ' || content),
		plainto_tsquery('english', $2)
	) DESC,
	created_at DESC
LIMIT $3",
	)
	.bind(owner_id)
	.bind(query)
	.bind(limit as i64)
	.fetch_all(pool)
	.await?;

	Ok(rows)
}

pub async fn insert_search_query(pool: &PgPool, record: &SearchQueryRecord) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO search_queries (
	query_id,
	owner_id,
	raw_text,
	fragments,
	context,
	created_at
)
VALUES ($1, $2, $3, $4, $5, $6)",
	)
	.bind(record.query_id)
	.bind(record.owner_id.as_str())
	.bind(record.raw_text.as_str())
	.bind(&record.fragments)
	.bind(&record.context)
	.bind(record.created_at)
	.execute(pool)
	.await?;

	Ok(())
}

pub async fn insert_search_result(pool: &PgPool, record: &SearchResultRecord) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO search_results (
	result_id,
	query_id,
	response_text,
	knowledge_matches,
	confidence,
	processing_time_ms,
	created_at
)
VALUES ($1, $2, $3, $4, $5, $6, $7)",
	)
	.bind(record.result_id)
	.bind(record.query_id)
	.bind(record.response_text.as_str())
	.bind(&record.knowledge_matches)
	.bind(record.confidence)
	.bind(record.processing_time_ms)
	.bind(record.created_at)
	.execute(pool)
	.await?;

	Ok(())
}

pub async fn list_search_history(
	pool: &PgPool,
	owner_id: &str,
	limit: u32,
) -> Result<Vec<SearchHistoryRow>> {
	let rows = sqlx::query_as::<_, SearchHistoryRow>(
		"\
SELECT
	q.query_id,
	q.raw_text,
	q.fragments,
	q.created_at,
	r.response_text,
	r.confidence,
	r.processing_time_ms,
	r.created_at AS completed_at
FROM search_queries q
LEFT JOIN search_results r ON r.query_id = q.query_id
WHERE q.owner_id = $1
ORDER BY q.created_at DESC
LIMIT $2",
	)
	.bind(owner_id)
	.bind(limit as i64)
	.fetch_all(pool)
	.await?;

	Ok(rows)
}
