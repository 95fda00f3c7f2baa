use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use mnemo_storage::queries;

use crate::{MnemoService, Result};

const DEFAULT_HISTORY_LIMIT: u32 = 20;
const MAX_HISTORY_LIMIT: u32 = 100;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryRequest {
	#[serde(rename = "userId")]
	pub user_id: String,
	pub limit: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryEntry {
	#[serde(rename = "queryId")]
	pub query_id: Uuid,
	pub raw_text: String,
	pub fragments: Vec<String>,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
	/// Absent when the result write was lost; the query row alone records
	/// that the attempt happened.
	pub response_text: Option<String>,
	pub confidence: Option<f32>,
	pub processing_time_ms: Option<i64>,
	#[serde(with = "crate::time_serde::option")]
	pub completed_at: Option<OffsetDateTime>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
	pub entries: Vec<HistoryEntry>,
}

impl MnemoService {
	pub async fn search_history(&self, req: HistoryRequest) -> Result<HistoryResponse> {
		let user_id = crate::require_identity(&req.user_id)?;
		let limit = req.limit.unwrap_or(DEFAULT_HISTORY_LIMIT).clamp(1, MAX_HISTORY_LIMIT);
		let rows = queries::list_search_history(&self.db.pool, user_id, limit).await?;
		let entries = rows
			.into_iter()
			.map(|row| HistoryEntry {
				query_id: row.query_id,
				raw_text: row.raw_text,
				fragments: row.fragments,
				created_at: row.created_at,
				response_text: row.response_text,
				confidence: row.confidence,
				processing_time_ms: row.processing_time_ms,
				completed_at: row.completed_at,
			})
			.collect();

		Ok(HistoryResponse { entries })
	}
}
