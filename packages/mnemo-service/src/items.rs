use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use mnemo_storage::{models::KnowledgeItem, queries};

use crate::{Error, MnemoService, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ItemCreateRequest {
	#[serde(rename = "userId")]
	pub user_id: String,
	pub title: String,
	pub content: String,
	#[serde(default)]
	pub content_type: Option<String>,
	#[serde(default)]
	pub tags: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ItemUpdateRequest {
	#[serde(rename = "userId")]
	pub user_id: String,
	pub item_id: Uuid,
	pub title: Option<String>,
	pub content: Option<String>,
	pub content_type: Option<String>,
	pub tags: Option<Vec<String>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ItemGetRequest {
	#[serde(rename = "userId")]
	pub user_id: String,
	pub item_id: Uuid,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ItemListRequest {
	#[serde(rename = "userId")]
	pub user_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ItemDeleteRequest {
	#[serde(rename = "userId")]
	pub user_id: String,
	pub item_id: Uuid,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ItemView {
	pub item_id: Uuid,
	pub title: String,
	pub content: String,
	pub content_type: String,
	pub tags: Vec<String>,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
	#[serde(with = "crate::time_serde")]
	pub updated_at: OffsetDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ItemResponse {
	pub item: ItemView,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ItemListResponse {
	pub items: Vec<ItemView>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ItemDeleteResponse {
	pub item_id: Uuid,
}

impl MnemoService {
	pub async fn create_item(&self, req: ItemCreateRequest) -> Result<ItemResponse> {
		let user_id = crate::require_identity(&req.user_id)?;

		if req.title.trim().is_empty() || req.content.trim().is_empty() {
			return Err(Error::InvalidInput {
				message: "Title and content are required.".to_string(),
			});
		}

		let now = OffsetDateTime::now_utc();
		let item = KnowledgeItem {
			item_id: Uuid::new_v4(),
			owner_id: user_id.to_string(),
			title: req.title.trim().to_string(),
			content: req.content.trim().to_string(),
			content_type: req
				.content_type
				.filter(|value| !value.trim().is_empty())
				.unwrap_or_else(|| "text".to_string()),
			tags: normalize_tags(req.tags),
			created_at: now,
			updated_at: now,
		};

		queries::insert_knowledge_item(&self.db.pool, &item).await?;

		Ok(ItemResponse { item: into_view(item) })
	}

	pub async fn get_item(&self, req: ItemGetRequest) -> Result<ItemResponse> {
		let user_id = crate::require_identity(&req.user_id)?;
		let item = queries::get_knowledge_item(&self.db.pool, user_id, req.item_id)
			.await?
			.ok_or_else(|| item_not_found(req.item_id))?;

		Ok(ItemResponse { item: into_view(item) })
	}

	pub async fn list_items(&self, req: ItemListRequest) -> Result<ItemListResponse> {
		let user_id = crate::require_identity(&req.user_id)?;
		let items = queries::list_knowledge_items(&self.db.pool, user_id).await?;

		Ok(ItemListResponse { items: items.into_iter().map(into_view).collect() })
	}

	pub async fn update_item(&self, req: ItemUpdateRequest) -> Result<ItemResponse> {
		let user_id = crate::require_identity(&req.user_id)?;
		let mut item = queries::get_knowledge_item(&self.db.pool, user_id, req.item_id)
			.await?
			.ok_or_else(|| item_not_found(req.item_id))?;

		if let Some(title) = req.title {
			if title.trim().is_empty() {
				return Err(Error::InvalidInput { message: "Title is empty.".to_string() });
			}

			item.title = title.trim().to_string();
		}
		if let Some(content) = req.content {
			if content.trim().is_empty() {
				return Err(Error::InvalidInput { message: "Content is empty.".to_string() });
			}

			item.content = content.trim().to_string();
		}
		if let Some(content_type) = req.content_type.filter(|value| !value.trim().is_empty()) {
			item.content_type = content_type.trim().to_string();
		}
		if let Some(tags) = req.tags {
			item.tags = normalize_tags(tags);
		}

		item.updated_at = OffsetDateTime::now_utc();

		let affected = queries::update_knowledge_item(&self.db.pool, &item).await?;

		if affected == 0 {
			return Err(item_not_found(req.item_id));
		}

		Ok(ItemResponse { item: into_view(item) })
	}

	pub async fn delete_item(&self, req: ItemDeleteRequest) -> Result<ItemDeleteResponse> {
		let user_id = crate::require_identity(&req.user_id)?;
		let affected = queries::delete_knowledge_item(&self.db.pool, user_id, req.item_id).await?;

		if affected == 0 {
			return Err(item_not_found(req.item_id));
		}

		Ok(ItemDeleteResponse { item_id: req.item_id })
	}
}

fn item_not_found(item_id: Uuid) -> Error {
	Error::NotFound { message: format!("No knowledge item {item_id} for this user.") }
}

// Tags behave as a set: trimmed, deduplicated, original order kept.
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
	let mut out: Vec<String> = Vec::with_capacity(tags.len());

	for tag in tags {
		let trimmed = tag.trim();

		if trimmed.is_empty() {
			continue;
		}
		if out.iter().any(|existing| existing == trimmed) {
			continue;
		}

		out.push(trimmed.to_string());
	}

	out
}

fn into_view(item: KnowledgeItem) -> ItemView {
	ItemView {
		item_id: item.item_id,
		title: item.title,
		content: item.content,
		content_type: item.content_type,
		tags: item.tags,
		created_at: item.created_at,
		updated_at: item.updated_at,
	}
}

#[cfg(test)]
mod tests {
	use super::normalize_tags;

	#[test]
	fn tags_are_trimmed_and_deduplicated_in_order() {
		let tags = vec![
			" work ".to_string(),
			"finance".to_string(),
			"work".to_string(),
			"  ".to_string(),
		];

		assert_eq!(normalize_tags(tags), vec!["work".to_string(), "finance".to_string()]);
	}
}
