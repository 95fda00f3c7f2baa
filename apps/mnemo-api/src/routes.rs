use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mnemo_service::{
	Error as ServiceError, HistoryRequest, HistoryResponse, ItemCreateRequest, ItemDeleteRequest,
	ItemDeleteResponse, ItemGetRequest, ItemListRequest, ItemListResponse, ItemResponse,
	ItemUpdateRequest, SearchRequest, SearchResponse,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/search", post(search))
		.route("/v1/items", post(create_item).get(list_items))
		.route("/v1/items/{id}", get(get_item).put(update_item).delete(delete_item))
		.route("/v1/history", get(history))
		.with_state(state)
}

#[derive(Debug, Deserialize)]
struct OwnerQuery {
	#[serde(rename = "userId")]
	user_id: String,
}

#[derive(Debug, Deserialize)]
struct HistoryQuery {
	#[serde(rename = "userId")]
	user_id: String,
	limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ItemUpdateBody {
	#[serde(rename = "userId")]
	user_id: String,
	title: Option<String>,
	content: Option<String>,
	content_type: Option<String>,
	tags: Option<Vec<String>>,
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn search(
	State(state): State<AppState>,
	Json(payload): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
	let response = state.service.search(payload).await?;
	Ok(Json(response))
}

async fn create_item(
	State(state): State<AppState>,
	Json(payload): Json<ItemCreateRequest>,
) -> Result<Json<ItemResponse>, ApiError> {
	let response = state.service.create_item(payload).await?;
	Ok(Json(response))
}

async fn list_items(
	State(state): State<AppState>,
	Query(query): Query<OwnerQuery>,
) -> Result<Json<ItemListResponse>, ApiError> {
	let response = state.service.list_items(ItemListRequest { user_id: query.user_id }).await?;
	Ok(Json(response))
}

async fn get_item(
	State(state): State<AppState>,
	Path(item_id): Path<Uuid>,
	Query(query): Query<OwnerQuery>,
) -> Result<Json<ItemResponse>, ApiError> {
	let response =
		state.service.get_item(ItemGetRequest { user_id: query.user_id, item_id }).await?;
	Ok(Json(response))
}

async fn update_item(
	State(state): State<AppState>,
	Path(item_id): Path<Uuid>,
	Json(payload): Json<ItemUpdateBody>,
) -> Result<Json<ItemResponse>, ApiError> {
	let request = ItemUpdateRequest {
		user_id: payload.user_id,
		item_id,
		title: payload.title,
		content: payload.content,
		content_type: payload.content_type,
		tags: payload.tags,
	};
	let response = state.service.update_item(request).await?;
	Ok(Json(response))
}

async fn delete_item(
	State(state): State<AppState>,
	Path(item_id): Path<Uuid>,
	Query(query): Query<OwnerQuery>,
) -> Result<Json<ItemDeleteResponse>, ApiError> {
	let response =
		state.service.delete_item(ItemDeleteRequest { user_id: query.user_id, item_id }).await?;
	Ok(Json(response))
}

async fn history(
	State(state): State<AppState>,
	Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
	let request = HistoryRequest { user_id: query.user_id, limit: query.limit };
	let response = state.service.search_history(request).await?;
	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}

impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidInput { message } =>
				Self::new(StatusCode::BAD_REQUEST, "invalid_input", message),
			ServiceError::Unauthenticated { message } =>
				Self::new(StatusCode::UNAUTHORIZED, "unauthenticated", message),
			ServiceError::NotFound { message } =>
				Self::new(StatusCode::NOT_FOUND, "not_found", message),
			// Internal details go to the log, never to the caller.
			ServiceError::Storage { message } => {
				tracing::error!(error = %message, "Storage failure.");

				Self::new(
					StatusCode::INTERNAL_SERVER_ERROR,
					"storage_error",
					"Search failed. Please try again.",
				)
			},
			ServiceError::ModelUnavailable { message } => {
				tracing::error!(error = %message, "Generation provider failure.");

				Self::new(
					StatusCode::BAD_GATEWAY,
					"model_unavailable",
					"Search failed. Please try again.",
				)
			},
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };
		(self.status, Json(body)).into_response()
	}
}
