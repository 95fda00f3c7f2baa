pub mod history;
pub mod items;
pub mod search;
pub mod time_serde;

mod error;

pub use error::{Error, Result};
pub use history::{HistoryEntry, HistoryRequest, HistoryResponse};
pub use items::{
	ItemCreateRequest, ItemDeleteRequest, ItemDeleteResponse, ItemGetRequest, ItemListRequest,
	ItemListResponse, ItemResponse, ItemUpdateRequest, ItemView,
};
pub use search::{KnowledgeMatch, SearchRequest, SearchResponse};

use std::{future::Future, pin::Pin, sync::Arc};

use mnemo_config::{Config, GenerationProviderConfig};
use mnemo_providers::generation;
use mnemo_storage::db::Db;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Seam for the external text-generation service, so tests can substitute a
/// double without an HTTP endpoint.
pub trait GenerationProvider
where
	Self: Send + Sync,
{
	fn generate<'a>(
		&'a self,
		cfg: &'a GenerationProviderConfig,
		prompt: &'a str,
	) -> BoxFuture<'a, mnemo_providers::Result<String>>;
}

#[derive(Clone)]
pub struct Providers {
	pub generation: Arc<dyn GenerationProvider>,
}

struct DefaultProviders;

impl GenerationProvider for DefaultProviders {
	fn generate<'a>(
		&'a self,
		cfg: &'a GenerationProviderConfig,
		prompt: &'a str,
	) -> BoxFuture<'a, mnemo_providers::Result<String>> {
		Box::pin(generation::generate(cfg, prompt))
	}
}

impl Providers {
	pub fn new(generation: Arc<dyn GenerationProvider>) -> Self {
		Self { generation }
	}
}

impl Default for Providers {
	fn default() -> Self {
		Self { generation: Arc::new(DefaultProviders) }
	}
}

pub struct MnemoService {
	pub cfg: Config,
	pub db: Db,
	pub providers: Providers,
}

impl MnemoService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, db, providers: Providers::default() }
	}

	pub fn with_providers(cfg: Config, db: Db, providers: Providers) -> Self {
		Self { cfg, db, providers }
	}
}

pub(crate) fn require_identity(user_id: &str) -> Result<&str> {
	let trimmed = user_id.trim();

	if trimmed.is_empty() {
		return Err(Error::Unauthenticated { message: "Caller identity is missing.".to_string() });
	}

	Ok(trimmed)
}
