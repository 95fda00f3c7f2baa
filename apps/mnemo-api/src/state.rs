use std::sync::Arc;

use mnemo_service::MnemoService;
use mnemo_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<MnemoService>,
}
impl AppState {
	pub async fn new(config: mnemo_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		let service = MnemoService::new(config, db);

		Ok(Self { service: Arc::new(service) })
	}
}
