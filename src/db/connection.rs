use std::sync::Arc;

use crate::db::json_store::JsonStore;
use crate::utils::config::AppConfig;
use crate::utils::error::{AppError, AppResult};

pub async fn init_store(config: &AppConfig) -> AppResult<Arc<JsonStore>> {
    let store = JsonStore::open(&config.db_path, config.lock_timeout)
        .await
        .map_err(|e| {
            let path = config.db_path.display();
            AppError::StorageError(format!("Failed to open store {}: {}", path, e))
        })?;

    tracing::info!(path = %store.path().display(), "store ready");

    Ok(Arc::new(store))
}
