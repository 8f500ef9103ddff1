use crate::config::CatalogConfig;
use crate::constants;
use crate::error::{CatalogError, Result};
use crate::pipeline::catalog::mapper::CatalogItem;
use async_trait::async_trait;
use std::sync::Arc;

pub mod file;
pub mod in_memory;
#[cfg(feature = "db")]
pub mod libsql_store;

pub use file::JsonFileCatalogStore;
pub use in_memory::InMemoryCatalogStore;
#[cfg(feature = "db")]
pub use libsql_store::LibsqlCatalogStore;

/// Key-value catalog store keyed by `CatalogItem::slug`
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Write one batch of items into `table`, overwriting existing keys.
    ///
    /// Returns the items the store did not process (for example because it
    /// throttled the request); an empty vector means the whole batch landed.
    async fn batch_write(&self, table: &str, items: Vec<CatalogItem>) -> Result<Vec<CatalogItem>>;

    fn name(&self) -> &str;
}

/// Build the store client for a run from config. Created once and shared.
pub async fn open_store(config: &CatalogConfig) -> Result<Arc<dyn CatalogStore>> {
    match config.backend.as_str() {
        constants::BACKEND_FILE => Ok(Arc::new(JsonFileCatalogStore::new(&config.store_dir, &config.region))),
        #[cfg(feature = "db")]
        constants::BACKEND_LIBSQL => Ok(Arc::new(LibsqlCatalogStore::connect(&config.region).await?)),
        #[cfg(not(feature = "db"))]
        constants::BACKEND_LIBSQL => Err(CatalogError::Config(
            "the libsql backend needs the `db` feature".to_string(),
        )),
        other => Err(CatalogError::Config(format!(
            "unknown store backend '{}' (supported: {})",
            other,
            constants::get_supported_backends().join(", ")
        ))),
    }
}
