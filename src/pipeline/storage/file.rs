use super::CatalogStore;
use crate::error::Result;
use crate::pipeline::catalog::mapper::CatalogItem;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

/// Catalog store backed by one JSON object per table:
/// `<root>/<region>/<table>.json`, keyed by slug.
pub struct JsonFileCatalogStore {
    dir: PathBuf,
    // serializes read-modify-write of table files
    write_lock: Mutex<()>,
}

impl JsonFileCatalogStore {
    pub fn new(root: impl AsRef<Path>, region: &str) -> Self {
        Self {
            dir: root.as_ref().join(region),
            write_lock: Mutex::new(()),
        }
    }

    pub fn table_path(&self, table: &str) -> PathBuf {
        self.dir.join(format!("{}.json", table))
    }

    pub async fn load_table(&self, table: &str) -> Result<BTreeMap<String, CatalogItem>> {
        let path = self.table_path(table);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl CatalogStore for JsonFileCatalogStore {
    async fn batch_write(&self, table: &str, items: Vec<CatalogItem>) -> Result<Vec<CatalogItem>> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.load_table(table).await?;
        let count = items.len();
        for item in items {
            entries.insert(item.slug.clone(), item);
        }

        tokio::fs::create_dir_all(&self.dir).await?;
        // write then rename so a crash never leaves a half-written table
        let path = self.table_path(table);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(&entries)?).await?;
        tokio::fs::rename(&tmp, &path).await?;

        debug!("Wrote {} items to {}", count, path.display());
        Ok(Vec::new())
    }

    fn name(&self) -> &str {
        "json-file"
    }
}
