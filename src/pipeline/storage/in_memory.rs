use super::CatalogStore;
use crate::error::{CatalogError, Result};
use crate::pipeline::catalog::mapper::CatalogItem;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// In-memory catalog store for development/testing
#[derive(Clone, Default)]
pub struct InMemoryCatalogStore {
    tables: Arc<Mutex<HashMap<String, HashMap<String, CatalogItem>>>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, table: &str, slug: &str) -> Option<CatalogItem> {
        let tables = self.tables.lock().ok()?;
        tables.get(table).and_then(|t| t.get(slug)).cloned()
    }

    pub fn len(&self, table: &str) -> usize {
        self.tables
            .lock()
            .map(|tables| tables.get(table).map_or(0, HashMap::len))
            .unwrap_or(0)
    }

    pub fn is_empty(&self, table: &str) -> bool {
        self.len(table) == 0
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn batch_write(&self, table: &str, items: Vec<CatalogItem>) -> Result<Vec<CatalogItem>> {
        let mut tables = self.tables.lock().map_err(|_| CatalogError::Store {
            message: "in-memory store lock poisoned".to_string(),
        })?;
        let entries = tables.entry(table.to_string()).or_default();
        let count = items.len();
        for item in items {
            entries.insert(item.slug.clone(), item);
        }
        debug!("Wrote {} items to in-memory table {}", count, table);
        Ok(Vec::new())
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}
