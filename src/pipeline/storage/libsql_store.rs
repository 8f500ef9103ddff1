use super::CatalogStore;
use crate::error::{CatalogError, Result};
use crate::pipeline::catalog::mapper::CatalogItem;
use async_trait::async_trait;
use libsql::{Builder, Connection, Database};
use std::collections::HashSet;
use std::env;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Catalog store on Turso/libSQL. Each table holds `(slug, data, region,
/// last_indexed_at)` rows and writes are `INSERT OR REPLACE` upserts.
/// Each table is created at most once per store.
pub struct LibsqlCatalogStore {
    db: Database,
    region: String,
    ready_tables: Mutex<HashSet<String>>,
}

impl LibsqlCatalogStore {
    /// Connect using `LIBSQL_URL` and `LIBSQL_AUTH_TOKEN`.
    pub async fn connect(region: &str) -> Result<Self> {
        let url = env::var("LIBSQL_URL").map_err(|_| CatalogError::Config(
            "LIBSQL_URL environment variable not set".to_string(),
        ))?;
        let auth_token = env::var("LIBSQL_AUTH_TOKEN").map_err(|_| CatalogError::Config(
            "LIBSQL_AUTH_TOKEN environment variable not set".to_string(),
        ))?;

        info!("Connecting to libSQL catalog at {} (region {})", url, region);

        let db = Builder::new_remote(url, auth_token)
            .build()
            .await
            .map_err(|e| CatalogError::Store {
                message: format!("Failed to connect to database: {e}"),
            })?;

        Ok(Self::from_database(db, region))
    }

    pub fn from_database(db: Database, region: &str) -> Self {
        Self {
            db,
            region: region.to_string(),
            ready_tables: Mutex::new(HashSet::new()),
        }
    }

    fn connection(&self) -> Result<Connection> {
        self.db.connect().map_err(|e| CatalogError::Store {
            message: format!("Failed to get database connection: {e}"),
        })
    }

    pub async fn ensure_table(&self, table: &str) -> Result<()> {
        let mut ready = self.ready_tables.lock().await;
        if ready.contains(table) {
            return Ok(());
        }

        let conn = self.connection()?;
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (slug TEXT PRIMARY KEY, data TEXT NOT NULL, region TEXT NOT NULL, last_indexed_at TEXT NOT NULL)",
            quote_ident(table)
        );
        conn.execute(&sql, ())
            .await
            .map_err(|e| CatalogError::Store {
                message: format!("Failed to create table {table}: {e}"),
            })?;
        debug!("Catalog table {} ready", table);
        ready.insert(table.to_string());
        Ok(())
    }

    pub async fn is_table_ready(&self, table: &str) -> bool {
        self.ready_tables.lock().await.contains(table)
    }
}

#[async_trait]
impl CatalogStore for LibsqlCatalogStore {
    async fn batch_write(&self, table: &str, items: Vec<CatalogItem>) -> Result<Vec<CatalogItem>> {
        self.ensure_table(table).await?;
        let conn = self.connection()?;
        let sql = format!(
            "INSERT OR REPLACE INTO {} (slug, data, region, last_indexed_at) VALUES (?, ?, ?, ?)",
            quote_ident(table)
        );

        let mut unprocessed = Vec::new();
        for item in items {
            let data = serde_json::to_string(&item)?;
            let result = conn
                .execute(
                    &sql,
                    libsql::params![
                        item.slug.clone(),
                        data,
                        self.region.clone(),
                        item.last_indexed_at.to_rfc3339()
                    ],
                )
                .await;
            if let Err(e) = result {
                warn!("Upsert of {} failed, leaving it unprocessed: {}", item.slug, e);
                unprocessed.push(item);
            }
        }
        Ok(unprocessed)
    }

    fn name(&self) -> &str {
        "libsql"
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::catalog::mapper::tests::sample_item;
    use tempfile::tempdir;

    async fn count_rows(store: &LibsqlCatalogStore, table: &str) -> i64 {
        let conn = store.connection().unwrap();
        let mut rows = conn
            .query(&format!("SELECT COUNT(*) FROM {}", quote_ident(table)), ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        row.get::<i64>(0).unwrap()
    }

    #[tokio::test]
    async fn test_table_created_once_and_rows_upserted() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("catalog.db");
        let db = Builder::new_local(path.to_str().unwrap()).build().await.unwrap();
        let store = LibsqlCatalogStore::from_database(db, "eu-west-1");

        assert!(!store.is_table_ready("cards").await);
        let left = store.batch_write("cards", vec![sample_item("a")]).await.unwrap();
        assert!(left.is_empty());
        assert!(store.is_table_ready("cards").await);

        // dropping the table behind the store's back shows the DDL is not rerun
        store
            .connection()
            .unwrap()
            .execute("DROP TABLE \"cards\"", ())
            .await
            .unwrap();
        let left = store
            .batch_write("cards", vec![sample_item("b")])
            .await
            .unwrap();
        assert_eq!(left.len(), 1);

        store.ready_tables.lock().await.clear();
        store.batch_write("cards", vec![sample_item("a"), sample_item("a")]).await.unwrap();
        assert_eq!(count_rows(&store, "cards").await, 1);
    }
}
