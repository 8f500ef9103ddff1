use crate::constants;
use crate::error::{CatalogError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub images: ImagesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub raw: PathBuf,
    pub dataset: PathBuf,
    pub manifest: PathBuf,
    pub asset_root: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            raw: PathBuf::from(constants::DEFAULT_RAW_PATH),
            dataset: PathBuf::from(constants::DEFAULT_DATASET_PATH),
            manifest: PathBuf::from(constants::DEFAULT_MANIFEST_PATH),
            asset_root: PathBuf::from(constants::DEFAULT_ASSET_ROOT),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub table: Option<String>,
    pub region: String,
    pub backend: String,
    pub store_dir: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            table: None,
            region: constants::DEFAULT_REGION.to_string(),
            backend: constants::BACKEND_FILE.to_string(),
            store_dir: PathBuf::from(constants::DEFAULT_STORE_DIR),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    pub delay_ms: u64,
    pub timeout_seconds: u64,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self { delay_ms: 250, timeout_seconds: 30 }
    }
}

impl Config {
    /// Load `catalog.toml` (if present) and apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::from_file(Path::new(constants::DEFAULT_CONFIG_PATH))?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Missing files yield the defaults; unreadable or invalid ones are errors.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            CatalogError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(v) = get("CATALOG_TABLE") {
            self.catalog.table = Some(v);
        }
        if let Some(v) = get("CATALOG_REGION") {
            self.catalog.region = v;
        }
        if let Some(v) = get("CATALOG_STORE_BACKEND") {
            self.catalog.backend = v;
        }
        if let Some(v) = get("CATALOG_STORE_DIR") {
            self.catalog.store_dir = PathBuf::from(v);
        }
        if let Some(v) = get("CATALOG_RAW_PATH") {
            self.paths.raw = PathBuf::from(v);
        }
        if let Some(v) = get("CATALOG_DATASET_PATH") {
            self.paths.dataset = PathBuf::from(v);
        }
        if let Some(v) = get("CATALOG_MANIFEST_PATH") {
            self.paths.manifest = PathBuf::from(v);
        }
        if let Some(v) = get("CATALOG_ASSET_ROOT") {
            self.paths.asset_root = PathBuf::from(v);
        }
    }

    /// The catalog table is the one setting the publisher cannot run without.
    pub fn require_table(&self) -> Result<&str> {
        self.catalog
            .table
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| CatalogError::Config("CATALOG_TABLE is not set".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_file_missing() {
        let config = Config::from_file(Path::new("does/not/exist.toml")).unwrap();
        assert_eq!(config.paths.raw, PathBuf::from(constants::DEFAULT_RAW_PATH));
        assert_eq!(config.catalog.region, "local");
        assert!(config.catalog.table.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("CATALOG_TABLE", " cards "),
            ("CATALOG_REGION", "us-west-2"),
            ("CATALOG_DATASET_PATH", "out/enriched.json"),
            ("CATALOG_STORE_DIR", ""),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.require_table().unwrap(), "cards");
        assert_eq!(config.catalog.region, "us-west-2");
        assert_eq!(config.paths.dataset, PathBuf::from("out/enriched.json"));
        // blank values leave the default in place
        assert_eq!(config.catalog.store_dir, PathBuf::from(constants::DEFAULT_STORE_DIR));
    }

    #[test]
    fn test_missing_table_is_config_error() {
        let mut config = Config::default();
        assert!(matches!(config.require_table(), Err(CatalogError::Config(_))));
        config.catalog.table = Some("   ".to_string());
        assert!(config.require_table().is_err());
    }

    #[test]
    fn test_toml_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        fs::write(
            &path,
            "[catalog]\ntable = \"riftbound-cards\"\nbackend = \"libsql\"\n\n[images]\ndelay_ms = 0\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.catalog.table.as_deref(), Some("riftbound-cards"));
        assert_eq!(config.catalog.backend, "libsql");
        assert_eq!(config.images.delay_ms, 0);
        assert_eq!(config.images.timeout_seconds, 30);
    }
}
