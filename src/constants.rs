/// Default file locations, relative to the working directory
pub const DEFAULT_RAW_PATH: &str = "data/cards.raw.json";
pub const DEFAULT_DATASET_PATH: &str = "data/cards.enriched.json";
pub const DEFAULT_MANIFEST_PATH: &str = "data/card-images.json";
pub const DEFAULT_STORE_DIR: &str = "data/catalog";
pub const DEFAULT_ASSET_ROOT: &str = ".";
pub const DEFAULT_CONFIG_PATH: &str = "catalog.toml";

/// Relative directory every card image lives under
pub const IMAGE_ASSET_DIR: &str = "assets/cards";
pub const IMAGE_ASSET_EXT: &str = "webp";

pub const PRICE_CURRENCY: &str = "USD";
/// Provenance tag stamped on every enriched record
pub const PROVENANCE_SOURCE: &str = "card-dump";

pub const DEFAULT_REGION: &str = "local";

// Store batch limits
pub const CHUNK_SIZE: usize = 25;
pub const MAX_RETRY_ATTEMPTS: u32 = 5;
pub const RETRY_BASE_DELAY_MS: u64 = 500;

// Store backends selectable from config
pub const BACKEND_FILE: &str = "file";
pub const BACKEND_LIBSQL: &str = "libsql";

/// All store backends understood by the CLI
pub fn get_supported_backends() -> Vec<&'static str> {
    vec![BACKEND_FILE, BACKEND_LIBSQL]
}
