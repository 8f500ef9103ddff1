use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input file not found: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Catalog store error: {message}")]
    Store { message: String },

    #[error("Chunk {chunk} still has {count} unprocessed items after retries")]
    Unprocessed { chunk: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, CatalogError>;
