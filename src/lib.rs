//! Card catalog batch pipeline: enrich a raw columnar card dump, then publish
//! the enriched records into a key-value catalog store.

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod types;

pub use error::{CatalogError, Result};
