// Catalog publishing: record-to-item mapping and the chunked, retrying writer

pub mod mapper;
pub mod publisher;

pub use mapper::{CatalogItem, CatalogMapper};
