// Batch pipeline: enrichment, catalog publishing, store adapters and image fetching

pub mod catalog;
pub mod images;
pub mod processing;
pub mod storage;
pub mod transformer;
pub mod validate;

pub use catalog::publisher::{CatalogPublisher, PublishReport, RetryPolicy};
pub use transformer::{TransformSummary, Transformer};
