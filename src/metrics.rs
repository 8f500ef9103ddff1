use std::net::SocketAddr;
use tracing::{info, warn};

/// Installs the Prometheus exporter when `CATALOG_METRICS_PORT` is set.
pub fn init_metrics() {
    let port: u16 = match std::env::var("CATALOG_METRICS_PORT").ok().and_then(|s| s.parse().ok()) {
        Some(p) => p,
        None => return,
    };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => info!("Prometheus exporter listening on http://{}/metrics", addr),
        Err(e) => warn!("Prometheus exporter install failed: {}", e),
    }
}

pub mod names {
    pub const CARDS_ENRICHED: &str = "catalog_cards_enriched_total";
    pub const ITEMS_WRITTEN: &str = "catalog_items_written_total";
    pub const BATCH_RETRIES: &str = "catalog_batch_retries_total";
    pub const UNPROCESSED_ITEMS: &str = "catalog_unprocessed_items_total";
    pub const CHUNK_DURATION: &str = "catalog_chunk_write_duration_seconds";
    pub const IMAGES_DOWNLOADED: &str = "catalog_images_downloaded_total";
    pub const IMAGES_FAILED: &str = "catalog_images_failed_total";
}
