use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use metrics::{counter, histogram};
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use super::mapper::{CatalogItem, CatalogMapper};
use crate::constants;
use crate::error::{CatalogError, Result};
use crate::metrics::names;
use crate::pipeline::storage::CatalogStore;
use crate::pipeline::transformer::read_dataset;
use crate::types::EnrichedCardRecord;

/// Bounded resubmission of unprocessed items with linear backoff
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Resubmissions allowed per chunk after the first write
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: constants::MAX_RETRY_ATTEMPTS,
            base_delay: Duration::from_millis(constants::RETRY_BASE_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    /// Delay before resubmission `attempt` (1-based): `attempt × base_delay`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

/// Outcome of a complete publish run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublishReport {
    pub total_items: usize,
    pub chunks: usize,
    pub retries: u32,
    pub uploaded: usize,
}

/// Split items into consecutive chunks of at most `size`, preserving order.
pub fn partition_chunks<T>(items: Vec<T>, size: usize) -> Vec<Vec<T>> {
    let size = size.max(1);
    let mut chunks = Vec::with_capacity(items.len().div_ceil(size));
    let mut iter = items.into_iter().peekable();
    while iter.peek().is_some() {
        chunks.push(iter.by_ref().take(size).collect());
    }
    chunks
}

/// Pushes enriched records into the catalog store chunk by chunk.
///
/// One store client is shared across every chunk of a run. Chunks are written
/// sequentially; a chunk that still has unprocessed items after the retry
/// budget aborts the run, while chunks written before it stay committed.
pub struct CatalogPublisher {
    store: Arc<dyn CatalogStore>,
    table: String,
    chunk_size: usize,
    retry: RetryPolicy,
}

impl CatalogPublisher {
    pub fn new(store: Arc<dyn CatalogStore>, table: impl Into<String>) -> Self {
        Self {
            store,
            table: table.into(),
            chunk_size: constants::CHUNK_SIZE,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Load the enriched dataset from disk and publish every card.
    pub async fn publish_dataset(&self, dataset_path: &Path) -> Result<PublishReport> {
        let dataset = read_dataset(dataset_path)?;
        info!(
            "Loaded {} cards generated at {} from {}",
            dataset.cards.len(),
            dataset.generated_at.to_rfc3339(),
            dataset_path.display()
        );
        self.publish(&dataset.cards).await
    }

    #[instrument(skip(self, records), fields(table = %self.table, store = %self.store.name()))]
    pub async fn publish(&self, records: &[EnrichedCardRecord]) -> Result<PublishReport> {
        warn_duplicate_slugs(records);

        let items = CatalogMapper::map_all(records)?;
        let total = items.len();
        let chunks = partition_chunks(items, self.chunk_size);
        let chunk_count = chunks.len();
        info!("Publishing {} cards to {} in {} chunks", total, self.table, chunk_count);

        let mut uploaded = 0;
        let mut retries = 0;
        for (index, chunk) in chunks.into_iter().enumerate() {
            let size = chunk.len();
            let started = Instant::now();
            retries += self.write_chunk(index + 1, chunk).await?;
            histogram!(names::CHUNK_DURATION).record(started.elapsed().as_secs_f64());
            counter!(names::ITEMS_WRITTEN).increment(size as u64);

            uploaded += size;
            info!("Uploaded {}/{} cards", uploaded, total);
        }

        Ok(PublishReport {
            total_items: total,
            chunks: chunk_count,
            retries,
            uploaded,
        })
    }

    /// Write one chunk, resubmitting only what the store left unprocessed.
    /// Returns the number of resubmissions it took.
    async fn write_chunk(&self, chunk_number: usize, chunk: Vec<CatalogItem>) -> Result<u32> {
        let mut pending = self.store.batch_write(&self.table, chunk).await?;
        let mut attempt = 0;

        while !pending.is_empty() && attempt < self.retry.max_attempts {
            attempt += 1;
            let delay = self.retry.delay_for(attempt);
            warn!(
                "Chunk {}: {} unprocessed items, retry {}/{} in {:?}",
                chunk_number,
                pending.len(),
                attempt,
                self.retry.max_attempts,
                delay
            );
            counter!(names::BATCH_RETRIES).increment(1);
            tokio::time::sleep(delay).await;
            pending = self.store.batch_write(&self.table, pending).await?;
        }

        if !pending.is_empty() {
            counter!(names::UNPROCESSED_ITEMS).increment(pending.len() as u64);
            error!("Chunk {} gave up with {} unprocessed items", chunk_number, pending.len());
            return Err(CatalogError::Unprocessed {
                chunk: chunk_number,
                count: pending.len(),
            });
        }
        Ok(attempt)
    }
}

fn warn_duplicate_slugs(records: &[EnrichedCardRecord]) {
    let mut seen = HashSet::new();
    let duplicates: Vec<&str> = records
        .iter()
        .filter(|r| !seen.insert(r.slug.as_str()))
        .map(|r| r.slug.as_str())
        .collect();
    if !duplicates.is_empty() {
        warn!(
            "{} duplicate slugs, later cards overwrite earlier ones: {:?}",
            duplicates.len(),
            duplicates
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_chunks() {
        let items: Vec<usize> = (0..57).collect();
        let chunks = partition_chunks(items, 25);
        let sizes: Vec<usize> = chunks.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![25, 25, 7]);
        assert_eq!(chunks[1][0], 25);
        assert_eq!(chunks[2][6], 56);

        assert!(partition_chunks(Vec::<u8>::new(), 25).is_empty());
        assert_eq!(partition_chunks(vec![1, 2, 3], 0).len(), 3);
    }

    #[test]
    fn test_linear_backoff() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(1), Duration::from_millis(500));
        assert_eq!(policy.delay_for(5), Duration::from_millis(2500));
        let total: Duration = (1..=policy.max_attempts).map(|a| policy.delay_for(a)).sum();
        assert_eq!(total, Duration::from_millis(7500));
    }
}
