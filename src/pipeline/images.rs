use crate::error::Result;
use crate::metrics::names;
use crate::types::ImageManifestEntry;
use async_trait::async_trait;
use metrics::counter;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Where image bytes come from
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// `Ok(None)` when the server answered with a non-success status.
    async fn fetch(&self, url: &str) -> Result<Option<Vec<u8>>>;
}

pub struct ReqwestImageSource {
    client: reqwest::Client,
}

impl ReqwestImageSource {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ImageSource for ReqwestImageSource {
    async fn fetch(&self, url: &str) -> Result<Option<Vec<u8>>> {
        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            warn!("GET {} responded with status {}", url, resp.status().as_u16());
            return Ok(None);
        }
        Ok(Some(resp.bytes().await?.to_vec()))
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct FetchReport {
    pub downloaded: usize,
    pub skipped: usize,
    pub missing_remote: usize,
    pub failed: usize,
}

/// Downloads manifest images into `<asset_root>/<localPath>`. Files already
/// on disk are left alone; failures are counted, never fatal.
pub struct ImageFetcher {
    source: Arc<dyn ImageSource>,
    asset_root: PathBuf,
    delay: Duration,
}

impl ImageFetcher {
    pub fn new(source: Arc<dyn ImageSource>, asset_root: impl Into<PathBuf>, delay: Duration) -> Self {
        Self {
            source,
            asset_root: asset_root.into(),
            delay,
        }
    }

    pub async fn fetch_all(&self, manifest: &[ImageManifestEntry]) -> Result<FetchReport> {
        let mut report = FetchReport::default();

        for entry in manifest {
            let Some(remote) = entry.remote.as_deref() else {
                report.missing_remote += 1;
                continue;
            };
            let target = self.asset_root.join(&entry.local_path);
            if target.exists() {
                report.skipped += 1;
                continue;
            }

            match self.source.fetch(remote).await {
                Ok(Some(bytes)) => {
                    write_asset(&target, &bytes).await?;
                    debug!("Saved {} ({} bytes)", target.display(), bytes.len());
                    counter!(names::IMAGES_DOWNLOADED).increment(1);
                    report.downloaded += 1;
                }
                Ok(None) => {
                    counter!(names::IMAGES_FAILED).increment(1);
                    report.failed += 1;
                }
                Err(e) => {
                    warn!("Failed to fetch image for {}: {}", entry.id, e);
                    counter!(names::IMAGES_FAILED).increment(1);
                    report.failed += 1;
                }
            }

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        info!(
            "Images: {} downloaded, {} already present, {} without remote, {} failed",
            report.downloaded, report.skipped, report.missing_remote, report.failed
        );
        Ok(report)
    }
}

async fn write_asset(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;

    struct StubSource;

    #[async_trait]
    impl ImageSource for StubSource {
        async fn fetch(&self, url: &str) -> Result<Option<Vec<u8>>> {
            match url {
                "https://img/ok.png" => Ok(Some(b"img".to_vec())),
                "https://img/404.png" => Ok(None),
                _ => Err(CatalogError::MalformedInput(format!("bad url {url}"))),
            }
        }
    }

    fn entry(id: &str, remote: Option<&str>) -> ImageManifestEntry {
        ImageManifestEntry {
            id: id.to_string(),
            name: None,
            remote: remote.map(str::to_string),
            local_path: format!("assets/cards/{id}.webp"),
        }
    }

    #[tokio::test]
    async fn test_fetch_all_counts_outcomes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("assets/cards")).unwrap();
        std::fs::write(dir.path().join("assets/cards/cached.webp"), b"old").unwrap();

        let fetcher = ImageFetcher::new(Arc::new(StubSource), dir.path(), Duration::ZERO);
        let manifest = vec![
            entry("ok", Some("https://img/ok.png")),
            entry("cached", Some("https://img/ok.png")),
            entry("gone", Some("https://img/404.png")),
            entry("broken", Some("nope")),
            entry("bare", None),
        ];

        let report = fetcher.fetch_all(&manifest).await.unwrap();
        assert_eq!(
            report,
            FetchReport { downloaded: 1, skipped: 1, missing_remote: 1, failed: 2 }
        );
        assert_eq!(std::fs::read(dir.path().join("assets/cards/ok.webp")).unwrap(), b"img");
        assert_eq!(std::fs::read(dir.path().join("assets/cards/cached.webp")).unwrap(), b"old");
    }
}
