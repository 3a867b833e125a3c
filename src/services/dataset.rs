//! Dataset download service with a local disk cache
//!
//! The airline CSV is fetched over HTTP once and kept under
//! `~/.airdash/cache/` together with a small JSON metadata file. A fresh
//! cache is used as-is; an expired cache is refreshed, falling back to the
//! stale copy when the network is unavailable.

use crate::config::{airdash_dir, DatasetConfig};
use crate::types::{AirdashError, CacheWarning, Result};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

const DATA_FILE: &str = "airline_data.csv";
const META_FILE: &str = "airline_data.json";

/// Metadata stored next to the cached CSV
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheMeta {
    /// URL the cached bytes were downloaded from
    pub url: String,
    pub fetched_at: DateTime<Utc>,
    pub bytes: u64,
}

impl CacheMeta {
    /// Check if the cache is older than `ttl_secs`
    pub fn is_expired(&self, ttl_secs: i64) -> bool {
        (Utc::now() - self.fetched_at).num_seconds() > ttl_secs
    }
}

/// Where downloaded bytes came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOrigin {
    Cache,
    Network,
}

/// Raw dataset bytes plus provenance
#[derive(Debug)]
pub struct FetchedDataset {
    pub bytes: Vec<u8>,
    pub meta: CacheMeta,
    pub origin: FetchOrigin,
    pub warning: Option<CacheWarning>,
}

/// Dataset download + cache service
pub struct DatasetService {
    url: String,
    cache_dir: PathBuf,
    ttl_secs: i64,
    timeout: Duration,
}

impl DatasetService {
    /// Create a service using `~/.airdash/cache`
    pub fn new(config: &DatasetConfig, ttl_secs: i64) -> Result<Self> {
        let cache_dir = airdash_dir()?.join("cache");
        Ok(Self::with_cache_dir(config, ttl_secs, cache_dir))
    }

    /// Create a service with a custom cache directory
    pub fn with_cache_dir(config: &DatasetConfig, ttl_secs: i64, cache_dir: PathBuf) -> Self {
        Self {
            url: config.url.clone(),
            cache_dir,
            ttl_secs,
            timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn data_path(&self) -> PathBuf {
        self.cache_dir.join(DATA_FILE)
    }

    pub fn meta_path(&self) -> PathBuf {
        self.cache_dir.join(META_FILE)
    }

    /// Cache-first load.
    /// Returns an error only if no usable cache exists and the download fails.
    pub fn load(&self) -> Result<FetchedDataset> {
        let (cached, warning) = match self.load_cache() {
            Ok(cached) => (Some(cached), None),
            Err(warning) => (None, warning),
        };

        match cached {
            Some((bytes, meta)) if meta.url == self.url && !meta.is_expired(self.ttl_secs) => {
                debug!(fetched_at = %meta.fetched_at, "using cached dataset");
                Ok(FetchedDataset {
                    bytes,
                    meta,
                    origin: FetchOrigin::Cache,
                    warning: None,
                })
            }
            Some((bytes, meta)) if meta.url == self.url => {
                // Expired: try refresh, fall back to the stale copy
                match self.refresh() {
                    Ok(fresh) => Ok(fresh),
                    Err(e) => {
                        warn!(error = %e, "dataset refresh failed, using stale cache");
                        Ok(FetchedDataset {
                            bytes,
                            meta,
                            origin: FetchOrigin::Cache,
                            warning: Some(CacheWarning::Stale(format!(
                                "Refresh failed, showing cached data: {}",
                                e
                            ))),
                        })
                    }
                }
            }
            _ => {
                // No cache, unreadable cache, or a cache for another URL
                let mut fetched = self.refresh()?;
                fetched.warning = warning;
                Ok(fetched)
            }
        }
    }

    /// Download the dataset and store it in the cache, ignoring freshness
    pub fn refresh(&self) -> Result<FetchedDataset> {
        let bytes = self.fetch()?;
        let meta = CacheMeta {
            url: self.url.clone(),
            fetched_at: Utc::now(),
            bytes: bytes.len() as u64,
        };

        if let Err(e) = self.save_cache(&bytes, &meta) {
            warn!(error = %e, "failed to write dataset cache");
        }

        Ok(FetchedDataset {
            bytes,
            meta,
            origin: FetchOrigin::Network,
            warning: None,
        })
    }

    /// Fetch the CSV over HTTP
    fn fetch(&self) -> Result<Vec<u8>> {
        info!(url = %self.url, "downloading dataset");

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| AirdashError::Fetch(format!("HTTP client error: {}", e)))?;

        let response = client
            .get(&self.url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| AirdashError::Fetch(format!("HTTP request failed: {}", e)))?;

        let bytes = response
            .bytes()
            .map_err(|e| AirdashError::Fetch(format!("Failed to read body: {}", e)))?;

        info!(bytes = bytes.len(), "dataset downloaded");
        Ok(bytes.to_vec())
    }

    /// Read cached bytes and metadata under a shared lock.
    /// `Err(None)` means no cache exists; `Err(Some(_))` means it is unusable.
    fn load_cache(&self) -> std::result::Result<(Vec<u8>, CacheMeta), Option<CacheWarning>> {
        let meta_path = self.meta_path();
        let data_path = self.data_path();
        if !meta_path.exists() || !data_path.exists() {
            return Err(None);
        }

        let meta_content = fs::read_to_string(&meta_path).map_err(|e| {
            Some(CacheWarning::LoadFailed(format!(
                "Failed to read cache metadata: {}",
                e
            )))
        })?;
        let meta: CacheMeta = serde_json::from_str(&meta_content).map_err(|e| {
            Some(CacheWarning::Corrupted(format!(
                "Corrupted cache metadata: {}",
                e
            )))
        })?;

        let file = File::open(&data_path).map_err(|e| {
            Some(CacheWarning::LoadFailed(format!(
                "Failed to open cache: {}",
                e
            )))
        })?;

        if let Err(e) = file.lock_shared() {
            return Err(Some(CacheWarning::LoadFailed(format!(
                "Failed to acquire read lock: {}",
                e
            ))));
        }

        let mut bytes = Vec::new();
        let read = std::io::BufReader::new(&file).read_to_end(&mut bytes);
        let _ = file.unlock();

        if let Err(e) = read {
            return Err(Some(CacheWarning::LoadFailed(format!(
                "Failed to read cache: {}",
                e
            ))));
        }

        if bytes.len() as u64 != meta.bytes {
            return Err(Some(CacheWarning::Corrupted(format!(
                "Cache size mismatch: expected {} bytes, found {}",
                meta.bytes,
                bytes.len()
            ))));
        }

        Ok((bytes, meta))
    }

    /// Save using atomic write (temp file + rename) with exclusive lock.
    fn save_cache(&self, bytes: &[u8], meta: &CacheMeta) -> Result<()> {
        fs::create_dir_all(&self.cache_dir)?;

        let path = self.data_path();
        let temp_path = path.with_extension("csv.tmp");

        {
            let mut file = File::create(&temp_path)
                .map_err(|e| AirdashError::Cache(format!("Failed to create temp file: {}", e)))?;
            file.write_all(bytes)
                .map_err(|e| AirdashError::Cache(format!("Failed to write temp file: {}", e)))?;
            file.sync_all()
                .map_err(|e| AirdashError::Cache(format!("Failed to sync temp file: {}", e)))?;
        }

        let target = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;

        target
            .lock_exclusive()
            .map_err(|e| AirdashError::Cache(format!("Failed to acquire write lock: {}", e)))?;

        let renamed = fs::rename(&temp_path, &path)
            .map_err(|e| AirdashError::Cache(format!("Failed to rename temp file: {}", e)));
        let _ = target.unlock();
        renamed?;

        let content = serde_json::to_string_pretty(meta)
            .map_err(|e| AirdashError::Cache(format!("Serialization failed: {}", e)))?;
        fs::write(self.meta_path(), content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Nothing listens on the discard port, so requests fail fast
    const UNREACHABLE_URL: &str = "http://127.0.0.1:9/airline_data.csv";

    const CSV: &[u8] = b"Year,Month,Flights\n2010,1,1.0\n";

    fn create_test_service(url: &str, ttl_secs: i64) -> (DatasetService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = DatasetConfig {
            url: url.to_string(),
            cache_ttl_hours: 1,
            request_timeout_secs: 2,
        };
        let service =
            DatasetService::with_cache_dir(&config, ttl_secs, temp_dir.path().to_path_buf());
        (service, temp_dir)
    }

    fn write_cache(service: &DatasetService, url: &str, age_secs: i64) {
        let meta = CacheMeta {
            url: url.to_string(),
            fetched_at: Utc::now() - chrono::Duration::seconds(age_secs),
            bytes: CSV.len() as u64,
        };
        service.save_cache(CSV, &meta).unwrap();
    }

    #[test]
    fn test_cache_meta_expiry() {
        let meta = CacheMeta {
            url: "u".into(),
            fetched_at: Utc::now() - chrono::Duration::hours(2),
            bytes: 0,
        };
        assert!(meta.is_expired(3600));
        assert!(!meta.is_expired(3 * 3600));
    }

    #[test]
    fn test_fresh_cache_used_without_network() {
        let (service, _temp) = create_test_service(UNREACHABLE_URL, 3600);
        write_cache(&service, UNREACHABLE_URL, 10);

        let fetched = service.load().unwrap();
        assert_eq!(fetched.origin, FetchOrigin::Cache);
        assert_eq!(fetched.bytes, CSV);
        assert!(fetched.warning.is_none());
    }

    #[test]
    fn test_expired_cache_falls_back_when_offline() {
        let (service, _temp) = create_test_service(UNREACHABLE_URL, 60);
        write_cache(&service, UNREACHABLE_URL, 3600);

        let fetched = service.load().unwrap();
        assert_eq!(fetched.origin, FetchOrigin::Cache);
        assert_eq!(fetched.bytes, CSV);
        assert!(matches!(fetched.warning, Some(CacheWarning::Stale(_))));
    }

    #[test]
    fn test_no_cache_and_offline_is_error() {
        let (service, _temp) = create_test_service(UNREACHABLE_URL, 3600);
        let err = service.load().unwrap_err();
        assert!(matches!(err, AirdashError::Fetch(_)));
    }

    #[test]
    fn test_cache_for_other_url_is_ignored() {
        let (service, _temp) = create_test_service(UNREACHABLE_URL, 3600);
        write_cache(&service, "http://example.invalid/other.csv", 10);

        // Fresh, but for another URL: must refetch, which fails offline
        assert!(service.load().is_err());
    }

    #[test]
    fn test_corrupted_metadata_not_used() {
        let (service, _temp) = create_test_service(UNREACHABLE_URL, 3600);
        write_cache(&service, UNREACHABLE_URL, 10);
        fs::write(service.meta_path(), "{not json").unwrap();

        assert!(matches!(
            service.load_cache(),
            Err(Some(CacheWarning::Corrupted(_)))
        ));
    }

    #[test]
    fn test_truncated_data_not_used() {
        let (service, _temp) = create_test_service(UNREACHABLE_URL, 3600);
        write_cache(&service, UNREACHABLE_URL, 10);
        fs::write(service.data_path(), b"Year").unwrap();

        assert!(matches!(
            service.load_cache(),
            Err(Some(CacheWarning::Corrupted(_)))
        ));
    }

    #[test]
    fn test_missing_cache_is_not_a_warning() {
        let (service, _temp) = create_test_service(UNREACHABLE_URL, 3600);
        assert!(matches!(service.load_cache(), Err(None)));
    }

    #[test]
    fn test_save_cache_roundtrip_leaves_no_temp_file() {
        let (service, _temp) = create_test_service(UNREACHABLE_URL, 3600);
        write_cache(&service, UNREACHABLE_URL, 0);

        let (bytes, meta) = service.load_cache().unwrap();
        assert_eq!(bytes, CSV);
        assert_eq!(meta.url, UNREACHABLE_URL);
        assert!(!service.data_path().with_extension("csv.tmp").exists());
    }
}
