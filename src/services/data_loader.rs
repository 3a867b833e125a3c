//! Unified data loading service for CLI and TUI
//!
//! Resolves where the flight CSV comes from (a local file or the cached
//! remote download), parses it and hands back an immutable `Dataset`.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Local, Utc};
use tracing::{info, warn};

use crate::parsers::{FlightCsvParser, ParsedFlights};
use crate::services::dataset::{DatasetService, FetchOrigin, FetchedDataset};
use crate::types::{CacheWarning, Dataset, Result};

/// Where the loaded dataset came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// User-supplied CSV on disk
    LocalFile(PathBuf),
    /// Previously downloaded copy
    Cache { fetched_at: DateTime<Utc> },
    /// Downloaded during this run
    Network { fetched_at: DateTime<Utc> },
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LocalFile(path) => write!(f, "file {}", path.display()),
            Self::Cache { fetched_at } => write!(
                f,
                "cache from {}",
                fetched_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
            ),
            Self::Network { .. } => write!(f, "downloaded"),
        }
    }
}

/// Result of loading the dataset
#[derive(Debug)]
pub struct LoadResult {
    pub dataset: Dataset,
    pub source: DataSource,
    /// Rows dropped because they could not be decoded
    pub skipped_rows: usize,
    /// Cache warning indicator (if any)
    pub cache_warning: Option<CacheWarning>,
}

enum Origin {
    Local(PathBuf),
    Remote(DatasetService),
}

/// Unified data loading service
pub struct DataLoaderService {
    origin: Origin,
    force_refresh: bool,
}

impl DataLoaderService {
    /// Load from a CSV file on disk (no network)
    pub fn from_file(path: PathBuf) -> Self {
        Self {
            origin: Origin::Local(path),
            force_refresh: false,
        }
    }

    /// Load through the download cache
    pub fn from_remote(service: DatasetService) -> Self {
        Self {
            origin: Origin::Remote(service),
            force_refresh: false,
        }
    }

    /// Always download, even when the cache is fresh
    pub fn with_refresh(mut self, force_refresh: bool) -> Self {
        self.force_refresh = force_refresh;
        self
    }

    /// Where `load` will read from, for the loading screen
    pub fn describe(&self) -> String {
        match &self.origin {
            Origin::Local(path) => format!("file {}", path.display()),
            Origin::Remote(service) if self.force_refresh => {
                format!("downloading {}", service.url())
            }
            Origin::Remote(service) => format!("cache or {}", service.url()),
        }
    }

    /// Load and parse the dataset
    pub fn load(&self) -> Result<LoadResult> {
        match &self.origin {
            Origin::Local(path) => {
                let parsed = FlightCsvParser::parse_file(path)?;
                info!(
                    records = parsed.records.len(),
                    path = %path.display(),
                    "loaded dataset from file"
                );
                Ok(Self::build(parsed, DataSource::LocalFile(path.clone()), None))
            }
            Origin::Remote(service) => self.load_remote(service),
        }
    }

    fn load_remote(&self, service: &DatasetService) -> Result<LoadResult> {
        let fetched = if self.force_refresh {
            service.refresh()?
        } else {
            service.load()?
        };

        match FlightCsvParser::parse_bytes(&fetched.bytes) {
            Ok(parsed) => Ok(Self::from_fetched(parsed, fetched)),
            Err(e) if fetched.origin == FetchOrigin::Cache => {
                // Cached copy is unreadable: one fresh download before giving up
                warn!(error = %e, "cached dataset failed to parse, downloading again");
                let fresh = service.refresh()?;
                let parsed = FlightCsvParser::parse_bytes(&fresh.bytes)?;
                Ok(Self::from_fetched(parsed, fresh))
            }
            Err(e) => Err(e),
        }
    }

    fn from_fetched(parsed: ParsedFlights, fetched: FetchedDataset) -> LoadResult {
        let source = match fetched.origin {
            FetchOrigin::Cache => DataSource::Cache {
                fetched_at: fetched.meta.fetched_at,
            },
            FetchOrigin::Network => DataSource::Network {
                fetched_at: fetched.meta.fetched_at,
            },
        };
        info!(records = parsed.records.len(), source = %source, "loaded dataset");
        Self::build(parsed, source, fetched.warning)
    }

    fn build(
        parsed: ParsedFlights,
        source: DataSource,
        cache_warning: Option<CacheWarning>,
    ) -> LoadResult {
        LoadResult {
            dataset: Dataset::new(parsed.records),
            source,
            skipped_rows: parsed.skipped_rows,
            cache_warning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatasetConfig;
    use crate::services::dataset::CacheMeta;
    use std::fs;
    use tempfile::TempDir;

    fn fixture_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join("airline_sample.csv")
    }

    fn offline_service(dir: &TempDir) -> DatasetService {
        let config = DatasetConfig {
            url: "http://127.0.0.1:9/airline_data.csv".into(),
            cache_ttl_hours: 1,
            request_timeout_secs: 2,
        };
        DatasetService::with_cache_dir(&config, 3600, dir.path().to_path_buf())
    }

    fn seed_cache(service: &DatasetService, bytes: &[u8]) {
        fs::create_dir_all(service.data_path().parent().unwrap()).unwrap();
        fs::write(service.data_path(), bytes).unwrap();
        let meta = CacheMeta {
            url: "http://127.0.0.1:9/airline_data.csv".into(),
            fetched_at: Utc::now(),
            bytes: bytes.len() as u64,
        };
        fs::write(service.meta_path(), serde_json::to_string(&meta).unwrap()).unwrap();
    }

    #[test]
    fn test_load_local_file() {
        let loader = DataLoaderService::from_file(fixture_path());
        let result = loader.load().unwrap();

        assert_eq!(result.dataset.len(), 12);
        assert_eq!(result.skipped_rows, 0);
        assert!(matches!(result.source, DataSource::LocalFile(_)));
        assert!(result.cache_warning.is_none());

        let years: Vec<i32> = result.dataset.years().iter().map(|y| y.year).collect();
        assert_eq!(years, vec![2010, 2011]);
    }

    #[test]
    fn test_load_missing_local_file() {
        let loader = DataLoaderService::from_file(PathBuf::from("/nonexistent/airline.csv"));
        assert!(loader.load().is_err());
    }

    #[test]
    fn test_load_remote_from_fresh_cache() {
        let dir = TempDir::new().unwrap();
        let service = offline_service(&dir);
        seed_cache(&service, &fs::read(fixture_path()).unwrap());

        let result = DataLoaderService::from_remote(service).load().unwrap();
        assert_eq!(result.dataset.len(), 12);
        assert!(matches!(result.source, DataSource::Cache { .. }));
    }

    #[test]
    fn test_forced_refresh_offline_is_error() {
        let dir = TempDir::new().unwrap();
        let service = offline_service(&dir);
        seed_cache(&service, &fs::read(fixture_path()).unwrap());

        let loader = DataLoaderService::from_remote(service).with_refresh(true);
        assert!(loader.load().is_err());
    }

    #[test]
    fn test_unparseable_cache_offline_is_error() {
        let dir = TempDir::new().unwrap();
        let service = offline_service(&dir);
        seed_cache(&service, b"not,a,flight,file\n");

        assert!(DataLoaderService::from_remote(service).load().is_err());
    }

    #[test]
    fn test_describe_names_origin() {
        let loader = DataLoaderService::from_file(PathBuf::from("/tmp/a.csv"));
        assert_eq!(loader.describe(), "file /tmp/a.csv");

        let dir = TempDir::new().unwrap();
        let loader = DataLoaderService::from_remote(offline_service(&dir));
        assert_eq!(
            loader.describe(),
            "cache or http://127.0.0.1:9/airline_data.csv"
        );

        let loader = DataLoaderService::from_remote(offline_service(&dir)).with_refresh(true);
        assert_eq!(
            loader.describe(),
            "downloading http://127.0.0.1:9/airline_data.csv"
        );
    }

    #[test]
    fn test_data_source_display() {
        let source = DataSource::LocalFile(PathBuf::from("/tmp/a.csv"));
        assert_eq!(source.to_string(), "file /tmp/a.csv");

        let source = DataSource::Network {
            fetched_at: Utc::now(),
        };
        assert_eq!(source.to_string(), "downloaded");
    }
}
