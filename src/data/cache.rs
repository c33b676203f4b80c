//! Local snapshot caching
//!
//! Caches option chain snapshots locally to reduce API calls and enable
//! offline analysis. Entries expire after `max_age_hours` (one day by default).

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};

use crate::core::{FeedSnapshot, GexResult};

use super::feed::FeedProvider;

const SNAPSHOT_SUFFIX: &str = "snapshot";

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Cache directory
    pub cache_dir: PathBuf,
    /// Maximum age before refresh (in hours)
    pub max_age_hours: i64,
    /// Whether to use cache
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("./data/cache"),
            max_age_hours: 24,
            enabled: true,
        }
    }
}

/// Data cache manager
pub struct DataCache {
    config: CacheConfig,
}

impl DataCache {
    pub fn new(config: CacheConfig) -> GexResult<Self> {
        if config.enabled && !config.cache_dir.exists() {
            fs::create_dir_all(&config.cache_dir)?;
        }

        Ok(Self { config })
    }

    fn cache_key(&self, ticker: &str) -> PathBuf {
        self.config
            .cache_dir
            .join(format!("{}_{}.json", ticker.to_uppercase(), SNAPSHOT_SUFFIX))
    }

    /// Check if cache is valid (exists and not expired)
    pub fn is_valid(&self, ticker: &str) -> bool {
        if !self.config.enabled {
            return false;
        }

        let path = self.cache_key(ticker);
        if !path.exists() {
            return false;
        }

        if let Ok(metadata) = fs::metadata(&path) {
            if let Ok(modified) = metadata.modified() {
                let modified: DateTime<Utc> = modified.into();
                let age = Utc::now() - modified;
                return age < Duration::hours(self.config.max_age_hours);
            }
        }

        false
    }

    /// Save snapshot to cache
    pub fn save_snapshot(&self, snapshot: &FeedSnapshot) -> GexResult<()> {
        if !self.config.enabled {
            return Ok(());
        }

        let path = self.cache_key(&snapshot.ticker);
        let json = serde_json::to_string(snapshot)?;
        fs::write(&path, json)?;

        tracing::info!("Cached snapshot for {} at {:?}", snapshot.ticker, path);
        Ok(())
    }

    /// Load snapshot from cache if fresh
    pub fn load_snapshot(&self, ticker: &str) -> GexResult<Option<FeedSnapshot>> {
        if !self.is_valid(ticker) {
            return Ok(None);
        }

        let path = self.cache_key(ticker);
        let json = fs::read_to_string(&path)?;
        let snapshot: FeedSnapshot = serde_json::from_str(&json)?;

        tracing::info!("Loaded snapshot for {} from cache", ticker);
        Ok(Some(snapshot))
    }

    /// Clear cache for a ticker
    pub fn clear(&self, ticker: &str) -> GexResult<()> {
        let path = self.cache_key(ticker);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Clear all cache
    pub fn clear_all(&self) -> GexResult<()> {
        if self.config.cache_dir.exists() {
            fs::remove_dir_all(&self.config.cache_dir)?;
            fs::create_dir_all(&self.config.cache_dir)?;
        }
        Ok(())
    }

    /// List cached tickers
    pub fn list_cached(&self) -> GexResult<Vec<String>> {
        let mut tickers = Vec::new();

        if !self.config.cache_dir.exists() {
            return Ok(tickers);
        }

        let suffix = format!("_{}.json", SNAPSHOT_SUFFIX);
        for entry in fs::read_dir(&self.config.cache_dir)? {
            let file_name = entry?.file_name().to_string_lossy().to_string();

            if let Some(ticker) = file_name.strip_suffix(&suffix) {
                tickers.push(ticker.to_string());
            }
        }

        tickers.sort();
        Ok(tickers)
    }
}

/// Cached feed - serves fresh cache entries, otherwise fetches and stores
pub struct CachedFeed<P> {
    cache: DataCache,
    inner: P,
}

impl<P: FeedProvider> CachedFeed<P> {
    pub fn new(inner: P, config: CacheConfig) -> GexResult<Self> {
        Ok(Self {
            cache: DataCache::new(config)?,
            inner,
        })
    }

    pub fn cache(&self) -> &DataCache {
        &self.cache
    }

    /// Force refresh (bypass cache)
    pub fn refresh(&self, ticker: &str) -> GexResult<FeedSnapshot> {
        self.cache.clear(ticker)?;
        self.fetch(ticker)
    }
}

impl<P: FeedProvider> FeedProvider for CachedFeed<P> {
    fn fetch(&self, ticker: &str) -> GexResult<FeedSnapshot> {
        if let Some(snapshot) = self.cache.load_snapshot(ticker)? {
            return Ok(snapshot);
        }

        tracing::info!("Fetching fresh data for {}", ticker);
        let snapshot = self.inner.fetch(ticker)?;
        self.cache.save_snapshot(&snapshot)?;

        Ok(snapshot)
    }
}
