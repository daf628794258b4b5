//! Seed asset retrieval.
//!
//! The asset is treated as immutable: the HTTP fetcher keeps a copy on
//! disk beside the database and serves it from there on every fetch after
//! the first, so the network is touched at most once per installation.

use std::fmt;
use std::path::PathBuf;

use reqwest::Client;

use crate::error::{SeedError, SeedResult};

/// Retrieves the raw bytes of the seed asset.
#[async_trait::async_trait]
pub trait AssetFetcher: fmt::Debug + Send + Sync {
    /// Fetch the asset body.
    async fn fetch(&self) -> SeedResult<Vec<u8>>;

    /// Human-readable location of the asset, for logging.
    fn location(&self) -> String;
}

/// Fetches the seed asset over HTTP.
///
/// No request timeout is configured; a hung request leaves seeding
/// pending until the process exits.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: Client,
    url: String,
    cache_path: Option<PathBuf>,
}

impl HttpFetcher {
    /// Create a new HTTP fetcher for the given URL.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(url: impl Into<String>) -> SeedResult<Self> {
        let http = Client::builder()
            .user_agent("cantoria/0.1.0 (https://github.com/oxur/cantoria)")
            .build()?;

        Ok(Self {
            http,
            url: url.into(),
            cache_path: None,
        })
    }

    /// Cache the fetched body at the given path and prefer the cached copy
    /// on subsequent fetches.
    #[must_use]
    pub fn with_cache(mut self, path: PathBuf) -> Self {
        self.cache_path = Some(path);
        self
    }

    fn read_cache(&self) -> Option<Vec<u8>> {
        let path = self.cache_path.as_ref()?;
        if !path.exists() {
            return None;
        }
        match std::fs::read(path) {
            Ok(body) => {
                log::debug!("Using cached seed asset at {}", path.display());
                Some(body)
            }
            Err(err) => {
                log::warn!("Failed to read asset cache {}: {err}", path.display());
                None
            }
        }
    }

    fn write_cache(&self, body: &[u8]) {
        let Some(path) = self.cache_path.as_ref() else {
            return;
        };
        if let Some(parent) = path.parent() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                log::warn!("Failed to create cache directory: {err}");
                return;
            }
        }
        if let Err(err) = std::fs::write(path, body) {
            log::warn!("Failed to write asset cache {}: {err}", path.display());
        }
    }
}

#[async_trait::async_trait]
impl AssetFetcher for HttpFetcher {
    async fn fetch(&self) -> SeedResult<Vec<u8>> {
        if let Some(body) = self.read_cache() {
            return Ok(body);
        }

        let response = self.http.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SeedError::Fetch {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?.to_vec();
        self.write_cache(&body);
        Ok(body)
    }

    fn location(&self) -> String {
        self.url.clone()
    }
}

/// Reads the seed asset from a local file.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    path: PathBuf,
}

impl FileFetcher {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl AssetFetcher for FileFetcher {
    async fn fetch(&self) -> SeedResult<Vec<u8>> {
        Ok(std::fs::read(&self.path)?)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_fetcher_reads_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        std::fs::write(&path, b"{}").unwrap();

        let fetcher = FileFetcher::new(&path);
        let body = fetcher.fetch().await.unwrap();
        assert_eq!(body, b"{}");
    }

    #[tokio::test]
    async fn test_file_fetcher_missing_file() {
        let fetcher = FileFetcher::new("/no/such/db.json");
        let err = fetcher.fetch().await.unwrap_err();
        assert!(err.is_fetch());
    }

    #[tokio::test]
    async fn test_http_fetcher_prefers_cache() {
        let dir = tempfile::TempDir::new().unwrap();
        let cache = dir.path().join("db.json");
        std::fs::write(&cache, b"cached").unwrap();

        // The URL is never contacted when the cache is warm
        let fetcher = HttpFetcher::new("http://127.0.0.1:1/db.json")
            .unwrap()
            .with_cache(cache);
        let body = fetcher.fetch().await.unwrap();
        assert_eq!(body, b"cached");
    }
}
