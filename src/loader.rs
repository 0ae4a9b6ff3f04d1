//! Loading documentation pages from disk or over HTTP.
//!
//! [`RootLoader`] dispatches on the [`DocLocation`] kind, [`CachedLoader`]
//! wraps any loader with an in-memory LRU cache and an optional on-disk
//! cache for remote pages.

use crate::config::FetchSettings;
use crate::location::DocLocation;
use crate::{DocError, Result};
use sha2::{Digest, Sha256};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

/// Source of raw documentation pages.
pub trait DocumentLoader: Send + Sync {
    /// Load the page at `location` as text.
    ///
    /// A page that does not exist must be reported as [`DocError::NotFound`]
    /// so callers can try the next candidate.
    fn load(&self, location: &DocLocation) -> Result<String>;
}

/// Loads pages from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileLoader;

impl DocumentLoader for FileLoader {
    fn load(&self, location: &DocLocation) -> Result<String> {
        match location {
            DocLocation::File(path) => {
                if !path.is_file() {
                    return Err(DocError::NotFound(path.display().to_string()));
                }
                tracing::debug!("Reading {}", path.display());
                Ok(std::fs::read_to_string(path)?)
            }
            DocLocation::Url(url) => Err(DocError::Config(format!(
                "cannot read URL from filesystem: {}",
                url
            ))),
        }
    }
}

/// Fetches pages over HTTP(S) with a blocking client.
pub struct HttpLoader {
    client: reqwest::blocking::Client,
    user_agent: String,
}

impl HttpLoader {
    /// Create a loader with the configured timeout and user agent.
    pub fn new(settings: &FetchSettings) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .map_err(|e: reqwest::Error| DocError::Network(e.to_string()))?;

        Ok(Self {
            client,
            user_agent: settings.user_agent.clone(),
        })
    }
}

impl DocumentLoader for HttpLoader {
    fn load(&self, location: &DocLocation) -> Result<String> {
        let url = match location {
            DocLocation::Url(url) => url,
            DocLocation::File(path) => {
                return Err(DocError::Config(format!(
                    "cannot fetch local file over HTTP: {}",
                    path.display()
                )))
            }
        };

        tracing::debug!("Fetching {}", url);
        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "text/html, */*")
            .send()
            .map_err(|e: reqwest::Error| DocError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DocError::NotFound(url.clone()));
        }
        if !status.is_success() {
            return Err(DocError::Network(format!("HTTP {}: {}", status, url)));
        }

        response
            .text()
            .map_err(|e: reqwest::Error| DocError::Network(e.to_string()))
    }
}

/// Loads local locations from disk and remote ones over HTTP.
pub struct RootLoader {
    files: FileLoader,
    http: HttpLoader,
}

impl RootLoader {
    pub fn new(settings: &FetchSettings) -> Result<Self> {
        Ok(Self {
            files: FileLoader,
            http: HttpLoader::new(settings)?,
        })
    }
}

impl DocumentLoader for RootLoader {
    fn load(&self, location: &DocLocation) -> Result<String> {
        match location {
            DocLocation::File(_) => self.files.load(location),
            DocLocation::Url(_) => self.http.load(location),
        }
    }
}

/// Caches successful loads of another loader.
///
/// Entries are keyed by the resolved location. Remote pages are also written
/// to `disk_dir` (when set) under the SHA-256 of their URL.
pub struct CachedLoader<L> {
    inner: L,
    pages: Mutex<lru::LruCache<DocLocation, String>>,
    disk_dir: Option<PathBuf>,
}

impl<L: DocumentLoader> CachedLoader<L> {
    /// Wrap `inner` with a memory cache holding up to `capacity` pages.
    pub fn new(inner: L, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            pages: Mutex::new(lru::LruCache::new(capacity)),
            disk_dir: None,
        }
    }

    /// Also persist remote pages under `dir`.
    pub fn with_disk_cache(mut self, dir: impl Into<PathBuf>) -> Self {
        self.disk_dir = Some(dir.into());
        self
    }

    /// Number of pages held in memory.
    pub fn len(&self) -> usize {
        self.pages.lock().map(|pages| pages.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every page held in memory.
    pub fn clear(&self) {
        if let Ok(mut pages) = self.pages.lock() {
            pages.clear();
        }
    }

    fn disk_path(&self, location: &DocLocation) -> Option<PathBuf> {
        let (DocLocation::Url(url), Some(dir)) = (location, &self.disk_dir) else {
            return None;
        };
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        Some(dir.join(format!("{}.cache", hex::encode(hasher.finalize()))))
    }
}

impl<L: DocumentLoader> DocumentLoader for CachedLoader<L> {
    fn load(&self, location: &DocLocation) -> Result<String> {
        if let Ok(mut pages) = self.pages.lock() {
            if let Some(content) = pages.get(location) {
                tracing::debug!("Cache hit: {}", location);
                return Ok(content.clone());
            }
        }

        let disk_path = self.disk_path(location);
        let cached = disk_path
            .as_ref()
            .filter(|path| path.is_file())
            .and_then(|path| std::fs::read_to_string(path).ok());

        let content = match cached {
            Some(content) => {
                tracing::debug!("Disk cache hit: {}", location);
                content
            }
            None => {
                let content = self.inner.load(location)?;
                if let Some(path) = &disk_path {
                    let written = path
                        .parent()
                        .map_or(Ok(()), std::fs::create_dir_all)
                        .and_then(|_| std::fs::write(path, &content));
                    if let Err(e) = written {
                        tracing::warn!("Failed to write cache file {}: {}", path.display(), e);
                    }
                }
                content
            }
        };

        if let Ok(mut pages) = self.pages.lock() {
            pages.put(location.clone(), content.clone());
        }
        Ok(content)
    }
}

impl<L: DocumentLoader + ?Sized> DocumentLoader for Box<L> {
    fn load(&self, location: &DocLocation) -> Result<String> {
        (**self).load(location)
    }
}
