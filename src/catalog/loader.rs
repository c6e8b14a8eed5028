use super::{Catalog, CatalogError};
use reqwest::{Client, Url};
use std::path::{Path, PathBuf};

/// Where the catalog document lives
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogSource {
    File(PathBuf),
    Url(Url),
}

/// Base that relative `src`/`image` locators are resolved against
#[derive(Debug, Clone, PartialEq)]
pub enum MediaBase {
    Dir(PathBuf),
    Url(Url),
}

pub(crate) fn is_remote(locator: &str) -> bool {
    let lower = locator.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

impl CatalogSource {
    pub fn parse(location: &str) -> Result<Self, CatalogError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(CatalogError::InvalidSource("empty location".to_string()));
        }
        if is_remote(location) {
            let url = Url::parse(location)
                .map_err(|e| CatalogError::InvalidSource(format!("{}: {}", location, e)))?;
            Ok(Self::Url(url))
        } else {
            Ok(Self::File(PathBuf::from(location)))
        }
    }

    /// Relative locators inside the document are relative to the document itself
    pub fn media_base(&self) -> MediaBase {
        match self {
            CatalogSource::File(path) => MediaBase::Dir(
                path.parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from(".")),
            ),
            CatalogSource::Url(url) => MediaBase::Url(url.clone()),
        }
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::File(path) => write!(f, "{}", path.display()),
            CatalogSource::Url(url) => write!(f, "{}", url),
        }
    }
}

impl MediaBase {
    /// Parse a configured media root. Directory URLs get a trailing slash so
    /// that `join` keeps the last path segment.
    pub fn parse(root: &str) -> Result<Self, CatalogError> {
        let root = root.trim();
        if is_remote(root) {
            let with_slash = if root.ends_with('/') {
                root.to_string()
            } else {
                format!("{}/", root)
            };
            let url = Url::parse(&with_slash)
                .map_err(|e| CatalogError::InvalidSource(format!("{}: {}", root, e)))?;
            Ok(Self::Url(url))
        } else {
            Ok(Self::Dir(PathBuf::from(root)))
        }
    }

    pub fn resolve(&self, locator: &str) -> String {
        if locator.is_empty() || is_remote(locator) {
            return locator.to_string();
        }
        match self {
            MediaBase::Dir(_) if Path::new(locator).is_absolute() => locator.to_string(),
            MediaBase::Dir(dir) => {
                let relative = locator.trim_start_matches("./");
                dir.join(relative).to_string_lossy().to_string()
            }
            MediaBase::Url(base) => base
                .join(locator)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| locator.to_string()),
        }
    }
}

/// Fetches the mood catalog from a file or an http(s) endpoint 📚
pub struct CatalogLoader {
    client: Client,
    source: CatalogSource,
    media_base: MediaBase,
}

impl CatalogLoader {
    pub fn new(client: Client, source: CatalogSource) -> Self {
        let media_base = source.media_base();
        Self {
            client,
            source,
            media_base,
        }
    }

    /// Resolve relative track locators against `base` instead of the document's location
    pub fn with_media_base(mut self, base: MediaBase) -> Self {
        self.media_base = base;
        self
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// One fetch, no retry. Failures are logged and yield an empty catalog.
    pub async fn load(&self) -> Catalog {
        match self.try_load().await {
            Ok(catalog) => {
                tracing::info!(source = %self.source, tracks = catalog.len(), "catalog loaded");
                catalog
            }
            Err(e) => {
                tracing::error!(source = %self.source, error = %e, "error loading catalog");
                Catalog::default()
            }
        }
    }

    pub async fn try_load(&self) -> Result<Catalog, CatalogError> {
        let text = match &self.source {
            CatalogSource::File(path) => tokio::fs::read_to_string(path).await?,
            CatalogSource::Url(url) => {
                self.client
                    .get(url.clone())
                    .send()
                    .await?
                    .error_for_status()?
                    .text()
                    .await?
            }
        };
        Catalog::from_json(&text, &self.media_base)
    }
}
