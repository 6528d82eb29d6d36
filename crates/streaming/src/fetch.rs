use std::future::Future;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::source::Source;

#[derive(Debug)]
pub enum FetchError {
    Http { url: String, source: reqwest::Error },
    Status { url: String, status: u16 },
    Io { path: PathBuf, source: std::io::Error },
    Json { source_name: String, source: serde_json::Error },
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Http { url, source } => write!(f, "request to {url} failed: {source}"),
            FetchError::Status { url, status } => write!(f, "{url} answered HTTP {status}"),
            FetchError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            FetchError::Json {
                source_name,
                source,
            } => write!(f, "invalid JSON from {source_name}: {source}"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Http { source, .. } => Some(source),
            FetchError::Status { .. } => None,
            FetchError::Io { source, .. } => Some(source),
            FetchError::Json { source, .. } => Some(source),
        }
    }
}

/// Retrieves one JSON document. No retry and no timeout beyond the
/// transport's own.
pub trait Fetch {
    fn fetch_json(&self, source: &Source) -> impl Future<Output = Result<Value, FetchError>> + Send;
}

/// reqwest for remote sources, tokio's filesystem for local ones.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    http: reqwest::Client,
}

impl HttpFetcher {
    async fn get_remote(&self, url: &str) -> Result<Value, FetchError> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = resp.bytes().await.map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })?;
        debug!(url, bytes = bytes.len(), "fetched remote document");
        serde_json::from_slice(&bytes).map_err(|source| FetchError::Json {
            source_name: url.to_string(),
            source,
        })
    }

    async fn read_local(&self, path: &Path) -> Result<Value, FetchError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| FetchError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = bytes.len(), "read local document");
        serde_json::from_slice(&bytes).map_err(|source| FetchError::Json {
            source_name: path.display().to_string(),
            source,
        })
    }
}

impl Fetch for HttpFetcher {
    async fn fetch_json(&self, source: &Source) -> Result<Value, FetchError> {
        match source {
            Source::Remote(url) => self.get_remote(url).await,
            Source::Local(path) => self.read_local(path).await,
        }
    }
}
