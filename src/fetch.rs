//! Synchronous JSON retrieval over HTTP or from the filesystem.
//!
//! This is the shared plumbing behind the dimensions provider: an
//! `info.json` source may be a URL on a IIIF server or a document saved to
//! disk, and both paths end in the same `serde_json::Value`. Calls block;
//! retry and backoff belong to the caller.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

/// Per-request timeout for `info.json` GETs.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// A failed JSON retrieval, wrapping the underlying HTTP, IO, or JSON
/// cause and naming the source it came from.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("error retrieving {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },
    #[error("HTTP {status} retrieving {url}")]
    Status { url: String, status: u16 },
    #[error("error reading {origin}: {source}")]
    Io {
        origin: String,
        #[source]
        source: std::io::Error,
    },
    #[error("error parsing JSON from {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

/// GET a JSON document from `url`.
pub fn fetch_json(url: &str) -> Result<Value, FetchError> {
    let agent = ureq::AgentBuilder::new().timeout(FETCH_TIMEOUT).build();
    let response = agent.get(url).call().map_err(|err| match err {
        ureq::Error::Status(status, _) => FetchError::Status {
            url: url.to_string(),
            status,
        },
        other => FetchError::Http {
            url: url.to_string(),
            source: Box::new(other),
        },
    })?;
    let body = response.into_string().map_err(|source| FetchError::Io {
        origin: url.to_string(),
        source,
    })?;
    serde_json::from_str(&body).map_err(|source| FetchError::Json {
        origin: url.to_string(),
        source,
    })
}

/// Read a JSON document from a file.
pub fn load_json(path: &Path) -> Result<Value, FetchError> {
    let body = fs::read_to_string(path).map_err(|source| FetchError::Io {
        origin: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&body).map_err(|source| FetchError::Json {
        origin: path.display().to_string(),
        source,
    })
}

/// Load a JSON document from a URL or a file path, dispatching on the
/// `http://`/`https://` prefix.
pub fn load_json_source(source: &str) -> Result<Value, FetchError> {
    if source.starts_with("http://") || source.starts_with("https://") {
        fetch_json(source)
    } else {
        load_json(Path::new(source))
    }
}
