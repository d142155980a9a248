//! HTTP GET against the FastDL server.
//!
//! [`Fetch`] is the seam the orchestrator depends on; [`CurlFetcher`] is the
//! libcurl implementation. A completed HTTP exchange is always `Ok`, whatever
//! the status code; only transport failures are errors.

mod curl_fetcher;

pub use curl_fetcher::CurlFetcher;

use crate::resource_path::ResourcePath;

/// Status and body of a completed GET.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

/// The GET never produced an HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("{url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: ::curl::Error,
    },
}

/// Issues GET requests for resource paths relative to a base URL.
pub trait Fetch: Send + Sync {
    fn get(&self, path: &ResourcePath) -> Result<FetchResponse, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_helpers() {
        let ok = FetchResponse { status: 200, body: Vec::new() };
        assert!(ok.is_success());
        assert!(!ok.is_not_found());
        let missing = FetchResponse { status: 404, body: Vec::new() };
        assert!(!missing.is_success());
        assert!(missing.is_not_found());
        let partial = FetchResponse { status: 206, body: Vec::new() };
        assert!(partial.is_success());
        let err = FetchResponse { status: 503, body: Vec::new() };
        assert!(!err.is_success());
    }
}
