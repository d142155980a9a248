//! libcurl-backed fetcher. One easy handle per request, body buffered in memory.

use std::time::Duration;

use super::{Fetch, FetchError, FetchResponse};
use crate::config::FastdlConfig;
use crate::resource_path::ResourcePath;
use crate::session::Session;
use url::Url;

#[derive(Debug, Clone)]
pub struct CurlFetcher {
    base_url: Url,
    user_agent: String,
    follow_redirects: bool,
}

impl CurlFetcher {
    pub fn new(session: &Session, config: &FastdlConfig) -> Self {
        Self {
            base_url: session.base_url().clone(),
            user_agent: config.user_agent.clone(),
            follow_redirects: config.follow_redirects,
        }
    }

    fn perform(&self, url: &str) -> Result<FetchResponse, curl::Error> {
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.useragent(&self.user_agent)?;
        easy.follow_location(self.follow_redirects)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(Duration::from_secs(30))?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        Ok(FetchResponse { status, body })
    }
}

impl Fetch for CurlFetcher {
    fn get(&self, path: &ResourcePath) -> Result<FetchResponse, FetchError> {
        let url = path.url_under(&self.base_url);
        tracing::info!("GET {}", url);
        let response = self
            .perform(url.as_str())
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;
        tracing::debug!(
            "GET {} -> HTTP {} ({} bytes)",
            url,
            response.status,
            response.body.len()
        );
        Ok(response)
    }
}
