//! Explicit per-run configuration: where to fetch from and where to write.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid FastDL URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported FastDL URL scheme {0:?} (expected http or https)")]
    UnsupportedScheme(String),
}

/// Base URL and output directory shared by the fetcher and the orchestrator.
#[derive(Debug, Clone)]
pub struct Session {
    base_url: Url,
    output_dir: PathBuf,
}

impl Session {
    /// Builds a session from the raw `--fastdl-url` value and output directory.
    ///
    /// Trailing slashes on the URL are stripped before parsing.
    pub fn new(base_url: &str, output_dir: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.len() != base_url.trim().len() {
            tracing::info!("removed trailing slash from FastDL URL, now {}", trimmed);
        }

        let parsed = Url::parse(trimmed).map_err(|source| SessionError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
            return Err(SessionError::UnsupportedScheme(parsed.scheme().to_string()));
        }

        Ok(Self {
            base_url: parsed,
            output_dir: output_dir.into(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Creates the output directory if missing. Returns true if it was created.
    pub fn ensure_output_dir(&self) -> io::Result<bool> {
        if self.output_dir.is_dir() {
            return Ok(false);
        }
        fs::create_dir_all(&self.output_dir)?;
        tracing::info!("created directory {}", self.output_dir.display());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_slashes() {
        let s = Session::new("http://fastdl.example.com/cstrike//", "out").unwrap();
        assert_eq!(s.base_url().path(), "/cstrike");
        assert_eq!(s.output_dir(), Path::new("out"));
    }

    #[test]
    fn host_only_url() {
        let s = Session::new("http://127.0.0.1:27015/", "out").unwrap();
        assert_eq!(s.base_url().as_str(), "http://127.0.0.1:27015/");
    }

    #[test]
    fn rejects_garbage_and_other_schemes() {
        assert!(matches!(
            Session::new("not a url", "out"),
            Err(SessionError::InvalidUrl { .. })
        ));
        assert!(matches!(
            Session::new("ftp://files.example.com/", "out"),
            Err(SessionError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn ensure_output_dir_creates_nested() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("a").join("b");
        let s = Session::new("http://h/", &out).unwrap();
        assert!(s.ensure_output_dir().unwrap());
        assert!(out.is_dir());
        assert!(!s.ensure_output_dir().unwrap());
    }
}
