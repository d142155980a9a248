//! Relative resource paths on a FastDL server.
//!
//! A [`ResourcePath`] is validated once, on construction, and then maps to both
//! a remote URL under the server's base URL and a mirrored local path under the
//! output directory. Joining is done segment by segment, never by string
//! concatenation.

mod join;
mod validate;

pub use validate::ResourcePathError;

use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// Directory on the server holding `.bsp` and `.res` files.
pub const MAPS_DIR: &str = "maps";
/// Primary map file extension.
pub const MAP_EXTENSION: &str = "bsp";
/// Manifest file extension.
pub const MANIFEST_EXTENSION: &str = "res";

/// A validated, relative, `/`-separated resource path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourcePath {
    segments: Vec<String>,
}

impl ResourcePath {
    /// Validates `raw` as a relative path.
    ///
    /// Backslashes count as separators; empty and `.` segments are dropped.
    /// Absolute paths, `..` segments and control characters are rejected.
    pub fn parse(raw: &str) -> Result<Self, ResourcePathError> {
        validate::split_segments(raw).map(|segments| Self { segments })
    }

    /// `maps/<map>.res`
    pub fn manifest_for(map: &str) -> Result<Self, ResourcePathError> {
        Self::parse(&format!("{MAPS_DIR}/{map}.{MANIFEST_EXTENSION}"))
    }

    /// `maps/<map>.bsp`
    pub fn map_file_for(map: &str) -> Result<Self, ResourcePathError> {
        Self::parse(&format!("{MAPS_DIR}/{map}.{MAP_EXTENSION}"))
    }

    /// Remote location of this resource under `base`.
    pub fn url_under(&self, base: &Url) -> Url {
        join::join_url(base, &self.segments)
    }

    /// Mirrored local location of this resource under `root`.
    pub fn local_under(&self, root: &Path) -> PathBuf {
        join::join_local(root, &self.segments)
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}
