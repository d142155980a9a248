//! Per-map reports and run totals.

use std::fmt;

use crate::download::{DownloadError, DownloadOutcome};
use crate::resource_path::ResourcePathError;

/// What happened when fetching `maps/<map>.res`.
#[derive(Debug)]
pub enum ManifestOutcome {
    /// Fetched and parsed. `saved` is false if the local copy could not be written.
    Found { entries: usize, saved: bool },
    /// Server answered 404; the map has no manifest.
    Missing,
    /// Any other status, or a transport failure.
    Failed(DownloadError),
    /// The map name does not form a valid path.
    Rejected(ResourcePathError),
}

impl fmt::Display for ManifestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestOutcome::Found { entries, saved: true } => {
                write!(f, "found ({} resources)", entries)
            }
            ManifestOutcome::Found { entries, saved: false } => {
                write!(f, "found ({} resources, local copy not saved)", entries)
            }
            ManifestOutcome::Missing => write!(f, "none on server"),
            ManifestOutcome::Failed(e) => write!(f, "failed: {}", e),
            ManifestOutcome::Rejected(e) => write!(f, "rejected: {}", e),
        }
    }
}

/// One line of a manifest and what became of it.
#[derive(Debug)]
pub struct ResourceReport {
    /// Normalized path if valid, raw manifest line otherwise.
    pub path: String,
    pub result: Result<DownloadOutcome, ResourcePathError>,
}

/// Everything that happened for one map, in processing order.
#[derive(Debug)]
pub struct MapReport {
    pub map: String,
    pub manifest: ManifestOutcome,
    pub resources: Vec<ResourceReport>,
    pub map_file: ResourceReport,
}

impl MapReport {
    /// Resource reports followed by the map file report.
    pub fn files(&self) -> impl Iterator<Item = &ResourceReport> {
        self.resources.iter().chain(std::iter::once(&self.map_file))
    }
}

/// Totals over a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub maps: usize,
    pub downloaded: usize,
    pub skipped: usize,
    pub not_found: usize,
    pub failed: usize,
    pub rejected: usize,
}

impl RunSummary {
    pub fn record(&mut self, report: &MapReport) {
        self.maps += 1;
        if matches!(report.manifest, ManifestOutcome::Failed(_)) {
            self.failed += 1;
        }
        for file in report.files() {
            match &file.result {
                Ok(DownloadOutcome::Downloaded { .. }) => self.downloaded += 1,
                Ok(DownloadOutcome::AlreadyExists) => self.skipped += 1,
                Ok(DownloadOutcome::NotFound) => self.not_found += 1,
                Ok(DownloadOutcome::Failed(_)) => self.failed += 1,
                Err(_) => self.rejected += 1,
            }
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} maps: {} downloaded, {} already present, {} not found, {} failed, {} rejected",
            self.maps, self.downloaded, self.skipped, self.not_found, self.failed, self.rejected
        )
    }
}
