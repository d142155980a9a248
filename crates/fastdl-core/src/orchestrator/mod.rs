//! Per-map download flow.
//!
//! For each map, in list order: fetch and save `maps/<map>.res`, download every
//! resource it lists, then download `maps/<map>.bsp`. Nothing here aborts the
//! run; every failure ends up in the map's [`MapReport`].

mod pool;
mod report;

pub use report::{ManifestOutcome, MapReport, ResourceReport, RunSummary};

use std::collections::{HashMap, HashSet};

use crate::download::{download_resource, save_file, DownloadError, DownloadOutcome};
use crate::fetch::Fetch;
use crate::manifest::parse_manifest;
use crate::resource_path::{ResourcePath, ResourcePathError};
use crate::session::Session;

pub struct Orchestrator<F: Fetch> {
    fetcher: F,
    session: Session,
    jobs: usize,
}

impl<F: Fetch> Orchestrator<F> {
    pub fn new(fetcher: F, session: Session) -> Self {
        Self {
            fetcher,
            session,
            jobs: 1,
        }
    }

    /// Number of workers for one map's resources. 0 is treated as 1.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Processes `maps` in order. `on_map` sees each report as soon as its map is done.
    pub fn run<R>(&self, maps: &[String], mut on_map: R) -> RunSummary
    where
        R: FnMut(usize, usize, &MapReport),
    {
        let total = maps.len();
        let mut summary = RunSummary::default();
        for (i, map) in maps.iter().enumerate() {
            let n = i + 1;
            tracing::info!("======= START: {}/{} - map {} =======", n, total, map);
            let report = self.run_map(map);
            summary.record(&report);
            on_map(n, total, &report);
            tracing::info!("======= DONE: {}/{} - map {} =======", n, total, map);
        }
        tracing::info!("run finished: {}", summary);
        summary
    }

    /// Manifest, then resources, then the map file.
    pub fn run_map(&self, map: &str) -> MapReport {
        let (manifest, entries) = self.fetch_manifest(map);
        let resources = self.download_resources(&entries);

        let map_file = match ResourcePath::map_file_for(map) {
            Ok(path) => {
                tracing::info!("attempting to download map file {}", path);
                let outcome = download_resource(&self.fetcher, self.session.output_dir(), &path);
                log_outcome(&path.to_string(), &outcome);
                ResourceReport {
                    path: path.to_string(),
                    result: Ok(outcome),
                }
            }
            Err(e) => {
                tracing::warn!("map name {:?} rejected: {}", map, e);
                ResourceReport {
                    path: map.to_string(),
                    result: Err(e),
                }
            }
        };

        MapReport {
            map: map.to_string(),
            manifest,
            resources,
            map_file,
        }
    }

    /// Fetches `maps/<map>.res`, saves the raw body and returns the parsed entries.
    pub fn fetch_manifest(&self, map: &str) -> (ManifestOutcome, Vec<String>) {
        let path = match ResourcePath::manifest_for(map) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!("map name {:?} rejected: {}", map, e);
                return (ManifestOutcome::Rejected(e), Vec::new());
            }
        };

        let response = match self.fetcher.get(&path) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("error grabbing {}: {}", path, e);
                return (ManifestOutcome::Failed(e.into()), Vec::new());
            }
        };

        match response.status {
            200 => {}
            404 => {
                tracing::info!(
                    "{} not found, map probably has no res file; fetching the bsp only",
                    path
                );
                return (ManifestOutcome::Missing, Vec::new());
            }
            status => {
                tracing::warn!("error grabbing {}, status code {}", path, status);
                return (
                    ManifestOutcome::Failed(DownloadError::Http(status)),
                    Vec::new(),
                );
            }
        }

        let target = path.local_under(self.session.output_dir());
        let saved = match save_file(&target, &response.body) {
            Ok(()) => {
                tracing::debug!("wrote res file {}", target.display());
                true
            }
            Err(e) => {
                tracing::warn!("could not save res file: {}", e);
                false
            }
        };

        let text = String::from_utf8_lossy(&response.body);
        let entries = parse_manifest(&text);
        tracing::info!("parsed {}: {} resources", path, entries.len());
        (
            ManifestOutcome::Found {
                entries: entries.len(),
                saved,
            },
            entries,
        )
    }

    /// Validates and downloads manifest entries; reports come back in manifest order.
    ///
    /// With more than one job, the first occurrence of each valid entry is
    /// downloaded on the worker pool and the outcomes are logged afterwards, in
    /// manifest order. Repeated entries are handled inline after the pool, so
    /// they see the file their first occurrence wrote.
    pub fn download_resources(&self, entries: &[String]) -> Vec<ResourceReport> {
        let total = entries.len();
        let output_dir = self.session.output_dir();
        let parsed: Vec<Result<ResourcePath, ResourcePathError>> =
            entries.iter().map(|e| ResourcePath::parse(e)).collect();

        let mut pooled = if self.jobs > 1 {
            self.prefetch_unique(&parsed)
        } else {
            HashMap::new()
        };

        let mut reports = Vec::with_capacity(total);
        for (i, (entry, parsed)) in entries.iter().zip(parsed).enumerate() {
            let report = match parsed {
                Ok(path) => {
                    let outcome = match pooled.remove(&path) {
                        Some(outcome) => outcome,
                        None => {
                            tracing::info!(
                                "attempting to download {} - {}/{}",
                                path,
                                i + 1,
                                total
                            );
                            download_resource(&self.fetcher, output_dir, &path)
                        }
                    };
                    log_outcome(&path.to_string(), &outcome);
                    ResourceReport {
                        path: path.to_string(),
                        result: Ok(outcome),
                    }
                }
                Err(e) => {
                    tracing::warn!("skipping manifest entry {:?}: {}", entry, e);
                    ResourceReport {
                        path: entry.clone(),
                        result: Err(e),
                    }
                }
            };
            reports.push(report);
        }
        reports
    }

    /// Runs the pool over the first occurrence of each valid path.
    fn prefetch_unique(
        &self,
        parsed: &[Result<ResourcePath, ResourcePathError>],
    ) -> HashMap<ResourcePath, DownloadOutcome> {
        let mut seen = HashSet::new();
        let unique: Vec<ResourcePath> = parsed
            .iter()
            .filter_map(|p| p.as_ref().ok())
            .filter(|p| seen.insert(*p))
            .cloned()
            .collect();
        if unique.len() < 2 {
            return HashMap::new();
        }
        let outcomes =
            pool::download_all(&self.fetcher, self.session.output_dir(), &unique, self.jobs);
        unique.into_iter().zip(outcomes).collect()
    }
}

fn log_outcome(path: &str, outcome: &DownloadOutcome) {
    match outcome {
        DownloadOutcome::Downloaded { bytes } => {
            tracing::info!("downloaded {} ({} bytes)", path, bytes)
        }
        DownloadOutcome::AlreadyExists => tracing::info!("{} already exists, skipped", path),
        DownloadOutcome::NotFound => tracing::info!("{} does not exist on server", path),
        DownloadOutcome::Failed(e) => tracing::warn!("failed to download {}: {}", path, e),
    }
}
