//! Bounded worker pool for one map's resources.
//!
//! Workers pull from a shared queue and send `(index, outcome)` back over a
//! channel; outcomes are returned in input order regardless of completion order.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::{mpsc, Mutex, PoisonError};
use std::thread;

use crate::download::{download_resource, DownloadOutcome};
use crate::fetch::Fetch;
use crate::resource_path::ResourcePath;

pub(super) fn download_all(
    fetcher: &dyn Fetch,
    output_dir: &Path,
    paths: &[ResourcePath],
    workers: usize,
) -> Vec<DownloadOutcome> {
    let count = paths.len();
    if count == 0 {
        return Vec::new();
    }

    let work: Mutex<VecDeque<(usize, &ResourcePath)>> =
        Mutex::new(paths.iter().enumerate().collect());
    let (tx, rx) = mpsc::channel();
    let num_workers = workers.clamp(1, count);

    thread::scope(|s| {
        for _ in 0..num_workers {
            let work = &work;
            let tx = tx.clone();
            s.spawn(move || loop {
                let next = work
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .pop_front();
                let Some((index, path)) = next else {
                    break;
                };
                let outcome = download_resource(fetcher, output_dir, path);
                if tx.send((index, outcome)).is_err() {
                    break;
                }
            });
        }
    });
    drop(tx);

    let mut results: Vec<(usize, DownloadOutcome)> = rx.into_iter().collect();
    results.sort_by_key(|(index, _)| *index);
    results.into_iter().map(|(_, outcome)| outcome).collect()
}
