//! `fastdl --fastdl-url <url>`: fetch every map in the map list.

use anyhow::{Context, Result};
use fastdl_core::config::FastdlConfig;
use fastdl_core::fetch::CurlFetcher;
use fastdl_core::map_list::load_map_list;
use fastdl_core::orchestrator::{MapReport, Orchestrator, RunSummary};
use fastdl_core::session::Session;
use std::fmt::Write;
use std::path::Path;

/// Runs the whole map list. Only setup failures are errors; per-file failures
/// are printed and counted in the summary.
pub fn run_fetch(
    url: &str,
    map_list: &Path,
    output_dir: &Path,
    jobs: Option<usize>,
    cfg: &FastdlConfig,
) -> Result<RunSummary> {
    let session = Session::new(url, output_dir)?;
    if session
        .ensure_output_dir()
        .with_context(|| format!("create output dir {}", output_dir.display()))?
    {
        println!("Created directory {}", output_dir.display());
    }

    let maps = load_map_list(map_list)?;
    let jobs = jobs.unwrap_or(cfg.jobs).max(1);
    tracing::info!(
        "fetching {} maps from {} into {} ({} jobs)",
        maps.len(),
        session.base_url(),
        output_dir.display(),
        jobs
    );

    let fetcher = CurlFetcher::new(&session, cfg);
    let orchestrator = Orchestrator::new(fetcher, session).with_jobs(jobs);
    let summary = orchestrator.run(&maps, |n, total, report| {
        print!("{}", format_report(n, total, report));
    });
    Ok(summary)
}

/// Report block for one finished map, framed by START/DONE markers.
pub fn format_report(n: usize, total: usize, report: &MapReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "======= START: {}/{} - {} =======", n, total, report.map);
    let _ = writeln!(out, "  res file: {}", report.manifest);
    for file in report.files() {
        match &file.result {
            Ok(outcome) => {
                let _ = writeln!(out, "  {}: {}", file.path, outcome);
            }
            Err(e) => {
                let _ = writeln!(out, "  {}: rejected ({})", file.path, e);
            }
        }
    }
    let _ = writeln!(out, "======= DONE: {}/{} - {} =======", n, total, report.map);
    out
}
