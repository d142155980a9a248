//! CLI for the FastDL map fetcher.

mod run;

use anyhow::Result;
use clap::Parser;
use fastdl_core::config;
use fastdl_core::logging::ConsoleLevel;
use std::path::PathBuf;

use run::run_fetch;

/// Download .bsp files with all their resources (listed in .res files) from a
/// FastDL server, driven by a text file of map names.
#[derive(Debug, Parser)]
#[command(name = "fastdl")]
#[command(about = "Download maps and their resources from a FastDL server", long_about = None)]
pub struct Cli {
    /// Base FastDL URL, including the game-mode folder (e.g. http://127.0.0.1/cstrike).
    #[arg(long, value_name = "URL")]
    pub fastdl_url: Option<String>,

    /// Newline-separated list of maps to download, one per line.
    #[arg(long, value_name = "FILE", default_value = "saved-maps.txt")]
    pub map_list: PathBuf,

    /// Directory the server's directory structure is mirrored into.
    #[arg(long, value_name = "DIR", default_value = "downloaded_maps/")]
    pub output_dir: PathBuf,

    /// Download up to N resources of a map at once (overrides `jobs` in config.toml).
    #[arg(long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Only print warnings and the per-map report, not every request.
    #[arg(long, short)]
    pub quiet: bool,
}

impl Cli {
    pub fn console_level(&self) -> ConsoleLevel {
        if self.quiet {
            ConsoleLevel::Quiet
        } else {
            ConsoleLevel::Progress
        }
    }

    pub fn run(self) -> Result<()> {
        tracing::debug!("args: {:?}", self);

        let Some(url) = self.fastdl_url.as_deref() else {
            anyhow::bail!(
                "you need to provide a FastDL base URL, e.g. fastdl --fastdl-url http://127.0.0.1/cstrike"
            );
        };

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let summary = run_fetch(url, &self.map_list, &self.output_dir, self.jobs, &cfg)?;
        println!("{}", summary);
        Ok(())
    }
}
