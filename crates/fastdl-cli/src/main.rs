use clap::Parser;
use fastdl_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();

    // Console level comes from the flags, so logging starts right after parsing.
    logging::init_logging(cli.console_level());

    // Individual download failures never reach here.
    if let Err(err) = cli.run() {
        eprintln!("fastdl error: {:#}", err);
        std::process::exit(1);
    }
}
