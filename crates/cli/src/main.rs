//! `ccbench`: the benchmark's command-line entry point.

mod args;
mod bootstrap;

use std::process;

use cc_core::Protocol;

fn main() {
    bootstrap::init_tracing();

    let matches = args::build_cli().get_matches();
    let config = match args::parse_config(&matches) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(%err, "invalid configuration");
            process::exit(1);
        }
    };

    tracing::debug!(?config, "parsed configuration");
    let print_stats = args::stats_requested(&matches);

    let summary = match config.protocol {
        Protocol::Silo => cc_engine::run_silo(&config),
        Protocol::TicToc => cc_engine::run_tictoc(&config),
    };

    tracing::info!(abort_rate = summary.abort_rate(), "run complete");
    println!("{:.2}", summary.throughput());
    if print_stats {
        println!("{:.4}", summary.abort_rate());
    }
}
