//! Command-line surface: one subcommand per protocol, each taking the nine
//! positional arguments of the reference tool.

use clap::{Arg, ArgMatches, Command};

use cc_core::{BenchmarkConfig, Error, Protocol, Result};

fn protocol_subcommand(name: &'static str) -> Command {
    Command::new(name)
        .about(format!("run the benchmark under the {name} protocol"))
        .arg(
            Arg::new("tuple_num")
                .help("size of the table: the dense key space is [0, TUPLE_NUM)")
                .required(true)
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("max_ope")
                .help("number of operations per transaction")
                .required(true)
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("thread_num")
                .help("number of threads (Silo reserves one for the epoch advancer)")
                .required(true)
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("rratio")
                .help("percentage of read operations, 0..=100")
                .required(true)
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new("zipf_skew")
                .help("Zipfian skew in [0, 1)")
                .required(true)
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("ycsb")
                .help("ON selects the Zipfian key distribution, OFF selects uniform")
                .required(true)
                .value_parser(["ON", "OFF"]),
        )
        .arg(
            Arg::new("clock_per_us")
                .help("CPU clock cycles per microsecond (accepted for CLI compatibility; unused for timing)")
                .required(true)
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("epoch_time")
                .help("epoch advance period in milliseconds (Silo only)")
                .required(true)
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("extime")
                .help("benchmark duration in seconds")
                .required(true)
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("stats")
                .long("stats")
                .help("print the run's abort rate to stdout after the throughput line")
                .action(clap::ArgAction::SetTrue),
        )
}

/// Build the top-level `ccbench <protocol> ...` command.
pub fn build_cli() -> Command {
    Command::new("ccbench")
        .about("Optimistic concurrency-control benchmark engine (Silo, TicToc)")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(protocol_subcommand("silo"))
        .subcommand(protocol_subcommand("tictoc"))
}

fn get<T: Clone + Send + Sync + 'static>(matches: &ArgMatches, name: &str) -> T {
    matches
        .get_one::<T>(name)
        .cloned()
        .unwrap_or_else(|| unreachable!("clap guarantees required arg '{name}' is present"))
}

/// Whether `--stats` was passed to the chosen protocol subcommand.
pub fn stats_requested(matches: &ArgMatches) -> bool {
    matches
        .subcommand()
        .map(|(_, sub)| sub.get_flag("stats"))
        .unwrap_or(false)
}

/// Parse and validate the full configuration from top-level matches.
pub fn parse_config(matches: &ArgMatches) -> Result<BenchmarkConfig> {
    let (name, sub) = matches
        .subcommand()
        .ok_or_else(|| Error::Config("a protocol subcommand is required".into()))?;
    let protocol = Protocol::parse(name)?;

    let tuple_num: u64 = get(sub, "tuple_num");
    let max_ope: u64 = get(sub, "max_ope");
    let thread_num: u64 = get(sub, "thread_num");
    let rratio: u32 = get(sub, "rratio");
    let zipf_skew: f64 = get(sub, "zipf_skew");
    let ycsb: String = get(sub, "ycsb");
    let clock_per_us: f64 = get(sub, "clock_per_us");
    let epoch_time: u64 = get(sub, "epoch_time");
    let extime: u64 = get(sub, "extime");

    BenchmarkConfig::validate(
        protocol,
        tuple_num,
        max_ope as usize,
        thread_num as usize,
        rratio,
        zipf_skew,
        ycsb == "ON",
        clock_per_us,
        epoch_time,
        extime,
    )
}
