//! Top-level orchestration: spawn workers (and, for Silo, the epoch
//! advancer), run for the configured duration, and fold the results.

use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use cc_concurrency::{SiloExecutor, TicTocExecutor};
use cc_core::BenchmarkConfig;
use cc_workload::{ProcedureGenerator, UniformGenerator, ZipfGenerator};

use crate::affinity::{core_ids_for, pin_current_thread};
use crate::context::{SiloContext, TicTocContext};
use crate::epoch_worker::run_epoch_advancer;
use crate::result::BenchmarkResult;
use crate::worker::run_worker;

fn make_generator(config: &BenchmarkConfig) -> Box<dyn ProcedureGenerator + Send> {
    if config.ycsb {
        Box::new(ZipfGenerator::new(config.tuple_num, config.rratio, config.zipf_skew))
    } else {
        Box::new(UniformGenerator::new(config.tuple_num, config.rratio))
    }
}

/// Run a Silo benchmark to completion and return the summed result.
pub fn run_silo(config: &BenchmarkConfig) -> BenchmarkResult {
    let worker_count = config.worker_count();
    let ctx = SiloContext::new(config.tuple_num, worker_count);
    let coordinator = cc_concurrency::EpochCoordinator::new(&ctx.global_epoch, &ctx.worker_epochs);

    tracing::debug!(worker_count, tuple_num = config.tuple_num, "starting silo run");

    // Reference-typed bindings (`Copy`) so each `move` closure below only
    // copies a pointer, never tries to move a field out of `ctx`.
    let stop = &ctx.stop;

    let cores = core_ids_for(worker_count + 1);
    if cores.is_none() {
        tracing::warn!("not enough logical cores to pin threads; running unpinned");
    }
    let epoch_core = cores.as_ref().map(|c| c[0]);
    let worker_core = |id: usize| cores.as_ref().map(|c| c[id + 1]);

    let start = Instant::now();
    let results = std::thread::scope(|scope| {
        scope.spawn(move || {
            pin_current_thread(epoch_core);
            run_epoch_advancer(&coordinator, config.epoch_time_ms, stop)
        });

        let handles: Vec<_> = (0..worker_count)
            .map(|id| {
                let executor = SiloExecutor::new(&ctx.table, &ctx.global_epoch, &ctx.worker_epochs[id]);
                let generator = make_generator(config);
                let max_ope = config.max_ope;
                let core = worker_core(id);
                scope.spawn(move || {
                    pin_current_thread(core);
                    run_worker(executor, generator, max_ope, stop)
                })
            })
            .collect();

        std::thread::sleep(Duration::from_secs(config.extime_secs));
        stop.store(true, Ordering::Relaxed);

        handles.into_iter().map(|h| h.join().unwrap()).collect::<Vec<_>>()
    });
    let elapsed = start.elapsed();

    let summary = BenchmarkResult::from_workers(&results, elapsed);
    tracing::info!(
        committed = summary.committed,
        aborted = summary.aborted,
        throughput = summary.throughput(),
        "silo run finished"
    );
    summary
}

/// Run a TicToc benchmark to completion and return the summed result.
pub fn run_tictoc(config: &BenchmarkConfig) -> BenchmarkResult {
    let worker_count = config.worker_count();
    let ctx = TicTocContext::new(config.tuple_num);

    tracing::debug!(worker_count, tuple_num = config.tuple_num, "starting tictoc run");

    let stop = &ctx.stop;

    let cores = core_ids_for(worker_count);
    if cores.is_none() {
        tracing::warn!("not enough logical cores to pin threads; running unpinned");
    }

    let start = Instant::now();
    let results = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..worker_count)
            .map(|id| {
                let executor = TicTocExecutor::new(&ctx.table, &ctx.history);
                let generator = make_generator(config);
                let max_ope = config.max_ope;
                let core = cores.as_ref().map(|c| c[id]);
                scope.spawn(move || {
                    pin_current_thread(core);
                    run_worker(executor, generator, max_ope, stop)
                })
            })
            .collect();

        std::thread::sleep(Duration::from_secs(config.extime_secs));
        stop.store(true, Ordering::Relaxed);

        handles.into_iter().map(|h| h.join().unwrap()).collect::<Vec<_>>()
    });
    let elapsed = start.elapsed();

    let summary = BenchmarkResult::from_workers(&results, elapsed);
    tracing::info!(
        committed = summary.committed,
        aborted = summary.aborted,
        throughput = summary.throughput(),
        "tictoc run finished"
    );
    summary
}
