//! End-to-end scenarios driven directly against Silo's building blocks
//! (context, executor, epoch advancer) rather than through `run_silo`,
//! so each test can inspect table and epoch state after the run window
//! closes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use cc_concurrency::{EpochCoordinator, Executor, SiloExecutor};
use cc_engine::epoch_worker::run_epoch_advancer;
use cc_engine::worker::run_worker;
use cc_engine::SiloContext;
use cc_storage::ControlWord;
use cc_workload::UniformGenerator;

fn run_silo_window(
    ctx: &SiloContext,
    worker_count: usize,
    rratio: u8,
    window: Duration,
) -> (u64, u64) {
    let coordinator = EpochCoordinator::new(&ctx.global_epoch, &ctx.worker_epochs);
    let stop = &ctx.stop;

    std::thread::scope(|scope| {
        scope.spawn(|| run_epoch_advancer(&coordinator, 5, stop));

        let handles: Vec<_> = (0..worker_count)
            .map(|id| {
                let executor = SiloExecutor::new(&ctx.table, &ctx.global_epoch, &ctx.worker_epochs[id]);
                let generator = Box::new(UniformGenerator::new(ctx.table.len() as u64, rratio));
                scope.spawn(move || run_worker(executor, generator, 2, stop))
            })
            .collect();

        std::thread::sleep(window);
        stop.store(true, Ordering::Relaxed);

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let committed: u64 = results.iter().map(|r| r.committed).sum();
        let aborted: u64 = results.iter().map(|r| r.aborted).sum();
        (committed, aborted)
    })
}

/// S1: a single writer against a ten-record table must leave every record's
/// TID strictly greater than zero once the run window closes.
#[test]
fn s1_single_writer_advances_every_record_tid() {
    let ctx = SiloContext::new(10, 1);
    let (committed, _aborted) = run_silo_window(&ctx, 1, 0, Duration::from_millis(300));

    assert!(committed > 0, "a lone writer should commit at least one transaction");
    for key in 0..ctx.table.len() as u64 {
        let word = ctx.table.get(key).load_acquire();
        assert!(!word.is_locked());
        assert!(word.tid() > 0, "record {key} never advanced past its initial TID");
    }
}

/// S2: a read-only workload (RRATIO=100) never has anything to validate
/// against a concurrent writer, so it must commit every attempt.
#[test]
fn s2_read_only_workload_never_aborts() {
    let ctx = SiloContext::new(100, 3);
    let (committed, aborted) = run_silo_window(&ctx, 3, 100, Duration::from_millis(300));

    assert!(committed > 0);
    assert_eq!(aborted, 0, "a pure-read workload has no write set to invalidate a read set");
}

/// S3: four threads hammering a single hot record must still make forward
/// progress under lock contention — some aborts are expected, but the run
/// must neither deadlock (the test itself would hang) nor abort everything.
#[test]
fn s3_hotspot_contention_makes_progress_without_deadlock() {
    let ctx = SiloContext::new(1, 4);
    let (committed, _aborted) = run_silo_window(&ctx, 4, 0, Duration::from_millis(500));

    assert!(committed > 0, "hotspot contention must still allow some commits through");
    let word = ctx.table.get(0).load_acquire();
    assert!(!word.is_locked(), "the run must end with every lock released");
}

/// S6: over a window many multiples of the epoch period, the global epoch
/// must have advanced well past zero.
#[test]
fn s6_epoch_advances_across_a_multi_thread_run() {
    let ctx = SiloContext::new(256, 3);
    let coordinator = EpochCoordinator::new(&ctx.global_epoch, &ctx.worker_epochs);
    let stop = &ctx.stop;

    std::thread::scope(|scope| {
        scope.spawn(|| run_epoch_advancer(&coordinator, 5, stop));

        let handles: Vec<_> = (0..3)
            .map(|id| {
                let executor = SiloExecutor::new(&ctx.table, &ctx.global_epoch, &ctx.worker_epochs[id]);
                let generator = Box::new(UniformGenerator::new(ctx.table.len() as u64, 80));
                scope.spawn(move || run_worker(executor, generator, 4, stop))
            })
            .collect();

        std::thread::sleep(Duration::from_millis(500));
        stop.store(true, Ordering::Relaxed);
        for h in handles {
            h.join().unwrap();
        }
    });

    // 500ms at a 5ms epoch period is ~100 theoretical advances; require only
    // a fraction of that to stay robust against scheduling jitter under CI
    // load while still catching an advancer that never runs at all.
    assert!(
        coordinator.current() >= 10,
        "expected the epoch to advance well past zero over a 100-period window, got {}",
        coordinator.current()
    );
}

/// A single in-flight transaction left mid-flight (no commit, no abort)
/// must not leave any lock held once the executor is simply dropped —
/// exercising the same "no stray locks" property S3 checks, but without
/// contention.
#[test]
fn abandoned_transaction_holds_no_locks_after_successful_commit_elsewhere() {
    let ctx = SiloContext::new(4, 1);
    let mut a = SiloExecutor::new(&ctx.table, &ctx.global_epoch, &ctx.worker_epochs[0]);

    a.begin();
    let _ = a.read(0);
    assert!(a.validate());
    a.commit();

    let word = ctx.table.get(0).load_acquire();
    assert!(!word.is_locked());
}
