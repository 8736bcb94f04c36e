//! End-to-end scenarios driven directly against TicToc's building blocks
//! (context, executor) rather than through `run_tictoc`, so each test can
//! inspect table state after the run window closes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use cc_concurrency::{Executor, TicTocExecutor};
use cc_engine::worker::run_worker;
use cc_engine::TicTocContext;
use cc_storage::ControlWord;
use cc_workload::UniformGenerator;

fn run_tictoc_window(
    ctx: &TicTocContext,
    worker_count: usize,
    rratio: u8,
    window: Duration,
) -> (u64, u64) {
    let stop = &ctx.stop;

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..worker_count)
            .map(|_| {
                let executor = TicTocExecutor::new(&ctx.table, &ctx.history);
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

/// A read-only TicToc workload has nothing to validate against a
/// concurrent write, so — same as Silo's S2 — it must never abort.
#[test]
fn read_only_workload_never_aborts() {
    let ctx = TicTocContext::new(100, 3);
    let (committed, aborted) = run_tictoc_window(&ctx, 3, 100, Duration::from_millis(300));

    assert!(committed > 0);
    assert_eq!(aborted, 0);
}

/// Four threads hammering a single hot record must still make forward
/// progress under lock contention without deadlocking, and the run must
/// end with the record unlocked and its wts strictly advanced.
#[test]
fn hotspot_contention_makes_progress_and_advances_wts() {
    let ctx = TicTocContext::new(1, 4);
    let (committed, _aborted) = run_tictoc_window(&ctx, 4, 0, Duration::from_millis(500));

    assert!(committed > 0);
    let word = ctx.table.get(0).load_acquire();
    assert!(!word.is_locked());
    assert!(word.wts() > 0);
}

/// A single writer against a ten-record table must leave every record's
/// wts strictly greater than zero once the run window closes — TicToc's
/// analogue of Silo's S1 TID-monotonicity scenario.
#[test]
fn single_writer_advances_every_record_wts() {
    let ctx = TicTocContext::new(10, 1);
    let (committed, _aborted) = run_tictoc_window(&ctx, 1, 0, Duration::from_millis(300));

    assert!(committed > 0);
    for key in 0..ctx.table.len() as u64 {
        let word = ctx.table.get(key).load_acquire();
        assert!(!word.is_locked());
        assert!(word.wts() > 0, "record {key} never advanced past its initial wts");
    }
}

/// A transaction that reads then commits leaves no lock behind, the same
/// "no stray locks" invariant Silo's executor upholds.
#[test]
fn committed_transaction_holds_no_locks() {
    let ctx = TicTocContext::new(4, 1);
    let mut a = TicTocExecutor::new(&ctx.table, &ctx.history);

    a.begin();
    let _ = a.read(0);
    assert!(a.validate());
    a.commit();

    let word = ctx.table.get(0).load_acquire();
    assert!(!word.is_locked());
}
