//! The protocol-agnostic worker harness: generate, execute, retry.

use std::sync::atomic::{AtomicBool, Ordering};

use cc_concurrency::{Executor, Operation, TransactionStatus};
use cc_workload::ProcedureGenerator;

use crate::result::WorkerResult;

/// Run one worker to completion: repeatedly generate a procedure, execute
/// it against `executor`, and retry on abort, until `stop` is observed.
///
/// A transaction that is preemptively aborted mid-procedure (TicToc, on a
/// read) short-circuits the remaining operations rather than running them
/// against an executor that has already decided the transaction cannot
/// serialize — matching the intent of that abort, not just its symptom.
pub fn run_worker<E: Executor>(
    mut executor: E,
    mut generator: Box<dyn ProcedureGenerator + Send>,
    max_ope: usize,
    stop: &AtomicBool,
) -> WorkerResult {
    let mut buffer = vec![Operation::Read(0); max_ope];
    let mut result = WorkerResult::default();

    while !stop.load(Ordering::Relaxed) {
        generator.fill(&mut buffer);

        loop {
            executor.begin();
            for op in &buffer {
                match *op {
                    Operation::Read(key) => {
                        executor.read(key);
                    }
                    Operation::Write(key, value) => {
                        executor.write(key, value);
                    }
                }
                if executor.status() == TransactionStatus::Aborted {
                    break;
                }
            }

            let committed = executor.status() != TransactionStatus::Aborted && executor.validate();
            if committed {
                executor.commit();
                result.committed += 1;
                break;
            }

            executor.abort();
            result.aborted += 1;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use cc_concurrency::SiloExecutor;
    use cc_storage::{SiloTidWord, Table, VAL_SIZE};
    use cc_workload::UniformGenerator;
    use std::sync::atomic::AtomicU32;

    #[test]
    fn worker_stops_when_flag_is_set() {
        let table = Table::build(16, |_| SiloTidWord::default(), |_| [0; VAL_SIZE]);
        let (global_epoch, local_epoch) = (AtomicU32::new(0), AtomicU32::new(0));
        let executor = SiloExecutor::new(&table, &global_epoch, &local_epoch);
        let generator = Box::new(UniformGenerator::new(16, 50));
        let stop = AtomicBool::new(true);

        let result = run_worker(executor, generator, 4, &stop);
        assert_eq!(result.committed, 0);
        assert_eq!(result.aborted, 0);
    }

    #[test]
    fn worker_commits_transactions_before_stopping() {
        let table = Table::build(16, |_| SiloTidWord::default(), |_| [0; VAL_SIZE]);
        let (global_epoch, local_epoch) = (AtomicU32::new(0), AtomicU32::new(0));
        let executor = SiloExecutor::new(&table, &global_epoch, &local_epoch);
        let generator = Box::new(UniformGenerator::new(16, 50));
        let stop = AtomicBool::new(false);

        // A single-threaded run never aborts on conflicts (no contention),
        // so after a bounded number of iterations we can safely flip stop.
        std::thread::scope(|scope| {
            let handle = scope.spawn(|| run_worker(executor, generator, 4, &stop));
            std::thread::sleep(std::time::Duration::from_millis(20));
            stop.store(true, Ordering::Relaxed);
            let result = handle.join().unwrap();
            assert!(result.committed > 0);
            assert_eq!(result.aborted, 0);
        });
    }
}
