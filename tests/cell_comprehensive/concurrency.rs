//! ObservableCell Concurrency Tests
//!
//! Tests for thread safety:
//! - Concurrent increments through operate
//! - Concurrent reads never see torn values
//! - Hook log forms a linear chain of writes

use crate::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Barrier;
use std::thread;
use std::time::Duration;

/// N concurrent increments from 0 end at exactly N
#[test]
fn test_concurrent_operate_loses_no_increment() {
    init_tracing();
    let cell = Arc::new(ObservableCell::new([with_init_value(0u64)]));

    const NUM_WRITERS: usize = 8;
    const OPS_PER_THREAD: usize = 500;

    let barrier = Arc::new(Barrier::new(NUM_WRITERS));
    let handles: Vec<_> = (0..NUM_WRITERS)
        .map(|_| {
            let cell = Arc::clone(&cell);
            let barrier = Arc::clone(&barrier);

            thread::spawn(move || {
                barrier.wait();
                for _ in 0..OPS_PER_THREAD {
                    cell.operate(|n| n + 1);
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(cell.get(), (NUM_WRITERS * OPS_PER_THREAD) as u64);
}

/// Each write's old value is the previous write's new value
#[test]
fn test_hook_log_is_linear_chain() {
    let (cell, sets, changes) = recording_cell(0i64);
    let cell = Arc::new(cell);

    const NUM_WRITERS: usize = 6;
    const OPS_PER_THREAD: usize = 200;

    let barrier = Arc::new(Barrier::new(NUM_WRITERS));
    let handles: Vec<_> = (0..NUM_WRITERS)
        .map(|_| {
            let cell = Arc::clone(&cell);
            let barrier = Arc::clone(&barrier);

            thread::spawn(move || {
                barrier.wait();
                for _ in 0..OPS_PER_THREAD {
                    cell.operate(|n| n + 1);
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    let total = (NUM_WRITERS * OPS_PER_THREAD) as i64;
    let sets = sets.lock();
    assert_eq!(sets.len() as i64, total);
    for (i, (old, new)) in sets.iter().enumerate() {
        assert_eq!(*old, i as i64);
        assert_eq!(*new, i as i64 + 1);
    }
    assert_eq!(*changes.lock(), *sets);
    assert_eq!(cell.get(), total);
}

/// Concurrent set calls: every old value was written by someone
#[test]
fn test_concurrent_set_last_write_is_visible() {
    let (cell, sets, _changes) = recording_cell(0usize);

    const NUM_WRITERS: usize = 4;
    const WRITES_PER_THREAD: usize = 100;

    let barrier = Barrier::new(NUM_WRITERS);
    thread::scope(|s| {
        for t in 0..NUM_WRITERS {
            let cell = &cell;
            let barrier = &barrier;
            s.spawn(move || {
                barrier.wait();
                for j in 0..WRITES_PER_THREAD {
                    cell.set(t * WRITES_PER_THREAD + j + 1);
                }
            });
        }
    });

    let sets = sets.lock();
    assert_eq!(sets.len(), NUM_WRITERS * WRITES_PER_THREAD);
    assert_eq!(sets[0].0, 0);
    for pair in sets.windows(2) {
        assert_eq!(pair[0].1, pair[1].0);
    }
    assert_eq!(cell.get(), sets.last().unwrap().1);
}

/// Readers see either the old or the new value, never a mix
#[test]
fn test_concurrent_reads_never_torn() {
    let cell = ObservableCell::new([with_init_value([0u64; 16])]);
    let done = AtomicBool::new(false);

    const NUM_READERS: usize = 4;
    const WRITES: u64 = 2_000;

    thread::scope(|s| {
        for _ in 0..NUM_READERS {
            s.spawn(|| {
                while !done.load(Ordering::Acquire) {
                    let snapshot = cell.get();
                    assert!(snapshot.iter().all(|v| *v == snapshot[0]));
                }
            });
        }

        s.spawn(|| {
            for i in 1..=WRITES {
                cell.set([i; 16]);
            }
            done.store(true, Ordering::Release);
        });
    });

    assert_eq!(cell.get(), [WRITES; 16]);
}

/// The hook holds the write lock, so readers wait for it
#[test]
fn test_hook_runs_before_lock_release() {
    let entered = Arc::new(Barrier::new(2));
    let release = Arc::new(Barrier::new(2));
    let hook_entered = Arc::clone(&entered);
    let hook_release = Arc::clone(&release);
    let cell = Arc::new(ObservableCell::new([with_on_set(move |_: &u32, _: &u32| {
        hook_entered.wait();
        hook_release.wait();
    })]));

    let writer = {
        let cell = Arc::clone(&cell);
        thread::spawn(move || cell.set(1))
    };

    // Writer is parked inside the hook and still owns the lock.
    entered.wait();
    assert_eq!(cell.try_get(), Err(Error::WouldBlock));
    assert_eq!(cell.try_set(2), Err(Error::WouldBlock));
    assert!(cell.get_timeout(Duration::from_millis(5)).unwrap_err().is_timeout());

    // Let the hook return; the blocking read then sees the write.
    release.wait();
    assert_eq!(cell.get(), 1);
    writer.join().unwrap();
}

/// Bounded waits give up without writing
#[test]
fn test_set_timeout_under_contention() {
    let (cell, sets, _changes) = recording_cell(0u8);
    let cell = Arc::new(cell);
    let gate = Arc::new(Barrier::new(2));
    let release = Arc::new(Barrier::new(2));

    let holder = {
        let cell = Arc::clone(&cell);
        let gate = Arc::clone(&gate);
        let release = Arc::clone(&release);
        thread::spawn(move || {
            cell.with(|_| {
                gate.wait();
                release.wait();
            })
        })
    };

    // A reader holds the lock: reads share it, writes time out.
    gate.wait();
    let wait = Duration::from_millis(20);
    assert_eq!(cell.get_timeout(wait), Ok(0));
    let err = cell.set_timeout(1, wait).unwrap_err();
    assert!(err.is_timeout());
    assert!(err.is_retryable());

    release.wait();
    holder.join().unwrap();

    assert!(sets.lock().is_empty());
    assert_eq!(cell.set_timeout(1, wait), Ok(()));
    assert_eq!(*sets.lock(), vec![(0, 1)]);
}
