//! Parallel indexing driver.
//!
//! Partitions an index range into contiguous per-worker slices and runs
//! them on a dedicated rayon pool. A panicking worker unwinds through the
//! pool join and is reported as [`Error::IndexBuildFailure`] rather than
//! tearing down the caller.

use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};

use rayon::prelude::*;

use crate::error::Error;

/// Split `n` units into `m` contiguous parts: the first m-1 parts get
/// `n / m` units, the last takes the remainder. `m = 0` yields no parts.
pub fn divide_evenly(n: usize, m: usize) -> Vec<usize> {
    assert!(m <= n, "cannot divide {} units across {} workers", n, m);
    if m == 0 {
        return Vec::new();
    }
    let base = n / m;
    let mut parts = vec![base; m];
    parts[m - 1] = n - (m - 1) * base;
    parts
}

fn partition(n: usize, workers: usize) -> Vec<Range<usize>> {
    let mut ranges = Vec::with_capacity(workers);
    let mut start = 0;
    for size in divide_evenly(n, workers) {
        ranges.push(start..start + size);
        start += size;
    }
    ranges
}

/// Run `f(i, &items[i])` for every index, partitioned across at most
/// `threads` workers (clamped to the item count). Each worker owns one
/// contiguous range. Returns once every call has finished.
pub fn peach_indexed<T, F>(items: &[T], threads: usize, f: F) -> Result<(), Error>
where
    T: Sync,
    F: Fn(usize, &T) + Sync,
{
    if items.is_empty() {
        return Ok(());
    }
    let workers = threads.min(items.len()).max(1);
    let ranges = partition(items.len(), workers);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|_| Error::IndexBuildFailure)?;

    let run = AssertUnwindSafe(|| {
        pool.install(|| {
            ranges.par_iter().for_each(|range| {
                for i in range.clone() {
                    f(i, &items[i]);
                }
            });
        });
    });
    panic::catch_unwind(run).map_err(|_| Error::IndexBuildFailure)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;

    #[test]
    fn test_divide_evenly_zero_workers() {
        assert!(divide_evenly(0, 0).is_empty());
    }

    #[test]
    fn test_divide_evenly_exact() {
        assert_eq!(divide_evenly(12, 4), vec![3, 3, 3, 3]);
    }

    #[test]
    fn test_divide_evenly_remainder_goes_last() {
        assert_eq!(divide_evenly(10, 3), vec![3, 3, 4]);
        assert_eq!(divide_evenly(7, 2), vec![3, 4]);
    }

    #[test]
    fn test_divide_evenly_one_each() {
        assert_eq!(divide_evenly(3, 3), vec![1, 1, 1]);
    }

    #[test]
    #[should_panic]
    fn test_divide_evenly_more_workers_than_units() {
        divide_evenly(2, 3);
    }

    #[test]
    fn test_peach_covers_every_index_once() {
        let items: Vec<usize> = (0..97).collect();
        let hits: Vec<AtomicUsize> = (0..97).map(|_| AtomicUsize::new(0)).collect();
        peach_indexed(&items, 4, |i, &v| {
            assert_eq!(i, v);
            hits[i].fetch_add(1, Ordering::Relaxed);
        })
        .unwrap();
        assert!(hits.iter().all(|h| h.load(Ordering::Relaxed) == 1));
    }

    #[test]
    fn test_peach_clamps_threads_to_len() {
        let items = [10, 20];
        let seen = Mutex::new(Vec::new());
        peach_indexed(&items, 16, |i, &v| {
            seen.lock().unwrap().push((i, v));
        })
        .unwrap();
        let mut got = seen.into_inner().unwrap();
        got.sort();
        assert_eq!(got, vec![(0, 10), (1, 20)]);
    }

    #[test]
    fn test_peach_empty_input() {
        let items: [u8; 0] = [];
        peach_indexed(&items, 4, |_, _| panic!("must not be called")).unwrap();
    }

    #[test]
    fn test_peach_propagates_worker_panic() {
        let items = [1, 2, 3, 4];
        let result = peach_indexed(&items, 2, |i, _| {
            if i == 2 {
                panic!("worker failure");
            }
        });
        assert!(matches!(result, Err(Error::IndexBuildFailure)));
    }
}
