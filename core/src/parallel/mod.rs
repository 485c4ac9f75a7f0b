//! Parallel execution

use std::thread;

/// Default number of voxels handed to a worker at a time.
pub const DEFAULT_BLOCK_SIZE: usize = 4096;

/// Execution configuration passed explicitly into the hashing and
/// reconstruction routines.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Parallelism {
    /// Number of worker threads.
    threads: usize,

    /// Number of voxels per work item.
    block_size: usize,
}

impl Parallelism {
    /// Returns a new `Parallelism`. The thread count is clamped to
    /// `[1, logical CPUs]` and the block size to at least 1.
    ///
    /// * `threads`    - Requested number of worker threads.
    /// * `block_size` - Requested number of voxels per work item.
    pub fn new(threads: usize, block_size: usize) -> Self {
        let max_threads = num_cpus::get();
        let threads = match threads {
            0 => {
                warn!("Invalid nthreads 0, using 1");
                1
            }
            n if n > max_threads => {
                warn!("Num threads > max logical CPUs {}", max_threads);
                max_threads
            }
            n => n,
        };
        let block_size = if block_size == 0 {
            warn!("Invalid block size 0, using {}", DEFAULT_BLOCK_SIZE);
            DEFAULT_BLOCK_SIZE
        } else {
            block_size
        };
        Self { threads, block_size }
    }

    /// Returns a single-threaded configuration.
    pub fn serial() -> Self {
        Self {
            threads: 1,
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }

    /// Returns the number of worker threads.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Returns the number of voxels per work item.
    pub fn block_size(&self) -> usize {
        self.block_size
    }
}

impl Default for Parallelism {
    fn default() -> Self {
        Self::serial()
    }
}

/// Splits `data` into consecutive chunks of `chunk_len` elements (the last
/// chunk may be shorter) and calls `f(chunk_index, chunk)` for each of them.
/// Chunks are distributed to a pool of scoped worker threads through a bounded
/// channel. Each chunk is visited exactly once, so the result does not depend
/// on scheduling as long as `f` only writes into its own chunk.
///
/// * `data`        - The data to process.
/// * `chunk_len`   - Number of elements per chunk.
/// * `parallelism` - Execution configuration.
/// * `f`           - Function applied to each chunk.
pub fn for_each_chunk_mut<T, F>(data: &mut [T], chunk_len: usize, parallelism: &Parallelism, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync,
{
    let chunk_len = chunk_len.max(1);
    let n_chunks = (data.len() + chunk_len - 1) / chunk_len;
    let n_threads = parallelism.threads().min(n_chunks);

    if n_threads <= 1 {
        for (index, chunk) in data.chunks_mut(chunk_len).enumerate() {
            f(index, chunk);
        }
        return;
    }

    let f = &f;
    thread::scope(|scope| {
        let (tx_worker, rx_worker) = crossbeam_channel::bounded::<(usize, &mut [T])>(n_threads);

        // Spawn worker threads.
        for _ in 0..n_threads {
            let rx_worker = rx_worker.clone();
            scope.spawn(move || {
                for (index, chunk) in rx_worker.iter() {
                    f(index, chunk);
                }
            });
        }
        drop(rx_worker); // Drop extra since we've cloned one for each worker.

        // Send work.
        for work in data.chunks_mut(chunk_len).enumerate() {
            if tx_worker.send(work).is_err() {
                // All workers are gone, which only happens if one panicked;
                // the scope re-raises that panic on exit.
                break;
            }
        }
    });
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_configuration() {
        let p = Parallelism::new(0, 0);
        assert_eq!(p.threads(), 1);
        assert_eq!(p.block_size(), DEFAULT_BLOCK_SIZE);

        let p = Parallelism::new(usize::MAX, 7);
        assert_eq!(p.threads(), num_cpus::get());
        assert_eq!(p.block_size(), 7);
    }

    #[test]
    fn visits_every_chunk_once() {
        for threads in [1, 2, 4] {
            let parallelism = Parallelism::new(threads, 1);
            let mut data = vec![0_usize; 103];
            for_each_chunk_mut(&mut data, 10, &parallelism, |index, chunk| {
                for (k, v) in chunk.iter_mut().enumerate() {
                    *v += index * 10 + k;
                }
            });
            let expected: Vec<usize> = (0..103).collect();
            assert_eq!(data, expected);
        }
    }

    #[test]
    fn handles_empty_data() {
        let mut data: Vec<f64> = vec![];
        for_each_chunk_mut(&mut data, 4, &Parallelism::new(2, 4), |_, _| {
            panic!("no chunks expected");
        });
    }
}
