//! C9: bounded worker pool with a fire-and-join barrier per block, ported
//! from `original_source/src/utility/basic_thread_pool.h`'s
//! `PushTask`/`WaitAll` shape. The only raw-thread precedent in the teacher
//! repo is `network.rs`'s `thread::spawn` for the rtl_tcp reader; this pool
//! generalizes that to a fixed set of FIFO workers plus a completion
//! barrier, since spec.md §4.8/§5 ask for fan-out without work stealing.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};

type Task = Box<dyn FnOnce() + Send + 'static>;

struct Shared {
    queue: Mutex<VecDeque<Task>>,
    queue_cv: Condvar,
    pending: Mutex<usize>,
    pending_cv: Condvar,
    shutdown: Mutex<bool>,
}

/// A bounded pool of `W` worker threads. `submit` enqueues a unit of work
/// (never rejects); `barrier` blocks until every task submitted so far has
/// completed.
pub struct WorkerPool {
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// `workers` must be at least 1; the caller typically passes
    /// `min(available_parallelism, K)` per spec.md §4.8.
    pub fn new(workers: usize) -> Self {
        let workers = workers.max(1);
        let shared = Arc::new(Shared {
            queue: Mutex::new(VecDeque::new()),
            queue_cv: Condvar::new(),
            pending: Mutex::new(0),
            pending_cv: Condvar::new(),
            shutdown: Mutex::new(false),
        });

        let handles = (0..workers)
            .map(|_| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || worker_loop(shared))
            })
            .collect();

        WorkerPool {
            shared,
            workers: handles,
        }
    }

    /// Enqueues a unit of work. Tasks are independent; no ordering between
    /// them is required, and a task may not submit further tasks.
    pub fn submit<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        {
            let mut pending = self.shared.pending.lock().unwrap();
            *pending += 1;
        }
        {
            let mut queue = self.shared.queue.lock().unwrap();
            queue.push_back(Box::new(task));
        }
        self.shared.queue_cv.notify_one();
    }

    /// Blocks the caller until all submitted tasks have completed. Acts as
    /// the release/acquire edge: writes done inside tasks are visible to
    /// the caller once this returns.
    pub fn barrier(&self) {
        let mut pending = self.shared.pending.lock().unwrap();
        while *pending != 0 {
            pending = self.shared.pending_cv.wait(pending).unwrap();
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        *self.shared.shutdown.lock().unwrap() = true;
        self.shared.queue_cv.notify_all();
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }
}

fn worker_loop(shared: Arc<Shared>) {
    loop {
        let task = {
            let mut queue = shared.queue.lock().unwrap();
            loop {
                if let Some(task) = queue.pop_front() {
                    break Some(task);
                }
                if *shared.shutdown.lock().unwrap() {
                    return;
                }
                queue = shared.queue_cv.wait(queue).unwrap();
            }
        };

        if let Some(task) = task {
            task();
            let mut pending = shared.pending.lock().unwrap();
            *pending -= 1;
            if *pending == 0 {
                shared.pending_cv.notify_all();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn barrier_waits_for_all_submitted_tasks() {
        let pool = WorkerPool::new(4);
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..100 {
            let counter = Arc::clone(&counter);
            pool.submit(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        pool.barrier();

        assert_eq!(counter.load(Ordering::SeqCst), 100);
    }

    #[test]
    fn repeated_barriers_across_batches() {
        let pool = WorkerPool::new(2);
        let counter = Arc::new(AtomicUsize::new(0));

        for batch in 0..5 {
            for _ in 0..10 {
                let counter = Arc::clone(&counter);
                pool.submit(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                });
            }
            pool.barrier();
            assert_eq!(counter.load(Ordering::SeqCst), (batch + 1) * 10);
        }
    }
}
