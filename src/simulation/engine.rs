//! High-level runtime engine settings
//!
//! Selects the worker pool size and whether the force and diagnostic
//! loops run on the data-parallel path

use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

#[derive(Debug, Clone)]
pub struct Engine {
    pub threads: usize, // worker threads in the pool
    pub parallel: bool, // false = serial loops, true = rayon fold/reduce
}

impl Engine {
    /// Build the pool every parallel region of a run executes in.
    pub fn thread_pool(&self) -> Result<ThreadPool, ThreadPoolBuildError> {
        ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .thread_name(|i| format!("orbitsim-worker-{i}"))
            .build()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            threads: 2,
            parallel: true,
        }
    }
}
