//! Render failures.

use std::time::Duration;

use thiserror::Error;

use crate::ConfigError;

/// Errors that abort a render. Misses and total internal reflection are
/// ordinary tracing outcomes and never surface here.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid render configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to start band workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Render timed out after {elapsed:?} with {completed}/{total} bands complete")]
    Timeout {
        completed: usize,
        total: usize,
        elapsed: Duration,
    },

    #[error("A band worker stopped without a result ({completed}/{total} bands complete)")]
    WorkerFailed { completed: usize, total: usize },
}
