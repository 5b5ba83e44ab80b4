//! Parallel processing utilities for the volume filters
//!
//! A configurable rayon thread pool shared by the filters that sweep the
//! whole grid. Without an explicit [`init_thread_pool`] call work runs on the
//! rayon global pool.

use kiwi_core::{Error, Result};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, OnceLock};

static GLOBAL_THREAD_POOL: OnceLock<Arc<ThreadPool>> = OnceLock::new();
static THREAD_POOL_CONFIG: Mutex<ThreadPoolConfig> = Mutex::new(ThreadPoolConfig::new());

/// Thread pool configuration for parallel processing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadPoolConfig {
    /// Number of threads to use (None = automatic)
    pub num_threads: Option<usize>,
    /// Thread name prefix
    pub thread_name_prefix: String,
    /// Enable parallel processing (can be disabled for debugging)
    pub enabled: bool,
    /// Inputs shorter than this are processed sequentially
    pub sequential_threshold: usize,
}

impl ThreadPoolConfig {
    const fn new() -> Self {
        Self {
            num_threads: None,
            thread_name_prefix: String::new(),
            enabled: true,
            sequential_threshold: 4,
        }
    }

    /// Set number of threads
    pub fn with_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    /// Enable or disable parallel processing
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the sequential fallback threshold
    pub fn with_sequential_threshold(mut self, threshold: usize) -> Self {
        self.sequential_threshold = threshold;
        self
    }
}

impl Default for ThreadPoolConfig {
    fn default() -> Self {
        Self {
            thread_name_prefix: "kiwi-volume".to_string(),
            ..Self::new()
        }
    }
}

/// Initialize the shared thread pool with custom configuration
pub fn init_thread_pool(config: ThreadPoolConfig) -> Result<()> {
    if GLOBAL_THREAD_POOL.get().is_some() {
        return Ok(()); // Already initialized
    }

    let mut builder = ThreadPoolBuilder::new();

    if let Some(num_threads) = config.num_threads {
        builder = builder.num_threads(num_threads);
    }

    if !config.thread_name_prefix.is_empty() {
        let prefix = config.thread_name_prefix.clone();
        builder = builder.thread_name(move |index| format!("{}-{}", prefix, index));
    }

    let pool = builder
        .build()
        .map_err(|e| Error::Algorithm(format!("Failed to create thread pool: {}", e)))?;

    if let Ok(mut global_config) = THREAD_POOL_CONFIG.lock() {
        *global_config = config;
    }

    GLOBAL_THREAD_POOL
        .set(Arc::new(pool))
        .map_err(|_| Error::Algorithm("Thread pool already initialized".to_string()))?;

    tracing::debug!("initialized volume thread pool");
    Ok(())
}

/// Get current thread pool configuration
pub fn get_config() -> ThreadPoolConfig {
    THREAD_POOL_CONFIG
        .lock()
        .map(|config| config.clone())
        .unwrap_or_default()
}

/// Parallel map preserving input order
pub fn parallel_map<T, U, F>(data: &[T], f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    let config = get_config();
    if !config.enabled || data.len() < config.sequential_threshold {
        return data.iter().map(f).collect();
    }

    match GLOBAL_THREAD_POOL.get() {
        Some(pool) => pool.install(|| data.par_iter().map(&f).collect()),
        None => data.par_iter().map(&f).collect(),
    }
}
