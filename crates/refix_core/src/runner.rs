//! The run orchestrator.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use refix_cache::{Cache, CacheStore, ColdStart, FileCache, Loaded, RuleSignature};
use tracing::{debug, info, warn};

use crate::config::RunConfig;
use crate::file_runner::{FileContext, run_files};
use crate::parallel_runner::run_files_parallel;
use crate::processor::FileProcessor;
use crate::result::RunReport;
use crate::RUNTIME_VERSION;

/// Returns true if `cache` may be consulted for a run under the given
/// configuration.
///
/// Evaluate once per run. When this is false the whole cache must be
/// ignored, not just entries related to whatever changed.
pub fn cache_is_usable<C: Cache + ?Sized>(
    cache: &C,
    runtime_version: &str,
    linting: bool,
    rules: &RuleSignature,
) -> bool {
    !cache.is_stale(runtime_version, linting, rules)
}

/// Drives a [`FileProcessor`] over files with incremental caching.
///
/// Orchestrates cache loading, the staleness gate, per-file skip decisions
/// and persistence at the end of the run.
pub struct Runner<P> {
    /// Run configuration.
    config: RunConfig,
    /// The fixing engine.
    processor: P,
    /// Cache for this run. Always built under the current configuration.
    cache: Mutex<FileCache>,
    /// Where to persist the cache, or `None` for memory-only runs.
    store: Option<CacheStore>,
}

impl<P: FileProcessor> Runner<P> {
    /// Creates a runner bound to the current engine version.
    pub fn new(config: RunConfig, processor: P) -> Self {
        Self::with_runtime_version(config, processor, RUNTIME_VERSION)
    }

    /// Creates a runner bound to an explicit runtime version.
    ///
    /// The version is captured here, once, and recorded in any cache this
    /// runner creates.
    pub fn with_runtime_version(
        config: RunConfig,
        processor: P,
        runtime_version: impl Into<String>,
    ) -> Self {
        let runtime_version = runtime_version.into();
        let fresh = || FileCache::new(runtime_version.clone(), config.linting, config.rules.clone());

        if !config.cache {
            debug!("Caching disabled");
            return Self {
                cache: Mutex::new(fresh()),
                store: None,
                config,
                processor,
            };
        }

        let store = CacheStore::new(config.cache_path());
        let (cache, store) = match store.load() {
            Loaded::Restored(cache)
                if cache_is_usable(&cache, &runtime_version, config.linting, &config.rules) =>
            {
                (cache, Some(store))
            }
            Loaded::Restored(cache) => {
                info!(
                    "Cache at {} was built under a different configuration; discarding {} entries",
                    store.path().display(),
                    cache.len()
                );
                (fresh(), Some(store))
            }
            Loaded::Cold(ColdStart::Missing) => (fresh(), Some(store)),
            Loaded::Cold(ColdStart::Malformed(e)) => {
                warn!("Ignoring unusable cache: {}", e);
                (fresh(), Some(store))
            }
            Loaded::Cold(ColdStart::Unreadable(e)) => {
                warn!("Failed to load cache, continuing without persistence: {}", e);
                (fresh(), None)
            }
        };

        Self {
            config,
            processor,
            cache: Mutex::new(cache),
            store,
        }
    }

    /// Returns the run configuration.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Returns the processor.
    pub fn processor(&self) -> &P {
        &self.processor
    }

    /// Returns a snapshot of the current cache.
    pub fn cache(&self) -> FileCache {
        self.cache.lock().clone()
    }

    /// Returns true if the cache will be saved by [`Runner::finish`].
    pub fn is_persistent(&self) -> bool {
        self.store.is_some()
    }

    fn context(&self) -> FileContext<'_> {
        FileContext {
            base_dir: self.config.base_dir.as_deref(),
            use_cache: self.config.cache,
            dry_run: self.config.dry_run,
        }
    }

    /// Processes files one after another.
    pub fn run(&self, paths: &[PathBuf]) -> RunReport {
        let report = run_files(paths, &self.processor, &self.cache, &self.context());
        self.log_summary(&report);
        report
    }

    /// Processes files in parallel.
    pub fn run_parallel(&self, paths: &[PathBuf]) -> RunReport {
        let report = run_files_parallel(paths, &self.processor, &self.cache, &self.context());
        self.log_summary(&report);
        report
    }

    fn log_summary(&self, report: &RunReport) {
        info!(
            "Processed {} files ({} cached, {} fixed, {} failed)",
            report.files.len() + report.failures.len(),
            report.cached(),
            report.fixed(),
            report.failures.len()
        );
    }

    /// Removes entries whose file no longer exists.
    ///
    /// Keys are resolved against the base directory, or the working
    /// directory when there is none. Returns the number of removed entries.
    pub fn prune_missing(&self) -> usize {
        let base = self.config.base_dir.as_deref();
        let removed = self.cache.lock().retain(|key| match base {
            Some(base) => base.join(key).exists(),
            None => Path::new(key).exists(),
        });
        if removed > 0 {
            debug!("Pruned {} cache entries for missing files", removed);
        }
        removed
    }

    /// Prunes entries for missing files and persists the cache.
    ///
    /// A failed save is logged and otherwise ignored; the next run simply
    /// starts cold. Returns whether the cache was written.
    pub fn finish(&self) -> bool {
        let Some(store) = &self.store else {
            return false;
        };

        self.prune_missing();

        match store.save(&self.cache.lock()) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to save cache: {}", e);
                false
            }
        }
    }
}
