use crate::cache::{FileStore, ResultStore};
use crate::config::AppConfig;
use crate::error::Error;
use crate::metadata;
use crate::model::{FileRecord, ScanResult, SimilarityGroup};
use crate::progress::ProgressReporter;
use crate::scanner;
use crate::similarity;
use crate::worker::WorkerPool;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

pub struct ScanEngine {
    config: AppConfig,
    store: Arc<dyn ResultStore>,
    pool: WorkerPool,
}

impl ScanEngine {
    pub fn new(config: AppConfig, store: Arc<dyn ResultStore>) -> Result<Self, Error> {
        config.validate()?;
        let pool = WorkerPool::new(config.worker_threads)?;
        debug!("Worker pool started with {} threads", pool.current_num_threads());
        Ok(Self {
            config,
            store,
            pool,
        })
    }

    /// Engine backed by the durable cache at `config.cache_path`.
    pub fn with_file_store(config: AppConfig) -> Result<Self, Error> {
        let store = Arc::new(FileStore::new(&config.cache_path));
        Self::new(config, store)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn ResultStore> {
        &self.store
    }

    /// Run the duplicate detection pipeline for `directory`:
    /// 1. Return the cached result when `use_cache` and one exists
    /// 2. List candidate files
    /// 3. Group similar filenames on the worker pool
    /// 4. Extract metadata per file in parallel, dropping failures
    /// 5. Save the result to the cache (best effort)
    pub fn scan(
        &self,
        directory: &Path,
        use_cache: bool,
        reporter: &dyn ProgressReporter,
    ) -> Result<ScanResult, Error> {
        let metric = self.config.similarity_metric;
        self.scan_scored(directory, use_cache, reporter, move |a, b| metric.score(a, b))
    }

    fn scan_scored<F>(
        &self,
        directory: &Path,
        use_cache: bool,
        reporter: &dyn ProgressReporter,
        score: F,
    ) -> Result<ScanResult, Error>
    where
        F: Fn(&str, &str) -> u8 + Send + 'static,
    {
        info!(
            "Scanning directory: {}, use_cache: {}",
            directory.display(),
            use_cache
        );

        if use_cache {
            if let Some(cached) = self.load_cached() {
                info!("Returning cached results");
                reporter.on_cache_hit(cached.files.len(), cached.group_count());
                return Ok(cached);
            }
        }

        // Phase 1: List
        let list_start = Instant::now();
        let paths = scanner::list_audio_files(
            directory,
            &self.config.ignore_extensions,
            &self.config.ignore_patterns,
        );
        reporter.on_list_complete(paths.len(), list_start.elapsed().as_secs_f64());

        // Phase 2: Group
        info!("Grouping similar filenames...");
        reporter.on_group_start(paths.len());
        let group_start = Instant::now();
        let groups = self.group_on_worker(&paths, score).map_err(|e| {
            error!("Error processing filenames: {}", e);
            Error::Grouping(e.to_string())
        })?;
        let group_duration = group_start.elapsed();
        debug!(
            "Grouping completed in {:.2}s, {} groups",
            group_duration.as_secs_f64(),
            groups.len()
        );
        reporter.on_group_complete(groups.len(), group_duration.as_secs_f64());

        // Phase 3: Extract
        info!("Extracting metadata for {} files...", paths.len());
        reporter.on_extract_start(paths.len());
        let extract_start = Instant::now();
        let files = self.extract_all(&paths, reporter);
        let extract_duration = extract_start.elapsed();
        let failed = paths.len() - files.len();
        debug!(
            "Extraction completed in {:.2}s, {} records, {} failures",
            extract_duration.as_secs_f64(),
            files.len(),
            failed
        );
        reporter.on_extract_complete(files.len(), failed, extract_duration.as_secs_f64());

        let result = ScanResult::new(files, groups);

        // Phase 4: Cache
        match self.store.save(&result) {
            Ok(()) => reporter.on_cache_saved(),
            Err(e) => error!("Error caching results: {}", e),
        }

        info!("Scan completed successfully");
        Ok(result)
    }

    fn load_cached(&self) -> Option<ScanResult> {
        match self.store.load() {
            Ok(cached) => cached,
            Err(e) => {
                error!("Error loading cache: {}", e);
                None
            }
        }
    }

    fn group_on_worker<F>(
        &self,
        paths: &[PathBuf],
        score: F,
    ) -> Result<Vec<SimilarityGroup>, Error>
    where
        F: Fn(&str, &str) -> u8 + Send + 'static,
    {
        let paths = paths.to_vec();
        let threshold = self.config.similarity_threshold;
        self.pool
            .run(move || similarity::group_similar_by(&paths, threshold, score))
    }

    /// Order of the returned records follows `paths`, minus failures.
    fn extract_all(&self, paths: &[PathBuf], reporter: &dyn ProgressReporter) -> Vec<FileRecord> {
        let total = paths.len();
        let done = AtomicUsize::new(0);

        let records: Vec<Option<FileRecord>> = self.pool.install(|| {
            paths
                .par_iter()
                .map(|path| {
                    let record = match metadata::extract(path) {
                        Ok(record) => Some(record),
                        Err(e) => {
                            error!("{}", e);
                            None
                        }
                    };
                    let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
                    reporter.on_extract_progress(finished, total);
                    record
                })
                .collect()
        });

        records.into_iter().flatten().collect()
    }
}
