/// Trait for reporting scan progress.
///
/// The CLI implements it with indicatif; the HTTP server stays silent.
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    fn on_cache_hit(&self, _files: usize, _groups: usize) {}
    fn on_list_complete(&self, _total_files: usize, _duration_secs: f64) {}
    fn on_group_start(&self, _total_files: usize) {}
    fn on_group_complete(&self, _groups: usize, _duration_secs: f64) {}
    fn on_extract_start(&self, _total_files: usize) {}
    fn on_extract_progress(&self, _files_done: usize, _total_files: usize) {}
    fn on_extract_complete(&self, _extracted: usize, _failed: usize, _duration_secs: f64) {}
    fn on_cache_saved(&self) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
