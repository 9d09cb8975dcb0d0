use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use tune_duper_core::ProgressReporter;

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// CLI progress reporter using indicatif progress bars.
///
/// - Grouping phase: spinner (single CPU-bound job)
/// - Extraction phase: progress bar (total known from the listing)
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn set_bar(&self, pb: ProgressBar) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(old) = guard.take() {
                old.finish_and_clear();
            }
            *guard = Some(pb);
        }
    }

    fn finish_bar(&self) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_and_clear();
            }
        }
    }

    fn spinner(message: String) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars(TICK_CHARS),
        );
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }
}

impl ProgressReporter for CliReporter {
    fn on_cache_hit(&self, files: usize, groups: usize) {
        eprintln!(
            "  \x1b[33m↺\x1b[0m Using cached result: {} files, {} groups",
            files, groups
        );
    }

    fn on_list_complete(&self, total_files: usize, duration_secs: f64) {
        eprintln!(
            "  \x1b[32m✓\x1b[0m Listing complete: {} files in {:.2}s",
            total_files, duration_secs
        );
    }

    fn on_group_start(&self, total_files: usize) {
        self.set_bar(Self::spinner(format!(
            "Comparing {} filenames...",
            total_files
        )));
    }

    fn on_group_complete(&self, groups: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Grouping complete: {} similar groups in {:.2}s",
            groups, duration_secs
        );
    }

    fn on_extract_start(&self, total_files: usize) {
        let pb = ProgressBar::new(total_files as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "  {spinner:.cyan} Reading tags [{bar:30.cyan/dim}] {pos}/{len} files ({eta} remaining)",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("━╸─")
            .tick_chars(TICK_CHARS),
        );
        pb.enable_steady_tick(Duration::from_millis(80));
        self.set_bar(pb);
    }

    fn on_extract_progress(&self, files_done: usize, _total_files: usize) {
        if let Ok(guard) = self.bar.lock() {
            if let Some(pb) = guard.as_ref() {
                pb.set_position(files_done as u64);
            }
        }
    }

    fn on_extract_complete(&self, extracted: usize, failed: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Metadata complete: {} files read, {} skipped in {:.2}s",
            extracted, failed, duration_secs
        );
    }

    fn on_cache_saved(&self) {
        eprintln!("  \x1b[32m✓\x1b[0m Result cached");
    }
}
