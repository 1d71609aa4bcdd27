// file: src/pipeline/progress.rs
// description: progress tracking and statistics reporting for pipeline execution
// reference: uses indicatif for progress bars and tracks processing metrics

use indicatif::{ProgressBar, ProgressStyle};
use std::cell::Cell;
use std::time::Instant;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineStats {
    pub documents_processed: usize,
    pub documents_skipped: usize,
    pub sections_ranked: usize,
    pub sections_reported: usize,
    pub subsections_reported: usize,
    pub duration_secs: f64,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn documents_per_second(&self) -> f64 {
        if self.duration_secs <= 0.0 {
            return 0.0;
        }
        self.documents_processed as f64 / self.duration_secs
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.documents_processed + self.documents_skipped;
        if total == 0 {
            return 0.0;
        }
        (self.documents_processed as f64 / total as f64) * 100.0
    }

    pub fn summary(&self) -> String {
        format!(
            "{} documents processed, {} skipped, {} sections ranked, {} sections and {} subsections reported",
            self.documents_processed,
            self.documents_skipped,
            self.sections_ranked,
            self.sections_reported,
            self.subsections_reported
        )
    }
}

/// Per-document progress bar plus running counters.
///
/// The pipeline is sequential, so counters are plain cells.
pub struct ProgressTracker {
    bar: ProgressBar,
    documents_processed: Cell<usize>,
    documents_skipped: Cell<usize>,
    sections_ranked: Cell<usize>,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(total_documents: usize) -> Self {
        Self::with_color(total_documents, true)
    }

    pub fn with_color(total_documents: usize, colored: bool) -> Self {
        Self::from_bar(create_progress_bar(total_documents as u64, colored))
    }

    /// Tracks counters without drawing anything.
    pub fn hidden() -> Self {
        Self::from_bar(ProgressBar::hidden())
    }

    fn from_bar(bar: ProgressBar) -> Self {
        Self {
            bar,
            documents_processed: Cell::new(0),
            documents_skipped: Cell::new(0),
            sections_ranked: Cell::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn start_document(&self, name: &str) {
        self.bar.set_message(name.to_string());
    }

    pub fn document_processed(&self, sections: usize) {
        self.documents_processed.set(self.documents_processed.get() + 1);
        self.sections_ranked.set(self.sections_ranked.get() + sections);
        self.bar.inc(1);
    }

    pub fn document_skipped(&self) {
        self.documents_skipped.set(self.documents_skipped.get() + 1);
        self.bar.inc(1);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    pub fn get_stats(&self) -> PipelineStats {
        PipelineStats {
            documents_processed: self.documents_processed.get(),
            documents_skipped: self.documents_skipped.get(),
            sections_ranked: self.sections_ranked.get(),
            sections_reported: 0,
            subsections_reported: 0,
            duration_secs: self.start_time.elapsed().as_secs_f64(),
        }
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(total: u64, colored: bool) -> ProgressBar {
    let bar = ProgressBar::new(total);
    let template = if colored {
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}"
    } else {
        "{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}"
    };

    match ProgressStyle::default_bar().template(template) {
        Ok(style) => bar.set_style(style.progress_chars(if colored { "█▓▒░" } else { "=>-" })),
        Err(_) => bar.set_style(ProgressStyle::default_bar()),
    }
    bar
}
