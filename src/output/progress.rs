use std::io::IsTerminal;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use indicatif::{ProgressBar, ProgressStyle};

use crate::scanner::ProgressSink;

const TEMPLATE: &str = "{spinner:.green} Counting [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%)";

/// Progress bar for line counting, drawn on stderr.
///
/// Hidden in quiet mode or when stderr is not a TTY. The length is set when
/// the scanner reports how many files it will count.
#[derive(Clone)]
pub struct ScanProgress {
    progress_bar: ProgressBar,
    counter: Arc<AtomicU64>,
}

impl ScanProgress {
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self::new_with_visibility(quiet, std::io::stderr().is_terminal())
    }

    fn new_with_visibility(quiet: bool, is_tty: bool) -> Self {
        let progress_bar = if quiet || !is_tty {
            ProgressBar::hidden()
        } else {
            Self::create_visible_progress_bar()
        };

        Self {
            progress_bar,
            counter: Arc::new(AtomicU64::new(0)),
        }
    }

    fn create_visible_progress_bar() -> ProgressBar {
        let pb = ProgressBar::new(0);
        match ProgressStyle::default_bar().template(TEMPLATE) {
            Ok(style) => pb.set_style(style.progress_chars("█▓░")),
            Err(err) => tracing::debug!("default progress style: {err}"),
        }
        pb
    }

    #[must_use]
    pub fn position(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.progress_bar.is_hidden()
    }
}

impl ProgressSink for ScanProgress {
    fn start(&self, total: u64) {
        self.progress_bar.set_length(total);
    }

    /// Thread-safe for use with rayon parallel iterators.
    fn inc(&self) {
        let count = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        self.progress_bar.set_position(count);
    }

    fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
