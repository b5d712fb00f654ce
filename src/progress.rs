//! Progress reporting for tree rebuilds
//!
//! Everything goes through [`ProgressReporter`] so quiet and JSON runs can
//! swap in [`SilentProgress`].

use indicatif::{ProgressBar, ProgressStyle};

/// Progress reporter trait for the copy phase
pub trait ProgressReporter {
    /// Start the copy phase with the total number of copies
    fn start(&mut self, total_copies: u64);

    /// Switch to the tree for `label`
    fn begin_tree(&mut self, label: &str);

    /// One copy attempted
    fn file_done(&mut self, file_path: &str);

    fn finish(&mut self);
}

/// indicatif progress bar
#[derive(Default)]
pub struct BarProgress {
    pb: Option<ProgressBar>,
    label: String,
}

impl BarProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for BarProgress {
    fn start(&mut self, total_copies: u64) {
        let pb = ProgressBar::new(total_copies);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        self.pb = Some(pb);
    }

    fn begin_tree(&mut self, label: &str) {
        self.label = label.to_string();
    }

    fn file_done(&mut self, file_path: &str) {
        if let Some(ref pb) = self.pb {
            // Truncate long paths for display
            let display_path = if file_path.chars().count() > 50 {
                let tail: String = file_path
                    .chars()
                    .rev()
                    .take(47)
                    .collect::<Vec<_>>()
                    .into_iter()
                    .rev()
                    .collect();
                format!("...{tail}")
            } else {
                file_path.to_string()
            };
            pb.set_message(format!("[{}] {}", self.label, display_path));
            pb.inc(1);
        }
    }

    fn finish(&mut self) {
        if let Some(ref pb) = self.pb {
            pb.finish_and_clear();
        }
    }
}

/// No-op progress for quiet runs
#[derive(Debug, Default)]
pub struct SilentProgress {
    pub files: u64,
}

impl ProgressReporter for SilentProgress {
    fn start(&mut self, _total_copies: u64) {}

    fn begin_tree(&mut self, _label: &str) {}

    fn file_done(&mut self, _file_path: &str) {
        self.files += 1;
    }

    fn finish(&mut self) {}
}
