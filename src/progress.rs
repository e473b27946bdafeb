//! Spinner shown while clip pages are being fetched.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Thin wrapper around an `indicatif` spinner. A hidden scope makes every call a no-op.
pub struct ProgressScope {
    pb: ProgressBar,
}

impl ProgressScope {
    pub fn spinner<T: Into<String>>(label: T) -> Self {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg} {pos} clips  elapsed: {elapsed_precise}") {
            pb.set_style(style);
        }
        pb.set_message(label.into());
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb }
    }

    pub fn hidden() -> Self {
        Self { pb: ProgressBar::hidden() }
    }

    /// Pick [`spinner`](Self::spinner) or [`hidden`](Self::hidden).
    pub fn new_if<T: Into<String>>(enabled: bool, label: T) -> Self {
        if enabled { Self::spinner(label) } else { Self::hidden() }
    }

    #[inline] pub fn set_total(&self, clips: usize) { self.pb.set_position(clips as u64); }
    pub fn finish_and_clear(&self) { self.pb.finish_and_clear(); }
}

impl Drop for ProgressScope {
    fn drop(&mut self) {
        if !self.pb.is_finished() {
            self.pb.finish_and_clear();
        }
    }
}
