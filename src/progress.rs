//! Progress reporting support (requires `progress` feature)

use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};

/// Callback invoked with the cumulative byte count after each chunk
pub type ProgressCallback = Arc<dyn Fn(u64) + Send + Sync>;

/// Create a byte-oriented progress bar for a transfer of known or unknown
/// total size. Feed it from a [`ProgressCallback`] via
/// [`ProgressBar::set_position`].
#[must_use]
pub fn create_progress_bar(total: Option<u64>) -> ProgressBar {
    match total {
        Some(total) => {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})",
                    )
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=>-"),
            );
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {bytes} ({bytes_per_sec})")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb
        }
    }
}
