//! Progress reporting for long-running scrape runs.
//!
//! A scrape over a full season touches hundreds of pages, so the drivers
//! report their position through a [`Progress`] observer instead of printing.
//! Front-ends plug in their own rendering (progress bars, log lines); tests
//! and headless callers pass [`NullProgress`].

/// Observer for pagination and enrichment progress.
///
/// Implementations must be `Send + Sync` so a single observer can be shared
/// across async driver calls.
pub trait Progress: Send + Sync {
    /// Set the total expected units of work, once known.
    fn set_total(&self, total: u64);

    /// Advance progress by `delta` units.
    fn inc(&self, delta: u64);

    /// Update the message displayed alongside the progress indicator.
    fn set_message(&self, msg: String);

    /// Mark the operation as complete with a final message.
    fn finish(&self, msg: String);
}

/// A no-op [`Progress`] implementation that ignores all updates.
pub struct NullProgress;

impl Progress for NullProgress {
    fn set_total(&self, _total: u64) {}
    fn inc(&self, _delta: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish(&self, _msg: String) {}
}
