// src/progress.rs
/// Lightweight progress reporting for a scrape run.
/// Frontends (CLI/server) implement this to surface status.
pub trait Progress {
    /// Called once the locator knows how many records there are.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One record turned into a member.
    fn item_done(&mut self, _name: &str) {}

    /// One record was skipped (fetch failure or no name).
    fn item_failed(&mut self, _what: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}
