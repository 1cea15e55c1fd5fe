//! Editor configuration.

use std::time::Duration;

/// Configuration for the editor and its auto-save driver.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Interval between auto-save ticks (default: 30 seconds).
    pub autosave_interval: Duration,
    /// Page size for admin list fetches (default: 50).
    pub list_page_size: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            autosave_interval: Duration::from_secs(30),
            list_page_size: 50,
        }
    }
}
