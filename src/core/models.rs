//! Export settings shared by all output writers.

use serde::{Deserialize, Serialize};

use crate::config::RenderConfig;

/// Controls optional columns of structured exports and the look of
/// rendered ones.
///
/// # Example
///
/// ```
/// use chatview::core::OutputConfig;
/// use chatview::config::RenderConfig;
///
/// let config = OutputConfig::new()
///     .with_timestamps()
///     .with_render(RenderConfig::new().with_24_hour(true));
/// assert!(config.include_timestamps);
/// assert!(config.render.use_24_hour);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Add an ISO 8601 timestamp derived from the raw date and time
    /// (JSON, JSONL, CSV).
    pub include_timestamps: bool,
    /// Display settings for HTML and text output.
    pub render: RenderConfig,
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.include_timestamps = true;
        self
    }

    #[must_use]
    pub fn with_render(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }
}

#[cfg(any(feature = "json-output", feature = "csv-output"))]
pub(crate) fn iso_timestamp(msg: &crate::Message) -> Option<String> {
    msg.timestamp()
        .map(|ts| ts.format("%Y-%m-%dT%H:%M:%S").to_string())
}
