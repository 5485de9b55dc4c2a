//! Pipeline configuration
//!
//! The marker and diagnostic-kind literals are agreed with the payload
//! producer out-of-band. They are threaded through calls explicitly,
//! never held as module globals.

/// Configuration shared by extraction, inference and application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Literal token bounding a schema-bearing payload
    pub marker: String,
    /// Diagnostic kind whose messages carry payloads
    pub diagnostic: String,
}

impl PipelineConfig {
    /// Create a config with explicit marker and diagnostic kind
    #[inline]
    #[must_use]
    pub fn new(marker: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            diagnostic: diagnostic.into(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new("KLEKLE", "IE_DIAGNOSTIC")
    }
}
