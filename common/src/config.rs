use std::time::Duration;

/// Tunables of the create dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogConfig {
    /// How long the error shake stays on before clearing itself.
    pub shake_duration: Duration,
    /// Transient-store key remembering the last imported Word file name across reloads.
    pub transient_filename_key: String,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            shake_duration: Duration::from_millis(500),
            transient_filename_key: "temp_word_filename".to_string(),
        }
    }
}
