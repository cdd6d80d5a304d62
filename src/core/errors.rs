use crate::backend::BackendError;

/// Errors that end a probe run.
///
/// Per-window metadata failures during enumeration are not represented
/// here: they are logged where they occur and the walk continues.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("no window found with title '{title}'")]
    WindowNotFound { title: String },

    #[error("window system query failed: {source}")]
    Backend {
        #[from]
        source: BackendError,
    },
}

impl ProbeError {
    /// Exit code the binary should report for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            ProbeError::WindowNotFound { .. } => 1,
            ProbeError::Backend { .. } => 1,
        }
    }
}
