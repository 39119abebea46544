use ecjet_frame::{Command, FrameError};

/// Errors that can occur while encoding or decoding payload values.
#[derive(Debug, thiserror::Error)]
pub enum ValueError {
    /// The value is outside the domain the printer accepts.
    #[error("invalid value: {0}")]
    EncodingValue(String),

    /// A decoder was handed a buffer of the wrong size.
    #[error("incorrect byte count (expected {expected}, got {actual})")]
    IncorrectByteCount { expected: usize, actual: usize },

    /// The frame carries a different command than the one requested.
    #[error("unexpected command {actual} (expected {expected})")]
    UnexpectedCommand { expected: Command, actual: Command },

    #[error(transparent)]
    Frame(#[from] FrameError),
}

impl ValueError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ValueError::EncodingValue(message.into())
    }
}

pub type Result<T> = std::result::Result<T, ValueError>;
