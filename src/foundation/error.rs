/// Convenience result type used across beatslide.
pub type SlideResult<T> = Result<T, SlideError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum SlideError {
    /// Invalid user-provided configuration or timing data.
    #[error("validation error: {0}")]
    Validation(String),

    /// An operation was called in a state where it cannot do anything useful.
    #[error("usage error: {0}")]
    Usage(String),

    /// Index-based access past the end of an ordered collection.
    #[error("index {index} out of range for {len} entries")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Collection length at the time of the call.
        len: usize,
    },

    /// Errors while scheduling or sampling tweens and layouts.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlideError {
    /// Build a [`SlideError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SlideError::Usage`] value.
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    /// Build a [`SlideError::IndexOutOfRange`] value.
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Build a [`SlideError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`SlideError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for SlideError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
