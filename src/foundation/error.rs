/// Convenience result type used across the animator crate.
pub type AnimatorResult<T> = Result<T, AnimatorError>;

/// Top-level error taxonomy used by registry, binding and session APIs.
///
/// Absence of an evaluated value is never an error; evaluation returns `Option`.
#[derive(thiserror::Error, Debug)]
pub enum AnimatorError {
    /// An id, object or property combination has no current entry.
    #[error("not found: {0}")]
    NotFound(String),

    /// The operation is not valid for the entry's current state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Invalid user-provided animator, binding or document data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing plain-data representations.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AnimatorError {
    /// Build a [`AnimatorError::NotFound`] value.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Build a [`AnimatorError::InvalidState`] value.
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Build a [`AnimatorError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`AnimatorError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for AnimatorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
