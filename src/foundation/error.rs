/// Convenience result type used across the public API.
pub type MontageResult<T> = Result<T, MontageError>;

#[derive(thiserror::Error, Debug)]
/// Error type for plan synthesis, plan resolution and document IO.
pub enum MontageError {
    /// Input or document failed structural validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// A precondition for plan synthesis was not met (for example, no approved shots).
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// A plan could not be converted into a frame-domain schedule.
    #[error("resolution error: {0}")]
    Resolution(String),

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped external error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MontageError {
    /// Build a [`MontageError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MontageError::Precondition`] value.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Build a [`MontageError::Resolution`] value.
    pub fn resolution(msg: impl Into<String>) -> Self {
        Self::Resolution(msg.into())
    }

    /// Build a [`MontageError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// True when the caller supplied unusable input (maps to a client error upstream).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Precondition(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
