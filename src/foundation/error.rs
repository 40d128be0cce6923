/// Convenience result type used across keyanim.
pub type AnimResult<T> = Result<T, AnimError>;

/// Top-level error taxonomy used by evaluation and mutation APIs.
///
/// Every operation that returns one of these is atomic: the object it was called on is left
/// exactly as it was before the call.
#[derive(thiserror::Error, Debug)]
pub enum AnimError {
    /// A mutating call received an argument it cannot accept (bad index, out-of-range key
    /// time, spline control point outside the unit square, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Mutation attempted on a frozen object.
    #[error("object is frozen: {0}")]
    Frozen(String),

    /// `freeze()` refused because part of the owned graph cannot be frozen.
    #[error("cannot freeze: {0}")]
    NotFreezable(String),

    /// A default origin/destination value failed the type's validity check.
    #[error("invalid default animation value: {detail}")]
    InvalidAnimationValue {
        /// Which default value was rejected and why.
        detail: String,
        /// Whether the host should treat this as fatal for the driving clock.
        fatal: bool,
    },

    /// Invalid user-provided documents, timelines or clocks.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AnimError {
    /// Build an [`AnimError::InvalidArgument`] value.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build an [`AnimError::Frozen`] value.
    pub fn frozen(msg: impl Into<String>) -> Self {
        Self::Frozen(msg.into())
    }

    /// Build an [`AnimError::NotFreezable`] value.
    pub fn not_freezable(msg: impl Into<String>) -> Self {
        Self::NotFreezable(msg.into())
    }

    /// Build an [`AnimError::InvalidAnimationValue`] value.
    pub fn invalid_value(detail: impl Into<String>, fatal: bool) -> Self {
        Self::InvalidAnimationValue {
            detail: detail.into(),
            fatal,
        }
    }

    /// Build an [`AnimError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`AnimError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// True when the host should stop the driving clock instead of skipping one frame.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvalidAnimationValue { fatal: true, .. })
    }
}

impl From<serde_json::Error> for AnimError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
