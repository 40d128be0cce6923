use crate::{
    animation::animatable::Animatable,
    foundation::error::{AnimError, AnimResult},
};

/// What an invalid default origin/destination value means to the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidDefaultPolicy {
    /// Abort only the current evaluation.
    #[default]
    AbortEvaluation,
    /// Report the error as fatal so the host stops the clock.
    Fatal,
}

/// Keyframe animation output before the first keyframe's time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadIn {
    /// Hold the base value.
    #[default]
    Hold,
    /// Interpolate from the base value towards the first keyframe.
    Interpolate,
}

/// Evaluation options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EvalOptions {
    pub invalid_default: InvalidDefaultPolicy,
    pub lead_in: LeadIn,
}

impl EvalOptions {
    /// Reject a default value the composer is about to use.
    pub(crate) fn check_default<T: Animatable>(&self, value: &T, which: &str) -> AnimResult<()> {
        if T::is_valid_value(value) {
            return Ok(());
        }
        let fatal = self.invalid_default == InvalidDefaultPolicy::Fatal;
        tracing::warn!(which, fatal, ?value, "invalid default animation value");
        Err(AnimError::invalid_value(
            format!("default {which} value {value:?} is not valid"),
            fatal,
        ))
    }
}
