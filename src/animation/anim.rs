use crate::{
    animation::{
        animatable::Animatable, clock::Clock, from_to_by::FromToByAnimation,
        key_frames::KeyFrameAnimation, options::EvalOptions,
    },
    foundation::error::AnimResult,
    freeze::state::{FreezeState, Freezable},
};

/// Any animation of values of type `T`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[serde(bound(
    serialize = "T: serde::Serialize + Clone",
    deserialize = "T: serde::Deserialize<'de>"
))]
pub enum Animation<T> {
    KeyFrames(KeyFrameAnimation<T>),
    FromToBy(FromToByAnimation<T>),
}

impl<T: Animatable> Animation<T> {
    /// Current value given the host's default origin and destination.
    pub fn evaluate(&self, origin: &T, destination: &T, clock: &Clock) -> AnimResult<T> {
        self.evaluate_with(origin, destination, clock, &EvalOptions::default())
    }

    pub fn evaluate_with(
        &self,
        origin: &T,
        destination: &T,
        clock: &Clock,
        options: &EvalOptions,
    ) -> AnimResult<T> {
        match self {
            Self::KeyFrames(a) => a.evaluate_with(origin, destination, clock, options),
            Self::FromToBy(a) => a.evaluate_with(origin, destination, clock, options),
        }
    }
}

impl<T> Animation<T> {
    pub fn is_additive(&self) -> bool {
        match self {
            Self::KeyFrames(a) => a.is_additive(),
            Self::FromToBy(a) => a.is_additive(),
        }
    }

    pub fn is_cumulative(&self) -> bool {
        match self {
            Self::KeyFrames(a) => a.is_cumulative(),
            Self::FromToBy(a) => a.is_cumulative(),
        }
    }

    pub fn version(&self) -> u64 {
        match self {
            Self::KeyFrames(a) => a.version(),
            Self::FromToBy(a) => a.version(),
        }
    }
}

impl<T: Animatable> Freezable for Animation<T> {
    fn freeze_state(&self) -> FreezeState {
        match self {
            Self::KeyFrames(a) => a.freeze_state(),
            Self::FromToBy(a) => a.freeze_state(),
        }
    }

    fn can_freeze(&self) -> bool {
        match self {
            Self::KeyFrames(a) => a.can_freeze(),
            Self::FromToBy(a) => a.can_freeze(),
        }
    }

    fn freeze_owned(&mut self) {
        match self {
            Self::KeyFrames(a) => a.freeze_owned(),
            Self::FromToBy(a) => a.freeze_owned(),
        }
    }

    fn clone_current_value(&self) -> Self {
        match self {
            Self::KeyFrames(a) => Self::KeyFrames(a.clone_current_value()),
            Self::FromToBy(a) => Self::FromToBy(a.clone_current_value()),
        }
    }
}

impl<T> From<KeyFrameAnimation<T>> for Animation<T> {
    fn from(a: KeyFrameAnimation<T>) -> Self {
        Self::KeyFrames(a)
    }
}

impl<T> From<FromToByAnimation<T>> for Animation<T> {
    fn from(a: FromToByAnimation<T>) -> Self {
        Self::FromToBy(a)
    }
}
