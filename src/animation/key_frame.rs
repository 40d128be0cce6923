use crate::{
    animation::{animatable::Animatable, ease::Ease, key_time::KeyTime, spline::KeySpline},
    foundation::error::{AnimError, AnimResult},
    freeze::{
        expr::ValueExpr,
        state::{FreezeState, Freezable, ensure_mutable},
    },
};

/// How a keyframe moves from the previous value to its own.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// Hold the previous value until the keyframe's time, then jump.
    Discrete,
    #[default]
    Linear,
    Spline(KeySpline),
    Easing(Ease),
}

impl Interpolation {
    fn remap(&self, p: f64) -> f64 {
        match self {
            Self::Discrete | Self::Linear => p,
            Self::Spline(s) => s.get_spline_progress(p),
            Self::Easing(e) => e.apply(p),
        }
    }
}

fn default_true() -> bool {
    true
}

/// One control point of a keyframe animation.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(bound(
    serialize = "T: serde::Serialize + Clone",
    deserialize = "T: serde::Deserialize<'de>"
))]
pub struct KeyFrame<T> {
    value: ValueExpr<T>,
    key_time: KeyTime,
    #[serde(default)]
    interpolation: Interpolation,
    #[serde(default = "default_true")]
    use_shortest_path: bool,
    #[serde(skip)]
    state: FreezeState,
}

impl<T> KeyFrame<T> {
    pub fn new(value: impl Into<ValueExpr<T>>, key_time: KeyTime) -> Self {
        Self {
            value: value.into(),
            key_time,
            interpolation: Interpolation::Linear,
            use_shortest_path: true,
            state: FreezeState::Mutable,
        }
    }

    pub fn discrete(value: impl Into<ValueExpr<T>>, key_time: KeyTime) -> Self {
        Self::new(value, key_time).with_interpolation(Interpolation::Discrete)
    }

    pub fn linear(value: impl Into<ValueExpr<T>>, key_time: KeyTime) -> Self {
        Self::new(value, key_time)
    }

    pub fn spline(value: impl Into<ValueExpr<T>>, key_time: KeyTime, spline: KeySpline) -> Self {
        Self::new(value, key_time).with_interpolation(Interpolation::Spline(spline))
    }

    pub fn easing(value: impl Into<ValueExpr<T>>, key_time: KeyTime, ease: Ease) -> Self {
        Self::new(value, key_time).with_interpolation(Interpolation::Easing(ease))
    }

    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Rotation types only: pick the short or the long arc.
    pub fn with_shortest_path(mut self, use_shortest_path: bool) -> Self {
        self.use_shortest_path = use_shortest_path;
        self
    }

    pub fn value_expr(&self) -> &ValueExpr<T> {
        &self.value
    }

    pub fn key_time(&self) -> KeyTime {
        self.key_time
    }

    pub fn interpolation(&self) -> &Interpolation {
        &self.interpolation
    }

    pub fn use_shortest_path(&self) -> bool {
        self.use_shortest_path
    }

    pub fn set_value(&mut self, value: impl Into<ValueExpr<T>>) -> AnimResult<()> {
        ensure_mutable(self.state, "key frame")?;
        self.value = value.into();
        Ok(())
    }

    pub fn set_key_time(&mut self, key_time: KeyTime) -> AnimResult<()> {
        ensure_mutable(self.state, "key frame")?;
        self.key_time = key_time.validate()?;
        Ok(())
    }

    pub fn set_interpolation(&mut self, interpolation: Interpolation) -> AnimResult<()> {
        ensure_mutable(self.state, "key frame")?;
        self.interpolation = interpolation;
        Ok(())
    }

    pub fn set_use_shortest_path(&mut self, use_shortest_path: bool) -> AnimResult<()> {
        ensure_mutable(self.state, "key frame")?;
        self.use_shortest_path = use_shortest_path;
        Ok(())
    }
}

impl<T: Clone> KeyFrame<T> {
    /// Current target value (bindings resolved).
    pub fn value(&self) -> T {
        self.value.current()
    }
}

impl<T: Animatable> KeyFrame<T> {
    /// Value of this keyframe's segment at local `progress`, coming from `base`.
    ///
    /// Progress `0` yields `base` and `1` yields this keyframe's value exactly, whatever the
    /// interpolation style.
    pub fn interpolate_value(&self, base: &T, progress: f64) -> AnimResult<T> {
        if !(0.0..=1.0).contains(&progress) {
            return Err(AnimError::invalid_argument(format!(
                "key frame progress must be in [0, 1], got {progress}"
            )));
        }
        if progress == 1.0 {
            return Ok(self.value());
        }
        if progress == 0.0 {
            return Ok(base.clone());
        }
        Ok(match &self.interpolation {
            Interpolation::Discrete => base.clone(),
            other => T::interpolate_path(
                base,
                &self.value(),
                other.remap(progress),
                self.use_shortest_path,
            ),
        })
    }
}

// Clones start out mutable, even from a frozen keyframe.
impl<T: Clone> Clone for KeyFrame<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            key_time: self.key_time,
            interpolation: self.interpolation.clone(),
            use_shortest_path: self.use_shortest_path,
            state: FreezeState::Mutable,
        }
    }
}

// Equality is by content; the freeze state is not part of it.
impl<T: PartialEq> PartialEq for KeyFrame<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
            && self.key_time == other.key_time
            && self.interpolation == other.interpolation
            && self.use_shortest_path == other.use_shortest_path
    }
}

impl<T: Clone> Freezable for KeyFrame<T> {
    fn freeze_state(&self) -> FreezeState {
        self.state
    }

    fn can_freeze(&self) -> bool {
        self.is_frozen() || !self.value.is_bound()
    }

    fn freeze_owned(&mut self) {
        self.state = FreezeState::Frozen;
    }

    fn clone_current_value(&self) -> Self {
        Self {
            value: self.value.to_local(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/key_frame.rs"]
mod tests;
