use crate::{
    animation::{
        animatable::Animatable,
        clock::{Clock, ClockState},
        options::EvalOptions,
        remap::ProgressRemap,
    },
    foundation::error::AnimResult,
    freeze::{
        expr::ValueExpr,
        state::{FreezeState, Freezable, ensure_mutable},
    },
};

/// Which of From/To/By are set, in precedence order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationFunctionKind {
    /// Nothing set: animate from the default origin to the default destination.
    Automatic,
    From,
    To,
    /// Always additive: `by` is added on top of the default origin.
    By,
    FromTo,
    FromBy,
}

/// Direct animation between two values described by optional From, To and By.
///
/// Each kind decides which of origin, destination and foundation come from the animation and
/// which from the host-supplied defaults:
///
/// | kind      | from           | to              | foundation             |
/// |-----------|----------------|-----------------|------------------------|
/// | Automatic | default origin | default dest.   | -                      |
/// | From      | `from`         | default dest.   | -                      |
/// | To        | default origin | `to`            | -                      |
/// | By        | zero           | `by`            | default origin         |
/// | FromTo    | `from`         | `to`            | default origin if additive |
/// | FromBy    | `from`         | `from + by`     | default origin if additive |
#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(bound(
    serialize = "T: serde::Serialize + Clone",
    deserialize = "T: serde::Deserialize<'de>"
))]
pub struct FromToByAnimation<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    from: Option<ValueExpr<T>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    to: Option<ValueExpr<T>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    by: Option<ValueExpr<T>>,
    #[serde(default)]
    remap: ProgressRemap,
    #[serde(default)]
    is_additive: bool,
    #[serde(default)]
    is_cumulative: bool,
    #[serde(skip)]
    state: FreezeState,
    #[serde(skip)]
    version: u64,
}

impl<T> Default for FromToByAnimation<T> {
    fn default() -> Self {
        Self {
            from: None,
            to: None,
            by: None,
            remap: ProgressRemap::Identity,
            is_additive: false,
            is_cumulative: false,
            state: FreezeState::Mutable,
            version: 0,
        }
    }
}

impl<T> FromToByAnimation<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_from(mut self, v: impl Into<ValueExpr<T>>) -> Self {
        self.from = Some(v.into());
        self
    }

    pub fn with_to(mut self, v: impl Into<ValueExpr<T>>) -> Self {
        self.to = Some(v.into());
        self
    }

    pub fn with_by(mut self, v: impl Into<ValueExpr<T>>) -> Self {
        self.by = Some(v.into());
        self
    }

    pub fn with_remap(mut self, remap: impl Into<ProgressRemap>) -> Self {
        self.remap = remap.into();
        self
    }

    pub fn additive(mut self, yes: bool) -> Self {
        self.is_additive = yes;
        self
    }

    pub fn cumulative(mut self, yes: bool) -> Self {
        self.is_cumulative = yes;
        self
    }

    pub fn from_value(&self) -> Option<&ValueExpr<T>> {
        self.from.as_ref()
    }

    pub fn to_value(&self) -> Option<&ValueExpr<T>> {
        self.to.as_ref()
    }

    pub fn by_value(&self) -> Option<&ValueExpr<T>> {
        self.by.as_ref()
    }

    pub fn remap(&self) -> &ProgressRemap {
        &self.remap
    }

    pub fn is_additive(&self) -> bool {
        self.is_additive
    }

    pub fn is_cumulative(&self) -> bool {
        self.is_cumulative
    }

    /// Bumped on every successful setter call; dependents compare it to spot changes.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn set_from(&mut self, v: Option<ValueExpr<T>>) -> AnimResult<()> {
        ensure_mutable(self.state, "animation")?;
        self.from = v;
        self.version += 1;
        Ok(())
    }

    pub fn set_to(&mut self, v: Option<ValueExpr<T>>) -> AnimResult<()> {
        ensure_mutable(self.state, "animation")?;
        self.to = v;
        self.version += 1;
        Ok(())
    }

    pub fn set_by(&mut self, v: Option<ValueExpr<T>>) -> AnimResult<()> {
        ensure_mutable(self.state, "animation")?;
        self.by = v;
        self.version += 1;
        Ok(())
    }

    pub fn set_remap(&mut self, remap: ProgressRemap) -> AnimResult<()> {
        ensure_mutable(self.state, "animation")?;
        self.remap = remap;
        self.version += 1;
        Ok(())
    }

    pub fn set_additive(&mut self, yes: bool) -> AnimResult<()> {
        ensure_mutable(self.state, "animation")?;
        self.is_additive = yes;
        self.version += 1;
        Ok(())
    }

    pub fn set_cumulative(&mut self, yes: bool) -> AnimResult<()> {
        ensure_mutable(self.state, "animation")?;
        self.is_cumulative = yes;
        self.version += 1;
        Ok(())
    }

    pub fn kind(&self) -> AnimationFunctionKind {
        match (self.from.is_some(), self.to.is_some(), self.by.is_some()) {
            (true, true, _) => AnimationFunctionKind::FromTo,
            (true, false, true) => AnimationFunctionKind::FromBy,
            (true, false, false) => AnimationFunctionKind::From,
            (false, true, _) => AnimationFunctionKind::To,
            (false, false, true) => AnimationFunctionKind::By,
            (false, false, false) => AnimationFunctionKind::Automatic,
        }
    }
}

/// Concrete endpoints for one evaluation.
struct Endpoints<T> {
    from: T,
    to: T,
    foundation: Option<T>,
}

impl<T: Animatable> FromToByAnimation<T> {
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
        if clock.state() == ClockState::Stopped {
            return Ok(destination.clone());
        }

        let Endpoints {
            from,
            to,
            foundation,
        } = self.endpoints(origin, destination, options)?;
        let progress = self.remap.apply(clock.progress());

        let mut value = T::interpolate(&from, &to, progress);
        if self.is_cumulative && clock.iteration() > 1 {
            let repeats = f64::from(clock.iteration() - 1);
            let accumulated = T::scale_value(&T::subtract_values(&to, &from), repeats);
            value = T::add_values(&accumulated, &value);
        }
        if let Some(foundation) = foundation {
            value = T::add_values(&foundation, &value);
        }
        Ok(value)
    }

    /// Resolve the endpoints for `self.kind()`, validating only the defaults that kind uses.
    fn endpoints(
        &self,
        origin: &T,
        destination: &T,
        options: &EvalOptions,
    ) -> AnimResult<Endpoints<T>> {
        let current = |v: &Option<ValueExpr<T>>| v.as_ref().map(ValueExpr::current);
        let origin_checked = || -> AnimResult<T> {
            options.check_default(origin, "origin")?;
            Ok(origin.clone())
        };
        let destination_checked = || -> AnimResult<T> {
            options.check_default(destination, "destination")?;
            Ok(destination.clone())
        };
        let additive_foundation = || -> AnimResult<Option<T>> {
            if self.is_additive {
                origin_checked().map(Some)
            } else {
                Ok(None)
            }
        };

        let (from, to, by) = (current(&self.from), current(&self.to), current(&self.by));
        Ok(match (from, to, by) {
            (Some(from), Some(to), _) => Endpoints {
                from,
                to,
                foundation: additive_foundation()?,
            },
            (Some(from), None, Some(by)) => Endpoints {
                to: T::add_values(&from, &by),
                from,
                foundation: additive_foundation()?,
            },
            (Some(from), None, None) => Endpoints {
                from,
                to: destination_checked()?,
                foundation: None,
            },
            (None, Some(to), _) => Endpoints {
                from: origin_checked()?,
                to,
                foundation: None,
            },
            (None, None, Some(by)) => Endpoints {
                from: T::zero_value(&by),
                foundation: Some(origin_checked()?),
                to: by,
            },
            (None, None, None) => Endpoints {
                from: origin_checked()?,
                to: destination_checked()?,
                foundation: None,
            },
        })
    }
}

impl<T: Clone> Clone for FromToByAnimation<T> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            to: self.to.clone(),
            by: self.by.clone(),
            remap: self.remap.clone(),
            is_additive: self.is_additive,
            is_cumulative: self.is_cumulative,
            state: FreezeState::Mutable,
            version: 0,
        }
    }
}

impl<T: PartialEq> PartialEq for FromToByAnimation<T> {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from
            && self.to == other.to
            && self.by == other.by
            && self.remap == other.remap
            && self.is_additive == other.is_additive
            && self.is_cumulative == other.is_cumulative
    }
}

impl<T: Clone> Freezable for FromToByAnimation<T> {
    fn freeze_state(&self) -> FreezeState {
        self.state
    }

    fn can_freeze(&self) -> bool {
        self.is_frozen()
            || [&self.from, &self.to, &self.by]
                .into_iter()
                .flatten()
                .all(|v| !v.is_bound())
    }

    fn freeze_owned(&mut self) {
        self.state = FreezeState::Frozen;
    }

    fn clone_current_value(&self) -> Self {
        let local = |v: &Option<ValueExpr<T>>| v.as_ref().map(ValueExpr::to_local);
        Self {
            from: local(&self.from),
            to: local(&self.to),
            by: local(&self.by),
            ..self.clone()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/from_to_by.rs"]
mod tests;
