use std::borrow::Cow;

use crate::{
    animation::{
        animatable::Animatable,
        clock::{Clock, ClockState},
        collection::KeyFrameCollection,
        key_frame::KeyFrame,
        key_time::{ResolvedKeyTimes, resolve_key_times},
        options::{EvalOptions, LeadIn},
    },
    foundation::error::{AnimError, AnimResult},
    freeze::state::{FreezeState, Freezable, ensure_mutable},
};

/// Where a progress value falls among the resolved keyframes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
    /// Before the first keyframe's time. `local` is the progress towards it.
    LeadIn { first: usize, local: f64 },
    /// Inside `(prev, next]`; `local` is the progress within the segment.
    Between { prev: usize, next: usize, local: f64 },
    /// Exactly on a keyframe time, or past the last one.
    At { index: usize },
}

/// Locate the segment for time `t`; `None` when there are no keyframes.
pub fn locate_segment(resolved: &ResolvedKeyTimes, t: f64) -> Option<Segment> {
    let entries = &resolved.entries;
    let last = entries.last()?;

    let upper = entries.partition_point(|e| e.time < t);
    if upper == entries.len() {
        return Some(Segment::At { index: last.index });
    }
    if entries[upper].time == t {
        // Several keyframes may share a time; the last one wins.
        let at = entries.partition_point(|e| e.time <= t) - 1;
        return Some(Segment::At {
            index: entries[at].index,
        });
    }
    if upper == 0 {
        let first = entries[0];
        let local = if first.time > 0.0 { t / first.time } else { 1.0 };
        return Some(Segment::LeadIn {
            first: first.index,
            local: local.clamp(0.0, 1.0),
        });
    }

    let prev = entries[upper - 1];
    let next = entries[upper];
    let span = next.time - prev.time;
    let local = if span > 0.0 {
        ((t - prev.time) / span).clamp(0.0, 1.0)
    } else {
        1.0
    };
    Some(Segment::Between {
        prev: prev.index,
        next: next.index,
        local,
    })
}

/// Piecewise animation through timed keyframes.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(bound(
    serialize = "T: serde::Serialize + Clone",
    deserialize = "T: serde::Deserialize<'de>"
))]
pub struct KeyFrameAnimation<T> {
    key_frames: KeyFrameCollection<T>,
    /// Explicit duration in seconds; derived from the key times when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    duration: Option<f64>,
    #[serde(default)]
    is_additive: bool,
    #[serde(default)]
    is_cumulative: bool,
    #[serde(skip)]
    state: FreezeState,
    #[serde(skip)]
    resolved: Option<ResolvedKeyTimes>,
    #[serde(skip)]
    version: u64,
}

impl<T> Default for KeyFrameAnimation<T> {
    fn default() -> Self {
        Self {
            key_frames: KeyFrameCollection::new(),
            duration: None,
            is_additive: false,
            is_cumulative: false,
            state: FreezeState::Mutable,
            resolved: None,
            version: 0,
        }
    }
}

impl<T> KeyFrameAnimation<T> {
    pub fn new(key_frames: KeyFrameCollection<T>) -> Self {
        Self {
            key_frames,
            ..Self::default()
        }
    }

    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
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

    pub fn key_frames(&self) -> &KeyFrameCollection<T> {
        &self.key_frames
    }

    /// Mutable access to the keyframes; refused once frozen.
    ///
    /// Counts as a change even if the caller leaves the keyframes alone. The collection's
    /// version is folded in first so that replacing the collection never lowers
    /// [`version`](Self::version).
    pub fn key_frames_mut(&mut self) -> AnimResult<&mut KeyFrameCollection<T>> {
        ensure_mutable(self.state, "key frame animation")?;
        self.version += self.key_frames.version() + 1;
        Ok(&mut self.key_frames)
    }

    /// Grows on every successful setter call and on every keyframe edit.
    pub fn version(&self) -> u64 {
        self.version + self.key_frames.version()
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn set_duration(&mut self, seconds: Option<f64>) -> AnimResult<()> {
        ensure_mutable(self.state, "key frame animation")?;
        if let Some(d) = seconds
            && (!d.is_finite() || d <= 0.0)
        {
            return Err(AnimError::invalid_argument(format!(
                "animation duration must be > 0, got {d}"
            )));
        }
        self.duration = seconds;
        self.version += 1;
        Ok(())
    }

    pub fn is_additive(&self) -> bool {
        self.is_additive
    }

    pub fn set_additive(&mut self, yes: bool) -> AnimResult<()> {
        ensure_mutable(self.state, "key frame animation")?;
        self.is_additive = yes;
        self.version += 1;
        Ok(())
    }

    pub fn is_cumulative(&self) -> bool {
        self.is_cumulative
    }

    pub fn set_cumulative(&mut self, yes: bool) -> AnimResult<()> {
        ensure_mutable(self.state, "key frame animation")?;
        self.is_cumulative = yes;
        self.version += 1;
        Ok(())
    }
}

impl<T: Animatable> KeyFrameAnimation<T> {
    /// Resolved key times; cached once the animation is frozen.
    pub fn resolved_key_times(&self) -> Cow<'_, ResolvedKeyTimes> {
        match &self.resolved {
            Some(r) => Cow::Borrowed(r),
            None => Cow::Owned(resolve_key_times(
                self.key_frames.as_slice(),
                self.duration,
            )),
        }
    }

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
        if clock.state() == ClockState::Stopped || self.key_frames.is_empty() {
            return Ok(destination.clone());
        }

        let frames = self.key_frames.as_slice();
        let resolved = self.resolved_key_times();
        let t = clock.progress() * resolved.duration;
        let Some(segment) = locate_segment(&resolved, t) else {
            return Ok(destination.clone());
        };

        let mut value = match segment {
            Segment::At { index } => frames[index].value(),
            Segment::LeadIn { first, local } => {
                let base = self.base_value(origin, options)?;
                match options.lead_in {
                    LeadIn::Hold => base,
                    LeadIn::Interpolate => frames[first].interpolate_value(&base, local)?,
                }
            }
            Segment::Between { prev, next, local } => {
                frames[next].interpolate_value(&frames[prev].value(), local)?
            }
        };

        if self.is_cumulative
            && clock.iteration() > 1
            && let Some(last) = resolved.entries.last()
        {
            let repeats = f64::from(clock.iteration() - 1);
            let accumulated = T::scale_value(&frames[last.index].value(), repeats);
            value = T::add_values(&accumulated, &value);
        }
        if self.is_additive {
            options.check_default(origin, "origin")?;
            value = T::add_values(origin, &value);
        }
        Ok(value)
    }

    /// Value the first keyframe starts from.
    fn base_value(&self, origin: &T, options: &EvalOptions) -> AnimResult<T> {
        if self.is_additive {
            return Ok(T::zero_value(origin));
        }
        options.check_default(origin, "origin")?;
        Ok(origin.clone())
    }
}

impl<T: Clone> Clone for KeyFrameAnimation<T> {
    fn clone(&self) -> Self {
        Self {
            key_frames: self.key_frames.clone(),
            duration: self.duration,
            is_additive: self.is_additive,
            is_cumulative: self.is_cumulative,
            state: FreezeState::Mutable,
            resolved: None,
            version: 0,
        }
    }
}

impl<T: PartialEq> PartialEq for KeyFrameAnimation<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key_frames == other.key_frames
            && self.duration == other.duration
            && self.is_additive == other.is_additive
            && self.is_cumulative == other.is_cumulative
    }
}

impl<T: Animatable> Freezable for KeyFrameAnimation<T> {
    fn freeze_state(&self) -> FreezeState {
        self.state
    }

    fn can_freeze(&self) -> bool {
        self.is_frozen() || self.key_frames.can_freeze()
    }

    #[tracing::instrument(level = "debug", skip(self), fields(frames = self.key_frames.len()))]
    fn freeze_owned(&mut self) {
        self.key_frames.freeze_owned();
        self.resolved = Some(resolve_key_times(
            self.key_frames.as_slice(),
            self.duration,
        ));
        self.state = FreezeState::Frozen;
    }

    fn clone_current_value(&self) -> Self {
        Self {
            key_frames: self.key_frames.clone_current_value(),
            ..self.clone()
        }
    }
}

impl<T> From<KeyFrameCollection<T>> for KeyFrameAnimation<T> {
    fn from(key_frames: KeyFrameCollection<T>) -> Self {
        Self::new(key_frames)
    }
}

impl<T> FromIterator<KeyFrame<T>> for KeyFrameAnimation<T> {
    fn from_iter<I: IntoIterator<Item = KeyFrame<T>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/key_frames.rs"]
mod tests;
