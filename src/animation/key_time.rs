use crate::{
    animation::{animatable::Animatable, key_frame::KeyFrame},
    foundation::error::{AnimError, AnimResult},
};

/// When a keyframe is reached.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "KeyTimeDef", into = "KeyTimeDef")]
pub enum KeyTime {
    /// Absolute time in seconds from the start of the animation.
    Seconds(f64),
    /// Fraction of the animation duration, in `[0, 1]`.
    Percent(f64),
    /// Evenly spaced between the neighbouring resolved keyframes.
    Uniform,
    /// Spaced so the animated value changes at a constant rate.
    Paced,
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
enum KeyTimeDef {
    Seconds(f64),
    Percent(f64),
    Uniform,
    Paced,
}

impl TryFrom<KeyTimeDef> for KeyTime {
    type Error = AnimError;

    fn try_from(d: KeyTimeDef) -> Result<Self, Self::Error> {
        match d {
            KeyTimeDef::Seconds(s) => Self::seconds(s),
            KeyTimeDef::Percent(p) => Self::percent(p),
            KeyTimeDef::Uniform => Ok(Self::Uniform),
            KeyTimeDef::Paced => Ok(Self::Paced),
        }
    }
}

impl From<KeyTime> for KeyTimeDef {
    fn from(k: KeyTime) -> Self {
        match k {
            KeyTime::Seconds(s) => Self::Seconds(s),
            KeyTime::Percent(p) => Self::Percent(p),
            KeyTime::Uniform => Self::Uniform,
            KeyTime::Paced => Self::Paced,
        }
    }
}

impl KeyTime {
    pub fn seconds(s: f64) -> AnimResult<Self> {
        if !s.is_finite() || s < 0.0 {
            return Err(AnimError::invalid_argument(format!(
                "key time seconds must be finite and >= 0, got {s}"
            )));
        }
        Ok(Self::Seconds(s))
    }

    pub fn percent(p: f64) -> AnimResult<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(AnimError::invalid_argument(format!(
                "key time percent must be in [0, 1], got {p}"
            )));
        }
        Ok(Self::Percent(p))
    }

    pub(crate) fn validate(self) -> AnimResult<Self> {
        match self {
            Self::Seconds(s) => Self::seconds(s),
            Self::Percent(p) => Self::percent(p),
            Self::Uniform | Self::Paced => Ok(self),
        }
    }
}

/// Resolved time of one keyframe; `index` points back into the collection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedKeyTime {
    pub index: usize,
    pub time: f64,
}

/// Keyframe times resolved against a calculation duration, sorted by time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedKeyTimes {
    pub duration: f64,
    pub entries: Vec<ResolvedKeyTime>,
}

/// Duration that percent key times are scaled by.
///
/// The explicit duration when given, else the largest absolute key time, else one second.
pub fn calculation_duration<T>(frames: &[KeyFrame<T>], duration: Option<f64>) -> f64 {
    if let Some(d) = duration.filter(|d| d.is_finite() && *d > 0.0) {
        return d;
    }
    let largest = frames
        .iter()
        .filter_map(|kf| match kf.key_time() {
            KeyTime::Seconds(s) => Some(s),
            _ => None,
        })
        .fold(0.0_f64, f64::max);
    if largest > 0.0 { largest } else { 1.0 }
}

/// Resolve every keyframe's time.
///
/// Uniform and paced frames are placed between the nearest resolved neighbours. A trailing
/// uniform/paced frame lands on the duration and a leading paced frame on zero. A run made
/// only of paced frames is spaced by value distance; any other run is spaced evenly.
#[tracing::instrument(level = "trace", skip(frames), fields(count = frames.len()))]
pub fn resolve_key_times<T: Animatable>(
    frames: &[KeyFrame<T>],
    duration: Option<f64>,
) -> ResolvedKeyTimes {
    let n = frames.len();
    let calc = calculation_duration(frames, duration);
    if n == 0 {
        return ResolvedKeyTimes {
            duration: calc,
            entries: Vec::new(),
        };
    }

    let mut times: Vec<Option<f64>> = frames
        .iter()
        .map(|kf| match kf.key_time() {
            KeyTime::Seconds(s) => Some(s),
            KeyTime::Percent(p) => Some(p * calc),
            KeyTime::Uniform | KeyTime::Paced => None,
        })
        .collect();

    if times[n - 1].is_none() {
        times[n - 1] = Some(calc);
    }
    if n > 1 && frames[0].key_time() == KeyTime::Paced {
        times[0] = Some(0.0);
    }

    let values: Vec<T> = frames.iter().map(KeyFrame::value).collect();
    let mut i = 0;
    while i < n {
        if times[i].is_some() {
            i += 1;
            continue;
        }
        let run_start = i;
        while times[i].is_none() {
            i += 1;
        }
        // `i` is now the closing anchor; the last slot is always resolved.
        fill_run(frames, &values, &mut times, run_start, i);
    }

    let mut entries: Vec<ResolvedKeyTime> = times
        .into_iter()
        .enumerate()
        .map(|(index, t)| ResolvedKeyTime {
            index,
            time: t.unwrap_or(calc),
        })
        .collect();
    entries.sort_by(|a, b| a.time.total_cmp(&b.time));

    ResolvedKeyTimes {
        duration: calc,
        entries,
    }
}

/// Fill unresolved slots `start..end`, where `end` is resolved and `start - 1` (if any) is too.
fn fill_run<T: Animatable>(
    frames: &[KeyFrame<T>],
    values: &[T],
    times: &mut [Option<f64>],
    start: usize,
    end: usize,
) {
    let begin_time = if start == 0 {
        0.0
    } else {
        times[start - 1].unwrap_or(0.0)
    };
    let end_time = times[end].unwrap_or(begin_time);
    let span = end_time - begin_time;
    let count = end - start;

    let all_paced = start > 0
        && frames[start..end]
            .iter()
            .all(|kf| kf.key_time() == KeyTime::Paced);
    if all_paced {
        let lengths: Vec<f64> = (start..=end)
            .map(|k| T::segment_length(&values[k - 1], &values[k]))
            .collect();
        let total: f64 = lengths.iter().sum();
        if total > 0.0 && total.is_finite() {
            let mut acc = 0.0;
            for (offset, len) in lengths.iter().take(count).enumerate() {
                acc += len;
                times[start + offset] = Some(begin_time + span * acc / total);
            }
            return;
        }
    }

    let steps = (count + 1) as f64;
    for offset in 0..count {
        times[start + offset] = Some(begin_time + span * (offset + 1) as f64 / steps);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/key_time.rs"]
mod tests;
