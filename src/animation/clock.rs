use crate::foundation::error::{AnimError, AnimResult};

/// Externally driven clock state for one evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockState {
    #[default]
    Active,
    /// Past the active period, holding the final value.
    Filling,
    /// Not running; animations yield the destination value untouched.
    Stopped,
}

/// Evaluation input: progress within the current iteration, 1-based iteration, state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Clock {
    progress: f64,
    iteration: u32,
    state: ClockState,
}

impl Clock {
    pub fn new(progress: f64, iteration: u32, state: ClockState) -> AnimResult<Self> {
        if !(0.0..=1.0).contains(&progress) {
            return Err(AnimError::invalid_argument(format!(
                "clock progress must be in [0, 1], got {progress}"
            )));
        }
        if iteration == 0 {
            return Err(AnimError::invalid_argument("clock iteration is 1-based"));
        }
        Ok(Self {
            progress,
            iteration,
            state,
        })
    }

    /// Active clock in its first iteration.
    pub fn active(progress: f64) -> AnimResult<Self> {
        Self::new(progress, 1, ClockState::Active)
    }

    pub fn stopped() -> Self {
        Self {
            progress: 0.0,
            iteration: 1,
            state: ClockState::Stopped,
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    pub fn state(&self) -> ClockState {
        self.state
    }
}

/// How many times the active period runs.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatBehavior {
    /// Possibly fractional iteration count.
    Count(f64),
    Forever,
}

impl Default for RepeatBehavior {
    fn default() -> Self {
        Self::Count(1.0)
    }
}

/// What happens once the active period is over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillBehavior {
    #[default]
    HoldEnd,
    Stop,
}

fn default_speed() -> f64 {
    1.0
}

/// Maps elapsed wall time to a [`Clock`].
///
/// One iteration lasts `duration` seconds, twice that with `auto_reverse`, and runs at
/// `speed_ratio` after an initial `begin` delay.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    #[serde(default)]
    pub begin: f64,
    pub duration: f64,
    #[serde(default)]
    pub repeat: RepeatBehavior,
    #[serde(default)]
    pub auto_reverse: bool,
    #[serde(default = "default_speed")]
    pub speed_ratio: f64,
    #[serde(default)]
    pub fill: FillBehavior,
}

impl Timeline {
    pub fn new(duration: f64) -> Self {
        Self {
            begin: 0.0,
            duration,
            repeat: RepeatBehavior::default(),
            auto_reverse: false,
            speed_ratio: 1.0,
            fill: FillBehavior::default(),
        }
    }

    pub fn validate(&self) -> AnimResult<()> {
        if !self.begin.is_finite() {
            return Err(AnimError::validation("timeline begin must be finite"));
        }
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(AnimError::validation("timeline duration must be > 0"));
        }
        if !self.speed_ratio.is_finite() || self.speed_ratio <= 0.0 {
            return Err(AnimError::validation("timeline speed_ratio must be > 0"));
        }
        if let RepeatBehavior::Count(n) = self.repeat
            && (!n.is_finite() || n < 0.0)
        {
            return Err(AnimError::validation(
                "timeline repeat count must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Clock state `elapsed` seconds after the timeline was started.
    pub fn clock_at(&self, elapsed: f64) -> AnimResult<Clock> {
        self.validate()?;
        if !elapsed.is_finite() {
            return Err(AnimError::invalid_argument("elapsed time must be finite"));
        }

        let local = elapsed - self.begin;
        if local < 0.0 {
            return Ok(Clock::stopped());
        }
        let scaled = local * self.speed_ratio;
        let period = if self.auto_reverse {
            2.0 * self.duration
        } else {
            self.duration
        };

        let RepeatBehavior::Count(count) = self.repeat else {
            return Ok(self.phase(scaled, period, ClockState::Active));
        };
        let total = count * period;
        if scaled < total {
            return Ok(self.phase(scaled, period, ClockState::Active));
        }

        match self.fill {
            FillBehavior::Stop => Ok(Clock::stopped()),
            FillBehavior::HoldEnd if count == 0.0 => Ok(Clock {
                progress: 0.0,
                iteration: 1,
                state: ClockState::Filling,
            }),
            FillBehavior::HoldEnd if count.fract() == 0.0 => Ok(Clock {
                progress: if self.auto_reverse { 0.0 } else { 1.0 },
                iteration: count.min(f64::from(u32::MAX)) as u32,
                state: ClockState::Filling,
            }),
            FillBehavior::HoldEnd => Ok(self.phase(total, period, ClockState::Filling)),
        }
    }

    fn phase(&self, scaled: f64, period: f64, state: ClockState) -> Clock {
        let index = (scaled / period).floor();
        let within = scaled - index * period;
        let forward = within / self.duration;
        let progress = if self.auto_reverse && forward > 1.0 {
            2.0 - forward
        } else {
            forward
        };
        Clock {
            progress: progress.clamp(0.0, 1.0),
            iteration: (index + 1.0).min(f64::from(u32::MAX)) as u32,
            state,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/clock.rs"]
mod tests;
