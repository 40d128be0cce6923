use std::{f64::consts::PI, fmt, sync::Arc};

/// Which end of the curve the easing applies to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingMode {
    /// The curve as defined.
    EaseIn,
    /// The curve mirrored in time and value.
    #[default]
    EaseOut,
    /// `EaseIn` for the first half, `EaseOut` for the second.
    EaseInOut,
}

/// Easing curve shapes. Parameters are clamped where negative values make no sense.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EasingKind {
    Back {
        #[serde(default = "default_one")]
        amplitude: f64,
    },
    Bounce {
        #[serde(default = "default_three")]
        bounces: u32,
        #[serde(default = "default_two")]
        bounciness: f64,
    },
    Circle,
    Cubic,
    Elastic {
        #[serde(default = "default_three")]
        oscillations: u32,
        #[serde(default = "default_three")]
        springiness: f64,
    },
    Exponential {
        #[serde(default = "default_two")]
        exponent: f64,
    },
    Power {
        #[serde(default = "default_two")]
        power: f64,
    },
    Quadratic,
    Quartic,
    Quintic,
    Sine,
}

fn default_one() -> f64 {
    1.0
}

fn default_two() -> f64 {
    2.0
}

fn default_three<N: From<u8>>() -> N {
    N::from(3)
}

impl EasingKind {
    /// The `EaseIn` form of the curve.
    fn ease_in_core(self, t: f64) -> f64 {
        match self {
            Self::Back { amplitude } => {
                let amp = amplitude.max(0.0);
                t * t * t - t * amp * (PI * t).sin()
            }
            Self::Bounce {
                bounces,
                bounciness,
            } => bounce_core(t, f64::from(bounces), bounciness),
            Self::Circle => {
                let t = t.clamp(0.0, 1.0);
                1.0 - (1.0 - t * t).sqrt()
            }
            Self::Cubic => t * t * t,
            Self::Elastic {
                oscillations,
                springiness,
            } => {
                let springiness = springiness.max(0.0);
                let expo = if springiness == 0.0 {
                    t
                } else {
                    ((springiness * t).exp() - 1.0) / (springiness.exp() - 1.0)
                };
                expo * ((2.0 * PI * f64::from(oscillations) + PI * 0.5) * t).sin()
            }
            Self::Exponential { exponent } => {
                if exponent == 0.0 {
                    t
                } else {
                    ((exponent * t).exp() - 1.0) / (exponent.exp() - 1.0)
                }
            }
            Self::Power { power } => t.powf(power.max(0.0)),
            Self::Quadratic => t * t,
            Self::Quartic => t * t * t * t,
            Self::Quintic => t * t * t * t * t,
            Self::Sine => 1.0 - ((1.0 - t) * PI * 0.5).sin(),
        }
    }
}

fn bounce_core(t: f64, bounces: f64, bounciness: f64) -> f64 {
    let bounciness = if bounciness <= 1.0 { 1.001 } else { bounciness };
    let pow = bounciness.powf(bounces);
    let one_minus = 1.0 - bounciness;

    // Each bounce is `bounciness` times shorter than the previous one; the last is a half.
    let sum_of_units = (1.0 - pow) / one_minus + pow * 0.5;
    let unit_at_t = t * sum_of_units;

    let bounce_at_t = (-unit_at_t * one_minus + 1.0).log(bounciness);
    let start = bounce_at_t.floor();
    let end = start + 1.0;

    let start_time = (1.0 - bounciness.powf(start)) / (one_minus * sum_of_units);
    let end_time = (1.0 - bounciness.powf(end)) / (one_minus * sum_of_units);

    let mid_time = (start_time + end_time) * 0.5;
    let from_peak = t - mid_time;
    let radius = mid_time - start_time;
    let amplitude = (1.0 / bounciness).powf(bounces - start);

    (-amplitude / (radius * radius)) * (from_peak - radius) * (from_peak + radius)
}

/// A named easing curve with its mode.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EasingFunction {
    #[serde(flatten)]
    pub kind: EasingKind,
    #[serde(default)]
    pub mode: EasingMode,
}

impl EasingFunction {
    pub fn new(kind: EasingKind, mode: EasingMode) -> Self {
        Self { kind, mode }
    }

    pub fn apply(&self, t: f64) -> f64 {
        match self.mode {
            EasingMode::EaseIn => self.kind.ease_in_core(t),
            EasingMode::EaseOut => 1.0 - self.kind.ease_in_core(1.0 - t),
            EasingMode::EaseInOut => {
                if t < 0.5 {
                    self.kind.ease_in_core(t * 2.0) * 0.5
                } else {
                    (1.0 - self.kind.ease_in_core((1.0 - t) * 2.0)) * 0.5 + 0.5
                }
            }
        }
    }
}

/// Host-supplied easing closure.
#[derive(Clone)]
pub struct CustomEase {
    name: String,
    f: Arc<dyn Fn(f64) -> f64 + Send + Sync>,
}

impl CustomEase {
    pub fn new(name: impl Into<String>, f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        Self {
            name: name.into(),
            f: Arc::new(f),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for CustomEase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CustomEase").field(&self.name).finish()
    }
}

impl PartialEq for CustomEase {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }
}

/// Easing: either a built-in curve or a custom closure.
///
/// Only built-in curves serialize; a custom ease is a runtime-only value.
#[derive(Clone, Debug, PartialEq)]
pub enum Ease {
    Function(EasingFunction),
    Custom(CustomEase),
}

impl Ease {
    pub fn function(kind: EasingKind, mode: EasingMode) -> Self {
        Self::Function(EasingFunction::new(kind, mode))
    }

    pub fn custom(
        name: impl Into<String>,
        f: impl Fn(f64) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self::Custom(CustomEase::new(name, f))
    }

    /// Remap `t`. Not clamped: overshooting curves such as `Back` leave `[0, 1]`.
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Self::Function(func) => func.apply(t),
            Self::Custom(c) => (c.f)(t),
        }
    }
}

impl From<EasingFunction> for Ease {
    fn from(f: EasingFunction) -> Self {
        Self::Function(f)
    }
}

impl serde::Serialize for Ease {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Function(func) => func.serialize(serializer),
            Self::Custom(c) => Err(serde::ser::Error::custom(format!(
                "custom ease '{}' cannot be serialized",
                c.name
            ))),
        }
    }
}

impl<'de> serde::Deserialize<'de> for Ease {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        EasingFunction::deserialize(deserializer).map(Self::Function)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
