use crate::animation::{ease::Ease, spline::KeySpline};

/// How an animation reshapes its linear progress before interpolating.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressRemap {
    #[default]
    Identity,
    Ease(Ease),
    Spline(KeySpline),
}

impl ProgressRemap {
    pub fn apply(&self, p: f64) -> f64 {
        match self {
            Self::Identity => p,
            Self::Ease(e) => e.apply(p),
            Self::Spline(s) => s.get_spline_progress(p),
        }
    }
}

impl From<Ease> for ProgressRemap {
    fn from(e: Ease) -> Self {
        Self::Ease(e)
    }
}

impl From<KeySpline> for ProgressRemap {
    fn from(s: KeySpline) -> Self {
        Self::Spline(s)
    }
}
