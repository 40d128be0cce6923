use crate::foundation::{
    core::Point,
    error::{AnimError, AnimResult},
};

/// Solver stops once the curve's x is this close to the input.
const ACCURACY: f64 = 1e-7;
const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 64;

/// Cubic Bezier timing curve from `(0, 0)` to `(1, 1)` with two inner control points.
///
/// Both control points are confined to the unit square, which keeps x(t) monotonic so the
/// curve can be inverted for any input progress.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "KeySplineDef", into = "KeySplineDef")]
pub struct KeySpline {
    control_point1: Point,
    control_point2: Point,
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
struct KeySplineDef {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl TryFrom<KeySplineDef> for KeySpline {
    type Error = AnimError;

    fn try_from(d: KeySplineDef) -> Result<Self, Self::Error> {
        Self::new(Point::new(d.x1, d.y1), Point::new(d.x2, d.y2))
    }
}

impl From<KeySpline> for KeySplineDef {
    fn from(s: KeySpline) -> Self {
        Self {
            x1: s.control_point1.x,
            y1: s.control_point1.y,
            x2: s.control_point2.x,
            y2: s.control_point2.y,
        }
    }
}

impl Default for KeySpline {
    fn default() -> Self {
        Self {
            control_point1: Point::new(0.0, 0.0),
            control_point2: Point::new(1.0, 1.0),
        }
    }
}

fn in_unit_square(p: Point) -> bool {
    (0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y)
}

impl KeySpline {
    pub fn new(control_point1: Point, control_point2: Point) -> AnimResult<Self> {
        for (name, p) in [
            ("control_point1", control_point1),
            ("control_point2", control_point2),
        ] {
            if !in_unit_square(p) {
                return Err(AnimError::invalid_argument(format!(
                    "key spline {name} ({}, {}) must lie in [0, 1] x [0, 1]",
                    p.x, p.y
                )));
            }
        }
        Ok(Self {
            control_point1,
            control_point2,
        })
    }

    pub fn control_point1(&self) -> Point {
        self.control_point1
    }

    pub fn control_point2(&self) -> Point {
        self.control_point2
    }

    /// True when both control points sit on the diagonal, i.e. the curve is the identity.
    pub fn is_linear(&self) -> bool {
        self.control_point1.x == self.control_point1.y
            && self.control_point2.x == self.control_point2.y
    }

    /// Eased progress for linear progress `p`.
    pub fn get_spline_progress(&self, p: f64) -> f64 {
        if self.is_linear() {
            return p;
        }
        if p <= 0.0 {
            return 0.0;
        }
        if p >= 1.0 {
            return 1.0;
        }
        let (x1, y1) = (self.control_point1.x, self.control_point1.y);
        let (x2, y2) = (self.control_point2.x, self.control_point2.y);
        let t = solve_parameter(p, x1, x2);
        sample_curve(y1, y2, t)
    }
}

fn sample_curve(a1: f64, a2: f64, t: f64) -> f64 {
    let omt = 1.0 - t;
    3.0 * omt * omt * t * a1 + 3.0 * omt * t * t * a2 + t * t * t
}

fn sample_curve_derivative(a1: f64, a2: f64, t: f64) -> f64 {
    let omt = 1.0 - t;
    3.0 * omt * omt * a1 + 6.0 * omt * t * (a2 - a1) + 3.0 * t * t * (1.0 - a2)
}

/// Curve parameter whose x equals `x`. Newton first, bisection when Newton stalls.
fn solve_parameter(x: f64, x1: f64, x2: f64) -> f64 {
    let mut t = x;
    for _ in 0..NEWTON_ITERATIONS {
        let err = sample_curve(x1, x2, t) - x;
        if err.abs() < ACCURACY {
            return t;
        }
        let d = sample_curve_derivative(x1, x2, t);
        if d.abs() < 1e-9 {
            break;
        }
        t = (t - err / d).clamp(0.0, 1.0);
    }

    let mut lo = 0.0;
    let mut hi = 1.0;
    t = x;
    for _ in 0..BISECTION_ITERATIONS {
        let x_t = sample_curve(x1, x2, t);
        if (x_t - x).abs() < ACCURACY {
            break;
        }
        if x_t < x {
            lo = t;
        } else {
            hi = t;
        }
        t = 0.5 * (lo + hi);
    }
    t
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spline.rs"]
mod tests;
