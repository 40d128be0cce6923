use crate::foundation::math;

pub use glam::{DQuat as Quaternion, DVec3};
pub use kurbo::{Affine, Point, Rect, Size, Vec2};
pub use rust_decimal::Decimal;

/// Point in 3D space.
pub type Point3D = DVec3;
/// Displacement in 3D space.
pub type Vector3D = DVec3;

/// Color with scRGB (linear, unclamped float) channels.
///
/// Animation arithmetic works on the float channels so intermediate sums may leave `[0, 1]`;
/// only [`Color::to_rgba8`] clamps.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    /// Alpha.
    pub a: f32,
    /// Linear red.
    pub r: f32,
    /// Linear green.
    pub g: f32,
    /// Linear blue.
    pub b: f32,
}

impl Color {
    /// All channels zero; the additive identity for colors.
    pub const TRANSPARENT: Self = Self {
        a: 0.0,
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Build from scRGB channels.
    pub fn from_sc_rgb(a: f32, r: f32, g: f32, b: f32) -> Self {
        Self { a, r, g, b }
    }

    /// Build from straight (non-premultiplied) sRGB bytes.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            a: f32::from(a) / 255.0,
            r: srgb_to_linear(r),
            g: srgb_to_linear(g),
            b: srgb_to_linear(b),
        }
    }

    /// Convert back to sRGB bytes `[r, g, b, a]`, clamping out-of-gamut channels.
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            linear_to_srgb(self.r),
            linear_to_srgb(self.g),
            linear_to_srgb(self.b),
            (self.a.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }

    /// True when every channel is finite.
    pub fn is_finite(self) -> bool {
        self.a.is_finite() && self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }
}

fn srgb_to_linear(c: u8) -> f32 {
    let c = f32::from(c) / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f32) -> u8 {
    let c = c.clamp(0.0, 1.0);
    let s = if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    };
    (s * 255.0).round() as u8
}

/// 3D rotation, either as an axis/angle pair or as a quaternion.
///
/// Animation arithmetic always goes through the quaternion form and produces
/// [`Rotation3D::Quaternion`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rotation3D {
    /// Rotation of `angle` degrees about `axis`. A zero axis is the identity rotation.
    AxisAngle {
        /// Rotation axis; need not be normalized.
        axis: Vector3D,
        /// Angle in degrees.
        angle: f64,
    },
    /// Rotation given directly as a quaternion.
    Quaternion(Quaternion),
}

impl Default for Rotation3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Rotation3D {
    /// The identity rotation.
    pub fn identity() -> Self {
        Self::Quaternion(Quaternion::IDENTITY)
    }

    /// Rotation of `angle_deg` degrees about `axis`.
    pub fn axis_angle(axis: Vector3D, angle_deg: f64) -> Self {
        Self::AxisAngle {
            axis,
            angle: angle_deg,
        }
    }

    /// Quaternion form of this rotation.
    pub fn to_quaternion(self) -> Quaternion {
        match self {
            Self::AxisAngle { axis, angle } => math::quat_from_axis_angle(axis, angle),
            Self::Quaternion(q) => q,
        }
    }

    /// True when all components are finite.
    pub fn is_finite(self) -> bool {
        match self {
            Self::AxisAngle { axis, angle } => axis.is_finite() && angle.is_finite(),
            Self::Quaternion(q) => q.is_finite(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
