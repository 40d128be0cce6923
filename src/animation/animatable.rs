use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::foundation::{
    core::{Affine, Color, DVec3, Decimal, Point, Quaternion, Rect, Rotation3D, Size, Vec2},
    math,
};

/// Arithmetic contract for animatable value types.
///
/// `interpolate`/`interpolate_path` pin the endpoints: progress `0.0` returns `from` and
/// `1.0` returns `to` without going through [`Animatable::interpolate_core`], so composed
/// types never drift at the boundaries.
pub trait Animatable: Clone + std::fmt::Debug {
    /// `a + b`.
    fn add_values(a: &Self, b: &Self) -> Self;

    /// `a - b`.
    fn subtract_values(a: &Self, b: &Self) -> Self;

    /// `a * factor`.
    fn scale_value(a: &Self, factor: f64) -> Self;

    /// Additive identity shaped like `like`.
    fn zero_value(like: &Self) -> Self;

    /// False for NaN/infinite components.
    fn is_valid_value(v: &Self) -> bool;

    /// Interpolation formula for `progress` strictly inside `(0, 1)`.
    fn interpolate_core(from: &Self, to: &Self, progress: f64, use_shortest_path: bool) -> Self;

    /// Distance between two values, used to space paced key times. Zero when the type has
    /// no meaningful metric.
    fn segment_length(_from: &Self, _to: &Self) -> f64 {
        0.0
    }

    /// Interpolate with the default (shortest) rotation path.
    fn interpolate(from: &Self, to: &Self, progress: f64) -> Self {
        Self::interpolate_path(from, to, progress, true)
    }

    /// Interpolate, choosing the rotation path for quaternion-like types.
    fn interpolate_path(from: &Self, to: &Self, progress: f64, use_shortest_path: bool) -> Self {
        if progress == 0.0 {
            return from.clone();
        }
        if progress == 1.0 {
            return to.clone();
        }
        Self::interpolate_core(from, to, progress, use_shortest_path)
    }
}

fn step<T: Clone>(from: &T, to: &T, progress: f64) -> T {
    if progress < 0.5 {
        from.clone()
    } else {
        to.clone()
    }
}

impl Animatable for f64 {
    fn add_values(a: &Self, b: &Self) -> Self {
        a + b
    }

    fn subtract_values(a: &Self, b: &Self) -> Self {
        a - b
    }

    fn scale_value(a: &Self, factor: f64) -> Self {
        a * factor
    }

    fn zero_value(_like: &Self) -> Self {
        0.0
    }

    fn is_valid_value(v: &Self) -> bool {
        v.is_finite()
    }

    fn interpolate_core(from: &Self, to: &Self, progress: f64, _: bool) -> Self {
        math::lerp_f64(*from, *to, progress)
    }

    fn segment_length(from: &Self, to: &Self) -> f64 {
        (to - from).abs()
    }
}

impl Animatable for f32 {
    fn add_values(a: &Self, b: &Self) -> Self {
        a + b
    }

    fn subtract_values(a: &Self, b: &Self) -> Self {
        a - b
    }

    fn scale_value(a: &Self, factor: f64) -> Self {
        (f64::from(*a) * factor) as f32
    }

    fn zero_value(_like: &Self) -> Self {
        0.0
    }

    fn is_valid_value(v: &Self) -> bool {
        v.is_finite()
    }

    fn interpolate_core(from: &Self, to: &Self, progress: f64, _: bool) -> Self {
        from + (f64::from(to - from) * progress) as f32
    }

    fn segment_length(from: &Self, to: &Self) -> f64 {
        f64::from((to - from).abs())
    }
}

impl Animatable for u8 {
    fn add_values(a: &Self, b: &Self) -> Self {
        a.wrapping_add(*b)
    }

    fn subtract_values(a: &Self, b: &Self) -> Self {
        a.wrapping_sub(*b)
    }

    fn scale_value(a: &Self, factor: f64) -> Self {
        (f64::from(*a) * factor) as u8
    }

    fn zero_value(_like: &Self) -> Self {
        0
    }

    fn is_valid_value(_v: &Self) -> bool {
        true
    }

    fn interpolate_core(from: &Self, to: &Self, progress: f64, _: bool) -> Self {
        math::lerp_rounded(f64::from(*from), f64::from(*to), progress) as u8
    }

    fn segment_length(from: &Self, to: &Self) -> f64 {
        f64::from(from.abs_diff(*to))
    }
}

impl Animatable for i16 {
    fn add_values(a: &Self, b: &Self) -> Self {
        a.wrapping_add(*b)
    }

    fn subtract_values(a: &Self, b: &Self) -> Self {
        a.wrapping_sub(*b)
    }

    fn scale_value(a: &Self, factor: f64) -> Self {
        (f64::from(*a) * factor) as i16
    }

    fn zero_value(_like: &Self) -> Self {
        0
    }

    fn is_valid_value(_v: &Self) -> bool {
        true
    }

    fn interpolate_core(from: &Self, to: &Self, progress: f64, _: bool) -> Self {
        math::lerp_rounded(f64::from(*from), f64::from(*to), progress) as i16
    }

    fn segment_length(from: &Self, to: &Self) -> f64 {
        f64::from(from.abs_diff(*to))
    }
}

impl Animatable for i32 {
    fn add_values(a: &Self, b: &Self) -> Self {
        a.wrapping_add(*b)
    }

    fn subtract_values(a: &Self, b: &Self) -> Self {
        a.wrapping_sub(*b)
    }

    fn scale_value(a: &Self, factor: f64) -> Self {
        (f64::from(*a) * factor) as i32
    }

    fn zero_value(_like: &Self) -> Self {
        0
    }

    fn is_valid_value(_v: &Self) -> bool {
        true
    }

    fn interpolate_core(from: &Self, to: &Self, progress: f64, _: bool) -> Self {
        math::lerp_rounded(f64::from(*from), f64::from(*to), progress) as i32
    }

    fn segment_length(from: &Self, to: &Self) -> f64 {
        f64::from(from.abs_diff(*to))
    }
}

impl Animatable for i64 {
    fn add_values(a: &Self, b: &Self) -> Self {
        a.wrapping_add(*b)
    }

    fn subtract_values(a: &Self, b: &Self) -> Self {
        a.wrapping_sub(*b)
    }

    fn scale_value(a: &Self, factor: f64) -> Self {
        (*a as f64 * factor) as i64
    }

    fn zero_value(_like: &Self) -> Self {
        0
    }

    fn is_valid_value(_v: &Self) -> bool {
        true
    }

    fn interpolate_core(from: &Self, to: &Self, progress: f64, _: bool) -> Self {
        // Offset from `from` so large magnitudes keep their low bits. The span of two i64
        // values needs 65 bits.
        let from = i128::from(*from);
        let span = (i128::from(*to) - from) as f64 * progress;
        let v = from + span.round() as i128;
        v.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
    }

    fn segment_length(from: &Self, to: &Self) -> f64 {
        from.abs_diff(*to) as f64
    }
}

impl Animatable for Decimal {
    fn add_values(a: &Self, b: &Self) -> Self {
        a.saturating_add(*b)
    }

    fn subtract_values(a: &Self, b: &Self) -> Self {
        a.saturating_sub(*b)
    }

    fn scale_value(a: &Self, factor: f64) -> Self {
        a.saturating_mul(Decimal::from_f64(factor).unwrap_or_default())
    }

    fn zero_value(_like: &Self) -> Self {
        Decimal::ZERO
    }

    fn is_valid_value(_v: &Self) -> bool {
        true
    }

    fn interpolate_core(from: &Self, to: &Self, progress: f64, _: bool) -> Self {
        let delta = to.saturating_sub(*from);
        from.saturating_add(delta.saturating_mul(Decimal::from_f64(progress).unwrap_or_default()))
    }

    fn segment_length(from: &Self, to: &Self) -> f64 {
        to.saturating_sub(*from).abs().to_f64().unwrap_or(0.0)
    }
}

impl Animatable for Color {
    fn add_values(a: &Self, b: &Self) -> Self {
        Color::from_sc_rgb(a.a + b.a, a.r + b.r, a.g + b.g, a.b + b.b)
    }

    fn subtract_values(a: &Self, b: &Self) -> Self {
        Color::from_sc_rgb(a.a - b.a, a.r - b.r, a.g - b.g, a.b - b.b)
    }

    fn scale_value(a: &Self, factor: f64) -> Self {
        let f = factor as f32;
        Color::from_sc_rgb(a.a * f, a.r * f, a.g * f, a.b * f)
    }

    fn zero_value(_like: &Self) -> Self {
        Color::TRANSPARENT
    }

    fn is_valid_value(v: &Self) -> bool {
        v.is_finite()
    }

    fn interpolate_core(from: &Self, to: &Self, progress: f64, _: bool) -> Self {
        let p = progress as f32;
        Color::from_sc_rgb(
            from.a + (to.a - from.a) * p,
            from.r + (to.r - from.r) * p,
            from.g + (to.g - from.g) * p,
            from.b + (to.b - from.b) * p,
        )
    }

    fn segment_length(from: &Self, to: &Self) -> f64 {
        let d = Self::subtract_values(to, from);
        f64::from(d.a * d.a + d.r * d.r + d.g * d.g + d.b * d.b).sqrt()
    }
}

impl Animatable for Point {
    fn add_values(a: &Self, b: &Self) -> Self {
        Point::new(a.x + b.x, a.y + b.y)
    }

    fn subtract_values(a: &Self, b: &Self) -> Self {
        Point::new(a.x - b.x, a.y - b.y)
    }

    fn scale_value(a: &Self, factor: f64) -> Self {
        Point::new(a.x * factor, a.y * factor)
    }

    fn zero_value(_like: &Self) -> Self {
        Point::ZERO
    }

    fn is_valid_value(v: &Self) -> bool {
        v.is_finite()
    }

    fn interpolate_core(from: &Self, to: &Self, progress: f64, _: bool) -> Self {
        from.lerp(*to, progress)
    }

    fn segment_length(from: &Self, to: &Self) -> f64 {
        from.distance(*to)
    }
}

impl Animatable for Vec2 {
    fn add_values(a: &Self, b: &Self) -> Self {
        *a + *b
    }

    fn subtract_values(a: &Self, b: &Self) -> Self {
        *a - *b
    }

    fn scale_value(a: &Self, factor: f64) -> Self {
        *a * factor
    }

    fn zero_value(_like: &Self) -> Self {
        Vec2::ZERO
    }

    fn is_valid_value(v: &Self) -> bool {
        v.is_finite()
    }

    fn interpolate_core(from: &Self, to: &Self, progress: f64, _: bool) -> Self {
        from.lerp(*to, progress)
    }

    fn segment_length(from: &Self, to: &Self) -> f64 {
        (*to - *from).hypot()
    }
}

impl Animatable for Size {
    fn add_values(a: &Self, b: &Self) -> Self {
        Size::new(a.width + b.width, a.height + b.height)
    }

    fn subtract_values(a: &Self, b: &Self) -> Self {
        Size::new(a.width - b.width, a.height - b.height)
    }

    fn scale_value(a: &Self, factor: f64) -> Self {
        Size::new(a.width * factor, a.height * factor)
    }

    fn zero_value(_like: &Self) -> Self {
        Size::ZERO
    }

    fn is_valid_value(v: &Self) -> bool {
        v.is_finite()
    }

    fn interpolate_core(from: &Self, to: &Self, progress: f64, _: bool) -> Self {
        Size::new(
            math::lerp_f64(from.width, to.width, progress),
            math::lerp_f64(from.height, to.height, progress),
        )
    }

    fn segment_length(from: &Self, to: &Self) -> f64 {
        (to.width - from.width).hypot(to.height - from.height)
    }
}

// Rects animate as (origin, size) pairs.
impl Animatable for Rect {
    fn add_values(a: &Self, b: &Self) -> Self {
        Rect::from_origin_size(
            Point::add_values(&a.origin(), &b.origin()),
            Size::add_values(&a.size(), &b.size()),
        )
    }

    fn subtract_values(a: &Self, b: &Self) -> Self {
        Rect::from_origin_size(
            Point::subtract_values(&a.origin(), &b.origin()),
            Size::subtract_values(&a.size(), &b.size()),
        )
    }

    fn scale_value(a: &Self, factor: f64) -> Self {
        Rect::from_origin_size(
            Point::scale_value(&a.origin(), factor),
            Size::scale_value(&a.size(), factor),
        )
    }

    fn zero_value(_like: &Self) -> Self {
        Rect::ZERO
    }

    fn is_valid_value(v: &Self) -> bool {
        v.is_finite()
    }

    fn interpolate_core(from: &Self, to: &Self, progress: f64, _: bool) -> Self {
        Rect::from_origin_size(
            from.origin().lerp(to.origin(), progress),
            Size::interpolate_core(&from.size(), &to.size(), progress, true),
        )
    }

    fn segment_length(from: &Self, to: &Self) -> f64 {
        let dx = to.x0 - from.x0;
        let dy = to.y0 - from.y0;
        let dw = to.width() - from.width();
        let dh = to.height() - from.height();
        (dx * dx + dy * dy + dw * dw + dh * dh).sqrt()
    }
}

// Shared by 3D points and 3D vectors.
impl Animatable for DVec3 {
    fn add_values(a: &Self, b: &Self) -> Self {
        *a + *b
    }

    fn subtract_values(a: &Self, b: &Self) -> Self {
        *a - *b
    }

    fn scale_value(a: &Self, factor: f64) -> Self {
        *a * factor
    }

    fn zero_value(_like: &Self) -> Self {
        DVec3::ZERO
    }

    fn is_valid_value(v: &Self) -> bool {
        v.is_finite()
    }

    fn interpolate_core(from: &Self, to: &Self, progress: f64, _: bool) -> Self {
        from.lerp(*to, progress)
    }

    fn segment_length(from: &Self, to: &Self) -> f64 {
        from.distance(*to)
    }
}

impl Animatable for Quaternion {
    fn add_values(a: &Self, b: &Self) -> Self {
        *a * *b
    }

    fn subtract_values(a: &Self, b: &Self) -> Self {
        *a * math::quat_inverse(*b)
    }

    fn scale_value(a: &Self, factor: f64) -> Self {
        math::quat_from_axis_angle(math::quat_axis(*a), math::quat_angle(*a) * factor)
    }

    fn zero_value(_like: &Self) -> Self {
        Quaternion::IDENTITY
    }

    fn is_valid_value(v: &Self) -> bool {
        v.is_finite()
    }

    fn interpolate_core(from: &Self, to: &Self, progress: f64, use_shortest_path: bool) -> Self {
        math::quat_slerp(*from, *to, progress, use_shortest_path)
    }

    fn segment_length(from: &Self, to: &Self) -> f64 {
        math::quat_angle(Self::subtract_values(to, from))
    }
}

impl Animatable for Rotation3D {
    fn add_values(a: &Self, b: &Self) -> Self {
        Rotation3D::Quaternion(Quaternion::add_values(&a.to_quaternion(), &b.to_quaternion()))
    }

    fn subtract_values(a: &Self, b: &Self) -> Self {
        Rotation3D::Quaternion(Quaternion::subtract_values(
            &a.to_quaternion(),
            &b.to_quaternion(),
        ))
    }

    fn scale_value(a: &Self, factor: f64) -> Self {
        Rotation3D::Quaternion(Quaternion::scale_value(&a.to_quaternion(), factor))
    }

    fn zero_value(_like: &Self) -> Self {
        Rotation3D::identity()
    }

    fn is_valid_value(v: &Self) -> bool {
        v.is_finite()
    }

    fn interpolate_core(from: &Self, to: &Self, progress: f64, use_shortest_path: bool) -> Self {
        Rotation3D::Quaternion(math::quat_slerp(
            from.to_quaternion(),
            to.to_quaternion(),
            progress,
            use_shortest_path,
        ))
    }

    fn segment_length(from: &Self, to: &Self) -> f64 {
        Quaternion::segment_length(&from.to_quaternion(), &to.to_quaternion())
    }
}

// Discrete-only types: no arithmetic, interpolation snaps halfway through.

impl Animatable for bool {
    fn add_values(_a: &Self, b: &Self) -> Self {
        *b
    }

    fn subtract_values(a: &Self, _b: &Self) -> Self {
        *a
    }

    fn scale_value(a: &Self, _factor: f64) -> Self {
        *a
    }

    fn zero_value(_like: &Self) -> Self {
        false
    }

    fn is_valid_value(_v: &Self) -> bool {
        true
    }

    fn interpolate_core(from: &Self, to: &Self, progress: f64, _: bool) -> Self {
        step(from, to, progress)
    }
}

impl Animatable for char {
    fn add_values(_a: &Self, b: &Self) -> Self {
        *b
    }

    fn subtract_values(a: &Self, _b: &Self) -> Self {
        *a
    }

    fn scale_value(a: &Self, _factor: f64) -> Self {
        *a
    }

    fn zero_value(_like: &Self) -> Self {
        '\0'
    }

    fn is_valid_value(_v: &Self) -> bool {
        true
    }

    fn interpolate_core(from: &Self, to: &Self, progress: f64, _: bool) -> Self {
        step(from, to, progress)
    }
}

impl Animatable for String {
    fn add_values(_a: &Self, b: &Self) -> Self {
        b.clone()
    }

    fn subtract_values(a: &Self, _b: &Self) -> Self {
        a.clone()
    }

    fn scale_value(a: &Self, _factor: f64) -> Self {
        a.clone()
    }

    fn zero_value(_like: &Self) -> Self {
        String::new()
    }

    fn is_valid_value(_v: &Self) -> bool {
        true
    }

    fn interpolate_core(from: &Self, to: &Self, progress: f64, _: bool) -> Self {
        step(from, to, progress)
    }
}

impl Animatable for Affine {
    fn add_values(_a: &Self, b: &Self) -> Self {
        *b
    }

    fn subtract_values(a: &Self, _b: &Self) -> Self {
        *a
    }

    fn scale_value(a: &Self, _factor: f64) -> Self {
        *a
    }

    fn zero_value(_like: &Self) -> Self {
        Affine::IDENTITY
    }

    fn is_valid_value(v: &Self) -> bool {
        v.is_finite()
    }

    fn interpolate_core(from: &Self, to: &Self, progress: f64, _: bool) -> Self {
        step(from, to, progress)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/animatable.rs"]
mod tests;
