use crate::foundation::core::{Quaternion, Vector3D};

/// Cosines above this are treated as coincident rotations and lerped.
const SLERP_MAX_COSINE: f64 = 1.0 - 1e-6;
/// Cosines below this are treated as opposite rotations.
const SLERP_MIN_COSINE: f64 = 1e-10 - 1.0;

pub(crate) fn lerp_f64(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Interpolate two integers through f64 and round to nearest.
pub(crate) fn lerp_rounded(a: f64, b: f64, t: f64) -> f64 {
    lerp_f64(a, b, t).round()
}

pub(crate) fn quat_from_axis_angle(axis: Vector3D, angle_deg: f64) -> Quaternion {
    let len = axis.length();
    if len == 0.0 || !len.is_finite() {
        return Quaternion::IDENTITY;
    }
    let half = (angle_deg % 360.0).to_radians() * 0.5;
    let v = axis / len * half.sin();
    Quaternion::from_xyzw(v.x, v.y, v.z, half.cos())
}

/// Rotation axis; `+Y` when the rotation has no vector part.
pub(crate) fn quat_axis(q: Quaternion) -> Vector3D {
    let v = Vector3D::new(q.x, q.y, q.z);
    let len = v.length();
    if len == 0.0 {
        Vector3D::Y
    } else {
        v / len
    }
}

/// Rotation angle in degrees, in `[0, 360]`.
pub(crate) fn quat_angle(q: Quaternion) -> f64 {
    let sin = Vector3D::new(q.x, q.y, q.z).length();
    let cos = q.w;
    sin.atan2(cos) * (360.0 / std::f64::consts::PI)
}

/// Full inverse (conjugate over squared norm); works for non-unit quaternions.
pub(crate) fn quat_inverse(q: Quaternion) -> Quaternion {
    let n2 = q.length_squared();
    if n2 == 0.0 {
        return q;
    }
    let c = q.conjugate();
    Quaternion::from_xyzw(c.x / n2, c.y / n2, c.z / n2, c.w / n2)
}

/// Spherical interpolation that also interpolates magnitude.
///
/// With `use_shortest_path` the target is negated when the rotations are more than 180
/// degrees apart, so the arc never exceeds half a turn.
pub(crate) fn quat_slerp(
    from: Quaternion,
    to: Quaternion,
    t: f64,
    use_shortest_path: bool,
) -> Quaternion {
    let len_from = from.length();
    let len_to = to.length();
    if len_from == 0.0 || len_to == 0.0 {
        return Quaternion::from_xyzw(
            lerp_f64(from.x, to.x, t),
            lerp_f64(from.y, to.y, t),
            lerp_f64(from.z, to.z, t),
            lerp_f64(from.w, to.w, t),
        );
    }

    let from = from / len_from;
    let mut to = to / len_to;
    let mut cos_omega = from.dot(to);

    if use_shortest_path {
        if cos_omega < 0.0 {
            cos_omega = -cos_omega;
            to = -to;
        }
    } else if cos_omega < -1.0 {
        cos_omega = -1.0;
    }
    if cos_omega > 1.0 {
        cos_omega = 1.0;
    }

    let (scale_from, scale_to) = if cos_omega > SLERP_MAX_COSINE {
        (1.0 - t, t)
    } else if cos_omega < SLERP_MIN_COSINE {
        // Opposite rotations: go through a perpendicular quaternion.
        to = Quaternion::from_xyzw(-from.y, from.x, -from.w, from.z);
        let theta = t * std::f64::consts::PI;
        (theta.cos(), theta.sin())
    } else {
        let omega = cos_omega.acos();
        let sin_omega = (1.0 - cos_omega * cos_omega).sqrt();
        (
            ((1.0 - t) * omega).sin() / sin_omega,
            (t * omega).sin() / sin_omega,
        )
    };

    let len_out = len_from * (len_to / len_from).powf(t);
    let scale_from = scale_from * len_out;
    let scale_to = scale_to * len_out;
    Quaternion::from_xyzw(
        scale_from * from.x + scale_to * to.x,
        scale_from * from.y + scale_to * to.y,
        scale_from * from.z + scale_to * to.z,
        scale_from * from.w + scale_to * to.w,
    )
}
