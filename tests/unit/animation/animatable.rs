use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn endpoints_are_returned_verbatim() {
    let from = Rotation3D::axis_angle(DVec3::X, 30.0);
    let to = Rotation3D::axis_angle(DVec3::Y, 120.0);
    assert_eq!(Rotation3D::interpolate(&from, &to, 0.0), from);
    assert_eq!(Rotation3D::interpolate(&from, &to, 1.0), to);
    assert!(matches!(
        Rotation3D::interpolate(&from, &to, 0.5),
        Rotation3D::Quaternion(_)
    ));

    let q = Quaternion::from_xyzw(0.0, 0.0, 0.3, 2.0);
    assert_eq!(Quaternion::interpolate(&q, &Quaternion::IDENTITY, 0.0), q);

    let a = 0.1_f64;
    let b = 0.7_f64;
    assert_eq!(f64::interpolate(&a, &b, 1.0), b);
}

#[test]
fn integers_round_to_nearest() {
    assert_eq!(i32::interpolate(&0, &10, 0.25), 3);
    assert_eq!(i32::interpolate(&0, &10, 0.24), 2);
    assert_eq!(i16::interpolate(&-10, &10, 0.5), 0);
    assert_eq!(u8::interpolate(&0, &255, 0.5), 128);
}

#[test]
fn integer_arithmetic_wraps() {
    assert_eq!(u8::add_values(&250, &10), 4);
    assert_eq!(u8::subtract_values(&3, &5), 254);
    assert_eq!(i16::add_values(&i16::MAX, &1), i16::MIN);
}

#[test]
fn wide_integers_keep_precision() {
    let from = i64::MAX - 10;
    assert_eq!(i64::interpolate(&from, &i64::MAX, 0.5), i64::MAX - 5);
}

#[test]
fn opposite_sign_wide_integers_meet_in_the_middle() {
    let (lo, hi) = (-6_000_000_000_000_000_000_i64, 6_000_000_000_000_000_000_i64);
    assert_eq!(i64::interpolate(&lo, &hi, 0.5), 0);
    assert_eq!(i64::interpolate(&hi, &lo, 0.25), 3_000_000_000_000_000_000);
    assert_eq!(i64::interpolate(&i64::MIN, &i64::MAX, 0.5), 0);
}

#[test]
fn integer_scaling_truncates_and_saturates() {
    assert_eq!(i32::scale_value(&7, 0.5), 3);
    assert_eq!(i32::scale_value(&-7, 0.5), -3);
    assert_eq!(i32::scale_value(&i32::MAX, 2.0), i32::MAX);
    assert_eq!(u8::scale_value(&200, -1.0), 0);
}

#[test]
fn decimal_interpolates_exactly() {
    let from = Decimal::new(10, 1);
    let to = Decimal::new(20, 1);
    assert_eq!(Decimal::interpolate(&from, &to, 0.5), Decimal::new(15, 1));
    assert_eq!(Decimal::scale_value(&to, 3.0), Decimal::new(6, 0));
    assert!(close(Decimal::segment_length(&from, &to), 1.0));
}

#[test]
fn discrete_types_snap_halfway() {
    assert!(!bool::interpolate(&false, &true, 0.49));
    assert!(bool::interpolate(&false, &true, 0.5));
    assert_eq!(char::interpolate(&'a', &'z', 0.3), 'a');
    let a = "left".to_string();
    let b = "right".to_string();
    assert_eq!(String::interpolate(&a, &b, 0.5), b);
    assert_eq!(String::interpolate(&a, &b, 0.1), a);

    let m = Affine::scale(2.0);
    assert_eq!(Affine::interpolate(&Affine::IDENTITY, &m, 0.75), m);
    assert_eq!(bool::segment_length(&false, &true), 0.0);
}

#[test]
fn rect_interpolates_origin_and_size() {
    let from = Rect::new(0.0, 0.0, 10.0, 10.0);
    let to = Rect::new(10.0, 20.0, 30.0, 40.0);
    let mid = Rect::interpolate(&from, &to, 0.5);
    assert_eq!(mid, Rect::new(5.0, 10.0, 20.0, 25.0));
    assert_eq!(Rect::add_values(&from, &Rect::zero_value(&from)), from);
}

#[test]
fn colors_interpolate_per_channel() {
    let white = Color::from_sc_rgb(1.0, 1.0, 1.0, 1.0);
    let mid = Color::interpolate(&Color::TRANSPARENT, &white, 0.5);
    assert_eq!(mid, Color::from_sc_rgb(0.5, 0.5, 0.5, 0.5));

    // Sums may leave [0, 1]; only byte conversion clamps.
    let sum = Color::add_values(&white, &white);
    assert_eq!(sum.r, 2.0);
    assert_eq!(sum.to_rgba8(), [255, 255, 255, 255]);
}

#[test]
fn quaternion_composition() {
    let q = math::quat_from_axis_angle(DVec3::Z, 90.0);
    let zero = Quaternion::zero_value(&q);
    assert_eq!(zero, Quaternion::IDENTITY);
    assert_eq!(Quaternion::add_values(&q, &zero), q);

    let back = Quaternion::subtract_values(&Quaternion::add_values(&q, &q), &q);
    assert!((back - q).length() < 1e-12);

    let half = Quaternion::scale_value(&q, 0.5);
    assert!(close(math::quat_angle(half), 45.0));
    assert!(close(Quaternion::segment_length(&Quaternion::IDENTITY, &q), 90.0));
}

#[test]
fn validity_rejects_non_finite_components() {
    assert!(!f64::is_valid_value(&f64::NAN));
    assert!(!f32::is_valid_value(&f32::INFINITY));
    assert!(!Point::is_valid_value(&Point::new(0.0, f64::NAN)));
    assert!(!Color::is_valid_value(&Color::from_sc_rgb(f32::NAN, 0.0, 0.0, 0.0)));
    assert!(!Rotation3D::is_valid_value(&Rotation3D::axis_angle(DVec3::X, f64::NAN)));
    assert!(Point::is_valid_value(&Point::new(1.0, 2.0)));
    assert!(u8::is_valid_value(&0));
}

#[test]
fn segment_lengths_measure_distance() {
    assert!(close(Point::segment_length(&Point::ZERO, &Point::new(3.0, 4.0)), 5.0));
    assert!(close(Vec2::segment_length(&Vec2::ZERO, &Vec2::new(3.0, 4.0)), 5.0));
    assert!(close(i32::segment_length(&-3, &4), 7.0));
    assert!(close(
        DVec3::segment_length(&DVec3::ZERO, &DVec3::new(2.0, 3.0, 6.0)),
        7.0
    ));
}
