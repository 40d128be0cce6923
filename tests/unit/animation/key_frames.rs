use super::*;
use crate::{
    animation::{
        key_time::KeyTime,
        options::{InvalidDefaultPolicy, LeadIn},
    },
    foundation::core::Point,
    freeze::expr::Binding,
};

fn pct(p: f64) -> KeyTime {
    KeyTime::percent(p).unwrap()
}

fn abc() -> KeyFrameAnimation<f64> {
    [
        KeyFrame::linear(0.0, pct(0.0)),
        KeyFrame::linear(10.0, pct(0.5)),
        KeyFrame::linear(30.0, pct(1.0)),
    ]
    .into_iter()
    .collect()
}

fn at(p: f64) -> Clock {
    Clock::active(p).unwrap()
}

#[test]
fn segment_lookup_reports_local_progress() {
    let anim = abc();
    let r = anim.resolved_key_times();
    assert_eq!(
        locate_segment(&r, 0.25),
        Some(Segment::Between {
            prev: 0,
            next: 1,
            local: 0.5
        })
    );
    assert_eq!(locate_segment(&r, 1.0), Some(Segment::At { index: 2 }));
    assert_eq!(locate_segment(&r, 0.5), Some(Segment::At { index: 1 }));
}

#[test]
fn evaluates_piecewise() {
    let anim = abc();
    assert_eq!(anim.evaluate(&-1.0, &-2.0, &at(0.0)).unwrap(), 0.0);
    assert_eq!(anim.evaluate(&-1.0, &-2.0, &at(0.25)).unwrap(), 5.0);
    assert_eq!(anim.evaluate(&-1.0, &-2.0, &at(0.75)).unwrap(), 20.0);
    assert_eq!(anim.evaluate(&-1.0, &-2.0, &at(1.0)).unwrap(), 30.0);
}

#[test]
fn lead_in_holds_base_or_interpolates() {
    let anim: KeyFrameAnimation<f64> = [
        KeyFrame::linear(10.0, pct(0.5)),
        KeyFrame::linear(20.0, pct(1.0)),
    ]
    .into_iter()
    .collect();

    assert_eq!(anim.evaluate(&4.0, &0.0, &at(0.25)).unwrap(), 4.0);

    let opts = EvalOptions {
        lead_in: LeadIn::Interpolate,
        ..EvalOptions::default()
    };
    assert_eq!(anim.evaluate_with(&4.0, &0.0, &at(0.25), &opts).unwrap(), 7.0);
}

#[test]
fn zero_length_segment_snaps_to_endpoint() {
    let anim: KeyFrameAnimation<f64> = [
        KeyFrame::linear(0.0, pct(0.0)),
        KeyFrame::linear(5.0, pct(0.5)),
        KeyFrame::linear(9.0, pct(0.5)),
        KeyFrame::linear(10.0, pct(1.0)),
    ]
    .into_iter()
    .collect();
    assert_eq!(anim.evaluate(&0.0, &0.0, &at(0.5)).unwrap(), 9.0);
    assert_eq!(anim.evaluate(&0.0, &0.0, &at(0.75)).unwrap(), 9.5);
}

#[test]
fn seconds_key_times_use_derived_duration() {
    let anim: KeyFrameAnimation<Point> = [
        KeyFrame::linear(Point::new(0.0, 0.0), KeyTime::Seconds(0.0)),
        KeyFrame::linear(Point::new(4.0, 8.0), KeyTime::Seconds(2.0)),
    ]
    .into_iter()
    .collect();
    let v = anim.evaluate(&Point::ZERO, &Point::ZERO, &at(0.25)).unwrap();
    assert_eq!(v, Point::new(1.0, 2.0));
}

#[test]
fn empty_and_stopped_return_destination() {
    let empty = KeyFrameAnimation::<f64>::default();
    assert_eq!(empty.evaluate(&1.0, &2.0, &at(0.3)).unwrap(), 2.0);
    assert!(empty.key_frames().is_empty());
    assert_eq!(abc().evaluate(&1.0, &2.0, &Clock::stopped()).unwrap(), 2.0);
}

#[test]
fn cumulative_adds_last_value_per_repeat() {
    let anim = abc().cumulative(true);
    let clock = Clock::new(0.25, 3, ClockState::Active).unwrap();
    assert_eq!(anim.evaluate(&0.0, &0.0, &clock).unwrap(), 65.0);
}

#[test]
fn additive_starts_from_zero_and_adds_origin() {
    let anim: KeyFrameAnimation<f64> = [KeyFrame::linear(10.0, pct(1.0))]
        .into_iter()
        .collect::<KeyFrameAnimation<f64>>()
        .additive(true);
    let opts = EvalOptions {
        lead_in: LeadIn::Interpolate,
        ..EvalOptions::default()
    };
    assert_eq!(anim.evaluate_with(&100.0, &0.0, &at(0.5), &opts).unwrap(), 105.0);
    assert_eq!(anim.evaluate(&100.0, &0.0, &at(1.0)).unwrap(), 110.0);
}

#[test]
fn invalid_origin_fails_only_when_used() {
    let anim: KeyFrameAnimation<f64> = [KeyFrame::linear(10.0, pct(0.5))].into_iter().collect();
    assert_eq!(anim.evaluate(&f64::NAN, &0.0, &at(0.75)).unwrap(), 10.0);

    let err = anim.evaluate(&f64::NAN, &0.0, &at(0.25)).unwrap_err();
    assert!(matches!(err, AnimError::InvalidAnimationValue { .. }));
    assert!(!err.is_fatal());

    let fatal = EvalOptions {
        invalid_default: InvalidDefaultPolicy::Fatal,
        ..EvalOptions::default()
    };
    let err = anim
        .evaluate_with(&f64::NAN, &0.0, &at(0.25), &fatal)
        .unwrap_err();
    assert!(err.is_fatal());
}

#[test]
fn evaluation_is_deterministic() {
    let anim = abc();
    let a = anim.evaluate(&0.0, &0.0, &at(0.3)).unwrap();
    let b = anim.evaluate(&0.0, &0.0, &at(0.3)).unwrap();
    assert_eq!(a.to_bits(), b.to_bits());
}

#[test]
fn freeze_caches_resolution_and_blocks_edits() {
    let mut anim = abc();
    assert!(anim.resolved.is_none());
    anim.freeze().unwrap();
    assert!(anim.resolved.is_some());
    assert!(matches!(anim.resolved_key_times(), Cow::Borrowed(_)));
    assert!(anim.key_frames().is_frozen());

    assert!(matches!(anim.key_frames_mut(), Err(AnimError::Frozen(_))));
    assert!(anim.set_duration(Some(2.0)).is_err());
    assert!(anim.set_additive(true).is_err());
    assert!(anim.set_cumulative(true).is_err());
    assert_eq!(anim.evaluate(&0.0, &0.0, &at(0.25)).unwrap(), 5.0);

    let copy = anim.clone();
    assert!(!copy.is_frozen());
    assert!(copy.resolved.is_none());
    assert_eq!(copy, anim);
}

#[test]
fn bound_keyframe_values_are_read_live_and_baked_on_snapshot() {
    let mut anim = abc();
    anim.key_frames_mut()
        .unwrap()
        .set(2, KeyFrame::linear(Binding::new("end", || 50.0), pct(1.0)))
        .unwrap();
    assert_eq!(anim.evaluate(&0.0, &0.0, &at(1.0)).unwrap(), 50.0);
    assert!(anim.freeze().is_err());

    let frozen = anim.get_current_value_as_frozen().unwrap();
    assert!(frozen.is_frozen());
    assert_eq!(frozen.evaluate(&0.0, &0.0, &at(0.75)).unwrap(), 30.0);
}

#[test]
fn set_duration_validates() {
    let mut anim = abc();
    assert!(anim.set_duration(Some(-1.0)).is_err());
    anim.set_duration(Some(4.0)).unwrap();
    assert_eq!(anim.duration(), Some(4.0));
}

#[test]
fn setters_and_keyframe_edits_bump_version() {
    let mut a = abc();
    let start = a.version();

    a.set_cumulative(true).unwrap();
    assert_eq!(a.version(), start + 1);
    assert!(a.set_duration(Some(-1.0)).is_err());
    assert_eq!(a.version(), start + 1);

    let before_edit = a.version();
    a.key_frames_mut()
        .unwrap()
        .update(1, |f| f.set_value(20.0))
        .unwrap();
    let after_edit = a.version();
    assert!(after_edit > before_edit);

    // Swapping in a fresh collection must not look like going back in time.
    *a.key_frames_mut().unwrap() = KeyFrameCollection::new();
    assert!(a.version() > after_edit);

    let frozen_at = a.version();
    a.freeze().unwrap();
    assert!(a.set_additive(true).is_err());
    assert!(a.key_frames_mut().is_err());
    assert_eq!(a.version(), frozen_at);
}
