use super::*;

fn all_kinds() -> Vec<EasingKind> {
    vec![
        EasingKind::Back { amplitude: 1.0 },
        EasingKind::Bounce {
            bounces: 3,
            bounciness: 2.0,
        },
        EasingKind::Circle,
        EasingKind::Cubic,
        EasingKind::Elastic {
            oscillations: 3,
            springiness: 3.0,
        },
        EasingKind::Exponential { exponent: 2.0 },
        EasingKind::Power { power: 2.0 },
        EasingKind::Quadratic,
        EasingKind::Quartic,
        EasingKind::Quintic,
        EasingKind::Sine,
    ]
}

#[test]
fn endpoints_are_stable() {
    for kind in all_kinds() {
        for mode in [
            EasingMode::EaseIn,
            EasingMode::EaseOut,
            EasingMode::EaseInOut,
        ] {
            let f = EasingFunction::new(kind, mode);
            assert!(f.apply(0.0).abs() < 1e-3, "{kind:?} {mode:?} at 0");
            assert!((f.apply(1.0) - 1.0).abs() < 1e-3, "{kind:?} {mode:?} at 1");
        }
    }
}

#[test]
fn monotonic_spot_check() {
    for kind in [
        EasingKind::Circle,
        EasingKind::Cubic,
        EasingKind::Exponential { exponent: 2.0 },
        EasingKind::Power { power: 3.0 },
        EasingKind::Quadratic,
        EasingKind::Quartic,
        EasingKind::Quintic,
        EasingKind::Sine,
    ] {
        let f = EasingFunction::new(kind, EasingMode::EaseInOut);
        let a = f.apply(0.25);
        let b = f.apply(0.5);
        let c = f.apply(0.75);
        assert!(a < b, "{kind:?}");
        assert!(b < c, "{kind:?}");
    }
}

#[test]
fn ease_out_mirrors_ease_in() {
    let ease_in = EasingFunction::new(EasingKind::Quadratic, EasingMode::EaseIn);
    let ease_out = EasingFunction::new(EasingKind::Quadratic, EasingMode::EaseOut);
    assert!((ease_in.apply(0.5) - 0.25).abs() < 1e-12);
    assert!((ease_out.apply(0.5) - 0.75).abs() < 1e-12);
}

#[test]
fn in_out_is_symmetric_about_the_midpoint() {
    let f = EasingFunction::new(EasingKind::Cubic, EasingMode::EaseInOut);
    assert!((f.apply(0.5) - 0.5).abs() < 1e-12);
    assert!((f.apply(0.2) + f.apply(0.8) - 1.0).abs() < 1e-12);
}

#[test]
fn back_overshoots_below_zero_when_easing_in() {
    let f = EasingFunction::new(EasingKind::Back { amplitude: 1.0 }, EasingMode::EaseIn);
    assert!(f.apply(0.3) < 0.0);
}

#[test]
fn custom_ease_calls_closure() {
    let e = Ease::custom("half", |t| t * 0.5);
    assert_eq!(e.apply(0.5), 0.25);
    assert_eq!(e, e.clone());
    assert_ne!(e, Ease::custom("half", |t| t * 0.5));
}

#[test]
fn serde_uses_type_tag_and_defaults() {
    let e: Ease = serde_json::from_str(r#"{"type":"bounce"}"#).unwrap();
    assert_eq!(
        e,
        Ease::function(
            EasingKind::Bounce {
                bounces: 3,
                bounciness: 2.0
            },
            EasingMode::EaseOut
        )
    );

    let s = serde_json::to_string(&Ease::function(EasingKind::Sine, EasingMode::EaseIn)).unwrap();
    assert!(s.contains(r#""type":"sine""#));
    assert!(s.contains(r#""mode":"ease_in""#));
}

#[test]
fn custom_ease_refuses_to_serialize() {
    let e = Ease::custom("mine", |t| t);
    assert!(serde_json::to_string(&e).is_err());
}
