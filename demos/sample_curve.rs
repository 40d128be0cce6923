use keyanim::{
    Clock, Ease, EasingKind, EasingMode, Freezable, Frozen, KeyFrame, KeyFrameAnimation,
    KeySpline, KeyTime, Point,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let anim = KeyFrameAnimation::from_iter([
        KeyFrame::linear(Point::new(0.0, 0.0), KeyTime::percent(0.0)?),
        KeyFrame::spline(
            Point::new(100.0, 0.0),
            KeyTime::Paced,
            KeySpline::new(Point::new(0.25, 0.1), Point::new(0.25, 1.0))?,
        ),
        KeyFrame::easing(
            Point::new(100.0, 50.0),
            KeyTime::Paced,
            Ease::function(
                EasingKind::Bounce {
                    bounces: 3,
                    bounciness: 2.0,
                },
                EasingMode::EaseOut,
            ),
        ),
        KeyFrame::discrete(Point::new(0.0, 50.0), KeyTime::percent(1.0)?),
    ])
    .with_duration(3.0);

    let anim = Frozen::new(anim)?;
    assert!(anim.is_frozen());

    for entry in &anim.resolved_key_times().entries {
        println!("key frame {} at {:.3}s", entry.index, entry.time);
    }

    let origin = Point::ZERO;
    for i in 0..=12 {
        let progress = f64::from(i) / 12.0;
        let p = anim.evaluate(&origin, &origin, &Clock::active(progress)?)?;
        println!("{progress:.3}: ({:.2}, {:.2})", p.x, p.y);
    }

    Ok(())
}
