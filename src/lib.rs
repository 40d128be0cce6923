//! keyanim is a keyframe animation interpolation engine.
//!
//! Given a host-supplied base value (the default origin and destination) and a clock, an
//! animation produces the current value of a property. Two kinds of animation are provided:
//!
//! - [`KeyFrameAnimation`]: a piecewise curve through timed [`KeyFrame`]s, each reached with
//!   discrete, linear, spline or eased interpolation.
//! - [`FromToByAnimation`]: a direct animation whose endpoints come from optional From, To and
//!   By values, with additive and cumulative composition.
//!
//! # Evaluation pipeline
//!
//! 1. **Resolve**: key times become absolute times ([`resolve_key_times`]).
//! 2. **Locate**: the clock progress selects a segment and a local progress ([`locate_segment`]).
//! 3. **Remap**: local progress goes through an [`Ease`] or a [`KeySpline`].
//! 4. **Interpolate**: the value type's [`Animatable`] arithmetic produces the output.
//!
//! # Sharing
//!
//! Animations, keyframes and keyframe collections follow a freeze protocol ([`Freezable`]):
//! they are mutable until frozen and immutable afterwards. A [`Frozen`] handle can be cloned
//! and read from any number of threads.
#![forbid(unsafe_code)]

mod animation;
mod document;
mod foundation;
mod freeze;

pub use animation::anim::Animation;
pub use animation::animatable::Animatable;
pub use animation::clock::{Clock, ClockState, FillBehavior, RepeatBehavior, Timeline};
pub use animation::collection::{CollectionChange, KeyFrameCollection, ObserverId};
pub use animation::ease::{CustomEase, Ease, EasingFunction, EasingKind, EasingMode};
pub use animation::from_to_by::{AnimationFunctionKind, FromToByAnimation};
pub use animation::key_frame::{Interpolation, KeyFrame};
pub use animation::key_frames::{KeyFrameAnimation, Segment, locate_segment};
pub use animation::key_time::{
    KeyTime, ResolvedKeyTime, ResolvedKeyTimes, calculation_duration, resolve_key_times,
};
pub use animation::options::{EvalOptions, InvalidDefaultPolicy, LeadIn};
pub use animation::remap::ProgressRemap;
pub use animation::spline::KeySpline;
pub use document::{AnimationDocument, Track};
pub use foundation::core::{
    Affine, Color, DVec3, Decimal, Point, Point3D, Quaternion, Rect, Rotation3D, Size, Vec2,
    Vector3D,
};
pub use foundation::error::{AnimError, AnimResult};
pub use freeze::expr::{Binding, ValueExpr};
pub use freeze::state::{FreezeState, Freezable, Frozen};
