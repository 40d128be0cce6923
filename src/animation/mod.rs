pub(crate) mod anim;
pub(crate) mod animatable;
pub(crate) mod clock;
pub(crate) mod collection;
pub(crate) mod ease;
pub(crate) mod from_to_by;
pub(crate) mod key_frame;
pub(crate) mod key_frames;
pub(crate) mod key_time;
pub(crate) mod options;
pub(crate) mod remap;
pub(crate) mod spline;
