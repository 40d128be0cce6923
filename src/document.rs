use std::path::Path;

use crate::{
    animation::{
        anim::Animation,
        animatable::Animatable,
        clock::{Clock, Timeline},
        options::EvalOptions,
    },
    foundation::{
        core::{Affine, Color, DVec3, Decimal, Point, Quaternion, Rect, Rotation3D, Size, Vec2},
        error::{AnimError, AnimResult},
    },
    freeze::state::Freezable,
};

/// One animated value: the animation plus the host-side inputs it is evaluated against.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(bound(
    serialize = "T: serde::Serialize + Clone",
    deserialize = "T: serde::Deserialize<'de>"
))]
pub struct Track<T> {
    pub animation: Animation<T>,
    /// Default origin (the property's base value).
    pub origin: T,
    /// Default destination.
    pub destination: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Timeline>,
    #[serde(default)]
    pub options: EvalOptions,
}

impl<T: Animatable> Track<T> {
    pub fn sample(&self, clock: &Clock) -> AnimResult<T> {
        self.animation
            .evaluate_with(&self.origin, &self.destination, clock, &self.options)
    }

    pub fn clock_at(&self, elapsed: f64) -> AnimResult<Clock> {
        match &self.timeline {
            Some(t) => t.clock_at(elapsed),
            None => Err(AnimError::validation("document has no timeline")),
        }
    }
}

/// Self-describing animation document, tagged by value type.
///
/// ```json
/// {
///   "type": "double",
///   "animation": { "kind": "from_to_by", "from": 0.0, "to": 10.0 },
///   "origin": 0.0,
///   "destination": 0.0,
///   "timeline": { "duration": 2.0 }
/// }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnimationDocument {
    Boolean(Track<bool>),
    Byte(Track<u8>),
    Int16(Track<i16>),
    Int32(Track<i32>),
    Int64(Track<i64>),
    Single(Track<f32>),
    Double(Track<f64>),
    Decimal(Track<Decimal>),
    Char(Track<char>),
    String(Track<String>),
    Point(Track<Point>),
    Vector(Track<Vec2>),
    Size(Track<Size>),
    Rect(Track<Rect>),
    Point3d(Track<DVec3>),
    Vector3d(Track<DVec3>),
    Quaternion(Track<Quaternion>),
    Rotation3d(Track<Rotation3D>),
    Color(Track<Color>),
    Matrix(Track<Affine>),
}

macro_rules! with_track {
    ($doc:expr, $track:ident => $body:expr) => {
        match $doc {
            AnimationDocument::Boolean($track) => $body,
            AnimationDocument::Byte($track) => $body,
            AnimationDocument::Int16($track) => $body,
            AnimationDocument::Int32($track) => $body,
            AnimationDocument::Int64($track) => $body,
            AnimationDocument::Single($track) => $body,
            AnimationDocument::Double($track) => $body,
            AnimationDocument::Decimal($track) => $body,
            AnimationDocument::Char($track) => $body,
            AnimationDocument::String($track) => $body,
            AnimationDocument::Point($track) => $body,
            AnimationDocument::Vector($track) => $body,
            AnimationDocument::Size($track) => $body,
            AnimationDocument::Rect($track) => $body,
            AnimationDocument::Point3d($track) => $body,
            AnimationDocument::Vector3d($track) => $body,
            AnimationDocument::Quaternion($track) => $body,
            AnimationDocument::Rotation3d($track) => $body,
            AnimationDocument::Color($track) => $body,
            AnimationDocument::Matrix($track) => $body,
        }
    };
}

impl AnimationDocument {
    pub fn from_json_str(s: &str) -> AnimResult<Self> {
        let doc: Self = serde_json::from_str(s)?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn from_path(path: &Path) -> AnimResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            AnimError::Other(anyhow::Error::new(e).context(format!(
                "read animation document '{}'",
                path.display()
            )))
        })?;
        Self::from_json_str(&s)
    }

    /// Value type name as it appears in the `type` tag.
    pub fn value_type(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "boolean",
            Self::Byte(_) => "byte",
            Self::Int16(_) => "int16",
            Self::Int32(_) => "int32",
            Self::Int64(_) => "int64",
            Self::Single(_) => "single",
            Self::Double(_) => "double",
            Self::Decimal(_) => "decimal",
            Self::Char(_) => "char",
            Self::String(_) => "string",
            Self::Point(_) => "point",
            Self::Vector(_) => "vector",
            Self::Size(_) => "size",
            Self::Rect(_) => "rect",
            Self::Point3d(_) => "point3d",
            Self::Vector3d(_) => "vector3d",
            Self::Quaternion(_) => "quaternion",
            Self::Rotation3d(_) => "rotation3d",
            Self::Color(_) => "color",
            Self::Matrix(_) => "matrix",
        }
    }

    pub fn validate(&self) -> AnimResult<()> {
        let timeline = with_track!(self, t => t.timeline.as_ref());
        if let Some(t) = timeline {
            t.validate()?;
        }
        Ok(())
    }

    pub fn has_timeline(&self) -> bool {
        with_track!(self, t => t.timeline.is_some())
    }

    /// Freeze the document's animation so repeated sampling reuses resolved key times.
    pub fn freeze(&mut self) -> AnimResult<()> {
        with_track!(self, t => t.animation.freeze())
    }

    /// Evaluate at `clock` and return the value as JSON.
    #[tracing::instrument(skip(self), fields(value_type = self.value_type()))]
    pub fn sample(&self, clock: &Clock) -> AnimResult<serde_json::Value> {
        with_track!(self, t => Ok(serde_json::to_value(t.sample(clock)?)?))
    }

    /// Clock for `elapsed` seconds on the document's timeline.
    pub fn clock_at(&self, elapsed: f64) -> AnimResult<Clock> {
        with_track!(self, t => t.clock_at(elapsed))
    }
}

#[cfg(test)]
#[path = "../tests/unit/document.rs"]
mod tests;
