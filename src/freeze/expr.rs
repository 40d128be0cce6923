use std::{fmt, sync::Arc};

/// Live value source: re-evaluated every time the owning object reads the value.
///
/// A binding keeps its owner from freezing until it is replaced by a local value
/// (see [`crate::Freezable::clone_current_value`]).
pub struct Binding<T> {
    name: String,
    source: Arc<dyn Fn() -> T + Send + Sync>,
}

impl<T> Binding<T> {
    /// Bind to `source`; `name` is only used for diagnostics.
    pub fn new(name: impl Into<String>, source: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self {
            name: name.into(),
            source: Arc::new(source),
        }
    }

    /// Diagnostic name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluate the source now.
    pub fn resolve(&self) -> T {
        (self.source)()
    }
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            source: Arc::clone(&self.source),
        }
    }
}

impl<T> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding").field("name", &self.name).finish()
    }
}

impl<T> PartialEq for Binding<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.source, &other.source)
    }
}

/// A property value: either a plain local value or an unresolved expression.
#[derive(Clone, Debug, PartialEq)]
pub enum ValueExpr<T> {
    /// Plain value.
    Local(T),
    /// Expression resolved on read.
    Bound(Binding<T>),
}

impl<T: Clone> ValueExpr<T> {
    /// Current value; resolves bindings.
    pub fn current(&self) -> T {
        match self {
            Self::Local(v) => v.clone(),
            Self::Bound(b) => b.resolve(),
        }
    }

    /// Local copy holding the current value.
    pub fn to_local(&self) -> Self {
        Self::Local(self.current())
    }
}

impl<T> ValueExpr<T> {
    /// True for [`ValueExpr::Bound`].
    pub fn is_bound(&self) -> bool {
        matches!(self, Self::Bound(_))
    }
}

impl<T> From<T> for ValueExpr<T> {
    fn from(v: T) -> Self {
        Self::Local(v)
    }
}

impl<T> From<Binding<T>> for ValueExpr<T> {
    fn from(b: Binding<T>) -> Self {
        Self::Bound(b)
    }
}

// On the wire a value expression is just its current value.
impl<T> serde::Serialize for ValueExpr<T>
where
    T: serde::Serialize + Clone,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Local(v) => v.serialize(serializer),
            Self::Bound(b) => b.resolve().serialize(serializer),
        }
    }
}

impl<'de, T> serde::Deserialize<'de> for ValueExpr<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Self::Local)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/freeze/expr.rs"]
mod tests;
