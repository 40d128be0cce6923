use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, OnceLock, PoisonError},
};

use crate::{
    animation::key_frame::KeyFrame,
    foundation::error::{AnimError, AnimResult},
    freeze::state::{FreezeState, Freezable, Frozen, ensure_mutable},
};

/// Structural change reported to collection observers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectionChange {
    Added { index: usize },
    Removed { index: usize },
    Replaced { index: usize },
    ItemChanged { index: usize },
    Cleared,
}

/// Handle returned by [`KeyFrameCollection::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer = Box<dyn Fn(&CollectionChange) + Send + Sync>;

/// Ordered, exclusively owned keyframes of one value type.
///
/// Observers are local to this instance: they are neither cloned nor kept past
/// [`Freezable::freeze`], since a frozen collection never changes again.
pub struct KeyFrameCollection<T> {
    frames: Vec<KeyFrame<T>>,
    state: FreezeState,
    version: u64,
    next_observer: u64,
    observers: Vec<(ObserverId, Observer)>,
}

impl<T> Default for KeyFrameCollection<T> {
    fn default() -> Self {
        Self {
            frames: Vec::new(),
            state: FreezeState::Mutable,
            version: 0,
            next_observer: 0,
            observers: Vec::new(),
        }
    }
}

impl<T> KeyFrameCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&KeyFrame<T>> {
        self.frames.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KeyFrame<T>> {
        self.frames.iter()
    }

    pub fn as_slice(&self) -> &[KeyFrame<T>] {
        &self.frames
    }

    /// Bumped on every successful mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Same as frozen: a frozen collection can neither grow nor shrink.
    pub fn is_fixed_size(&self) -> bool {
        self.state == FreezeState::Frozen
    }

    pub fn is_read_only(&self) -> bool {
        self.state == FreezeState::Frozen
    }

    /// Append a keyframe and return its index.
    pub fn add(&mut self, frame: KeyFrame<T>) -> AnimResult<usize> {
        self.check_mutation(&frame)?;
        self.frames.push(frame);
        let index = self.frames.len() - 1;
        self.changed(CollectionChange::Added { index });
        Ok(index)
    }

    pub fn insert(&mut self, index: usize, frame: KeyFrame<T>) -> AnimResult<()> {
        self.check_mutation(&frame)?;
        if index > self.frames.len() {
            return Err(AnimError::invalid_argument(format!(
                "insert index {index} out of range for {} key frames",
                self.frames.len()
            )));
        }
        self.frames.insert(index, frame);
        self.changed(CollectionChange::Added { index });
        Ok(())
    }

    /// Replace the keyframe at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, frame: KeyFrame<T>) -> AnimResult<KeyFrame<T>> {
        self.check_mutation(&frame)?;
        let slot = self.slot(index)?;
        let old = std::mem::replace(&mut self.frames[slot], frame);
        self.changed(CollectionChange::Replaced { index });
        Ok(old)
    }

    pub fn remove_at(&mut self, index: usize) -> AnimResult<KeyFrame<T>> {
        ensure_mutable(self.state, "key frame collection")?;
        let slot = self.slot(index)?;
        let old = self.frames.remove(slot);
        self.changed(CollectionChange::Removed { index });
        Ok(old)
    }

    pub fn clear(&mut self) -> AnimResult<()> {
        ensure_mutable(self.state, "key frame collection")?;
        self.frames.clear();
        self.changed(CollectionChange::Cleared);
        Ok(())
    }

    /// Register an observer for structural changes.
    pub fn subscribe(
        &mut self,
        observer: impl Fn(&CollectionChange) + Send + Sync + 'static,
    ) -> AnimResult<ObserverId> {
        ensure_mutable(self.state, "key frame collection")?;
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        Ok(id)
    }

    /// Returns false when `id` was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(other, _)| *other != id);
        self.observers.len() != before
    }

    fn check_mutation(&self, frame: &KeyFrame<T>) -> AnimResult<()> {
        ensure_mutable(self.state, "key frame collection")?;
        frame.key_time().validate()?;
        Ok(())
    }

    fn slot(&self, index: usize) -> AnimResult<usize> {
        if index < self.frames.len() {
            Ok(index)
        } else {
            Err(AnimError::invalid_argument(format!(
                "index {index} out of range for {} key frames",
                self.frames.len()
            )))
        }
    }

    fn changed(&mut self, change: CollectionChange) {
        self.version += 1;
        for (_, observer) in &self.observers {
            observer(&change);
        }
    }
}

impl<T: Clone> KeyFrameCollection<T> {
    /// Edit the keyframe at `index`. A frozen keyframe is refused even in a mutable collection;
    /// use [`set`](Self::set) to swap it out instead.
    ///
    /// `edit` works on a copy that replaces the original only when it returns `Ok`, so a failed
    /// edit leaves the collection untouched.
    pub fn update<R>(
        &mut self,
        index: usize,
        edit: impl FnOnce(&mut KeyFrame<T>) -> AnimResult<R>,
    ) -> AnimResult<R> {
        ensure_mutable(self.state, "key frame collection")?;
        let slot = self.slot(index)?;
        ensure_mutable(self.frames[slot].freeze_state(), "key frame")?;
        let mut draft = self.frames[slot].clone();
        let out = edit(&mut draft)?;
        draft.key_time().validate()?;
        self.frames[slot] = draft;
        self.changed(CollectionChange::ItemChanged { index });
        Ok(out)
    }
}

impl<T: PartialEq> KeyFrameCollection<T> {
    pub fn contains(&self, frame: &KeyFrame<T>) -> bool {
        self.frames.contains(frame)
    }

    pub fn index_of(&self, frame: &KeyFrame<T>) -> Option<usize> {
        self.frames.iter().position(|f| f == frame)
    }

    /// Remove the first keyframe equal to `frame`. Returns whether one was found.
    pub fn remove(&mut self, frame: &KeyFrame<T>) -> AnimResult<bool> {
        ensure_mutable(self.state, "key frame collection")?;
        match self.index_of(frame) {
            Some(index) => {
                self.frames.remove(index);
                self.changed(CollectionChange::Removed { index });
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

type EmptyRegistry = Mutex<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>;

fn empty_registry() -> &'static EmptyRegistry {
    static REGISTRY: OnceLock<EmptyRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| Mutex::new(HashMap::new()))
}

impl<T: Clone + Send + Sync + 'static> KeyFrameCollection<T> {
    /// Shared frozen empty collection; every call for the same `T` returns the same instance.
    pub fn empty() -> Frozen<Self> {
        let mut registry = empty_registry()
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let entry = registry.entry(TypeId::of::<Self>()).or_insert_with(|| {
            let mut empty = Self::new();
            empty.freeze_owned();
            Arc::new(Frozen::assume_frozen(empty)) as Arc<dyn Any + Send + Sync>
        });
        match entry.downcast_ref::<Frozen<Self>>() {
            Some(frozen) => frozen.clone(),
            // Keys are the collection's own TypeId, so the entry always downcasts.
            None => {
                let mut empty = Self::new();
                empty.freeze_owned();
                Frozen::assume_frozen(empty)
            }
        }
    }
}

impl<T: Clone> Freezable for KeyFrameCollection<T> {
    fn freeze_state(&self) -> FreezeState {
        self.state
    }

    fn can_freeze(&self) -> bool {
        self.is_frozen() || self.frames.iter().all(Freezable::can_freeze)
    }

    fn freeze_owned(&mut self) {
        self.frames.iter_mut().for_each(Freezable::freeze_owned);
        self.observers.clear();
        self.state = FreezeState::Frozen;
    }

    fn clone_current_value(&self) -> Self {
        self.frames
            .iter()
            .map(Freezable::clone_current_value)
            .collect()
    }
}

impl<T: Clone> Clone for KeyFrameCollection<T> {
    fn clone(&self) -> Self {
        self.frames.iter().cloned().collect()
    }
}

impl<T> FromIterator<KeyFrame<T>> for KeyFrameCollection<T> {
    fn from_iter<I: IntoIterator<Item = KeyFrame<T>>>(iter: I) -> Self {
        Self {
            frames: iter.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl<'a, T> IntoIterator for &'a KeyFrameCollection<T> {
    type Item = &'a KeyFrame<T>;
    type IntoIter = std::slice::Iter<'a, KeyFrame<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for KeyFrameCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyFrameCollection")
            .field("frames", &self.frames)
            .field("state", &self.state)
            .field("version", &self.version)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<T: PartialEq> PartialEq for KeyFrameCollection<T> {
    fn eq(&self, other: &Self) -> bool {
        self.frames == other.frames
    }
}

impl<T> serde::Serialize for KeyFrameCollection<T>
where
    T: serde::Serialize + Clone,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.frames.serialize(serializer)
    }
}

impl<'de, T> serde::Deserialize<'de> for KeyFrameCollection<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Vec::<KeyFrame<T>>::deserialize(deserializer).map(|frames| frames.into_iter().collect())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/collection.rs"]
mod tests;
