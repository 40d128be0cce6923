use std::sync::{Arc, Mutex};

use super::*;
use crate::{animation::key_time::KeyTime, freeze::expr::Binding};

fn kf(v: f64, p: f64) -> KeyFrame<f64> {
    KeyFrame::linear(v, KeyTime::percent(p).unwrap())
}

fn sample() -> KeyFrameCollection<f64> {
    [kf(0.0, 0.0), kf(5.0, 0.5), kf(10.0, 1.0)].into_iter().collect()
}

#[test]
fn ordered_container_surface() {
    let mut c = KeyFrameCollection::new();
    assert!(c.is_empty());
    assert_eq!(c.add(kf(1.0, 0.0)).unwrap(), 0);
    assert_eq!(c.add(kf(3.0, 1.0)).unwrap(), 1);
    c.insert(1, kf(2.0, 0.5)).unwrap();
    assert_eq!(c.len(), 3);
    assert_eq!(c.get(1).map(KeyFrame::value), Some(2.0));

    let old = c.set(0, kf(0.5, 0.0)).unwrap();
    assert_eq!(old.value(), 1.0);
    assert!(c.contains(&kf(0.5, 0.0)));
    assert_eq!(c.index_of(&kf(3.0, 1.0)), Some(2));
    assert_eq!(c.index_of(&kf(9.0, 1.0)), None);

    assert!(c.remove(&kf(2.0, 0.5)).unwrap());
    assert!(!c.remove(&kf(2.0, 0.5)).unwrap());
    assert_eq!(c.remove_at(0).unwrap().value(), 0.5);
    assert_eq!(c.iter().map(KeyFrame::value).collect::<Vec<_>>(), vec![3.0]);

    c.clear().unwrap();
    assert!(c.is_empty());
}

#[test]
fn out_of_range_indices_are_invalid_arguments() {
    let mut c = sample();
    assert!(matches!(c.insert(4, kf(1.0, 0.0)), Err(AnimError::InvalidArgument(_))));
    assert!(matches!(c.set(3, kf(1.0, 0.0)), Err(AnimError::InvalidArgument(_))));
    assert!(matches!(c.remove_at(3), Err(AnimError::InvalidArgument(_))));
    assert_eq!(c, sample());
}

#[test]
fn invalid_key_time_is_rejected_without_mutation() {
    let mut c = sample();
    let bad = KeyFrame::linear(1.0, KeyTime::Seconds(-1.0));
    assert!(c.add(bad).is_err());
    assert_eq!(c.len(), 3);
    assert_eq!(c.version(), 0);
}

#[test]
fn frozen_collection_rejects_every_mutation() {
    let mut c = sample();
    c.freeze().unwrap();
    assert!(c.is_frozen() && c.is_fixed_size() && c.is_read_only());
    assert!(c.get(0).is_some_and(Freezable::is_frozen));

    assert!(matches!(c.add(kf(1.0, 0.0)), Err(AnimError::Frozen(_))));
    assert!(matches!(c.insert(0, kf(1.0, 0.0)), Err(AnimError::Frozen(_))));
    assert!(matches!(c.set(0, kf(1.0, 0.0)), Err(AnimError::Frozen(_))));
    assert!(matches!(c.remove_at(0), Err(AnimError::Frozen(_))));
    assert!(matches!(c.remove(&kf(0.0, 0.0)), Err(AnimError::Frozen(_))));
    assert!(matches!(c.clear(), Err(AnimError::Frozen(_))));
    assert!(matches!(c.update(0, |f| f.set_value(2.0)), Err(AnimError::Frozen(_))));
    assert!(c.subscribe(|_| {}).is_err());

    assert_eq!(c, sample());
    assert_eq!(c.version(), 0);
}

#[test]
fn freeze_is_all_or_nothing() {
    let mut c = sample();
    c.add(KeyFrame::linear(Binding::new("live", || 1.0), KeyTime::Uniform))
        .unwrap();
    assert!(matches!(c.freeze(), Err(AnimError::NotFreezable(_))));
    assert!(!c.is_frozen());
    assert!(c.iter().all(|f| !f.is_frozen()));

    let frozen = c.get_as_frozen().unwrap();
    assert!(frozen.iter().all(Freezable::is_frozen));
    assert_eq!(frozen.get(3).map(KeyFrame::value), Some(1.0));
}

#[test]
fn update_is_atomic() {
    let mut c = sample();
    let err = c.update(1, |f| {
        f.set_value(99.0)?;
        f.set_key_time(KeyTime::Percent(7.0))
    });
    assert!(err.is_err());
    assert_eq!(c.get(1).map(KeyFrame::value), Some(5.0));

    c.update(1, |f| f.set_value(6.0)).unwrap();
    assert_eq!(c.get(1).map(KeyFrame::value), Some(6.0));
}

#[test]
fn update_refuses_a_frozen_keyframe() {
    let mut c = sample();
    let mut pinned = kf(7.0, 0.25);
    pinned.freeze().unwrap();
    c.insert(1, pinned).unwrap();
    let version = c.version();

    assert!(matches!(c.update(1, |f| f.set_value(5.0)), Err(AnimError::Frozen(_))));
    assert_eq!(c.get(1).map(KeyFrame::value), Some(7.0));
    assert_eq!(c.version(), version);

    // Replacing the whole keyframe is still allowed.
    c.set(1, kf(5.0, 0.25)).unwrap();
    assert_eq!(c.get(1).map(KeyFrame::value), Some(5.0));
}

#[test]
fn observers_see_changes_until_unsubscribed() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let mut c = KeyFrameCollection::new();
    let id = c
        .subscribe(move |change| sink.lock().unwrap().push(*change))
        .unwrap();

    c.add(kf(1.0, 0.0)).unwrap();
    c.add(kf(2.0, 1.0)).unwrap();
    c.set(1, kf(3.0, 1.0)).unwrap();
    c.update(0, |f| f.set_value(0.5)).unwrap();
    c.remove_at(0).unwrap();
    c.clear().unwrap();
    assert_eq!(c.version(), 6);

    assert!(c.unsubscribe(id));
    assert!(!c.unsubscribe(id));
    c.add(kf(4.0, 1.0)).unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            CollectionChange::Added { index: 0 },
            CollectionChange::Added { index: 1 },
            CollectionChange::Replaced { index: 1 },
            CollectionChange::ItemChanged { index: 0 },
            CollectionChange::Removed { index: 0 },
            CollectionChange::Cleared,
        ]
    );
}

#[test]
fn clone_is_mutable_and_drops_observers() {
    let mut c = sample();
    c.subscribe(|_| {}).unwrap();
    c.freeze().unwrap();
    assert!(c.observers.is_empty());

    let mut copy = c.clone();
    assert!(!copy.is_frozen());
    assert!(copy.iter().all(|f| !f.is_frozen()));
    assert_eq!(copy, c);
    copy.add(kf(11.0, 1.0)).unwrap();
    assert_eq!(c.len(), 3);
}

#[test]
fn empty_is_a_shared_frozen_singleton() {
    let a = KeyFrameCollection::<f64>::empty();
    let b = KeyFrameCollection::<f64>::empty();
    assert!(Frozen::ptr_eq(&a, &b));
    assert!(a.is_frozen());
    assert_eq!(a.len(), 0);

    let other = KeyFrameCollection::<i32>::empty();
    assert!(other.is_empty());

    let mut thawed = a.to_mutable();
    thawed.add(kf(1.0, 1.0)).unwrap();
    assert!(KeyFrameCollection::<f64>::empty().is_empty());
}

#[test]
fn serializes_as_a_list() {
    let c = sample();
    let json = serde_json::to_string(&c).unwrap();
    assert!(json.starts_with('['));
    let back: KeyFrameCollection<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, c);
}
