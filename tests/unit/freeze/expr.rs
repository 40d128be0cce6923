use super::*;
use std::sync::atomic::{AtomicU64, Ordering};

#[test]
fn bound_values_resolve_on_every_read() {
    let counter = Arc::new(AtomicU64::new(1));
    let c = Arc::clone(&counter);
    let expr = ValueExpr::Bound(Binding::new("counter", move || {
        c.load(Ordering::SeqCst) as f64
    }));
    assert_eq!(expr.current(), 1.0);
    counter.store(5, Ordering::SeqCst);
    assert_eq!(expr.current(), 5.0);

    let local = expr.to_local();
    assert!(!local.is_bound());
    counter.store(9, Ordering::SeqCst);
    assert_eq!(local.current(), 5.0);
}

#[test]
fn cloned_bindings_stay_equal() {
    let b = Binding::new("one", || 1.0_f64);
    let expr = ValueExpr::<f64>::from(b.clone());
    assert_eq!(expr.clone(), expr);
    assert_ne!(expr, ValueExpr::<f64>::from(Binding::new("one", || 1.0_f64)));
    assert_eq!(b.name(), "one");
}

#[test]
fn serializes_current_value() {
    let expr = ValueExpr::Bound(Binding::new("two", || 2.0_f64));
    assert_eq!(serde_json::to_string(&expr).unwrap(), "2.0");
    let back: ValueExpr<f64> = serde_json::from_str("3.5").unwrap();
    assert_eq!(back, ValueExpr::Local(3.5));
}
