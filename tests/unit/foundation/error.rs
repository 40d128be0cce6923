use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        AnimError::invalid_argument("x")
            .to_string()
            .contains("invalid argument:")
    );
    assert!(
        AnimError::frozen("x")
            .to_string()
            .contains("object is frozen:")
    );
    assert!(
        AnimError::not_freezable("x")
            .to_string()
            .contains("cannot freeze:")
    );
    assert!(
        AnimError::invalid_value("x", false)
            .to_string()
            .contains("invalid default animation value:")
    );
    assert!(
        AnimError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        AnimError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn only_fatal_invalid_values_are_fatal() {
    assert!(AnimError::invalid_value("origin", true).is_fatal());
    assert!(!AnimError::invalid_value("origin", false).is_fatal());
    assert!(!AnimError::frozen("x").is_fatal());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = AnimError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: AnimError = serde_json::from_str::<f64>("nope").unwrap_err().into();
    assert!(matches!(err, AnimError::Serde(_)));
}
