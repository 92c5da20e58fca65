use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        AnimatorError::not_found("x")
            .to_string()
            .contains("not found:")
    );
    assert!(
        AnimatorError::invalid_state("x")
            .to_string()
            .contains("invalid state:")
    );
    assert!(
        AnimatorError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        AnimatorError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = AnimatorError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: AnimatorError = serde_json::from_str::<u32>("not json").unwrap_err().into();
    assert!(matches!(err, AnimatorError::Serde(_)));
}
