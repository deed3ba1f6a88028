use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CuecastError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        CuecastError::measurement("x")
            .to_string()
            .contains("measurement error:")
    );
    assert!(
        CuecastError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(
        CuecastError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CuecastError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: CuecastError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, CuecastError::Serde(_)));
}
