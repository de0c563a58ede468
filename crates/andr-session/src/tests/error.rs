use crate::SessionError;

use std::path::PathBuf;

#[test]
fn given_file_write_error_when_is_transient_then_returns_true() {
    let err = SessionError::file_write(
        PathBuf::from("/test"),
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
    );
    assert!(err.is_transient());
    assert!(err.is_persistence());
}

#[test]
fn given_atomic_rename_error_when_is_transient_then_returns_true() {
    let err = SessionError::atomic_rename(
        PathBuf::from("/from"),
        PathBuf::from("/to"),
        std::io::Error::other("test"),
    );
    assert!(err.is_transient());
}

#[test]
fn given_invalid_identity_when_classified_then_not_persistence_or_transient() {
    let err = SessionError::invalid_identity("id cannot be empty");
    assert!(!err.is_persistence());
    assert!(!err.is_transient());
}

#[test]
fn given_dir_creation_error_when_is_transient_then_returns_false() {
    let err = SessionError::dir_creation(PathBuf::from("/test"), std::io::Error::other("test"));
    assert!(!err.is_transient());
    assert!(err.is_persistence());
}

#[test]
fn given_any_error_when_recovery_hint_then_returns_non_empty_string() {
    let errors = vec![
        SessionError::invalid_identity("bad"),
        SessionError::backend("down"),
        SessionError::file_read(PathBuf::from("/test"), std::io::Error::other("test")),
        SessionError::backup_failed(PathBuf::from("/test"), std::io::Error::other("test")),
    ];

    for err in errors {
        let hint = err.recovery_hint();
        assert!(
            !hint.is_empty(),
            "recovery_hint should not be empty for {err:?}"
        );
    }
}

#[test]
fn given_serialization_error_when_from_serde_json_then_converts() {
    let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
    let session_err: SessionError = json_err.into();

    match session_err {
        SessionError::Serialization { .. } => {}
        other => panic!("Expected Serialization variant, got {other:?}"),
    }
}
