use crate::Identity;

#[test]
fn given_both_fields_when_new_then_ok() {
    let identity = Identity::new("user123", "LegacyUser").unwrap();

    assert_eq!(identity.id(), "user123");
    assert_eq!(identity.display_name(), "LegacyUser");
}

#[test]
fn given_empty_id_when_new_then_invalid_identity() {
    let err = Identity::new("", "LegacyUser").unwrap_err();

    assert!(!err.is_persistence());
    assert!(err.to_string().contains("id cannot be empty"));
}

#[test]
fn given_blank_display_name_when_new_then_invalid_identity() {
    let err = Identity::new("user123", "   ").unwrap_err();

    assert!(!err.is_persistence());
    assert!(err.to_string().contains("display name"));
}

#[test]
fn given_one_missing_field_when_from_fields_then_none() {
    assert!(Identity::from_fields(Some("user123".into()), None).is_none());
    assert!(Identity::from_fields(None, Some("LegacyUser".into())).is_none());
    assert!(Identity::from_fields(Some(String::new()), Some("LegacyUser".into())).is_none());
}

#[test]
fn given_identity_when_serialize_then_exposes_both_fields() {
    let identity = Identity::new("user123", "LegacyUser").unwrap();

    let json = serde_json::to_value(&identity).unwrap();

    assert_eq!(json["id"], "user123");
    assert_eq!(json["display_name"], "LegacyUser");
}
