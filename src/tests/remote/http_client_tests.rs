use super::*;

#[test]
fn bare_arrays_pass_through() {
    let items = list_items(serde_json::json!([{"id": 1}, {"id": 2}]));
    assert_eq!(items.len(), 2);
}

#[test]
fn envelopes_prefer_items_then_data() {
    let items = list_items(serde_json::json!({"items": [1], "data": [1, 2]}));
    assert_eq!(items.len(), 1);
    let data = list_items(serde_json::json!({"data": [1, 2, 3]}));
    assert_eq!(data.len(), 3);
}

#[test]
fn error_objects_read_as_empty_lists() {
    assert!(list_items(serde_json::json!({"error": "boom"})).is_empty());
    assert!(list_items(serde_json::json!("nope")).is_empty());
}

#[test]
fn error_field_ignores_blank_and_non_string_values() {
    assert_eq!(
        error_field(&serde_json::json!({"error": "Invalid role"})).as_deref(),
        Some("Invalid role")
    );
    assert_eq!(error_field(&serde_json::json!({"error": "  "})), None);
    assert_eq!(error_field(&serde_json::json!({"error": 5})), None);
    assert_eq!(error_field(&serde_json::json!({"detail": "Forbidden"})), None);
}

#[test]
fn user_message_falls_back_to_default() {
    let with_field = ApiError::Rejected {
        status: 400,
        message: Some("User with this email already exists".into()),
    };
    let without = ApiError::Rejected {
        status: 500,
        message: None,
    };
    assert_eq!(
        with_field.user_message("Failed to create user"),
        "User with this email already exists"
    );
    assert_eq!(without.user_message("Failed to create user"), "Failed to create user");
    assert_eq!(without.to_string(), "request rejected with status 500");
}
