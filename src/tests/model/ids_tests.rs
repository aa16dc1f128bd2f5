use super::*;

#[test]
fn category_is_prefix_before_first_colon() {
    assert_eq!(category_of("mktg:100"), "mktg");
    assert_eq!(category_of("prodA:123:extra"), "prodA");
}

#[test]
fn ids_without_colon_fall_into_default_category() {
    assert_eq!(category_of("100"), DEFAULT_CATEGORY);
    assert_eq!(category_of(""), DEFAULT_CATEGORY);
}

#[test]
fn category_and_rest_rebuild_the_original_id() {
    for id in ["mktg:100", "a:b:c", ":leading", "trailing:"] {
        let (category, rest) = split_prefix(id).expect("colon present");
        assert_eq!(category, category_of(id));
        assert_eq!(format!("{}:{}", category, rest), id);
    }
}

#[test]
fn instance_prefix_defaults_to_primary_instance() {
    assert_eq!(instance_prefix_of("local:7"), "local");
    assert_eq!(instance_prefix_of("42"), PRIMARY_INSTANCE_PREFIX);
}

#[test]
fn numeric_and_string_ids_decode_to_the_same_value() {
    let from_number: WorkflowId = serde_json::from_str("123").unwrap();
    let from_string: WorkflowId = serde_json::from_str("\"123\"").unwrap();
    assert_eq!(from_number, from_string);
    assert_eq!(from_number.as_str(), "123");
}

#[test]
fn null_id_decodes_to_empty_and_objects_are_rejected() {
    let empty: WorkflowId = serde_json::from_str("null").unwrap();
    assert_eq!(empty.as_str(), "");
    assert!(serde_json::from_str::<WorkflowId>("{\"id\":1}").is_err());
}
