use super::*;

#[test]
fn instance_form_reads_named_fields_and_flags() {
    let form = instance_form("name=Staging url=https://n8n.example key=k1 id=stg inactive").unwrap();
    assert_eq!(form.name, "Staging");
    assert_eq!(form.base_url, "https://n8n.example");
    assert_eq!(form.api_key, "k1");
    assert_eq!(form.identifier, "stg");
    assert!(!form.active);
}

#[test]
fn instance_form_defaults_to_active() {
    let form = instance_form("name=a url=b key=c").unwrap();
    assert!(form.active);
    assert!(form.identifier.is_empty());
}

#[test]
fn instance_form_rejects_unknown_fields() {
    let err = instance_form("name=a colour=blue").unwrap_err();
    assert_eq!(err, "unknown field: colour");
    let err = instance_form("name=a now").unwrap_err();
    assert_eq!(err, "unexpected argument: now");
}

#[test]
fn missing_fields_surface_as_form_errors() {
    let form = instance_form("url=b key=c").unwrap();
    assert_eq!(
        form.validate().unwrap_err().to_string(),
        "Name is required"
    );
}

#[test]
fn listing_tabs() {
    assert!(UiMode::Workflows.is_listing());
    assert!(UiMode::Executions.is_listing());
    assert!(!UiMode::Access.is_listing());
}
