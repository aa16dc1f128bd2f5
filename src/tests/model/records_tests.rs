use super::*;

fn execution(status: Option<&str>, finished: Option<bool>) -> Execution {
    Execution {
        id: WorkflowId::new("env:1"),
        status: status.map(str::to_string),
        finished,
        ..Execution::default()
    }
}

#[test]
fn role_parses_and_prints_wire_names() {
    assert_eq!("superadmin".parse::<Role>().unwrap(), Role::Superadmin);
    assert_eq!(Role::User.to_string(), "user");
    assert!("admin".parse::<Role>().is_err());
}

#[test]
fn execution_accepts_camel_case_aliases() {
    let ex: Execution = serde_json::from_value(serde_json::json!({
        "executionId": 9,
        "workflowId": "mktg:100",
        "finished": false
    }))
    .unwrap();
    assert_eq!(ex.id.as_str(), "9");
    assert_eq!(ex.workflow_id, Some(WorkflowId::new("mktg:100")));
    assert!(ex.is_running());
}

#[test]
fn status_text_wins_over_finished_flag() {
    assert!(execution(Some("Success"), Some(false)).is_success());
    assert!(!execution(Some("waiting"), Some(true)).is_success());
    assert!(execution(None, Some(true)).is_success());
    assert!(execution(Some("cancelled"), None).is_failed());
}

#[test]
fn missing_finished_flag_is_not_running() {
    assert!(!execution(None, None).is_running());
    assert_eq!(execution(None, None).classify(), ExecutionStatus::Other);
    assert_eq!(execution(None, Some(false)).classify(), ExecutionStatus::Running);
    assert_eq!(execution(Some("error"), Some(true)).classify(), ExecutionStatus::Failed);
}

#[test]
fn display_status_falls_back_to_finished_flag() {
    assert_eq!(execution(Some("waiting"), None).display_status(), "waiting");
    assert_eq!(execution(None, Some(true)).display_status(), "Finished");
    assert_eq!(execution(None, None).display_status(), "Running");
}

#[test]
fn public_instance_name_falls_back_to_prefix() {
    let named = PublicInstance {
        prefix: "env".into(),
        name: Some("Primary".into()),
        base_url: None,
    };
    let bare = PublicInstance {
        prefix: "local".into(),
        name: None,
        base_url: None,
    };
    assert_eq!(named.display_name(), "Primary");
    assert_eq!(bare.display_name(), "local");
}

#[test]
fn execution_with_both_key_spellings_keeps_snake_case() {
    let ex: Execution = serde_json::from_str(
        r#"{"id":"p:1","executionId":"p:2","workflowId":"p:8","workflow_id":"p:9","status":"success","startedAt":"2024-05-01T10:00:00Z"}"#,
    )
    .unwrap();
    assert_eq!(ex.id.as_str(), "p:1");
    assert_eq!(ex.workflow_id, Some(WorkflowId::new("p:9")));
    assert_eq!(ex.started_at.as_deref(), Some("2024-05-01T10:00:00Z"));
    assert!(ex.is_success());
}

#[test]
fn blank_snake_case_id_falls_back_to_camel_case() {
    let ex: Execution =
        serde_json::from_str(r#"{"id":null,"executionId":7,"workflow_id":"","workflowId":3}"#)
            .unwrap();
    assert_eq!(ex.id.as_str(), "7");
    assert_eq!(ex.workflow_id, Some(WorkflowId::new("3")));
}

#[test]
fn workflow_with_both_id_spellings_decodes() {
    let wf: Workflow =
        serde_json::from_str(r#"{"id":"mktg:100","workflowId":"mktg:100","name":"Welcome Email"}"#)
            .unwrap();
    assert_eq!(wf.id, WorkflowId::new("mktg:100"));
    assert_eq!(wf.name(), "Welcome Email");

    let camel_only: Workflow = serde_json::from_str(r#"{"workflowId":42}"#).unwrap();
    assert_eq!(camel_only.id.as_str(), "42");
}
