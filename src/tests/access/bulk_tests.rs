use std::cell::RefCell;

use super::*;

#[derive(Default)]
struct FakeBackend {
    calls: RefCell<Vec<(BulkAction, String, Vec<WorkflowId>)>>,
    reject: bool,
}

impl FakeBackend {
    fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    fn record(&self, action: BulkAction, user_id: &str, ids: &[WorkflowId]) -> Result<(), ApiError> {
        self.calls
            .borrow_mut()
            .push((action, user_id.to_string(), ids.to_vec()));
        if self.reject {
            return Err(ApiError::Rejected {
                status: 500,
                message: Some("database unavailable".to_string()),
            });
        }
        Ok(())
    }
}

impl AccessBackend for FakeBackend {
    fn grant_bulk(&self, user_id: &str, ids: &[WorkflowId]) -> Result<(), ApiError> {
        self.record(BulkAction::Grant, user_id, ids)
    }

    fn revoke_bulk(&self, user_id: &str, ids: &[WorkflowId]) -> Result<(), ApiError> {
        self.record(BulkAction::Revoke, user_id, ids)
    }
}

fn ids(raw: &[&str]) -> Vec<WorkflowId> {
    raw.iter().map(|s| WorkflowId::new(*s)).collect()
}

fn wf(id: &str) -> Workflow {
    Workflow {
        id: WorkflowId::new(id),
        name: Some(format!("wf {}", id)),
        ..Workflow::default()
    }
}

#[test]
fn grant_merge_adds_only_missing_pairs() {
    let grants = vec![AccessGrant::new("u1", "a"), AccessGrant::new("u2", "a")];
    let merged = merge_granted(&grants, "u2", &ids(&["a", "b"]));
    assert_eq!(merged.len(), 3);
    assert_eq!(&merged[..2], &grants[..]);
    assert_eq!(merged[2], AccessGrant::new("u2", "b"));
}

#[test]
fn grant_merge_ignores_duplicate_ids_in_request() {
    let merged = merge_granted(&[], "u1", &ids(&["a", "a"]));
    assert_eq!(merged, vec![AccessGrant::new("u1", "a")]);
}

#[test]
fn revoke_merge_only_touches_selected_user() {
    let grants = vec![
        AccessGrant::new("u1", "a"),
        AccessGrant::new("u2", "a"),
        AccessGrant::new("u2", "b"),
        AccessGrant::new("u2", "c"),
    ];
    let merged = merge_revoked(&grants, "u2", &ids(&["a", "b", "zzz"]));
    assert_eq!(
        merged,
        vec![AccessGrant::new("u1", "a"), AccessGrant::new("u2", "c")]
    );
}

#[test]
fn empty_request_is_not_built() {
    assert!(BulkRequest::new("u1", BulkAction::Grant, Vec::new()).is_none());
    assert!(BulkRequest::select_all("u1", true, &[]).is_none());
}

#[test]
fn select_all_covers_the_whole_filtered_list() {
    let list = [wf("mktg:1"), wf("mktg:2"), wf("ops:3")];
    let filtered: Vec<&Workflow> = list.iter().take(2).collect();

    let on = BulkRequest::select_all("u1", true, &filtered).expect("request");
    assert_eq!(on.action, BulkAction::Grant);
    assert_eq!(on.ids, ids(&["mktg:1", "mktg:2"]));

    let off = BulkRequest::select_all("u1", false, &filtered).expect("request");
    assert_eq!(off.action, BulkAction::Revoke);
    assert_eq!(off.ids, on.ids);
}

#[test]
fn select_all_checked_needs_user_and_full_coverage() {
    let list = [wf("a"), wf("b")];
    let filtered: Vec<&Workflow> = list.iter().collect();
    let partial = GrantIndex::build(&[AccessGrant::new("u1", "a")]);
    let full = GrantIndex::build(&[AccessGrant::new("u1", "a"), AccessGrant::new("u1", "b")]);

    assert!(!select_all_checked(None, &filtered, &full));
    assert!(!select_all_checked(Some("u1"), &[], &full));
    assert!(!select_all_checked(Some("u1"), &filtered, &partial));
    assert!(select_all_checked(Some("u1"), &filtered, &full));
    assert!(!select_all_checked(Some("u2"), &filtered, &full));
}

#[test]
fn dispatch_merges_after_acknowledgement() {
    let backend = FakeBackend::default();
    let dispatcher = BulkDispatcher::default();
    let grants = vec![AccessGrant::new("u2", "a")];
    let req = BulkRequest::new("u2", BulkAction::Grant, ids(&["a", "b"])).expect("request");

    let merged = dispatcher.dispatch(&backend, &grants, &req).expect("dispatch");

    assert_eq!(
        merged,
        vec![AccessGrant::new("u2", "a"), AccessGrant::new("u2", "b")]
    );
    let calls = backend.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], (BulkAction::Grant, "u2".to_string(), ids(&["a", "b"])));
    assert!(!dispatcher.is_busy());
}

#[test]
fn rejected_dispatch_reports_error_and_clears_flag() {
    let backend = FakeBackend::rejecting();
    let dispatcher = BulkDispatcher::default();
    let req = BulkRequest::new("u1", BulkAction::Revoke, ids(&["a"])).expect("request");

    let err = dispatcher
        .dispatch(&backend, &[AccessGrant::new("u1", "a")], &req)
        .expect_err("should fail");

    assert!(matches!(err, BulkError::Api(_)));
    assert_eq!(err.to_string(), "database unavailable");
    assert!(!dispatcher.is_busy());
}

#[test]
fn overlapping_dispatch_is_refused() {
    let backend = FakeBackend::default();
    let dispatcher = BulkDispatcher::default();
    let req = BulkRequest::new("u1", BulkAction::Grant, ids(&["a"])).expect("request");

    let guard = dispatcher.begin().expect("first call");
    assert!(dispatcher.is_busy());

    let shared = dispatcher.clone();
    let err = shared
        .dispatch(&backend, &[], &req)
        .expect_err("second call must be refused");
    assert!(matches!(err, BulkError::Busy));
    assert!(backend.calls.borrow().is_empty());

    drop(guard);
    assert!(!dispatcher.is_busy());
    assert!(shared.dispatch(&backend, &[], &req).is_ok());
}
