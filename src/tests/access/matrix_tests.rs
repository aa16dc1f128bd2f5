use super::*;
use crate::access::{AccessFilter, CategoryFilter};
use crate::model::{AccessGrant, Role};

fn user(id: &str, email: &str, role: Role) -> User {
    User {
        id: id.to_string(),
        email: email.to_string(),
        role,
    }
}

fn wf(id: &str, name: &str) -> Workflow {
    Workflow {
        id: WorkflowId::new(id),
        name: Some(name.to_string()),
        ..Workflow::default()
    }
}

fn snapshot() -> AdminSnapshot {
    AdminSnapshot {
        users: vec![
            user("u1", "ana@khalti.com", Role::User),
            user("u2", "root@khalti.com", Role::Superadmin),
        ],
        workflows: vec![
            wf("mktg:100", "Welcome Email"),
            wf("mktg:101", "Promo"),
            wf("ops:7", "Nightly Backup"),
        ],
        grants: vec![AccessGrant::new("u1", "mktg:100")],
        current_user: Some(user("u2", "root@khalti.com", Role::Superadmin)),
        ..AdminSnapshot::default()
    }
}

#[test]
fn first_user_is_selected_by_default() {
    let snap = snapshot();
    let m = AccessMatrix::derive(&snap, &AccessSelection::default());
    assert_eq!(m.selected_id(), Some("u1"));
    assert_eq!(m.workflows.len(), 3);
    assert_eq!(m.categories, vec!["mktg".to_string(), "ops".to_string()]);
}

#[test]
fn missing_in_category_yields_ungranted_workflow() {
    let snap = snapshot();
    let sel = AccessSelection {
        user_id: Some("u1".to_string()),
        filter: WorkflowFilter {
            category: CategoryFilter::Only("mktg".to_string()),
            access: AccessFilter::Missing,
            ..WorkflowFilter::default()
        },
        ..AccessSelection::default()
    };
    let m = AccessMatrix::derive(&snap, &sel);
    let ids: Vec<&str> = m.workflows.iter().map(|w| w.id.as_str()).collect();
    assert_eq!(ids, vec!["mktg:101"]);
    assert!(!m.all_filtered_granted());
}

#[test]
fn select_all_toggle_lands_on_new_checked_value() {
    let mut snap = snapshot();
    let sel = AccessSelection {
        user_id: Some("u1".to_string()),
        filter: WorkflowFilter {
            category: CategoryFilter::Only("mktg".to_string()),
            ..WorkflowFilter::default()
        },
        ..AccessSelection::default()
    };

    let req = AccessMatrix::derive(&snap, &sel)
        .select_all_request()
        .expect("request");
    assert_eq!(req.action, BulkAction::Grant);
    snap.grants = req.apply_to(&snap.grants);
    assert!(AccessMatrix::derive(&snap, &sel).all_filtered_granted());

    let req = AccessMatrix::derive(&snap, &sel)
        .select_all_request()
        .expect("request");
    assert_eq!(req.action, BulkAction::Revoke);
    snap.grants = req.apply_to(&snap.grants);
    let m = AccessMatrix::derive(&snap, &sel);
    assert!(!m.all_filtered_granted());
    assert!(!m.has_access(&WorkflowId::new("mktg:100")));
}

#[test]
fn single_toggle_goes_through_one_id_request() {
    let snap = snapshot();
    let m = AccessMatrix::derive(&snap, &AccessSelection::default());

    let revoke = m.toggle_request(&WorkflowId::new("mktg:100")).expect("request");
    assert_eq!(revoke.action, BulkAction::Revoke);
    assert_eq!(revoke.ids, vec![WorkflowId::new("mktg:100")]);

    let grant = m.toggle_request(&WorkflowId::new("ops:7")).expect("request");
    assert_eq!(grant.action, BulkAction::Grant);
}

#[test]
fn no_user_means_no_requests() {
    let snap = AdminSnapshot {
        workflows: vec![wf("a", "A")],
        ..AdminSnapshot::default()
    };
    let m = AccessMatrix::derive(&snap, &AccessSelection::default());
    assert!(m.selected.is_none());
    assert!(!m.all_filtered_granted());
    assert!(m.select_all_request().is_none());
    assert!(m.toggle_request(&WorkflowId::new("a")).is_none());
}

#[test]
fn panel_hidden_only_for_superadmin_pair() {
    let snap = snapshot();
    let root = AccessSelection {
        user_id: Some("u2".to_string()),
        ..AccessSelection::default()
    };
    assert!(AccessMatrix::derive(&snap, &root).workflow_panel_hidden());
    assert!(!AccessMatrix::derive(&snap, &AccessSelection::default()).workflow_panel_hidden());

    let mut plain = snapshot();
    plain.current_user = Some(user("u1", "ana@khalti.com", Role::User));
    assert!(!AccessMatrix::derive(&plain, &root).workflow_panel_hidden());
}

#[test]
fn hidden_panel_builds_no_requests() {
    let snap = snapshot();
    let root = AccessSelection {
        user_id: Some("u2".to_string()),
        ..AccessSelection::default()
    };
    let m = AccessMatrix::derive(&snap, &root);
    assert!(m.workflow_panel_hidden());
    assert!(m.select_all_request().is_none());
    assert!(m.toggle_request(&WorkflowId::new("ops:7")).is_none());

    let mut plain = snapshot();
    plain.current_user = Some(user("u1", "ana@khalti.com", Role::User));
    let m = AccessMatrix::derive(&plain, &root);
    assert!(m.select_all_request().is_some());
    assert!(m.toggle_request(&WorkflowId::new("ops:7")).is_some());
}

#[test]
fn grant_counts_only_for_non_superadmins() {
    let snap = snapshot();
    let m = AccessMatrix::derive(&snap, &AccessSelection::default());
    assert!(!m.show_grant_counts());
    assert_eq!(m.grant_count("u1"), 1);

    let mut plain = snapshot();
    plain.current_user = None;
    assert!(AccessMatrix::derive(&plain, &AccessSelection::default()).show_grant_counts());
}

#[test]
fn user_query_narrows_list_but_keeps_selection() {
    let snap = snapshot();
    let sel = AccessSelection {
        user_id: Some("u1".to_string()),
        user_query: " ROOT ".to_string(),
        ..AccessSelection::default()
    };
    let m = AccessMatrix::derive(&snap, &sel);
    assert_eq!(m.users.len(), 1);
    assert_eq!(m.users[0].id, "u2");
    assert_eq!(m.selected_id(), Some("u1"));
}
