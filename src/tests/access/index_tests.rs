use super::*;

fn grants() -> Vec<AccessGrant> {
    vec![
        AccessGrant::new("u1", "mktg:100"),
        AccessGrant::new("u1", "7"),
        AccessGrant::new("u2", "mktg:100"),
        AccessGrant::new("u1", "mktg:100"),
    ]
}

#[test]
fn every_listed_pair_is_reachable() {
    let list = grants();
    let index = GrantIndex::build(&list);
    for g in &list {
        assert!(index.has(&g.user_id, &g.workflow_id));
    }
}

#[test]
fn no_unlisted_pair_is_reachable() {
    let list = grants();
    let index = GrantIndex::build(&list);
    for (user, id) in index.pairs() {
        assert!(list.iter().any(|g| g.user_id == user && &g.workflow_id == id));
    }
    assert!(!index.has("u2", &WorkflowId::new("7")));
    assert!(!index.has("u3", &WorkflowId::new("mktg:100")));
}

#[test]
fn duplicate_pairs_collapse() {
    let index = GrantIndex::build(&grants());
    assert_eq!(index.count_for("u1"), 2);
    assert_eq!(index.count_for("u2"), 1);
    assert_eq!(index.count_for("nobody"), 0);
    assert_eq!(index.len(), 3);
}

#[test]
fn building_twice_gives_the_same_index() {
    let list = grants();
    assert_eq!(GrantIndex::build(&list), GrantIndex::build(&list));
}

#[test]
fn numeric_wire_ids_match_string_workflow_ids() {
    let list: Vec<AccessGrant> = serde_json::from_value(serde_json::json!([
        {"user_id": "u1", "workflow_id": 42}
    ]))
    .unwrap();
    let index = GrantIndex::build(&list);
    assert!(index.has("u1", &WorkflowId::new("42")));
}
