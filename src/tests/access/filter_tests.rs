use super::*;

fn wf(id: &str, name: &str) -> Workflow {
    Workflow {
        id: WorkflowId::new(id),
        name: Some(name.to_string()),
        ..Workflow::default()
    }
}

fn catalogue() -> Vec<Workflow> {
    vec![
        wf("mktg:100", "Welcome Email"),
        wf("mktg:101", "Promo"),
        wf("ops:7", "Nightly Backup"),
        wf("55", "Legacy Import"),
    ]
}

fn granted(ids: &[&str]) -> HashSet<WorkflowId> {
    ids.iter().map(|id| WorkflowId::new(*id)).collect()
}

fn ids(list: &[&Workflow]) -> Vec<String> {
    list.iter().map(|w| w.id.as_str().to_string()).collect()
}

#[test]
fn category_and_missing_access_narrow_to_ungranted_workflow() {
    let workflows = vec![wf("mktg:100", "Welcome Email"), wf("mktg:101", "Promo")];
    let set = granted(&["mktg:100"]);
    let filter = WorkflowFilter {
        text: String::new(),
        category: CategoryFilter::parse("mktg"),
        access: AccessFilter::Missing,
    };
    assert_eq!(ids(&filter.apply(&workflows, Some(&set))), vec!["mktg:101"]);
}

#[test]
fn text_matches_name_or_id_case_insensitively() {
    let workflows = catalogue();
    let by_name = WorkflowFilter {
        text: "  welcome ".into(),
        ..WorkflowFilter::default()
    };
    assert_eq!(ids(&by_name.apply(&workflows, None)), vec!["mktg:100"]);

    let by_id = WorkflowFilter {
        text: "OPS:".into(),
        ..WorkflowFilter::default()
    };
    assert_eq!(ids(&by_id.apply(&workflows, None)), vec!["ops:7"]);
}

#[test]
fn predicate_order_does_not_change_the_result() {
    let workflows = catalogue();
    let set = granted(&["mktg:100", "55"]);
    let category = CategoryFilter::parse("mktg");
    let text = "m";
    let access = AccessFilter::Has;

    let forward: Vec<&Workflow> = workflows
        .iter()
        .filter(|w| category_matches(&category, w))
        .filter(|w| text_matches(text, w))
        .filter(|w| access_matches(access, w, Some(&set)))
        .collect();
    let backward: Vec<&Workflow> = workflows
        .iter()
        .filter(|w| access_matches(access, w, Some(&set)))
        .filter(|w| text_matches(text, w))
        .filter(|w| category_matches(&category, w))
        .collect();
    let combined = WorkflowFilter {
        text: text.into(),
        category,
        access,
    }
    .apply(&workflows, Some(&set));

    assert_eq!(ids(&forward), ids(&backward));
    assert_eq!(ids(&forward), ids(&combined));
    assert_eq!(ids(&combined), vec!["mktg:100"]);
}

#[test]
fn missing_access_without_selected_user_keeps_everything() {
    let workflows = catalogue();
    let filter = WorkflowFilter {
        access: AccessFilter::Missing,
        ..WorkflowFilter::default()
    };
    assert_eq!(filter.apply(&workflows, None).len(), workflows.len());
    let has = WorkflowFilter {
        access: AccessFilter::Has,
        ..WorkflowFilter::default()
    };
    assert!(has.apply(&workflows, None).is_empty());
}

#[test]
fn users_filter_on_email_substring() {
    let users = vec![
        User {
            id: "1".into(),
            email: "Alice@khalti.com".into(),
            ..User::default()
        },
        User {
            id: "2".into(),
            email: "bob@khalti.com".into(),
            ..User::default()
        },
    ];
    let hits = filter_users(&users, " ALICE ");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "1");
    assert_eq!(filter_users(&users, "").len(), 2);
}

#[test]
fn categories_are_distinct_in_first_seen_order() {
    assert_eq!(categories(&catalogue()), vec!["mktg", "ops", "default"]);
}

#[test]
fn grouping_keeps_category_order() {
    let workflows = catalogue();
    let all: Vec<&Workflow> = workflows.iter().collect();
    let groups = group_by_category(&all);
    let names: Vec<&str> = groups.iter().map(|(c, _)| c.as_str()).collect();
    assert_eq!(names, vec!["mktg", "ops", "default"]);
    assert_eq!(groups[0].1.len(), 2);
}

#[test]
fn access_filter_parses_and_cycles() {
    assert_eq!("missing".parse::<AccessFilter>().unwrap(), AccessFilter::Missing);
    assert!("none".parse::<AccessFilter>().is_err());
    assert_eq!(AccessFilter::Missing.cycle(), AccessFilter::All);
    assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
}
