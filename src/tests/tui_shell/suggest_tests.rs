use super::*;

fn def(name: &'static str, aliases: &'static [&'static str]) -> CommandDef {
    CommandDef {
        name,
        aliases,
        usage: "",
        help: "",
    }
}

#[test]
fn exact_beats_prefix_beats_substring() {
    assert_eq!(score_match("logs", "logs"), 100);
    assert!(score_match("lo", "logs") > score_match("og", "logs"));
    assert_eq!(score_match("zz", "logs"), 0);
}

#[test]
fn aliases_count_toward_the_score() {
    assert_eq!(score_command("wf", &def("workflows", &["wf"])), 100);
    assert_eq!(score_command("x", &def("workflows", &["wf"])), 0);
}

#[test]
fn sort_is_stable_for_equal_scores() {
    let mut scored = vec![
        (10, def("search", &[])),
        (40, def("size", &[])),
        (10, def("users", &[])),
    ];
    sort_scored_suggestions(&mut scored);
    let names: Vec<&str> = scored.iter().map(|(_, d)| d.name).collect();
    assert_eq!(names, vec!["size", "search", "users"]);
}
