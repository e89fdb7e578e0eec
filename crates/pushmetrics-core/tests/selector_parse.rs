#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use pushmetrics_core::selector::{LabelSelector, Labels, Operator, Selector};

fn labels(pairs: &[(&str, &str)]) -> Labels {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[test]
fn empty_selector_matches_everything() {
    let sel = Selector::parse("").unwrap();
    assert!(sel.is_empty());
    assert!(sel.matches(&labels(&[])));
    assert!(sel.matches(&labels(&[("app", "web")])));
    assert_eq!(sel.to_string(), "");
}

#[test]
fn parses_every_operator() {
    let sel = Selector::parse("tier notin (db), app=web, env in (prod,staging), canary, !legacy, zone!=b").unwrap();
    let ops: Vec<_> = sel.requirements().iter().map(|r| (r.key.as_str(), r.operator)).collect();
    assert_eq!(
        ops,
        vec![
            ("app", Operator::Equals),
            ("canary", Operator::Exists),
            ("env", Operator::In),
            ("legacy", Operator::DoesNotExist),
            ("tier", Operator::NotIn),
            ("zone", Operator::NotEquals),
        ]
    );
    assert_eq!(
        sel.to_string(),
        "app=web,canary,env in (prod,staging),!legacy,tier notin (db),zone!=b"
    );
}

#[test]
fn double_equals_renders_canonically() {
    let sel = Selector::parse("app==web").unwrap();
    assert_eq!(sel.to_string(), "app=web");
}

#[test]
fn matching() {
    let sel = Selector::parse("app=web,env in (prod,staging),!legacy").unwrap();
    assert!(sel.matches(&labels(&[("app", "web"), ("env", "prod")])));
    assert!(!sel.matches(&labels(&[("app", "web"), ("env", "dev")])));
    assert!(!sel.matches(&labels(&[("app", "web"), ("env", "prod"), ("legacy", "1")])));
    assert!(!sel.matches(&labels(&[("env", "prod")])));

    let neg = Selector::parse("zone!=b,tier notin (db)").unwrap();
    assert!(neg.matches(&labels(&[])));
    assert!(neg.matches(&labels(&[("zone", "a"), ("tier", "web")])));
    assert!(!neg.matches(&labels(&[("zone", "b")])));
    assert!(!neg.matches(&labels(&[("tier", "db")])));
}

#[test]
fn malformed_selectors_fail() {
    for bad in ["app=web,", "app in prod", "app in ()", "app in (a", "app=we b", "=web", "app ~ web", "a)"] {
        let err = Selector::parse(bad).expect_err(bad);
        assert_eq!(err.code().as_str(), "INVALID_SELECTOR", "selector={bad}");
    }
}

#[test]
fn structured_form() {
    let ls = LabelSelector::parse("app=web,env in (prod),zone!=b,canary,!legacy").unwrap();
    assert_eq!(ls.match_labels.get("app").map(String::as_str), Some("web"));
    assert_eq!(ls.match_labels.len(), 1);

    let exprs: Vec<_> = ls
        .match_expressions
        .iter()
        .map(|e| (e.key.as_str(), e.operator.as_str(), e.values.clone()))
        .collect();
    assert_eq!(
        exprs,
        vec![
            ("canary", "Exists", vec![]),
            ("env", "In", vec!["prod".to_string()]),
            ("legacy", "DoesNotExist", vec![]),
            ("zone", "NotIn", vec!["b".to_string()]),
        ]
    );

    let json = serde_json::to_value(&ls).unwrap();
    assert_eq!(json["matchLabels"]["app"], "web");
    assert_eq!(json["matchExpressions"][0]["operator"], "Exists");
    assert!(json["matchExpressions"][0].get("values").is_none());
}
