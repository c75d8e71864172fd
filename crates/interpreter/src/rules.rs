//! Rule Evaluator
//!
//! Evaluates one conditional rule against the value snapshot. Pure, total,
//! deterministic: malformed rule data degrades to `false` with a
//! diagnostic, it never panics or errors.

use formbldr_domain::{ConditionalRule, RuleKind, ValueSnapshot};
use serde_json::Value;

use crate::diagnostics::{Diagnostic, DiagnosticSink};

/// Evaluates a single rule against the snapshot.
pub fn evaluate_rule(
    rule: &ConditionalRule,
    snapshot: &ValueSnapshot,
    sink: &dyn DiagnosticSink,
) -> bool {
    let live = snapshot.get(&rule.field);

    match &rule.kind {
        RuleKind::Equals(expected) => value_eq(live.unwrap_or(&Value::Null), expected),

        RuleKind::Not(expected) => {
            let live = live.unwrap_or(&Value::Null);
            match (live, expected) {
                // Array vs scalar: "array does not contain this scalar"
                (Value::Array(items), scalar) if !scalar.is_array() => {
                    !items.iter().any(|item| value_eq(item, scalar))
                }
                _ => !value_eq(live, expected),
            }
        }

        RuleKind::OneOf(allowed) => match live.unwrap_or(&Value::Null) {
            Value::Array(items) => items
                .iter()
                .any(|item| allowed.iter().any(|candidate| value_eq(item, candidate))),
            scalar => allowed.iter().any(|candidate| value_eq(scalar, candidate)),
        },

        RuleKind::HasValue(expected) => is_truthy(live) == *expected,
        RuleKind::IsEmpty(expected) => is_truthy(live) != *expected,

        RuleKind::Contains(needle) => with_array(rule, live, sink, |items| {
            items.iter().any(|item| value_eq(item, needle))
        }),
        RuleKind::ContainsAll(needles) => with_array(rule, live, sink, |items| {
            needles
                .iter()
                .all(|needle| items.iter().any(|item| value_eq(item, needle)))
        }),
        RuleKind::ContainsAny(needles) => with_array(rule, live, sink, |items| {
            needles
                .iter()
                .any(|needle| items.iter().any(|item| value_eq(item, needle)))
        }),
        RuleKind::ArrayLength(expected) => {
            with_array(rule, live, sink, |items| items.len() as u64 == *expected)
        }
        RuleKind::ArrayLengthMin(min) => {
            with_array(rule, live, sink, |items| items.len() as u64 >= *min)
        }
        RuleKind::ArrayLengthMax(max) => {
            with_array(rule, live, sink, |items| items.len() as u64 <= *max)
        }

        RuleKind::Unknown => {
            sink.report(Diagnostic::UnknownRuleType {
                field: rule.field.clone(),
            });
            false
        }
    }
}

/// Applies an array-only rule. Non-array live values evaluate to `false`;
/// a present non-array value additionally reports a shape mismatch
/// (absence is not a shape violation - untouched fields stay quiet).
fn with_array(
    rule: &ConditionalRule,
    live: Option<&Value>,
    sink: &dyn DiagnosticSink,
    predicate: impl FnOnce(&[Value]) -> bool,
) -> bool {
    match live {
        Some(Value::Array(items)) => predicate(items),
        Some(Value::Null) | None => false,
        Some(_) => {
            sink.report(Diagnostic::RuleShapeMismatch {
                field: rule.field.clone(),
                rule: rule.kind.name(),
                expected: "array",
            });
            false
        }
    }
}

/// Equality used by `equals`/`not`/`oneOf` and the membership rules:
/// numbers compare by numeric value (not JSON representation), arrays
/// compare as multisets, everything else compares strictly.
pub(crate) fn value_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => a == b,
        },
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && multiset_keys(x) == multiset_keys(y)
        }
        _ => a == b,
    }
}

/// Order-insensitive array comparison via sorted canonical serialization.
fn multiset_keys(items: &[Value]) -> Vec<String> {
    let mut keys: Vec<String> = items
        .iter()
        .map(|item| serde_json::to_string(item).unwrap_or_default())
        .collect();
    keys.sort();
    keys
}

/// Truthiness used by `hasValue`/`isEmpty` and the `required` constraint:
/// null/absent, `false`, empty strings, and numeric zero are falsy; arrays
/// are truthy when non-empty; objects are always truthy.
pub(crate) fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;
    use serde_json::json;

    fn snapshot(value: serde_json::Value) -> ValueSnapshot {
        serde_json::from_value(value).unwrap()
    }

    fn rule(field: &str, kind: RuleKind) -> ConditionalRule {
        ConditionalRule {
            field: field.to_string(),
            kind,
        }
    }

    #[test]
    fn test_equals_scalar() {
        let sink = CollectingSink::new();
        let snap = snapshot(json!({"code": "ABC"}));
        assert!(evaluate_rule(
            &rule("code", RuleKind::Equals(json!("ABC"))),
            &snap,
            &sink
        ));
        assert!(!evaluate_rule(
            &rule("code", RuleKind::Equals(json!("XYZ"))),
            &snap,
            &sink
        ));
    }

    #[test]
    fn test_equals_is_array_order_insensitive() {
        let sink = CollectingSink::new();
        let snap = snapshot(json!({"tags": ["b", "a", "c"]}));
        let equals = rule("tags", RuleKind::Equals(json!(["a", "c", "b"])));
        assert!(evaluate_rule(&equals, &snap, &sink));

        let different = rule("tags", RuleKind::Equals(json!(["a", "c", "d"])));
        assert!(!evaluate_rule(&different, &snap, &sink));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_equals_numbers_compare_by_value() {
        let sink = CollectingSink::new();
        let snap = snapshot(json!({"count": 1}));
        assert!(evaluate_rule(
            &rule("count", RuleKind::Equals(json!(1.0))),
            &snap,
            &sink
        ));
    }

    #[test]
    fn test_not_array_vs_scalar_means_does_not_contain() {
        let sink = CollectingSink::new();
        let snap = snapshot(json!({"tags": ["a", "b"]}));
        assert!(!evaluate_rule(
            &rule("tags", RuleKind::Not(json!("a"))),
            &snap,
            &sink
        ));
        assert!(evaluate_rule(
            &rule("tags", RuleKind::Not(json!("z"))),
            &snap,
            &sink
        ));
    }

    #[test]
    fn test_not_both_arrays_negates_equals() {
        let sink = CollectingSink::new();
        let snap = snapshot(json!({"tags": ["a", "b"]}));
        assert!(!evaluate_rule(
            &rule("tags", RuleKind::Not(json!(["b", "a"]))),
            &snap,
            &sink
        ));
    }

    #[test]
    fn test_one_of_scalar_membership_and_array_intersection() {
        let sink = CollectingSink::new();
        let snap = snapshot(json!({"class": "ranger", "tags": ["a", "b"]}));
        assert!(evaluate_rule(
            &rule("class", RuleKind::OneOf(vec![json!("mage"), json!("ranger")])),
            &snap,
            &sink
        ));
        assert!(evaluate_rule(
            &rule("tags", RuleKind::OneOf(vec![json!("b"), json!("z")])),
            &snap,
            &sink
        ));
        assert!(!evaluate_rule(
            &rule("tags", RuleKind::OneOf(vec![json!("z")])),
            &snap,
            &sink
        ));
    }

    #[test]
    fn test_has_value_truthiness() {
        let sink = CollectingSink::new();
        let snap = snapshot(json!({
            "empty_string": "",
            "zero": 0,
            "unchecked": false,
            "none": null,
            "empty_list": [],
            "list": ["a"],
            "object": {}
        }));

        for falsy in ["empty_string", "zero", "unchecked", "none", "empty_list", "missing"] {
            assert!(
                !evaluate_rule(&rule(falsy, RuleKind::HasValue(true)), &snap, &sink),
                "{falsy} should not have a value"
            );
            assert!(evaluate_rule(
                &rule(falsy, RuleKind::HasValue(false)),
                &snap,
                &sink
            ));
        }
        assert!(evaluate_rule(
            &rule("list", RuleKind::HasValue(true)),
            &snap,
            &sink
        ));
        assert!(evaluate_rule(
            &rule("object", RuleKind::HasValue(true)),
            &snap,
            &sink
        ));
    }

    #[test]
    fn test_is_empty_mirrors_has_value() {
        let sink = CollectingSink::new();
        let snap = snapshot(json!({"tags": [], "code": "ABC"}));
        assert!(evaluate_rule(
            &rule("tags", RuleKind::IsEmpty(true)),
            &snap,
            &sink
        ));
        assert!(evaluate_rule(
            &rule("code", RuleKind::IsEmpty(false)),
            &snap,
            &sink
        ));
        assert!(!evaluate_rule(
            &rule("code", RuleKind::IsEmpty(true)),
            &snap,
            &sink
        ));
    }

    #[test]
    fn test_contains_family() {
        let sink = CollectingSink::new();
        let snap = snapshot(json!({"tags": ["a", "b", "c"]}));
        assert!(evaluate_rule(
            &rule("tags", RuleKind::Contains(json!("b"))),
            &snap,
            &sink
        ));
        assert!(evaluate_rule(
            &rule("tags", RuleKind::ContainsAll(vec![json!("a"), json!("c")])),
            &snap,
            &sink
        ));
        assert!(!evaluate_rule(
            &rule("tags", RuleKind::ContainsAll(vec![json!("a"), json!("z")])),
            &snap,
            &sink
        ));
        assert!(evaluate_rule(
            &rule("tags", RuleKind::ContainsAny(vec![json!("z"), json!("c")])),
            &snap,
            &sink
        ));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_array_length_min_scenario() {
        let sink = CollectingSink::new();
        let min_two = rule("tags", RuleKind::ArrayLengthMin(2));

        let one = snapshot(json!({"tags": ["a"]}));
        assert!(!evaluate_rule(&min_two, &one, &sink));

        let two = snapshot(json!({"tags": ["a", "b"]}));
        assert!(evaluate_rule(&min_two, &two, &sink));
        assert!(sink.is_empty());

        let wrong_shape = snapshot(json!({"tags": "not-an-array"}));
        assert!(!evaluate_rule(&min_two, &wrong_shape, &sink));
        assert_eq!(
            sink.take(),
            vec![Diagnostic::RuleShapeMismatch {
                field: "tags".to_string(),
                rule: "arrayLengthMin",
                expected: "array",
            }]
        );
    }

    #[test]
    fn test_array_rules_quiet_on_absent_values() {
        let sink = CollectingSink::new();
        let snap = snapshot(json!({"tags": null}));
        assert!(!evaluate_rule(
            &rule("tags", RuleKind::ArrayLength(0)),
            &snap,
            &sink
        ));
        assert!(!evaluate_rule(
            &rule("missing", RuleKind::Contains(json!("a"))),
            &snap,
            &sink
        ));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_unknown_rule_type_is_false_with_diagnostic() {
        let sink = CollectingSink::new();
        let snap = snapshot(json!({"code": "ABC"}));
        assert!(!evaluate_rule(
            &rule("code", RuleKind::Unknown),
            &snap,
            &sink
        ));
        assert_eq!(
            sink.take(),
            vec![Diagnostic::UnknownRuleType {
                field: "code".to_string()
            }]
        );
    }

    #[test]
    fn test_dot_path_dependency() {
        let sink = CollectingSink::new();
        let snap = snapshot(json!({"address": {"city": "Oakhaven"}}));
        assert!(evaluate_rule(
            &rule("address.city", RuleKind::Equals(json!("Oakhaven"))),
            &snap,
            &sink
        ));
    }
}
