//! Condition Aggregator
//!
//! Combines a field's rules under AND/OR logic into one visibility
//! decision. A field with no conditions at all never reaches the
//! aggregator: it is unconditionally visible. That is deliberately a
//! different case from conditions configured with an empty rule set,
//! which follows the vacuous semantics of the logic operator (AND: true,
//! OR: false).

use formbldr_domain::{ConditionLogic, FieldConditions, FieldDefinition, ValueSnapshot};

use crate::diagnostics::DiagnosticSink;
use crate::rules::evaluate_rule;

/// Applies the configured logic across rule results. Idempotent: the same
/// snapshot always yields the same boolean.
pub fn should_render(
    conditions: &FieldConditions,
    snapshot: &ValueSnapshot,
    sink: &dyn DiagnosticSink,
) -> bool {
    match conditions.logic {
        ConditionLogic::And => conditions
            .rules
            .iter()
            .all(|rule| evaluate_rule(rule, snapshot, sink)),
        ConditionLogic::Or => conditions
            .rules
            .iter()
            .any(|rule| evaluate_rule(rule, snapshot, sink)),
    }
}

/// Visibility decision for one field. Short-circuits to visible before
/// invoking the aggregator when no conditions are configured.
pub fn is_visible(
    field: &FieldDefinition,
    snapshot: &ValueSnapshot,
    sink: &dyn DiagnosticSink,
) -> bool {
    match &field.conditions {
        None => true,
        Some(conditions) => should_render(conditions, snapshot, sink),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;
    use formbldr_domain::{ConditionalRule, FieldKind, InputType, RuleKind};
    use serde_json::json;

    fn snapshot(value: serde_json::Value) -> ValueSnapshot {
        serde_json::from_value(value).unwrap()
    }

    fn field(conditions: Option<FieldConditions>) -> FieldDefinition {
        FieldDefinition {
            name: "subject".to_string(),
            label: "Subject".to_string(),
            css_class: None,
            hint: None,
            validation: None,
            transform: None,
            conditions,
            default_value: None,
            kind: FieldKind::Input {
                input_type: InputType::Text,
            },
        }
    }

    fn rule(field: &str, kind: RuleKind) -> ConditionalRule {
        ConditionalRule {
            field: field.to_string(),
            kind,
        }
    }

    #[test]
    fn test_empty_rules_vacuous_under_and_not_under_or() {
        let sink = CollectingSink::new();
        let snap = ValueSnapshot::new();
        assert!(should_render(&FieldConditions::all(vec![]), &snap, &sink));
        assert!(!should_render(&FieldConditions::any(vec![]), &snap, &sink));
    }

    #[test]
    fn test_absent_conditions_distinct_from_empty_rules() {
        let sink = CollectingSink::new();
        let snap = ValueSnapshot::new();

        // No conditions configured: visible without consulting the
        // aggregator. Under OR the aggregator would say false for an
        // empty rule set, so the two paths are observably different.
        assert!(is_visible(&field(None), &snap, &sink));
        assert!(!is_visible(
            &field(Some(FieldConditions::any(vec![]))),
            &snap,
            &sink
        ));
    }

    #[test]
    fn test_or_scenario_from_dialogue_form() {
        let sink = CollectingSink::new();
        let conditions = FieldConditions::any(vec![
            rule("code", RuleKind::Not(json!("ABC"))),
            rule("start", RuleKind::HasValue(true)),
        ]);

        let neither = snapshot(json!({"code": "ABC", "start": null}));
        assert!(!should_render(&conditions, &neither, &sink));

        let first = snapshot(json!({"code": "XYZ", "start": null}));
        assert!(should_render(&conditions, &first, &sink));

        let second = snapshot(json!({"code": "ABC", "start": "2025-01-01"}));
        assert!(should_render(&conditions, &second, &sink));
    }

    #[test]
    fn test_and_requires_every_rule() {
        let sink = CollectingSink::new();
        let conditions = FieldConditions::all(vec![
            rule("class", RuleKind::Equals(json!("mage"))),
            rule("level", RuleKind::HasValue(true)),
        ]);

        let both = snapshot(json!({"class": "mage", "level": 3}));
        assert!(should_render(&conditions, &both, &sink));

        let one = snapshot(json!({"class": "mage", "level": null}));
        assert!(!should_render(&conditions, &one, &sink));
    }

    #[test]
    fn test_idempotent_for_unchanged_snapshot() {
        let sink = CollectingSink::new();
        let conditions = FieldConditions::all(vec![rule("code", RuleKind::Equals(json!("ABC")))]);
        let snap = snapshot(json!({"code": "ABC"}));

        let first = should_render(&conditions, &snap, &sink);
        let second = should_render(&conditions, &snap, &sink);
        assert_eq!(first, second);
        assert!(first);
    }
}
