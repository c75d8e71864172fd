//! Conditional visibility rules
//!
//! A field's visibility is controlled by a set of rules combined under
//! AND/OR logic. Each rule names the field it depends on (dot-path
//! addressable into the value snapshot) and a typed predicate over that
//! field's current value. Rules are wire data; evaluation lives in the
//! interpreter crate.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Discards the `value` payload accompanying an unrecognized rule type,
/// so `#[serde(other)]` accepts it instead of erroring on leftover content.
fn ignore_payload<'de, D: Deserializer<'de>>(deserializer: D) -> Result<(), D::Error> {
    serde::de::IgnoredAny::deserialize(deserializer).map(|_| ())
}

/// A single conditional predicate tied to one dependency field.
///
/// Wire shape: `{"field": "tags", "type": "arrayLengthMin", "value": 2}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalRule {
    /// Name of the field this rule depends on
    pub field: String,
    /// The predicate and its payload
    #[serde(flatten)]
    pub kind: RuleKind,
}

/// The predicate of a conditional rule, discriminated by the `type` tag.
///
/// Each variant fixes the shape of its `value` payload. A payload the
/// evaluator cannot apply to the live value (e.g. an array rule against a
/// scalar) evaluates to `false` with a diagnostic, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum RuleKind {
    /// Strict equality; arrays compare order-insensitively
    Equals(Value),
    /// Negated equality; for an array live value and a scalar payload,
    /// "array does not contain this scalar"
    Not(Value),
    /// Scalar membership, or any-element intersection for array values
    OneOf(Vec<Value>),
    /// Presence (`true`) or absence (`false`); arrays are present when
    /// non-empty
    HasValue(bool),
    /// Array contains the payload element
    Contains(Value),
    /// Array contains every payload element
    ContainsAll(Vec<Value>),
    /// Array contains at least one payload element
    ContainsAny(Vec<Value>),
    /// Array length is exactly the payload
    ArrayLength(u64),
    /// Array length is at least the payload
    ArrayLengthMin(u64),
    /// Array length is at most the payload
    ArrayLengthMax(u64),
    /// Emptiness (`true`) or non-emptiness (`false`); inverse of `HasValue`
    IsEmpty(bool),
    /// Unknown for forward compatibility. Evaluates to `false` with a
    /// diagnostic, never silently `true`.
    #[serde(other, deserialize_with = "ignore_payload")]
    Unknown,
}

impl RuleKind {
    /// The wire name of this rule type, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::Equals(_) => "equals",
            RuleKind::Not(_) => "not",
            RuleKind::OneOf(_) => "oneOf",
            RuleKind::HasValue(_) => "hasValue",
            RuleKind::Contains(_) => "contains",
            RuleKind::ContainsAll(_) => "containsAll",
            RuleKind::ContainsAny(_) => "containsAny",
            RuleKind::ArrayLength(_) => "arrayLength",
            RuleKind::ArrayLengthMin(_) => "arrayLengthMin",
            RuleKind::ArrayLengthMax(_) => "arrayLengthMax",
            RuleKind::IsEmpty(_) => "isEmpty",
            RuleKind::Unknown => "unknown",
        }
    }
}

/// How multiple rules are combined into one visibility decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConditionLogic {
    /// All rules must match. Vacuously true for an empty rule set.
    #[default]
    And,
    /// Any single rule can match. Vacuously false for an empty rule set.
    Or,
}

/// A rule set plus combination logic controlling a field's visibility.
///
/// A field with no `FieldConditions` at all is unconditionally visible;
/// that is a distinct case from conditions configured with zero rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConditions {
    pub rules: Vec<ConditionalRule>,
    #[serde(default)]
    pub logic: ConditionLogic,
}

impl FieldConditions {
    pub fn all(rules: Vec<ConditionalRule>) -> Self {
        Self {
            rules,
            logic: ConditionLogic::And,
        }
    }

    pub fn any(rules: Vec<ConditionalRule>) -> Self {
        Self {
            rules,
            logic: ConditionLogic::Or,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rule_wire_shape() {
        let rule = ConditionalRule {
            field: "tags".to_string(),
            kind: RuleKind::ArrayLengthMin(2),
        };
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(
            json,
            json!({"field": "tags", "type": "arrayLengthMin", "value": 2})
        );

        let parsed: ConditionalRule = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, rule);
    }

    #[test]
    fn test_unknown_rule_type_deserializes() {
        let parsed: ConditionalRule =
            serde_json::from_value(json!({"field": "code", "type": "fuzzyMatch", "value": "AB"}))
                .unwrap();
        assert_eq!(parsed.kind, RuleKind::Unknown);
        assert_eq!(parsed.kind.name(), "unknown");
    }

    #[test]
    fn test_logic_wire_names() {
        assert_eq!(
            serde_json::to_value(ConditionLogic::And).unwrap(),
            json!("AND")
        );
        assert_eq!(
            serde_json::to_value(ConditionLogic::Or).unwrap(),
            json!("OR")
        );
    }

    #[test]
    fn test_logic_defaults_to_and() {
        let conditions: FieldConditions = serde_json::from_value(json!({
            "rules": [{"field": "code", "type": "equals", "value": "ABC"}]
        }))
        .unwrap();
        assert_eq!(conditions.logic, ConditionLogic::And);
    }
}
