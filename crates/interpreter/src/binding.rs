//! Binding Strategy Selector
//!
//! Decides, per field, whether its reactive value binding must be mediated
//! (a transform is present, or a validator needs the whole form's values)
//! or may be a direct pass-through registration. Mediated bindings route
//! reads through the transform's display direction and writes through its
//! storage direction; direct bindings are plain value registrations and
//! cheaper for the host.

use formbldr_domain::{FieldDefinition, ValueSnapshot, ValueTransform};
use serde_json::Value;

/// How a field's value binds to the host's reactive state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingStrategy {
    /// Plain registration; the host reads and writes the stored value
    Direct,
    /// Reads and writes go through the transform, and validators receive
    /// the full form snapshot
    Mediated,
}

/// True when the field needs a mediated binding: a transform is present,
/// or a custom validator declares that it reads other fields. This is a
/// structural property of the field's declaration, not of its data.
pub fn needs_mediated_binding(field: &FieldDefinition) -> bool {
    if field.transform.is_some() {
        return true;
    }
    field
        .validation
        .as_ref()
        .is_some_and(|validation| validation.needs_full_form_context())
}

/// The active binding for one field at one render: the strategy plus the
/// current display value.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldBinding {
    pub name: String,
    pub strategy: BindingStrategy,
    /// Current display value (transform applied for mediated bindings)
    pub value: Value,
    transform: Option<ValueTransform>,
}

impl FieldBinding {
    /// Converts a display-side value back to its stored form. Identity for
    /// direct bindings.
    pub fn write_back(&self, display: &Value) -> Value {
        match (&self.strategy, &self.transform) {
            (BindingStrategy::Mediated, Some(transform)) => transform.to_storage(display),
            _ => display.clone(),
        }
    }
}

/// Resolves the active binding for a field against the current snapshot.
pub fn bind(field: &FieldDefinition, snapshot: &ValueSnapshot) -> FieldBinding {
    let stored = snapshot
        .get(&field.name)
        .cloned()
        .unwrap_or(Value::Null);

    if needs_mediated_binding(field) {
        let value = match &field.transform {
            Some(transform) => transform.to_display(&stored),
            None => stored,
        };
        FieldBinding {
            name: field.name.clone(),
            strategy: BindingStrategy::Mediated,
            value,
            transform: field.transform,
        }
    } else {
        FieldBinding {
            name: field.name.clone(),
            strategy: BindingStrategy::Direct,
            value: stored,
            transform: None,
        }
    }
}
