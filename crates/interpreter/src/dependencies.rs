//! Dependency Tracker
//!
//! Computes, per conditional field, the set of field names its rules read,
//! so the hosting reactive layer can subscribe to only those values and
//! bound re-evaluation cost to the field's dependents instead of the whole
//! snapshot. The interpreter stays pull-based: the host watches the
//! dependency set and asks for a fresh visibility decision when it
//! changes.

use std::collections::{BTreeSet, HashMap};

use formbldr_domain::{FieldDefinition, FieldKind};

/// The field names referenced by this field's conditional rules. Empty
/// when no conditions are configured - such a field is unconditionally
/// visible and needs no subscriptions at all.
pub fn dependencies_of(field: &FieldDefinition) -> BTreeSet<String> {
    match &field.conditions {
        None => BTreeSet::new(),
        Some(conditions) => conditions
            .rules
            .iter()
            .map(|rule| rule.field.clone())
            .collect(),
    }
}

/// Dependency sets for every field in the tree, keyed by field name.
/// Computed once at mount and memoized.
pub fn dependency_map(fields: &[FieldDefinition]) -> HashMap<String, BTreeSet<String>> {
    let mut map = HashMap::new();
    collect(fields, &mut map);
    map
}

fn collect(fields: &[FieldDefinition], out: &mut HashMap<String, BTreeSet<String>>) {
    for field in fields {
        out.insert(field.name.clone(), dependencies_of(field));
        if let FieldKind::Group { fields } = &field.kind {
            collect(fields, out);
        }
    }
}
