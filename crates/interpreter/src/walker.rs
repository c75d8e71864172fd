//! Field Tree Walker - default extraction and tree-shape checks
//!
//! Read-only, depth-first, pre-order traversals over the field tree,
//! respecting declaration order. Schema assembly, the walker's second
//! traversal, lives in [`crate::schema`].

use std::collections::HashSet;

use formbldr_domain::{ConfigError, FieldDefinition, FieldKind, RendererKind};
use serde_json::{Map, Value};

/// Extracts a flat defaults map from the tree. Group fields contribute
/// their own default (if any) and recurse; a later field never overwrites
/// an already-recorded default under the same name.
pub fn extract_defaults(fields: &[FieldDefinition]) -> Map<String, Value> {
    let mut defaults = Map::new();
    collect_defaults(fields, &mut defaults);
    defaults
}

fn collect_defaults(fields: &[FieldDefinition], out: &mut Map<String, Value>) {
    for field in fields {
        if let Some(value) = &field.default_value {
            out.entry(field.name.clone()).or_insert_with(|| value.clone());
        }
        if let FieldKind::Group { fields } = &field.kind {
            collect_defaults(fields, out);
        }
    }
}

/// Checks that every field name is unique across the whole tree. Fatal at
/// mount: duplicate names would alias into the same snapshot slot.
pub fn ensure_unique_names(fields: &[FieldDefinition]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    check_names(fields, &mut seen)
}

fn check_names<'a>(
    fields: &'a [FieldDefinition],
    seen: &mut HashSet<&'a str>,
) -> Result<(), ConfigError> {
    for field in fields {
        if !seen.insert(field.name.as_str()) {
            return Err(ConfigError::DuplicateFieldName(field.name.clone()));
        }
        if let FieldKind::Group { fields } = &field.kind {
            check_names(fields, seen)?;
        }
    }
    Ok(())
}

/// The set of renderer kinds the tree dispatches to, for the mount-time
/// registry coverage check.
pub fn renderer_kinds(fields: &[FieldDefinition]) -> HashSet<RendererKind> {
    let mut kinds = HashSet::new();
    collect_kinds(fields, &mut kinds);
    kinds
}

fn collect_kinds(fields: &[FieldDefinition], out: &mut HashSet<RendererKind>) {
    for field in fields {
        out.insert(field.kind.renderer());
        if let FieldKind::Group { fields } = &field.kind {
            collect_kinds(fields, out);
        }
    }
}
