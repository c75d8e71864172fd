//! Field Model - the declarative form tree
//!
//! One `FieldDefinition` describes one form field or field group. The tree
//! is immutable from the interpreter's point of view: the interpreter reads
//! it and a separately-owned value snapshot, and never mutates either.
//!
//! # Design Philosophy
//!
//! - **Config-driven rendering**: the host renders whatever the tree
//!   declares, without form-specific knowledge
//! - **Field-level granularity**: each field carries its own validation,
//!   conditions, transform, and default
//! - **Closed kind tags**: the `kind` discriminator is a closed enum, so a
//!   renderer mapping can be checked exhaustively at mount

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::conditions::FieldConditions;
use crate::transform::ValueTransform;
use crate::validation::{CrossFieldValidation, FieldValidation};

/// One node in the declarative form tree (leaf input or group).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Unique key within the tree (uniqueness enforced at mount)
    pub name: String,
    /// Display label
    pub label: String,
    /// Styling hint, opaque to the interpreter
    #[serde(default)]
    pub css_class: Option<String>,
    /// Inline help display metadata, opaque to the interpreter
    #[serde(default)]
    pub hint: Option<FieldHint>,
    /// Validation constraints for this field
    #[serde(default)]
    pub validation: Option<FieldValidation>,
    /// Display <-> storage transform; presence forces a mediated binding
    #[serde(default)]
    pub transform: Option<ValueTransform>,
    /// Visibility conditions; absent means unconditionally visible
    #[serde(default)]
    pub conditions: Option<FieldConditions>,
    /// Initial value extracted into the defaults map at mount
    #[serde(default)]
    pub default_value: Option<Value>,
    /// The field variant, discriminated by the `kind` tag
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldDefinition {
    /// Child fields, for group nodes.
    pub fn children(&self) -> Option<&[FieldDefinition]> {
        match &self.kind {
            FieldKind::Group { fields } => Some(fields),
            _ => None,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, FieldKind::Group { .. })
    }
}

/// Field variants. Leaf kinds carry presentation-only discriminators;
/// groups nest arbitrarily deep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum FieldKind {
    /// Single-line input
    #[serde(rename_all = "camelCase")]
    Input { input_type: InputType },
    /// Date picker (date only)
    Date,
    /// Date and time picker
    Datetime,
    /// Ordered group of child fields
    #[serde(rename_all = "camelCase")]
    Group { fields: Vec<FieldDefinition> },
}

impl FieldKind {
    /// The renderer this kind dispatches to.
    pub fn renderer(&self) -> RendererKind {
        match self {
            FieldKind::Input { .. } => RendererKind::Input,
            FieldKind::Date => RendererKind::Date,
            FieldKind::Datetime => RendererKind::Datetime,
            FieldKind::Group { .. } => RendererKind::Group,
        }
    }
}

/// Presentation discriminator for input fields. Opaque to the interpreter
/// beyond renderer dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    Text,
    Email,
    Number,
    Password,
}

/// Renderer slot a field dispatches to. Every kind present in a mounted
/// tree must have a registered renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RendererKind {
    Input,
    Date,
    Datetime,
    Group,
}

impl fmt::Display for RendererKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RendererKind::Input => "input",
            RendererKind::Date => "date",
            RendererKind::Datetime => "datetime",
            RendererKind::Group => "group",
        };
        f.write_str(name)
    }
}

/// Inline help metadata for a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldHint {
    pub kind: HintKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintKind {
    Info,
    Warning,
}

/// A complete form configuration: the field tree plus schema-level
/// cross-field validations.
///
/// The field tree is wire data; cross-field validations carry injected
/// predicates and are registered programmatically.
#[derive(Debug, Clone, Default)]
pub struct FormConfig {
    pub fields: Vec<FieldDefinition>,
    pub cross_field_validations: Vec<CrossFieldValidation>,
}

impl FormConfig {
    pub fn new(fields: Vec<FieldDefinition>) -> Self {
        Self {
            fields,
            cross_field_validations: Vec::new(),
        }
    }

    pub fn with_cross_field_validation(mut self, validation: CrossFieldValidation) -> Self {
        self.cross_field_validations.push(validation);
        self
    }
}
