//! Formbldr Domain - Field model, conditional rules, and validation descriptors
//!
//! This crate contains the declarative data model for configuration-driven
//! forms:
//! - The field tree (leaf inputs and nested groups)
//! - Conditional visibility rules and their combination logic
//! - Validation constraint descriptors and the custom validator registry
//! - Declarative value transforms (display <-> storage)
//! - The value snapshot supplied by the hosting form-state layer
//!
//! # Design Principles
//!
//! 1. **Wire data** - The field tree is serializable configuration; every
//!    type here round-trips through serde with camelCase naming
//! 2. **No evaluation logic** - Rule evaluation, schema assembly, and
//!    binding selection live in `formbldr-interpreter`
//! 3. **Caller-owned values** - The snapshot's lifecycle belongs to the
//!    hosting reactive layer; this crate only defines its shape

pub mod conditions;
pub mod error;
pub mod fields;
pub mod snapshot;
pub mod transform;
pub mod validation;

pub use conditions::{ConditionLogic, ConditionalRule, FieldConditions, RuleKind};
pub use error::ConfigError;
pub use fields::{
    FieldDefinition, FieldHint, FieldKind, FormConfig, HintKind, InputType, RendererKind,
};
pub use snapshot::ValueSnapshot;
pub use transform::ValueTransform;
pub use validation::{
    Constraint, CrossFieldPredicate, CrossFieldValidation, CustomValidator, FieldValidation,
    ValidationFailure,
};
