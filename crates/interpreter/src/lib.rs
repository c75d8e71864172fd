//! Formbldr Interpreter - the rule engine behind configuration-driven forms
//!
//! Turns a declarative field tree (from `formbldr-domain`) into:
//! - a flat defaults map, extracted once at mount
//! - a compiled validation schema, evaluated at submission time
//! - a live, per-render decision of whether each field is visible and how
//!   its value binds to the host's reactive state
//!
//! # Design Principles
//!
//! 1. **Pull-based** - the host's change-detection loop asks for fresh
//!    decisions when a watched value changes; nothing here subscribes or
//!    pushes
//! 2. **Total evaluation** - malformed rule data degrades to `false` with
//!    a diagnostic through the caller-supplied sink; only tree-shape
//!    violations at mount are fatal
//! 3. **Caller-owned state** - the interpreter reads the immutable tree
//!    and the caller's snapshot, and holds only derivations memoized at
//!    mount

pub mod binding;
pub mod dependencies;
pub mod diagnostics;
pub mod dispatch;
pub mod interpreter;
pub mod rules;
pub mod schema;
pub mod visibility;
pub mod walker;

pub use binding::{bind, needs_mediated_binding, BindingStrategy, FieldBinding};
pub use dependencies::{dependencies_of, dependency_map};
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, TracingSink};
pub use dispatch::{RendererFn, RendererRegistry};
pub use interpreter::FormInterpreter;
pub use rules::evaluate_rule;
pub use schema::{build_validation_schema, CompiledValidation, ValidationSchema};
pub use visibility::{is_visible, should_render};
pub use walker::{ensure_unique_names, extract_defaults, renderer_kinds};
