//! Mount facade
//!
//! Ties the interpreter together for one form configuration: fatal
//! tree-shape checks at mount, memoized derivations (defaults, compiled
//! schema, dependency sets), and the per-render operations (visibility,
//! binding, dispatch) plus submission-time validation.
//!
//! The mounted interpreter is stateless across calls: every operation is a
//! pure computation over the immutable tree and the caller's snapshot, so
//! one mounted form may be shared read-only across threads while each
//! instance owns its own snapshot.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use formbldr_domain::{ConfigError, FieldDefinition, FormConfig, ValidationFailure, ValueSnapshot};
use serde_json::{Map, Value};

use crate::binding::{bind, FieldBinding};
use crate::dependencies::dependency_map;
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::dispatch::RendererRegistry;
use crate::schema::{build_validation_schema, ValidationSchema};
use crate::visibility::is_visible;
use crate::walker::{ensure_unique_names, extract_defaults, renderer_kinds};

/// A mounted form: the immutable configuration plus everything derived
/// from it once at mount.
pub struct FormInterpreter<R> {
    config: FormConfig,
    renderers: RendererRegistry<R>,
    sink: Arc<dyn DiagnosticSink>,
    defaults: Map<String, Value>,
    schema: ValidationSchema,
    dependencies: HashMap<String, BTreeSet<String>>,
}

impl<R> std::fmt::Debug for FormInterpreter<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormInterpreter")
            .field("config", &self.config)
            .field("defaults", &self.defaults)
            .field("schema", &self.schema)
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}

impl<R> FormInterpreter<R> {
    /// Mounts a form with the default tracing diagnostic sink.
    pub fn mount(config: FormConfig, renderers: RendererRegistry<R>) -> Result<Self, ConfigError> {
        Self::mount_with_sink(config, renderers, Arc::new(TracingSink))
    }

    /// Mounts a form, running the fatal configuration checks: unique field
    /// names, renderer coverage for every kind the tree uses, and pattern
    /// compilation. On any failure the host must refuse to mount.
    pub fn mount_with_sink(
        config: FormConfig,
        renderers: RendererRegistry<R>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Result<Self, ConfigError> {
        ensure_unique_names(&config.fields)?;
        renderers.ensure_covers(&renderer_kinds(&config.fields))?;
        let schema = build_validation_schema(&config.fields, &config.cross_field_validations)?;
        let defaults = extract_defaults(&config.fields);
        let dependencies = dependency_map(&config.fields);

        Ok(Self {
            config,
            renderers,
            sink,
            defaults,
            schema,
            dependencies,
        })
    }

    /// Top-level fields of the mounted tree.
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.config.fields
    }

    /// Flat defaults map extracted once at mount, for seeding the host's
    /// form state.
    pub fn defaults(&self) -> &Map<String, Value> {
        &self.defaults
    }

    /// The compiled validation schema.
    pub fn schema(&self) -> &ValidationSchema {
        &self.schema
    }

    /// Memoized dependency set for a field, by name. The host subscribes
    /// to exactly these values to know when the field's visibility can
    /// change; an empty set means the field is unconditionally visible.
    pub fn dependencies_of(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.dependencies.get(name)
    }

    /// Visibility decision for one field against the current snapshot.
    pub fn is_visible(&self, field: &FieldDefinition, snapshot: &ValueSnapshot) -> bool {
        is_visible(field, snapshot, self.sink.as_ref())
    }

    /// The active binding for one field at the current snapshot.
    pub fn binding(&self, field: &FieldDefinition, snapshot: &ValueSnapshot) -> FieldBinding {
        bind(field, snapshot)
    }

    /// Bindings for every visible field, depth-first in declaration
    /// order. A hidden group hides its entire subtree.
    pub fn visible_bindings(&self, snapshot: &ValueSnapshot) -> Vec<FieldBinding> {
        let mut bindings = Vec::new();
        self.collect_visible(&self.config.fields, snapshot, &mut bindings);
        bindings
    }

    fn collect_visible(
        &self,
        fields: &[FieldDefinition],
        snapshot: &ValueSnapshot,
        out: &mut Vec<FieldBinding>,
    ) {
        for field in fields {
            if !self.is_visible(field, snapshot) {
                continue;
            }
            out.push(self.binding(field, snapshot));
            if let Some(children) = field.children() {
                self.collect_visible(children, snapshot, out);
            }
        }
    }

    /// Renders one field: visibility gate, then dispatch. `None` means
    /// "not rendered" - either hidden by its conditions or (degenerately)
    /// missing a renderer, which is also reported as a diagnostic.
    pub fn render(&self, field: &FieldDefinition, snapshot: &ValueSnapshot) -> Option<R> {
        if !self.is_visible(field, snapshot) {
            return None;
        }
        self.renderers.dispatch(field, self.sink.as_ref())
    }

    /// Submission-time validation: per-field constraints plus cross-field
    /// validators, reported together as structured failures.
    pub fn validate(&self, snapshot: &ValueSnapshot) -> Vec<ValidationFailure> {
        self.schema.validate(snapshot)
    }
}
