//! Render Dispatcher
//!
//! Maps a field's kind to the function that produces UI output. The
//! mapping must be total for every kind a mounted tree uses; coverage is
//! checked at mount, so a miss there is a fatal configuration error. The
//! dispatch contract still degrades gracefully: a render-time miss yields
//! `None` plus a diagnostic instead of crashing the host.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use formbldr_domain::{ConfigError, FieldDefinition, RendererKind};

use crate::diagnostics::{Diagnostic, DiagnosticSink};

/// A renderer producing the host's UI output type for one field.
pub type RendererFn<R> = Arc<dyn Fn(&FieldDefinition) -> R + Send + Sync>;

/// Registry from field kind to renderer.
pub struct RendererRegistry<R> {
    renderers: HashMap<RendererKind, RendererFn<R>>,
}

impl<R> RendererRegistry<R> {
    pub fn new() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// Registers a renderer for a kind, replacing any previous one.
    pub fn register(
        mut self,
        kind: RendererKind,
        renderer: impl Fn(&FieldDefinition) -> R + Send + Sync + 'static,
    ) -> Self {
        self.renderers.insert(kind, Arc::new(renderer));
        self
    }

    pub fn covers(&self, kind: RendererKind) -> bool {
        self.renderers.contains_key(&kind)
    }

    /// Mount-time coverage check: every kind the tree uses must have a
    /// renderer. The first missing kind is reported; the host must refuse
    /// to mount.
    pub fn ensure_covers(&self, kinds: &HashSet<RendererKind>) -> Result<(), ConfigError> {
        let mut required: Vec<RendererKind> = kinds.iter().copied().collect();
        required.sort_by_key(|kind| kind.to_string());
        for kind in required {
            if !self.covers(kind) {
                return Err(ConfigError::MissingRenderer(kind));
            }
        }
        Ok(())
    }

    /// Dispatches a field to its renderer. A missing mapping degrades to
    /// `None` with a diagnostic.
    pub fn dispatch(&self, field: &FieldDefinition, sink: &dyn DiagnosticSink) -> Option<R> {
        let kind = field.kind.renderer();
        match self.renderers.get(&kind) {
            Some(renderer) => Some(renderer(field)),
            None => {
                sink.report(Diagnostic::MissingRenderer {
                    field: field.name.clone(),
                    kind,
                });
                None
            }
        }
    }
}

impl<R> Default for RendererRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for RendererRegistry<R> {
    fn clone(&self) -> Self {
        Self {
            renderers: self.renderers.clone(),
        }
    }
}

impl<R> fmt::Debug for RendererRegistry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("kinds", &self.renderers.keys().collect::<Vec<_>>())
            .finish()
    }
}
