//! Diagnostics channel
//!
//! Unknown rule types, wrong-shaped values, and missing renderer mappings
//! are reported through a caller-supplied sink, never thrown during
//! visibility evaluation. Evaluation degrades ("not matching", "not
//! rendered") and the form keeps working.

use std::sync::Mutex;

use formbldr_domain::RendererKind;

/// A non-fatal evaluation warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A rule whose `type` tag was not recognized; the rule evaluated to
    /// `false`
    UnknownRuleType {
        /// Dependency field named by the rule
        field: String,
    },
    /// A rule applied to a live value of the wrong shape (e.g. an array
    /// rule against a scalar); the rule evaluated to `false`
    RuleShapeMismatch {
        field: String,
        /// Wire name of the rule type
        rule: &'static str,
        /// Shape the rule is defined over
        expected: &'static str,
    },
    /// Dispatch found no renderer for a field's kind; the field was not
    /// rendered
    MissingRenderer { field: String, kind: RendererKind },
}

/// Caller-supplied destination for evaluation warnings.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// Default sink: structured warnings through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::UnknownRuleType { field } => {
                tracing::warn!(%field, "Unknown rule type - rule evaluates to false");
            }
            Diagnostic::RuleShapeMismatch {
                field,
                rule,
                expected,
            } => {
                tracing::warn!(
                    %field,
                    rule,
                    expected,
                    "Rule applied to a value of the wrong shape - rule evaluates to false"
                );
            }
            Diagnostic::MissingRenderer { field, kind } => {
                tracing::warn!(%field, %kind, "No renderer registered for field kind");
            }
        }
    }
}

/// Sink that collects diagnostics for later inspection (tests, batch
/// hosts that surface warnings in their own UI).
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains and returns everything collected so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        match self.diagnostics.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.diagnostics.lock().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: Diagnostic) {
        if let Ok(mut guard) = self.diagnostics.lock() {
            guard.push(diagnostic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_sink_drains() {
        let sink = CollectingSink::new();
        sink.report(Diagnostic::UnknownRuleType {
            field: "code".to_string(),
        });
        assert_eq!(sink.len(), 1);

        let collected = sink.take();
        assert_eq!(collected.len(), 1);
        assert!(sink.is_empty());
    }
}
