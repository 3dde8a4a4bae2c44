//! Diagnostic reporting plumbing.
//!
//! Analyses hand [`Diagnostic`] records to a [`DiagnosticHandler`]; the
//! handler decides what to do with them (collect, print, forward to an
//! editor). A diagnostic may carry suggested fixes — concrete text edits a
//! host can apply verbatim. All records serialize to camelCase JSON so they
//! can cross an LSP-style boundary unchanged.

use crate::span::Span;
use parking_lot::Mutex;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Error,
    Warning,
    Hint,
}

/// One replacement of a source range with new text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextEdit {
    pub range: Span,
    pub new_text: String,
}

/// A proposed fix: a human-readable message plus the edits that apply it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedFix {
    pub message: String,
    pub edits: Vec<TextEdit>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub range: Span,
    pub message: String,
    pub suggested_fixes: Vec<SuggestedFix>,
}

impl Diagnostic {
    pub fn new(level: DiagnosticLevel, range: Span, message: impl Into<String>) -> Self {
        Self {
            level,
            range,
            message: message.into(),
            suggested_fixes: Vec::new(),
        }
    }

    pub fn error(range: Span, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Error, range, message)
    }

    pub fn warning(range: Span, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Warning, range, message)
    }

    pub fn hint(range: Span, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Hint, range, message)
    }

    pub fn with_fix(mut self, fix: SuggestedFix) -> Self {
        self.suggested_fixes.push(fix);
        self
    }
}

/// Sink for diagnostics produced during analysis.
pub trait DiagnosticHandler: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);

    fn error(&self, range: Span, message: &str) {
        self.report(Diagnostic::error(range, message));
    }

    fn warning(&self, range: Span, message: &str) {
        self.report(Diagnostic::warning(range, message));
    }

    fn hint(&self, range: Span, message: &str) {
        self.report(Diagnostic::hint(range, message));
    }
}

/// Handler that accumulates diagnostics in memory, for tests and batch hosts.
#[derive(Default)]
pub struct CollectingDiagnosticHandler {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingDiagnosticHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().clone()
    }

    /// Drain the collected diagnostics.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.lock())
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .lock()
            .iter()
            .any(|d| d.level == DiagnosticLevel::Error)
    }

    pub fn len(&self) -> usize {
        self.diagnostics.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticHandler for CollectingDiagnosticHandler {
    fn report(&self, diagnostic: Diagnostic) {
        self.diagnostics.lock().push(diagnostic);
    }
}
