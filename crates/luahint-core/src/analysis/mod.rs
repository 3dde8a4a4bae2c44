//! The inline-function suggestion pipeline.
//!
//! One linear pass per compilation unit:
//!
//! 1. scan declarations for single-statement functions
//! 2. match call sites back to those declarations
//! 3. build the positional parameter→argument substitution
//! 4. generate the inlined replacement text
//! 5. emit each replacement as a hint diagnostic with a suggested fix
//!
//! Nothing here mutates the input tree, and nothing is shared between
//! invocations — running the pass over several units concurrently only
//! requires constructing one pass instance per unit.

mod call_sites;
mod candidates;
mod rewrite;
mod side_effect;
mod substitution;

pub use call_sites::{collect_matched_calls, MatchedCall};
pub use candidates::{is_candidate, CandidateSet};
pub use rewrite::{free_identifiers, payload_expression, substitute, RewriteGenerator};
pub use side_effect::SideEffectOracle;
pub use substitution::Substitution;

use crate::config::InlineOptions;
use crate::error::InlineError;
use crate::resolver::{Resolver, ScopeResolver};
use bumpalo::Bump;
use luahint_syntax::ast::Program;
use luahint_syntax::diagnostics::{Diagnostic, DiagnosticHandler, SuggestedFix, TextEdit};
use luahint_syntax::span::Span;
use luahint_syntax::string_interner::StringInterner;
use std::sync::Arc;
use tracing::{debug, error};

/// A proposed text replacement for one call site.
#[derive(Debug, Clone, PartialEq)]
pub struct RewriteSuggestion {
    /// Exact span of the original call expression, including arguments.
    pub range: Span,
    /// Canonical source text of the inlined payload.
    pub replacement: String,
}

pub struct InlineSuggestionPass {
    interner: Arc<StringInterner>,
    handler: Arc<dyn DiagnosticHandler>,
    options: InlineOptions,
}

impl InlineSuggestionPass {
    pub fn new(interner: Arc<StringInterner>, handler: Arc<dyn DiagnosticHandler>) -> Self {
        Self {
            interner,
            handler,
            options: InlineOptions::default(),
        }
    }

    pub fn with_options(mut self, options: InlineOptions) -> Self {
        self.options = options;
        self
    }

    /// Run over one unit with the built-in same-unit resolver. Substituted
    /// subtrees are allocated into `arena`, which is typically the arena the
    /// program itself lives in.
    pub fn run<'a>(&self, program: &Program<'a>, arena: &'a Bump) -> Vec<RewriteSuggestion> {
        let resolver = ScopeResolver::from_program(program);
        self.run_with_resolver(program, arena, &resolver)
    }

    /// Run with a host-supplied resolver.
    pub fn run_with_resolver<'a>(
        &self,
        program: &Program<'a>,
        arena: &'a Bump,
        resolver: &dyn Resolver<'a>,
    ) -> Vec<RewriteSuggestion> {
        let candidates = CandidateSet::collect(program);
        let matched = collect_matched_calls(program, resolver, &candidates);
        debug!(
            candidates = candidates.len(),
            matched = matched.len(),
            "scanned unit"
        );

        let generator = RewriteGenerator::new(self.interner.clone(), self.options);
        let mut suggestions = Vec::new();
        for call in &matched {
            let substitution = match Substitution::build(call.declaration, call.arguments) {
                Ok(substitution) => substitution,
                Err(InlineError::ArityMismatch { expected, found }) => {
                    debug_assert!(
                        false,
                        "matcher let an arity mismatch through ({expected} parameters, {found} arguments)"
                    );
                    error!(
                        expected,
                        found, "dropping call site: arity mismatch after matching"
                    );
                    continue;
                }
                Err(err) => {
                    debug!(%err, "skipping call site");
                    continue;
                }
            };
            match generator.generate(arena, call, &substitution) {
                Ok(Some(suggestion)) => {
                    self.report(call, &suggestion);
                    suggestions.push(suggestion);
                }
                Ok(None) => {}
                Err(err) => {
                    debug!(%err, "no rewrite produced for call site");
                }
            }
        }
        suggestions
    }

    fn report(&self, call: &MatchedCall<'_>, suggestion: &RewriteSuggestion) {
        let name = self
            .interner
            .resolve(call.name.node)
            .unwrap_or_else(|| "?".to_string());
        let diagnostic = Diagnostic::hint(
            suggestion.range,
            format!("function '{name}' can be inlined"),
        )
        .with_fix(SuggestedFix {
            message: format!("Inline call to '{name}'"),
            edits: vec![TextEdit {
                range: suggestion.range,
                new_text: suggestion.replacement.clone(),
            }],
        });
        self.handler.report(diagnostic);
    }
}
