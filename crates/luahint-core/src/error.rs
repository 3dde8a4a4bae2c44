use luahint_syntax::printer::PrintError;
use luahint_syntax::string_interner::StringId;
use thiserror::Error;

/// Errors raised while building a rewrite for a matched call site.
///
/// None of these surface to users as diagnostics: duplicate parameters make
/// the call site a non-match, an arity mismatch marks a matcher bug, and a
/// print failure just withholds the suggestion.
#[derive(Debug, Error)]
pub enum InlineError {
    /// The matcher filters arity mismatches; one reaching the substitution
    /// builder is an internal invariant violation.
    #[error("argument count {found} does not match parameter count {expected}")]
    ArityMismatch { expected: usize, found: usize },

    /// The declaration binds the same parameter name twice.
    #[error("duplicate parameter {0:?} in declaration")]
    DuplicateParameter(StringId),

    #[error(transparent)]
    Print(#[from] PrintError),
}
