//! Inline-function suggestion engine.
//!
//! A single linear pipeline per compilation unit: scan declarations for
//! single-statement functions, match call sites back to them, build the
//! positional parameter→argument substitution, generate the inlined
//! replacement text, and report it as a diagnostic with a suggested fix.
//! The pipeline is stateless — each invocation takes an immutable program
//! snapshot and returns a list of suggestions.

pub mod analysis;
pub mod config;
pub mod error;
pub mod resolver;

pub use analysis::{InlineSuggestionPass, RewriteSuggestion};
pub use config::InlineOptions;
pub use error::InlineError;
pub use resolver::{Resolver, ScopeResolver};
