//! Canonical expression-to-source serialization.
//!
//! Rewritten expression trees have to come back out as valid, idiomatically
//! formatted source text. The printer works from the tree shape alone:
//! single spaces around binary operators, `", "` between arguments, and
//! parentheses only where precedence requires them — `x + y` stays bare,
//! while an `x + 1` subtree under a multiplication prints as `(x + 1) * 2`.

mod expressions;

use crate::ast::expression::Expression;
use crate::string_interner::{StringId, StringInterner};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PrintError {
    /// The tree references an identifier this interner has never seen.
    #[error("unresolved identifier {0:?} in expression tree")]
    UnresolvedSymbol(StringId),
    /// Infinities and NaN have no literal source form.
    #[error("non-finite number has no source form")]
    NonFiniteNumber,
}

pub struct PrettyPrinter {
    output: String,
    interner: Arc<StringInterner>,
}

impl PrettyPrinter {
    pub fn new(interner: Arc<StringInterner>) -> Self {
        Self {
            output: String::new(),
            interner,
        }
    }

    /// Serialize one expression to canonical source text.
    pub fn expression_to_string(&mut self, expr: &Expression<'_>) -> Result<String, PrintError> {
        self.output.clear();
        self.print_expression(expr)?;
        Ok(std::mem::take(&mut self.output))
    }

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn resolve(&self, id: StringId) -> Result<String, PrintError> {
        self.interner
            .resolve(id)
            .ok_or(PrintError::UnresolvedSymbol(id))
    }
}

/// One-shot convenience over [`PrettyPrinter`].
pub fn expression_to_source(
    expr: &Expression<'_>,
    interner: &Arc<StringInterner>,
) -> Result<String, PrintError> {
    PrettyPrinter::new(interner.clone()).expression_to_string(expr)
}
