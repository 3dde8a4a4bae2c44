//! Positional parameter→argument substitution.

use crate::error::InlineError;
use indexmap::IndexMap;
use luahint_syntax::ast::expression::{Argument, Expression};
use luahint_syntax::ast::statement::FunctionDeclaration;
use luahint_syntax::string_interner::StringId;

/// Maps each parameter name of one matched call to the argument expression
/// supplied for it. Built positionally; insertion order is parameter order.
pub struct Substitution<'a> {
    map: IndexMap<StringId, &'a Expression<'a>>,
}

impl<'a> Substitution<'a> {
    /// Build the mapping `parameters[i] -> arguments[i]`.
    ///
    /// The matcher has already filtered arity mismatches, so seeing one here
    /// means a matcher bug, not bad input.
    pub fn build(
        declaration: &'a FunctionDeclaration<'a>,
        arguments: &'a [Argument<'a>],
    ) -> Result<Self, InlineError> {
        if arguments.len() != declaration.parameters.len() {
            return Err(InlineError::ArityMismatch {
                expected: declaration.parameters.len(),
                found: arguments.len(),
            });
        }
        let mut map = IndexMap::with_capacity(arguments.len());
        for (parameter, argument) in declaration.parameters.iter().zip(arguments) {
            if map.insert(parameter.name.node, &argument.value).is_some() {
                return Err(InlineError::DuplicateParameter(parameter.name.node));
            }
        }
        Ok(Substitution { map })
    }

    pub fn get(&self, name: StringId) -> Option<&'a Expression<'a>> {
        self.map.get(&name).copied()
    }

    pub fn contains(&self, name: StringId) -> bool {
        self.map.contains_key(&name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StringId, &'a Expression<'a>)> + '_ {
        self.map.iter().map(|(name, expr)| (*name, *expr))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
