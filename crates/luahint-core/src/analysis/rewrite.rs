//! Rewrite generation.
//!
//! Extracts the payload expression from a candidate's single statement,
//! applies the substitution by tree-cloning into the arena, and serializes
//! the result through the pretty-printer. Substitution is simultaneous over
//! the original payload: identifiers carried in by argument subtrees are
//! never substituted again.

use crate::analysis::call_sites::MatchedCall;
use crate::analysis::side_effect::SideEffectOracle;
use crate::analysis::substitution::Substitution;
use crate::analysis::RewriteSuggestion;
use crate::config::InlineOptions;
use crate::error::InlineError;
use bumpalo::Bump;
use luahint_syntax::ast::expression::{Argument, Expression, ExpressionKind, TableField};
use luahint_syntax::ast::statement::{FunctionDeclaration, Statement};
use luahint_syntax::printer;
use luahint_syntax::string_interner::{StringId, StringInterner};
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;
use tracing::debug;

/// The expression a candidate's single statement wraps: the returned value
/// of a single-value `return`, or the expression of an expression statement.
/// Every other statement kind has no payload.
pub fn payload_expression<'a>(
    declaration: &'a FunctionDeclaration<'a>,
) -> Option<&'a Expression<'a>> {
    match declaration.body.statements {
        [Statement::Return(ret)] => match ret.values {
            [value] => Some(value),
            _ => None,
        },
        [Statement::Expression(expression)] => Some(expression),
        _ => None,
    }
}

/// Clone `expr` into `arena`, replacing every leaf identifier that names a
/// parameter with the corresponding argument subtree.
pub fn substitute<'a>(
    arena: &'a Bump,
    expr: &Expression<'a>,
    substitution: &Substitution<'a>,
) -> Expression<'a> {
    let kind = match &expr.kind {
        ExpressionKind::Identifier(name) => {
            if let Some(argument) = substitution.get(*name) {
                return argument.clone();
            }
            ExpressionKind::Identifier(*name)
        }
        ExpressionKind::Literal(literal) => ExpressionKind::Literal(literal.clone()),
        ExpressionKind::Binary(op, left, right) => ExpressionKind::Binary(
            *op,
            arena.alloc(substitute(arena, left, substitution)),
            arena.alloc(substitute(arena, right, substitution)),
        ),
        ExpressionKind::Unary(op, operand) => {
            ExpressionKind::Unary(*op, arena.alloc(substitute(arena, operand, substitution)))
        }
        ExpressionKind::Call(callee, arguments) => ExpressionKind::Call(
            arena.alloc(substitute(arena, callee, substitution)),
            substitute_arguments(arena, arguments, substitution),
        ),
        ExpressionKind::MethodCall(object, method, arguments) => ExpressionKind::MethodCall(
            arena.alloc(substitute(arena, object, substitution)),
            *method,
            substitute_arguments(arena, arguments, substitution),
        ),
        ExpressionKind::Member(object, field) => ExpressionKind::Member(
            arena.alloc(substitute(arena, object, substitution)),
            *field,
        ),
        ExpressionKind::Index(object, key) => ExpressionKind::Index(
            arena.alloc(substitute(arena, object, substitution)),
            arena.alloc(substitute(arena, key, substitution)),
        ),
        ExpressionKind::Table(fields) => {
            let fields: Vec<TableField<'a>> = fields
                .iter()
                .map(|field| match field {
                    TableField::Item(value) => {
                        TableField::Item(substitute(arena, value, substitution))
                    }
                    TableField::Named(name, value) => {
                        TableField::Named(*name, substitute(arena, value, substitution))
                    }
                    TableField::Keyed(key, value) => TableField::Keyed(
                        substitute(arena, key, substitution),
                        substitute(arena, value, substitution),
                    ),
                })
                .collect();
            ExpressionKind::Table(arena.alloc_slice_clone(&fields))
        }
        ExpressionKind::Parenthesized(inner) => {
            ExpressionKind::Parenthesized(arena.alloc(substitute(arena, inner, substitution)))
        }
    };
    Expression::new(kind, expr.span)
}

fn substitute_arguments<'a>(
    arena: &'a Bump,
    arguments: &[Argument<'a>],
    substitution: &Substitution<'a>,
) -> &'a [Argument<'a>] {
    let arguments: Vec<Argument<'a>> = arguments
        .iter()
        .map(|argument| Argument {
            value: substitute(arena, &argument.value, substitution),
            span: argument.span,
        })
        .collect();
    arena.alloc_slice_clone(&arguments)
}

/// How often each substituted parameter occurs as a leaf identifier.
pub fn parameter_use_counts(
    payload: &Expression<'_>,
    substitution: &Substitution<'_>,
) -> FxHashMap<StringId, usize> {
    let mut counts: FxHashMap<StringId, usize> =
        substitution.iter().map(|(name, _)| (name, 0)).collect();
    count_uses(payload, &mut counts);
    counts
}

fn count_uses(expr: &Expression<'_>, counts: &mut FxHashMap<StringId, usize>) {
    match &expr.kind {
        ExpressionKind::Identifier(name) => {
            if let Some(count) = counts.get_mut(name) {
                *count += 1;
            }
        }
        ExpressionKind::Literal(_) => {}
        ExpressionKind::Binary(_, left, right) => {
            count_uses(left, counts);
            count_uses(right, counts);
        }
        ExpressionKind::Unary(_, operand) => count_uses(operand, counts),
        ExpressionKind::Call(callee, arguments) => {
            count_uses(callee, counts);
            for argument in *arguments {
                count_uses(&argument.value, counts);
            }
        }
        ExpressionKind::MethodCall(object, _, arguments) => {
            count_uses(object, counts);
            for argument in *arguments {
                count_uses(&argument.value, counts);
            }
        }
        ExpressionKind::Member(object, _) => count_uses(object, counts),
        ExpressionKind::Index(object, key) => {
            count_uses(object, counts);
            count_uses(key, counts);
        }
        ExpressionKind::Table(fields) => {
            for field in *fields {
                match field {
                    TableField::Item(value) | TableField::Named(_, value) => {
                        count_uses(value, counts);
                    }
                    TableField::Keyed(key, value) => {
                        count_uses(key, counts);
                        count_uses(value, counts);
                    }
                }
            }
        }
        ExpressionKind::Parenthesized(inner) => count_uses(inner, counts),
    }
}

/// Collect every identifier that occurs in variable position. Member fields
/// and method names are not variables and are excluded.
pub fn free_identifiers(expr: &Expression<'_>, out: &mut FxHashSet<StringId>) {
    match &expr.kind {
        ExpressionKind::Identifier(name) => {
            out.insert(*name);
        }
        ExpressionKind::Literal(_) => {}
        ExpressionKind::Binary(_, left, right) => {
            free_identifiers(left, out);
            free_identifiers(right, out);
        }
        ExpressionKind::Unary(_, operand) => free_identifiers(operand, out),
        ExpressionKind::Call(callee, arguments) => {
            free_identifiers(callee, out);
            for argument in *arguments {
                free_identifiers(&argument.value, out);
            }
        }
        ExpressionKind::MethodCall(object, _, arguments) => {
            free_identifiers(object, out);
            for argument in *arguments {
                free_identifiers(&argument.value, out);
            }
        }
        ExpressionKind::Member(object, _) => free_identifiers(object, out),
        ExpressionKind::Index(object, key) => {
            free_identifiers(object, out);
            free_identifiers(key, out);
        }
        ExpressionKind::Table(fields) => {
            for field in *fields {
                match field {
                    TableField::Item(value) | TableField::Named(_, value) => {
                        free_identifiers(value, out);
                    }
                    TableField::Keyed(key, value) => {
                        free_identifiers(key, out);
                        free_identifiers(value, out);
                    }
                }
            }
        }
        ExpressionKind::Parenthesized(inner) => free_identifiers(inner, out),
    }
}

/// Produces replacement text for matched call sites.
pub struct RewriteGenerator {
    interner: Arc<StringInterner>,
    options: InlineOptions,
    oracle: SideEffectOracle,
}

impl RewriteGenerator {
    pub fn new(interner: Arc<StringInterner>, options: InlineOptions) -> Self {
        let oracle = SideEffectOracle::new(interner.clone());
        Self {
            interner,
            options,
            oracle,
        }
    }

    /// Build the suggestion for one matched call, or `None` when the call is
    /// not rewrite-eligible. `Err` is reserved for printer failures and
    /// upstream invariant violations.
    pub fn generate<'a>(
        &self,
        arena: &'a Bump,
        matched: &MatchedCall<'a>,
        substitution: &Substitution<'a>,
    ) -> Result<Option<RewriteSuggestion>, InlineError> {
        let Some(payload) = payload_expression(matched.declaration) else {
            debug!(name = ?matched.name.node, "single statement has no payload expression");
            return Ok(None);
        };
        if self.options.require_pure_arguments && !self.arguments_safe(payload, substitution) {
            debug!(
                name = ?matched.name.node,
                "argument would be duplicated or dropped and is not provably pure"
            );
            return Ok(None);
        }
        if self.options.check_capture && self.captures(payload, matched, substitution) {
            debug!(
                name = ?matched.name.node,
                "payload free variable is shadowed at the call site"
            );
            return Ok(None);
        }
        let inlined = substitute(arena, payload, substitution);
        let replacement = printer::expression_to_source(&inlined, &self.interner)?;
        Ok(Some(RewriteSuggestion {
            range: matched.call.span,
            replacement,
        }))
    }

    /// Every parameter referenced a number of times ≠ 1 must carry a pure
    /// argument.
    fn arguments_safe(&self, payload: &Expression<'_>, substitution: &Substitution<'_>) -> bool {
        let counts = parameter_use_counts(payload, substitution);
        substitution.iter().all(|(name, argument)| {
            counts.get(&name).copied().unwrap_or(0) == 1 || self.oracle.is_pure(argument)
        })
    }

    /// Does any free variable of the payload collide with a name bound at
    /// the call site? Substituted parameters are no longer free.
    fn captures(
        &self,
        payload: &Expression<'_>,
        matched: &MatchedCall<'_>,
        substitution: &Substitution<'_>,
    ) -> bool {
        let mut free = FxHashSet::default();
        free_identifiers(payload, &mut free);
        free.iter()
            .any(|name| !substitution.contains(*name) && matched.bound_names.contains(name))
    }
}
