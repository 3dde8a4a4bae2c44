//! Conservative purity classification for argument expressions.
//!
//! Inlining duplicates (or drops) argument text whenever a parameter is not
//! referenced exactly once, which is only sound when re-evaluating the
//! argument cannot be observed. The oracle answers that question
//! pessimistically:
//!
//! - literals, identifiers, member/index access, operators over pure
//!   operands: pure
//! - table constructors: impure — each evaluation allocates a fresh table
//! - calls: pure only for known-pure builtins over pure arguments
//! - method calls: always impure

use luahint_syntax::ast::expression::{Expression, ExpressionKind};
use luahint_syntax::string_interner::{StringId, StringInterner};
use rustc_hash::FxHashSet;
use std::sync::Arc;

/// Builtins whose calls are observationally pure.
const KNOWN_PURE_BUILTINS: &[&str] = &[
    "math.abs",
    "math.ceil",
    "math.floor",
    "math.max",
    "math.min",
    "math.sqrt",
    "math.sin",
    "math.cos",
    "math.tan",
    "math.exp",
    "math.log",
    "math.fmod",
    "string.sub",
    "string.len",
    "string.byte",
    "string.char",
    "string.rep",
    "string.reverse",
    "string.format",
    "string.upper",
    "string.lower",
    "table.concat",
    "type",
    "tostring",
    "tonumber",
    "select",
    "rawget",
    "rawlen",
    "rawequal",
];

pub struct SideEffectOracle {
    interner: Arc<StringInterner>,
    known_pure: FxHashSet<StringId>,
}

impl SideEffectOracle {
    pub fn new(interner: Arc<StringInterner>) -> Self {
        let known_pure = KNOWN_PURE_BUILTINS
            .iter()
            .map(|name| interner.get_or_intern(name))
            .collect();
        Self {
            interner,
            known_pure,
        }
    }

    /// True when duplicating or dropping `expr` cannot change observable
    /// behavior.
    pub fn is_pure(&self, expr: &Expression<'_>) -> bool {
        match &expr.kind {
            ExpressionKind::Literal(_) | ExpressionKind::Identifier(_) => true,
            ExpressionKind::Unary(_, operand) => self.is_pure(operand),
            ExpressionKind::Binary(_, left, right) => self.is_pure(left) && self.is_pure(right),
            ExpressionKind::Member(object, _) => self.is_pure(object),
            ExpressionKind::Index(object, key) => self.is_pure(object) && self.is_pure(key),
            ExpressionKind::Parenthesized(inner) => self.is_pure(inner),
            ExpressionKind::Table(_) => false,
            ExpressionKind::MethodCall(_, _, _) => false,
            ExpressionKind::Call(callee, arguments) => {
                self.is_known_pure_callee(callee)
                    && arguments.iter().all(|argument| self.is_pure(&argument.value))
            }
        }
    }

    fn is_known_pure_callee(&self, callee: &Expression<'_>) -> bool {
        match &callee.kind {
            ExpressionKind::Identifier(name) => self.known_pure.contains(name),
            // module.function form, e.g. math.floor
            ExpressionKind::Member(object, member) => match &object.kind {
                ExpressionKind::Identifier(base) => self
                    .qualified_name(*base, member.node)
                    .is_some_and(|id| self.known_pure.contains(&id)),
                _ => false,
            },
            _ => false,
        }
    }

    fn qualified_name(&self, base: StringId, member: StringId) -> Option<StringId> {
        let base = self.interner.resolve(base)?;
        let member = self.interner.resolve(member)?;
        self.interner.get(&format!("{base}.{member}"))
    }
}
