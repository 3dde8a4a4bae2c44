//! Arena-allocated program representation.
//!
//! Nodes borrow from a `bumpalo` arena owned by the caller; the tree is a
//! read-only snapshot once built. Analyses never mutate it — rewrites are
//! expressed as fresh nodes allocated into the same arena.

pub mod expression;
pub mod statement;

use crate::span::Span;
use crate::string_interner::StringId;
use statement::Statement;

/// An identifier occurrence: interned name plus its source span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ident {
    pub node: StringId,
    pub span: Span,
}

impl Ident {
    pub fn new(node: StringId, span: Span) -> Self {
        Self { node, span }
    }
}

/// Nodes that carry a source span.
pub trait Spanned {
    fn span(&self) -> Span;
}

impl Spanned for Ident {
    fn span(&self) -> Span {
        self.span
    }
}

/// One compilation unit.
#[derive(Debug, Clone)]
pub struct Program<'a> {
    pub statements: &'a [Statement<'a>],
    pub span: Span,
}

impl Spanned for Program<'_> {
    fn span(&self) -> Span {
        self.span
    }
}
