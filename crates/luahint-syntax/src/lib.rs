//! Program representation and shared tooling for luahint analyses:
//! spans, string interning, the arena-allocated AST, diagnostics, and the
//! canonical pretty-printer.

pub mod ast;
pub mod diagnostics;
pub mod printer;
pub mod span;
pub mod string_interner;

pub use diagnostics::{
    CollectingDiagnosticHandler, Diagnostic, DiagnosticHandler, DiagnosticLevel, SuggestedFix,
    TextEdit,
};

pub mod prelude {
    pub use crate::ast::expression::{
        Argument, BinaryOp, Expression, ExpressionKind, Literal, TableField, UnaryOp,
    };
    pub use crate::ast::statement::{
        AssignStatement, Block, ElseIf, FunctionDeclaration, IfStatement, LocalStatement,
        Parameter, ReturnStatement, Statement, WhileStatement,
    };
    pub use crate::ast::{Ident, Program, Spanned};
    pub use crate::span::Span;
    pub use crate::string_interner::{StringId, StringInterner};
}
