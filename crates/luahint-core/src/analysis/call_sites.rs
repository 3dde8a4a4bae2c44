//! Call-site matching.
//!
//! Walks every expression in the unit and resolves plain-identifier callees
//! back to their declarations. Almost every call in a program is a
//! non-match — unresolved callee, non-candidate callee, arity mismatch —
//! and non-matches are skipped silently. The walker also tracks which names
//! are lexically bound at each point so the rewrite generator can detect
//! identifier capture.

use crate::analysis::candidates::CandidateSet;
use crate::resolver::Resolver;
use luahint_syntax::ast::expression::{Argument, Expression, ExpressionKind, TableField};
use luahint_syntax::ast::statement::{Block, FunctionDeclaration, Statement};
use luahint_syntax::ast::{Ident, Program};
use luahint_syntax::string_interner::StringId;
use rustc_hash::FxHashSet;
use tracing::trace;

/// A call expression resolved to a candidate declaration.
pub struct MatchedCall<'a> {
    /// The whole call expression, including its arguments.
    pub call: &'a Expression<'a>,
    /// The callee name as written at the call site.
    pub name: Ident,
    pub declaration: &'a FunctionDeclaration<'a>,
    pub arguments: &'a [Argument<'a>],
    /// Names lexically bound at the call site: locals, parameters and
    /// function names of every enclosing scope.
    pub bound_names: FxHashSet<StringId>,
}

pub fn collect_matched_calls<'a>(
    program: &Program<'a>,
    resolver: &dyn Resolver<'a>,
    candidates: &CandidateSet<'a>,
) -> Vec<MatchedCall<'a>> {
    let mut collector = CallSiteCollector {
        resolver,
        candidates,
        scopes: vec![FxHashSet::default()],
        matched: Vec::new(),
    };
    collector.walk_statements(program.statements);
    collector.matched
}

struct CallSiteCollector<'a, 'r> {
    resolver: &'r dyn Resolver<'a>,
    candidates: &'r CandidateSet<'a>,
    scopes: Vec<FxHashSet<StringId>>,
    matched: Vec<MatchedCall<'a>>,
}

impl<'a> CallSiteCollector<'a, '_> {
    fn walk_statements(&mut self, statements: &'a [Statement<'a>]) {
        for statement in statements {
            self.walk_statement(statement);
        }
    }

    fn walk_statement(&mut self, statement: &'a Statement<'a>) {
        match statement {
            Statement::Local(local) => {
                if let Some(initializer) = &local.initializer {
                    self.walk_expression(initializer);
                }
                // The name is visible only after its initializer.
                self.bind(local.name.node);
            }
            Statement::Assign(assign) => {
                self.walk_expression(&assign.target);
                self.walk_expression(&assign.value);
            }
            Statement::Expression(expression) => self.walk_expression(expression),
            Statement::Function(decl) => {
                self.bind(decl.name.node);
                self.scopes.push(FxHashSet::default());
                for parameter in decl.parameters {
                    self.bind(parameter.name.node);
                }
                self.walk_statements(decl.body.statements);
                self.scopes.pop();
            }
            Statement::Return(ret) => {
                for value in ret.values {
                    self.walk_expression(value);
                }
            }
            Statement::If(if_stmt) => {
                self.walk_expression(&if_stmt.condition);
                self.walk_block(&if_stmt.then_block);
                for else_if in if_stmt.else_ifs {
                    self.walk_expression(&else_if.condition);
                    self.walk_block(&else_if.block);
                }
                if let Some(else_block) = &if_stmt.else_block {
                    self.walk_block(else_block);
                }
            }
            Statement::While(while_stmt) => {
                self.walk_expression(&while_stmt.condition);
                self.walk_block(&while_stmt.body);
            }
            Statement::Do(block) => self.walk_block(block),
        }
    }

    fn walk_block(&mut self, block: &'a Block<'a>) {
        self.scopes.push(FxHashSet::default());
        self.walk_statements(block.statements);
        self.scopes.pop();
    }

    fn walk_expression(&mut self, expression: &'a Expression<'a>) {
        match &expression.kind {
            ExpressionKind::Call(callee, arguments) => {
                self.try_match(expression, callee, arguments);
                self.walk_expression(callee);
                for argument in *arguments {
                    self.walk_expression(&argument.value);
                }
            }
            ExpressionKind::MethodCall(object, _, arguments) => {
                self.walk_expression(object);
                for argument in *arguments {
                    self.walk_expression(&argument.value);
                }
            }
            ExpressionKind::Binary(_, left, right) => {
                self.walk_expression(left);
                self.walk_expression(right);
            }
            ExpressionKind::Unary(_, operand) => self.walk_expression(operand),
            ExpressionKind::Member(object, _) => self.walk_expression(object),
            ExpressionKind::Index(object, key) => {
                self.walk_expression(object);
                self.walk_expression(key);
            }
            ExpressionKind::Table(fields) => {
                for field in *fields {
                    match field {
                        TableField::Item(value) | TableField::Named(_, value) => {
                            self.walk_expression(value);
                        }
                        TableField::Keyed(key, value) => {
                            self.walk_expression(key);
                            self.walk_expression(value);
                        }
                    }
                }
            }
            ExpressionKind::Parenthesized(inner) => self.walk_expression(inner),
            ExpressionKind::Literal(_) | ExpressionKind::Identifier(_) => {}
        }
    }

    fn try_match(
        &mut self,
        call: &'a Expression<'a>,
        callee: &'a Expression<'a>,
        arguments: &'a [Argument<'a>],
    ) {
        let ExpressionKind::Identifier(name) = &callee.kind else {
            return;
        };
        let name = *name;
        let Some(declaration) = self.resolver.resolve(name) else {
            trace!(?name, "callee does not resolve to a declaration");
            return;
        };
        if !self.candidates.contains(declaration) {
            trace!(?name, "callee is not a single-statement function");
            return;
        }
        if arguments.len() != declaration.parameters.len() {
            trace!(
                ?name,
                arguments = arguments.len(),
                parameters = declaration.parameters.len(),
                "arity mismatch"
            );
            return;
        }
        self.matched.push(MatchedCall {
            call,
            name: Ident::new(name, callee.span),
            declaration,
            arguments,
            bound_names: self.scopes.iter().flatten().copied().collect(),
        });
    }

    fn bind(&mut self, name: StringId) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name);
        }
    }
}
