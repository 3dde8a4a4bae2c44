//! Callee-name resolution.
//!
//! The pipeline needs to map the name at a call site back to the function
//! declaration it refers to. Resolution is pluggable so a host with a real
//! symbol table can supply its own; the built-in [`ScopeResolver`] does a
//! simple same-unit lookup and refuses anything ambiguous.

use luahint_syntax::ast::statement::{FunctionDeclaration, Statement};
use luahint_syntax::ast::Program;
use luahint_syntax::string_interner::StringId;
use rustc_hash::{FxHashMap, FxHashSet};

/// Resolves a callee name to the declaration it refers to.
///
/// `None` covers every failure mode: unknown name, ambiguous name, or a name
/// bound to anything other than a function declaration with a known body.
pub trait Resolver<'a> {
    fn resolve(&self, name: StringId) -> Option<&'a FunctionDeclaration<'a>>;
}

enum Binding<'a> {
    Unique(&'a FunctionDeclaration<'a>),
    Ambiguous,
}

/// Unit-wide name index over function declarations.
///
/// A name declared as a function more than once is ambiguous. So is any
/// function name that is also bound as a local or a parameter somewhere in
/// the unit — a call through such a name may reach a function value rather
/// than the declaration, and this resolver has no dataflow to tell.
pub struct ScopeResolver<'a> {
    bindings: FxHashMap<StringId, Binding<'a>>,
    rebound: FxHashSet<StringId>,
}

impl<'a> ScopeResolver<'a> {
    pub fn from_program(program: &Program<'a>) -> Self {
        let mut resolver = ScopeResolver {
            bindings: FxHashMap::default(),
            rebound: FxHashSet::default(),
        };
        resolver.collect(program.statements);
        resolver
    }

    fn collect(&mut self, statements: &'a [Statement<'a>]) {
        for statement in statements {
            match statement {
                Statement::Function(decl) => {
                    self.bind(decl);
                    for parameter in decl.parameters {
                        self.rebound.insert(parameter.name.node);
                    }
                    self.collect(decl.body.statements);
                }
                Statement::Local(local) => {
                    self.rebound.insert(local.name.node);
                }
                Statement::If(if_stmt) => {
                    self.collect(if_stmt.then_block.statements);
                    for else_if in if_stmt.else_ifs {
                        self.collect(else_if.block.statements);
                    }
                    if let Some(else_block) = &if_stmt.else_block {
                        self.collect(else_block.statements);
                    }
                }
                Statement::While(while_stmt) => {
                    self.collect(while_stmt.body.statements);
                }
                Statement::Do(block) => {
                    self.collect(block.statements);
                }
                Statement::Assign(_) | Statement::Expression(_) | Statement::Return(_) => {}
            }
        }
    }

    fn bind(&mut self, decl: &'a FunctionDeclaration<'a>) {
        use std::collections::hash_map::Entry;
        match self.bindings.entry(decl.name.node) {
            Entry::Vacant(entry) => {
                entry.insert(Binding::Unique(decl));
            }
            Entry::Occupied(mut entry) => {
                entry.insert(Binding::Ambiguous);
            }
        }
    }
}

impl<'a> Resolver<'a> for ScopeResolver<'a> {
    fn resolve(&self, name: StringId) -> Option<&'a FunctionDeclaration<'a>> {
        if self.rebound.contains(&name) {
            return None;
        }
        match self.bindings.get(&name) {
            Some(Binding::Unique(decl)) => Some(decl),
            _ => None,
        }
    }
}
