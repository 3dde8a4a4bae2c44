//! Declaration scanning.
//!
//! Collects every function declaration whose body is exactly one statement,
//! including declarations nested inside blocks and other function bodies.
//! No statement-kind classification happens here — a single `while` body is
//! still collected and only drops out when the rewrite generator finds no
//! payload in it.

use luahint_syntax::ast::statement::{FunctionDeclaration, Statement};
use luahint_syntax::ast::Program;
use rustc_hash::FxHashSet;

/// True when `decl` is eligible for inlining by shape alone.
pub fn is_candidate(decl: &FunctionDeclaration<'_>) -> bool {
    decl.body.statements.len() == 1
}

pub struct CandidateSet<'a> {
    decls: Vec<&'a FunctionDeclaration<'a>>,
    // Identity by node address; arena-allocated nodes never move.
    index: FxHashSet<usize>,
}

impl<'a> CandidateSet<'a> {
    pub fn collect(program: &Program<'a>) -> Self {
        let mut set = CandidateSet {
            decls: Vec::new(),
            index: FxHashSet::default(),
        };
        set.scan(program.statements);
        set
    }

    fn scan(&mut self, statements: &'a [Statement<'a>]) {
        for statement in statements {
            match statement {
                Statement::Function(decl) => {
                    if is_candidate(decl) {
                        self.decls.push(decl);
                        self.index.insert(decl as *const FunctionDeclaration<'_> as usize);
                    }
                    self.scan(decl.body.statements);
                }
                Statement::If(if_stmt) => {
                    self.scan(if_stmt.then_block.statements);
                    for else_if in if_stmt.else_ifs {
                        self.scan(else_if.block.statements);
                    }
                    if let Some(else_block) = &if_stmt.else_block {
                        self.scan(else_block.statements);
                    }
                }
                Statement::While(while_stmt) => {
                    self.scan(while_stmt.body.statements);
                }
                Statement::Do(block) => {
                    self.scan(block.statements);
                }
                Statement::Local(_)
                | Statement::Assign(_)
                | Statement::Expression(_)
                | Statement::Return(_) => {}
            }
        }
    }

    pub fn contains(&self, decl: &FunctionDeclaration<'a>) -> bool {
        self.index
            .contains(&(decl as *const FunctionDeclaration<'_> as usize))
    }

    pub fn declarations(&self) -> &[&'a FunctionDeclaration<'a>] {
        &self.decls
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}
