use bumpalo::Bump;
use luahint_syntax::prelude::*;
use std::sync::Arc;

/// Builds AST nodes into a caller-owned arena. Nodes default to
/// [`Span::dummy`]; use [`AstFactory::at`] where a test needs a real span.
pub struct AstFactory<'a> {
    arena: &'a Bump,
    interner: Arc<StringInterner>,
}

impl<'a> AstFactory<'a> {
    pub fn new(arena: &'a Bump, interner: Arc<StringInterner>) -> Self {
        Self { arena, interner }
    }

    pub fn interner(&self) -> &Arc<StringInterner> {
        &self.interner
    }

    pub fn name(&self, name: &str) -> StringId {
        self.interner.get_or_intern(name)
    }

    pub fn id(&self, name: &str) -> Ident {
        Ident::new(self.name(name), Span::dummy())
    }

    /// Re-span an expression, for tests that assert on suggestion ranges.
    pub fn at(&self, mut expression: Expression<'a>, span: Span) -> Expression<'a> {
        expression.span = span;
        expression
    }

    fn expr(&self, kind: ExpressionKind<'a>) -> Expression<'a> {
        Expression::new(kind, Span::dummy())
    }

    pub fn nil(&self) -> Expression<'a> {
        self.expr(ExpressionKind::Literal(Literal::Nil))
    }

    pub fn boolean(&self, value: bool) -> Expression<'a> {
        self.expr(ExpressionKind::Literal(Literal::Boolean(value)))
    }

    pub fn integer(&self, value: i64) -> Expression<'a> {
        self.expr(ExpressionKind::Literal(Literal::Integer(value)))
    }

    pub fn number(&self, value: f64) -> Expression<'a> {
        self.expr(ExpressionKind::Literal(Literal::Number(value)))
    }

    pub fn string(&self, value: &str) -> Expression<'a> {
        self.expr(ExpressionKind::Literal(Literal::String(value.to_string())))
    }

    pub fn ident(&self, name: &str) -> Expression<'a> {
        self.expr(ExpressionKind::Identifier(self.name(name)))
    }

    pub fn binary(
        &self,
        left: Expression<'a>,
        op: BinaryOp,
        right: Expression<'a>,
    ) -> Expression<'a> {
        self.expr(ExpressionKind::Binary(
            op,
            self.arena.alloc(left),
            self.arena.alloc(right),
        ))
    }

    pub fn unary(&self, op: UnaryOp, operand: Expression<'a>) -> Expression<'a> {
        self.expr(ExpressionKind::Unary(op, self.arena.alloc(operand)))
    }

    /// Call with a plain identifier callee: `f(args...)`.
    pub fn call(&self, callee: &str, arguments: Vec<Expression<'a>>) -> Expression<'a> {
        self.call_expr(self.ident(callee), arguments)
    }

    pub fn call_expr(
        &self,
        callee: Expression<'a>,
        arguments: Vec<Expression<'a>>,
    ) -> Expression<'a> {
        self.expr(ExpressionKind::Call(
            self.arena.alloc(callee),
            self.alloc_arguments(arguments),
        ))
    }

    pub fn method_call(
        &self,
        object: Expression<'a>,
        method: &str,
        arguments: Vec<Expression<'a>>,
    ) -> Expression<'a> {
        self.expr(ExpressionKind::MethodCall(
            self.arena.alloc(object),
            self.id(method),
            self.alloc_arguments(arguments),
        ))
    }

    pub fn member(&self, object: Expression<'a>, field: &str) -> Expression<'a> {
        self.expr(ExpressionKind::Member(
            self.arena.alloc(object),
            self.id(field),
        ))
    }

    pub fn index(&self, object: Expression<'a>, key: Expression<'a>) -> Expression<'a> {
        self.expr(ExpressionKind::Index(
            self.arena.alloc(object),
            self.arena.alloc(key),
        ))
    }

    pub fn paren(&self, inner: Expression<'a>) -> Expression<'a> {
        self.expr(ExpressionKind::Parenthesized(self.arena.alloc(inner)))
    }

    pub fn table(&self, fields: Vec<TableField<'a>>) -> Expression<'a> {
        self.expr(ExpressionKind::Table(self.arena.alloc_slice_clone(&fields)))
    }

    pub fn expr_stmt(&self, expression: Expression<'a>) -> Statement<'a> {
        Statement::Expression(expression)
    }

    pub fn ret(&self, values: Vec<Expression<'a>>) -> Statement<'a> {
        Statement::Return(ReturnStatement {
            values: self.arena.alloc_slice_clone(&values),
            span: Span::dummy(),
        })
    }

    pub fn local(&self, name: &str, initializer: Option<Expression<'a>>) -> Statement<'a> {
        Statement::Local(LocalStatement {
            name: self.id(name),
            initializer,
            span: Span::dummy(),
        })
    }

    pub fn assign(&self, target: Expression<'a>, value: Expression<'a>) -> Statement<'a> {
        Statement::Assign(AssignStatement {
            target,
            value,
            span: Span::dummy(),
        })
    }

    pub fn function(
        &self,
        name: &str,
        parameters: &[&str],
        body: Vec<Statement<'a>>,
    ) -> Statement<'a> {
        let parameters: Vec<Parameter> = parameters
            .iter()
            .map(|p| Parameter {
                name: self.id(p),
                span: Span::dummy(),
            })
            .collect();
        Statement::Function(FunctionDeclaration {
            name: self.id(name),
            parameters: self.arena.alloc_slice_clone(&parameters),
            body: self.block(body),
            span: Span::dummy(),
        })
    }

    pub fn if_stmt(
        &self,
        condition: Expression<'a>,
        then_block: Vec<Statement<'a>>,
        else_block: Option<Vec<Statement<'a>>>,
    ) -> Statement<'a> {
        Statement::If(IfStatement {
            condition,
            then_block: self.block(then_block),
            else_ifs: self.arena.alloc_slice_clone(&[]),
            else_block: else_block.map(|statements| self.block(statements)),
            span: Span::dummy(),
        })
    }

    pub fn while_stmt(&self, condition: Expression<'a>, body: Vec<Statement<'a>>) -> Statement<'a> {
        Statement::While(WhileStatement {
            condition,
            body: self.block(body),
            span: Span::dummy(),
        })
    }

    pub fn do_stmt(&self, body: Vec<Statement<'a>>) -> Statement<'a> {
        Statement::Do(self.block(body))
    }

    pub fn block(&self, statements: Vec<Statement<'a>>) -> Block<'a> {
        Block {
            statements: self.arena.alloc_slice_clone(&statements),
            span: Span::dummy(),
        }
    }

    pub fn program(&self, statements: Vec<Statement<'a>>) -> Program<'a> {
        Program {
            statements: self.arena.alloc_slice_clone(&statements),
            span: Span::dummy(),
        }
    }

    fn alloc_arguments(&self, arguments: Vec<Expression<'a>>) -> &'a [Argument<'a>] {
        let arguments: Vec<Argument<'a>> = arguments
            .into_iter()
            .map(|value| Argument {
                span: value.span,
                value,
            })
            .collect();
        self.arena.alloc_slice_clone(&arguments)
    }
}
