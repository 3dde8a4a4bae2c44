use super::{PrettyPrinter, PrintError};
use crate::ast::expression::{
    Argument, BinaryOp, Expression, ExpressionKind, Literal, TableField, UnaryOp,
};

// Operator precedence, low to high. Comparisons are left-associative;
// `..` and `^` associate to the right; `^` binds tighter than unary.
const PREC_OR: u8 = 1;
const PREC_AND: u8 = 2;
const PREC_COMPARE: u8 = 3;
const PREC_BIT_OR: u8 = 4;
const PREC_BIT_XOR: u8 = 5;
const PREC_BIT_AND: u8 = 6;
const PREC_SHIFT: u8 = 7;
const PREC_CONCAT: u8 = 8;
const PREC_ADD: u8 = 9;
const PREC_MUL: u8 = 10;
const PREC_UNARY: u8 = 11;
const PREC_POWER: u8 = 12;
const PREC_PRIMARY: u8 = 14;

fn binary_precedence(op: BinaryOp) -> u8 {
    match op {
        BinaryOp::Or => PREC_OR,
        BinaryOp::And => PREC_AND,
        BinaryOp::Equal
        | BinaryOp::NotEqual
        | BinaryOp::LessThan
        | BinaryOp::LessThanOrEqual
        | BinaryOp::GreaterThan
        | BinaryOp::GreaterThanOrEqual => PREC_COMPARE,
        BinaryOp::BitwiseOr => PREC_BIT_OR,
        BinaryOp::BitwiseXor => PREC_BIT_XOR,
        BinaryOp::BitwiseAnd => PREC_BIT_AND,
        BinaryOp::ShiftLeft | BinaryOp::ShiftRight => PREC_SHIFT,
        BinaryOp::Concatenate => PREC_CONCAT,
        BinaryOp::Add | BinaryOp::Subtract => PREC_ADD,
        BinaryOp::Multiply | BinaryOp::Divide | BinaryOp::IntegerDivide | BinaryOp::Modulo => {
            PREC_MUL
        }
        BinaryOp::Power => PREC_POWER,
    }
}

fn is_right_associative(op: BinaryOp) -> bool {
    matches!(op, BinaryOp::Concatenate | BinaryOp::Power)
}

fn binary_op_str(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "+",
        BinaryOp::Subtract => "-",
        BinaryOp::Multiply => "*",
        BinaryOp::Divide => "/",
        BinaryOp::IntegerDivide => "//",
        BinaryOp::Modulo => "%",
        BinaryOp::Power => "^",
        BinaryOp::Concatenate => "..",
        BinaryOp::Equal => "==",
        BinaryOp::NotEqual => "~=",
        BinaryOp::LessThan => "<",
        BinaryOp::LessThanOrEqual => "<=",
        BinaryOp::GreaterThan => ">",
        BinaryOp::GreaterThanOrEqual => ">=",
        BinaryOp::And => "and",
        BinaryOp::Or => "or",
        BinaryOp::BitwiseAnd => "&",
        BinaryOp::BitwiseOr => "|",
        BinaryOp::BitwiseXor => "~",
        BinaryOp::ShiftLeft => "<<",
        BinaryOp::ShiftRight => ">>",
    }
}

fn unary_op_str(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::Negate => "-",
        UnaryOp::Not => "not ",
        UnaryOp::Length => "#",
        UnaryOp::BitwiseNot => "~",
    }
}

fn precedence_of(expr: &Expression<'_>) -> u8 {
    match &expr.kind {
        ExpressionKind::Binary(op, _, _) => binary_precedence(*op),
        ExpressionKind::Unary(_, _) => PREC_UNARY,
        _ => PREC_PRIMARY,
    }
}

impl PrettyPrinter {
    pub(crate) fn print_expression(&mut self, expr: &Expression<'_>) -> Result<(), PrintError> {
        self.print_with_min_precedence(expr, 0)
    }

    fn print_with_min_precedence(
        &mut self,
        expr: &Expression<'_>,
        min: u8,
    ) -> Result<(), PrintError> {
        if precedence_of(expr) < min {
            self.write("(");
            self.print_kind(expr)?;
            self.write(")");
        } else {
            self.print_kind(expr)?;
        }
        Ok(())
    }

    fn print_kind(&mut self, expr: &Expression<'_>) -> Result<(), PrintError> {
        match &expr.kind {
            ExpressionKind::Literal(literal) => self.print_literal(literal),
            ExpressionKind::Identifier(name) => {
                let name = self.resolve(*name)?;
                self.write(&name);
                Ok(())
            }
            ExpressionKind::Binary(op, left, right) => self.print_binary(*op, left, right),
            ExpressionKind::Unary(op, operand) => self.print_unary(*op, operand),
            ExpressionKind::Call(callee, arguments) => {
                self.print_suffix_base(callee)?;
                self.print_argument_list(arguments)
            }
            ExpressionKind::MethodCall(object, method, arguments) => {
                self.print_suffix_base(object)?;
                self.write(":");
                let method = self.resolve(method.node)?;
                self.write(&method);
                self.print_argument_list(arguments)
            }
            ExpressionKind::Member(object, field) => {
                self.print_suffix_base(object)?;
                self.write(".");
                let field = self.resolve(field.node)?;
                self.write(&field);
                Ok(())
            }
            ExpressionKind::Index(object, key) => {
                self.print_suffix_base(object)?;
                self.write("[");
                self.print_expression(key)?;
                self.write("]");
                Ok(())
            }
            ExpressionKind::Table(fields) => self.print_table(fields),
            ExpressionKind::Parenthesized(inner) => {
                self.write("(");
                self.print_expression(inner)?;
                self.write(")");
                Ok(())
            }
        }
    }

    fn print_binary(
        &mut self,
        op: BinaryOp,
        left: &Expression<'_>,
        right: &Expression<'_>,
    ) -> Result<(), PrintError> {
        let prec = binary_precedence(op);
        let (left_min, right_min) = if is_right_associative(op) {
            (prec + 1, prec)
        } else {
            (prec, prec + 1)
        };
        self.print_with_min_precedence(left, left_min)?;
        self.write(" ");
        self.write(binary_op_str(op));
        self.write(" ");
        self.print_with_min_precedence(right, right_min)
    }

    fn print_unary(&mut self, op: UnaryOp, operand: &Expression<'_>) -> Result<(), PrintError> {
        self.write(unary_op_str(op));
        // `--x` would start a comment; force parentheses between two minuses.
        let min = if op == UnaryOp::Negate
            && matches!(operand.kind, ExpressionKind::Unary(UnaryOp::Negate, _))
        {
            PREC_UNARY + 1
        } else {
            PREC_UNARY
        };
        self.print_with_min_precedence(operand, min)
    }

    /// Print the base of a call/member/index suffix. Anything that is not
    /// itself a suffixable form must be parenthesized to parse as a prefix
    /// expression (`("x"):len()`, `(a + b).field`).
    fn print_suffix_base(&mut self, expr: &Expression<'_>) -> Result<(), PrintError> {
        match &expr.kind {
            ExpressionKind::Identifier(_)
            | ExpressionKind::Member(_, _)
            | ExpressionKind::Index(_, _)
            | ExpressionKind::Call(_, _)
            | ExpressionKind::MethodCall(_, _, _)
            | ExpressionKind::Parenthesized(_) => self.print_kind(expr),
            _ => {
                self.write("(");
                self.print_kind(expr)?;
                self.write(")");
                Ok(())
            }
        }
    }

    fn print_argument_list(&mut self, arguments: &[Argument<'_>]) -> Result<(), PrintError> {
        self.write("(");
        for (i, argument) in arguments.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.print_expression(&argument.value)?;
        }
        self.write(")");
        Ok(())
    }

    fn print_table(&mut self, fields: &[TableField<'_>]) -> Result<(), PrintError> {
        if fields.is_empty() {
            self.write("{}");
            return Ok(());
        }
        self.write("{ ");
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            match field {
                TableField::Item(value) => self.print_expression(value)?,
                TableField::Named(name, value) => {
                    let name = self.resolve(name.node)?;
                    self.write(&name);
                    self.write(" = ");
                    self.print_expression(value)?;
                }
                TableField::Keyed(key, value) => {
                    self.write("[");
                    self.print_expression(key)?;
                    self.write("] = ");
                    self.print_expression(value)?;
                }
            }
        }
        self.write(" }");
        Ok(())
    }

    fn print_literal(&mut self, literal: &Literal) -> Result<(), PrintError> {
        match literal {
            Literal::Nil => self.write("nil"),
            Literal::Boolean(true) => self.write("true"),
            Literal::Boolean(false) => self.write("false"),
            Literal::Integer(value) => {
                let text = value.to_string();
                self.write(&text);
            }
            Literal::Number(value) => {
                if !value.is_finite() {
                    return Err(PrintError::NonFiniteNumber);
                }
                let text = format!("{value:?}");
                self.write(&text);
            }
            Literal::String(value) => {
                let escaped = escape_string(value);
                self.write(&escaped);
            }
        }
        Ok(())
    }
}

fn escape_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\{}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Ident;
    use crate::printer::expression_to_source;
    use crate::span::Span;
    use crate::string_interner::StringInterner;
    use bumpalo::Bump;
    use std::sync::Arc;

    struct Ctx<'a> {
        arena: &'a Bump,
        interner: Arc<StringInterner>,
    }

    impl<'a> Ctx<'a> {
        fn new(arena: &'a Bump) -> Self {
            Self {
                arena,
                interner: Arc::new(StringInterner::new()),
            }
        }

        fn expr(&self, kind: ExpressionKind<'a>) -> Expression<'a> {
            Expression::new(kind, Span::dummy())
        }

        fn ident(&self, name: &str) -> Expression<'a> {
            self.expr(ExpressionKind::Identifier(
                self.interner.get_or_intern(name),
            ))
        }

        fn integer(&self, value: i64) -> Expression<'a> {
            self.expr(ExpressionKind::Literal(Literal::Integer(value)))
        }

        fn binary(
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

        fn unary(&self, op: UnaryOp, operand: Expression<'a>) -> Expression<'a> {
            self.expr(ExpressionKind::Unary(op, self.arena.alloc(operand)))
        }

        fn call(&self, callee: &str, arguments: Vec<Expression<'a>>) -> Expression<'a> {
            let arguments: Vec<Argument<'a>> = arguments
                .into_iter()
                .map(|value| Argument {
                    span: value.span,
                    value,
                })
                .collect();
            self.expr(ExpressionKind::Call(
                self.arena.alloc(self.ident(callee)),
                self.arena.alloc_slice_clone(&arguments),
            ))
        }

        fn print(&self, expr: &Expression<'a>) -> String {
            expression_to_source(expr, &self.interner).expect("printable")
        }
    }

    #[test]
    fn test_flat_addition_stays_bare() {
        let arena = Bump::new();
        let ctx = Ctx::new(&arena);
        let expr = ctx.binary(ctx.ident("x"), BinaryOp::Add, ctx.ident("y"));
        assert_eq!(ctx.print(&expr), "x + y");
    }

    #[test]
    fn test_lower_precedence_child_is_parenthesized() {
        let arena = Bump::new();
        let ctx = Ctx::new(&arena);
        let sum = ctx.binary(ctx.ident("x"), BinaryOp::Add, ctx.integer(1));
        let expr = ctx.binary(sum, BinaryOp::Multiply, ctx.integer(2));
        insta::assert_snapshot!(ctx.print(&expr), @"(x + 1) * 2");
    }

    #[test]
    fn test_higher_precedence_child_stays_bare() {
        let arena = Bump::new();
        let ctx = Ctx::new(&arena);
        let product = ctx.binary(ctx.ident("b"), BinaryOp::Multiply, ctx.ident("c"));
        let expr = ctx.binary(ctx.ident("a"), BinaryOp::Add, product);
        assert_eq!(ctx.print(&expr), "a + b * c");
    }

    #[test]
    fn test_left_associative_right_child_needs_parens() {
        let arena = Bump::new();
        let ctx = Ctx::new(&arena);
        let inner = ctx.binary(ctx.ident("b"), BinaryOp::Subtract, ctx.ident("c"));
        let expr = ctx.binary(ctx.ident("a"), BinaryOp::Subtract, inner);
        assert_eq!(ctx.print(&expr), "a - (b - c)");

        let inner = ctx.binary(ctx.ident("a"), BinaryOp::Subtract, ctx.ident("b"));
        let expr = ctx.binary(inner, BinaryOp::Subtract, ctx.ident("c"));
        assert_eq!(ctx.print(&expr), "a - b - c");
    }

    #[test]
    fn test_concat_is_right_associative() {
        let arena = Bump::new();
        let ctx = Ctx::new(&arena);
        let inner = ctx.binary(ctx.ident("a"), BinaryOp::Concatenate, ctx.ident("b"));
        let expr = ctx.binary(inner, BinaryOp::Concatenate, ctx.ident("c"));
        assert_eq!(ctx.print(&expr), "(a .. b) .. c");

        let inner = ctx.binary(ctx.ident("b"), BinaryOp::Concatenate, ctx.ident("c"));
        let expr = ctx.binary(ctx.ident("a"), BinaryOp::Concatenate, inner);
        assert_eq!(ctx.print(&expr), "a .. b .. c");
    }

    #[test]
    fn test_power_binds_tighter_than_unary_minus() {
        let arena = Bump::new();
        let ctx = Ctx::new(&arena);
        let power = ctx.binary(ctx.ident("x"), BinaryOp::Power, ctx.integer(2));
        let expr = ctx.unary(UnaryOp::Negate, power);
        assert_eq!(ctx.print(&expr), "-x ^ 2");

        let negated = ctx.unary(UnaryOp::Negate, ctx.ident("x"));
        let expr = ctx.binary(negated, BinaryOp::Power, ctx.integer(2));
        assert_eq!(ctx.print(&expr), "(-x) ^ 2");
    }

    #[test]
    fn test_double_negation_never_prints_a_comment() {
        let arena = Bump::new();
        let ctx = Ctx::new(&arena);
        let expr = ctx.unary(UnaryOp::Negate, ctx.unary(UnaryOp::Negate, ctx.ident("x")));
        assert_eq!(ctx.print(&expr), "-(-x)");
    }

    #[test]
    fn test_not_parenthesizes_comparison_operand() {
        let arena = Bump::new();
        let ctx = Ctx::new(&arena);
        let eq = ctx.binary(ctx.ident("a"), BinaryOp::Equal, ctx.ident("b"));
        let expr = ctx.unary(UnaryOp::Not, eq);
        assert_eq!(ctx.print(&expr), "not (a == b)");
    }

    #[test]
    fn test_call_arguments() {
        let arena = Bump::new();
        let ctx = Ctx::new(&arena);
        let sum = ctx.binary(ctx.ident("a"), BinaryOp::Add, ctx.ident("b"));
        let expr = ctx.call("f", vec![ctx.integer(1), sum]);
        insta::assert_snapshot!(ctx.print(&expr), @"f(1, a + b)");
    }

    #[test]
    fn test_method_call_and_member_chain() {
        let arena = Bump::new();
        let ctx = Ctx::new(&arena);
        let member = ctx.expr(ExpressionKind::Member(
            ctx.arena.alloc(ctx.ident("t")),
            Ident::new(ctx.interner.get_or_intern("data"), Span::dummy()),
        ));
        let expr = ctx.expr(ExpressionKind::MethodCall(
            ctx.arena.alloc(member),
            Ident::new(ctx.interner.get_or_intern("sum"), Span::dummy()),
            ctx.arena.alloc_slice_clone(&[]),
        ));
        assert_eq!(ctx.print(&expr), "t.data:sum()");
    }

    #[test]
    fn test_non_primary_call_base_is_parenthesized() {
        let arena = Bump::new();
        let ctx = Ctx::new(&arena);
        let base = ctx.expr(ExpressionKind::Literal(Literal::String("hi".to_string())));
        let expr = ctx.expr(ExpressionKind::MethodCall(
            ctx.arena.alloc(base),
            Ident::new(ctx.interner.get_or_intern("len"), Span::dummy()),
            ctx.arena.alloc_slice_clone(&[]),
        ));
        assert_eq!(ctx.print(&expr), "(\"hi\"):len()");
    }

    #[test]
    fn test_index_expression() {
        let arena = Bump::new();
        let ctx = Ctx::new(&arena);
        let expr = ctx.expr(ExpressionKind::Index(
            ctx.arena.alloc(ctx.ident("t")),
            ctx.arena.alloc(ctx.binary(ctx.ident("i"), BinaryOp::Add, ctx.integer(1))),
        ));
        assert_eq!(ctx.print(&expr), "t[i + 1]");
    }

    #[test]
    fn test_table_constructor() {
        let arena = Bump::new();
        let ctx = Ctx::new(&arena);
        let empty = ctx.expr(ExpressionKind::Table(ctx.arena.alloc_slice_clone(&[])));
        assert_eq!(ctx.print(&empty), "{}");

        let fields = vec![
            TableField::Item(ctx.integer(1)),
            TableField::Named(
                Ident::new(ctx.interner.get_or_intern("x"), Span::dummy()),
                ctx.integer(2),
            ),
            TableField::Keyed(ctx.ident("k"), ctx.ident("v")),
        ];
        let table = ctx.expr(ExpressionKind::Table(ctx.arena.alloc_slice_clone(&fields)));
        insta::assert_snapshot!(ctx.print(&table), @"{ 1, x = 2, [k] = v }");
    }

    #[test]
    fn test_literals() {
        let arena = Bump::new();
        let ctx = Ctx::new(&arena);
        assert_eq!(ctx.print(&ctx.expr(ExpressionKind::Literal(Literal::Nil))), "nil");
        assert_eq!(
            ctx.print(&ctx.expr(ExpressionKind::Literal(Literal::Boolean(true)))),
            "true"
        );
        assert_eq!(
            ctx.print(&ctx.expr(ExpressionKind::Literal(Literal::Number(1.5)))),
            "1.5"
        );
        // A float that happens to be integral keeps its fraction marker.
        assert_eq!(
            ctx.print(&ctx.expr(ExpressionKind::Literal(Literal::Number(3.0)))),
            "3.0"
        );
        assert_eq!(
            ctx.print(&ctx.expr(ExpressionKind::Literal(Literal::String(
                "he said \"hi\"\n".to_string()
            )))),
            "\"he said \\\"hi\\\"\\n\""
        );
    }

    #[test]
    fn test_non_finite_number_fails() {
        let arena = Bump::new();
        let ctx = Ctx::new(&arena);
        let expr = ctx.expr(ExpressionKind::Literal(Literal::Number(f64::INFINITY)));
        let result = expression_to_source(&expr, &ctx.interner);
        assert_eq!(result, Err(PrintError::NonFiniteNumber));
    }

    #[test]
    fn test_unresolved_identifier_fails() {
        let arena = Bump::new();
        let ctx = Ctx::new(&arena);
        let foreign = Arc::new(StringInterner::new());
        let id = ctx.interner.get_or_intern("orphan");
        let expr = Expression::new(ExpressionKind::Identifier(id), Span::dummy());
        assert!(matches!(
            expression_to_source(&expr, &foreign),
            Err(PrintError::UnresolvedSymbol(_))
        ));
    }
}
