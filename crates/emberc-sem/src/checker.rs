//! The bidirectional type checker (§4.3).
//!
//! A single-pass walk over the untyped AST that produces the parallel
//! typed AST, threading a downward [`Hint`] and returning an upward
//! [`Type`]. Every `check_*` method takes its `ast::*` node by value
//! (§3.2: "AST nodes are ... consumed (moved-from) by the type
//! checker") and returns the corresponding `hir::*` node; recoverable
//! errors emit a diagnostic and substitute a `Nothing`-typed
//! [`hir::Expr::Error`] rather than aborting the walk (§7).

use emberc_par::ast::{self, BinOp, UnOp};
use emberc_util::diagnostic::{DiagnosticBuilder, DiagnosticCode};
use emberc_util::{Handler, Span};

use crate::hint::{Hint, TypeHint};
use crate::hir;
use crate::scope::ScopeStack;
use crate::types::{IntWidth, Type};

pub struct Checker<'a> {
    handler: &'a Handler,
    scopes: ScopeStack,
}

impl<'a> Checker<'a> {
    pub fn new(handler: &'a Handler) -> Self {
        Checker { handler, scopes: ScopeStack::new() }
    }

    pub fn alloca_vector_size(&self) -> usize {
        self.scopes.alloca_vector_size()
    }

    pub fn check_module(&mut self, module: ast::Module) -> hir::Module {
        let (stmts, ty) = self.check_stmt_sequence(module.stmts, &Hint::none(), true);
        hir::Module { stmts, ty }
    }

    fn check_block(&mut self, block: ast::Block, hint: &Hint, value_expected: bool) -> hir::Block {
        self.scopes.push_scope();
        let (stmts, ty) = self.check_stmt_sequence(block.stmts, hint, value_expected);
        self.scopes.pop_scope();
        hir::Block { stmts, ty }
    }

    /// Checks a statement sequence (block body or module body): every
    /// statement but the last is checked with hint `None`; the last
    /// statement, if an expression statement, is checked with the outer
    /// `hint` so the sequence's value can satisfy an enclosing
    /// expectation (§4.3). `value_expected` says whether the sequence's
    /// own trailing value is ever observed by whoever holds this
    /// sequence (false for a `while` body, which always discards it) —
    /// only the last statement inherits it, since no earlier statement's
    /// value ever escapes the sequence.
    fn check_stmt_sequence(
        &mut self,
        stmts: Vec<ast::Stmt>,
        hint: &Hint,
        value_expected: bool,
    ) -> (Vec<hir::Stmt>, Type) {
        let last_index = stmts.len().checked_sub(1);
        let mut checked = Vec::with_capacity(stmts.len());
        for (i, stmt) in stmts.into_iter().enumerate() {
            let is_last = Some(i) == last_index;
            let stmt_hint = if is_last { hint.clone() } else { Hint::none() };
            checked.push(self.check_stmt(stmt, &stmt_hint, is_last && value_expected));
        }
        let ty = checked.last().map(|s| s.ty()).unwrap_or(Type::Nothing);
        (checked, ty)
    }

    /// `value_expected` is only meaningful for a trailing `ast::Stmt::If`:
    /// it decides whether that `if` is checked as a value-producing
    /// expression (common branch type, mandatory `else`) or as a void
    /// statement, overriding the `is_statement` the parser baked into
    /// the node at parse time (§4.3: "a block and the top-level module
    /// produce the type of their last statement" — that includes a
    /// trailing `if`, not just a trailing plain expression).
    fn check_stmt(&mut self, stmt: ast::Stmt, hint: &Hint, value_expected: bool) -> hir::Stmt {
        match stmt {
            ast::Stmt::Block(block) => hir::Stmt::Block(self.check_block(block, hint, value_expected)),
            ast::Stmt::Expr(expr) => hir::Stmt::Expr(self.check_expr(expr, hint)),
            ast::Stmt::If(node) => {
                let node = ast::If { is_statement: !value_expected, ..node };
                hir::Stmt::If(self.check_if(node))
            },
            ast::Stmt::While(node) => hir::Stmt::While(self.check_while(node)),
            ast::Stmt::Decl(decl) => hir::Stmt::Decl(self.check_decl(decl)),
        }
    }

    fn check_decl(&mut self, decl: ast::Decl) -> hir::Decl {
        let declared_ty = decl.ty.as_ref().and_then(|repr| Type::from_name(repr.name.as_str()));
        if decl.ty.is_some() && declared_ty.is_none() {
            self.error(
                DiagnosticCode::E_CHECK_UNRESOLVED_NAME,
                decl.span,
                format!("unknown type name '{}'", decl.ty.as_ref().unwrap().name.as_str()),
            );
        }

        let init_hint = match declared_ty {
            Some(ty) => Hint::expected(ty),
            None => Hint::unknown(),
        };
        let init = decl.init.map(|init| Box::new(self.check_expr(*init, &init_hint)));
        let ty = declared_ty.or_else(|| init.as_ref().map(|e| e.ty())).unwrap_or(Type::Nothing);

        if self.scopes.declared_in_current_scope(decl.name) {
            self.error(
                DiagnosticCode::E_CHECK_REDECLARATION,
                decl.name_span,
                format!("'{}' is already declared in this scope", decl.name.as_str()),
            );
        }
        let slot = self.scopes.add_declaration(decl.name, ty, decl.mutable);

        hir::Decl { mutable: decl.mutable, slot, ty, init }
    }

    fn check_while(&mut self, node: ast::WhileStmt) -> hir::WhileStmt {
        let cond = Box::new(self.check_expr(*node.cond, &Hint::expected(Type::Bool)));
        let body = self.check_control_flow_body(node.body, &Hint::none(), false);
        hir::WhileStmt { cond, body }
    }

    fn check_if(&mut self, node: ast::If) -> hir::If {
        let cond = Box::new(self.check_expr(*node.cond, &Hint::expected(Type::Bool)));

        let body_hint = if node.is_statement { Hint::none() } else { Hint::unknown() };
        // A branch body's own trailing `if` is value-expected exactly
        // when this `if` itself is expression-form.
        let branch_value_expected = !node.is_statement;
        let then_branch = self.check_control_flow_body(node.then_branch, &body_hint, branch_value_expected);

        let elifs: Vec<(hir::Expr, hir::ControlFlowBody)> = node
            .elifs
            .into_iter()
            .map(|(cond, body)| {
                let cond = self.check_expr(cond, &Hint::expected(Type::Bool));
                let body = self.check_control_flow_body(body, &body_hint, branch_value_expected);
                (cond, body)
            })
            .collect();

        let else_branch =
            node.else_branch.map(|body| self.check_control_flow_body(body, &body_hint, branch_value_expected));

        let ty = if node.is_statement {
            Type::Nothing
        } else if else_branch.is_none() {
            self.error(
                DiagnosticCode::E_CHECK_TYPE_MISMATCH,
                node.span,
                "an 'if' used as an expression must have an 'else' branch".to_string(),
            );
            Type::Nothing
        } else {
            let mut ty = then_branch.ty();
            let mut mismatched = false;
            for (_, body) in &elifs {
                if body.ty() != ty {
                    mismatched = true;
                }
            }
            if let Some(else_branch) = &else_branch {
                if else_branch.ty() != ty {
                    mismatched = true;
                }
            }
            if mismatched {
                self.error(
                    DiagnosticCode::E_CHECK_TYPE_MISMATCH,
                    node.span,
                    "all branches of an 'if' expression must have the same type".to_string(),
                );
                ty = Type::Nothing;
            }
            ty
        };

        hir::If { cond, then_branch, elifs, else_branch, is_statement: node.is_statement, ty }
    }

    fn check_control_flow_body(
        &mut self,
        body: ast::ControlFlowBody,
        hint: &Hint,
        value_expected: bool,
    ) -> hir::ControlFlowBody {
        match body {
            ast::ControlFlowBody::Block(block) => {
                hir::ControlFlowBody::Block(self.check_block(block, hint, value_expected))
            },
            ast::ControlFlowBody::Expr(expr) => hir::ControlFlowBody::Expr(Box::new(self.check_expr(*expr, hint))),
        }
    }

    fn check_expr(&mut self, expr: ast::Expr, hint: &Hint) -> hir::Expr {
        match expr {
            ast::Expr::Int(n) => self.check_int_literal(n, hint),
            ast::Expr::Float(f) => self.check_float_literal(f, hint),
            ast::Expr::Bool(b) => self.check_bool_literal(b, hint),
            ast::Expr::Ident(name, span) => self.check_ident(name, span, hint),
            ast::Expr::Grouping(inner) => hir::Expr::Grouping(Box::new(self.check_expr(*inner, hint))),
            ast::Expr::Unary { op, operand, span } => self.check_unary(op, *operand, span, hint),
            ast::Expr::Binary { left, op, right, span } => self.check_binary(*left, op, *right, span, hint),
            ast::Expr::If(node) => hir::Expr::If(Box::new(self.check_if(ast::If { is_statement: false, ..*node }))),
            ast::Expr::Block(block) => hir::Expr::Block(self.check_block(block, hint, true)),
        }
    }

    fn check_int_literal(&mut self, value: i64, hint: &Hint) -> hir::Expr {
        let ty = match &hint.kind {
            TypeHint::None | TypeHint::Unknown => Type::I_NATIVE,
            TypeHint::Expected(ty) => {
                if *ty != Type::Bool && ty.is_arithmetic() {
                    *ty
                } else {
                    self.error(
                        DiagnosticCode::E_CHECK_TYPE_MISMATCH,
                        Span::DUMMY,
                        format!("expected a value of type '{}', found an integer literal", ty),
                    );
                    return hir::Expr::Error;
                }
            },
            TypeHint::ExpectedOneOf(candidates) => {
                match Type::arithmetic_preference_order().iter().find(|t| candidates.contains(t)) {
                    Some(ty) => *ty,
                    None => Type::I_NATIVE,
                }
            },
        };

        if let Type::Int(width) = ty {
            if !int_fits_in_width(value, width) {
                self.error(
                    DiagnosticCode::E_CHECK_INT_OVERFLOW,
                    Span::DUMMY,
                    format!("integer literal '{}' does not fit in type '{}'", value, ty),
                );
            }
        }

        hir::Expr::Int(value, ty)
    }

    fn check_float_literal(&mut self, value: f64, hint: &Hint) -> hir::Expr {
        let ty = match &hint.kind {
            TypeHint::None | TypeHint::Unknown => Type::F64,
            TypeHint::Expected(ty) => {
                if ty.is_float() {
                    *ty
                } else {
                    self.error(
                        DiagnosticCode::E_CHECK_TYPE_MISMATCH,
                        Span::DUMMY,
                        format!("expected a value of type '{}', found a floating-point literal", ty),
                    );
                    return hir::Expr::Error;
                }
            },
            TypeHint::ExpectedOneOf(candidates) => {
                match Type::arithmetic_preference_order().iter().find(|t| t.is_float() && candidates.contains(t)) {
                    Some(ty) => *ty,
                    None => Type::F64,
                }
            },
        };
        hir::Expr::Float(value, ty)
    }

    fn check_bool_literal(&mut self, value: bool, hint: &Hint) -> hir::Expr {
        if !hint.kind.accepts(Type::Bool) {
            self.error(
                DiagnosticCode::E_CHECK_TYPE_MISMATCH,
                Span::DUMMY,
                "expected a non-boolean value, found a boolean literal".to_string(),
            );
            return hir::Expr::Error;
        }
        hir::Expr::Bool(value)
    }

    fn check_ident(&mut self, name: emberc_util::Symbol, span: Span, hint: &Hint) -> hir::Expr {
        let Some((slot, decl)) = self.scopes.lookup(name) else {
            self.error(
                DiagnosticCode::E_CHECK_UNRESOLVED_NAME,
                span,
                format!("undefined variable '{}'", name.as_str()),
            );
            return hir::Expr::Error;
        };

        if hint.requires_lvalue && !decl.mutable {
            self.error(
                DiagnosticCode::E_CHECK_ASSIGN_TO_IMMUTABLE,
                span,
                format!("cannot assign to immutable variable '{}'", name.as_str()),
            );
        }

        if !hint.kind.accepts(decl.ty) {
            self.error(
                DiagnosticCode::E_CHECK_TYPE_MISMATCH,
                span,
                format!("expected a value of type matching the context, found '{}'", decl.ty),
            );
            return hir::Expr::Error;
        }

        hir::Expr::Var { slot, mutable: decl.mutable, ty: decl.ty }
    }

    fn check_unary(&mut self, op: UnOp, operand: ast::Expr, span: Span, outer: &Hint) -> hir::Expr {
        let operand_hint = match op {
            UnOp::Neg => Hint::arithmetic(),
            UnOp::Not => Hint::expected(Type::Bool),
        };
        let operand = self.check_expr(operand, &operand_hint);
        let ty = operand.ty();

        if !outer.kind.accepts(ty) {
            self.error(
                DiagnosticCode::E_CHECK_TYPE_MISMATCH,
                span,
                format!("expected a value matching the context, found '{}'", ty),
            );
            return hir::Expr::Error;
        }

        hir::Expr::Unary { op, operand: Box::new(operand), ty }
    }

    fn check_binary(&mut self, left: ast::Expr, op: BinOp, right: ast::Expr, span: Span, outer: &Hint) -> hir::Expr {
        if op.is_assignment() {
            return self.check_assignment(left, op, right, span, outer);
        }

        let (left_hint, result_from_left) = match op {
            BinOp::And | BinOp::Or => (Hint::expected(Type::Bool), false),
            BinOp::Eq | BinOp::Ne => (Hint::unknown(), false),
            BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => (Hint::arithmetic(), false),
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod => (Hint::arithmetic(), true),
            _ => unreachable!("assignment handled above"),
        };

        let left = self.check_expr(left, &left_hint);
        let left_ty = left.ty();
        let right = self.check_expr(right, &Hint::expected(left_ty));

        let ty = match op {
            BinOp::And | BinOp::Or | BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => {
                Type::Bool
            },
            _ if result_from_left => left_ty,
            _ => unreachable!(),
        };

        if !outer.kind.accepts(ty) {
            self.error(
                DiagnosticCode::E_CHECK_TYPE_MISMATCH,
                span,
                format!("expected a value matching the context, found '{}'", ty),
            );
            return hir::Expr::Error;
        }

        hir::Expr::Binary { left: Box::new(left), op, right: Box::new(right), ty }
    }

    fn check_assignment(
        &mut self,
        left: ast::Expr,
        op: BinOp,
        right: ast::Expr,
        span: Span,
        outer: &Hint,
    ) -> hir::Expr {
        let left_hint = if op == BinOp::Assign { Hint::unknown_lvalue() } else { Hint::arithmetic_lvalue() };
        let left = self.check_expr(left, &left_hint);

        if !left.is_lvalue() {
            self.error(
                DiagnosticCode::E_CHECK_LVALUE_REQUIRED,
                span,
                "left-hand side of an assignment must be an assignable variable".to_string(),
            );
            return hir::Expr::Error;
        }

        let left_ty = left.ty();
        let right = self.check_expr(right, &Hint::expected(left_ty));

        if !outer.kind.accepts(left_ty) {
            self.error(
                DiagnosticCode::E_CHECK_TYPE_MISMATCH,
                span,
                format!("expected a value matching the context, found '{}'", left_ty),
            );
            return hir::Expr::Error;
        }

        hir::Expr::Binary { left: Box::new(left), op, right: Box::new(right), ty: left_ty }
    }

    fn error(&mut self, code: DiagnosticCode, span: Span, message: String) {
        DiagnosticBuilder::error(message).code(code).span(span).emit(self.handler);
    }
}

fn int_fits_in_width(value: i64, width: IntWidth) -> bool {
    match width {
        IntWidth::W1 => (0..=1).contains(&value),
        IntWidth::W8 => (i8::MIN as i64..=i8::MAX as i64).contains(&value),
        IntWidth::W16 => (i16::MIN as i64..=i16::MAX as i64).contains(&value),
        IntWidth::W32 => (i32::MIN as i64..=i32::MAX as i64).contains(&value),
        IntWidth::W64 => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emberc_par::Parser;

    fn check(source: &str) -> (hir::Module, bool) {
        let handler = Handler::new();
        let mut parser = Parser::new(source, &handler);
        let module = parser.parse_module();
        assert!(!handler.has_errors(), "parse errors in {:?}", source);
        let mut checker = Checker::new(&handler);
        let hir = checker.check_module(module);
        (hir, handler.has_errors())
    }

    #[test]
    fn arithmetic_precedence_produces_nested_i64_binop() {
        let (module, had_error) = check("1 + 2 * 3");
        assert!(!had_error);
        assert_eq!(module.ty, Type::I64);
        match &module.stmts[0] {
            hir::Stmt::Expr(hir::Expr::Binary { op: BinOp::Add, right, .. }) => {
                assert!(matches!(**right, hir::Expr::Binary { op: BinOp::Mul, .. }));
            },
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn float_declaration_and_compound_assign() {
        let (module, had_error) = check("var x = 3.0\nx += 1.5\nx");
        assert!(!had_error);
        assert_eq!(module.ty, Type::F64);
    }

    #[test]
    fn if_expression_requires_else() {
        let (_, had_error) = check("if true { 1 }");
        assert!(had_error);
    }

    #[test]
    fn if_expression_with_else_has_common_type() {
        let (module, had_error) = check("if true { 1 } else { 2 }");
        assert!(!had_error);
        assert_eq!(module.ty, Type::I64);
    }

    #[test]
    fn assignment_to_immutable_is_an_error() {
        let (_, had_error) = check("let y = 1\ny = 2");
        assert!(had_error);
    }

    #[test]
    fn while_loop_and_terminal_reference() {
        let (module, had_error) = check("var i = 0\nwhile i < 3 { i += 1 }\ni");
        assert!(!had_error);
        assert_eq!(module.ty, Type::I64);
    }

    #[test]
    fn redeclaration_in_same_scope_is_an_error() {
        let (_, had_error) = check("var x = 1\nvar x = 2");
        assert!(had_error);
    }

    #[test]
    fn slot_reused_across_sibling_blocks() {
        let (module, had_error) = check("{ var a = 1 }\n{ var b = true }");
        assert!(!had_error);
        let _ = module;
    }

    #[test]
    fn unresolved_name_is_an_error() {
        let (_, had_error) = check("undefined_name");
        assert!(had_error);
    }

    #[test]
    fn integer_overflow_against_declared_width_is_an_error() {
        let (_, had_error) = check("var x: i8 = 1000");
        assert!(had_error);
    }
}
