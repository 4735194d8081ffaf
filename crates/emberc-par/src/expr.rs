//! Expression parsing via precedence climbing (Pratt parsing).
//!
//! # Operator precedence (lowest to highest)
//!
//! | Level | Operators | Associativity |
//! |-------|-----------|---------------|
//! | 1 | `= += -= *= /= %=` | Right |
//! | 2 | `\|\|` | Left |
//! | 3 | `&&` | Left |
//! | 4 | `== !=` | Left |
//! | 5 | `< <= > >=` | Left |
//! | 6 | `+ -` | Left |
//! | 7 | `* / %` | Left |
//! | 8 | unary `! -` | n/a |
//! | 9 | primary | n/a |
//!
//! Whether the left-hand side of an assignment is a valid l-value is not
//! checked here; the parser accepts any expression on the left and the
//! type checker rejects non-l-values.

use emberc_lex::Token;

use crate::ast::{BinOp, ControlFlowBody, Expr, If, UnOp};
use crate::Parser;

impl<'a> Parser<'a> {
    pub fn parse_expr(&mut self) -> Option<Expr> {
        self.parse_expr_bp(0)
    }

    fn parse_expr_bp(&mut self, min_bp: u8) -> Option<Expr> {
        let mut lhs = self.parse_unary()?;

        loop {
            let Some((left_bp, right_bp, op)) = self.infix_binding_power() else {
                break;
            };
            if left_bp < min_bp {
                break;
            }

            let span_start = self.current_span();
            self.advance();
            let rhs = self.parse_expr_bp(right_bp)?;
            lhs = Expr::Binary {
                left: Box::new(lhs),
                op,
                right: Box::new(rhs),
                span: span_start,
            };
        }

        Some(lhs)
    }

    /// Returns `(left_bp, right_bp, op)` for the current token if it is a
    /// binary operator. Assignment is right-associative (`right_bp ==
    /// left_bp`); everything else is left-associative (`right_bp ==
    /// left_bp + 1`).
    fn infix_binding_power(&self) -> Option<(u8, u8, BinOp)> {
        let (bp, op) = match self.current_token() {
            Token::Eq => (1, BinOp::Assign),
            Token::PlusEq => (1, BinOp::AddAssign),
            Token::MinusEq => (1, BinOp::SubAssign),
            Token::StarEq => (1, BinOp::MulAssign),
            Token::SlashEq => (1, BinOp::DivAssign),
            Token::PercentEq => (1, BinOp::ModAssign),
            Token::OrOr => (2, BinOp::Or),
            Token::AndAnd => (3, BinOp::And),
            Token::EqEq => (4, BinOp::Eq),
            Token::BangEq => (4, BinOp::Ne),
            Token::Less => (5, BinOp::Lt),
            Token::LessEq => (5, BinOp::Le),
            Token::Greater => (5, BinOp::Gt),
            Token::GreaterEq => (5, BinOp::Ge),
            Token::Plus => (6, BinOp::Add),
            Token::Minus => (6, BinOp::Sub),
            Token::Star => (7, BinOp::Mul),
            Token::Slash => (7, BinOp::Div),
            Token::Percent => (7, BinOp::Mod),
            _ => return None,
        };

        let right_bp = if op.is_assignment() { bp } else { bp + 1 };
        Some((bp, right_bp, op))
    }

    fn parse_unary(&mut self) -> Option<Expr> {
        let span = self.current_span();
        let op = match self.current_token() {
            Token::Bang => UnOp::Not,
            Token::Minus => UnOp::Neg,
            _ => return self.parse_primary(),
        };
        self.advance();
        let operand = self.parse_unary()?;
        Some(Expr::Unary { op, operand: Box::new(operand), span })
    }

    fn parse_primary(&mut self) -> Option<Expr> {
        let span = self.current_span();
        match self.current_token() {
            Token::Int(n) => {
                self.advance();
                Some(Expr::Int(n))
            },
            Token::Float(f) => {
                self.advance();
                Some(Expr::Float(f))
            },
            Token::True => {
                self.advance();
                Some(Expr::Bool(true))
            },
            Token::False => {
                self.advance();
                Some(Expr::Bool(false))
            },
            Token::Ident(name) => {
                self.advance();
                Some(Expr::Ident(name, span))
            },
            Token::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(Token::RParen)?;
                Some(Expr::Grouping(Box::new(inner)))
            },
            Token::LBrace => self.parse_block().map(Expr::Block),
            Token::If => self.parse_if(false).map(|node| Expr::If(Box::new(node))),
            _ => {
                self.error(format!("expected an expression, found {:?}", self.current_token()));
                None
            },
        }
    }

    /// Parses `if cond BODY (elif cond BODY)* (else BODY)?`.
    ///
    /// `is_statement` controls nothing about the grammar here; it is
    /// recorded on the node for the checker, which requires `else` only
    /// when the `if` is used as an expression.
    pub(crate) fn parse_if(&mut self, is_statement: bool) -> Option<If> {
        let span = self.current_span();
        self.expect(Token::If)?;
        let cond = Box::new(self.parse_expr()?);
        let then_branch = self.parse_control_flow_body()?;

        let mut elifs = Vec::new();
        while self.match_token(Token::Elif) {
            let elif_cond = self.parse_expr()?;
            let elif_body = self.parse_control_flow_body()?;
            elifs.push((elif_cond, elif_body));
        }

        let else_branch = if self.match_token(Token::Else) {
            Some(self.parse_control_flow_body()?)
        } else {
            None
        };

        Some(If { cond, then_branch, elifs, else_branch, is_statement, span })
    }

    /// Parses a control-flow body: a brace-delimited block, or (only
    /// meaningful for `if`) a bare expression.
    fn parse_control_flow_body(&mut self) -> Option<ControlFlowBody> {
        if self.check(Token::LBrace) {
            Some(ControlFlowBody::Block(self.parse_block()?))
        } else {
            Some(ControlFlowBody::Expr(Box::new(self.parse_expr()?)))
        }
    }

    pub(crate) fn parse_block(&mut self) -> Option<crate::ast::Block> {
        let span_start = self.current_span();
        self.expect(Token::LBrace)?;
        self.skip_terminators();

        let mut stmts = Vec::new();
        while !self.check(Token::RBrace) && !self.is_at_end() {
            match self.parse_stmt() {
                Some(stmt) => stmts.push(stmt),
                None => self.recover_to_sync_point(),
            }
            self.skip_terminators();
        }
        self.expect(Token::RBrace)?;

        Some(crate::ast::Block { stmts, span: span_start })
    }
}
