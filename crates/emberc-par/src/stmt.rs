//! Statement parsing: block, expression, if, while, and declarations.

use emberc_lex::Token;

use crate::ast::{ControlFlowBody, Decl, Stmt, WhileStmt};
use crate::Parser;

impl<'a> Parser<'a> {
    pub fn parse_stmt(&mut self) -> Option<Stmt> {
        match self.current_token() {
            Token::Var | Token::Let => self.parse_decl().map(Stmt::Decl),
            Token::If => self.parse_if(true).map(Stmt::If),
            Token::While => self.parse_while().map(Stmt::While),
            Token::LBrace => self.parse_block().map(Stmt::Block),
            _ => self.parse_expr().map(Stmt::Expr),
        }
    }

    fn parse_decl(&mut self) -> Option<Decl> {
        let span = self.current_span();
        let mutable = self.match_token(Token::Var);
        if !mutable {
            self.expect(Token::Let)?;
        }

        let name_span = self.current_span();
        let name = match self.current_token() {
            Token::Ident(name) => {
                self.advance();
                name
            },
            _ => {
                self.error("expected a variable name".to_string());
                return None;
            },
        };

        let ty = if self.match_token(Token::Colon) {
            Some(self.parse_type_repr()?)
        } else {
            None
        };

        let init = if self.match_token(Token::Eq) {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };

        Some(Decl { mutable, name, name_span, ty, init, span })
    }

    fn parse_while(&mut self) -> Option<WhileStmt> {
        let span = self.current_span();
        self.expect(Token::While)?;
        let cond = Box::new(self.parse_expr()?);
        let body = if self.check(Token::LBrace) {
            ControlFlowBody::Block(self.parse_block()?)
        } else {
            ControlFlowBody::Expr(Box::new(self.parse_expr()?))
        };
        Some(WhileStmt { cond, body, span })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emberc_util::Handler;

    fn parse_one(source: &str) -> Stmt {
        let handler = Handler::new();
        let mut parser = Parser::new(source, &handler);
        let stmt = parser.parse_stmt().expect("expected a parseable statement");
        assert!(!handler.has_errors());
        stmt
    }

    #[test]
    fn var_declaration_with_initializer() {
        let stmt = parse_one("var x = 3");
        match stmt {
            Stmt::Decl(decl) => {
                assert!(decl.mutable);
                assert!(decl.ty.is_none());
                assert!(decl.init.is_some());
            },
            other => panic!("expected a declaration, got {:?}", other),
        }
    }

    #[test]
    fn let_declaration_is_immutable() {
        let stmt = parse_one("let y = 1");
        match stmt {
            Stmt::Decl(decl) => assert!(!decl.mutable),
            other => panic!("expected a declaration, got {:?}", other),
        }
    }

    #[test]
    fn declaration_with_explicit_type() {
        let stmt = parse_one("var x: i64 = 3");
        match stmt {
            Stmt::Decl(decl) => assert!(decl.ty.is_some()),
            other => panic!("expected a declaration, got {:?}", other),
        }
    }

    #[test]
    fn while_statement_with_block_body() {
        let stmt = parse_one("while i < 3 { i += 1 }");
        assert!(matches!(stmt, Stmt::While(_)));
    }

    #[test]
    fn if_statement_else_is_optional() {
        let stmt = parse_one("if true { 1 }");
        match stmt {
            Stmt::If(node) => {
                assert!(node.is_statement);
                assert!(node.else_branch.is_none());
            },
            other => panic!("expected an if statement, got {:?}", other),
        }
    }

    #[test]
    fn if_statement_with_elif_chain() {
        let stmt = parse_one("if false { 1 } elif true { 2 } else { 3 }");
        match stmt {
            Stmt::If(node) => {
                assert_eq!(node.elifs.len(), 1);
                assert!(node.else_branch.is_some());
            },
            other => panic!("expected an if statement, got {:?}", other),
        }
    }
}
