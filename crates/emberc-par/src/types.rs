//! Syntactic type annotations.
//!
//! A type annotation in a variable declaration is just a bare name: there
//! are no user-defined types, generics, or compound type syntax. The name
//! is carried unresolved; the checker decides whether it names a builtin
//! type (`i64`, `bool`, ...) or is simply unknown.

use emberc_util::{Span, Symbol};

use crate::Parser;
use emberc_lex::Token;

#[derive(Debug, Clone)]
pub struct TypeRepr {
    pub name: Symbol,
    pub span: Span,
}

impl<'a> Parser<'a> {
    /// Parses a type annotation: a single identifier naming a builtin
    /// type. Called right after a `:` has been consumed.
    pub fn parse_type_repr(&mut self) -> Option<TypeRepr> {
        let span = self.current_span();
        match self.current_token() {
            Token::Ident(name) => {
                self.advance();
                Some(TypeRepr { name, span })
            },
            _ => {
                self.error("expected a type name".to_string());
                None
            },
        }
    }
}
