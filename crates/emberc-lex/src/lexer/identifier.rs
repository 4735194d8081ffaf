//! Identifier and keyword lexing.
//!
//! This module handles lexing of identifiers and keywords. Builtin type
//! names (`i64`, `bool`, ...) are not part of the keyword table: they lex
//! as ordinary identifiers and are resolved contextually by the checker.

use crate::token::{keyword_from_ident, Token};
use crate::unicode::is_ascii_ident_continue;
use crate::Lexer;
use emberc_util::Symbol;

impl<'a> Lexer<'a> {
    /// Lexes an identifier or keyword.
    ///
    /// Identifiers start with a letter or underscore, followed by
    /// alphanumeric characters or underscores. After reading the identifier,
    /// checks if it matches a reserved keyword.
    pub fn lex_identifier(&mut self) -> Token {
        while is_ascii_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(self.token_start);

        keyword_from_ident(text).unwrap_or_else(|| Token::Ident(Symbol::intern(text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emberc_util::Handler;

    fn lex_ident(source: &str) -> Token {
        let handler = Handler::new();
        let mut lexer = crate::Lexer::new(source, &handler);
        lexer.lex_identifier()
    }

    #[test]
    fn plain_identifier() {
        assert_eq!(lex_ident("foo"), Token::Ident(Symbol::intern("foo")));
    }

    #[test]
    fn identifier_with_underscore_and_digits() {
        assert_eq!(lex_ident("foo_bar_123"), Token::Ident(Symbol::intern("foo_bar_123")));
    }

    #[test]
    fn builtin_type_name_is_an_identifier() {
        assert_eq!(lex_ident("i64"), Token::Ident(Symbol::intern("i64")));
        assert_eq!(lex_ident("bool"), Token::Ident(Symbol::intern("bool")));
    }

    #[test]
    fn keyword_var() {
        assert_eq!(lex_ident("var"), Token::Var);
    }

    #[test]
    fn keyword_let() {
        assert_eq!(lex_ident("let"), Token::Let);
    }

    #[test]
    fn keyword_if_elif_else() {
        assert_eq!(lex_ident("if"), Token::If);
        assert_eq!(lex_ident("elif"), Token::Elif);
        assert_eq!(lex_ident("else"), Token::Else);
    }

    #[test]
    fn keyword_while() {
        assert_eq!(lex_ident("while"), Token::While);
    }

    #[test]
    fn keyword_true_false_nil() {
        assert_eq!(lex_ident("true"), Token::True);
        assert_eq!(lex_ident("false"), Token::False);
        assert_eq!(lex_ident("nil"), Token::Nil);
    }

    #[test]
    fn keyword_self_and_super() {
        assert_eq!(lex_ident("self"), Token::SelfKw);
        assert_eq!(lex_ident("super"), Token::Super);
    }

    #[test]
    fn keyword_func_class_init() {
        assert_eq!(lex_ident("func"), Token::Func);
        assert_eq!(lex_ident("class"), Token::Class);
        assert_eq!(lex_ident("init"), Token::Init);
    }

    #[test]
    fn keyword_private_override() {
        assert_eq!(lex_ident("private"), Token::Private);
        assert_eq!(lex_ident("override"), Token::Override);
    }
}
