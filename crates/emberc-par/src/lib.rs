//! emberc-par - Recursive-descent parser for the Ember language.
//!
//! Consumes the token stream produced by [`emberc_lex::Lexer`] and builds
//! the untyped [`ast`]. Parsing never aborts: a malformed construct is
//! reported through the [`Handler`] and the parser recovers by skipping
//! to the next statement terminator, so a single syntax error does not
//! prevent later statements from being parsed and checked.

pub mod ast;
mod expr;
mod stmt;
pub mod types;

use emberc_lex::{Lexer, Token};
use emberc_util::{DiagnosticBuilder, Handler, Span};

use ast::Module;

/// Recursive-descent parser over a fully-lexed token stream.
pub struct Parser<'a> {
    tokens: Vec<Token>,
    spans: Vec<Span>,
    pos: usize,
    handler: &'a Handler,
}

impl<'a> Parser<'a> {
    /// Lexes `source` in full and builds a parser over the resulting
    /// token stream. Lexer-level errors (invalid characters, unterminated
    /// strings, ...) are reported through `handler` as they are produced.
    pub fn new(source: &'a str, handler: &'a Handler) -> Self {
        let mut tokens = Vec::new();
        let mut spans = Vec::new();
        let mut lexer = Lexer::new(source, handler);

        loop {
            let start = lexer.token_start();
            let token = lexer.next_token();
            let end = lexer.position();
            let is_eof = token == Token::Eof;
            spans.push(Span::new(start, end, lexer.line(), lexer.column()));
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        Self {
            tokens,
            spans,
            pos: 0,
            handler: lexer.handler,
        }
    }
}

impl<'a> Parser<'a> {
    /// Parses a complete source file.
    pub fn parse_module(&mut self) -> Module {
        let mut stmts = Vec::new();
        self.skip_terminators();

        while !self.is_at_end() {
            match self.parse_stmt() {
                Some(stmt) => stmts.push(stmt),
                None => self.recover_to_sync_point(),
            }
            self.skip_terminators();
        }

        Module { stmts }
    }

    pub(crate) fn current_token(&self) -> Token {
        self.tokens[self.pos]
    }

    pub(crate) fn current_span(&self) -> Span {
        self.spans[self.pos]
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.current_token() == Token::Eof
    }

    pub(crate) fn advance(&mut self) -> Token {
        let tok = self.current_token();
        if !self.is_at_end() {
            self.pos += 1;
        }
        tok
    }

    pub(crate) fn check(&self, token: Token) -> bool {
        self.current_token() == token
    }

    pub(crate) fn match_token(&mut self, token: Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, token: Token) -> Option<()> {
        if self.match_token(token) {
            Some(())
        } else {
            self.error(format!("expected {:?}, found {:?}", token, self.current_token()));
            None
        }
    }

    /// A statement terminator is a newline, a semicolon, or EOF; a run of
    /// several in a row collapses to a single boundary.
    pub(crate) fn at_terminator(&self) -> bool {
        matches!(self.current_token(), Token::Newline | Token::Semicolon) || self.is_at_end()
    }

    pub(crate) fn skip_terminators(&mut self) {
        while matches!(self.current_token(), Token::Newline | Token::Semicolon) {
            self.advance();
        }
    }

    pub(crate) fn error(&mut self, message: String) {
        let span = self.current_span();
        DiagnosticBuilder::error(message).span(span).emit(self.handler);
    }

    /// Skips tokens until the next statement terminator (consuming it) or
    /// EOF, so one malformed statement doesn't desynchronize the rest of
    /// the parse.
    pub(crate) fn recover_to_sync_point(&mut self) {
        while !self.is_at_end() && !self.at_terminator() {
            self.advance();
        }
        self.skip_terminators();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> (Module, bool) {
        let mut handler = Handler::new();
        let mut parser = Parser::new(source, &mut handler);
        let module = parser.parse_module();
        (module, handler.had_error())
    }

    #[test]
    fn empty_module_has_no_statements() {
        let (module, had_error) = parse("");
        assert!(module.stmts.is_empty());
        assert!(!had_error);
    }

    #[test]
    fn blank_lines_between_statements_collapse() {
        let (module, had_error) = parse("1\n\n\n2");
        assert_eq!(module.stmts.len(), 2);
        assert!(!had_error);
    }

    #[test]
    fn malformed_statement_recovers_at_next_line() {
        let (module, had_error) = parse("@@@\n1");
        assert!(had_error);
        assert_eq!(module.stmts.len(), 1);
    }
}
