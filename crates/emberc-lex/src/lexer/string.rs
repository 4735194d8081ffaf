//! String literal lexing.
//!
//! This module handles lexing of double-quoted string literals, including
//! their escape sequences.

use crate::token::Token;
use crate::Lexer;
use emberc_util::Symbol;

impl<'a> Lexer<'a> {
    /// Lexes a string literal, consuming the opening and closing `"`.
    ///
    /// An invalid escape sequence is reported but does not abort the
    /// literal: scanning continues to the closing quote so the rest of the
    /// source is still tokenized normally. A physical newline inside the
    /// literal, or running out of input, is reported at the opening quote.
    pub fn lex_string(&mut self) -> Token {
        self.cursor.advance();

        let mut content = String::new();
        let mut ok = true;

        loop {
            if self.cursor.is_at_end() {
                self.report_error("unterminated string literal".to_string());
                ok = false;
                break;
            }

            let c = self.cursor.current_char();

            if c == '"' {
                self.cursor.advance();
                break;
            }

            if c == '\n' {
                self.report_error("unterminated string literal".to_string());
                ok = false;
                break;
            }

            if c == '\\' {
                self.cursor.advance();
                match self.parse_escape() {
                    Some(escaped) => content.push(escaped),
                    None => ok = false,
                }
            } else {
                content.push(c);
                self.cursor.advance();
            }
        }

        if ok {
            Token::String(Symbol::intern(&content))
        } else {
            Token::Error(emberc_util::DiagnosticCode::E_LEXER_INVALID_ESCAPE, self.token_start)
        }
    }

    /// Parses one escape sequence after the backslash has been consumed.
    ///
    /// Recognized escapes: `\0 \\ \t \n \r \" \'`. An unrecognized escape
    /// is reported but the scan still advances past it, keeping the
    /// lexer in sync for the rest of the literal.
    fn parse_escape(&mut self) -> Option<char> {
        if self.cursor.is_at_end() || self.cursor.current_char() == '\n' {
            self.report_error("unterminated escape sequence".to_string());
            return None;
        }

        let c = self.cursor.current_char();
        self.cursor.advance();

        match c {
            '0' => Some('\0'),
            '\\' => Some('\\'),
            't' => Some('\t'),
            'n' => Some('\n'),
            'r' => Some('\r'),
            '"' => Some('"'),
            '\'' => Some('\''),
            _ => {
                self.report_error(format!("invalid escape sequence '\\{}'", c));
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emberc_util::Handler;

    fn lex_str(source: &str) -> Token {
        let handler = Handler::new();
        let mut lexer = crate::Lexer::new(source, &handler);
        lexer.lex_string()
    }

    #[test]
    fn simple_string() {
        assert_eq!(lex_str("\"hello\""), Token::String(Symbol::intern("hello")));
    }

    #[test]
    fn string_with_escapes() {
        assert_eq!(
            lex_str("\"hello\\nworld\""),
            Token::String(Symbol::intern("hello\nworld"))
        );
        assert_eq!(lex_str("\"a\\tb\""), Token::String(Symbol::intern("a\tb")));
        assert_eq!(lex_str("\"q\\\"q\""), Token::String(Symbol::intern("q\"q")));
    }

    #[test]
    fn invalid_escape_continues_to_closing_quote() {
        // "a\qb" - \q is not a recognized escape, but the literal still
        // closes cleanly as a single error token spanning the whole thing.
        let handler = Handler::new();
        let mut lexer = crate::Lexer::new("\"a\\qb\"", &handler);
        let tok = lexer.lex_string();
        assert!(matches!(tok, Token::Error(_, _)));
        assert!(handler.has_errors());
    }

    #[test]
    fn unterminated_string_reported_at_opening_quote() {
        let handler = Handler::new();
        let mut lexer = crate::Lexer::new("\"abc", &handler);
        let tok = lexer.lex_string();
        assert!(matches!(tok, Token::Error(_, _)));
        assert!(handler.has_errors());
    }

    #[test]
    fn physical_newline_in_string_is_fatal() {
        let handler = Handler::new();
        let mut lexer = crate::Lexer::new("\"abc\ndef\"", &handler);
        let tok = lexer.lex_string();
        assert!(matches!(tok, Token::Error(_, _)));
    }
}
