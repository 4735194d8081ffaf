//! Operator and punctuation lexing.
//!
//! Two-character operators are maximal-munch: the lexer always looks one
//! character ahead before committing to the shorter token. Comments are
//! already stripped by [`Lexer::skip_whitespace_and_comments`] before this
//! module ever sees a `/`.

use crate::token::Token;
use crate::Lexer;

impl<'a> Lexer<'a> {
    pub fn lex_plus(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::PlusEq
        } else {
            Token::Plus
        }
    }

    pub fn lex_minus(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::MinusEq
        } else {
            Token::Minus
        }
    }

    pub fn lex_star(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::StarEq
        } else {
            Token::Star
        }
    }

    pub fn lex_slash(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::SlashEq
        } else {
            Token::Slash
        }
    }

    pub fn lex_percent(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::PercentEq
        } else {
            Token::Percent
        }
    }

    pub fn lex_equals(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::EqEq
        } else {
            Token::Eq
        }
    }

    pub fn lex_bang(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::BangEq
        } else {
            Token::Bang
        }
    }

    pub fn lex_less(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::LessEq
        } else {
            Token::Less
        }
    }

    pub fn lex_greater(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::GreaterEq
        } else {
            Token::Greater
        }
    }

    pub fn lex_ampersand(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('&') {
            Token::AndAnd
        } else {
            let start = self.token_start;
            self.report_error("unexpected character '&'".to_string());
            Token::Error(emberc_util::DiagnosticCode::E_LEXER_INVALID_CHARACTER, start)
        }
    }

    pub fn lex_pipe(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('|') {
            Token::OrOr
        } else {
            let start = self.token_start;
            self.report_error("unexpected character '|'".to_string());
            Token::Error(emberc_util::DiagnosticCode::E_LEXER_INVALID_CHARACTER, start)
        }
    }

    pub fn lex_colon(&mut self) -> Token {
        self.cursor.advance();
        Token::Colon
    }

    /// Lexes `.`, `...`, or `..<`. A plain `.` or `..` is tokenized for
    /// completeness but has no grammar production in the parser.
    pub fn lex_dot(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.current_char() == '.' && self.cursor.peek_char(1) == '.' {
            self.cursor.advance();
            self.cursor.advance();
            return Token::DotDotDot;
        }
        if self.cursor.current_char() == '.' && self.cursor.peek_char(1) == '<' {
            self.cursor.advance();
            self.cursor.advance();
            return Token::DotDotLt;
        }
        Token::Dot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emberc_util::Handler;

    fn lex_op(source: &str) -> Token {
        let handler = Handler::new();
        let mut lexer = crate::Lexer::new(source, &handler);
        lexer.next_token()
    }

    #[test]
    fn single_char_operators() {
        assert_eq!(lex_op("+"), Token::Plus);
        assert_eq!(lex_op("-"), Token::Minus);
        assert_eq!(lex_op("*"), Token::Star);
        assert_eq!(lex_op("/"), Token::Slash);
        assert_eq!(lex_op("%"), Token::Percent);
        assert_eq!(lex_op("="), Token::Eq);
        assert_eq!(lex_op("!"), Token::Bang);
        assert_eq!(lex_op("<"), Token::Less);
        assert_eq!(lex_op(">"), Token::Greater);
    }

    #[test]
    fn compound_assignment_operators() {
        assert_eq!(lex_op("+="), Token::PlusEq);
        assert_eq!(lex_op("-="), Token::MinusEq);
        assert_eq!(lex_op("*="), Token::StarEq);
        assert_eq!(lex_op("/="), Token::SlashEq);
        assert_eq!(lex_op("%="), Token::PercentEq);
    }

    #[test]
    fn comparison_operators() {
        assert_eq!(lex_op("=="), Token::EqEq);
        assert_eq!(lex_op("!="), Token::BangEq);
        assert_eq!(lex_op("<="), Token::LessEq);
        assert_eq!(lex_op(">="), Token::GreaterEq);
    }

    #[test]
    fn boolean_operators() {
        assert_eq!(lex_op("&&"), Token::AndAnd);
        assert_eq!(lex_op("||"), Token::OrOr);
    }

    #[test]
    fn maximal_munch_prefers_longer_operator() {
        assert_eq!(lex_op("+=1"), Token::PlusEq);
        assert_eq!(lex_op("<=x"), Token::LessEq);
    }

    #[test]
    fn dot_family() {
        assert_eq!(lex_op("."), Token::Dot);
        assert_eq!(lex_op("..<"), Token::DotDotLt);
        assert_eq!(lex_op("..."), Token::DotDotDot);
    }
}
