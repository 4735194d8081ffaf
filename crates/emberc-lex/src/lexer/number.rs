//! Number literal lexing.
//!
//! Implements the decimal/exponent DFA: an integer literal optionally grows
//! a decimal part (`.` followed by a digit) and optionally grows an exponent
//! (`e`/`E`, an optional sign, then digits). A literal that never leaves the
//! integer state lexes as `Token::Int`; anything that enters the decimal or
//! exponent states lexes as `Token::Float`.

use crate::token::Token;
use crate::Lexer;
use emberc_util::DiagnosticCode;

impl<'a> Lexer<'a> {
    pub fn lex_number(&mut self) -> Token {
        let mut is_float = false;

        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        if self.cursor.current_char() == '.' && self.cursor.peek_char(1).is_ascii_digit() {
            is_float = true;
            self.cursor.advance();
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
        }

        if self.cursor.current_char() == 'e' || self.cursor.current_char() == 'E' {
            let mut lookahead = 1;
            if self.cursor.peek_char(1) == '+' || self.cursor.peek_char(1) == '-' {
                lookahead = 2;
            }
            if self.cursor.peek_char(lookahead).is_ascii_digit() {
                is_float = true;
                self.cursor.advance();
                if self.cursor.current_char() == '+' || self.cursor.current_char() == '-' {
                    self.cursor.advance();
                }
                while self.cursor.current_char().is_ascii_digit() {
                    self.cursor.advance();
                }
            }
        }

        let text = self.cursor.slice_from(self.token_start);

        if is_float {
            match text.parse::<f64>() {
                Ok(value) => Token::Float(value),
                Err(_) => {
                    let start = self.token_start;
                    self.report_error(format!("invalid floating-point literal '{}'", text));
                    Token::Error(DiagnosticCode::E_LEXER_INVALID_CHARACTER, start)
                },
            }
        } else {
            match text.parse::<i64>() {
                Ok(value) => Token::Int(value),
                Err(_) => {
                    let start = self.token_start;
                    self.report_error(format!("integer literal '{}' out of range", text));
                    Token::Error(DiagnosticCode::E_LEXER_INVALID_CHARACTER, start)
                },
            }
        }
    }
}
