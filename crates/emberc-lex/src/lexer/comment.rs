//! Comment lexing.
//!
//! Skips line (`//`) and nestable block (`/* ... */`) comments. A physical
//! newline is left untouched here: it is not whitespace in this language,
//! it is its own token, produced by [`Lexer::next_token`].

use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Skips a block comment, including nested `/* */` pairs.
    pub fn skip_block_comment(&mut self) {
        const MAX_COMMENT_DEPTH: u32 = 100;
        let mut depth = 1;

        while depth > 0 && !self.cursor.is_at_end() {
            if depth > MAX_COMMENT_DEPTH {
                self.report_error(format!(
                    "block comment nesting too deep (maximum is {} levels)",
                    MAX_COMMENT_DEPTH
                ));
                return;
            }

            if self.cursor.current_char() == '/' && self.cursor.peek_char(1) == '*' {
                self.cursor.advance();
                self.cursor.advance();
                depth += 1;
            } else if self.cursor.current_char() == '*' && self.cursor.peek_char(1) == '/' {
                self.cursor.advance();
                self.cursor.advance();
                depth -= 1;
                if depth == 1 {
                    return;
                }
            } else {
                self.cursor.advance();
            }
        }

        if depth > 0 {
            self.report_error("unterminated block comment".to_string());
        }
    }

    /// Skips spaces, tabs, carriage returns, and comments. Does not
    /// consume `\n`, since a newline is a significant token in this
    /// language, not whitespace.
    pub fn skip_whitespace_and_comments(&mut self) {
        if !self.bom_checked {
            self.bom_checked = true;
            if self.cursor.remaining().starts_with('\u{FEFF}') {
                self.cursor.advance();
            }
        }

        loop {
            if self.cursor.is_at_end() {
                return;
            }

            match self.cursor.current_char() {
                ' ' | '\t' | '\r' => {
                    self.cursor.advance();
                },
                '/' => {
                    let next = self.cursor.peek_char(1);
                    if next == '/' {
                        self.skip_line_comment();
                    } else if next == '*' {
                        self.skip_block_comment();
                    } else {
                        return;
                    }
                },
                _ => return,
            }
        }
    }

    /// Skips a line comment (from `//` to, but not including, the newline).
    fn skip_line_comment(&mut self) {
        self.cursor.advance();
        self.cursor.advance();

        while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
            self.cursor.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;
    use emberc_util::{Handler, Symbol};

    fn next_after_skip(source: &str) -> Token {
        let handler = Handler::new();
        let mut lexer = crate::Lexer::new(source, &handler);
        lexer.skip_whitespace_and_comments();
        lexer.next_token()
    }

    #[test]
    fn skips_spaces_and_tabs() {
        assert_eq!(next_after_skip("  \thello"), Token::Ident(Symbol::intern("hello")));
    }

    #[test]
    fn skips_line_comment_but_not_newline() {
        assert_eq!(next_after_skip("// comment\nhello"), Token::Newline);
    }

    #[test]
    fn skips_block_comment() {
        assert_eq!(next_after_skip("/* comment */hello"), Token::Ident(Symbol::intern("hello")));
    }

    #[test]
    fn nested_block_comment() {
        // `/* a /* b */ c */x` must resume right after the outer close.
        assert_eq!(next_after_skip("/* a /* b */ c */x"), Token::Ident(Symbol::intern("x")));
    }
}
