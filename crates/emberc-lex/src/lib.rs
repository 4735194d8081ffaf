//! emberc-lex - Lexical analysis for the Ember language.
//!
//! Converts source text into a stream of [`Token`]s. The lexer is a lazy
//! producer: [`Lexer`] implements [`Iterator`], pulling one token at a
//! time from a [`Cursor`](cursor::Cursor) over the source buffer.
//!
//! Whitespace and comments (`//` line comments, nestable `/* */` block
//! comments) are consumed silently. A physical newline is not whitespace:
//! it is emitted as [`Token::Newline`], since the language is
//! newline-significant. Lexing never aborts; malformed input produces a
//! [`Token::Error`] and scanning resumes at the next character, so the
//! parser always receives a complete, EOF-terminated stream.

mod cursor;
mod unicode;

pub mod lexer;
pub mod token;

pub use lexer::Lexer;
pub use token::{keyword_from_ident, Token};
