/*!
# Rust Language Module

This Rust module provides lexical analysis of tape source and the
scoped label history the assembler resolves names against.

*/

#[macro_use]
mod error;
mod lex;
mod symbol;
mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::lex;
pub use lex::Lexeme;
pub use symbol::Label;
pub use symbol::Symbols;
pub use token::Literal;
pub use token::Operator;
pub use token::Token;

pub type LineNumber = Option<usize>;
pub type Column = std::ops::Range<usize>;
