//! Key-expression lexer.
//!
//! A hand-written lexer producing the tokens the expression parser needs.
//! It understands MySQL quoting rules (backquoted identifiers, single and
//! double quoted strings) and both comment styles.

mod span;
mod token;
mod tokenizer;

pub use span::Span;
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;
