//! Key-expression parser.
//!
//! A recursive descent parser with Pratt operator precedence, covering the
//! expression forms MySQL accepts as functional key parts.

mod error;
mod parser;
mod pratt;

pub use error::ParseError;
pub use parser::{parse_expression, Parser};
