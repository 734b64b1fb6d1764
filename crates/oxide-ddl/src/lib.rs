//! # oxide-ddl
//!
//! Typed DDL statement nodes for MySQL-family databases, plus a parser for
//! the expressions that may appear as functional index key parts.
//!
//! Statements are built directly from typed nodes; this crate does not parse
//! whole SQL statements. Key expressions are the exception because the
//! catalog stores them as text and needs to compare them structurally:
//!
//! ```rust
//! use oxide_ddl::parser::parse_expression;
//!
//! let a = parse_expression("(id + 1)").unwrap();
//! let b = parse_expression("`id`+1").unwrap();
//! assert_eq!(a, b);
//! assert_eq!(a.to_string(), "`id`+1");
//! ```
//!
//! Building a statement:
//!
//! ```rust
//! use oxide_ddl::ast::{ColumnDef, CreateTableStatement, Statement, TableConstraint};
//!
//! let stmt: Statement = CreateTableStatement::new("t")
//!     .column(ColumnDef::new("a", "int").primary_key().default_value("1"))
//!     .column(ColumnDef::new("b", "varchar(200)").unique())
//!     .constraint(TableConstraint::index(["b", "a"]))
//!     .into();
//! assert_eq!(stmt.kind_name(), "CREATE TABLE");
//! ```

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{Expr, Statement};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{parse_expression, ParseError, Parser};
