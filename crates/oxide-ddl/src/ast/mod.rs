//! Abstract Syntax Tree (AST) types for DDL statements.

mod expression;
mod statement;
mod table;

pub use expression::{BinaryOp, Expr, FunctionCall, Literal, UnaryOp, COMPARISON_PRECEDENCE};
pub use statement::{
    AlterSpec, AlterTableStatement, CreateIndexStatement, CreateTableStatement,
    CreateViewStatement, DropIndexStatement, DropTableStatement, DropViewStatement, IndexKind,
    RenameTableStatement, Statement,
};
pub use table::{
    ColumnDef, ColumnOption, ColumnPosition, ConstraintKind, DefaultValue, IndexOptions, KeyPart,
    Reference, ReferentialAction, TableConstraint, TableName, TableOption,
};
