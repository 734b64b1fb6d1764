//! In-memory catalog for MySQL-family schemas.
//!
//! `oxide-catalog` simulates how a schema evolves under DDL, without ever
//! touching a live database:
//!
//! - **Model** - `Database` / `Schema` / `Table` / `Column` / `Index` /
//!   `ForeignKey` / `View` snapshots, serializable with serde
//! - **Finder** - Read-only lookups used by advisors
//! - **Walk-through** - Replays typed statements against a snapshot and
//!   fails fast on the first invalid one
//! - **Differ** - Computes ordered statements that turn one snapshot into
//!   another
//! - **Dialect** - Renders statements as SQL text
//!
//! # Example
//!
//! ```rust
//! use oxide_catalog::prelude::*;
//! use oxide_ddl::ast::{ColumnDef, CreateTableStatement, IndexOptions, TableConstraint};
//!
//! let book = |method: &str| -> Statement {
//!     CreateTableStatement::new("book")
//!         .column(ColumnDef::new("name", "varchar(50)").not_null())
//!         .constraint(
//!             TableConstraint::index(["name"])
//!                 .named("book_idx")
//!                 .with_options(IndexOptions::new().using(method)),
//!         )
//!         .into()
//! };
//!
//! let empty = Database::new("test", Engine::MySql);
//! let old = walk_through(empty.clone(), &[book("BTREE")], WalkOptions::new()).unwrap();
//! let new = walk_through(empty, &[book("HASH")], WalkOptions::new()).unwrap();
//!
//! assert_eq!(
//!     Differ::new().diff_text(&old, &new).unwrap(),
//!     "ALTER TABLE `book` DROP INDEX `book_idx`;\n\
//!      ALTER TABLE `book` ADD INDEX `book_idx`(`name`) USING HASH;\n"
//! );
//! ```

mod alter;
pub mod dialect;
pub mod differ;
pub mod error;
pub mod finder;
pub mod keys;
pub mod model;
pub mod state;
pub mod types;

pub use differ::{schema_diff, DiffOptions, Differ};
pub use error::{CatalogError, ErrorKind, Result, WalkFailure};
pub use finder::{join_index_expressions, Finder};
pub use model::{
    Column, Database, Engine, Extension, ForeignKey, Index, Schema, Table, View,
    PRIMARY_KEY_NAME,
};
pub use state::{walk_through, CatalogState, WalkOptions, DEFAULT_SCHEMA};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::dialect::{CatalogDialect, MySqlDialect};
    pub use crate::differ::{indexes_equal, schema_diff, DiffOptions, Differ};
    pub use crate::error::{CatalogError, ErrorKind, Result, WalkFailure};
    pub use crate::finder::{join_index_expressions, Finder};
    pub use crate::model::{
        Column, Database, Engine, Extension, ForeignKey, Index, Schema, Table, View,
        PRIMARY_KEY_NAME,
    };
    pub use crate::state::{walk_through, CatalogState, WalkOptions, DEFAULT_SCHEMA};
    pub use crate::types::{display_type, normalize_type};
    pub use oxide_ddl::ast::Statement;
}
