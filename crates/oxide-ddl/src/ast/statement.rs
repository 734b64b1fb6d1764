//! DDL statement types.

use serde::{Deserialize, Serialize};

use super::{
    ColumnDef, ColumnPosition, DefaultValue, IndexOptions, KeyPart, TableConstraint, TableName,
    TableOption,
};

/// A DDL statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// CREATE TABLE
    CreateTable(CreateTableStatement),
    /// ALTER TABLE
    AlterTable(AlterTableStatement),
    /// CREATE INDEX
    CreateIndex(CreateIndexStatement),
    /// DROP INDEX ... ON ...
    DropIndex(DropIndexStatement),
    /// DROP TABLE
    DropTable(DropTableStatement),
    /// RENAME TABLE
    RenameTable(RenameTableStatement),
    /// CREATE [OR REPLACE] VIEW
    CreateView(CreateViewStatement),
    /// DROP VIEW
    DropView(DropViewStatement),
    /// A statement the parser recognized but that has no typed form here.
    Other {
        /// Short description of the statement (e.g. `CREATE TRIGGER`).
        kind: String,
    },
}

/// CREATE TABLE statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTableStatement {
    /// Table to create.
    pub table: TableName,
    /// IF NOT EXISTS.
    pub if_not_exists: bool,
    /// Column definitions.
    pub columns: Vec<ColumnDef>,
    /// Table-level constraints and index clauses.
    pub constraints: Vec<TableConstraint>,
    /// Table options.
    pub options: Vec<TableOption>,
}

impl CreateTableStatement {
    /// Creates an empty CREATE TABLE for `table`.
    #[must_use]
    pub fn new(table: impl Into<TableName>) -> Self {
        Self {
            table: table.into(),
            if_not_exists: false,
            columns: Vec::new(),
            constraints: Vec::new(),
            options: Vec::new(),
        }
    }

    /// Sets IF NOT EXISTS.
    #[must_use]
    pub const fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    /// Appends a column.
    #[must_use]
    pub fn column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }

    /// Appends a table-level constraint.
    #[must_use]
    pub fn constraint(mut self, constraint: TableConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Appends a table option.
    #[must_use]
    pub fn option(mut self, option: TableOption) -> Self {
        self.options.push(option);
        self
    }
}

/// ALTER TABLE statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlterTableStatement {
    /// Table to alter.
    pub table: TableName,
    /// Clauses, applied left to right.
    pub specs: Vec<AlterSpec>,
}

impl AlterTableStatement {
    /// Creates an ALTER TABLE with no clauses.
    #[must_use]
    pub fn new(table: impl Into<TableName>) -> Self {
        Self {
            table: table.into(),
            specs: Vec::new(),
        }
    }

    /// Appends a clause.
    #[must_use]
    pub fn spec(mut self, spec: AlterSpec) -> Self {
        self.specs.push(spec);
        self
    }
}

/// One clause of an ALTER TABLE statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AlterSpec {
    /// Table options (COLLATE, ENGINE, COMMENT).
    TableOptions(Vec<TableOption>),
    /// ADD COLUMN, one or more columns.
    AddColumns {
        /// The new columns.
        columns: Vec<ColumnDef>,
        /// Placement (only meaningful for a single column).
        position: ColumnPosition,
    },
    /// DROP COLUMN.
    DropColumn(String),
    /// MODIFY COLUMN.
    ModifyColumn {
        /// New definition; the name selects the column.
        column: ColumnDef,
        /// Placement.
        position: ColumnPosition,
    },
    /// CHANGE COLUMN.
    ChangeColumn {
        /// Current column name.
        old_name: String,
        /// New definition, including the new name.
        column: ColumnDef,
        /// Placement.
        position: ColumnPosition,
    },
    /// RENAME COLUMN ... TO ...
    RenameColumn {
        /// Current name.
        from: String,
        /// New name.
        to: String,
    },
    /// ALTER COLUMN ... DROP DEFAULT.
    DropDefault(String),
    /// ALTER COLUMN ... SET DEFAULT.
    SetDefault {
        /// Column name.
        column: String,
        /// New default.
        value: DefaultValue,
    },
    /// ADD INDEX / ADD CONSTRAINT.
    AddConstraint(TableConstraint),
    /// DROP INDEX / DROP KEY.
    DropIndex(String),
    /// DROP PRIMARY KEY.
    DropPrimaryKey,
    /// DROP FOREIGN KEY.
    DropForeignKey(String),
    /// RENAME INDEX ... TO ...
    RenameIndex {
        /// Current name.
        from: String,
        /// New name.
        to: String,
    },
    /// ALTER INDEX ... VISIBLE | INVISIBLE.
    AlterIndexVisibility {
        /// Index name.
        name: String,
        /// Target visibility.
        visible: bool,
    },
    /// RENAME [TO|AS] new_name.
    RenameTable(TableName),
    /// A clause with no typed form here (e.g. `ADD PARTITION`).
    Other(String),
}

impl AlterSpec {
    /// ADD COLUMN with an optional placement.
    #[must_use]
    pub fn add_column(column: ColumnDef, position: ColumnPosition) -> Self {
        Self::AddColumns {
            columns: vec![column],
            position,
        }
    }

    /// MODIFY COLUMN with an optional placement.
    #[must_use]
    pub const fn modify_column(column: ColumnDef, position: ColumnPosition) -> Self {
        Self::ModifyColumn { column, position }
    }

    /// CHANGE COLUMN.
    #[must_use]
    pub fn change_column(
        old_name: impl Into<String>,
        column: ColumnDef,
        position: ColumnPosition,
    ) -> Self {
        Self::ChangeColumn {
            old_name: old_name.into(),
            column,
            position,
        }
    }

    /// RENAME COLUMN.
    #[must_use]
    pub fn rename_column(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::RenameColumn {
            from: from.into(),
            to: to.into(),
        }
    }

    /// RENAME INDEX.
    #[must_use]
    pub fn rename_index(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::RenameIndex {
            from: from.into(),
            to: to.into(),
        }
    }

    /// ALTER INDEX ... VISIBLE | INVISIBLE.
    #[must_use]
    pub fn index_visibility(name: impl Into<String>, visible: bool) -> Self {
        Self::AlterIndexVisibility {
            name: name.into(),
            visible,
        }
    }
}

/// The kind of index created by CREATE INDEX.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexKind {
    /// Plain index.
    #[default]
    Plain,
    /// UNIQUE
    Unique,
    /// FULLTEXT
    FullText,
    /// SPATIAL
    Spatial,
}

/// CREATE INDEX statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateIndexStatement {
    /// Index name.
    pub name: Option<String>,
    /// Table the index is created on.
    pub table: TableName,
    /// Index kind.
    pub kind: IndexKind,
    /// Key parts.
    pub keys: Vec<KeyPart>,
    /// Index attributes.
    pub options: IndexOptions,
}

impl CreateIndexStatement {
    /// Creates a plain CREATE INDEX.
    #[must_use]
    pub fn new<K: Into<KeyPart>>(
        name: impl Into<String>,
        table: impl Into<TableName>,
        keys: impl IntoIterator<Item = K>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            table: table.into(),
            kind: IndexKind::Plain,
            keys: keys.into_iter().map(Into::into).collect(),
            options: IndexOptions::default(),
        }
    }

    /// Sets the index kind.
    #[must_use]
    pub const fn kind(mut self, kind: IndexKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the index attributes.
    #[must_use]
    pub fn with_options(mut self, options: IndexOptions) -> Self {
        self.options = options;
        self
    }
}

/// DROP INDEX statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropIndexStatement {
    /// Index name.
    pub name: String,
    /// Table the index belongs to.
    pub table: TableName,
}

/// DROP TABLE statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropTableStatement {
    /// Tables, dropped in order.
    pub tables: Vec<TableName>,
    /// IF EXISTS.
    pub if_exists: bool,
}

/// RENAME TABLE statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameTableStatement {
    /// `(from, to)` pairs, applied in order.
    pub pairs: Vec<(TableName, TableName)>,
}

/// CREATE VIEW statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateViewStatement {
    /// View name.
    pub name: TableName,
    /// The SELECT text.
    pub definition: String,
    /// OR REPLACE.
    pub or_replace: bool,
}

/// DROP VIEW statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropViewStatement {
    /// Views, dropped in order.
    pub names: Vec<TableName>,
    /// IF EXISTS.
    pub if_exists: bool,
}

impl Statement {
    /// DROP TABLE for the given names.
    #[must_use]
    pub fn drop_tables<T: Into<TableName>>(tables: impl IntoIterator<Item = T>) -> Self {
        Self::DropTable(DropTableStatement {
            tables: tables.into_iter().map(Into::into).collect(),
            if_exists: false,
        })
    }

    /// DROP INDEX `name` ON `table`.
    #[must_use]
    pub fn drop_index(name: impl Into<String>, table: impl Into<TableName>) -> Self {
        Self::DropIndex(DropIndexStatement {
            name: name.into(),
            table: table.into(),
        })
    }

    /// RENAME TABLE `from` TO `to`.
    #[must_use]
    pub fn rename_table(from: impl Into<TableName>, to: impl Into<TableName>) -> Self {
        Self::RenameTable(RenameTableStatement {
            pairs: vec![(from.into(), to.into())],
        })
    }

    /// CREATE VIEW.
    #[must_use]
    pub fn create_view(name: impl Into<TableName>, definition: impl Into<String>) -> Self {
        Self::CreateView(CreateViewStatement {
            name: name.into(),
            definition: definition.into(),
            or_replace: false,
        })
    }

    /// Returns a short label for logging.
    #[must_use]
    pub fn kind_name(&self) -> &str {
        match self {
            Self::CreateTable(_) => "CREATE TABLE",
            Self::AlterTable(_) => "ALTER TABLE",
            Self::CreateIndex(_) => "CREATE INDEX",
            Self::DropIndex(_) => "DROP INDEX",
            Self::DropTable(_) => "DROP TABLE",
            Self::RenameTable(_) => "RENAME TABLE",
            Self::CreateView(_) => "CREATE VIEW",
            Self::DropView(_) => "DROP VIEW",
            Self::Other { kind } => kind,
        }
    }
}

impl From<CreateTableStatement> for Statement {
    fn from(stmt: CreateTableStatement) -> Self {
        Self::CreateTable(stmt)
    }
}

impl From<AlterTableStatement> for Statement {
    fn from(stmt: AlterTableStatement) -> Self {
        Self::AlterTable(stmt)
    }
}

impl From<CreateIndexStatement> for Statement {
    fn from(stmt: CreateIndexStatement) -> Self {
        Self::CreateIndex(stmt)
    }
}
