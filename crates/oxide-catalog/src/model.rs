//! Entity model for catalog snapshots.
//!
//! A [`Database`] owns its schemas, which own their tables, views and
//! extensions; tables own their columns, indexes and foreign keys. Every
//! lookup goes through the owner by name, so renames and renumbering never
//! leave stale references behind.

use oxide_ddl::ast::ReferentialAction;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Name reserved for the primary key index.
pub const PRIMARY_KEY_NAME: &str = "PRIMARY";

/// Database engine family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Engine {
    /// MySQL.
    #[default]
    MySql,
    /// TiDB (MySQL compatible).
    TiDb,
}

impl Engine {
    /// Returns the engine name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MySql => "MySQL",
            Self::TiDb => "TiDB",
        }
    }
}

/// A database snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Database {
    /// Database name.
    pub name: String,
    /// Engine family.
    pub engine: Engine,
    /// Schemas; MySQL databases have exactly one, with an empty name.
    #[serde(default)]
    pub schemas: Vec<Schema>,
}

impl Database {
    /// Creates an empty database with no schemas.
    #[must_use]
    pub fn new(name: impl Into<String>, engine: Engine) -> Self {
        Self {
            name: name.into(),
            engine,
            schemas: Vec::new(),
        }
    }

    /// Adds a schema.
    #[must_use]
    pub fn schema(mut self, schema: Schema) -> Self {
        self.schemas.push(schema);
        self
    }

    /// Gets a schema by name.
    #[must_use]
    pub fn get_schema(&self, name: &str) -> Option<&Schema> {
        self.schemas.iter().find(|s| s.name == name)
    }

    /// Gets a mutable schema by name.
    pub fn get_schema_mut(&mut self, name: &str) -> Option<&mut Schema> {
        self.schemas.iter_mut().find(|s| s.name == name)
    }

    /// Returns the named schema, creating it if absent.
    pub fn ensure_schema(&mut self, name: &str) -> &mut Schema {
        let pos = match self.schemas.iter().position(|s| s.name == name) {
            Some(pos) => pos,
            None => {
                self.schemas.push(Schema::new(name));
                self.schemas.len() - 1
            }
        };
        &mut self.schemas[pos]
    }

    /// Serializes the snapshot as JSON.
    ///
    /// # Errors
    ///
    /// Returns an internal error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restores a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns an internal error if `json` is not a valid snapshot.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns a copy with every by-name collection sorted by name and
    /// columns sorted by position.
    #[must_use]
    pub fn canonical(&self) -> Self {
        let mut db = self.clone();
        db.schemas.sort_by(|a, b| a.name.cmp(&b.name));
        for schema in &mut db.schemas {
            schema.tables.sort_by(|a, b| a.name.cmp(&b.name));
            schema.views.sort_by(|a, b| a.name.cmp(&b.name));
            schema.extensions.sort_by(|a, b| a.name.cmp(&b.name));
            for table in &mut schema.tables {
                table.columns.sort_by_key(|c| c.position);
                table.indexes.sort_by(|a, b| a.name.cmp(&b.name));
                table.foreign_keys.sort_by(|a, b| a.name.cmp(&b.name));
            }
        }
        db
    }

    /// Structural equality: same objects under the same names, ignoring the
    /// order in which tables, indexes, foreign keys and views are listed.
    #[must_use]
    pub fn equivalent(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

/// A schema (namespace) within a database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Schema name; empty for MySQL.
    pub name: String,
    /// Tables in creation order.
    #[serde(default)]
    pub tables: Vec<Table>,
    /// Views in creation order.
    #[serde(default)]
    pub views: Vec<View>,
    /// Extensions.
    #[serde(default)]
    pub extensions: Vec<Extension>,
}

impl Schema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a table.
    #[must_use]
    pub fn table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    /// Gets a table by name.
    #[must_use]
    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Gets a mutable table by name.
    pub fn get_table_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.name == name)
    }

    /// Gets a view by name.
    #[must_use]
    pub fn get_view(&self, name: &str) -> Option<&View> {
        self.views.iter().find(|v| v.name == name)
    }

    /// Returns table names in order.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|t| t.name.as_str())
    }
}

/// A table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Table name.
    pub name: String,
    /// Default collation.
    pub collation: Option<String>,
    /// Storage engine (e.g. `InnoDB`).
    pub engine: Option<String>,
    /// Table comment.
    pub comment: Option<String>,
    /// Columns; positions are dense and 1-based.
    #[serde(default)]
    pub columns: Vec<Column>,
    /// Indexes, including the primary key.
    #[serde(default)]
    pub indexes: Vec<Index>,
    /// Foreign keys.
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKey>,
}

impl Table {
    /// Creates an empty table.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Appends a column, assigning the next position.
    #[must_use]
    pub fn column(mut self, mut column: Column) -> Self {
        column.position = self.columns.len() + 1;
        self.columns.push(column);
        self
    }

    /// Appends an index.
    #[must_use]
    pub fn index(mut self, index: Index) -> Self {
        self.indexes.push(index);
        self
    }

    /// Appends a foreign key.
    #[must_use]
    pub fn foreign_key(mut self, fk: ForeignKey) -> Self {
        self.foreign_keys.push(fk);
        self
    }

    /// Gets a column by name, ignoring ASCII case.
    #[must_use]
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Gets a mutable column by name, ignoring ASCII case.
    pub fn get_column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns
            .iter_mut()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Returns the column's offset in `columns`.
    #[must_use]
    pub fn column_offset(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Gets an index by name, ignoring ASCII case.
    #[must_use]
    pub fn get_index(&self, name: &str) -> Option<&Index> {
        self.indexes
            .iter()
            .find(|i| i.name.eq_ignore_ascii_case(name))
    }

    /// Gets a mutable index by name, ignoring ASCII case.
    pub fn get_index_mut(&mut self, name: &str) -> Option<&mut Index> {
        self.indexes
            .iter_mut()
            .find(|i| i.name.eq_ignore_ascii_case(name))
    }

    /// Returns the primary key index, if any.
    #[must_use]
    pub fn primary_key(&self) -> Option<&Index> {
        self.indexes.iter().find(|i| i.primary)
    }

    /// Gets a foreign key by name, ignoring ASCII case.
    #[must_use]
    pub fn get_foreign_key(&self, name: &str) -> Option<&ForeignKey> {
        self.foreign_keys
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// Rewrites positions as 1..=N in list order.
    pub fn renumber_columns(&mut self) {
        for (i, column) in self.columns.iter_mut().enumerate() {
            column.position = i + 1;
        }
    }

    /// Returns true if the column is part of the primary key.
    #[must_use]
    pub fn in_primary_key(&self, column: &str) -> bool {
        self.primary_key().is_some_and(|pk| {
            pk.expressions
                .iter()
                .any(|e| e.eq_ignore_ascii_case(column))
        })
    }
}

/// A column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// 1-based position.
    pub position: usize,
    /// Whether NULL is allowed.
    pub nullable: bool,
    /// Default value; `None` means no default, which differs from `Some("")`.
    pub default: Option<String>,
    /// Normalized type (e.g. `int(11)`).
    #[serde(rename = "type")]
    pub column_type: String,
    /// Character set.
    pub charset: Option<String>,
    /// Collation.
    pub collation: Option<String>,
    /// Comment.
    pub comment: Option<String>,
}

impl Column {
    /// Creates a nullable column with no default.
    #[must_use]
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: 0,
            nullable: true,
            default: None,
            column_type: column_type.into(),
            charset: None,
            collation: None,
            comment: None,
        }
    }

    /// Marks the column NOT NULL.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// An index or key constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    /// Index name.
    pub name: String,
    /// Key parts: column names, or `(expr)` for functional parts.
    pub expressions: Vec<String>,
    /// `BTREE`, `HASH`, `FULLTEXT` or `SPATIAL`.
    #[serde(rename = "type")]
    pub index_type: String,
    /// Unique index.
    pub unique: bool,
    /// Primary key.
    pub primary: bool,
    /// Visible to the optimizer.
    pub visible: bool,
    /// `KEY_BLOCK_SIZE`.
    pub key_block_size: Option<u64>,
    /// `WITH PARSER`.
    pub parser: Option<String>,
    /// Comment.
    pub comment: Option<String>,
}

impl Index {
    /// Creates a visible, non-unique BTREE index.
    #[must_use]
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        expressions: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            expressions: expressions.into_iter().map(Into::into).collect(),
            index_type: String::from("BTREE"),
            unique: false,
            primary: false,
            visible: true,
            key_block_size: None,
            parser: None,
            comment: None,
        }
    }

    /// Creates the primary key index.
    #[must_use]
    pub fn primary<S: Into<String>>(expressions: impl IntoIterator<Item = S>) -> Self {
        let mut index = Self::new(PRIMARY_KEY_NAME, expressions);
        index.unique = true;
        index.primary = true;
        index
    }

    /// Marks the index unique.
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Joins the key expressions with `separator`.
    #[must_use]
    pub fn join_expressions(&self, separator: &str) -> String {
        self.expressions.join(separator)
    }
}

/// A foreign key constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Constraint name.
    pub name: String,
    /// Local columns.
    pub columns: Vec<String>,
    /// Referenced table.
    pub referenced_table: String,
    /// Referenced columns.
    pub referenced_columns: Vec<String>,
    /// ON DELETE action.
    pub on_delete: Option<ReferentialAction>,
    /// ON UPDATE action.
    pub on_update: Option<ReferentialAction>,
}

impl ForeignKey {
    /// Creates a foreign key with no referential actions.
    #[must_use]
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        columns: impl IntoIterator<Item = S>,
        referenced_table: impl Into<String>,
        referenced_columns: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            referenced_table: referenced_table.into(),
            referenced_columns: referenced_columns.into_iter().map(Into::into).collect(),
            on_delete: None,
            on_update: None,
        }
    }
}

/// A view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    /// View name.
    pub name: String,
    /// The SELECT text.
    pub definition: String,
}

/// A database extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extension {
    /// Extension name.
    pub name: String,
    /// Definition text.
    pub definition: String,
}
