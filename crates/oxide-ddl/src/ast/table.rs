//! Column, constraint and index definitions shared by DDL statements.

use serde::{Deserialize, Serialize};

use super::Expr;
use crate::parser::{ParseError, Parser};

/// A possibly schema-qualified table (or view) name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableName {
    /// Schema qualifier, if written.
    pub schema: Option<String>,
    /// Object name.
    pub name: String,
}

impl TableName {
    /// Creates an unqualified name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
        }
    }

    /// Creates a schema-qualified name.
    #[must_use]
    pub fn qualified(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: Some(schema.into()),
            name: name.into(),
        }
    }
}

impl From<&str> for TableName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TableName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Default value attached to a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefaultValue {
    /// `DEFAULT NULL`.
    Null,
    /// A literal, stored unquoted (e.g. `1`, `abc`).
    Literal(String),
    /// An expression kept verbatim (e.g. `CURRENT_TIMESTAMP`).
    Expression(String),
}

/// Options that may follow a column's type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnOption {
    /// `NOT NULL`
    NotNull,
    /// `NULL`
    Null,
    /// `PRIMARY KEY`
    PrimaryKey,
    /// `UNIQUE [KEY]`
    Unique,
    /// `AUTO_INCREMENT`
    AutoIncrement,
    /// `DEFAULT ...`
    Default(DefaultValue),
    /// `COMMENT '...'`
    Comment(String),
    /// `COLLATE ...`
    Collate(String),
    /// `CHARACTER SET ...`
    CharacterSet(String),
}

/// A column definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Column name.
    pub name: String,
    /// Type as written (e.g. `varchar(200)`, `int unsigned`).
    pub data_type: String,
    /// Options in declaration order.
    pub options: Vec<ColumnOption>,
}

impl ColumnDef {
    /// Creates a column with no options.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            options: Vec::new(),
        }
    }

    /// Appends an option.
    #[must_use]
    pub fn option(mut self, option: ColumnOption) -> Self {
        self.options.push(option);
        self
    }

    /// Marks the column NOT NULL.
    #[must_use]
    pub fn not_null(self) -> Self {
        self.option(ColumnOption::NotNull)
    }

    /// Marks the column explicitly NULL.
    #[must_use]
    pub fn null(self) -> Self {
        self.option(ColumnOption::Null)
    }

    /// Marks the column as the primary key.
    #[must_use]
    pub fn primary_key(self) -> Self {
        self.option(ColumnOption::PrimaryKey)
    }

    /// Adds an inline UNIQUE constraint.
    #[must_use]
    pub fn unique(self) -> Self {
        self.option(ColumnOption::Unique)
    }

    /// Marks the column AUTO_INCREMENT.
    #[must_use]
    pub fn auto_increment(self) -> Self {
        self.option(ColumnOption::AutoIncrement)
    }

    /// Sets a literal default.
    #[must_use]
    pub fn default_value(self, value: impl Into<String>) -> Self {
        self.option(ColumnOption::Default(DefaultValue::Literal(value.into())))
    }

    /// Sets an expression default.
    #[must_use]
    pub fn default_expr(self, expr: impl Into<String>) -> Self {
        self.option(ColumnOption::Default(DefaultValue::Expression(expr.into())))
    }

    /// Sets the column comment.
    #[must_use]
    pub fn comment(self, comment: impl Into<String>) -> Self {
        self.option(ColumnOption::Comment(comment.into()))
    }

    /// Sets the column collation.
    #[must_use]
    pub fn collate(self, collation: impl Into<String>) -> Self {
        self.option(ColumnOption::Collate(collation.into()))
    }

    /// Sets the column character set.
    #[must_use]
    pub fn charset(self, charset: impl Into<String>) -> Self {
        self.option(ColumnOption::CharacterSet(charset.into()))
    }

    /// Returns true if the column has the given option.
    #[must_use]
    pub fn has_option(&self, option: &ColumnOption) -> bool {
        self.options.contains(option)
    }
}

/// One part of an index key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum KeyPart {
    /// A plain column reference.
    Column(String),
    /// A functional key part, e.g. `((id + 1))`.
    Expression(Expr),
}

impl KeyPart {
    /// Creates a column key part.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column(name.into())
    }

    /// Parses a functional key part.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if `text` is not a valid expression.
    pub fn expression(text: &str) -> Result<Self, ParseError> {
        Parser::new(text).parse_expression_only().map(Self::Expression)
    }
}

impl From<&str> for KeyPart {
    fn from(name: &str) -> Self {
        Self::column(name)
    }
}

impl From<String> for KeyPart {
    fn from(name: String) -> Self {
        Self::Column(name)
    }
}

/// Attributes that follow an index key list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexOptions {
    /// `USING BTREE|HASH`.
    pub index_type: Option<String>,
    /// `KEY_BLOCK_SIZE = n`.
    pub key_block_size: Option<u64>,
    /// `WITH PARSER name`.
    pub parser: Option<String>,
    /// `COMMENT '...'`.
    pub comment: Option<String>,
    /// `VISIBLE` / `INVISIBLE`.
    pub visible: Option<bool>,
}

impl IndexOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `USING <method>`.
    #[must_use]
    pub fn using(mut self, method: impl Into<String>) -> Self {
        self.index_type = Some(method.into());
        self
    }

    /// Sets `KEY_BLOCK_SIZE`.
    #[must_use]
    pub const fn key_block_size(mut self, size: u64) -> Self {
        self.key_block_size = Some(size);
        self
    }

    /// Sets `WITH PARSER`.
    #[must_use]
    pub fn parser(mut self, parser: impl Into<String>) -> Self {
        self.parser = Some(parser.into());
        self
    }

    /// Sets the index comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Marks the index INVISIBLE.
    #[must_use]
    pub const fn invisible(mut self) -> Self {
        self.visible = Some(false);
        self
    }
}

/// Referential action for ON DELETE / ON UPDATE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferentialAction {
    /// RESTRICT
    Restrict,
    /// CASCADE
    Cascade,
    /// SET NULL
    SetNull,
    /// NO ACTION
    NoAction,
    /// SET DEFAULT
    SetDefault,
}

impl ReferentialAction {
    /// Returns the SQL spelling of the action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::NoAction => "NO ACTION",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

/// The REFERENCES clause of a foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Referenced table.
    pub table: TableName,
    /// Referenced columns.
    pub columns: Vec<String>,
    /// ON DELETE action.
    pub on_delete: Option<ReferentialAction>,
    /// ON UPDATE action.
    pub on_update: Option<ReferentialAction>,
}

/// The kind of a table-level constraint or index clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintKind {
    /// PRIMARY KEY
    PrimaryKey,
    /// UNIQUE [KEY|INDEX]
    Unique,
    /// KEY / INDEX
    Index,
    /// FULLTEXT [KEY|INDEX]
    FullText,
    /// SPATIAL [KEY|INDEX]
    Spatial,
    /// FOREIGN KEY ... REFERENCES ...
    ForeignKey(Reference),
}

/// A table-level constraint or index clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableConstraint {
    /// Explicit name, if given.
    pub name: Option<String>,
    /// Constraint kind.
    pub kind: ConstraintKind,
    /// Key parts in order.
    pub keys: Vec<KeyPart>,
    /// Index attributes.
    pub options: IndexOptions,
}

impl TableConstraint {
    fn with_keys<K: Into<KeyPart>>(kind: ConstraintKind, keys: impl IntoIterator<Item = K>) -> Self {
        Self {
            name: None,
            kind,
            keys: keys.into_iter().map(Into::into).collect(),
            options: IndexOptions::default(),
        }
    }

    /// Creates a PRIMARY KEY clause.
    #[must_use]
    pub fn primary_key<K: Into<KeyPart>>(keys: impl IntoIterator<Item = K>) -> Self {
        Self::with_keys(ConstraintKind::PrimaryKey, keys)
    }

    /// Creates a UNIQUE clause.
    #[must_use]
    pub fn unique<K: Into<KeyPart>>(keys: impl IntoIterator<Item = K>) -> Self {
        Self::with_keys(ConstraintKind::Unique, keys)
    }

    /// Creates an INDEX clause.
    #[must_use]
    pub fn index<K: Into<KeyPart>>(keys: impl IntoIterator<Item = K>) -> Self {
        Self::with_keys(ConstraintKind::Index, keys)
    }

    /// Creates a FULLTEXT clause.
    #[must_use]
    pub fn fulltext<K: Into<KeyPart>>(keys: impl IntoIterator<Item = K>) -> Self {
        Self::with_keys(ConstraintKind::FullText, keys)
    }

    /// Creates a FOREIGN KEY clause.
    #[must_use]
    pub fn foreign_key<C: Into<String>>(
        columns: impl IntoIterator<Item = C>,
        ref_table: impl Into<TableName>,
        ref_columns: impl IntoIterator<Item = C>,
    ) -> Self {
        Self {
            name: None,
            kind: ConstraintKind::ForeignKey(Reference {
                table: ref_table.into(),
                columns: ref_columns.into_iter().map(Into::into).collect(),
                on_delete: None,
                on_update: None,
            }),
            keys: columns
                .into_iter()
                .map(|c| KeyPart::Column(c.into()))
                .collect(),
            options: IndexOptions::default(),
        }
    }

    /// Sets the constraint name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the index attributes.
    #[must_use]
    pub fn with_options(mut self, options: IndexOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns true for PRIMARY KEY clauses.
    #[must_use]
    pub const fn is_primary_key(&self) -> bool {
        matches!(self.kind, ConstraintKind::PrimaryKey)
    }
}

/// A table option from CREATE TABLE or ALTER TABLE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableOption {
    /// `[DEFAULT] COLLATE = name`
    Collate(String),
    /// `ENGINE = name`
    Engine(String),
    /// `COMMENT = '...'`
    Comment(String),
}

/// Where an added or redefined column is placed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnPosition {
    /// Unchanged for MODIFY/CHANGE; appended for ADD.
    #[default]
    Default,
    /// `FIRST`
    First,
    /// `AFTER column`
    After(String),
}
