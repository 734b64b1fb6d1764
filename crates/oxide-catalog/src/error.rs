//! Error types for the catalog.

use oxide_ddl::ParseError;

use crate::model::Database;

/// Broad classification of a [`CatalogError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A statement referenced an object that does not exist.
    NotFound,
    /// A statement would create an object whose name is taken.
    AlreadyExists,
    /// The statement shape is recognized but not modeled.
    Unsupported,
    /// A downstream computation failed unexpectedly.
    Internal,
}

/// Errors raised while walking statements or diffing snapshots.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    /// The table does not exist.
    #[error("Table `{0}` does not exist")]
    TableNotExists(String),

    /// The table already exists.
    #[error("Table `{0}` already exists")]
    TableExists(String),

    /// The column does not exist.
    #[error("Column `{column}` does not exist in table `{table}`")]
    ColumnNotExists {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },

    /// The column already exists.
    #[error("Column `{column}` already exists in table `{table}`")]
    ColumnExists {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },

    /// The index does not exist.
    #[error("Index `{index}` does not exist in table `{table}`")]
    IndexNotExists {
        /// Table name.
        table: String,
        /// Index name.
        index: String,
    },

    /// The index already exists.
    #[error("Index `{index}` already exists in table `{table}`")]
    IndexExists {
        /// Table name.
        table: String,
        /// Index name.
        index: String,
    },

    /// The table has no primary key.
    #[error("Primary key does not exist in table `{0}`")]
    PrimaryKeyNotExists(String),

    /// The table already has a primary key.
    #[error("Primary key already exists in table `{0}`")]
    PrimaryKeyExists(String),

    /// The foreign key does not exist.
    #[error("Foreign key `{name}` does not exist in table `{table}`")]
    ForeignKeyNotExists {
        /// Table name.
        table: String,
        /// Foreign key name.
        name: String,
    },

    /// The foreign key already exists.
    #[error("Foreign key `{name}` already exists in table `{table}`")]
    ForeignKeyExists {
        /// Table name.
        table: String,
        /// Foreign key name.
        name: String,
    },

    /// The view does not exist.
    #[error("View `{0}` does not exist")]
    ViewNotExists(String),

    /// The view already exists.
    #[error("View `{0}` already exists")]
    ViewExists(String),

    /// The statement or clause is not modeled.
    #[error("Unsupported statement: {0}")]
    Unsupported(String),

    /// A stored key expression could not be parsed.
    #[error("Invalid key expression `{expression}`: {source}")]
    KeyExpression {
        /// The expression text.
        expression: String,
        /// The parse failure.
        source: ParseError,
    },

    /// Unexpected failure in a downstream computation.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    /// Returns the error's kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::TableNotExists(_)
            | Self::ColumnNotExists { .. }
            | Self::IndexNotExists { .. }
            | Self::PrimaryKeyNotExists(_)
            | Self::ForeignKeyNotExists { .. }
            | Self::ViewNotExists(_) => ErrorKind::NotFound,
            Self::TableExists(_)
            | Self::ColumnExists { .. }
            | Self::IndexExists { .. }
            | Self::PrimaryKeyExists(_)
            | Self::ForeignKeyExists { .. }
            | Self::ViewExists(_) => ErrorKind::AlreadyExists,
            Self::Unsupported(_) => ErrorKind::Unsupported,
            Self::KeyExpression { .. } | Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Returns true for object-not-found errors.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Returns true for object-already-exists errors.
    #[must_use]
    pub fn is_already_exists(&self) -> bool {
        self.kind() == ErrorKind::AlreadyExists
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("Serialization error: {err}"))
    }
}

/// A failed walk: the first error, the statement that raised it, and the
/// snapshot as it stood when the walk stopped.
///
/// The snapshot includes every statement applied before the failure and any
/// partial effect of the failing statement itself; it is diagnostic only.
#[derive(Debug, Clone, thiserror::Error)]
#[error("statement #{index} ({statement}) failed: {error}")]
pub struct WalkFailure {
    /// Zero-based position of the failing statement in the batch.
    pub index: usize,
    /// Short label of the failing statement.
    pub statement: String,
    /// The error, unchanged.
    pub error: CatalogError,
    /// Snapshot at the time of failure.
    pub database: Box<Database>,
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
