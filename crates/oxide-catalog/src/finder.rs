//! Read-only lookups over a snapshot.
//!
//! Every lookup reports a miss as `None`; deciding whether a miss matters is
//! left to the caller. Table and view names are matched exactly, column and
//! index names ignoring ASCII case, as MySQL does on case-sensitive file
//! systems.

use crate::model::{Column, Database, ForeignKey, Index, Schema, Table, View};

/// Query layer over a [`Database`] snapshot.
#[derive(Debug, Clone, Copy)]
pub struct Finder<'a> {
    database: &'a Database,
}

impl<'a> Finder<'a> {
    /// Creates a finder over `database`.
    #[must_use]
    pub const fn new(database: &'a Database) -> Self {
        Self { database }
    }

    /// Finds a schema.
    #[must_use]
    pub fn find_schema(&self, schema: &str) -> Option<&'a Schema> {
        self.database.get_schema(schema)
    }

    /// Finds a table.
    #[must_use]
    pub fn find_table(&self, schema: &str, table: &str) -> Option<&'a Table> {
        self.find_schema(schema)?.get_table(table)
    }

    /// Finds a column of a table.
    #[must_use]
    pub fn find_column(&self, schema: &str, table: &str, column: &str) -> Option<&'a Column> {
        self.find_table(schema, table)?.get_column(column)
    }

    /// Finds an index. When `table` is `None`, every table of the schema is
    /// searched in order and the first match wins.
    ///
    /// Returns the owning table together with the index.
    #[must_use]
    pub fn find_index(
        &self,
        schema: &str,
        table: Option<&str>,
        index: &str,
    ) -> Option<(&'a Table, &'a Index)> {
        let schema = self.find_schema(schema)?;
        match table {
            Some(name) => {
                let table = schema.get_table(name)?;
                table.get_index(index).map(|i| (table, i))
            }
            None => schema
                .tables
                .iter()
                .find_map(|t| t.get_index(index).map(|i| (t, i))),
        }
    }

    /// Finds the primary key of a table.
    #[must_use]
    pub fn find_primary_key(&self, schema: &str, table: &str) -> Option<&'a Index> {
        self.find_table(schema, table)?.primary_key()
    }

    /// Finds a foreign key of a table.
    #[must_use]
    pub fn find_foreign_key(&self, schema: &str, table: &str, name: &str) -> Option<&'a ForeignKey> {
        self.find_table(schema, table)?.get_foreign_key(name)
    }

    /// Finds a view.
    #[must_use]
    pub fn find_view(&self, schema: &str, view: &str) -> Option<&'a View> {
        self.find_schema(schema)?.get_view(view)
    }

    /// Returns every index of `table` that covers `column` as a plain key
    /// part.
    #[must_use]
    pub fn indexes_on_column(&self, schema: &str, table: &str, column: &str) -> Vec<&'a Index> {
        self.find_table(schema, table)
            .map(|t| {
                t.indexes
                    .iter()
                    .filter(|i| i.expressions.iter().any(|e| e.eq_ignore_ascii_case(column)))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Joins an index's key expressions, e.g. to build the expected name of a
/// unique key (`uk_` + `join_index_expressions(index, "_")`).
#[must_use]
pub fn join_index_expressions(index: &Index, separator: &str) -> String {
    index.join_expressions(separator)
}
