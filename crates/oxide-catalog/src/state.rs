//! Walk-through engine.
//!
//! Replays typed DDL statements against an in-memory [`Database`] snapshot,
//! one statement at a time, and stops at the first statement that is invalid
//! against the current state.

use oxide_ddl::ast::{
    AlterSpec, AlterTableStatement, ConstraintKind, CreateIndexStatement, CreateTableStatement,
    CreateViewStatement, DropIndexStatement, DropTableStatement, DropViewStatement, IndexKind,
    RenameTableStatement, Statement, TableConstraint, TableName,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::alter::{self, add_constraint, apply_table_options, build_column, column_constraints};
use crate::error::{CatalogError, Result, WalkFailure};
use crate::finder::Finder;
use crate::model::{Database, Schema, Table, View};

/// Name of the single schema of a MySQL database.
pub const DEFAULT_SCHEMA: &str = "";

/// Options controlling a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkOptions {
    /// Require every referenced object to exist. When false, statements that
    /// reference a missing object are skipped.
    pub check_integrity: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            check_integrity: true,
        }
    }
}

impl WalkOptions {
    /// Creates options with integrity checking enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Disables integrity checking, for walks without a baseline catalog.
    #[must_use]
    pub const fn without_integrity_check(mut self) -> Self {
        self.check_integrity = false;
        self
    }

    /// Sets integrity checking.
    #[must_use]
    pub const fn with_integrity_check(mut self, check: bool) -> Self {
        self.check_integrity = check;
        self
    }
}

/// A snapshot being walked.
#[derive(Debug, Clone)]
pub struct CatalogState {
    database: Database,
    options: WalkOptions,
}

impl CatalogState {
    /// Starts a walk from `database`, creating its default schema if absent.
    #[must_use]
    pub fn new(mut database: Database, options: WalkOptions) -> Self {
        database.ensure_schema(DEFAULT_SCHEMA);
        Self { database, options }
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Consumes the state and returns the snapshot.
    #[must_use]
    pub fn into_database(self) -> Database {
        self.database
    }

    /// Returns the walk options.
    #[must_use]
    pub const fn options(&self) -> WalkOptions {
        self.options
    }

    /// Returns a finder over the current snapshot.
    #[must_use]
    pub fn finder(&self) -> Finder<'_> {
        Finder::new(&self.database)
    }

    /// Applies statements in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns a [`WalkFailure`] naming the failing statement, with the
    /// snapshot as it stood when the walk stopped.
    pub fn walk_through(
        &mut self,
        statements: &[Statement],
    ) -> std::result::Result<(), WalkFailure> {
        for (index, statement) in statements.iter().enumerate() {
            if let Err(error) = self.apply_statement(statement) {
                debug!(index, statement = statement.kind_name(), %error, "walk stopped");
                return Err(WalkFailure {
                    index,
                    statement: statement.kind_name().to_string(),
                    error,
                    database: Box::new(self.database.clone()),
                });
            }
        }
        Ok(())
    }

    /// Applies a single statement.
    ///
    /// # Errors
    ///
    /// Returns the typed error of the first invalid operation. Earlier
    /// effects of a multi-part statement are kept.
    pub fn apply_statement(&mut self, statement: &Statement) -> Result<()> {
        debug!(statement = statement.kind_name(), "applying statement");
        match statement {
            Statement::CreateTable(stmt) => self.create_table(stmt),
            Statement::AlterTable(stmt) => self.alter_table(stmt),
            Statement::CreateIndex(stmt) => self.create_index(stmt),
            Statement::DropIndex(stmt) => self.drop_index(stmt),
            Statement::DropTable(stmt) => self.drop_tables(stmt),
            Statement::RenameTable(stmt) => self.rename_tables(stmt),
            Statement::CreateView(stmt) => self.create_view(stmt),
            Statement::DropView(stmt) => self.drop_views(stmt),
            Statement::Other { kind } => Err(CatalogError::Unsupported(kind.clone())),
        }
    }

    /// Rejects names qualified with another database.
    fn check_schema(&self, name: &TableName) -> Result<()> {
        match &name.schema {
            Some(schema) if *schema != self.database.name => Err(CatalogError::Unsupported(
                format!("cross-database reference `{schema}`.`{}`", name.name),
            )),
            _ => Ok(()),
        }
    }

    fn schema_mut(&mut self, name: &TableName) -> Result<&mut Schema> {
        self.check_schema(name)?;
        Ok(self.database.ensure_schema(DEFAULT_SCHEMA))
    }

    /// Looks up a table, or decides what a miss means.
    fn table_mut(&mut self, name: &TableName) -> Result<Option<&mut Table>> {
        let check = self.options.check_integrity;
        let schema = self.schema_mut(name)?;
        match schema.get_table_mut(&name.name) {
            Some(table) => Ok(Some(table)),
            None if check => Err(CatalogError::TableNotExists(name.name.clone())),
            None => {
                warn!(table = %name.name, "table not found, skipping");
                Ok(None)
            }
        }
    }

    fn create_table(&mut self, stmt: &CreateTableStatement) -> Result<()> {
        let check = self.options.check_integrity;
        let schema = self.schema_mut(&stmt.table)?;
        let name = &stmt.table.name;
        if schema.get_table(name).is_some() || schema.get_view(name).is_some() {
            if stmt.if_not_exists {
                debug!(table = %name, "table exists, skipping");
                return Ok(());
            }
            return Err(CatalogError::TableExists(name.clone()));
        }

        let mut table = Table::new(name.clone());
        for def in &stmt.columns {
            if table.get_column(&def.name).is_some() {
                return Err(CatalogError::ColumnExists {
                    table: name.clone(),
                    column: def.name.clone(),
                });
            }
            table.columns.push(build_column(def));
        }
        table.renumber_columns();

        for def in &stmt.columns {
            for constraint in column_constraints(def) {
                add_constraint(&mut table, &constraint, check)?;
            }
        }
        for constraint in &stmt.constraints {
            add_constraint(&mut table, constraint, check)?;
        }
        apply_table_options(&mut table, &stmt.options);

        schema.tables.push(table);
        Ok(())
    }

    fn alter_table(&mut self, stmt: &AlterTableStatement) -> Result<()> {
        for spec in &stmt.specs {
            if let AlterSpec::RenameTable(to) = spec {
                self.check_schema(to)?;
            }
        }
        let check = self.options.check_integrity;
        let schema = self.schema_mut(&stmt.table)?;

        let mut current = stmt.table.name.clone();
        for spec in &stmt.specs {
            if let AlterSpec::RenameTable(to) = spec {
                if rename_table(schema, &current, &to.name, check)? {
                    current.clone_from(&to.name);
                    continue;
                }
                return Ok(());
            }
            match schema.get_table_mut(&current) {
                Some(table) => alter::apply_spec(table, spec, check)?,
                None if check => return Err(CatalogError::TableNotExists(current)),
                None => {
                    warn!(table = %current, "table not found, skipping");
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    fn create_index(&mut self, stmt: &CreateIndexStatement) -> Result<()> {
        let check = self.options.check_integrity;
        let kind = match stmt.kind {
            IndexKind::Plain => ConstraintKind::Index,
            IndexKind::Unique => ConstraintKind::Unique,
            IndexKind::FullText => ConstraintKind::FullText,
            IndexKind::Spatial => ConstraintKind::Spatial,
        };
        let constraint = TableConstraint {
            name: stmt.name.clone(),
            kind,
            keys: stmt.keys.clone(),
            options: stmt.options.clone(),
        };
        match self.table_mut(&stmt.table)? {
            Some(table) => add_constraint(table, &constraint, check),
            None => Ok(()),
        }
    }

    fn drop_index(&mut self, stmt: &DropIndexStatement) -> Result<()> {
        let check = self.options.check_integrity;
        match self.table_mut(&stmt.table)? {
            Some(table) => alter::drop_index(table, &stmt.name, check),
            None => Ok(()),
        }
    }

    /// Drops tables one at a time; a missing name stops the statement but
    /// earlier names stay dropped.
    fn drop_tables(&mut self, stmt: &DropTableStatement) -> Result<()> {
        let check = self.options.check_integrity;
        for name in &stmt.tables {
            let schema = self.schema_mut(name)?;
            match schema.tables.iter().position(|t| t.name == name.name) {
                Some(pos) => {
                    schema.tables.remove(pos);
                }
                None if stmt.if_exists => debug!(table = %name.name, "table not found, skipping"),
                None if check => return Err(CatalogError::TableNotExists(name.name.clone())),
                None => warn!(table = %name.name, "table not found, skipping"),
            }
        }
        Ok(())
    }

    fn rename_tables(&mut self, stmt: &RenameTableStatement) -> Result<()> {
        let check = self.options.check_integrity;
        for (from, to) in &stmt.pairs {
            self.check_schema(to)?;
            let schema = self.schema_mut(from)?;
            rename_table(schema, &from.name, &to.name, check)?;
        }
        Ok(())
    }

    fn create_view(&mut self, stmt: &CreateViewStatement) -> Result<()> {
        let schema = self.schema_mut(&stmt.name)?;
        let name = &stmt.name.name;
        if schema.get_table(name).is_some() {
            return Err(CatalogError::TableExists(name.clone()));
        }
        match schema.views.iter_mut().find(|v| v.name == *name) {
            Some(view) if stmt.or_replace => view.definition.clone_from(&stmt.definition),
            Some(_) => return Err(CatalogError::ViewExists(name.clone())),
            None => schema.views.push(View {
                name: name.clone(),
                definition: stmt.definition.clone(),
            }),
        }
        Ok(())
    }

    fn drop_views(&mut self, stmt: &DropViewStatement) -> Result<()> {
        let check = self.options.check_integrity;
        for name in &stmt.names {
            let schema = self.schema_mut(name)?;
            match schema.views.iter().position(|v| v.name == name.name) {
                Some(pos) => {
                    schema.views.remove(pos);
                }
                None if stmt.if_exists => debug!(view = %name.name, "view not found, skipping"),
                None if check => return Err(CatalogError::ViewNotExists(name.name.clone())),
                None => warn!(view = %name.name, "view not found, skipping"),
            }
        }
        Ok(())
    }
}

/// Renames a table within its schema. Returns false when the table was
/// missing and the miss was skipped.
fn rename_table(schema: &mut Schema, from: &str, to: &str, check: bool) -> Result<bool> {
    if from != to && (schema.get_table(to).is_some() || schema.get_view(to).is_some()) {
        return Err(CatalogError::TableExists(to.to_string()));
    }
    match schema.get_table_mut(from) {
        Some(table) => {
            table.name = to.to_string();
            Ok(true)
        }
        None if check => Err(CatalogError::TableNotExists(from.to_string())),
        None => {
            warn!(table = %from, "table not found, skipping rename");
            Ok(false)
        }
    }
}

/// Walks `statements` from `database` and returns the resulting snapshot.
///
/// # Errors
///
/// Returns a [`WalkFailure`] for the first statement that fails.
pub fn walk_through(
    database: Database,
    statements: &[Statement],
    options: WalkOptions,
) -> std::result::Result<Database, WalkFailure> {
    let mut state = CatalogState::new(database, options);
    state.walk_through(statements)?;
    Ok(state.into_database())
}
