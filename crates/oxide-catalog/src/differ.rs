//! Schema differ.
//!
//! Compares two snapshots and produces the statements that turn the old one
//! into the new one. Statements are ordered so that replaying them never
//! needs two objects under one name: an object whose name is reused is
//! dropped before it is re-added, while an object replaced under a new name
//! is added before the old one is dropped. Names compare the way MySQL
//! compares them: columns, indexes and foreign keys without case, and tables
//! share one namespace with views.

use std::collections::HashSet;

use oxide_ddl::ast::{
    AlterSpec, AlterTableStatement, ColumnDef, ColumnOption, ColumnPosition, ConstraintKind,
    CreateTableStatement, CreateViewStatement, DefaultValue, DropViewStatement, IndexOptions,
    Statement, TableConstraint, TableName, TableOption,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::alter::rename_references;
use crate::dialect::{is_numeric, CatalogDialect, MySqlDialect};
use crate::error::Result;
use crate::keys::{keys_equal, parse_key};
use crate::model::{Column, Database, ForeignKey, Index, Schema, Table};

/// Options for the differ.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiffOptions {
    /// Whether to detect renamed tables (heuristic).
    pub detect_renames: bool,
    /// Column-name similarity needed to pair two tables as a rename
    /// (0.0 to 1.0).
    pub rename_threshold: f64,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            detect_renames: false,
            rename_threshold: 0.7,
        }
    }
}

impl DiffOptions {
    /// Creates default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables rename detection.
    #[must_use]
    pub const fn with_rename_detection(mut self) -> Self {
        self.detect_renames = true;
        self
    }

    /// Sets the similarity threshold for rename detection.
    #[must_use]
    pub const fn with_rename_threshold(mut self, threshold: f64) -> Self {
        self.rename_threshold = threshold;
        self
    }
}

/// Computes migration statements between two snapshots.
#[derive(Debug, Clone, Default)]
pub struct Differ {
    options: DiffOptions,
}

/// Statements for one object category, split by when they must run.
#[derive(Debug, Default)]
struct Changes {
    added: Vec<Statement>,
    replaced_drop: Vec<Statement>,
    replaced_add: Vec<Statement>,
    removed: Vec<Statement>,
}

/// Statements for one table, by phase.
#[derive(Debug, Default)]
struct TablePlan {
    additions: Vec<Statement>,
    drops: Vec<Statement>,
    adds: Vec<Statement>,
    removals: Vec<Statement>,
}

impl Differ {
    /// Creates a differ with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a differ with custom options.
    #[must_use]
    pub const fn with_options(options: DiffOptions) -> Self {
        Self { options }
    }

    /// Compares two snapshots and returns the statements that transform
    /// `old` into `new`. Identical snapshots yield no statements.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CatalogError::KeyExpression`] if a stored functional
    /// key part cannot be parsed for comparison.
    pub fn diff(&self, old: &Database, new: &Database) -> Result<Vec<Statement>> {
        let empty = Schema::default();
        let mut statements = Vec::new();
        for new_schema in &new.schemas {
            let old_schema = old.get_schema(&new_schema.name).unwrap_or(&empty);
            statements.extend(self.diff_schema(old_schema, new_schema)?);
        }
        for old_schema in &old.schemas {
            if new.get_schema(&old_schema.name).is_none() {
                statements.extend(self.diff_schema(old_schema, &Schema::new(&old_schema.name))?);
            }
        }
        for statement in &statements {
            debug!(statement = statement.kind_name(), "emitting diff statement");
        }
        debug!(statements = statements.len(), "computed schema diff");
        Ok(statements)
    }

    /// Like [`Differ::diff`], rendered as MySQL text: one statement per line,
    /// each ending with `;`. Identical snapshots yield an empty string.
    ///
    /// # Errors
    ///
    /// See [`Differ::diff`].
    pub fn diff_text(&self, old: &Database, new: &Database) -> Result<String> {
        self.diff_with_dialect(old, new, &MySqlDialect::new())
    }

    /// Like [`Differ::diff_text`], rendered by `dialect`.
    ///
    /// # Errors
    ///
    /// See [`Differ::diff`].
    pub fn diff_with_dialect(
        &self,
        old: &Database,
        new: &Database,
        dialect: &dyn CatalogDialect,
    ) -> Result<String> {
        Ok(dialect.render_script(&self.diff(old, new)?))
    }

    fn diff_schema(&self, old: &Schema, new: &Schema) -> Result<Vec<Statement>> {
        let qualify = |name: &str| {
            if new.name.is_empty() {
                TableName::new(name)
            } else {
                TableName::qualified(new.name.clone(), name)
            }
        };

        let created: Vec<&Table> = new
            .tables
            .iter()
            .filter(|t| old.get_table(&t.name).is_none())
            .collect();
        let dropped: Vec<&Table> = old
            .tables
            .iter()
            .filter(|t| new.get_table(&t.name).is_none())
            .collect();

        let mut renamed: Vec<(&Table, &Table)> = Vec::new();
        if self.options.detect_renames {
            for &from in &dropped {
                let candidate = created.iter().copied().find(|to| {
                    !renamed.iter().any(|(_, taken)| taken.name == to.name)
                        && self.tables_similar(from, to)
                });
                if let Some(to) = candidate {
                    debug!(from = %from.name, to = %to.name, "detected table rename");
                    renamed.push((from, to));
                }
            }
        }

        let mut plans = Vec::with_capacity(new.tables.len());
        for table in &new.tables {
            let name = qualify(&table.name);
            let mut plan = TablePlan::default();
            if let Some(old_table) = old.get_table(&table.name) {
                self.diff_table(&name, old_table, table, &mut plan)?;
            } else if let Some((from, _)) = renamed.iter().find(|(_, to)| to.name == table.name) {
                plan.additions
                    .push(Statement::rename_table(qualify(&from.name), name.clone()));
                self.diff_table(&name, from, table, &mut plan)?;
            } else {
                plan.additions.push(create_table(&name, table)?);
            }
            plans.push(plan);
        }

        // Tables and views share one namespace: a name moving between the
        // two kinds is freed before it is reused.
        let removed_view =
            |name: &str| old.get_view(name).is_some() && new.get_view(name).is_none();
        let removed_table = |name: &str| {
            new.get_table(name).is_none() && !renamed.iter().any(|(from, _)| from.name == name)
        };

        let mut statements = Vec::new();
        let views_to_tables: Vec<TableName> = new
            .tables
            .iter()
            .filter(|t| removed_view(&t.name))
            .map(|t| qualify(&t.name))
            .collect();
        if !views_to_tables.is_empty() {
            statements.push(Statement::DropView(DropViewStatement {
                names: views_to_tables,
                if_exists: false,
            }));
        }
        for plan in &mut plans {
            statements.append(&mut plan.additions);
        }
        let tables_to_views: Vec<TableName> = new
            .views
            .iter()
            .filter(|v| old.get_table(&v.name).is_some() && removed_table(&v.name))
            .map(|v| qualify(&v.name))
            .collect();
        if !tables_to_views.is_empty() {
            statements.push(Statement::drop_tables(tables_to_views));
        }
        for view in &new.views {
            match old.get_view(&view.name) {
                Some(old_view) if old_view.definition == view.definition => {}
                existing => statements.push(Statement::CreateView(CreateViewStatement {
                    name: qualify(&view.name),
                    definition: view.definition.clone(),
                    or_replace: existing.is_some(),
                })),
            }
        }
        for plan in &mut plans {
            statements.append(&mut plan.drops);
        }
        for plan in &mut plans {
            statements.append(&mut plan.adds);
        }
        for plan in plans.iter_mut().rev() {
            statements.append(&mut plan.removals);
        }
        for table in dropped.iter().rev() {
            if removed_table(&table.name) && new.get_view(&table.name).is_none() {
                statements.push(Statement::drop_tables([qualify(&table.name)]));
            }
        }
        let dropped_views: Vec<TableName> = old
            .views
            .iter()
            .filter(|v| removed_view(&v.name) && new.get_table(&v.name).is_none())
            .map(|v| qualify(&v.name))
            .collect();
        if !dropped_views.is_empty() {
            statements.push(Statement::DropView(DropViewStatement {
                names: dropped_views,
                if_exists: false,
            }));
        }
        Ok(statements)
    }

    fn diff_table(
        &self,
        name: &TableName,
        old: &Table,
        new: &Table,
        plan: &mut TablePlan,
    ) -> Result<()> {
        let alter = |spec: AlterSpec| -> Statement {
            AlterTableStatement::new(name.clone()).spec(spec).into()
        };

        // Columns leaving the primary key can only become nullable once
        // the old key is gone.
        let mut relaxed = Vec::new();
        diff_columns(old, new, &mut plan.additions, &mut relaxed, &alter);

        let options = table_option_changes(old, new);
        if !options.is_empty() {
            plan.additions.push(alter(AlterSpec::TableOptions(options)));
        }

        let renamed = with_renamed_columns(old, new)?;
        let primary = diff_primary_key(&renamed, new, &alter)?;
        let indexes = diff_indexes(&renamed, new, &alter)?;
        let foreign_keys = diff_foreign_keys(&renamed, new, &alter);

        plan.additions.extend(primary.added);
        plan.additions.extend(indexes.added);
        plan.additions.extend(foreign_keys.added);

        plan.drops.extend(foreign_keys.replaced_drop);
        plan.drops.extend(indexes.replaced_drop);
        let primary_replaced = !primary.replaced_drop.is_empty();
        plan.drops.extend(primary.replaced_drop);
        if primary_replaced {
            plan.drops.append(&mut relaxed);
        }

        plan.adds.extend(primary.replaced_add);
        plan.adds.extend(indexes.replaced_add);
        plan.adds.extend(foreign_keys.replaced_add);

        plan.removals.extend(foreign_keys.removed);
        plan.removals.extend(indexes.removed);
        plan.removals.extend(primary.removed);
        plan.removals.append(&mut relaxed);
        for column in &old.columns {
            if new.get_column(&column.name).is_none() {
                plan.removals.push(alter(AlterSpec::DropColumn(column.name.clone())));
            }
        }
        Ok(())
    }

    /// Whether `to` shares enough column names with `from`, ignoring case,
    /// to be taken as `from` under a new name. Similarity is the shared
    /// names over all distinct names.
    fn tables_similar(&self, from: &Table, to: &Table) -> bool {
        let from_names: HashSet<String> = from.columns.iter().map(|c| folded(&c.name)).collect();
        let shared = to
            .columns
            .iter()
            .filter(|c| from_names.contains(&folded(&c.name)))
            .count();
        let distinct = from_names.len() + to.columns.len() - shared;
        distinct > 0 && shared as f64 >= self.options.rename_threshold * distinct as f64
    }
}

/// Column and index names compare without case, as in MySQL.
fn folded(name: &str) -> String {
    name.to_ascii_lowercase()
}

fn same_column(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        _ => false,
    }
}

/// The column kept before `name` once dropped columns are gone.
fn kept_predecessor<'a>(
    work: &[&'a str],
    dropped: &HashSet<String>,
    name: &str,
) -> Option<&'a str> {
    let mut prev = None;
    for &column in work {
        if column.eq_ignore_ascii_case(name) {
            return prev;
        }
        if !dropped.contains(&folded(column)) {
            prev = Some(column);
        }
    }
    prev
}

fn last_kept<'a>(work: &[&'a str], dropped: &HashSet<String>) -> Option<&'a str> {
    work.iter()
        .rev()
        .copied()
        .find(|c| !dropped.contains(&folded(c)))
}

fn insert_after<'a>(work: &mut Vec<&'a str>, prev: Option<&str>, names: &[&'a str]) {
    let at = prev
        .and_then(|p| work.iter().position(|c| c.eq_ignore_ascii_case(p)))
        .map_or(0, |i| i + 1);
    for (k, name) in names.iter().enumerate() {
        work.insert(at + k, name);
    }
}

fn place(prev: Option<&str>) -> ColumnPosition {
    prev.map_or(ColumnPosition::First, |p| ColumnPosition::After(p.to_string()))
}

/// Emits ADD, MODIFY and CHANGE COLUMN statements, with placement only where
/// the order would otherwise differ. `work` tracks the column order as the
/// statements are replayed, dropped columns included; they go last. A column
/// whose name differs only in case is the same column and gets a CHANGE.
fn diff_columns(
    old: &Table,
    new: &Table,
    out: &mut Vec<Statement>,
    relaxed: &mut Vec<Statement>,
    alter: &impl Fn(AlterSpec) -> Statement,
) {
    let dropped: HashSet<String> = old
        .columns
        .iter()
        .filter(|c| new.get_column(&c.name).is_none())
        .map(|c| folded(&c.name))
        .collect();
    let mut work: Vec<&str> = old.columns.iter().map(|c| c.name.as_str()).collect();
    let mut prev: Option<&str> = None;

    let target = &new.columns;
    let mut i = 0;
    while i < target.len() {
        let column = &target[i];
        let Some(old_column) = old.get_column(&column.name) else {
            let end = target[i..]
                .iter()
                .position(|c| old.get_column(&c.name).is_some())
                .map_or(target.len(), |p| i + p);
            let run: Vec<&str> = target[i..end].iter().map(|c| c.name.as_str()).collect();
            let trailing = end == target.len() && same_column(last_kept(&work, &dropped), prev);
            let position = if trailing {
                ColumnPosition::Default
            } else {
                place(prev)
            };
            out.push(alter(AlterSpec::AddColumns {
                columns: target[i..end].iter().map(column_def).collect(),
                position,
            }));
            if trailing {
                work.extend(run.iter().copied());
            } else {
                insert_after(&mut work, prev, &run);
            }
            prev = run.last().copied();
            i = end;
            continue;
        };

        let moved = !same_column(kept_predecessor(&work, &dropped, &column.name), prev);
        let renamed = old_column.name != column.name;
        let changed = !columns_equal(old_column, column);
        let relax = changed && column.nullable && old.in_primary_key(&column.name);
        let position = if moved {
            place(prev)
        } else {
            ColumnPosition::Default
        };

        if renamed {
            out.push(alter(AlterSpec::change_column(
                old_column.name.clone(),
                column_def(column),
                position,
            )));
        } else if moved || (changed && !relax) {
            out.push(alter(AlterSpec::modify_column(column_def(column), position)));
        }
        if moved {
            work.retain(|c| !c.eq_ignore_ascii_case(&column.name));
            insert_after(&mut work, prev, &[column.name.as_str()]);
        } else if let Some(slot) = work.iter_mut().find(|c| c.eq_ignore_ascii_case(&column.name)) {
            *slot = column.name.as_str();
        }
        if relax {
            relaxed.push(alter(AlterSpec::modify_column(
                column_def(column),
                ColumnPosition::Default,
            )));
        }
        prev = Some(column.name.as_str());
        i += 1;
    }
}

/// `old` as it stands once the CHANGEs for columns renamed in case only
/// have run: keys and foreign keys follow the new spelling.
fn with_renamed_columns(old: &Table, new: &Table) -> Result<Table> {
    let mut table = old.clone();
    for column in &new.columns {
        if let Some(previous) = old.get_column(&column.name) {
            if previous.name != column.name {
                rename_references(&mut table, &previous.name, &column.name)?;
            }
        }
    }
    Ok(table)
}

fn columns_equal(a: &Column, b: &Column) -> bool {
    a.nullable == b.nullable
        && a.default == b.default
        && a.column_type == b.column_type
        && a.charset == b.charset
        && a.collation == b.collation
        && a.comment == b.comment
}

/// Table options whose value changed. An option removed in `new` cannot
/// be expressed, except the comment, which is cleared with an empty one.
fn table_option_changes(old: &Table, new: &Table) -> Vec<TableOption> {
    let mut options = Vec::new();
    if old.collation != new.collation {
        if let Some(c) = &new.collation {
            options.push(TableOption::Collate(c.clone()));
        }
    }
    if old.engine != new.engine {
        if let Some(e) = &new.engine {
            options.push(TableOption::Engine(e.clone()));
        }
    }
    if old.comment != new.comment {
        options.push(TableOption::Comment(new.comment.clone().unwrap_or_default()));
    }
    options
}

fn diff_primary_key(
    old: &Table,
    new: &Table,
    alter: &impl Fn(AlterSpec) -> Statement,
) -> Result<Changes> {
    let mut changes = Changes::default();
    match (old.primary_key(), new.primary_key()) {
        (None, Some(pk)) => changes
            .added
            .push(alter(AlterSpec::AddConstraint(index_constraint(pk)?))),
        (Some(_), None) => changes.removed.push(alter(AlterSpec::DropPrimaryKey)),
        (Some(a), Some(b)) if !indexes_equal(a, b)? => {
            changes.replaced_drop.push(alter(AlterSpec::DropPrimaryKey));
            changes
                .replaced_add
                .push(alter(AlterSpec::AddConstraint(index_constraint(b)?)));
        }
        _ => {}
    }
    Ok(changes)
}

fn secondary_index<'a>(table: &'a Table, name: &str) -> Option<&'a Index> {
    table.get_index(name).filter(|i| !i.primary)
}

fn diff_indexes(
    old: &Table,
    new: &Table,
    alter: &impl Fn(AlterSpec) -> Statement,
) -> Result<Changes> {
    let mut changes = Changes::default();
    for index in new.indexes.iter().filter(|i| !i.primary) {
        match secondary_index(old, &index.name) {
            None => changes
                .added
                .push(alter(AlterSpec::AddConstraint(index_constraint(index)?))),
            Some(old_index) if !indexes_equal(old_index, index)? => {
                changes
                    .replaced_drop
                    .push(alter(AlterSpec::DropIndex(old_index.name.clone())));
                changes
                    .replaced_add
                    .push(alter(AlterSpec::AddConstraint(index_constraint(index)?)));
            }
            Some(old_index) if old_index.name != index.name => changes.added.push(alter(
                AlterSpec::rename_index(old_index.name.clone(), index.name.clone()),
            )),
            Some(_) => {}
        }
    }
    for index in old.indexes.iter().filter(|i| !i.primary) {
        if secondary_index(new, &index.name).is_none() {
            changes
                .removed
                .push(alter(AlterSpec::DropIndex(index.name.clone())));
        }
    }
    Ok(changes)
}

fn diff_foreign_keys(
    old: &Table,
    new: &Table,
    alter: &impl Fn(AlterSpec) -> Statement,
) -> Changes {
    let mut changes = Changes::default();
    for fk in &new.foreign_keys {
        match old.get_foreign_key(&fk.name) {
            None => changes
                .added
                .push(alter(AlterSpec::AddConstraint(foreign_key_constraint(fk)))),
            Some(old_fk) if old_fk != fk => {
                changes
                    .replaced_drop
                    .push(alter(AlterSpec::DropForeignKey(old_fk.name.clone())));
                changes
                    .replaced_add
                    .push(alter(AlterSpec::AddConstraint(foreign_key_constraint(fk))));
            }
            Some(_) => {}
        }
    }
    for fk in &old.foreign_keys {
        if new.get_foreign_key(&fk.name).is_none() {
            changes
                .removed
                .push(alter(AlterSpec::DropForeignKey(fk.name.clone())));
        }
    }
    changes
}

/// Index equality: structural key comparison plus every attribute.
///
/// # Errors
///
/// Returns [`crate::CatalogError::KeyExpression`] if a functional key part
/// does not parse.
pub fn indexes_equal(a: &Index, b: &Index) -> Result<bool> {
    Ok(a.unique == b.unique
        && a.primary == b.primary
        && a.visible == b.visible
        && a.index_type.eq_ignore_ascii_case(&b.index_type)
        && a.key_block_size == b.key_block_size
        && a.parser == b.parser
        && a.comment == b.comment
        && keys_equal(&a.expressions, &b.expressions)?)
}

fn create_table(name: &TableName, table: &Table) -> Result<Statement> {
    let mut stmt = CreateTableStatement::new(name.clone());
    stmt.columns = table.columns.iter().map(column_def).collect();
    for index in &table.indexes {
        stmt.constraints.push(index_constraint(index)?);
    }
    stmt.constraints
        .extend(table.foreign_keys.iter().map(foreign_key_constraint));
    if let Some(e) = &table.engine {
        stmt.options.push(TableOption::Engine(e.clone()));
    }
    if let Some(c) = &table.collation {
        stmt.options.push(TableOption::Collate(c.clone()));
    }
    if let Some(c) = &table.comment {
        stmt.options.push(TableOption::Comment(c.clone()));
    }
    Ok(stmt.into())
}

/// Rebuilds a column definition from a stored column.
fn column_def(column: &Column) -> ColumnDef {
    let mut def = ColumnDef::new(column.name.clone(), column.column_type.clone());
    if let Some(c) = &column.charset {
        def = def.charset(c.clone());
    }
    if let Some(c) = &column.collation {
        def = def.collate(c.clone());
    }
    if !column.nullable {
        def = def.not_null();
    }
    match &column.default {
        Some(value) => def = def.option(ColumnOption::Default(default_value(value))),
        None if column.nullable => def = def.option(ColumnOption::Default(DefaultValue::Null)),
        None => {}
    }
    if let Some(c) = &column.comment {
        def = def.comment(c.clone());
    }
    def
}

/// Classifies stored default text: numbers and SQL expressions are written
/// bare, everything else as a string literal.
fn default_value(text: &str) -> DefaultValue {
    let upper = text.to_ascii_uppercase();
    if is_numeric(text) {
        DefaultValue::Literal(text.to_string())
    } else if text.starts_with('(')
        || upper.starts_with("CURRENT_TIMESTAMP")
        || upper.starts_with("NOW(")
    {
        DefaultValue::Expression(text.to_string())
    } else {
        DefaultValue::Literal(text.to_string())
    }
}

fn index_constraint(index: &Index) -> Result<TableConstraint> {
    let keys = index
        .expressions
        .iter()
        .map(|e| parse_key(e))
        .collect::<Result<Vec<_>>>()?;
    let kind = if index.primary {
        ConstraintKind::PrimaryKey
    } else if index.index_type.eq_ignore_ascii_case("FULLTEXT") {
        ConstraintKind::FullText
    } else if index.index_type.eq_ignore_ascii_case("SPATIAL") {
        ConstraintKind::Spatial
    } else if index.unique {
        ConstraintKind::Unique
    } else {
        ConstraintKind::Index
    };
    let method = match index.index_type.to_ascii_uppercase().as_str() {
        "BTREE" | "FULLTEXT" | "SPATIAL" => None,
        other => Some(other.to_string()),
    };
    let options = IndexOptions {
        index_type: method,
        key_block_size: index.key_block_size,
        parser: index.parser.clone(),
        comment: index.comment.clone(),
        visible: if index.visible { None } else { Some(false) },
    };

    let mut constraint = match kind {
        ConstraintKind::PrimaryKey => TableConstraint::primary_key(keys),
        kind => TableConstraint {
            name: Some(index.name.clone()),
            kind,
            keys,
            options: IndexOptions::default(),
        },
    };
    constraint.options = options;
    Ok(constraint)
}

fn foreign_key_constraint(fk: &ForeignKey) -> TableConstraint {
    let mut constraint = TableConstraint::foreign_key(
        fk.columns.iter().cloned(),
        fk.referenced_table.as_str(),
        fk.referenced_columns.iter().cloned(),
    )
    .named(fk.name.clone());
    if let ConstraintKind::ForeignKey(reference) = &mut constraint.kind {
        reference.on_delete = fk.on_delete;
        reference.on_update = fk.on_update;
    }
    constraint
}

/// Diffs two snapshots with default options and renders MySQL text.
///
/// # Errors
///
/// See [`Differ::diff`].
pub fn schema_diff(old: &Database, new: &Database) -> Result<String> {
    Differ::new().diff_text(old, new)
}
