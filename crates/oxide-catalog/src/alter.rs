//! Table-level mutations shared by CREATE TABLE, ALTER TABLE and the
//! standalone index statements.

use oxide_ddl::ast::{
    AlterSpec, ColumnDef, ColumnOption, ColumnPosition, ConstraintKind, DefaultValue, KeyPart,
    TableConstraint, TableOption,
};
use tracing::{trace, warn};

use crate::error::{CatalogError, Result};
use crate::keys::{base_name, key_references, key_text, rename_in_key};
use crate::model::{Column, ForeignKey, Index, Table, PRIMARY_KEY_NAME};
use crate::types::normalize_type;

/// Builds a column from its definition. Inline key options are not applied
/// here; see [`column_constraints`].
pub(crate) fn build_column(def: &ColumnDef) -> Column {
    let mut column = Column::new(def.name.clone(), normalize_type(&def.data_type));
    let mut explicit_null = false;
    let mut auto_increment = false;

    for option in &def.options {
        match option {
            ColumnOption::NotNull | ColumnOption::PrimaryKey => column.nullable = false,
            ColumnOption::Null => {
                column.nullable = true;
                explicit_null = true;
            }
            ColumnOption::AutoIncrement => auto_increment = true,
            ColumnOption::Default(DefaultValue::Null) => column.default = None,
            ColumnOption::Default(DefaultValue::Literal(v) | DefaultValue::Expression(v)) => {
                column.default = Some(v.clone());
            }
            ColumnOption::Comment(c) => column.comment = non_empty(c),
            ColumnOption::Collate(c) => column.collation = Some(c.clone()),
            ColumnOption::CharacterSet(c) => column.charset = Some(c.clone()),
            ColumnOption::Unique => {}
        }
    }
    if auto_increment && !explicit_null {
        column.nullable = false;
    }
    column
}

/// Returns the key constraints declared inline on a column, in option order.
pub(crate) fn column_constraints(def: &ColumnDef) -> Vec<TableConstraint> {
    def.options
        .iter()
        .filter_map(|option| match option {
            ColumnOption::PrimaryKey => Some(TableConstraint::primary_key([def.name.as_str()])),
            ColumnOption::Unique => Some(TableConstraint::unique([def.name.as_str()])),
            _ => None,
        })
        .collect()
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Applies table options.
pub(crate) fn apply_table_options(table: &mut Table, options: &[TableOption]) {
    for option in options {
        match option {
            TableOption::Collate(c) => table.collation = Some(c.clone()),
            TableOption::Engine(e) => table.engine = Some(e.clone()),
            TableOption::Comment(c) => table.comment = non_empty(c),
        }
    }
}

/// Picks a free name derived from `base`: `base`, then `base_2`, `base_3`,
/// and so on. Every index name of the table, and the primary key name, is
/// taken.
pub(crate) fn unique_index_name(table: &Table, base: &str) -> String {
    let taken = |name: &str| {
        name.eq_ignore_ascii_case(PRIMARY_KEY_NAME) || table.get_index(name).is_some()
    };
    if !taken(base) {
        return base.to_string();
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}_{n}");
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Picks the first free `<table>_ibfk_<n>` name.
fn foreign_key_name(table: &Table) -> String {
    let mut n = 1;
    loop {
        let candidate = format!("{}_ibfk_{n}", table.name);
        if table.get_foreign_key(&candidate).is_none() {
            return candidate;
        }
        n += 1;
    }
}

fn index_type(kind: &ConstraintKind, using: Option<&String>) -> String {
    match kind {
        ConstraintKind::FullText => String::from("FULLTEXT"),
        ConstraintKind::Spatial => String::from("SPATIAL"),
        _ => using.map_or_else(|| String::from("BTREE"), |u| u.to_ascii_uppercase()),
    }
}

fn require_columns(table: &Table, keys: &[KeyPart], check_integrity: bool) -> Result<()> {
    if !check_integrity {
        return Ok(());
    }
    for key in keys {
        if let KeyPart::Column(name) = key {
            if table.get_column(name).is_none() {
                return Err(CatalogError::ColumnNotExists {
                    table: table.name.clone(),
                    column: name.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Adds an index, primary key or foreign key to the table.
pub(crate) fn add_constraint(
    table: &mut Table,
    constraint: &TableConstraint,
    check_integrity: bool,
) -> Result<()> {
    require_columns(table, &constraint.keys, check_integrity)?;
    let expressions: Vec<String> = constraint.keys.iter().map(key_text).collect();

    let mut index = match &constraint.kind {
        ConstraintKind::ForeignKey(reference) => {
            let name = match &constraint.name {
                Some(name) => {
                    if table.get_foreign_key(name).is_some() {
                        return Err(CatalogError::ForeignKeyExists {
                            table: table.name.clone(),
                            name: name.clone(),
                        });
                    }
                    name.clone()
                }
                None => foreign_key_name(table),
            };
            let mut fk = ForeignKey::new(
                name,
                expressions,
                reference.table.name.clone(),
                reference.columns.clone(),
            );
            fk.on_delete = reference.on_delete;
            fk.on_update = reference.on_update;
            table.foreign_keys.push(fk);
            return Ok(());
        }
        ConstraintKind::PrimaryKey => {
            if table.primary_key().is_some() {
                return Err(CatalogError::PrimaryKeyExists(table.name.clone()));
            }
            for key in &constraint.keys {
                if let KeyPart::Column(name) = key {
                    if let Some(column) = table.get_column_mut(name) {
                        column.nullable = false;
                    }
                }
            }
            Index::primary(expressions)
        }
        kind => {
            let name = match &constraint.name {
                Some(name) => {
                    if name.eq_ignore_ascii_case(PRIMARY_KEY_NAME) || table.get_index(name).is_some()
                    {
                        return Err(CatalogError::IndexExists {
                            table: table.name.clone(),
                            index: name.clone(),
                        });
                    }
                    name.clone()
                }
                None => {
                    let base = constraint.keys.first().map_or("", base_name);
                    let name = unique_index_name(table, base);
                    trace!(table = %table.name, index = %name, "auto-named index");
                    name
                }
            };
            let mut index = Index::new(name, expressions);
            index.unique = matches!(kind, ConstraintKind::Unique);
            index
        }
    };

    let options = &constraint.options;
    index.index_type = index_type(&constraint.kind, options.index_type.as_ref());
    index.visible = options.visible.unwrap_or(true);
    index.key_block_size = options.key_block_size;
    index.parser.clone_from(&options.parser);
    index.comment = options.comment.as_deref().and_then(non_empty);
    table.indexes.push(index);
    Ok(())
}

/// Resolves where a column goes. `None` means append.
fn target_offset(
    table: &Table,
    position: &ColumnPosition,
    check_integrity: bool,
) -> Result<Option<usize>> {
    match position {
        ColumnPosition::Default => Ok(None),
        ColumnPosition::First => Ok(Some(0)),
        ColumnPosition::After(name) => match table.column_offset(name) {
            Some(offset) => Ok(Some(offset + 1)),
            None if check_integrity => Err(CatalogError::ColumnNotExists {
                table: table.name.clone(),
                column: name.clone(),
            }),
            None => Ok(None),
        },
    }
}

fn column_missing(table: &Table, column: &str, check_integrity: bool) -> Result<()> {
    if check_integrity {
        Err(CatalogError::ColumnNotExists {
            table: table.name.clone(),
            column: column.to_string(),
        })
    } else {
        warn!(table = %table.name, column, "column not found, skipping");
        Ok(())
    }
}

fn add_columns(
    table: &mut Table,
    columns: &[ColumnDef],
    position: &ColumnPosition,
    check_integrity: bool,
) -> Result<()> {
    let mut next = target_offset(table, position, check_integrity)?;
    for def in columns {
        if table.get_column(&def.name).is_some() {
            return Err(CatalogError::ColumnExists {
                table: table.name.clone(),
                column: def.name.clone(),
            });
        }
        let column = build_column(def);
        match next {
            Some(offset) => {
                table.columns.insert(offset, column);
                next = Some(offset + 1);
            }
            None => table.columns.push(column),
        }
        table.renumber_columns();
        for constraint in column_constraints(def) {
            add_constraint(table, &constraint, check_integrity)?;
        }
    }
    Ok(())
}

fn drop_column(table: &mut Table, name: &str, check_integrity: bool) -> Result<()> {
    let Some(offset) = table.column_offset(name) else {
        return column_missing(table, name, check_integrity);
    };
    table.columns.remove(offset);
    table.renumber_columns();

    for index in &mut table.indexes {
        let mut kept = Vec::with_capacity(index.expressions.len());
        for key in index.expressions.drain(..) {
            if !key_references(&key, name)? {
                kept.push(key);
            }
        }
        index.expressions = kept;
    }
    table.indexes.retain(|i| !i.expressions.is_empty());

    for fk in &mut table.foreign_keys {
        while let Some(i) = fk.columns.iter().position(|c| c.eq_ignore_ascii_case(name)) {
            fk.columns.remove(i);
            if i < fk.referenced_columns.len() {
                fk.referenced_columns.remove(i);
            }
        }
    }
    table.foreign_keys.retain(|f| !f.columns.is_empty());
    Ok(())
}

/// Points key parts and foreign key columns at a renamed column.
pub(crate) fn rename_references(table: &mut Table, from: &str, to: &str) -> Result<()> {
    for index in &mut table.indexes {
        for key in &mut index.expressions {
            if let Some(renamed) = rename_in_key(key, from, to)? {
                *key = renamed;
            }
        }
    }
    for fk in &mut table.foreign_keys {
        for column in &mut fk.columns {
            if column.eq_ignore_ascii_case(from) {
                *column = to.to_string();
            }
        }
    }
    Ok(())
}

/// Replaces the column at `offset` with `def`, moving it if asked.
fn redefine_column(
    table: &mut Table,
    offset: usize,
    def: &ColumnDef,
    position: &ColumnPosition,
    check_integrity: bool,
) -> Result<()> {
    let old_name = table.columns[offset].name.clone();
    let mut column = build_column(def);
    if table.in_primary_key(&old_name) {
        column.nullable = false;
    }

    let previous = table.columns.remove(offset);
    let target = match position {
        ColumnPosition::Default => Some(offset),
        other => match target_offset(table, other, check_integrity) {
            Ok(target) => target,
            Err(err) => {
                table.columns.insert(offset, previous);
                return Err(err);
            }
        },
    };
    match target {
        Some(at) => table.columns.insert(at.min(table.columns.len()), column),
        None => table.columns.push(column),
    }
    table.renumber_columns();

    if old_name != def.name {
        rename_references(table, &old_name, &def.name)?;
    }
    for constraint in column_constraints(def) {
        add_constraint(table, &constraint, check_integrity)?;
    }
    Ok(())
}

fn index_missing(table: &Table, index: &str, check_integrity: bool) -> Result<()> {
    if check_integrity {
        Err(CatalogError::IndexNotExists {
            table: table.name.clone(),
            index: index.to_string(),
        })
    } else {
        warn!(table = %table.name, index, "index not found, skipping");
        Ok(())
    }
}

/// Removes an index by name. `PRIMARY` removes the primary key.
pub(crate) fn drop_index(table: &mut Table, name: &str, check_integrity: bool) -> Result<()> {
    match table
        .indexes
        .iter()
        .position(|i| i.name.eq_ignore_ascii_case(name))
    {
        Some(pos) => {
            table.indexes.remove(pos);
            Ok(())
        }
        None => index_missing(table, name, check_integrity),
    }
}

/// Applies one ALTER TABLE clause other than RENAME, which needs the schema.
pub(crate) fn apply_spec(table: &mut Table, spec: &AlterSpec, check_integrity: bool) -> Result<()> {
    match spec {
        AlterSpec::TableOptions(options) => apply_table_options(table, options),

        AlterSpec::AddColumns { columns, position } => {
            add_columns(table, columns, position, check_integrity)?;
        }

        AlterSpec::DropColumn(name) => drop_column(table, name, check_integrity)?,

        AlterSpec::ModifyColumn { column, position } => match table.column_offset(&column.name) {
            Some(offset) => redefine_column(table, offset, column, position, check_integrity)?,
            None => column_missing(table, &column.name, check_integrity)?,
        },

        AlterSpec::ChangeColumn {
            old_name,
            column,
            position,
        } => {
            let Some(offset) = table.column_offset(old_name) else {
                return column_missing(table, old_name, check_integrity);
            };
            if let Some(existing) = table.column_offset(&column.name) {
                if existing != offset {
                    return Err(CatalogError::ColumnExists {
                        table: table.name.clone(),
                        column: column.name.clone(),
                    });
                }
            }
            redefine_column(table, offset, column, position, check_integrity)?;
        }

        AlterSpec::RenameColumn { from, to } => {
            let Some(offset) = table.column_offset(from) else {
                return column_missing(table, from, check_integrity);
            };
            if let Some(existing) = table.column_offset(to) {
                if existing != offset {
                    return Err(CatalogError::ColumnExists {
                        table: table.name.clone(),
                        column: to.clone(),
                    });
                }
            }
            let old = std::mem::replace(&mut table.columns[offset].name, to.clone());
            rename_references(table, &old, to)?;
        }

        AlterSpec::DropDefault(name) => match table.get_column_mut(name) {
            Some(column) => column.default = None,
            None => column_missing(table, name, check_integrity)?,
        },

        AlterSpec::SetDefault { column, value } => match table.get_column_mut(column) {
            Some(col) => {
                col.default = match value {
                    DefaultValue::Null => None,
                    DefaultValue::Literal(v) | DefaultValue::Expression(v) => Some(v.clone()),
                };
            }
            None => column_missing(table, column, check_integrity)?,
        },

        AlterSpec::AddConstraint(constraint) => add_constraint(table, constraint, check_integrity)?,

        AlterSpec::DropIndex(name) => drop_index(table, name, check_integrity)?,

        AlterSpec::DropPrimaryKey => match table.indexes.iter().position(|i| i.primary) {
            Some(pos) => {
                table.indexes.remove(pos);
            }
            None if check_integrity => {
                return Err(CatalogError::PrimaryKeyNotExists(table.name.clone()));
            }
            None => warn!(table = %table.name, "primary key not found, skipping"),
        },

        AlterSpec::DropForeignKey(name) => match table
            .foreign_keys
            .iter()
            .position(|f| f.name.eq_ignore_ascii_case(name))
        {
            Some(pos) => {
                table.foreign_keys.remove(pos);
            }
            None if check_integrity => {
                return Err(CatalogError::ForeignKeyNotExists {
                    table: table.name.clone(),
                    name: name.clone(),
                });
            }
            None => warn!(table = %table.name, foreign_key = %name, "foreign key not found, skipping"),
        },

        AlterSpec::RenameIndex { from, to } => {
            if table.get_index(from).is_none() {
                return index_missing(table, from, check_integrity);
            }
            if !from.eq_ignore_ascii_case(to)
                && (to.eq_ignore_ascii_case(PRIMARY_KEY_NAME) || table.get_index(to).is_some())
            {
                return Err(CatalogError::IndexExists {
                    table: table.name.clone(),
                    index: to.clone(),
                });
            }
            if let Some(index) = table.get_index_mut(from) {
                index.name = to.clone();
            }
        }

        AlterSpec::AlterIndexVisibility { name, visible } => match table.get_index_mut(name) {
            Some(index) => index.visible = *visible,
            None => index_missing(table, name, check_integrity)?,
        },

        AlterSpec::RenameTable(_) => {
            return Err(CatalogError::Internal(String::from(
                "RENAME TABLE clause must be applied at schema level",
            )));
        }

        AlterSpec::Other(clause) => {
            return Err(CatalogError::Unsupported(format!(
                "ALTER TABLE `{}` {clause}",
                table.name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxide_ddl::ast::IndexOptions;

    fn table() -> Table {
        let mut table = Table::new("t");
        for def in [
            ColumnDef::new("a", "int").not_null(),
            ColumnDef::new("b", "varchar(20)"),
            ColumnDef::new("c", "int"),
        ] {
            table.columns.push(build_column(&def));
        }
        table.renumber_columns();
        table
    }

    fn positions(table: &Table) -> Vec<(String, usize)> {
        table
            .columns
            .iter()
            .map(|c| (c.name.clone(), c.position))
            .collect()
    }

    #[test]
    fn test_build_column() {
        let column = build_column(&ColumnDef::new("a", "int").primary_key().default_value("1"));
        assert!(!column.nullable);
        assert_eq!(column.default.as_deref(), Some("1"));
        assert_eq!(column.column_type, "int(11)");

        let column = build_column(&ColumnDef::new("c", "int").auto_increment().null());
        assert!(column.nullable);
        let column = build_column(&ColumnDef::new("c", "int").auto_increment());
        assert!(!column.nullable);

        let column = build_column(&ColumnDef::new("d", "text").comment(""));
        assert_eq!(column.comment, None);
    }

    #[test]
    fn test_default_null_is_absent() {
        let column = build_column(
            &ColumnDef::new("a", "int").option(ColumnOption::Default(DefaultValue::Null)),
        );
        assert_eq!(column.default, None);
        let column = build_column(&ColumnDef::new("a", "varchar(10)").default_value(""));
        assert_eq!(column.default, Some(String::new()));
    }

    #[test]
    fn test_auto_naming_suffixes() {
        let mut table = table();
        for _ in 0..3 {
            add_constraint(&mut table, &TableConstraint::index(["b"]), true).unwrap();
        }
        let names: Vec<&str> = table.indexes.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["b", "b_2", "b_3"]);
    }

    #[test]
    fn test_auto_naming_skips_primary() {
        let table = Table::new("t").index(Index::new("primary_2", ["x"]));
        assert_eq!(unique_index_name(&table, "primary"), "primary_3");
        assert_eq!(unique_index_name(&table, "x"), "x");
    }

    #[test]
    fn test_duplicate_explicit_name_fails() {
        let mut table = table();
        let idx = TableConstraint::index(["a"]).named("idx_a");
        add_constraint(&mut table, &idx, true).unwrap();
        let err = add_constraint(&mut table, &idx, true).unwrap_err();
        assert!(matches!(err, CatalogError::IndexExists { .. }));
        let err = add_constraint(&mut table, &TableConstraint::index(["b"]).named("PRIMARY"), true)
            .unwrap_err();
        assert!(matches!(err, CatalogError::IndexExists { .. }));
    }

    #[test]
    fn test_second_primary_key_fails() {
        let mut table = table();
        add_constraint(&mut table, &TableConstraint::primary_key(["a"]), true).unwrap();
        let err =
            add_constraint(&mut table, &TableConstraint::primary_key(["b"]), true).unwrap_err();
        assert_eq!(err, CatalogError::PrimaryKeyExists("t".into()));
    }

    #[test]
    fn test_primary_key_forces_not_null() {
        let mut table = table();
        add_constraint(&mut table, &TableConstraint::primary_key(["b", "c"]), true).unwrap();
        assert!(!table.get_column("b").unwrap().nullable);
        assert!(!table.get_column("c").unwrap().nullable);
    }

    #[test]
    fn test_index_options() {
        let mut table = table();
        let idx = TableConstraint::index(["b"]).named("idx_b").with_options(
            IndexOptions::new()
                .using("hash")
                .key_block_size(8)
                .comment("c")
                .invisible(),
        );
        add_constraint(&mut table, &idx, true).unwrap();
        let index = table.get_index("idx_b").unwrap();
        assert_eq!(index.index_type, "HASH");
        assert_eq!(index.key_block_size, Some(8));
        assert_eq!(index.comment.as_deref(), Some("c"));
        assert!(!index.visible);
    }

    #[test]
    fn test_foreign_key_auto_name() {
        let mut table = table();
        let fk = TableConstraint::foreign_key(["a"], "other", ["id"]);
        add_constraint(&mut table, &fk, true).unwrap();
        add_constraint(&mut table, &fk, true).unwrap();
        let names: Vec<&str> = table.foreign_keys.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["t_ibfk_1", "t_ibfk_2"]);
    }

    #[test]
    fn test_add_column_positions() {
        let mut table = table();
        let spec = AlterSpec::add_column(
            ColumnDef::new("x", "int"),
            ColumnPosition::After("a".into()),
        );
        apply_spec(&mut table, &spec, true).unwrap();
        let spec = AlterSpec::add_column(ColumnDef::new("y", "int"), ColumnPosition::First);
        apply_spec(&mut table, &spec, true).unwrap();
        assert_eq!(
            positions(&table),
            vec![
                ("y".into(), 1),
                ("a".into(), 2),
                ("x".into(), 3),
                ("b".into(), 4),
                ("c".into(), 5)
            ]
        );
    }

    #[test]
    fn test_add_several_columns_after() {
        let mut table = table();
        let spec = AlterSpec::AddColumns {
            columns: vec![ColumnDef::new("x", "int"), ColumnDef::new("y", "int")],
            position: ColumnPosition::After("a".into()),
        };
        apply_spec(&mut table, &spec, true).unwrap();
        let names: Vec<String> = positions(&table).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "x", "y", "b", "c"]);
    }

    #[test]
    fn test_drop_column_strips_keys() {
        let mut table = table();
        add_constraint(&mut table, &TableConstraint::unique(["b", "c"]), true).unwrap();
        add_constraint(&mut table, &TableConstraint::index(["c"]).named("idx_c"), true).unwrap();
        let expr = TableConstraint::index([KeyPart::expression("c + 1").unwrap()]);
        add_constraint(&mut table, &expr, true).unwrap();
        apply_spec(&mut table, &AlterSpec::DropColumn("c".into()), true).unwrap();
        assert_eq!(table.indexes.len(), 1);
        assert_eq!(table.indexes[0].expressions, vec!["b"]);
        assert_eq!(positions(&table), vec![("a".into(), 1), ("b".into(), 2)]);
    }

    #[test]
    fn test_drop_missing_column() {
        let mut table = table();
        let spec = AlterSpec::DropColumn("zz".into());
        assert!(apply_spec(&mut table, &spec, true).unwrap_err().is_not_found());
        apply_spec(&mut table, &spec, false).unwrap();
        assert_eq!(table.columns.len(), 3);
    }

    #[test]
    fn test_modify_keeps_primary_key_columns_not_null() {
        let mut table = table();
        add_constraint(&mut table, &TableConstraint::primary_key(["a"]), true).unwrap();
        let spec = AlterSpec::modify_column(ColumnDef::new("a", "bigint"), ColumnPosition::Default);
        apply_spec(&mut table, &spec, true).unwrap();
        let column = table.get_column("a").unwrap();
        assert!(!column.nullable);
        assert_eq!(column.column_type, "bigint(20)");
        assert_eq!(column.position, 1);
    }

    #[test]
    fn test_change_column_renames_keys() {
        let mut table = table();
        add_constraint(&mut table, &TableConstraint::index(["b", "a"]), true).unwrap();
        let expr = TableConstraint::index([KeyPart::expression("lower(b)").unwrap()]);
        add_constraint(&mut table, &expr, true).unwrap();
        let spec = AlterSpec::change_column(
            "b",
            ColumnDef::new("b2", "varchar(30)"),
            ColumnPosition::First,
        );
        apply_spec(&mut table, &spec, true).unwrap();
        assert_eq!(table.indexes[0].expressions, vec!["b2", "a"]);
        assert_eq!(table.indexes[1].expressions, vec!["(lower(`b2`))"]);
        assert_eq!(table.columns[0].name, "b2");
        assert_eq!(table.columns[0].position, 1);
    }

    #[test]
    fn test_change_column_to_existing_name_fails() {
        let mut table = table();
        let spec =
            AlterSpec::change_column("b", ColumnDef::new("c", "int"), ColumnPosition::Default);
        let err = apply_spec(&mut table, &spec, true).unwrap_err();
        assert!(err.is_already_exists());
    }

    #[test]
    fn test_rename_index_and_visibility() {
        let mut table = table();
        add_constraint(&mut table, &TableConstraint::index(["a"]), true).unwrap();
        add_constraint(&mut table, &TableConstraint::index(["b"]), true).unwrap();
        apply_spec(&mut table, &AlterSpec::rename_index("a", "idx_a"), true).unwrap();
        assert_eq!(table.indexes[0].name, "idx_a");
        let err = apply_spec(&mut table, &AlterSpec::rename_index("idx_a", "b"), true).unwrap_err();
        assert!(err.is_already_exists());
        apply_spec(&mut table, &AlterSpec::index_visibility("b", false), true).unwrap();
        assert!(!table.get_index("b").unwrap().visible);
    }

    #[test]
    fn test_drop_primary_key_missing() {
        let mut table = table();
        let err = apply_spec(&mut table, &AlterSpec::DropPrimaryKey, true).unwrap_err();
        assert_eq!(err, CatalogError::PrimaryKeyNotExists("t".into()));
        apply_spec(&mut table, &AlterSpec::DropPrimaryKey, false).unwrap();
    }

    #[test]
    fn test_unmodeled_clause_is_unsupported() {
        let mut table = table();
        let err =
            apply_spec(&mut table, &AlterSpec::Other("ADD PARTITION".into()), true).unwrap_err();
        assert!(matches!(err, CatalogError::Unsupported(_)));
    }
}
