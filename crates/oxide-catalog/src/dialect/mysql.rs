//! MySQL dialect.

use oxide_ddl::ast::{
    AlterSpec, ColumnDef, ColumnPosition, ConstraintKind, CreateIndexStatement,
    CreateTableStatement, IndexKind, IndexOptions, KeyPart, Statement, TableConstraint,
    TableOption,
};

use super::CatalogDialect;
use crate::keys::key_text;
use crate::types::display_type;

/// MySQL dialect.
#[derive(Debug, Clone, Default)]
pub struct MySqlDialect;

impl MySqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Renders a key list, e.g. ``(`id`, (`id`+1))``.
    fn key_list(&self, keys: &[KeyPart]) -> String {
        let parts: Vec<String> = keys
            .iter()
            .map(|key| match key {
                KeyPart::Column(name) => self.quote_identifier(name),
                KeyPart::Expression(_) => key_text(key),
            })
            .collect();
        format!("({})", parts.join(", "))
    }

    fn column_list(&self, columns: &[String]) -> String {
        let quoted: Vec<String> = columns.iter().map(|c| self.quote_identifier(c)).collect();
        format!("({})", quoted.join(", "))
    }

    fn index_options_sql(&self, options: &IndexOptions) -> String {
        let mut sql = String::new();
        if let Some(method) = &options.index_type {
            sql.push_str(" USING ");
            sql.push_str(&method.to_ascii_uppercase());
        }
        if let Some(size) = options.key_block_size {
            sql.push_str(&format!(" KEY_BLOCK_SIZE={size}"));
        }
        if let Some(parser) = &options.parser {
            sql.push_str(" WITH PARSER ");
            sql.push_str(&self.quote_identifier(parser));
        }
        if let Some(comment) = &options.comment {
            sql.push_str(" COMMENT ");
            sql.push_str(&self.quote_string(comment));
        }
        match options.visible {
            Some(true) => sql.push_str(" VISIBLE"),
            Some(false) => sql.push_str(" INVISIBLE"),
            None => {}
        }
        sql
    }

    /// Renders a constraint clause as it appears in CREATE TABLE or after
    /// `ADD`.
    fn constraint_sql(&self, constraint: &TableConstraint) -> String {
        let name = constraint
            .name
            .as_ref()
            .map(|n| format!(" {}", self.quote_identifier(n)))
            .unwrap_or_default();
        let keys = self.key_list(&constraint.keys);
        let options = self.index_options_sql(&constraint.options);

        match &constraint.kind {
            ConstraintKind::PrimaryKey => format!("PRIMARY KEY{keys}{options}"),
            ConstraintKind::Unique => format!("UNIQUE INDEX{name}{keys}{options}"),
            ConstraintKind::Index => format!("INDEX{name}{keys}{options}"),
            ConstraintKind::FullText => format!("FULLTEXT{name}{keys}{options}"),
            ConstraintKind::Spatial => format!("SPATIAL{name}{keys}{options}"),
            ConstraintKind::ForeignKey(reference) => {
                let mut sql = match &constraint.name {
                    Some(n) => format!("CONSTRAINT {} ", self.quote_identifier(n)),
                    None => String::new(),
                };
                sql.push_str(&format!(
                    "FOREIGN KEY {keys} REFERENCES {}{}",
                    self.quote_table(&reference.table),
                    self.column_list(&reference.columns)
                ));
                if let Some(action) = reference.on_delete {
                    sql.push_str(" ON DELETE ");
                    sql.push_str(action.as_str());
                }
                if let Some(action) = reference.on_update {
                    sql.push_str(" ON UPDATE ");
                    sql.push_str(action.as_str());
                }
                sql
            }
        }
    }

    fn table_options_sql(&self, options: &[TableOption]) -> String {
        let parts: Vec<String> = options
            .iter()
            .map(|option| match option {
                TableOption::Collate(c) => format!("COLLATE={c}"),
                TableOption::Engine(e) => format!("ENGINE={e}"),
                TableOption::Comment(c) => format!("COMMENT={}", self.quote_string(c)),
            })
            .collect();
        parts.join(" ")
    }

    fn position_sql(&self, position: &ColumnPosition) -> String {
        match position {
            ColumnPosition::Default => String::new(),
            ColumnPosition::First => String::from(" FIRST"),
            ColumnPosition::After(column) => format!(" AFTER {}", self.quote_identifier(column)),
        }
    }

    /// Positioned columns cannot use the parenthesized form, so each one
    /// becomes its own clause chained after the previous column.
    fn add_columns_sql(&self, columns: &[ColumnDef], position: &ColumnPosition) -> String {
        if *position == ColumnPosition::Default {
            let defs: Vec<String> = columns.iter().map(|c| self.column_definition(c)).collect();
            return format!("ADD COLUMN ({})", defs.join(", "));
        }
        let mut clauses = Vec::with_capacity(columns.len());
        let mut position = position.clone();
        for column in columns {
            clauses.push(format!(
                "ADD COLUMN {}{}",
                self.column_definition(column),
                self.position_sql(&position)
            ));
            position = ColumnPosition::After(column.name.clone());
        }
        clauses.join(", ")
    }

    fn alter_spec_sql(&self, spec: &AlterSpec) -> String {
        match spec {
            AlterSpec::TableOptions(options) => self.table_options_sql(options),
            AlterSpec::AddColumns { columns, position } => self.add_columns_sql(columns, position),
            AlterSpec::DropColumn(name) => format!("DROP COLUMN {}", self.quote_identifier(name)),
            AlterSpec::ModifyColumn { column, position } => format!(
                "MODIFY COLUMN {}{}",
                self.column_definition(column),
                self.position_sql(position)
            ),
            AlterSpec::ChangeColumn {
                old_name,
                column,
                position,
            } => format!(
                "CHANGE COLUMN {} {}{}",
                self.quote_identifier(old_name),
                self.column_definition(column),
                self.position_sql(position)
            ),
            AlterSpec::RenameColumn { from, to } => format!(
                "RENAME COLUMN {} TO {}",
                self.quote_identifier(from),
                self.quote_identifier(to)
            ),
            AlterSpec::DropDefault(column) => format!(
                "ALTER COLUMN {} DROP DEFAULT",
                self.quote_identifier(column)
            ),
            AlterSpec::SetDefault { column, value } => format!(
                "ALTER COLUMN {} SET DEFAULT {}",
                self.quote_identifier(column),
                self.default_value(value)
            ),
            AlterSpec::AddConstraint(constraint) => {
                format!("ADD {}", self.constraint_sql(constraint))
            }
            AlterSpec::DropIndex(name) => format!("DROP INDEX {}", self.quote_identifier(name)),
            AlterSpec::DropPrimaryKey => String::from("DROP PRIMARY KEY"),
            AlterSpec::DropForeignKey(name) => {
                format!("DROP FOREIGN KEY {}", self.quote_identifier(name))
            }
            AlterSpec::RenameIndex { from, to } => format!(
                "RENAME INDEX {} TO {}",
                self.quote_identifier(from),
                self.quote_identifier(to)
            ),
            AlterSpec::AlterIndexVisibility { name, visible } => format!(
                "ALTER INDEX {} {}",
                self.quote_identifier(name),
                if *visible { "VISIBLE" } else { "INVISIBLE" }
            ),
            AlterSpec::RenameTable(to) => format!("RENAME TO {}", self.quote_table(to)),
            AlterSpec::Other(text) => text.clone(),
        }
    }

    fn create_table_sql(&self, stmt: &CreateTableStatement) -> String {
        let mut sql = String::from("CREATE TABLE ");
        if stmt.if_not_exists {
            sql.push_str("IF NOT EXISTS ");
        }
        sql.push_str(&self.quote_table(&stmt.table));
        sql.push_str(" (\n  ");

        let mut defs: Vec<String> = stmt
            .columns
            .iter()
            .map(|c| self.column_definition(c))
            .collect();
        defs.extend(stmt.constraints.iter().map(|c| self.constraint_sql(c)));
        sql.push_str(&defs.join(",\n  "));
        sql.push_str("\n)");

        if !stmt.options.is_empty() {
            sql.push(' ');
            sql.push_str(&self.table_options_sql(&stmt.options));
        }
        sql
    }

    fn create_index_sql(&self, stmt: &CreateIndexStatement) -> String {
        let mut sql = String::from("CREATE ");
        match stmt.kind {
            IndexKind::Plain => {}
            IndexKind::Unique => sql.push_str("UNIQUE "),
            IndexKind::FullText => sql.push_str("FULLTEXT "),
            IndexKind::Spatial => sql.push_str("SPATIAL "),
        }
        sql.push_str("INDEX ");
        if let Some(name) = &stmt.name {
            sql.push_str(&self.quote_identifier(name));
            sql.push(' ');
        }
        sql.push_str("ON ");
        sql.push_str(&self.quote_table(&stmt.table));
        sql.push_str(&self.key_list(&stmt.keys));
        sql.push_str(&self.index_options_sql(&stmt.options));
        sql
    }
}

impl CatalogDialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn generate_sql(&self, statement: &Statement) -> String {
        match statement {
            Statement::CreateTable(stmt) => self.create_table_sql(stmt),

            Statement::AlterTable(stmt) => {
                let specs: Vec<String> = stmt.specs.iter().map(|s| self.alter_spec_sql(s)).collect();
                format!(
                    "ALTER TABLE {} {}",
                    self.quote_table(&stmt.table),
                    specs.join(", ")
                )
            }

            Statement::CreateIndex(stmt) => self.create_index_sql(stmt),

            Statement::DropIndex(stmt) => format!(
                "DROP INDEX {} ON {}",
                self.quote_identifier(&stmt.name),
                self.quote_table(&stmt.table)
            ),

            Statement::DropTable(stmt) => {
                let names: Vec<String> = stmt.tables.iter().map(|t| self.quote_table(t)).collect();
                let if_exists = if stmt.if_exists { "IF EXISTS " } else { "" };
                format!("DROP TABLE {if_exists}{}", names.join(", "))
            }

            Statement::RenameTable(stmt) => {
                let pairs: Vec<String> = stmt
                    .pairs
                    .iter()
                    .map(|(from, to)| format!("{} TO {}", self.quote_table(from), self.quote_table(to)))
                    .collect();
                format!("RENAME TABLE {}", pairs.join(", "))
            }

            Statement::CreateView(stmt) => {
                let or_replace = if stmt.or_replace { "OR REPLACE " } else { "" };
                format!(
                    "CREATE {or_replace}VIEW {} AS {}",
                    self.quote_table(&stmt.name),
                    stmt.definition
                )
            }

            Statement::DropView(stmt) => {
                let names: Vec<String> = stmt.names.iter().map(|t| self.quote_table(t)).collect();
                let if_exists = if stmt.if_exists { "IF EXISTS " } else { "" };
                format!("DROP VIEW {if_exists}{}", names.join(", "))
            }

            Statement::Other { kind } => kind.clone(),
        }
    }

    fn type_name(&self, column_type: &str) -> String {
        display_type(column_type)
    }

    fn quote_identifier(&self, name: &str) -> String {
        format!("`{}`", name.replace('`', "``"))
    }

    fn quote_string(&self, value: &str) -> String {
        format!("'{}'", value.replace('\\', "\\\\").replace('\'', "''"))
    }
}
