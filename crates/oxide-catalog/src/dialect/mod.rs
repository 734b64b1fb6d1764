//! SQL text generation.
//!
//! A dialect renders typed statements, as produced by the differ or built by
//! hand, into executable SQL text.

mod mysql;

pub use mysql::MySqlDialect;

use oxide_ddl::ast::{ColumnDef, ColumnOption, DefaultValue, Statement, TableName};

/// Trait for database-specific SQL generation.
pub trait CatalogDialect: Send + Sync {
    /// Returns the dialect name.
    fn name(&self) -> &'static str;

    /// Generates SQL for one statement, without the trailing delimiter.
    fn generate_sql(&self, statement: &Statement) -> String;

    /// Returns the display form of a stored column type.
    fn type_name(&self, column_type: &str) -> String;

    /// Quote an identifier (table name, column name, etc.).
    fn quote_identifier(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    /// Quotes a possibly schema-qualified table name.
    fn quote_table(&self, table: &TableName) -> String {
        match &table.schema {
            Some(schema) => format!(
                "{}.{}",
                self.quote_identifier(schema),
                self.quote_identifier(&table.name)
            ),
            None => self.quote_identifier(&table.name),
        }
    }

    /// Quotes a string literal.
    fn quote_string(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    /// Renders a DEFAULT value.
    fn default_value(&self, value: &DefaultValue) -> String {
        match value {
            DefaultValue::Null => String::from("NULL"),
            DefaultValue::Literal(v) if is_numeric(v) => v.clone(),
            DefaultValue::Literal(v) => self.quote_string(v),
            DefaultValue::Expression(v) => v.clone(),
        }
    }

    /// Generates column definition SQL. Options are written in the order
    /// they were declared.
    fn column_definition(&self, column: &ColumnDef) -> String {
        let mut parts = vec![
            self.quote_identifier(&column.name),
            self.type_name(&column.data_type),
        ];

        for option in &column.options {
            parts.push(match option {
                ColumnOption::NotNull => String::from("NOT NULL"),
                ColumnOption::Null => String::from("NULL"),
                ColumnOption::PrimaryKey => String::from("PRIMARY KEY"),
                ColumnOption::Unique => String::from("UNIQUE"),
                ColumnOption::AutoIncrement => String::from("AUTO_INCREMENT"),
                ColumnOption::Default(value) => format!("DEFAULT {}", self.default_value(value)),
                ColumnOption::Comment(c) => format!("COMMENT {}", self.quote_string(c)),
                ColumnOption::Collate(c) => format!("COLLATE {c}"),
                ColumnOption::CharacterSet(c) => format!("CHARACTER SET {c}"),
            });
        }

        parts.join(" ")
    }

    /// Renders a script: one statement per line, each ending with `;`.
    fn render_script(&self, statements: &[Statement]) -> String {
        let mut out = String::new();
        for statement in statements {
            out.push_str(&self.generate_sql(statement));
            out.push_str(";\n");
        }
        out
    }
}

/// Returns true for a plain signed integer or decimal literal.
pub(crate) fn is_numeric(text: &str) -> bool {
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
    let mut seen_digit = false;
    let mut seen_dot = false;
    for c in digits.chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    seen_digit
}
