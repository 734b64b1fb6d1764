//! Stored index key parts.
//!
//! A column key part is stored as the bare column name, a functional key
//! part as its canonical expression text wrapped in parentheses, e.g.
//! `` (`id`+1) ``.

use oxide_ddl::ast::KeyPart;
use oxide_ddl::parse_expression;

use crate::error::{CatalogError, Result};

/// Base name used when an unnamed index starts with a functional key part.
pub const FUNCTIONAL_INDEX_NAME: &str = "functional_index";

/// Returns the stored text of a key part.
#[must_use]
pub fn key_text(part: &KeyPart) -> String {
    match part {
        KeyPart::Column(name) => name.clone(),
        KeyPart::Expression(expr) => format!("({expr})"),
    }
}

/// Parses stored key text back into a key part.
///
/// # Errors
///
/// Returns [`CatalogError::KeyExpression`] if a functional key part does not
/// parse.
pub fn parse_key(text: &str) -> Result<KeyPart> {
    if text.trim_start().starts_with('(') {
        parse_expression(text)
            .map(KeyPart::Expression)
            .map_err(|source| CatalogError::KeyExpression {
                expression: text.to_string(),
                source,
            })
    } else {
        Ok(KeyPart::Column(text.to_string()))
    }
}

/// Returns the auto-naming base for an index whose first key part is
/// `part`.
#[must_use]
pub fn base_name(part: &KeyPart) -> &str {
    match part {
        KeyPart::Column(name) => name,
        KeyPart::Expression(_) => FUNCTIONAL_INDEX_NAME,
    }
}

/// Compares two stored key lists structurally: same length, and each
/// position holds the same column or the same expression tree.
///
/// # Errors
///
/// Returns [`CatalogError::KeyExpression`] if either list holds a functional
/// key part that does not parse.
pub fn keys_equal(a: &[String], b: &[String]) -> Result<bool> {
    if a.len() != b.len() {
        return Ok(false);
    }
    for (x, y) in a.iter().zip(b) {
        if x == y {
            continue;
        }
        if parse_key(x)? != parse_key(y)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Returns true if the stored key part refers to `column`.
///
/// # Errors
///
/// Returns [`CatalogError::KeyExpression`] if the key does not parse.
pub fn key_references(text: &str, column: &str) -> Result<bool> {
    Ok(match parse_key(text)? {
        KeyPart::Column(name) => name.eq_ignore_ascii_case(column),
        KeyPart::Expression(expr) => expr.references_column(column),
    })
}

/// Returns the stored key with references to `from` renamed to `to`, or
/// `None` when the key does not mention `from`.
///
/// # Errors
///
/// Returns [`CatalogError::KeyExpression`] if the key does not parse.
pub fn rename_in_key(text: &str, from: &str, to: &str) -> Result<Option<String>> {
    Ok(match parse_key(text)? {
        KeyPart::Column(name) if name.eq_ignore_ascii_case(from) => Some(to.to_string()),
        KeyPart::Column(_) => None,
        KeyPart::Expression(mut expr) => {
            if expr.rename_column(from, to) > 0 {
                Some(key_text(&KeyPart::Expression(expr)))
            } else {
                None
            }
        }
    })
}
