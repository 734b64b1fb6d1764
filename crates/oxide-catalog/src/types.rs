//! Column type normalization.
//!
//! MySQL reports integer types with their display width and expands a few
//! aliases. Normalizing on the way in keeps two snapshots built from
//! differently spelled but equivalent DDL comparable.

/// Integer types and their default display widths (signed, unsigned).
const INTEGER_WIDTHS: &[(&str, u8, u8)] = &[
    ("tinyint", 4, 3),
    ("smallint", 6, 5),
    ("mediumint", 9, 8),
    ("int", 11, 10),
    ("bigint", 20, 20),
];

/// Returns the canonical lower-case form of a column type.
///
/// Normalizing is idempotent: `normalize_type(normalize_type(t)) ==
/// normalize_type(t)`.
#[must_use]
pub fn normalize_type(raw: &str) -> String {
    let text = lowercase_outside_quotes(&collapse_whitespace(raw));
    let (base, rest) = split_base(&text);
    let base = match base {
        "integer" => "int",
        "bool" | "boolean" => return format!("tinyint(1){rest}"),
        "dec" | "numeric" | "fixed" => "decimal",
        other => other,
    };

    if rest.starts_with('(') {
        if base == "decimal" {
            if let Some(close) = rest.find(')') {
                let args = &rest[1..close];
                if !args.contains(',') {
                    return format!("decimal({args},0){}", &rest[close + 1..]);
                }
            }
        }
        return format!("{base}{rest}");
    }

    if base == "decimal" {
        return format!("decimal(10,0){rest}");
    }
    if let Some((_, signed, unsigned)) = INTEGER_WIDTHS.iter().find(|(name, ..)| *name == base) {
        let width = if rest.split(' ').any(|w| w == "unsigned") {
            unsigned
        } else {
            signed
        };
        return format!("{base}({width}){rest}");
    }
    format!("{base}{rest}")
}

/// Returns the type as it is written in generated DDL: upper case outside
/// quotes, and integer types with their default display width written
/// without it (`int(11)` becomes `INT`).
#[must_use]
pub fn display_type(normalized: &str) -> String {
    let (base, rest) = split_base(normalized);
    let mut shown = normalized.to_string();
    if let Some((_, signed, unsigned)) = INTEGER_WIDTHS.iter().find(|(name, ..)| *name == base) {
        let unsigned_type = rest.split(' ').any(|w| w == "unsigned");
        let default = if unsigned_type { unsigned } else { signed };
        let prefix = format!("({default})");
        if let Some(tail) = rest.strip_prefix(prefix.as_str()) {
            shown = format!("{base}{tail}");
        }
    }
    uppercase_outside_quotes(&shown)
}

/// Splits `int(11) unsigned` into `("int", "(11) unsigned")`.
fn split_base(text: &str) -> (&str, &str) {
    let end = text
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(text.len());
    (&text[..end], &text[end..])
}

/// Collapses runs of whitespace, drops whitespace around parentheses and
/// after commas inside them.
fn collapse_whitespace(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut quote: Option<char> = None;
    let mut pending_space = false;
    for c in raw.trim().chars() {
        if let Some(q) = quote {
            out.push(c);
            if c == q {
                quote = None;
            }
            continue;
        }
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && !matches!(c, '(' | ')' | ',') && !out.ends_with(['(', ',']) {
            out.push(' ');
        }
        pending_space = false;
        if c == '\'' || c == '"' {
            quote = Some(c);
        }
        out.push(c);
    }
    out
}

fn map_outside_quotes(text: &str, f: impl Fn(char) -> char) -> String {
    let mut quote: Option<char> = None;
    text.chars()
        .map(|c| match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
                c
            }
            None => {
                if c == '\'' || c == '"' {
                    quote = Some(c);
                }
                f(c)
            }
        })
        .collect()
}

fn lowercase_outside_quotes(text: &str) -> String {
    map_outside_quotes(text, |c| c.to_ascii_lowercase())
}

fn uppercase_outside_quotes(text: &str) -> String {
    map_outside_quotes(text, |c| c.to_ascii_uppercase())
}
