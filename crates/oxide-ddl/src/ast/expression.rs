//! Key-expression AST types.
//!
//! Parentheses are not part of the tree: two expressions that differ only in
//! whitespace, quoting or redundant grouping compare equal. [`Expr`]'s
//! `Display` impl produces the canonical text used when an expression key
//! is stored in a catalog.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A literal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    /// Integer literal.
    Integer(i64),
    /// Float literal.
    Float(f64),
    /// String literal.
    String(String),
    /// Boolean literal.
    Boolean(bool),
    /// NULL literal.
    Null,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(v) => write!(f, "{v:?}"),
            Self::String(s) => write!(f, "'{}'", s.replace('\\', "\\\\").replace('\'', "''")),
            Self::Boolean(true) => f.write_str("TRUE"),
            Self::Boolean(false) => f.write_str("FALSE"),
            Self::Null => f.write_str("NULL"),
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    IntDiv,
    Mod,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Like,

    // Logical
    And,
    Or,
    Xor,

    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    LeftShift,
    RightShift,

    // JSON path access
    JsonExtract,
    JsonUnquote,
}

impl BinaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::IntDiv => "DIV",
            Self::Mod => "%",
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Like => "LIKE",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::JsonExtract => "->",
            Self::JsonUnquote => "->>",
        }
    }

    /// Returns the precedence of the operator (higher = binds tighter).
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Or => 1,
            Self::Xor => 2,
            Self::And => 3,
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq | Self::Like => {
                COMPARISON_PRECEDENCE
            }
            Self::BitOr => 6,
            Self::BitAnd => 7,
            Self::LeftShift | Self::RightShift => 8,
            Self::Add | Self::Sub => 9,
            Self::Mul | Self::Div | Self::IntDiv | Self::Mod => 10,
            Self::BitXor => 11,
            Self::JsonExtract | Self::JsonUnquote => 13,
        }
    }

    /// Word operators are rendered with surrounding spaces.
    const fn is_word(self) -> bool {
        matches!(
            self,
            Self::IntDiv | Self::Like | Self::And | Self::Or | Self::Xor
        )
    }
}

/// Precedence shared by comparisons, `IS`, `IN` and `LIKE`.
pub const COMPARISON_PRECEDENCE: u8 = 5;

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Negation (-)
    Neg,
    /// Logical NOT
    Not,
    /// Bitwise NOT (~)
    BitNot,
}

impl UnaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "NOT",
            Self::BitNot => "~",
        }
    }

    /// Returns the precedence of the operator.
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Not => 4,
            Self::Neg | Self::BitNot => 12,
        }
    }
}

/// A function call expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// The function name, lower-cased.
    pub name: String,
    /// The arguments.
    pub args: Vec<Expr>,
}

/// A key expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A column reference (optionally qualified with table name).
    Column {
        /// Table name (optional).
        table: Option<String>,
        /// Column name.
        name: String,
    },

    /// A binary expression.
    Binary {
        /// Left operand.
        left: Box<Expr>,
        /// Operator.
        op: BinaryOp,
        /// Right operand.
        right: Box<Expr>,
    },

    /// A unary expression.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        operand: Box<Expr>,
    },

    /// A function call.
    Function(FunctionCall),

    /// IS NULL expression.
    IsNull {
        /// The expression to check.
        expr: Box<Expr>,
        /// Whether this is IS NOT NULL.
        negated: bool,
    },

    /// IN expression.
    In {
        /// The expression to check.
        expr: Box<Expr>,
        /// The candidate values.
        list: Vec<Expr>,
    },

    /// CAST expression.
    Cast {
        /// Expression to cast.
        expr: Box<Expr>,
        /// Target type, upper-cased (e.g. `CHAR(10)`).
        data_type: String,
    },
}

const ATOM_PRECEDENCE: u8 = u8::MAX;

impl Expr {
    /// Creates a new column reference.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column {
            table: None,
            name: name.into(),
        }
    }

    /// Creates a new integer literal.
    #[must_use]
    pub const fn integer(value: i64) -> Self {
        Self::Literal(Literal::Integer(value))
    }

    /// Creates a new string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Literal::String(value.into()))
    }

    /// Creates a function call.
    #[must_use]
    pub fn function(name: impl Into<String>, args: Vec<Self>) -> Self {
        Self::Function(FunctionCall {
            name: name.into().to_ascii_lowercase(),
            args,
        })
    }

    /// Creates a binary expression.
    #[must_use]
    pub fn binary(self, op: BinaryOp, right: Self) -> Self {
        Self::Binary {
            left: Box::new(self),
            op,
            right: Box::new(right),
        }
    }

    /// Creates an addition expression.
    #[must_use]
    pub fn add(self, right: Self) -> Self {
        self.binary(BinaryOp::Add, right)
    }

    /// Creates an equality expression.
    #[must_use]
    pub fn eq(self, right: Self) -> Self {
        self.binary(BinaryOp::Eq, right)
    }

    fn precedence(&self) -> u8 {
        match self {
            Self::Binary { op, .. } => op.precedence(),
            Self::Unary { op, .. } => op.precedence(),
            Self::IsNull { .. } | Self::In { .. } => COMPARISON_PRECEDENCE,
            Self::Literal(_) | Self::Column { .. } | Self::Function(_) | Self::Cast { .. } => {
                ATOM_PRECEDENCE
            }
        }
    }

    /// Returns the names of all columns referenced by the expression, in
    /// order of first appearance.
    #[must_use]
    pub fn referenced_columns(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.visit_columns(&mut |name| {
            if !names.contains(&name) {
                names.push(name);
            }
        });
        names
    }

    fn visit_columns<'a>(&'a self, f: &mut impl FnMut(&'a str)) {
        match self {
            Self::Column { name, .. } => f(name),
            Self::Literal(_) => {}
            Self::Binary { left, right, .. } => {
                left.visit_columns(f);
                right.visit_columns(f);
            }
            Self::Unary { operand, .. } => operand.visit_columns(f),
            Self::Function(call) => call.args.iter().for_each(|arg| arg.visit_columns(f)),
            Self::IsNull { expr, .. } | Self::Cast { expr, .. } => expr.visit_columns(f),
            Self::In { expr, list } => {
                expr.visit_columns(f);
                list.iter().for_each(|item| item.visit_columns(f));
            }
        }
    }

    /// Returns true if the expression references the column, ignoring ASCII
    /// case.
    #[must_use]
    pub fn references_column(&self, column: &str) -> bool {
        self.referenced_columns()
            .iter()
            .any(|name| name.eq_ignore_ascii_case(column))
    }

    /// Renames every reference to column `from` (ASCII case-insensitive).
    /// Returns the number of references rewritten.
    pub fn rename_column(&mut self, from: &str, to: &str) -> usize {
        match self {
            Self::Column { name, .. } => {
                if name.eq_ignore_ascii_case(from) {
                    *name = to.to_string();
                    1
                } else {
                    0
                }
            }
            Self::Literal(_) => 0,
            Self::Binary { left, right, .. } => {
                left.rename_column(from, to) + right.rename_column(from, to)
            }
            Self::Unary { operand, .. } => operand.rename_column(from, to),
            Self::Function(call) => call
                .args
                .iter_mut()
                .map(|arg| arg.rename_column(from, to))
                .sum(),
            Self::IsNull { expr, .. } | Self::Cast { expr, .. } => expr.rename_column(from, to),
            Self::In { expr, list } => {
                expr.rename_column(from, to)
                    + list
                        .iter_mut()
                        .map(|item| item.rename_column(from, to))
                        .sum::<usize>()
            }
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, parent: u8, right: bool) -> fmt::Result {
        let own = self.precedence();
        if own < parent || (right && own == parent) {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

/// Writes `name` as a backquoted identifier.
fn write_identifier(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    write!(f, "`{}`", name.replace('`', "``"))
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(lit) => write!(f, "{lit}"),
            Self::Column { table, name } => {
                if let Some(table) = table {
                    write_identifier(f, table)?;
                    f.write_str(".")?;
                }
                write_identifier(f, name)
            }
            Self::Binary { left, op, right } => {
                let prec = op.precedence();
                left.fmt_operand(f, prec, false)?;
                if op.is_word() {
                    write!(f, " {} ", op.as_str())?;
                } else {
                    f.write_str(op.as_str())?;
                }
                right.fmt_operand(f, prec, true)
            }
            Self::Unary { op, operand } => {
                let rendered = if operand.precedence() < op.precedence() {
                    format!("({operand})")
                } else {
                    operand.to_string()
                };
                match op {
                    UnaryOp::Not => write!(f, "NOT {rendered}"),
                    // `--` would start a comment.
                    UnaryOp::Neg if rendered.starts_with('-') => write!(f, "-({rendered})"),
                    UnaryOp::Neg | UnaryOp::BitNot => write!(f, "{}{rendered}", op.as_str()),
                }
            }
            Self::Function(call) => {
                write!(f, "{}(", call.name)?;
                for (i, arg) in call.args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
            Self::IsNull { expr, negated } => {
                expr.fmt_operand(f, COMPARISON_PRECEDENCE, false)?;
                if *negated {
                    f.write_str(" IS NOT NULL")
                } else {
                    f.write_str(" IS NULL")
                }
            }
            Self::In { expr, list } => {
                expr.fmt_operand(f, COMPARISON_PRECEDENCE, false)?;
                f.write_str(" IN (")?;
                for (i, item) in list.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
            Self::Cast { expr, data_type } => write!(f, "CAST({expr} AS {data_type})"),
        }
    }
}
