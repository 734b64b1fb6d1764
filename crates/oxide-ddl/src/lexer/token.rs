//! Token types for the key-expression lexer.

use super::Span;

/// Reserved words recognized inside key expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    And,
    Or,
    Xor,
    Not,
    Div,
    Mod,
    Is,
    In,
    Like,
    Null,
    True,
    False,
    Cast,
    As,
}

impl Keyword {
    /// Looks up a keyword, ignoring ASCII case.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        let kw = match word.to_ascii_uppercase().as_str() {
            "AND" => Self::And,
            "OR" => Self::Or,
            "XOR" => Self::Xor,
            "NOT" => Self::Not,
            "DIV" => Self::Div,
            "MOD" => Self::Mod,
            "IS" => Self::Is,
            "IN" => Self::In,
            "LIKE" => Self::Like,
            "NULL" => Self::Null,
            "TRUE" => Self::True,
            "FALSE" => Self::False,
            "CAST" => Self::Cast,
            "AS" => Self::As,
            _ => return None,
        };
        Some(kw)
    }

    /// Returns the upper-case spelling of the keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Not => "NOT",
            Self::Div => "DIV",
            Self::Mod => "MOD",
            Self::Is => "IS",
            Self::In => "IN",
            Self::Like => "LIKE",
            Self::Null => "NULL",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Cast => "CAST",
            Self::As => "AS",
        }
    }
}

/// Token kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    /// Integer literal (e.g., 42)
    Integer(i64),
    /// Float literal (e.g., 3.14)
    Float(f64),
    /// String literal (e.g., 'hello')
    String(String),

    // Identifiers and keywords
    /// Bare identifier (e.g., column_name)
    Identifier(String),
    /// Backquoted identifier; never a keyword
    QuotedIdentifier(String),
    /// Reserved word
    Keyword(Keyword),

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// =
    Eq,
    /// != or <>
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// &
    BitAnd,
    /// |
    BitOr,
    /// ^
    BitXor,
    /// ~
    BitNot,
    /// <<
    LeftShift,
    /// >>
    RightShift,
    /// ->
    Arrow,
    /// ->>
    LongArrow,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ,
    Comma,
    /// .
    Dot,

    // Special
    /// End of input
    Eof,
    /// Invalid/unknown token
    Error(String),
}

/// A token with its location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The token kind.
    pub kind: TokenKind,
    /// Where the token appears in the input.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}
