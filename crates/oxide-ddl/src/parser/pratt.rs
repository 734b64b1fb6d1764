//! Binding powers for the Pratt expression parser.
//!
//! Binary operator binding powers derive from [`BinaryOp::precedence`] so
//! that parsing and canonical rendering agree on grouping.

use crate::ast::{BinaryOp, UnaryOp, COMPARISON_PRECEDENCE};
use crate::lexer::{Keyword, TokenKind};

/// Returns the prefix binding power for a unary operator token.
#[must_use]
pub const fn prefix_binding_power(op: UnaryOp) -> u8 {
    op.precedence() * 2
}

/// Returns the infix binding power for a token.
///
/// Returns `(left_bp, right_bp)`; every operator is left associative.
/// Returns `None` if the token is not an infix operator.
#[must_use]
pub const fn infix_binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    let precedence = match kind {
        TokenKind::Keyword(Keyword::Is | Keyword::In) => COMPARISON_PRECEDENCE,
        _ => match token_to_binary_op(kind) {
            Some(op) => op.precedence(),
            None => return None,
        },
    };
    Some((precedence * 2 - 1, precedence * 2))
}

/// Converts a token to a binary operator.
#[must_use]
pub const fn token_to_binary_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        TokenKind::Star => Some(BinaryOp::Mul),
        TokenKind::Slash => Some(BinaryOp::Div),
        TokenKind::Keyword(Keyword::Div) => Some(BinaryOp::IntDiv),
        TokenKind::Percent | TokenKind::Keyword(Keyword::Mod) => Some(BinaryOp::Mod),
        TokenKind::Eq => Some(BinaryOp::Eq),
        TokenKind::NotEq => Some(BinaryOp::NotEq),
        TokenKind::Lt => Some(BinaryOp::Lt),
        TokenKind::LtEq => Some(BinaryOp::LtEq),
        TokenKind::Gt => Some(BinaryOp::Gt),
        TokenKind::GtEq => Some(BinaryOp::GtEq),
        TokenKind::Keyword(Keyword::Like) => Some(BinaryOp::Like),
        TokenKind::Keyword(Keyword::And) => Some(BinaryOp::And),
        TokenKind::Keyword(Keyword::Or) => Some(BinaryOp::Or),
        TokenKind::Keyword(Keyword::Xor) => Some(BinaryOp::Xor),
        TokenKind::BitAnd => Some(BinaryOp::BitAnd),
        TokenKind::BitOr => Some(BinaryOp::BitOr),
        TokenKind::BitXor => Some(BinaryOp::BitXor),
        TokenKind::LeftShift => Some(BinaryOp::LeftShift),
        TokenKind::RightShift => Some(BinaryOp::RightShift),
        TokenKind::Arrow => Some(BinaryOp::JsonExtract),
        TokenKind::LongArrow => Some(BinaryOp::JsonUnquote),
        _ => None,
    }
}

/// Converts a token to a unary operator.
#[must_use]
pub const fn token_to_unary_op(kind: &TokenKind) -> Option<UnaryOp> {
    match kind {
        TokenKind::Minus => Some(UnaryOp::Neg),
        TokenKind::BitNot => Some(UnaryOp::BitNot),
        TokenKind::Keyword(Keyword::Not) => Some(UnaryOp::Not),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        let (_, add_r) = infix_binding_power(&TokenKind::Plus).unwrap();
        let (mul_l, _) = infix_binding_power(&TokenKind::Star).unwrap();
        assert!(mul_l > add_r);
    }

    #[test]
    fn test_not_binds_looser_than_comparison() {
        let not_bp = prefix_binding_power(UnaryOp::Not);
        let (eq_l, _) = infix_binding_power(&TokenKind::Eq).unwrap();
        let (and_l, _) = infix_binding_power(&TokenKind::Keyword(Keyword::And)).unwrap();
        assert!(eq_l > not_bp);
        assert!(and_l < not_bp);
    }

    #[test]
    fn test_non_operators() {
        assert!(infix_binding_power(&TokenKind::Comma).is_none());
        assert!(token_to_unary_op(&TokenKind::Plus).is_none());
    }
}
