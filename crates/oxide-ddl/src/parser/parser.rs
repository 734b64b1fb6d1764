//! Recursive descent parser for key expressions.

use super::pratt::{
    infix_binding_power, prefix_binding_power, token_to_binary_op, token_to_unary_op,
};
use super::ParseError;
use crate::ast::{Expr, FunctionCall, Literal};
use crate::lexer::{Keyword, Lexer, Token, TokenKind};

/// A key-expression parser.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token();
        Self { lexer, current }
    }

    /// Parses the whole input as a single expression.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the input is not one well-formed
    /// expression.
    pub fn parse_expression_only(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expression(0)?;
        if self.current.is_eof() {
            Ok(expr)
        } else {
            Err(ParseError::unexpected(
                "end of input",
                self.current.kind.clone(),
                self.current.span,
            ))
        }
    }

    /// Parses an expression using Pratt parsing.
    fn parse_expression(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_prefix()?;

        while let Some((l_bp, r_bp)) = infix_binding_power(&self.current.kind) {
            if l_bp < min_bp {
                break;
            }

            match &self.current.kind {
                TokenKind::Keyword(Keyword::Is) => {
                    self.advance();
                    let negated = if self.check_keyword(Keyword::Not) {
                        self.advance();
                        true
                    } else {
                        false
                    };
                    self.expect_keyword(Keyword::Null)?;
                    lhs = Expr::IsNull {
                        expr: Box::new(lhs),
                        negated,
                    };
                }
                TokenKind::Keyword(Keyword::In) => {
                    self.advance();
                    self.expect(&TokenKind::LeftParen)?;
                    let list = self.parse_expression_list()?;
                    self.expect(&TokenKind::RightParen)?;
                    lhs = Expr::In {
                        expr: Box::new(lhs),
                        list,
                    };
                }
                kind => {
                    let Some(op) = token_to_binary_op(kind) else {
                        break;
                    };
                    self.advance();
                    let rhs = self.parse_expression(r_bp)?;
                    lhs = Expr::Binary {
                        left: Box::new(lhs),
                        op,
                        right: Box::new(rhs),
                    };
                }
            }
        }

        Ok(lhs)
    }

    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        if let Some(op) = token_to_unary_op(&self.current.kind) {
            self.advance();
            let operand = self.parse_expression(prefix_binding_power(op))?;
            return Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
            });
        }
        if self.check(&TokenKind::Plus) {
            // Unary plus is a no-op.
            self.advance();
            return self.parse_prefix();
        }

        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.current.clone();

        match token.kind {
            TokenKind::Integer(n) => {
                self.advance();
                Ok(Expr::Literal(Literal::Integer(n)))
            }
            TokenKind::Float(f) => {
                self.advance();
                Ok(Expr::Literal(Literal::Float(f)))
            }
            TokenKind::String(s) => {
                self.advance();
                Ok(Expr::Literal(Literal::String(s)))
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.advance();
                Ok(Expr::Literal(Literal::Null))
            }
            TokenKind::Keyword(Keyword::True) => {
                self.advance();
                Ok(Expr::Literal(Literal::Boolean(true)))
            }
            TokenKind::Keyword(Keyword::False) => {
                self.advance();
                Ok(Expr::Literal(Literal::Boolean(false)))
            }
            TokenKind::Keyword(Keyword::Cast) => {
                self.advance();
                self.parse_cast_expression()
            }
            TokenKind::Keyword(Keyword::Mod) if self.lexer_peek_is_paren() => {
                self.advance();
                self.parse_function_call(String::from("mod"))
            }
            TokenKind::LeftParen => {
                self.advance();
                let expr = self.parse_expression(0)?;
                self.expect(&TokenKind::RightParen)?;
                Ok(expr)
            }
            TokenKind::Identifier(name) => {
                self.advance();
                if self.check(&TokenKind::LeftParen) {
                    return self.parse_function_call(name.to_ascii_lowercase());
                }
                self.parse_column_reference(name)
            }
            TokenKind::QuotedIdentifier(name) => {
                self.advance();
                self.parse_column_reference(name)
            }
            kind => Err(ParseError::unexpected("expression", kind, token.span)),
        }
    }

    /// Completes `name` or `table.name` after the first identifier.
    fn parse_column_reference(&mut self, first: String) -> Result<Expr, ParseError> {
        if self.check(&TokenKind::Dot) {
            self.advance();
            let name = self.expect_identifier()?;
            return Ok(Expr::Column {
                table: Some(first),
                name,
            });
        }
        Ok(Expr::Column {
            table: None,
            name: first,
        })
    }

    fn parse_function_call(&mut self, name: String) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let args = if self.check(&TokenKind::RightParen) {
            vec![]
        } else {
            self.parse_expression_list()?
        };
        self.expect(&TokenKind::RightParen)?;

        Ok(Expr::Function(FunctionCall { name, args }))
    }

    /// Parses `CAST(expr AS type)`; `CAST` has been consumed.
    fn parse_cast_expression(&mut self) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let expr = self.parse_expression(0)?;
        self.expect_keyword(Keyword::As)?;
        let data_type = self.parse_data_type()?;
        self.expect(&TokenKind::RightParen)?;

        Ok(Expr::Cast {
            expr: Box::new(expr),
            data_type,
        })
    }

    /// Parses a cast target such as `UNSIGNED`, `CHAR(10)`,
    /// `DECIMAL(10, 2)` or `CHAR(32) ARRAY`.
    fn parse_data_type(&mut self) -> Result<String, ParseError> {
        let mut words: Vec<String> = Vec::new();
        loop {
            match &self.current.kind {
                TokenKind::Identifier(word) => {
                    words.push(word.to_ascii_uppercase());
                    self.advance();
                }
                TokenKind::LeftParen if !words.is_empty() => {
                    self.advance();
                    let mut args = Vec::new();
                    loop {
                        match self.current.kind {
                            TokenKind::Integer(n) => {
                                args.push(n.to_string());
                                self.advance();
                            }
                            _ => {
                                return Err(ParseError::unexpected(
                                    "type length",
                                    self.current.kind.clone(),
                                    self.current.span,
                                ))
                            }
                        }
                        if self.check(&TokenKind::Comma) {
                            self.advance();
                        } else {
                            break;
                        }
                    }
                    self.expect(&TokenKind::RightParen)?;
                    if let Some(last) = words.last_mut() {
                        last.push('(');
                        last.push_str(&args.join(","));
                        last.push(')');
                    }
                }
                _ => break,
            }
        }

        if words.is_empty() {
            return Err(ParseError::unexpected(
                "data type",
                self.current.kind.clone(),
                self.current.span,
            ));
        }
        Ok(words.join(" "))
    }

    fn parse_expression_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut exprs = vec![self.parse_expression(0)?];
        while self.check(&TokenKind::Comma) {
            self.advance();
            exprs.push(self.parse_expression(0)?);
        }
        Ok(exprs)
    }

    // --- Helper methods ---

    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    /// Returns true if the token after the current one is `(`.
    fn lexer_peek_is_paren(&self) -> bool {
        self.lexer.clone().next_token().kind == TokenKind::LeftParen
    }

    fn check(&self, kind: &TokenKind) -> bool {
        core::mem::discriminant(&self.current.kind) == core::mem::discriminant(kind)
    }

    fn check_keyword(&self, keyword: Keyword) -> bool {
        matches!(&self.current.kind, TokenKind::Keyword(kw) if *kw == keyword)
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::unexpected(
                format!("{kind:?}"),
                self.current.kind.clone(),
                self.current.span,
            ))
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.check_keyword(keyword) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::unexpected(
                keyword.as_str(),
                self.current.kind.clone(),
                self.current.span,
            ))
        }
    }

    fn expect_identifier(&mut self) -> Result<String, ParseError> {
        match &self.current.kind {
            TokenKind::Identifier(name) | TokenKind::QuotedIdentifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(ParseError::unexpected(
                "identifier",
                self.current.kind.clone(),
                self.current.span,
            )),
        }
    }
}

/// Parses `input` as a single key expression.
///
/// # Errors
///
/// Returns a [`ParseError`] if the input is not one well-formed expression.
pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
    Parser::new(input).parse_expression_only()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, UnaryOp};

    fn parse(input: &str) -> Expr {
        parse_expression(input).unwrap()
    }

    fn canonical(input: &str) -> String {
        parse(input).to_string()
    }

    #[test]
    fn test_column_plus_literal() {
        let expr = parse("id + 1");
        assert_eq!(expr, Expr::column("id").add(Expr::integer(1)));
        assert_eq!(expr.to_string(), "`id`+1");
    }

    #[test]
    fn test_parens_and_whitespace_do_not_matter() {
        assert_eq!(parse("((id)+(1))"), parse("id+1"));
        assert_eq!(parse("`id` +   1"), parse("id+1"));
        assert_ne!(parse("id + 2"), parse("id + 1"));
    }

    #[test]
    fn test_precedence() {
        let expr = parse("a + b * c");
        match expr {
            Expr::Binary { op, right, .. } => {
                assert_eq!(op, BinaryOp::Add);
                assert!(matches!(*right, Expr::Binary { op: BinaryOp::Mul, .. }));
            }
            _ => panic!("Expected binary expression"),
        }
        assert_eq!(canonical("(a + b) * c"), "(`a`+`b`)*`c`");
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(canonical("a - b - c"), "`a`-`b`-`c`");
        assert_eq!(canonical("a - (b - c)"), "`a`-(`b`-`c`)");
    }

    #[test]
    fn test_function_call() {
        assert_eq!(canonical("LOWER(name)"), "lower(`name`)");
        assert_eq!(canonical("concat(a, 'x', b)"), "concat(`a`, 'x', `b`)");
        assert_eq!(canonical("now()"), "now()");
        assert_eq!(canonical("MOD(a, 2)"), "mod(`a`, 2)");
    }

    #[test]
    fn test_not_and_logic() {
        let expr = parse("NOT a = 1");
        match expr {
            Expr::Unary { op, operand } => {
                assert_eq!(op, UnaryOp::Not);
                assert!(matches!(*operand, Expr::Binary { op: BinaryOp::Eq, .. }));
            }
            _ => panic!("Expected unary NOT"),
        }
        assert_eq!(canonical("a = 1 and b or c"), "`a`=1 AND `b` OR `c`");
        assert_eq!(canonical("a and (b or c)"), "`a` AND (`b` OR `c`)");
    }

    #[test]
    fn test_is_null_and_in() {
        assert_eq!(canonical("a is not null"), "`a` IS NOT NULL");
        assert_eq!(canonical("a in (1, 2,3)"), "`a` IN (1, 2, 3)");
    }

    #[test]
    fn test_json_and_cast() {
        assert_eq!(
            canonical("cast(doc->>'$.zip' as char(10))"),
            "CAST(`doc`->>'$.zip' AS CHAR(10))"
        );
        assert_eq!(
            canonical("CAST(data->'$.tags' AS unsigned array)"),
            "CAST(`data`->'$.tags' AS UNSIGNED ARRAY)"
        );
        assert_eq!(canonical("cast(x as decimal(10, 2))"), "CAST(`x` AS DECIMAL(10,2))");
    }

    #[test]
    fn test_qualified_column() {
        assert_eq!(
            parse("t.a"),
            Expr::Column {
                table: Some("t".into()),
                name: "a".into()
            }
        );
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(canonical("-a + 1"), "-`a`+1");
        assert_eq!(canonical("-(a + 1)"), "-(`a`+1)");
        assert_eq!(canonical("a - -1"), "`a`--1");
        assert_eq!(parse("a--1"), parse("a - -1"));
        assert_eq!(canonical("+a"), "`a`");
    }

    #[test]
    fn test_errors() {
        assert!(parse_expression("").is_err());
        assert!(parse_expression("a +").is_err());
        assert!(parse_expression("(a").is_err());
        assert!(parse_expression("a b").is_err());
        assert!(parse_expression("'open").is_err());
        let err = parse_expression("a +").unwrap_err();
        assert_eq!(err.expected.as_deref(), Some("expression"));
    }

    #[test]
    fn test_canonical_form_is_stable() {
        for input in [
            "id + 1",
            "lower(name)",
            "a * (b + c) - d / 2",
            "NOT (a AND b)",
            "a = (b IS NULL)",
            "-(-1)",
            "a & b | c ^ d",
            "a << 2 >> 1",
            "a DIV 2 MOD 3",
            "a XOR b",
            "x LIKE 'a%'",
            "1.5 + 2e3",
        ] {
            let first = canonical(input);
            assert_eq!(canonical(&first), first, "unstable for {input}");
        }
    }
}
