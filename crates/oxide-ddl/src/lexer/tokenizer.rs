//! Key-expression tokenizer.

use super::{Keyword, Span, Token, TokenKind};

/// A lexer over a single key expression.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /// The input text.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skips whitespace, `# ...`, `-- ...` and `/* ... */` comments.
    ///
    /// MySQL only treats `--` as a comment when followed by whitespace, so
    /// `a--1` still lexes as `a - -1`.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            let dash_comment = self.peek() == Some('-')
                && self.peek_next() == Some('-')
                && self.input[self.pos + 2..]
                    .chars()
                    .next()
                    .map_or(true, char::is_whitespace);
            if dash_comment || self.peek() == Some('#') {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
                continue;
            }

            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                self.advance();
                self.advance();
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        None => break,
                        _ => {}
                    }
                }
                continue;
            }

            break;
        }
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, Span::new(self.start, self.pos))
    }

    fn scan_word(&mut self) -> Token {
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
        {
            self.advance();
        }

        let text = &self.input[self.start..self.pos];
        match Keyword::from_word(text) {
            Some(keyword) => self.make_token(TokenKind::Keyword(keyword)),
            None => self.make_token(TokenKind::Identifier(text.to_string())),
        }
    }

    /// Scans a quoted run. A doubled quote character stands for itself.
    fn scan_quoted(&mut self, quote: char) -> Result<String, Token> {
        self.advance();
        let mut value = String::new();

        loop {
            match self.advance() {
                Some(c) if c == quote => {
                    if self.peek() == Some(quote) {
                        self.advance();
                        value.push(quote);
                    } else {
                        return Ok(value);
                    }
                }
                Some('\\') if quote != '`' => match self.advance() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('0') => value.push('\0'),
                    Some(c) => value.push(c),
                    None => break,
                },
                Some(c) => value.push(c),
                None => break,
            }
        }

        Err(self.make_token(TokenKind::Error(format!(
            "Unterminated quoted text starting with {quote}"
        ))))
    }

    fn scan_number(&mut self) -> Token {
        let mut is_float = false;

        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            is_float = true;
            self.advance();
            if self.peek().is_some_and(|c| c == '+' || c == '-') {
                self.advance();
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let text = &self.input[self.start..self.pos];
        if is_float {
            match text.parse::<f64>() {
                Ok(f) => self.make_token(TokenKind::Float(f)),
                Err(e) => self.make_token(TokenKind::Error(format!("Invalid float: {e}"))),
            }
        } else {
            match text.parse::<i64>() {
                Ok(i) => self.make_token(TokenKind::Integer(i)),
                Err(e) => self.make_token(TokenKind::Error(format!("Invalid integer: {e}"))),
            }
        }
    }

    /// Returns the next token.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();
        self.start = self.pos;

        let Some(c) = self.peek() else {
            return self.make_token(TokenKind::Eof);
        };

        match c {
            '\'' | '"' => {
                return match self.scan_quoted(c) {
                    Ok(value) => self.make_token(TokenKind::String(value)),
                    Err(token) => token,
                };
            }
            '`' => {
                return match self.scan_quoted(c) {
                    Ok(value) => self.make_token(TokenKind::QuotedIdentifier(value)),
                    Err(token) => token,
                };
            }
            c if c.is_ascii_digit() => return self.scan_number(),
            c if c.is_alphabetic() || c == '_' || c == '$' => return self.scan_word(),
            _ => {}
        }

        self.advance();
        let kind = match c {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '+' => TokenKind::Plus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '~' => TokenKind::BitNot,
            '^' => TokenKind::BitXor,
            '&' => TokenKind::BitAnd,
            '|' => TokenKind::BitOr,
            '=' => TokenKind::Eq,
            '-' => {
                if self.peek() == Some('>') {
                    self.advance();
                    if self.peek() == Some('>') {
                        self.advance();
                        TokenKind::LongArrow
                    } else {
                        TokenKind::Arrow
                    }
                } else {
                    TokenKind::Minus
                }
            }
            '<' => match self.peek() {
                Some('=') => {
                    self.advance();
                    TokenKind::LtEq
                }
                Some('>') => {
                    self.advance();
                    TokenKind::NotEq
                }
                Some('<') => {
                    self.advance();
                    TokenKind::LeftShift
                }
                _ => TokenKind::Lt,
            },
            '>' => match self.peek() {
                Some('=') => {
                    self.advance();
                    TokenKind::GtEq
                }
                Some('>') => {
                    self.advance();
                    TokenKind::RightShift
                }
                _ => TokenKind::Gt,
            },
            '!' if self.peek() == Some('=') => {
                self.advance();
                TokenKind::NotEq
            }
            _ => TokenKind::Error(format!("Unexpected character: {c}")),
        };
        self.make_token(kind)
    }

    /// Tokenizes the entire input, ending with an EOF token.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input)
            .tokenize()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(token_kinds(""), vec![TokenKind::Eof]);
        assert_eq!(token_kinds("   \n\t"), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_quoted_identifiers() {
        assert_eq!(
            token_kinds("`order` `a``b`"),
            vec![
                TokenKind::QuotedIdentifier("order".to_string()),
                TokenKind::QuotedIdentifier("a`b".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            token_kinds("a and NOT b"),
            vec![
                TokenKind::Identifier("a".to_string()),
                TokenKind::Keyword(Keyword::And),
                TokenKind::Keyword(Keyword::Not),
                TokenKind::Identifier("b".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            token_kinds(r#"'it''s' "x" 'a\nb'"#),
            vec![
                TokenKind::String("it's".to_string()),
                TokenKind::String("x".to_string()),
                TokenKind::String("a\nb".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            token_kinds("42 3.5 1e3"),
            vec![
                TokenKind::Integer(42),
                TokenKind::Float(3.5),
                TokenKind::Float(1000.0),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_json_arrows() {
        assert_eq!(
            token_kinds("doc->'$.a' doc->>'$.b'"),
            vec![
                TokenKind::Identifier("doc".to_string()),
                TokenKind::Arrow,
                TokenKind::String("$.a".to_string()),
                TokenKind::Identifier("doc".to_string()),
                TokenKind::LongArrow,
                TokenKind::String("$.b".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            token_kinds("a -- trailing\n+ /* inline */ b # end"),
            vec![
                TokenKind::Identifier("a".to_string()),
                TokenKind::Plus,
                TokenKind::Identifier("b".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_double_dash_without_space_is_minus() {
        assert_eq!(
            token_kinds("a--1"),
            vec![
                TokenKind::Identifier("a".to_string()),
                TokenKind::Minus,
                TokenKind::Minus,
                TokenKind::Integer(1),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comparison_operators() {
        assert_eq!(
            token_kinds("<> != <= >= << >>"),
            vec![
                TokenKind::NotEq,
                TokenKind::NotEq,
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::LeftShift,
                TokenKind::RightShift,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_string() {
        let kinds = token_kinds("'abc");
        assert!(matches!(kinds[0], TokenKind::Error(_)));
    }

    #[test]
    fn test_span_tracking() {
        let tokens = Lexer::new("ab + `cd`").tokenize();
        assert_eq!(tokens[0].span, Span::new(0, 2));
        assert_eq!(tokens[1].span, Span::new(3, 4));
        assert_eq!(tokens[2].span, Span::new(5, 9));
    }
}
