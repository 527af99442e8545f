//! Lexer for option specification files
//!
//! Pull-based: the parser asks for one token at a time with `next_token`.
//! That lets the parser switch the lexer into include mode right before the
//! target of an `include` directive is scanned.

use super::cursor::SourceCursor;
use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::logging::{codes, Code};
use crate::log_debug;
use crate::tokens::{Keyword, PathKind, Punctuation, SpannedToken, Token};
use crate::utils::{Position, Span, Spanned};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexerError {
    #[error("unexpected character '{character}'")]
    UnexpectedCharacter { character: char, position: Position },

    #[error("invalid character sequence '{lexeme}'")]
    InvalidCharacterSequence { lexeme: String, position: Position },

    #[error("end of stream reached while reading {what}")]
    UnexpectedEndOfStream {
        what: &'static str,
        position: Position,
    },

    #[error("end of stream reached while reading block comment")]
    UnterminatedComment { position: Position },

    #[error("invalid numeric literal '{lexeme}'")]
    InvalidNumber { lexeme: String, position: Position },

    #[error("identifier is {length} characters long (max {max})")]
    IdentifierTooLong {
        length: usize,
        max: usize,
        position: Position,
    },

    #[error("{what} exceeds maximum length of {max} characters")]
    LiteralTooLarge {
        what: &'static str,
        max: usize,
        position: Position,
    },

    #[error("{what} nesting exceeds maximum depth of {max}")]
    NestingTooDeep {
        what: &'static str,
        max: usize,
        position: Position,
    },
}

impl LexerError {
    pub fn position(&self) -> Position {
        match self {
            LexerError::UnexpectedCharacter { position, .. }
            | LexerError::InvalidCharacterSequence { position, .. }
            | LexerError::UnexpectedEndOfStream { position, .. }
            | LexerError::UnterminatedComment { position }
            | LexerError::InvalidNumber { position, .. }
            | LexerError::IdentifierTooLong { position, .. }
            | LexerError::LiteralTooLarge { position, .. }
            | LexerError::NestingTooDeep { position, .. } => *position,
        }
    }

    pub fn span(&self) -> Span {
        Span::point(self.position())
    }

    pub fn error_code(&self) -> Code {
        match self {
            LexerError::UnexpectedCharacter { .. } => codes::lexical::UNEXPECTED_CHARACTER,
            LexerError::InvalidCharacterSequence { .. } => {
                codes::lexical::INVALID_CHARACTER_SEQUENCE
            }
            LexerError::UnexpectedEndOfStream { .. } => codes::lexical::UNTERMINATED_LITERAL,
            LexerError::UnterminatedComment { .. } => codes::lexical::UNTERMINATED_COMMENT,
            LexerError::InvalidNumber { .. } => codes::lexical::INVALID_NUMBER,
            LexerError::IdentifierTooLong { .. } => codes::lexical::IDENTIFIER_TOO_LONG,
            LexerError::LiteralTooLarge { .. } => codes::lexical::LITERAL_TOO_LARGE,
            LexerError::NestingTooDeep { .. } => codes::lexical::EXPRESSION_TOO_DEEP,
        }
    }
}

pub type LexerResult<T> = Result<T, LexerError>;

/// Counters collected while scanning one file
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub keyword_tokens: usize,
    pub identifier_tokens: usize,
    pub literal_tokens: usize,
    pub expression_tokens: usize,
    pub comment_count: usize,
    pub error_count: usize,
}

impl LexicalMetrics {
    fn record_token(&mut self, token: &Token) {
        self.total_tokens += 1;

        match token {
            Token::Keyword(_) => self.keyword_tokens += 1,
            Token::Identifier(_) => self.identifier_tokens += 1,
            Token::PathLiteral { .. }
            | Token::StringLiteral(_)
            | Token::CharLiteral(_)
            | Token::BoolLiteral(_)
            | Token::IntLiteral(_)
            | Token::FloatLiteral(_) => self.literal_tokens += 1,
            Token::CallExpression(_) | Token::TemplateExpression(_) => {
                self.expression_tokens += 1
            }
            Token::EndOfStream | Token::Punctuation(_) => {}
        }
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '-' || c == '/'
}

fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

pub struct Lexer {
    cursor: SourceCursor,
    include_pending: bool,
    valid: bool,
    metrics: LexicalMetrics,
    preferences: LexicalPreferences,
}

impl Lexer {
    pub fn new(source: impl Into<String>) -> Self {
        Self::with_preferences(source, LexicalPreferences::default())
    }

    pub fn with_preferences(source: impl Into<String>, preferences: LexicalPreferences) -> Self {
        Self {
            cursor: SourceCursor::new(source),
            include_pending: false,
            valid: true,
            metrics: LexicalMetrics::default(),
            preferences,
        }
    }

    /// False once any lexical error has been produced
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    /// Scan the next token as the target of an `include` directive:
    /// `"..."` and `<...>` become whole path literals.
    pub fn expect_path_literal(&mut self) {
        self.include_pending = true;
    }

    pub fn next_token(&mut self) -> LexerResult<SpannedToken> {
        let include = std::mem::take(&mut self.include_pending);

        match self.scan(include) {
            Ok(token) => {
                self.metrics.record_token(&token.value);
                if self.preferences.log_tokens {
                    log_debug!("Token scanned",
                        "token" => token.value,
                        "position" => token.span.start
                    );
                }
                Ok(token)
            }
            Err(err) => {
                self.valid = false;
                self.metrics.error_count += 1;
                Err(err)
            }
        }
    }

    fn scan(&mut self, include: bool) -> LexerResult<SpannedToken> {
        self.skip_whitespace_and_comments()?;

        let start = self.cursor.position();
        let Some(c) = self.cursor.get() else {
            return Ok(self.finish(Token::EndOfStream, start));
        };

        let token = match c {
            '\'' => self.char_literal(start)?,
            '"' if include => self.path_literal(PathKind::Quoted)?,
            '"' => self.string_literal(start)?,
            '<' if include => self.path_literal(PathKind::Bracketed)?,
            '<' => Token::TemplateExpression(self.balanced('<', '>', "template expression")?),
            '(' => Token::CallExpression(self.balanced('(', ')', "call expression")?),
            ';' => Token::Punctuation(Punctuation::Semicolon),
            ',' => Token::Punctuation(Punctuation::Comma),
            '{' => Token::Punctuation(Punctuation::LeftBrace),
            '}' => Token::Punctuation(Punctuation::RightBrace),
            '=' => Token::Punctuation(Punctuation::Equals),
            '|' => Token::Punctuation(Punctuation::Pipe),
            ':' => {
                if self.cursor.peek() == Some(':') {
                    self.cursor.get();
                    Token::Punctuation(Punctuation::DoubleColon)
                } else {
                    Token::Punctuation(Punctuation::Colon)
                }
            }
            '-' => self.minus(start)?,
            c if c.is_ascii_digit() => self.number(start, c, false)?,
            c if is_identifier_start(c) => self.identifier(start, c)?,
            other => {
                return Err(LexerError::UnexpectedCharacter {
                    character: other,
                    position: start,
                })
            }
        };

        Ok(self.finish(token, start))
    }

    fn finish(&self, token: Token, start: Position) -> SpannedToken {
        Spanned::new(token, Span::new(start, self.cursor.position()))
    }

    fn skip_whitespace_and_comments(&mut self) -> LexerResult<()> {
        loop {
            self.cursor.skip_whitespace();

            if self.cursor.peek() != Some('/') {
                return Ok(());
            }

            let start = self.cursor.position();
            self.cursor.get();

            match self.cursor.peek() {
                Some('/') => {
                    while let Some(c) = self.cursor.get() {
                        if c == '\n' {
                            break;
                        }
                    }
                    self.metrics.comment_count += 1;
                }
                Some('*') => {
                    self.cursor.get();
                    self.block_comment(start)?;
                    self.metrics.comment_count += 1;
                }
                _ => {
                    // Not a comment: '/' starts an identifier such as `/opt`.
                    self.cursor.unget();
                    return Ok(());
                }
            }
        }
    }

    fn block_comment(&mut self, start: Position) -> LexerResult<()> {
        loop {
            match self.cursor.get() {
                None => return Err(LexerError::UnterminatedComment { position: start }),
                Some('*') if self.cursor.peek() == Some('/') => {
                    self.cursor.get();
                    return Ok(());
                }
                Some(_) => {}
            }
        }
    }

    /// `-` begins a negative number (possibly after whitespace) or an
    /// identifier such as `-v`.
    fn minus(&mut self, start: Position) -> LexerResult<Token> {
        match self.cursor.peek() {
            Some(d) if d.is_ascii_digit() => {
                self.cursor.get();
                self.number(start, d, true)
            }
            Some(w) if w.is_whitespace() => {
                self.cursor.skip_whitespace();
                match self.cursor.peek() {
                    Some(d) if d.is_ascii_digit() => {
                        self.cursor.get();
                        self.number(start, d, true)
                    }
                    _ => Err(LexerError::UnexpectedCharacter {
                        character: '-',
                        position: start,
                    }),
                }
            }
            _ => self.identifier(start, '-'),
        }
    }

    fn identifier(&mut self, start: Position, first: char) -> LexerResult<Token> {
        let mut lexeme = String::from(first);
        self.cursor.take_while(&mut lexeme, is_identifier_continue);

        if lexeme.len() > MAX_IDENTIFIER_LENGTH {
            return Err(LexerError::IdentifierTooLong {
                length: lexeme.len(),
                max: MAX_IDENTIFIER_LENGTH,
                position: start,
            });
        }

        if (first == '-' || first == '/')
            && !lexeme[1..]
                .chars()
                .any(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            // Reported where the run ends
            return Err(LexerError::InvalidCharacterSequence {
                lexeme,
                position: self.cursor.position(),
            });
        }

        if let Some(keyword) = Keyword::from_str(&lexeme) {
            return Ok(Token::Keyword(keyword));
        }

        Ok(match lexeme.as_str() {
            "true" => Token::BoolLiteral(true),
            "false" => Token::BoolLiteral(false),
            _ => Token::Identifier(lexeme),
        })
    }

    fn number(&mut self, start: Position, first: char, negative: bool) -> LexerResult<Token> {
        let mut lexeme = String::new();
        if negative {
            lexeme.push('-');
        }
        lexeme.push(first);

        if first == '0' && matches!(self.cursor.peek(), Some('x' | 'X')) {
            if let Some(x) = self.cursor.get() {
                lexeme.push(x);
            }
            let digits_from = lexeme.len();
            self.cursor.take_while(&mut lexeme, |c| c.is_ascii_hexdigit());
            if lexeme.len() == digits_from {
                return Err(LexerError::InvalidNumber {
                    lexeme,
                    position: start,
                });
            }
            self.cursor
                .take_while(&mut lexeme, |c| matches!(c, 'u' | 'U' | 'l' | 'L'));
            return Ok(Token::IntLiteral(lexeme));
        }

        self.cursor.take_while(&mut lexeme, |c| c.is_ascii_digit());

        let mut is_float = false;

        if self.cursor.peek() == Some('.') {
            self.cursor.get();
            lexeme.push('.');
            self.cursor.take_while(&mut lexeme, |c| c.is_ascii_digit());
            is_float = true;
        }

        if let Some(e @ ('e' | 'E')) = self.cursor.peek() {
            self.cursor.get();
            lexeme.push(e);
            if let Some(sign @ ('+' | '-')) = self.cursor.peek() {
                self.cursor.get();
                lexeme.push(sign);
            }
            let digits_from = lexeme.len();
            self.cursor.take_while(&mut lexeme, |c| c.is_ascii_digit());
            if lexeme.len() == digits_from {
                return Err(LexerError::InvalidNumber {
                    lexeme,
                    position: start,
                });
            }
            is_float = true;
        }

        if is_float {
            if let Some(suffix @ ('f' | 'F' | 'l' | 'L')) = self.cursor.peek() {
                self.cursor.get();
                lexeme.push(suffix);
            }
            Ok(Token::FloatLiteral(lexeme))
        } else {
            self.cursor
                .take_while(&mut lexeme, |c| matches!(c, 'u' | 'U' | 'l' | 'L'));
            Ok(Token::IntLiteral(lexeme))
        }
    }

    /// Read up to and including the closing `quote`, which is already
    /// preceded by the opening one in `out`.
    ///
    /// Tracks whether the previous character was an unescaped backslash so
    /// `'\\'` and `"\\"` terminate where they should.
    fn quoted_tail(&mut self, out: &mut String, quote: char, what: &'static str) -> LexerResult<()> {
        let mut previous = quote;

        loop {
            let Some(c) = self.cursor.get() else {
                return Err(LexerError::UnexpectedEndOfStream {
                    what,
                    position: self.cursor.position(),
                });
            };

            out.push(c);

            if c == quote && previous != '\\' {
                return Ok(());
            }

            previous = if c == '\\' && previous == '\\' { '.' } else { c };
        }
    }

    fn check_literal_length(&self, lexeme: &str, what: &'static str, start: Position) -> LexerResult<()> {
        if lexeme.len() > MAX_LITERAL_LENGTH {
            return Err(LexerError::LiteralTooLarge {
                what,
                max: MAX_LITERAL_LENGTH,
                position: start,
            });
        }
        Ok(())
    }

    fn char_literal(&mut self, start: Position) -> LexerResult<Token> {
        let mut lexeme = String::from('\'');
        self.quoted_tail(&mut lexeme, '\'', "character literal")?;
        self.check_literal_length(&lexeme, "character literal", start)?;
        Ok(Token::CharLiteral(lexeme))
    }

    /// Adjacent string literals separated only by whitespace are joined into
    /// one token, keeping both quoted parts: `"a" "b"`.
    fn string_literal(&mut self, start: Position) -> LexerResult<Token> {
        let mut lexeme = String::from('"');
        self.quoted_tail(&mut lexeme, '"', "string literal")?;

        if self.preferences.join_adjacent_strings {
            loop {
                self.cursor.skip_whitespace();
                if self.cursor.peek() != Some('"') {
                    break;
                }
                self.cursor.get();
                lexeme.push_str(" \"");
                self.quoted_tail(&mut lexeme, '"', "string literal")?;
            }
        }

        self.check_literal_length(&lexeme, "string literal", start)?;
        Ok(Token::StringLiteral(lexeme))
    }

    fn path_literal(&mut self, kind: PathKind) -> LexerResult<Token> {
        let (_, close) = kind.delimiters();
        let mut path = String::new();

        loop {
            match self.cursor.get() {
                None => {
                    return Err(LexerError::UnexpectedEndOfStream {
                        what: "path literal",
                        position: self.cursor.position(),
                    })
                }
                Some(c) if c == close => break,
                Some(c) => path.push(c),
            }
        }

        Ok(Token::PathLiteral { kind, path })
    }

    /// Raw text of a balanced `open ... close` run; the opening bracket has
    /// already been consumed. Only brackets of the same kind nest, and
    /// quoted literals inside are skipped whole.
    fn balanced(&mut self, open: char, close: char, what: &'static str) -> LexerResult<String> {
        let start = self.cursor.position();
        let mut text = String::from(open);
        let mut depth = 1usize;

        loop {
            let Some(c) = self.cursor.get() else {
                return Err(LexerError::UnexpectedEndOfStream {
                    what,
                    position: self.cursor.position(),
                });
            };

            text.push(c);

            if c == open {
                depth += 1;
                if depth > MAX_EXPRESSION_DEPTH {
                    return Err(LexerError::NestingTooDeep {
                        what,
                        max: MAX_EXPRESSION_DEPTH,
                        position: start,
                    });
                }
            } else if c == close {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            } else if c == '"' || c == '\'' {
                self.quoted_tail(&mut text, c, what)?;
            }
        }

        self.check_literal_length(&text, what, start)?;
        Ok(text)
    }
}

/// Scan a whole text, collecting tokens (up to and including end-of-stream)
/// and any lexical errors. Scanning continues past errors.
pub fn tokenize(source: &str) -> (Vec<SpannedToken>, Vec<LexerError>) {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    loop {
        match lexer.next_token() {
            Ok(token) => {
                let done = token.value.is_eos();
                tokens.push(token);
                if done {
                    break;
                }
            }
            Err(err) => errors.push(err),
        }
    }

    (tokens, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn kinds(source: &str) -> Vec<Token> {
        let (tokens, errors) = tokenize(source);
        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
        tokens.into_iter().map(|t| t.value).collect()
    }

    fn ident(s: &str) -> Token {
        Token::Identifier(s.to_string())
    }

    #[test]
    fn test_class_declaration_tokens() {
        assert_eq!(
            kinds("class options { bool --help|-h; };"),
            vec![
                Token::Keyword(Keyword::Class),
                ident("options"),
                Token::Punctuation(Punctuation::LeftBrace),
                Token::Keyword(Keyword::Bool),
                ident("--help"),
                Token::Punctuation(Punctuation::Pipe),
                ident("-h"),
                Token::Punctuation(Punctuation::Semicolon),
                Token::Punctuation(Punctuation::RightBrace),
                Token::Punctuation(Punctuation::Semicolon),
                Token::EndOfStream,
            ]
        );
    }

    #[test]
    fn test_positions_are_one_based() {
        let (tokens, _) = tokenize("class\n  c");
        assert_eq!(tokens[0].span.start.line, 1);
        assert_eq!(tokens[0].span.start.column, 1);
        assert_eq!(tokens[1].span.start.line, 2);
        assert_eq!(tokens[1].span.start.column, 3);
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            kinds("// line\nint /* block\n comment */ x"),
            vec![Token::Keyword(Keyword::Int), ident("x"), Token::EndOfStream]
        );
    }

    #[test]
    fn test_slash_identifier_is_not_a_comment() {
        assert_eq!(kinds("/opt"), vec![ident("/opt"), Token::EndOfStream]);
    }

    #[test]
    fn test_unterminated_block_comment() {
        let (_, errors) = tokenize("int /* never closed");
        assert_matches!(
            errors.as_slice(),
            [LexerError::UnterminatedComment { position }] if position.column == 5
        );
    }

    #[test]
    fn test_scope_punctuation() {
        assert_eq!(
            kinds("::a::b : c"),
            vec![
                Token::Punctuation(Punctuation::DoubleColon),
                ident("a"),
                Token::Punctuation(Punctuation::DoubleColon),
                ident("b"),
                Token::Punctuation(Punctuation::Colon),
                ident("c"),
                Token::EndOfStream,
            ]
        );
    }

    #[test]
    fn test_negative_numbers() {
        assert_eq!(
            kinds("-5 - 7"),
            vec![
                Token::IntLiteral("-5".into()),
                Token::IntLiteral("-7".into()),
                Token::EndOfStream
            ]
        );
    }

    #[test]
    fn test_stray_minus() {
        let (_, errors) = tokenize("- x");
        assert_matches!(
            errors.as_slice(),
            [LexerError::UnexpectedCharacter { character: '-', .. }]
        );
    }

    #[test]
    fn test_invalid_identifier_sequence() {
        let (_, errors) = tokenize("--- ;");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "invalid character sequence '---'");
        let position = errors[0].position();
        assert_eq!((position.line, position.column), (1, 4));

        let (_, errors) = tokenize("x;\n  /-- ;");
        let position = errors[0].position();
        assert_eq!((position.line, position.column), (2, 6));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds("42 0x1F 10UL 3.14 1e10 2.5f"),
            vec![
                Token::IntLiteral("42".into()),
                Token::IntLiteral("0x1F".into()),
                Token::IntLiteral("10UL".into()),
                Token::FloatLiteral("3.14".into()),
                Token::FloatLiteral("1e10".into()),
                Token::FloatLiteral("2.5f".into()),
                Token::EndOfStream,
            ]
        );
    }

    #[test]
    fn test_bool_literals() {
        assert_eq!(
            kinds("true false"),
            vec![
                Token::BoolLiteral(true),
                Token::BoolLiteral(false),
                Token::EndOfStream
            ]
        );
    }

    #[test]
    fn test_char_literal_escapes() {
        assert_eq!(
            kinds(r"'\\' '\'' 'a'"),
            vec![
                Token::CharLiteral(r"'\\'".into()),
                Token::CharLiteral(r"'\''".into()),
                Token::CharLiteral("'a'".into()),
                Token::EndOfStream,
            ]
        );
    }

    #[test]
    fn test_string_literal_ending_in_escaped_backslash() {
        assert_eq!(
            kinds(r#""dir\\" x"#),
            vec![
                Token::StringLiteral(r#""dir\\""#.into()),
                ident("x"),
                Token::EndOfStream
            ]
        );
    }

    #[test]
    fn test_escaped_quote_does_not_terminate_string() {
        assert_eq!(
            kinds(r#""say \"hi\"""#),
            vec![Token::StringLiteral(r#""say \"hi\"""#.into()), Token::EndOfStream]
        );
    }

    #[test]
    fn test_adjacent_strings_are_joined() {
        assert_eq!(
            kinds("\"first\"\n   \"second\";"),
            vec![
                Token::StringLiteral("\"first\" \"second\"".into()),
                Token::Punctuation(Punctuation::Semicolon),
                Token::EndOfStream,
            ]
        );
    }

    #[test]
    fn test_unterminated_string() {
        let (_, errors) = tokenize("\"open");
        assert_eq!(
            errors[0].to_string(),
            "end of stream reached while reading string literal"
        );
    }

    #[test]
    fn test_call_expression_nesting() {
        assert_eq!(
            kinds("(a, (b), \")\") ;"),
            vec![
                Token::CallExpression("(a, (b), \")\")".into()),
                Token::Punctuation(Punctuation::Semicolon),
                Token::EndOfStream,
            ]
        );
    }

    #[test]
    fn test_template_expression_nesting() {
        assert_eq!(
            kinds("std::map<int, std::vector<int>> m"),
            vec![
                ident("std"),
                Token::Punctuation(Punctuation::DoubleColon),
                ident("map"),
                Token::TemplateExpression("<int, std::vector<int>>".into()),
                ident("m"),
                Token::EndOfStream,
            ]
        );
    }

    #[test]
    fn test_unterminated_call_expression() {
        let (_, errors) = tokenize("(1, 2");
        assert_matches!(
            errors.as_slice(),
            [LexerError::UnexpectedEndOfStream { what: "call expression", .. }]
        );
    }

    #[test]
    fn test_include_mode_reads_path_literals() {
        let mut lexer = Lexer::new("include <string>; include \"base.cli\";");

        assert_eq!(
            lexer.next_token().unwrap().value,
            Token::Keyword(Keyword::Include)
        );
        lexer.expect_path_literal();
        assert_eq!(
            lexer.next_token().unwrap().value,
            Token::PathLiteral {
                kind: PathKind::Bracketed,
                path: "string".into()
            }
        );
        lexer.next_token().unwrap();
        lexer.next_token().unwrap();
        lexer.expect_path_literal();
        assert_eq!(
            lexer.next_token().unwrap().value,
            Token::PathLiteral {
                kind: PathKind::Quoted,
                path: "base.cli".into()
            }
        );
    }

    #[test]
    fn test_include_mode_lasts_one_token() {
        let mut lexer = Lexer::new("\"a\" \"b\"");
        lexer.expect_path_literal();
        assert_matches!(lexer.next_token().unwrap().value, Token::PathLiteral { .. });
        assert_matches!(lexer.next_token().unwrap().value, Token::StringLiteral(_));
    }

    #[test]
    fn test_valid_flag_and_metrics() {
        let mut lexer = Lexer::new("int $ x; // done");
        assert!(lexer.next_token().is_ok());
        assert!(lexer.next_token().is_err());
        assert!(!lexer.is_valid());
        while !lexer.next_token().unwrap().value.is_eos() {}
        let metrics = lexer.metrics();
        assert_eq!(metrics.error_count, 1);
        assert_eq!(metrics.keyword_tokens, 1);
        assert_eq!(metrics.identifier_tokens, 1);
        assert_eq!(metrics.comment_count, 1);
    }

    #[test]
    fn test_error_codes() {
        let (_, errors) = tokenize("@");
        assert_eq!(errors[0].error_code(), codes::lexical::UNEXPECTED_CHARACTER);
        assert_eq!(errors[0].to_string(), "unexpected character '@'");
    }
}
