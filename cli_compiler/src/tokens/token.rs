//! Tokens of the option specification language
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved words: the three structural keywords plus the C++ fundamental
/// type keywords accepted in type specifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    Include,
    Namespace,
    Class,
    Signed,
    Unsigned,
    Bool,
    Char,
    WcharT,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl Keyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Include => "include",
            Keyword::Namespace => "namespace",
            Keyword::Class => "class",
            Keyword::Signed => "signed",
            Keyword::Unsigned => "unsigned",
            Keyword::Bool => "bool",
            Keyword::Char => "char",
            Keyword::WcharT => "wchar_t",
            Keyword::Short => "short",
            Keyword::Int => "int",
            Keyword::Long => "long",
            Keyword::Float => "float",
            Keyword::Double => "double",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "include" => Some(Keyword::Include),
            "namespace" => Some(Keyword::Namespace),
            "class" => Some(Keyword::Class),
            "signed" => Some(Keyword::Signed),
            "unsigned" => Some(Keyword::Unsigned),
            "bool" => Some(Keyword::Bool),
            "char" => Some(Keyword::Char),
            "wchar_t" => Some(Keyword::WcharT),
            "short" => Some(Keyword::Short),
            "int" => Some(Keyword::Int),
            "long" => Some(Keyword::Long),
            "float" => Some(Keyword::Float),
            "double" => Some(Keyword::Double),
            _ => None,
        }
    }

    /// True for keywords that can begin a fundamental type
    pub fn is_fundamental_type(&self) -> bool {
        !matches!(
            self,
            Keyword::Include | Keyword::Namespace | Keyword::Class
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Punctuation {
    Semicolon,
    Comma,
    Colon,
    DoubleColon,
    LeftBrace,
    RightBrace,
    Equals,
    Pipe,
}

impl Punctuation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Punctuation::Semicolon => ";",
            Punctuation::Comma => ",",
            Punctuation::Colon => ":",
            Punctuation::DoubleColon => "::",
            Punctuation::LeftBrace => "{",
            Punctuation::RightBrace => "}",
            Punctuation::Equals => "=",
            Punctuation::Pipe => "|",
        }
    }
}

/// How an include target was delimited; decides the search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathKind {
    /// `"path"`: relative to the including file
    Quoted,
    /// `<path>`: searched across the include directories
    Bracketed,
}

impl PathKind {
    pub fn delimiters(&self) -> (char, char) {
        match self {
            PathKind::Quoted => ('"', '"'),
            PathKind::Bracketed => ('<', '>'),
        }
    }
}

/// One lexical unit.
///
/// Literal payloads keep the source spelling, delimiters included, so that
/// values can be emitted back verbatim. Path literals are the exception:
/// they hold the bare path and record the delimiter kind separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Token {
    EndOfStream,
    Keyword(Keyword),
    Identifier(String),
    Punctuation(Punctuation),
    PathLiteral { kind: PathKind, path: String },
    StringLiteral(String),
    CharLiteral(String),
    BoolLiteral(bool),
    IntLiteral(String),
    FloatLiteral(String),
    /// Balanced `( ... )` text, parentheses included
    CallExpression(String),
    /// Balanced `< ... >` text, angle brackets included
    TemplateExpression(String),
}

impl Token {
    pub fn is_eos(&self) -> bool {
        matches!(self, Token::EndOfStream)
    }

    pub fn keyword(&self) -> Option<Keyword> {
        match self {
            Token::Keyword(k) => Some(*k),
            _ => None,
        }
    }

    pub fn punctuation(&self) -> Option<Punctuation> {
        match self {
            Token::Punctuation(p) => Some(*p),
            _ => None,
        }
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.keyword() == Some(keyword)
    }

    pub fn is_punctuation(&self, punctuation: Punctuation) -> bool {
        self.punctuation() == Some(punctuation)
    }

    pub fn identifier(&self) -> Option<&str> {
        match self {
            Token::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// Source spelling of the token
    pub fn lexeme(&self) -> String {
        match self {
            Token::EndOfStream => String::new(),
            Token::Keyword(k) => k.as_str().to_string(),
            Token::Punctuation(p) => p.as_str().to_string(),
            Token::PathLiteral { kind, path } => {
                let (open, close) = kind.delimiters();
                format!("{}{}{}", open, path, close)
            }
            Token::BoolLiteral(b) => b.to_string(),
            Token::Identifier(s)
            | Token::StringLiteral(s)
            | Token::CharLiteral(s)
            | Token::IntLiteral(s)
            | Token::FloatLiteral(s)
            | Token::CallExpression(s)
            | Token::TemplateExpression(s) => s.clone(),
        }
    }
}

/// Description used in "expected X instead of <token>" diagnostics
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::EndOfStream => write!(f, "end-of-stream"),
            Token::Keyword(k) => write!(f, "keyword '{}'", k.as_str()),
            Token::Identifier(name) => write!(f, "identifier '{}'", name),
            Token::Punctuation(p) => write!(f, "'{}'", p.as_str()),
            Token::PathLiteral { .. } => write!(f, "path literal"),
            Token::StringLiteral(_) => write!(f, "string literal"),
            Token::CharLiteral(_) => write!(f, "char literal"),
            Token::BoolLiteral(_) => write!(f, "bool literal"),
            Token::IntLiteral(_) => write!(f, "integer literal"),
            Token::FloatLiteral(_) => write!(f, "floating point literal"),
            Token::CallExpression(_) => write!(f, "call expression"),
            Token::TemplateExpression(_) => write!(f, "template expression"),
        }
    }
}
