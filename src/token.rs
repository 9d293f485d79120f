//! Token definitions for LPL
//!
//! Every source line becomes a flat sequence of tokens. Tokens carry their
//! literal text; the parser resolves symbolic tokens by replacing them with
//! value tokens, never by editing them.

use std::fmt;

/// The register sigil
pub const REGISTER_SIGIL: char = '^';

/// Token types in LPL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Comma,
    Number,
    Identifier,
    Text,

    // Keywords
    Run,
    Import,
    DefineConstant,
    DefineVariable,
    ProcedureStart,
    ProcedureEnd,
    Echo,
    Read,

    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,

    RegisterRef,
}

impl TokenKind {
    /// Whether this kind can stand for a value after resolution
    pub fn is_value(self) -> bool {
        matches!(self, TokenKind::Number | TokenKind::Text)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A token: its kind paired with its literal text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>) -> Self {
        Self { kind, literal: literal.into() }
    }

    pub fn number(literal: impl Into<String>) -> Self {
        Self::new(TokenKind::Number, literal)
    }

    pub fn text(literal: impl Into<String>) -> Self {
        Self::new(TokenKind::Text, literal)
    }

    /// Build a number token from a computed value.
    ///
    /// Integral values keep a fractional part (`5.0`), everything else uses
    /// the shortest representation that reads back to the same value.
    pub fn from_value(value: f64) -> Self {
        Self::number(format!("{:?}", value))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.literal)
    }
}

/// One source line's tokens
pub type Statement = Vec<Token>;

/// Check if a word is a keyword and return the corresponding token kind
pub fn lookup_keyword(word: &str) -> Option<TokenKind> {
    match word {
        "run" => Some(TokenKind::Run),
        "import" => Some(TokenKind::Import),
        "const" => Some(TokenKind::DefineConstant),
        "var" => Some(TokenKind::DefineVariable),
        "proc" => Some(TokenKind::ProcedureStart),
        "end" => Some(TokenKind::ProcedureEnd),
        "echo" => Some(TokenKind::Echo),
        "read" => Some(TokenKind::Read),
        "add" => Some(TokenKind::Add),
        "sub" => Some(TokenKind::Subtract),
        "mul" => Some(TokenKind::Multiply),
        "div" => Some(TokenKind::Divide),
        _ => None,
    }
}

/// Single character operator and sigil tokens
pub fn lookup_symbol(ch: char) -> Option<TokenKind> {
    match ch {
        '+' => Some(TokenKind::Add),
        '-' => Some(TokenKind::Subtract),
        '*' => Some(TokenKind::Multiply),
        '/' => Some(TokenKind::Divide),
        REGISTER_SIGIL => Some(TokenKind::RegisterRef),
        _ => None,
    }
}

/// Lenient numeric check: digits, `.` and `-` only.
///
/// This is a character class test, so `1-2.` passes. Conversion failures are
/// reported when the literal is used in arithmetic.
pub fn looks_numeric(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '-')
}

/// Classify one line of console input as a number or text token
pub fn classify_input(input: &str) -> Token {
    if looks_numeric(input) {
        Token::number(input)
    } else {
        Token::text(input)
    }
}
