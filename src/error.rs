//! Error types for LPL
//!
//! Every failure is fatal for the run. Diagnostics render as
//! `<token> : <reason> : line <n>`.

use std::fmt;

/// Error kinds in LPL
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    // Lexer errors
    UnterminatedText,

    // Parser errors
    WrongArity { expected: usize, got: usize },
    ExpectedKind { expected: String, got: String },
    UndefinedName(String),
    UndefinedProcedure(String),
    NotAProcedure(String),
    Redefinition(String),
    NestedProcedure,
    UnknownStatement,
    ImportNotFound(String),
    TrailingComma,
    MissingComma,
    EmptyRegister,

    // Runtime errors
    InvalidNumber(String),
    DivisionByZero,
    StackOverflow,
    ImportFailed { name: String, reason: String },
    Input(String),
    Io(String),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::UnterminatedText => write!(f, "unterminated text literal"),
            ErrorKind::WrongArity { expected, got } => {
                write!(f, "expected {} tokens, got {}", expected, got)
            }
            ErrorKind::ExpectedKind { expected, got } => {
                write!(f, "expected {}, got {}", expected, got)
            }
            ErrorKind::UndefinedName(name) => write!(f, "undefined name '{}'", name),
            ErrorKind::UndefinedProcedure(name) => write!(f, "undefined procedure '{}'", name),
            ErrorKind::NotAProcedure(name) => {
                write!(f, "'{}' is not a procedure, run is usable only on procedures", name)
            }
            ErrorKind::Redefinition(name) => write!(f, "redefinition of '{}'", name),
            ErrorKind::NestedProcedure => write!(f, "procedures cannot be nested"),
            ErrorKind::UnknownStatement => write!(f, "unknown statement"),
            ErrorKind::ImportNotFound(name) => write!(f, "cannot find file '{}' to import", name),
            ErrorKind::TrailingComma => write!(f, "trailing comma"),
            ErrorKind::MissingComma => write!(f, "values must be separated by a comma"),
            ErrorKind::EmptyRegister => write!(f, "register is empty"),
            ErrorKind::InvalidNumber(s) => write!(f, "invalid number '{}'", s),
            ErrorKind::DivisionByZero => write!(f, "division by zero"),
            ErrorKind::StackOverflow => write!(f, "stack overflow"),
            ErrorKind::ImportFailed { name, reason } => {
                write!(f, "cannot open '{}': {}", name, reason)
            }
            ErrorKind::Input(msg) => write!(f, "cannot read input: {}", msg),
            ErrorKind::Io(msg) => write!(f, "i/o error: {}", msg),
        }
    }
}

/// An LPL error with the offending token and line
#[derive(Debug, Clone, PartialEq)]
pub struct LplError {
    pub kind: ErrorKind,
    pub token: Option<String>,
    pub line: Option<usize>,
}

impl LplError {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, token: None, line: None }
    }

    pub fn at(kind: ErrorKind, token: impl Into<String>) -> Self {
        Self { kind, token: Some(token.into()), line: None }
    }

    /// Attach a line number unless one is already present
    pub fn with_line(mut self, line: usize) -> Self {
        self.line.get_or_insert(line);
        self
    }
}

impl fmt::Display for LplError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(token) = &self.token {
            write!(f, "{} : ", token)?;
        }
        write!(f, "{}", self.kind)?;
        if let Some(line) = self.line {
            write!(f, " : line {}", line)?;
        }
        Ok(())
    }
}

impl std::error::Error for LplError {}

impl From<std::io::Error> for LplError {
    fn from(err: std::io::Error) -> Self {
        LplError::new(ErrorKind::Io(err.to_string()))
    }
}

/// Result type for LPL operations
pub type Result<T> = std::result::Result<T, LplError>;
