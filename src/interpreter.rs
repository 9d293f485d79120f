//! Interpreter for LPL
//!
//! Drives each line through lexer and parser, then either captures the
//! resolved statement into the procedure being defined or executes it.
//! `run` and `import` re-enter the same pipeline against the same state.

use std::fs;
use std::path::{Path, PathBuf};

use crate::console::{BufferConsole, Console, StdConsole};
use crate::error::{ErrorKind, LplError, Result};
use crate::lexer::tokenize;
use crate::parser::Parser;
use crate::state::State;
use crate::token::{classify_input, Statement, Token, TokenKind};

/// Interpreter settings taken from the command line
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Print every token of every line before the line is parsed
    pub print_tokens: bool,
}

pub struct Interpreter<C: Console = StdConsole> {
    state: State,
    parser: Parser,
    console: C,
    options: Options,
}

impl Interpreter<StdConsole> {
    /// Interpreter on the terminal, importing from the current directory
    pub fn new() -> Self {
        Self::with_console(StdConsole::new())
    }
}

impl Default for Interpreter<StdConsole> {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter<BufferConsole> {
    /// Interpreter with captured output and scripted input
    pub fn buffered<I, S>(input: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_console(BufferConsole::with_input(input))
    }
}

impl<C: Console> Interpreter<C> {
    pub fn with_console(console: C) -> Self {
        Self {
            state: State::new(),
            parser: Parser::new("."),
            console,
            options: Options::default(),
        }
    }

    /// Resolve imports under `root` instead of the current directory
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.parser = Parser::new(root);
        self
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn into_console(self) -> C {
        self.console
    }

    // ==================== Pipeline ====================

    /// Run a script file line by line
    pub fn run_file(&mut self, path: &Path) -> Result<()> {
        let source = fs::read_to_string(path).map_err(|e| {
            LplError::at(ErrorKind::Io(e.to_string()), path.display().to_string())
        })?;
        self.run_source(&source)
    }

    /// Run a whole script
    pub fn run_source(&mut self, source: &str) -> Result<()> {
        self.run_lines(source)?;
        if self.state.is_defining() {
            tracing::warn!("script ended inside a procedure definition");
        }
        Ok(())
    }

    fn run_lines(&mut self, source: &str) -> Result<()> {
        for line in source.lines() {
            self.run_line(line)?;
        }
        Ok(())
    }

    /// Tokenize, parse and execute one line
    pub fn run_line(&mut self, line: &str) -> Result<()> {
        let mut statement = tokenize(line).map_err(|e| e.with_line(self.parser.line() + 1))?;

        if self.options.print_tokens {
            for token in &statement {
                self.console.write_line(&token.to_string())?;
            }
        }

        self.parser.parse(&mut statement, &mut self.state)?;
        self.execute(statement).map_err(|e| e.with_line(self.parser.line()))
    }

    // ==================== Execution ====================

    /// Execute a resolved statement, or capture it while a procedure is open
    fn execute(&mut self, statement: Statement) -> Result<()> {
        let Some(head) = statement.first().map(|t| t.kind) else {
            return Ok(());
        };

        if self.state.is_defining() && head != TokenKind::ProcedureEnd {
            self.state.append_to_procedure(statement);
            return Ok(());
        }

        match head {
            TokenKind::Run => self.run_procedure(&argument(&statement, 1)?.literal),
            TokenKind::Import => self.import(&argument(&statement, 1)?.literal),
            TokenKind::ProcedureStart => {
                self.state.begin_procedure(&argument(&statement, 1)?.literal).map(drop)
            }
            TokenKind::ProcedureEnd => {
                self.state.end_procedure();
                Ok(())
            }
            // Committed by the parser
            TokenKind::DefineConstant | TokenKind::DefineVariable => Ok(()),
            TokenKind::Add | TokenKind::Subtract | TokenKind::Multiply | TokenKind::Divide => {
                let value = arithmetic(&statement)?;
                self.state.set_register(Token::from_value(value));
                Ok(())
            }
            TokenKind::Echo => {
                let text: String = statement[1..]
                    .iter()
                    .filter(|t| t.kind.is_value())
                    .map(|t| t.literal.as_str())
                    .collect();
                self.console.write_line(&text)
            }
            TokenKind::Read => {
                let input = self.console.read_line(&argument(&statement, 1)?.literal)?;
                self.state.set_register(classify_input(&input));
                Ok(())
            }
            TokenKind::Comma
            | TokenKind::Number
            | TokenKind::Identifier
            | TokenKind::Text
            | TokenKind::RegisterRef => {
                Err(LplError::at(ErrorKind::UnknownStatement, statement[0].literal.clone()))
            }
        }
    }

    fn run_procedure(&mut self, name: &str) -> Result<()> {
        let id = self.state.procedure(name).ok_or_else(|| {
            LplError::at(ErrorKind::UndefinedProcedure(name.to_string()), name)
        })?;
        tracing::debug!(name, "running procedure");

        self.state.enter()?;
        let body = self.state.body(id).to_vec();
        let result = body.into_iter().try_for_each(|statement| self.execute(statement));
        self.state.leave();
        result
    }

    fn import(&mut self, name: &str) -> Result<()> {
        // Opened relative to the root even though the parser accepts a match anywhere below it
        let path = self.parser.root().join(name);
        tracing::debug!(path = %path.display(), "importing");

        let source = fs::read_to_string(&path).map_err(|e| {
            LplError::at(
                ErrorKind::ImportFailed { name: name.to_string(), reason: e.to_string() },
                name,
            )
        })?;

        self.state.enter()?;
        let result = self.run_lines(&source);
        self.state.leave();
        result
    }
}

/// Evaluate `op a, b` on resolved numeric operands
fn arithmetic(statement: &[Token]) -> Result<f64> {
    let a = to_number(argument(statement, 1)?)?;
    let b = to_number(argument(statement, 3)?)?;

    match statement[0].kind {
        TokenKind::Add => Ok(a + b),
        TokenKind::Subtract => Ok(a - b),
        TokenKind::Multiply => Ok(a * b),
        TokenKind::Divide if b == 0.0 => {
            Err(LplError::at(ErrorKind::DivisionByZero, statement[0].literal.clone()))
        }
        TokenKind::Divide => Ok(a / b),
        _ => Err(LplError::at(ErrorKind::UnknownStatement, statement[0].literal.clone())),
    }
}

/// Token at `position`, or an arity error for statements that skipped the parser
fn argument(statement: &[Token], position: usize) -> Result<&Token> {
    statement.get(position).ok_or_else(|| {
        LplError::at(
            ErrorKind::WrongArity { expected: position + 1, got: statement.len() },
            statement.first().map(|t| t.literal.clone()).unwrap_or_default(),
        )
    })
}

fn to_number(token: &Token) -> Result<f64> {
    token.literal.parse::<f64>().map_err(|_| {
        LplError::at(ErrorKind::InvalidNumber(token.literal.clone()), token.literal.clone())
    })
}
