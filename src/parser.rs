//! Parser for LPL
//!
//! Validates one statement at a time against the fixed instruction set and
//! resolves register references and names into value tokens in place.
//! Constant and variable definitions are committed here.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{ErrorKind, LplError, Result};
use crate::state::{NameKind, State};
use crate::token::{Statement, Token, TokenKind};

/// The parser state
pub struct Parser {
    line: usize,
    root: PathBuf,
}

impl Parser {
    /// Create a parser that resolves imports under `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { line: 0, root: root.into() }
    }

    /// Number of statements parsed so far, used for diagnostics
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate and resolve a statement
    pub fn parse(&mut self, statement: &mut Statement, state: &mut State) -> Result<()> {
        self.line += 1;
        self.statement(statement, state).map_err(|e| e.with_line(self.line))
    }

    fn statement(&self, statement: &mut Statement, state: &mut State) -> Result<()> {
        let Some(head) = statement.first().map(|t| t.kind) else {
            return Ok(());
        };

        match head {
            TokenKind::Run => self.run_statement(statement, state),
            TokenKind::Import => self.import_statement(statement),
            TokenKind::DefineConstant => define_statement(statement, state, false),
            TokenKind::DefineVariable => define_statement(statement, state, true),
            TokenKind::ProcedureStart => procedure_statement(statement, state),
            TokenKind::ProcedureEnd => expect_arity(statement, 1),
            TokenKind::Add | TokenKind::Subtract | TokenKind::Multiply | TokenKind::Divide => {
                arithmetic_statement(statement, state)
            }
            TokenKind::Echo => echo_statement(statement, state),
            TokenKind::Read => {
                expect_arity(statement, 2)?;
                expect_kind(&statement[1], TokenKind::Text)
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

    fn run_statement(&self, statement: &Statement, state: &State) -> Result<()> {
        expect_arity(statement, 2)?;
        let name = &statement[1];
        expect_kind(name, TokenKind::Identifier)?;

        match state.kind_of(&name.literal) {
            Some(NameKind::Procedure) => Ok(()),
            Some(_) => Err(LplError::at(
                ErrorKind::NotAProcedure(name.literal.clone()),
                name.literal.clone(),
            )),
            None => Err(LplError::at(
                ErrorKind::UndefinedProcedure(name.literal.clone()),
                name.literal.clone(),
            )),
        }
    }

    fn import_statement(&self, statement: &Statement) -> Result<()> {
        expect_arity(statement, 2)?;
        let target = &statement[1];
        expect_kind(target, TokenKind::Text)?;

        if find_file(&self.root, &target.literal).is_some() {
            Ok(())
        } else {
            Err(LplError::at(
                ErrorKind::ImportNotFound(target.literal.clone()),
                target.literal.clone(),
            ))
        }
    }
}

/// Search `root` recursively for a file named exactly `name`
pub fn find_file(root: &Path, name: &str) -> Option<PathBuf> {
    let found = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .find(|entry| entry.file_type().is_file() && entry.file_name() == name)
        .map(|entry| entry.into_path());
    tracing::debug!(name, root = %root.display(), ?found, "import lookup");
    found
}

fn define_statement(statement: &mut Statement, state: &mut State, mutable: bool) -> Result<()> {
    expect_arity(statement, 4)?;
    expect_kind(&statement[1], TokenKind::Identifier)?;
    expect_kind(&statement[2], TokenKind::Comma)?;

    let value = resolve(&statement[3], state)?;
    state.define(&statement[1].literal, value.clone(), mutable)?;
    statement[3] = value;
    Ok(())
}

fn procedure_statement(statement: &Statement, state: &State) -> Result<()> {
    expect_arity(statement, 2)?;
    let name = &statement[1];
    expect_kind(name, TokenKind::Identifier)?;

    if state.is_defining() {
        return Err(LplError::at(ErrorKind::NestedProcedure, name.literal.clone()));
    }
    if state.kind_of(&name.literal).is_some() {
        return Err(LplError::at(
            ErrorKind::Redefinition(name.literal.clone()),
            name.literal.clone(),
        ));
    }
    Ok(())
}

fn arithmetic_statement(statement: &mut Statement, state: &State) -> Result<()> {
    expect_arity(statement, 4)?;
    expect_kind(&statement[2], TokenKind::Comma)?;

    for position in [1, 3] {
        let operand = resolve(&statement[position], state)?;
        expect_kind(&operand, TokenKind::Number)?;
        statement[position] = operand;
    }
    Ok(())
}

fn echo_statement(statement: &mut Statement, state: &State) -> Result<()> {
    if statement.last().is_some_and(|t| t.kind == TokenKind::Comma) {
        return Err(LplError::at(ErrorKind::TrailingComma, ","));
    }

    // Items sit at odd positions, commas at even ones
    for position in 1..statement.len() {
        if position % 2 == 0 {
            let token = &statement[position];
            if token.kind != TokenKind::Comma {
                return Err(LplError::at(ErrorKind::MissingComma, token.literal.clone()));
            }
        } else {
            let item = resolve(&statement[position], state)?;
            statement[position] = item;
        }
    }
    Ok(())
}

/// Resolve a value position: register sigil and names become value tokens
fn resolve(token: &Token, state: &State) -> Result<Token> {
    match token.kind {
        TokenKind::Number | TokenKind::Text => Ok(token.clone()),
        TokenKind::RegisterRef => state
            .register()
            .cloned()
            .ok_or_else(|| LplError::at(ErrorKind::EmptyRegister, token.literal.clone())),
        TokenKind::Identifier => state.lookup(&token.literal).cloned().ok_or_else(|| {
            LplError::at(ErrorKind::UndefinedName(token.literal.clone()), token.literal.clone())
        }),
        _ => Err(LplError::at(
            ErrorKind::ExpectedKind { expected: "value".to_string(), got: token.kind.to_string() },
            token.literal.clone(),
        )),
    }
}

fn expect_arity(statement: &Statement, expected: usize) -> Result<()> {
    if statement.len() == expected {
        Ok(())
    } else {
        Err(LplError::at(
            ErrorKind::WrongArity { expected, got: statement.len() },
            statement[0].literal.clone(),
        ))
    }
}

fn expect_kind(token: &Token, expected: TokenKind) -> Result<()> {
    if token.kind == expected {
        Ok(())
    } else {
        Err(LplError::at(
            ErrorKind::ExpectedKind { expected: expected.to_string(), got: token.kind.to_string() },
            token.literal.clone(),
        ))
    }
}
