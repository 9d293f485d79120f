//! Global interpreter state for LPL
//!
//! Holds the register, the symbol table and the procedure registry. One
//! `State` lives for the whole run and is shared by every imported file and
//! every procedure invocation.

use std::collections::HashMap;

use crate::error::{ErrorKind, LplError, Result};
use crate::token::{Statement, Token};

/// Maximum nesting of `run` and `import`
pub const MAX_CALL_DEPTH: usize = 128;

/// A binding in the symbol table
#[derive(Debug, Clone)]
struct Binding {
    value: Token,
    mutable: bool, // true for 'var', false for 'const'
}

/// Stable handle into the procedure arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcId(usize);

/// What a name is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Constant,
    Variable,
    Procedure,
}

#[derive(Debug, Default)]
pub struct State {
    register: Option<Token>,
    symbols: HashMap<String, Binding>,
    procedures: HashMap<String, ProcId>,
    bodies: Vec<Vec<Statement>>,
    /// Procedure currently being defined
    defining: Option<ProcId>,
    depth: usize,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Register ====================

    /// Current register value, `None` until something is stored
    pub fn register(&self) -> Option<&Token> {
        self.register.as_ref()
    }

    pub fn set_register(&mut self, value: Token) {
        self.register = Some(value);
    }

    // ==================== Symbols ====================

    /// What `name` is bound to, if anything
    pub fn kind_of(&self, name: &str) -> Option<NameKind> {
        if let Some(binding) = self.symbols.get(name) {
            Some(if binding.mutable { NameKind::Variable } else { NameKind::Constant })
        } else if self.procedures.contains_key(name) {
            Some(NameKind::Procedure)
        } else {
            None
        }
    }

    fn ensure_unbound(&self, name: &str) -> Result<()> {
        match self.kind_of(name) {
            Some(_) => Err(LplError::at(ErrorKind::Redefinition(name.to_string()), name)),
            None => Ok(()),
        }
    }

    /// Define a symbol. Names are write-once across symbols and procedures.
    pub fn define(&mut self, name: &str, value: Token, mutable: bool) -> Result<()> {
        self.ensure_unbound(name)?;
        tracing::debug!(name, value = %value.literal, mutable, "defined symbol");
        self.symbols.insert(name.to_string(), Binding { value, mutable });
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&Token> {
        self.symbols.get(name).map(|binding| &binding.value)
    }

    // ==================== Procedures ====================

    pub fn is_defining(&self) -> bool {
        self.defining.is_some()
    }

    /// Open a new procedure body and enter definition mode
    pub fn begin_procedure(&mut self, name: &str) -> Result<ProcId> {
        if self.is_defining() {
            return Err(LplError::at(ErrorKind::NestedProcedure, name));
        }
        self.ensure_unbound(name)?;

        let id = ProcId(self.bodies.len());
        self.bodies.push(Vec::new());
        self.procedures.insert(name.to_string(), id);
        self.defining = Some(id);
        tracing::debug!(name, slot = id.0, "procedure definition opened");
        Ok(id)
    }

    /// Capture a statement into the procedure being defined.
    ///
    /// Returns `false` when no definition is open.
    pub fn append_to_procedure(&mut self, statement: Statement) -> bool {
        match self.defining {
            Some(ProcId(slot)) => {
                self.bodies[slot].push(statement);
                true
            }
            None => false,
        }
    }

    /// Leave definition mode. A no-op while idle.
    pub fn end_procedure(&mut self) {
        if let Some(ProcId(slot)) = self.defining.take() {
            tracing::debug!(slot, statements = self.bodies[slot].len(), "procedure definition closed");
        }
    }

    pub fn procedure(&self, name: &str) -> Option<ProcId> {
        self.procedures.get(name).copied()
    }

    pub fn body(&self, id: ProcId) -> &[Statement] {
        &self.bodies[id.0]
    }

    // ==================== Call depth ====================

    pub fn enter(&mut self) -> Result<()> {
        if self.depth >= MAX_CALL_DEPTH {
            return Err(LplError::new(ErrorKind::StackOverflow));
        }
        self.depth += 1;
        Ok(())
    }

    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
