//! LPL - a line-oriented scripting language
//!
//! Every line is one flat instruction: arithmetic into a register, console
//! output and input, named constants and variables, procedures and file
//! imports.

pub mod token;
pub mod lexer;
pub mod parser;
pub mod state;
pub mod console;
pub mod interpreter;
pub mod error;

pub use console::{BufferConsole, Console, StdConsole};
pub use error::{ErrorKind, LplError, Result};
pub use interpreter::{Interpreter, Options};
pub use lexer::{tokenize, Lexer};
pub use parser::Parser;
pub use state::State;
pub use token::{Statement, Token, TokenKind};

/// Convenience function to run LPL code and collect what it echoes
pub fn run(source: &str) -> Result<String> {
    let mut interpreter = Interpreter::with_console(BufferConsole::new());
    interpreter.run_source(source)?;
    Ok(interpreter.into_console().into_output())
}

/// Version of the LPL language
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
