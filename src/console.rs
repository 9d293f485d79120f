//! Console I/O for LPL
//!
//! `echo` and `read` go through a [`Console`], so the interpreter can run
//! against the terminal or against in-memory buffers.

use std::collections::VecDeque;
use std::io::{BufRead, IsTerminal, Write};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::error::{ErrorKind, LplError, Result};

pub trait Console {
    /// Write `text` followed by a newline
    fn write_line(&mut self, text: &str) -> Result<()>;

    /// Show `prompt` and block for one line of input, without its terminator
    fn read_line(&mut self, prompt: &str) -> Result<String>;
}

/// Standard output for `echo`, a line editor on standard input for `read`
#[derive(Default)]
pub struct StdConsole {
    editor: Option<DefaultEditor>,
}

impl StdConsole {
    pub fn new() -> Self {
        Self::default()
    }

    fn editor(&mut self) -> Result<&mut DefaultEditor> {
        let editor = match self.editor.take() {
            Some(editor) => editor,
            None => DefaultEditor::new()
                .map_err(|e| LplError::new(ErrorKind::Input(e.to_string())))?,
        };
        Ok(self.editor.insert(editor))
    }
}

impl Console for StdConsole {
    fn write_line(&mut self, text: &str) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", text)?;
        stdout.flush()?;
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        // The line editor does not echo the prompt when input is piped
        if !std::io::stdin().is_terminal() {
            return read_prompted(prompt, &mut std::io::stdin().lock(), &mut std::io::stdout().lock());
        }

        match self.editor()?.readline(prompt) {
            Ok(line) => Ok(line),
            Err(ReadlineError::Eof) => {
                Err(LplError::new(ErrorKind::Input("unexpected end of input".into())))
            }
            Err(ReadlineError::Interrupted) => {
                Err(LplError::new(ErrorKind::Input("interrupted".into())))
            }
            Err(err) => Err(LplError::new(ErrorKind::Input(err.to_string()))),
        }
    }
}

/// Write `prompt` to `output`, then read one line from `input`
pub fn read_prompted<R: BufRead, W: Write>(prompt: &str, input: &mut R, output: &mut W) -> Result<String> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(LplError::new(ErrorKind::Input("unexpected end of input".into())));
    }
    let trimmed = line.strip_suffix('\n').map(|l| l.strip_suffix('\r').unwrap_or(l));
    Ok(trimmed.unwrap_or(&line).to_string())
}

/// In-memory console: scripted input lines, captured output
#[derive(Debug, Default, Clone)]
pub struct BufferConsole {
    input: VecDeque<String>,
    output: String,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            output: String::new(),
        }
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn into_output(self) -> String {
        self.output
    }
}

impl Console for BufferConsole {
    fn write_line(&mut self, text: &str) -> Result<()> {
        self.output.push_str(text);
        self.output.push('\n');
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.output.push_str(prompt);
        self.input
            .pop_front()
            .ok_or_else(|| LplError::new(ErrorKind::Input("unexpected end of input".into())))
    }
}
