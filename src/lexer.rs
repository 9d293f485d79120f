//! Lexer for LPL
//!
//! Converts one source line into a statement (a flat token sequence).

use crate::error::{ErrorKind, LplError, Result};
use crate::token::{lookup_keyword, lookup_symbol, looks_numeric, Statement, Token, TokenKind};

/// The lexer state
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for a single line. One trailing line terminator is dropped.
    pub fn new(line: &'a str) -> Self {
        let line = line
            .strip_suffix('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .unwrap_or(line);
        Self { chars: line.chars().peekable() }
    }

    /// Tokenize the whole line
    pub fn tokenize(&mut self) -> Result<Statement> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.chars.next() {
            match ch {
                // Comment runs to the end of the line
                '#' => break,
                ',' => tokens.push(Token::new(TokenKind::Comma, ",")),
                ' ' | '\t' => {}
                '"' => tokens.push(self.scan_text()?),
                c => {
                    if let Some(kind) = lookup_symbol(c).filter(|_| self.at_delimiter()) {
                        tokens.push(Token::new(kind, c.to_string()));
                    } else {
                        tokens.push(self.scan_word(c));
                    }
                }
            }
        }

        Ok(tokens)
    }

    /// True when the next character ends a word
    fn at_delimiter(&mut self) -> bool {
        matches!(self.chars.peek(), None | Some(' ') | Some('\t') | Some(',') | Some('#'))
    }

    /// Scan a text literal, the opening quote already consumed
    fn scan_text(&mut self) -> Result<Token> {
        let mut value = String::new();

        for c in self.chars.by_ref() {
            if c == '"' {
                return Ok(Token::text(value));
            }
            value.push(c);
        }

        Err(LplError::at(ErrorKind::UnterminatedText, format!("\"{}", value)))
    }

    /// Scan a word starting with `first` and classify it
    fn scan_word(&mut self, first: char) -> Token {
        let mut word = String::from(first);

        while !self.at_delimiter() {
            if let Some(c) = self.chars.next() {
                word.push(c);
            }
        }

        if let Some(keyword) = lookup_keyword(&word) {
            Token::new(keyword, word)
        } else if looks_numeric(&word) {
            Token::number(word)
        } else {
            Token::new(TokenKind::Identifier, word)
        }
    }
}

/// Tokenize a single line
pub fn tokenize(line: &str) -> Result<Statement> {
    Lexer::new(line).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    fn literals(source: &str) -> Vec<String> {
        tokenize(source).unwrap().into_iter().map(|t| t.literal).collect()
    }

    #[test]
    fn test_keywords() {
        let tokens = kinds("run import const var proc end echo read");
        assert_eq!(tokens, vec![
            TokenKind::Run,
            TokenKind::Import,
            TokenKind::DefineConstant,
            TokenKind::DefineVariable,
            TokenKind::ProcedureStart,
            TokenKind::ProcedureEnd,
            TokenKind::Echo,
            TokenKind::Read,
        ]);
    }

    #[test]
    fn test_operators() {
        let tokens = kinds("+ - * / ^ add sub mul div");
        assert_eq!(tokens, vec![
            TokenKind::Add,
            TokenKind::Subtract,
            TokenKind::Multiply,
            TokenKind::Divide,
            TokenKind::RegisterRef,
            TokenKind::Add,
            TokenKind::Subtract,
            TokenKind::Multiply,
            TokenKind::Divide,
        ]);
    }

    #[test]
    fn test_sigil_inside_word_is_not_split() {
        assert_eq!(kinds("-5"), vec![TokenKind::Number]);
        assert_eq!(kinds("a+b"), vec![TokenKind::Identifier]);
        assert_eq!(kinds("^,^"), vec![TokenKind::RegisterRef, TokenKind::Comma, TokenKind::RegisterRef]);
    }

    #[test]
    fn test_commas_without_spaces() {
        assert_eq!(literals("echo 1,2"), vec!["echo", "1", ",", "2"]);
        assert_eq!(kinds("echo 1,2"), vec![
            TokenKind::Echo,
            TokenKind::Number,
            TokenKind::Comma,
            TokenKind::Number,
        ]);
    }

    #[test]
    fn test_text_literal() {
        let tokens = tokenize(r#"echo "hello, world # not a comment",x"#).unwrap();
        assert_eq!(tokens, vec![
            Token::new(TokenKind::Echo, "echo"),
            Token::text("hello, world # not a comment"),
            Token::new(TokenKind::Comma, ","),
            Token::new(TokenKind::Identifier, "x"),
        ]);
    }

    #[test]
    fn test_text_has_no_escapes() {
        assert_eq!(literals(r#""a\nb""#), vec![r"a\nb"]);
    }

    #[test]
    fn test_unterminated_text() {
        let err = tokenize("echo \"oops").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnterminatedText);
    }

    #[test]
    fn test_comment_keeps_earlier_tokens() {
        assert_eq!(literals("echo 1 # trailing"), vec!["echo", "1"]);
        assert_eq!(literals("echo x# glued"), vec!["echo", "x"]);
        assert!(tokenize("# only a comment").unwrap().is_empty());
        assert!(tokenize("   \n").unwrap().is_empty());
    }

    #[test]
    fn test_line_terminator_stripped() {
        assert_eq!(literals("const PI, 3\n"), vec!["const", "PI", ",", "3"]);
        assert_eq!(literals("const PI, 3\r\n"), vec!["const", "PI", ",", "3"]);
    }

    #[test]
    fn test_numbers_and_identifiers() {
        let tokens = tokenize("3.14 -1 1-2. foo x1").unwrap();
        assert_eq!(tokens, vec![
            Token::number("3.14"),
            Token::number("-1"),
            Token::number("1-2."),
            Token::new(TokenKind::Identifier, "foo"),
            Token::new(TokenKind::Identifier, "x1"),
        ]);
    }

    #[test]
    fn test_consecutive_delimiters() {
        assert_eq!(kinds("  ,,  "), vec![TokenKind::Comma, TokenKind::Comma]);
    }
}
