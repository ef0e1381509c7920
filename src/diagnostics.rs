use colored::Colorize;
use thiserror::Error;

use crate::lexer::token::Position;
use crate::lexer::LexerError;
use crate::parser::ParseError;

/// The single failure a tokenize or parse call stops at.
#[derive(Error, Debug, Clone)]
pub enum Diagnostic {
    #[error(transparent)]
    Lexical(#[from] LexerError),

    #[error(transparent)]
    Syntax(#[from] ParseError),
}

impl Diagnostic {
    pub fn position(&self) -> Position {
        match self {
            Diagnostic::Lexical(err) => err.position,
            Diagnostic::Syntax(err) => err.token.position,
        }
    }

    /// Renders the message followed by the offending source line with a caret
    /// under the reported column.
    pub fn render(&self, source: &str) -> String {
        let position = self.position();
        let line = source.lines().nth(position.line - 1).unwrap_or("");
        let caret = format!("{}^", " ".repeat(position.column.saturating_sub(1)));
        format!(
            "{} {}: {}\n{:>5} | {}\n      | {}",
            "error".red().bold(),
            position,
            self,
            position.line,
            line,
            caret.red()
        )
    }
}
