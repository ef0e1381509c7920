use log::{debug, trace};

use diagnostics::Diagnostic;
use lexer::token::Token;
use lexer::{Lexer, LexerError};
use parser::ast::Program;
use parser::Parser;

pub mod diagnostics;
pub mod lexer;
pub mod parser;

/// What [`check`] returns for an accepted program.
pub const SUCCESS: &str = "success";

pub fn tokenize(input: &str) -> Result<Vec<Token>, LexerError> {
    let tokens = Lexer::new(input).tokenize()?;
    debug!("lexed {} tokens", tokens.len());
    Ok(tokens)
}

/// Serializes every token as `KIND,lexeme`, comma-joined and ending in `EOF`.
pub fn tokens_to_string(input: &str) -> Result<String, LexerError> {
    let tokens = tokenize(input)?;
    let serialized = tokens
        .iter()
        .map(|token| token.to_string())
        .collect::<Vec<_>>()
        .join(",");
    trace!("token stream: {serialized}");
    Ok(serialized)
}

pub fn parse(input: &str) -> Result<Program, Diagnostic> {
    let result = Parser::new(input).program();
    match &result {
        Ok(program) => debug!("accepted {} top-level declarations", program.0.len()),
        Err(err) => debug!("rejected at {}: {}", err.position(), err),
    }
    result
}

/// [`SUCCESS`] if `input` parses, otherwise the first diagnostic's message.
pub fn check(input: &str) -> String {
    match parse(input) {
        Ok(_) => SUCCESS.to_string(),
        Err(err) => err.to_string(),
    }
}
