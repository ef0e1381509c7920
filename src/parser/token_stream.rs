use multipeek::{multipeek, MultiPeek};

use crate::lexer::token::Token;
use crate::lexer::{Lexer, LexerError, LexerResult};

/// Endless pull adapter: after the input is exhausted the lexer keeps
/// answering with EOF, so peeking past the end never comes up empty.
struct Pull<'a>(Lexer<'a>);

impl<'a> Iterator for Pull<'a> {
    type Item = LexerResult;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.0.next_token())
    }
}

/// Lazily lexed tokens with arbitrary lookahead.
///
/// A lexical error is reported when the parser first peeks at or consumes the
/// offending token. The stream is cheap to rebuild from the same source, which
/// is how a caller rescans.
pub struct TokenStream<'a> {
    tokens: MultiPeek<Pull<'a>>,
}

impl<'a> TokenStream<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            tokens: multipeek(Pull(Lexer::new(input))),
        }
    }

    pub fn peek(&mut self) -> Result<&Token, LexerError> {
        self.peek_nth(0)
    }

    pub fn peek_nth(&mut self, n: usize) -> Result<&Token, LexerError> {
        match self.tokens.peek_nth(n) {
            Some(Ok(token)) => Ok(token),
            Some(Err(err)) => Err(err.clone()),
            None => unreachable!("token stream never ends"),
        }
    }

    pub fn advance(&mut self) -> Result<Token, LexerError> {
        match self.tokens.next() {
            Some(result) => result,
            None => unreachable!("token stream never ends"),
        }
    }
}
