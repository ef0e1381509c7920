pub mod scanner;
pub mod token;

#[cfg(test)]
mod test;

use lazy_static::lazy_static;
use scanner::Scanner;
use std::collections::HashMap;
use thiserror::Error;
use token::{Position, Span, Token, TokenKind};

macro_rules! hash_map {
    ( $( $key: expr => $value: expr ),* $(,)? ) => {{
        let mut m = HashMap::new();
        $(
            m.insert($key, $value);
        )*
        m
    }}
}

macro_rules! multi_char_tok {
    ( $self: ident, $orig: expr; $( $c: literal => $tt: expr ),+ $(,)? ) => {
        match $self.scanner.peek() {
            $(
                Some($c) => {
                    $self.scanner.advance();
                    Ok($self.make_token($tt))
                }
            )+
            _ => Ok($self.make_token($orig)),
        }
    };
}

lazy_static! {
    static ref KEYWORDS: HashMap<&'static str, TokenKind> = hash_map! {
        "auto"     => TokenKind::KAuto,
        "break"    => TokenKind::KBreak,
        "case"     => TokenKind::KCase,
        "continue" => TokenKind::KContinue,
        "default"  => TokenKind::KDefault,
        "else"     => TokenKind::KElse,
        "float"    => TokenKind::KFloat,
        "for"      => TokenKind::KFor,
        "if"       => TokenKind::KIf,
        "int"      => TokenKind::KInt,
        "return"   => TokenKind::KReturn,
        "string"   => TokenKind::KString,
        "struct"   => TokenKind::KStruct,
        "switch"   => TokenKind::KSwitch,
        "void"     => TokenKind::KVoid,
        "while"    => TokenKind::KWhile,
    };
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexerErrorType {
    #[error("Unclosed String: {0}")]
    UncloseString(String),

    #[error("Illegal Escape In String: {0}")]
    IllegalEscape(String),

    #[error("Error Token {0}")]
    ErrorToken(char),

    #[error("Unterminated Comment")]
    UnterminatedComment,
}

pub type LexerResult = Result<Token, LexerError>;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{error} (at {position})")]
pub struct LexerError {
    pub span: Span,
    pub position: Position,
    #[source]
    pub error: LexerErrorType,
}

/// Pulls tokens out of a [`Scanner`] one at a time.
///
/// As an iterator the lexer yields every token up to and including
/// [`TokenKind::EOF`], or stops right after the first error.
pub struct Lexer<'a> {
    scanner: Scanner<'a>,
    start: usize,
    start_pos: Position,
    eof: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let scanner = Scanner::new(input);
        let start_pos = scanner.position();
        Self {
            scanner,
            start: 0,
            start_pos,
            eof: false,
        }
    }

    fn begin_token(&mut self) {
        self.start = self.scanner.offset();
        self.start_pos = self.scanner.position();
    }

    fn current_span(&self) -> Span {
        Span(self.start, self.scanner.offset())
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        let span = self.current_span();
        self.make_token_with_lexeme(kind, self.scanner.slice(span))
    }

    fn make_token_with_lexeme(&self, kind: TokenKind, lexeme: &str) -> Token {
        Token {
            kind,
            lexeme: lexeme.to_string(),
            span: self.current_span(),
            position: self.start_pos,
        }
    }

    fn make_error(&self, error: LexerErrorType) -> LexerError {
        self.make_error_at(self.start_pos, error)
    }

    fn make_error_at(&self, position: Position, error: LexerErrorType) -> LexerError {
        LexerError {
            span: self.current_span(),
            position,
            error,
        }
    }

    fn skip_whitespace(&mut self) -> Result<(), LexerError> {
        loop {
            match self.scanner.peek() {
                Some(' ' | '\t' | '\r' | '\n' | '\x0c') => {
                    self.scanner.advance();
                }
                Some('/') => match self.scanner.peek_next() {
                    Some('/') => self.scanner.advance_while(|c| c != '\n'),
                    Some('*') => self.block_comment()?,
                    _ => break,
                },
                _ => break,
            };
        }
        Ok(())
    }

    /// Comments do not nest: the first `*/` closes.
    fn block_comment(&mut self) -> Result<(), LexerError> {
        self.begin_token();
        self.scanner.advance();
        self.scanner.advance();
        loop {
            match self.scanner.advance() {
                Some('*') if self.scanner.peek() == Some('/') => {
                    self.scanner.advance();
                    return Ok(());
                }
                Some(_) => {}
                None => return Err(self.make_error(LexerErrorType::UnterminatedComment)),
            }
        }
    }

    /// Integers starting with `0` are that single digit; floats take the
    /// longest match of `digits . digits? | . digits` with an optional
    /// exponent, or a digit run with a mandatory exponent.
    fn number(&mut self) -> LexerResult {
        let mut probe = self.scanner.clone();
        if scan_float(&mut probe) {
            self.scanner = probe;
            return Ok(self.make_token(TokenKind::FloatLit));
        }

        if let Some('0') = self.scanner.advance() {
            return Ok(self.make_token(TokenKind::IntLit));
        }
        self.scanner.advance_while(|c| c.is_ascii_digit());
        Ok(self.make_token(TokenKind::IntLit))
    }

    fn string(&mut self) -> LexerResult {
        let content_start = self.scanner.offset();
        loop {
            match self.scanner.peek() {
                None | Some('\n' | '\r') => {
                    let content = self.scanner.slice(Span(content_start, self.scanner.offset()));
                    return Err(self.make_error(LexerErrorType::UncloseString(content.to_string())));
                }
                Some('"') => {
                    let content_end = self.scanner.offset();
                    self.scanner.advance();
                    let content = self.scanner.slice(Span(content_start, content_end));
                    return Ok(self.make_token_with_lexeme(TokenKind::StringLit, content));
                }
                Some('\\') => {
                    let escape_pos = self.scanner.position();
                    self.scanner.advance();
                    match self.scanner.peek() {
                        None => {
                            let content =
                                self.scanner.slice(Span(content_start, self.scanner.offset()));
                            return Err(
                                self.make_error(LexerErrorType::UncloseString(content.to_string()))
                            );
                        }
                        Some('n' | 't' | '"' | '\\') => {
                            self.scanner.advance();
                        }
                        Some(c) => {
                            // A line break is left out of the reported text.
                            if !matches!(c, '\n' | '\r') {
                                self.scanner.advance();
                            }
                            let content =
                                self.scanner.slice(Span(content_start, self.scanner.offset()));
                            return Err(self.make_error_at(
                                escape_pos,
                                LexerErrorType::IllegalEscape(content.to_string()),
                            ));
                        }
                    }
                }
                Some(_) => {
                    self.scanner.advance();
                }
            };
        }
    }

    fn identifier(&mut self) -> LexerResult {
        self.scanner
            .advance_while(|c| c == '_' || c.is_ascii_alphanumeric());
        let lexeme = self.scanner.slice(self.current_span());

        if let Some(kind) = KEYWORDS.get(lexeme) {
            Ok(self.make_token(*kind))
        } else {
            Ok(self.make_token(TokenKind::Identifier))
        }
    }
}

fn scan_float(scanner: &mut Scanner) -> bool {
    let has_int_part = scanner.peek().is_some_and(|c| c.is_ascii_digit());
    scanner.advance_while(|c| c.is_ascii_digit());

    let mut is_float = false;
    if scanner.peek() == Some('.')
        && (has_int_part || scanner.peek_next().is_some_and(|c| c.is_ascii_digit()))
    {
        scanner.advance();
        scanner.advance_while(|c| c.is_ascii_digit());
        is_float = true;
    }

    if let Some('e' | 'E') = scanner.peek() {
        let digits_at = match scanner.peek_next() {
            Some('+' | '-') => 2,
            _ => 1,
        };
        if scanner.peek_nth(digits_at).is_some_and(|c| c.is_ascii_digit()) {
            for _ in 0..digits_at {
                scanner.advance();
            }
            scanner.advance_while(|c| c.is_ascii_digit());
            is_float = true;
        }
    }

    is_float
}

impl<'a> Lexer<'a> {
    /// Lexes the whole input. The last token is always [`TokenKind::EOF`].
    pub fn tokenize(self) -> Result<Vec<Token>, LexerError> {
        self.collect()
    }

    /// Produces the next token. Once the input is exhausted every further
    /// call returns another EOF token.
    pub fn next_token(&mut self) -> LexerResult {
        self.skip_whitespace()?;
        self.begin_token();

        let Some(c) = self.scanner.peek() else {
            self.eof = true;
            return Ok(self.make_token(TokenKind::EOF));
        };

        if c.is_ascii_digit()
            || (c == '.' && self.scanner.peek_next().is_some_and(|c| c.is_ascii_digit()))
        {
            return self.number();
        }

        self.scanner.advance();
        match c {
            '(' => Ok(self.make_token(TokenKind::LParen)),
            ')' => Ok(self.make_token(TokenKind::RParen)),
            '{' => Ok(self.make_token(TokenKind::LBrace)),
            '}' => Ok(self.make_token(TokenKind::RBrace)),
            ';' => Ok(self.make_token(TokenKind::Semicolon)),
            ',' => Ok(self.make_token(TokenKind::Comma)),
            ':' => Ok(self.make_token(TokenKind::Colon)),
            '.' => Ok(self.make_token(TokenKind::Dot)),
            '*' => Ok(self.make_token(TokenKind::Mul)),
            '/' => Ok(self.make_token(TokenKind::Div)),
            '%' => Ok(self.make_token(TokenKind::Mod)),

            '+' => multi_char_tok!(self, TokenKind::Add; '+' => TokenKind::Inc),
            '-' => multi_char_tok!(self, TokenKind::Sub; '-' => TokenKind::Dec),
            '=' => multi_char_tok!(self, TokenKind::Assign; '=' => TokenKind::Equal),
            '!' => multi_char_tok!(self, TokenKind::Not; '=' => TokenKind::NotEqual),
            '<' => multi_char_tok!(self, TokenKind::Lt; '=' => TokenKind::Le),
            '>' => multi_char_tok!(self, TokenKind::Gt; '=' => TokenKind::Ge),

            '&' if self.scanner.advance_if(|c| c == '&') => Ok(self.make_token(TokenKind::And)),
            '|' if self.scanner.advance_if(|c| c == '|') => Ok(self.make_token(TokenKind::Or)),

            '"' => self.string(),

            c if c == '_' || c.is_ascii_alphabetic() => self.identifier(),
            _ => Err(self.make_error(LexerErrorType::ErrorToken(c))),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = LexerResult;

    fn next(&mut self) -> Option<Self::Item> {
        if self.eof {
            return None;
        }
        let result = self.next_token();
        if result.is_err() {
            self.eof = true;
        }
        Some(result)
    }
}
