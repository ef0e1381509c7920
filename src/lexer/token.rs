use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    KBreak,
    KCase,
    KContinue,
    KDefault,
    KElse,
    KFor,
    KIf,
    KReturn,
    KSwitch,
    KWhile,
    KInt,
    KFloat,
    KString,
    KVoid,
    KStruct,
    KAuto,

    Identifier,
    IntLit,
    FloatLit,
    StringLit,

    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Equal,
    NotEqual,
    Lt,
    Gt,
    Le,
    Ge,
    And,
    Or,
    Not,
    Inc,
    Dec,
    Assign,
    Dot,

    LParen,
    RParen,
    LBrace,
    RBrace,
    Semicolon,
    Comma,
    Colon,

    EOF,
}

/// Names used by the `KIND,lexeme` token serialization.
impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::KBreak => "BREAK",
            TokenKind::KCase => "CASE",
            TokenKind::KContinue => "CONTINUE",
            TokenKind::KDefault => "DEFAULT",
            TokenKind::KElse => "ELSE",
            TokenKind::KFor => "FOR",
            TokenKind::KIf => "IF",
            TokenKind::KReturn => "RETURN",
            TokenKind::KSwitch => "SWITCH",
            TokenKind::KWhile => "WHILE",
            TokenKind::KInt => "INT",
            TokenKind::KFloat => "FLOAT",
            TokenKind::KString => "STRING",
            TokenKind::KVoid => "VOID",
            TokenKind::KStruct => "STRUCT",
            TokenKind::KAuto => "AUTO",

            TokenKind::Identifier => "ID",
            TokenKind::IntLit => "INT_LIT",
            TokenKind::FloatLit => "FLOAT_LIT",
            TokenKind::StringLit => "STRING_LIT",

            TokenKind::Add => "ADD",
            TokenKind::Sub => "SUB",
            TokenKind::Mul => "MUL",
            TokenKind::Div => "DIV",
            TokenKind::Mod => "MOD",
            TokenKind::Equal => "EQUAL",
            TokenKind::NotEqual => "NOTEQUAL",
            TokenKind::Lt => "LT",
            TokenKind::Gt => "GT",
            TokenKind::Le => "LE",
            TokenKind::Ge => "GE",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Not => "NOT",
            TokenKind::Inc => "INC",
            TokenKind::Dec => "DEC",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Dot => "DOT",

            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Semicolon => "SEMI",
            TokenKind::Comma => "COMMA",
            TokenKind::Colon => "COLON",

            TokenKind::EOF => "EOF",
        };
        write!(f, "{}", name)
    }
}

/// Byte offsets into the source, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span(pub usize, pub usize);

/// 1-based line and column (columns count characters, not bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text of the token. String literals drop their quotes and keep
    /// escape sequences unprocessed.
    pub lexeme: String,
    pub span: Span,
    pub position: Position,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::EOF => write!(f, "{}", self.kind),
            _ => write!(f, "{},{}", self.kind, self.lexeme),
        }
    }
}
