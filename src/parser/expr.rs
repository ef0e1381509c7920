use std::fmt::Display;

use crate::lexer::token::Token;

use super::ast::WithToken;

#[derive(Debug, Clone)]
pub enum Expr {
    Assign(Assign),
    Binary(Binary),
    FunctionCall(FunctionCall),
    InitList(InitList),
    Literal(WithToken<Literal>),
    Member(Member),
    Unary(Unary),
    Var(WithToken<String>),
}

impl Expr {
    /// Whether the expression may appear on the left of `=`.
    pub fn is_lvalue(&self) -> bool {
        matches!(self, Expr::Var(_) | Expr::Member(_))
    }
}

#[derive(Debug, Clone)]
pub struct Assign {
    pub eq_sign: Token,
    pub lhs: Box<Expr>,
    pub rhs: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct Binary {
    pub op: WithToken<BinaryOp>,
    pub lhs: Box<Expr>,
    pub rhs: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct Unary {
    pub op: WithToken<UnaryOp>,
    pub expr: Box<Expr>,
    pub postfix: bool,
}

#[derive(Debug, Clone)]
pub struct FunctionCall {
    pub callee: Box<Expr>,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone)]
pub struct Member {
    pub object: Box<Expr>,
    pub field: WithToken<String>,
}

/// `{ a, b, ... }`, possibly nested. The token is the opening brace.
#[derive(Debug, Clone)]
pub struct InitList(pub Vec<Expr>, pub Token);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnaryOp {
    Minus,
    Not,
    Increment,
    Decrement,
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let op = match self {
            UnaryOp::Minus => "-",
            UnaryOp::Not => "!",
            UnaryOp::Increment => "++",
            UnaryOp::Decrement => "--",
        };
        write!(f, "{}", op)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum BinaryOp {
    Plus,
    Minus,
    Mul,
    Div,
    Mod,

    Eq,
    NotEq,
    Greater,
    GreaterEq,
    Lesser,
    LesserEq,

    And,
    Or,
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let op = match self {
            BinaryOp::Plus => "+",
            BinaryOp::Minus => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",

            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEq => ">=",
            BinaryOp::Lesser => "<",
            BinaryOp::LesserEq => "<=",

            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        };
        write!(f, "{}", op)
    }
}

/// Literal values keep their source spelling; no range checking happens here.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(String),
    Float(String),
    String(String),
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Integer(i) => write!(f, "{}", i),
            Literal::Float(fl) => write!(f, "{}", fl),
            Literal::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

pub trait ExprRefVisitor<R> {
    fn visit_assign(&mut self, expr: &Assign) -> R;
    fn visit_binary(&mut self, expr: &Binary) -> R;
    fn visit_function_call(&mut self, call: &FunctionCall) -> R;
    fn visit_init_list(&mut self, list: &InitList) -> R;
    fn visit_literal(&mut self, literal: &WithToken<Literal>) -> R;
    fn visit_member(&mut self, member: &Member) -> R;
    fn visit_unary(&mut self, expr: &Unary) -> R;
    fn visit_var(&mut self, name: &WithToken<String>) -> R;
}
