use std::fmt::Display;
use std::ops::Deref;

use crate::lexer::token::Token;

pub use super::expr::*;
pub use super::stmt::*;

/// A syntax node paired with the token it was parsed from.
#[derive(Debug, Clone)]
pub struct WithToken<T>(pub T, pub Token);

impl<T> Deref for WithToken<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug)]
pub struct Program(pub Vec<Decl>);

#[derive(Debug)]
pub enum Decl {
    Struct(StructDecl),
    Function(FunctionDecl),
}

#[derive(Debug)]
pub struct StructDecl {
    pub name: WithToken<String>,
    pub members: Vec<TypedName>,
}

#[derive(Debug)]
pub struct FunctionDecl {
    /// `None` when the declaration omits its return type, as in `f() {}`.
    pub return_type: Option<WithToken<Type>>,
    pub name: WithToken<String>,
    pub params: Vec<TypedName>,
    pub body: Block,
}

/// A struct member or function parameter.
#[derive(Debug)]
pub struct TypedName {
    pub ty: WithToken<Type>,
    pub name: WithToken<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Int,
    Float,
    String,
    Auto,
    Void,
    Struct(String),
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::String => write!(f, "string"),
            Type::Auto => write!(f, "auto"),
            Type::Void => write!(f, "void"),
            Type::Struct(name) => write!(f, "{}", name),
        }
    }
}

pub trait ASTRefVisitor<R>: StmtRefVisitor<R> + ExprRefVisitor<R> {
    fn visit_program(&mut self, program: &Program) -> R;
    fn visit_struct_decl(&mut self, decl: &StructDecl) -> R;
    fn visit_function_decl(&mut self, decl: &FunctionDecl) -> R;
    fn visit_stmt(&mut self, stmt: &Stmt) -> R;
    fn visit_expr(&mut self, expr: &Expr) -> R;
}
