use crate::lexer::token::Token;

use super::ast::{Type, WithToken};
use super::expr::Expr;

#[derive(Debug)]
pub struct Block(pub Vec<Stmt>);

#[derive(Debug)]
pub struct VarDecl {
    pub ty: WithToken<Type>,
    pub name: WithToken<String>,
    pub init: Option<Expr>,
}

#[derive(Debug)]
pub struct IfStmt {
    pub cond: WithToken<Expr>,
    pub then: Box<Stmt>,
    pub else_clause: Option<Box<WithToken<Stmt>>>,
}

#[derive(Debug)]
pub struct WhileStmt {
    pub cond: WithToken<Expr>,
    pub body: Box<Stmt>,
}

#[derive(Debug)]
pub enum ForStmtInitializer {
    VarDecl(VarDecl),
    Expr(Expr),
}

#[derive(Debug)]
pub struct ForStmt {
    pub initializer: WithToken<Option<ForStmtInitializer>>,
    pub condition: WithToken<Option<Expr>>,
    pub step: WithToken<Option<Expr>>,
    pub body: Box<Stmt>,
}

/// `case` label with the statements up to the next label. The token is the
/// `case` keyword.
#[derive(Debug)]
pub struct Case {
    pub value: Expr,
    pub body: Vec<Stmt>,
}

#[derive(Debug)]
pub enum SwitchLabel {
    Case(WithToken<Case>),
    Default(WithToken<Vec<Stmt>>),
}

#[derive(Debug)]
pub struct SwitchStmt {
    pub cond: WithToken<Expr>,
    pub labels: Vec<SwitchLabel>,
}

#[derive(Debug)]
pub enum Stmt {
    Block(Block),
    Break(Token),
    Continue(Token),
    Expression(Expr),
    For(ForStmt),
    If(IfStmt),
    Return(WithToken<Option<Expr>>),
    Switch(SwitchStmt),
    VarDecl(VarDecl),
    While(WhileStmt),
}

pub trait StmtRefVisitor<R> {
    fn visit_block(&mut self, block: &Block) -> R;
    fn visit_break(&mut self, token: &Token) -> R;
    fn visit_continue(&mut self, token: &Token) -> R;
    fn visit_expression(&mut self, expr: &Expr) -> R;
    fn visit_for(&mut self, for_stmt: &ForStmt) -> R;
    fn visit_if(&mut self, if_stmt: &IfStmt) -> R;
    fn visit_return(&mut self, ret_value: &WithToken<Option<Expr>>) -> R;
    fn visit_switch(&mut self, switch: &SwitchStmt) -> R;
    fn visit_var_decl(&mut self, decl: &VarDecl) -> R;
    fn visit_while(&mut self, while_stmt: &WhileStmt) -> R;
}
