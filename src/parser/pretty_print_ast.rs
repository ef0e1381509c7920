use std::fmt::Display;

use super::ast::*;
use crate::lexer::token::Token;
use colored::Colorize;

/// Renders a parsed program as an indented tree, one node per line.
pub struct PrettyPrint {
    indent: usize,
}

impl PrettyPrint {
    const INDENT: &'static str = "    ";

    pub fn new() -> Self {
        Self { indent: 0 }
    }

    fn line(&self, text: impl Display) -> String {
        format!("{}{}", Self::INDENT.repeat(self.indent), text)
    }

    fn nested(&mut self, f: impl FnOnce(&mut Self) -> String) -> String {
        self.indent += 1;
        let out = f(self);
        self.indent -= 1;
        out
    }

    fn stmts(&mut self, stmts: &[Stmt]) -> String {
        stmts
            .iter()
            .map(|stmt| self.visit_stmt(stmt))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn section(&mut self, label: &str, body: impl FnOnce(&mut Self) -> String) -> String {
        let header = self.line(label.yellow());
        let body = self.nested(body);
        join_lines([header, body])
    }
}

impl Default for PrettyPrint {
    fn default() -> Self {
        Self::new()
    }
}

fn join_lines<const N: usize>(parts: [String; N]) -> String {
    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn typed_name(field: &TypedName) -> String {
    format!("{} {}", field.ty.0.to_string().green(), field.name.0)
}

impl ASTRefVisitor<String> for PrettyPrint {
    fn visit_program(&mut self, program: &Program) -> String {
        program
            .0
            .iter()
            .map(|decl| match decl {
                Decl::Struct(decl) => self.visit_struct_decl(decl),
                Decl::Function(decl) => self.visit_function_decl(decl),
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn visit_struct_decl(&mut self, decl: &StructDecl) -> String {
        let header = self.line(format!("{} {}", "STRUCT".red(), decl.name.0.blue()));
        let members = self.nested(|this| {
            decl.members
                .iter()
                .map(|member| this.line(typed_name(member)))
                .collect::<Vec<_>>()
                .join("\n")
        });
        join_lines([header, members])
    }

    fn visit_function_decl(&mut self, decl: &FunctionDecl) -> String {
        let params = decl
            .params
            .iter()
            .map(typed_name)
            .collect::<Vec<_>>()
            .join(", ");
        let return_type = match &decl.return_type {
            Some(ty) => ty.0.to_string(),
            None => String::from("<none>"),
        };
        let header = self.line(format!(
            "{} {}({}) -> {}",
            "FUNCTION".red(),
            decl.name.0.blue(),
            params,
            return_type.green()
        ));
        let body = self.nested(|this| this.visit_block(&decl.body));
        join_lines([header, body])
    }

    fn visit_stmt(&mut self, stmt: &Stmt) -> String {
        match stmt {
            Stmt::Block(block) => self.visit_block(block),
            Stmt::Break(token) => self.visit_break(token),
            Stmt::Continue(token) => self.visit_continue(token),
            Stmt::Expression(expr) => self.visit_expression(expr),
            Stmt::For(for_stmt) => self.visit_for(for_stmt),
            Stmt::If(if_stmt) => self.visit_if(if_stmt),
            Stmt::Return(ret_value) => self.visit_return(ret_value),
            Stmt::Switch(switch) => self.visit_switch(switch),
            Stmt::VarDecl(decl) => self.visit_var_decl(decl),
            Stmt::While(while_stmt) => self.visit_while(while_stmt),
        }
    }

    fn visit_expr(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Assign(assign) => self.visit_assign(assign),
            Expr::Binary(binary) => self.visit_binary(binary),
            Expr::FunctionCall(call) => self.visit_function_call(call),
            Expr::InitList(list) => self.visit_init_list(list),
            Expr::Literal(literal) => self.visit_literal(literal),
            Expr::Member(member) => self.visit_member(member),
            Expr::Unary(unary) => self.visit_unary(unary),
            Expr::Var(name) => self.visit_var(name),
        }
    }
}

impl StmtRefVisitor<String> for PrettyPrint {
    fn visit_block(&mut self, block: &Block) -> String {
        self.section("BLOCK", |this| this.stmts(&block.0))
    }

    fn visit_break(&mut self, _token: &Token) -> String {
        self.line("BREAK".red())
    }

    fn visit_continue(&mut self, _token: &Token) -> String {
        self.line("CONTINUE".red())
    }

    fn visit_expression(&mut self, expr: &Expr) -> String {
        self.visit_expr(expr)
    }

    fn visit_for(&mut self, for_stmt: &ForStmt) -> String {
        let header = self.line("FOR".red());
        let parts = self.nested(|this| {
            let init = this.section("INIT", |this| match &for_stmt.initializer.0 {
                Some(ForStmtInitializer::VarDecl(decl)) => this.visit_var_decl(decl),
                Some(ForStmtInitializer::Expr(expr)) => this.visit_expr(expr),
                None => String::new(),
            });
            let cond = this.section("COND", |this| match &for_stmt.condition.0 {
                Some(expr) => this.visit_expr(expr),
                None => String::new(),
            });
            let step = this.section("STEP", |this| match &for_stmt.step.0 {
                Some(expr) => this.visit_expr(expr),
                None => String::new(),
            });
            let body = this.section("BODY", |this| this.visit_stmt(&for_stmt.body));
            join_lines([init, cond, step, body])
        });
        join_lines([header, parts])
    }

    fn visit_if(&mut self, if_stmt: &IfStmt) -> String {
        let header = self.line("IF".red());
        let parts = self.nested(|this| {
            let cond = this.section("COND", |this| this.visit_expr(&if_stmt.cond));
            let then = this.section("THEN", |this| this.visit_stmt(&if_stmt.then));
            let else_clause = match &if_stmt.else_clause {
                Some(else_clause) => this.section("ELSE", |this| this.visit_stmt(&else_clause.0)),
                None => String::new(),
            };
            join_lines([cond, then, else_clause])
        });
        join_lines([header, parts])
    }

    fn visit_return(&mut self, ret_value: &WithToken<Option<Expr>>) -> String {
        let header = self.line("RETURN".red());
        let value = match &ret_value.0 {
            Some(expr) => self.nested(|this| this.visit_expr(expr)),
            None => String::new(),
        };
        join_lines([header, value])
    }

    fn visit_switch(&mut self, switch: &SwitchStmt) -> String {
        let header = self.line("SWITCH".red());
        let parts = self.nested(|this| {
            let cond = this.section("COND", |this| this.visit_expr(&switch.cond));
            let labels = switch
                .labels
                .iter()
                .map(|label| match label {
                    SwitchLabel::Case(case) => {
                        let value = this.section("CASE", |this| this.visit_expr(&case.value));
                        let body = this.nested(|this| this.stmts(&case.body));
                        join_lines([value, body])
                    }
                    SwitchLabel::Default(body) => {
                        this.section("DEFAULT", |this| this.stmts(&body.0))
                    }
                })
                .collect::<Vec<_>>()
                .join("\n");
            join_lines([cond, labels])
        });
        join_lines([header, parts])
    }

    fn visit_var_decl(&mut self, decl: &VarDecl) -> String {
        let header = self.line(format!(
            "{} {} {}",
            "VAR".red(),
            decl.ty.0.to_string().green(),
            decl.name.0
        ));
        let init = match &decl.init {
            Some(expr) => self.nested(|this| this.visit_expr(expr)),
            None => String::new(),
        };
        join_lines([header, init])
    }

    fn visit_while(&mut self, while_stmt: &WhileStmt) -> String {
        let header = self.line("WHILE".red());
        let parts = self.nested(|this| {
            let cond = this.section("COND", |this| this.visit_expr(&while_stmt.cond));
            let body = this.section("BODY", |this| this.visit_stmt(&while_stmt.body));
            join_lines([cond, body])
        });
        join_lines([header, parts])
    }
}

impl ExprRefVisitor<String> for PrettyPrint {
    fn visit_assign(&mut self, expr: &Assign) -> String {
        let header = self.line("ASSIGN".cyan().bold());
        let operands = self.nested(|this| {
            let lhs = this.visit_expr(&expr.lhs);
            let rhs = this.visit_expr(&expr.rhs);
            join_lines([lhs, rhs])
        });
        join_lines([header, operands])
    }

    fn visit_binary(&mut self, expr: &Binary) -> String {
        let header = self.line(format!(
            "{}({})",
            "BINARY".cyan().bold(),
            expr.op.0.to_string().yellow()
        ));
        let operands = self.nested(|this| {
            let lhs = this.visit_expr(&expr.lhs);
            let rhs = this.visit_expr(&expr.rhs);
            join_lines([lhs, rhs])
        });
        join_lines([header, operands])
    }

    fn visit_function_call(&mut self, call: &FunctionCall) -> String {
        let header = self.line("CALL".cyan().bold());
        let parts = self.nested(|this| {
            let callee = this.visit_expr(&call.callee);
            let args = this.section("ARGS", |this| {
                call.args
                    .iter()
                    .map(|arg| this.visit_expr(arg))
                    .collect::<Vec<_>>()
                    .join("\n")
            });
            join_lines([callee, args])
        });
        join_lines([header, parts])
    }

    fn visit_init_list(&mut self, list: &InitList) -> String {
        let header = self.line("INIT_LIST".cyan().bold());
        let elements = self.nested(|this| {
            list.0
                .iter()
                .map(|element| this.visit_expr(element))
                .collect::<Vec<_>>()
                .join("\n")
        });
        join_lines([header, elements])
    }

    fn visit_literal(&mut self, literal: &WithToken<Literal>) -> String {
        let text = match &literal.0 {
            Literal::Integer(i) => format!("{}({})", "INT".green(), i.magenta()),
            Literal::Float(f) => format!("{}({})", "FLOAT".green(), f.magenta()),
            Literal::String(s) => format!("{}({:?})", "STRING".green(), s),
        };
        self.line(text)
    }

    fn visit_member(&mut self, member: &Member) -> String {
        let header = self.line(format!("{}(.{})", "MEMBER".cyan().bold(), member.field.0));
        let object = self.nested(|this| this.visit_expr(&member.object));
        join_lines([header, object])
    }

    fn visit_unary(&mut self, expr: &Unary) -> String {
        let kind = if expr.postfix { "POSTFIX" } else { "UNARY" };
        let header = self.line(format!(
            "{}({})",
            kind.cyan().bold(),
            expr.op.0.to_string().yellow()
        ));
        let operand = self.nested(|this| this.visit_expr(&expr.expr));
        join_lines([header, operand])
    }

    fn visit_var(&mut self, name: &WithToken<String>) -> String {
        self.line(format!("{}({})", "ID".green(), name.0))
    }
}
