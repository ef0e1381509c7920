pub mod ast;
mod expr;
pub mod pretty_print_ast;
mod stmt;
pub mod token_stream;


use crate::diagnostics::Diagnostic;
use crate::lexer::token::{Token, TokenKind};
use ast::*;
use thiserror::Error;
use token_stream::TokenStream;

// <program>        ::= ( <struct-decl> | <function-decl> )*
// <struct-decl>    ::= "struct" <identifier> "{" ( <type> <identifier> ";" )* "}" ";"
// <function-decl>  ::= ( <type> | "void" )? <identifier> "(" <params>? ")" <block>
// <params>         ::= <type> <identifier> ( "," <type> <identifier> )*
// <type>           ::= "int" | "float" | "string" | "auto" | <identifier>
// <block>          ::= "{" <statement>* "}"
// <statement>      ::= <block> | <var-decl> ";" | <if> | <while> | <for> | <switch>
//                    | "break" ";" | "continue" ";" | "return" <expr>? ";" | <expr> ";"
// <var-decl>       ::= <type> <identifier> ( "=" <expr> )?
// <if>             ::= "if" "(" <expr> ")" <statement> ( "else" <statement> )?
// <while>          ::= "while" "(" <expr> ")" <statement>
// <for>            ::= "for" "(" ( <var-decl> | <expr> )? ";" <expr>? ";" <expr>? ")" <statement>
// <switch>         ::= "switch" "(" <expr> ")" "{" ( <case> | <default> )* "}"
// <case>           ::= "case" <expr> ":" <statement>*
// <default>        ::= "default" ":" <statement>*
// <expr>           ::= <or> ( "=" <expr> )?
// <or>             ::= <and> ( "||" <and> )*
// <and>            ::= <equality> ( "&&" <equality> )*
// <equality>       ::= <relational> ( ( "==" | "!=" ) <relational> )*
// <relational>     ::= <additive> ( ( "<" | ">" | "<=" | ">=" ) <additive> )*
// <additive>       ::= <multiplicative> ( ( "+" | "-" ) <multiplicative> )*
// <multiplicative> ::= <unary> ( ( "*" | "/" | "%" ) <unary> )*
// <unary>          ::= ( "!" | "-" | "++" | "--" ) <unary> | <postfix>
// <postfix>        ::= <primary> ( "++" | "--" | "." <identifier> | "(" <args>? ")" )*
// <primary>        ::= <literal> | <identifier> | "(" <expr> ")" | "{" <args>? "}"

macro_rules! parse_binary_expr {
    ( $self: ident, $ops: pat, $nextp: ident ) => {{
        let mut lhs = $self.$nextp()?;
        while let $ops = $self.peek_kind()? {
            let op_token = $self.advance()?;
            let op = binary_tt_to_op(op_token.kind);
            let rhs = Box::new($self.$nextp()?);
            lhs = Expr::Binary(Binary {
                op: WithToken(op, op_token),
                lhs: Box::new(lhs),
                rhs,
            })
        }
        Ok(lhs)
    }};
}

#[derive(Error, Debug, Clone)]
#[error("syntax error at {}: {error}", .token.position)]
pub struct ParseError {
    pub token: Token,
    #[source]
    pub error: ParseErrorType,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseErrorType {
    #[error("expected `{exp}`, got {got:?}")]
    Expected { exp: &'static str, got: String },

    #[error("left-hand side of assignment is not assignable")]
    InvalidAssignmentTarget,

    #[error("nesting exceeds {} levels", MAX_NESTING_DEPTH)]
    NestingTooDeep,
}

/// Bound on nested statements and expressions, kept well under what the
/// recursive descent can hold on an 8 MiB stack.
pub const MAX_NESTING_DEPTH: usize = 100;

pub type ParseResult<T> = Result<T, Diagnostic>;

pub struct Parser<'a> {
    tokens: TokenStream<'a>,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            tokens: TokenStream::new(input),
            depth: 0,
        }
    }

    fn peek_kind(&mut self) -> ParseResult<TokenKind> {
        Ok(self.tokens.peek()?.kind)
    }

    fn peek_next_kind(&mut self) -> ParseResult<TokenKind> {
        Ok(self.tokens.peek_nth(1)?.kind)
    }

    fn advance(&mut self) -> ParseResult<Token> {
        Ok(self.tokens.advance()?)
    }

    fn match_(&mut self, kind: TokenKind) -> ParseResult<bool> {
        if self.peek_kind()? == kind {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn consume(&mut self, kind: TokenKind, exp: &'static str) -> ParseResult<Token> {
        if self.peek_kind()? == kind {
            self.advance()
        } else {
            Err(self.error_expected(exp))
        }
    }

    fn consume_identifier(&mut self) -> ParseResult<WithToken<String>> {
        let token = self.consume(TokenKind::Identifier, "<identifier>")?;
        Ok(WithToken(token.lexeme.clone(), token))
    }

    fn error_expected(&mut self, exp: &'static str) -> Diagnostic {
        match self.tokens.peek() {
            Ok(token) => {
                let got = match token.kind {
                    TokenKind::EOF => String::from("<eof>"),
                    _ => token.lexeme.clone(),
                };
                ParseError {
                    token: token.clone(),
                    error: ParseErrorType::Expected { exp, got },
                }
                .into()
            }
            Err(err) => err.into(),
        }
    }

    fn error_here(&mut self, error: ParseErrorType) -> Diagnostic {
        match self.tokens.peek() {
            Ok(token) => ParseError {
                token: token.clone(),
                error,
            }
            .into(),
            Err(err) => err.into(),
        }
    }

    /// Runs `parse` one nesting level deeper, failing once the depth limit is hit.
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error_here(ParseErrorType::NestingTooDeep));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// A type keyword, or two identifiers in a row (`Point p`), starts a
    /// variable declaration.
    fn check_declaration(&mut self) -> ParseResult<bool> {
        Ok(match self.peek_kind()? {
            TokenKind::KInt | TokenKind::KFloat | TokenKind::KString | TokenKind::KAuto => true,
            TokenKind::Identifier => self.peek_next_kind()? == TokenKind::Identifier,
            _ => false,
        })
    }

    fn type_spec(&mut self, allow_void: bool) -> ParseResult<WithToken<Type>> {
        let ty = match self.peek_kind()? {
            TokenKind::KInt => Type::Int,
            TokenKind::KFloat => Type::Float,
            TokenKind::KString => Type::String,
            TokenKind::KAuto => Type::Auto,
            TokenKind::KVoid if allow_void => Type::Void,
            TokenKind::Identifier => Type::Struct(self.tokens.peek()?.lexeme.clone()),
            _ => return Err(self.error_expected("<type>")),
        };
        let token = self.advance()?;
        Ok(WithToken(ty, token))
    }

    fn typed_name(&mut self) -> ParseResult<TypedName> {
        let ty = self.type_spec(false)?;
        let name = self.consume_identifier()?;
        Ok(TypedName { ty, name })
    }
}

impl<'a> Parser<'a> {
    pub fn program(&mut self) -> ParseResult<Program> {
        let mut decls = Vec::new();
        while self.peek_kind()? != TokenKind::EOF {
            decls.push(self.declaration()?);
        }
        Ok(Program(decls))
    }

    fn declaration(&mut self) -> ParseResult<Decl> {
        match self.peek_kind()? {
            TokenKind::KStruct => self.struct_decl().map(Decl::Struct),
            TokenKind::Identifier if self.peek_next_kind()? == TokenKind::LParen => {
                self.function_decl(None).map(Decl::Function)
            }
            _ => {
                let return_type = self.type_spec(true)?;
                self.function_decl(Some(return_type)).map(Decl::Function)
            }
        }
    }

    fn struct_decl(&mut self) -> ParseResult<StructDecl> {
        self.consume(TokenKind::KStruct, "struct")?;
        let name = self.consume_identifier()?;
        self.consume(TokenKind::LBrace, "{")?;

        let mut members = Vec::new();
        while !self.match_(TokenKind::RBrace)? {
            members.push(self.typed_name()?);
            self.consume(TokenKind::Semicolon, ";")?;
        }
        self.consume(TokenKind::Semicolon, ";")?;

        Ok(StructDecl { name, members })
    }

    fn function_decl(
        &mut self,
        return_type: Option<WithToken<Type>>,
    ) -> ParseResult<FunctionDecl> {
        let name = self.consume_identifier()?;

        self.consume(TokenKind::LParen, "(")?;
        let mut params = Vec::new();
        if self.peek_kind()? != TokenKind::RParen {
            loop {
                params.push(self.typed_name()?);
                if !self.match_(TokenKind::Comma)? {
                    break;
                }
            }
        }
        self.consume(TokenKind::RParen, ")")?;

        let body = self.block()?;

        Ok(FunctionDecl {
            return_type,
            name,
            params,
            body,
        })
    }
}

impl<'a> Parser<'a> {
    // Methods for parsing expressions

    fn optional_expression(
        &mut self,
        followed_by: TokenKind,
        followed_by_str: &'static str,
    ) -> ParseResult<(Option<Expr>, Token)> {
        if self.peek_kind()? == followed_by {
            Ok((None, self.advance()?))
        } else {
            let expr = self.expression()?;
            let token = self.consume(followed_by, followed_by_str)?;
            Ok((Some(expr), token))
        }
    }

    /// Comma-separated expressions up to and including `end`. The opening
    /// delimiter has already been consumed.
    fn expression_list(
        &mut self,
        end: TokenKind,
        end_str: &'static str,
    ) -> ParseResult<Vec<Expr>> {
        let mut exprs = Vec::new();
        if self.match_(end)? {
            return Ok(exprs);
        }
        loop {
            exprs.push(self.expression()?);
            if !self.match_(TokenKind::Comma)? {
                break;
            }
        }
        self.consume(end, end_str)?;
        Ok(exprs)
    }

    fn expression(&mut self) -> ParseResult<Expr> {
        self.nested(Self::assignment)
    }

    fn assignment(&mut self) -> ParseResult<Expr> {
        let lhs = self.logical_or()?;
        if self.peek_kind()? != TokenKind::Assign {
            return Ok(lhs);
        }

        let eq_sign = self.advance()?;
        if !lhs.is_lvalue() {
            return Err(ParseError {
                token: eq_sign,
                error: ParseErrorType::InvalidAssignmentTarget,
            }
            .into());
        }
        let rhs = self.nested(Self::assignment)?;

        Ok(Expr::Assign(Assign {
            eq_sign,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }))
    }

    fn logical_or(&mut self) -> ParseResult<Expr> {
        parse_binary_expr!(self, TokenKind::Or, logical_and)
    }

    fn logical_and(&mut self) -> ParseResult<Expr> {
        parse_binary_expr!(self, TokenKind::And, equality)
    }

    fn equality(&mut self) -> ParseResult<Expr> {
        parse_binary_expr!(self, TokenKind::Equal | TokenKind::NotEqual, relational)
    }

    fn relational(&mut self) -> ParseResult<Expr> {
        parse_binary_expr!(
            self,
            TokenKind::Lt | TokenKind::Gt | TokenKind::Le | TokenKind::Ge,
            additive
        )
    }

    fn additive(&mut self) -> ParseResult<Expr> {
        parse_binary_expr!(self, TokenKind::Add | TokenKind::Sub, multiplicative)
    }

    fn multiplicative(&mut self) -> ParseResult<Expr> {
        parse_binary_expr!(
            self,
            TokenKind::Mul | TokenKind::Div | TokenKind::Mod,
            unary
        )
    }

    fn unary(&mut self) -> ParseResult<Expr> {
        match self.peek_kind()? {
            TokenKind::Not | TokenKind::Sub | TokenKind::Inc | TokenKind::Dec => {
                let op_token = self.advance()?;
                let op = unary_tt_to_op(op_token.kind);
                let expr = self.nested(Self::unary)?;
                Ok(Expr::Unary(Unary {
                    op: WithToken(op, op_token),
                    expr: Box::new(expr),
                    postfix: false,
                }))
            }
            _ => self.postfix(),
        }
    }

    fn postfix(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.primary()?;
        loop {
            lhs = match self.peek_kind()? {
                TokenKind::Inc | TokenKind::Dec => {
                    let op_token = self.advance()?;
                    let op = unary_tt_to_op(op_token.kind);
                    Expr::Unary(Unary {
                        op: WithToken(op, op_token),
                        expr: Box::new(lhs),
                        postfix: true,
                    })
                }
                TokenKind::Dot => {
                    self.advance()?;
                    let field = self.consume_identifier()?;
                    Expr::Member(Member {
                        object: Box::new(lhs),
                        field,
                    })
                }
                TokenKind::LParen => {
                    self.advance()?;
                    let args = self.expression_list(TokenKind::RParen, ")")?;
                    Expr::FunctionCall(FunctionCall {
                        callee: Box::new(lhs),
                        args,
                    })
                }
                _ => break,
            };
        }
        Ok(lhs)
    }

    fn primary(&mut self) -> ParseResult<Expr> {
        match self.peek_kind()? {
            TokenKind::IntLit | TokenKind::FloatLit | TokenKind::StringLit => {
                let token = self.advance()?;
                let value = match token.kind {
                    TokenKind::IntLit => Literal::Integer(token.lexeme.clone()),
                    TokenKind::FloatLit => Literal::Float(token.lexeme.clone()),
                    _ => Literal::String(token.lexeme.clone()),
                };
                Ok(Expr::Literal(WithToken(value, token)))
            }
            TokenKind::LParen => {
                self.advance()?;
                let expr = self.expression()?;
                self.consume(TokenKind::RParen, ")")?;
                Ok(expr)
            }
            TokenKind::LBrace => {
                let lbrace = self.advance()?;
                let elements = self.expression_list(TokenKind::RBrace, "}")?;
                Ok(Expr::InitList(InitList(elements, lbrace)))
            }
            TokenKind::Identifier => {
                let token = self.advance()?;
                Ok(Expr::Var(WithToken(token.lexeme.clone(), token)))
            }
            _ => Err(self.error_expected("<expression>")),
        }
    }
}

impl<'a> Parser<'a> {
    fn var_decl(&mut self) -> ParseResult<VarDecl> {
        let ty = self.type_spec(false)?;
        let name = self.consume_identifier()?;

        let init = if self.match_(TokenKind::Assign)? {
            Some(self.expression()?)
        } else {
            None
        };

        Ok(VarDecl { ty, name, init })
    }

    fn statement(&mut self) -> ParseResult<Stmt> {
        self.nested(Self::statement_kind)
    }

    fn statement_kind(&mut self) -> ParseResult<Stmt> {
        match self.peek_kind()? {
            TokenKind::LBrace => self.block().map(Stmt::Block),
            TokenKind::KBreak => {
                let token = self.advance()?;
                self.consume(TokenKind::Semicolon, ";")?;
                Ok(Stmt::Break(token))
            }
            TokenKind::KContinue => {
                let token = self.advance()?;
                self.consume(TokenKind::Semicolon, ";")?;
                Ok(Stmt::Continue(token))
            }
            TokenKind::KFor => self.for_stmt(),
            TokenKind::KIf => self.if_stmt(),
            TokenKind::KReturn => self.return_statement(),
            TokenKind::KSwitch => self.switch_statement(),
            TokenKind::KWhile => self.while_statement(),
            _ if self.check_declaration()? => {
                let decl = self.var_decl()?;
                self.consume(TokenKind::Semicolon, ";")?;
                Ok(Stmt::VarDecl(decl))
            }
            _ => self.expression_statement(),
        }
    }

    fn block(&mut self) -> ParseResult<Block> {
        self.consume(TokenKind::LBrace, "{")?;

        let block = self.block_body(&[TokenKind::RBrace])?;

        self.consume(TokenKind::RBrace, "}")?;
        Ok(Block(block))
    }

    fn block_body(&mut self, end: &[TokenKind]) -> ParseResult<Vec<Stmt>> {
        let mut body = Vec::new();
        loop {
            match self.peek_kind()? {
                TokenKind::EOF => break,
                kind if end.contains(&kind) => break,
                _ => body.push(self.statement()?),
            };
        }

        Ok(body)
    }

    fn for_stmt(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenKind::KFor, "for")?;
        let lparen = self.consume(TokenKind::LParen, "(")?;

        let init = if self.check_declaration()? {
            let decl = self.var_decl()?;
            self.consume(TokenKind::Semicolon, ";")?;
            Some(ForStmtInitializer::VarDecl(decl))
        } else {
            self.optional_expression(TokenKind::Semicolon, ";")?
                .0
                .map(ForStmtInitializer::Expr)
        };

        let (cond, cond_semi) = self.optional_expression(TokenKind::Semicolon, ";")?;

        let (step, rparen) = self.optional_expression(TokenKind::RParen, ")")?;

        let body = self.statement()?;

        Ok(Stmt::For(ForStmt {
            initializer: WithToken(init, lparen),
            condition: WithToken(cond, cond_semi),
            step: WithToken(step, rparen),
            body: Box::new(body),
        }))
    }

    /// An `else` always attaches to the innermost `if` still waiting for one.
    fn if_stmt(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenKind::KIf, "if")?;

        let token = self.consume(TokenKind::LParen, "(")?;
        let cond = WithToken(self.expression()?, token);
        self.consume(TokenKind::RParen, ")")?;

        let then = Box::new(self.statement()?);
        let else_clause = if self.peek_kind()? == TokenKind::KElse {
            let token = self.advance()?;
            Some(Box::new(WithToken(self.statement()?, token)))
        } else {
            None
        };

        Ok(Stmt::If(IfStmt {
            cond,
            then,
            else_clause,
        }))
    }

    fn return_statement(&mut self) -> ParseResult<Stmt> {
        let token = self.consume(TokenKind::KReturn, "return")?;
        let (ret_value, _) = self.optional_expression(TokenKind::Semicolon, ";")?;
        Ok(Stmt::Return(WithToken(ret_value, token)))
    }

    fn switch_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenKind::KSwitch, "switch")?;

        let cond_token = self.consume(TokenKind::LParen, "(")?;
        let cond = WithToken(self.expression()?, cond_token);
        self.consume(TokenKind::RParen, ")")?;

        self.consume(TokenKind::LBrace, "{")?;
        let label_end = [TokenKind::KCase, TokenKind::KDefault, TokenKind::RBrace];
        let mut labels = Vec::new();

        loop {
            match self.peek_kind()? {
                TokenKind::KCase => {
                    let kw = self.advance()?;
                    let value = self.expression()?;
                    self.consume(TokenKind::Colon, ":")?;
                    let body = self.block_body(&label_end)?;
                    labels.push(SwitchLabel::Case(WithToken(Case { value, body }, kw)));
                }
                TokenKind::KDefault => {
                    let kw = self.advance()?;
                    self.consume(TokenKind::Colon, ":")?;
                    let body = self.block_body(&label_end)?;
                    labels.push(SwitchLabel::Default(WithToken(body, kw)));
                }
                _ => break,
            }
        }

        self.consume(TokenKind::RBrace, "}")?;

        Ok(Stmt::Switch(SwitchStmt { cond, labels }))
    }

    fn while_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenKind::KWhile, "while")?;

        let token = self.consume(TokenKind::LParen, "(")?;
        let cond = WithToken(self.expression()?, token);
        self.consume(TokenKind::RParen, ")")?;

        let body = Box::new(self.statement()?);

        Ok(Stmt::While(WhileStmt { cond, body }))
    }

    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;
        self.consume(TokenKind::Semicolon, ";")?;
        Ok(Stmt::Expression(expr))
    }
}

fn unary_tt_to_op(kind: TokenKind) -> UnaryOp {
    match kind {
        TokenKind::Sub => UnaryOp::Minus,
        TokenKind::Not => UnaryOp::Not,
        TokenKind::Inc => UnaryOp::Increment,
        TokenKind::Dec => UnaryOp::Decrement,
        _ => unreachable!(),
    }
}

fn binary_tt_to_op(kind: TokenKind) -> BinaryOp {
    match kind {
        TokenKind::Add => BinaryOp::Plus,
        TokenKind::Sub => BinaryOp::Minus,
        TokenKind::Mul => BinaryOp::Mul,
        TokenKind::Div => BinaryOp::Div,
        TokenKind::Mod => BinaryOp::Mod,
        TokenKind::Equal => BinaryOp::Eq,
        TokenKind::NotEqual => BinaryOp::NotEq,
        TokenKind::And => BinaryOp::And,
        TokenKind::Or => BinaryOp::Or,
        TokenKind::Gt => BinaryOp::Greater,
        TokenKind::Ge => BinaryOp::GreaterEq,
        TokenKind::Lt => BinaryOp::Lesser,
        TokenKind::Le => BinaryOp::LesserEq,
        _ => unreachable!(),
    }
}
