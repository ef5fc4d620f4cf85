//! Recursive-descent parser: tokens to a resolved [`Module`].
//!
//! ```text
//! program     := statement*
//! statement   := NAME ':' TYPE '=' expr
//!              | expr
//! expr        := INT | NAME | NAME '(' [expr (',' expr)*] ')'
//! ```

use log::trace;
use pysq_core::PrimitiveType;

use crate::ast::{Expr, Module, Stmt};
use crate::builtin::Builtin;
use crate::error::CompileError;
use crate::span::Span;
use crate::symbols::VariableRegistry;
use crate::token::{Token, TokenKind};

const EOF: Token<'static> = Token {
    kind: TokenKind::Eof,
    lexeme: "",
    span: Span {
        line: 0,
        column: 0,
        offset: 0,
        len: 0,
    },
};

/// Parser over a token slice produced by the lexer.
pub struct Parser<'t, 'src> {
    tokens: &'t [Token<'src>],
    cursor: usize,
    registry: VariableRegistry,
}

impl<'t, 'src> Parser<'t, 'src> {
    /// Create a parser targeting a runtime table of `capacity` slots.
    pub fn new(tokens: &'t [Token<'src>], capacity: usize) -> Self {
        Self {
            tokens,
            cursor: 0,
            registry: VariableRegistry::new(capacity),
        }
    }

    fn peek_at(&self, ahead: usize) -> Token<'src> {
        self.tokens
            .get(self.cursor + ahead)
            .or_else(|| self.tokens.last())
            .copied()
            .unwrap_or(EOF)
    }

    fn peek(&self) -> Token<'src> {
        self.peek_at(0)
    }

    fn advance(&mut self) -> Token<'src> {
        let tok = self.peek();
        if self.cursor < self.tokens.len() {
            self.cursor += 1;
        }
        tok
    }

    fn expect(
        &mut self,
        kind: TokenKind,
        expected: &'static str,
    ) -> Result<Token<'src>, CompileError> {
        let tok = self.peek();
        if tok.kind != kind {
            return Err(unexpected(tok, expected));
        }
        Ok(self.advance())
    }

    /// Parse the whole token stream.
    pub fn parse_module(mut self) -> Result<Module, CompileError> {
        let mut statements = Vec::new();
        while self.peek().kind != TokenKind::Eof {
            statements.push(self.parse_statement()?);
        }
        Ok(Module {
            statements,
            slot_count: self.registry.slot_count(),
        })
    }

    fn parse_statement(&mut self) -> Result<Stmt, CompileError> {
        let tok = self.peek();
        if tok.kind != TokenKind::Literal {
            return Err(unexpected(tok, "statement"));
        }
        if self.peek_at(1).kind == TokenKind::Colon {
            return self.parse_assignation();
        }
        Ok(Stmt::Expr(self.parse_expr()?))
    }

    fn parse_assignation(&mut self) -> Result<Stmt, CompileError> {
        let name = self.advance();
        if !name.is_identifier() {
            return Err(unexpected(name, "variable name"));
        }
        self.expect(TokenKind::Colon, "`:`")?;
        let ty_tok = self.expect(TokenKind::Literal, "type name")?;
        let ty = PrimitiveType::from_keyword(ty_tok.lexeme).ok_or_else(|| {
            CompileError::UnknownType {
                name: ty_tok.lexeme.to_string(),
                span: ty_tok.span,
            }
        })?;
        self.expect(TokenKind::Equals, "`=`")?;

        // The value is parsed before the name is bound, so `x: int = x`
        // reads the previous declaration of `x`.
        let value = self.parse_value()?;

        let var = self
            .registry
            .declare(name.lexeme, ty)
            .ok_or(CompileError::TooManyVariables {
                capacity: self.registry.capacity(),
                span: name.span,
            })?;
        trace!("declared {} as slot {}", name.lexeme, var.id);
        Ok(Stmt::Assignation {
            name: name.lexeme.to_string(),
            var,
            value,
            span: name.span,
        })
    }

    /// Parse an expression that must produce a value.
    fn parse_value(&mut self) -> Result<Expr, CompileError> {
        let expr = self.parse_expr()?;
        if let Expr::FunctionCall { builtin, span, .. } = &expr {
            if !expr.has_value() {
                return Err(CompileError::VoidValue {
                    name: builtin.name().to_string(),
                    span: *span,
                });
            }
        }
        Ok(expr)
    }

    fn parse_expr(&mut self) -> Result<Expr, CompileError> {
        let tok = self.peek();
        if tok.kind != TokenKind::Literal {
            return Err(unexpected(tok, "expression"));
        }
        self.advance();

        if tok.is_identifier() {
            if self.peek().kind == TokenKind::ParenOpen {
                return self.parse_call(tok);
            }
            let var = self
                .registry
                .resolve(tok.lexeme)
                .ok_or_else(|| CompileError::UndefinedVariable {
                    name: tok.lexeme.to_string(),
                    span: tok.span,
                })?;
            return Ok(Expr::VariableRead {
                name: tok.lexeme.to_string(),
                var,
                span: tok.span,
            });
        }

        Ok(Expr::Int {
            value: parse_int(tok)?,
            span: tok.span,
        })
    }

    fn parse_call(&mut self, name: Token<'src>) -> Result<Expr, CompileError> {
        let builtin = Builtin::from_name(name.lexeme).ok_or_else(|| CompileError::UnknownFunction {
            name: name.lexeme.to_string(),
            span: name.span,
        })?;
        let open = self.expect(TokenKind::ParenOpen, "`(`")?;
        let unclosed = CompileError::UnclosedParen { span: open.span };

        let mut args = Vec::new();
        if self.peek().kind == TokenKind::ParenClose {
            self.advance();
        } else {
            loop {
                if self.peek().kind == TokenKind::Eof {
                    return Err(unclosed);
                }
                args.push(self.parse_value()?);
                let sep = self.peek();
                match sep.kind {
                    TokenKind::Comma => {
                        self.advance();
                    }
                    TokenKind::ParenClose => {
                        self.advance();
                        break;
                    }
                    TokenKind::Eof => return Err(unclosed),
                    _ => return Err(unexpected(sep, "`,` or `)`")),
                }
            }
        }

        if args.len() != builtin.arity() {
            return Err(CompileError::WrongArity {
                name: builtin.name().to_string(),
                expected: builtin.arity(),
                found: args.len(),
                span: name.span,
            });
        }
        Ok(Expr::FunctionCall {
            builtin,
            args,
            span: name.span,
        })
    }
}

fn unexpected(tok: Token<'_>, expected: &'static str) -> CompileError {
    CompileError::UnexpectedToken {
        found: tok.lexeme.to_string(),
        expected,
        span: tok.span,
    }
}

fn parse_int(tok: Token<'_>) -> Result<i32, CompileError> {
    if let Ok(value) = tok.lexeme.parse::<i32>() {
        return Ok(value);
    }
    let digits = tok.lexeme.strip_prefix('-').unwrap_or(tok.lexeme);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        Err(CompileError::IntegerOutOfRange {
            lexeme: tok.lexeme.to_string(),
            span: tok.span,
        })
    } else {
        Err(CompileError::InvalidLiteral {
            lexeme: tok.lexeme.to_string(),
            span: tok.span,
        })
    }
}
