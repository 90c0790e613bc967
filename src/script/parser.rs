//! Recursive-descent parser producing a [`Program`].
//!
//! Binary operators follow C precedence: `* /` bind tighter than `+ -`,
//! which bind tighter than comparisons, which bind tighter than equality.
//! All binary operators are left-associative.

use super::ScriptError;
use super::ast::{BinOp, Builtin, Expr, Program, Stmt, StmtKind};
use super::lexer::{Token, TokenKind};

/// Parses a token list (as produced by [`super::lexer::tokenize`]).
pub fn parse(tokens: Vec<Token>) -> Result<Program, ScriptError> {
    let mut parser = Parser { tokens, pos: 0 };
    let body = parser.statements()?;
    parser.expect(TokenKind::Eof, "end of input")?;
    Ok(Program { body })
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        // The lexer guarantees a trailing Eof, and `advance` never moves past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    fn peek_second(&self) -> &TokenKind {
        let idx = (self.pos + 1).min(self.tokens.len() - 1);
        &self.tokens[idx].kind
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn unexpected(&self, expected: &str) -> ScriptError {
        let token = self.peek();
        ScriptError::UnexpectedToken {
            line: token.line,
            expected: expected.to_string(),
            found: token.kind.describe(),
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token, ScriptError> {
        if *self.peek_kind() == kind {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn ident(&mut self) -> Result<String, ScriptError> {
        match self.peek_kind().clone() {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("a variable name")),
        }
    }

    fn statements(&mut self) -> Result<Vec<Stmt>, ScriptError> {
        let mut body = Vec::new();
        while !matches!(self.peek_kind(), TokenKind::Eof | TokenKind::RBrace) {
            body.push(self.statement()?);
        }
        Ok(body)
    }

    fn block(&mut self) -> Result<Vec<Stmt>, ScriptError> {
        self.expect(TokenKind::LBrace, "'{'")?;
        let body = self.statements()?;
        self.expect(TokenKind::RBrace, "'}'")?;
        Ok(body)
    }

    fn statement(&mut self) -> Result<Stmt, ScriptError> {
        let line = self.peek().line;
        let kind = match self.peek_kind().clone() {
            TokenKind::Si => self.if_statement()?,
            TokenKind::Pour => self.for_statement()?,
            TokenKind::TantQue => {
                self.advance();
                let cond = self.expression()?;
                let body = self.block()?;
                StmtKind::While { cond, body }
            }
            TokenKind::Afficher => self.print_statement()?,
            TokenKind::Builtin(builtin) => self.call(builtin)?,
            TokenKind::Ident(name) if *self.peek_second() == TokenKind::Arrow => {
                self.advance();
                self.advance();
                let value = self.expression()?;
                StmtKind::Assign { name, value }
            }
            TokenKind::Ident(_)
            | TokenKind::Int(_)
            | TokenKind::Float(_)
            | TokenKind::Str(_)
            | TokenKind::Minus
            | TokenKind::LParen => StmtKind::Expr(self.expression()?),
            _ => return Err(self.unexpected("a statement")),
        };
        Ok(Stmt { line, kind })
    }

    fn if_statement(&mut self) -> Result<StmtKind, ScriptError> {
        self.expect(TokenKind::Si, "'si'")?;
        let cond = self.expression()?;
        let then = self.block()?;
        let otherwise = if *self.peek_kind() == TokenKind::Sinon {
            self.advance();
            Some(self.block()?)
        } else {
            None
        };
        Ok(StmtKind::If {
            cond,
            then,
            otherwise,
        })
    }

    fn for_statement(&mut self) -> Result<StmtKind, ScriptError> {
        self.expect(TokenKind::Pour, "'pour'")?;
        let var = self.ident()?;
        self.expect(TokenKind::De, "'de'")?;
        let start = self.expression()?;
        match self.peek_kind() {
            TokenKind::A => {
                self.advance();
            }
            TokenKind::Ident(word) if word == "a" => {
                self.advance();
            }
            _ => return Err(self.unexpected("'à'")),
        }
        let end = self.expression()?;
        let body = self.block()?;
        Ok(StmtKind::For {
            var,
            start,
            end,
            body,
        })
    }

    fn print_statement(&mut self) -> Result<StmtKind, ScriptError> {
        self.expect(TokenKind::Afficher, "'afficher'")?;
        self.expect(TokenKind::LParen, "'('")?;
        let mut values = Vec::new();
        if *self.peek_kind() != TokenKind::RParen {
            values.push(self.expression()?);
            while *self.peek_kind() == TokenKind::Comma {
                self.advance();
                values.push(self.expression()?);
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(StmtKind::Print { values })
    }

    fn call(&mut self, builtin: Builtin) -> Result<StmtKind, ScriptError> {
        let line = self.advance().line;
        self.expect(TokenKind::LParen, "'('")?;
        let mut args = Vec::new();
        if *self.peek_kind() != TokenKind::RParen {
            args.push(self.expression()?);
            while *self.peek_kind() == TokenKind::Comma {
                self.advance();
                args.push(self.expression()?);
            }
        }
        self.expect(TokenKind::RParen, "')'")?;

        if args.len() != builtin.arity() {
            return Err(ScriptError::Arity {
                line,
                name: builtin.name(),
                expected: builtin.arity(),
                got: args.len(),
            });
        }
        Ok(StmtKind::Call { builtin, args })
    }

    fn expression(&mut self) -> Result<Expr, ScriptError> {
        self.equality()
    }

    fn equality(&mut self) -> Result<Expr, ScriptError> {
        let mut lhs = self.comparison()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Eq => BinOp::Eq,
                TokenKind::NotEq => BinOp::NotEq,
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.comparison()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
    }

    fn comparison(&mut self) -> Result<Expr, ScriptError> {
        let mut lhs = self.additive()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Lt => BinOp::Lt,
                TokenKind::Gt => BinOp::Gt,
                TokenKind::LtEq => BinOp::LtEq,
                TokenKind::GtEq => BinOp::GtEq,
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.additive()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
    }

    fn additive(&mut self) -> Result<Expr, ScriptError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.term()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
    }

    fn term(&mut self) -> Result<Expr, ScriptError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.unary()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
    }

    fn unary(&mut self) -> Result<Expr, ScriptError> {
        if *self.peek_kind() == TokenKind::Minus {
            self.advance();
            return Ok(match self.unary()? {
                Expr::Int(n) => Expr::Int(-n),
                Expr::Float(n) => Expr::Float(-n),
                other => Expr::Neg(Box::new(other)),
            });
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expr, ScriptError> {
        let expr = match self.peek_kind().clone() {
            TokenKind::Int(n) => Expr::Int(n),
            TokenKind::Float(n) => Expr::Float(n),
            TokenKind::Str(s) => Expr::Str(s),
            TokenKind::Ident(name) => Expr::Var(name),
            TokenKind::LParen => {
                self.advance();
                let inner = self.expression()?;
                self.expect(TokenKind::RParen, "')'")?;
                return Ok(inner);
            }
            _ => return Err(self.unexpected("an expression")),
        };
        self.advance();
        Ok(expr)
    }
}
