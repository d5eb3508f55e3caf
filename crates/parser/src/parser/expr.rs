use super::*;

use ast::expr::{BinaryOperator, Expression, FuncArgument};
use ast::Spanned;

impl<I: Iterator<Item = SpannedToken>> Parser<I> {
    /// expr ::= term (op term)*
    ///
    /// All five operators share one precedence level and associate to the
    /// left: `a + b * c` is `(a + b) * c`.
    pub(super) fn parse_expr(&mut self) -> ParseResult<Spanned<Expression>> {
        let start = self.peek_span();
        let mut left = self.parse_term()?;
        loop {
            let op = match self.peek_token() {
                Token::Plus => BinaryOperator::Add,
                Token::Minus => BinaryOperator::Subtract,
                Token::Star => BinaryOperator::Multiply,
                Token::Slash => BinaryOperator::Divide,
                Token::Percent => BinaryOperator::Modulo,
                _ => break,
            };
            self.advance();
            let right = self.parse_term()?;
            let end = self.current_span.end;
            left = Spanned::new(
                Expression::BinaryOp {
                    op,
                    lhs: Box::new(left),
                    rhs: Box::new(right),
                },
                start.start..end,
            );
        }
        Ok(left)
    }

    /// term ::= "(" expr ")" | call | varRef | literal
    fn parse_term(&mut self) -> ParseResult<Spanned<Expression>> {
        let start = self.peek_span();
        match self.peek_token() {
            Token::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(Token::RParen)?;
                Ok(expr)
            }
            Token::IntLiteral => self.parse_literal(),
            Token::BareInt => {
                self.advance();
                Err(SyntaxError::new(
                    format!("expected i32 suffix after {}", self.last_text()),
                    self.current_span.clone(),
                ))
            }
            Token::Ident => {
                self.advance();
                let name = self.last_text().to_string();
                if self.peek_token() == Token::LParen {
                    self.parse_call(name, start)
                } else {
                    Ok(Spanned::new(
                        Expression::VarRef(name),
                        self.current_span.clone(),
                    ))
                }
            }
            Token::Error => Err(SyntaxError::new(
                format!("unexpected character: {}", self.text(&start)),
                start,
            )),
            tok => Err(SyntaxError::new(
                format!("expected expression term, found {:?}", tok),
                start,
            )),
        }
    }

    /// literal ::= signedDigits "i32", base 10, range-checked while parsing.
    fn parse_literal(&mut self) -> ParseResult<Spanned<Expression>> {
        self.advance();
        let span = self.current_span.clone();
        let text = self.last_text();
        let digits = &text[..text.len() - "i32".len()];
        let value: i32 = digits.parse().map_err(|_| {
            SyntaxError::new(
                format!("integer literal out of range: {}", text),
                span.clone(),
            )
        })?;
        Ok(Spanned::new(Expression::Literal(value), span))
    }

    /// call ::= identifier "(" [ argument ("," argument)* ] ")"
    ///
    /// The identifier has already been consumed; seeing `(` committed us to
    /// a call rather than a variable reference.
    fn parse_call(&mut self, callee: String, start: Span) -> ParseResult<Spanned<Expression>> {
        self.expect(Token::LParen)?;
        let mut arguments = Vec::new();
        if self.peek_token() != Token::RParen {
            loop {
                arguments.push(self.parse_argument()?);
                if !self.eat(Token::Comma) {
                    break;
                }
            }
        }
        self.expect(Token::RParen)?;
        let end = self.current_span.end;
        Ok(Spanned::new(
            Expression::Call { callee, arguments },
            start.start..end,
        ))
    }

    /// argument ::= direction identifier ":" expr
    fn parse_argument(&mut self) -> ParseResult<FuncArgument> {
        let direction = self.parse_direction()?;
        let name = self.expect_ident()?;
        self.expect(Token::Colon)?;
        let value = self.parse_expr()?;
        Ok(FuncArgument {
            name,
            direction,
            value,
        })
    }
}
