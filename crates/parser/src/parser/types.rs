use super::*;

use ast::types::{BuiltIn, FuncParameter, ParameterDirection, Type, TypeId};

impl<I: Iterator<Item = SpannedToken>> Parser<I> {
    /// type ::= funcType | "i32"
    ///
    /// Alternation is decided by lookahead alone; once `fun` is consumed the
    /// rest of the function type is committed.
    pub(super) fn parse_type(&mut self) -> ParseResult<TypeId> {
        match self.peek_token() {
            Token::Fun => self.parse_func_type(),
            Token::I32 => {
                self.advance();
                Ok(self.program.intern_type(Type::builtin(BuiltIn::I32)))
            }
            _ => {
                let span = self.peek_span();
                Err(SyntaxError::new(
                    format!("type not implemented: {}", self.text(&span)),
                    span,
                ))
            }
        }
    }

    /// funcType ::= "fun" "(" [ param ("," param)* ] ")"
    fn parse_func_type(&mut self) -> ParseResult<TypeId> {
        let start = self.peek_span().start;
        self.expect(Token::Fun)?;
        self.expect(Token::LParen)?;
        let mut parameters = Vec::new();
        if self.peek_token() != Token::RParen {
            loop {
                parameters.push(self.parse_parameter()?);
                if !self.eat(Token::Comma) {
                    break;
                }
            }
        }
        self.expect(Token::RParen)?;
        let end = self.current_span.end;

        // The source spelling is kept as diagnostic metadata; interning
        // compares structure only.
        let rep = self.source[start..end].to_string();
        Ok(self.program.intern_type(Type::func(rep, parameters)))
    }

    /// param ::= direction identifier ":" type
    fn parse_parameter(&mut self) -> ParseResult<FuncParameter> {
        let direction = self.parse_direction()?;
        let name = self.expect_ident()?;
        self.expect(Token::Colon)?;
        let ty = self.parse_type()?;
        Ok(FuncParameter {
            name,
            direction,
            ty,
        })
    }

    /// direction ::= "in" | "out" | "inout"
    pub(super) fn parse_direction(&mut self) -> ParseResult<ParameterDirection> {
        let direction = match self.peek_token() {
            Token::In => ParameterDirection::In,
            Token::Out => ParameterDirection::Out,
            Token::Inout => ParameterDirection::Inout,
            _ => {
                let span = self.peek_span();
                return Err(SyntaxError::new(
                    format!("parameter direction not found: {}", self.text(&span)),
                    span,
                ));
            }
        };
        self.advance();
        Ok(direction)
    }
}
