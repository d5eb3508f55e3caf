use super::*;

use ast::expr::Expression;
use ast::types::{BuiltIn, ParameterDirection, TypeId};
use ast::{Function, Spanned};

impl<I: Iterator<Item = SpannedToken>> Parser<I> {
    /// definition ::= "def" identifier "=" type funcBody ";"
    pub(super) fn parse_definition(&mut self) -> ParseResult<()> {
        self.expect(Token::Def)?;
        let name_span = self.peek_span();
        let name = self.expect_ident()?;
        self.expect(Token::Assign)?;

        // Only function-typed definitions exist so far; a definition of a
        // plain value would be grammatical but has no semantics yet.
        if self.peek_token() != Token::Fun {
            return Err(SyntaxError::new(
                "non-function types not implemented",
                self.peek_span(),
            ));
        }
        let ty = self.parse_type()?;

        let body = self.parse_func_body()?;
        self.expect(Token::Semicolon)?;

        let is_main = name == "main";
        if is_main {
            if !self.is_entry_point_type(ty) {
                return Err(SyntaxError::new("wrong type for main", name_span));
            }
            if self.program.entry_point().is_some() {
                return Err(SyntaxError::new("multiple main functions found", name_span));
            }
        }

        let id = self.program.add_function(Function {
            name,
            source_file: self.source_name.clone(),
            ty,
            body,
        });
        if is_main {
            self.program.set_entry_point(id);
        }
        Ok(())
    }

    /// funcBody ::= "{" stmt "}", a single statement for now.
    fn parse_func_body(&mut self) -> ParseResult<Spanned<Expression>> {
        self.expect(Token::LBrace)?;
        if self.peek_token() == Token::RBrace {
            return Err(SyntaxError::new(
                "empty function body not implemented",
                self.peek_span(),
            ));
        }
        let stmt = self.parse_statement()?;
        if self.peek_token() != Token::RBrace {
            return Err(SyntaxError::new(
                "multiple statements in a function body not implemented",
                self.peek_span(),
            ));
        }
        self.advance();
        Ok(stmt)
    }

    /// stmt ::= identifier "=" expr ";"
    fn parse_statement(&mut self) -> ParseResult<Spanned<Expression>> {
        let start = self.peek_span();
        let target = self.expect_ident()?;
        self.expect(Token::Assign)?;
        let value = self.parse_expr()?;
        self.expect(Token::Semicolon)?;
        let end = self.current_span.end;
        Ok(Spanned::new(
            Expression::InitAssignment {
                target,
                value: Box::new(value),
            },
            start.start..end,
        ))
    }

    /// The entry point must be exactly `fun(out exitCode: i32)`.
    fn is_entry_point_type(&self, id: TypeId) -> bool {
        let Some(func_type) = self.program.ty(id).as_func() else {
            return false;
        };
        match func_type.parameters.as_slice() {
            [param] => {
                param.name == "exitCode"
                    && param.direction == ParameterDirection::Out
                    && self.program.ty(param.ty).is_builtin(BuiltIn::I32)
            }
            _ => false,
        }
    }
}
