mod def;
mod expr;
mod types;

use logos::Span;
use std::iter::Peekable;

use ast::Program;

use crate::lexer::{SpannedToken, Token};

/// A parse failure before location mapping: a message plus the byte span of
/// the offending token. [`crate::parse`] resolves the span to line/column.
#[derive(Debug, Clone)]
pub(crate) struct SyntaxError {
    pub message: String,
    pub span: Span,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

pub(crate) type ParseResult<T> = Result<T, SyntaxError>;

pub(crate) struct Parser<I: Iterator<Item = SpannedToken>> {
    tokens: Peekable<I>,
    current_span: Span,
    /// Stores the source text for slicing identifiers / literals
    source: String,
    /// Label used for the `source_file` field of parsed functions
    source_name: String,
    /// Built incrementally while parsing, handed out on success
    program: Program,
}

impl<I: Iterator<Item = SpannedToken>> Parser<I> {
    pub fn new(source: &str, source_name: &str, iterator: I) -> Self {
        Self {
            tokens: iterator.peekable(),
            current_span: 0..0,
            source: source.to_string(),
            source_name: source_name.to_string(),
            program: Program::new(),
        }
    }

    /// Peek at the token, returning a clone (avoids borrow issues).
    fn peek_token(&mut self) -> Token {
        self.tokens
            .peek()
            .map(|(t, _)| t.clone())
            .unwrap_or(Token::Eof)
    }

    /// Peek at the span of the next token.
    fn peek_span(&mut self) -> Span {
        self.tokens
            .peek()
            .map(|(_, s)| s.clone())
            .unwrap_or(self.current_span.clone())
    }

    /// Advances to the next token and returns it, updating the current span.
    fn advance(&mut self) -> Option<Token> {
        if let Some((token, span)) = self.tokens.next() {
            self.current_span = span;
            Some(token)
        } else {
            None
        }
    }

    /// Returns the source text for a span.
    fn text(&self, span: &Span) -> &str {
        &self.source[span.start..span.end]
    }

    /// Returns the source text of the last consumed token.
    fn last_text(&self) -> &str {
        self.text(&self.current_span)
    }

    /// Consumes the next token if it matches `expected`, else returns an error.
    fn expect(&mut self, expected: Token) -> ParseResult<Span> {
        let tok = self.peek_token();
        let span = self.peek_span();
        if tok == expected {
            self.advance();
            Ok(self.current_span.clone())
        } else if tok == Token::Error {
            Err(SyntaxError::new(
                format!("unexpected character: {}", self.text(&span)),
                span,
            ))
        } else {
            Err(SyntaxError::new(
                format!("expected {:?}, found {:?}", expected, tok),
                span,
            ))
        }
    }

    /// Consume an identifier and return its text. Error if not an Ident.
    fn expect_ident(&mut self) -> ParseResult<String> {
        let tok = self.peek_token();
        let span = self.peek_span();
        if tok == Token::Ident {
            self.advance();
            Ok(self.last_text().to_string())
        } else {
            Err(SyntaxError::new(
                format!("expected identifier, found {:?}", tok),
                span,
            ))
        }
    }

    /// Checks if the next token matches, consuming it if so.
    fn eat(&mut self, expected: Token) -> bool {
        if self.peek_token() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    // --- Top-level ---

    /// Parse a complete program (sequence of definitions until EOF).
    pub fn parse_program(mut self) -> ParseResult<Program> {
        while self.peek_token() != Token::Eof {
            self.parse_definition()?;
        }
        if self.program.entry_point().is_none() {
            return Err(SyntaxError::new(
                "no main function",
                self.current_span.clone(),
            ));
        }
        Ok(self.program)
    }
}
