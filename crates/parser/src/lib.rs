pub mod lexer;
mod parser;

#[cfg(test)]
mod tests;

use std::fmt;

use ast::Program;

/// A parse failure with its resolved 1-based source location.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub source_name: String,
    pub line: u32,
    pub column: u32,
    pub message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}:{}): {}",
            self.source_name, self.line, self.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

/// Parse a complete program from `text`. `source_name` labels diagnostics
/// and the `source_file` field of parsed functions.
///
/// On success the returned program has its entry point set. On failure the
/// partially built program is discarded. Nothing in the result borrows from
/// `text`; identifiers and type spellings are copied.
pub fn parse(text: &str, source_name: &str) -> Result<Program, ParseError> {
    let tokens = lexer::tokenize(text);
    let parser = parser::Parser::new(text, source_name, tokens.into_iter());
    parser
        .parse_program()
        .map_err(|err| locate(text, source_name, err))
}

/// Resolve a byte span to a 1-based line and column by counting newlines in
/// the prefix and measuring the distance since the last one.
fn locate(text: &str, source_name: &str, err: parser::SyntaxError) -> ParseError {
    let offset = err.span.start.min(text.len());
    let prefix = &text[..offset];
    let line = prefix.bytes().filter(|&b| b == b'\n').count() as u32 + 1;
    let line_start = prefix.rfind('\n').map(|pos| pos + 1).unwrap_or(0);
    let column = (offset - line_start) as u32 + 1;
    ParseError {
        source_name: source_name.to_string(),
        line,
        column,
        message: err.message,
    }
}
