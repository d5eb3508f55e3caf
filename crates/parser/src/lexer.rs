use logos::{Logos, Span};

#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\n]+")] // whitespace is any run of space, tab, newline
pub enum Token {
    // Keywords
    #[token("def")]
    Def,
    #[token("fun")]
    Fun,
    #[token("in")]
    In,
    #[token("out")]
    Out,
    #[token("inout")]
    Inout,
    #[token("i32")]
    I32,

    // Punctuation
    #[token("=")]
    Assign,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,

    /// A signed decimal literal with its mandatory `i32` suffix. A leading
    /// minus immediately before the digits belongs to the literal, not to
    /// the subtraction operator.
    #[regex(r"-?[0-9]+i32")]
    IntLiteral,

    /// Digits without the `i32` suffix; always a syntax error, kept as its
    /// own token so the parser can point at the missing suffix.
    #[regex(r"-?[0-9]+")]
    BareInt,

    #[regex(r"[A-Za-z][A-Za-z0-9]*")]
    Ident,

    Eof,

    // Logos error fallback
    Error,
}

pub type SpannedToken = (Token, Span);

/// Tokenize the whole source up front, mapping lex failures to [`Token::Error`].
pub fn tokenize(source: &str) -> Vec<SpannedToken> {
    Token::lexer(source)
        .spanned()
        .map(|(token, span)| match token {
            Ok(token) => (token, span),
            Err(_) => (Token::Error, span),
        })
        .collect()
}
