//! Lexer for the springbox layout DSL using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    // Container keywords
    #[token("row")]
    Row,
    #[token("col")]
    Col,

    // Item keywords
    #[token("box")]
    Box,
    #[token("spring")]
    Spring,
    #[token("strut")]
    Strut,

    // Sign for numeric values (sizes are validated after parsing)
    #[token("-")]
    Minus,

    // Delimiters
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,
    #[token("[")]
    BracketOpen,
    #[token("]")]
    BracketClose,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,

    // Literals - identifiers must come after keywords
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string(), priority = 1)]
    Ident(String),

    #[regex(r#""([^"\\]|\\.)*""#, |lex| {
        let s = lex.slice();
        s[1..s.len()-1].to_string()
    })]
    String(String),

    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    // Comments (skip)
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    #[regex(r"/\*([^*]|\*[^/])*\*/", logos::skip)]
    BlockComment,
}

/// Lex input string into tokens with spans. On failure, returns the span
/// of every piece of input that is not a token.
pub fn lex(input: &str) -> Result<Vec<(Token, Span)>, Vec<Span>> {
    let mut tokens = Vec::new();
    let mut invalid = Vec::new();
    for (tok, span) in Token::lexer(input).spanned() {
        match tok {
            Ok(tok) => tokens.push((tok, span)),
            Err(()) => invalid.push(span),
        }
    }
    if invalid.is_empty() {
        Ok(tokens)
    } else {
        Err(invalid)
    }
}
