//! Lexer for template strings using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Raw template tokens. Doubled braces are resolved by [`pair_braces`].
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
pub enum Token {
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,

    // Everything between braces, whitespace included
    #[regex(r"[^{}]+", |lex| lex.slice().to_string())]
    Text(String),
}

/// Lex input string into tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().map(|t| (t, span)))
}

/// Resolve `{{` and `}}` escapes outside fields into literal text.
///
/// Scanning left to right, a `{` either starts an escape or opens a field, and
/// the first `}` after an opened field closes it. This keeps runs such as
/// `{{{name}}}` grouped as `{` + field + `}`. Braces the grammar cannot accept
/// (a lone `}` or a `{` inside a field) are passed through unchanged.
pub fn pair_braces(tokens: impl Iterator<Item = (Token, Span)>) -> Vec<(Token, Span)> {
    let mut tokens = tokens.peekable();
    let mut out = Vec::new();
    let mut in_field = false;

    while let Some((tok, span)) = tokens.next() {
        match tok {
            Token::BraceOpen if !in_field => {
                if matches!(tokens.peek(), Some((Token::BraceOpen, _))) {
                    let end = tokens.next().map(|(_, s)| s.end).unwrap_or(span.end);
                    out.push((Token::Text("{".to_string()), span.start..end));
                } else {
                    in_field = true;
                    out.push((Token::BraceOpen, span));
                }
            }
            Token::BraceClose if !in_field => {
                if matches!(tokens.peek(), Some((Token::BraceClose, _))) {
                    let end = tokens.next().map(|(_, s)| s.end).unwrap_or(span.end);
                    out.push((Token::Text("}".to_string()), span.start..end));
                } else {
                    out.push((Token::BraceClose, span));
                }
            }
            Token::BraceClose => {
                in_field = false;
                out.push((Token::BraceClose, span));
            }
            other => out.push((other, span)),
        }
    }
    out
}
