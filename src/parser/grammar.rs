//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::error::TemplateSyntaxError;
use crate::parser::ast::*;
use crate::parser::lexer::{self, Token};

/// A template piece before its field body has been checked
#[derive(Debug, Clone)]
enum Piece {
    Literal(String),
    Field(Option<String>),
}

/// Parse a template string into segments
pub fn parse(input: &str) -> Result<Template, TemplateSyntaxError> {
    let len = input.len();

    // Create a logos lexer, resolve escapes, and convert to token stream
    let tokens = lexer::pair_braces(lexer::lex(input));
    let token_iter = tokens.into_iter().map(|(tok, span)| (tok, span.into()));

    // Turn the token iterator into a stream that chumsky can use
    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    let pieces = template_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| {
            errs.into_iter()
                .next()
                .map(TemplateSyntaxError::from)
                .unwrap_or_else(|| TemplateSyntaxError::new(0..len, "invalid template"))
        })?;

    let segments = pieces
        .into_iter()
        .map(|piece| -> Result<Spanned<Segment>, TemplateSyntaxError> {
            let node = match piece.node {
                Piece::Literal(text) => Segment::Literal(text),
                Piece::Field(body) => parse_field(body.as_deref().unwrap_or(""))
                    .map(Segment::Field)
                    .map_err(|msg| TemplateSyntaxError::new(piece.span.clone(), msg))?,
            };
            Ok(Spanned::new(node, piece.span))
        })
        .collect::<Result<Vec<_>, TemplateSyntaxError>>()?;

    Ok(Template { segments })
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn template_parser<'a, I>(
) -> impl Parser<'a, I, Vec<Spanned<Piece>>, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let text = select! {
        Token::Text(s) => s,
    };

    let field = text
        .clone()
        .or_not()
        .delimited_by(just(Token::BraceOpen), just(Token::BraceClose))
        .map(Piece::Field);

    let literal = text.map(Piece::Literal);

    choice((field, literal))
        .map_with(|p, e| Spanned::new(p, span_range(&e.span())))
        .repeated()
        .collect::<Vec<_>>()
        .then_ignore(end())
}

/// Parse the inside of `{...}`: `name[!conversion][:spec]`
fn parse_field(body: &str) -> Result<Field, String> {
    let (head, spec) = match body.split_once(':') {
        Some((head, spec)) => (head, Some(spec)),
        None => (body, None),
    };

    let (name, conversion) = match head.split_once('!') {
        Some((name, conv)) => (name, Some(parse_conversion(conv)?)),
        None => (head, None),
    };

    if name.is_empty() {
        return Err("empty field name; positional fields are not supported".to_string());
    }
    if !Identifier::is_valid(name) {
        return Err(format!("'{}' is not a valid field name", name));
    }

    let spec = match spec {
        Some(spec) => parse_spec(spec)?,
        None => FormatSpec::default(),
    };

    Ok(Field {
        name: Identifier::new(name),
        conversion,
        spec,
    })
}

fn parse_conversion(conv: &str) -> Result<Conversion, String> {
    match conv {
        "s" => Ok(Conversion::Str),
        "r" => Ok(Conversion::Repr),
        "" => Err("missing conversion after '!'".to_string()),
        other => Err(format!(
            "unknown conversion '!{}'. Expected one of: !s, !r",
            other
        )),
    }
}

fn align_of(c: char) -> Option<Align> {
    match c {
        '<' => Some(Align::Left),
        '>' => Some(Align::Right),
        '^' => Some(Align::Center),
        _ => None,
    }
}

/// Largest width or precision a spec may ask for
const MAX_SPEC_NUMBER: usize = u16::MAX as usize;

/// Parse `[[fill]align][0][width][.precision][s]`
fn parse_spec(spec: &str) -> Result<FormatSpec, String> {
    let chars: Vec<char> = spec.chars().collect();
    let mut out = FormatSpec::default();
    let mut explicit_fill = false;
    let mut i = 0;

    if let Some(align) = chars.get(1).copied().and_then(align_of) {
        out.fill = chars[0];
        out.align = Some(align);
        explicit_fill = true;
        i = 2;
    } else if let Some(align) = chars.first().copied().and_then(align_of) {
        out.align = Some(align);
        i = 1;
    }

    // A leading zero pads with '0' unless a fill was given
    if chars.get(i) == Some(&'0') {
        if !explicit_fill {
            out.fill = '0';
        }
        i += 1;
    }

    let (width, next) = take_number(&chars, i)?;
    out.width = width;
    i = next;

    if chars.get(i) == Some(&'.') {
        let (precision, next) = take_number(&chars, i + 1)?;
        if precision.is_none() {
            return Err("format spec missing precision after '.'".to_string());
        }
        out.precision = precision;
        i = next;
    }

    if chars.get(i) == Some(&'s') {
        i += 1;
    }

    if i != chars.len() {
        return Err(format!("invalid format spec '{}' for a string field", spec));
    }
    Ok(out)
}

fn take_number(chars: &[char], start: usize) -> Result<(Option<usize>, usize), String> {
    let digits: String = chars[start.min(chars.len())..]
        .iter()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return Ok((None, start));
    }
    let value = digits
        .parse::<usize>()
        .ok()
        .filter(|v| *v <= MAX_SPEC_NUMBER)
        .ok_or_else(|| {
            format!(
                "'{}' is too large for a format spec (at most {})",
                digits, MAX_SPEC_NUMBER
            )
        })?;
    Ok((Some(value), start + digits.len()))
}
