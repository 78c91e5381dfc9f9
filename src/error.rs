//! Error types for template parsing and error construction

use std::collections::BTreeSet;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::parser::lexer::Token;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// A template string that does not follow the placeholder syntax
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid template at {span:?}: {message}")]
pub struct TemplateSyntaxError {
    pub span: Span,
    pub message: String,
    pub expected: Vec<String>,
}

impl TemplateSyntaxError {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            expected: Vec::new(),
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let expected_str = if self.expected.is_empty() {
            String::new()
        } else {
            format!("\nExpected: {}", self.expected.join(", "))
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, self.span.start)
            .with_config(Config::default().with_color(false))
            .with_message(&self.message)
            .with_label(
                Label::new((filename, self.span.clone()))
                    .with_message(format!("{}{}", self.message, expected_str))
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            // Fall back to the one-line form if the report cannot be laid out
            Err(_) => self.to_string(),
        }
    }
}

impl<'a> From<chumsky::error::Rich<'a, Token>> for TemplateSyntaxError {
    fn from(err: chumsky::error::Rich<'a, Token>) -> Self {
        use chumsky::error::{RichPattern, RichReason};

        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => match found.as_deref() {
                Some(Token::BraceClose) => "single '}' encountered in template".to_string(),
                Some(Token::BraceOpen) => "unexpected '{' inside a field".to_string(),
                Some(tok) => format!("unexpected {}", format_token(tok)),
                None => "expected '}' before end of template".to_string(),
            },
            RichReason::Custom(msg) => msg.to_string(),
        };

        let expected = err
            .expected()
            .filter_map(|e| match e {
                RichPattern::Token(tok) => Some(format_token(tok)),
                RichPattern::Label(label) => Some(label.to_string()),
                RichPattern::EndOfInput => Some("end of template".to_string()),
                RichPattern::Identifier(s) => Some(format!("identifier '{}'", s)),
                RichPattern::Any => Some("any token".to_string()),
                RichPattern::SomethingElse => None,
            })
            .collect();

        TemplateSyntaxError {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

/// Format a token for human-readable error messages
fn format_token(tok: &Token) -> String {
    match tok {
        Token::BraceOpen => "'{'".to_string(),
        Token::BraceClose => "'}'".to_string(),
        Token::Text(s) => format!("text \"{}\"", s),
    }
}

/// Reasons a templated error could not be constructed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    /// Fields required by the template were not supplied
    #[error("{variant} missing required arguments: {}", join_names(.missing))]
    MissingArguments {
        variant: String,
        missing: BTreeSet<String>,
    },

    /// Fields were supplied that the template never mentions
    #[error("{variant} given extra arguments: {}", join_names(.extra))]
    ExtraArguments {
        variant: String,
        extra: BTreeSet<String>,
    },

    /// The resolved template could not be parsed
    #[error("{variant} has an invalid template: {source}")]
    InvalidTemplate {
        variant: String,
        template: String,
        source: TemplateSyntaxError,
    },
}

impl ArgumentError {
    /// Name of the variant whose construction failed
    pub fn variant(&self) -> &str {
        match self {
            ArgumentError::MissingArguments { variant, .. }
            | ArgumentError::ExtraArguments { variant, .. }
            | ArgumentError::InvalidTemplate { variant, .. } => variant,
        }
    }
}

/// Lookup of a field that was never supplied
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{variant}' has no field '{name}'")]
pub struct AttributeError {
    pub variant: String,
    pub name: String,
}

fn join_names(names: &BTreeSet<String>) -> String {
    names.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}
