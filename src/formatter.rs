//! Pluggable formatting strategies
//!
//! A [`Formatter`] decides which fields a template requires and how a parsed
//! template is turned into text. The provided methods implement the standard
//! brace syntax; a custom formatter usually overrides [`Formatter::render`]
//! only and post-processes the standard output.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::TemplateSyntaxError;
use crate::parser::{self, Conversion, Field, Segment, Template};

/// Field values keyed by name
pub type Fields = BTreeMap<String, String>;

/// Strategy for extracting and substituting template fields
pub trait Formatter: fmt::Debug + Send + Sync {
    /// Short name used in diagnostics and configuration
    fn name(&self) -> &str {
        "standard"
    }

    /// Parse a template string
    fn parse(&self, template: &str) -> Result<Template, TemplateSyntaxError> {
        parser::parse(template)
    }

    /// Field names a parsed template requires
    fn required_fields(&self, template: &Template) -> BTreeSet<String> {
        template.field_names().into_iter().map(String::from).collect()
    }

    /// Substitute `fields` into a parsed template
    fn render(&self, template: &Template, fields: &Fields) -> String {
        substitute(template, fields)
    }
}

/// Plain placeholder substitution
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFormatter;

impl Formatter for StandardFormatter {}

/// Standard substitution, then the whole message upper-cased
#[derive(Debug, Clone, Copy, Default)]
pub struct UppercaseFormatter;

impl Formatter for UppercaseFormatter {
    fn name(&self) -> &str {
        "uppercase"
    }

    fn render(&self, template: &Template, fields: &Fields) -> String {
        substitute(template, fields).to_uppercase()
    }
}

/// Standard substitution, then the whole message lower-cased
#[derive(Debug, Clone, Copy, Default)]
pub struct LowercaseFormatter;

impl Formatter for LowercaseFormatter {
    fn name(&self) -> &str {
        "lowercase"
    }

    fn render(&self, template: &Template, fields: &Fields) -> String {
        substitute(template, fields).to_lowercase()
    }
}

/// The formatter used when no variant in a chain declares one
pub static STANDARD: StandardFormatter = StandardFormatter;

/// Render every segment of `template` with the standard rules.
///
/// A field with no value is written back as `{name}`; construction never lets
/// that happen for the built-in formatters.
pub fn substitute(template: &Template, fields: &Fields) -> String {
    let mut out = String::new();
    for segment in &template.segments {
        match &segment.node {
            Segment::Literal(text) => out.push_str(text),
            Segment::Field(field) => match fields.get(field.name.as_str()) {
                Some(value) => out.push_str(&format_value(field, value)),
                None => {
                    out.push('{');
                    out.push_str(field.name.as_str());
                    out.push('}');
                }
            },
        }
    }
    out
}

fn format_value(field: &Field, value: &str) -> String {
    let converted = match field.conversion {
        Some(Conversion::Repr) => repr(value),
        Some(Conversion::Str) | None => value.to_string(),
    };
    if field.spec.is_identity() {
        converted
    } else {
        field.spec.apply(&converted)
    }
}

/// Quote `value` the way `!r` shows it: single quotes unless that would
/// need escaping and double quotes would not
fn repr(value: &str) -> String {
    let quote = if value.contains('\'') && !value.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
