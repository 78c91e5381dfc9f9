//! Syntax tree for parsed templates

use std::collections::BTreeSet;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// AST node with source location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Valid field name (alphanumeric + underscore, starts with letter/_)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(pub String);

impl Identifier {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether `s` is usable as a field name
    pub fn is_valid(s: &str) -> bool {
        let mut chars = s.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        }
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Conversion applied to a value before the format spec (`!s`, `!r`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// The value as supplied
    Str,
    /// Single-quoted with control characters escaped, e.g. `'ryan'`
    Repr,
}

/// Horizontal alignment inside a padded field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
}

/// Format spec for a string field: `[[fill]align][0][width][.precision][s]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    pub fill: char,
    pub align: Option<Align>,
    pub width: Option<usize>,
    pub precision: Option<usize>,
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self {
            fill: ' ',
            align: None,
            width: None,
            precision: None,
        }
    }
}

impl FormatSpec {
    /// True when applying the spec can never change a value
    pub fn is_identity(&self) -> bool {
        self.width.is_none() && self.precision.is_none()
    }

    /// Truncate to `precision` characters, then pad to `width`
    pub fn apply(&self, value: &str) -> String {
        let truncated: String = match self.precision {
            Some(p) => value.chars().take(p).collect(),
            None => value.to_string(),
        };

        let len = truncated.chars().count();
        let width = match self.width {
            Some(w) if w > len => w,
            _ => return truncated,
        };

        let padding = width - len;
        let (before, after) = match self.align.unwrap_or(Align::Left) {
            Align::Left => (0, padding),
            Align::Right => (padding, 0),
            Align::Center => (padding / 2, padding - padding / 2),
        };

        let mut out = String::with_capacity(truncated.len() + padding);
        out.extend(std::iter::repeat(self.fill).take(before));
        out.push_str(&truncated);
        out.extend(std::iter::repeat(self.fill).take(after));
        out
    }
}

/// A named placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: Identifier,
    pub conversion: Option<Conversion>,
    pub spec: FormatSpec,
}

impl Field {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Identifier::new(name),
            conversion: None,
            spec: FormatSpec::default(),
        }
    }
}

/// A piece of a template: literal text or a placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Field(Field),
}

/// A parsed template
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    pub segments: Vec<Spanned<Segment>>,
}

impl Template {
    /// All placeholders in source order, repeats included
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.segments.iter().filter_map(|s| match &s.node {
            Segment::Field(f) => Some(f),
            Segment::Literal(_) => None,
        })
    }

    /// Distinct placeholder names
    pub fn field_names(&self) -> BTreeSet<&str> {
        self.fields().map(|f| f.name.as_str()).collect()
    }
}
