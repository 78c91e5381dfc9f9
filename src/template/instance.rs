//! Construction, validation and rendering of templated errors

use std::collections::BTreeSet;
use std::fmt;

use tracing::{debug, trace};

use crate::error::{ArgumentError, AttributeError};
use crate::formatter::{Fields, Formatter};
use crate::parser::Template;

use super::variant::ErrorVariant;

/// An error value whose message is rendered from its variant's template.
///
/// Instances only exist once the supplied fields exactly match the fields the
/// template requires. After that they never change.
#[derive(Debug, Clone)]
pub struct TemplatedError {
    variant: String,
    lineage: Vec<String>,
    template: String,
    parsed: Template,
    fields: Fields,
    formatter: &'static dyn Formatter,
}

impl TemplatedError {
    /// Validate `fields` against `variant`'s template and build the error.
    ///
    /// Missing fields are reported before extra ones. When a name is supplied
    /// twice the last value wins.
    pub fn new<V, I, K, S>(variant: &V, fields: I) -> Result<Self, ArgumentError>
    where
        V: ErrorVariant + ?Sized,
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<String>,
    {
        Self::builder(variant).args(fields).build()
    }

    /// Start a construction step that can adjust the instance's own template
    pub fn builder<V>(variant: &V) -> Builder
    where
        V: ErrorVariant + ?Sized,
    {
        Builder {
            variant: variant.name().to_string(),
            lineage: variant.lineage().into_iter().map(String::from).collect(),
            template: variant.resolved_template().to_string(),
            formatter: variant.resolved_formatter(),
            fields: Fields::new(),
        }
    }

    /// Name of the concrete variant
    pub fn variant(&self) -> &str {
        &self.variant
    }

    /// Concrete variant name followed by its ancestors, nearest first
    pub fn lineage(&self) -> impl Iterator<Item = &str> {
        self.lineage.iter().map(String::as_str)
    }

    /// Whether this error is `name` or descends from it
    pub fn is_a(&self, name: &str) -> bool {
        self.lineage.iter().any(|n| n == name)
    }

    /// The template this instance renders, including per-instance changes
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn parsed_template(&self) -> &Template {
        &self.parsed
    }

    pub fn formatter(&self) -> &'static dyn Formatter {
        self.formatter
    }

    /// All supplied fields
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Read a supplied field by name
    pub fn get(&self, name: &str) -> Result<&str, AttributeError> {
        self.fields
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| AttributeError {
                variant: self.variant.clone(),
                name: name.to_string(),
            })
    }

    /// Render the message with the variant's formatter
    pub fn render(&self) -> String {
        self.formatter.render(&self.parsed, &self.fields)
    }
}

impl fmt::Display for TemplatedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl std::error::Error for TemplatedError {}

/// Construction step for a [`TemplatedError`].
///
/// The builder starts from a copy of the variant's resolved template. A
/// variant with extra constructor parameters can rewrite that copy with
/// [`Builder::template_with`]; the rewritten template is what gets validated
/// and rendered, and no other instance sees the change.
#[derive(Debug, Clone)]
pub struct Builder {
    variant: String,
    lineage: Vec<String>,
    template: String,
    formatter: &'static dyn Formatter,
    fields: Fields,
}

impl Builder {
    /// Supply one field
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Supply several fields
    pub fn args<I, K, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<String>,
    {
        self.fields
            .extend(fields.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Replace this instance's template
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Derive this instance's template from the inherited one
    pub fn template_with(mut self, f: impl FnOnce(&str) -> String) -> Self {
        self.template = f(&self.template);
        self
    }

    /// Validate and produce the error value
    pub fn build(self) -> Result<TemplatedError, ArgumentError> {
        let parsed = self.formatter.parse(&self.template).map_err(|source| {
            debug!(variant = %self.variant, error = %source, "template failed to parse");
            ArgumentError::InvalidTemplate {
                variant: self.variant.clone(),
                template: self.template.clone(),
                source,
            }
        })?;

        let required = self.formatter.required_fields(&parsed);

        let missing: BTreeSet<String> = required
            .iter()
            .filter(|name| !self.fields.contains_key(*name))
            .cloned()
            .collect();
        if !missing.is_empty() {
            debug!(variant = %self.variant, ?missing, "rejecting construction");
            return Err(ArgumentError::MissingArguments {
                variant: self.variant,
                missing,
            });
        }

        let extra: BTreeSet<String> = self
            .fields
            .keys()
            .filter(|name| !required.contains(*name))
            .cloned()
            .collect();
        if !extra.is_empty() {
            debug!(variant = %self.variant, ?extra, "rejecting construction");
            return Err(ArgumentError::ExtraArguments {
                variant: self.variant,
                extra,
            });
        }

        trace!(variant = %self.variant, fields = self.fields.len(), "constructed error");

        Ok(TemplatedError {
            variant: self.variant,
            lineage: self.lineage,
            template: self.template,
            parsed,
            fields: self.fields,
            formatter: self.formatter,
        })
    }
}
