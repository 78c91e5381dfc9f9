//! Error catalogs loaded from TOML
//!
//! A catalog declares variants as data instead of code. Each entry may name a
//! parent with `extends`, and inherits whatever template or formatter it does
//! not declare itself:
//!
//! ```toml
//! [metadata]
//! name = "storage errors"
//!
//! [variants.NotFound]
//! template = "no {kind} named '{name}'"
//!
//! [variants.LoudNotFound]
//! extends = "NotFound"
//! formatter = "uppercase"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::error::{ArgumentError, TemplateSyntaxError};
use crate::formatter::{Formatter, LowercaseFormatter, StandardFormatter, UppercaseFormatter};
use crate::template::{ErrorVariant, TemplatedError};

/// Errors that can occur when loading or using a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse catalog TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("unknown variant '{name}'")]
    UnknownVariant { name: String },

    #[error("variant '{variant}' extends unknown variant '{parent}'")]
    UnknownParent { variant: String, parent: String },

    #[error("circular inheritance detected: {chain}")]
    CircularInheritance { chain: String },

    #[error("variant '{variant}' has an invalid template: {source}")]
    InvalidTemplate {
        variant: String,
        template: String,
        source: TemplateSyntaxError,
    },

    #[error(transparent)]
    Argument(#[from] ArgumentError),
}

/// Formatters a catalog entry can select by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatterKind {
    Standard,
    Uppercase,
    Lowercase,
}

impl FormatterKind {
    pub fn formatter(self) -> &'static dyn Formatter {
        match self {
            FormatterKind::Standard => &StandardFormatter,
            FormatterKind::Uppercase => &UppercaseFormatter,
            FormatterKind::Lowercase => &LowercaseFormatter,
        }
    }
}

impl std::str::FromStr for FormatterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(FormatterKind::Standard),
            "uppercase" => Ok(FormatterKind::Uppercase),
            "lowercase" => Ok(FormatterKind::Lowercase),
            other => Err(format!(
                "unknown formatter '{}'. Expected one of: standard, uppercase, lowercase",
                other
            )),
        }
    }
}

/// One `[variants.<Name>]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogEntry {
    /// Parent variant name
    pub extends: Option<String>,
    /// Own template; inherited when absent
    pub template: Option<String>,
    /// Own formatter; inherited when absent
    pub formatter: Option<FormatterKind>,
}

/// A catalog variant with its inheritance chain already applied
#[derive(Debug, Clone)]
pub struct ResolvedVariant {
    lineage: Vec<String>,
    template: String,
    formatter: &'static dyn Formatter,
}

impl ErrorVariant for ResolvedVariant {
    fn name(&self) -> &str {
        self.lineage.first().map(String::as_str).unwrap_or_default()
    }

    fn resolved_template(&self) -> &str {
        &self.template
    }

    fn resolved_formatter(&self) -> &'static dyn Formatter {
        self.formatter
    }

    fn lineage(&self) -> Vec<&str> {
        self.lineage.iter().map(String::as_str).collect()
    }
}

/// A set of variants declared in TOML
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Optional name for the catalog
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    variants: BTreeMap<String, CatalogEntry>,
}

/// TOML structure for deserializing catalogs
#[derive(Deserialize)]
struct TomlCatalog {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    variants: BTreeMap<String, CatalogEntry>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

impl Catalog {
    /// Load catalog from TOML file
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load catalog from TOML string
    pub fn from_str(content: &str) -> Result<Self, CatalogError> {
        let parsed: TomlCatalog = toml::from_str(content)?;
        debug!(variants = parsed.variants.len(), "loaded error catalog");

        Ok(Catalog {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            variants: parsed.variants,
        })
    }

    /// Add or replace an entry
    pub fn insert(&mut self, name: impl Into<String>, entry: CatalogEntry) -> Option<CatalogEntry> {
        self.variants.insert(name.into(), entry)
    }

    pub fn entry(&self, name: &str) -> Option<&CatalogEntry> {
        self.variants.get(name)
    }

    /// Variant names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variants.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Resolve `name` along its `extends` chain, nearest ancestor first
    pub fn variant(&self, name: &str) -> Result<ResolvedVariant, CatalogError> {
        let mut lineage: Vec<String> = Vec::new();
        let mut entries: Vec<&CatalogEntry> = Vec::new();
        let mut current = name;

        loop {
            if lineage.iter().any(|n| n == current) {
                return Err(CatalogError::CircularInheritance {
                    chain: format!("{} -> {}", lineage.join(" -> "), current),
                });
            }

            let entry = match (self.variants.get(current), lineage.last()) {
                (Some(entry), _) => entry,
                (None, None) => {
                    return Err(CatalogError::UnknownVariant {
                        name: current.to_string(),
                    })
                }
                (None, Some(child)) => {
                    return Err(CatalogError::UnknownParent {
                        variant: child.clone(),
                        parent: current.to_string(),
                    })
                }
            };

            lineage.push(current.to_string());
            entries.push(entry);

            match &entry.extends {
                Some(parent) => current = parent.as_str(),
                None => break,
            }
        }

        let template = entries
            .iter()
            .find_map(|e| e.template.clone())
            .unwrap_or_default();
        let formatter = entries
            .iter()
            .find_map(|e| e.formatter)
            .map(FormatterKind::formatter)
            .unwrap_or(&StandardFormatter);

        Ok(ResolvedVariant {
            lineage,
            template,
            formatter,
        })
    }

    /// Resolve a variant and construct an error from it
    pub fn construct<I, K, S>(&self, name: &str, fields: I) -> Result<TemplatedError, CatalogError>
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<String>,
    {
        let variant = self.variant(name)?;
        Ok(TemplatedError::new(&variant, fields)?)
    }

    /// Check every entry, collecting all problems found.
    ///
    /// Templates are only parsed where they are declared so an inherited
    /// mistake is reported once.
    pub fn validate(&self) -> Result<(), Vec<CatalogError>> {
        let mut errors = Vec::new();

        for (name, entry) in &self.variants {
            let resolved = match self.variant(name) {
                Ok(resolved) => resolved,
                Err(e) => {
                    errors.push(e);
                    continue;
                }
            };

            if let Some(template) = &entry.template {
                if let Err(source) = resolved.resolved_formatter().parse(template) {
                    errors.push(CatalogError::InvalidTemplate {
                        variant: name.clone(),
                        template: template.clone(),
                        source,
                    });
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            debug!(problems = errors.len(), "catalog failed validation");
            Err(errors)
        }
    }
}
