//! Exception Template - error types whose messages come from named templates
//!
//! A variant declares a template such as `"no {kind} named '{name}'"`. Raising
//! it means supplying exactly the fields the template names; the resulting
//! value renders its message through the variant's formatter and exposes each
//! field by name.
//!
//! # Example
//!
//! ```rust
//! use exception_template::templated_error;
//!
//! templated_error! {
//!     pub struct Greeting {
//!         template = "Hello, {person}. Here is my {adjective} exception class.",
//!     }
//! }
//!
//! let err = Greeting::new([("person", "Ryan"), ("adjective", "fancy")]).unwrap();
//! assert_eq!(err.to_string(), "Hello, Ryan. Here is my fancy exception class.");
//! assert_eq!(err.get("person").unwrap(), "Ryan");
//! ```

pub mod catalog;
pub mod error;
pub mod formatter;
mod macros;
pub mod parser;
pub mod template;

pub use catalog::{Catalog, CatalogEntry, CatalogError, FormatterKind, ResolvedVariant};
pub use error::{ArgumentError, AttributeError, TemplateSyntaxError};
pub use formatter::{
    Fields, Formatter, LowercaseFormatter, StandardFormatter, UppercaseFormatter,
};
pub use template::{Builder, ErrorVariant, TemplatedError, Variant};

use std::collections::BTreeSet;

use thiserror::Error;

/// Any failure this crate can report
#[derive(Debug, Error)]
pub enum Error {
    /// Template could not be parsed
    #[error("{0}")]
    Syntax(#[from] TemplateSyntaxError),

    /// Construction rejected the supplied fields
    #[error("{0}")]
    Argument(#[from] ArgumentError),

    /// Field lookup failed
    #[error("{0}")]
    Attribute(#[from] AttributeError),

    /// Catalog could not be loaded or resolved
    #[error("{0}")]
    Catalog(#[from] CatalogError),
}

/// Field names `template` requires under `formatter`
pub fn required_fields(
    template: &str,
    formatter: &dyn Formatter,
) -> Result<BTreeSet<String>, TemplateSyntaxError> {
    let parsed = formatter.parse(template)?;
    Ok(formatter.required_fields(&parsed))
}
