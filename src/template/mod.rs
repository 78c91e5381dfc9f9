//! Templated error values
//!
//! A variant is described once by a [`Variant`] (or any other
//! [`ErrorVariant`]); each raise site builds a [`TemplatedError`] whose fields
//! are checked against the variant's template before the value exists.
//!
//! # Example
//!
//! ```rust
//! use exception_template::{TemplatedError, Variant};
//!
//! const NOT_FOUND: &Variant = &Variant::new("NotFound").template("no {kind} named '{name}'");
//!
//! let err = TemplatedError::new(NOT_FOUND, [("kind", "user"), ("name", "ryan")]).unwrap();
//! assert_eq!(err.to_string(), "no user named 'ryan'");
//! assert_eq!(err.get("kind").unwrap(), "user");
//! ```

mod instance;
mod variant;

pub use instance::{Builder, TemplatedError};
pub use variant::{ErrorVariant, Variant};
