//! Variant descriptors and nearest-ancestor resolution

use crate::formatter::{Formatter, STANDARD};

/// What construction needs to know about a concrete variant
pub trait ErrorVariant {
    /// Name of the concrete variant, used in every diagnostic
    fn name(&self) -> &str;

    /// Template declared by the variant or its nearest ancestor
    fn resolved_template(&self) -> &str;

    /// Formatter declared by the variant or its nearest ancestor
    fn resolved_formatter(&self) -> &'static dyn Formatter;

    /// The variant's own name followed by each ancestor's, nearest first
    fn lineage(&self) -> Vec<&str>;
}

/// Static description of an error variant.
///
/// Descriptors are built in `const` context and chained with
/// [`Variant::extends`]:
///
/// ```rust
/// use exception_template::{ErrorVariant, UppercaseFormatter, Variant};
///
/// const PARENT: &Variant = &Variant::new("Parent").template("Parent {test}");
/// const LOUD: &Variant = &Variant::new("Loud")
///     .extends(PARENT)
///     .formatter(&UppercaseFormatter);
///
/// assert_eq!(LOUD.resolved_template(), "Parent {test}");
/// assert_eq!(LOUD.resolved_formatter().name(), "uppercase");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Variant {
    name: &'static str,
    parent: Option<&'static Variant>,
    template: Option<&'static str>,
    formatter: Option<&'static dyn Formatter>,
}

impl Variant {
    /// A root variant with no template or formatter of its own
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            parent: None,
            template: None,
            formatter: None,
        }
    }

    /// Inherit whatever this variant does not declare from `parent`
    pub const fn extends(self, parent: &'static Variant) -> Self {
        Self {
            parent: Some(parent),
            ..self
        }
    }

    /// Declare this variant's own template
    pub const fn template(self, template: &'static str) -> Self {
        Self {
            template: Some(template),
            ..self
        }
    }

    /// Declare this variant's own formatter
    pub const fn formatter(self, formatter: &'static dyn Formatter) -> Self {
        Self {
            formatter: Some(formatter),
            ..self
        }
    }

    pub fn parent(&self) -> Option<&'static Variant> {
        self.parent
    }

    /// Template declared on this variant itself, ignoring ancestors
    pub fn own_template(&self) -> Option<&'static str> {
        self.template
    }

    /// Formatter declared on this variant itself, ignoring ancestors
    pub fn own_formatter(&self) -> Option<&'static dyn Formatter> {
        self.formatter
    }

    /// This variant, then its parent, then the parent's parent...
    pub fn ancestors(&self) -> impl Iterator<Item = &Variant> {
        std::iter::successors(Some(self), |v| v.parent)
    }
}

impl ErrorVariant for Variant {
    fn name(&self) -> &str {
        self.name
    }

    fn resolved_template(&self) -> &str {
        self.ancestors().find_map(|v| v.template).unwrap_or("")
    }

    fn resolved_formatter(&self) -> &'static dyn Formatter {
        self.ancestors()
            .find_map(|v| v.formatter)
            .unwrap_or(&STANDARD)
    }

    fn lineage(&self) -> Vec<&str> {
        self.ancestors().map(|v| v.name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::{LowercaseFormatter, UppercaseFormatter};

    const BASE: &Variant = &Variant::new("Base");
    const PARENT: &Variant = &Variant::new("Parent")
        .extends(BASE)
        .template("Parent {test}")
        .formatter(&UppercaseFormatter);
    const INHERITS: &Variant = &Variant::new("Inherits").extends(PARENT);
    const SHADOWS: &Variant = &Variant::new("Shadows")
        .extends(PARENT)
        .template("Child {other_test}")
        .formatter(&LowercaseFormatter);

    #[test]
    fn test_root_defaults() {
        assert_eq!(BASE.resolved_template(), "");
        assert_eq!(BASE.resolved_formatter().name(), "standard");
        assert!(BASE.parent().is_none());
    }

    #[test]
    fn test_inherits_nearest_ancestor() {
        assert_eq!(INHERITS.resolved_template(), "Parent {test}");
        assert_eq!(INHERITS.resolved_formatter().name(), "uppercase");
        assert!(INHERITS.own_template().is_none());
    }

    #[test]
    fn test_own_declarations_shadow_parent() {
        assert_eq!(SHADOWS.resolved_template(), "Child {other_test}");
        assert_eq!(SHADOWS.resolved_formatter().name(), "lowercase");
        assert_eq!(PARENT.resolved_template(), "Parent {test}");
    }

    #[test]
    fn test_lineage_nearest_first() {
        assert_eq!(SHADOWS.lineage(), vec!["Shadows", "Parent", "Base"]);
    }
}
