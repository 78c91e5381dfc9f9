//! Integration tests for templated error construction and rendering

use std::collections::BTreeSet;

use exception_template::{
    templated_error, ArgumentError, TemplatedError, UppercaseFormatter, Variant,
};
use insta::assert_snapshot;
use pretty_assertions::assert_eq;

templated_error! {
    struct Pair {
        template = "{test} {other_test}",
    }

    struct Single {
        template = "{test}",
    }

    struct Greeting {
        template = "Hello, {person}. Here is my {adjective} exception class.",
    }

    struct Parent {
        template = "Parent {test}",
    }

    struct Child: Parent {
        template = "Child {other_test}",
    }

    struct Inherits: Parent {}

    struct Yell {
        template = "Sometimes I {feeling} to {verb} things.",
        formatter = &UppercaseFormatter,
    }

    struct Quiet {
        template = "Sometimes I {feeling} to {verb} things.",
    }

    struct LoudChild: Yell {}
}

fn names(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|s| s.to_string()).collect()
}

// =============================================================================
// Argument validation
// =============================================================================

#[test]
fn test_missing_argument_names_field() {
    let err = Pair::new([("test", "a")]).unwrap_err();
    assert_eq!(
        err,
        ArgumentError::MissingArguments {
            variant: "Pair".to_string(),
            missing: names(&["other_test"]),
        }
    );
    assert_snapshot!(err.to_string(), @"Pair missing required arguments: other_test");
}

#[test]
fn test_misspelled_argument_is_missing_not_extra() {
    // Both checks fail here; missing is reported first
    let err = Pair::new([("othertest", "b")]).unwrap_err();
    assert_eq!(
        err,
        ArgumentError::MissingArguments {
            variant: "Pair".to_string(),
            missing: names(&["other_test", "test"]),
        }
    );
}

#[test]
fn test_extra_argument_names_field() {
    let err = Single::new([("test", "a"), ("other_test", "b")]).unwrap_err();
    assert_eq!(
        err,
        ArgumentError::ExtraArguments {
            variant: "Single".to_string(),
            extra: names(&["other_test"]),
        }
    );
    assert_snapshot!(err.to_string(), @"Single given extra arguments: other_test");
}

#[test]
fn test_exact_arguments_accepted() {
    let err = Pair::new([("test", "a"), ("other_test", "b")]).expect("Should construct");
    assert_eq!(err.variant(), "Pair");
}

#[test]
fn test_template_without_fields_takes_none() {
    templated_error! {
        struct Plain {
            template = "nothing to fill in",
        }
    }

    let err = Plain::new(Vec::<(String, String)>::new()).expect("Should construct");
    assert_eq!(err.to_string(), "nothing to fill in");
    assert!(Plain::new([("x", "y")]).is_err());
}

#[test]
fn test_root_variant_renders_empty_message() {
    const ROOT: &Variant = &Variant::new("Root");
    let err = TemplatedError::new(ROOT, Vec::<(String, String)>::new()).expect("Should construct");
    assert_eq!(err.to_string(), "");
}

// =============================================================================
// Rendering and field access
// =============================================================================

#[test]
fn test_stringify() {
    let err = Greeting::new([("person", "Ryan"), ("adjective", "fancy")]).unwrap();
    assert_snapshot!(err.to_string(), @"Hello, Ryan. Here is my fancy exception class.");
}

#[test]
fn test_render_is_deterministic() {
    let err = Greeting::new([("person", "Ryan"), ("adjective", "fancy")]).unwrap();
    assert_eq!(err.to_string(), err.to_string());
    assert_eq!(err.render(), err.to_string());
}

#[test]
fn test_get_attributes() {
    let err = Pair::new([("test", "a"), ("other_test", "b")]).unwrap();
    assert_eq!(err.get("test").unwrap(), "a");
    assert_eq!(err.get("other_test").unwrap(), "b");

    let missing = err.get("something_else_entirely").unwrap_err();
    assert_eq!(missing.variant, "Pair");
    assert_eq!(missing.name, "something_else_entirely");
    assert_snapshot!(missing.to_string(), @"'Pair' has no field 'something_else_entirely'");
}

#[test]
fn test_fields_round_trip() {
    let supplied = [("person", "Ryan"), ("adjective", "fancy")];
    let err = Greeting::new(supplied).unwrap();
    for (name, value) in supplied {
        assert_eq!(err.get(name).unwrap(), value);
    }
    assert_eq!(err.fields().len(), 2);
}

// =============================================================================
// Inheritance
// =============================================================================

#[test]
fn test_child_template_shadows_parent() {
    let err = Child::new([("other_test", "a")]).unwrap();
    assert_eq!(err.to_string(), "Child a");
    assert!(err.get("test").is_err());

    // The parent's fields no longer apply
    assert!(Child::new([("test", "a")]).is_err());
}

#[test]
fn test_child_without_template_inherits() {
    let err = Inherits::new([("test", "a")]).unwrap();
    assert_eq!(err.to_string(), "Parent a");
    assert_eq!(err.variant(), "Inherits");
    assert!(err.is_a("Parent"));
}

#[test]
fn test_inherited_validation_names_child() {
    let err = Inherits::new(Vec::<(String, String)>::new()).unwrap_err();
    assert_snapshot!(err.to_string(), @"Inherits missing required arguments: test");
}

// =============================================================================
// Formatters
// =============================================================================

#[test]
fn test_custom_formatter() {
    let err = Yell::new([("feeling", "like"), ("verb", "yell")]).unwrap();
    assert_snapshot!(err.to_string(), @"SOMETIMES I LIKE TO YELL THINGS.");
}

#[test]
fn test_formatter_override_changes_output() {
    let fields = [("feeling", "like"), ("verb", "yell")];
    let loud = Yell::new(fields).unwrap();
    let quiet = Quiet::new(fields).unwrap();
    assert_eq!(quiet.to_string(), "Sometimes I like to yell things.");
    assert_ne!(loud.to_string(), quiet.to_string());
}

#[test]
fn test_formatter_is_inherited() {
    let err = LoudChild::new([("feeling", "like"), ("verb", "yell")]).unwrap();
    assert_eq!(err.to_string(), "SOMETIMES I LIKE TO YELL THINGS.");
}

// =============================================================================
// Variant-specific construction steps
// =============================================================================

/// A variant with constructor parameters that are not template fields
#[derive(Debug)]
struct Positioned {
    pos: u32,
    key: bool,
    inner: TemplatedError,
}

impl Positioned {
    const VARIANT: &'static Variant = &Variant::new("Positioned").template("{test} {other_test}");

    fn new<'a>(
        pos: u32,
        key: bool,
        fields: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, ArgumentError> {
        let inner = TemplatedError::builder(Self::VARIANT)
            .args(fields)
            .template_with(|t| format!("{}{}", t, pos))
            .build()?;
        Ok(Self { pos, key, inner })
    }
}

#[test]
fn test_explicit_construction_step() {
    let ex = Positioned::new(4, true, [("test", "a"), ("other_test", "b")]).unwrap();
    let ex2 = Positioned::new(5, true, [("test", "a"), ("other_test", "b")]).unwrap();

    assert!(ex.key);
    assert_eq!(ex.pos, 4);

    // Each instance renders its own template copy
    assert_eq!(ex.inner.to_string(), "a b4");
    assert_eq!(ex2.inner.to_string(), "a b5");
    assert_eq!(Positioned::VARIANT.own_template(), Some("{test} {other_test}"));
}

#[test]
fn test_construction_step_still_validates() {
    let err = Positioned::new(1, false, [("test", "a")]).unwrap_err();
    assert_eq!(err.variant(), "Positioned");
}

#[test]
fn test_macro_builder_hook() {
    let err = Pair::from_builder(
        Pair::builder()
            .args([("test", "a"), ("other_test", "b")])
            .template_with(|t| format!("[{}]", t)),
    )
    .unwrap();
    assert_eq!(err.to_string(), "[a b]");

    let again = Pair::new([("test", "a"), ("other_test", "b")]).unwrap();
    assert_eq!(again.to_string(), "a b");
}

// =============================================================================
// Error plumbing
// =============================================================================

fn lookup(user: &str) -> Result<(), TemplatedError> {
    Err(Greeting::new([("person", user), ("adjective", "missing")])
        .expect("Should construct")
        .into())
}

#[test]
fn test_propagates_as_std_error() {
    let err = lookup("Ryan").unwrap_err();
    let boxed: Box<dyn std::error::Error> = Box::new(err);
    assert_eq!(
        boxed.to_string(),
        "Hello, Ryan. Here is my missing exception class."
    );
}

#[test]
fn test_syntax_error_in_variant_template() {
    templated_error! {
        struct Broken {
            template = "value: {}",
        }
    }

    let err = Broken::new(Vec::<(String, String)>::new()).unwrap_err();
    match err {
        ArgumentError::InvalidTemplate {
            variant, source, ..
        } => {
            assert_eq!(variant, "Broken");
            assert_eq!(source.span, 7..9);
        }
        other => panic!("Expected InvalidTemplate, got {:?}", other),
    }
}

#[test]
fn test_oversized_width_fails_at_construction() {
    let err = TemplatedError::builder(&Variant::new("Wide"))
        .template("{a:9999999999999}")
        .arg("a", "x")
        .build()
        .unwrap_err();
    assert!(matches!(err, ArgumentError::InvalidTemplate { .. }));
}
