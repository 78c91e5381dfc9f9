//! Integration tests for TOML error catalogs

use std::path::Path;

use exception_template::{ArgumentError, Catalog, CatalogError, ErrorVariant};
use insta::assert_snapshot;
use pretty_assertions::assert_eq;

fn storage() -> Catalog {
    Catalog::from_str(include_str!("fixtures/storage.toml")).expect("Should parse")
}

#[test]
fn test_fixture_loads_from_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/storage.toml");
    let catalog = Catalog::from_file(&path).expect("Should load");
    assert_eq!(catalog.name.as_deref(), Some("storage errors"));
    assert_eq!(catalog.len(), 5);
    assert!(catalog.validate().is_ok());
}

#[test]
fn test_missing_file_is_io_error() {
    let result = Catalog::from_file(Path::new("tests/fixtures/does-not-exist.toml"));
    assert!(matches!(result, Err(CatalogError::IoError(_))));
}

#[test]
fn test_names_are_sorted() {
    let catalog = storage();
    assert_eq!(
        catalog.names().collect::<Vec<_>>(),
        vec!["BucketNotFound", "Fatal", "NotFound", "QuotaExceeded", "StorageError"]
    );
}

#[test]
fn test_inherited_variant_renders_parent_template() {
    let err = storage()
        .construct("BucketNotFound", [("kind", "bucket"), ("name", "photos")])
        .expect("Should construct");
    assert_snapshot!(err.to_string(), @"no bucket named 'photos'");
    assert_eq!(err.variant(), "BucketNotFound");
    assert!(err.is_a("NotFound"));
    assert!(err.is_a("StorageError"));
}

#[test]
fn test_formatter_from_catalog() {
    let err = storage()
        .construct("Fatal", [("kind", "disk"), ("name", "sda")])
        .expect("Should construct");
    assert_snapshot!(err.to_string(), @"NO DISK NAMED 'SDA'");
}

#[test]
fn test_escapes_specs_and_conversions() {
    let err = storage()
        .construct(
            "QuotaExceeded",
            [("used", "512"), ("limit", "1024"), ("owner", "ryan")],
        )
        .expect("Should construct");
    assert_snapshot!(err.to_string(), @"{quota}    512 of 1024 bytes used by 'ryan'");
}

#[test]
fn test_catalog_construction_validates_fields() {
    let err = storage()
        .construct("NotFound", [("kind", "user")])
        .unwrap_err();
    match err {
        CatalogError::Argument(ArgumentError::MissingArguments { variant, missing }) => {
            assert_eq!(variant, "NotFound");
            assert_eq!(missing.into_iter().collect::<Vec<_>>(), vec!["name".to_string()]);
        }
        other => panic!("Expected MissingArguments, got {:?}", other),
    }
}

#[test]
fn test_unknown_variant_name() {
    let err = storage().construct("Nope", [("a", "b")]).unwrap_err();
    assert_snapshot!(err.to_string(), @"unknown variant 'Nope'");
}

#[test]
fn test_resolved_variant_exposes_chain() {
    let variant = storage().variant("Fatal").expect("Should resolve");
    assert_eq!(variant.lineage(), vec!["Fatal", "NotFound", "StorageError"]);
    assert_eq!(variant.resolved_template(), "no {kind} named '{name}'");
}

#[test]
fn test_validate_reports_every_problem() {
    let catalog = Catalog::from_str(include_str!("fixtures/broken.toml")).expect("Should parse");
    let errors = catalog.validate().unwrap_err();
    assert_eq!(errors.len(), 3);

    let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    assert!(messages.iter().any(|m| m.contains("'Orphan' extends unknown variant 'Nowhere'")));
    assert!(messages.iter().any(|m| m.starts_with("variant 'Stray' has an invalid template")));
    assert!(messages.iter().any(|m| m.starts_with("variant 'Unclosed' has an invalid template")));
}

#[test]
fn test_syntax_diagnostic_points_at_source() {
    let catalog = Catalog::from_str(include_str!("fixtures/broken.toml")).expect("Should parse");
    let errors = catalog.validate().unwrap_err();
    let (template, source) = errors
        .iter()
        .find_map(|e| match e {
            CatalogError::InvalidTemplate {
                variant,
                template,
                source,
            } if variant == "Stray" => Some((template.clone(), source.clone())),
            _ => None,
        })
        .expect("Stray should be reported");

    assert_eq!(source.span, 6..7);
    let report = source.format(&template, "Stray");
    assert!(report.contains("single '}' encountered in template"));
}
