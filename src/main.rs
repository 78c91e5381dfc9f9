//! Exception Template CLI
//!
//! Usage:
//!   exception-template fields <TEMPLATE> [--formatter KIND]
//!   exception-template render <TEMPLATE> [KEY=VALUE]... [--formatter KIND]
//!   exception-template raise --catalog <FILE> <VARIANT> [KEY=VALUE]...
//!   exception-template list --catalog <FILE>
//!   exception-template check --catalog <FILE>
//!
//! Options:
//!   -v, --verbose  Log construction details to stderr
//!   -h, --help     Print help

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::Level;

use exception_template::{
    required_fields, ArgumentError, Catalog, CatalogError, ErrorVariant, FormatterKind,
    TemplatedError, Variant,
};

#[derive(Parser)]
#[command(name = "exception-template")]
#[command(about = "Render and check templated error messages")]
struct Cli {
    /// Log construction details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the fields a template requires, one per line
    Fields {
        template: String,

        /// standard, uppercase or lowercase
        #[arg(short, long, default_value = "standard")]
        formatter: FormatterKind,
    },

    /// Render an ad-hoc template with KEY=VALUE fields
    Render {
        template: String,

        #[arg(value_parser = parse_assignment)]
        fields: Vec<(String, String)>,

        /// standard, uppercase or lowercase
        #[arg(short, long, default_value = "standard")]
        formatter: FormatterKind,
    },

    /// Construct a catalog variant and print its message
    Raise {
        /// Catalog file (TOML format)
        #[arg(short, long)]
        catalog: PathBuf,

        variant: String,

        #[arg(value_parser = parse_assignment)]
        fields: Vec<(String, String)>,
    },

    /// List catalog variants with their resolved templates
    List {
        /// Catalog file (TOML format)
        #[arg(short, long)]
        catalog: PathBuf,
    },

    /// Validate every variant in a catalog
    Check {
        /// Catalog file (TOML format)
        #[arg(short, long)]
        catalog: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Fields {
            template,
            formatter,
        } => match required_fields(&template, formatter.formatter()) {
            Ok(fields) => {
                for field in fields {
                    println!("{}", field);
                }
            }
            Err(e) => {
                eprint!("{}", e.format(&template, "template"));
                process::exit(1);
            }
        },

        Command::Render {
            template,
            fields,
            formatter,
        } => {
            let variant = Variant::new("Template").formatter(formatter.formatter());
            let result = TemplatedError::builder(&variant)
                .template(template)
                .args(fields)
                .build();
            match result {
                Ok(err) => println!("{}", err),
                Err(e) => exit_with_argument_error(&e),
            }
        }

        Command::Raise {
            catalog,
            variant,
            fields,
        } => {
            let catalog = load_catalog(&catalog);
            match catalog.construct(&variant, fields) {
                Ok(err) => println!("{}", err),
                Err(CatalogError::Argument(e)) => exit_with_argument_error(&e),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            }
        }

        Command::List { catalog } => {
            let catalog = load_catalog(&catalog);
            for name in catalog.names() {
                match catalog.variant(name) {
                    Ok(v) => println!("{}: {}", name, v.resolved_template()),
                    Err(e) => println!("{}: <{}>", name, e),
                }
            }
        }

        Command::Check { catalog: path } => {
            let catalog = load_catalog(&path);
            match catalog.validate() {
                Ok(()) => println!("{}: {} variants ok", path.display(), catalog.len()),
                Err(errors) => {
                    for e in &errors {
                        match e {
                            CatalogError::InvalidTemplate {
                                variant,
                                template,
                                source,
                            } => eprint!("{}", source.format(template, variant)),
                            other => eprintln!("Error: {}", other),
                        }
                    }
                    eprintln!("{}: {} problem(s) found", path.display(), errors.len());
                    process::exit(1);
                }
            }
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_catalog(path: &Path) -> Catalog {
    match Catalog::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading catalog '{}': {}", path.display(), e);
            process::exit(1);
        }
    }
}

fn exit_with_argument_error(e: &ArgumentError) -> ! {
    match e {
        ArgumentError::InvalidTemplate {
            variant,
            template,
            source,
        } => eprint!("{}", source.format(template, variant)),
        other => eprintln!("Error: {}", other),
    }
    process::exit(1);
}

/// Parse a `KEY=VALUE` argument
fn parse_assignment(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("name=ryan"),
            Ok(("name".to_string(), "ryan".to_string()))
        );
    }

    #[test]
    fn test_parse_assignment_splits_on_first_equals() {
        assert_eq!(
            parse_assignment("a=b=c"),
            Ok(("a".to_string(), "b=c".to_string()))
        );
    }

    #[test]
    fn test_parse_assignment_allows_empty_value() {
        assert_eq!(parse_assignment("a="), Ok(("a".to_string(), String::new())));
    }

    #[test]
    fn test_parse_assignment_rejects_empty_key() {
        assert!(parse_assignment("=value").is_err());
        assert!(parse_assignment("no_equals").is_err());
    }
}
