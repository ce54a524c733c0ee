#![allow(non_snake_case)]

use super::*;
use crate::format::Verbatim;
use crate::resolver::MapResolver;
use std::fs;
use tempfile::TempDir;
use test_case::test_case;

const SERVER_GO: &str = r#"package server

type options struct {
	// address to listen on
	addr string
	// number of worker goroutines
	workers int
}

var defaultOptions = options{
	addr:    ":8080",
	workers: 4,
}
"#;

fn generator() -> Generator {
    Generator::new(MapResolver::new(), Verbatim)
}

fn setup() -> (TempDir, GeneratorConfig) {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("options.go");
    fs::write(&source, SERVER_GO).unwrap();
    let config =
        GeneratorConfig::new(&source, "options").with_output(dir.path().join("options.gen.go"));
    (dir, config)
}

fn write_generated(config: &GeneratorConfig) -> String {
    let code = generator().generate(config).unwrap();
    fs::write(config.output_file.as_ref().unwrap(), &code).unwrap();
    code
}

// ============================================================================
// normalize
// ============================================================================

#[test_case("a\r\nb", "a\nb" ; "crlf")]
#[test_case("a\rb", "a\nb" ; "bare cr")]
#[test_case("a  \t\nb\t", "a\nb" ; "trailing blanks")]
#[test_case("a\nb\n\n\n", "a\nb" ; "trailing newlines")]
#[test_case("\tindent\n", "\tindent" ; "leading tabs kept")]
#[test_case("", "" ; "empty")]
fn normalize___cases(input: &str, expected: &str) {
    assert_eq!(normalize(input), expected);
}

#[test]
fn normalize___applied_twice___unchanged() {
    let once = normalize("x \r\ny\t\r\n\n");

    assert_eq!(normalize(&once), once);
}

// ============================================================================
// validate
// ============================================================================

#[test]
fn validate___freshly_generated___up_to_date() {
    let (_dir, config) = setup();
    write_generated(&config);

    let result = validate(&generator(), &config).unwrap();

    assert_eq!(result, Validation::UpToDate);
}

#[test]
fn validate___crlf_and_trailing_whitespace___still_up_to_date() {
    let (_dir, config) = setup();
    let code = write_generated(&config);
    let noisy = code.replace('\n', "  \r\n") + "\r\n\r\n";
    fs::write(config.output_file.as_ref().unwrap(), noisy).unwrap();

    let result = validate(&generator(), &config).unwrap();

    assert!(result.is_up_to_date());
}

#[test]
fn validate___field_added___out_of_date_with_new_flag_in_diff() {
    let (_dir, config) = setup();
    write_generated(&config);
    let changed = SERVER_GO.replace(
        "\tworkers int\n",
        "\tworkers int\n\t// read timeout\n\treadTimeout time.Duration\n",
    );
    fs::write(&config.file_path, changed).unwrap();

    let result = validate(&generator(), &config).unwrap();

    let Validation::OutOfDate(mismatch) = result else {
        panic!("expected out of date");
    };
    assert!(mismatch.diff.contains("+\tflagReadTimeout"));
    assert!(mismatch.diff.contains("\"read-timeout\""));
    assert!(mismatch.diff.contains("@@"));
    assert_eq!(mismatch.struct_name, "options");
}

#[test]
fn validate___out_of_date___never_rewrites_output() {
    let (_dir, config) = setup();
    let output = config.output_file.clone().unwrap();
    fs::write(&output, "// stale\n").unwrap();

    let result = validate(&generator(), &config).unwrap();

    assert!(!result.is_up_to_date());
    assert_eq!(fs::read_to_string(&output).unwrap(), "// stale\n");
}

#[test]
fn validate___no_output_configured___missing_output_error() {
    let (_dir, config) = setup();
    let config = GeneratorConfig {
        output_file: None,
        ..config
    };

    let err = validate(&generator(), &config).unwrap_err();

    assert!(matches!(err, GeneratorError::MissingOutput { .. }));
}

#[test]
fn validate___output_missing_on_disk___read_existing_error() {
    let (_dir, config) = setup();

    let err = validate(&generator(), &config).unwrap_err();

    assert!(matches!(err, GeneratorError::ReadExisting { .. }));
    assert!(err.to_string().contains("options.gen.go"));
}

#[test]
fn validate___unknown_struct___generation_error_propagates() {
    let (_dir, config) = setup();
    write_generated(&config);
    let config = GeneratorConfig {
        struct_name: "missing".to_string(),
        ..config
    };

    let err = validate(&generator(), &config).unwrap_err();

    assert!(matches!(err, GeneratorError::TypeNotFound { .. }));
}

// ============================================================================
// Reporting
// ============================================================================

#[test]
fn regenerate_command___includes_output_and_package() {
    let config = GeneratorConfig::new("svc/options.go", "options")
        .with_output("svc/options.gen.go")
        .with_package("svc");

    assert_eq!(
        regenerate_command(&config),
        "struct-to-pflags -file svc/options.go -struct options -output svc/options.gen.go -package svc"
    );
}

#[test]
fn Mismatch___report___lists_causes_fix_and_diff() {
    let mismatch = Mismatch {
        output: PathBuf::from("options.gen.go"),
        struct_name: "options".to_string(),
        diff: "-old\n+new\n".to_string(),
        command: "struct-to-pflags -file options.go -struct options -output options.gen.go"
            .to_string(),
    };

    let report = mismatch.report();

    assert!(report.starts_with("✗ options.gen.go is out of date\n\n"));
    assert!(report.contains("  - Struct fields were added, removed, or renamed\n"));
    assert!(report.contains("  - Default values in defaultOptions were changed\n"));
    assert!(report.contains(
        "To fix this, run:\n  struct-to-pflags -file options.go -struct options -output options.gen.go\n\n"
    ));
    assert!(report.ends_with("Diff:\n-old\n+new\n"));
}

#[test]
fn unified_diff___identical_texts___empty() {
    let diff = unified_diff("same\ntext", "same\ntext", Path::new("x.gen.go"));

    assert!(diff.is_empty());
}
