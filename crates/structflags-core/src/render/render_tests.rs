#![allow(non_snake_case)]

use super::*;
use crate::format::{FormatError, Verbatim};
use std::path::PathBuf;
use test_case::test_case;

fn field(name: &str, type_tag: &str, comment: &str) -> FieldInfo {
    FieldInfo {
        comment: comment.to_string(),
        ..FieldInfo::new(name, type_tag)
    }
}

fn with_default(mut field: FieldInfo, default_ref: &str) -> FieldInfo {
    field.default_ref = Some(default_ref.to_string());
    field
}

fn skipped(mut field: FieldInfo) -> FieldInfo {
    field.skip = true;
    field
}

fn config_fields() -> Vec<FieldInfo> {
    vec![
        with_default(
            field("logFile", "string", "path to file where logs will be written"),
            "defaultConfig.logFile",
        ),
        with_default(field("debug", "bool", "enable debug mode"), "defaultConfig.debug"),
        with_default(field("port", "int", ""), "defaultConfig.port"),
        field("timeout", "time.Duration", "request timeout"),
        skipped(field("version", "string", "internal version field")),
    ]
}

fn embedded_defaults() -> EmbeddedStructInfo {
    EmbeddedStructInfo {
        type_name: "EmbeddedDefaults".to_string(),
        pkg_alias: "types".to_string(),
        pkg_path: "github.com/example/pkg/types".to_string(),
        dir: PathBuf::from("/src/types"),
        fields: vec![
            with_default(
                field("MaxRetries", "int", "maximum retries"),
                "defaultConfig.MaxRetries",
            ),
            skipped(with_default(field("Secret", "string", ""), "defaultConfig.Secret")),
        ],
    }
}

const EXPECTED_WITH_EMBEDDED: &str = r#"// Code generated by struct-to-pflags; DO NOT EDIT.

package example

import (
	"time"

	"github.com/spf13/pflag"

	"github.com/example/pkg/types"
)

const (
	flagLogFile = "log-file"
	flagDebug   = "debug"
	flagPort    = "port"
	flagTimeout = "timeout"

	// EmbeddedDefaults flags
	flagEmbeddedMaxRetriesDefaultValue = "embedded-max-retries-default-value"
)

func withConfigFlags(flags *pflag.FlagSet) {
	flags.String(flagLogFile, defaultConfig.logFile, "path to file where logs will be written")
	flags.Bool(flagDebug, defaultConfig.debug, "enable debug mode")
	flags.Int(flagPort, defaultConfig.port, "")
	flags.Duration(flagTimeout, 0, "request timeout")

	// EmbeddedDefaults flags
	flags.Int(flagEmbeddedMaxRetriesDefaultValue, defaultConfig.MaxRetries, "maximum retries")
}

func loadConfig(flags *pflag.FlagSet, version string) (*config, error) {
	logFile, err := flags.GetString(flagLogFile)
	if err != nil {
		return nil, err
	}

	debug, err := flags.GetBool(flagDebug)
	if err != nil {
		return nil, err
	}

	port, err := flags.GetInt(flagPort)
	if err != nil {
		return nil, err
	}

	timeout, err := flags.GetDuration(flagTimeout)
	if err != nil {
		return nil, err
	}

	// EmbeddedDefaults
	maxRetries, err := flags.GetInt(flagEmbeddedMaxRetriesDefaultValue)
	if err != nil {
		return nil, err
	}

	return &config{
		logFile: logFile,
		debug:   debug,
		port:    port,
		timeout: timeout,
		version: version,
		EmbeddedDefaults: types.EmbeddedDefaults{
			MaxRetries: maxRetries,
		},
	}, nil
}

// Ensure unused import is used
var _ = time.Second
"#;

fn input<'a>(fields: &'a [FieldInfo], embedded: &'a [EmbeddedStructInfo]) -> RenderInput<'a> {
    RenderInput {
        package: "example",
        type_name: "config",
        fields,
        embedded,
    }
}

// ============================================================================
// Full output
// ============================================================================

#[test]
fn render_source___fields_and_embedded___matches_canonical_layout() {
    let fields = config_fields();
    let embedded = vec![embedded_defaults()];

    let code = render_source(&input(&fields, &embedded));

    assert_eq!(code, EXPECTED_WITH_EMBEDDED);
}

#[test]
fn render_source___same_input___identical_output() {
    let fields = config_fields();
    let embedded = vec![embedded_defaults()];

    let first = render_source(&input(&fields, &embedded));
    let second = render_source(&input(&fields, &embedded));

    assert_eq!(first, second);
}

#[test]
fn render___verbatim_formatter___returns_raw_text_without_warnings() {
    let fields = config_fields();

    let rendered = render(&input(&fields, &[]), &Verbatim);

    assert_eq!(rendered.value, render_source(&input(&fields, &[])));
    assert!(rendered.warnings.is_empty());
}

struct Rejecting;

impl SourceFormatter for Rejecting {
    fn format(&self, _source: &str) -> Result<String, FormatError> {
        Err(FormatError::Rejected("1:1: expected 'package'".to_string()))
    }
}

#[test]
fn render___formatter_failure___raw_text_with_warning() {
    let fields = config_fields();

    let rendered = render(&input(&fields, &[]), &Rejecting);

    assert!(rendered.value.starts_with(HEADER));
    assert_eq!(
        rendered.warnings,
        vec![Warning::FormatFailed {
            reason: "1:1: expected 'package'".to_string()
        }]
    );
}

// ============================================================================
// Imports
// ============================================================================

#[test]
fn render_source___no_duration___no_time_import_or_trailer() {
    let fields = vec![field("port", "int", "")];

    let code = render_source(&input(&fields, &[]));

    assert!(code.contains("import (\n\t\"github.com/spf13/pflag\"\n)\n"));
    assert!(!code.contains("time"));
}

#[test]
fn render_source___skipped_duration___still_imports_time() {
    let fields = vec![skipped(field("timeout", "time.Duration", ""))];

    let code = render_source(&input(&fields, &[]));

    assert!(code.contains("\t\"time\"\n"));
    assert!(code.contains("func loadConfig(flags *pflag.FlagSet, timeout time.Duration)"));
    assert!(code.ends_with("var _ = time.Second\n"));
}

#[test]
fn render_source___embedded_duration___imports_time() {
    let mut embedded = embedded_defaults();
    embedded.fields.push(field("Backoff", "time.Duration", ""));

    let code = render_source(&input(&[], &[embedded]));

    assert!(code.contains("\t\"time\"\n"));
}

#[test]
fn render_source___alias_differs_from_path___explicit_import_name() {
    let mut embedded = embedded_defaults();
    embedded.pkg_alias = "opts".to_string();

    let code = render_source(&input(&[], &[embedded]));

    assert!(code.contains("\n\topts \"github.com/example/pkg/types\"\n"));
    assert!(code.contains("EmbeddedDefaults: opts.EmbeddedDefaults{"));
}

#[test]
fn render_source___same_package_twice___imported_once() {
    let mut second = embedded_defaults();
    second.type_name = "LimitOptions".to_string();
    second.fields = vec![field("Burst", "int", "")];

    let code = render_source(&input(&[], &[embedded_defaults(), second]));

    assert_eq!(code.matches("\"github.com/example/pkg/types\"").count(), 1);
    assert!(code.contains("flagLimitBurstDefaultValue = \"limit-burst-default-value\""));
}

// ============================================================================
// Skip law and defaults
// ============================================================================

#[test]
fn render_source___skipped_field___only_parameter_and_literal() {
    let fields = config_fields();

    let code = render_source(&input(&fields, &[]));

    assert!(!code.contains("flagVersion"));
    assert!(!code.contains("GetString(flagVersion"));
    assert!(code.contains("(flags *pflag.FlagSet, version string) (*config, error)"));
    assert!(code.contains("\t\tversion: version,\n"));
}

#[test]
fn render_source___skipped_embedded_field___left_out_entirely() {
    let embedded = embedded_defaults();

    let code = render_source(&input(&[], &[embedded]));

    assert!(!code.contains("Secret"));
}

#[test]
fn render_source___missing_defaults___zero_literals_per_kind() {
    let fields = vec![
        field("name", "string", ""),
        field("enabled", "bool", ""),
        field("count", "uint64", ""),
        field("ratio", "float32", ""),
        field("hosts", "[]string", ""),
        field("handler", "unknown", ""),
    ];

    let code = render_source(&input(&fields, &[]));

    assert!(code.contains("flags.String(flagName, \"\", \"\")"));
    assert!(code.contains("flags.Bool(flagEnabled, false, \"\")"));
    assert!(code.contains("flags.Uint(flagCount, 0, \"\")"));
    assert!(code.contains("flags.Float64(flagRatio, 0.0, \"\")"));
    assert!(code.contains("flags.StringSlice(flagHosts, nil, \"\")"));
    assert!(code.contains("flags.String(flagHandler, \"\", \"\")"));
    assert!(code.contains("handler, err := flags.GetString(flagHandler)"));
}

#[test]
fn render_source___default_reference___registered_and_loaded_through_same_constant() {
    let fields = config_fields();

    let code = render_source(&input(&fields, &[]));

    assert!(code.contains("flags.Int(flagPort, defaultConfig.port, \"\")"));
    assert!(code.contains("port, err := flags.GetInt(flagPort)"));
    assert!(code.contains("\t\tport:    port,\n"));
}

#[test]
fn render_source___embedded_field_without_comment___fallback_usage() {
    let mut embedded = embedded_defaults();
    embedded.fields = vec![with_default(
        field("EnableFeature", "bool", ""),
        "defaultConfig.EnableFeature",
    )];

    let code = render_source(&input(&[], &[embedded]));

    assert!(code.contains(
        "flags.Bool(flagEmbeddedEnableFeatureDefaultValue, defaultConfig.EnableFeature, \"set enable-feature default value\")"
    ));
    assert!(code.contains("enableFeature, err := flags.GetBool(flagEmbeddedEnableFeatureDefaultValue)"));
}

#[test]
fn render_source___no_flags___empty_const_block() {
    let fields = vec![skipped(field("version", "string", ""))];

    let code = render_source(&input(&fields, &[]));

    assert!(code.contains("const ()\n"));
}

#[test]
fn render_source___exported_type___function_names_capitalized() {
    let fields = vec![field("Addr", "string", "")];
    let input = RenderInput {
        package: "server",
        type_name: "Options",
        fields: &fields,
        embedded: &[],
    };

    let code = render_source(&input);

    assert!(code.contains("func withOptionsFlags(flags *pflag.FlagSet) {"));
    assert!(code.contains("func loadOptions(flags *pflag.FlagSet) (*Options, error) {"));
    assert!(code.contains("\treturn &Options{\n"));
}

// ============================================================================
// Quoting
// ============================================================================

#[test]
fn go_quote___escapes_quotes_backslashes_and_controls() {
    assert_eq!(go_quote("plain text"), "\"plain text\"");
    assert_eq!(go_quote("say \"hi\""), "\"say \\\"hi\\\"\"");
    assert_eq!(go_quote("C:\\path"), "\"C:\\\\path\"");
    assert_eq!(go_quote("a\tb"), "\"a\\tb\"");
    assert_eq!(go_quote("\u{1}"), "\"\\x01\"");
}

#[test]
fn go_quote___keeps_printable_unicode() {
    assert_eq!(go_quote("größe ✓"), "\"größe ✓\"");
}

#[test_case('\u{7f}', "\\x7f" ; "delete")]
#[test_case('\u{85}', "\\u0085" ; "c1 control")]
#[test_case('\u{ad}', "\\u00ad" ; "soft hyphen")]
#[test_case('\u{200b}', "\\u200b" ; "zero width space")]
#[test_case('\u{feff}', "\\ufeff" ; "byte order mark")]
#[test_case('\u{2028}', "\\u2028" ; "line separator")]
#[test_case('\u{2029}', "\\u2029" ; "paragraph separator")]
#[test_case('\u{a0}', "\\u00a0" ; "no break space")]
#[test_case('\u{3000}', "\\u3000" ; "ideographic space")]
#[test_case('\u{e000}', "\\ue000" ; "private use")]
#[test_case('\u{f0000}', "\\U000f0000" ; "supplementary private use")]
fn go_quote___non_printable___escaped_like_strconv(c: char, escape: &str) {
    assert_eq!(go_quote(&format!("a{c}b")), format!("\"a{escape}b\""));
}

#[test]
fn go_quote___supplementary_printable___kept() {
    assert_eq!(go_quote("ok \u{1f600}"), "\"ok \u{1f600}\"");
}

// ============================================================================
// Alignment
// ============================================================================

#[test_case(&[4, 5, 6], &[0..3] ; "short keys")]
#[test_case(&[4, 50], &[0..1, 1..2] ; "long key after short")]
#[test_case(&[50, 4], &[0..1, 1..2] ; "short key after long")]
#[test_case(&[45, 50, 48], &[0..3] ; "similar long keys")]
#[test_case(&[30, 32, 41], &[0..3] ; "long key within ratio")]
#[test_case(&[10, 12, 41], &[0..2, 2..3] ; "long key beyond ratio")]
#[test_case(&[], &[] ; "empty")]
fn alignment_sections___key_sizes(sizes: &[usize], expected: &[Range<usize>]) {
    assert_eq!(alignment_sections(sizes), expected);
}

#[test]
fn push_keyed_run___long_key___aligned_separately() {
    let long_key = "ThisIsAnExtremelyLongFieldNameThatGoesOnAndOnForever";
    let rows = vec![
        ("port".to_string(), "port".to_string()),
        ("host".to_string(), "host".to_string()),
        (long_key.to_string(), "value".to_string()),
    ];

    let mut code = String::new();
    push_keyed_run(&mut code, "\t\t", &rows);

    assert_eq!(
        code,
        format!("\t\tport: port,\n\t\thost: host,\n\t\t{long_key}: value,\n")
    );
}

#[test]
fn push_const_run___long_name___still_aligned() {
    let long_name = "flagThisIsAnExtremelyLongConstantNameForAnEmbeddedField";
    let rows = vec![
        ("flagPort".to_string(), "\"port\"".to_string()),
        (long_name.to_string(), "\"x\"".to_string()),
    ];

    let mut code = String::new();
    push_const_run(&mut code, &rows);

    let padding = " ".repeat(long_name.len() - "flagPort".len());
    assert_eq!(
        code,
        format!("\tflagPort{padding} = \"port\"\n\t{long_name} = \"x\"\n")
    );
}
