#![allow(non_snake_case)]

use super::*;
use crate::format::Verbatim;
use crate::resolver::MapResolver;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CONFIG_GO: &str = r#"//go:generate struct-to-pflags -file=config.go -struct=config -output=config.gen.go

package example

import (
	"time"

	"github.com/example/pkg/types"
)

type config struct {
	// path to file where logs will be written
	logFile string
	// enable debug mode
	debug bool
	// port number to listen on
	port int
	// how long to wait for a response
	timeout time.Duration
	// internal version field
	version string `pflags:"-"`
	types.EmbeddedDefaults
}

var defaultConfig = config{
	logFile: "/var/log/app.log",
	debug:   false,
	port:    8080,
	version: "v1.0.0",
}
"#;

const TYPES_GO: &str = r#"package types

type EmbeddedDefaults struct {
	// maximum retries
	MaxRetries int
	EnableCache bool
}
"#;

struct Workspace {
    dir: TempDir,
    types_dir: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let types_dir = dir.path().join("types");
        fs::create_dir_all(&types_dir).unwrap();
        fs::write(types_dir.join("types.go"), TYPES_GO).unwrap();
        fs::write(dir.path().join("config.go"), CONFIG_GO).unwrap();
        Self { dir, types_dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn generator(&self) -> Generator {
        Generator::new(
            MapResolver::new().with_package("github.com/example/pkg/types", &self.types_dir),
            Verbatim,
        )
    }

    fn config(&self) -> GeneratorConfig {
        GeneratorConfig::new(self.path("config.go"), "config")
    }
}

#[test]
fn generate___config_fixture___registers_every_active_field() {
    let ws = Workspace::new();

    let code = ws.generator().generate(&ws.config()).unwrap();

    assert!(code.contains(
        "flags.String(flagLogFile, defaultConfig.logFile, \"path to file where logs will be written\")"
    ));
    assert!(code.contains("flags.Bool(flagDebug, defaultConfig.debug, \"enable debug mode\")"));
    assert!(code.contains("flags.Int(flagPort, defaultConfig.port, \"port number to listen on\")"));
    assert!(code.contains("flags.Duration(flagTimeout, 0, \"how long to wait for a response\")"));
    assert!(!code.contains("flagVersion"));
}

#[test]
fn generate___defaults_round_trip___each_registered_flag_is_loaded_back() {
    let ws = Workspace::new();

    let code = ws.generator().generate(&ws.config()).unwrap();

    for (constant, getter, local) in [
        ("flagLogFile", "GetString", "logFile"),
        ("flagDebug", "GetBool", "debug"),
        ("flagPort", "GetInt", "port"),
        ("flagTimeout", "GetDuration", "timeout"),
        ("flagEmbeddedMaxRetriesDefaultValue", "GetInt", "maxRetries"),
        ("flagEmbeddedEnableCacheDefaultValue", "GetBool", "enableCache"),
    ] {
        assert!(
            code.contains(&format!("\t{local}, err := flags.{getter}({constant})\n")),
            "missing getter for {constant}"
        );
        assert_eq!(code.matches(&format!("({constant}, ")).count(), 1);
    }
}

#[test]
fn generate___embedded_type___resolved_through_resolver() {
    let ws = Workspace::new();

    let generated = ws.generator().generate_diagnosed(&ws.config()).unwrap();

    assert!(generated.warnings.is_empty());
    assert!(generated.value.contains("\n\t\"github.com/example/pkg/types\"\n"));
    assert!(generated.value.contains(
        "flags.Bool(flagEmbeddedEnableCacheDefaultValue, defaultConfig.EnableCache, \"set enable-cache default value\")"
    ));
    assert!(generated.value.contains("EmbeddedDefaults: types.EmbeddedDefaults{"));
}

#[test]
fn generate___unresolvable_embedding___warning_and_output_without_it() {
    let ws = Workspace::new();
    let generator = Generator::new(MapResolver::new(), Verbatim);

    let generated = generator.generate_diagnosed(&ws.config()).unwrap();

    assert_eq!(generated.warnings.len(), 1);
    assert!(matches!(
        generated.warnings[0],
        Warning::UnresolvedPackage { .. }
    ));
    assert!(!generated.value.contains("EmbeddedDefaults"));
}

#[test]
fn generate___local_generic_embedding___warning_not_parse_error() {
    let ws = Workspace::new();
    fs::write(
        ws.path("generic.go"),
        "package example\n\ntype Base[T any] struct{ v T }\n\ntype config struct {\n\tBase[int]\n\t// service name\n\tname string\n}\n",
    )
    .unwrap();
    let config = GeneratorConfig::new(ws.path("generic.go"), "config");

    let generated = ws.generator().generate_diagnosed(&config).unwrap();

    assert_eq!(
        generated.warnings,
        vec![Warning::UnsupportedEmbedding {
            type_text: "Base[int]".to_string(),
        }]
    );
    assert!(generated.value.contains("flags.String(flagName, \"\", \"service name\")"));
}

#[test]
fn generate___byte_order_mark___source_accepted() {
    let ws = Workspace::new();
    fs::write(ws.path("bom.go"), format!("\u{feff}{CONFIG_GO}")).unwrap();
    let config = GeneratorConfig::new(ws.path("bom.go"), "config");

    let with_bom = ws.generator().generate(&config).unwrap();
    let without_bom = ws.generator().generate(&ws.config()).unwrap();

    assert_eq!(with_bom, without_bom);
}

#[test]
fn generate___repeated_runs___identical_output() {
    let ws = Workspace::new();
    let generator = ws.generator();

    let first = generator.generate(&ws.config()).unwrap();
    let second = generator.generate(&ws.config()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn generate___package_override___replaces_package_clause() {
    let ws = Workspace::new();

    let code = ws
        .generator()
        .generate(&ws.config().with_package("flags"))
        .unwrap();

    assert!(code.contains("\npackage flags\n"));
}

#[test]
fn generate___no_override___uses_source_package() {
    let ws = Workspace::new();

    let code = ws.generator().generate(&ws.config()).unwrap();

    assert!(code.contains("\npackage example\n"));
}

#[test]
fn generate___missing_type___type_not_found_error() {
    let ws = Workspace::new();
    let config = GeneratorConfig::new(ws.path("config.go"), "server");

    let err = ws.generator().generate(&config).unwrap_err();

    assert!(matches!(err, GeneratorError::TypeNotFound { ref name, .. } if name == "server"));
}

#[test]
fn generate___missing_source___read_error_names_file() {
    let ws = Workspace::new();
    let config = GeneratorConfig::new(ws.path("absent.go"), "config");

    let err = ws.generator().generate(&config).unwrap_err();

    assert!(matches!(err, GeneratorError::ReadSource { .. }));
    assert!(err.to_string().contains("absent.go"));
}

#[test]
fn generate___invalid_source___parse_error_names_file() {
    let ws = Workspace::new();
    fs::write(ws.path("broken.go"), "package example\n\ntype config struct {\n").unwrap();
    let config = GeneratorConfig::new(ws.path("broken.go"), "config");

    let err = ws.generator().generate(&config).unwrap_err();

    assert!(matches!(err, GeneratorError::Parse { .. }));
    assert!(err.to_string().contains("broken.go"));
}

#[test]
fn write___output_file___writes_code_verbatim() {
    let ws = Workspace::new();
    let config = ws.config().with_output(ws.path("config.gen.go"));
    let generator = ws.generator();

    generator.run(&config).unwrap();

    let written = fs::read_to_string(ws.path("config.gen.go")).unwrap();
    assert_eq!(written, generator.generate(&config).unwrap());
}

#[test]
fn write___unwritable_output___write_error() {
    let ws = Workspace::new();
    let config = ws.config().with_output(ws.path("missing-dir/config.gen.go"));

    let err = ws.generator().run(&config).unwrap_err();

    assert!(matches!(err, GeneratorError::WriteOutput { .. }));
}

#[test]
fn from_config___empty_gofmt___formats_verbatim() {
    let ws = Workspace::new();
    let mut tool_config = ToolConfig::default();
    tool_config.tools.gofmt = String::new();
    tool_config.tools.go = "definitely-not-go".to_string();

    let generated = Generator::from_config(&tool_config)
        .generate_diagnosed(&ws.config())
        .unwrap();

    // Only the package lookup fails; formatting is skipped entirely.
    assert_eq!(generated.warnings.len(), 1);
    assert!(matches!(
        generated.warnings[0],
        Warning::UnresolvedPackage { .. }
    ));
}

#[test]
fn source_dir___relative_file___resolved_from_its_directory() {
    let config = GeneratorConfig::new(Path::new("svc").join("config.go"), "config");

    assert_eq!(config.source_dir(), Path::new("svc"));
}
