//! Go source rendering for flag registration and loading.
//!
//! The rendered file contains, in order: the generated-code header and
//! package clause, the import block, one constant per flag name, the
//! `with<Type>Flags` registration function, the `load<Type>` function and,
//! when `time` is imported, a trailer keeping that import used.
//!
//! Constant runs and keyed literal runs are aligned the way `gofmt` aligns
//! them, so the raw text is already canonical for ordinary inputs.

use crate::error::Warning;
use crate::format::SourceFormatter;
use crate::model::{Diagnosed, EmbeddedStructInfo, FieldInfo};
use crate::naming::{
    camel_to_kebab, embedded_flag_const_name, embedded_flag_name, flag_const_name, load_fn_name,
    lower_first, package_base_name, register_fn_name,
};
use regex::Regex;
use std::collections::HashSet;
use std::ops::Range;
use std::sync::LazyLock;

/// First line of every generated file.
pub const HEADER: &str = "// Code generated by struct-to-pflags; DO NOT EDIT.";

const PFLAG_IMPORT: &str = "github.com/spf13/pflag";

/// Everything the renderer needs for one output file.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub package: &'a str,
    pub type_name: &'a str,
    pub fields: &'a [FieldInfo],
    pub embedded: &'a [EmbeddedStructInfo],
}

impl RenderInput<'_> {
    fn needs_time(&self) -> bool {
        self.fields
            .iter()
            .chain(self.embedded.iter().flat_map(|e| &e.fields))
            .any(|f| f.kind().needs_time_import())
    }
}

/// Render and canonicalize. A formatter failure is reported as a warning
/// and the unformatted text is returned.
pub fn render(input: &RenderInput<'_>, formatter: &dyn SourceFormatter) -> Diagnosed<String> {
    let raw = render_source(input);
    match formatter.format(&raw) {
        Ok(formatted) => Diagnosed::clean(formatted),
        Err(err) => Diagnosed::new(
            raw,
            vec![Warning::FormatFailed {
                reason: err.to_string(),
            }],
        ),
    }
}

/// Render without formatting.
pub fn render_source(input: &RenderInput<'_>) -> String {
    let needs_time = input.needs_time();
    let mut code = String::new();

    code.push_str(HEADER);
    code.push_str("\n\n");
    code.push_str(&format!("package {}\n\n", input.package));

    push_imports(&mut code, input, needs_time);
    push_consts(&mut code, input);
    push_register_fn(&mut code, input);
    code.push('\n');
    push_load_fn(&mut code, input);

    if needs_time {
        code.push_str("\n// Ensure unused import is used\n");
        code.push_str("var _ = time.Second\n");
    }

    code
}

fn push_imports(code: &mut String, input: &RenderInput<'_>, needs_time: bool) {
    code.push_str("import (\n");
    if needs_time {
        code.push_str("\t\"time\"\n\n");
    }
    code.push_str(&format!("\t\"{PFLAG_IMPORT}\"\n"));

    let mut seen = HashSet::new();
    for embedded in input.embedded {
        if !seen.insert(embedded.pkg_path.as_str()) {
            continue;
        }
        if package_base_name(&embedded.pkg_path) == embedded.pkg_alias {
            code.push_str(&format!("\n\t\"{}\"\n", embedded.pkg_path));
        } else {
            code.push_str(&format!(
                "\n\t{} \"{}\"\n",
                embedded.pkg_alias, embedded.pkg_path
            ));
        }
    }
    code.push_str(")\n\n");
}

fn push_consts(code: &mut String, input: &RenderInput<'_>) {
    let own: Vec<_> = active(input.fields)
        .map(|f| (flag_const_name(&f.name), go_quote(&camel_to_kebab(&f.name))))
        .collect();

    if own.is_empty() && input.embedded.is_empty() {
        code.push_str("const ()\n\n");
        return;
    }

    code.push_str("const (\n");
    push_const_run(code, &own);
    for embedded in input.embedded {
        code.push_str(&format!("\n\t// {} flags\n", embedded.type_name));
        let rows: Vec<_> = active(&embedded.fields)
            .map(|f| {
                (
                    embedded_flag_const_name(&embedded.type_name, &f.name),
                    go_quote(&embedded_flag_name(&embedded.type_name, &f.name)),
                )
            })
            .collect();
        push_const_run(code, &rows);
    }
    code.push_str(")\n\n");
}

fn push_register_fn(code: &mut String, input: &RenderInput<'_>) {
    code.push_str(&format!(
        "func {}(flags *pflag.FlagSet) {{\n",
        register_fn_name(input.type_name)
    ));

    for field in active(input.fields) {
        push_register_call(code, field, &flag_const_name(&field.name), &field.comment);
    }

    for embedded in input.embedded {
        code.push_str(&format!("\n\t// {} flags\n", embedded.type_name));
        for field in active(&embedded.fields) {
            let usage = if field.comment.is_empty() {
                format!("set {} default value", camel_to_kebab(&field.name))
            } else {
                field.comment.clone()
            };
            let constant = embedded_flag_const_name(&embedded.type_name, &field.name);
            push_register_call(code, field, &constant, &usage);
        }
    }

    code.push_str("}\n");
}

fn push_register_call(code: &mut String, field: &FieldInfo, constant: &str, usage: &str) {
    code.push_str(&format!(
        "\tflags.{}({}, {}, {})\n",
        field.kind().accessor(),
        constant,
        field.default_expr(),
        go_quote(usage)
    ));
}

fn push_load_fn(code: &mut String, input: &RenderInput<'_>) {
    code.push_str(&format!(
        "func {}(flags *pflag.FlagSet",
        load_fn_name(input.type_name)
    ));
    for field in input.fields.iter().filter(|f| f.skip) {
        code.push_str(&format!(", {} {}", field.name, field.type_tag));
    }
    code.push_str(&format!(") (*{}, error) {{\n", input.type_name));

    for field in active(input.fields) {
        push_getter(code, &field.name, field, &flag_const_name(&field.name));
    }

    for embedded in input.embedded {
        code.push_str(&format!("\t// {}\n", embedded.type_name));
        for field in active(&embedded.fields) {
            let constant = embedded_flag_const_name(&embedded.type_name, &field.name);
            push_getter(code, &lower_first(&field.name), field, &constant);
        }
    }

    code.push_str(&format!("\treturn &{}{{\n", input.type_name));
    let own: Vec<_> = input
        .fields
        .iter()
        .map(|f| (f.name.clone(), f.name.clone()))
        .collect();
    push_keyed_run(code, "\t\t", &own);

    for embedded in input.embedded {
        code.push_str(&format!(
            "\t\t{}: {}.{}{{\n",
            embedded.type_name, embedded.pkg_alias, embedded.type_name
        ));
        let rows: Vec<_> = active(&embedded.fields)
            .map(|f| (f.name.clone(), lower_first(&f.name)))
            .collect();
        push_keyed_run(code, "\t\t\t", &rows);
        code.push_str("\t\t},\n");
    }

    code.push_str("\t}, nil\n");
    code.push_str("}\n");
}

fn push_getter(code: &mut String, local: &str, field: &FieldInfo, constant: &str) {
    code.push_str(&format!(
        "\t{local}, err := flags.{}({constant})\n",
        field.kind().getter()
    ));
    code.push_str("\tif err != nil {\n");
    code.push_str("\t\treturn nil, err\n");
    code.push_str("\t}\n\n");
}

fn active(fields: &[FieldInfo]) -> impl Iterator<Item = &FieldInfo> {
    fields.iter().filter(|f| !f.skip)
}

/// `name = value` lines with the `=` signs in one column. gofmt aligns
/// every spec of a const group, however long the names get.
fn push_const_run(code: &mut String, rows: &[(String, String)]) {
    let width = rows
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0);
    for (name, value) in rows {
        code.push_str(&format!("\t{name:<width$} = {value}\n"));
    }
}

/// `key: value,` lines with the values in one column, split into separately
/// aligned sections where gofmt would break the alignment.
fn push_keyed_run(code: &mut String, indent: &str, rows: &[(String, String)]) {
    let sizes: Vec<usize> = rows.iter().map(|(key, _)| key.len()).collect();
    for section in alignment_sections(&sizes) {
        let rows = &rows[section];
        let width = rows
            .iter()
            .map(|(key, _)| key.chars().count() + 1)
            .max()
            .unwrap_or(0);
        for (key, value) in rows {
            let key = format!("{key}:");
            code.push_str(&format!("{indent}{key:<width$} {value},\n"));
        }
    }
}

/// Two adjacent keys up to this length never break alignment.
const SMALL_KEY: usize = 40;

/// Size ratio against the running geometric mean that breaks alignment.
const KEY_RATIO: f64 = 2.5;

/// Ranges of consecutive keyed elements gofmt aligns together. A new section
/// starts at a key when it or the previous key is longer than [`SMALL_KEY`]
/// and its size is off the geometric mean of all earlier keys by a factor
/// of [`KEY_RATIO`] or more.
fn alignment_sections(key_sizes: &[usize]) -> Vec<Range<usize>> {
    let mut sections = Vec::new();
    let mut start = 0;
    let mut ln_sum = 0.0;
    for (i, &size) in key_sizes.iter().enumerate() {
        let size = size.max(1);
        if i > 0 {
            let prev = key_sizes[i - 1];
            if prev > SMALL_KEY || size > SMALL_KEY {
                let geomean = (ln_sum / i as f64).exp();
                let ratio = size as f64 / geomean;
                if KEY_RATIO * ratio <= 1.0 || KEY_RATIO <= ratio {
                    sections.push(start..i);
                    start = i;
                }
            }
        }
        ln_sum += (size as f64).ln();
    }
    if start < key_sizes.len() {
        sections.push(start..key_sizes.len());
    }
    sections
}

/// Characters Go's `strconv.IsPrint` accepts: letters, marks, numbers,
/// punctuation, symbols and the ASCII space.
#[allow(clippy::expect_used)]
static PRINTABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}\p{M}\p{N}\p{P}\p{S} ]$").expect("invalid printable regex")
});

fn is_printable(c: char) -> bool {
    let mut buf = [0; 4];
    PRINTABLE.is_match(c.encode_utf8(&mut buf))
}

/// Quote `s` as a Go interpreted string literal, escaping exactly what
/// `strconv.Quote` escapes.
pub fn go_quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            '\u{07}' => quoted.push_str("\\a"),
            '\u{08}' => quoted.push_str("\\b"),
            '\u{0c}' => quoted.push_str("\\f"),
            '\u{0b}' => quoted.push_str("\\v"),
            c if c.is_ascii_control() => quoted.push_str(&format!("\\x{:02x}", c as u32)),
            c if c.is_ascii() || is_printable(c) => quoted.push(c),
            c if (c as u32) < 0x10000 => quoted.push_str(&format!("\\u{:04x}", c as u32)),
            c => quoted.push_str(&format!("\\U{:08x}", c as u32)),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
#[path = "render/render_tests.rs"]
mod render_tests;
