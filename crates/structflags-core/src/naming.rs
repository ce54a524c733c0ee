//! Naming conventions for generated Go identifiers and flag names.
//!
//! # Conventions
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `logFile` | [`camel_to_kebab`] | `log-file` |
//! | `config` | [`defaults_var_name`] | `defaultConfig` |
//! | `logFile` | [`flag_const_name`] | `flagLogFile` |
//! | `FeatureDefaults`, `enable` | [`embedded_flag_const_name`] | `flagFeatureEnableDefaultValue` |
//! | `FeatureDefaults`, `enable` | [`embedded_flag_name`] | `feature-enable-default-value` |
//! | `config` | [`register_fn_name`] | `withConfigFlags` |
//! | `config` | [`load_fn_name`] | `loadConfig` |

/// Suffixes removed from an embedded type name to form its flag prefix,
/// applied in this order, each at most once.
const EMBEDDED_SUFFIXES: &[&str] = &["Defaults", "Options", "Config"];

/// Capitalize the first letter of a string.
///
/// # Examples
///
/// ```
/// use structflags_core::naming::capitalize;
///
/// assert_eq!(capitalize("config"), "Config");
/// assert_eq!(capitalize("logFile"), "LogFile");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Lowercase the first letter of a string.
///
/// # Examples
///
/// ```
/// use structflags_core::naming::lower_first;
///
/// assert_eq!(lower_first("EnableFeature"), "enableFeature");
/// assert_eq!(lower_first("x"), "x");
/// ```
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Convert camelCase to kebab-case.
///
/// A dash precedes every uppercase letter except the first character, and
/// all letters are lowercased. Acronyms are not collapsed.
///
/// # Examples
///
/// ```
/// use structflags_core::naming::camel_to_kebab;
///
/// assert_eq!(camel_to_kebab("logFile"), "log-file");
/// assert_eq!(camel_to_kebab("HTTPPort"), "h-t-t-p-port");
/// assert_eq!(camel_to_kebab("debug"), "debug");
/// ```
pub fn camel_to_kebab(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && c.is_uppercase() {
            result.push('-');
        }
        result.extend(c.to_lowercase());
    }
    result
}

/// Name of the package-level variable holding defaults for `type_name`.
pub fn defaults_var_name(type_name: &str) -> String {
    format!("default{}", capitalize(type_name))
}

/// Flag prefix for an embedded type: its name without a trailing
/// `Defaults`, `Options` or `Config`.
///
/// # Examples
///
/// ```
/// use structflags_core::naming::embedded_prefix;
///
/// assert_eq!(embedded_prefix("FeatureDefaults"), "Feature");
/// assert_eq!(embedded_prefix("ServerOptions"), "Server");
/// assert_eq!(embedded_prefix("Limits"), "Limits");
/// ```
pub fn embedded_prefix(type_name: &str) -> &str {
    EMBEDDED_SUFFIXES
        .iter()
        .fold(type_name, |name, suffix| name.strip_suffix(suffix).unwrap_or(name))
}

/// Constant holding the flag name of an own field.
pub fn flag_const_name(field: &str) -> String {
    format!("flag{}", capitalize(field))
}

/// Constant holding the flag name of a field of an embedded type.
pub fn embedded_flag_const_name(type_name: &str, field: &str) -> String {
    format!(
        "flag{}{}DefaultValue",
        embedded_prefix(type_name),
        capitalize(field)
    )
}

/// Command-line flag name of a field of an embedded type.
pub fn embedded_flag_name(type_name: &str, field: &str) -> String {
    format!(
        "{}-{}-default-value",
        camel_to_kebab(embedded_prefix(type_name)),
        camel_to_kebab(field)
    )
}

/// Package name implied by an import path: its last segment.
///
/// # Examples
///
/// ```
/// use structflags_core::naming::package_base_name;
///
/// assert_eq!(package_base_name("github.com/example/pkg/types"), "types");
/// assert_eq!(package_base_name("time"), "time");
/// ```
pub fn package_base_name(import_path: &str) -> &str {
    import_path.rsplit('/').next().unwrap_or(import_path)
}

/// Name of the generated registration function.
pub fn register_fn_name(type_name: &str) -> String {
    format!("with{}Flags", capitalize(type_name))
}

/// Name of the generated loading function.
pub fn load_fn_name(type_name: &str) -> String {
    format!("load{}", capitalize(type_name))
}
