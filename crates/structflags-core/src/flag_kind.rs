//! Mapping from Go type tags to pflag accessor kinds.
//!
//! # Type Mappings
//!
//! | Go type tag | Kind | Register | Get | Zero |
//! |-------------|------|----------|-----|------|
//! | `string` | String | `String` | `GetString` | `""` |
//! | `bool` | Bool | `Bool` | `GetBool` | `false` |
//! | `int`, `int32`, `int64` | Int | `Int` | `GetInt` | `0` |
//! | `uint`, `uint32`, `uint64` | Uint | `Uint` | `GetUint` | `0` |
//! | `float32`, `float64` | Float64 | `Float64` | `GetFloat64` | `0.0` |
//! | `[]string` | StringSlice | `StringSlice` | `GetStringSlice` | `nil` |
//! | `time.Duration` | Duration | `Duration` | `GetDuration` | `0` |
//!
//! Tags are matched case-insensitively. Anything else is treated as a string.

/// Accessor family used for a field on a `pflag.FlagSet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    String,
    Bool,
    Int,
    Uint,
    Float64,
    StringSlice,
    Duration,
}

struct KindMapping {
    tags: &'static [&'static str],
    kind: FlagKind,
}

const KIND_MAPPINGS: &[KindMapping] = &[
    KindMapping {
        tags: &["string"],
        kind: FlagKind::String,
    },
    KindMapping {
        tags: &["bool"],
        kind: FlagKind::Bool,
    },
    KindMapping {
        tags: &["int", "int32", "int64"],
        kind: FlagKind::Int,
    },
    KindMapping {
        tags: &["uint", "uint32", "uint64"],
        kind: FlagKind::Uint,
    },
    KindMapping {
        tags: &["float32", "float64"],
        kind: FlagKind::Float64,
    },
    KindMapping {
        tags: &["[]string"],
        kind: FlagKind::StringSlice,
    },
    KindMapping {
        tags: &["time.Duration"],
        kind: FlagKind::Duration,
    },
];

impl FlagKind {
    /// Classify a type tag, falling back to [`FlagKind::String`].
    pub fn from_type_tag(tag: &str) -> Self {
        KIND_MAPPINGS
            .iter()
            .find(|m| m.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)))
            .map_or(FlagKind::String, |m| m.kind)
    }

    /// Registration method on `pflag.FlagSet`, e.g. `flags.Int(...)`.
    pub fn accessor(self) -> &'static str {
        match self {
            FlagKind::String => "String",
            FlagKind::Bool => "Bool",
            FlagKind::Int => "Int",
            FlagKind::Uint => "Uint",
            FlagKind::Float64 => "Float64",
            FlagKind::StringSlice => "StringSlice",
            FlagKind::Duration => "Duration",
        }
    }

    /// Retrieval method on `pflag.FlagSet`, e.g. `flags.GetInt(...)`.
    pub fn getter(self) -> String {
        format!("Get{}", self.accessor())
    }

    /// Go literal for the kind's zero value.
    pub fn zero_literal(self) -> &'static str {
        match self {
            FlagKind::String => "\"\"",
            FlagKind::Bool => "false",
            FlagKind::Int | FlagKind::Uint | FlagKind::Duration => "0",
            FlagKind::Float64 => "0.0",
            FlagKind::StringSlice => "nil",
        }
    }

    /// Whether generated code for this kind needs the `time` import.
    pub fn needs_time_import(self) -> bool {
        self == FlagKind::Duration
    }
}
