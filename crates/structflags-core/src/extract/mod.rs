//! Extraction of fields, defaults and embedded types from parsed Go files.
//!
//! - [`extract_fields`] - fields declared directly on a struct type
//! - [`extract_defaults`] - keyed initializers of `var default<Type> = <Type>{...}`
//! - [`resolve_embedded`] - fields of struct types embedded from other packages
//!
//! Extraction never logs; non-fatal problems are returned as warnings.

mod defaults;
mod embedded;
mod fields;

pub use defaults::extract_defaults;
pub use embedded::resolve_embedded;
pub use fields::extract_fields;
