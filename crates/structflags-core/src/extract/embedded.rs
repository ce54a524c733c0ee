//! Resolution of struct types embedded from other packages.

use super::fields::{find_struct, struct_fields, type_tag};
use crate::error::Warning;
use crate::model::{Diagnosed, EmbeddedStructInfo, FieldInfo};
use crate::naming::{defaults_var_name, package_base_name};
use crate::resolver::PackageResolver;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use structflags_syntax::ast::{Expr, File};
use structflags_syntax::parse_file;

/// Resolve every struct embedded in `type_name` through a package qualifier.
///
/// Each resolved field's default points at the host's defaults variable,
/// e.g. `defaultConfig.MaxRetries`. Embeddings that cannot be resolved are
/// reported as warnings and left out.
pub fn resolve_embedded(
    file: &File,
    type_name: &str,
    source_dir: &Path,
    resolver: &dyn PackageResolver,
) -> Diagnosed<Vec<EmbeddedStructInfo>> {
    let Some(st) = find_struct(file, type_name) else {
        return Diagnosed::clean(Vec::new());
    };

    let imports = import_aliases(file);
    let defaults_var = defaults_var_name(type_name);
    let mut embedded = Vec::new();
    let mut warnings = Vec::new();

    for field in st.fields.iter().filter(|f| f.names.is_empty()) {
        let (alias, foreign_type) = match &field.ty {
            Expr::Selector { x, sel } => match x.as_ref() {
                Expr::Ident(alias) => (alias.name.as_str(), sel.name.as_str()),
                _ => {
                    warnings.push(Warning::UnsupportedEmbedding {
                        type_text: embedded_type_text(&field.ty),
                    });
                    continue;
                }
            },
            other => {
                warnings.push(Warning::UnsupportedEmbedding {
                    type_text: embedded_type_text(other),
                });
                continue;
            }
        };

        let Some(pkg_path) = imports.get(alias) else {
            warnings.push(Warning::UnmappedAlias {
                alias: alias.to_string(),
            });
            continue;
        };

        let dir = match resolver.package_dir(pkg_path, source_dir) {
            Ok(dir) => dir,
            Err(err) => {
                warnings.push(Warning::UnresolvedPackage {
                    import_path: pkg_path.clone(),
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let fields = match load_package_struct(&dir, foreign_type) {
            Ok(Some(fields)) => fields,
            Ok(None) => {
                warnings.push(Warning::EmbeddedTypeNotFound {
                    type_name: foreign_type.to_string(),
                    dir,
                });
                continue;
            }
            Err(reason) => {
                warnings.push(Warning::UnparsablePackage { dir, reason });
                continue;
            }
        };

        let fields = fields
            .into_iter()
            .map(|field| FieldInfo {
                default_ref: Some(format!("{defaults_var}.{}", field.name)),
                ..field
            })
            .collect();

        embedded.push(EmbeddedStructInfo {
            type_name: foreign_type.to_string(),
            pkg_alias: alias.to_string(),
            pkg_path: pkg_path.clone(),
            dir,
            fields,
        });
    }

    Diagnosed::new(embedded, warnings)
}

/// Spelling of an embedded type for warnings; generic instantiations keep
/// their type arguments.
fn embedded_type_text(expr: &Expr) -> String {
    match expr {
        Expr::Index { x, indices } => {
            let args: Vec<String> = indices.iter().map(embedded_type_text).collect();
            format!("{}[{}]", embedded_type_text(x), args.join(", "))
        }
        Expr::Star(x) => format!("*{}", embedded_type_text(x)),
        other => type_tag(other),
    }
}

/// Package qualifier to import path: the explicit name when given, else the
/// last path segment.
fn import_aliases(file: &File) -> HashMap<&str, String> {
    file.imports()
        .map(|import| {
            let alias = match &import.name {
                Some(name) => name.name.as_str(),
                None => package_base_name(&import.path),
            };
            (alias, import.path.clone())
        })
        .collect()
}

/// Parse the non-test Go files of `dir` in file-name order and extract the
/// fields of `type_name` from the first file declaring it.
fn load_package_struct(dir: &Path, type_name: &str) -> Result<Option<Vec<FieldInfo>>, String> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| e.to_string())?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_package_source(path))
        .collect();
    paths.sort();

    let mut files = Vec::with_capacity(paths.len());
    for path in &paths {
        let source = fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
        let file = parse_file(&source).map_err(|e| format!("{}:{e}", path.display()))?;
        files.push(file);
    }

    Ok(files
        .iter()
        .find_map(|file| find_struct(file, type_name))
        .map(struct_fields))
}

fn is_package_source(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.ends_with(".go") && !name.ends_with("_test.go"))
}
