//! Default-value references from the `default<Type>` convention.

use crate::naming::defaults_var_name;
use std::collections::HashMap;
use structflags_syntax::ast::{DeclKeyword, Expr, File, FuncDecl, GenDecl, ValueSpec};
use structflags_syntax::visit::{self, Visit};

struct DefaultsFinder<'a, 'ast> {
    var_name: &'a str,
    found: Option<Option<&'ast Expr>>,
}

impl<'ast> Visit<'ast> for DefaultsFinder<'_, 'ast> {
    fn visit_gen_decl(&mut self, decl: &'ast GenDecl) {
        if decl.keyword == DeclKeyword::Var && self.found.is_none() {
            visit::walk_gen_decl(self, decl);
        }
    }

    fn visit_value_spec(&mut self, spec: &'ast ValueSpec) {
        if self.found.is_some() {
            return;
        }
        if let Some(i) = spec.names.iter().position(|n| n.name == self.var_name) {
            self.found = Some(spec.values.get(i));
        }
    }

    fn visit_func_decl(&mut self, _decl: &'ast FuncDecl) {}
}

/// Map each field keyed in `var default<Type> = <Type>{...}` to the
/// expression `default<Type>.<field>`.
///
/// A missing variable, or one initialized with anything other than a
/// composite literal (optionally behind `&`), yields an empty map.
pub fn extract_defaults(file: &File, type_name: &str) -> HashMap<String, String> {
    let var_name = defaults_var_name(type_name);
    let mut finder = DefaultsFinder {
        var_name: &var_name,
        found: None,
    };
    finder.visit_file(file);

    let Some(Some(init)) = finder.found else {
        return HashMap::new();
    };
    let init = match init {
        Expr::Unary { op, x } if op == "&" => x.as_ref(),
        other => other,
    };
    let Expr::CompositeLit(lit) = init else {
        return HashMap::new();
    };

    lit.elements
        .iter()
        .filter_map(|element| match element {
            Expr::KeyValue { key, .. } => match key.as_ref() {
                Expr::Ident(ident) => Some((
                    ident.name.clone(),
                    format!("{var_name}.{}", ident.name),
                )),
                _ => None,
            },
            _ => None,
        })
        .collect()
}
