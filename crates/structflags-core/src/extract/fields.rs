//! Field extraction for a named struct type.

use crate::model::FieldInfo;
use structflags_syntax::ast::{CommentGroup, Expr, File, FuncDecl, StructType, TypeSpec};
use structflags_syntax::visit::Visit;

/// Tag text marking a field as excluded from flags.
const SKIP_TAG: &str = "pflags:\"-\"";

/// Finds the first struct type declared under a given name.
struct StructFinder<'a, 'ast> {
    name: &'a str,
    found: Option<&'ast StructType>,
}

impl<'ast> Visit<'ast> for StructFinder<'_, 'ast> {
    fn visit_type_spec(&mut self, spec: &'ast TypeSpec) {
        if self.found.is_some() || spec.name.name != self.name {
            return;
        }
        if let Expr::StructType(st) = &spec.ty {
            self.found = Some(st);
        }
    }

    fn visit_func_decl(&mut self, _decl: &'ast FuncDecl) {}
}

/// Locate the struct type named `name`, first declaration wins.
pub fn find_struct<'ast>(file: &'ast File, name: &str) -> Option<&'ast StructType> {
    let mut finder = StructFinder { name, found: None };
    finder.visit_file(file);
    finder.found
}

/// Fields declared directly on `type_name`, or `None` if no such struct
/// exists in `file`.
pub fn extract_fields(file: &File, type_name: &str) -> Option<Vec<FieldInfo>> {
    find_struct(file, type_name).map(struct_fields)
}

/// Named fields of a struct type in declaration order. Embedded fields are
/// left out; `a, b int` yields one entry per name.
pub fn struct_fields(st: &StructType) -> Vec<FieldInfo> {
    let mut fields = Vec::new();
    for field in &st.fields {
        let tag = type_tag(&field.ty);
        let skip = field
            .tag
            .as_ref()
            .is_some_and(|lit| lit.value.contains(SKIP_TAG));
        let comment = field
            .doc
            .as_ref()
            .or(field.comment.as_ref())
            .map(comment_text)
            .unwrap_or_default();

        for name in &field.names {
            fields.push(FieldInfo {
                name: name.name.clone(),
                type_tag: tag.clone(),
                comment: comment.clone(),
                skip,
                default_ref: None,
            });
        }
    }
    fields
}

/// Textual form of a field type: identifiers, qualified names, slices,
/// arrays and pointers are spelled out, anything else is `unknown`.
pub fn type_tag(expr: &Expr) -> String {
    match expr {
        Expr::Ident(ident) => ident.name.clone(),
        Expr::Selector { x, sel } => format!("{}.{}", type_tag(x), sel.name),
        Expr::ArrayType { elt, .. } => format!("[]{}", type_tag(elt)),
        Expr::Star(x) => format!("*{}", type_tag(x)),
        _ => "unknown".to_string(),
    }
}

/// First line of a comment group without comment markers.
fn comment_text(group: &CommentGroup) -> String {
    let Some(first) = group.list.first() else {
        return String::new();
    };

    let text = first.text.trim();
    let text = if let Some(rest) = text.strip_prefix("//") {
        rest
    } else if let Some(rest) = text.strip_prefix("/*") {
        rest.strip_suffix("*/").unwrap_or(rest)
    } else {
        text
    };

    let line = text.trim().lines().next().unwrap_or_default();
    line.trim().trim_matches('"').to_string()
}
