//! Syntax tree traversal.
//!
//! Each `visit_*` method defaults to the matching `walk_*` function, which
//! visits the node's children. Override a method to act on a node kind; skip
//! the `walk_*` call to prune the subtree.
//!
//! ```
//! use structflags_syntax::ast::TypeSpec;
//! use structflags_syntax::visit::{self, Visit};
//!
//! struct TypeNames(Vec<String>);
//!
//! impl<'ast> Visit<'ast> for TypeNames {
//!     fn visit_type_spec(&mut self, spec: &'ast TypeSpec) {
//!         self.0.push(spec.name.name.clone());
//!         visit::walk_type_spec(self, spec);
//!     }
//! }
//!
//! let file = structflags_syntax::parse_file("package p\ntype a int\ntype b struct{}\n").unwrap();
//! let mut names = TypeNames(Vec::new());
//! names.visit_file(&file);
//! assert_eq!(names.0, vec!["a", "b"]);
//! ```

use crate::ast::{
    CompositeLit, Decl, Expr, Field, File, FuncDecl, FuncType, GenDecl, ImportSpec, Spec,
    StructType, TypeSpec, ValueSpec,
};

pub trait Visit<'ast> {
    fn visit_file(&mut self, file: &'ast File) {
        walk_file(self, file);
    }

    fn visit_decl(&mut self, decl: &'ast Decl) {
        walk_decl(self, decl);
    }

    fn visit_gen_decl(&mut self, decl: &'ast GenDecl) {
        walk_gen_decl(self, decl);
    }

    fn visit_func_decl(&mut self, decl: &'ast FuncDecl) {
        walk_func_decl(self, decl);
    }

    fn visit_spec(&mut self, spec: &'ast Spec) {
        walk_spec(self, spec);
    }

    fn visit_import_spec(&mut self, _spec: &'ast ImportSpec) {}

    fn visit_value_spec(&mut self, spec: &'ast ValueSpec) {
        walk_value_spec(self, spec);
    }

    fn visit_type_spec(&mut self, spec: &'ast TypeSpec) {
        walk_type_spec(self, spec);
    }

    fn visit_field(&mut self, field: &'ast Field) {
        walk_field(self, field);
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        walk_expr(self, expr);
    }

    fn visit_struct_type(&mut self, ty: &'ast StructType) {
        walk_struct_type(self, ty);
    }

    fn visit_func_type(&mut self, ty: &'ast FuncType) {
        walk_func_type(self, ty);
    }

    fn visit_composite_lit(&mut self, lit: &'ast CompositeLit) {
        walk_composite_lit(self, lit);
    }
}

pub fn walk_file<'ast, V: Visit<'ast> + ?Sized>(v: &mut V, file: &'ast File) {
    for decl in &file.decls {
        v.visit_decl(decl);
    }
}

pub fn walk_decl<'ast, V: Visit<'ast> + ?Sized>(v: &mut V, decl: &'ast Decl) {
    match decl {
        Decl::Gen(gen_decl) => v.visit_gen_decl(gen_decl),
        Decl::Func(func_decl) => v.visit_func_decl(func_decl),
    }
}

pub fn walk_gen_decl<'ast, V: Visit<'ast> + ?Sized>(v: &mut V, decl: &'ast GenDecl) {
    for spec in &decl.specs {
        v.visit_spec(spec);
    }
}

pub fn walk_func_decl<'ast, V: Visit<'ast> + ?Sized>(v: &mut V, decl: &'ast FuncDecl) {
    for field in decl.receiver.iter().flatten() {
        v.visit_field(field);
    }
}

pub fn walk_spec<'ast, V: Visit<'ast> + ?Sized>(v: &mut V, spec: &'ast Spec) {
    match spec {
        Spec::Import(import) => v.visit_import_spec(import),
        Spec::Value(value) => v.visit_value_spec(value),
        Spec::Type(ty) => v.visit_type_spec(ty),
    }
}

pub fn walk_value_spec<'ast, V: Visit<'ast> + ?Sized>(v: &mut V, spec: &'ast ValueSpec) {
    if let Some(ty) = &spec.ty {
        v.visit_expr(ty);
    }
    for value in &spec.values {
        v.visit_expr(value);
    }
}

pub fn walk_type_spec<'ast, V: Visit<'ast> + ?Sized>(v: &mut V, spec: &'ast TypeSpec) {
    for param in &spec.type_params {
        v.visit_field(param);
    }
    v.visit_expr(&spec.ty);
}

pub fn walk_field<'ast, V: Visit<'ast> + ?Sized>(v: &mut V, field: &'ast Field) {
    v.visit_expr(&field.ty);
}

pub fn walk_struct_type<'ast, V: Visit<'ast> + ?Sized>(v: &mut V, ty: &'ast StructType) {
    for field in &ty.fields {
        v.visit_field(field);
    }
}

pub fn walk_func_type<'ast, V: Visit<'ast> + ?Sized>(v: &mut V, ty: &'ast FuncType) {
    for field in ty.params.iter().chain(&ty.results) {
        v.visit_field(field);
    }
}

pub fn walk_composite_lit<'ast, V: Visit<'ast> + ?Sized>(v: &mut V, lit: &'ast CompositeLit) {
    if let Some(ty) = &lit.ty {
        v.visit_expr(ty);
    }
    for element in &lit.elements {
        v.visit_expr(element);
    }
}

pub fn walk_expr<'ast, V: Visit<'ast> + ?Sized>(v: &mut V, expr: &'ast Expr) {
    match expr {
        Expr::Ident(_) | Expr::BasicLit(_) | Expr::InterfaceType { .. } => {}
        Expr::CompositeLit(lit) => v.visit_composite_lit(lit),
        Expr::FuncLit(ty) | Expr::FuncType(ty) => v.visit_func_type(ty),
        Expr::Paren(x) | Expr::Star(x) => v.visit_expr(x),
        Expr::Ellipsis(x) => {
            if let Some(x) = x {
                v.visit_expr(x);
            }
        }
        Expr::Selector { x, .. } | Expr::Unary { x, .. } => v.visit_expr(x),
        Expr::Index { x, indices } => {
            v.visit_expr(x);
            for index in indices {
                v.visit_expr(index);
            }
        }
        Expr::Slice { x, low, high, max } => {
            v.visit_expr(x);
            for bound in [low, high, max].into_iter().flatten() {
                v.visit_expr(bound);
            }
        }
        Expr::TypeAssert { x, ty } => {
            v.visit_expr(x);
            if let Some(ty) = ty {
                v.visit_expr(ty);
            }
        }
        Expr::Call { fun, args, .. } => {
            v.visit_expr(fun);
            for arg in args {
                v.visit_expr(arg);
            }
        }
        Expr::Binary { x, y, .. } => {
            v.visit_expr(x);
            v.visit_expr(y);
        }
        Expr::KeyValue { key, value } => {
            v.visit_expr(key);
            v.visit_expr(value);
        }
        Expr::ArrayType { len, elt } => {
            if let Some(len) = len {
                v.visit_expr(len);
            }
            v.visit_expr(elt);
        }
        Expr::StructType(ty) => v.visit_struct_type(ty),
        Expr::MapType { key, value } => {
            v.visit_expr(key);
            v.visit_expr(value);
        }
        Expr::ChanType { value, .. } => v.visit_expr(value),
    }
}
