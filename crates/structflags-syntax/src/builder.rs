//! Lowering of the tree-sitter-go concrete syntax tree into [`crate::ast`].
//!
//! The tree is assumed to be error free; [`crate::parse_file`] rejects
//! trees containing `ERROR` or missing nodes before building.

use crate::ast::{
    BasicLit, ChanDir, Comment, CommentGroup, CompositeLit, Decl, DeclKeyword, Expr, Field, File,
    FuncDecl, FuncType, GenDecl, Ident, ImportSpec, LitKind, Pos, Spec, StructType, TypeSpec,
    ValueSpec,
};
use crate::error::{ParseError, ParseResult};
use std::collections::HashMap;
use tree_sitter::{Node, Point};

/// Build a [`File`] from the `source_file` root node.
pub fn build_file(root: Node<'_>, code: &str) -> ParseResult<File> {
    let builder = Builder::new(root, code);

    let mut package = None;
    let mut decls = Vec::new();
    for child in named_children(&root) {
        match child.kind() {
            "package_clause" if package.is_none() => package = Some(builder.package(&child)?),
            _ if package.is_none() => return Err(unexpected(&child, code, "'package'")),
            "import_declaration" => {
                decls.push(Decl::Gen(builder.gen_decl(&child, DeclKeyword::Import)?))
            }
            "const_declaration" => {
                decls.push(Decl::Gen(builder.gen_decl(&child, DeclKeyword::Const)?))
            }
            "type_declaration" => {
                decls.push(Decl::Gen(builder.gen_decl(&child, DeclKeyword::Type)?))
            }
            "var_declaration" => decls.push(Decl::Gen(builder.gen_decl(&child, DeclKeyword::Var)?)),
            "function_declaration" | "method_declaration" => {
                decls.push(Decl::Func(builder.func_decl(&child)?))
            }
            _ => return Err(unexpected(&child, code, "declaration")),
        }
    }

    let package = package.ok_or_else(|| {
        ParseError::new(
            point_pos(root.end_position()),
            "expected 'package', found EOF",
        )
    })?;

    Ok(File {
        package,
        decls,
        comments: builder.groups,
    })
}

/// Source text covered by `node`.
pub(crate) fn text<'a>(node: &Node<'_>, code: &'a str) -> &'a str {
    code.get(node.byte_range()).unwrap_or_default()
}

pub(crate) fn node_pos(node: &Node<'_>) -> Pos {
    point_pos(node.start_position())
}

/// The first whitespace-delimited word of `node`, for error messages.
pub(crate) fn first_word<'a>(node: &Node<'_>, code: &'a str) -> &'a str {
    text(node, code).split_whitespace().next().unwrap_or_default()
}

fn point_pos(point: Point) -> Pos {
    Pos::new(point.row as u32 + 1, point.column as u32 + 1)
}

fn end_line(node: &Node<'_>) -> u32 {
    node.end_position().row as u32 + 1
}

fn unexpected(node: &Node<'_>, code: &str, expected: &str) -> ParseError {
    ParseError::new(
        node_pos(node),
        format!("expected {expected}, found '{}'", first_word(node, code)),
    )
}

/// Named children other than comments.
fn named_children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect()
}

fn required<'t>(node: &Node<'t>, field: &str) -> ParseResult<Node<'t>> {
    node.child_by_field_name(field).ok_or_else(|| {
        ParseError::new(
            node_pos(node),
            format!("{} without {field}", node.kind().replace('_', " ")),
        )
    })
}

fn first_named<'t>(node: &Node<'t>) -> ParseResult<Node<'t>> {
    named_children(node).into_iter().next().ok_or_else(|| {
        ParseError::new(
            node_pos(node),
            format!("empty {}", node.kind().replace('_', " ")),
        )
    })
}

/// Extent of a real token, used to group comments.
struct TokenSpan {
    pos: Pos,
    end_line: u32,
}

/// Comment groups of the file plus the lookups used to attach them.
struct Builder<'a> {
    code: &'a str,
    groups: Vec<CommentGroup>,
    /// Non-trailing comment groups keyed by the line they end on.
    lead_by_end_line: HashMap<u32, usize>,
    /// Trailing comment groups keyed by the line they start on.
    trailing_by_line: HashMap<u32, usize>,
}

impl<'a> Builder<'a> {
    fn new(root: Node<'_>, code: &'a str) -> Self {
        let mut comments = Vec::new();
        let mut tokens = Vec::new();
        collect_leaves(root, code, &mut comments, &mut tokens);

        let (groups, trailing) = group_comments(&tokens, comments);
        let mut lead_by_end_line = HashMap::new();
        let mut trailing_by_line = HashMap::new();
        for (i, group) in groups.iter().enumerate() {
            if trailing[i] {
                trailing_by_line.insert(group.start_line(), i);
            } else {
                lead_by_end_line.insert(group.end_line(), i);
            }
        }

        Self {
            code,
            groups,
            lead_by_end_line,
            trailing_by_line,
        }
    }

    fn text(&self, node: &Node<'_>) -> &'a str {
        text(node, self.code)
    }

    fn ident(&self, node: &Node<'_>) -> Ident {
        Ident::new(self.text(node), node_pos(node))
    }

    fn doc_for(&self, line: u32) -> Option<CommentGroup> {
        let idx = self.lead_by_end_line.get(&line.checked_sub(1)?)?;
        self.groups.get(*idx).cloned()
    }

    /// Trailing group starting on the line where `node`'s last token ends.
    fn trailing_for(&self, node: &Node<'_>) -> Option<CommentGroup> {
        let mut cursor = node.walk();
        let last = node.children(&mut cursor).filter(|c| !c.is_extra()).last()?;
        let end = point_pos(last.end_position());

        let idx = self.trailing_by_line.get(&end.line)?;
        let group = self.groups.get(*idx)?;
        let first = group.list.first()?;
        (first.pos >= end).then(|| group.clone())
    }

    // ------------------------------------------------------------------
    // Declarations
    // ------------------------------------------------------------------

    fn package(&self, node: &Node<'_>) -> ParseResult<Ident> {
        Ok(self.ident(&first_named(node)?))
    }

    fn gen_decl(&self, node: &Node<'_>, keyword: DeclKeyword) -> ParseResult<GenDecl> {
        let pos = node_pos(node);

        // Grouped specs sit directly under the declaration or in a `*_list` node.
        let mut specs = Vec::new();
        for child in named_children(node) {
            if child.kind().ends_with("_list") {
                for spec in named_children(&child) {
                    specs.push(self.spec(&spec, keyword)?);
                }
            } else {
                specs.push(self.spec(&child, keyword)?);
            }
        }

        Ok(GenDecl {
            keyword,
            pos,
            doc: self.doc_for(pos.line),
            specs,
        })
    }

    fn spec(&self, node: &Node<'_>, keyword: DeclKeyword) -> ParseResult<Spec> {
        match (keyword, node.kind()) {
            (DeclKeyword::Import, "import_spec") => self.import_spec(node).map(Spec::Import),
            (DeclKeyword::Const, "const_spec") | (DeclKeyword::Var, "var_spec") => {
                self.value_spec(node).map(Spec::Value)
            }
            (DeclKeyword::Type, "type_spec" | "type_alias") => self.type_spec(node).map(Spec::Type),
            _ => Err(unexpected(node, self.code, "declaration spec")),
        }
    }

    fn import_spec(&self, node: &Node<'_>) -> ParseResult<ImportSpec> {
        let path = required(node, "path")?;
        Ok(ImportSpec {
            name: node.child_by_field_name("name").map(|n| self.ident(&n)),
            path: unquote(self.text(&path)),
            pos: node_pos(node),
        })
    }

    fn value_spec(&self, node: &Node<'_>) -> ParseResult<ValueSpec> {
        let mut cursor = node.walk();
        let names = node
            .children_by_field_name("name", &mut cursor)
            .map(|n| self.ident(&n))
            .collect();
        let ty = node
            .child_by_field_name("type")
            .map(|t| self.expr(&t))
            .transpose()?;
        let values = match node.child_by_field_name("value") {
            Some(list) => self.expr_list(&list)?,
            None => Vec::new(),
        };

        Ok(ValueSpec { names, ty, values })
    }

    fn type_spec(&self, node: &Node<'_>) -> ParseResult<TypeSpec> {
        let type_params = match node.child_by_field_name("type_parameters") {
            Some(list) => self.type_params(&list)?,
            None => Vec::new(),
        };

        Ok(TypeSpec {
            name: self.ident(&required(node, "name")?),
            type_params,
            is_alias: node.kind() == "type_alias",
            ty: self.expr(&required(node, "type")?)?,
        })
    }

    fn func_decl(&self, node: &Node<'_>) -> ParseResult<FuncDecl> {
        let receiver = node
            .child_by_field_name("receiver")
            .map(|list| self.params(&list))
            .transpose()?;

        Ok(FuncDecl {
            name: self.ident(&required(node, "name")?),
            receiver,
            has_body: node.child_by_field_name("body").is_some(),
        })
    }

    // ------------------------------------------------------------------
    // Fields and parameters
    // ------------------------------------------------------------------

    fn struct_type(&self, node: &Node<'_>) -> ParseResult<StructType> {
        let mut fields = Vec::new();
        for list in named_children(node) {
            for decl in named_children(&list) {
                fields.push(self.struct_field(&decl)?);
            }
        }

        Ok(StructType {
            fields,
            pos: node_pos(node),
        })
    }

    fn struct_field(&self, node: &Node<'_>) -> ParseResult<Field> {
        let mut cursor = node.walk();
        let names: Vec<Ident> = node
            .children_by_field_name("name", &mut cursor)
            .map(|n| self.ident(&n))
            .collect();

        let mut ty = self.expr(&required(node, "type")?)?;
        let mut cursor = node.walk();
        if names.is_empty() && node.children(&mut cursor).any(|c| c.kind() == "*") {
            ty = Expr::Star(Box::new(ty));
        }

        let tag = node.child_by_field_name("tag").map(|tag| BasicLit {
            kind: LitKind::String,
            value: self.text(&tag).to_string(),
            pos: node_pos(&tag),
        });

        Ok(Field {
            names,
            ty,
            tag,
            doc: self.doc_for(node_pos(node).line),
            comment: self.trailing_for(node),
        })
    }

    fn params(&self, node: &Node<'_>) -> ParseResult<Vec<Field>> {
        let mut fields = Vec::new();
        for param in named_children(node) {
            let mut cursor = param.walk();
            let names = param
                .children_by_field_name("name", &mut cursor)
                .map(|n| self.ident(&n))
                .collect();
            let ty = self.expr(&required(&param, "type")?)?;
            let ty = if param.kind() == "variadic_parameter_declaration" {
                Expr::Ellipsis(Some(Box::new(ty)))
            } else {
                ty
            };
            fields.push(bare_field(names, ty));
        }
        Ok(fields)
    }

    fn type_params(&self, node: &Node<'_>) -> ParseResult<Vec<Field>> {
        let mut fields = Vec::new();
        for param in named_children(node) {
            let mut cursor = param.walk();
            let names = param
                .children_by_field_name("name", &mut cursor)
                .map(|n| self.ident(&n))
                .collect();
            let constraint = self.expr(&required(&param, "type")?)?;
            fields.push(bare_field(names, constraint));
        }
        Ok(fields)
    }

    fn func_type(&self, node: &Node<'_>) -> ParseResult<FuncType> {
        let params = self.params(&required(node, "parameters")?)?;
        let results = match node.child_by_field_name("result") {
            Some(list) if list.kind() == "parameter_list" => self.params(&list)?,
            Some(single) => vec![bare_field(Vec::new(), self.expr(&single)?)],
            None => Vec::new(),
        };

        Ok(FuncType {
            params,
            results,
            pos: node_pos(node),
        })
    }

    // ------------------------------------------------------------------
    // Types and expressions
    // ------------------------------------------------------------------

    fn expr_list(&self, node: &Node<'_>) -> ParseResult<Vec<Expr>> {
        named_children(node).iter().map(|e| self.expr(e)).collect()
    }

    fn boxed(&self, node: &Node<'_>) -> ParseResult<Box<Expr>> {
        self.expr(node).map(Box::new)
    }

    fn boxed_field(&self, node: &Node<'_>, field: &str) -> ParseResult<Box<Expr>> {
        self.boxed(&required(node, field)?)
    }

    fn optional_field(&self, node: &Node<'_>, field: &str) -> ParseResult<Option<Box<Expr>>> {
        node.child_by_field_name(field)
            .map(|n| self.boxed(&n))
            .transpose()
    }

    fn literal(&self, node: &Node<'_>, kind: LitKind) -> Expr {
        Expr::BasicLit(BasicLit {
            kind,
            value: self.text(node).to_string(),
            pos: node_pos(node),
        })
    }

    fn expr(&self, node: &Node<'_>) -> ParseResult<Expr> {
        let expr = match node.kind() {
            "identifier" | "type_identifier" | "field_identifier" | "package_identifier"
            | "blank_identifier" | "true" | "false" | "nil" | "iota" => {
                Expr::Ident(self.ident(node))
            }
            "int_literal" => self.literal(node, LitKind::Int),
            "float_literal" => self.literal(node, LitKind::Float),
            "imaginary_literal" => self.literal(node, LitKind::Imag),
            "rune_literal" => self.literal(node, LitKind::Char),
            "interpreted_string_literal" | "raw_string_literal" => {
                self.literal(node, LitKind::String)
            }

            "qualified_type" => Expr::Selector {
                x: Box::new(Expr::Ident(self.ident(&required(node, "package")?))),
                sel: self.ident(&required(node, "name")?),
            },
            "pointer_type" => Expr::Star(self.boxed(&first_named(node)?)?),
            "slice_type" => Expr::ArrayType {
                len: None,
                elt: self.boxed_field(node, "element")?,
            },
            "array_type" => Expr::ArrayType {
                len: Some(self.boxed_field(node, "length")?),
                elt: self.boxed_field(node, "element")?,
            },
            "implicit_length_array_type" => Expr::ArrayType {
                len: Some(Box::new(Expr::Ellipsis(None))),
                elt: self.boxed_field(node, "element")?,
            },
            "map_type" => Expr::MapType {
                key: self.boxed_field(node, "key")?,
                value: self.boxed_field(node, "value")?,
            },
            "channel_type" => Expr::ChanType {
                dir: chan_dir(node),
                value: self.boxed_field(node, "value")?,
            },
            "function_type" => Expr::FuncType(Box::new(self.func_type(node)?)),
            "struct_type" => Expr::StructType(self.struct_type(node)?),
            "interface_type" => Expr::InterfaceType {
                pos: node_pos(node),
            },
            "generic_type" => Expr::Index {
                x: self.boxed_field(node, "type")?,
                indices: self.expr_list(&required(node, "type_arguments")?)?,
            },
            "parenthesized_type" | "parenthesized_expression" => {
                Expr::Paren(self.boxed(&first_named(node)?)?)
            }
            "negated_type" => Expr::Unary {
                op: "~".to_string(),
                x: self.boxed(&first_named(node)?)?,
            },
            "type_elem" | "type_constraint" => {
                let mut terms = named_children(node).into_iter();
                let first = terms.next().ok_or_else(|| {
                    ParseError::new(node_pos(node), "empty type constraint")
                })?;
                let mut union = self.expr(&first)?;
                for term in terms {
                    union = Expr::Binary {
                        op: "|".to_string(),
                        x: Box::new(union),
                        y: self.boxed(&term)?,
                    };
                }
                union
            }

            "composite_literal" => Expr::CompositeLit(CompositeLit {
                ty: Some(self.boxed_field(node, "type")?),
                elements: self.expr_list(&required(node, "body")?)?,
                pos: node_pos(node),
            }),
            "literal_value" => Expr::CompositeLit(CompositeLit {
                ty: None,
                elements: self.expr_list(node)?,
                pos: node_pos(node),
            }),
            "literal_element" | "variadic_argument" => self.expr(&first_named(node)?)?,
            "keyed_element" => {
                let (key, value) = match (
                    node.child_by_field_name("key"),
                    node.child_by_field_name("value"),
                ) {
                    (Some(key), Some(value)) => (key, value),
                    _ => match named_children(node).as_slice() {
                        [key, value] => (*key, *value),
                        _ => return Err(unexpected(node, self.code, "key: value")),
                    },
                };
                Expr::KeyValue {
                    key: self.boxed(&key)?,
                    value: self.boxed(&value)?,
                }
            }
            "func_literal" => Expr::FuncLit(Box::new(self.func_type(node)?)),

            "selector_expression" => Expr::Selector {
                x: self.boxed_field(node, "operand")?,
                sel: self.ident(&required(node, "field")?),
            },
            "index_expression" => Expr::Index {
                x: self.boxed_field(node, "operand")?,
                indices: vec![self.expr(&required(node, "index")?)?],
            },
            "type_instantiation_expression" => {
                let ty = required(node, "type")?;
                let indices = named_children(node)
                    .iter()
                    .filter(|arg| arg.id() != ty.id())
                    .map(|arg| self.expr(arg))
                    .collect::<ParseResult<_>>()?;
                Expr::Index {
                    x: self.boxed(&ty)?,
                    indices,
                }
            }
            "slice_expression" => Expr::Slice {
                x: self.boxed_field(node, "operand")?,
                low: self.optional_field(node, "start")?,
                high: self.optional_field(node, "end")?,
                max: self.optional_field(node, "capacity")?,
            },
            "type_assertion_expression" => Expr::TypeAssert {
                x: self.boxed_field(node, "operand")?,
                ty: Some(self.boxed_field(node, "type")?),
            },
            "call_expression" => self.call(node)?,
            "type_conversion_expression" => Expr::Call {
                fun: self.boxed_field(node, "type")?,
                args: vec![self.expr(&required(node, "operand")?)?],
                ellipsis: false,
            },
            "unary_expression" => {
                let op = self.text(&required(node, "operator")?);
                let x = self.boxed_field(node, "operand")?;
                if op == "*" {
                    Expr::Star(x)
                } else {
                    Expr::Unary {
                        op: op.to_string(),
                        x,
                    }
                }
            }
            "binary_expression" => Expr::Binary {
                op: self.text(&required(node, "operator")?).to_string(),
                x: self.boxed_field(node, "left")?,
                y: self.boxed_field(node, "right")?,
            },
            other => {
                return Err(ParseError::new(
                    node_pos(node),
                    format!("unsupported syntax: {}", other.replace('_', " ")),
                ));
            }
        };
        Ok(expr)
    }

    fn call(&self, node: &Node<'_>) -> ParseResult<Expr> {
        let mut fun = self.boxed_field(node, "function")?;
        if let Some(type_args) = node.child_by_field_name("type_arguments") {
            fun = Box::new(Expr::Index {
                x: fun,
                indices: self.expr_list(&type_args)?,
            });
        }

        let arguments = required(node, "arguments")?;
        let mut cursor = arguments.walk();
        let ellipsis = arguments.children(&mut cursor).any(|c| {
            c.kind() == "variadic_argument" || (!c.is_named() && c.kind() == "...")
        });

        Ok(Expr::Call {
            fun,
            args: self.expr_list(&arguments)?,
            ellipsis,
        })
    }
}

fn bare_field(names: Vec<Ident>, ty: Expr) -> Field {
    Field {
        names,
        ty,
        tag: None,
        doc: None,
        comment: None,
    }
}

fn chan_dir(node: &Node<'_>) -> ChanDir {
    let mut cursor = node.walk();
    let keywords: Vec<&str> = node
        .children(&mut cursor)
        .filter(|c| !c.is_named())
        .map(|c| c.kind())
        .collect();
    match keywords.as_slice() {
        ["<-", "chan", ..] => ChanDir::Recv,
        ["chan", "<-", ..] => ChanDir::Send,
        _ => ChanDir::Both,
    }
}

fn unquote(literal: &str) -> String {
    let mut chars = literal.chars();
    chars.next();
    chars.next_back();
    chars.as_str().to_string()
}

/// Collect comments and the extents of real tokens in source order.
/// Terminators inserted for newlines do not count as tokens.
fn collect_leaves(
    node: Node<'_>,
    code: &str,
    comments: &mut Vec<Comment>,
    tokens: &mut Vec<TokenSpan>,
) {
    if node.kind() == "comment" {
        comments.push(Comment {
            text: text(&node, code).trim_end().to_string(),
            pos: node_pos(&node),
            end_line: end_line(&node),
        });
        return;
    }

    if node.child_count() == 0 {
        if node.start_byte() < node.end_byte() && node.kind() != "\n" {
            tokens.push(TokenSpan {
                pos: node_pos(&node),
                end_line: end_line(&node),
            });
        }
        return;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_leaves(child, code, comments, tokens);
    }
}

/// Group comments the way Go does: a comment on the same line as a preceding
/// token starts a trailing group that only takes comments from that line;
/// otherwise adjacent comments with no token between them form one group.
fn group_comments(
    tokens: &[TokenSpan],
    comments: Vec<Comment>,
) -> (Vec<CommentGroup>, Vec<bool>) {
    let tokens_before = |pos: Pos| tokens.partition_point(|t| t.pos < pos);

    let mut groups: Vec<CommentGroup> = Vec::new();
    let mut trailing: Vec<bool> = Vec::new();
    for comment in comments {
        let before = tokens_before(comment.pos);
        if let (Some(group), Some(is_trailing)) = (groups.last_mut(), trailing.last()) {
            if let Some(last) = group.list.last() {
                let adjacent = comment.pos.line <= last.end_line + 1;
                let no_token_between = tokens_before(last.pos) == before;
                let same_line_if_trailing = !*is_trailing || comment.pos.line == last.end_line;
                if adjacent && no_token_between && same_line_if_trailing {
                    group.list.push(comment);
                    continue;
                }
            }
        }

        let is_trailing = before > 0
            && tokens
                .get(before - 1)
                .is_some_and(|t| t.end_line == comment.pos.line);
        groups.push(CommentGroup {
            list: vec![comment],
        });
        trailing.push(is_trailing);
    }

    (groups, trailing)
}
