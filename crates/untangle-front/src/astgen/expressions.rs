//! CST to AST lowering for expressions.

use tree_sitter::Node;
use untangle_ast::{
    Arrow, ArrowBody, AssignOp, AssignTarget, BinaryOp, CallExpr, Class, ClassMember, Expr,
    Function, Ident, Lit, MemberExpr, MemberProp, MethodKind, MethodProp, Pat, Prop, PropKey,
    UnaryOp, UpdateOp,
};

use super::context::LoweringCtx;
use super::helpers::{children, first_named, has_token, has_token_before, named_children};
use super::literals::{lower_number, lower_prop_key, lower_string, lower_template};
use super::patterns::lower_pattern;
use super::statements::lower_stmt_list;

/// Lower a CST expression node to an AST Expr.
///
/// Node kinds without a counterpart in the tree become [`Expr::Raw`].
pub fn lower_expr(ctx: &LoweringCtx, node: Node) -> Expr {
    let lowered = match node.kind() {
        // === Literals ===
        "true" => Some(Expr::Lit(Lit::Bool(true))),
        "false" => Some(Expr::Lit(Lit::Bool(false))),
        "null" => Some(Expr::Lit(Lit::Null)),
        "number" => Some(Expr::Lit(lower_number(ctx, node))),
        "string" => Some(Expr::Lit(Lit::Str(lower_string(ctx, node)))),
        "regex" => Some(Expr::Lit(Lit::Regex(ctx.node_text(&node).to_owned()))),
        "template_string" => Some(Expr::Template(lower_template(ctx, node))),

        // === Identifiers ===
        "identifier" | "undefined" => Some(Expr::ident(ctx.node_text(&node))),
        "this" => Some(Expr::This),
        "super" => Some(Expr::Super),

        // === Compound literals ===
        "array" => Some(Expr::Array(lower_list_with_holes(ctx, node, lower_expr))),
        "object" => lower_object(ctx, node),

        // === Functions and classes ===
        "function_expression" | "function" | "generator_function" => {
            lower_function(ctx, node).map(|f| Expr::Function(Box::new(f)))
        }
        "arrow_function" => lower_arrow(ctx, node),
        "class" => lower_class(ctx, node).map(|c| Expr::Class(Box::new(c))),

        // === Operators ===
        "parenthesized_expression" => {
            first_named(node).map(|inner| Expr::Paren(Box::new(lower_expr(ctx, inner))))
        }
        "sequence_expression" => {
            let mut exprs = Vec::new();
            flatten_sequence(ctx, node, &mut exprs);
            Some(Expr::Seq(exprs))
        }
        "unary_expression" => lower_unary(ctx, node),
        "update_expression" => lower_update(ctx, node),
        "binary_expression" => lower_binary(ctx, node),
        "assignment_expression" | "augmented_assignment_expression" => lower_assign(ctx, node),
        "ternary_expression" => lower_ternary(ctx, node),
        "spread_element" => {
            first_named(node).map(|arg| Expr::Spread(Box::new(lower_expr(ctx, arg))))
        }
        "await_expression" => {
            first_named(node).map(|arg| Expr::Await(Box::new(lower_expr(ctx, arg))))
        }
        "yield_expression" => Some(Expr::Yield {
            arg: first_named(node).map(|arg| Box::new(lower_expr(ctx, arg))),
            delegate: has_token(node, "*"),
        }),

        // === Calls and members ===
        "call_expression" => lower_call(ctx, node),
        "new_expression" => lower_new(ctx, node),
        "member_expression" => lower_member(ctx, node),
        "subscript_expression" => lower_subscript(ctx, node),

        _ => None,
    };
    lowered.unwrap_or_else(|| Expr::Raw(ctx.node_text(&node).to_owned()))
}

/// Lower the inside of a syntactic `( … )` such as an `if` condition.
pub fn lower_paren_inner(ctx: &LoweringCtx, node: Node) -> Expr {
    if node.kind() == "parenthesized_expression" {
        if let Some(inner) = first_named(node) {
            return lower_expr(ctx, inner);
        }
    }
    lower_expr(ctx, node)
}

fn flatten_sequence(ctx: &LoweringCtx, node: Node, out: &mut Vec<Expr>) {
    for child in named_children(node) {
        if child.kind() == "sequence_expression" {
            flatten_sequence(ctx, child, out);
        } else {
            out.push(lower_expr(ctx, child));
        }
    }
}

/// Lower `[a, , b]`-style lists, keeping holes as `None`.
pub fn lower_list_with_holes<T>(
    ctx: &LoweringCtx,
    node: Node,
    lower: impl Fn(&LoweringCtx<'_>, Node<'_>) -> T,
) -> Vec<Option<T>> {
    let mut elems = Vec::new();
    let mut seen_elem = false;
    for child in children(node) {
        match child.kind() {
            "[" | "]" => {}
            "," => {
                if !seen_elem {
                    elems.push(None);
                }
                seen_elem = false;
            }
            _ => {
                elems.push(Some(lower(ctx, child)));
                seen_elem = true;
            }
        }
    }
    elems
}

fn lower_object(ctx: &LoweringCtx, node: Node) -> Option<Expr> {
    let mut props = Vec::new();
    for child in named_children(node) {
        let prop = match child.kind() {
            "pair" => {
                let key = child.child_by_field_name("key")?;
                let value = child.child_by_field_name("value")?;
                Prop::KeyValue {
                    key: lower_prop_key(ctx, key),
                    value: lower_expr(ctx, value),
                    shorthand: false,
                }
            }
            "shorthand_property_identifier" => {
                let name = ctx.node_text(&child);
                Prop::KeyValue {
                    key: PropKey::Ident(name.to_owned()),
                    value: Expr::ident(name),
                    shorthand: true,
                }
            }
            "method_definition" => Prop::Method(lower_method(ctx, child)?.1),
            "spread_element" => Prop::Spread(lower_expr(ctx, first_named(child)?)),
            _ => return None,
        };
        props.push(prop);
    }
    Some(Expr::Object(props))
}

/// Lower a `method_definition`, returning whether it is `static`.
pub fn lower_method(ctx: &LoweringCtx, node: Node) -> Option<(bool, MethodProp)> {
    let name = node.child_by_field_name("name")?;
    let body = node.child_by_field_name("body")?;
    let params = node.child_by_field_name("parameters")?;

    let mut is_static = false;
    let mut is_async = false;
    let mut is_generator = false;
    let mut kind = MethodKind::Method;
    for child in children(node) {
        if child.id() == name.id() {
            break;
        }
        match child.kind() {
            "decorator" => return None,
            "static" => is_static = true,
            "static get" => {
                is_static = true;
                kind = MethodKind::Get;
            }
            "async" => is_async = true,
            "get" => kind = MethodKind::Get,
            "set" => kind = MethodKind::Set,
            "*" => is_generator = true,
            _ => {}
        }
    }

    let function = Function {
        name: None,
        params: lower_params(ctx, params),
        body: lower_stmt_list(ctx, body),
        is_async,
        is_generator,
    };
    Some((
        is_static,
        MethodProp {
            kind,
            key: lower_prop_key(ctx, name),
            function,
        },
    ))
}

pub fn lower_params(ctx: &LoweringCtx, node: Node) -> Vec<Pat> {
    named_children(node)
        .into_iter()
        .map(|param| lower_pattern(ctx, param))
        .collect()
}

/// Lower function expressions and declarations.
pub fn lower_function(ctx: &LoweringCtx, node: Node) -> Option<Function> {
    let body = node.child_by_field_name("body")?;
    let params = node.child_by_field_name("parameters")?;
    Some(Function {
        name: node
            .child_by_field_name("name")
            .map(|name| Ident::new(ctx.node_text(&name))),
        params: lower_params(ctx, params),
        body: lower_stmt_list(ctx, body),
        is_async: has_token_before(node, "async", Some(params)),
        is_generator: node.kind().starts_with("generator")
            || has_token_before(node, "*", Some(params)),
    })
}

fn lower_arrow(ctx: &LoweringCtx, node: Node) -> Option<Expr> {
    let params = match (
        node.child_by_field_name("parameter"),
        node.child_by_field_name("parameters"),
    ) {
        (Some(param), _) => vec![lower_pattern(ctx, param)],
        (None, Some(params)) => lower_params(ctx, params),
        (None, None) => return None,
    };
    let body = node.child_by_field_name("body")?;
    let body = if body.kind() == "statement_block" {
        ArrowBody::Block(lower_stmt_list(ctx, body))
    } else {
        ArrowBody::Expr(Box::new(lower_expr(ctx, body)))
    };
    Some(Expr::Arrow(Box::new(Arrow {
        params,
        body,
        is_async: has_token(node, "async"),
    })))
}

/// Lower class expressions and declarations. Decorated classes are left to
/// the caller as raw text.
pub fn lower_class(ctx: &LoweringCtx, node: Node) -> Option<Class> {
    let mut super_class = None;
    for child in named_children(node) {
        match child.kind() {
            "decorator" => return None,
            "class_heritage" => {
                let base = first_named(child)?;
                super_class = Some(Box::new(lower_expr(ctx, base)));
            }
            _ => {}
        }
    }

    let body = node.child_by_field_name("body")?;
    let mut members = Vec::new();
    for member in named_children(body) {
        match member.kind() {
            "method_definition" => {
                let (is_static, method) = lower_method(ctx, member)?;
                members.push(ClassMember::Method { is_static, method });
            }
            "field_definition" => {
                if named_children(member).iter().any(|c| c.kind() == "decorator") {
                    return None;
                }
                let key = member.child_by_field_name("property")?;
                members.push(ClassMember::Field {
                    is_static: has_token(member, "static"),
                    key: lower_prop_key(ctx, key),
                    value: member
                        .child_by_field_name("value")
                        .map(|value| lower_expr(ctx, value)),
                });
            }
            "class_static_block" => {
                let block = member.child_by_field_name("body")?;
                members.push(ClassMember::StaticBlock(lower_stmt_list(ctx, block)));
            }
            _ => return None,
        }
    }

    Some(Class {
        name: node
            .child_by_field_name("name")
            .map(|name| Ident::new(ctx.node_text(&name))),
        super_class,
        members,
    })
}

fn lower_unary(ctx: &LoweringCtx, node: Node) -> Option<Expr> {
    let op = UnaryOp::from_token(node.child_by_field_name("operator")?.kind())?;
    let arg = node.child_by_field_name("argument")?;
    Some(Expr::Unary {
        op,
        arg: Box::new(lower_expr(ctx, arg)),
    })
}

fn lower_update(ctx: &LoweringCtx, node: Node) -> Option<Expr> {
    let operator = node.child_by_field_name("operator")?;
    let arg = node.child_by_field_name("argument")?;
    let op = match operator.kind() {
        "++" => UpdateOp::Incr,
        "--" => UpdateOp::Decr,
        _ => return None,
    };
    Some(Expr::Update {
        op,
        prefix: operator.start_byte() < arg.start_byte(),
        arg: Box::new(lower_expr(ctx, arg)),
    })
}

/// Left-nested chains (`a + b + c + …`) are lowered along their left spine
/// in a loop, so long concatenations do not recurse once per operand.
fn lower_binary(ctx: &LoweringCtx, node: Node) -> Option<Expr> {
    let mut spine = vec![binary_parts(node)?];
    let mut leftmost = spine[0].1;
    while leftmost.kind() == "binary_expression" {
        let Some(parts) = binary_parts(leftmost) else {
            break;
        };
        leftmost = parts.1;
        spine.push(parts);
    }

    let mut expr = lower_expr(ctx, leftmost);
    for (op, _, right) in spine.into_iter().rev() {
        expr = Expr::Binary {
            op,
            left: Box::new(expr),
            right: Box::new(lower_expr(ctx, right)),
        };
    }
    Some(expr)
}

fn binary_parts(node: Node) -> Option<(BinaryOp, Node, Node)> {
    let op = BinaryOp::from_token(node.child_by_field_name("operator")?.kind())?;
    let left = node.child_by_field_name("left")?;
    let right = node.child_by_field_name("right")?;
    Some((op, left, right))
}

fn lower_assign(ctx: &LoweringCtx, node: Node) -> Option<Expr> {
    let op = match node.child_by_field_name("operator") {
        Some(operator) => AssignOp::from_token(operator.kind())?,
        None => AssignOp::Assign,
    };
    let left = node.child_by_field_name("left")?;
    let right = node.child_by_field_name("right")?;
    let target = match left.kind() {
        "object_pattern" | "array_pattern" => AssignTarget::Pat(lower_pattern(ctx, left)),
        _ => AssignTarget::Expr(Box::new(lower_expr(ctx, left))),
    };
    Some(Expr::Assign {
        op,
        target,
        value: Box::new(lower_expr(ctx, right)),
    })
}

fn lower_ternary(ctx: &LoweringCtx, node: Node) -> Option<Expr> {
    let test = node.child_by_field_name("condition")?;
    let cons = node.child_by_field_name("consequence")?;
    let alt = node.child_by_field_name("alternative")?;
    Some(Expr::Cond {
        test: Box::new(lower_expr(ctx, test)),
        cons: Box::new(lower_expr(ctx, cons)),
        alt: Box::new(lower_expr(ctx, alt)),
    })
}

fn lower_args(ctx: &LoweringCtx, node: Node) -> Vec<Expr> {
    named_children(node)
        .into_iter()
        .map(|arg| lower_expr(ctx, arg))
        .collect()
}

fn lower_call(ctx: &LoweringCtx, node: Node) -> Option<Expr> {
    let callee = node.child_by_field_name("function")?;
    let args = node.child_by_field_name("arguments")?;
    let callee = lower_expr(ctx, callee);

    if args.kind() == "template_string" {
        return Some(Expr::TaggedTemplate {
            tag: Box::new(callee),
            template: lower_template(ctx, args),
        });
    }
    Some(Expr::Call(CallExpr {
        callee: Box::new(callee),
        args: lower_args(ctx, args),
        optional: node.child_by_field_name("optional_chain").is_some(),
        comments: Vec::new(),
    }))
}

fn lower_new(ctx: &LoweringCtx, node: Node) -> Option<Expr> {
    let callee = node.child_by_field_name("constructor")?;
    let args = node
        .child_by_field_name("arguments")
        .map(|args| lower_args(ctx, args))
        .unwrap_or_default();
    Some(Expr::New {
        callee: Box::new(lower_expr(ctx, callee)),
        args,
    })
}

fn lower_member(ctx: &LoweringCtx, node: Node) -> Option<Expr> {
    let object = node.child_by_field_name("object")?;
    let property = node.child_by_field_name("property")?;
    let name = ctx.node_text(&property).to_owned();
    let prop = match property.kind() {
        "private_property_identifier" => MemberProp::Private(name),
        _ => MemberProp::Ident(name),
    };
    Some(Expr::Member(MemberExpr {
        object: Box::new(lower_expr(ctx, object)),
        prop,
        optional: node.child_by_field_name("optional_chain").is_some(),
    }))
}

fn lower_subscript(ctx: &LoweringCtx, node: Node) -> Option<Expr> {
    let object = node.child_by_field_name("object")?;
    let index = node.child_by_field_name("index")?;
    Some(Expr::Member(MemberExpr {
        object: Box::new(lower_expr(ctx, object)),
        prop: MemberProp::Computed(Box::new(lower_expr(ctx, index))),
        optional: node.child_by_field_name("optional_chain").is_some(),
    }))
}
