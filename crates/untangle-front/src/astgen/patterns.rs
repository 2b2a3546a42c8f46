//! CST to AST lowering for binding patterns.

use tree_sitter::Node;
use untangle_ast::{Expr, ObjectPatProp, Pat, PropKey};

use super::context::LoweringCtx;
use super::expressions::{lower_expr, lower_list_with_holes};
use super::helpers::{first_named, named_children};
use super::literals::lower_prop_key;

/// Lower a CST pattern node to an AST Pat.
pub fn lower_pattern(ctx: &LoweringCtx, node: Node) -> Pat {
    match node.kind() {
        "identifier" | "undefined" | "shorthand_property_identifier_pattern" => {
            Pat::ident(ctx.node_text(&node))
        }
        "object_pattern" => {
            let props: Option<Vec<_>> = named_children(node)
                .into_iter()
                .map(|child| lower_object_pattern_prop(ctx, child))
                .collect();
            match props {
                Some(props) => Pat::Object(props),
                None => raw_pattern(ctx, node),
            }
        }
        "array_pattern" => Pat::Array(lower_list_with_holes(ctx, node, lower_pattern)),
        "assignment_pattern" => {
            let (Some(left), Some(right)) = (
                node.child_by_field_name("left"),
                node.child_by_field_name("right"),
            ) else {
                return raw_pattern(ctx, node);
            };
            Pat::Assign {
                left: Box::new(lower_pattern(ctx, left)),
                right: Box::new(lower_expr(ctx, right)),
            }
        }
        "rest_pattern" => match first_named(node) {
            Some(inner) => Pat::Rest(Box::new(lower_pattern(ctx, inner))),
            None => raw_pattern(ctx, node),
        },
        _ => Pat::Expr(Box::new(lower_expr(ctx, node))),
    }
}

fn lower_object_pattern_prop(ctx: &LoweringCtx, node: Node) -> Option<ObjectPatProp> {
    let prop = match node.kind() {
        "pair_pattern" => {
            let key = node.child_by_field_name("key")?;
            let value = node.child_by_field_name("value")?;
            ObjectPatProp::KeyValue {
                key: lower_prop_key(ctx, key),
                value: lower_pattern(ctx, value),
                shorthand: false,
            }
        }
        "shorthand_property_identifier_pattern" => {
            let name = ctx.node_text(&node);
            ObjectPatProp::KeyValue {
                key: PropKey::Ident(name.to_owned()),
                value: Pat::ident(name),
                shorthand: true,
            }
        }
        "object_assignment_pattern" => {
            let left = node.child_by_field_name("left")?;
            let right = node.child_by_field_name("right")?;
            let name = ctx.node_text(&left);
            ObjectPatProp::KeyValue {
                key: PropKey::Ident(name.to_owned()),
                value: Pat::Assign {
                    left: Box::new(lower_pattern(ctx, left)),
                    right: Box::new(lower_expr(ctx, right)),
                },
                shorthand: true,
            }
        }
        "rest_pattern" => ObjectPatProp::Rest(lower_pattern(ctx, first_named(node)?)),
        _ => return None,
    };
    Some(prop)
}

fn raw_pattern(ctx: &LoweringCtx, node: Node) -> Pat {
    Pat::Expr(Box::new(Expr::Raw(ctx.node_text(&node).to_owned())))
}
