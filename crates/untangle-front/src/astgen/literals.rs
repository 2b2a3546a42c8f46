//! CST to AST lowering for literals and property keys.

use tree_sitter::Node;
use untangle_ast::text::{parse_number, unescape_string};
use untangle_ast::{Expr, JsNum, JsStr, Lit, PropKey, Template};

use super::context::LoweringCtx;
use super::expressions::lower_expr;
use super::helpers::{first_named, named_children};

pub fn lower_number(ctx: &LoweringCtx, node: Node) -> Lit {
    let text = ctx.node_text(&node);
    if text.ends_with('n') {
        return Lit::BigInt(text.to_owned());
    }
    Lit::Num(JsNum {
        value: parse_number(text).unwrap_or(f64::NAN),
        raw: Some(text.to_owned()),
    })
}

pub fn lower_string(ctx: &LoweringCtx, node: Node) -> JsStr {
    let text = ctx.node_text(&node);
    let body = if text.len() >= 2 {
        &text[1..text.len() - 1]
    } else {
        ""
    };
    let (value, _) = unescape_string(body);
    JsStr {
        value,
        raw: Some(text.to_owned()),
    }
}

/// Quasis are cut from the source by byte range so escapes and line breaks
/// survive verbatim.
pub fn lower_template(ctx: &LoweringCtx, node: Node) -> Template {
    let mut quasis = Vec::new();
    let mut exprs = Vec::new();
    let mut cursor = node.start_byte() + 1;

    for child in named_children(node) {
        if child.kind() != "template_substitution" {
            continue;
        }
        quasis.push(ctx.slice(cursor, child.start_byte()).to_owned());
        let expr = match first_named(child) {
            Some(inner) => lower_expr(ctx, inner),
            None => Expr::Raw(String::new()),
        };
        exprs.push(expr);
        cursor = child.end_byte();
    }
    let end = node.end_byte().saturating_sub(1).max(cursor);
    quasis.push(ctx.slice(cursor, end).to_owned());

    Template { quasis, exprs }
}

pub fn lower_prop_key(ctx: &LoweringCtx, node: Node) -> PropKey {
    match node.kind() {
        "private_property_identifier" => PropKey::Private(ctx.node_text(&node).to_owned()),
        "string" => PropKey::Str(lower_string(ctx, node)),
        "number" => match lower_number(ctx, node) {
            Lit::Num(n) => PropKey::Num(n),
            _ => PropKey::Computed(Box::new(Expr::Raw(ctx.node_text(&node).to_owned()))),
        },
        "computed_property_name" => {
            let expr = match first_named(node) {
                Some(inner) => lower_expr(ctx, inner),
                None => Expr::Raw(String::new()),
            };
            PropKey::Computed(Box::new(expr))
        }
        _ => PropKey::Ident(ctx.node_text(&node).to_owned()),
    }
}
