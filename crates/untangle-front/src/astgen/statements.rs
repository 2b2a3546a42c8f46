//! CST to AST lowering for statements.

use tree_sitter::Node;
use untangle_ast::{
    AssignTarget, CatchClause, ForHead, ForInStmt, ForInit, ForStmt, IfStmt, Stmt, SwitchCase,
    SwitchStmt, TryStmt, VarDecl, VarDeclarator, VarKind,
};

use super::context::LoweringCtx;
use super::expressions::{lower_class, lower_expr, lower_function, lower_paren_inner};
use super::helpers::{field_children, first_named, has_token, named_children};
use super::patterns::lower_pattern;

/// Lower every statement directly under `node` (a program, block or
/// function body).
pub fn lower_stmt_list(ctx: &LoweringCtx, node: Node) -> Vec<Stmt> {
    named_children(node)
        .into_iter()
        .filter(|child| child.kind() != "hash_bang_line")
        .map(|child| lower_stmt(ctx, child))
        .collect()
}

/// Lower a CST statement node to an AST Stmt.
///
/// Statements without a counterpart in the tree (imports, exports and
/// anything the lowering cannot take apart) become [`Stmt::Raw`].
pub fn lower_stmt(ctx: &LoweringCtx, node: Node) -> Stmt {
    try_lower_stmt(ctx, node).unwrap_or_else(|| Stmt::Raw(ctx.node_text(&node).to_owned()))
}

fn try_lower_stmt(ctx: &LoweringCtx, node: Node) -> Option<Stmt> {
    match node.kind() {
        "expression_statement" => {
            let expr = first_named(node)?;
            // A bare string may be a directive such as "use strict"; keep
            // it exactly as written.
            if expr.kind() == "string" {
                return Some(Stmt::Raw(format!("{};", ctx.node_text(&expr))));
            }
            Some(Stmt::Expr(lower_expr(ctx, expr)))
        }
        "variable_declaration" | "lexical_declaration" => lower_var_decl(ctx, node).map(Stmt::Var),
        "function_declaration" | "generator_function_declaration" => {
            lower_function(ctx, node).map(Stmt::Function)
        }
        "class_declaration" => lower_class(ctx, node).map(Stmt::Class),
        "statement_block" => Some(Stmt::Block(lower_stmt_list(ctx, node))),
        "empty_statement" => Some(Stmt::Empty),
        "if_statement" => lower_if(ctx, node),
        "switch_statement" => lower_switch(ctx, node),
        "for_statement" => lower_for(ctx, node),
        "for_in_statement" => lower_for_in(ctx, node),
        "while_statement" => {
            let test = node.child_by_field_name("condition")?;
            let body = node.child_by_field_name("body")?;
            Some(Stmt::While {
                test: lower_paren_inner(ctx, test),
                body: Box::new(lower_stmt(ctx, body)),
            })
        }
        "do_statement" => {
            let body = node.child_by_field_name("body")?;
            let test = node.child_by_field_name("condition")?;
            Some(Stmt::DoWhile {
                body: Box::new(lower_stmt(ctx, body)),
                test: lower_paren_inner(ctx, test),
            })
        }
        "try_statement" => lower_try(ctx, node),
        "with_statement" => {
            let object = node.child_by_field_name("object")?;
            let body = node.child_by_field_name("body")?;
            Some(Stmt::With {
                object: lower_paren_inner(ctx, object),
                body: Box::new(lower_stmt(ctx, body)),
            })
        }
        "labeled_statement" => {
            let label = node.child_by_field_name("label")?;
            let body = node.child_by_field_name("body")?;
            Some(Stmt::Labeled {
                label: ctx.node_text(&label).to_owned(),
                body: Box::new(lower_stmt(ctx, body)),
            })
        }
        "break_statement" => Some(Stmt::Break(label_of(ctx, node))),
        "continue_statement" => Some(Stmt::Continue(label_of(ctx, node))),
        "return_statement" => Some(Stmt::Return(
            first_named(node).map(|arg| lower_expr(ctx, arg)),
        )),
        "throw_statement" => first_named(node).map(|arg| Stmt::Throw(lower_expr(ctx, arg))),
        "debugger_statement" => Some(Stmt::Debugger),
        _ => None,
    }
}

fn label_of(ctx: &LoweringCtx, node: Node) -> Option<String> {
    node.child_by_field_name("label")
        .map(|label| ctx.node_text(&label).to_owned())
}

pub fn lower_var_decl(ctx: &LoweringCtx, node: Node) -> Option<VarDecl> {
    let kind = match node.child_by_field_name("kind") {
        Some(kind) => VarKind::from_keyword(ctx.node_text(&kind))?,
        None if node.kind() == "variable_declaration" => VarKind::Var,
        None => return None,
    };
    let mut decls = Vec::new();
    for declarator in named_children(node) {
        if declarator.kind() != "variable_declarator" {
            return None;
        }
        let name = declarator.child_by_field_name("name")?;
        decls.push(VarDeclarator {
            name: lower_pattern(ctx, name),
            init: declarator
                .child_by_field_name("value")
                .map(|value| lower_expr(ctx, value)),
        });
    }
    Some(VarDecl { kind, decls })
}

fn lower_if(ctx: &LoweringCtx, node: Node) -> Option<Stmt> {
    let test = node.child_by_field_name("condition")?;
    let cons = node.child_by_field_name("consequence")?;
    let alt = match node.child_by_field_name("alternative") {
        // `else_clause` wraps the statement.
        Some(clause) => Some(Box::new(lower_stmt(ctx, first_named(clause)?))),
        None => None,
    };
    Some(Stmt::If(IfStmt {
        test: lower_paren_inner(ctx, test),
        cons: Box::new(lower_stmt(ctx, cons)),
        alt,
    }))
}

fn lower_switch(ctx: &LoweringCtx, node: Node) -> Option<Stmt> {
    let discriminant = node.child_by_field_name("value")?;
    let body = node.child_by_field_name("body")?;

    let mut cases = Vec::new();
    for case in named_children(body) {
        let test = match case.kind() {
            "switch_case" => Some(lower_expr(ctx, case.child_by_field_name("value")?)),
            "switch_default" => None,
            _ => return None,
        };
        let body = field_children(case, "body")
            .into_iter()
            .map(|stmt| lower_stmt(ctx, stmt))
            .collect();
        cases.push(SwitchCase { test, body });
    }

    Some(Stmt::Switch(SwitchStmt {
        discriminant: lower_paren_inner(ctx, discriminant),
        cases,
    }))
}

fn lower_for(ctx: &LoweringCtx, node: Node) -> Option<Stmt> {
    let body = node.child_by_field_name("body")?;

    let init = match node.child_by_field_name("initializer") {
        None => None,
        Some(init) => match init.kind() {
            "empty_statement" => None,
            "variable_declaration" | "lexical_declaration" => {
                Some(ForInit::Var(lower_var_decl(ctx, init)?))
            }
            "expression_statement" => Some(ForInit::Expr(lower_expr(ctx, first_named(init)?))),
            _ => Some(ForInit::Expr(lower_expr(ctx, init))),
        },
    };
    // Older grammars wrap the condition in a statement node.
    let test = match node.child_by_field_name("condition") {
        None => None,
        Some(test) => match test.kind() {
            "empty_statement" | ";" => None,
            "expression_statement" => Some(lower_expr(ctx, first_named(test)?)),
            _ => Some(lower_expr(ctx, test)),
        },
    };
    let update = node
        .child_by_field_name("increment")
        .map(|update| lower_expr(ctx, update));

    Some(Stmt::For(ForStmt {
        init,
        test,
        update,
        body: Box::new(lower_stmt(ctx, body)),
    }))
}

fn lower_for_in(ctx: &LoweringCtx, node: Node) -> Option<Stmt> {
    let left = node.child_by_field_name("left")?;
    let right = node.child_by_field_name("right")?;
    let body = node.child_by_field_name("body")?;
    // `for (var x = init in o)` keeps its legacy initializer only as text.
    if node.child_by_field_name("value").is_some() {
        return None;
    }

    let head = match node.child_by_field_name("kind") {
        Some(kind) => ForHead::Var(
            VarKind::from_keyword(ctx.node_text(&kind))?,
            lower_pattern(ctx, left),
        ),
        None => match left.kind() {
            "object_pattern" | "array_pattern" => {
                ForHead::Target(AssignTarget::Pat(lower_pattern(ctx, left)))
            }
            _ => ForHead::Target(AssignTarget::Expr(Box::new(lower_expr(ctx, left)))),
        },
    };
    let of = node
        .child_by_field_name("operator")
        .is_some_and(|op| op.kind() == "of");

    Some(Stmt::ForIn(ForInStmt {
        head,
        right: lower_expr(ctx, right),
        body: Box::new(lower_stmt(ctx, body)),
        of,
        is_await: has_token(node, "await"),
    }))
}

fn lower_try(ctx: &LoweringCtx, node: Node) -> Option<Stmt> {
    let block = node.child_by_field_name("body")?;
    let handler = match node.child_by_field_name("handler") {
        None => None,
        Some(handler) => Some(CatchClause {
            param: handler
                .child_by_field_name("parameter")
                .map(|param| lower_pattern(ctx, param)),
            body: lower_stmt_list(ctx, handler.child_by_field_name("body")?),
        }),
    };
    let finalizer = match node.child_by_field_name("finalizer") {
        None => None,
        Some(finalizer) => Some(lower_stmt_list(ctx, finalizer.child_by_field_name("body")?)),
    };
    Some(Stmt::Try(TryStmt {
        block: lower_stmt_list(ctx, block),
        handler,
        finalizer,
    }))
}
