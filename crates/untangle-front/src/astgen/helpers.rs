//! CST navigation helpers.

use tree_sitter::Node;

/// Check if a node is a comment that should be skipped.
pub fn is_comment(kind: &str) -> bool {
    matches!(kind, "comment" | "html_comment")
}

/// Named children, comments excluded.
pub fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| !child.is_extra() && !is_comment(child.kind()))
        .collect()
}

/// All children, anonymous tokens included, comments excluded.
pub fn children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|child| !child.is_extra() && !is_comment(child.kind()))
        .collect()
}

/// Every child stored under `field`.
pub fn field_children<'t>(node: Node<'t>, field: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children_by_field_name(field, &mut cursor)
        .filter(|child| !is_comment(child.kind()))
        .collect()
}

pub fn first_named<'t>(node: Node<'t>) -> Option<Node<'t>> {
    named_children(node).into_iter().next()
}

/// Whether an anonymous `token` child appears before `until` (or anywhere
/// when `until` is `None`).
pub fn has_token_before(node: Node<'_>, token: &str, until: Option<Node<'_>>) -> bool {
    children(node)
        .into_iter()
        .take_while(|child| until.is_none_or(|stop| child.id() != stop.id()))
        .any(|child| !child.is_named() && child.kind() == token)
}

pub fn has_token(node: Node<'_>, token: &str) -> bool {
    has_token_before(node, token, None)
}
