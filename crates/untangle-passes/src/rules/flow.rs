//! Where `break` and `continue` go.

use untangle_ast::Stmt;

/// Whether `stmt` holds an unlabeled `break` (when `breaks`) or `continue`
/// (when `continues`) that binds to a statement enclosing `stmt`.
///
/// Jumps inside nested loops stay there; a nested `switch` captures
/// `break` but not `continue`. Labeled jumps are never counted.
pub(crate) fn has_escaping_jump(stmt: &Stmt, breaks: bool, continues: bool) -> bool {
    if !breaks && !continues {
        return false;
    }
    match stmt {
        Stmt::Break(None) => breaks,
        Stmt::Continue(None) => continues,
        Stmt::Block(stmts) => stmts
            .iter()
            .any(|stmt| has_escaping_jump(stmt, breaks, continues)),
        Stmt::If(if_stmt) => {
            has_escaping_jump(&if_stmt.cons, breaks, continues)
                || if_stmt
                    .alt
                    .as_deref()
                    .is_some_and(|alt| has_escaping_jump(alt, breaks, continues))
        }
        Stmt::Try(try_stmt) => try_stmt
            .block
            .iter()
            .chain(try_stmt.handler.iter().flat_map(|h| h.body.iter()))
            .chain(try_stmt.finalizer.iter().flatten())
            .any(|stmt| has_escaping_jump(stmt, breaks, continues)),
        Stmt::Labeled { body, .. } | Stmt::With { body, .. } => {
            has_escaping_jump(body, breaks, continues)
        }
        Stmt::Switch(switch) => switch
            .cases
            .iter()
            .flat_map(|case| case.body.iter())
            .any(|stmt| has_escaping_jump(stmt, false, continues)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_stmt(source: &str) -> Stmt {
        untangle_front::parse(source)
            .unwrap()
            .body
            .into_iter()
            .next()
            .unwrap()
    }

    #[test]
    fn test_escaping_jumps() {
        let stmt = parse_stmt("if (a) { break; }");
        assert!(has_escaping_jump(&stmt, true, false));
        assert!(!has_escaping_jump(&stmt, false, true));

        let stmt = parse_stmt("while (a) { break; continue; }");
        assert!(!has_escaping_jump(&stmt, true, true));

        let stmt = parse_stmt("switch (a) { case 1: break; default: continue; }");
        assert!(!has_escaping_jump(&stmt, true, false));
        assert!(has_escaping_jump(&stmt, false, true));

        let stmt = parse_stmt("outer: { break outer; }");
        assert!(!has_escaping_jump(&stmt, true, true));
    }
}
