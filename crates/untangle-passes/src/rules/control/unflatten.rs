//! Reversal of switch-dispatch state machines.
//!
//! ```text
//! while (true) {
//!   switch (state) {                          a();
//!     case 1: b(); state = 2; break;   →    b();
//!     case 0: a(); state = 1; break;          c();
//!     case 2: c(); return;
//!   }
//! }
//! ```
//!
//! The cases are laid out in ascending key order, which is only the real
//! execution order for linear machines. The rule declines (leaving the loop
//! alone) when anything suggests branching: a `default`, mixed or duplicate
//! keys, a case that still holds `if`, a loop, a `switch` or `try` after the
//! dispatch assignments are stripped, a `continue`, or a `break` that is
//! not the last statement of its case.

use untangle_ast::{AssignOp, AssignTarget, Expr, Lit, Program, Stmt, SwitchCase, SwitchStmt};

use crate::context::RunContext;
use crate::error::RuleResult;
use crate::rewrite::{PatternApplicator, RewriteResult, StmtPattern};
use crate::rule::Rule;
use crate::rules::flow::has_escaping_jump;

pub struct Unflatten;

impl Rule for Unflatten {
    fn name(&self) -> &'static str {
        "control/unflatten"
    }

    fn phase(&self) -> i32 {
        15
    }

    fn description(&self) -> &'static str {
        "Linearize while/switch dispatch loops in ascending case order"
    }

    fn run(&self, program: &mut Program, ctx: &mut RunContext) -> RuleResult<usize> {
        Ok(PatternApplicator::new()
            .add_stmt_pattern(DispatchLoopPattern)
            .apply(program, ctx))
    }
}

struct DispatchLoopPattern;

impl StmtPattern for DispatchLoopPattern {
    fn rewrite_stmt(&self, stmt: &mut Stmt, _ctx: &mut RunContext) -> RewriteResult<Stmt> {
        let Some(switch) = dispatch_switch(stmt) else {
            return RewriteResult::Unchanged;
        };
        let Some(order) = case_order(switch) else {
            tracing::trace!("dispatch loop declined: case keys");
            return RewriteResult::Unchanged;
        };
        let Some(bodies) = stripped_bodies(switch) else {
            tracing::trace!("dispatch loop declined: branching case body");
            return RewriteResult::Unchanged;
        };

        let mut bodies: Vec<Option<Vec<Stmt>>> = bodies.into_iter().map(Some).collect();
        let linear: Vec<Stmt> = order
            .into_iter()
            .filter_map(|index| bodies.get_mut(index).and_then(Option::take))
            .flatten()
            .collect();

        if linear.iter().any(Stmt::is_lexical_decl) {
            RewriteResult::Replace(Stmt::Block(linear))
        } else {
            RewriteResult::Expand(linear)
        }
    }
}

/// The switch of `while (<truthy literal>) switch (…) {…}`, or of the same
/// loop with the switch as the only statement of a block body. `for (;;)`
/// loops qualify too.
fn dispatch_switch(stmt: &Stmt) -> Option<&SwitchStmt> {
    let body = match stmt {
        Stmt::While { test, body } if test.as_lit().and_then(Lit::truthiness) == Some(true) => {
            body
        }
        Stmt::For(for_stmt)
            if for_stmt.init.is_none()
                && for_stmt.update.is_none()
                && match &for_stmt.test {
                    None => true,
                    Some(test) => test.as_lit().and_then(Lit::truthiness) == Some(true),
                } =>
        {
            &for_stmt.body
        }
        _ => return None,
    };
    let switch = match &**body {
        Stmt::Switch(switch) => switch,
        Stmt::Block(stmts) => match stmts.as_slice() {
            [Stmt::Switch(switch)] => switch,
            _ => return None,
        },
        _ => return None,
    };
    if switch.cases.is_empty() {
        return None;
    }
    Some(switch)
}

/// Case indices in ascending key order; `None` unless every case has a
/// distinct key of the same kind.
fn case_order(switch: &SwitchStmt) -> Option<Vec<usize>> {
    let mut numbers = Vec::new();
    let mut strings = Vec::new();
    for (index, case) in switch.cases.iter().enumerate() {
        match case.test.as_ref()?.as_lit()? {
            Lit::Num(n) => numbers.push((n.value, index)),
            Lit::Str(s) => strings.push((s.value.as_str(), index)),
            _ => return None,
        }
    }

    let order = if strings.is_empty() {
        numbers.sort_by(|(a, _), (b, _)| a.total_cmp(b));
        if numbers.windows(2).any(|pair| pair[0].0 == pair[1].0) {
            return None;
        }
        numbers.into_iter().map(|(_, index)| index).collect()
    } else if numbers.is_empty() {
        strings.sort_by_key(|&(key, _)| key);
        if strings.windows(2).any(|pair| pair[0].0 == pair[1].0) {
            return None;
        }
        strings.into_iter().map(|(_, index)| index).collect()
    } else {
        tracing::trace!("dispatch loop declined: mixed case key kinds");
        return None;
    };
    Some(order)
}

/// Each case body without its trailing `break` and dispatch assignments,
/// or `None` when a body still branches.
fn stripped_bodies(switch: &SwitchStmt) -> Option<Vec<Vec<Stmt>>> {
    let state = match switch.discriminant.peel_parens() {
        state @ (Expr::Ident(_) | Expr::Member(_)) => Some(state),
        _ => None,
    };
    switch
        .cases
        .iter()
        .map(|case| strip_case(case, state))
        .collect()
}

fn strip_case(case: &SwitchCase, state: Option<&Expr>) -> Option<Vec<Stmt>> {
    let mut body: &[Stmt] = &case.body;
    if let [rest @ .., Stmt::Break(None)] = body {
        body = rest;
    }
    let mut stripped = Vec::with_capacity(body.len());
    for stmt in body {
        if is_dispatch_assignment(stmt, state) {
            continue;
        }
        if branches(stmt) {
            return None;
        }
        stripped.push(stmt.clone());
    }
    Some(stripped)
}

/// `state = <number or string>;`. Without a plain discriminant to compare
/// against, any identifier or member target counts.
fn is_dispatch_assignment(stmt: &Stmt, state: Option<&Expr>) -> bool {
    let Stmt::Expr(Expr::Assign {
        op: AssignOp::Assign,
        target: AssignTarget::Expr(target),
        value,
    }) = stmt
    else {
        return false;
    };
    if !matches!(value.as_lit(), Some(Lit::Num(_) | Lit::Str(_))) {
        return false;
    }
    let target = target.peel_parens();
    match state {
        Some(state) => target == state,
        None => matches!(target, Expr::Ident(_) | Expr::Member(_)),
    }
}

fn branches(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::If(_)
        | Stmt::While { .. }
        | Stmt::DoWhile { .. }
        | Stmt::For(_)
        | Stmt::ForIn(_)
        | Stmt::Switch(_)
        | Stmt::Try(_) => true,
        other => has_escaping_jump(other, true, true),
    }
}
