//! Expression printing.

use crate::ast::*;

use super::Printer;
use super::literal::{is_negative, lit_to_string, num_to_string, str_to_string};

pub(super) const PREC_SEQ: u8 = 1;
pub(super) const PREC_ASSIGN: u8 = 2;
pub(super) const PREC_COND: u8 = 3;
pub(super) const PREC_UNARY: u8 = 15;
pub(super) const PREC_POSTFIX: u8 = 16;
pub(super) const PREC_LHS: u8 = 18;
pub(super) const PREC_PRIMARY: u8 = 20;

/// Binding power of an expression's outermost operator.
pub(super) fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Seq(_) => PREC_SEQ,
        Expr::Assign { .. } | Expr::Arrow(_) | Expr::Yield { .. } | Expr::Spread(_) => PREC_ASSIGN,
        Expr::Cond { .. } => PREC_COND,
        Expr::Binary { op, .. } => op.precedence(),
        Expr::Unary { .. } | Expr::Await(_) => PREC_UNARY,
        Expr::Update { prefix: true, .. } => PREC_UNARY,
        Expr::Update { prefix: false, .. } => PREC_POSTFIX,
        Expr::Lit(Lit::Num(n)) if is_negative(n) => PREC_UNARY,
        Expr::Call(_) | Expr::New { .. } | Expr::Member(_) | Expr::TaggedTemplate { .. } => {
            PREC_LHS
        }
        Expr::Ident(_)
        | Expr::Lit(_)
        | Expr::This
        | Expr::Super
        | Expr::Array(_)
        | Expr::Object(_)
        | Expr::Function(_)
        | Expr::Class(_)
        | Expr::Template(_)
        | Expr::Paren(_)
        | Expr::Raw(_) => PREC_PRIMARY,
    }
}

/// Whether the printed form of `expr` begins with a token that cannot open
/// an expression statement (`{`, `function`, `class`, `let [`).
pub(super) fn starts_ambiguously(expr: &Expr) -> bool {
    match expr {
        Expr::Object(_) | Expr::Function(_) | Expr::Class(_) => true,
        Expr::Binary { left, .. } => starts_ambiguously(left),
        Expr::Seq(exprs) => exprs.first().is_some_and(starts_ambiguously),
        Expr::Assign { target, .. } => match target {
            AssignTarget::Pat(Pat::Object(_)) => true,
            AssignTarget::Pat(_) => false,
            AssignTarget::Expr(expr) => starts_ambiguously(expr),
        },
        Expr::Cond { test, .. } => starts_ambiguously(test),
        Expr::Call(call) => {
            precedence(&call.callee) >= PREC_LHS && starts_ambiguously(&call.callee)
        }
        Expr::Member(member) => match (&*member.object, &member.prop) {
            (Expr::Ident(ident), MemberProp::Computed(_)) if ident.name == "let" => true,
            (Expr::Lit(Lit::Num(_)), _) => false,
            (object, _) => precedence(object) >= PREC_LHS && starts_ambiguously(object),
        },
        Expr::TaggedTemplate { tag, .. } => starts_ambiguously(tag),
        Expr::Update {
            prefix: false, arg, ..
        } => starts_ambiguously(arg),
        _ => false,
    }
}

fn contains_call(expr: &Expr) -> bool {
    match expr {
        Expr::Call(_) => true,
        Expr::Member(member) => contains_call(&member.object),
        Expr::TaggedTemplate { tag, .. } => contains_call(tag),
        _ => false,
    }
}

impl Printer {
    /// Print `expr`, parenthesized when it binds looser than `min_prec`.
    pub(super) fn expr(&mut self, expr: &Expr, min_prec: u8) {
        let needs_in_parens =
            self.in_for_init && matches!(expr, Expr::Binary { op: BinaryOp::In, .. });
        if precedence(expr) < min_prec || needs_in_parens {
            let saved = std::mem::replace(&mut self.in_for_init, false);
            self.write("(");
            self.expr_inner(expr);
            self.write(")");
            self.in_for_init = saved;
        } else {
            self.expr_inner(expr);
        }
    }

    fn expr_inner(&mut self, expr: &Expr) {
        match expr {
            Expr::Ident(ident) => self.write(&ident.name),
            Expr::Lit(lit) => self.write(&lit_to_string(lit)),
            Expr::This => self.write("this"),
            Expr::Super => self.write("super"),
            Expr::Array(elems) => {
                self.write("[");
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    if let Some(elem) = elem {
                        self.expr(elem, PREC_ASSIGN);
                    }
                }
                if matches!(elems.last(), Some(None)) {
                    self.write(",");
                }
                self.write("]");
            }
            Expr::Object(props) => self.object(props),
            Expr::Function(function) => self.function(function),
            Expr::Arrow(arrow) => self.arrow(arrow),
            Expr::Class(class) => self.class(class),
            Expr::Template(template) => self.template(template),
            Expr::TaggedTemplate { tag, template } => {
                self.expr(tag, PREC_LHS);
                self.template(template);
            }
            Expr::Unary { op, arg } => {
                self.write(op.as_str());
                if op.is_keyword() || needs_sign_space(*op, arg) {
                    self.write(" ");
                }
                self.expr(arg, PREC_UNARY);
            }
            Expr::Update { op, prefix, arg } => {
                if *prefix {
                    self.write(op.as_str());
                    self.expr(arg, PREC_UNARY);
                } else {
                    self.expr(arg, PREC_LHS);
                    self.write(op.as_str());
                }
            }
            Expr::Binary { op, left, right } => self.binary(*op, left, right),
            Expr::Assign { op, target, value } => {
                match target {
                    AssignTarget::Expr(expr) => self.expr(expr, PREC_LHS),
                    AssignTarget::Pat(pat) => self.pat(pat),
                }
                self.write(" ");
                self.write(op.as_str());
                self.write(" ");
                self.expr(value, PREC_ASSIGN);
            }
            Expr::Cond { test, cons, alt } => {
                self.expr(test, PREC_COND + 1);
                self.write(" ? ");
                self.expr(cons, PREC_ASSIGN);
                self.write(" : ");
                self.expr(alt, PREC_ASSIGN);
            }
            Expr::Call(call) => {
                for comment in &call.comments {
                    self.write("/* ");
                    self.write(comment);
                    self.write(" */ ");
                }
                self.expr(&call.callee, PREC_LHS);
                if call.optional {
                    self.write("?.");
                }
                self.args(&call.args);
            }
            Expr::New { callee, args } => {
                self.write("new ");
                if contains_call(callee) {
                    self.write("(");
                    self.expr(callee, 0);
                    self.write(")");
                } else {
                    self.expr(callee, PREC_LHS);
                }
                self.args(args);
            }
            Expr::Member(member) => {
                if let Expr::Lit(Lit::Num(_)) = &*member.object {
                    self.write("(");
                    self.expr(&member.object, 0);
                    self.write(")");
                } else {
                    self.expr(&member.object, PREC_LHS);
                }
                match &member.prop {
                    MemberProp::Ident(name) | MemberProp::Private(name) => {
                        self.write(if member.optional { "?." } else { "." });
                        self.write(name);
                    }
                    MemberProp::Computed(prop) => {
                        if member.optional {
                            self.write("?.");
                        }
                        self.write("[");
                        self.expr(prop, 0);
                        self.write("]");
                    }
                }
            }
            Expr::Seq(exprs) => self.comma_list(exprs, |p, e| p.expr(e, PREC_ASSIGN)),
            Expr::Spread(arg) => {
                self.write("...");
                self.expr(arg, PREC_ASSIGN);
            }
            Expr::Yield { arg, delegate } => {
                self.write(if *delegate { "yield*" } else { "yield" });
                if let Some(arg) = arg {
                    self.write(" ");
                    self.expr(arg, PREC_ASSIGN);
                }
            }
            Expr::Await(arg) => {
                self.write("await ");
                self.expr(arg, PREC_UNARY);
            }
            Expr::Paren(inner) => {
                let saved = std::mem::replace(&mut self.in_for_init, false);
                self.write("(");
                self.expr(inner, 0);
                self.write(")");
                self.in_for_init = saved;
            }
            Expr::Raw(text) => self.write(text),
        }
    }

    fn binary(&mut self, op: BinaryOp, left: &Expr, right: &Expr) {
        let prec = op.precedence();
        let (left_min, right_min) = if op == BinaryOp::Exp {
            (PREC_POSTFIX, prec)
        } else {
            (prec, prec + 1)
        };
        self.binary_operand(op, left, left_min);
        self.write(" ");
        self.write(op.as_str());
        self.write(" ");
        self.binary_operand(op, right, right_min);
    }

    fn binary_operand(&mut self, parent: BinaryOp, operand: &Expr, min_prec: u8) {
        // `??` may not be mixed with `&&`/`||` without explicit grouping.
        let mixes_nullish = match operand {
            Expr::Binary { op, .. } => {
                (parent == BinaryOp::Nullish && matches!(op, BinaryOp::And | BinaryOp::Or))
                    || (*op == BinaryOp::Nullish && matches!(parent, BinaryOp::And | BinaryOp::Or))
            }
            _ => false,
        };
        if mixes_nullish {
            self.write("(");
            self.expr(operand, 0);
            self.write(")");
        } else {
            self.expr(operand, min_prec);
        }
    }

    fn args(&mut self, args: &[Expr]) {
        let saved = std::mem::replace(&mut self.in_for_init, false);
        self.write("(");
        self.comma_list(args, |p, arg| p.expr(arg, PREC_ASSIGN));
        self.write(")");
        self.in_for_init = saved;
    }

    fn template(&mut self, template: &Template) {
        self.write("`");
        for (i, quasi) in template.quasis.iter().enumerate() {
            self.write(quasi);
            if let Some(expr) = template.exprs.get(i) {
                self.write("${");
                self.expr(expr, 0);
                self.write("}");
            }
        }
        self.write("`");
    }

    fn object(&mut self, props: &[Prop]) {
        if props.is_empty() {
            self.write("{}");
            return;
        }
        let saved = std::mem::replace(&mut self.in_for_init, false);
        self.write("{");
        self.indent += 1;
        for (i, prop) in props.iter().enumerate() {
            self.newline();
            self.prop(prop);
            if i + 1 < props.len() {
                self.write(",");
            }
        }
        self.indent -= 1;
        self.newline();
        self.write("}");
        self.in_for_init = saved;
    }

    fn prop(&mut self, prop: &Prop) {
        match prop {
            Prop::KeyValue {
                key,
                value,
                shorthand,
            } => {
                if let (true, PropKey::Ident(key), Expr::Ident(value)) = (shorthand, key, value) {
                    if *key == value.name {
                        self.write(key);
                        return;
                    }
                }
                self.prop_key(key);
                self.write(": ");
                self.expr(value, PREC_ASSIGN);
            }
            Prop::Method(method) => self.method(method),
            Prop::Spread(expr) => {
                self.write("...");
                self.expr(expr, PREC_ASSIGN);
            }
        }
    }

    pub(super) fn prop_key(&mut self, key: &PropKey) {
        match key {
            PropKey::Ident(name) | PropKey::Private(name) => self.write(name),
            PropKey::Str(s) => self.write(&str_to_string(s)),
            PropKey::Num(n) => self.write(&num_to_string(n)),
            PropKey::Computed(expr) => {
                self.write("[");
                self.expr(expr, PREC_ASSIGN);
                self.write("]");
            }
        }
    }

    pub(super) fn method(&mut self, method: &MethodProp) {
        match method.kind {
            MethodKind::Get => self.write("get "),
            MethodKind::Set => self.write("set "),
            MethodKind::Method => {}
        }
        if method.function.is_async {
            self.write("async ");
        }
        if method.function.is_generator {
            self.write("*");
        }
        self.prop_key(&method.key);
        self.params(&method.function.params);
        self.write(" ");
        self.block(&method.function.body);
    }

    pub(super) fn function(&mut self, function: &Function) {
        if function.is_async {
            self.write("async ");
        }
        self.write(if function.is_generator {
            "function*"
        } else {
            "function"
        });
        self.write(" ");
        if let Some(name) = &function.name {
            self.write(&name.name);
        }
        self.params(&function.params);
        self.write(" ");
        self.block(&function.body);
    }

    fn params(&mut self, params: &[Pat]) {
        let saved = std::mem::replace(&mut self.in_for_init, false);
        self.write("(");
        self.comma_list(params, |p, param| p.pat(param));
        self.write(")");
        self.in_for_init = saved;
    }

    fn arrow(&mut self, arrow: &Arrow) {
        if arrow.is_async {
            self.write("async ");
        }
        self.params(&arrow.params);
        self.write(" => ");
        match &arrow.body {
            ArrowBody::Expr(body) => {
                if starts_ambiguously(body) {
                    self.write("(");
                    self.expr(body, 0);
                    self.write(")");
                } else {
                    self.expr(body, PREC_ASSIGN);
                }
            }
            ArrowBody::Block(stmts) => self.block(stmts),
        }
    }

    pub(super) fn class(&mut self, class: &Class) {
        self.write("class");
        if let Some(name) = &class.name {
            self.write(" ");
            self.write(&name.name);
        }
        if let Some(super_class) = &class.super_class {
            self.write(" extends ");
            self.expr(super_class, PREC_LHS);
        }
        self.write(" ");
        if class.members.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{");
        self.indent += 1;
        for member in &class.members {
            self.newline();
            match member {
                ClassMember::Method { is_static, method } => {
                    if *is_static {
                        self.write("static ");
                    }
                    self.method(method);
                }
                ClassMember::Field {
                    is_static,
                    key,
                    value,
                } => {
                    if *is_static {
                        self.write("static ");
                    }
                    self.prop_key(key);
                    if let Some(value) = value {
                        self.write(" = ");
                        self.expr(value, PREC_ASSIGN);
                    }
                    self.write(";");
                }
                ClassMember::StaticBlock(stmts) => {
                    self.write("static ");
                    self.block(stmts);
                }
            }
        }
        self.indent -= 1;
        self.newline();
        self.write("}");
    }

    pub(super) fn pat(&mut self, pat: &Pat) {
        match pat {
            Pat::Ident(ident) => self.write(&ident.name),
            Pat::Array(elems) => {
                self.write("[");
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    if let Some(elem) = elem {
                        self.pat(elem);
                    }
                }
                if matches!(elems.last(), Some(None)) {
                    self.write(",");
                }
                self.write("]");
            }
            Pat::Object(props) => {
                self.write("{");
                self.comma_list(props, |p, prop| match prop {
                    ObjectPatProp::KeyValue {
                        key,
                        value,
                        shorthand,
                    } => {
                        if *shorthand && p.shorthand_pat(key, value) {
                            return;
                        }
                        p.prop_key(key);
                        p.write(": ");
                        p.pat(value);
                    }
                    ObjectPatProp::Rest(rest) => {
                        p.write("...");
                        p.pat(rest);
                    }
                });
                self.write("}");
            }
            Pat::Assign { left, right } => {
                self.pat(left);
                self.write(" = ");
                self.expr(right, PREC_ASSIGN);
            }
            Pat::Rest(arg) => {
                self.write("...");
                self.pat(arg);
            }
            Pat::Expr(expr) => self.expr(expr, PREC_LHS),
        }
    }

    /// Print `{ a }` / `{ a = 1 }` when the binding still has the key's
    /// name. Returns false when the long form is needed.
    fn shorthand_pat(&mut self, key: &PropKey, value: &Pat) -> bool {
        let PropKey::Ident(key) = key else {
            return false;
        };
        match value {
            Pat::Ident(ident) if ident.name == *key => {
                self.write(key);
                true
            }
            Pat::Assign { left, right } if matches!(&**left, Pat::Ident(i) if i.name == *key) => {
                self.write(key);
                self.write(" = ");
                self.expr(right, PREC_ASSIGN);
                true
            }
            _ => false,
        }
    }
}

fn needs_sign_space(op: UnaryOp, arg: &Expr) -> bool {
    match (op, arg) {
        (UnaryOp::Minus, Expr::Unary { op: UnaryOp::Minus, .. })
        | (UnaryOp::Plus, Expr::Unary { op: UnaryOp::Plus, .. })
        | (UnaryOp::Minus, Expr::Update { op: UpdateOp::Decr, prefix: true, .. })
        | (UnaryOp::Plus, Expr::Update { op: UpdateOp::Incr, prefix: true, .. }) => true,
        (UnaryOp::Minus, Expr::Lit(Lit::Num(n))) => is_negative(n),
        _ => false,
    }
}
