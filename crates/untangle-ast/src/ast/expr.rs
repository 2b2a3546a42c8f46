//! Expression nodes.

use super::{Class, Function, Ident, JsNum, JsStr, Lit, Pat, Stmt};

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Ident(Ident),
    Lit(Lit),
    This,
    Super,
    /// Array literal; `None` elements are holes.
    Array(Vec<Option<Expr>>),
    Object(Vec<Prop>),
    Function(Box<Function>),
    Arrow(Box<Arrow>),
    Class(Box<Class>),
    Template(Template),
    TaggedTemplate {
        tag: Box<Expr>,
        template: Template,
    },
    Unary {
        op: UnaryOp,
        arg: Box<Expr>,
    },
    Update {
        op: UpdateOp,
        prefix: bool,
        arg: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Assign {
        op: AssignOp,
        target: AssignTarget,
        value: Box<Expr>,
    },
    Cond {
        test: Box<Expr>,
        cons: Box<Expr>,
        alt: Box<Expr>,
    },
    Call(CallExpr),
    New {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Member(MemberExpr),
    /// Comma sequence, always at least one element once lowered.
    Seq(Vec<Expr>),
    Spread(Box<Expr>),
    Yield {
        arg: Option<Box<Expr>>,
        delegate: bool,
    },
    Await(Box<Expr>),
    /// Explicit grouping from the source.
    Paren(Box<Expr>),
    /// Verbatim source for constructs the tree does not model.
    Raw(String),
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(Ident::new(name))
    }

    pub fn undefined() -> Self {
        Expr::ident("undefined")
    }

    /// Move the expression out, leaving a `null` literal in its place.
    pub fn take(&mut self) -> Expr {
        std::mem::replace(self, Expr::Lit(Lit::Null))
    }

    /// Strip any number of grouping parentheses.
    pub fn peel_parens(&self) -> &Expr {
        let mut expr = self;
        while let Expr::Paren(inner) = expr {
            expr = inner;
        }
        expr
    }

    pub fn peel_parens_mut(&mut self) -> &mut Expr {
        match self {
            Expr::Paren(inner) => inner.peel_parens_mut(),
            other => other,
        }
    }

    /// Consume the expression, dropping grouping parentheses.
    pub fn unparen(self) -> Expr {
        match self {
            Expr::Paren(inner) => inner.unparen(),
            other => other,
        }
    }

    /// The literal behind grouping parentheses, if any.
    pub fn as_lit(&self) -> Option<&Lit> {
        match self.peel_parens() {
            Expr::Lit(lit) => Some(lit),
            _ => None,
        }
    }

    pub fn as_ident(&self) -> Option<&str> {
        match self {
            Expr::Ident(ident) => Some(&ident.name),
            _ => None,
        }
    }

    /// Expressions whose evaluation has an observable effect: assignments,
    /// calls, updates and `new`.
    pub fn is_side_effecting(&self) -> bool {
        matches!(
            self.peel_parens(),
            Expr::Assign { .. } | Expr::Call(_) | Expr::Update { .. } | Expr::New { .. }
        )
    }

    /// Expressions that can be dropped without observable effect:
    /// literals, plain identifiers and `this`.
    pub fn is_pure(&self) -> bool {
        matches!(
            self.peel_parens(),
            Expr::Lit(_) | Expr::Ident(_) | Expr::This
        )
    }

    /// `void <literal>`.
    pub fn is_void_literal(&self) -> bool {
        matches!(
            self.peel_parens(),
            Expr::Unary { op: UnaryOp::Void, arg } if matches!(arg.peel_parens(), Expr::Lit(_))
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub args: Vec<Expr>,
    pub optional: bool,
    /// Comments attached by rules, printed before the call.
    pub comments: Vec<String>,
}

impl CallExpr {
    pub fn new(callee: Expr, args: Vec<Expr>) -> Self {
        Self {
            callee: Box::new(callee),
            args,
            optional: false,
            comments: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MemberExpr {
    pub object: Box<Expr>,
    pub prop: MemberProp,
    pub optional: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum MemberProp {
    Ident(String),
    /// `#name`, stored with the hash.
    Private(String),
    Computed(Box<Expr>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum AssignTarget {
    Expr(Box<Expr>),
    Pat(Pat),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Prop {
    KeyValue {
        key: PropKey,
        value: Expr,
        /// Written as `{ a }` in the source.
        shorthand: bool,
    },
    Method(MethodProp),
    Spread(Expr),
}

#[derive(Clone, Debug, PartialEq)]
pub struct MethodProp {
    pub kind: MethodKind,
    pub key: PropKey,
    pub function: Function,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MethodKind {
    Method,
    Get,
    Set,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PropKey {
    Ident(String),
    Private(String),
    Str(JsStr),
    Num(JsNum),
    Computed(Box<Expr>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Template {
    /// Raw text between substitutions; always one more than `exprs`.
    pub quasis: Vec<String>,
    pub exprs: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Arrow {
    pub params: Vec<Pat>,
    pub body: ArrowBody,
    pub is_async: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ArrowBody {
    Expr(Box<Expr>),
    Block(Vec<Stmt>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    BitNot,
    Minus,
    Plus,
    TypeOf,
    Void,
    Delete,
}

impl UnaryOp {
    pub fn from_token(op: &str) -> Option<Self> {
        Some(match op {
            "!" => UnaryOp::Not,
            "~" => UnaryOp::BitNot,
            "-" => UnaryOp::Minus,
            "+" => UnaryOp::Plus,
            "typeof" => UnaryOp::TypeOf,
            "void" => UnaryOp::Void,
            "delete" => UnaryOp::Delete,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "~",
            UnaryOp::Minus => "-",
            UnaryOp::Plus => "+",
            UnaryOp::TypeOf => "typeof",
            UnaryOp::Void => "void",
            UnaryOp::Delete => "delete",
        }
    }

    pub fn is_keyword(self) -> bool {
        matches!(self, UnaryOp::TypeOf | UnaryOp::Void | UnaryOp::Delete)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateOp {
    Incr,
    Decr,
}

impl UpdateOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UpdateOp::Incr => "++",
            UpdateOp::Decr => "--",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Exp,
    Shl,
    Shr,
    UShr,
    BitAnd,
    BitOr,
    BitXor,
    Eq,
    NotEq,
    StrictEq,
    StrictNotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    In,
    InstanceOf,
    And,
    Or,
    Nullish,
}

impl BinaryOp {
    pub fn from_token(op: &str) -> Option<Self> {
        Some(match op {
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Sub,
            "*" => BinaryOp::Mul,
            "/" => BinaryOp::Div,
            "%" => BinaryOp::Rem,
            "**" => BinaryOp::Exp,
            "<<" => BinaryOp::Shl,
            ">>" => BinaryOp::Shr,
            ">>>" => BinaryOp::UShr,
            "&" => BinaryOp::BitAnd,
            "|" => BinaryOp::BitOr,
            "^" => BinaryOp::BitXor,
            "==" => BinaryOp::Eq,
            "!=" => BinaryOp::NotEq,
            "===" => BinaryOp::StrictEq,
            "!==" => BinaryOp::StrictNotEq,
            "<" => BinaryOp::Lt,
            "<=" => BinaryOp::LtEq,
            ">" => BinaryOp::Gt,
            ">=" => BinaryOp::GtEq,
            "in" => BinaryOp::In,
            "instanceof" => BinaryOp::InstanceOf,
            "&&" => BinaryOp::And,
            "||" => BinaryOp::Or,
            "??" => BinaryOp::Nullish,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Exp => "**",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::UShr => ">>>",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::StrictEq => "===",
            BinaryOp::StrictNotEq => "!==",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::In => "in",
            BinaryOp::InstanceOf => "instanceof",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Nullish => "??",
        }
    }

    /// Binding power used by the printer; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Nullish | BinaryOp::Or => 4,
            BinaryOp::And => 5,
            BinaryOp::BitOr => 6,
            BinaryOp::BitXor => 7,
            BinaryOp::BitAnd => 8,
            BinaryOp::Eq | BinaryOp::NotEq | BinaryOp::StrictEq | BinaryOp::StrictNotEq => 9,
            BinaryOp::Lt
            | BinaryOp::LtEq
            | BinaryOp::Gt
            | BinaryOp::GtEq
            | BinaryOp::In
            | BinaryOp::InstanceOf => 10,
            BinaryOp::Shl | BinaryOp::Shr | BinaryOp::UShr => 11,
            BinaryOp::Add | BinaryOp::Sub => 12,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => 13,
            BinaryOp::Exp => 14,
        }
    }

    pub fn is_logical(self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or | BinaryOp::Nullish)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Exp,
    Shl,
    Shr,
    UShr,
    BitAnd,
    BitOr,
    BitXor,
    And,
    Or,
    Nullish,
}

impl AssignOp {
    pub fn from_token(op: &str) -> Option<Self> {
        Some(match op {
            "=" => AssignOp::Assign,
            "+=" => AssignOp::Add,
            "-=" => AssignOp::Sub,
            "*=" => AssignOp::Mul,
            "/=" => AssignOp::Div,
            "%=" => AssignOp::Rem,
            "**=" => AssignOp::Exp,
            "<<=" => AssignOp::Shl,
            ">>=" => AssignOp::Shr,
            ">>>=" => AssignOp::UShr,
            "&=" => AssignOp::BitAnd,
            "|=" => AssignOp::BitOr,
            "^=" => AssignOp::BitXor,
            "&&=" => AssignOp::And,
            "||=" => AssignOp::Or,
            "??=" => AssignOp::Nullish,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::Add => "+=",
            AssignOp::Sub => "-=",
            AssignOp::Mul => "*=",
            AssignOp::Div => "/=",
            AssignOp::Rem => "%=",
            AssignOp::Exp => "**=",
            AssignOp::Shl => "<<=",
            AssignOp::Shr => ">>=",
            AssignOp::UShr => ">>>=",
            AssignOp::BitAnd => "&=",
            AssignOp::BitOr => "|=",
            AssignOp::BitXor => "^=",
            AssignOp::And => "&&=",
            AssignOp::Or => "||=",
            AssignOp::Nullish => "??=",
        }
    }
}
