//! Statement nodes.

use super::{AssignTarget, Class, Expr, Function, Pat};

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Stmt {
    Expr(Expr),
    Var(VarDecl),
    /// Function declaration; `name` is always set.
    Function(Function),
    /// Class declaration; `name` is always set.
    Class(Class),
    Block(Vec<Stmt>),
    #[default]
    Empty,
    If(IfStmt),
    Switch(SwitchStmt),
    For(ForStmt),
    ForIn(ForInStmt),
    While {
        test: Expr,
        body: Box<Stmt>,
    },
    DoWhile {
        body: Box<Stmt>,
        test: Expr,
    },
    Try(TryStmt),
    With {
        object: Expr,
        body: Box<Stmt>,
    },
    Labeled {
        label: String,
        body: Box<Stmt>,
    },
    Break(Option<String>),
    Continue(Option<String>),
    Return(Option<Expr>),
    Throw(Expr),
    Debugger,
    /// Verbatim source for statements the tree does not model.
    Raw(String),
}

impl Stmt {
    /// Move the statement out, leaving an empty statement in its place.
    pub fn take(&mut self) -> Stmt {
        std::mem::take(self)
    }

    /// Declarations scoped to the enclosing block: `let`, `const` and
    /// `class`. Inlining a block that holds one would change scoping.
    pub fn is_lexical_decl(&self) -> bool {
        matches!(
            self,
            Stmt::Var(VarDecl {
                kind: VarKind::Let | VarKind::Const,
                ..
            }) | Stmt::Class(_)
        )
    }

    /// `return`, `throw`, `break` and `continue`.
    pub fn is_jump(&self) -> bool {
        matches!(
            self,
            Stmt::Return(_) | Stmt::Throw(_) | Stmt::Break(_) | Stmt::Continue(_)
        )
    }

    /// Flatten a statement into a list: blocks give their contents,
    /// empty statements give nothing.
    pub fn into_stmts(self) -> Vec<Stmt> {
        match self {
            Stmt::Block(stmts) => stmts,
            Stmt::Empty => Vec::new(),
            other => vec![other],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VarDecl {
    pub kind: VarKind,
    pub decls: Vec<VarDeclarator>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VarDeclarator {
    pub name: Pat,
    pub init: Option<Expr>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VarKind {
    Var,
    Let,
    Const,
}

impl VarKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "var" => Some(VarKind::Var),
            "let" => Some(VarKind::Let),
            "const" => Some(VarKind::Const),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VarKind::Var => "var",
            VarKind::Let => "let",
            VarKind::Const => "const",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IfStmt {
    pub test: Expr,
    pub cons: Box<Stmt>,
    pub alt: Option<Box<Stmt>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SwitchStmt {
    pub discriminant: Expr,
    pub cases: Vec<SwitchCase>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SwitchCase {
    /// `None` for `default`.
    pub test: Option<Expr>,
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ForStmt {
    pub init: Option<ForInit>,
    pub test: Option<Expr>,
    pub update: Option<Expr>,
    pub body: Box<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ForInit {
    Var(VarDecl),
    Expr(Expr),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ForInStmt {
    pub head: ForHead,
    pub right: Expr,
    pub body: Box<Stmt>,
    /// `for … of` rather than `for … in`.
    pub of: bool,
    pub is_await: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ForHead {
    Var(VarKind, Pat),
    Target(AssignTarget),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TryStmt {
    pub block: Vec<Stmt>,
    pub handler: Option<CatchClause>,
    pub finalizer: Option<Vec<Stmt>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CatchClause {
    pub param: Option<Pat>,
    pub body: Vec<Stmt>,
}
