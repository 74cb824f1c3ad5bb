//! Structural and statement nodes: everything from the program root down
//! to the individual statements of a function body.

use crate::expr::{BoolExpr, Expr, FuncCall, Translate};
use crate::token::Token;

/// Root of a parsed program: the function definition list.
#[derive(Debug, Clone, PartialEq)]
pub struct Program<'a> {
    pub functions: Vec<FuncDef<'a>>,
}

/// `id[params?]:type_or_void{body?}`
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDef<'a> {
    pub name: &'a Token<'a>,

    /// Declared parameters, in order (may be empty).
    pub params: Vec<ParamDef<'a>>,

    /// `Void` or one of the four value types.
    pub return_type: &'a Token<'a>,

    pub body: Body<'a>,
}

/// One `id:type` parameter declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDef<'a> {
    pub name: &'a Token<'a>,
    pub ty: &'a Token<'a>,
}

/// A function/branch body: statements, then at most one trailing return.
///
/// An empty body is a `Body` with no statements and no return.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Body<'a> {
    pub statements: Vec<BodyStmt<'a>>,
    pub ret: Option<ReturnStmt<'a>>,
}

/// One statement of a body.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyStmt<'a> {
    If(IfStmt<'a>),

    While(WhileStmt<'a>),

    Simple(Stmt<'a>),
}

/// A simple (non-control-flow) statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt<'a> {
    /// `type id;`
    VarDecl {
        ty: &'a Token<'a>,
        name: &'a Token<'a>,
    },

    /// `type? id = expr;`
    Assign {
        ty: Option<&'a Token<'a>>,
        name: &'a Token<'a>,
        value: Expr<'a>,
    },

    /// `func_call;`
    Call(FuncCall<'a>),
}

/// `if[b_expr]{body?} elseif_lst? else?`
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt<'a> {
    pub cond: BoolExpr<'a>,
    pub body: Body<'a>,
    pub elseifs: Vec<ElseIf<'a>>,
    pub else_body: Option<Body<'a>>,
}

/// One `elseif[b_expr]{body?}` arm.
#[derive(Debug, Clone, PartialEq)]
pub struct ElseIf<'a> {
    pub cond: BoolExpr<'a>,
    pub body: Body<'a>,
}

/// `while[b_expr]{body?}`
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt<'a> {
    pub cond: BoolExpr<'a>,
    pub body: Body<'a>,
}

/// `return expr;` — always the last statement of its body.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt<'a> {
    pub value: Expr<'a>,
}

impl Translate for Program<'_> {}
impl Translate for FuncDef<'_> {}
impl Translate for ParamDef<'_> {}
impl Translate for Body<'_> {}
impl Translate for BodyStmt<'_> {}
impl Translate for Stmt<'_> {}
impl Translate for IfStmt<'_> {}
impl Translate for ElseIf<'_> {}
impl Translate for WhileStmt<'_> {}
impl Translate for ReturnStmt<'_> {}
