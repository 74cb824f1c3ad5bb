//! Expression nodes for the four Jott expression sub-grammars.
//!
//! Lifetimes `'a` tie nodes that contain token references back to the
//! borrowed token slice held by the parser. A node is constructed exactly
//! once, on a fully successful production match, and never mutated
//! afterwards.

use crate::token::Token;

/// A parsed expression of any of the four kinds. Which variant gets built
/// at an undecided site is the prober's call.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr<'a> {
    Int(IntExpr<'a>),

    Dbl(DblExpr<'a>),

    Bool(BoolExpr<'a>),

    Str(StrExpr<'a>),
}

/// A function call: `id[params?]`.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncCall<'a> {
    /// The called function's name token.
    pub name: &'a Token<'a>,

    /// Argument expressions (may be empty).
    pub args: Vec<Expr<'a>>,
}

/// One term of an integer expression: an optionally-signed integer
/// literal, a bare identifier, or a function call.
#[derive(Debug, Clone, PartialEq)]
pub enum IntTerm<'a> {
    Literal {
        /// Optional leading `+`/`-` token.
        sign: Option<&'a Token<'a>>,
        value: &'a Token<'a>,
    },

    Id(&'a Token<'a>),

    Call(FuncCall<'a>),
}

/// Integer expression: `term (op term (op i_expr)?)?`.
///
/// The unbounded continuation lives in `IntRest::chain`; the grammar
/// right-recurses, so `1+2+3+4` nests to the right.
#[derive(Debug, Clone, PartialEq)]
pub struct IntExpr<'a> {
    pub first: IntTerm<'a>,
    pub rest: Option<IntRest<'a>>,
}

/// The `op term (op i_expr)?` continuation of an integer expression.
#[derive(Debug, Clone, PartialEq)]
pub struct IntRest<'a> {
    /// MATH_OP between the first and second term.
    pub op: &'a Token<'a>,
    pub term: IntTerm<'a>,

    /// Further `op expr` chain, if the expression keeps going.
    pub chain: Option<(&'a Token<'a>, Box<IntExpr<'a>>)>,
}

/// One term of a double expression; the literal must contain `.`.
#[derive(Debug, Clone, PartialEq)]
pub enum DblTerm<'a> {
    Literal {
        sign: Option<&'a Token<'a>>,
        value: &'a Token<'a>,
    },

    Id(&'a Token<'a>),

    Call(FuncCall<'a>),
}

/// Double expression, same shape as [`IntExpr`] over double terms.
#[derive(Debug, Clone, PartialEq)]
pub struct DblExpr<'a> {
    pub first: DblTerm<'a>,
    pub rest: Option<DblRest<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DblRest<'a> {
    pub op: &'a Token<'a>,
    pub term: DblTerm<'a>,
    pub chain: Option<(&'a Token<'a>, Box<DblExpr<'a>>)>,
}

/// String expression: exactly one term, never followed by an operator.
#[derive(Debug, Clone, PartialEq)]
pub enum StrExpr<'a> {
    /// String literal token (lexeme keeps its quotes).
    Literal(&'a Token<'a>),

    Id(&'a Token<'a>),

    Call(FuncCall<'a>),
}

/// One operand of a boolean expression.
///
/// `Id` and `Call` only ever appear as a complete "naked" boolean (first
/// operand, no continuation); an identifier in front of a relational
/// operator resolves through the probed expression kinds instead.
#[derive(Debug, Clone, PartialEq)]
pub enum BoolTerm<'a> {
    /// `True` or `False` literal token.
    Literal(&'a Token<'a>),

    Id(&'a Token<'a>),

    Call(FuncCall<'a>),

    Int(IntExpr<'a>),

    Dbl(DblExpr<'a>),

    Str(StrExpr<'a>),
}

/// Boolean expression: a single naked term, or `term relop term` with an
/// optional further `relop b_expr` chain.
#[derive(Debug, Clone, PartialEq)]
pub struct BoolExpr<'a> {
    pub first: BoolTerm<'a>,
    pub rest: Option<BoolRest<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoolRest<'a> {
    /// REL_OP between the operands.
    pub op: &'a Token<'a>,
    pub term: BoolTerm<'a>,

    /// Further `relop b_expr` chain.
    pub chain: Option<(&'a Token<'a>, Box<BoolExpr<'a>>)>,
}

/// Hooks for later pipeline phases (target-language emission, tree
/// validation). No phase implements them yet; every node answers absent.
pub trait Translate {
    /// Target-language rendition of this node, once a backend exists.
    fn to_target(&self) -> Option<String> {
        None
    }

    /// Semantic validation verdict, once an analyzer exists.
    fn validate(&self) -> Option<bool> {
        None
    }
}

impl Translate for Expr<'_> {}
impl Translate for FuncCall<'_> {}
impl Translate for IntExpr<'_> {}
impl Translate for DblExpr<'_> {}
impl Translate for BoolExpr<'_> {}
impl Translate for StrExpr<'_> {}
