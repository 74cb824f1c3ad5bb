//! Canonical re-serialization of a syntax tree back to Jott source text.
//!
//! Rendering is whitespace-insensitive on the way in and deterministic on
//! the way out: one canonical spacing is always emitted (a single space
//! between a declared type and its identifier, and after `return`;
//! everything else is flush). Re-tokenizing and re-parsing a render
//! reproduces a structurally identical tree.

use crate::expr::{
    BoolExpr, BoolTerm, DblExpr, DblTerm, Expr, FuncCall, IntExpr, IntTerm, StrExpr,
};
use crate::stmt::{Body, BodyStmt, FuncDef, IfStmt, Program, ReturnStmt, Stmt, WhileStmt};

/// Converts any node back to its canonical Jott text form.
pub struct AstPrinter;

impl AstPrinter {
    /// Render a whole program: its function definitions, concatenated.
    pub fn print(program: &Program<'_>) -> String {
        program.functions.iter().map(Self::func_def).collect()
    }

    pub fn func_def(func: &FuncDef<'_>) -> String {
        let params: String = func
            .params
            .iter()
            .map(|p| format!("{}:{}", p.name.lexeme, p.ty.lexeme))
            .collect::<Vec<String>>()
            .join(",");

        format!(
            "{}[{}]:{}{{{}}}",
            func.name.lexeme,
            params,
            func.return_type.lexeme,
            Self::body(&func.body)
        )
    }

    pub fn body(body: &Body<'_>) -> String {
        let mut readout: String = body.statements.iter().map(Self::body_stmt).collect();

        if let Some(ret) = &body.ret {
            readout.push_str(&Self::return_stmt(ret));
        }

        readout
    }

    pub fn body_stmt(stmt: &BodyStmt<'_>) -> String {
        match stmt {
            BodyStmt::If(node) => Self::if_stmt(node),

            BodyStmt::While(node) => Self::while_stmt(node),

            BodyStmt::Simple(node) => Self::stmt(node),
        }
    }

    pub fn stmt(stmt: &Stmt<'_>) -> String {
        match stmt {
            // the space is load-bearing: `Integerx;` would re-tokenize as
            // one identifier
            Stmt::VarDecl { ty, name } => format!("{} {};", ty.lexeme, name.lexeme),

            Stmt::Assign { ty, name, value } => match ty {
                Some(ty) => format!("{} {}={};", ty.lexeme, name.lexeme, Self::expr(value)),
                None => format!("{}={};", name.lexeme, Self::expr(value)),
            },

            Stmt::Call(call) => format!("{};", Self::func_call(call)),
        }
    }

    pub fn if_stmt(node: &IfStmt<'_>) -> String {
        let mut readout: String = format!(
            "if[{}]{{{}}}",
            Self::b_expr(&node.cond),
            Self::body(&node.body)
        );

        for arm in &node.elseifs {
            readout.push_str(&format!(
                "elseif[{}]{{{}}}",
                Self::b_expr(&arm.cond),
                Self::body(&arm.body)
            ));
        }

        if let Some(else_body) = &node.else_body {
            readout.push_str(&format!("else{{{}}}", Self::body(else_body)));
        }

        readout
    }

    pub fn while_stmt(node: &WhileStmt<'_>) -> String {
        format!(
            "while[{}]{{{}}}",
            Self::b_expr(&node.cond),
            Self::body(&node.body)
        )
    }

    pub fn return_stmt(node: &ReturnStmt<'_>) -> String {
        format!("return {};", Self::expr(&node.value))
    }

    pub fn func_call(call: &FuncCall<'_>) -> String {
        let args: String = call
            .args
            .iter()
            .map(Self::expr)
            .collect::<Vec<String>>()
            .join(",");

        format!("{}[{}]", call.name.lexeme, args)
    }

    pub fn expr(expr: &Expr<'_>) -> String {
        match expr {
            Expr::Int(node) => Self::i_expr(node),

            Expr::Dbl(node) => Self::d_expr(node),

            Expr::Bool(node) => Self::b_expr(node),

            Expr::Str(node) => Self::s_expr(node),
        }
    }

    pub fn i_expr(node: &IntExpr<'_>) -> String {
        let mut readout: String = Self::i_term(&node.first);

        if let Some(rest) = &node.rest {
            readout.push_str(rest.op.lexeme);
            readout.push_str(&Self::i_term(&rest.term));

            if let Some((op, chain)) = &rest.chain {
                readout.push_str(op.lexeme);
                readout.push_str(&Self::i_expr(chain));
            }
        }

        readout
    }

    fn i_term(term: &IntTerm<'_>) -> String {
        match term {
            IntTerm::Literal { sign, value } => match sign {
                Some(sign) => format!("{}{}", sign.lexeme, value.lexeme),
                None => value.lexeme.to_owned(),
            },

            IntTerm::Id(id) => id.lexeme.to_owned(),

            IntTerm::Call(call) => Self::func_call(call),
        }
    }

    pub fn d_expr(node: &DblExpr<'_>) -> String {
        let mut readout: String = Self::d_term(&node.first);

        if let Some(rest) = &node.rest {
            readout.push_str(rest.op.lexeme);
            readout.push_str(&Self::d_term(&rest.term));

            if let Some((op, chain)) = &rest.chain {
                readout.push_str(op.lexeme);
                readout.push_str(&Self::d_expr(chain));
            }
        }

        readout
    }

    fn d_term(term: &DblTerm<'_>) -> String {
        match term {
            DblTerm::Literal { sign, value } => match sign {
                Some(sign) => format!("{}{}", sign.lexeme, value.lexeme),
                None => value.lexeme.to_owned(),
            },

            DblTerm::Id(id) => id.lexeme.to_owned(),

            DblTerm::Call(call) => Self::func_call(call),
        }
    }

    pub fn b_expr(node: &BoolExpr<'_>) -> String {
        let mut readout: String = Self::b_term(&node.first);

        if let Some(rest) = &node.rest {
            readout.push_str(rest.op.lexeme);
            readout.push_str(&Self::b_term(&rest.term));

            if let Some((op, chain)) = &rest.chain {
                readout.push_str(op.lexeme);
                readout.push_str(&Self::b_expr(chain));
            }
        }

        readout
    }

    fn b_term(term: &BoolTerm<'_>) -> String {
        match term {
            BoolTerm::Literal(tok) | BoolTerm::Id(tok) => tok.lexeme.to_owned(),

            BoolTerm::Call(call) => Self::func_call(call),

            BoolTerm::Int(node) => Self::i_expr(node),

            BoolTerm::Dbl(node) => Self::d_expr(node),

            BoolTerm::Str(node) => Self::s_expr(node),
        }
    }

    /// String literals render with their quotes (the lexeme keeps them).
    pub fn s_expr(node: &StrExpr<'_>) -> String {
        match node {
            StrExpr::Literal(tok) | StrExpr::Id(tok) => tok.lexeme.to_owned(),

            StrExpr::Call(call) => Self::func_call(call),
        }
    }
}
