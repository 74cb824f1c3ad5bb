/*!
Recursive‑descent parser for Jott, with speculative disambiguation.

Grammar (EBNF — condensed)
--------------------------

```text
program        → function_def* ;                      (end of input terminates)
function_def   → id "[" func_def_params? "]" ":" type_or_void "{" body? "}" ;
func_def_params→ id ":" type ( "," id ":" type )* ;
body           → body_stmt* return_stmt? ;            (return, if present, is last)
body_stmt      → if_stmt | while_stmt | stmt ;
if_stmt        → "if" "[" b_expr "]" "{" body? "}" elseif* else? ;
elseif         → "elseif" "[" b_expr "]" "{" body? "}" ;
else           → "else" "{" body? "}" ;
while_stmt     → "while" "[" b_expr "]" "{" body? "}" ;
stmt           → var_decl | assignment | func_call ";" ;
var_decl       → type id ";" ;
assignment     → type? id "=" expr ";" ;
func_call      → id "[" params? "]" ;
params         → expr ( "," expr )* ;
return_stmt    → "return" expr ";" ;
expr           → i_expr | d_expr | b_expr | s_expr ;  (resolved by probing)
i_expr         → i_term ( math_op i_term ( math_op i_expr )? )? ;
d_expr         → d_term ( math_op d_term ( math_op d_expr )? )? ;
b_expr         → naked_term | b_term rel_op b_term ( rel_op b_expr )? ;
s_expr         → string | id | func_call ;
```

Every expression must run into one of `;` `]` `,`; integer/double/string
expressions additionally stop in front of a relational operator so they can
serve as boolean operands.

Disambiguation
--------------

The expression sub‑grammars overlap for several leading tokens (`x`,
`x[…]`, `3`, `-3`, …), and no fixed lookahead separates them. At each
undecided site the parser *probes*: it runs the real committing production
against a cursor snapshot, restores the cursor, and only then commits to
whichever sub‑grammar matched. Probes nest (a boolean operand slot probes
the double and integer grammars in turn) and always terminate, since every
recursive step consumes at least one token.

When no trial matches outright, the parser commits to the trial whose stop
point left the fewest unconsumed tokens — ties preferring integer, then
double, then boolean. That committed run either raises the most relevant
positioned error, or, for arithmetic chains of three or more terms,
completes after all.

Failure model
-------------

Productions are all‑or‑nothing: success consumes exactly the derivation's
tokens, failure returns a positioned [`JottError`] that unwinds the whole
parse. Nothing is recovered, aggregated, or retried.

Logging policy: `info!` for lifecycle milestones, `debug!` for descent into
grammar branches and probe outcomes.
*/

use crate::error::{JottError, Result};
use crate::expr::{
    BoolExpr, BoolRest, BoolTerm, DblExpr, DblRest, DblTerm, Expr, FuncCall, IntExpr, IntRest,
    IntTerm, StrExpr,
};
use crate::stmt::{
    Body, BodyStmt, ElseIf, FuncDef, IfStmt, ParamDef, Program, ReturnStmt, Stmt, WhileStmt,
};
use crate::token::{Token, TokenType};

use log::{debug, info};

/// Does `t` end an expression outright?
#[inline(always)]
fn is_end_token(t: &Token) -> bool {
    matches!(
        t.token_type,
        TokenType::SEMICOLON | TokenType::R_BRACKET | TokenType::COMMA
    )
}

/// Does `t` end an integer/double/string term position? Relational
/// operators also stop these so they can serve as boolean operands.
#[inline(always)]
fn is_term_end(t: &Token) -> bool {
    is_end_token(t) || t.token_type == TokenType::REL_OP
}

/// Is `t` a sign usable in front of a numeric literal?
#[inline(always)]
fn is_sign(t: &Token) -> bool {
    t.token_type == TokenType::MATH_OP && (t.lexeme == "+" || t.lexeme == "-")
}

/// Diagnostic word for what an integer term was.
fn int_term_desc(term: &IntTerm<'_>) -> &'static str {
    match term {
        IntTerm::Call(_) => "func call",
        _ => "int",
    }
}

/// Diagnostic word for what a double term was.
fn dbl_term_desc(term: &DblTerm<'_>) -> &'static str {
    match term {
        DblTerm::Call(_) => "func call",
        _ => "double",
    }
}

/// Outcome of one speculative trial: whether the production matched, and
/// how many tokens were still unconsumed where it stopped.
struct Trial {
    matched: bool,
    leftover: usize,
}

/// Top‑level parser over an immutable slice of tokens.
///
/// Committing productions advance `current`; probing saves and restores
/// it. `file` positions the diagnostic for an empty stream, which carries
/// no token to cite.
pub struct Parser<'a> {
    tokens: &'a [Token<'a>],
    current: usize,
    file: &'a str,
}

/// Parse a complete token stream into a [`Program`], or report the first
/// syntax error. The stream must contain at least one function definition.
pub fn parse<'a>(tokens: &'a [Token<'a>], file: &'a str) -> Result<Program<'a>> {
    let mut parser: Parser<'a> = Parser::new(tokens, file);

    parser.parse()
}

impl<'a> Parser<'a> {
    /// Construct a new parser.
    pub fn new(tokens: &'a [Token<'a>], file: &'a str) -> Self {
        info!("Parser created with {} tokens", tokens.len());

        Self {
            tokens,
            current: 0,
            file,
        }
    }

    // ───────────────────────── public API ─────────────────────────

    /// Parse an entire program: a function definition list consuming the
    /// whole stream.
    pub fn parse(&mut self) -> Result<Program<'a>> {
        info!("Beginning parse phase");

        if self.tokens.is_empty() {
            return Err(JottError::parse("program missing function def", self.file, 1));
        }

        let mut functions: Vec<FuncDef<'a>> = Vec::new();

        while let Some(front) = self.peek() {
            if front.is_id() {
                functions.push(self.func_def()?);
            } else {
                return Err(self.err_at(format!("expected id got {}", front.describe()), front));
            }
        }

        Ok(Program { functions })
    }

    // ──────────────────────── structural rules ────────────────────

    fn func_def(&mut self) -> Result<FuncDef<'a>> {
        debug!("Entering func_def");

        let name: &Token<'_> = self.advance(); // caller verified the id

        self.expect(TokenType::L_BRACKET, name, "func def missing [", "expected [ got ")?;

        // params always open with a plain id when present
        let params: Vec<ParamDef<'a>> = match self.peek() {
            Some(t) if t.token_type == TokenType::ID_OR_KEYWORD => {
                if t.is_id() {
                    self.func_def_params()?
                } else {
                    return Err(self.err_at(format!("expected id got {}", t.describe()), t));
                }
            }

            Some(t) if t.token_type != TokenType::R_BRACKET => {
                return Err(JottError::parse(
                    format!("expected id got {}", t.describe()),
                    name.file,
                    name.line,
                ));
            }

            _ => Vec::new(),
        };

        self.expect(TokenType::R_BRACKET, name, "func def missing ]", "expected ] got ")?;
        self.expect(TokenType::COLON, name, "func def missing :", "expected : got ")?;

        let return_type: &Token<'_> = match self.peek() {
            Some(t) if t.is_return_type() => self.advance(),

            Some(t) => {
                return Err(JottError::parse(
                    format!("expected type got {}", t.describe()),
                    name.file,
                    name.line,
                ));
            }

            None => {
                return Err(JottError::parse(
                    "func def missing return type",
                    name.file,
                    name.line,
                ));
            }
        };

        self.expect(TokenType::L_BRACE, name, "func def missing {", "expected { got ")?;

        let body: Body<'a> = self.body()?;

        self.expect(TokenType::R_BRACE, name, "func def missing }", "expected } got ")?;

        Ok(FuncDef {
            name,
            params,
            return_type,
            body,
        })
    }

    fn func_def_params(&mut self) -> Result<Vec<ParamDef<'a>>> {
        let first: &Token<'_> = self.advance(); // caller verified the id

        self.expect(
            TokenType::COLON,
            first,
            "func def params missing :",
            "expected : got ",
        )?;

        let ty: &Token<'_> = match self.peek() {
            Some(t) if t.is_type() => self.advance(),

            Some(t) => {
                return Err(JottError::parse(
                    format!("expected type got {}", t.describe()),
                    first.file,
                    first.line,
                ));
            }

            None => {
                return Err(JottError::parse(
                    "func def missing param type",
                    first.file,
                    first.line,
                ));
            }
        };

        let mut params: Vec<ParamDef<'a>> = vec![ParamDef { name: first, ty }];

        // an id straight after a finished param means a missing separator
        if let Some(t) = self.peek() {
            if t.token_type == TokenType::ID_OR_KEYWORD {
                return Err(self.err_at(format!("expected , or ] got {}", t.describe()), t));
            }
        }

        while self.check(TokenType::COMMA) {
            let comma: &Token<'_> = self.advance();

            let name: &Token<'_> = match self.peek() {
                Some(t) if t.is_id() => self.advance(),

                Some(t) => {
                    return Err(JottError::parse(
                        format!("expected id got {}", t.describe()),
                        comma.file,
                        comma.line,
                    ));
                }

                None => {
                    return Err(JottError::parse(
                        "func def param missing id",
                        comma.file,
                        comma.line,
                    ));
                }
            };

            self.expect(
                TokenType::COLON,
                name,
                "func def param missing :",
                "expected : got ",
            )?;

            let ty: &Token<'_> = match self.peek() {
                Some(t) if t.is_type() => self.advance(),

                Some(t) => {
                    return Err(JottError::parse(
                        format!("expected type got {}", t.describe()),
                        name.file,
                        name.line,
                    ));
                }

                None => {
                    return Err(JottError::parse(
                        "func def param missing type",
                        name.file,
                        name.line,
                    ));
                }
            };

            params.push(ParamDef { name, ty });

            if let Some(t) = self.peek() {
                if t.token_type == TokenType::ID_OR_KEYWORD {
                    return Err(self.err_at(format!("expected , or ] got {}", t.describe()), t));
                }
            }
        }

        Ok(params)
    }

    // ───────────────────────── statement rules ────────────────────

    fn body(&mut self) -> Result<Body<'a>> {
        let mut statements: Vec<BodyStmt<'a>> = Vec::new();
        let mut ret: Option<ReturnStmt<'a>> = None;

        while let Some(front) = self.peek() {
            if front.token_type == TokenType::R_BRACE {
                break;
            }

            if front.lexeme == "return" {
                ret = Some(self.return_stmt()?);

                break; // a return is always the final statement of a body
            }

            statements.push(self.body_stmt()?);
        }

        Ok(Body { statements, ret })
    }

    fn body_stmt(&mut self) -> Result<BodyStmt<'a>> {
        debug!("Entering body_stmt");

        let front: &Token<'_> = match self.peek() {
            Some(t) => t,
            None => return Err(self.err_front("body stmt missing stmt")),
        };

        match front.lexeme {
            "elseif" => Err(self.err_at("elseif without an if", front)),

            "else" => Err(self.err_at("else without an if", front)),

            "if" => Ok(BodyStmt::If(self.if_stmt()?)),

            "while" => Ok(BodyStmt::While(self.while_stmt()?)),

            _ if front.token_type == TokenType::ID_OR_KEYWORD => {
                Ok(BodyStmt::Simple(self.stmt()?))
            }

            _ => Err(self.err_at(format!("expected stmt got {}", front.describe()), front)),
        }
    }

    /// Fixed 3‑token lookahead on concrete categories/lexemes: typed
    /// declaration vs. typed/bare assignment vs. bare call are lexically
    /// distinguishable without probing.
    fn stmt(&mut self) -> Result<Stmt<'a>> {
        debug!("Entering stmt");

        let t0: Option<&Token<'_>> = self.peek();
        let t1: Option<&Token<'_>> = self.peek_at(1);
        let t2: Option<&Token<'_>> = self.peek_at(2);

        let typed_head: bool = t0.is_some_and(|t| t.is_type())
            && t1.is_some_and(|t| t.token_type == TokenType::ID_OR_KEYWORD);

        if typed_head && t2.is_some_and(|t| t.token_type == TokenType::SEMICOLON) {
            return self.var_decl();
        }

        if typed_head && t2.is_some_and(|t| t.token_type == TokenType::ASSIGN) {
            return self.assignment();
        }

        if t0.is_some_and(|t| t.is_id()) {
            if t1.is_some_and(|t| t.token_type == TokenType::ASSIGN) {
                return self.assignment();
            }

            let name: &Token<'_> = match t0 {
                Some(t) => t,
                None => return Err(self.err_front("Expected stmt start got nothing")),
            };

            let call: FuncCall<'a> = self.func_call()?;

            self.expect(
                TokenType::SEMICOLON,
                name,
                "func call stmt missing ;",
                "expected ; got ",
            )?;

            return Ok(Stmt::Call(call));
        }

        match t0 {
            Some(t) => Err(self.err_at(format!("Expected stmt start got {}", t.describe()), t)),
            None => Err(self.err_front("Expected stmt start got nothing")),
        }
    }

    fn var_decl(&mut self) -> Result<Stmt<'a>> {
        let ty: &Token<'_> = self.advance(); // lookahead verified the type

        let name: &Token<'_> = match self.peek() {
            Some(t) if t.is_id() => self.advance(),

            Some(t) => {
                return Err(JottError::parse(
                    format!("expected id got {}", t.describe()),
                    ty.file,
                    ty.line,
                ));
            }

            None => return Err(JottError::parse("var dec missing id", ty.file, ty.line)),
        };

        self.expect(TokenType::SEMICOLON, ty, "var dec missing ;", "expected ; got ")?;

        Ok(Stmt::VarDecl { ty, name })
    }

    fn assignment(&mut self) -> Result<Stmt<'a>> {
        let ty: Option<&Token<'_>> = if self.peek().is_some_and(|t| t.is_type()) {
            Some(self.advance())
        } else {
            None
        };

        let name: &Token<'_> = match self.peek() {
            Some(t) if t.is_id() => self.advance(),

            Some(t) => {
                return Err(self.err_at(format!("expected id got {}", t.describe()), t));
            }

            None => return Err(self.err_front("asmt missing id")),
        };

        self.expect(TokenType::ASSIGN, name, "asmt missing =", "expected = got ")?;

        // the declared type, if any, is NOT used to pick the expression
        // kind; the expression resolves itself and the semantic phase
        // reconciles the two
        let value: Expr<'a> = match self.peek() {
            Some(t) if t.token_type != TokenType::SEMICOLON => self.expr()?,

            Some(t) => {
                return Err(JottError::parse(
                    format!("expected expr got {}", t.describe()),
                    name.file,
                    name.line,
                ));
            }

            None => return Err(JottError::parse("asmt missing expr", name.file, name.line)),
        };

        self.expect(TokenType::SEMICOLON, name, "asmt missing ;", "expected ; got ")?;

        Ok(Stmt::Assign { ty, name, value })
    }

    fn func_call(&mut self) -> Result<FuncCall<'a>> {
        let name: &Token<'_> = self.advance(); // caller verified the id

        self.expect(TokenType::L_BRACKET, name, "func call missing [", "expected [ got ")?;

        let args: Vec<Expr<'a>> = match self.peek() {
            Some(t) if t.token_type != TokenType::R_BRACKET => self.params()?,
            _ => Vec::new(),
        };

        self.expect(TokenType::R_BRACKET, name, "func call missing ]", "expected ] got ")?;

        Ok(FuncCall { name, args })
    }

    fn params(&mut self) -> Result<Vec<Expr<'a>>> {
        // the first param must not open with a separator
        if let Some(t) = self.peek() {
            if t.token_type == TokenType::COMMA {
                return Err(self.err_at("Expected expr got ,", t));
            }
        }

        let mut args: Vec<Expr<'a>> = vec![self.expr()?];

        loop {
            match self.peek() {
                Some(t) if t.token_type == TokenType::COMMA => {
                    let comma: &Token<'_> = self.advance();

                    if self.peek().is_none() {
                        return Err(JottError::parse(
                            "func params missing expr",
                            comma.file,
                            comma.line,
                        ));
                    }

                    args.push(self.expr()?);
                }

                Some(t) if t.token_type == TokenType::R_BRACKET => break,

                Some(t) => {
                    return Err(self.err_at(format!("expected , or ] got {}", t.describe()), t));
                }

                None => return Err(self.err_front("func call missing ]")),
            }
        }

        Ok(args)
    }

    fn return_stmt(&mut self) -> Result<ReturnStmt<'a>> {
        let ret: &Token<'_> = self.advance(); // 'return'

        let value: Expr<'a> = match self.peek() {
            Some(t) if t.token_type != TokenType::SEMICOLON => self.expr()?,

            _ => {
                return Err(JottError::parse(
                    "Expected return expr got ;",
                    ret.file,
                    ret.line,
                ));
            }
        };

        self.expect(
            TokenType::SEMICOLON,
            ret,
            "return expr missing ;",
            "expected ; got ",
        )?;

        Ok(ReturnStmt { value })
    }

    fn if_stmt(&mut self) -> Result<IfStmt<'a>> {
        debug!("Entering if_stmt");

        let kw: &Token<'_> = self.advance(); // 'if'

        self.expect(TokenType::L_BRACKET, kw, "if stmt missing [", "expected [ got ")?;

        let cond: BoolExpr<'a> = match self.peek() {
            Some(t) if t.token_type != TokenType::R_BRACKET => self.b_expr()?,

            Some(t) => return Err(self.err_at("if stmt missing condition", t)),

            None => return Err(JottError::parse("if stmt missing ]", kw.file, kw.line)),
        };

        self.expect(TokenType::R_BRACKET, kw, "if stmt missing ]", "expected ] got ")?;
        self.expect(TokenType::L_BRACE, kw, "if stmt missing {", "expected { got ")?;

        let body: Body<'a> = self.body()?;

        self.expect(TokenType::R_BRACE, kw, "if stmt missing }", "expected } got ")?;

        let mut elseifs: Vec<ElseIf<'a>> = Vec::new();

        while self.peek().is_some_and(|t| t.lexeme == "elseif") {
            elseifs.push(self.elseif()?);
        }

        let else_body: Option<Body<'a>> = if self.peek().is_some_and(|t| t.lexeme == "else") {
            Some(self.else_block()?)
        } else {
            None
        };

        Ok(IfStmt {
            cond,
            body,
            elseifs,
            else_body,
        })
    }

    fn elseif(&mut self) -> Result<ElseIf<'a>> {
        let kw: &Token<'_> = self.advance(); // 'elseif'

        self.expect(TokenType::L_BRACKET, kw, "elseif missing [", "expected [ got ")?;

        if self.peek().is_none() {
            return Err(JottError::parse("elseif missing ]", kw.file, kw.line));
        }

        let cond: BoolExpr<'a> = self.b_expr()?;

        self.expect(TokenType::R_BRACKET, kw, "elseif missing ]", "expected ] got ")?;
        self.expect(TokenType::L_BRACE, kw, "elseif missing {", "expected { got ")?;

        let body: Body<'a> = self.body()?;

        self.expect(TokenType::R_BRACE, kw, "elseif missing }", "expected } got ")?;

        Ok(ElseIf { cond, body })
    }

    fn else_block(&mut self) -> Result<Body<'a>> {
        let kw: &Token<'_> = self.advance(); // 'else'

        self.expect(TokenType::L_BRACE, kw, "else missing {", "expected { got ")?;

        let body: Body<'a> = self.body()?;

        self.expect(TokenType::R_BRACE, kw, "else missing }", "expected } got ")?;

        Ok(body)
    }

    fn while_stmt(&mut self) -> Result<WhileStmt<'a>> {
        debug!("Entering while_stmt");

        let kw: &Token<'_> = self.advance(); // 'while'

        self.expect(TokenType::L_BRACKET, kw, "while stmt missing [", "expected [ got ")?;

        let cond: BoolExpr<'a> = match self.peek() {
            Some(t) if t.token_type != TokenType::R_BRACKET => self.b_expr()?,

            Some(t) => return Err(self.err_at("while stmt missing condition", t)),

            None => return Err(JottError::parse("while stmt missing ]", kw.file, kw.line)),
        };

        self.expect(TokenType::R_BRACKET, kw, "while stmt missing ]", "expected ] got ")?;
        self.expect(TokenType::L_BRACE, kw, "while stmt missing {", "expected { got ")?;

        let body: Body<'a> = self.body()?;

        self.expect(TokenType::R_BRACE, kw, "while stmt missing }", "expected } got ")?;

        Ok(WhileStmt { cond, body })
    }

    // ─────────────────────── expression dispatch ──────────────────

    /// Parse an expression of whichever kind the tokens derive.
    ///
    /// A string literal running straight into a terminator is a string
    /// expression outright; every other opening goes through the prober.
    pub fn expr(&mut self) -> Result<Expr<'a>> {
        debug!("Entering expr at token {}", self.current);

        let expression: Expr<'a> = if self.check(TokenType::STRING)
            && self.peek_at(1).is_some_and(is_end_token)
        {
            Expr::Str(self.s_expr()?)
        } else {
            let bool_trial: Trial = self.probe(Self::b_expr);

            if bool_trial.matched {
                Expr::Bool(self.b_expr()?)
            } else {
                let dbl_trial: Trial = self.probe(Self::d_expr);

                if dbl_trial.matched {
                    Expr::Dbl(self.d_expr()?)
                } else {
                    let int_trial: Trial = self.probe(Self::i_expr);

                    if int_trial.matched {
                        Expr::Int(self.i_expr()?)
                    } else {
                        // No trial matched outright. Commit the one whose
                        // stop point left the fewest tokens: that run
                        // either surfaces the most relevant error, or
                        // (for 3+-term chains) completes after all. Ties
                        // prefer integer, then double, then boolean.
                        if int_trial.leftover <= dbl_trial.leftover
                            && int_trial.leftover <= bool_trial.leftover
                        {
                            Expr::Int(self.i_expr()?)
                        } else if dbl_trial.leftover <= bool_trial.leftover {
                            Expr::Dbl(self.d_expr()?)
                        } else {
                            Expr::Bool(self.b_expr()?)
                        }
                    }
                }
            }
        };

        // every expression must run into ; ] or ,
        match self.peek() {
            Some(t) if is_end_token(t) => Ok(expression),

            Some(t) => Err(self.err_at(format!("expected ;|,|] got {}", t.describe()), t)),

            None => Err(self.err_front("expected ;|,|] got nothing")),
        }
    }

    // ───────────────────────── probing ────────────────────────────

    /// Run `production` speculatively: the cursor is restored afterwards,
    /// so a trial never leaves a trace on the committed state. Reports
    /// whether the trial matched and how many tokens it left unconsumed.
    fn probe<T>(&mut self, production: fn(&mut Self) -> Result<T>) -> Trial {
        let saved: usize = self.current;
        let matched: bool = production(self).is_ok();
        let leftover: usize = self.tokens.len() - self.current;

        self.current = saved;

        debug!(
            "Probe from token {}: matched={}, leftover={}",
            saved, matched, leftover
        );

        Trial { matched, leftover }
    }

    // ─────────────────────── expression rules ─────────────────────

    fn i_expr(&mut self) -> Result<IntExpr<'a>> {
        let first: IntTerm<'a> = self.i_term("start")?;

        if self.peek().is_some_and(is_term_end) {
            return Ok(IntExpr { first, rest: None });
        }

        let op: &Token<'_> = self.math_op_after(int_term_desc(&first))?;
        let term: IntTerm<'a> = self.i_term("term")?;

        if self.peek().is_some_and(is_term_end) {
            return Ok(IntExpr {
                first,
                rest: Some(IntRest {
                    op,
                    term,
                    chain: None,
                }),
            });
        }

        let chain_op: &Token<'_> = self.math_op_after(int_term_desc(&term))?;
        let chain: Box<IntExpr<'a>> = Box::new(self.i_expr()?);

        Ok(IntExpr {
            first,
            rest: Some(IntRest {
                op,
                term,
                chain: Some((chain_op, chain)),
            }),
        })
    }

    /// One integer term: optionally-signed integer literal, bare id, or
    /// call. `slot` is "start" or "term" for the position's diagnostics.
    fn i_term(&mut self, slot: &str) -> Result<IntTerm<'a>> {
        let front: &Token<'_> = match self.peek() {
            Some(t) => t,
            None => return Err(self.err_front(format!("Expected i expr {slot} got nothing"))),
        };

        // a term is never the last token: at minimum a terminator follows
        if front.is_id() && self.remaining() >= 2 {
            if self.peek_at(1).is_some_and(|t| t.token_type == TokenType::L_BRACKET) {
                return Ok(IntTerm::Call(self.func_call()?));
            }

            return Ok(IntTerm::Id(self.advance()));
        }

        if front.token_type == TokenType::NUMBER && self.remaining() >= 2 {
            if front.is_double_literal() {
                return Err(self.err_at("Expected int got double", front));
            }

            return Ok(IntTerm::Literal {
                sign: None,
                value: self.advance(),
            });
        }

        if is_sign(front)
            && self.remaining() >= 3
            && self.peek_at(1).is_some_and(|t| t.token_type == TokenType::NUMBER)
        {
            if self.peek_at(1).is_some_and(|t| t.is_double_literal()) {
                return Err(self.err_at("Expected int got double", front));
            }

            let sign: &Token<'_> = self.advance();
            let value: &Token<'_> = self.advance();

            return Ok(IntTerm::Literal {
                sign: Some(sign),
                value,
            });
        }

        if front.token_type == TokenType::MATH_OP {
            return Err(self.err_at("unaccompanied -/+ missing term or expr", front));
        }

        Err(self.err_at(
            format!("Expected i expr {slot} got {}", front.describe()),
            front,
        ))
    }

    fn d_expr(&mut self) -> Result<DblExpr<'a>> {
        let first: DblTerm<'a> = self.d_term("start")?;

        if self.peek().is_some_and(is_term_end) {
            return Ok(DblExpr { first, rest: None });
        }

        let op: &Token<'_> = self.math_op_after(dbl_term_desc(&first))?;
        let term: DblTerm<'a> = self.d_term("term")?;

        if self.peek().is_some_and(is_term_end) {
            return Ok(DblExpr {
                first,
                rest: Some(DblRest {
                    op,
                    term,
                    chain: None,
                }),
            });
        }

        let chain_op: &Token<'_> = self.math_op_after(dbl_term_desc(&term))?;
        let chain: Box<DblExpr<'a>> = Box::new(self.d_expr()?);

        Ok(DblExpr {
            first,
            rest: Some(DblRest {
                op,
                term,
                chain: Some((chain_op, chain)),
            }),
        })
    }

    /// One double term; the literal must carry `.` to count as a double.
    fn d_term(&mut self, slot: &str) -> Result<DblTerm<'a>> {
        let front: &Token<'_> = match self.peek() {
            Some(t) => t,
            None => return Err(self.err_front(format!("Expected d expr {slot} got nothing"))),
        };

        if front.is_id() && self.remaining() >= 2 {
            if self.peek_at(1).is_some_and(|t| t.token_type == TokenType::L_BRACKET) {
                return Ok(DblTerm::Call(self.func_call()?));
            }

            return Ok(DblTerm::Id(self.advance()));
        }

        if front.token_type == TokenType::NUMBER && self.remaining() >= 2 {
            if !front.is_double_literal() {
                return Err(self.err_at("Expected double got int", front));
            }

            return Ok(DblTerm::Literal {
                sign: None,
                value: self.advance(),
            });
        }

        if is_sign(front)
            && self.remaining() >= 3
            && self.peek_at(1).is_some_and(|t| t.token_type == TokenType::NUMBER)
        {
            if self.peek_at(1).is_some_and(|t| !t.is_double_literal()) {
                return Err(self.err_at("Expected double got int", front));
            }

            let sign: &Token<'_> = self.advance();
            let value: &Token<'_> = self.advance();

            return Ok(DblTerm::Literal {
                sign: Some(sign),
                value,
            });
        }

        if front.token_type == TokenType::MATH_OP {
            return Err(self.err_at("unaccompanied -/+ missing term or expr", front));
        }

        Err(self.err_at(
            format!("Expected d expr {slot} got {}", front.describe()),
            front,
        ))
    }

    /// Consume the MATH_OP continuing an arithmetic expression, or report
    /// what actually followed the term described by `pre`.
    fn math_op_after(&mut self, pre: &str) -> Result<&'a Token<'a>> {
        match self.peek() {
            Some(t) if t.token_type == TokenType::MATH_OP => Ok(self.advance()),

            Some(t) => Err(self.err_at(
                format!("Unexpected token - {} after {}", t.describe(), pre),
                t,
            )),

            None => Err(self.err_front(format!("Unexpected token - nothing after {pre}"))),
        }
    }

    /// String expression: exactly one term, no operators ever follow.
    fn s_expr(&mut self) -> Result<StrExpr<'a>> {
        let front: &Token<'_> = match self.peek() {
            Some(t) => t,
            None => return Err(self.err_front("Expected s expr start got nothing")),
        };

        let node: StrExpr<'a> = if front.token_type == TokenType::STRING {
            StrExpr::Literal(self.advance())
        } else if front.is_id() {
            if self.peek_at(1).is_some_and(|t| t.token_type == TokenType::L_BRACKET) {
                StrExpr::Call(self.func_call()?)
            } else {
                StrExpr::Id(self.advance())
            }
        } else {
            return Err(self.err_at(
                format!("Expected s expr start got {}", front.describe()),
                front,
            ));
        };

        match self.peek() {
            Some(t) if is_term_end(t) => Ok(node),

            Some(t) => {
                let pre: &str = match node {
                    StrExpr::Call(_) => "func call",
                    _ => "string",
                };

                Err(self.err_at(
                    format!("Unexpected token - {} after {}", t.describe(), pre),
                    t,
                ))
            }

            None => Err(self.err_front("Unexpected token - nothing after string")),
        }
    }

    /// Boolean expression: a naked id/call/literal ending at a terminator,
    /// or probed operands joined by relational operators.
    fn b_expr(&mut self) -> Result<BoolExpr<'a>> {
        debug!("Entering b_expr at token {}", self.current);

        // 1. a lone identifier or call running straight into a terminator
        //    ends the expression in one term
        if self.peek().is_some_and(|t| t.is_id()) && self.remaining() >= 2 {
            if self.peek_at(1).is_some_and(|t| t.token_type == TokenType::L_BRACKET) {
                let saved: usize = self.current;
                let trial: Result<FuncCall<'a>> = self.func_call();
                let stop: usize = self.current;

                self.current = saved;

                // a malformed call fails the whole expression
                trial?;

                if self.tokens.get(stop).is_some_and(is_end_token) {
                    let call: FuncCall<'a> = self.func_call()?;

                    return Ok(BoolExpr {
                        first: BoolTerm::Call(call),
                        rest: None,
                    });
                }
            } else if self.peek_at(1).is_some_and(is_end_token) {
                let id: &Token<'_> = self.advance();

                return Ok(BoolExpr {
                    first: BoolTerm::Id(id),
                    rest: None,
                });
            }
        }

        // 2. first operand
        let first: BoolTerm<'a> = self.b_term()?;

        // 3. a naked True/False may end here; composite operands need a
        //    relational operator
        match self.peek() {
            Some(t) if is_end_token(t) && matches!(first, BoolTerm::Literal(_)) => {
                return Ok(BoolExpr { first, rest: None });
            }

            Some(t) if t.token_type == TokenType::REL_OP => {}

            Some(t) => {
                return Err(if matches!(first, BoolTerm::Literal(_)) {
                    self.err_at(
                        format!("Unexpected token - {} after boolean", t.describe()),
                        t,
                    )
                } else {
                    self.err_at(
                        format!("Expected rel op after i/d/s expr got {}", t.describe()),
                        t,
                    )
                });
            }

            None => {
                return Err(self.err_front("Expected rel op after i/d/s expr got nothing"));
            }
        }

        let op: &Token<'_> = self.advance();

        // 4. second operand, same menu
        let term: BoolTerm<'a> = self.b_term()?;

        // 5. end, or chain into a further boolean expression
        match self.peek() {
            Some(t) if is_end_token(t) => Ok(BoolExpr {
                first,
                rest: Some(BoolRest {
                    op,
                    term,
                    chain: None,
                }),
            }),

            Some(t) if t.token_type == TokenType::REL_OP => {
                let chain_op: &Token<'_> = self.advance();
                let chain: Box<BoolExpr<'a>> = Box::new(self.b_expr()?);

                Ok(BoolExpr {
                    first,
                    rest: Some(BoolRest {
                        op,
                        term,
                        chain: Some((chain_op, chain)),
                    }),
                })
            }

            Some(t) => {
                let pre: &str = if matches!(term, BoolTerm::Literal(_)) {
                    "boolean"
                } else {
                    "expr"
                };

                Err(self.err_at(
                    format!("Unexpected token - {} after {}", t.describe(), pre),
                    t,
                ))
            }

            None => Err(self.err_front("Unexpected token - nothing after expr")),
        }
    }

    /// One boolean operand: probe double, then integer, then accept a
    /// string literal or a True/False literal.
    fn b_term(&mut self) -> Result<BoolTerm<'a>> {
        if self.probe(Self::d_expr).matched {
            return Ok(BoolTerm::Dbl(self.d_expr()?));
        }

        if self.probe(Self::i_expr).matched {
            return Ok(BoolTerm::Int(self.i_expr()?));
        }

        if self.check(TokenType::STRING) && self.remaining() >= 2 {
            return Ok(BoolTerm::Str(self.s_expr()?));
        }

        match self.peek() {
            Some(t) if t.is_bool_literal() && self.remaining() >= 2 => {
                Ok(BoolTerm::Literal(self.advance()))
            }

            Some(t) => Err(self.err_at(format!("Expected b expr term got {}", t.describe()), t)),

            None => Err(self.err_front("Expected b expr term got nothing")),
        }
    }

    // ────────────────────── utility helpers ───────────────────────

    /// Front token, if any. The returned reference borrows the token
    /// slice, not the parser, so it stays usable across further calls.
    #[inline(always)]
    fn peek(&self) -> Option<&'a Token<'a>> {
        self.tokens.get(self.current)
    }

    /// Token `offset` positions past the front, if any.
    #[inline(always)]
    fn peek_at(&self, offset: usize) -> Option<&'a Token<'a>> {
        self.tokens.get(self.current + offset)
    }

    /// Tokens not yet consumed.
    #[inline(always)]
    fn remaining(&self) -> usize {
        self.tokens.len() - self.current
    }

    /// Is the front token of category `ttype`?
    #[inline(always)]
    fn check(&self, ttype: TokenType) -> bool {
        self.peek().is_some_and(|t| t.token_type == ttype)
    }

    /// Consume and return the front token. Callers guard with [`peek`];
    /// the productions above never advance past the end of the stream.
    #[inline(always)]
    fn advance(&mut self) -> &'a Token<'a> {
        let token: &'a Token<'a> = &self.tokens[self.current];

        self.current += 1;

        token
    }

    /// Match-or-fail consumption of one token of category `ttype`.
    ///
    /// An exhausted stream reports `missing` and a wrong front token
    /// reports `wrong` + its description, both positioned at `anchor` (the
    /// token that opened the enclosing construct).
    fn expect(
        &mut self,
        ttype: TokenType,
        anchor: &Token<'_>,
        missing: &str,
        wrong: &str,
    ) -> Result<&'a Token<'a>> {
        match self.peek() {
            Some(t) if t.token_type == ttype => Ok(self.advance()),

            Some(t) => Err(JottError::parse(
                format!("{}{}", wrong, t.describe()),
                anchor.file,
                anchor.line,
            )),

            None => Err(JottError::parse(missing, anchor.file, anchor.line)),
        }
    }

    /// Parse error positioned at `token`.
    fn err_at<S: Into<String>>(&self, msg: S, token: &Token<'_>) -> JottError {
        JottError::parse(msg, token.file, token.line)
    }

    /// Parse error positioned at the front of the stream, falling back to
    /// the last token (then the file itself) when the stream is exhausted.
    fn err_front<S: Into<String>>(&self, msg: S) -> JottError {
        match self.peek().or_else(|| self.tokens.last()) {
            Some(t) => JottError::parse(msg, t.file, t.line),
            None => JottError::parse(msg, self.file, 1),
        }
    }
}
