use log::info;
use phf::{phf_set, Set};
use serde::Serialize;
use std::fmt;

/// The token categories recognized by the Jott scanner.
///
/// Categories are purely lexical: keyword-vs-identifier resolution is
/// deferred to the parser, which inspects `ID_OR_KEYWORD` lexemes against
/// the tables below. `NUMBER` covers both integer and double literals;
/// the presence of `.` in the lexeme is the only signal separating them.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenType {
    /// Integer or double literal (`3`, `3.14`, `3.`, `.5`)
    NUMBER,

    /// String literal, quotes included in the lexeme
    STRING,

    /// Identifier or keyword; the parser decides which
    ID_OR_KEYWORD,

    /// '['
    L_BRACKET,

    /// ']'
    R_BRACKET,

    /// '{'
    L_BRACE,

    /// '}'
    R_BRACE,

    /// ','
    COMMA,

    /// ':'
    COLON,

    /// ';'
    SEMICOLON,

    /// '='
    ASSIGN,

    /// '+', '-', '*', '/'
    MATH_OP,

    /// '<', '<=', '>', '>=', '==', '!='
    REL_OP,
}

// ─────────────────────────────────────────────────────────────────────────────
// Language vocabulary (compile‑time perfect hash)
// ─────────────────────────────────────────────────────────────────────────────

/// Words that can never be used as identifiers.
pub static RESERVED: Set<&'static str> = phf_set! {
    "Void", "Double", "Integer", "Boolean", "String", "True", "False",
};

/// Types accepted in variable declarations and parameter lists.
pub static TYPES: Set<&'static str> = phf_set! {
    "Double", "Integer", "Boolean", "String",
};

/// Types accepted as a function return type.
pub static RETURN_TYPES: Set<&'static str> = phf_set! {
    "Void", "Double", "Integer", "Boolean", "String",
};

/// A scanned token: its category, the exact source substring that produced
/// it, and where it came from. Immutable once produced.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Token<'a> {
    /// The category of this token.
    pub token_type: TokenType,

    /// The exact substring from the source that produced this token.
    pub lexeme: &'a str,

    /// Name of the file the token was read from.
    pub file: &'a str,

    /// 1‑based line number in the source.
    pub line: usize,
}

impl<'a> Token<'a> {
    /// Create a new Token and log its creation at INFO level.
    pub fn new(token_type: TokenType, lexeme: &'a str, file: &'a str, line: usize) -> Self {
        info!(
            "Creating new token: type={:?}, lexeme={}, line={}",
            token_type, lexeme, line
        );

        Self {
            token_type,
            lexeme,
            file,
            line,
        }
    }

    /// Is this an identifier, i.e. an `ID_OR_KEYWORD` that is not reserved?
    #[inline]
    pub fn is_id(&self) -> bool {
        self.token_type == TokenType::ID_OR_KEYWORD && !RESERVED.contains(self.lexeme)
    }

    /// Is this a declarable type keyword (`Double|Integer|Boolean|String`)?
    #[inline]
    pub fn is_type(&self) -> bool {
        self.token_type == TokenType::ID_OR_KEYWORD && TYPES.contains(self.lexeme)
    }

    /// Is this a return-type keyword (a type, or `Void`)?
    #[inline]
    pub fn is_return_type(&self) -> bool {
        self.token_type == TokenType::ID_OR_KEYWORD && RETURN_TYPES.contains(self.lexeme)
    }

    /// Is this the literal `True` or `False`?
    #[inline]
    pub fn is_bool_literal(&self) -> bool {
        self.token_type == TokenType::ID_OR_KEYWORD
            && (self.lexeme == "True" || self.lexeme == "False")
    }

    /// For a NUMBER token: does the lexeme denote a double (contains `.`)?
    #[inline]
    pub fn is_double_literal(&self) -> bool {
        self.token_type == TokenType::NUMBER && self.lexeme.contains('.')
    }

    /// Human description of this token for diagnostics.
    ///
    /// Numbers describe their kind, identifiers split into
    /// boolean/type/Void/id, and everything else falls back to the lexeme.
    pub fn describe(&self) -> &str {
        match self.token_type {
            TokenType::NUMBER => {
                if self.lexeme.contains('.') {
                    "double"
                } else {
                    "int"
                }
            }

            TokenType::STRING => "string",

            TokenType::ID_OR_KEYWORD => {
                if self.lexeme == "True" || self.lexeme == "False" {
                    "boolean"
                } else if TYPES.contains(self.lexeme) {
                    "type"
                } else if self.lexeme == "Void" {
                    "Void"
                } else {
                    "id"
                }
            }

            _ => self.lexeme,
        }
    }
}

impl<'a> fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {} {}:{}",
            self.token_type, self.lexeme, self.file, self.line
        )
    }
}
