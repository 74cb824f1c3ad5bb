//! Centralised error hierarchy for the **Jott front end**.
//!
//! All subsystems (scanner, parser, CLI) convert their failure modes into
//! one of the variants defined here, enabling a uniform `Result<T>` alias
//! throughout the crate and ergonomic inter‑operation with `anyhow`.
//!
//! `Display` output is the diagnostic format itself: callers print the
//! error verbatim to stderr. Two shapes exist — lexical errors cite the
//! offending lexeme, parse errors do not:
//!
//! ```text
//! Syntax Error:
//! <message> "<lexeme>"
//! <file>:<line>
//! ```

use std::io;
use thiserror::Error;

use log::info;

/// Canonical error type used throughout the front end.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum JottError {
    /// Lexical (scanner) error, citing the offending lexeme.
    #[error("Syntax Error:\n{message} \"{lexeme}\"\n{file}:{line}")]
    Lex {
        /// Human‑readable description.
        message: String,

        /// The token text (possibly partial) that triggered the error.
        lexeme: String,

        /// File the error occurred in.
        file: String,

        /// 1‑based line where the error occurred.
        line: usize,
    },

    /// Syntactic (parser) error.
    #[error("Syntax Error:\n{message}\n{file}:{line}")]
    Parse {
        message: String,
        file: String,
        line: usize,
    },

    /// Wrapper around `std::io::Error` (transparent). Enables `?` on I/O ops.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// UTF‑8 decoding failure when ingesting external text.
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl JottError {
    /// Helper constructor for the **scanner**.
    pub fn lex<S: Into<String>, L: Into<String>>(
        msg: S,
        lexeme: L,
        file: &str,
        line: usize,
    ) -> Self {
        let message: String = msg.into();
        let lexeme: String = lexeme.into();

        info!(
            "Creating Lex error: line={}, lexeme={}, msg={}",
            line, lexeme, message
        );

        JottError::Lex {
            message,
            lexeme,
            file: file.to_owned(),
            line,
        }
    }

    /// Helper constructor for the **parser**.
    pub fn parse<S: Into<String>>(msg: S, file: &str, line: usize) -> Self {
        let message: String = msg.into();

        info!("Creating Parse error: line={}, msg={}", line, message);

        JottError::Parse {
            message,
            file: file.to_owned(),
            line,
        }
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, JottError>;
