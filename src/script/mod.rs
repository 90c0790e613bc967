//! Draw++: a small French-keyword scripting language for driving the
//! primitive renderer and the cursor.
//!
//! ```text
//! # five-pointed star
//! pour i de 1 à 5 {
//!     drawLine(x, y, x + dx, y + dy)
//!     moveCursor(dx, dy)
//!     rotateCursor(144)
//! }
//! ```

pub mod ast;
pub mod interpreter;
pub mod lexer;
pub mod parser;


use thiserror::Error;

use crate::cursor::Cursor;
use crate::draw::Surface;

pub use ast::Program;
pub use interpreter::{DEFAULT_MAX_LOOP_ITERATIONS, Interpreter, ScriptOptions, Value};

/// Errors raised while lexing, parsing or running a script.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScriptError {
    #[error("line {line}: unexpected character '{ch}'")]
    UnexpectedChar { line: usize, ch: char },

    #[error("line {line}: unterminated string")]
    UnterminatedString { line: usize },

    #[error("line {line}: invalid number '{text}'")]
    InvalidNumber { line: usize, text: String },

    #[error("line {line}: expected {expected}, found {found}")]
    UnexpectedToken {
        line: usize,
        expected: String,
        found: String,
    },

    #[error("line {line}: {name} takes {expected} arguments, got {got}")]
    Arity {
        line: usize,
        name: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("line {line}: undefined variable '{name}'")]
    UndefinedVariable { line: usize, name: String },

    #[error("line {line}: {message}")]
    Type { line: usize, message: String },

    #[error("line {line}: division by zero")]
    DivisionByZero { line: usize },

    #[error("line {line}: loop exceeded {limit} iterations")]
    LoopLimit { line: usize, limit: u64 },

    #[error("line {line}: {name} would plot {points} points, over the limit of {limit}")]
    PlotLimit {
        line: usize,
        name: &'static str,
        points: u64,
        limit: u64,
    },
}

impl ScriptError {
    /// Source line the error points at.
    pub fn line(&self) -> usize {
        match self {
            ScriptError::UnexpectedChar { line, .. }
            | ScriptError::UnterminatedString { line }
            | ScriptError::InvalidNumber { line, .. }
            | ScriptError::UnexpectedToken { line, .. }
            | ScriptError::Arity { line, .. }
            | ScriptError::UndefinedVariable { line, .. }
            | ScriptError::Type { line, .. }
            | ScriptError::DivisionByZero { line }
            | ScriptError::LoopLimit { line, .. }
            | ScriptError::PlotLimit { line, .. } => *line,
        }
    }
}

/// Lexes and parses `source`.
pub fn parse(source: &str) -> Result<Program, ScriptError> {
    parser::parse(lexer::tokenize(source)?)
}

/// What a finished script left behind.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub cursor: Cursor,
    /// Lines written by `afficher`.
    pub printed: Vec<String>,
}

/// Parses and runs `source` against `surface`.
pub fn run<S: Surface + ?Sized>(
    source: &str,
    surface: &mut S,
    options: ScriptOptions,
) -> Result<Outcome, ScriptError> {
    let program = parse(source)?;
    let mut interpreter = Interpreter::new(options);
    interpreter.run(&program, surface)?;
    Ok(Outcome {
        cursor: interpreter.cursor(),
        printed: interpreter.take_printed(),
    })
}
