//! Tree-walking evaluator that executes a [`Program`] against a [`Surface`].

use std::collections::HashMap;
use std::fmt;

use log::debug;

use super::ScriptError;
use super::ast::{BinOp, Builtin, Expr, Program, Stmt, StmtKind};
use crate::cursor::{Cursor, Precision};
use crate::draw::{BLUE, Color, Surface, primitives};

/// Default cap on iterations of a single `pour` or `tantque` loop.
pub const DEFAULT_MAX_LOOP_ITERATIONS: u64 = 100_000;

/// A runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl Value {
    fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
        }
    }

    fn as_f64(&self, line: usize) -> Result<f64, ScriptError> {
        match self {
            Value::Int(n) => Ok(*n as f64),
            Value::Float(n) => Ok(*n),
            Value::Str(_) => Err(ScriptError::Type {
                line,
                message: "expected a number, found a string".into(),
            }),
        }
    }

    /// Integer view, truncating floats toward zero.
    fn as_i64(&self, line: usize) -> Result<i64, ScriptError> {
        match self {
            Value::Int(n) => Ok(*n),
            Value::Float(n) => Ok(*n as i64),
            Value::Str(_) => Err(ScriptError::Type {
                line,
                message: "expected a number, found a string".into(),
            }),
        }
    }

    fn is_truthy(&self) -> bool {
        match self {
            Value::Int(n) => *n != 0,
            Value::Float(n) => *n != 0.0,
            Value::Str(s) => !s.is_empty(),
        }
    }
}

/// Settings for a script run.
#[derive(Debug, Clone, Copy)]
pub struct ScriptOptions {
    /// Cursor the script starts with; also sets the precision mode.
    pub cursor: Cursor,
    /// Color of `drawCursor` markers.
    pub marker: Color,
    /// Upper bound on the iterations of any single loop.
    pub max_loop_iterations: u64,
}

impl Default for ScriptOptions {
    fn default() -> Self {
        Self {
            cursor: Cursor::default(),
            marker: BLUE,
            max_loop_iterations: DEFAULT_MAX_LOOP_ITERATIONS,
        }
    }
}

/// Executes programs, keeping variables and the cursor between runs.
#[derive(Debug)]
pub struct Interpreter {
    cursor: Cursor,
    marker: Color,
    max_loop_iterations: u64,
    vars: HashMap<String, Value>,
    printed: Vec<String>,
}

impl Interpreter {
    pub fn new(options: ScriptOptions) -> Self {
        Self {
            cursor: options.cursor,
            marker: options.marker,
            max_loop_iterations: options.max_loop_iterations,
            vars: HashMap::new(),
            printed: Vec::new(),
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Current value of a variable, including the cursor names.
    pub fn var(&self, name: &str) -> Option<Value> {
        self.cursor_var(name).or_else(|| self.vars.get(name).cloned())
    }

    /// Lines written by `afficher`, oldest first.
    pub fn printed(&self) -> &[String] {
        &self.printed
    }

    pub fn take_printed(&mut self) -> Vec<String> {
        std::mem::take(&mut self.printed)
    }

    pub fn run<S: Surface + ?Sized>(
        &mut self,
        program: &Program,
        surface: &mut S,
    ) -> Result<(), ScriptError> {
        self.block(&program.body, surface)
    }

    fn block<S: Surface + ?Sized>(
        &mut self,
        body: &[Stmt],
        surface: &mut S,
    ) -> Result<(), ScriptError> {
        for stmt in body {
            self.statement(stmt, surface)?;
        }
        Ok(())
    }

    fn statement<S: Surface + ?Sized>(
        &mut self,
        stmt: &Stmt,
        surface: &mut S,
    ) -> Result<(), ScriptError> {
        let line = stmt.line;
        match &stmt.kind {
            StmtKind::Assign { name, value } => {
                let value = self.eval(value, line)?;
                self.assign(name, value, line)?;
            }
            StmtKind::If {
                cond,
                then,
                otherwise,
            } => {
                if self.eval(cond, line)?.is_truthy() {
                    self.block(then, surface)?;
                } else if let Some(otherwise) = otherwise {
                    self.block(otherwise, surface)?;
                }
            }
            StmtKind::For {
                var,
                start,
                end,
                body,
            } => {
                let start = self.eval(start, line)?.as_i64(line)?;
                let end = self.eval(end, line)?.as_i64(line)?;
                let count = (i128::from(end) - i128::from(start) + 1).max(0);
                if count > i128::from(self.max_loop_iterations) {
                    return Err(ScriptError::LoopLimit {
                        line,
                        limit: self.max_loop_iterations,
                    });
                }
                for i in start..=end {
                    self.assign(var, Value::Int(i), line)?;
                    self.block(body, surface)?;
                }
            }
            StmtKind::While { cond, body } => {
                let mut iterations = 0u64;
                while self.eval(cond, line)?.is_truthy() {
                    iterations += 1;
                    if iterations > self.max_loop_iterations {
                        return Err(ScriptError::LoopLimit {
                            line,
                            limit: self.max_loop_iterations,
                        });
                    }
                    self.block(body, surface)?;
                }
            }
            StmtKind::Print { values } => {
                let mut parts = Vec::with_capacity(values.len());
                for value in values {
                    parts.push(self.eval(value, line)?.to_string());
                }
                let text = parts.join(" ");
                debug!("afficher (line {}): {}", line, text);
                self.printed.push(text);
            }
            StmtKind::Call { builtin, args } => {
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.eval(arg, line)?.as_f64(line)?);
                }
                self.call(*builtin, &values, surface, line)?;
            }
            StmtKind::Expr(expr) => {
                self.eval(expr, line)?;
            }
        }
        Ok(())
    }

    fn call<S: Surface + ?Sized>(
        &mut self,
        builtin: Builtin,
        args: &[f64],
        surface: &mut S,
        line: usize,
    ) -> Result<(), ScriptError> {
        // Pixel arguments are truncated like integer parameters.
        let px = |i: usize| args[i] as i32;

        // Circles and arcs loop per pixel, so they count against the same
        // budget as script loops.
        let points = match builtin {
            Builtin::DrawCircle => primitives::circle_scan_len(px(2)),
            Builtin::DrawArc => primitives::arc_len(px(3), px(4)),
            _ => 0,
        };
        if points > self.max_loop_iterations {
            return Err(ScriptError::PlotLimit {
                line,
                name: builtin.name(),
                points,
                limit: self.max_loop_iterations,
            });
        }

        match builtin {
            Builtin::DrawLine => primitives::draw_line(surface, px(0), px(1), px(2), px(3)),
            Builtin::DrawSquare => primitives::draw_square(surface, px(0), px(1), px(2)),
            Builtin::DrawCircle => primitives::draw_circle(surface, px(0), px(1), px(2)),
            Builtin::DrawArc => {
                primitives::draw_arc(surface, px(0), px(1), px(2), px(3), px(4));
            }
            Builtin::DrawCursor => {
                primitives::draw_cursor_with(surface, px(0), px(1), self.marker);
            }
            Builtin::MoveCursor => self.cursor.move_by(args[0], args[1]),
            Builtin::RotateCursor => self.cursor.rotate(args[0]),
        }
        Ok(())
    }

    fn cursor_var(&self, name: &str) -> Option<Value> {
        let value = match name {
            "x" => self.cursor.x,
            "y" => self.cursor.y,
            "dx" => self.cursor.dx,
            "dy" => self.cursor.dy,
            _ => return None,
        };
        Some(match self.cursor.precision {
            Precision::Truncate => Value::Int(value as i64),
            Precision::Float => Value::Float(value),
        })
    }

    fn assign(&mut self, name: &str, value: Value, line: usize) -> Result<(), ScriptError> {
        let slot = match name {
            "x" => &mut self.cursor.x,
            "y" => &mut self.cursor.y,
            "dx" => &mut self.cursor.dx,
            "dy" => &mut self.cursor.dy,
            _ => {
                self.vars.insert(name.to_string(), value);
                return Ok(());
            }
        };
        let number = value.as_f64(line)?;
        *slot = match self.cursor.precision {
            Precision::Truncate => number.trunc(),
            Precision::Float => number,
        };
        Ok(())
    }

    fn eval(&self, expr: &Expr, line: usize) -> Result<Value, ScriptError> {
        match expr {
            Expr::Int(n) => Ok(Value::Int(*n)),
            Expr::Float(n) => Ok(Value::Float(*n)),
            Expr::Str(s) => Ok(Value::Str(s.clone())),
            Expr::Var(name) => self
                .var(name)
                .ok_or_else(|| ScriptError::UndefinedVariable {
                    line,
                    name: name.clone(),
                }),
            Expr::Neg(inner) => match self.eval(inner, line)? {
                Value::Int(n) => n.checked_neg().map(Value::Int).ok_or_else(|| {
                    ScriptError::Type {
                        line,
                        message: "integer overflow".into(),
                    }
                }),
                Value::Float(n) => Ok(Value::Float(-n)),
                Value::Str(_) => Err(ScriptError::Type {
                    line,
                    message: "cannot negate a string".into(),
                }),
            },
            Expr::Binary { op, lhs, rhs } => {
                let lhs = self.eval(lhs, line)?;
                let rhs = self.eval(rhs, line)?;
                binary(*op, lhs, rhs, line)
            }
        }
    }
}

fn binary(op: BinOp, lhs: Value, rhs: Value, line: usize) -> Result<Value, ScriptError> {
    use Value::{Float, Int, Str};

    let truth = |b: bool| Ok(Int(b as i64));

    match (op, &lhs, &rhs) {
        (BinOp::Eq, Str(a), Str(b)) => return truth(a == b),
        (BinOp::NotEq, Str(a), Str(b)) => return truth(a != b),
        (_, Str(_), _) | (_, _, Str(_)) => {
            return Err(ScriptError::Type {
                line,
                message: format!(
                    "unsupported operands for {:?}: {} and {}",
                    op,
                    lhs.type_name(),
                    rhs.type_name()
                ),
            });
        }
        _ => {}
    }

    if let (Int(a), Int(b)) = (&lhs, &rhs) {
        let (a, b) = (*a, *b);
        let overflow = || ScriptError::Type {
            line,
            message: "integer overflow".into(),
        };
        return match op {
            BinOp::Add => a.checked_add(b).map(Int).ok_or_else(overflow),
            BinOp::Sub => a.checked_sub(b).map(Int).ok_or_else(overflow),
            BinOp::Mul => a.checked_mul(b).map(Int).ok_or_else(overflow),
            BinOp::Div => {
                if b == 0 {
                    Err(ScriptError::DivisionByZero { line })
                } else {
                    a.checked_div(b).map(Int).ok_or_else(overflow)
                }
            }
            BinOp::Eq => truth(a == b),
            BinOp::NotEq => truth(a != b),
            BinOp::Lt => truth(a < b),
            BinOp::Gt => truth(a > b),
            BinOp::LtEq => truth(a <= b),
            BinOp::GtEq => truth(a >= b),
        };
    }

    let a = lhs.as_f64(line)?;
    let b = rhs.as_f64(line)?;
    match op {
        BinOp::Add => Ok(Float(a + b)),
        BinOp::Sub => Ok(Float(a - b)),
        BinOp::Mul => Ok(Float(a * b)),
        BinOp::Div => {
            if b == 0.0 {
                Err(ScriptError::DivisionByZero { line })
            } else {
                Ok(Float(a / b))
            }
        }
        BinOp::Eq => truth(a == b),
        BinOp::NotEq => truth(a != b),
        BinOp::Lt => truth(a < b),
        BinOp::Gt => truth(a > b),
        BinOp::LtEq => truth(a <= b),
        BinOp::GtEq => truth(a >= b),
    }
}
