//! Syntax tree for Draw++ programs.

/// Drawing and cursor functions built into the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    DrawLine,
    DrawSquare,
    DrawCircle,
    DrawArc,
    DrawCursor,
    MoveCursor,
    RotateCursor,
}

impl Builtin {
    pub const ALL: [Builtin; 7] = [
        Builtin::DrawLine,
        Builtin::DrawSquare,
        Builtin::DrawCircle,
        Builtin::DrawArc,
        Builtin::DrawCursor,
        Builtin::MoveCursor,
        Builtin::RotateCursor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Builtin::DrawLine => "drawLine",
            Builtin::DrawSquare => "drawSquare",
            Builtin::DrawCircle => "drawCircle",
            Builtin::DrawArc => "drawArc",
            Builtin::DrawCursor => "drawCursor",
            Builtin::MoveCursor => "moveCursor",
            Builtin::RotateCursor => "rotateCursor",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    /// Number of arguments the builtin takes.
    pub fn arity(self) -> usize {
        match self {
            Builtin::DrawLine => 4,
            Builtin::DrawSquare => 3,
            Builtin::DrawCircle => 3,
            Builtin::DrawArc => 5,
            Builtin::DrawCursor => 2,
            Builtin::MoveCursor => 2,
            Builtin::RotateCursor => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Int(i64),
    Float(f64),
    Str(String),
    Var(String),
    Neg(Box<Expr>),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }
}

/// A statement and the source line it starts on.
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub line: usize,
    pub kind: StmtKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// `name -> value`
    Assign { name: String, value: Expr },
    /// `si cond { .. } sinon { .. }`
    If {
        cond: Expr,
        then: Vec<Stmt>,
        otherwise: Option<Vec<Stmt>>,
    },
    /// `pour var de start à end { .. }`, both bounds inclusive
    For {
        var: String,
        start: Expr,
        end: Expr,
        body: Vec<Stmt>,
    },
    /// `tantque cond { .. }`
    While { cond: Expr, body: Vec<Stmt> },
    /// `afficher(a, b, ..)`
    Print { values: Vec<Expr> },
    Call { builtin: Builtin, args: Vec<Expr> },
    Expr(Expr),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub body: Vec<Stmt>,
}
