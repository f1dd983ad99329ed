use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// Literal in a condition expression.
#[derive(Clone, PartialEq, Debug)]
pub enum Literal {
    Int(i64),
    Float(f64),
    String(String),
    Char(char),
    Bool(bool),
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Int(i) => f.write_str(&i.to_string()),
            Literal::Float(float) if float.is_nan() => f.write_str("f64::NAN"),
            Literal::Float(float) if float.is_infinite() => {
                if float.is_sign_positive() {
                    f.write_str("f64::INFINITY")
                } else {
                    f.write_str("f64::NEG_INFINITY")
                }
            }
            // debug representation keeps a fractional part, so literal stays a float
            Literal::Float(float) => f.write_fmt(format_args!("{float:?}")),
            Literal::String(str) => f.write_fmt(format_args!("{str:?}")),
            Literal::Char(c) => f.write_fmt(format_args!("{c:?}")),
            Literal::Bool(b) => f.write_fmt(format_args!("{b}")),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, strum_macros::Display)]
pub enum UnaryOp {
    #[strum(serialize = "-")]
    Neg,
    #[strum(serialize = "!")]
    Not,
    #[strum(serialize = "*")]
    Deref,
    #[strum(serialize = "&")]
    Ref,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, strum_macros::Display)]
pub enum BinaryOp {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mul,
    #[strum(serialize = "/")]
    Div,
    #[strum(serialize = "%")]
    Rem,
    #[strum(serialize = "&&")]
    And,
    #[strum(serialize = "||")]
    Or,
    #[strum(serialize = "&")]
    BitAnd,
    #[strum(serialize = "|")]
    BitOr,
    #[strum(serialize = "^")]
    BitXor,
    #[strum(serialize = "<<")]
    Shl,
    #[strum(serialize = ">>")]
    Shr,
    #[strum(serialize = "==")]
    Eq,
    #[strum(serialize = "!=")]
    Ne,
    #[strum(serialize = "<")]
    Lt,
    #[strum(serialize = "<=")]
    Le,
    #[strum(serialize = ">")]
    Gt,
    #[strum(serialize = ">=")]
    Ge,
}

/// Parsed breakpoint condition.
///
/// Parentheses from the source text are kept as [`Expr::Paren`] nodes, so
/// printing an expression gives back its canonical source text.
#[derive(Clone, PartialEq, Debug)]
pub enum Expr {
    Ident(String),
    Literal(Literal),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    /// Function call: callee and arguments.
    Call(Box<Expr>, Vec<Expr>),
    /// Structure field access.
    Field(Box<Expr>, String),
    Index(Box<Expr>, Box<Expr>),
    Paren(Box<Expr>),
}

impl Expr {
    /// Return boxed expression.
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    pub fn ident(name: impl ToString) -> Self {
        Expr::Ident(name.to_string())
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary(op, lhs.boxed(), rhs.boxed())
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Ident(name) => f.write_str(name),
            Expr::Literal(lit) => Display::fmt(lit, f),
            Expr::Unary(op, expr) => {
                let operand = expr.to_string();
                // `- -x` and `& &x` must not merge into `--` and `&&` tokens
                let merge = matches!(op, UnaryOp::Neg | UnaryOp::Ref)
                    && operand.starts_with(&op.to_string());
                if merge {
                    f.write_fmt(format_args!("{op} {operand}"))
                } else {
                    f.write_fmt(format_args!("{op}{operand}"))
                }
            }
            Expr::Binary(op, lhs, rhs) => f.write_fmt(format_args!("{lhs} {op} {rhs}")),
            Expr::Call(callee, args) => {
                f.write_fmt(format_args!("{callee}({})", args.iter().join(", ")))
            }
            Expr::Field(expr, field) => f.write_fmt(format_args!("{expr}.{field}")),
            Expr::Index(expr, idx) => f.write_fmt(format_args!("{expr}[{idx}]")),
            Expr::Paren(expr) => f.write_fmt(format_args!("({expr})")),
        }
    }
}
