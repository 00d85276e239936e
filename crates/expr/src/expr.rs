use std::fmt;

use crate::error::EvalError;

/// A node of a parsed expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Num(f64),
    Const(Constant),
    /// The independent variable.
    X,
    Neg(Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    Call(Func, Box<Expr>),
    /// Logarithm of the first operand in the base given by the second.
    LogBase(Box<Expr>, Box<Expr>),
}

/// Named constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constant {
    Pi,
    E,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Whitelisted one-argument functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Func {
    Exp,
    /// Natural logarithm, written `log` or `ln`.
    Ln,
    Log10,
    Log2,
    Sqrt,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Abs,
}

impl Constant {
    /// Looks up a constant by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pi" => Some(Self::Pi),
            "e" => Some(Self::E),
            _ => None,
        }
    }

    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::Pi => std::f64::consts::PI,
            Self::E => std::f64::consts::E,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Pi => "pi",
            Self::E => "e",
        }
    }
}

impl BinOp {
    fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 2,
            Self::Mul | Self::Div => 3,
            Self::Pow => 5,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::Add => " + ",
            Self::Sub => " - ",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "div",
            Self::Pow => "pow",
        }
    }
}

impl Func {
    /// Looks up a function by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "exp" => Self::Exp,
            "log" | "ln" => Self::Ln,
            "log10" => Self::Log10,
            "log2" => Self::Log2,
            "sqrt" => Self::Sqrt,
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "asin" => Self::Asin,
            "acos" => Self::Acos,
            "atan" => Self::Atan,
            "sinh" => Self::Sinh,
            "cosh" => Self::Cosh,
            "tanh" => Self::Tanh,
            "abs" => Self::Abs,
            _ => return None,
        })
    }

    /// Returns the canonical name used when printing.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Exp => "exp",
            Self::Ln => "log",
            Self::Log10 => "log10",
            Self::Log2 => "log2",
            Self::Sqrt => "sqrt",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Abs => "abs",
        }
    }

    /// Applies the function, rejecting arguments outside its real domain.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::Domain`] if the function is undefined at `arg`.
    pub fn apply(self, arg: f64) -> Result<f64, EvalError> {
        let domain = || EvalError::Domain {
            function: self.name(),
            arg,
        };

        let value = match self {
            Self::Ln | Self::Log10 | Self::Log2 if arg <= 0.0 => return Err(domain()),
            Self::Sqrt if arg < 0.0 => return Err(domain()),
            Self::Asin | Self::Acos if arg.abs() > 1.0 => return Err(domain()),
            Self::Exp => arg.exp(),
            Self::Ln => arg.ln(),
            Self::Log10 => arg.log10(),
            Self::Log2 => arg.log2(),
            Self::Sqrt => arg.sqrt(),
            Self::Sin => arg.sin(),
            Self::Cos => arg.cos(),
            Self::Tan => arg.tan(),
            Self::Asin => arg.asin(),
            Self::Acos => arg.acos(),
            Self::Atan => arg.atan(),
            Self::Sinh => arg.sinh(),
            Self::Cosh => arg.cosh(),
            Self::Tanh => arg.tanh(),
            Self::Abs => arg.abs(),
        };

        checked(self.name(), arg, value)
    }
}

/// Rejects NaN as a domain error and infinity as overflow.
fn checked(function: &'static str, arg: f64, value: f64) -> Result<f64, EvalError> {
    if value.is_nan() {
        Err(EvalError::Domain { function, arg })
    } else if value.is_infinite() {
        Err(EvalError::Overflow { function })
    } else {
        Ok(value)
    }
}

impl Expr {
    /// Evaluates the tree at `x`.
    ///
    /// # Errors
    ///
    /// Returns an error on division by zero, on a function argument outside
    /// its domain, or if an intermediate value overflows.
    pub fn eval(&self, x: f64) -> Result<f64, EvalError> {
        match self {
            Self::Num(value) => Ok(*value),
            Self::Const(constant) => Ok(constant.value()),
            Self::X => Ok(x),
            Self::Neg(operand) => Ok(-operand.eval(x)?),
            Self::Binary(op, lhs, rhs) => {
                let a = lhs.eval(x)?;
                let b = rhs.eval(x)?;
                let value = match op {
                    BinOp::Add => a + b,
                    BinOp::Sub => a - b,
                    BinOp::Mul => a * b,
                    BinOp::Div if b == 0.0 => return Err(EvalError::DivisionByZero),
                    BinOp::Div => a / b,
                    BinOp::Pow if a == 0.0 && b < 0.0 => return Err(EvalError::DivisionByZero),
                    BinOp::Pow => a.powf(b),
                };
                checked(op.name(), a, value)
            }
            Self::Call(func, arg) => func.apply(arg.eval(x)?),
            Self::LogBase(arg, base) => {
                let a = arg.eval(x)?;
                let b = base.eval(x)?;
                if b <= 0.0 || b == 1.0 {
                    return Err(EvalError::Domain {
                        function: "log base",
                        arg: b,
                    });
                }
                Func::Ln.apply(a).map(|ln_a| ln_a / b.ln())
            }
        }
    }

    /// Returns true if the tree references `x`.
    #[must_use]
    pub fn depends_on_x(&self) -> bool {
        match self {
            Self::Num(_) | Self::Const(_) => false,
            Self::X => true,
            Self::Neg(operand) | Self::Call(_, operand) => operand.depends_on_x(),
            Self::Binary(_, lhs, rhs) | Self::LogBase(lhs, rhs) => {
                lhs.depends_on_x() || rhs.depends_on_x()
            }
        }
    }

    /// Returns the literal value if this node is a number.
    #[must_use]
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Self::Num(value) => Some(*value),
            _ => None,
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Self::Num(value) if value.is_sign_negative() => 4,
            Self::Neg(_) => 4,
            Self::Binary(op, _, _) => op.precedence(),
            Self::Num(_) | Self::Const(_) | Self::X | Self::Call(..) | Self::LogBase(..) => 6,
        }
    }
}

// Smart constructors that fold constants and drop identity operations.

pub(crate) fn num(value: f64) -> Expr {
    Expr::Num(value)
}

pub(crate) fn neg(a: Expr) -> Expr {
    match a {
        Expr::Num(value) => Expr::Num(-value),
        Expr::Neg(inner) => *inner,
        other => Expr::Neg(Box::new(other)),
    }
}

pub(crate) fn add(a: Expr, b: Expr) -> Expr {
    match (a.as_num(), b.as_num()) {
        (Some(x), Some(y)) => num(x + y),
        (Some(x), _) if x == 0.0 => b,
        (_, Some(y)) if y == 0.0 => a,
        (_, Some(y)) if y < 0.0 => Expr::Binary(BinOp::Sub, Box::new(a), Box::new(num(-y))),
        _ => match b {
            Expr::Neg(inner) => Expr::Binary(BinOp::Sub, Box::new(a), inner),
            b => Expr::Binary(BinOp::Add, Box::new(a), Box::new(b)),
        },
    }
}

pub(crate) fn sub(a: Expr, b: Expr) -> Expr {
    match (a.as_num(), b.as_num()) {
        (Some(x), Some(y)) => num(x - y),
        (Some(x), _) if x == 0.0 => neg(b),
        (_, Some(y)) if y == 0.0 => a,
        (_, Some(y)) if y < 0.0 => Expr::Binary(BinOp::Add, Box::new(a), Box::new(num(-y))),
        _ => Expr::Binary(BinOp::Sub, Box::new(a), Box::new(b)),
    }
}

pub(crate) fn mul(a: Expr, b: Expr) -> Expr {
    match (a.as_num(), b.as_num()) {
        (Some(x), Some(y)) => num(x * y),
        (Some(x), _) if x == 0.0 => num(0.0),
        (_, Some(y)) if y == 0.0 => num(0.0),
        (Some(x), _) if x == 1.0 => b,
        (_, Some(y)) if y == 1.0 => a,
        (Some(x), _) if x == -1.0 => neg(b),
        (_, Some(y)) if y == -1.0 => neg(a),
        // Keep numeric factors in front.
        (None, Some(_)) => Expr::Binary(BinOp::Mul, Box::new(b), Box::new(a)),
        _ => Expr::Binary(BinOp::Mul, Box::new(a), Box::new(b)),
    }
}

pub(crate) fn div(a: Expr, b: Expr) -> Expr {
    match (a.as_num(), b.as_num()) {
        (Some(x), Some(y)) if y != 0.0 => num(x / y),
        (Some(x), _) if x == 0.0 => num(0.0),
        (_, Some(y)) if y == 1.0 => a,
        _ => Expr::Binary(BinOp::Div, Box::new(a), Box::new(b)),
    }
}

pub(crate) fn pow(a: Expr, b: Expr) -> Expr {
    match (a.as_num(), b.as_num()) {
        (_, Some(y)) if y == 0.0 => num(1.0),
        (_, Some(y)) if y == 1.0 => a,
        (Some(x), Some(y)) if x.powf(y).is_finite() => num(x.powf(y)),
        _ => Expr::Binary(BinOp::Pow, Box::new(a), Box::new(b)),
    }
}

pub(crate) fn call(func: Func, a: Expr) -> Expr {
    Expr::Call(func, Box::new(a))
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(value) if *value == 0.0 => f.write_str("0"),
            Self::Num(value) => write!(f, "{value}"),
            Self::Const(constant) => f.write_str(constant.name()),
            Self::X => f.write_str("x"),
            Self::Neg(operand) => {
                f.write_str("-")?;
                write_operand(f, operand, operand.precedence() < 4)
            }
            Self::Binary(op, lhs, rhs) => {
                let prec = op.precedence();
                let lhs_parens = if *op == BinOp::Pow {
                    lhs.precedence() <= prec
                } else {
                    lhs.precedence() < prec
                };
                let rhs_parens = match op {
                    BinOp::Sub | BinOp::Div => rhs.precedence() <= prec,
                    _ => rhs.precedence() < prec,
                };
                write_operand(f, lhs, lhs_parens)?;
                f.write_str(op.symbol())?;
                write_operand(f, rhs, rhs_parens)
            }
            Self::Call(func, arg) => write!(f, "{}({arg})", func.name()),
            Self::LogBase(arg, base) => write!(f, "log({arg}, {base})"),
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, operand: &Expr, parens: bool) -> fmt::Result {
    if parens {
        write!(f, "({operand})")
    } else {
        write!(f, "{operand}")
    }
}
