//! Symbolic differentiation with respect to `x`.

use std::f64::consts::{LN_2, LN_10};

use crate::expr::{BinOp, Expr, Func, add, call, div, mul, neg, num, pow, sub};

impl Expr {
    /// Returns the derivative of the tree with respect to `x`.
    ///
    /// The result is simplified as it is built (constant folding and removal
    /// of identity operations), so derivatives of polynomials stay readable.
    #[must_use]
    pub fn derivative(&self) -> Expr {
        match self {
            Self::Num(_) | Self::Const(_) => num(0.0),
            Self::X => num(1.0),
            Self::Neg(a) => neg(a.derivative()),
            Self::Binary(op, a, b) => binary(*op, a, b),
            Self::Call(func, a) => chain(*func, a),
            Self::LogBase(a, base) => div(
                call(Func::Ln, (**a).clone()),
                call(Func::Ln, (**base).clone()),
            )
            .derivative(),
        }
    }
}

fn binary(op: BinOp, a: &Expr, b: &Expr) -> Expr {
    let (da, db) = (a.derivative(), b.derivative());
    match op {
        BinOp::Add => add(da, db),
        BinOp::Sub => sub(da, db),
        BinOp::Mul => add(mul(da, b.clone()), mul(a.clone(), db)),
        BinOp::Div => div(
            sub(mul(da, b.clone()), mul(a.clone(), db)),
            pow(b.clone(), num(2.0)),
        ),
        BinOp::Pow if !b.depends_on_x() => mul(
            mul(b.clone(), pow(a.clone(), sub(b.clone(), num(1.0)))),
            da,
        ),
        BinOp::Pow if !a.depends_on_x() => mul(
            mul(pow(a.clone(), b.clone()), call(Func::Ln, a.clone())),
            db,
        ),
        BinOp::Pow => mul(
            pow(a.clone(), b.clone()),
            add(
                mul(db, call(Func::Ln, a.clone())),
                div(mul(b.clone(), da), a.clone()),
            ),
        ),
    }
}

/// Applies the chain rule `f(a)' = f'(a) * a'`.
fn chain(func: Func, a: &Expr) -> Expr {
    let da = a.derivative();
    if da.as_num() == Some(0.0) {
        return num(0.0);
    }

    let a = a.clone();
    let outer = match func {
        Func::Exp => call(Func::Exp, a),
        Func::Ln => div(num(1.0), a),
        Func::Log10 => div(num(1.0), mul(a, num(LN_10))),
        Func::Log2 => div(num(1.0), mul(a, num(LN_2))),
        Func::Sqrt => div(num(1.0), mul(num(2.0), call(Func::Sqrt, a))),
        Func::Sin => call(Func::Cos, a),
        Func::Cos => neg(call(Func::Sin, a)),
        Func::Tan => div(num(1.0), pow(call(Func::Cos, a), num(2.0))),
        Func::Asin => div(
            num(1.0),
            call(Func::Sqrt, sub(num(1.0), pow(a, num(2.0)))),
        ),
        Func::Acos => neg(div(
            num(1.0),
            call(Func::Sqrt, sub(num(1.0), pow(a, num(2.0)))),
        )),
        Func::Atan => div(num(1.0), add(num(1.0), pow(a, num(2.0)))),
        Func::Sinh => call(Func::Cosh, a),
        Func::Cosh => call(Func::Sinh, a),
        Func::Tanh => div(num(1.0), pow(call(Func::Cosh, a), num(2.0))),
        Func::Abs => div(a.clone(), call(Func::Abs, a)),
    };

    // Fold `(1/u) * a'` into `a'/u`.
    match outer {
        Expr::Binary(BinOp::Div, top, bottom) if top.as_num() == Some(1.0) => div(da, *bottom),
        outer => mul(outer, da),
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::parser::parse;

    /// Checks the symbolic derivative against a central difference.
    fn check(source: &str, points: &[f64]) {
        let f = parse(source).expect("should parse");
        let df = f.derivative();
        for &x in points {
            let h = 1e-6;
            let numeric = (f.eval(x + h).unwrap() - f.eval(x - h).unwrap()) / (2.0 * h);
            let symbolic = df.eval(x).expect("derivative should evaluate");
            assert_relative_eq!(symbolic, numeric, epsilon = 1e-5, max_relative = 1e-5);
        }
    }

    #[test]
    fn polynomials_print_simply() {
        let d = |s: &str| parse(s).unwrap().derivative().to_string();
        assert_eq!(d("x^2 - 2"), "2*x");
        assert_eq!(d("3*x"), "3");
        assert_eq!(d("x^3 + 2*x"), "3*x^2 + 2");
        assert_eq!(d("5"), "0");
    }

    #[test]
    fn matches_finite_differences() {
        check("x^3 - 2*x + 1", &[-2.0, 0.5, 3.0]);
        check("exp(x) * sin(x)", &[0.0, 1.0, 2.5]);
        check("log(x) / x", &[0.5, 2.0]);
        check("sqrt(x^2 + 1)", &[-1.0, 0.0, 2.0]);
        check("tan(x) + atan(x)", &[0.1, 0.7]);
        check("asin(x / 2) - acos(x / 3)", &[0.2, -0.4]);
        check("sinh(x) * cosh(x) - tanh(x)", &[0.3, -1.1]);
        check("2^x + x^x", &[0.5, 1.5]);
        check("log10(x) + log2(x) + log(x, 3)", &[1.5, 4.0]);
        check("abs(x - 1)", &[-1.0, 3.0]);
        check("-cos(2*x)", &[0.25]);
    }

    #[test]
    fn second_derivative() {
        let f = parse("x^4 - x").unwrap();
        let d2 = f.derivative().derivative();
        assert_relative_eq!(d2.eval(2.0).unwrap(), 48.0);
    }
}
