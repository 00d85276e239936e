//! Shunting-yard parser that builds an [`Expr`] tree directly.

use crate::{
    error::ParseError,
    expr::{BinOp, Constant, Expr, Func},
    lexer::{Token, TokenKind, tokenize},
};

/// Deepest expression tree, and most open groups, the parser accepts.
///
/// Evaluation, differentiation and printing recurse over the tree.
pub(crate) const MAX_DEPTH: usize = 256;

/// Entries on the operator stack.
#[derive(Debug, Clone, Copy)]
enum Pending {
    Paren { pos: usize },
    /// An open function call; doubles as its opening parenthesis.
    Call { func: Func, args: usize, pos: usize },
    Neg,
    Binary(BinOp),
}

impl Pending {
    /// Precedence of operators still waiting for operands.
    fn precedence(self) -> Option<u8> {
        match self {
            Self::Paren { .. } | Self::Call { .. } => None,
            Self::Neg => Some(4),
            Self::Binary(BinOp::Add | BinOp::Sub) => Some(2),
            Self::Binary(BinOp::Mul | BinOp::Div) => Some(3),
            Self::Binary(BinOp::Pow) => Some(5),
        }
    }
}

/// Parses an expression in `x`.
pub(crate) fn parse(source: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(source)?;
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }
    Parser::default().run(&tokens)
}

#[derive(Default)]
struct Parser {
    /// Finished subtrees and their depths.
    operands: Vec<(Expr, usize)>,
    pending: Vec<Pending>,
    /// Parentheses and calls not yet closed.
    open_groups: usize,
    /// True where the grammar needs a value next (start, after an operator or `(`).
    expect_operand: bool,
}

impl Parser {
    fn run(mut self, tokens: &[Token]) -> Result<Expr, ParseError> {
        self.expect_operand = true;
        let mut iter = tokens.iter().peekable();

        while let Some(token) = iter.next() {
            let pos = token.pos;
            match (&token.kind, self.expect_operand) {
                (TokenKind::Number(value), true) => self.push_operand(Expr::Num(*value)),
                (TokenKind::Ident(name), true) => {
                    let is_call = iter.peek().is_some_and(|t| t.kind == TokenKind::LParen);
                    if is_call {
                        iter.next();
                        let func = call_target(name, pos)?;
                        self.open(Pending::Call { func, args: 1, pos })?;
                    } else {
                        self.push_operand(leaf(name, pos)?);
                    }
                }
                (TokenKind::LParen, true) => self.open(Pending::Paren { pos })?,
                (TokenKind::Op('-'), true) => self.pending.push(Pending::Neg),
                (TokenKind::Op('+'), true) => {}
                (TokenKind::Op(op), false) => {
                    self.push_binary(binary_op(*op))?;
                }
                (TokenKind::Comma, false) => {
                    let closed = self.close_call_argument()?;
                    let Some(Pending::Call { func, args, pos }) = closed else {
                        return Err(ParseError::UnexpectedToken {
                            token: ",".to_owned(),
                            pos,
                        });
                    };
                    self.open(Pending::Call {
                        func,
                        args: args + 1,
                        pos,
                    })?;
                    self.expect_operand = true;
                }
                (TokenKind::RParen, false) => {
                    if let Pending::Call { func, args, .. } = self.close_group(pos)? {
                        self.finish_call(func, args)?;
                    }
                }
                (kind, _) => {
                    return Err(ParseError::UnexpectedToken {
                        token: kind.describe(),
                        pos,
                    });
                }
            }
        }

        if self.expect_operand {
            return Err(ParseError::MissingOperand);
        }

        while let Some(top) = self.pending.pop() {
            match top {
                Pending::Paren { pos } | Pending::Call { pos, .. } => {
                    return Err(ParseError::MismatchedParen { pos });
                }
                op => self.apply(op)?,
            }
        }

        match (self.operands.pop(), self.operands.is_empty()) {
            (Some((root, _)), true) => Ok(root),
            _ => Err(ParseError::MissingOperand),
        }
    }

    fn push_operand(&mut self, expr: Expr) {
        self.operands.push((expr, 1));
        self.expect_operand = false;
    }

    /// Pushes a finished subtree, rejecting it if it nests too deeply.
    fn push_node(&mut self, expr: Expr, depth: usize) -> Result<(), ParseError> {
        if depth > MAX_DEPTH {
            return Err(ParseError::TooDeep { max: MAX_DEPTH });
        }
        self.operands.push((expr, depth));
        Ok(())
    }

    /// Opens a parenthesis or call.
    fn open(&mut self, group: Pending) -> Result<(), ParseError> {
        if self.open_groups >= MAX_DEPTH {
            return Err(ParseError::TooDeep { max: MAX_DEPTH });
        }
        self.open_groups += 1;
        self.pending.push(group);
        Ok(())
    }

    /// Pushes a binary operator after reducing everything that binds tighter.
    fn push_binary(&mut self, op: BinOp) -> Result<(), ParseError> {
        let incoming = Pending::Binary(op);
        let prec = incoming.precedence().unwrap_or_default();
        let right_assoc = op == BinOp::Pow;

        while let Some(&top) = self.pending.last() {
            let Some(top_prec) = top.precedence() else {
                break;
            };
            if top_prec > prec || (top_prec == prec && !right_assoc) {
                self.pending.pop();
                self.apply(top)?;
            } else {
                break;
            }
        }

        self.pending.push(incoming);
        self.expect_operand = true;
        Ok(())
    }

    /// Reduces operators down to the nearest open group and pops it.
    fn close_group(&mut self, pos: usize) -> Result<Pending, ParseError> {
        while let Some(top) = self.pending.pop() {
            match top {
                Pending::Paren { .. } | Pending::Call { .. } => {
                    self.open_groups -= 1;
                    return Ok(top);
                }
                op => self.apply(op)?,
            }
        }
        Err(ParseError::MismatchedParen { pos })
    }

    /// Reduces the current argument if the nearest open group is a call.
    ///
    /// Returns `None`, leaving the stack untouched, when a comma appears
    /// outside any call.
    fn close_call_argument(&mut self) -> Result<Option<Pending>, ParseError> {
        let in_call = matches!(
            self.pending.iter().rev().find(|p| p.precedence().is_none()),
            Some(Pending::Call { .. })
        );
        if !in_call {
            return Ok(None);
        }
        self.close_group(0).map(Some)
    }

    fn finish_call(&mut self, func: Func, args: usize) -> Result<(), ParseError> {
        match (func, args) {
            (_, 1) => {
                let (arg, depth) = self.pop_operand()?;
                self.push_node(Expr::Call(func, Box::new(arg)), depth + 1)?;
            }
            (Func::Ln, 2) => {
                let (base, base_depth) = self.pop_operand()?;
                let (arg, arg_depth) = self.pop_operand()?;
                let depth = arg_depth.max(base_depth) + 1;
                self.push_node(Expr::LogBase(Box::new(arg), Box::new(base)), depth)?;
            }
            (Func::Ln, found) => {
                return Err(ParseError::Arity {
                    function: "log",
                    expected: "1 or 2",
                    found,
                });
            }
            (func, found) => {
                return Err(ParseError::Arity {
                    function: func.name(),
                    expected: "1",
                    found,
                });
            }
        }
        Ok(())
    }

    fn apply(&mut self, op: Pending) -> Result<(), ParseError> {
        let (expr, depth) = match op {
            Pending::Neg => match self.pop_operand()? {
                (Expr::Num(value), depth) => (Expr::Num(-value), depth),
                (operand, depth) => (Expr::Neg(Box::new(operand)), depth + 1),
            },
            Pending::Binary(op) => {
                let (rhs, rhs_depth) = self.pop_operand()?;
                let (lhs, lhs_depth) = self.pop_operand()?;
                let depth = lhs_depth.max(rhs_depth) + 1;
                (Expr::Binary(op, Box::new(lhs), Box::new(rhs)), depth)
            }
            Pending::Paren { pos } | Pending::Call { pos, .. } => {
                return Err(ParseError::MismatchedParen { pos });
            }
        };
        self.push_node(expr, depth)
    }

    fn pop_operand(&mut self) -> Result<(Expr, usize), ParseError> {
        self.operands.pop().ok_or(ParseError::MissingOperand)
    }
}

fn binary_op(op: char) -> BinOp {
    match op {
        '+' => BinOp::Add,
        '-' => BinOp::Sub,
        '*' => BinOp::Mul,
        '/' => BinOp::Div,
        _ => BinOp::Pow,
    }
}

fn call_target(name: &str, pos: usize) -> Result<Func, ParseError> {
    Func::from_name(name).ok_or_else(|| ParseError::UnknownFunction {
        name: name.to_owned(),
        pos,
    })
}

fn leaf(name: &str, pos: usize) -> Result<Expr, ParseError> {
    if name == "x" {
        return Ok(Expr::X);
    }
    Constant::from_name(name)
        .map(Expr::Const)
        .ok_or_else(|| ParseError::UndefinedName {
            name: name.to_owned(),
            pos,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn eval(source: &str, x: f64) -> f64 {
        parse(source)
            .expect("should parse")
            .eval(x)
            .expect("should evaluate")
    }

    #[test]
    fn respects_precedence() {
        assert_relative_eq!(eval("1 + 2 * 3", 0.0), 7.0);
        assert_relative_eq!(eval("(1 + 2) * 3", 0.0), 9.0);
        assert_relative_eq!(eval("8 / 4 / 2", 0.0), 1.0);
        assert_relative_eq!(eval("10 - 4 - 3", 0.0), 3.0);
    }

    #[test]
    fn power_is_right_associative() {
        assert_relative_eq!(eval("2^3^2", 0.0), 512.0);
        assert_relative_eq!(eval("2**3", 0.0), 8.0);
    }

    #[test]
    fn unary_minus_binds_looser_than_power() {
        assert_relative_eq!(eval("-x^2", 3.0), -9.0);
        assert_relative_eq!(eval("2^-1", 0.0), 0.5);
        assert_relative_eq!(eval("-(x - 1)", 3.0), -2.0);
        assert_relative_eq!(eval("3 * -x", 2.0), -6.0);
        assert_relative_eq!(eval("--x", 2.0), 2.0);
        assert_relative_eq!(eval("+x", 2.0), 2.0);
    }

    #[test]
    fn calls_and_constants() {
        assert_relative_eq!(eval("sin(pi / 2)", 0.0), 1.0);
        assert_relative_eq!(eval("log(e)", 0.0), 1.0);
        assert_relative_eq!(eval("log(8, 2)", 0.0), 3.0, epsilon = 1e-12);
        assert_relative_eq!(eval("math.exp(x) - math.sqrt(x)", 4.0), 4f64.exp() - 2.0);
        assert_relative_eq!(eval("abs(cos(x))", std::f64::consts::PI), 1.0);
    }

    #[test]
    fn rejects_names_outside_whitelist() {
        assert!(matches!(
            parse("y + 1"),
            Err(ParseError::UndefinedName { ref name, pos: 0 }) if name == "y"
        ));
        assert!(matches!(
            parse("system(x)"),
            Err(ParseError::UnknownFunction { .. })
        ));
        assert!(matches!(
            parse("__import__(x)"),
            Err(ParseError::UnknownFunction { .. })
        ));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse("   "), Err(ParseError::Empty));
        assert_eq!(parse("x +"), Err(ParseError::MissingOperand));
        assert!(matches!(parse("(x + 1"), Err(ParseError::MismatchedParen { pos: 0 })));
        assert!(matches!(parse("x + 1)"), Err(ParseError::MismatchedParen { .. })));
        assert!(matches!(parse("2 x"), Err(ParseError::UnexpectedToken { .. })));
        assert!(matches!(parse("* 2"), Err(ParseError::UnexpectedToken { .. })));
        assert!(matches!(parse("x, 2"), Err(ParseError::UnexpectedToken { .. })));
    }

    #[test]
    fn rejects_deep_nesting() {
        let too_deep = ParseError::TooDeep { max: MAX_DEPTH };

        let negations = format!("{}x", "-".repeat(10_000));
        assert_eq!(parse(&negations), Err(too_deep.clone()));

        let parens = format!("{}x{}", "(".repeat(10_000), ")".repeat(10_000));
        assert_eq!(parse(&parens), Err(too_deep.clone()));

        let calls = format!("{}x{}", "sin(".repeat(10_000), ")".repeat(10_000));
        assert_eq!(parse(&calls), Err(too_deep.clone()));

        let sum = vec!["x"; 10_000].join(" + ");
        assert_eq!(parse(&sum), Err(too_deep));
    }

    #[test]
    fn accepts_nesting_within_limit() {
        let negations = format!("{}x", "-".repeat(200));
        assert_relative_eq!(eval(&negations, 3.0), 3.0);

        let parens = format!("{}x{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert_relative_eq!(eval(&parens, 3.0), 3.0);
    }

    #[test]
    fn checks_arity() {
        assert!(matches!(
            parse("sin(x, 2)"),
            Err(ParseError::Arity { function: "sin", found: 2, .. })
        ));
        assert!(matches!(
            parse("log(x, 2, 3)"),
            Err(ParseError::Arity { function: "log", found: 3, .. })
        ));
    }
}
