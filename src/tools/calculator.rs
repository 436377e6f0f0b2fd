//! Restricted arithmetic for the `calculate` tool.
//!
//! Only digits, `+ - * / ( ) .` and whitespace are accepted. Input is first
//! checked against that allow-list, then parsed by a small recursive-descent
//! parser into an [`Expr`] tree and evaluated. Nothing is ever handed to a
//! general-purpose evaluator.

use nom::branch::alt;
use nom::character::complete::{char, digit0, digit1, multispace0};
use nom::combinator::{all_consuming, map_res, opt, recognize};
use nom::multi::fold_many0;
use nom::sequence::{delimited, pair, preceded, terminated};
use nom::{IResult, Parser};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Deepest parenthesis nesting accepted before parsing
pub const MAX_NESTING: usize = 64;

/// Most operator characters (`+ - * /`) accepted in one expression
pub const MAX_OPERATORS: usize = 512;

static ALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9+\-*/().\s]+$").expect("allow-list pattern is valid"));

/// Binary operators supported in expressions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// Expression AST node
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal (e.g., 42.5)
    Literal(f64),
    /// Unary minus
    Neg(Box<Expr>),
    /// A binary operation (e.g., left + right)
    BinOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("expression is empty")]
    Empty,

    #[error("character '{0}' is not allowed; use digits and + - * / ( ) . only")]
    DisallowedCharacter(char),

    #[error("parentheses nested deeper than {MAX_NESTING}")]
    TooDeep,

    #[error("more than {MAX_OPERATORS} operators")]
    TooManyOperators,

    #[error("could not parse expression: {0}")]
    Parse(String),

    #[error("division by zero")]
    DivisionByZero,
}

impl Expr {
    fn binary(op: char, left: Expr, right: Expr) -> Expr {
        let op = match op {
            '+' => BinOp::Add,
            '-' => BinOp::Sub,
            '*' => BinOp::Mul,
            _ => BinOp::Div,
        };
        Expr::BinOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Parse an expression. Callers are expected to have checked the allow-list.
    pub fn parse(input: &str) -> Result<Expr, CalcError> {
        if input.trim().is_empty() {
            return Err(CalcError::Empty);
        }
        if nesting_depth(input) > MAX_NESTING {
            return Err(CalcError::TooDeep);
        }
        if operator_count(input) > MAX_OPERATORS {
            return Err(CalcError::TooManyOperators);
        }
        all_consuming(expr)
            .parse(input)
            .map(|(_, parsed)| parsed)
            .map_err(|e| CalcError::Parse(e.to_string()))
    }

    pub fn evaluate(&self) -> Result<f64, CalcError> {
        match self {
            Expr::Literal(value) => Ok(*value),
            Expr::Neg(inner) => Ok(-inner.evaluate()?),
            Expr::BinOp { op, left, right } => {
                let l = left.evaluate()?;
                let r = right.evaluate()?;
                match op {
                    BinOp::Add => Ok(l + r),
                    BinOp::Sub => Ok(l - r),
                    BinOp::Mul => Ok(l * r),
                    BinOp::Div => {
                        if r == 0.0 {
                            Err(CalcError::DivisionByZero)
                        } else {
                            Ok(l / r)
                        }
                    }
                }
            }
        }
    }
}

/// True when every character is in the arithmetic allow-list
pub fn is_allowed(expression: &str) -> bool {
    ALLOWED.is_match(expression)
}

/// Check the allow-list, parse, and evaluate
pub fn calculate(expression: &str) -> Result<f64, CalcError> {
    if expression.trim().is_empty() {
        return Err(CalcError::Empty);
    }
    if !is_allowed(expression) {
        let bad = expression
            .chars()
            .find(|c| !(c.is_ascii_digit() || "+-*/(). ".contains(*c) || c.is_whitespace()))
            .unwrap_or('?');
        return Err(CalcError::DisallowedCharacter(bad));
    }
    Expr::parse(expression)?.evaluate()
}

/// Render a result the way people write numbers: `5`, not `5.0`
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn nesting_depth(input: &str) -> usize {
    let mut depth = 0usize;
    let mut max = 0usize;
    for c in input.chars() {
        match c {
            '(' => {
                depth += 1;
                max = max.max(depth);
            }
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}

fn operator_count(input: &str) -> usize {
    input.chars().filter(|c| "+-*/".contains(*c)).count()
}

// expr   := term (('+' | '-') term)*
// term   := factor (('*' | '/') factor)*
// factor := ('+' | '-')* (number | '(' expr ')')

fn expr(input: &str) -> IResult<&str, Expr> {
    let (input, first) = term(input)?;
    fold_many0(
        pair(alt((char('+'), char('-'))), term),
        move || first.clone(),
        |lhs, (op, rhs)| Expr::binary(op, lhs, rhs),
    )
    .parse(input)
}

fn term(input: &str) -> IResult<&str, Expr> {
    let (input, first) = factor(input)?;
    fold_many0(
        pair(alt((char('*'), char('/'))), factor),
        move || first.clone(),
        |lhs, (op, rhs)| Expr::binary(op, lhs, rhs),
    )
    .parse(input)
}

fn factor(input: &str) -> IResult<&str, Expr> {
    // Signs are folded in a loop; only the parity of '-' matters
    let (input, negative) = preceded(
        multispace0,
        fold_many0(
            terminated(alt((char('-'), char('+'))), multispace0),
            || false,
            |negative, sign| if sign == '-' { !negative } else { negative },
        ),
    )
    .parse(input)?;
    let (input, primary) = terminated(alt((number, parens)), multispace0).parse(input)?;
    let value = if negative {
        Expr::Neg(Box::new(primary))
    } else {
        primary
    };
    Ok((input, value))
}

fn parens(input: &str) -> IResult<&str, Expr> {
    delimited(char('('), expr, preceded(multispace0, char(')'))).parse(input)
}

fn number(input: &str) -> IResult<&str, Expr> {
    map_res(
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit0)))),
            recognize(pair(char('.'), digit1)),
        )),
        |text: &str| text.parse::<f64>().map(Expr::Literal),
    )
    .parse(input)
}
